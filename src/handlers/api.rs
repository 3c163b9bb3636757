// src/handlers/api.rs
//
// JSON endpoints under /api. Every handler receives an authenticated
// `Contexto` and delegates the decision to `services::denuncias`.

use crate::auth::Contexto;
use crate::db::Database;
use crate::domain::denuncia::NuevaDenuncia;
use crate::domain::fechas::parse_fecha_programacion;
use crate::errors::ServerError;
use crate::handlers::request::parse_json;
use crate::responses::{json_response, ResultResp};
use crate::services::denuncias;
use astra::Request;
use chrono::NaiveDateTime;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
struct ProgramacionBody {
    #[serde(default)]
    fecha_programacion: String,
}

#[derive(Debug, Default, Deserialize)]
struct ReprogramacionBody {
    #[serde(default)]
    fecha_programacion: String,
    #[serde(default)]
    motivo_reprogramacion: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct CancelacionBody {
    #[serde(default)]
    motivo: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct NuevaDenunciaBody {
    #[serde(default)]
    vivienda_id: Option<i64>,
    #[serde(default)]
    descripcion: String,
}

fn fecha(raw: &str) -> Result<NaiveDateTime, ServerError> {
    parse_fecha_programacion(raw).ok_or_else(|| {
        ServerError::BadRequest(format!(
            "fecha_programacion inválida ({raw:?}); use AAAA-MM-DDTHH:MM"
        ))
    })
}

pub fn create_denuncia(db: &Database, ctx: &Contexto, req: &mut Request) -> ResultResp {
    let body: NuevaDenunciaBody = parse_json(req, false)?;
    let vivienda_id = body
        .vivienda_id
        .ok_or_else(|| ServerError::BadRequest("vivienda_id es obligatorio".into()))?;

    let nueva = NuevaDenuncia {
        vivienda_id,
        descripcion: body.descripcion,
    };
    let denuncia = denuncias::create(db, ctx, &nueva)?;
    json_response(201, &denuncia)
}

pub fn get_denuncia(db: &Database, ctx: &Contexto, denuncia_id: i64) -> ResultResp {
    json_response(200, &denuncias::get(db, ctx, denuncia_id)?)
}

/// Newest first.
pub fn list_for_vivienda(db: &Database, ctx: &Contexto, vivienda_id: i64) -> ResultResp {
    json_response(200, &denuncias::list_for_vivienda(db, ctx, vivienda_id)?)
}

pub fn get_historial(db: &Database, ctx: &Contexto, denuncia_id: i64) -> ResultResp {
    json_response(200, &denuncias::history(db, ctx, denuncia_id)?)
}

pub fn put_programacion(
    db: &Database,
    ctx: &Contexto,
    denuncia_id: i64,
    req: &mut Request,
) -> ResultResp {
    let body: ProgramacionBody = parse_json(req, false)?;
    let fecha = fecha(&body.fecha_programacion)?;
    json_response(200, &denuncias::schedule(db, ctx, denuncia_id, fecha)?)
}

pub fn put_reprogramacion(
    db: &Database,
    ctx: &Contexto,
    denuncia_id: i64,
    req: &mut Request,
) -> ResultResp {
    let body: ReprogramacionBody = parse_json(req, false)?;
    let fecha = fecha(&body.fecha_programacion)?;
    let motivo = body.motivo_reprogramacion.unwrap_or_default();
    json_response(200, &denuncias::reschedule(db, ctx, denuncia_id, fecha, &motivo)?)
}

pub fn put_cancelacion(
    db: &Database,
    ctx: &Contexto,
    denuncia_id: i64,
    req: &mut Request,
) -> ResultResp {
    let body: CancelacionBody = parse_json(req, true)?;
    let motivo = body.motivo.as_deref().map(str::trim).filter(|m| !m.is_empty());
    json_response(200, &denuncias::cancel(db, ctx, denuncia_id, motivo)?)
}

pub fn put_realizacion(db: &Database, ctx: &Contexto, denuncia_id: i64) -> ResultResp {
    json_response(200, &denuncias::complete(db, ctx, denuncia_id)?)
}
