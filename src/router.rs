use crate::auth::{authenticate, Contexto};
use crate::db::Database;
use crate::domain::fechas::now_local;
use crate::errors::ServerError;
use crate::handlers::request::{parse_id, query_params};
use crate::handlers::{agenda, api};
use crate::responses::{error_response, html_response, ResultResp};
use crate::templates;
use astra::{Request, Response};
use chrono::Utc;

/// Entry point for every request. Errors become JSON under /api and an
/// HTML page elsewhere.
pub fn handle(mut req: Request, db: &Database) -> Response {
    let method = req.method().as_str().to_string();
    let path = req.uri().path().to_string();
    let is_api = path.starts_with("/api/");

    let resp = route(&mut req, db, &method, &path)
        .unwrap_or_else(|err| error_response(&err, is_api));

    log::info!("{} {} -> {}", method, path, resp.status().as_u16());
    resp
}

fn route(req: &mut Request, db: &Database, method: &str, path: &str) -> ResultResp {
    let segments: Vec<&str> = path.trim_matches('/').split('/').collect();

    match (method, segments.as_slice()) {
        ("GET", [""]) => html_response(templates::pages::home_page()),
        ("GET", ["agenda"]) => {
            context(req, db)?;
            agenda::open_agenda(&query_params(req))
        }
        ("GET", ["agenda", "vivienda", id]) => {
            let ctx = context(req, db)?;
            agenda::show(db, &ctx, parse_id(id, "vivienda")?, &query_params(req))
        }
        ("POST", ["agenda", "denuncias", id, "programar"]) => {
            let ctx = context(req, db)?;
            agenda::programar(db, &ctx, parse_id(id, "denuncia")?, req)
        }
        ("POST", ["agenda", "denuncias", id, "reprogramar"]) => {
            let ctx = context(req, db)?;
            agenda::reprogramar(db, &ctx, parse_id(id, "denuncia")?, req)
        }

        ("POST", ["api", "denuncias"]) => {
            let ctx = context(req, db)?;
            api::create_denuncia(db, &ctx, req)
        }
        ("GET", ["api", "denuncias", "vivienda", id]) => {
            let ctx = context(req, db)?;
            api::list_for_vivienda(db, &ctx, parse_id(id, "vivienda")?)
        }
        ("GET", ["api", "denuncias", id]) => {
            let ctx = context(req, db)?;
            api::get_denuncia(db, &ctx, parse_id(id, "denuncia")?)
        }
        ("GET", ["api", "denuncias", id, "historial"]) => {
            let ctx = context(req, db)?;
            api::get_historial(db, &ctx, parse_id(id, "denuncia")?)
        }
        ("PUT", ["api", "denuncias", id, "programacion"]) => {
            let ctx = context(req, db)?;
            api::put_programacion(db, &ctx, parse_id(id, "denuncia")?, req)
        }
        ("PUT", ["api", "denuncias", id, "reprogramacion"]) => {
            let ctx = context(req, db)?;
            api::put_reprogramacion(db, &ctx, parse_id(id, "denuncia")?, req)
        }
        ("PUT", ["api", "denuncias", id, "cancelacion"]) => {
            let ctx = context(req, db)?;
            api::put_cancelacion(db, &ctx, parse_id(id, "denuncia")?, req)
        }
        ("PUT", ["api", "denuncias", id, "realizacion"]) => {
            let ctx = context(req, db)?;
            api::put_realizacion(db, &ctx, parse_id(id, "denuncia")?)
        }

        _ => Err(ServerError::NotFound(format!("{method} {path}"))),
    }
}

fn context(req: &Request, db: &Database) -> Result<Contexto, ServerError> {
    authenticate(req, db, Utc::now().timestamp(), now_local())
}
