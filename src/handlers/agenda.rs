// src/handlers/agenda.rs
//
// Server-rendered scheduling screen. GET renders the calendar and time
// selector from query parameters; POST submits the chosen slot and either
// redirects back (303) or re-renders with the rejection shown.

use crate::auth::Contexto;
use crate::db::Database;
use crate::domain::calendario::{MesCalendario, ANIO_MAX, ANIO_MIN};
use crate::domain::horario::HoraVisita;
use crate::domain::lifecycle::{ensure_not_past, Operacion};
use crate::errors::ServerError;
use crate::handlers::request::{parse_form, parse_id};
use crate::responses::{html_response, html_response_with_status, redirect, ResultResp};
use crate::services::denuncias;
use crate::templates::components::AlertKind;
use crate::templates::pages::{agenda_page, agenda_url, AgendaVm};
use astra::Request;
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use std::collections::HashMap;

/// Selection carried in the query string or form body.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Seleccion {
    mes: Option<MesCalendario>,
    dia: Option<NaiveDate>,
    hora: Option<HoraVisita>,
}

impl Seleccion {
    fn from_params(params: &HashMap<String, String>) -> Self {
        let num = |k: &str| params.get(k).and_then(|v| v.trim().parse::<u32>().ok());

        let mes = params
            .get("anio")
            .and_then(|a| a.trim().parse::<i32>().ok())
            .zip(num("mes"))
            .and_then(|(anio, mes)| MesCalendario::new(anio, mes));
        let dia = params
            .get("dia")
            .and_then(|d| NaiveDate::parse_from_str(d.trim(), "%Y-%m-%d").ok())
            .filter(|d| (ANIO_MIN..=ANIO_MAX).contains(&d.year()));
        let hora = num("hora")
            .zip(num("minuto"))
            .and_then(|(h, m)| HoraVisita::new(h, m).ok());

        Self { mes, dia, hora }
    }

    /// Drop past days and past times; offer a default slot for a chosen day.
    fn normalized(self, ahora: NaiveDateTime) -> Self {
        let dia = self.dia.filter(|d| *d >= ahora.date());
        let hora = dia.and_then(|d| match self.hora {
            Some(h) if ensure_not_past(h.en(d), ahora).is_ok() => Some(h),
            _ => HoraVisita::inicial(d, ahora),
        });
        let mes = self
            .mes
            .unwrap_or_else(|| MesCalendario::containing(dia.unwrap_or(ahora.date())));
        Self {
            mes: Some(mes),
            dia,
            hora,
        }
    }
}

fn aviso_from_query(params: &HashMap<String, String>) -> Option<(AlertKind, String)> {
    match params.get("aviso").map(String::as_str) {
        Some("programada") => Some((AlertKind::Success, "Visita programada".into())),
        Some("reprogramada") => Some((AlertKind::Success, "Visita reprogramada".into())),
        _ => None,
    }
}

fn build_vm(
    db: &Database,
    ctx: &Contexto,
    vivienda_id: i64,
    seleccion: Seleccion,
    motivo: String,
    aviso: Option<(AlertKind, String)>,
) -> Result<AgendaVm, ServerError> {
    let (vivienda, denuncia) = denuncias::most_recent_for_vivienda(db, ctx, vivienda_id)?;
    let seleccion = seleccion.normalized(ctx.ahora);

    Ok(AgendaVm {
        usuario: ctx.usuario.clone(),
        vivienda,
        denuncia,
        mes: seleccion
            .mes
            .unwrap_or_else(|| MesCalendario::containing(ctx.ahora.date())),
        ahora: ctx.ahora,
        dia: seleccion.dia,
        hora: seleccion.hora,
        motivo,
        aviso,
    })
}

/// `GET /agenda?vivienda=N` from the home form.
pub fn open_agenda(params: &HashMap<String, String>) -> ResultResp {
    let raw = params
        .get("vivienda")
        .ok_or_else(|| ServerError::BadRequest("Indique el número de vivienda".into()))?;
    let vivienda_id = parse_id(raw.trim(), "vivienda")?;
    redirect(&format!("/agenda/vivienda/{vivienda_id}"))
}

/// `GET /agenda/vivienda/{id}`
pub fn show(
    db: &Database,
    ctx: &Contexto,
    vivienda_id: i64,
    params: &HashMap<String, String>,
) -> ResultResp {
    let vm = build_vm(
        db,
        ctx,
        vivienda_id,
        Seleccion::from_params(params),
        String::new(),
        aviso_from_query(params),
    )?;
    html_response(agenda_page(&vm))
}

/// `POST /agenda/denuncias/{id}/programar`
pub fn programar(db: &Database, ctx: &Contexto, denuncia_id: i64, req: &mut Request) -> ResultResp {
    submit(db, ctx, denuncia_id, req, Operacion::Programar)
}

/// `POST /agenda/denuncias/{id}/reprogramar`
pub fn reprogramar(
    db: &Database,
    ctx: &Contexto,
    denuncia_id: i64,
    req: &mut Request,
) -> ResultResp {
    submit(db, ctx, denuncia_id, req, Operacion::Reprogramar)
}

fn submit(
    db: &Database,
    ctx: &Contexto,
    denuncia_id: i64,
    req: &mut Request,
    operacion: Operacion,
) -> ResultResp {
    let form = parse_form(req)?;
    let denuncia = denuncias::get(db, ctx, denuncia_id)?;
    let seleccion = Seleccion::from_params(&form);
    let motivo = form.get("motivo").cloned().unwrap_or_default();

    let resultado = seleccion
        .dia
        .ok_or_else(|| ServerError::BadRequest("Seleccione un día en el calendario".into()))
        .and_then(|dia| {
            let hora = seleccion
                .hora
                .ok_or_else(|| ServerError::BadRequest("Seleccione una hora válida".into()))?;
            Ok((dia, hora))
        })
        .and_then(|(dia, hora)| {
            let fecha = hora.en(dia);
            let actualizada = match operacion {
                Operacion::Reprogramar => {
                    denuncias::reschedule(db, ctx, denuncia_id, fecha, &motivo)?
                }
                _ => denuncias::schedule(db, ctx, denuncia_id, fecha)?,
            };
            Ok((actualizada, dia, hora))
        });

    match resultado {
        Ok((actualizada, dia, hora)) => {
            let aviso = match operacion {
                Operacion::Reprogramar => "reprogramada",
                _ => "programada",
            };
            let url = agenda_url(
                actualizada.vivienda_id,
                MesCalendario::containing(dia),
                Some(dia),
                Some(hora),
            );
            redirect(&format!("{url}&aviso={aviso}"))
        }
        Err(err) if is_user_correctable(&err) => {
            let vm = build_vm(
                db,
                ctx,
                denuncia.vivienda_id,
                Seleccion {
                    mes: seleccion.dia.map(MesCalendario::containing),
                    ..seleccion
                },
                motivo,
                Some((AlertKind::Error, err.user_message())),
            )?;
            html_response_with_status(err.status(), agenda_page(&vm))
        }
        Err(err) => Err(err),
    }
}

/// Rejections the user can fix from the same screen.
fn is_user_correctable(err: &ServerError) -> bool {
    matches!(
        err,
        ServerError::BadRequest(_) | ServerError::Transition(_) | ServerError::Conflict(_)
    )
}
