// src/services/denuncias.rs
//
// Every write goes through `apply`: load, scope check, lifecycle rule,
// guarded update and history row, all inside one SQLite transaction.

use crate::auth::Contexto;
use crate::db::denuncias as db_denuncias;
use crate::db::viviendas::get_vivienda;
use crate::db::Database;
use crate::domain::denuncia::{most_recent, Denuncia, EventoDenuncia, NuevaDenuncia, Vivienda};
use crate::domain::lifecycle::{self, Operacion, Transicion, TransitionError};
use crate::errors::ServerError;
use chrono::NaiveDateTime;
use rusqlite::{Connection, TransactionBehavior};

fn load_vivienda(
    conn: &Connection,
    ctx: &Contexto,
    vivienda_id: i64,
) -> Result<Vivienda, ServerError> {
    let vivienda = get_vivienda(conn, vivienda_id)?
        .ok_or_else(|| ServerError::NotFound(format!("Vivienda {vivienda_id} no encontrada")))?;
    ctx.ensure_scope(&vivienda)?;
    Ok(vivienda)
}

fn load_denuncia(
    conn: &Connection,
    ctx: &Contexto,
    denuncia_id: i64,
) -> Result<Denuncia, ServerError> {
    let denuncia = db_denuncias::get_denuncia(conn, denuncia_id)?
        .ok_or_else(|| ServerError::NotFound(format!("Denuncia {denuncia_id} no encontrada")))?;
    load_vivienda(conn, ctx, denuncia.vivienda_id)?;
    Ok(denuncia)
}

pub fn create(
    db: &Database,
    ctx: &Contexto,
    nueva: &NuevaDenuncia,
) -> Result<Denuncia, ServerError> {
    let descripcion = nueva
        .validated_descripcion()
        .map_err(ServerError::BadRequest)?;

    let denuncia = db.with_conn(|conn| {
        load_vivienda(conn, ctx, nueva.vivienda_id)?;
        let id = db_denuncias::insert_denuncia(conn, nueva.vivienda_id, &descripcion, ctx.ahora)?;
        db_denuncias::get_denuncia(conn, id)?.ok_or(ServerError::InternalError)
    })?;

    log::info!(
        "denuncia {} created for vivienda {} by {}",
        denuncia.denuncia_id,
        denuncia.vivienda_id,
        ctx.usuario.usuario
    );
    Ok(denuncia)
}

pub fn get(db: &Database, ctx: &Contexto, denuncia_id: i64) -> Result<Denuncia, ServerError> {
    db.with_conn(|conn| load_denuncia(conn, ctx, denuncia_id))
}

pub fn list_for_vivienda(
    db: &Database,
    ctx: &Contexto,
    vivienda_id: i64,
) -> Result<Vec<Denuncia>, ServerError> {
    db.with_conn(|conn| {
        load_vivienda(conn, ctx, vivienda_id)?;
        db_denuncias::list_for_vivienda(conn, vivienda_id)
    })
}

/// The household and the denuncia offered for scheduling actions.
pub fn most_recent_for_vivienda(
    db: &Database,
    ctx: &Contexto,
    vivienda_id: i64,
) -> Result<(Vivienda, Option<Denuncia>), ServerError> {
    db.with_conn(|conn| {
        let vivienda = load_vivienda(conn, ctx, vivienda_id)?;
        let list = db_denuncias::list_for_vivienda(conn, vivienda_id)?;
        Ok((vivienda, most_recent(&list).cloned()))
    })
}

pub fn history(
    db: &Database,
    ctx: &Contexto,
    denuncia_id: i64,
) -> Result<Vec<EventoDenuncia>, ServerError> {
    db.with_conn(|conn| {
        load_denuncia(conn, ctx, denuncia_id)?;
        db_denuncias::history_for(conn, denuncia_id)
    })
}

pub fn schedule(
    db: &Database,
    ctx: &Contexto,
    denuncia_id: i64,
    fecha: NaiveDateTime,
) -> Result<Denuncia, ServerError> {
    apply(db, ctx, denuncia_id, Operacion::Programar, None, |d| {
        lifecycle::schedule(d, fecha, ctx.ahora)
    })
}

pub fn reschedule(
    db: &Database,
    ctx: &Contexto,
    denuncia_id: i64,
    fecha: NaiveDateTime,
    motivo: &str,
) -> Result<Denuncia, ServerError> {
    apply(db, ctx, denuncia_id, Operacion::Reprogramar, Some(motivo), |d| {
        lifecycle::reschedule(d, fecha, motivo, ctx.ahora)
    })
}

pub fn cancel(
    db: &Database,
    ctx: &Contexto,
    denuncia_id: i64,
    motivo: Option<&str>,
) -> Result<Denuncia, ServerError> {
    apply(db, ctx, denuncia_id, Operacion::Cancelar, motivo, lifecycle::cancel)
}

pub fn complete(db: &Database, ctx: &Contexto, denuncia_id: i64) -> Result<Denuncia, ServerError> {
    apply(db, ctx, denuncia_id, Operacion::Completar, None, lifecycle::complete)
}

fn apply<F>(
    db: &Database,
    ctx: &Contexto,
    denuncia_id: i64,
    operacion: Operacion,
    motivo: Option<&str>,
    rule: F,
) -> Result<Denuncia, ServerError>
where
    F: FnOnce(&Denuncia) -> Result<Transicion, TransitionError>,
{
    ctx.require(operacion)?;

    let updated = db.with_conn(|conn| {
        let tx = conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(|e| ServerError::DbError(format!("begin transaction failed: {e}")))?;

        let actual = load_denuncia(&tx, ctx, denuncia_id)?;
        let transicion = rule(&actual).map_err(|e| {
            log::warn!(
                "{} rejected for denuncia {} ({}) by {}: {}",
                operacion,
                denuncia_id,
                actual.estado_denuncia,
                ctx.usuario.usuario,
                e
            );
            e
        })?;

        if !db_denuncias::apply_transition(&tx, denuncia_id, &transicion, ctx.ahora)? {
            return Err(ServerError::Conflict(
                "La denuncia cambió de estado; recargue e intente nuevamente".into(),
            ));
        }
        db_denuncias::record_event(
            &tx,
            denuncia_id,
            &transicion,
            motivo,
            ctx.usuario.id,
            ctx.ahora,
        )?;

        tx.commit()
            .map_err(|e| ServerError::DbError(format!("commit failed: {e}")))?;

        Ok(transicion.applied_to(actual))
    })?;

    log::info!(
        "denuncia {} {} -> {} by {}",
        denuncia_id,
        operacion,
        updated.estado_denuncia,
        ctx.usuario.usuario
    );
    Ok(updated)
}
