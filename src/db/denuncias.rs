// src/db/denuncias.rs
use crate::domain::denuncia::{Denuncia, EventoDenuncia};
use crate::domain::lifecycle::Transicion;
use crate::errors::ServerError;
use chrono::NaiveDateTime;
use rusqlite::{params, Connection, OptionalExtension, Row};

const SELECT_DENUNCIA: &str = r#"
    select denuncia_id, vivienda_id, estado_denuncia, fecha_denuncia,
           fecha_programacion, motivo_reprogramacion, descripcion
    from denuncias
"#;

fn denuncia_from_row(row: &Row<'_>) -> rusqlite::Result<Denuncia> {
    Ok(Denuncia {
        denuncia_id: row.get(0)?,
        vivienda_id: row.get(1)?,
        estado_denuncia: row.get(2)?,
        fecha_denuncia: row.get(3)?,
        fecha_programacion: row.get(4)?,
        motivo_reprogramacion: row.get(5)?,
        descripcion: row.get(6)?,
    })
}

/// Insert a new denuncia in `recibida` and return its id.
pub fn insert_denuncia(
    conn: &Connection,
    vivienda_id: i64,
    descripcion: &str,
    now: NaiveDateTime,
) -> Result<i64, ServerError> {
    conn.execute(
        r#"
        insert into denuncias (vivienda_id, estado_denuncia, fecha_denuncia, descripcion)
        values (?, 'recibida', ?, ?)
        "#,
        params![vivienda_id, now, descripcion],
    )
    .map_err(|e| ServerError::DbError(format!("insert denuncia failed: {e}")))?;

    Ok(conn.last_insert_rowid())
}

pub fn get_denuncia(conn: &Connection, denuncia_id: i64) -> Result<Option<Denuncia>, ServerError> {
    conn.query_row(
        &format!("{SELECT_DENUNCIA} where denuncia_id = ?"),
        params![denuncia_id],
        denuncia_from_row,
    )
    .optional()
    .map_err(|e| ServerError::DbError(format!("select denuncia failed: {e}")))
}

/// All denuncias of a household, most recent `fecha_denuncia` first.
pub fn list_for_vivienda(
    conn: &Connection,
    vivienda_id: i64,
) -> Result<Vec<Denuncia>, ServerError> {
    let mut stmt = conn
        .prepare(&format!(
            "{SELECT_DENUNCIA} where vivienda_id = ? order by fecha_denuncia desc, denuncia_id desc"
        ))
        .map_err(|e| ServerError::DbError(e.to_string()))?;

    let rows = stmt
        .query_map(params![vivienda_id], denuncia_from_row)
        .map_err(|e| ServerError::DbError(e.to_string()))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r.map_err(|e| ServerError::DbError(e.to_string()))?);
    }
    Ok(out)
}

/// Write a transition, guarded by the status it was computed from.
/// Returns false when the row no longer has `transicion.desde`.
pub fn apply_transition(
    conn: &Connection,
    denuncia_id: i64,
    transicion: &Transicion,
    now: NaiveDateTime,
) -> Result<bool, ServerError> {
    let changed = conn
        .execute(
            r#"
            update denuncias
            set estado_denuncia = ?,
                fecha_programacion = ?,
                motivo_reprogramacion = ?,
                updated_at = ?
            where denuncia_id = ?
              and estado_denuncia = ?
            "#,
            params![
                transicion.hacia,
                transicion.fecha_programacion,
                transicion.motivo_reprogramacion,
                now,
                denuncia_id,
                transicion.desde,
            ],
        )
        .map_err(|e| ServerError::DbError(format!("update denuncia failed: {e}")))?;

    Ok(changed == 1)
}

pub fn record_event(
    conn: &Connection,
    denuncia_id: i64,
    transicion: &Transicion,
    motivo: Option<&str>,
    usuario_id: i64,
    now: NaiveDateTime,
) -> Result<(), ServerError> {
    conn.execute(
        r#"
        insert into denuncia_historial
            (denuncia_id, operacion, estado_anterior, estado_nuevo,
             fecha_programacion, motivo, usuario_id, registrado_en)
        values (?, ?, ?, ?, ?, ?, ?, ?)
        "#,
        params![
            denuncia_id,
            transicion.operacion.as_str(),
            transicion.desde,
            transicion.hacia,
            transicion.fecha_programacion,
            motivo,
            usuario_id,
            now,
        ],
    )
    .map_err(|e| ServerError::DbError(format!("insert historial failed: {e}")))?;
    Ok(())
}

pub fn history_for(
    conn: &Connection,
    denuncia_id: i64,
) -> Result<Vec<EventoDenuncia>, ServerError> {
    let mut stmt = conn
        .prepare(
            r#"
            select denuncia_id, operacion, estado_anterior, estado_nuevo,
                   fecha_programacion, motivo, usuario_id, registrado_en
            from denuncia_historial
            where denuncia_id = ?
            order by id
            "#,
        )
        .map_err(|e| ServerError::DbError(e.to_string()))?;

    let rows = stmt
        .query_map(params![denuncia_id], |row| {
            Ok(EventoDenuncia {
                denuncia_id: row.get(0)?,
                operacion: row.get(1)?,
                estado_anterior: row.get(2)?,
                estado_nuevo: row.get(3)?,
                fecha_programacion: row.get(4)?,
                motivo: row.get(5)?,
                usuario_id: row.get(6)?,
                registrado_en: row.get(7)?,
            })
        })
        .map_err(|e| ServerError::DbError(e.to_string()))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r.map_err(|e| ServerError::DbError(e.to_string()))?);
    }
    Ok(out)
}
