// src/db/viviendas.rs
//
// Household rows are owned by the household module; scheduling only needs
// to look them up (and tests need to create them).
use crate::domain::denuncia::Vivienda;
use crate::errors::ServerError;
use rusqlite::{params, Connection, OptionalExtension};

#[cfg(test)]
pub fn insert_municipio(conn: &Connection, nombre: &str) -> Result<i64, ServerError> {
    conn.execute("insert into municipios (nombre) values (?)", params![nombre])
        .map_err(|e| ServerError::DbError(format!("insert municipio failed: {e}")))?;
    Ok(conn.last_insert_rowid())
}

#[cfg(test)]
pub fn insert_vivienda(
    conn: &Connection,
    municipio_id: Option<i64>,
    codigo: &str,
    direccion: Option<&str>,
    now: chrono::NaiveDateTime,
) -> Result<i64, ServerError> {
    conn.execute(
        r#"
        insert into viviendas (municipio_id, codigo, direccion, created_at)
        values (?, ?, ?, ?)
        "#,
        params![municipio_id, codigo, direccion, now],
    )
    .map_err(|e| ServerError::DbError(format!("insert vivienda failed: {e}")))?;
    Ok(conn.last_insert_rowid())
}

pub fn get_vivienda(conn: &Connection, vivienda_id: i64) -> Result<Option<Vivienda>, ServerError> {
    conn.query_row(
        "select vivienda_id, municipio_id, codigo, direccion from viviendas where vivienda_id = ?",
        params![vivienda_id],
        |row| {
            Ok(Vivienda {
                vivienda_id: row.get(0)?,
                municipio_id: row.get(1)?,
                codigo: row.get(2)?,
                direccion: row.get(3)?,
            })
        },
    )
    .optional()
    .map_err(|e| ServerError::DbError(format!("select vivienda failed: {e}")))
}
