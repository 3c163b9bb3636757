// src/db/usuarios.rs
use crate::auth::context::{Rol, Usuario};
use crate::errors::ServerError;
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension};

/// Users are provisioned by the account service; only tests create them here.
#[cfg(test)]
pub fn insert_usuario(
    conn: &Connection,
    usuario: &str,
    nombre: &str,
    rol: Rol,
    municipio_id: Option<i64>,
    now: i64,
) -> Result<i64, ServerError> {
    conn.execute(
        r#"
        insert into usuarios (usuario, nombre, rol, municipio_id, created_at)
        values (?, ?, ?, ?, ?)
        "#,
        params![usuario, nombre, rol.as_str(), municipio_id, now],
    )
    .map_err(|e| ServerError::DbError(format!("insert usuario failed: {e}")))?;
    Ok(conn.last_insert_rowid())
}

pub fn get_usuario(conn: &Connection, id: i64) -> Result<Option<Usuario>, ServerError> {
    conn.query_row(
        "select id, usuario, nombre, rol, municipio_id from usuarios where id = ? and activo = 1",
        params![id],
        |row| {
            let rol: String = row.get(3)?;
            Ok(Usuario {
                id: row.get(0)?,
                usuario: row.get(1)?,
                nombre: row.get(2)?,
                rol: Rol::parse(&rol).ok_or_else(|| {
                    rusqlite::Error::FromSqlConversionFailure(3, Type::Text, "unknown rol".into())
                })?,
                municipio_id: row.get(4)?,
            })
        },
    )
    .optional()
    .map_err(|e| ServerError::DbError(format!("select usuario failed: {e}")))
}
