// src/auth/sessions.rs
use crate::auth::context::Usuario;
use crate::auth::token::{generate_session_token, hash_token};
use crate::db::usuarios::get_usuario;
use crate::errors::ServerError;
use rusqlite::{params, Connection, OptionalExtension};

pub const DEFAULT_SESSION_TTL_SECS: i64 = 60 * 60 * 12;

/// Issue a session for `usuario_id` and return the raw token.
/// Sessions are normally issued by the login service sharing this database.
pub fn create_session(
    conn: &Connection,
    usuario_id: i64,
    now: i64,
    ttl_secs: i64,
) -> Result<String, ServerError> {
    let raw_token = generate_session_token();
    let hash = hash_token(&raw_token);

    conn.execute(
        r#"
        insert into sesiones (usuario_id, token_hash, created_at, expires_at)
        values (?, ?, ?, ?)
        "#,
        params![usuario_id, hash.as_slice(), now, now + ttl_secs],
    )
    .map_err(|e| ServerError::DbError(format!("create session failed: {e}")))?;

    Ok(raw_token)
}

/// Resolve a raw token to its active user. Expired, revoked or unknown
/// tokens yield None.
pub fn load_usuario_from_session(
    conn: &Connection,
    raw_token: &str,
    now: i64,
) -> Result<Option<Usuario>, ServerError> {
    let hash = hash_token(raw_token);

    let usuario_id: Option<i64> = conn
        .query_row(
            r#"
            select usuario_id
            from sesiones
            where token_hash = ?
              and expires_at > ?
              and revoked_at is null
            "#,
            params![hash.as_slice(), now],
            |row| row.get(0),
        )
        .optional()
        .map_err(|e| ServerError::DbError(format!("session lookup failed: {e}")))?;

    match usuario_id {
        Some(id) => get_usuario(conn, id),
        None => Ok(None),
    }
}
