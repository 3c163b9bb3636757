// src/handlers/request.rs
use crate::errors::ServerError;
use astra::Request;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::io::Read;
use url::form_urlencoded;

pub const MAX_BODY_BYTES: u64 = 64 * 1024;

pub fn read_body(req: &mut Request) -> Result<Vec<u8>, ServerError> {
    let mut buf = Vec::new();
    req.body_mut()
        .reader()
        .take(MAX_BODY_BYTES + 1)
        .read_to_end(&mut buf)
        .map_err(|e| ServerError::BadRequest(format!("No se pudo leer el cuerpo: {e}")))?;

    if buf.len() as u64 > MAX_BODY_BYTES {
        return Err(ServerError::BadRequest("Cuerpo de la solicitud demasiado grande".into()));
    }
    Ok(buf)
}

/// Decode a JSON body. An empty body decodes as `T::default()` when
/// `allow_empty` is set.
pub fn parse_json<T>(req: &mut Request, allow_empty: bool) -> Result<T, ServerError>
where
    T: DeserializeOwned + Default,
{
    let body = read_body(req)?;
    if allow_empty && body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(&body)
        .map_err(|e| ServerError::BadRequest(format!("JSON inválido: {e}")))
}

pub fn parse_form(req: &mut Request) -> Result<HashMap<String, String>, ServerError> {
    let body = read_body(req)?;
    Ok(form_urlencoded::parse(&body).into_owned().collect())
}

pub fn query_params(req: &Request) -> HashMap<String, String> {
    req.uri()
        .query()
        .map(|q| form_urlencoded::parse(q.as_bytes()).into_owned().collect())
        .unwrap_or_default()
}

pub fn parse_id(segment: &str, what: &str) -> Result<i64, ServerError> {
    segment
        .parse::<i64>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| {
            ServerError::BadRequest(format!("Identificador de {what} inválido: {segment}"))
        })
}
