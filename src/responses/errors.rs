use crate::errors::ServerError;
use crate::responses::json::json_body;
use crate::templates::html_error_response;
use astra::{Body, Response, ResponseBuilder};
use serde::Serialize;

pub type ResultResp = Result<Response, ServerError>;

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    mensaje: String,
}

/// Convert a ServerError into a response: JSON for the API, an HTML page
/// for everything else.
pub fn error_response(err: &ServerError, json: bool) -> Response {
    match err {
        ServerError::DbError(msg) => log::error!("database error: {msg}"),
        ServerError::InternalError => log::error!("internal error"),
        other => log::debug!("request rejected: {other}"),
    }

    if json {
        json_error_response(err)
    } else {
        html_error_response(err)
    }
}

pub fn json_error_response(err: &ServerError) -> Response {
    let body = ErrorBody {
        error: err.code(),
        mensaje: err.user_message(),
    };

    ResponseBuilder::new()
        .status(err.status())
        .header("Content-Type", "application/json; charset=utf-8")
        .body(Body::from(json_body(&body)))
        .unwrap_or_else(|_| Response::new(Body::from("Internal Server Error")))
}
