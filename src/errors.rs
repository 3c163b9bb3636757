// errors.rs
use crate::domain::lifecycle::TransitionError;
use thiserror::Error;

/// Errors originating from either the server logic
/// (routing, missing resources, etc.) or downstream layers (DB).
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// The lifecycle rejected the requested transition.
    #[error(transparent)]
    Transition(#[from] TransitionError),

    /// The stored status changed between read and write.
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database Error: {0}")]
    DbError(String),

    #[error("Internal Server Error")]
    InternalError,
}

impl ServerError {
    pub fn status(&self) -> u16 {
        match self {
            ServerError::NotFound(_) => 404,
            ServerError::BadRequest(_) => 400,
            ServerError::Unauthorized(_) => 401,
            ServerError::Forbidden(_) => 403,
            ServerError::Transition(e) if e.is_precondition() => 409,
            ServerError::Transition(_) => 422,
            ServerError::Conflict(_) => 409,
            ServerError::DbError(_) | ServerError::InternalError => 500,
        }
    }

    /// Stable machine-readable code used in JSON error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            ServerError::NotFound(_) => "no_encontrado",
            ServerError::BadRequest(_) => "solicitud_invalida",
            ServerError::Unauthorized(_) => "no_autenticado",
            ServerError::Forbidden(_) => "prohibido",
            ServerError::Transition(e) => e.code(),
            ServerError::Conflict(_) => "conflicto",
            ServerError::DbError(_) => "error_base_datos",
            ServerError::InternalError => "error_interno",
        }
    }

    /// Message shown to the user. Storage details stay in the logs.
    pub fn user_message(&self) -> String {
        match self {
            ServerError::NotFound(msg)
            | ServerError::BadRequest(msg)
            | ServerError::Unauthorized(msg)
            | ServerError::Forbidden(msg)
            | ServerError::Conflict(msg) => msg.clone(),
            ServerError::Transition(e) => e.to_string(),
            ServerError::DbError(_) | ServerError::InternalError => {
                "Error de conexión con el servidor".to_string()
            }
        }
    }
}
