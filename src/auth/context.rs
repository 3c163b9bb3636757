// src/auth/context.rs
//
// The authenticated user travels as an explicit `Contexto` argument from the
// router into every handler and service call.

use crate::auth::sessions::load_usuario_from_session;
use crate::db::Database;
use crate::domain::denuncia::Vivienda;
use crate::domain::lifecycle::Operacion;
use crate::errors::ServerError;
use astra::Request;
use chrono::NaiveDateTime;
use serde::Serialize;

pub const SESSION_COOKIE: &str = "session";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Rol {
    Tecnico,
    Supervisor,
    Administrador,
}

impl Rol {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rol::Tecnico => "tecnico",
            Rol::Supervisor => "supervisor",
            Rol::Administrador => "administrador",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "tecnico" => Some(Rol::Tecnico),
            "supervisor" => Some(Rol::Supervisor),
            "administrador" => Some(Rol::Administrador),
            _ => None,
        }
    }

    /// Cancelling is administrative; everything else is field work.
    pub fn puede(&self, operacion: Operacion) -> bool {
        match operacion {
            Operacion::Cancelar => matches!(self, Rol::Supervisor | Rol::Administrador),
            Operacion::Programar | Operacion::Reprogramar | Operacion::Completar => true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Usuario {
    pub id: i64,
    pub usuario: String,
    pub nombre: String,
    pub rol: Rol,
    /// None means access to every municipio.
    pub municipio_id: Option<i64>,
}

/// Per-request context: who is acting, and when.
#[derive(Debug, Clone)]
pub struct Contexto {
    pub usuario: Usuario,
    pub ahora: NaiveDateTime,
}

impl Contexto {
    pub fn new(usuario: Usuario, ahora: NaiveDateTime) -> Self {
        Self { usuario, ahora }
    }

    pub fn require(&self, operacion: Operacion) -> Result<(), ServerError> {
        if self.usuario.rol.puede(operacion) {
            Ok(())
        } else {
            Err(ServerError::Forbidden(format!(
                "El rol {} no puede {}",
                self.usuario.rol.as_str(),
                operacion
            )))
        }
    }

    pub fn ensure_scope(&self, vivienda: &Vivienda) -> Result<(), ServerError> {
        match self.usuario.municipio_id {
            None => Ok(()),
            Some(m) if vivienda.municipio_id == Some(m) => Ok(()),
            Some(_) => Err(ServerError::Forbidden(
                "La vivienda no pertenece a su municipio".into(),
            )),
        }
    }
}

/// Raw session token from `Authorization: Bearer` or the session cookie.
pub fn session_token(req: &Request) -> Option<String> {
    let headers = req.headers();

    if let Some(auth) = headers.get("authorization").and_then(|v| v.to_str().ok()) {
        if let Some(token) = auth.strip_prefix("Bearer ") {
            let token = token.trim();
            if !token.is_empty() {
                return Some(token.to_string());
            }
        }
    }

    headers
        .get_all("cookie")
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(k, v)| *k == SESSION_COOKIE && !v.is_empty())
        .map(|(_, v)| v.to_string())
}

/// Build the request context or fail with 401.
pub fn authenticate(
    req: &Request,
    db: &Database,
    now_unix: i64,
    ahora: NaiveDateTime,
) -> Result<Contexto, ServerError> {
    let token = session_token(req)
        .ok_or_else(|| ServerError::Unauthorized("Sesión requerida".into()))?;

    let usuario = db
        .with_conn(|conn| load_usuario_from_session(conn, &token, now_unix))?
        .ok_or_else(|| ServerError::Unauthorized("Sesión inválida o expirada".into()))?;

    Ok(Contexto::new(usuario, ahora))
}
