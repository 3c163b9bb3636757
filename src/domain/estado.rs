// src/domain/estado.rs

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle status of a denuncia.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EstadoDenuncia {
    Recibida,
    Programada,
    Reprogramada,
    Realizada,
    Cancelada,
}

impl EstadoDenuncia {
    pub const ALL: [EstadoDenuncia; 5] = [
        EstadoDenuncia::Recibida,
        EstadoDenuncia::Programada,
        EstadoDenuncia::Reprogramada,
        EstadoDenuncia::Realizada,
        EstadoDenuncia::Cancelada,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EstadoDenuncia::Recibida => "recibida",
            EstadoDenuncia::Programada => "programada",
            EstadoDenuncia::Reprogramada => "reprogramada",
            EstadoDenuncia::Realizada => "realizada",
            EstadoDenuncia::Cancelada => "cancelada",
        }
    }

    /// Human label for the agenda page.
    pub fn etiqueta(&self) -> &'static str {
        match self {
            EstadoDenuncia::Recibida => "Recibida",
            EstadoDenuncia::Programada => "Programada",
            EstadoDenuncia::Reprogramada => "Reprogramada",
            EstadoDenuncia::Realizada => "Realizada",
            EstadoDenuncia::Cancelada => "Cancelada",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, EstadoDenuncia::Realizada | EstadoDenuncia::Cancelada)
    }
}

impl fmt::Display for EstadoDenuncia {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownEstado(pub String);

impl fmt::Display for UnknownEstado {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown estado_denuncia: {:?}", self.0)
    }
}

impl std::error::Error for UnknownEstado {}

impl FromStr for EstadoDenuncia {
    type Err = UnknownEstado;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EstadoDenuncia::ALL
            .into_iter()
            .find(|e| e.as_str() == s)
            .ok_or_else(|| UnknownEstado(s.to_string()))
    }
}

impl ToSql for EstadoDenuncia {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for EstadoDenuncia {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let s = value.as_str()?;
        s.parse().map_err(|e| FromSqlError::Other(Box::new(e)))
    }
}
