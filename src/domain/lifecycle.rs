// src/domain/lifecycle.rs

//! Denuncia lifecycle rules.
//!
//! ```text
//! recibida --Programar--> programada --Reprogramar--> reprogramada (repeatable)
//!                          |    \                        |
//!                          |     +------Completar--------+--> realizada
//!     any non-terminal ----+------------Cancelar------------> cancelada
//! ```
//!
//! Both the JSON API and the agenda page go through these functions before
//! anything is written, so a request that skipped the UI checks is still
//! rejected here.

use crate::domain::denuncia::Denuncia;
use crate::domain::estado::EstadoDenuncia;
use crate::domain::fechas::truncate_to_minute;
use chrono::NaiveDateTime;
use std::fmt;
use thiserror::Error;

pub const MOTIVO_MAX_CHARS: usize = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operacion {
    Programar,
    Reprogramar,
    Completar,
    Cancelar,
}

impl Operacion {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operacion::Programar => "programar",
            Operacion::Reprogramar => "reprogramar",
            Operacion::Completar => "completar",
            Operacion::Cancelar => "cancelar",
        }
    }
}

impl fmt::Display for Operacion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("{}", rejection_message(.operacion, .estado))]
    InvalidState {
        operacion: Operacion,
        estado: EstadoDenuncia,
    },

    #[error("La fecha y hora de la visita deben ser posteriores al momento actual")]
    FechaEnPasado,

    #[error("El motivo de reprogramación es obligatorio")]
    MotivoVacio,

    #[error("El motivo de reprogramación no puede superar {max} caracteres (tiene {len})")]
    MotivoDemasiadoLargo { len: usize, max: usize },
}

impl TransitionError {
    /// Source-state mismatch, as opposed to bad input.
    pub fn is_precondition(&self) -> bool {
        matches!(self, TransitionError::InvalidState { .. })
    }

    pub fn code(&self) -> &'static str {
        match self {
            TransitionError::InvalidState { .. } => "estado_invalido",
            TransitionError::FechaEnPasado => "fecha_en_pasado",
            TransitionError::MotivoVacio => "motivo_vacio",
            TransitionError::MotivoDemasiadoLargo { .. } => "motivo_demasiado_largo",
        }
    }
}

fn rejection_message(operacion: &Operacion, estado: &EstadoDenuncia) -> String {
    match (operacion, estado) {
        (_, EstadoDenuncia::Realizada) => "La denuncia ya fue realizada".to_string(),
        (_, EstadoDenuncia::Cancelada) => "La denuncia fue cancelada".to_string(),
        (Operacion::Programar, EstadoDenuncia::Programada | EstadoDenuncia::Reprogramada) => {
            "La denuncia ya fue programada; use reprogramar para cambiar la fecha".to_string()
        }
        (Operacion::Reprogramar | Operacion::Completar, EstadoDenuncia::Recibida) => {
            "La denuncia aún no ha sido programada".to_string()
        }
        (op, estado) => format!("No se puede {op} una denuncia en estado {estado}"),
    }
}

/// The new values a transition writes. Fields not touched by the operation
/// carry the current values over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transicion {
    pub operacion: Operacion,
    pub desde: EstadoDenuncia,
    pub hacia: EstadoDenuncia,
    pub fecha_programacion: Option<NaiveDateTime>,
    pub motivo_reprogramacion: Option<String>,
}

impl Transicion {
    fn keeping(actual: &Denuncia, operacion: Operacion, hacia: EstadoDenuncia) -> Self {
        Self {
            operacion,
            desde: actual.estado_denuncia,
            hacia,
            fecha_programacion: actual.fecha_programacion,
            motivo_reprogramacion: actual.motivo_reprogramacion.clone(),
        }
    }

    pub fn applied_to(&self, actual: Denuncia) -> Denuncia {
        Denuncia {
            estado_denuncia: self.hacia,
            fecha_programacion: self.fecha_programacion,
            motivo_reprogramacion: self.motivo_reprogramacion.clone(),
            ..actual
        }
    }
}

/// Operations valid from `estado`, in the order the UI offers them.
pub fn allowed_operations(estado: EstadoDenuncia) -> Vec<Operacion> {
    match estado {
        EstadoDenuncia::Recibida => vec![Operacion::Programar, Operacion::Cancelar],
        EstadoDenuncia::Programada | EstadoDenuncia::Reprogramada => vec![
            Operacion::Reprogramar,
            Operacion::Completar,
            Operacion::Cancelar,
        ],
        EstadoDenuncia::Realizada | EstadoDenuncia::Cancelada => Vec::new(),
    }
}

pub fn check_allowed(operacion: Operacion, estado: EstadoDenuncia) -> Result<(), TransitionError> {
    if allowed_operations(estado).contains(&operacion) {
        Ok(())
    } else {
        Err(TransitionError::InvalidState { operacion, estado })
    }
}

/// Reject visit times before `ahora`, compared at minute precision.
pub fn ensure_not_past(fecha: NaiveDateTime, ahora: NaiveDateTime) -> Result<(), TransitionError> {
    if truncate_to_minute(fecha) < truncate_to_minute(ahora) {
        return Err(TransitionError::FechaEnPasado);
    }
    Ok(())
}

/// Non-blank and at most `MOTIVO_MAX_CHARS` characters. Returned verbatim.
pub fn validate_motivo(motivo: &str) -> Result<String, TransitionError> {
    if motivo.trim().is_empty() {
        return Err(TransitionError::MotivoVacio);
    }
    let len = motivo.chars().count();
    if len > MOTIVO_MAX_CHARS {
        return Err(TransitionError::MotivoDemasiadoLargo {
            len,
            max: MOTIVO_MAX_CHARS,
        });
    }
    Ok(motivo.to_string())
}

/// Programar: recibida → programada.
pub fn schedule(
    actual: &Denuncia,
    fecha: NaiveDateTime,
    ahora: NaiveDateTime,
) -> Result<Transicion, TransitionError> {
    check_allowed(Operacion::Programar, actual.estado_denuncia)?;
    ensure_not_past(fecha, ahora)?;

    Ok(Transicion {
        fecha_programacion: Some(truncate_to_minute(fecha)),
        ..Transicion::keeping(actual, Operacion::Programar, EstadoDenuncia::Programada)
    })
}

/// Reprogramar: programada | reprogramada → reprogramada.
pub fn reschedule(
    actual: &Denuncia,
    fecha: NaiveDateTime,
    motivo: &str,
    ahora: NaiveDateTime,
) -> Result<Transicion, TransitionError> {
    check_allowed(Operacion::Reprogramar, actual.estado_denuncia)?;
    ensure_not_past(fecha, ahora)?;
    let motivo = validate_motivo(motivo)?;

    Ok(Transicion {
        fecha_programacion: Some(truncate_to_minute(fecha)),
        motivo_reprogramacion: Some(motivo),
        ..Transicion::keeping(actual, Operacion::Reprogramar, EstadoDenuncia::Reprogramada)
    })
}

/// Field completion reported by the spraying (RR1) form.
pub fn complete(actual: &Denuncia) -> Result<Transicion, TransitionError> {
    check_allowed(Operacion::Completar, actual.estado_denuncia)?;
    Ok(Transicion::keeping(
        actual,
        Operacion::Completar,
        EstadoDenuncia::Realizada,
    ))
}

/// Administrative cancel from any non-terminal status.
pub fn cancel(actual: &Denuncia) -> Result<Transicion, TransitionError> {
    check_allowed(Operacion::Cancelar, actual.estado_denuncia)?;
    Ok(Transicion::keeping(
        actual,
        Operacion::Cancelar,
        EstadoDenuncia::Cancelada,
    ))
}
