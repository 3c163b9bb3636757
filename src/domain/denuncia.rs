// src/domain/denuncia.rs

use crate::domain::estado::EstadoDenuncia;
use chrono::NaiveDateTime;
use serde::Serialize;

pub const DESCRIPCION_MAX_CHARS: usize = 2000;

/// One complaint / work order for a household.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Denuncia {
    pub denuncia_id: i64,
    pub vivienda_id: i64,
    pub estado_denuncia: EstadoDenuncia,
    pub fecha_denuncia: NaiveDateTime,
    pub fecha_programacion: Option<NaiveDateTime>,
    pub motivo_reprogramacion: Option<String>,
    pub descripcion: String,
}

/// Creation payload for `POST /api/denuncias`.
#[derive(Debug, Clone)]
pub struct NuevaDenuncia {
    pub vivienda_id: i64,
    pub descripcion: String,
}

impl NuevaDenuncia {
    /// Trimmed description, or an error message for the client.
    pub fn validated_descripcion(&self) -> Result<String, String> {
        let d = self.descripcion.trim();
        if d.is_empty() {
            return Err("La descripción de la denuncia es obligatoria".into());
        }
        if d.chars().count() > DESCRIPCION_MAX_CHARS {
            return Err(format!(
                "La descripción no puede superar {DESCRIPCION_MAX_CHARS} caracteres"
            ));
        }
        Ok(d.to_string())
    }
}

/// One applied transition, as listed by `GET /api/denuncias/{id}/historial`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventoDenuncia {
    pub denuncia_id: i64,
    pub operacion: String,
    pub estado_anterior: EstadoDenuncia,
    pub estado_nuevo: EstadoDenuncia,
    pub fecha_programacion: Option<NaiveDateTime>,
    pub motivo: Option<String>,
    pub usuario_id: i64,
    pub registrado_en: NaiveDateTime,
}

/// Household row; only what scheduling needs to scope access.
#[derive(Debug, Clone, PartialEq)]
pub struct Vivienda {
    pub vivienda_id: i64,
    pub municipio_id: Option<i64>,
    pub codigo: String,
    pub direccion: Option<String>,
}

/// Pick the denuncia offered for scheduling actions: the latest by
/// `fecha_denuncia`. Ties keep the first one in the given order.
pub fn most_recent(denuncias: &[Denuncia]) -> Option<&Denuncia> {
    denuncias.iter().fold(None, |best: Option<&Denuncia>, d| match best {
        Some(b) if b.fecha_denuncia >= d.fecha_denuncia => Some(b),
        _ => Some(d),
    })
}
