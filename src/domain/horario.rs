// src/domain/horario.rs

use crate::domain::lifecycle::ensure_not_past;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use thiserror::Error;

pub const PASO_MINUTOS: u32 = 15;

/// Default visit time offered for days after today.
const HORA_INICIAL: u32 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HorarioError {
    #[error("La hora seleccionada ya pasó")]
    HoraPasada,
    #[error("Hora inválida")]
    HoraInvalida,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ajuste {
    HoraMas,
    HoraMenos,
    MinutoMas,
    MinutoMenos,
}

/// Visit time of day, minutes quantized to quarter hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoraVisita {
    hora: u32,
    minuto: u32,
}

impl HoraVisita {
    pub fn new(hora: u32, minuto: u32) -> Result<Self, HorarioError> {
        if hora > 23 || minuto > 59 || minuto % PASO_MINUTOS != 0 {
            return Err(HorarioError::HoraInvalida);
        }
        Ok(Self { hora, minuto })
    }

    pub fn hora(&self) -> u32 {
        self.hora
    }

    pub fn minuto(&self) -> u32 {
        self.minuto
    }

    pub fn en(&self, dia: NaiveDate) -> NaiveDateTime {
        dia.and_time(NaiveTime::from_hms_opt(self.hora, self.minuto, 0).unwrap_or(NaiveTime::MIN))
    }

    /// First slot offered for `dia`: the next quarter hour at or after now
    /// for today, 08:00 for later days. None when today has no slot left.
    pub fn inicial(dia: NaiveDate, ahora: NaiveDateTime) -> Option<Self> {
        if dia > ahora.date() {
            return Some(Self {
                hora: HORA_INICIAL,
                minuto: 0,
            });
        }
        if dia < ahora.date() {
            return None;
        }

        let t = ahora.time();
        let mut hora = t.hour();
        let mut minuto = t.minute().div_ceil(PASO_MINUTOS) * PASO_MINUTOS;
        if minuto == 60 {
            minuto = 0;
            hora += 1;
        }
        if hora > 23 {
            return None;
        }
        Some(Self { hora, minuto })
    }

    /// Apply one click of the time selector.
    ///
    /// Hours wrap 23 <-> 0 and minutes wrap 45 <-> 0; a minute wrap never
    /// carries into the hour. On today the click is refused when it would
    /// land before now.
    pub fn ajustar(
        self,
        ajuste: Ajuste,
        dia: NaiveDate,
        ahora: NaiveDateTime,
    ) -> Result<Self, HorarioError> {
        let candidata = match ajuste {
            Ajuste::HoraMas => Self {
                hora: (self.hora + 1) % 24,
                ..self
            },
            Ajuste::HoraMenos => Self {
                hora: (self.hora + 23) % 24,
                ..self
            },
            Ajuste::MinutoMas => Self {
                minuto: (self.minuto + PASO_MINUTOS) % 60,
                ..self
            },
            Ajuste::MinutoMenos => Self {
                minuto: (self.minuto + 60 - PASO_MINUTOS) % 60,
                ..self
            },
        };

        if dia == ahora.date() && ensure_not_past(candidata.en(dia), ahora).is_err() {
            return Err(HorarioError::HoraPasada);
        }
        Ok(candidata)
    }

    pub fn etiqueta(&self) -> String {
        format!("{:02}:{:02}", self.hora, self.minuto)
    }
}
