// src/domain/calendario.rs

use chrono::{Datelike, NaiveDate};

const NOMBRES_MES: [&str; 12] = [
    "Enero",
    "Febrero",
    "Marzo",
    "Abril",
    "Mayo",
    "Junio",
    "Julio",
    "Agosto",
    "Septiembre",
    "Octubre",
    "Noviembre",
    "Diciembre",
];

/// Years the calendar accepts from request parameters.
pub const ANIO_MIN: i32 = 1900;
pub const ANIO_MAX: i32 = 9999;

pub const DIAS_SEMANA: [&str; 7] = ["Dom", "Lun", "Mar", "Mié", "Jue", "Vie", "Sáb"];

/// A month shown on the scheduling calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MesCalendario {
    anio: i32,
    mes: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiaCalendario {
    pub fecha: NaiveDate,
    /// Days before today cannot be picked for a visit.
    pub seleccionable: bool,
    pub es_hoy: bool,
}

impl MesCalendario {
    /// `mes` is 1-based. Returns None outside `ANIO_MIN..=ANIO_MAX`.
    pub fn new(anio: i32, mes: u32) -> Option<Self> {
        if !(ANIO_MIN..=ANIO_MAX).contains(&anio) {
            return None;
        }
        NaiveDate::from_ymd_opt(anio, mes, 1).map(|_| Self { anio, mes })
    }

    pub fn containing(fecha: NaiveDate) -> Self {
        Self {
            anio: fecha.year(),
            mes: fecha.month(),
        }
    }

    pub fn anio(&self) -> i32 {
        self.anio
    }

    pub fn mes(&self) -> u32 {
        self.mes
    }

    pub fn nombre(&self) -> &'static str {
        NOMBRES_MES[(self.mes - 1) as usize]
    }

    pub fn siguiente(&self) -> Self {
        if self.mes == 12 {
            Self {
                anio: self.anio + 1,
                mes: 1,
            }
        } else {
            Self {
                anio: self.anio,
                mes: self.mes + 1,
            }
        }
    }

    pub fn anterior(&self) -> Self {
        if self.mes == 1 {
            Self {
                anio: self.anio - 1,
                mes: 12,
            }
        } else {
            Self {
                anio: self.anio,
                mes: self.mes - 1,
            }
        }
    }

    pub fn primer_dia(&self) -> NaiveDate {
        // Validated in the constructors.
        NaiveDate::from_ymd_opt(self.anio, self.mes, 1).unwrap_or(NaiveDate::MIN)
    }

    pub fn dia(&self, dia: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.anio, self.mes, dia)
    }

    /// Last valid day of the month, 0 if chrono can't represent it.
    pub fn dias_en_mes(&self) -> u32 {
        (28..=31).rev().find(|d| self.dia(*d).is_some()).unwrap_or(0)
    }

    /// Weekday of the 1st, Sunday = 0.
    pub fn desplazamiento_inicial(&self) -> u32 {
        self.primer_dia().weekday().num_days_from_sunday()
    }

    /// Calendar rows of seven cells; `None` pads before the 1st and after
    /// the last day.
    pub fn semanas(&self, hoy: NaiveDate) -> Vec<Vec<Option<DiaCalendario>>> {
        let offset = self.desplazamiento_inicial() as usize;
        let mut celdas: Vec<Option<DiaCalendario>> = vec![None; offset];

        celdas.extend((1..=self.dias_en_mes()).filter_map(|d| self.dia(d)).map(|fecha| {
            Some(DiaCalendario {
                fecha,
                seleccionable: fecha >= hoy,
                es_hoy: fecha == hoy,
            })
        }));

        while celdas.len() % 7 != 0 {
            celdas.push(None);
        }

        celdas.chunks(7).map(|w| w.to_vec()).collect()
    }
}
