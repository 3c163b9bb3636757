// src/domain/fechas.rs

use chrono::{DateTime, Local, NaiveDateTime, Timelike};

const FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
];

/// Parse a visit date/time as sent by clients.
///
/// Accepts `YYYY-MM-DDTHH:MM[:SS]`, the same with a space separator, and
/// RFC 3339 with an offset (converted to local wall-clock time). The result
/// is truncated to the minute.
pub fn parse_fecha_programacion(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    let parsed = FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|dt| dt.with_timezone(&Local).naive_local())
        })?;

    Some(truncate_to_minute(parsed))
}

pub fn truncate_to_minute(dt: NaiveDateTime) -> NaiveDateTime {
    dt.with_second(0)
        .and_then(|d| d.with_nanosecond(0))
        .unwrap_or(dt)
}

/// Current local wall-clock time.
pub fn now_local() -> NaiveDateTime {
    Local::now().naive_local()
}

/// `YYYY-MM-DD HH:MM`, the format shown on the agenda.
pub fn format_fecha(dt: &NaiveDateTime) -> String {
    dt.format("%Y-%m-%d %H:%M").to_string()
}
