use crate::domain::horario::{Ajuste, HoraVisita};
use chrono::{NaiveDate, NaiveDateTime};
use maud::{html, Markup};

fn step(
    label: &str,
    ajuste: Ajuste,
    hora: HoraVisita,
    dia: NaiveDate,
    ahora: NaiveDateTime,
    href: &dyn Fn(HoraVisita) -> String,
) -> Markup {
    match hora.ajustar(ajuste, dia, ahora) {
        Ok(nueva) => html! {
            a class="time-step" href=(href(nueva)) { (label) }
        },
        Err(e) => html! {
            button class="time-step" type="button" disabled title=(e.to_string()) { (label) }
        },
    }
}

/// Hour and quarter-hour selector for the chosen day.
pub fn time_picker<H>(hora: HoraVisita, dia: NaiveDate, ahora: NaiveDateTime, href: H) -> Markup
where
    H: Fn(HoraVisita) -> String,
{
    html! {
        div class="time-picker" id="time-picker" {
            div class="time-unit" {
                (step("−", Ajuste::HoraMenos, hora, dia, ahora, &href))
                span class="time-value" { (format!("{:02}", hora.hora())) }
                (step("+", Ajuste::HoraMas, hora, dia, ahora, &href))
            }
            span class="time-sep" { ":" }
            div class="time-unit" {
                (step("−", Ajuste::MinutoMenos, hora, dia, ahora, &href))
                span class="time-value" { (format!("{:02}", hora.minuto())) }
                (step("+", Ajuste::MinutoMas, hora, dia, ahora, &href))
            }
        }
    }
}
