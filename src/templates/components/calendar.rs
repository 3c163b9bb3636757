use crate::domain::calendario::{MesCalendario, DIAS_SEMANA};
use chrono::{Datelike, NaiveDate};
use maud::{html, Markup};

/// Month grid with prev/next navigation. Past days render as plain text.
pub fn calendar<M, D>(
    mes: MesCalendario,
    hoy: NaiveDate,
    seleccionado: Option<NaiveDate>,
    month_href: M,
    day_href: D,
) -> Markup
where
    M: Fn(MesCalendario) -> String,
    D: Fn(NaiveDate) -> String,
{
    html! {
        div class="calendar" id="calendar" {
            div class="calendar-nav" {
                a class="calendar-prev" href=(month_href(mes.anterior())) { "‹" }
                span class="calendar-title" { (mes.nombre()) " " (mes.anio()) }
                a class="calendar-next" href=(month_href(mes.siguiente())) { "›" }
            }
            table class="calendar-grid" {
                thead {
                    tr {
                        @for nombre in DIAS_SEMANA {
                            th { (nombre) }
                        }
                    }
                }
                tbody {
                    @for semana in mes.semanas(hoy) {
                        tr {
                            @for celda in semana {
                                @match celda {
                                    None => {
                                        td class="calendar-empty" {}
                                    }
                                    Some(dia) => {
                                        @let selected = seleccionado == Some(dia.fecha);
                                        @let class = match (dia.seleccionable, selected, dia.es_hoy) {
                                            (false, _, _) => "calendar-day disabled",
                                            (true, true, _) => "calendar-day selected",
                                            (true, false, true) => "calendar-day today",
                                            (true, false, false) => "calendar-day",
                                        };
                                        td class=(class) {
                                            @if dia.seleccionable {
                                                a href=(day_href(dia.fecha)) { (dia.fecha.day()) }
                                            } @else {
                                                span aria-disabled="true" { (dia.fecha.day()) }
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
