use crate::auth::Usuario;
use crate::domain::calendario::MesCalendario;
use crate::domain::denuncia::{Denuncia, Vivienda};
use crate::domain::fechas::format_fecha;
use crate::domain::horario::HoraVisita;
use crate::domain::lifecycle::{
    allowed_operations, ensure_not_past, Operacion, TransitionError, MOTIVO_MAX_CHARS,
};
use crate::templates::components::{alert, calendar, card, time_picker, AlertKind};
use crate::templates::desktop_layout;
use chrono::{NaiveDate, NaiveDateTime};
use maud::{html, Markup};
use url::form_urlencoded;

pub struct AgendaVm {
    pub usuario: Usuario,
    pub vivienda: Vivienda,
    /// Most recent denuncia of the household, if any.
    pub denuncia: Option<Denuncia>,
    pub mes: MesCalendario,
    pub ahora: NaiveDateTime,
    pub dia: Option<NaiveDate>,
    pub hora: Option<HoraVisita>,
    /// Motive typed before a rejected submit.
    pub motivo: String,
    pub aviso: Option<(AlertKind, String)>,
}

pub fn agenda_url(
    vivienda_id: i64,
    mes: MesCalendario,
    dia: Option<NaiveDate>,
    hora: Option<HoraVisita>,
) -> String {
    let mut q = form_urlencoded::Serializer::new(String::new());
    q.append_pair("anio", &mes.anio().to_string());
    q.append_pair("mes", &mes.mes().to_string());
    if let Some(d) = dia {
        q.append_pair("dia", &d.to_string());
    }
    if let Some(h) = hora {
        q.append_pair("hora", &h.hora().to_string());
        q.append_pair("minuto", &h.minuto().to_string());
    }
    format!("/agenda/vivienda/{}?{}", vivienda_id, q.finish())
}

impl AgendaVm {
    fn url(&self, mes: MesCalendario, dia: Option<NaiveDate>, hora: Option<HoraVisita>) -> String {
        agenda_url(self.vivienda.vivienda_id, mes, dia, hora)
    }

    /// Keep the chosen time when it is still valid on `dia`.
    fn hora_para(&self, dia: NaiveDate) -> Option<HoraVisita> {
        match self.hora {
            Some(h) if ensure_not_past(h.en(dia), self.ahora).is_ok() => Some(h),
            _ => HoraVisita::inicial(dia, self.ahora),
        }
    }

    fn seleccion(&self) -> Option<NaiveDateTime> {
        Some(self.hora?.en(self.dia?))
    }
}

pub fn agenda_page(vm: &AgendaVm) -> Markup {
    desktop_layout(
        "Agenda de visita",
        Some(&vm.usuario),
        html! {
            main class="container" {
                h1 { "Agenda de visita" }
                p class="lead" {
                    "Vivienda " strong { (vm.vivienda.codigo) }
                    @if let Some(dir) = &vm.vivienda.direccion {
                        " · " (dir)
                    }
                }

                @if let Some((kind, msg)) = &vm.aviso {
                    (alert(*kind, msg))
                }

                @match &vm.denuncia {
                    None => {
                        (alert(AlertKind::Info, "La vivienda no tiene denuncias registradas."))
                    }
                    Some(d) => {
                        (denuncia_card(d))
                        (acciones(vm, d))
                    }
                }
            }
        },
    )
}

fn denuncia_card(d: &Denuncia) -> Markup {
    card(
        &format!("Denuncia #{}", d.denuncia_id),
        html! {
            p {
                "Estado: "
                span class=(format!("badge estado-{}", d.estado_denuncia)) { (d.estado_denuncia.etiqueta()) }
            }
            p { "Recibida el " (format_fecha(&d.fecha_denuncia)) }
            p { (d.descripcion) }
            @if let Some(f) = &d.fecha_programacion {
                p { "Visita programada: " strong { (format_fecha(f)) } }
            }
            @if let Some(m) = &d.motivo_reprogramacion {
                p { "Motivo de reprogramación: " em { (m) } }
            }
        },
    )
}

fn acciones(vm: &AgendaVm, d: &Denuncia) -> Markup {
    let permitidas = allowed_operations(d.estado_denuncia);
    let puede_programar = permitidas.contains(&Operacion::Programar);
    let puede_reprogramar = permitidas.contains(&Operacion::Reprogramar);

    let bloqueo = |operacion| {
        TransitionError::InvalidState {
            operacion,
            estado: d.estado_denuncia,
        }
        .to_string()
    };

    if d.estado_denuncia.is_terminal() {
        return alert(AlertKind::Info, &bloqueo(Operacion::Programar));
    }

    html! {
        @if puede_programar || puede_reprogramar {
            section class="card scheduler" {
                h3 { "Fecha y hora de la visita" }
                (calendar(
                    vm.mes,
                    vm.ahora.date(),
                    vm.dia,
                    |mes| vm.url(mes, vm.dia, vm.hora),
                    |dia| vm.url(vm.mes, Some(dia), vm.hora_para(dia)),
                ))
                @match (vm.dia, vm.hora) {
                    (Some(dia), Some(hora)) => {
                        (time_picker(hora, dia, vm.ahora, |h| vm.url(vm.mes, Some(dia), Some(h))))
                    }
                    (Some(_), None) => {
                        (alert(AlertKind::Info, "No quedan horarios disponibles para este día."))
                    }
                    _ => {
                        p class="hint" { "Seleccione un día en el calendario." }
                    }
                }
                @if let Some(sel) = vm.seleccion() {
                    p class="selection" { "Visita: " strong { (format_fecha(&sel)) } }
                }
            }
        }

        @if puede_programar {
            form method="post" action=(format!("/agenda/denuncias/{}/programar", d.denuncia_id)) class="action-form" {
                (hidden_selection(vm))
                button type="submit" class="primary" { "Programar visita" }
            }
        } @else {
            (alert(AlertKind::Info, &bloqueo(Operacion::Programar)))
        }

        @if puede_reprogramar {
            form method="post" action=(format!("/agenda/denuncias/{}/reprogramar", d.denuncia_id)) class="action-form" {
                (hidden_selection(vm))
                label for="motivo" { "Motivo de reprogramación" }
                textarea id="motivo" name="motivo" maxlength=(MOTIVO_MAX_CHARS) required { (vm.motivo) }
                button type="submit" class="primary" { "Reprogramar visita" }
            }
        } @else {
            (alert(AlertKind::Info, &bloqueo(Operacion::Reprogramar)))
        }
    }
}

fn hidden_selection(vm: &AgendaVm) -> Markup {
    html! {
        @if let Some(dia) = vm.dia {
            input type="hidden" name="dia" value=(dia.to_string());
        }
        @if let Some(hora) = vm.hora {
            input type="hidden" name="hora" value=(hora.hora());
            input type="hidden" name="minuto" value=(hora.minuto());
        }
    }
}
