use crate::auth::Usuario;
use maud::{html, Markup, PreEscaped, DOCTYPE};

const STYLES: &str = r#"
body { font-family: system-ui, sans-serif; margin: 0; color: #1f2933; }
header { display: flex; justify-content: space-between; align-items: center; padding: .75rem 1.5rem; box-shadow: 0 1px 3px #0002; }
.container { max-width: 56rem; margin: 1.5rem auto; padding: 0 1rem; }
.container.narrow { max-width: 32rem; }
.card { border: 1px solid #d9e2ec; border-radius: 6px; padding: 1rem; margin-bottom: 1rem; }
.alert { padding: .75rem 1rem; border-radius: 4px; margin-bottom: 1rem; }
.alert-success { background: #e3f9e5; }
.alert-info { background: #e6f6ff; }
.alert-error { background: #ffe3e3; }
.calendar-grid td { width: 2.5rem; height: 2.2rem; text-align: center; }
.calendar-day.disabled { color: #9aa5b1; }
.calendar-day.selected { background: #2680c2; }
.calendar-day.selected a { color: #fff; }
.calendar-day.today { font-weight: bold; }
.time-picker { display: flex; gap: .5rem; align-items: center; margin: 1rem 0; }
.time-value { font-size: 1.5rem; font-variant-numeric: tabular-nums; }
textarea { width: 100%; min-height: 5rem; }
"#;

pub fn desktop_layout(title: &str, usuario: Option<&Usuario>, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="es" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " · Vigilancia Chagas" }
                style { (PreEscaped(STYLES)) }
            }
            body {
                header {
                    h3 { "Vigilancia entomológica · Denuncias" }
                    @if let Some(u) = usuario {
                        span class="session-user" {
                            (u.nombre) " (" (u.rol.as_str()) ")"
                        }
                    }
                }
                (content)
            }
        }
    }
}
