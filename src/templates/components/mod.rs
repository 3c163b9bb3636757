use maud::{html, Markup};

pub mod calendar;
pub mod card;
pub mod error;
pub mod time_picker;

pub use calendar::calendar;
pub use card::card;
pub use error::html_error_response;
pub use time_picker::time_picker;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Success,
    Info,
    Error,
}

pub fn alert(kind: AlertKind, message: &str) -> Markup {
    let class = match kind {
        AlertKind::Success => "alert alert-success",
        AlertKind::Info => "alert alert-info",
        AlertKind::Error => "alert alert-error",
    };
    html! {
        div class=(class) role="alert" { (message) }
    }
}
