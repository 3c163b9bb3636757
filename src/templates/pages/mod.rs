pub mod agenda;
pub mod home;

pub use agenda::{agenda_page, agenda_url, AgendaVm};
pub use home::home_page;
