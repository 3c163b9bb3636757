pub mod agenda;
pub mod api;
pub mod request;
