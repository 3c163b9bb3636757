pub mod connection;
pub mod denuncias;
pub mod usuarios;
pub mod viviendas;

pub use connection::{init_db, Database};
