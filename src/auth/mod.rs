pub mod context;
pub mod sessions;
pub mod token;

pub use context::{authenticate, Contexto, Rol, Usuario};
