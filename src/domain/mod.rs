pub mod calendario;
pub mod denuncia;
pub mod estado;
pub mod fechas;
pub mod horario;
pub mod lifecycle;
