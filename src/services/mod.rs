pub mod denuncias;
