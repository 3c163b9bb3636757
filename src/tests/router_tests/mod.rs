mod agenda_tests;
mod denuncia_api_tests;
