pub mod auth;
pub mod config;
pub mod db;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod responses;
pub mod router;
pub mod services;
pub mod templates;

#[cfg(test)]
mod tests;
