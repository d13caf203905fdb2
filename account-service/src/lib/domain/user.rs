pub mod credential_service;
pub mod errors;
pub mod models;
pub mod ports;
pub mod service;
