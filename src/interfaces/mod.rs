pub mod auth;
pub mod csv;
pub mod http;
