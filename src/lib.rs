pub mod config;
pub mod message;
pub mod replies;
pub mod routes;
pub mod services;
pub mod state;
