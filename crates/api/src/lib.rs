pub mod app;
pub mod config;
pub mod middleware;
pub mod routes;
pub mod services;
