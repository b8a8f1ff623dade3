pub mod api;
pub mod config;
pub mod database;
pub mod middleware;
pub mod models;
pub mod server;
pub mod services;
pub mod utils;
pub mod web;
