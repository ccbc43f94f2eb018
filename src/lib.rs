// src/lib.rs
pub mod api;
pub mod config;
pub mod health;
pub mod server;
pub mod services;
