pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod nutrition;
pub mod recognition;
pub mod services;
