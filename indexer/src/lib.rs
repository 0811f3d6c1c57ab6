pub mod app_state;
pub mod config;
pub mod repository;
pub mod services;
pub mod sync;
