pub mod api;
pub mod app;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod sanitize;
pub mod validation;

pub use app::{app, AppState};
