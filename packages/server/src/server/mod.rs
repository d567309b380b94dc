// HTTP server setup (Axum)
pub mod app;
pub mod error_page;
pub mod routes;

pub use app::*;
