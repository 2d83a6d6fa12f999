//! # Menu Infrastructure
//!
//! Database and renderer client implementations (adapters).

pub mod database;
pub mod renderer;

pub use database::{create_pool, PgMenuRepository};
pub use renderer::HttpRendererClient;
