//! Renderer client implementations

pub mod http_client;

pub use http_client::HttpRendererClient;
