//! External service client traits (ports)

pub mod renderer;

pub use renderer::{RendererClient, RendererError};
