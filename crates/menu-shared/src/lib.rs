//! # Menu Shared
//!
//! Shared configuration, telemetry, and constants for the menu service.

pub mod config;
pub mod constants;
pub mod telemetry;
