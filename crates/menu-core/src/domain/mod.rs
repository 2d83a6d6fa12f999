//! # Menu Core - Domain Module
//!
//! Domain entities for the menu service.

pub mod identity;
pub mod menu;

// Re-export all entities
pub use identity::Identity;
pub use menu::{Menu, MenuCategory, MenuItem};
