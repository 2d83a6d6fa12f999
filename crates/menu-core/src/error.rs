//! Domain errors

use thiserror::Error;

use crate::clients::renderer::RendererError;

/// Field category reported by the pre-write validation gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuField {
    MenuName,
    CategoryName,
    ItemName,
    ItemDescription,
    ItemPrice,
    ItemImage,
}

impl MenuField {
    pub fn message(&self) -> &'static str {
        match self {
            MenuField::MenuName => "Menu name should be valid",
            MenuField::CategoryName => "Category name should be valid",
            MenuField::ItemName => "Item name should be valid",
            MenuField::ItemDescription => "Item description should be valid",
            MenuField::ItemPrice => "Item price should be positive",
            MenuField::ItemImage => "Item image should be valid relative URI",
        }
    }
}

impl std::fmt::Display for MenuField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

#[derive(Error, Debug)]
pub enum DomainError {
    /// Returned for a missing menu and for a menu the requester may not
    /// see, so lookups never reveal which ids exist.
    #[error("Menu not found")]
    MenuNotFound,

    #[error("{0}")]
    Validation(MenuField),

    #[error("Renderer error: {0}")]
    Renderer(#[from] RendererError),

    #[error("Database error: {0}")]
    Database(String),
}
