// ============================================================================
// Menu Core - Wire Projection
// File: crates/menu-core/src/dto.rs
// ============================================================================
//! Client-visible projection of menu documents

use serde::{Deserialize, Serialize};

use crate::domain::{Menu, MenuCategory, MenuItem};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItemDto {
    pub name: String,
    pub price: f64,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuCategoryDto {
    pub name: String,
    pub items: Vec<MenuItemDto>,
}

/// Wire shape of a menu.
///
/// The stored share token is deliberately not part of this projection: it is
/// only compared against the literal token a requester supplies. `author`
/// and `markdown` are output-only; inbound values are ignored or recomputed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuDto {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub categories: Vec<MenuCategoryDto>,
    pub author: String,
    #[serde(default)]
    pub shared: bool,
    #[serde(default)]
    pub markdown: Option<String>,
}

impl From<&Menu> for MenuDto {
    fn from(menu: &Menu) -> Self {
        Self {
            id: menu.id.to_string(),
            name: menu.name.clone(),
            categories: menu.categories.iter().map(MenuCategoryDto::from).collect(),
            author: menu.owner_id.to_string(),
            shared: menu.shared,
            markdown: Some(menu.markdown.clone()),
        }
    }
}

impl From<&MenuCategory> for MenuCategoryDto {
    fn from(category: &MenuCategory) -> Self {
        Self {
            name: category.name.clone(),
            items: category.items.iter().map(MenuItemDto::from).collect(),
        }
    }
}

impl From<&MenuItem> for MenuItemDto {
    fn from(item: &MenuItem) -> Self {
        Self {
            name: item.name.clone(),
            price: item.price,
            description: item.description.clone(),
            image: item.image.clone(),
        }
    }
}

impl From<MenuCategoryDto> for MenuCategory {
    fn from(dto: MenuCategoryDto) -> Self {
        Self {
            name: dto.name,
            items: dto.items.into_iter().map(MenuItem::from).collect(),
        }
    }
}

impl From<MenuItemDto> for MenuItem {
    fn from(dto: MenuItemDto) -> Self {
        Self {
            name: dto.name,
            price: dto.price,
            description: dto.description,
            image: dto.image,
        }
    }
}
