// ============================================================================
// Menu Core - Menu Entity
// File: crates/menu-core/src/domain/menu.rs
// Description: Menu aggregate with per-resource visibility rules
// ============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::markdown;

/// Single item on a menu
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub name: String,
    pub price: f64,
    pub description: String,
    pub image: Option<String>,
}

/// Named, ordered group of items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuCategory {
    pub name: String,
    pub items: Vec<MenuItem>,
}

/// Menu aggregate.
///
/// `share_token` and `markdown` are server-owned: the token is assigned once
/// at creation and carried forward verbatim on every update; the markdown is
/// always the derivation of `(name, categories)` as of the last write.
/// Neither is ever accepted from a client.
#[derive(Debug, Clone)]
pub struct Menu {
    pub id: Uuid,
    pub name: String,
    pub owner_id: Uuid,
    pub categories: Vec<MenuCategory>,
    pub shared: bool,
    pub share_token: String,
    pub markdown: String,

    // Audit fields
    pub created_at: DateTime<Utc>,
    pub modified_at: Option<DateTime<Utc>>,
}

impl Menu {
    /// Create a new menu for `owner_id`: empty categories, not shared,
    /// a random share token, and the markdown derived immediately.
    pub fn new(owner_id: Uuid, name: String) -> Self {
        let markdown = markdown::generate(&name, &[]);
        Self {
            id: Uuid::new_v4(),
            name,
            owner_id,
            categories: Vec::new(),
            shared: false,
            share_token: menu_security::token::generate_share_token(),
            markdown,
            created_at: Utc::now(),
            modified_at: None,
        }
    }

    pub fn is_owned_by(&self, user_id: &Uuid) -> bool {
        self.owner_id == *user_id
    }

    /// Read visibility: owner, public `shared` flag, or a non-empty share
    /// token matching the stored one. The three grants are independent.
    pub fn is_visible_to(&self, requester: Option<&Uuid>, share_token: Option<&str>) -> bool {
        let owned = requester.is_some_and(|id| self.is_owned_by(id));
        let token_matches =
            share_token.is_some_and(|token| !token.is_empty() && token == self.share_token);
        owned || self.shared || token_matches
    }
}
