//! Pre-write validation rules for menu documents

use http::Uri;

use crate::dto::MenuDto;
use crate::error::{DomainError, MenuField};

/// Characters allowed in menu and category names besides letters, digits,
/// and whitespace.
const NAME_EXTRA_CHARS: &[char] = &[',', '.', '!', '-', '_'];

/// Item names and descriptions additionally allow `(`, `)`, and `=`.
const ITEM_EXTRA_CHARS: &[char] = &[',', '.', '!', '-', '_', '(', ')', '='];

pub fn is_valid_name(value: &str) -> bool {
    value
        .chars()
        .all(|c| c.is_alphanumeric() || c.is_whitespace() || NAME_EXTRA_CHARS.contains(&c))
}

pub fn is_valid_item_text(value: &str) -> bool {
    value
        .chars()
        .all(|c| c.is_alphanumeric() || c.is_whitespace() || ITEM_EXTRA_CHARS.contains(&c))
}

/// Image references must parse as a URI reference, relative or absolute.
/// Absent images are always valid.
pub fn is_valid_image(image: Option<&str>) -> bool {
    match image {
        Some(reference) => reference.parse::<Uri>().is_ok(),
        None => true,
    }
}

pub fn validate_menu_name(name: &str) -> Result<(), DomainError> {
    if is_valid_name(name) {
        Ok(())
    } else {
        Err(DomainError::Validation(MenuField::MenuName))
    }
}

/// Validate a full menu replacement before it is accepted.
///
/// Fail-fast: the first failing rule wins and names its field category.
pub fn validate_menu(menu: &MenuDto) -> Result<(), DomainError> {
    validate_menu_name(&menu.name)?;

    for category in &menu.categories {
        if !is_valid_name(&category.name) {
            return Err(DomainError::Validation(MenuField::CategoryName));
        }
    }

    for category in &menu.categories {
        if category.items.iter().any(|i| !is_valid_item_text(&i.name)) {
            return Err(DomainError::Validation(MenuField::ItemName));
        }
        if category
            .items
            .iter()
            .any(|i| !is_valid_item_text(&i.description))
        {
            return Err(DomainError::Validation(MenuField::ItemDescription));
        }
        if category.items.iter().any(|i| i.price <= 0.0) {
            return Err(DomainError::Validation(MenuField::ItemPrice));
        }
        if category
            .items
            .iter()
            .any(|i| !is_valid_image(i.image.as_deref()))
        {
            return Err(DomainError::Validation(MenuField::ItemImage));
        }
    }

    Ok(())
}
