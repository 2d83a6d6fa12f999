//! Markdown derivation for menu documents

use crate::domain::MenuCategory;

/// Render the canonical markdown projection of a menu's structured content.
///
/// Pure function of `(name, categories)`: identical input yields
/// byte-identical output, order of categories and items is preserved.
pub fn generate(name: &str, categories: &[MenuCategory]) -> String {
    let mut out = String::new();
    out.push_str(name);
    out.push('\n');
    out.push_str(&"=".repeat(name.chars().count()));
    out.push_str("\n\n");
    for category in categories {
        out.push_str(&category.name);
        out.push('\n');
        out.push_str(&"-".repeat(category.name.chars().count()));
        out.push_str("\n\n");
        for item in &category.items {
            out.push_str(&format!("**{}** — {}\n\n", item.name, format_price(item.price)));
            out.push_str(&item.description);
            out.push_str("\n\n");
            if let Some(image) = &item.image {
                out.push_str(&format!("![{}]({})\n\n", item.name, item_image_path(image)));
            }
        }
    }
    out
}

/// Image embeds resolve through the file route of the upload service.
fn item_image_path(image: &str) -> String {
    format!("file/{}", image)
}

/// Integral prices keep one decimal, so `5` renders as `5.0`.
fn format_price(price: f64) -> String {
    if price.fract() == 0.0 {
        format!("{:.1}", price)
    } else {
        format!("{}", price)
    }
}
