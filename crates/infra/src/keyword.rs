//! Linear, case-insensitive keyword matching over catalog fields.

use catalog_products::Product;

/// True when `keyword` occurs (case-insensitively) in the title, category,
/// subcategory, brand, description, any tag, model or sku.
///
/// A blank keyword matches nothing.
pub fn matches_keyword(product: &Product, keyword: &str) -> bool {
    if keyword.trim().is_empty() {
        return false;
    }
    let needle = keyword.to_lowercase();
    let contains = |field: Option<&str>| {
        field.is_some_and(|value| value.to_lowercase().contains(&needle))
    };

    contains(Some(product.title()))
        || contains(product.category())
        || contains(product.subcategory())
        || contains(product.brand())
        || contains(product.description())
        || product.tags().iter().any(|tag| contains(Some(tag)))
        || contains(product.model())
        || contains(product.sku())
}
