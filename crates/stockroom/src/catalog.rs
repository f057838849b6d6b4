// File: src/catalog.rs
// Purpose: Pure catalog logic - id assignment, partial updates, filtering, dashboard stats
//
// Nothing here touches storage; the store composes these functions with persistence.

use crate::model::{Product, ProductUpdate, StockStatus, Transaction};

/// Number of ledger rows shown on the dashboard
pub const RECENT_TRANSACTIONS: usize = 5;

/// Next id for a new product: one past the largest id, or 1 for an empty catalog.
/// `None` once the largest id is `u32::MAX`.
///
/// # Examples
/// ```
/// use stockroom::catalog::next_id;
/// use stockroom::model::seed_products;
///
/// assert_eq!(next_id(&[]), Some(1));
/// assert_eq!(next_id(&seed_products()), Some(5));
/// ```
pub fn next_id(products: &[Product]) -> Option<u32> {
    match products.iter().map(|p| p.id).max() {
        Some(max) => max.checked_add(1),
        None => Some(1),
    }
}

/// Apply updates to a product (Pure function - no mutation)
///
/// Fields that are `None` in the update are preserved, and the id never changes.
pub fn apply_product_updates(product: Product, updates: ProductUpdate) -> Product {
    Product {
        sku: updates.sku.unwrap_or(product.sku),
        name: updates.name.unwrap_or(product.name),
        category: updates.category.unwrap_or(product.category),
        qty: updates.qty.unwrap_or(product.qty),
        image: updates.image.unwrap_or(product.image),
        ..product
    }
}

/// Case-insensitive substring match on name or sku. An empty needle matches everything.
pub fn matches_text(product: &Product, text: &str) -> bool {
    if text.is_empty() {
        return true;
    }
    let needle = text.to_lowercase();
    product.name.to_lowercase().contains(&needle) || product.sku.to_lowercase().contains(&needle)
}

/// Exact category match. An empty category matches everything.
pub fn matches_category(product: &Product, category: &str) -> bool {
    category.is_empty() || product.category == category
}

/// Products matching both the search text and the category, in catalog order
///
/// # Examples
/// ```
/// use stockroom::catalog::filter_products;
/// use stockroom::model::seed_products;
///
/// let seed = seed_products();
/// let hits = filter_products(&seed, "mouse", "");
/// assert_eq!(hits.len(), 1);
/// assert_eq!(hits[0].sku, "PROD-001");
/// ```
pub fn filter_products<'a>(products: &'a [Product], text: &str, category: &str) -> Vec<&'a Product> {
    products
        .iter()
        .filter(|p| matches_text(p, text) && matches_category(p, category))
        .collect()
}

/// Distinct categories in first-seen order
pub fn categories(products: &[Product]) -> Vec<&str> {
    let mut seen: Vec<&str> = Vec::new();
    for product in products {
        if !seen.contains(&product.category.as_str()) {
            seen.push(product.category.as_str());
        }
    }
    seen
}

/// Leading slice of the ledger shown on the dashboard
pub fn recent_transactions(ledger: &[Transaction], limit: usize) -> &[Transaction] {
    &ledger[..ledger.len().min(limit)]
}

/// Figures shown on the dashboard cards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DashboardStats {
    pub total_stock: u64,
    pub low_stock: usize,
    /// Counts the whole ledger. Date filtering is not implemented.
    pub today_transactions: usize,
}

impl DashboardStats {
    pub fn compute(products: &[Product], ledger: &[Transaction]) -> Self {
        Self {
            total_stock: products.iter().map(|p| u64::from(p.qty)).sum(),
            low_stock: products
                .iter()
                .filter(|p| p.status() == StockStatus::LowStock)
                .count(),
            today_transactions: ledger.len(),
        }
    }
}
