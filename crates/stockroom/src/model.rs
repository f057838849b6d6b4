// File: src/model.rs
// Purpose: Product and stock-movement records, stock status, and seed data

use serde::{Deserialize, Serialize};
use std::fmt;

/// Quantities strictly below this (and above zero) count as low stock
pub const LOW_STOCK_THRESHOLD: u32 = 10;

/// Image used when a product is saved without one
pub const PLACEHOLDER_IMAGE: &str = "https://placehold.co/50x50/png";

// ============================================================================
// DOMAIN MODELS
// ============================================================================

/// A catalog entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Product {
    pub id: u32,
    pub sku: String,
    pub name: String,
    pub category: String,
    pub qty: u32,
    pub image: String,
}

impl Product {
    pub fn status(&self) -> StockStatus {
        StockStatus::classify(self.qty)
    }
}

/// Fields for a product that has not been assigned an id yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub sku: String,
    pub name: String,
    pub category: String,
    pub qty: u32,
    pub image: String,
}

impl NewProduct {
    pub fn with_id(self, id: u32) -> Product {
        Product {
            id,
            sku: self.sku,
            name: self.name,
            category: self.category,
            qty: self.qty,
            image: self.image,
        }
    }
}

/// Partial update - `None` fields keep their current value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductUpdate {
    pub sku: Option<String>,
    pub name: Option<String>,
    pub category: Option<String>,
    pub qty: Option<u32>,
    pub image: Option<String>,
}

impl From<NewProduct> for ProductUpdate {
    fn from(fields: NewProduct) -> Self {
        Self {
            sku: Some(fields.sku),
            name: Some(fields.name),
            category: Some(fields.category),
            qty: Some(fields.qty),
            image: Some(fields.image),
        }
    }
}

/// Direction of a stock movement
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum MovementKind {
    #[serde(rename = "IN")]
    In,
    #[serde(rename = "OUT")]
    Out,
}

impl MovementKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MovementKind::In => "IN",
            MovementKind::Out => "OUT",
        }
    }

    /// Human-readable label for tables and badges
    pub fn label(&self) -> &'static str {
        match self {
            MovementKind::In => "Stock In",
            MovementKind::Out => "Stock Out",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "IN" => Some(MovementKind::In),
            "OUT" => Some(MovementKind::Out),
            _ => None,
        }
    }
}

impl fmt::Display for MovementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A ledger entry. Never reconciled against catalog quantities.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Transaction {
    pub date: String,
    pub sku: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: MovementKind,
    pub qty: u32,
}

/// Stock movement requested by a user, before it is stamped and named
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Movement {
    pub sku: String,
    pub kind: MovementKind,
    pub qty: u32,
}

/// Three-way stock classification shown in the inventory table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockStatus {
    OutOfStock,
    LowStock,
    InStock,
}

impl StockStatus {
    pub fn classify(qty: u32) -> Self {
        if qty == 0 {
            StockStatus::OutOfStock
        } else if qty < LOW_STOCK_THRESHOLD {
            StockStatus::LowStock
        } else {
            StockStatus::InStock
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StockStatus::OutOfStock => "Out of Stock",
            StockStatus::LowStock => "Low Stock",
            StockStatus::InStock => "In Stock",
        }
    }

    /// CSS badge class
    pub fn badge_class(&self) -> &'static str {
        match self {
            StockStatus::OutOfStock => "badge-out-of-stock",
            StockStatus::LowStock => "badge-low-stock",
            StockStatus::InStock => "badge-in-stock",
        }
    }
}

// ============================================================================
// SEED DATA
// ============================================================================

fn seed_product(id: u32, sku: &str, name: &str, category: &str, qty: u32) -> Product {
    Product {
        id,
        sku: sku.to_string(),
        name: name.to_string(),
        category: category.to_string(),
        qty,
        image: PLACEHOLDER_IMAGE.to_string(),
    }
}

fn seed_transaction(date: &str, sku: &str, name: &str, kind: MovementKind, qty: u32) -> Transaction {
    Transaction {
        date: date.to_string(),
        sku: sku.to_string(),
        name: name.to_string(),
        kind,
        qty,
    }
}

/// Catalog used when nothing has been stored yet
pub fn seed_products() -> Vec<Product> {
    vec![
        seed_product(1, "PROD-001", "Wireless Mouse", "Electronics", 45),
        seed_product(2, "PROD-002", "Office Chair", "Furniture", 2),
        seed_product(3, "PROD-003", "Mechanical Keyboard", "Electronics", 12),
        seed_product(4, "PROD-004", "USB-C Cable", "Electronics", 0),
    ]
}

/// Ledger used when nothing has been stored yet
pub fn seed_transactions() -> Vec<Transaction> {
    vec![
        seed_transaction("2023-10-25 10:30", "PROD-001", "Wireless Mouse", MovementKind::In, 50),
        seed_transaction("2023-10-25 14:15", "PROD-001", "Wireless Mouse", MovementKind::Out, 5),
        seed_transaction("2023-10-26 09:00", "PROD-004", "USB-C Cable", MovementKind::Out, 20),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, StockStatus::OutOfStock)]
    #[case(1, StockStatus::LowStock)]
    #[case(9, StockStatus::LowStock)]
    #[case(10, StockStatus::InStock)]
    #[case(45, StockStatus::InStock)]
    fn test_classify(#[case] qty: u32, #[case] expected: StockStatus) {
        assert_eq!(StockStatus::classify(qty), expected);
    }

    #[test]
    fn test_seed_product_statuses() {
        let seed = seed_products();
        let by_sku = |sku: &str| seed.iter().find(|p| p.sku == sku).unwrap().status();

        assert_eq!(by_sku("PROD-004"), StockStatus::OutOfStock);
        assert_eq!(by_sku("PROD-002"), StockStatus::LowStock);
        assert_eq!(by_sku("PROD-001"), StockStatus::InStock);
    }

    #[test]
    fn test_transaction_uses_type_field() {
        let json = serde_json::to_value(&seed_transactions()[0]).unwrap();
        assert_eq!(json["type"], "IN");
        assert!(json.get("kind").is_none());
    }

    #[test]
    fn test_movement_kind_parse() {
        assert_eq!(MovementKind::parse("in"), Some(MovementKind::In));
        assert_eq!(MovementKind::parse(" OUT "), Some(MovementKind::Out));
        assert_eq!(MovementKind::parse("sideways"), None);
    }

    #[test]
    fn test_new_product_into_update_sets_every_field() {
        let update: ProductUpdate = NewProduct {
            sku: "X".to_string(),
            name: "Thing".to_string(),
            category: "Misc".to_string(),
            qty: 3,
            image: PLACEHOLDER_IMAGE.to_string(),
        }
        .into();

        assert_eq!(update.qty, Some(3));
        assert_eq!(update.sku.as_deref(), Some("X"));
    }
}
