// File: src/form.rs
// Purpose: Product and movement forms as submitted, their validation, and re-render context

use crate::model::{Movement, MovementKind, NewProduct, Product, ProductUpdate, PLACEHOLDER_IMAGE};
use crate::validation::validators::{is_present, is_valid_url, parse_id, parse_quantity};
use crate::validation::{FieldErrors, Validate, ValidationResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// What a valid product form asks the store to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductSubmission {
    Create(NewProduct),
    Update(u32, ProductUpdate),
}

/// The product modal form, exactly as the browser sent it
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ProductForm {
    /// Empty for "add", the product id for "edit"
    pub id: String,
    pub sku: String,
    pub name: String,
    pub category: String,
    pub qty: String,
    pub image: String,
}

impl ProductForm {
    /// Prefill for the edit modal
    pub fn from_product(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            sku: product.sku.clone(),
            name: product.name.clone(),
            category: product.category.clone(),
            qty: product.qty.to_string(),
            image: product.image.clone(),
        }
    }

    pub fn is_edit(&self) -> bool {
        is_present(&self.id)
    }

    fn checks(&self) -> ValidationResult {
        let mut result = ValidationResult::success();

        if self.is_edit() {
            if let Err(message) = parse_id(&self.id) {
                result.add("id", message);
            }
        }
        if !is_present(&self.sku) {
            result.add("sku", "SKU is required");
        }
        if !is_present(&self.name) {
            result.add("name", "Name is required");
        }
        if !is_present(&self.category) {
            result.add("category", "Category is required");
        }
        if let Err(message) = parse_quantity(&self.qty) {
            result.add("qty", message);
        }
        let image = self.image.trim();
        if !image.is_empty() && !is_valid_url(image) {
            result.add("image", "Image must be an http or https URL");
        }

        result
    }

    /// Validate and convert into a store operation.
    ///
    /// An empty image falls back to the placeholder.
    pub fn parse(&self) -> Result<ProductSubmission, ValidationResult> {
        let result = self.checks();
        if !result.is_valid() {
            return Err(result);
        }

        let image = match self.image.trim() {
            "" => PLACEHOLDER_IMAGE.to_string(),
            url => url.to_string(),
        };
        let fields = NewProduct {
            sku: self.sku.trim().to_string(),
            name: self.name.trim().to_string(),
            category: self.category.trim().to_string(),
            qty: parse_quantity(&self.qty).map_err(|_| result.clone())?,
            image,
        };

        if self.is_edit() {
            let id = parse_id(&self.id).map_err(|_| result)?;
            Ok(ProductSubmission::Update(id, fields.into()))
        } else {
            Ok(ProductSubmission::Create(fields))
        }
    }

    /// Submitted values keyed by field name, for re-rendering
    pub fn values(&self) -> HashMap<String, String> {
        [
            ("id", &self.id),
            ("sku", &self.sku),
            ("name", &self.name),
            ("category", &self.category),
            ("qty", &self.qty),
            ("image", &self.image),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
    }
}

impl Validate for ProductForm {
    fn validate(&self) -> Result<(), FieldErrors> {
        self.checks().into_result()
    }
}

/// Ledger entry form on the dashboard
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct MovementForm {
    pub sku: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub qty: String,
}

impl MovementForm {
    fn checks(&self) -> ValidationResult {
        let mut result = ValidationResult::success();

        if !is_present(&self.sku) {
            result.add("sku", "SKU is required");
        }
        if MovementKind::parse(&self.kind).is_none() {
            result.add("type", "Type must be IN or OUT");
        }
        match parse_quantity(&self.qty) {
            Ok(0) => result.add("qty", "Quantity must be at least 1"),
            Ok(_) => {}
            Err(message) => result.add("qty", message),
        }

        result
    }

    pub fn values(&self) -> HashMap<String, String> {
        [("sku", &self.sku), ("type", &self.kind), ("qty", &self.qty)]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    pub fn parse(&self) -> Result<Movement, ValidationResult> {
        let result = self.checks();
        match (MovementKind::parse(&self.kind), parse_quantity(&self.qty)) {
            (Some(kind), Ok(qty)) if result.is_valid() => Ok(Movement {
                sku: self.sku.trim().to_string(),
                kind,
                qty,
            }),
            _ => Err(result),
        }
    }
}

impl Validate for MovementForm {
    fn validate(&self) -> Result<(), FieldErrors> {
        self.checks().into_result()
    }
}

/// Errors and submitted values carried back into a re-rendered form
#[derive(Debug, Clone, Default)]
pub struct FormContext {
    /// Field names to the first error message
    pub errors: HashMap<String, String>,
    /// Raw field values as submitted
    pub values: HashMap<String, String>,
}

impl FormContext {
    pub fn new(errors: HashMap<String, String>, values: HashMap<String, String>) -> Self {
        Self { errors, values }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Prefilled context for editing an existing product
    pub fn for_product(product: &Product) -> Self {
        Self::new(HashMap::new(), ProductForm::from_product(product).values())
    }

    /// Context for a form that failed validation, keeping the first message per field
    pub fn rejected(values: HashMap<String, String>, result: &ValidationResult) -> Self {
        let errors = result
            .errors
            .iter()
            .filter_map(|(field, messages)| {
                messages.first().map(|m| (field.clone(), m.clone()))
            })
            .collect();
        Self::new(errors, values)
    }

    pub fn has_error(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    pub fn get_error(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(|s| s.as_str())
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Submitted value for a field, or empty
    pub fn value(&self, field: &str) -> &str {
        self.values.get(field).map(|s| s.as_str()).unwrap_or("")
    }
}
