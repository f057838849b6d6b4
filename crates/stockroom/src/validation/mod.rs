// File: src/validation/mod.rs
// Purpose: Validation runtime and validator trait

use std::collections::HashMap;

pub mod validators;

/// Field name to the messages raised for it
pub type FieldErrors = HashMap<String, Vec<String>>;

/// Trait for submitted forms that can be checked before they reach the store
pub trait Validate {
    /// Returns Ok(()) if valid, or Err with a map of field names to error messages.
    /// Each field can have multiple validation errors.
    fn validate(&self) -> Result<(), FieldErrors>;
}

/// Result of validation with errors
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    pub errors: FieldErrors,
}

impl ValidationResult {
    pub fn success() -> Self {
        Self::default()
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Record an error against `field`
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.errors
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    /// Get first error for a specific field
    pub fn get_error(&self, field: &str) -> Option<&str> {
        self.errors
            .get(field)
            .and_then(|errors| errors.first())
            .map(String::as_str)
    }

    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}
