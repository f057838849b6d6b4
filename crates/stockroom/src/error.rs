// File: src/error.rs
// Purpose: Error type shared by storage and the inventory store

use thiserror::Error;

/// Errors raised while loading, saving, or mutating inventory data
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage io error for key '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// Stored snapshot exists but is not valid JSON for the expected shape
    #[error("corrupt snapshot under key '{key}': {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize snapshot for key '{key}': {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("no product with sku '{0}'")]
    UnknownProduct(String),

    /// The catalog already holds `u32::MAX` as an id
    #[error("product ids exhausted")]
    IdsExhausted,
}

pub type Result<T> = std::result::Result<T, StoreError>;
