// Stockroom - inventory catalog and stock ledger
// Snapshot-persisted store with Maud views and HTMX-aware responses

pub mod catalog;
pub mod config;
pub mod error;
pub mod form;
pub mod model;
pub mod response;
pub mod storage;
pub mod store;
pub mod validation;
pub mod views;

// Re-export core types
pub use catalog::DashboardStats;
pub use config::Config;
pub use error::{Result, StoreError};
pub use form::{FormContext, MovementForm, ProductForm, ProductSubmission};
pub use model::{
    Movement, MovementKind, NewProduct, Product, ProductUpdate, StockStatus, Transaction,
};
pub use response::{Failure, Fragment};
pub use storage::{FileStorage, MemoryStorage, SnapshotStorage};
pub use store::{InventoryStore, StorageKeys};
pub use validation::{Validate, ValidationResult};

// Re-export Maud so callers can compose with the views
pub use maud::{Markup, PreEscaped};
