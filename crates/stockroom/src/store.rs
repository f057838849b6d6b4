// File: src/store.rs
// Purpose: The inventory store - owns catalog and ledger, persists every mutation
//
// Pure logic lives in `catalog`; this module only sequences it with storage I/O.

use crate::catalog::{self, DashboardStats};
use crate::error::{Result, StoreError};
use crate::form::ProductSubmission;
use crate::model::{
    seed_products, seed_transactions, Movement, NewProduct, Product, ProductUpdate, Transaction,
};
use crate::storage::{load_snapshot, save_snapshot, SnapshotStorage};
use std::sync::Arc;
use tracing::{debug, info};

/// Format of ledger timestamps
pub const LEDGER_DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Storage keys for the two snapshots
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKeys {
    pub catalog: String,
    pub ledger: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            catalog: "wms_data".to_string(),
            ledger: "wms_transactions".to_string(),
        }
    }
}

/// In-memory catalog and ledger mirrored to snapshot storage.
///
/// Construct with [`InventoryStore::open`] and release with [`InventoryStore::close`].
pub struct InventoryStore {
    storage: Arc<dyn SnapshotStorage>,
    keys: StorageKeys,
    products: Vec<Product>,
    transactions: Vec<Transaction>,
}

impl std::fmt::Debug for InventoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InventoryStore")
            .field("keys", &self.keys)
            .field("products", &self.products.len())
            .field("transactions", &self.transactions.len())
            .finish()
    }
}

impl InventoryStore {
    /// Load both collections, seeding whichever key is absent
    pub fn open(storage: Arc<dyn SnapshotStorage>, keys: StorageKeys) -> Result<Self> {
        let products = load_snapshot(storage.as_ref(), &keys.catalog, seed_products)?;
        let transactions = load_snapshot(storage.as_ref(), &keys.ledger, seed_transactions)?;

        info!(
            "Opened inventory: {} products, {} transactions",
            products.len(),
            transactions.len()
        );

        Ok(Self {
            storage,
            keys,
            products,
            transactions,
        })
    }

    /// Write both collections to storage
    pub fn flush(&self) -> Result<()> {
        self.save_products()?;
        self.save_transactions()
    }

    /// Flush both collections and drop the store
    pub fn close(self) -> Result<()> {
        self.flush()?;
        info!("Closed inventory");
        Ok(())
    }

    fn save_products(&self) -> Result<()> {
        save_snapshot(self.storage.as_ref(), &self.keys.catalog, &self.products)
    }

    fn save_transactions(&self) -> Result<()> {
        save_snapshot(self.storage.as_ref(), &self.keys.ledger, &self.transactions)
    }

    /// Persist `next` as the catalog, replacing the in-memory copy only once the write lands
    fn commit_products(&mut self, next: Vec<Product>) -> Result<()> {
        save_snapshot(self.storage.as_ref(), &self.keys.catalog, &next)?;
        self.products = next;
        Ok(())
    }

    fn commit_transactions(&mut self, next: Vec<Transaction>) -> Result<()> {
        save_snapshot(self.storage.as_ref(), &self.keys.ledger, &next)?;
        self.transactions = next;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn product(&self, id: u32) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn search(&self, text: &str, category: &str) -> Vec<&Product> {
        catalog::filter_products(&self.products, text, category)
    }

    pub fn categories(&self) -> Vec<&str> {
        catalog::categories(&self.products)
    }

    pub fn stats(&self) -> DashboardStats {
        DashboardStats::compute(&self.products, &self.transactions)
    }

    pub fn recent_transactions(&self) -> &[Transaction] {
        catalog::recent_transactions(&self.transactions, catalog::RECENT_TRANSACTIONS)
    }

    // ------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------

    /// Append a product with the next free id
    pub fn create(&mut self, fields: NewProduct) -> Result<Product> {
        let id = catalog::next_id(&self.products).ok_or(StoreError::IdsExhausted)?;
        let product = fields.with_id(id);

        let mut next = self.products.clone();
        next.push(product.clone());
        self.commit_products(next)?;

        info!("Created product {} ({})", product.id, product.sku);
        Ok(product)
    }

    /// Merge `changes` over the product with `id`. Unknown ids are a no-op.
    pub fn update(&mut self, id: u32, changes: ProductUpdate) -> Result<Option<Product>> {
        let Some(index) = self.products.iter().position(|p| p.id == id) else {
            debug!("Update ignored, no product {}", id);
            return Ok(None);
        };

        let updated = catalog::apply_product_updates(self.products[index].clone(), changes);
        let mut next = self.products.clone();
        next[index] = updated.clone();
        self.commit_products(next)?;

        info!("Updated product {} ({})", updated.id, updated.sku);
        Ok(Some(updated))
    }

    /// Remove the product with `id`. Returns whether anything was removed.
    pub fn delete(&mut self, id: u32) -> Result<bool> {
        if !self.products.iter().any(|p| p.id == id) {
            debug!("Delete ignored, no product {}", id);
            return Ok(false);
        }

        let next = self.products.iter().filter(|p| p.id != id).cloned().collect();
        self.commit_products(next)?;
        info!("Deleted product {}", id);
        Ok(true)
    }

    /// Apply a validated product form: create when it carried no id, update otherwise
    pub fn submit(&mut self, submission: ProductSubmission) -> Result<Option<Product>> {
        match submission {
            ProductSubmission::Create(fields) => self.create(fields).map(Some),
            ProductSubmission::Update(id, changes) => self.update(id, changes),
        }
    }

    /// Append a ledger entry stamped with the current local time
    pub fn record_movement(&mut self, movement: Movement) -> Result<Transaction> {
        let date = chrono::Local::now().format(LEDGER_DATE_FORMAT).to_string();
        self.record_movement_at(movement, date)
    }

    /// Append a ledger entry with an explicit timestamp.
    ///
    /// Catalog quantities are left untouched.
    pub fn record_movement_at(&mut self, movement: Movement, date: String) -> Result<Transaction> {
        let name = self
            .products
            .iter()
            .find(|p| p.sku == movement.sku)
            .map(|p| p.name.clone())
            .ok_or_else(|| StoreError::UnknownProduct(movement.sku.clone()))?;

        let transaction = Transaction {
            date,
            sku: movement.sku,
            name,
            kind: movement.kind,
            qty: movement.qty,
        };
        let mut next = self.transactions.clone();
        next.push(transaction.clone());
        self.commit_transactions(next)?;

        info!(
            "Recorded {} of {} for {}",
            transaction.kind, transaction.qty, transaction.sku
        );
        Ok(transaction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{MovementKind, PLACEHOLDER_IMAGE};
    use crate::storage::MemoryStorage;
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;

    /// Reads from the seeded snapshots, refuses every write
    struct ReadOnlyStorage;

    impl SnapshotStorage for ReadOnlyStorage {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Ok(None)
        }

        fn set(&self, key: &str, _value: &str) -> Result<()> {
            Err(StoreError::Io {
                key: key.to_string(),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
            })
        }
    }

    fn open_read_only() -> InventoryStore {
        InventoryStore::open(Arc::new(ReadOnlyStorage), StorageKeys::default()).unwrap()
    }

    fn open_seeded() -> (Arc<MemoryStorage>, InventoryStore) {
        let storage = Arc::new(MemoryStorage::new());
        let store = InventoryStore::open(storage.clone(), StorageKeys::default()).unwrap();
        (storage, store)
    }

    fn open_empty() -> InventoryStore {
        let storage = Arc::new(MemoryStorage::new().with_entry("wms_data", "[]"));
        InventoryStore::open(storage, StorageKeys::default()).unwrap()
    }

    fn widget() -> NewProduct {
        NewProduct {
            sku: "PROD-005".to_string(),
            name: "Desk Lamp".to_string(),
            category: "Furniture".to_string(),
            qty: 8,
            image: PLACEHOLDER_IMAGE.to_string(),
        }
    }

    fn stored_products(storage: &MemoryStorage) -> Vec<Product> {
        let raw = storage.get("wms_data").unwrap().unwrap();
        serde_json::from_str(&raw).unwrap()
    }

    #[test]
    fn test_open_without_snapshots_uses_seed() {
        let (storage, store) = open_seeded();
        assert_eq!(store.products(), seed_products().as_slice());
        assert_eq!(store.transactions(), seed_transactions().as_slice());
        // Opening alone writes nothing
        assert_eq!(storage.get("wms_data").unwrap(), None);
    }

    #[test]
    fn test_open_corrupt_catalog_fails() {
        let storage = Arc::new(MemoryStorage::new().with_entry("wms_data", "[{\"id\":"));
        let err = InventoryStore::open(storage, StorageKeys::default()).unwrap_err();
        assert!(matches!(err, StoreError::Corrupt { ref key, .. } if key == "wms_data"));
    }

    #[test]
    fn test_create_on_empty_catalog_assigns_one() {
        let mut store = open_empty();
        let product = store.create(widget()).unwrap();
        assert_eq!(product.id, 1);
    }

    #[test]
    fn test_create_assigns_max_plus_one_and_persists() {
        let (storage, mut store) = open_seeded();
        let product = store.create(widget()).unwrap();

        assert_eq!(product.id, 5);
        assert_eq!(store.products().last(), Some(&product));
        assert_eq!(stored_products(&storage), store.products());

        let ids: HashSet<u32> = store.products().iter().map(|p| p.id).collect();
        assert_eq!(ids.len(), store.products().len());
    }

    #[test]
    fn test_update_changes_only_supplied_fields() {
        let (storage, mut store) = open_seeded();
        let before = store.product(2).cloned().unwrap();

        let updated = store
            .update(
                2,
                ProductUpdate {
                    qty: Some(30),
                    ..Default::default()
                },
            )
            .unwrap()
            .unwrap();

        assert_eq!(updated, Product { qty: 30, ..before });
        assert_eq!(stored_products(&storage)[1], updated);
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let (storage, mut store) = open_seeded();
        let result = store.update(99, ProductUpdate::default()).unwrap();

        assert_eq!(result, None);
        assert_eq!(store.products(), seed_products().as_slice());
        assert_eq!(storage.get("wms_data").unwrap(), None);
    }

    #[test]
    fn test_delete_removes_exactly_one_and_keeps_order() {
        let (storage, mut store) = open_seeded();
        assert!(store.delete(2).unwrap());

        let ids: Vec<u32> = store.products().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 3, 4]);
        assert_eq!(stored_products(&storage).len(), 3);
    }

    #[test]
    fn test_delete_unknown_id_is_noop() {
        let (_storage, mut store) = open_seeded();
        assert!(!store.delete(42).unwrap());
        assert_eq!(store.products().len(), 4);
    }

    #[test]
    fn test_submit_dispatches_on_id() {
        let (_storage, mut store) = open_seeded();

        let created = store.submit(ProductSubmission::Create(widget())).unwrap().unwrap();
        assert_eq!(created.id, 5);

        let updated = store
            .submit(ProductSubmission::Update(5, widget().into()))
            .unwrap()
            .unwrap();
        assert_eq!(updated.id, 5);
        assert_eq!(store.products().len(), 5);
    }

    #[test]
    fn test_record_movement_appends_without_touching_stock() {
        let (storage, mut store) = open_seeded();
        let movement = Movement {
            sku: "PROD-002".to_string(),
            kind: MovementKind::In,
            qty: 10,
        };

        let tx = store
            .record_movement_at(movement, "2024-01-02 08:00".to_string())
            .unwrap();

        assert_eq!(tx.name, "Office Chair");
        assert_eq!(store.transactions().len(), 4);
        assert_eq!(store.transactions().last(), Some(&tx));
        assert_eq!(store.product(2).unwrap().qty, 2);
        assert!(storage.get("wms_transactions").unwrap().is_some());
    }

    #[test]
    fn test_record_movement_unknown_sku() {
        let (_storage, mut store) = open_seeded();
        let err = store
            .record_movement(Movement {
                sku: "NOPE".to_string(),
                kind: MovementKind::Out,
                qty: 1,
            })
            .unwrap_err();
        assert!(matches!(err, StoreError::UnknownProduct(sku) if sku == "NOPE"));
    }

    #[test]
    fn test_close_then_reopen_round_trips() {
        let (storage, mut store) = open_seeded();
        store.create(widget()).unwrap();
        let expected = store.products().to_vec();
        store.close().unwrap();

        let reopened = InventoryStore::open(storage, StorageKeys::default()).unwrap();
        assert_eq!(reopened.products(), expected.as_slice());
        assert_eq!(reopened.transactions(), seed_transactions().as_slice());
    }

    #[test]
    fn test_stats_follow_mutations() {
        let (_storage, mut store) = open_seeded();
        store.delete(2).unwrap();
        let stats = store.stats();
        assert_eq!(stats.low_stock, 0);
        assert_eq!(stats.total_stock, 57);
        assert_eq!(stats.today_transactions, 3);
    }

    #[test]
    fn test_failed_writes_leave_memory_untouched() {
        let mut store = open_read_only();

        assert!(matches!(store.create(widget()), Err(StoreError::Io { .. })));
        assert!(store
            .update(2, ProductUpdate { qty: Some(99), ..Default::default() })
            .is_err());
        assert!(store.delete(1).is_err());
        assert_eq!(store.products(), seed_products().as_slice());

        let movement = Movement {
            sku: "PROD-001".to_string(),
            kind: MovementKind::Out,
            qty: 1,
        };
        assert!(store
            .record_movement_at(movement, "2024-01-02 08:00".to_string())
            .is_err());
        assert_eq!(store.transactions(), seed_transactions().as_slice());
    }

    #[test]
    fn test_create_with_max_id_is_rejected() {
        let catalog = r#"[{"id":4294967295,"sku":"PROD-MAX","name":"Last","category":"Misc","qty":1,"image":""}]"#;
        let storage = Arc::new(MemoryStorage::new().with_entry("wms_data", catalog));
        let mut store = InventoryStore::open(storage.clone(), StorageKeys::default()).unwrap();

        let err = store.create(widget()).unwrap_err();
        assert!(matches!(err, StoreError::IdsExhausted));
        assert_eq!(store.products().len(), 1);
        assert_eq!(storage.get("wms_data").unwrap().as_deref(), Some(catalog));
    }
}
