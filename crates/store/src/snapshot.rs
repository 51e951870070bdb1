//! Loaded record bundles and atomic snapshot replacement.

use std::io::Read;
use std::sync::{Arc, PoisonError, RwLock};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use salesdesk_core::DomainError;
use salesdesk_invoicing::{Invoice, InvoiceItem, Transaction};
use salesdesk_parties::{Customer, Merchant};
use salesdesk_products::Item;

use crate::in_memory::InMemoryEntityStore;

/// Every record of one dataset, as handed over by ingestion.
///
/// Collections missing from serialized input default to empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    pub merchants: Vec<Merchant>,
    pub items: Vec<Item>,
    pub invoices: Vec<Invoice>,
    pub invoice_items: Vec<InvoiceItem>,
    pub transactions: Vec<Transaction>,
    pub customers: Vec<Customer>,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to deserialize snapshot: {0}")]
    Deserialize(String),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Read a JSON-encoded [`Snapshot`].
pub fn load_json<R: Read>(reader: R) -> Result<Snapshot, StoreError> {
    let snapshot: Snapshot =
        serde_json::from_reader(reader).map_err(|e| StoreError::Deserialize(e.to_string()))?;
    tracing::debug!(
        merchants = snapshot.merchants.len(),
        invoices = snapshot.invoices.len(),
        "snapshot decoded"
    );
    Ok(snapshot)
}

impl InMemoryEntityStore {
    /// Decode a JSON snapshot and build a store from it.
    pub fn from_json<R: Read>(reader: R) -> Result<Self, StoreError> {
        let snapshot = load_json(reader)?;
        Ok(Self::from_snapshot(snapshot)?)
    }
}

/// Holder of the current immutable store.
///
/// Readers take an `Arc` to whichever store is current and keep querying it
/// even if a reload swaps in a new one meanwhile; a query never sees a mix of
/// two datasets.
#[derive(Debug)]
pub struct SnapshotCell<S> {
    current: RwLock<Current<S>>,
}

#[derive(Debug)]
struct Current<S> {
    store: Arc<S>,
    generation: u64,
}

impl<S> SnapshotCell<S> {
    pub fn new(store: S) -> Self {
        Self {
            current: RwLock::new(Current {
                store: Arc::new(store),
                generation: 1,
            }),
        }
    }

    /// The store current at the time of the call.
    pub fn load(&self) -> Arc<S> {
        // A panic while holding the lock cannot leave a half-swapped Arc behind.
        let current = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&current.store)
    }

    /// Number of stores installed so far, starting at 1.
    pub fn generation(&self) -> u64 {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .generation
    }

    /// Install `next` as the current store and hand back the previous one.
    pub fn replace(&self, next: S) -> Arc<S> {
        let next = Arc::new(next);
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        current.generation += 1;
        tracing::info!(generation = current.generation, "entity store snapshot replaced");
        std::mem::replace(&mut current.store, next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity_store::EntityStore;
    use salesdesk_core::MerchantId;

    const JSON: &str = r#"{
        "merchants": [
            { "id": 12334105, "name": "Shopin1901", "created_at": "2010-12-10T00:00:00Z" }
        ],
        "items": [
            {
                "id": 263395237,
                "name": "510+ RealPush Icon Set",
                "description": "You've got a great idea.",
                "unit_price": "12.00",
                "merchant_id": 12334105,
                "created_at": "2016-01-11T09:34:06Z"
            }
        ],
        "invoices": [
            {
                "id": 1,
                "customer_id": 1,
                "merchant_id": 12334105,
                "status": "pending",
                "created_at": "2009-02-07T00:00:00Z"
            }
        ]
    }"#;

    #[test]
    fn json_snapshot_loads_with_missing_collections_defaulted() {
        let snapshot = load_json(JSON.as_bytes()).unwrap();
        assert_eq!(snapshot.merchants.len(), 1);
        assert!(snapshot.transactions.is_empty());
        assert!(snapshot.customers.is_empty());

        let store = InMemoryEntityStore::from_snapshot(snapshot).unwrap();
        assert_eq!(store.items_by_merchant(MerchantId::new(12334105)).len(), 1);
    }

    #[test]
    fn malformed_json_is_a_deserialize_error() {
        let err = InMemoryEntityStore::from_json(r#"{"merchants": 3}"#.as_bytes()).unwrap_err();
        assert!(matches!(err, StoreError::Deserialize(_)));
    }

    #[test]
    fn invalid_record_surfaces_domain_error() {
        let json = r#"{"items": [{
            "id": 1, "name": "x", "unit_price": "-1.00",
            "merchant_id": 1, "created_at": "2016-01-11T09:34:06Z"
        }]}"#;
        let err = InMemoryEntityStore::from_json(json.as_bytes()).unwrap_err();
        assert!(matches!(err, StoreError::Domain(DomainError::Validation(_))));
    }

    #[test]
    fn readers_keep_their_snapshot_across_replace() {
        let first = InMemoryEntityStore::from_json(JSON.as_bytes()).unwrap();
        let cell = SnapshotCell::new(first);
        assert_eq!(cell.generation(), 1);

        let before = cell.load();
        let previous = cell.replace(InMemoryEntityStore::from_snapshot(Snapshot::default()).unwrap());

        assert_eq!(cell.generation(), 2);
        assert!(Arc::ptr_eq(&before, &previous));
        assert_eq!(before.merchants().len(), 1);
        assert!(cell.load().merchants().is_empty());
    }
}
