//! Index-backed in-memory store.

use std::collections::HashMap;
use std::hash::Hash;

use salesdesk_core::{
    CustomerId, DomainError, DomainResult, Entity, InvoiceId, ItemId, MerchantId,
};
use salesdesk_invoicing::{Invoice, InvoiceItem, Transaction};
use salesdesk_parties::{Customer, Merchant};
use salesdesk_products::Item;

use crate::entity_store::EntityStore;
use crate::snapshot::Snapshot;

/// Immutable dataset with id and foreign-key indices.
///
/// Indices hold positions into the record vectors, so every lookup returns
/// records in load order.
#[derive(Debug, Default)]
pub struct InMemoryEntityStore {
    merchants: Vec<Merchant>,
    items: Vec<Item>,
    invoices: Vec<Invoice>,
    invoice_items: Vec<InvoiceItem>,
    transactions: Vec<Transaction>,
    customers: Vec<Customer>,

    merchant_positions: HashMap<MerchantId, usize>,
    item_positions: HashMap<ItemId, usize>,
    invoice_positions: HashMap<InvoiceId, usize>,
    customer_positions: HashMap<CustomerId, usize>,

    items_by_merchant: HashMap<MerchantId, Vec<usize>>,
    invoices_by_merchant: HashMap<MerchantId, Vec<usize>>,
    invoices_by_customer: HashMap<CustomerId, Vec<usize>>,
    lines_by_invoice: HashMap<InvoiceId, Vec<usize>>,
    transactions_by_invoice: HashMap<InvoiceId, Vec<usize>>,
}

impl InMemoryEntityStore {
    /// Build a store from loaded records.
    ///
    /// Fails on duplicate ids (`Conflict`) or records violating their own
    /// invariants (`Validation`). Dangling foreign keys are allowed; they just
    /// never resolve.
    pub fn from_snapshot(snapshot: Snapshot) -> DomainResult<Self> {
        let Snapshot {
            merchants,
            items,
            invoices,
            invoice_items,
            transactions,
            customers,
        } = snapshot;

        for merchant in &merchants {
            merchant.validate()?;
        }
        for item in &items {
            item.validate()?;
        }
        for line in &invoice_items {
            line.validate()?;
        }

        let merchant_positions = unique_positions(&merchants, "merchant")?;
        let item_positions = unique_positions(&items, "item")?;
        let invoice_positions = unique_positions(&invoices, "invoice")?;
        let customer_positions = unique_positions(&customers, "customer")?;
        unique_positions(&invoice_items, "invoice item")?;
        unique_positions(&transactions, "transaction")?;

        let store = Self {
            items_by_merchant: group_positions(&items, Item::merchant_id),
            invoices_by_merchant: group_positions(&invoices, Invoice::merchant_id),
            invoices_by_customer: group_positions(&invoices, Invoice::customer_id),
            lines_by_invoice: group_positions(&invoice_items, InvoiceItem::invoice_id),
            transactions_by_invoice: group_positions(&transactions, Transaction::invoice_id),
            merchant_positions,
            item_positions,
            invoice_positions,
            customer_positions,
            merchants,
            items,
            invoices,
            invoice_items,
            transactions,
            customers,
        };

        tracing::debug!(
            merchants = store.merchants.len(),
            items = store.items.len(),
            invoices = store.invoices.len(),
            invoice_items = store.invoice_items.len(),
            transactions = store.transactions.len(),
            customers = store.customers.len(),
            "entity store built"
        );

        Ok(store)
    }
}

fn unique_positions<E: Entity>(
    records: &[E],
    kind: &'static str,
) -> DomainResult<HashMap<E::Id, usize>>
where
    E::Id: core::fmt::Display,
{
    let mut positions = HashMap::with_capacity(records.len());
    for (pos, record) in records.iter().enumerate() {
        if positions.insert(record.id(), pos).is_some() {
            return Err(DomainError::conflict(format!(
                "duplicate {kind} id {}",
                record.id()
            )));
        }
    }
    Ok(positions)
}

fn group_positions<E, K, F>(records: &[E], key: F) -> HashMap<K, Vec<usize>>
where
    K: Eq + Hash,
    F: Fn(&E) -> K,
{
    let mut groups: HashMap<K, Vec<usize>> = HashMap::new();
    for (pos, record) in records.iter().enumerate() {
        groups.entry(key(record)).or_default().push(pos);
    }
    groups
}

fn at<'a, E>(records: &'a [E], positions: Option<&Vec<usize>>) -> Vec<&'a E> {
    positions
        .map(|positions| positions.iter().map(|&pos| &records[pos]).collect())
        .unwrap_or_default()
}

impl EntityStore for InMemoryEntityStore {
    fn merchants(&self) -> &[Merchant] {
        &self.merchants
    }

    fn items(&self) -> &[Item] {
        &self.items
    }

    fn invoices(&self) -> &[Invoice] {
        &self.invoices
    }

    fn invoice_items(&self) -> &[InvoiceItem] {
        &self.invoice_items
    }

    fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    fn customers(&self) -> &[Customer] {
        &self.customers
    }

    fn find_merchant(&self, id: MerchantId) -> Option<&Merchant> {
        self.merchant_positions.get(&id).map(|&pos| &self.merchants[pos])
    }

    fn find_item(&self, id: ItemId) -> Option<&Item> {
        self.item_positions.get(&id).map(|&pos| &self.items[pos])
    }

    fn find_invoice(&self, id: InvoiceId) -> Option<&Invoice> {
        self.invoice_positions.get(&id).map(|&pos| &self.invoices[pos])
    }

    fn find_customer(&self, id: CustomerId) -> Option<&Customer> {
        self.customer_positions.get(&id).map(|&pos| &self.customers[pos])
    }

    fn items_by_merchant(&self, merchant_id: MerchantId) -> Vec<&Item> {
        at(&self.items, self.items_by_merchant.get(&merchant_id))
    }

    fn invoices_by_merchant(&self, merchant_id: MerchantId) -> Vec<&Invoice> {
        at(&self.invoices, self.invoices_by_merchant.get(&merchant_id))
    }

    fn invoices_by_customer(&self, customer_id: CustomerId) -> Vec<&Invoice> {
        at(&self.invoices, self.invoices_by_customer.get(&customer_id))
    }

    fn invoice_items_by_invoice(&self, invoice_id: InvoiceId) -> Vec<&InvoiceItem> {
        at(&self.invoice_items, self.lines_by_invoice.get(&invoice_id))
    }

    fn transactions_by_invoice(&self, invoice_id: InvoiceId) -> Vec<&Transaction> {
        at(&self.transactions, self.transactions_by_invoice.get(&invoice_id))
    }
}
