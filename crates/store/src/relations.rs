//! Relationship accessors.
//!
//! Records hold foreign keys only; these functions resolve them against a
//! store.

use std::collections::HashSet;

use rust_decimal::Decimal;

use salesdesk_core::{DomainError, DomainResult, Entity};
use salesdesk_invoicing::{Invoice, InvoiceItem, Transaction};
use salesdesk_parties::{Customer, Merchant};
use salesdesk_products::Item;

use crate::entity_store::EntityStore;

pub fn merchant_items<'s, S>(store: &'s S, merchant: &Merchant) -> Vec<&'s Item>
where
    S: EntityStore + ?Sized,
{
    store.items_by_merchant(merchant.id())
}

pub fn merchant_invoices<'s, S>(store: &'s S, merchant: &Merchant) -> Vec<&'s Invoice>
where
    S: EntityStore + ?Sized,
{
    store.invoices_by_merchant(merchant.id())
}

/// Distinct customers invoiced by `merchant`, in order of first invoice.
pub fn merchant_customers<'s, S>(store: &'s S, merchant: &Merchant) -> Vec<&'s Customer>
where
    S: EntityStore + ?Sized,
{
    let mut seen = HashSet::new();
    store
        .invoices_by_merchant(merchant.id())
        .into_iter()
        .filter(|invoice| seen.insert(invoice.customer_id()))
        .filter_map(|invoice| store.find_customer(invoice.customer_id()))
        .collect()
}

pub fn invoice_items<'s, S>(store: &'s S, invoice: &Invoice) -> Vec<&'s InvoiceItem>
where
    S: EntityStore + ?Sized,
{
    store.invoice_items_by_invoice(invoice.id())
}

pub fn invoice_transactions<'s, S>(store: &'s S, invoice: &Invoice) -> Vec<&'s Transaction>
where
    S: EntityStore + ?Sized,
{
    store.transactions_by_invoice(invoice.id())
}

pub fn invoice_customer<'s, S>(store: &'s S, invoice: &Invoice) -> Option<&'s Customer>
where
    S: EntityStore + ?Sized,
{
    store.find_customer(invoice.customer_id())
}

pub fn invoice_merchant<'s, S>(store: &'s S, invoice: &Invoice) -> Option<&'s Merchant>
where
    S: EntityStore + ?Sized,
{
    store.find_merchant(invoice.merchant_id())
}

pub fn item_merchant<'s, S>(store: &'s S, item: &Item) -> Option<&'s Merchant>
where
    S: EntityStore + ?Sized,
{
    store.find_merchant(item.merchant_id())
}

/// An invoice is paid in full once any transaction against it succeeded.
pub fn is_paid_in_full<S>(store: &S, invoice: &Invoice) -> bool
where
    S: EntityStore + ?Sized,
{
    store
        .transactions_by_invoice(invoice.id())
        .into_iter()
        .any(Transaction::succeeded)
}

/// Sum of the extended prices of the invoice's line items.
pub fn invoice_total<S>(store: &S, invoice: &Invoice) -> DomainResult<Decimal>
where
    S: EntityStore + ?Sized,
{
    store
        .invoice_items_by_invoice(invoice.id())
        .into_iter()
        .try_fold(Decimal::ZERO, |total, line| {
            total
                .checked_add(line.extended_price()?)
                .ok_or_else(|| DomainError::invariant("invoice total overflow"))
        })
}
