//! Invoicing records: invoice headers, their line items and the payment
//! transactions attempted against them.
//!
//! Derived values that need a join (invoice totals, paid-in-full) are computed
//! by `salesdesk-store::relations`, not here.

pub mod invoice;
pub mod invoice_item;
pub mod transaction;

pub use invoice::{Invoice, InvoiceStatus};
pub use invoice_item::InvoiceItem;
pub use transaction::{Transaction, TransactionResult};
