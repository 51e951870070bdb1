//! `salesdesk-core`: identity and error primitives shared by every record crate.
//!
//! Pure data definitions only; lookup and storage live in `salesdesk-store`.

pub mod entity;
pub mod error;
pub mod id;

pub use entity::{find_all_by, find_by_id, Entity};
pub use error::{DomainError, DomainResult};
pub use id::{CustomerId, InvoiceId, InvoiceItemId, ItemId, MerchantId, TransactionId};
