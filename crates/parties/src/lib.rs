//! Parties on either side of a sale: the merchants who list items and the
//! customers who are invoiced for them.
//!
//! Records are immutable once constructed; relationships are resolved through
//! `salesdesk-store`, never through back-references held by the records.

pub mod customer;
pub mod merchant;

pub use customer::Customer;
pub use merchant::Merchant;
