//! Catalogue items listed by merchants.

pub mod item;

pub use item::Item;
