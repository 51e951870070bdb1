use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use salesdesk_core::{DomainError, DomainResult, Entity, InvoiceId, InvoiceItemId, ItemId};

/// One line on an invoice. `unit_price` is the price at time of sale and may
/// differ from the item's current list price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceItem {
    id: InvoiceItemId,
    invoice_id: InvoiceId,
    item_id: ItemId,
    quantity: u32,
    unit_price: Decimal,
}

impl InvoiceItem {
    pub fn new(
        id: InvoiceItemId,
        invoice_id: InvoiceId,
        item_id: ItemId,
        quantity: u32,
        unit_price: Decimal,
    ) -> DomainResult<Self> {
        let line = Self {
            id,
            invoice_id,
            item_id,
            quantity,
            unit_price,
        };
        line.validate()?;
        Ok(line)
    }

    /// Invariant: sale prices are never negative.
    pub fn validate(&self) -> DomainResult<()> {
        if self.unit_price < Decimal::ZERO {
            return Err(DomainError::validation(format!(
                "invoice item {} unit_price must be >= 0 (got {})",
                self.id, self.unit_price
            )));
        }
        Ok(())
    }

    pub fn invoice_id(&self) -> InvoiceId {
        self.invoice_id
    }

    pub fn item_id(&self) -> ItemId {
        self.item_id
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn unit_price(&self) -> Decimal {
        self.unit_price
    }

    /// Quantity × sale price, exact.
    pub fn extended_price(&self) -> DomainResult<Decimal> {
        Decimal::from(self.quantity)
            .checked_mul(self.unit_price)
            .ok_or_else(|| DomainError::invariant("invoice item amount overflow"))
    }
}

impl Entity for InvoiceItem {
    type Id = InvoiceItemId;

    fn id(&self) -> Self::Id {
        self.id
    }
}
