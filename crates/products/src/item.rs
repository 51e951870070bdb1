use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use salesdesk_core::{DomainError, DomainResult, Entity, ItemId, MerchantId};

/// Catalogue item. `unit_price` is the current list price; the price a line item
/// was actually sold at lives on the invoice item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    id: ItemId,
    name: String,
    #[serde(default)]
    description: Option<String>,
    unit_price: Decimal,
    merchant_id: MerchantId,
    created_at: DateTime<Utc>,
}

impl Item {
    pub fn new(
        id: ItemId,
        name: impl Into<String>,
        unit_price: Decimal,
        merchant_id: MerchantId,
        created_at: DateTime<Utc>,
    ) -> DomainResult<Self> {
        let item = Self {
            id,
            name: name.into(),
            description: None,
            unit_price,
            merchant_id,
            created_at,
        };
        item.validate()?;
        Ok(item)
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Invariant: prices are never negative.
    pub fn validate(&self) -> DomainResult<()> {
        if self.unit_price < Decimal::ZERO {
            return Err(DomainError::validation(format!(
                "item {} unit_price must be >= 0 (got {})",
                self.id, self.unit_price
            )));
        }
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn unit_price(&self) -> Decimal {
        self.unit_price
    }

    pub fn merchant_id(&self) -> MerchantId {
        self.merchant_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Entity for Item {
    type Id = ItemId;

    fn id(&self) -> Self::Id {
        self.id
    }
}
