use chrono::{DateTime, Datelike, Month, Utc};
use serde::{Deserialize, Serialize};

use salesdesk_core::{DomainError, DomainResult, Entity, MerchantId};

/// A seller registered on the marketplace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Merchant {
    id: MerchantId,
    name: String,
    created_at: DateTime<Utc>,
}

impl Merchant {
    pub fn new(
        id: MerchantId,
        name: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> DomainResult<Self> {
        let merchant = Self {
            id,
            name: name.into(),
            created_at,
        };
        merchant.validate()?;
        Ok(merchant)
    }

    /// Invariant: a merchant is always named.
    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation(format!(
                "merchant {} has an empty name",
                self.id
            )));
        }
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Calendar month the merchant registered in (UTC).
    pub fn registration_month(&self) -> Month {
        // `month()` is always within 1..=12.
        Month::try_from(self.created_at.month() as u8).unwrap_or(Month::January)
    }
}

impl Entity for Merchant {
    type Id = MerchantId;

    fn id(&self) -> Self::Id {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn registration_month_follows_created_at() {
        let created = Utc.with_ymd_and_hms(2010, 3, 27, 14, 54, 9).unwrap();
        let merchant = Merchant::new(MerchantId::new(12334105), "Shopin1901", created).unwrap();
        assert_eq!(merchant.registration_month(), Month::March);
        assert_eq!(merchant.id(), MerchantId::new(12334105));
    }

    #[test]
    fn blank_name_is_rejected() {
        let err = Merchant::new(MerchantId::new(1), "  ", Utc::now()).unwrap_err();
        match err {
            DomainError::Validation(msg) if msg.contains("empty name") => {}
            other => panic!("expected Validation, got {other:?}"),
        }
    }
}
