use core::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use salesdesk_core::{CustomerId, DomainError, Entity, InvoiceId, MerchantId};

/// Fulfilment status of an invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Pending,
    Shipped,
    Returned,
}

impl InvoiceStatus {
    pub const ALL: [InvoiceStatus; 3] = [
        InvoiceStatus::Pending,
        InvoiceStatus::Shipped,
        InvoiceStatus::Returned,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Pending => "pending",
            InvoiceStatus::Shipped => "shipped",
            InvoiceStatus::Returned => "returned",
        }
    }
}

impl core::fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InvoiceStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().trim_start_matches(':');
        InvoiceStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| DomainError::validation(format!("unknown invoice status: {s}")))
    }
}

/// Invoice header. Line items and transactions reference it by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    id: InvoiceId,
    customer_id: CustomerId,
    merchant_id: MerchantId,
    status: InvoiceStatus,
    created_at: DateTime<Utc>,
}

impl Invoice {
    pub fn new(
        id: InvoiceId,
        customer_id: CustomerId,
        merchant_id: MerchantId,
        status: InvoiceStatus,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            customer_id,
            merchant_id,
            status,
            created_at,
        }
    }

    pub fn customer_id(&self) -> CustomerId {
        self.customer_id
    }

    pub fn merchant_id(&self) -> MerchantId {
        self.merchant_id
    }

    pub fn status(&self) -> InvoiceStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Calendar date of creation, time-of-day discarded.
    pub fn created_on(&self) -> NaiveDate {
        self.created_at.date_naive()
    }
}

impl Entity for Invoice {
    type Id = InvoiceId;

    fn id(&self) -> Self::Id {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn status_parses_case_insensitively() {
        assert_eq!("pending".parse::<InvoiceStatus>().unwrap(), InvoiceStatus::Pending);
        assert_eq!("Shipped".parse::<InvoiceStatus>().unwrap(), InvoiceStatus::Shipped);
        assert_eq!(":returned".parse::<InvoiceStatus>().unwrap(), InvoiceStatus::Returned);
    }

    #[test]
    fn unknown_status_is_a_validation_error() {
        let err = "cancelled".parse::<InvoiceStatus>().unwrap_err();
        match err {
            DomainError::Validation(msg) if msg.contains("cancelled") => {}
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn status_serializes_lowercase() {
        let json = serde_json::to_string(&InvoiceStatus::Shipped).unwrap();
        assert_eq!(json, "\"shipped\"");
    }

    #[test]
    fn created_on_drops_time_of_day() {
        let created = Utc.with_ymd_and_hms(2009, 2, 7, 23, 59, 59).unwrap();
        let invoice = Invoice::new(
            InvoiceId::new(1),
            CustomerId::new(1),
            MerchantId::new(12335938),
            InvoiceStatus::Pending,
            created,
        );
        assert_eq!(invoice.created_on(), NaiveDate::from_ymd_opt(2009, 2, 7).unwrap());
    }
}
