use core::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use salesdesk_core::{DomainError, Entity, InvoiceId, TransactionId};

/// Outcome of a payment attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionResult {
    Success,
    Failed,
}

impl FromStr for TransactionResult {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "success" => Ok(TransactionResult::Success),
            "failed" => Ok(TransactionResult::Failed),
            _ => Err(DomainError::validation(format!(
                "unknown transaction result: {s}"
            ))),
        }
    }
}

/// A payment attempt against an invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    id: TransactionId,
    invoice_id: InvoiceId,
    result: TransactionResult,
    created_at: DateTime<Utc>,
}

impl Transaction {
    pub fn new(
        id: TransactionId,
        invoice_id: InvoiceId,
        result: TransactionResult,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            invoice_id,
            result,
            created_at,
        }
    }

    pub fn invoice_id(&self) -> InvoiceId {
        self.invoice_id
    }

    pub fn result(&self) -> TransactionResult {
        self.result
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn succeeded(&self) -> bool {
        self.result == TransactionResult::Success
    }
}

impl Entity for Transaction {
    type Id = TransactionId;

    fn id(&self) -> Self::Id {
        self.id
    }
}
