use thiserror::Error;

use salesdesk_core::{DomainError, MerchantId};

use crate::statistics::StatisticsError;

pub type AnalystResult<T> = Result<T, AnalystError>;

/// Failures surfaced by analytical queries. None are transient.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AnalystError {
    /// A mean or deviation was requested over zero elements.
    #[error("cannot compute {0} of an empty sequence")]
    EmptySequence(&'static str),

    #[error("merchant {0} not found")]
    MerchantNotFound(MerchantId),

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },

    #[error("invalid invoice status: {0}")]
    InvalidStatus(String),

    #[error("invalid month name: {0}")]
    InvalidMonth(String),

    #[error("decimal overflow while computing {0}")]
    Overflow(&'static str),

    #[error(transparent)]
    Domain(DomainError),
}

impl From<StatisticsError> for AnalystError {
    fn from(err: StatisticsError) -> Self {
        match err {
            StatisticsError::EmptySequence(what) => AnalystError::EmptySequence(what),
            StatisticsError::Overflow(what) => AnalystError::Overflow(what),
        }
    }
}

impl From<DomainError> for AnalystError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound { entity, id } => AnalystError::NotFound { entity, id },
            other => AnalystError::Domain(other),
        }
    }
}
