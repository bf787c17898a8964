//! Error types used across the transaction server crate.
//!
//! Two layers:
//! - `FetchError` describes why a call to the quote provider failed.
//! - `TransactionError` is the business taxonomy surfaced to clients. Every
//!   variant maps onto a wire [`ErrorKind`] and converts into a [`Failure`].
//!
//! A `FetchError` always collapses into `TransactionError::QuoteUnavailable`: a
//! client cannot act on the difference between a timeout and a bad symbol.
use std::time::Duration;

use thiserror::Error;
use trade_common::{ErrorKind, Failure};

use crate::model::trade::TradeId;

/// Business failures of Buy and Check.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransactionError {
    /// A token of the allocation plan, or the budget, is malformed.
    #[error("Request format invalid: {0}")]
    InvalidFormat(String),

    /// Percentages do not add up to 100; carries the actual sum.
    #[error("Sum of percentages not 100 (got {0})")]
    PercentageMismatch(f64),

    /// One or more symbols have no usable quote.
    #[error("Invalid symbol / symbol not found: {0}")]
    QuoteUnavailable(String),

    /// No trade was recorded under the identifier.
    #[error("Trade {0} not found")]
    TradeNotFound(TradeId),
}

impl TransactionError {
    /// Wire category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            TransactionError::InvalidFormat(_) => ErrorKind::InvalidFormat,
            TransactionError::PercentageMismatch(_) => ErrorKind::PercentageMismatch,
            TransactionError::QuoteUnavailable(_) => ErrorKind::QuoteUnavailable,
            TransactionError::TradeNotFound(_) => ErrorKind::TradeNotFound,
        }
    }
}

impl From<TransactionError> for Failure {
    fn from(err: TransactionError) -> Self {
        Failure::new(err.kind(), err.to_string())
    }
}

/// Failures of a quote provider round trip.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The provider did not answer within the configured timeout.
    #[error("quote request timed out after {0:?}")]
    Timeout(Duration),

    /// Connection-level failure.
    #[error("quote transport error: {0}")]
    Transport(String),

    /// The provider answered with a non-success HTTP status.
    #[error("quote provider returned HTTP {0}")]
    Status(u16),

    /// The body could not be decoded.
    #[error("quote decode error: {0}")]
    Decode(String),
}

impl From<FetchError> for TransactionError {
    fn from(err: FetchError) -> Self {
        TransactionError::QuoteUnavailable(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_carries_kind_and_message() {
        let failure: Failure = TransactionError::PercentageMismatch(90.0).into();
        assert_eq!(failure.kind, ErrorKind::PercentageMismatch);
        assert_eq!(failure.message, "Sum of percentages not 100 (got 90)");
    }

    #[test]
    fn fetch_errors_become_quote_unavailable() {
        let err: TransactionError = FetchError::Timeout(Duration::from_secs(5)).into();
        assert_eq!(err.kind(), ErrorKind::QuoteUnavailable);
        assert!(err.to_string().contains("timed out"));
    }
}
