//! Lending error types.
//!
//! Refusing a hold or a collection is not an error: those outcomes are domain
//! events. The errors below cover the plumbing around the decision core.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors that can occur outside of the hold and collect decisions.
#[derive(Debug, Error)]
pub enum LendingError {
    /// A configuration value was present but could not be parsed.
    #[error("Invalid configuration: {key}={value:?}")]
    InvalidConfiguration { key: &'static str, value: String },

    /// A close-ended hold would end past the last representable date.
    #[error("Hold duration out of range: {days} days from {from}")]
    HoldDurationOutOfRange { from: DateTime<Utc>, days: u32 },

    /// An event could not be (de)serialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience type alias for lending results.
pub type Result<T> = std::result::Result<T, LendingError>;
