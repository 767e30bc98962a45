use std::time::Duration;

use serde_json::Value;
use thiserror::Error;

use crate::domain::pricing::PricingError;

/// Everything that can go wrong in one request/response exchange.
#[derive(Debug, Error)]
pub enum ExchangeError {
    /// DNS, TLS, refused connection or a broken body stream
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// The exchange answered with a JSON-RPC `error` object
    #[error("Exchange error {code}: {message}")]
    Protocol {
        code: i64,
        message: String,
        data: Option<Value>,
    },

    /// Body was empty, not JSON, or did not match the expected shape
    #[error("Decode error: {0}")]
    Decode(String),

    /// Rejected locally before anything was sent
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<PricingError> for ExchangeError {
    fn from(e: PricingError) -> Self {
        ExchangeError::InvalidInput(e.to_string())
    }
}

pub type ExchangeResult<T> = Result<T, ExchangeError>;
