//! # Checkout Error Types
//!
//! Typed error handling for the checkout service.
//! All checkout operations return `Result<T, CheckoutError>`.

use thiserror::Error;

/// Core error type for all checkout operations
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Configuration errors (missing env vars, invalid config)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Data store query or write failure
    #[error("Store error: {0}")]
    Store(String),

    /// Payment provider API error
    #[error("Provider error [{provider}]: {message}")]
    Provider { provider: String, message: String },

    /// Network/HTTP error communicating with a collaborator
    #[error("Network error: {0}")]
    Network(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl CheckoutError {
    /// Returns the HTTP status code appropriate for this error
    pub fn status_code(&self) -> u16 {
        match self {
            CheckoutError::Configuration(_) => 500,
            CheckoutError::InvalidRequest(_) => 400,
            CheckoutError::Store(_) => 500,
            CheckoutError::Provider { .. } => 502,
            CheckoutError::Network(_) => 503,
            CheckoutError::Serialization(_) => 500,
        }
    }

    /// Returns true if the caller supplied bad input (4xx), as opposed to a
    /// collaborator failing (5xx)
    pub fn is_client_error(&self) -> bool {
        self.status_code() < 500
    }
}

/// Result type alias for checkout operations
pub type CheckoutResult<T> = Result<T, CheckoutError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            CheckoutError::InvalidRequest("empty".into()).status_code(),
            400
        );
        assert_eq!(CheckoutError::Store("down".into()).status_code(), 500);
        assert_eq!(
            CheckoutError::Provider {
                provider: "stripe".into(),
                message: "rejected".into()
            }
            .status_code(),
            502
        );
        assert_eq!(CheckoutError::Network("timeout".into()).status_code(), 503);
    }

    #[test]
    fn test_client_error_split() {
        assert!(CheckoutError::InvalidRequest("bad".into()).is_client_error());
        assert!(!CheckoutError::Network("timeout".into()).is_client_error());
    }
}
