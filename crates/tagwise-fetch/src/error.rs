//! Error types for tagwise-fetch

use thiserror::Error;

/// Errors raised while fetching a product.
///
/// A 404 or 5xx status is not an error here; it is a [`ProductLookup`]
/// variant. These cover the cases where no variant can be produced.
///
/// [`ProductLookup`]: crate::ProductLookup
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request could not be sent or its body could not be read
    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        source: reqwest::Error,
    },

    /// A 200 response whose body is not a product
    #[error("Invalid product body for '{name}': {source}")]
    Decode {
        name: String,
        source: serde_json::Error,
    },

    /// Configuration could not be read or is invalid
    #[error("Config error: {0}")]
    Config(String),

    /// Tagged-union error from the core crate
    #[error(transparent)]
    Core(#[from] tagwise_core::Error),
}

/// Result type alias for tagwise-fetch operations
pub type Result<T> = std::result::Result<T, FetchError>;
