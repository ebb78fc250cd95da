//! Async HTTP client for product lookups

use tagwise_core::TaggedUnion;

use crate::product::{classify_response, product_url, ProductLookup};
use crate::{FetchConfig, FetchError, Result};

/// Fetches products and reports each response as a [`ProductLookup`].
///
/// Cloning is cheap; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct ProductClient {
    http: reqwest::Client,
    config: FetchConfig,
}

impl ProductClient {
    /// Build a client from a validated config
    ///
    /// # Errors
    ///
    /// `FetchError::Config` if the config is invalid or the HTTP client
    /// cannot be constructed.
    pub fn new(config: FetchConfig) -> Result<Self> {
        config.validate()?;
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| FetchError::Config(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { http, config })
    }

    /// Build a client around an existing `reqwest::Client`
    ///
    /// # Errors
    ///
    /// `FetchError::Config` if the config is invalid.
    pub fn with_http(config: FetchConfig, http: reqwest::Client) -> Result<Self> {
        config.validate()?;
        Ok(Self { http, config })
    }

    #[must_use]
    pub const fn config(&self) -> &FetchConfig {
        &self.config
    }

    /// Fetch one product by name.
    ///
    /// # Errors
    ///
    /// - `FetchError::Transport` when the request fails or the body cannot be read
    /// - `FetchError::Decode` when a 200 body is not a product
    pub async fn fetch(&self, name: &str) -> Result<ProductLookup> {
        let url = product_url(&self.config, name);
        tracing::debug!(%url, product = name, "fetching product");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.clone(),
                source,
            })?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.clone(),
                source,
            })?;

        let lookup = classify_response(name, status, &body)?;
        tracing::debug!(%url, status, outcome = lookup.tag(), "product fetched");
        Ok(lookup)
    }
}
