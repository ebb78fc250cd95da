//! Tagwise-fetch - product lookups over HTTP, reported as tagged results
//!
//! A response status maps onto exactly one [`ProductLookup`] variant:
//! - 200 → [`ProductLookup::Found`] with the decoded product
//! - 404 → [`ProductLookup::NotFound`] naming the requested product
//! - anything else → [`ProductLookup::Failed`] carrying the status
//!
//! No retry, timeout or backoff is applied.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod client;
pub mod config;
pub mod error;
pub mod product;

pub use client::ProductClient;
pub use config::{load_config, FetchConfig};
pub use error::{FetchError, Result};
pub use product::{
    classify_response, describe_lookup, product_url, Product, ProductLookup, BASE_URL,
    HTTP_OK, PAGE_NOT_FOUND, PATH_TEMPLATE, TAG_FIELD,
};
