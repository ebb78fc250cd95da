//! Product lookup results and the status → variant mapping

use serde::{Deserialize, Serialize};
use tagwise_core::{parse_tagged, TaggedUnion};

use crate::{FetchConfig, FetchError, Result};

pub const BASE_URL: &str = "https://equalexperts.github.io";
pub const PATH_TEMPLATE: &str = "/backend-take-home-test-data/{product}.json";

/// Placeholder replaced by the product name in [`PATH_TEMPLATE`]
pub const PRODUCT_PLACEHOLDER: &str = "{product}";

/// Field carrying the [`ProductLookup`] discriminant
pub const TAG_FIELD: &str = "outcome";

pub const HTTP_OK: u16 = 200;
pub const PAGE_NOT_FOUND: u16 = 404;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    pub price: f64,
    pub title: String,
}

/// Body of a successful response; the name comes from the request
#[derive(Debug, Deserialize)]
struct ProductBody {
    price: f64,
    title: String,
}

/// Outcome of fetching one product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ProductLookup {
    Found(Product),
    NotFound { message: String, code: u16 },
    Failed { message: String, code: u16 },
}

impl TaggedUnion for ProductLookup {
    const UNION: &'static str = "ProductLookup";
    const TAGS: &'static [&'static str] = &["found", "not_found", "failed"];

    fn tag(&self) -> &'static str {
        match self {
            Self::Found(_) => "found",
            Self::NotFound { .. } => "not_found",
            Self::Failed { .. } => "failed",
        }
    }
}

impl ProductLookup {
    /// Status code behind this outcome
    #[must_use]
    pub const fn code(&self) -> u16 {
        match self {
            Self::Found(_) => HTTP_OK,
            Self::NotFound { code, .. } | Self::Failed { code, .. } => *code,
        }
    }

    /// Parse a serialized lookup, rejecting unknown `outcome` tags.
    ///
    /// # Errors
    ///
    /// `FetchError::Core` for malformed input or an unknown tag.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(parse_tagged(json, TAG_FIELD)?)
    }
}

/// Substitute `name` for the first `{product}` in the configured path template.
///
/// The name is inserted as given, without escaping. Later placeholders are
/// left as they are.
#[must_use]
pub fn product_url(config: &FetchConfig, name: &str) -> String {
    format!(
        "{}{}",
        config.base_url,
        config.path_template.replacen(PRODUCT_PLACEHOLDER, name, 1)
    )
}

/// Map a response onto its lookup variant.
///
/// # Errors
///
/// `FetchError::Decode` when a 200 body is not a product.
pub fn classify_response(name: &str, status: u16, body: &[u8]) -> Result<ProductLookup> {
    match status {
        HTTP_OK => {
            let body: ProductBody =
                serde_json::from_slice(body).map_err(|source| FetchError::Decode {
                    name: name.to_string(),
                    source,
                })?;
            Ok(ProductLookup::Found(Product {
                name: name.to_string(),
                price: body.price,
                title: body.title,
            }))
        }
        PAGE_NOT_FOUND => Ok(ProductLookup::NotFound {
            message: format!("Product {name} not found"),
            code: PAGE_NOT_FOUND,
        }),
        code => Ok(ProductLookup::Failed {
            message: "Internal failure".to_string(),
            code,
        }),
    }
}

#[must_use]
pub fn describe_lookup(lookup: &ProductLookup) -> String {
    match lookup {
        ProductLookup::Found(product) => {
            format!("{} ({}): {}", product.title, product.name, product.price)
        }
        ProductLookup::NotFound { message, .. } => message.clone(),
        ProductLookup::Failed { message, code } => format!("{message} ({code})"),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    fn every_outcome() -> Vec<ProductLookup> {
        vec![
            ProductLookup::Found(Product {
                name: "shirt".to_string(),
                price: 10.0,
                title: "X".to_string(),
            }),
            ProductLookup::NotFound {
                message: "Product shirt not found".to_string(),
                code: PAGE_NOT_FOUND,
            },
            ProductLookup::Failed {
                message: "Internal failure".to_string(),
                code: 500,
            },
        ]
    }

    #[test]
    fn test_wire_tags_match_declared_set() -> Result<()> {
        let mut seen = BTreeSet::new();
        for lookup in every_outcome() {
            let wire = serde_json::to_value(&lookup).map_err(tagwise_core::Error::from)?;
            assert_eq!(wire[TAG_FIELD], lookup.tag());
            seen.insert(lookup.tag());
        }
        let declared: BTreeSet<&str> = ProductLookup::TAGS.iter().copied().collect();
        assert_eq!(seen, declared);
        Ok(())
    }

    #[test]
    fn test_every_outcome_round_trips_through_from_json() -> Result<()> {
        for lookup in every_outcome() {
            let json = serde_json::to_string(&lookup).map_err(tagwise_core::Error::from)?;
            assert_eq!(ProductLookup::from_json(&json)?, lookup);
        }
        Ok(())
    }

    #[test]
    fn test_url_substitutes_first_placeholder_only() {
        let config = FetchConfig {
            path_template: "/{product}/{product}.json".to_string(),
            ..FetchConfig::default()
        };
        assert_eq!(
            product_url(&config, "mug"),
            "https://equalexperts.github.io/mug/{product}.json"
        );
    }

    #[test]
    fn test_ok_maps_to_found() -> Result<()> {
        let lookup = classify_response("shirt", 200, br#"{"price": 10, "title": "X"}"#)?;
        assert_eq!(
            lookup,
            ProductLookup::Found(Product {
                name: "shirt".to_string(),
                price: 10.0,
                title: "X".to_string(),
            })
        );
        assert!(describe_lookup(&lookup).contains('X'));
        Ok(())
    }

    #[test]
    fn test_not_found_names_product() -> Result<()> {
        let lookup = classify_response("shirt", 404, b"")?;
        assert_eq!(lookup.tag(), "not_found");
        assert_eq!(lookup.code(), 404);
        assert!(describe_lookup(&lookup).contains("shirt"));
        Ok(())
    }

    #[test]
    fn test_other_status_is_generic_failure() -> Result<()> {
        let lookup = classify_response("shirt", 500, b"oops")?;
        assert_eq!(
            lookup,
            ProductLookup::Failed {
                message: "Internal failure".to_string(),
                code: 500,
            }
        );
        Ok(())
    }

    #[test]
    fn test_bad_ok_body_is_decode_error() {
        let result = classify_response("shirt", 200, b"<html>");
        assert!(matches!(result, Err(FetchError::Decode { ref name, .. }) if name == "shirt"));
    }

    #[test]
    fn test_url_substitutes_name() {
        let url = product_url(&FetchConfig::default(), "cheerios");
        assert_eq!(
            url,
            "https://equalexperts.github.io/backend-take-home-test-data/cheerios.json"
        );
    }

    #[test]
    fn test_lookup_json_round_trip_and_unknown_outcome() -> Result<()> {
        let lookup = classify_response("shirt", 503, b"")?;
        let json = serde_json::to_string(&lookup).map_err(|source| FetchError::Decode {
            name: "shirt".to_string(),
            source,
        })?;
        assert_eq!(ProductLookup::from_json(&json)?, lookup);

        let result = ProductLookup::from_json(r#"{"outcome": "cached"}"#);
        assert!(matches!(
            result,
            Err(FetchError::Core(tagwise_core::Error::UnknownTag { .. }))
        ));
        Ok(())
    }
}
