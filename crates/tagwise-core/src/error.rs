//! Error types for tagwise-core
//!
//! Every variant that reports a rejected value carries that value, so an
//! unexpected input is visible in the message instead of being coerced away.

use thiserror::Error;

/// Core error type for dispatch and narrowing operations
#[derive(Debug, Error)]
pub enum Error {
    /// A value reached a branch that the variant set says cannot exist
    #[error("Unexpected variant '{tag}' of {union}: {value}")]
    UnexpectedVariant {
        union: &'static str,
        tag: String,
        value: String,
    },

    /// A discriminant outside the variant set crossed a serialization boundary
    #[error("Unknown tag '{tag}' (expected one of: {}): {value}", expected.join(", "))]
    UnknownTag {
        tag: String,
        expected: Vec<&'static str>,
        value: String,
    },

    /// The discriminant field is absent or not a string
    #[error("Missing tag field '{field}': {value}")]
    MissingTag { field: String, value: String },

    /// A dispatch table has no handler for a tag it received
    #[error("No handler for variant '{tag}': {value}")]
    UnhandledVariant { tag: String, value: String },

    /// A dispatch table was built without covering the whole variant set
    #[error("Dispatcher does not handle variants: {}", missing.join(", "))]
    MissingHandlers { missing: Vec<String> },

    /// The same tag was registered twice on one dispatch table
    #[error("Handler for variant '{tag}' registered twice")]
    DuplicateHandler { tag: String },

    /// A key lookup named a field the record does not have
    #[error("Property '{field}' does not exist on type '{type_name}'")]
    UnknownField {
        type_name: &'static str,
        field: String,
    },

    /// A literal outside a closed literal set
    #[error("Value {value} is not assignable to {set}")]
    NotInSet { value: i64, set: String },

    /// A structural probe matched more than one shape
    #[error("Value matches more than one shape ({}): {value}", candidates.join(", "))]
    AmbiguousShape {
        candidates: Vec<&'static str>,
        value: String,
    },

    /// A structural probe matched no shape
    #[error("Value matches none of the shapes ({}): {value}", expected.join(", "))]
    UnknownShape {
        expected: Vec<&'static str>,
        value: String,
    },

    /// A padding width too large to allocate
    #[error("Padding of {width} spaces is too wide")]
    PaddingTooWide { width: usize },

    /// JSON decoding failed for a reason other than the tag
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for tagwise-core operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_tag_lists_expected_tags() {
        let err = Error::UnknownTag {
            tag: "from_cache".to_string(),
            expected: vec!["loading", "failed", "success"],
            value: "{}".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("from_cache"));
        assert!(msg.contains("loading, failed, success"));
    }

    #[test]
    fn test_unknown_field_reads_like_a_property_error() {
        let err = Error::UnknownField {
            type_name: "Person",
            field: "alve".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Property 'alve' does not exist on type 'Person'"
        );
    }
}
