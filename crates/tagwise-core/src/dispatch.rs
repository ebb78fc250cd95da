//! Exhaustive dispatch over tagged unions
//!
//! Typed dispatch is a plain `match`: the compiler rejects a dispatcher that
//! misses a variant. This module covers the places where the compiler cannot
//! see the variant set:
//!
//! - [`parse_tagged`] for values crossing a serialization boundary, which
//!   rejects tags outside the set instead of defaulting
//! - [`DispatchTable`] for handlers keyed by tag at runtime, whose builder
//!   refuses to construct a table that misses a tag
//! - [`unexpected_variant`] for a branch that the caller knows is
//!   unreachable for its input, turning it into a loud error

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{Error, Result};

/// A closed set of variants, each identified by a unique literal tag.
pub trait TaggedUnion {
    /// Name of the union, used in error messages
    const UNION: &'static str;

    /// Every tag of the variant set, in declaration order
    const TAGS: &'static [&'static str];

    /// Tag of the active variant
    fn tag(&self) -> &'static str;
}

/// Build the error for a variant that should never reach this point.
///
/// The returned error carries both the tag and the debug rendering of the
/// value, so the offending variant is identifiable from the message alone.
pub fn unexpected_variant<T>(value: &T) -> Error
where
    T: TaggedUnion + fmt::Debug,
{
    let tag = value.tag();
    tracing::warn!(union = T::UNION, tag, "unexpected variant reached dispatcher");
    Error::UnexpectedVariant {
        union: T::UNION,
        tag: tag.to_string(),
        value: format!("{value:?}"),
    }
}

/// Compare a variant set against the tags a dispatcher handles.
///
/// # Errors
///
/// - `Error::MissingHandlers` if any expected tag is not handled
/// - `Error::UnknownTag` if a handled tag is not part of the set
pub fn check_coverage<'a, I>(expected: &'static [&'static str], handled: I) -> Result<()>
where
    I: IntoIterator<Item = &'a str>,
{
    let handled: BTreeSet<&str> = handled.into_iter().collect();

    if let Some(extra) = handled.iter().copied().find(|tag| !expected.contains(tag)) {
        return Err(Error::UnknownTag {
            tag: extra.to_string(),
            expected: expected.to_vec(),
            value: "<handler registration>".to_string(),
        });
    }

    let missing: Vec<String> = expected
        .iter()
        .filter(|tag| !handled.contains(*tag))
        .map(|tag| (*tag).to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(Error::MissingHandlers { missing })
    }
}

/// Read the discriminant of a raw JSON value.
fn read_tag<'v>(value: &'v Value, tag_field: &str) -> Result<&'v str> {
    value
        .get(tag_field)
        .and_then(Value::as_str)
        .ok_or_else(|| Error::MissingTag {
            field: tag_field.to_string(),
            value: value.to_string(),
        })
}

/// Parse a tagged value from JSON, rejecting tags outside the variant set.
///
/// # Errors
///
/// - `Error::Json` if the input is not valid JSON or a known variant is malformed
/// - `Error::MissingTag` if `tag_field` is absent or not a string
/// - `Error::UnknownTag` if the tag is not one of `T::TAGS`
pub fn parse_tagged<T>(json: &str, tag_field: &str) -> Result<T>
where
    T: TaggedUnion + DeserializeOwned,
{
    let value: Value = serde_json::from_str(json)?;
    parse_tagged_value(value, tag_field)
}

/// [`parse_tagged`] for an already decoded JSON value.
///
/// # Errors
///
/// Same as [`parse_tagged`].
pub fn parse_tagged_value<T>(value: Value, tag_field: &str) -> Result<T>
where
    T: TaggedUnion + DeserializeOwned,
{
    let tag = read_tag(&value, tag_field)?;
    if !T::TAGS.contains(&tag) {
        tracing::warn!(union = T::UNION, tag, "unknown tag at serialization boundary");
        return Err(Error::UnknownTag {
            tag: tag.to_string(),
            expected: T::TAGS.to_vec(),
            value: value.to_string(),
        });
    }
    Ok(serde_json::from_value(value)?)
}

type Handler<O> = Box<dyn Fn(&Value) -> Result<O> + Send + Sync>;

/// Runtime dispatcher over raw tagged JSON values.
///
/// Only constructible through [`DispatchTableBuilder::build`], which checks
/// that every tag of the variant set has exactly one handler.
pub struct DispatchTable<O> {
    union: &'static str,
    tag_field: String,
    handlers: BTreeMap<String, Handler<O>>,
}

impl<O> fmt::Debug for DispatchTable<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DispatchTable")
            .field("union", &self.union)
            .field("tag_field", &self.tag_field)
            .field("tags", &self.handlers.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl<O> DispatchTable<O> {
    /// Start a table for the variant set of `U`.
    #[must_use]
    pub fn builder<U: TaggedUnion>(tag_field: impl Into<String>) -> DispatchTableBuilder<O> {
        DispatchTableBuilder::new(U::UNION, U::TAGS, tag_field)
    }

    /// Tags this table dispatches on
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.handlers.keys().map(String::as_str)
    }

    /// Route `value` to the handler for its tag.
    ///
    /// # Errors
    ///
    /// - `Error::MissingTag` if the tag field is absent
    /// - `Error::UnhandledVariant` if no handler exists for the tag
    /// - Whatever the handler itself returns
    pub fn dispatch(&self, value: &Value) -> Result<O> {
        let tag = read_tag(value, &self.tag_field)?;
        match self.handlers.get(tag) {
            Some(handler) => {
                tracing::debug!(union = self.union, tag, "dispatching");
                handler(value)
            }
            None => {
                tracing::warn!(union = self.union, tag, "no handler for variant");
                Err(Error::UnhandledVariant {
                    tag: tag.to_string(),
                    value: value.to_string(),
                })
            }
        }
    }
}

/// Collects handlers for a [`DispatchTable`].
///
/// Registration problems are kept until [`build`](Self::build) so that
/// builder chains stay linear.
pub struct DispatchTableBuilder<O> {
    union: &'static str,
    tags: &'static [&'static str],
    tag_field: String,
    handlers: BTreeMap<String, Handler<O>>,
    duplicate: Option<String>,
}

impl<O> DispatchTableBuilder<O> {
    /// Start a table for an explicit variant set.
    #[must_use]
    pub fn new(
        union: &'static str,
        tags: &'static [&'static str],
        tag_field: impl Into<String>,
    ) -> Self {
        Self {
            union,
            tags,
            tag_field: tag_field.into(),
            handlers: BTreeMap::new(),
            duplicate: None,
        }
    }

    /// Register the handler for one tag.
    #[must_use]
    pub fn on<F>(mut self, tag: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&Value) -> Result<O> + Send + Sync + 'static,
    {
        let tag = tag.into();
        if self.handlers.contains_key(&tag) {
            if self.duplicate.is_none() {
                self.duplicate = Some(tag);
            }
        } else {
            self.handlers.insert(tag, Box::new(handler));
        }
        self
    }

    /// Finish the table, checking it covers the variant set exactly.
    ///
    /// # Errors
    ///
    /// - `Error::DuplicateHandler` if a tag was registered twice
    /// - `Error::UnknownTag` if a handler names a tag outside the set
    /// - `Error::MissingHandlers` if a tag of the set has no handler
    pub fn build(self) -> Result<DispatchTable<O>> {
        if let Some(tag) = self.duplicate {
            return Err(Error::DuplicateHandler { tag });
        }
        check_coverage(self.tags, self.handlers.keys().map(String::as_str))?;

        Ok(DispatchTable {
            union: self.union,
            tag_field: self.tag_field,
            handlers: self.handlers,
        })
    }
}
