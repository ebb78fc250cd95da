//! Narrowing predicates
//!
//! A predicate that narrows must be true for exactly one shape. Predicates
//! built on an incidental property give false narrowing: no error is raised,
//! the caller just takes the wrong branch. The JSON predicates here state
//! their exact positive criteria:
//!
//! | predicate      | true for                               |
//! |----------------|----------------------------------------|
//! | [`is_null`]    | `null` only                            |
//! | [`is_nullish`] | missing or `null`                      |
//! | [`has_field`]  | object with the key, whatever its value |
//! | [`is_truthy`]  | anything except `null`, `false`, `0`, `""` |
//!
//! [`is_truthy`] is not a null check. Using `!is_truthy(v)` to mean "absent"
//! misclassifies `0`, `""` and `false` as null.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{Error, Result};

// ═══════════════════════════════════════════════════════════════════════════
// TYPEOF GUARDS
// ═══════════════════════════════════════════════════════════════════════════

/// Either a number of spaces or a literal prefix
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Padding {
    Spaces(usize),
    Text(String),
}

impl From<usize> for Padding {
    fn from(n: usize) -> Self {
        Self::Spaces(n)
    }
}

impl From<&str> for Padding {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

/// Prefix `input` with `n` spaces or with the given text.
///
/// # Errors
///
/// `Error::PaddingTooWide` when the padded string cannot be allocated.
pub fn pad_left(padding: &Padding, input: &str) -> Result<String> {
    match padding {
        Padding::Spaces(n) => {
            let too_wide = || Error::PaddingTooWide { width: *n };
            let len = n.checked_add(input.len()).ok_or_else(too_wide)?;
            let mut padded = String::new();
            padded.try_reserve_exact(len).map_err(|_| too_wide())?;
            padded.extend(std::iter::repeat(' ').take(*n));
            padded.push_str(input);
            Ok(padded)
        }
        Padding::Text(prefix) => Ok(format!("{prefix}{input}")),
    }
}

/// A string or a list of strings; `Option<Strings>` adds the null case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Strings {
    One(String),
    Many(Vec<String>),
}

/// Every string in `strs`, in order. `None` yields nothing.
///
/// The null check is on `None` alone, so `Some(One(""))` still yields the
/// empty string.
#[must_use]
pub fn print_all(strs: Option<&Strings>) -> Vec<String> {
    let lines = match strs {
        Some(Strings::Many(items)) => items.clone(),
        Some(Strings::One(s)) => vec![s.clone()],
        None => Vec::new(),
    };
    for line in &lines {
        tracing::info!(line = %line, "print_all");
    }
    lines
}

// ═══════════════════════════════════════════════════════════════════════════
// JSON PREDICATES
// ═══════════════════════════════════════════════════════════════════════════

/// `true` only for JSON `null`
#[must_use]
pub const fn is_null(value: &Value) -> bool {
    matches!(value, Value::Null)
}

/// Loose `!= null` in reverse: `true` when the value is missing or `null`
#[must_use]
pub const fn is_nullish(value: Option<&Value>) -> bool {
    matches!(value, None | Some(Value::Null))
}

/// JavaScript truthiness of a JSON value.
///
/// Falsy: `null`, `false`, `0`, `-0`, `NaN` and `""`. Arrays and objects
/// are truthy even when empty.
#[must_use]
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f.abs() > 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// `key in value`: the key is present on an object, even if its value is falsy
#[must_use]
pub fn has_field(value: &Value, key: &str) -> bool {
    value.as_object().is_some_and(|obj| obj.contains_key(key))
}

// ═══════════════════════════════════════════════════════════════════════════
// EQUALITY NARROWING
// ═══════════════════════════════════════════════════════════════════════════

/// A record whose value may be missing
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Container {
    pub value: Option<f64>,
}

/// Multiply the contained value, leaving a missing value missing.
///
/// A present zero is multiplied like any other number.
#[must_use]
pub fn multiply_value(container: Container, factor: f64) -> Container {
    Container {
        value: container.value.map(|v| v * factor),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum StrOrNum {
    Str(String),
    Num(f64),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StrOrBool {
    Str(String),
    Bool(bool),
}

/// The common string when `x` and `y` are equal.
///
/// Strings are the only type both sides can share, so equality narrows both
/// to `Str`. Inequality narrows nothing.
#[must_use]
pub fn equal_strings(x: &StrOrNum, y: &StrOrBool) -> Option<String> {
    match (x, y) {
        (StrOrNum::Str(a), StrOrBool::Str(b)) if a == b => Some(a.clone()),
        _ => None,
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// INSTANCEOF NARROWING
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateOrText {
    Date(DateTime<Utc>),
    Text(String),
}

#[must_use]
pub fn log_value(value: &DateOrText) -> String {
    match value {
        DateOrText::Date(date) => date.to_rfc2822(),
        DateOrText::Text(text) => text.to_uppercase(),
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// STRUCTURAL NARROWING
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fish {
    pub name: String,
}

impl Fish {
    #[must_use]
    pub fn swim(&self) -> String {
        format!("{} swims", self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bird {
    pub name: String,
}

impl Bird {
    #[must_use]
    pub fn fly(&self) -> String {
        format!("{} flies", self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pet {
    Fish(Fish),
    Bird(Bird),
}

impl Pet {
    /// `true` exactly when this is a [`Fish`]; `false` means [`Bird`]
    #[must_use]
    pub const fn is_fish(&self) -> bool {
        matches!(self, Self::Fish(_))
    }

    #[must_use]
    pub const fn as_fish(&self) -> Option<&Fish> {
        match self {
            Self::Fish(fish) => Some(fish),
            Self::Bird(_) => None,
        }
    }

    #[must_use]
    pub fn movement(&self) -> String {
        match self {
            Self::Fish(fish) => fish.swim(),
            Self::Bird(bird) => bird.fly(),
        }
    }
}

const PET_SHAPES: &[&str] = &["Fish", "Bird"];

/// Classify a raw pet by the capability keys it carries.
///
/// `swim` present means Fish and `fly` present means Bird. Presence is what
/// counts, so `{"swim": false}` is still a Fish.
///
/// # Errors
///
/// - `Error::AmbiguousShape` when both keys are present
/// - `Error::UnknownShape` when neither is, or the value is not an object
pub fn classify_pet(value: &Value) -> Result<Pet> {
    let name = value
        .get("name")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    match (has_field(value, "swim"), has_field(value, "fly")) {
        (true, false) => Ok(Pet::Fish(Fish { name })),
        (false, true) => Ok(Pet::Bird(Bird { name })),
        (true, true) => Err(Error::AmbiguousShape {
            candidates: PET_SHAPES.to_vec(),
            value: value.to_string(),
        }),
        (false, false) => Err(Error::UnknownShape {
            expected: PET_SHAPES.to_vec(),
            value: value.to_string(),
        }),
    }
}

const SWIMMERS: &[&str] = &["Fish", "Human"];
const FLYERS: &[&str] = &["Bird", "Human"];

/// Shapes left after testing `"swim" in value` over Fish, Bird and Human.
///
/// Human declares `swim` and `fly` as optional, so the key test can never
/// rule it out: it stays on both sides.
#[must_use]
pub fn narrow_by_swim(value: &Value) -> &'static [&'static str] {
    if has_field(value, "swim") {
        SWIMMERS
    } else {
        FLYERS
    }
}
