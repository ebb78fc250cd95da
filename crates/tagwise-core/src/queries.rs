//! Type queries: the key set of a record, key kinds of index signatures,
//! indexed access by key, and runtime `typeof` over JSON values.

use std::collections::BTreeSet;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::{AsRefStr, Display, EnumIter, IntoEnumIterator};

use crate::{Error, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub age: f64,
    pub name: String,
    pub alive: bool,
}

/// The key set of [`Person`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter, AsRefStr, Display)]
#[strum(serialize_all = "lowercase")]
pub enum PersonKey {
    Age,
    Name,
    Alive,
}

impl FromStr for PersonKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::iter()
            .find(|key| key.as_ref() == s)
            .ok_or_else(|| Error::UnknownField {
                type_name: "Person",
                field: s.to_string(),
            })
    }
}

/// Static type of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display)]
#[strum(serialize_all = "lowercase")]
pub enum FieldKind {
    Number,
    String,
    Boolean,
}

impl PersonKey {
    /// Type of `Person[self]`
    #[must_use]
    pub const fn kind(self) -> FieldKind {
        match self {
            Self::Age => FieldKind::Number,
            Self::Name => FieldKind::String,
            Self::Alive => FieldKind::Boolean,
        }
    }
}

/// Type of `Person[K1 | K2 | ...]`: the union of the kinds of each key
#[must_use]
pub fn kinds_of(keys: &[PersonKey]) -> BTreeSet<FieldKind> {
    keys.iter().map(|key| key.kind()).collect()
}

/// Index signature of an open record: `{ [n: number]: T }` or `{ [k: string]: T }`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Display)]
#[strum(serialize_all = "lowercase")]
pub enum IndexSignature {
    Number,
    String,
}

impl IndexSignature {
    /// Kinds the key set covers. A string index also covers numbers, since
    /// `obj[0]` is read as `obj["0"]`.
    #[must_use]
    pub const fn key_kinds(self) -> &'static [FieldKind] {
        match self {
            Self::Number => &[FieldKind::Number],
            Self::String => &[FieldKind::String, FieldKind::Number],
        }
    }

    /// Whether a JSON value can be used as a key of this signature
    #[must_use]
    pub fn admits(self, key: &Value) -> bool {
        let kind = match type_of(key) {
            JsType::Number => FieldKind::Number,
            JsType::String => FieldKind::String,
            JsType::Boolean | JsType::Object => return false,
        };
        self.key_kinds().contains(&kind)
    }
}

/// Value read from a [`Person`] field
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Number(f64),
    Text(String),
    Bool(bool),
}

impl FieldValue {
    #[must_use]
    pub const fn kind(&self) -> FieldKind {
        match self {
            Self::Number(_) => FieldKind::Number,
            Self::Text(_) => FieldKind::String,
            Self::Bool(_) => FieldKind::Boolean,
        }
    }
}

impl Person {
    #[must_use]
    pub fn new(age: f64, name: impl Into<String>, alive: bool) -> Self {
        Self {
            age,
            name: name.into(),
            alive,
        }
    }

    /// Indexed access `person[key]`
    #[must_use]
    pub fn get(&self, key: PersonKey) -> FieldValue {
        match key {
            PersonKey::Age => FieldValue::Number(self.age),
            PersonKey::Name => FieldValue::Text(self.name.clone()),
            PersonKey::Alive => FieldValue::Bool(self.alive),
        }
    }

    /// Indexed access over several keys, in the order given
    #[must_use]
    pub fn get_many(&self, keys: &[PersonKey]) -> Vec<FieldValue> {
        keys.iter().map(|key| self.get(*key)).collect()
    }

    /// Indexed access by a key name that is only known at runtime.
    ///
    /// # Errors
    ///
    /// `Error::UnknownField` when `key` is not a field of `Person`.
    pub fn get_by_name(&self, key: &str) -> Result<FieldValue> {
        key.parse().map(|key| self.get(key))
    }
}

/// Result of a runtime `typeof` on a JSON value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "lowercase")]
pub enum JsType {
    String,
    Number,
    Boolean,
    Object,
}

/// Runtime `typeof`. Arrays and `null` are both `object`, so this alone
/// cannot separate a list from a missing value.
#[must_use]
pub const fn type_of(value: &Value) -> JsType {
    match value {
        Value::String(_) => JsType::String,
        Value::Number(_) => JsType::Number,
        Value::Bool(_) => JsType::Boolean,
        Value::Null | Value::Array(_) | Value::Object(_) => JsType::Object,
    }
}
