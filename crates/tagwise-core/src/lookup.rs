//! User lookups whose first element tags the payload that follows it

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::dispatch::{parse_tagged, TaggedUnion};
use crate::Result;

/// Field carrying the [`UserLookup`] discriminant
pub const TAG_FIELD: &str = "tag";

/// Outcome of a coin flip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Coin {
    Heads,
    Tails,
}

impl Coin {
    /// Flip a fair coin
    pub fn flip<R: Rng + ?Sized>(rng: &mut R) -> Self {
        if rng.gen_bool(0.5) {
            Self::Heads
        } else {
            Self::Tails
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    pub name: String,
    pub email: String,
}

/// Failure payload of a lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{message}")]
pub struct LookupError {
    pub message: String,
}

/// `("success", user)` or `("error", failure)`. Serialized as
/// `{"tag": ..., "payload": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "tag", content = "payload", rename_all = "lowercase")]
pub enum UserLookup {
    Success(UserInfo),
    Error(LookupError),
}

impl TaggedUnion for UserLookup {
    const UNION: &'static str = "UserLookup";
    const TAGS: &'static [&'static str] = &["success", "error"];

    fn tag(&self) -> &'static str {
        match self {
            Self::Success(_) => "success",
            Self::Error(_) => "error",
        }
    }
}

impl UserLookup {
    /// One line per field of the payload the tag selects
    #[must_use]
    pub fn summary(&self) -> Vec<String> {
        match self {
            Self::Error(err) => vec![err.message.clone()],
            Self::Success(user) => vec![user.email.clone(), user.name.clone()],
        }
    }

    /// Convert into a standard `Result`
    pub fn into_result(self) -> std::result::Result<UserInfo, LookupError> {
        match self {
            Self::Success(user) => Ok(user),
            Self::Error(err) => Err(err),
        }
    }

    /// Parse a serialized lookup, rejecting unknown `tag` values.
    ///
    /// # Errors
    ///
    /// `Error::UnknownTag` for a tag outside the variant set, `Error::MissingTag`
    /// when `tag` is absent, `Error::Json` for malformed input.
    pub fn from_json(json: &str) -> Result<Self> {
        parse_tagged(json, TAG_FIELD)
    }
}

/// Heads finds the user, tails fails.
#[must_use]
pub fn maybe_get_user_info(coin: Coin) -> UserLookup {
    match coin {
        Coin::Heads => UserLookup::Success(UserInfo {
            name: "Sanjeev".to_string(),
            email: "ss@example.com".to_string(),
        }),
        Coin::Tails => UserLookup::Error(LookupError {
            message: "Something went wrong!".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_heads_finds_user() {
        let lookup = maybe_get_user_info(Coin::Heads);
        assert_eq!(lookup.tag(), "success");
        assert_eq!(lookup.summary(), vec!["ss@example.com", "Sanjeev"]);
    }

    #[test]
    fn test_tails_reports_error_message() {
        let lookup = maybe_get_user_info(Coin::Tails);
        assert_eq!(lookup.tag(), "error");
        assert_eq!(lookup.summary(), vec!["Something went wrong!"]);
        assert!(lookup.into_result().is_err());
    }

    #[test]
    fn test_flip_produces_both_sides() {
        let mut rng = StdRng::seed_from_u64(7);
        let flips: Vec<Coin> = (0..64).map(|_| Coin::flip(&mut rng)).collect();
        assert!(flips.contains(&Coin::Heads));
        assert!(flips.contains(&Coin::Tails));
    }

    #[test]
    fn test_serializes_as_tag_payload_pair() -> Result<()> {
        let json = serde_json::to_value(maybe_get_user_info(Coin::Tails))?;
        assert_eq!(
            json,
            serde_json::json!({"tag": "error", "payload": {"message": "Something went wrong!"}})
        );
        Ok(())
    }

    #[test]
    fn test_both_sides_round_trip_through_tag_field() -> Result<()> {
        for coin in [Coin::Heads, Coin::Tails] {
            let lookup = maybe_get_user_info(coin);
            let json = serde_json::to_string(&lookup)?;
            assert_eq!(UserLookup::from_json(&json)?, lookup);
        }
        Ok(())
    }

    #[test]
    fn test_unknown_lookup_tag_is_rejected() {
        let result = UserLookup::from_json(r#"{"tag": "pending", "payload": null}"#);
        assert!(matches!(result, Err(crate::Error::UnknownTag { ref tag, .. }) if tag == "pending"));
    }
}
