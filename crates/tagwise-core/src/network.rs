//! Network load state, discriminated on its `state` field

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::dispatch::{parse_tagged, unexpected_variant, TaggedUnion};
use crate::Result;

/// Name of the discriminant field on the wire
pub const TAG_FIELD: &str = "state";

/// Payload of a completed download
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkResponse {
    pub title: String,
    pub duration: f64,
    pub summary: String,
}

impl NetworkResponse {
    #[must_use]
    pub fn new(title: impl Into<String>, duration: f64, summary: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            duration,
            summary: summary.into(),
        }
    }
}

/// Exactly one of the states a download can be in.
///
/// Only `state` is common to every variant; `code` and `response` exist on
/// their own variants and are reachable only after matching on the tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum NetworkState {
    /// Request in flight
    Loading,
    /// Request finished with an error status
    Failed { code: u16 },
    /// Request finished with a response
    Success { response: NetworkResponse },
    /// Response served from the local cache
    FromCache { id: String, response: NetworkResponse },
}

/// Field-less discriminant of [`NetworkState`], iterable for coverage checks
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Display, EnumString, IntoStaticStr,
)]
#[strum(serialize_all = "snake_case")]
pub enum NetworkTag {
    Loading,
    Failed,
    Success,
    FromCache,
}

impl TaggedUnion for NetworkState {
    const UNION: &'static str = "NetworkState";
    const TAGS: &'static [&'static str] = &["loading", "failed", "success", "from_cache"];

    fn tag(&self) -> &'static str {
        self.kind().into()
    }
}

impl NetworkState {
    /// Discriminant of this state
    #[must_use]
    pub const fn kind(&self) -> NetworkTag {
        match self {
            Self::Loading => NetworkTag::Loading,
            Self::Failed { .. } => NetworkTag::Failed,
            Self::Success { .. } => NetworkTag::Success,
            Self::FromCache { .. } => NetworkTag::FromCache,
        }
    }

    /// Response payload, present on the success and cached variants
    #[must_use]
    pub const fn response(&self) -> Option<&NetworkResponse> {
        match self {
            Self::Success { response } | Self::FromCache { response, .. } => Some(response),
            Self::Loading | Self::Failed { .. } => None,
        }
    }

    /// Parse a state from JSON, rejecting unknown `state` tags.
    ///
    /// # Errors
    ///
    /// `Error::UnknownTag` for a tag outside the variant set, `Error::MissingTag`
    /// when `state` is absent, `Error::Json` for malformed input.
    pub fn from_json(json: &str) -> Result<Self> {
        parse_tagged(json, TAG_FIELD)
    }
}

/// Render a one-line status message for a download state.
///
/// ```
/// use tagwise_core::{describe, NetworkState};
///
/// assert_eq!(describe(&NetworkState::Failed { code: 404 }), "Error 404 downloading");
/// ```
///
/// Every variant has its own arm. Leaving one out is a build error rather
/// than a silent empty message:
///
/// ```compile_fail,E0004
/// use tagwise_core::NetworkState;
///
/// fn logger(state: &NetworkState) -> String {
///     match state {
///         NetworkState::Loading => "Downloading...".to_string(),
///         NetworkState::Failed { code } => format!("Error {code} downloading"),
///         NetworkState::Success { response } => {
///             format!("Downloaded {} - {}", response.title, response.summary)
///         }
///     }
/// }
/// ```
#[must_use]
pub fn describe(state: &NetworkState) -> String {
    match state {
        NetworkState::Loading => "Downloading...".to_string(),
        NetworkState::Failed { code } => format!("Error {code} downloading"),
        NetworkState::Success { response } => {
            format!("Downloaded {} - {}", response.title, response.summary)
        }
        NetworkState::FromCache { id, response } => format!(
            "Loaded {} - {} from cache ({id})",
            response.title, response.summary
        ),
    }
}

/// Describe a state that went over the network.
///
/// Cached states never made a request, so they are refused with the
/// offending value instead of being given a placeholder message.
///
/// # Errors
///
/// `Error::UnexpectedVariant` for [`NetworkState::FromCache`].
pub fn describe_download(state: &NetworkState) -> Result<String> {
    match state {
        NetworkState::Loading | NetworkState::Failed { .. } | NetworkState::Success { .. } => {
            Ok(describe(state))
        }
        NetworkState::FromCache { .. } => Err(unexpected_variant(state)),
    }
}
