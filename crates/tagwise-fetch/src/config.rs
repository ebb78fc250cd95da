//! Configuration loading for the product client
//!
//! # Hierarchy
//!
//! Configuration is loaded in this order (later overrides earlier):
//! 1. Built-in defaults
//! 2. Global config: ~/.config/tagwise/config.toml
//! 3. Project config: .tagwise/config.toml
//! 4. Environment variables: TAGWISE_*
//!
//! # Example Config
//!
//! ```toml
//! base_url = "https://equalexperts.github.io"
//! path_template = "/backend-take-home-test-data/{product}.json"
//! user_agent = "tagwise/0.1.0"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::product::{BASE_URL, PATH_TEMPLATE, PRODUCT_PLACEHOLDER};
use crate::{FetchError, Result};

pub const ENV_BASE_URL: &str = "TAGWISE_BASE_URL";
pub const ENV_PATH_TEMPLATE: &str = "TAGWISE_PATH_TEMPLATE";
pub const ENV_USER_AGENT: &str = "TAGWISE_USER_AGENT";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FetchConfig {
    pub base_url: String,
    pub path_template: String,
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            base_url: BASE_URL.to_string(),
            path_template: PATH_TEMPLATE.to_string(),
            user_agent: concat!("tagwise/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// A config file; every key is optional
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct PartialFetchConfig {
    pub base_url: Option<String>,
    pub path_template: Option<String>,
    pub user_agent: Option<String>,
}

impl FetchConfig {
    /// Overlay the keys set in `partial`
    #[must_use]
    pub fn merge(self, partial: PartialFetchConfig) -> Self {
        Self {
            base_url: partial.base_url.unwrap_or(self.base_url),
            path_template: partial.path_template.unwrap_or(self.path_template),
            user_agent: partial.user_agent.unwrap_or(self.user_agent),
        }
    }

    /// Overlay `TAGWISE_*` environment variables
    #[must_use]
    pub fn apply_env_vars(self) -> Self {
        self.merge(PartialFetchConfig {
            base_url: std::env::var(ENV_BASE_URL).ok(),
            path_template: std::env::var(ENV_PATH_TEMPLATE).ok(),
            user_agent: std::env::var(ENV_USER_AGENT).ok(),
        })
    }

    /// # Errors
    ///
    /// Returns `FetchError::Config` if:
    /// - `base_url` is not an http(s) URL
    /// - `path_template` has no `{product}` placeholder
    /// - `user_agent` is empty
    pub fn validate(&self) -> Result<()> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(FetchError::Config(format!(
                "base_url must start with http:// or https://, got '{}'",
                self.base_url
            )));
        }
        if !self.path_template.contains(PRODUCT_PLACEHOLDER) {
            return Err(FetchError::Config(format!(
                "path_template must contain {PRODUCT_PLACEHOLDER}, got '{}'",
                self.path_template
            )));
        }
        if self.user_agent.trim().is_empty() {
            return Err(FetchError::Config("user_agent must not be empty".to_string()));
        }
        Ok(())
    }
}

/// Load configuration from all sources with hierarchy
///
/// # Errors
///
/// Returns error if:
/// - A config file is malformed TOML or has unknown keys
/// - The merged config fails validation
pub fn load_config() -> Result<FetchConfig> {
    let project = project_config_path()?;
    load_config_from(global_config_path().as_deref(), Some(project.as_path()))
}

/// [`load_config`] with explicit file locations. Missing files are skipped.
///
/// # Errors
///
/// Same as [`load_config`].
pub fn load_config_from(global: Option<&Path>, project: Option<&Path>) -> Result<FetchConfig> {
    let config = [global, project]
        .into_iter()
        .flatten()
        .filter(|path| path.exists())
        .try_fold(FetchConfig::default(), |config, path| {
            tracing::debug!(path = %path.display(), "loading config file");
            load_toml_file(path).map(|partial| config.merge(partial))
        })?
        .apply_env_vars();

    config.validate()?;
    Ok(config)
}

/// Get path to global config file
pub fn global_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "tagwise")
        .map(|proj_dirs| proj_dirs.config_dir().join("config.toml"))
}

/// Get path to project config file
///
/// # Errors
///
/// Returns error if current directory cannot be determined
pub fn project_config_path() -> Result<PathBuf> {
    std::env::current_dir()
        .map(|dir| dir.join(".tagwise/config.toml"))
        .map_err(|e| FetchError::Config(format!("Failed to get current directory: {e}")))
}

/// Load a TOML file into a partial config
///
/// # Errors
///
/// Returns error if:
/// - Path is a directory instead of a file
/// - File cannot be read
/// - TOML is malformed
pub fn load_toml_file(path: &Path) -> Result<PartialFetchConfig> {
    if path.is_dir() {
        return Err(FetchError::Config(format!(
            "Config path is a directory, not a file: {}",
            path.display()
        )));
    }

    let content = std::fs::read_to_string(path).map_err(|e| {
        FetchError::Config(format!(
            "Failed to read config file {}: {e}",
            path.display()
        ))
    })?;

    toml::from_str(&content).map_err(|e| {
        FetchError::Config(format!(
            "Failed to parse config file {}: {e}",
            path.display()
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(FetchConfig::default().validate().is_ok());
    }

    #[test]
    fn test_merge_overrides_only_set_keys() {
        let merged = FetchConfig::default().merge(PartialFetchConfig {
            base_url: Some("http://localhost:8080".to_string()),
            ..PartialFetchConfig::default()
        });
        assert_eq!(merged.base_url, "http://localhost:8080");
        assert_eq!(merged.path_template, PATH_TEMPLATE);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let no_scheme = FetchConfig {
            base_url: "equalexperts.github.io".to_string(),
            ..FetchConfig::default()
        };
        assert!(no_scheme.validate().is_err());

        let no_placeholder = FetchConfig {
            path_template: "/products.json".to_string(),
            ..FetchConfig::default()
        };
        assert!(no_placeholder.validate().is_err());

        let no_agent = FetchConfig {
            user_agent: "  ".to_string(),
            ..FetchConfig::default()
        };
        assert!(no_agent.validate().is_err());
    }
}
