//! Config hierarchy tests: defaults < global file < project file < environment.
//!
//! Tests touching `TAGWISE_*` variables run serially.

#![forbid(unsafe_code)]

use std::fs;
use std::path::Path;

use serial_test::serial;
use tagwise_fetch::config::{
    load_config_from, load_toml_file, ENV_BASE_URL, ENV_PATH_TEMPLATE, ENV_USER_AGENT,
};
use tagwise_fetch::{product_url, FetchConfig, FetchError, BASE_URL, PATH_TEMPLATE};
use tempfile::TempDir;

type TestResult = Result<(), Box<dyn std::error::Error>>;

fn clear_env() {
    for key in [ENV_BASE_URL, ENV_PATH_TEMPLATE, ENV_USER_AGENT] {
        std::env::remove_var(key);
    }
}

fn write(dir: &TempDir, name: &str, content: &str) -> std::io::Result<std::path::PathBuf> {
    let path = dir.path().join(name);
    fs::write(&path, content)?;
    Ok(path)
}

#[test]
#[serial]
fn missing_files_yield_defaults() -> TestResult {
    clear_env();
    let dir = TempDir::new()?;
    let config = load_config_from(
        Some(dir.path().join("global.toml").as_path()),
        Some(dir.path().join("project.toml").as_path()),
    )?;
    assert_eq!(config, FetchConfig::default());
    assert_eq!(config.base_url, BASE_URL);
    assert_eq!(config.path_template, PATH_TEMPLATE);
    Ok(())
}

#[test]
#[serial]
fn project_file_overrides_global_file() -> TestResult {
    clear_env();
    let dir = TempDir::new()?;
    let global = write(
        &dir,
        "global.toml",
        "base_url = \"http://global.example\"\nuser_agent = \"global-agent\"\n",
    )?;
    let project = write(&dir, "project.toml", "base_url = \"http://project.example\"\n")?;

    let config = load_config_from(Some(global.as_path()), Some(project.as_path()))?;
    assert_eq!(config.base_url, "http://project.example");
    assert_eq!(config.user_agent, "global-agent");
    assert_eq!(config.path_template, PATH_TEMPLATE);
    Ok(())
}

#[test]
#[serial]
fn environment_overrides_files() -> TestResult {
    clear_env();
    let dir = TempDir::new()?;
    let project = write(&dir, "project.toml", "base_url = \"http://project.example\"\n")?;

    std::env::set_var(ENV_BASE_URL, "http://env.example");
    std::env::set_var(ENV_PATH_TEMPLATE, "/items/{product}");
    let result = load_config_from(None, Some(project.as_path()));
    clear_env();

    let config = result?;
    assert_eq!(product_url(&config, "mug"), "http://env.example/items/mug");
    Ok(())
}

#[test]
#[serial]
fn invalid_merged_config_is_rejected() -> TestResult {
    clear_env();
    let dir = TempDir::new()?;
    let project = write(&dir, "project.toml", "path_template = \"/no-placeholder.json\"\n")?;

    let result = load_config_from(None, Some(project.as_path()));
    assert!(matches!(result, Err(FetchError::Config(ref msg)) if msg.contains("{product}")));
    Ok(())
}

#[test]
fn unknown_keys_are_rejected() -> TestResult {
    let dir = TempDir::new()?;
    let path = write(&dir, "config.toml", "base_uri = \"http://typo.example\"\n")?;
    assert!(matches!(load_toml_file(&path), Err(FetchError::Config(_))));
    Ok(())
}

#[test]
fn malformed_toml_is_rejected() -> TestResult {
    let dir = TempDir::new()?;
    let path = write(&dir, "config.toml", "base_url = \n")?;
    assert!(matches!(load_toml_file(&path), Err(FetchError::Config(_))));
    Ok(())
}

#[test]
fn directory_path_is_rejected() -> TestResult {
    let dir = TempDir::new()?;
    let result = load_toml_file(Path::new(dir.path()));
    assert!(matches!(result, Err(FetchError::Config(ref msg)) if msg.contains("directory")));
    Ok(())
}
