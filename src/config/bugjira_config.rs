//! Bugjira configuration file handling
//!
//! Loads the Bugzilla and JIRA connection settings from a JSON (or YAML) file
//! or from an already-parsed value, validating both against the closed schema
//! before anything is built from them.

use super::validation::validate_config;
use crate::{BugjiraError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Bugzilla connection settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BugzillaConfig {
    /// Bugzilla instance URL
    #[serde(rename = "URL")]
    pub url: String,

    /// Bugzilla API key
    pub api_key: String,

    /// Name of the field data plugin for Bugzilla fields
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_data_plugin_name: Option<String>,
}

/// JIRA connection settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JiraConfig {
    /// JIRA instance URL
    #[serde(rename = "URL")]
    pub url: String,

    /// Personal access token
    pub token_auth: String,

    /// Name of the field data plugin for JIRA fields
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_data_plugin_name: Option<String>,
}

/// Bugjira configuration
///
/// A `Config` only exists in a fully validated state: every constructor runs
/// the schema check first and fails outright on any violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub bugzilla: BugzillaConfig,

    pub jira: JiraConfig,

    /// JSON file read by the bundled field data generators
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_data_path: Option<PathBuf>,

    /// Name of the plugin module registered with the field factory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json_generator_module: Option<String>,
}

impl Config {
    /// Validate a raw configuration value and build a `Config` from it
    pub fn from_value(value: Value) -> Result<Self> {
        validate_config(&value).map_err(BugjiraError::ConfigValidation)?;
        Ok(serde_json::from_value(value)?)
    }

    /// Load configuration from a specific path
    ///
    /// Files ending in `.yaml` or `.yml` are parsed as YAML, everything else as
    /// JSON. A missing file surfaces as an I/O error.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        tracing::info!(path = %path.display(), "Loading Bugjira configuration");

        let content = fs::read_to_string(path)?;
        let value: Value = match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => serde_yaml::from_str(&content)?,
            _ => serde_json::from_str(&content)?,
        };

        let config = Self::from_value(value)?;

        tracing::debug!(
            bugzilla = %config.bugzilla.url,
            jira = %config.jira.url,
            "Configuration loaded successfully"
        );

        Ok(config)
    }

    /// Load configuration from the default path (~/.config/bugjira/config.json)
    pub fn load_default() -> Result<Self> {
        Self::load(Self::default_path())
    }

    /// Build a configuration from a value or a file, preferring the value
    pub fn from_config(path: Option<&Path>, value: Option<Value>) -> Result<Self> {
        match (value, path) {
            (Some(value), _) => Self::from_value(value),
            (None, Some(path)) => Self::load(path),
            (None, None) => Err(BugjiraError::Config(
                "a config path or config value is required".to_string(),
            )),
        }
    }

    /// Get the default config path (~/.config/bugjira/config.json)
    pub fn default_path() -> PathBuf {
        let mut path = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push(".config");
        path.push("bugjira");
        path.push("config.json");
        path
    }

    /// The serialized form of this configuration
    pub fn to_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;
    use tempfile::{Builder, NamedTempFile};

    fn good_value() -> Value {
        json!({
            "bugzilla": {"URL": "https://bugzilla.example.com", "api_key": "bz-key"},
            "jira": {"URL": "https://jira.example.com", "token_auth": "jira-token"}
        })
    }

    #[test]
    fn test_from_value() {
        let config = Config::from_value(good_value()).unwrap();
        assert_eq!(config.bugzilla.url, "https://bugzilla.example.com");
        assert_eq!(config.bugzilla.api_key, "bz-key");
        assert_eq!(config.jira.token_auth, "jira-token");
        assert!(config.field_data_path.is_none());
        assert_eq!(config.to_value().unwrap(), good_value());
    }

    #[test]
    fn test_from_value_rejects_invalid() {
        let mut value = good_value();
        value["jira"]["foo"] = json!("bar");

        match Config::from_value(value) {
            Err(BugjiraError::ConfigValidation(errors)) => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].field, "jira.foo");
            }
            other => panic!("expected a validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_json() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", good_value()).unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config, Config::from_value(good_value()).unwrap());
    }

    #[test]
    fn test_load_yaml() {
        let mut file = Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(
            file,
            "bugzilla:\n  URL: https://bugzilla.example.com\n  api_key: bz-key\n\
             jira:\n  URL: https://jira.example.com\n  token_auth: jira-token\n\
             field_data_path: /tmp/fields.json"
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.jira.url, "https://jira.example.com");
        assert_eq!(
            config.field_data_path,
            Some(PathBuf::from("/tmp/fields.json"))
        );
    }

    #[test]
    fn test_load_missing_file() {
        let result = Config::load("/nonexistent/bugjira/config.json");
        assert!(matches!(result, Err(BugjiraError::Io(_))));
    }

    #[test]
    fn test_value_wins_over_path() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", good_value()).unwrap();

        let mut edited = good_value();
        edited["bugzilla"]["URL"] = json!("foo");

        let config = Config::from_config(Some(file.path()), Some(edited)).unwrap();
        assert_eq!(config.bugzilla.url, "foo");
    }

    #[test]
    fn test_from_config_requires_a_source() {
        assert!(matches!(
            Config::from_config(None, None),
            Err(BugjiraError::Config(_))
        ));
    }

    #[test]
    fn test_default_path() {
        let path = Config::default_path();
        assert!(path.ends_with("bugjira/config.json"));
    }

    #[test]
    fn test_load_default_reads_home_config() {
        let home = tempfile::tempdir().unwrap();
        let dir = home.path().join(".config/bugjira");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("config.json"), good_value().to_string()).unwrap();

        std::env::set_var("HOME", home.path());
        let config = Config::load_default().unwrap();
        assert_eq!(config.jira.url, "https://jira.example.com");
    }
}
