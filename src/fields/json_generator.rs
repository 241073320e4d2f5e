//! Field data read from a JSON file
//!
//! The file named by `field_data_path` has the shape
//!
//! ```json
//! {
//!   "bugzilla_field_data": [{"name": "product"}],
//!   "jira_field_data": [{"name": "Summary", "jira_field_id": "summary"}]
//! }
//! ```
//!
//! The whole file is validated when it is loaded. Without a configured path
//! every generator here returns no records.

use super::data_generator::FieldDataGenerator;
use super::factory::{FieldJsonGenerator, JsonGeneratorPlugin};
use super::field::{BugzillaField, JiraField};
use crate::config::Config;
use crate::keys::BackendKind;
use crate::{BugjiraError, Result};
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Module name the plugin loader uses for [`JsonGenerator`]
pub const MODULE_NAME: &str = "bugjira.json_generator";

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
#[allow(dead_code)]
struct ValidFieldData {
    bugzilla_field_data: Vec<BugzillaField>,
    jira_field_data: Vec<JiraField>,
}

/// Raw field records for both backends
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldData {
    bugzilla_field_data: Vec<Value>,
    jira_field_data: Vec<Value>,
}

impl FieldData {
    /// Read and validate a field data file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Loading field data");

        let contents = fs::read_to_string(path)?;
        let value: Value = serde_json::from_str(&contents)?;
        Self::from_value(value)
    }

    /// Validate already parsed field data
    pub fn from_value(value: Value) -> Result<Self> {
        if let Err(e) = ValidFieldData::deserialize(&value) {
            warn!(error = %e, "Rejected field data");
            return Err(BugjiraError::FieldDataGenerator(
                "Invalid field data detected".to_string(),
            ));
        }

        let mut field_data = Self::default();
        if let Value::Object(mut map) = value {
            if let Some(Value::Array(records)) = map.remove("bugzilla_field_data") {
                field_data.bugzilla_field_data = records;
            }
            if let Some(Value::Array(records)) = map.remove("jira_field_data") {
                field_data.jira_field_data = records;
            }
        }
        Ok(field_data)
    }

    /// Field data from the file named in the config, or nothing
    pub fn from_config(config: &Config) -> Result<Self> {
        match config.field_data_path.as_deref() {
            Some(path) if !path.as_os_str().is_empty() => Self::load(path),
            _ => Ok(Self::default()),
        }
    }

    pub fn records(&self, kind: BackendKind) -> &[Value] {
        match kind {
            BackendKind::Bugzilla => &self.bugzilla_field_data,
            BackendKind::Jira => &self.jira_field_data,
        }
    }
}

/// `bugzilla_default` plugin
#[derive(Debug, Clone)]
pub struct BugzillaFieldDataGenerator {
    field_data: FieldData,
}

impl BugzillaFieldDataGenerator {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self::with_field_data(FieldData::from_config(config)?))
    }

    pub fn with_field_data(field_data: FieldData) -> Self {
        Self { field_data }
    }
}

impl FieldDataGenerator for BugzillaFieldDataGenerator {
    fn get_field_data(&self) -> Vec<Value> {
        self.field_data.records(BackendKind::Bugzilla).to_vec()
    }
}

/// `jira_default` plugin
#[derive(Debug, Clone)]
pub struct JiraFieldDataGenerator {
    field_data: FieldData,
}

impl JiraFieldDataGenerator {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self::with_field_data(FieldData::from_config(config)?))
    }

    pub fn with_field_data(field_data: FieldData) -> Self {
        Self { field_data }
    }
}

impl FieldDataGenerator for JiraFieldDataGenerator {
    fn get_field_data(&self) -> Vec<Value> {
        self.field_data.records(BackendKind::Jira).to_vec()
    }
}

/// Serves both backends' records from one file
#[derive(Debug, Clone)]
pub struct JsonGenerator {
    field_data: FieldData,
}

impl FieldJsonGenerator for JsonGenerator {
    fn get_bugzilla_fields_json(&self) -> Vec<Value> {
        self.field_data.records(BackendKind::Bugzilla).to_vec()
    }

    fn get_jira_fields_json(&self) -> Vec<Value> {
        self.field_data.records(BackendKind::Jira).to_vec()
    }
}

impl JsonGeneratorPlugin for JsonGenerator {
    fn from_config(config: &Config) -> Result<Self> {
        Ok(Self {
            field_data: FieldData::from_config(config)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::FieldFactory;
    use serde_json::json;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn sample() -> Value {
        json!({
            "bugzilla_field_data": [
                {"name": "product"},
                {"name": "component"},
                {"name": "status"}
            ],
            "jira_field_data": [
                {"name": "Summary", "jira_field_id": "summary"},
                {"name": "Story Points", "jira_field_id": "customfield_10002"}
            ]
        })
    }

    fn write_temp(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    fn config_for(path: Option<&Path>) -> Config {
        let mut value = json!({
            "bugzilla": {"URL": "https://bugzilla.example.com", "api_key": "key"},
            "jira": {"URL": "https://jira.example.com", "token_auth": "token"}
        });
        if let Some(path) = path {
            value["field_data_path"] = json!(path);
        }
        Config::from_value(value).unwrap()
    }

    #[test]
    fn test_load_sample() {
        let file = write_temp(&sample().to_string());
        let field_data = FieldData::load(file.path()).unwrap();

        assert_eq!(field_data.records(BackendKind::Bugzilla).len(), 3);
        assert_eq!(field_data.records(BackendKind::Jira).len(), 2);
        assert_eq!(field_data.records(BackendKind::Bugzilla)[0], json!({"name": "product"}));
    }

    #[test]
    fn test_invalid_field_data() {
        let cases = [
            json!({"bugzilla_field_data": []}),
            json!({"bugzilla_field_data": [], "jira_field_data": [], "extra": 1}),
            json!({"bugzilla_field_data": [{"name": ""}], "jira_field_data": []}),
            json!({"bugzilla_field_data": [], "jira_field_data": [{"name": "Summary"}]}),
            json!([]),
        ];
        for case in cases {
            let err = FieldData::from_value(case).unwrap_err();
            assert!(
                matches!(err, BugjiraError::FieldDataGenerator(ref msg) if msg == "Invalid field data detected")
            );
        }
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = FieldData::load(dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, BugjiraError::Io(_)));
    }

    #[test]
    fn test_malformed_json_is_json_error() {
        let file = write_temp("{ not json");
        assert!(matches!(
            FieldData::load(file.path()).unwrap_err(),
            BugjiraError::Json(_)
        ));
    }

    #[test]
    fn test_no_path_means_no_records() {
        let config = config_for(None);
        assert!(BugzillaFieldDataGenerator::new(&config)
            .unwrap()
            .get_field_data()
            .is_empty());
        assert!(JiraFieldDataGenerator::new(&config)
            .unwrap()
            .get_field_data()
            .is_empty());
    }

    #[test]
    fn test_per_type_generators_read_config_path() {
        let file = write_temp(&sample().to_string());
        let config = config_for(Some(file.path()));

        let bugzilla = BugzillaFieldDataGenerator::new(&config).unwrap();
        let jira = JiraFieldDataGenerator::new(&config).unwrap();
        assert_eq!(bugzilla.get_field_data().len(), 3);
        assert_eq!(jira.get_field_data().len(), 2);
        assert_eq!(
            jira.get_field_data()[1]["jira_field_id"],
            json!("customfield_10002")
        );
    }

    #[test]
    fn test_json_generator_registers_itself() {
        let file = write_temp(&sample().to_string());
        let config = config_for(Some(file.path()));
        let mut factory = FieldFactory::new();

        JsonGenerator::register(&config, &mut factory).unwrap();

        assert_eq!(factory.get_bugzilla_fields().unwrap().len(), 3);
        let jira = factory.get_jira_fields().unwrap();
        assert_eq!(jira.len(), 2);
        assert_eq!(jira[0].jira_field_id.as_str(), "summary");
    }

    #[test]
    fn test_json_generator_rejects_bad_file() {
        let file = write_temp(r#"{"bugzilla_field_data": [{"name": "   "}], "jira_field_data": []}"#);
        let config = config_for(Some(file.path()));

        assert!(matches!(
            JsonGenerator::from_config(&config),
            Err(BugjiraError::FieldDataGenerator(_))
        ));
    }
}
