//! Configuration validation
//!
//! Checks a raw configuration document against the closed Bugjira schema:
//! - Both `bugzilla` and `jira` sections are present and are objects
//! - Required settings are non-empty strings
//! - Optional settings, when present, are strings
//! - No undeclared keys at any level
//!
//! Every violation is collected, so a caller sees all offending paths at once.

use serde_json::{Map, Value};
use std::fmt;

const TOP_LEVEL_OPTIONAL: &[&str] = &["field_data_path", "json_generator_module"];
const SECTION_OPTIONAL: &[&str] = &["field_data_plugin_name"];

/// Required settings per backend section
const SECTIONS: &[(&str, &[&str])] = &[
    ("bugzilla", &["URL", "api_key"]),
    ("jira", &["URL", "token_auth"]),
];

/// Validation error details
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending setting, e.g. `jira.token_auth`
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validation result
pub type ValidationResult = std::result::Result<(), Vec<ValidationError>>;

/// Validate a raw configuration document
pub fn validate_config(config: &Value) -> ValidationResult {
    let mut errors = Vec::new();

    let Some(root) = config.as_object() else {
        return Err(vec![ValidationError::new(
            "config",
            "configuration must be an object",
        )]);
    };

    for (section, required) in SECTIONS {
        match root.get(*section) {
            None => errors.push(ValidationError::new(*section, "field required")),
            Some(Value::Object(settings)) => {
                validate_section(section, settings, required, &mut errors)
            }
            Some(_) => errors.push(ValidationError::new(*section, "must be an object")),
        }
    }

    for (key, value) in root {
        if SECTIONS.iter().any(|(section, _)| *section == key.as_str()) {
            continue;
        }
        if TOP_LEVEL_OPTIONAL.contains(&key.as_str()) {
            if !value.is_string() {
                errors.push(ValidationError::new(key.as_str(), "must be a string"));
            }
        } else {
            errors.push(ValidationError::new(
                key.as_str(),
                "extra inputs are not permitted",
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_section(
    section: &str,
    settings: &Map<String, Value>,
    required: &[&str],
    errors: &mut Vec<ValidationError>,
) {
    for name in required {
        let path = format!("{}.{}", section, name);
        match settings.get(*name) {
            None => errors.push(ValidationError::new(path, "field required")),
            Some(Value::String(s)) if s.is_empty() => {
                errors.push(ValidationError::new(path, "must be a non-empty string"))
            }
            Some(Value::String(_)) => {}
            Some(_) => errors.push(ValidationError::new(path, "must be a string")),
        }
    }

    for (key, value) in settings {
        if required.contains(&key.as_str()) {
            continue;
        }
        let path = format!("{}.{}", section, key);
        if SECTION_OPTIONAL.contains(&key.as_str()) {
            if !value.is_string() {
                errors.push(ValidationError::new(path, "must be a string"));
            }
        } else {
            errors.push(ValidationError::new(path, "extra inputs are not permitted"));
        }
    }
}
