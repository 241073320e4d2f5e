//! Field descriptors
//!
//! A field descriptor names one field a backend exposes. Names are trimmed and
//! must not be empty; records with unknown keys are rejected.

use crate::keys::BackendKind;
use crate::{BugjiraError, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// A string that has been trimmed and is known to be non-empty
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FieldText(String);

impl FieldText {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for FieldText {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err("ensure this value has at least 1 non-whitespace character".to_string());
        }
        Ok(Self(trimmed.to_string()))
    }
}

impl From<FieldText> for String {
    fn from(text: FieldText) -> Self {
        text.0
    }
}

impl fmt::Display for FieldText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn parse_record<T: DeserializeOwned>(record: &Value) -> Result<T> {
    T::deserialize(record).map_err(|e| BugjiraError::FieldDataValidation(e.to_string()))
}

/// A Bugzilla field, e.g. `{"name": "product"}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BugzillaField {
    pub name: FieldText,
}

impl BugzillaField {
    pub fn from_record(record: &Value) -> Result<Self> {
        parse_record(record)
    }
}

/// A JIRA field, e.g. `{"name": "Story Points", "jira_field_id": "customfield_10002"}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JiraField {
    pub name: FieldText,
    pub jira_field_id: FieldText,
}

impl JiraField {
    pub fn from_record(record: &Value) -> Result<Self> {
        parse_record(record)
    }
}

/// A field descriptor from either backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum BugjiraField {
    Bugzilla(BugzillaField),
    Jira(JiraField),
}

impl BugjiraField {
    /// Build the variant matching `kind` from one raw record
    pub fn from_record(kind: BackendKind, record: &Value) -> Result<Self> {
        match kind {
            BackendKind::Bugzilla => BugzillaField::from_record(record).map(Self::Bugzilla),
            BackendKind::Jira => JiraField::from_record(record).map(Self::Jira),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Bugzilla(field) => field.name.as_str(),
            Self::Jira(field) => field.name.as_str(),
        }
    }

    pub fn backend(&self) -> BackendKind {
        match self {
            Self::Bugzilla(_) => BackendKind::Bugzilla,
            Self::Jira(_) => BackendKind::Jira,
        }
    }
}
