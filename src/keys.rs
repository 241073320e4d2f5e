//! Issue key classification
//!
//! Bugzilla bugs are addressed by numeric ids (`123456`), JIRA issues by
//! project-prefixed keys (`FOO-123`). The JIRA check only anchors at the start
//! of the key, so `FOO-123-abc` is still a JIRA key.

use crate::{BugjiraError, Result};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

lazy_static! {
    static ref BUGZILLA_KEY: Regex = Regex::new(r"^[0-9]+$").expect("valid bugzilla key regex");
    static ref JIRA_KEY: Regex =
        Regex::new(r"^[a-zA-Z]+[-_][0-9]+").expect("valid jira key regex");
}

/// The backend an issue key belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    Bugzilla,
    Jira,
}

impl BackendKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bugzilla => "bugzilla",
            Self::Jira => "jira",
        }
    }
}

impl FromStr for BackendKind {
    type Err = BugjiraError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "bugzilla" => Ok(Self::Bugzilla),
            "jira" => Ok(Self::Jira),
            other => Err(BugjiraError::UnknownBackend(other.to_string())),
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returns true if the key is a Bugzilla bug id (digits only)
pub fn is_bugzilla_key(key: &str) -> bool {
    BUGZILLA_KEY.is_match(key)
}

/// Returns true if the key starts with a JIRA issue key (`ABC-123`, `ABC_123`)
pub fn is_jira_key(key: &str) -> bool {
    JIRA_KEY.is_match(key)
}

/// Decide which backend owns a key. Bugzilla is checked first.
pub fn classify(key: &str) -> Result<BackendKind> {
    if is_bugzilla_key(key) {
        return Ok(BackendKind::Bugzilla);
    }
    if is_jira_key(key) {
        return Ok(BackendKind::Jira);
    }
    Err(BugjiraError::Classification(key.to_string()))
}
