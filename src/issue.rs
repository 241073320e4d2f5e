//! Unified issue representation
//!
//! An [`Issue`] is either a Bugzilla bug or a JIRA issue. Each variant checks
//! its key against its own backend's format when it is constructed, and
//! carries the backend's native record once it has been fetched.

use crate::integrations::{Bug, JiraRemoteIssue};
use crate::keys::{is_bugzilla_key, is_jira_key, BackendKind};
use crate::{BugjiraError, Result};
use serde::Serialize;

/// A Bugzilla bug, addressed by numeric id
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BugzillaIssue {
    key: String,
    bugzilla: Option<Bug>,
}

impl BugzillaIssue {
    /// A bare issue that has not been fetched yet
    pub fn new(key: impl Into<String>) -> Result<Self> {
        let key = key.into();
        if !is_bugzilla_key(&key) {
            return Err(BugjiraError::InvalidKey {
                backend: BackendKind::Bugzilla,
                key,
            });
        }
        Ok(Self {
            key,
            bugzilla: None,
        })
    }

    /// The same issue carrying its fetched bug
    pub fn with_bug(mut self, bug: Bug) -> Self {
        self.bugzilla = Some(bug);
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn bug(&self) -> Option<&Bug> {
        self.bugzilla.as_ref()
    }
}

/// A JIRA issue, addressed by project key
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JiraIssue {
    key: String,
    jira_issue: Option<JiraRemoteIssue>,
}

impl JiraIssue {
    /// A bare issue that has not been fetched yet
    pub fn new(key: impl Into<String>) -> Result<Self> {
        let key = key.into();
        if !is_jira_key(&key) {
            return Err(BugjiraError::InvalidKey {
                backend: BackendKind::Jira,
                key,
            });
        }
        Ok(Self {
            key,
            jira_issue: None,
        })
    }

    /// The same issue carrying its fetched JIRA record
    pub fn with_remote(mut self, remote: JiraRemoteIssue) -> Self {
        self.jira_issue = Some(remote);
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn remote(&self) -> Option<&JiraRemoteIssue> {
        self.jira_issue.as_ref()
    }
}

/// An issue from either backend
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "backend", rename_all = "snake_case")]
pub enum Issue {
    Bugzilla(BugzillaIssue),
    Jira(JiraIssue),
}

impl Issue {
    pub fn key(&self) -> &str {
        match self {
            Self::Bugzilla(issue) => issue.key(),
            Self::Jira(issue) => issue.key(),
        }
    }

    pub fn backend(&self) -> BackendKind {
        match self {
            Self::Bugzilla(_) => BackendKind::Bugzilla,
            Self::Jira(_) => BackendKind::Jira,
        }
    }

    /// Whether the native record has been fetched
    pub fn is_fetched(&self) -> bool {
        match self {
            Self::Bugzilla(issue) => issue.bug().is_some(),
            Self::Jira(issue) => issue.remote().is_some(),
        }
    }
}

impl From<BugzillaIssue> for Issue {
    fn from(issue: BugzillaIssue) -> Self {
        Self::Bugzilla(issue)
    }
}

impl From<JiraIssue> for Issue {
    fn from(issue: JiraIssue) -> Self {
        Self::Jira(issue)
    }
}
