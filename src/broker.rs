//! Backend brokers
//!
//! A broker wraps one backend client and exposes the two operations Bugjira
//! supports: fetching an issue by key and adding a comment to it. Whatever
//! goes wrong inside the client is reported once, as [`BugjiraError::Lookup`]
//! or [`BugjiraError::Comment`] with the client's error as the source. Nothing
//! is retried.

use crate::config::Config;
use crate::integrations::{
    BugzillaBackend, BugzillaClient, BugzillaUpdate, JiraBackend, JiraClient,
};
use crate::issue::{BugzillaIssue, Issue, JiraIssue};
use crate::keys::BackendKind;
use crate::{BugjiraError, Result};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, warn};

/// Uniform operations over one backend
#[async_trait]
pub trait Broker: Send + Sync {
    /// Which backend this broker talks to
    fn kind(&self) -> BackendKind;

    /// Fetch an issue and wrap it in the matching [`Issue`] variant
    async fn get_issue(&self, key: &str) -> Result<Issue>;

    /// Add a comment to an existing issue
    ///
    /// The issue value itself is left untouched; fetch it again to see the
    /// new comment.
    async fn add_comment(&self, issue: &Issue, comment: &str) -> Result<()>;
}

fn require_config(config: Option<&Config>, kind: BackendKind) -> Result<&Config> {
    config.ok_or_else(|| {
        BugjiraError::AdapterInit(format!("{} API backend or config required", kind))
    })
}

fn foreign_issue(backend: BackendKind, key: &str) -> BugjiraError {
    BugjiraError::InvalidKey {
        backend,
        key: key.to_string(),
    }
}

/// Broker for a Bugzilla backend
pub struct BugzillaBroker {
    backend: Arc<dyn BugzillaBackend>,
}

impl BugzillaBroker {
    /// Create a broker from a pre-built backend, or from the `bugzilla`
    /// section of the configuration when no backend is given
    pub fn new(config: Option<&Config>, backend: Option<Arc<dyn BugzillaBackend>>) -> Result<Self> {
        let backend: Arc<dyn BugzillaBackend> = match backend {
            Some(backend) => backend,
            None => {
                let config = require_config(config, BackendKind::Bugzilla)?;
                debug!(url = %config.bugzilla.url, "Building Bugzilla client from config");
                Arc::new(BugzillaClient::new(
                    &config.bugzilla.url,
                    config.bugzilla.api_key.clone(),
                )?)
            }
        };

        Ok(Self { backend })
    }

    /// The backend client in use
    pub fn backend(&self) -> Arc<dyn BugzillaBackend> {
        Arc::clone(&self.backend)
    }
}

#[async_trait]
impl Broker for BugzillaBroker {
    fn kind(&self) -> BackendKind {
        BackendKind::Bugzilla
    }

    async fn get_issue(&self, key: &str) -> Result<Issue> {
        let issue = BugzillaIssue::new(key)?;
        debug!(key = %key, "Looking up Bugzilla bug");

        let bug = self.backend.getbug(key).await.map_err(|source| {
            warn!(key = %key, error = %source, "Bugzilla lookup failed");
            BugjiraError::Lookup {
                key: key.to_string(),
                source,
            }
        })?;

        Ok(issue.with_bug(bug).into())
    }

    async fn add_comment(&self, issue: &Issue, comment: &str) -> Result<()> {
        let key = match issue {
            Issue::Bugzilla(issue) => issue.key(),
            Issue::Jira(issue) => return Err(foreign_issue(BackendKind::Bugzilla, issue.key())),
        };
        debug!(key = %key, "Adding Bugzilla comment");

        let update = BugzillaUpdate::comment(comment);
        self.backend
            .update_bugs(&[key.to_string()], &update)
            .await
            .map_err(|source| {
                warn!(key = %key, error = %source, "Bugzilla comment failed");
                BugjiraError::Comment {
                    key: key.to_string(),
                    source,
                }
            })
    }
}

/// Broker for a JIRA backend
pub struct JiraBroker {
    backend: Arc<dyn JiraBackend>,
}

impl JiraBroker {
    /// Create a broker from a pre-built backend, or from the `jira` section of
    /// the configuration when no backend is given
    pub fn new(config: Option<&Config>, backend: Option<Arc<dyn JiraBackend>>) -> Result<Self> {
        let backend: Arc<dyn JiraBackend> = match backend {
            Some(backend) => backend,
            None => {
                let config = require_config(config, BackendKind::Jira)?;
                debug!(url = %config.jira.url, "Building JIRA client from config");
                Arc::new(JiraClient::new(
                    &config.jira.url,
                    config.jira.token_auth.clone(),
                )?)
            }
        };

        Ok(Self { backend })
    }

    /// The backend client in use
    pub fn backend(&self) -> Arc<dyn JiraBackend> {
        Arc::clone(&self.backend)
    }
}

#[async_trait]
impl Broker for JiraBroker {
    fn kind(&self) -> BackendKind {
        BackendKind::Jira
    }

    async fn get_issue(&self, key: &str) -> Result<Issue> {
        let issue = JiraIssue::new(key)?;
        debug!(key = %key, "Looking up JIRA issue");

        let remote = self.backend.issue(key).await.map_err(|source| {
            warn!(key = %key, error = %source, "JIRA lookup failed");
            BugjiraError::Lookup {
                key: key.to_string(),
                source,
            }
        })?;

        Ok(issue.with_remote(remote).into())
    }

    async fn add_comment(&self, issue: &Issue, comment: &str) -> Result<()> {
        let key = match issue {
            Issue::Jira(issue) => issue.key(),
            Issue::Bugzilla(issue) => return Err(foreign_issue(BackendKind::Jira, issue.key())),
        };
        debug!(key = %key, "Adding JIRA comment");

        self.backend
            .add_comment(key, comment)
            .await
            .map_err(|source| {
                warn!(key = %key, error = %source, "JIRA comment failed");
                BugjiraError::Comment {
                    key: key.to_string(),
                    source,
                }
            })
    }
}
