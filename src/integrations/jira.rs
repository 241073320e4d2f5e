//! JIRA client
//!
//! Fetches issues and adds comments through the JIRA REST API (v2), using
//! personal access token authentication.

use super::{decode, error_for_response, BackendError};
use crate::Result;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

const ISSUE_FIELDS: &str =
    "summary,description,issuetype,status,priority,labels,assignee,reporter,updated,created";

/// What a broker needs from a JIRA backend
#[async_trait]
pub trait JiraBackend: Send + Sync {
    /// Fetch a single issue by key
    async fn issue(&self, key: &str) -> std::result::Result<JiraRemoteIssue, BackendError>;

    /// Append a plain-text comment to an issue
    async fn add_comment(&self, key: &str, comment: &str) -> std::result::Result<(), BackendError>;
}

/// JIRA issue as returned by the REST API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JiraRemoteIssue {
    pub key: String,
    #[serde(default)]
    pub id: String,
    pub fields: JiraFields,
}

/// JIRA issue fields
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JiraFields {
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "issuetype", default)]
    pub issue_type: Option<JiraIssueType>,
    #[serde(default)]
    pub status: Option<JiraStatus>,
    #[serde(default)]
    pub priority: Option<JiraPriority>,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub assignee: Option<JiraUser>,
    #[serde(default)]
    pub reporter: Option<JiraUser>,
    #[serde(default)]
    pub updated: Option<String>,
    #[serde(default)]
    pub created: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JiraIssueType {
    pub name: String,
    #[serde(default)]
    pub id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JiraStatus {
    pub name: String,
    #[serde(default)]
    pub id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JiraPriority {
    pub name: String,
    #[serde(default)]
    pub id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JiraUser {
    #[serde(rename = "displayName")]
    pub display_name: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "emailAddress", default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
struct JiraCommentCreate<'a> {
    body: &'a str,
}

/// JIRA REST client
pub struct JiraClient {
    client: Client,
    base_url: String,
    token: String,
}

impl JiraClient {
    /// Create a client for the JIRA instance at `url`
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(url: &str, token_auth: impl Into<String>) -> Result<Self> {
        let client = Client::builder().build()?;

        let base_url = format!("{}/rest/api/2", url.trim_end_matches('/'));

        Ok(Self {
            client,
            base_url,
            token: token_auth.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn issue_url(&self, key: &str) -> String {
        format!("{}/issue/{}", self.base_url, urlencoding::encode(key))
    }
}

#[async_trait]
impl JiraBackend for JiraClient {
    async fn issue(&self, key: &str) -> std::result::Result<JiraRemoteIssue, BackendError> {
        let url = self.issue_url(key);

        debug!(key = %key, "Fetching JIRA issue");

        let response = self
            .client
            .get(&url)
            .query(&[("fields", ISSUE_FIELDS)])
            .bearer_auth(&self.token)
            .send()
            .await?;

        match response.status() {
            StatusCode::OK => decode(response).await,
            _ => Err(error_for_response(response, key).await),
        }
    }

    async fn add_comment(&self, key: &str, comment: &str) -> std::result::Result<(), BackendError> {
        let url = format!("{}/comment", self.issue_url(key));

        info!(key = %key, "Adding comment to JIRA issue");

        let response = self
            .client
            .post(&url)
            .json(&JiraCommentCreate { body: comment })
            .bearer_auth(&self.token)
            .send()
            .await?;

        match response.status() {
            StatusCode::CREATED | StatusCode::OK => Ok(()),
            _ => Err(error_for_response(response, key).await),
        }
    }
}
