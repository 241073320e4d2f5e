//! Bugzilla client
//!
//! Fetches bugs and applies updates through the Bugzilla REST API
//! (`/rest/bug`), authenticating with an API key header.

use super::{decode, error_for_response, BackendError};
use crate::Result;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

const API_KEY_HEADER: &str = "X-BUGZILLA-API-KEY";

/// What a broker needs from a Bugzilla backend
#[async_trait]
pub trait BugzillaBackend: Send + Sync {
    /// Fetch a single bug by its numeric id
    async fn getbug(&self, id: &str) -> std::result::Result<Bug, BackendError>;

    /// Apply one update to every bug in `ids`
    async fn update_bugs(
        &self,
        ids: &[String],
        update: &BugzillaUpdate,
    ) -> std::result::Result<(), BackendError>;
}

/// Bugzilla bug as returned by the REST API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bug {
    pub id: u64,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub resolution: String,
    #[serde(default)]
    pub product: String,
    #[serde(default)]
    pub component: String,
    #[serde(default)]
    pub assigned_to: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub severity: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub creation_time: Option<String>,
    #[serde(default)]
    pub last_change_time: Option<String>,
}

/// Fields to change on one or more bugs
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BugzillaUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<BugzillaCommentUpdate>,
}

/// A comment to add as part of an update
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BugzillaCommentUpdate {
    pub body: String,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_private: bool,
}

impl BugzillaUpdate {
    /// An update that only adds a public comment
    pub fn comment(body: impl Into<String>) -> Self {
        Self {
            comment: Some(BugzillaCommentUpdate {
                body: body.into(),
                is_private: false,
            }),
        }
    }
}

#[derive(Debug, Deserialize)]
struct BugsResponse {
    #[serde(default)]
    bugs: Vec<Bug>,
}

#[derive(Debug, Serialize)]
struct UpdateRequest<'a> {
    ids: &'a [String],
    #[serde(flatten)]
    update: &'a BugzillaUpdate,
}

/// Bugzilla REST client
pub struct BugzillaClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl BugzillaClient {
    /// Create a client for the Bugzilla instance at `url`
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(url: &str, api_key: impl Into<String>) -> Result<Self> {
        let client = Client::builder().build()?;

        let base_url = format!("{}/rest", url.trim_end_matches('/'));

        Ok(Self {
            client,
            base_url,
            api_key: api_key.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn bug_url(&self, id: &str) -> String {
        format!("{}/bug/{}", self.base_url, urlencoding::encode(id))
    }
}

#[async_trait]
impl BugzillaBackend for BugzillaClient {
    async fn getbug(&self, id: &str) -> std::result::Result<Bug, BackendError> {
        let url = self.bug_url(id);

        debug!(id = %id, "Fetching Bugzilla bug");

        let response = self
            .client
            .get(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await?;

        match response.status() {
            StatusCode::OK => {
                let body: BugsResponse = decode(response).await?;
                body.bugs
                    .into_iter()
                    .next()
                    .ok_or_else(|| BackendError::NotFound(id.to_string()))
            }
            _ => Err(error_for_response(response, id).await),
        }
    }

    async fn update_bugs(
        &self,
        ids: &[String],
        update: &BugzillaUpdate,
    ) -> std::result::Result<(), BackendError> {
        let first = ids
            .first()
            .ok_or_else(|| BackendError::Other("no bug ids to update".to_string()))?;
        let url = self.bug_url(first);

        info!(ids = ?ids, "Updating Bugzilla bugs");

        let response = self
            .client
            .put(&url)
            .json(&UpdateRequest { ids, update })
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await?;

        match response.status() {
            StatusCode::OK => Ok(()),
            _ => Err(error_for_response(response, first).await),
        }
    }
}
