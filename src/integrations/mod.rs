//! Backend Integrations
//!
//! Clients for the two issue trackers Bugjira unifies.
//!
//! # Overview
//!
//! Each backend is described by a small capability trait, which is all the
//! brokers ever call:
//!
//! - **Bugzilla** ([`BugzillaBackend`]): fetch a bug by numeric id, apply an
//!   update (such as a new comment) to a list of bug ids
//! - **JIRA** ([`JiraBackend`]): fetch an issue by key, add a comment to it
//!
//! The bundled REST clients ([`BugzillaClient`], [`JiraClient`]) implement
//! these traits over HTTP. Callers that already own a client, or tests that
//! need a stand-in, implement the traits themselves and hand the instance to
//! the broker directly.

pub mod bugzilla;
pub mod jira;

use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;

// Bugzilla exports
pub use bugzilla::{Bug, BugzillaBackend, BugzillaClient, BugzillaCommentUpdate, BugzillaUpdate};

// JIRA exports
pub use jira::{
    JiraBackend, JiraClient, JiraFields, JiraIssueType, JiraPriority, JiraRemoteIssue,
    JiraStatus, JiraUser,
};

/// Failure reported by a backend client
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("authentication failed: {0}")]
    Auth(String),
    #[error("API error: HTTP {status}: {body}")]
    Api { status: u16, body: String },
    #[error("network error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected response: {0}")]
    Decode(String),
    #[error("{0}")]
    Other(String),
}

/// Translate a non-success response into a [`BackendError`]
async fn error_for_response(response: Response, target: &str) -> BackendError {
    match response.status() {
        StatusCode::NOT_FOUND => BackendError::NotFound(target.to_string()),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => BackendError::Auth(target.to_string()),
        status => match response.text().await {
            Ok(body) => BackendError::Api {
                status: status.as_u16(),
                body,
            },
            Err(e) => BackendError::Http(e),
        },
    }
}

/// Read a success body, reporting malformed payloads as [`BackendError::Decode`]
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, BackendError> {
    let body = response.bytes().await?;
    serde_json::from_slice(&body).map_err(|e| BackendError::Decode(e.to_string()))
}
