//! Bugjira - one interface over Bugzilla and JIRA
//!
//! Bugjira looks at an issue key, decides which tracker owns it and forwards
//! the call to that tracker's client. It also produces field descriptors for
//! both trackers from pluggable field data sources.
//!
//! # Architecture
//!
//! - **keys**: Issue key classification
//! - **config**: Connection settings and schema validation
//! - **integrations**: Backend client traits and REST clients (Bugzilla, JIRA)
//! - **broker**: Per-backend adapters with uniform error translation
//! - **bugjira**: The dispatch facade
//! - **fields**: Field descriptors, field data plugins and their factories
//! - **plugin_loader**: Named JSON generator modules

pub mod broker;
pub mod bugjira;
pub mod config;
pub mod error;
pub mod fields;
pub mod integrations;
pub mod issue;
pub mod keys;
pub mod logging;
pub mod plugin_loader;

// Re-exports
pub use bugjira::{Bugjira, BugjiraBuilder};
pub use error::{BugjiraError, Result};
pub use issue::{BugzillaIssue, Issue, JiraIssue};
pub use keys::BackendKind;
