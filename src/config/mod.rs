//! Configuration system
//!
//! Loads `~/.config/bugjira/config.json` (or any given file or value) with:
//! - Bugzilla URL and API key
//! - JIRA URL and token
//! - Optional field data plugin settings

mod bugjira_config;
pub mod validation;

pub use bugjira_config::{BugzillaConfig, Config, JiraConfig};
pub use validation::{validate_config, ValidationError};
