//! The Bugjira facade
//!
//! [`Bugjira`] owns one broker per backend and routes each call by the shape
//! of the issue key: all-digit keys go to Bugzilla, `PROJ-123` keys to JIRA.

use crate::broker::{Broker, BugzillaBroker, JiraBroker};
use crate::config::Config;
use crate::fields::{
    BugjiraField, FieldDataGeneratorFactory, FieldDataPluginRegistry, FieldGeneratorFactory,
    GeneratorType,
};
use crate::integrations::{BugzillaBackend, JiraBackend};
use crate::issue::Issue;
use crate::keys::{classify, BackendKind};
use crate::{BugjiraError, Result};
use serde_json::Value;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

/// Builder for [`Bugjira`]
#[derive(Default)]
pub struct BugjiraBuilder {
    config_path: Option<PathBuf>,
    config: Option<Value>,
    bugzilla: Option<Arc<dyn BugzillaBackend>>,
    jira: Option<Arc<dyn JiraBackend>>,
    field_data_plugins: Option<FieldDataPluginRegistry>,
}

impl BugjiraBuilder {
    /// Read the configuration from a JSON or YAML file
    pub fn config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    /// Use an already parsed configuration. Takes precedence over
    /// [`config_path`](Self::config_path).
    pub fn config(mut self, value: Value) -> Self {
        self.config = Some(value);
        self
    }

    /// Use this Bugzilla client instead of building one from config
    pub fn bugzilla_backend(mut self, backend: Arc<dyn BugzillaBackend>) -> Self {
        self.bugzilla = Some(backend);
        self
    }

    /// Use this JIRA client instead of building one from config
    pub fn jira_backend(mut self, backend: Arc<dyn JiraBackend>) -> Self {
        self.jira = Some(backend);
        self
    }

    /// Field data plugins available to [`Bugjira::get_fields`]. Defaults to
    /// the bundled JSON file plugins.
    pub fn field_data_plugins(mut self, registry: FieldDataPluginRegistry) -> Self {
        self.field_data_plugins = Some(registry);
        self
    }

    pub fn build(self) -> Result<Bugjira> {
        let config = match (&self.config_path, self.config) {
            (None, None) => None,
            (path, value) => Some(Config::from_config(path.as_deref(), value)?),
        };

        let bugzilla = BugzillaBroker::new(config.as_ref(), self.bugzilla)?;
        let jira = JiraBroker::new(config.as_ref(), self.jira)?;

        let registry = self
            .field_data_plugins
            .unwrap_or_else(FieldDataPluginRegistry::with_defaults);

        debug!(configured = config.is_some(), "Bugjira ready");

        Ok(Bugjira {
            config,
            bugzilla,
            jira,
            field_generators: FieldGeneratorFactory::new(FieldDataGeneratorFactory::new(registry)),
        })
    }
}

/// Unified access to Bugzilla and JIRA
pub struct Bugjira {
    config: Option<Config>,
    bugzilla: BugzillaBroker,
    jira: JiraBroker,
    field_generators: FieldGeneratorFactory,
}

impl fmt::Debug for Bugjira {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bugjira")
            .field("configured", &self.config.is_some())
            .finish_non_exhaustive()
    }
}

impl Bugjira {
    pub fn builder() -> BugjiraBuilder {
        BugjiraBuilder::default()
    }

    /// A facade configured from a file, with clients built from it
    pub fn from_path(path: impl Into<PathBuf>) -> Result<Self> {
        Self::builder().config_path(path).build()
    }

    /// The loaded configuration, if one was given
    pub fn config(&self) -> Option<&Config> {
        self.config.as_ref()
    }

    /// The Bugzilla client in use
    pub fn bugzilla(&self) -> Arc<dyn BugzillaBackend> {
        self.bugzilla.backend()
    }

    /// The JIRA client in use
    pub fn jira(&self) -> Arc<dyn JiraBackend> {
        self.jira.backend()
    }

    fn broker(&self, key: &str) -> Result<&dyn Broker> {
        let broker: &dyn Broker = match classify(key)? {
            BackendKind::Bugzilla => &self.bugzilla,
            BackendKind::Jira => &self.jira,
        };
        Ok(broker)
    }

    /// Fetch an issue from whichever backend owns `key`
    pub async fn get_issue(&self, key: &str) -> Result<Issue> {
        let broker = self.broker(key)?;
        debug!(key = %key, backend = %broker.kind(), "Dispatching lookup");
        broker.get_issue(key).await
    }

    /// Add a comment to an issue on whichever backend owns its key
    pub async fn add_comment(&self, issue: &Issue, comment: &str) -> Result<()> {
        let broker = self.broker(issue.key())?;
        debug!(key = %issue.key(), backend = %broker.kind(), "Dispatching comment");
        broker.add_comment(issue, comment).await
    }

    /// Field descriptors for one backend, from the plugin named in the config
    pub fn get_fields(&mut self, generator_type: GeneratorType) -> Result<Vec<BugjiraField>> {
        let config = self.config.as_ref().ok_or_else(|| {
            BugjiraError::Config("field generators require a configuration".to_string())
        })?;
        self.field_generators
            .get_field_generator(generator_type, config)?
            .get_fields()
    }
}
