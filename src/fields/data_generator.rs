//! Field data generator plugins
//!
//! A field data generator supplies the raw field records for one backend. The
//! plugin to use is named in that backend's config section
//! (`field_data_plugin_name`) and looked up in a [`FieldDataPluginRegistry`].
//! [`FieldDataGeneratorFactory`] builds each backend's generator once and hands
//! out the same instance afterwards.

use super::json_generator::{BugzillaFieldDataGenerator, JiraFieldDataGenerator};
use crate::config::Config;
use crate::keys::BackendKind;
use crate::{BugjiraError, Result};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Plugin name used for Bugzilla when the config names none
pub const DEFAULT_BUGZILLA_PLUGIN: &str = "bugzilla_default";

/// Plugin name used for JIRA when the config names none
pub const DEFAULT_JIRA_PLUGIN: &str = "jira_default";

/// Source of raw field records for one backend
pub trait FieldDataGenerator: fmt::Debug + Send + Sync {
    fn get_field_data(&self) -> Vec<Value>;
}

/// Builds a generator from the loaded configuration
pub type FieldDataGeneratorConstructor =
    Arc<dyn Fn(&Config) -> Result<Arc<dyn FieldDataGenerator>> + Send + Sync>;

/// Plugin name configured for a backend, or its default
pub fn plugin_name(kind: BackendKind, config: &Config) -> &str {
    let configured = match kind {
        BackendKind::Bugzilla => config.bugzilla.field_data_plugin_name.as_deref(),
        BackendKind::Jira => config.jira.field_data_plugin_name.as_deref(),
    };
    configured.unwrap_or(match kind {
        BackendKind::Bugzilla => DEFAULT_BUGZILLA_PLUGIN,
        BackendKind::Jira => DEFAULT_JIRA_PLUGIN,
    })
}

/// Named field data generator constructors
#[derive(Default)]
pub struct FieldDataPluginRegistry {
    plugins: HashMap<String, FieldDataGeneratorConstructor>,
}

impl FieldDataPluginRegistry {
    /// An empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the bundled JSON file plugins
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.plugins.insert(
            DEFAULT_BUGZILLA_PLUGIN.to_string(),
            Arc::new(|config: &Config| -> Result<Arc<dyn FieldDataGenerator>> {
                let generator: Arc<dyn FieldDataGenerator> =
                    Arc::new(BugzillaFieldDataGenerator::new(config)?);
                Ok(generator)
            }),
        );
        registry.plugins.insert(
            DEFAULT_JIRA_PLUGIN.to_string(),
            Arc::new(|config: &Config| -> Result<Arc<dyn FieldDataGenerator>> {
                let generator: Arc<dyn FieldDataGenerator> =
                    Arc::new(JiraFieldDataGenerator::new(config)?);
                Ok(generator)
            }),
        );
        registry
    }

    /// Register a constructor under a new name
    pub fn register<F>(&mut self, name: impl Into<String>, constructor: F) -> Result<()>
    where
        F: Fn(&Config) -> Result<Arc<dyn FieldDataGenerator>> + Send + Sync + 'static,
    {
        let name = name.into();
        if self.plugins.contains_key(&name) {
            return Err(BugjiraError::PluginLoader(format!(
                "A plugin named '{}' is already registered",
                name
            )));
        }
        debug!(plugin = %name, "Registered field data plugin");
        self.plugins.insert(name, Arc::new(constructor));
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.plugins.contains_key(name)
    }

    /// Registered plugin names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.plugins.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Construct the named plugin
    pub fn load(&self, name: &str, config: &Config) -> Result<Arc<dyn FieldDataGenerator>> {
        let constructor = self.plugins.get(name).ok_or_else(|| {
            BugjiraError::PluginLoader(format!("Could not load plugin named '{}'", name))
        })?;
        constructor(config)
    }
}

/// Hands out one field data generator per backend
pub struct FieldDataGeneratorFactory {
    registry: FieldDataPluginRegistry,
    generators: HashMap<BackendKind, Arc<dyn FieldDataGenerator>>,
}

impl FieldDataGeneratorFactory {
    pub fn new(registry: FieldDataPluginRegistry) -> Self {
        Self {
            registry,
            generators: HashMap::new(),
        }
    }

    pub fn registry(&self) -> &FieldDataPluginRegistry {
        &self.registry
    }

    /// The generator for `kind`, built on first use from the plugin named in
    /// the config. Later calls return the cached instance and ignore `config`.
    pub fn get_field_data_generator(
        &mut self,
        kind: BackendKind,
        config: &Config,
    ) -> Result<Arc<dyn FieldDataGenerator>> {
        if let Some(generator) = self.generators.get(&kind) {
            return Ok(Arc::clone(generator));
        }

        let name = plugin_name(kind, config);
        debug!(backend = %kind, plugin = %name, "Loading field data plugin");
        let generator = self.registry.load(name, config)?;
        self.generators.insert(kind, Arc::clone(&generator));
        Ok(generator)
    }
}

impl Default for FieldDataGeneratorFactory {
    fn default() -> Self {
        Self::new(FieldDataPluginRegistry::with_defaults())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug)]
    struct StaticGenerator(Vec<Value>);

    impl FieldDataGenerator for StaticGenerator {
        fn get_field_data(&self) -> Vec<Value> {
            self.0.clone()
        }
    }

    fn config_with_plugins(bugzilla: Option<&str>, jira: Option<&str>) -> Config {
        let mut value = json!({
            "bugzilla": {"URL": "https://bugzilla.example.com", "api_key": "key"},
            "jira": {"URL": "https://jira.example.com", "token_auth": "token"}
        });
        if let Some(name) = bugzilla {
            value["bugzilla"]["field_data_plugin_name"] = json!(name);
        }
        if let Some(name) = jira {
            value["jira"]["field_data_plugin_name"] = json!(name);
        }
        Config::from_value(value).unwrap()
    }

    #[test]
    fn test_plugin_name_defaults() {
        let config = config_with_plugins(None, Some("custom"));
        assert_eq!(plugin_name(BackendKind::Bugzilla, &config), "bugzilla_default");
        assert_eq!(plugin_name(BackendKind::Jira, &config), "custom");
    }

    #[test]
    fn test_registry_defaults() {
        let registry = FieldDataPluginRegistry::with_defaults();
        assert_eq!(registry.names(), vec!["bugzilla_default", "jira_default"]);
        assert!(FieldDataPluginRegistry::new().names().is_empty());
    }

    #[test]
    fn test_registry_rejects_duplicates() {
        let mut registry = FieldDataPluginRegistry::with_defaults();
        let err = registry
            .register("jira_default", |_: &Config| {
                Ok(Arc::new(StaticGenerator(vec![])) as Arc<dyn FieldDataGenerator>)
            })
            .unwrap_err();
        assert!(matches!(err, BugjiraError::PluginLoader(_)));
    }

    #[test]
    fn test_unknown_plugin() {
        let config = config_with_plugins(Some("nope"), None);
        let mut factory = FieldDataGeneratorFactory::default();

        let err = factory
            .get_field_data_generator(BackendKind::Bugzilla, &config)
            .err()
            .unwrap();
        assert!(matches!(err, BugjiraError::PluginLoader(ref msg) if msg.contains("'nope'")));
    }

    #[test]
    fn test_factory_builds_each_type_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut registry = FieldDataPluginRegistry::new();
        let counter = Arc::clone(&calls);
        registry
            .register("counting", move |_: &Config| {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(Arc::new(StaticGenerator(vec![json!({"name": "product"})]))
                    as Arc<dyn FieldDataGenerator>)
            })
            .unwrap();

        let config = config_with_plugins(Some("counting"), Some("counting"));
        let mut factory = FieldDataGeneratorFactory::new(registry);

        let first = factory
            .get_field_data_generator(BackendKind::Bugzilla, &config)
            .unwrap();
        let second = factory
            .get_field_data_generator(BackendKind::Bugzilla, &config)
            .unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        let jira = factory
            .get_field_data_generator(BackendKind::Jira, &config)
            .unwrap();
        assert!(!Arc::ptr_eq(&first, &jira));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(first.get_field_data(), vec![json!({"name": "product"})]);
    }

    #[test]
    fn test_default_plugins_without_field_data_path() {
        let config = config_with_plugins(None, None);
        let mut factory = FieldDataGeneratorFactory::default();

        let generator = factory
            .get_field_data_generator(BackendKind::Jira, &config)
            .unwrap();
        assert!(generator.get_field_data().is_empty());
    }
}
