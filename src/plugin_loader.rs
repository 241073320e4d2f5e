//! JSON generator plugin loader
//!
//! Maps module names to registration hooks. The module to load is named by
//! `json_generator_module` in the config and defaults to the bundled
//! [`JsonGenerator`].

use crate::config::Config;
use crate::fields::json_generator::{JsonGenerator, MODULE_NAME};
use crate::fields::{FieldFactory, JsonGeneratorPlugin};
use crate::{BugjiraError, Result};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

/// Installs a generator into a [`FieldFactory`]
pub type RegisterHook = Arc<dyn Fn(&Config, &mut FieldFactory) -> Result<()> + Send + Sync>;

/// Named registration hooks
pub struct PluginLoader {
    modules: HashMap<String, RegisterHook>,
}

impl PluginLoader {
    /// A loader that knows no modules
    pub fn empty() -> Self {
        Self {
            modules: HashMap::new(),
        }
    }

    /// A loader that knows the bundled `bugjira.json_generator` module
    pub fn new() -> Self {
        let mut loader = Self::empty();
        loader.add_plugin::<JsonGenerator>(MODULE_NAME);
        loader
    }

    /// Make a generator type loadable under `module`
    pub fn add_plugin<P: JsonGeneratorPlugin>(&mut self, module: impl Into<String>) {
        self.add_module(module, P::register);
    }

    /// Make an arbitrary hook loadable under `module`, replacing any
    /// previous hook of that name
    pub fn add_module<F>(&mut self, module: impl Into<String>, hook: F)
    where
        F: Fn(&Config, &mut FieldFactory) -> Result<()> + Send + Sync + 'static,
    {
        self.modules.insert(module.into(), Arc::new(hook));
    }

    pub fn contains(&self, module: &str) -> bool {
        self.modules.contains_key(module)
    }

    /// Module the config asks for
    pub fn module_name(config: &Config) -> &str {
        config
            .json_generator_module
            .as_deref()
            .unwrap_or(MODULE_NAME)
    }

    /// Run the configured module's hook against `factory`
    pub fn load_plugin(&self, config: &Config, factory: &mut FieldFactory) -> Result<()> {
        let module = Self::module_name(config);
        let hook = self.modules.get(module).ok_or_else(|| {
            BugjiraError::PluginLoader(format!("Could not load module named '{}'", module))
        })?;

        debug!(module = %module, "Loading JSON generator module");
        hook(config, factory)?;
        info!(module = %module, "Loaded JSON generator module");
        Ok(())
    }
}

impl Default for PluginLoader {
    fn default() -> Self {
        Self::new()
    }
}
