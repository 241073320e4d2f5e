//! Single-generator field factory
//!
//! [`FieldFactory`] holds at most one [`FieldJsonGenerator`] that serves field
//! records for both backends. A plugin puts itself in place through
//! [`JsonGeneratorPlugin::register`]; until then both field lists are empty.

use super::field::{BugzillaField, JiraField};
use crate::config::Config;
use crate::Result;
use serde_json::Value;
use tracing::debug;

/// Supplies raw field records for both backends
pub trait FieldJsonGenerator: Send + Sync {
    fn get_bugzilla_fields_json(&self) -> Vec<Value>;
    fn get_jira_fields_json(&self) -> Vec<Value>;
}

/// A generator that can be built from config and installed in a factory
pub trait JsonGeneratorPlugin: FieldJsonGenerator + Sized + 'static {
    fn from_config(config: &Config) -> Result<Self>;

    /// Build the generator and make it the factory's generator
    fn register(config: &Config, factory: &mut FieldFactory) -> Result<()> {
        factory.register_json_generator(Self::from_config(config)?);
        Ok(())
    }
}

/// Field descriptors from the registered JSON generator
#[derive(Default)]
pub struct FieldFactory {
    json_generator: Option<Box<dyn FieldJsonGenerator>>,
}

impl FieldFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current generator
    pub fn register_json_generator(&mut self, generator: impl FieldJsonGenerator + 'static) {
        debug!("Registered JSON field generator");
        self.json_generator = Some(Box::new(generator));
    }

    pub fn has_generator(&self) -> bool {
        self.json_generator.is_some()
    }

    pub fn get_bugzilla_fields(&self) -> Result<Vec<BugzillaField>> {
        match &self.json_generator {
            Some(generator) => generator
                .get_bugzilla_fields_json()
                .iter()
                .map(BugzillaField::from_record)
                .collect(),
            None => Ok(Vec::new()),
        }
    }

    pub fn get_jira_fields(&self) -> Result<Vec<JiraField>> {
        match &self.json_generator {
            Some(generator) => generator
                .get_jira_fields_json()
                .iter()
                .map(JiraField::from_record)
                .collect(),
            None => Ok(Vec::new()),
        }
    }
}
