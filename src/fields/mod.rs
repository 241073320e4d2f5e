//! Field descriptors and the generators that produce them
//!
//! Two ways of producing fields live here:
//! - per-backend: [`FieldGeneratorFactory`] → [`FieldGenerator`] →
//!   a [`FieldDataGenerator`] plugin chosen by name from the config
//! - single generator: a [`FieldFactory`] holding one [`FieldJsonGenerator`]
//!   installed by the [`crate::plugin_loader::PluginLoader`]

pub mod data_generator;
pub mod factory;
pub mod field;
pub mod generator;
pub mod json_generator;

pub use data_generator::{
    FieldDataGenerator, FieldDataGeneratorConstructor, FieldDataGeneratorFactory,
    FieldDataPluginRegistry, DEFAULT_BUGZILLA_PLUGIN, DEFAULT_JIRA_PLUGIN,
};
pub use factory::{FieldFactory, FieldJsonGenerator, JsonGeneratorPlugin};
pub use field::{BugjiraField, BugzillaField, FieldText, JiraField};
pub use generator::{FieldGenerator, FieldGeneratorFactory};
pub use json_generator::{
    BugzillaFieldDataGenerator, FieldData, JiraFieldDataGenerator, JsonGenerator,
};

/// Backend tag used to select a generator
pub type GeneratorType = crate::keys::BackendKind;
