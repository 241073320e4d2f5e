//! Field generators
//!
//! A [`FieldGenerator`] turns the raw records of one backend's field data
//! generator into [`BugjiraField`] descriptors.

use super::data_generator::{FieldDataGenerator, FieldDataGeneratorFactory};
use super::field::BugjiraField;
use crate::config::Config;
use crate::keys::BackendKind;
use crate::Result;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Field descriptors for one backend
#[derive(Debug)]
pub struct FieldGenerator {
    kind: BackendKind,
    field_data_generator: Arc<dyn FieldDataGenerator>,
}

impl FieldGenerator {
    pub fn new(
        kind: BackendKind,
        config: &Config,
        data_generators: &mut FieldDataGeneratorFactory,
    ) -> Result<Self> {
        let field_data_generator = data_generators.get_field_data_generator(kind, config)?;
        Ok(Self {
            kind,
            field_data_generator,
        })
    }

    pub fn kind(&self) -> BackendKind {
        self.kind
    }

    pub fn field_data_generator(&self) -> Arc<dyn FieldDataGenerator> {
        Arc::clone(&self.field_data_generator)
    }

    /// One descriptor per raw record. Any invalid record fails the call.
    pub fn get_fields(&self) -> Result<Vec<BugjiraField>> {
        let records = self.field_data_generator.get_field_data();
        debug!(backend = %self.kind, records = records.len(), "Building field descriptors");
        records
            .iter()
            .map(|record| BugjiraField::from_record(self.kind, record))
            .collect()
    }
}

/// Hands out one field generator per backend
#[derive(Default)]
pub struct FieldGeneratorFactory {
    data_generators: FieldDataGeneratorFactory,
    generators: HashMap<BackendKind, Arc<FieldGenerator>>,
}

impl FieldGeneratorFactory {
    pub fn new(data_generators: FieldDataGeneratorFactory) -> Self {
        Self {
            data_generators,
            generators: HashMap::new(),
        }
    }

    pub fn get_field_generator(
        &mut self,
        kind: BackendKind,
        config: &Config,
    ) -> Result<Arc<FieldGenerator>> {
        if let Some(generator) = self.generators.get(&kind) {
            return Ok(Arc::clone(generator));
        }

        let generator = Arc::new(FieldGenerator::new(kind, config, &mut self.data_generators)?);
        self.generators.insert(kind, Arc::clone(&generator));
        Ok(generator)
    }
}
