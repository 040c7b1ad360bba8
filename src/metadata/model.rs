use std::collections::HashSet;

use super::property::{KeyRole, PropertyMetadata};
use crate::errors::MappingError;
use crate::mapper::value::Fields;

/// Compiled description of a model type: its mapped properties in declaration
/// order and which of them form the primary key.
///
/// Built once per type (usually behind a `Lazy` static) and read-only after.
#[derive(Debug, Clone)]
pub struct ModelMetadata {
    name: String,
    table_name: String,
    properties: Vec<PropertyMetadata>,
    partition_key: usize,
    sort_key: Option<usize>,
}

impl ModelMetadata {
    pub fn builder(name: impl Into<String>) -> ModelMetadataBuilder {
        let name = name.into();
        ModelMetadataBuilder {
            table_name: None,
            name,
            properties: Vec::new(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    pub fn properties(&self) -> impl Iterator<Item = &PropertyMetadata> {
        self.properties.iter()
    }

    /// Properties that take part in mapping.
    pub fn mapped_properties(&self) -> impl Iterator<Item = &PropertyMetadata> {
        self.properties.iter().filter(|p| !p.is_transient())
    }

    /// Look a property up by its property name.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&PropertyMetadata> {
        self.properties.iter().find(|p| p.name() == name)
    }

    /// Look a property up by its attribute name on the wire.
    #[must_use]
    pub fn property_by_wire_name(&self, wire_name: &str) -> Option<&PropertyMetadata> {
        self.properties.iter().find(|p| p.wire_name() == wire_name)
    }

    #[must_use]
    pub fn partition_key(&self) -> &PropertyMetadata {
        &self.properties[self.partition_key]
    }

    #[must_use]
    pub fn sort_key(&self) -> Option<&PropertyMetadata> {
        self.sort_key.map(|i| &self.properties[i])
    }
}

pub struct ModelMetadataBuilder {
    name: String,
    table_name: Option<String>,
    properties: Vec<PropertyMetadata>,
}

impl ModelMetadataBuilder {
    /// Table the model is stored in; defaults to the model name.
    #[must_use]
    pub fn table_name(mut self, table_name: impl Into<String>) -> Self {
        self.table_name = Some(table_name.into());
        self
    }

    #[must_use]
    pub fn property(mut self, property: PropertyMetadata) -> Self {
        self.properties.push(property);
        self
    }

    /// Validate the key declaration and freeze the metadata.
    pub fn build(self) -> Result<ModelMetadata, MappingError> {
        let keys_with = |role: KeyRole| -> Vec<usize> {
            self.properties
                .iter()
                .enumerate()
                .filter(|(_, p)| p.key_role() == Some(role))
                .map(|(i, _)| i)
                .collect()
        };

        let partition_keys = keys_with(KeyRole::Partition);
        let sort_keys = keys_with(KeyRole::Sort);

        let partition_key = match partition_keys.as_slice() {
            [index] => *index,
            [] => {
                return Err(MappingError::MissingPartitionKey {
                    model: self.name,
                });
            }
            _ => {
                return Err(MappingError::MultiplePartitionKeys {
                    model: self.name,
                });
            }
        };

        if sort_keys.len() > 1 {
            return Err(MappingError::MultipleSortKeys { model: self.name });
        }

        let mut seen = HashSet::new();
        for property in self.properties.iter().filter(|p| !p.is_transient()) {
            if !seen.insert(property.wire_name()) {
                return Err(MappingError::DuplicateAttributeName {
                    model: self.name.clone(),
                    name: property.wire_name().to_string(),
                });
            }
        }

        Ok(ModelMetadata {
            table_name: self.table_name.unwrap_or_else(|| self.name.clone()),
            name: self.name,
            properties: self.properties,
            partition_key,
            sort_key: sort_keys.first().copied(),
        })
    }
}

/// A type the mapper can store as an item.
///
/// Implementations describe their metadata once and convert between
/// themselves and [`Fields`] keyed by property name. `from_fields` plays the
/// role of the constructor: properties missing from the item are simply not
/// present in the given fields.
pub trait Model: Sized {
    fn metadata() -> &'static ModelMetadata;

    fn to_fields(&self) -> Fields;

    fn from_fields(fields: Fields) -> Result<Self, MappingError>;
}

/// Metadata lookup by model type.
#[must_use]
pub fn metadata_for<T: Model>() -> &'static ModelMetadata {
    T::metadata()
}
