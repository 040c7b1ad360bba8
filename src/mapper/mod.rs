//! Bidirectional mapping between model instances and wire attributes.
//!
//! The [`Mapper`] façade dispatches every value through custom codecs first,
//! then the [classifier](classify::classify), and from there to the scalar,
//! collection or object codec. Decoding runs the same path in reverse, guided
//! by the property metadata since the wire form carries no type information
//! beyond its tag.
//!
//! # Example
//!
//! ```
//! use dynamap::mapper::{self, attribute::Attribute, value::Value};
//!
//! let attribute = mapper::to_db_one(&Value::set(["a", "b"]), None).unwrap();
//! assert_eq!(attribute, Attribute::Ss(vec!["a".into(), "b".into()]));
//! ```

pub mod attribute;
pub mod classify;
mod collection;
pub mod custom;
pub mod date;
mod object;
mod scalar;
pub mod value;

use once_cell::sync::Lazy;
use tracing::warn;

use self::attribute::{Attribute, AttributeType, Attributes};
use self::date::DateCodec;
use self::value::{Fields, Value};
use crate::core::config::MapperConfig;
use crate::errors::MappingError;
use crate::metadata::{Model, ModelMetadata, PropertyMetadata};

static DEFAULT_MAPPER: Lazy<Mapper> = Lazy::new(Mapper::default);

/// Stateless mapper. Cheap to clone; safe to share between threads.
#[derive(Debug, Clone, Default)]
pub struct Mapper {
    config: MapperConfig,
}

impl Mapper {
    #[must_use]
    pub const fn new(config: MapperConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &MapperConfig {
        &self.config
    }

    fn dates(&self) -> &dyn DateCodec {
        self.config.date_codec.as_ref()
    }

    /// Map a whole model instance to its attribute map.
    pub fn to_db<T: Model>(&self, item: &T) -> Result<Attributes, MappingError> {
        self.to_db_fields(&item.to_fields(), T::metadata())
    }

    /// Rebuild a model instance from its attribute map.
    pub fn from_db<T: Model>(&self, attributes: &Attributes) -> Result<T, MappingError> {
        T::from_fields(self.from_db_fields(attributes, T::metadata())?)
    }

    pub fn to_db_fields(
        &self,
        fields: &Fields,
        metadata: &ModelMetadata,
    ) -> Result<Attributes, MappingError> {
        object::to_db(self, fields.as_map(), Some(metadata))
    }

    pub fn from_db_fields(
        &self,
        attributes: &Attributes,
        metadata: &ModelMetadata,
    ) -> Result<Fields, MappingError> {
        object::from_db(self, attributes, Some(metadata)).map(Fields::from)
    }

    /// Map a single value. Empty strings and empty sets come out as `NULL`.
    pub fn to_db_one(
        &self,
        value: &Value,
        property: Option<&PropertyMetadata>,
    ) -> Result<Attribute, MappingError> {
        let date_type = self.dates().attribute_type();

        let Some(tag) = classify::classify(value, property, date_type) else {
            // Only a custom codec makes the classifier step aside.
            return match property.and_then(PropertyMetadata::custom_codec) {
                Some(codec) => codec.to_db(value),
                None => Err(MappingError::InvalidValue(format!(
                    "no mapping for {} value",
                    value.kind()
                ))),
            };
        };

        match (tag, value) {
            (AttributeType::Null, _) => Ok(Attribute::Null),
            (AttributeType::Ss | AttributeType::Ns | AttributeType::Bs, Value::Set(items)) => {
                collection::set_to_db(items, tag)
            }
            (AttributeType::L, Value::List(items) | Value::Set(items)) => {
                collection::list_to_db(self, items, property)
            }
            (AttributeType::M, Value::Map(fields)) => {
                let nested = property.and_then(PropertyMetadata::nested_model);
                object::to_db(self, fields, nested).map(Attribute::M)
            }
            _ => scalar::to_db(value, self.dates()),
        }
    }

    /// Decode a single attribute.
    pub fn from_db_one(
        &self,
        attribute: &Attribute,
        property: Option<&PropertyMetadata>,
    ) -> Result<Value, MappingError> {
        if let Some(codec) = property.and_then(PropertyMetadata::custom_codec) {
            return codec.from_db(attribute);
        }

        match attribute {
            Attribute::Ss(_) | Attribute::Ns(_) | Attribute::Bs(_) => {
                collection::set_from_db(attribute, property)
            }
            Attribute::L(items) => collection::list_from_db(self, items, property),
            Attribute::M(map) => {
                let nested = property.and_then(PropertyMetadata::nested_model);
                object::from_db(self, map, nested).map(Value::Map)
            }
            _ => scalar::from_db(attribute, property, self.dates()),
        }
    }

    /// Build the primary key attributes of a `T` item.
    pub fn to_key<T: Model>(
        &self,
        partition_key: &Value,
        sort_key: Option<&Value>,
    ) -> Result<Attributes, MappingError> {
        self.to_key_for(T::metadata(), partition_key, sort_key)
    }

    pub fn to_key_for(
        &self,
        metadata: &ModelMetadata,
        partition_key: &Value,
        sort_key: Option<&Value>,
    ) -> Result<Attributes, MappingError> {
        let mut key = Attributes::new();

        let partition = metadata.partition_key();
        key.insert(
            partition.wire_name().to_string(),
            self.to_key_attribute(partition_key, partition)?,
        );

        match (metadata.sort_key(), sort_key) {
            (Some(sort), Some(value)) => {
                key.insert(sort.wire_name().to_string(), self.to_key_attribute(value, sort)?);
            }
            (Some(sort), None) => {
                warn!("Missing sort key '{}' for {}", sort.name(), metadata.name());
                return Err(MappingError::MissingKeyValue {
                    property: sort.name().to_string(),
                });
            }
            (None, Some(_)) => {
                return Err(MappingError::UnexpectedSortKey {
                    model: metadata.name().to_string(),
                });
            }
            (None, None) => {}
        }

        Ok(key)
    }

    /// Map one key value, rejecting values the store cannot use as a key.
    pub fn to_key_attribute(
        &self,
        value: &Value,
        property: &PropertyMetadata,
    ) -> Result<Attribute, MappingError> {
        custom::ensure_key_compatible(value, property)?;
        let attribute = self.to_db_one(value, Some(property))?;
        ensure_key_attribute(&attribute, property)?;
        Ok(attribute)
    }

    /// Check that a mapped item carries every key attribute of its model.
    pub fn ensure_key_present(
        &self,
        attributes: &Attributes,
        metadata: &ModelMetadata,
    ) -> Result<(), MappingError> {
        let keys = std::iter::once(metadata.partition_key()).chain(metadata.sort_key());
        for property in keys {
            match attributes.get(property.wire_name()) {
                Some(attribute) => ensure_key_attribute(attribute, property)?,
                None => {
                    return Err(MappingError::MissingKeyValue {
                        property: property.name().to_string(),
                    });
                }
            }
        }
        Ok(())
    }
}

fn ensure_key_attribute(
    attribute: &Attribute,
    property: &PropertyMetadata,
) -> Result<(), MappingError> {
    match attribute {
        Attribute::S(_) | Attribute::N(_) | Attribute::B(_) => Ok(()),
        Attribute::Null => Err(MappingError::MissingKeyValue {
            property: property.name().to_string(),
        }),
        other => Err(MappingError::InvalidValue(format!(
            "key '{}' must map to S, N or B but mapped to {}",
            property.name(),
            other.attribute_type()
        ))),
    }
}

/// [`Mapper::to_db`] with the default configuration.
pub fn to_db<T: Model>(item: &T) -> Result<Attributes, MappingError> {
    DEFAULT_MAPPER.to_db(item)
}

/// [`Mapper::from_db`] with the default configuration.
pub fn from_db<T: Model>(attributes: &Attributes) -> Result<T, MappingError> {
    DEFAULT_MAPPER.from_db(attributes)
}

/// [`Mapper::to_db_one`] with the default configuration.
pub fn to_db_one(
    value: &Value,
    property: Option<&PropertyMetadata>,
) -> Result<Attribute, MappingError> {
    DEFAULT_MAPPER.to_db_one(value, property)
}

/// [`Mapper::from_db_one`] with the default configuration.
pub fn from_db_one(
    attribute: &Attribute,
    property: Option<&PropertyMetadata>,
) -> Result<Value, MappingError> {
    DEFAULT_MAPPER.from_db_one(attribute, property)
}
