//! Structured values and model instances.
//!
//! With metadata, properties are mapped in declaration order using their wire
//! names and type hints, transient ones are skipped, and undefined ones are
//! left out of the attribute map. Entries without metadata are mapped by their
//! own inferred type.

use std::collections::BTreeMap;

use tracing::trace;
use uuid::Uuid;

use super::Mapper;
use super::attribute::{Attribute, Attributes};
use super::custom;
use super::value::Value;
use crate::errors::MappingError;
use crate::metadata::ModelMetadata;

pub(crate) fn to_db(
    mapper: &Mapper,
    fields: &BTreeMap<String, Value>,
    metadata: Option<&ModelMetadata>,
) -> Result<Attributes, MappingError> {
    let mut attributes = Attributes::new();

    let Some(metadata) = metadata else {
        for (name, value) in fields {
            attributes.insert(name.clone(), mapper.to_db_one(value, None)?);
        }
        return Ok(attributes);
    };

    for property in metadata.mapped_properties() {
        let attribute = match fields.get(property.name()) {
            Some(value) => {
                if property.key_role().is_some() {
                    custom::ensure_key_compatible(value, property)?;
                }
                mapper.to_db_one(value, Some(property))?
            }
            None if property.is_auto_generated() => Attribute::S(Uuid::new_v4().to_string()),
            None => continue,
        };
        attributes.insert(property.wire_name().to_string(), attribute);
    }

    // An undeclared field may neither shadow a property nor take its wire name.
    for (name, value) in fields {
        if metadata.property(name).is_none() && metadata.property_by_wire_name(name).is_none() {
            trace!("Mapping undeclared property '{}' of {}", name, metadata.name());
            attributes.insert(name.clone(), mapper.to_db_one(value, None)?);
        }
    }

    Ok(attributes)
}

pub(crate) fn from_db(
    mapper: &Mapper,
    attributes: &Attributes,
    metadata: Option<&ModelMetadata>,
) -> Result<BTreeMap<String, Value>, MappingError> {
    let mut fields = BTreeMap::new();

    let Some(metadata) = metadata else {
        for (name, attribute) in attributes {
            fields.insert(name.clone(), mapper.from_db_one(attribute, None)?);
        }
        return Ok(fields);
    };

    for property in metadata.mapped_properties() {
        if let Some(attribute) = attributes.get(property.wire_name()) {
            fields.insert(
                property.name().to_string(),
                mapper.from_db_one(attribute, Some(property))?,
            );
        }
    }

    for (name, attribute) in attributes {
        if metadata.property_by_wire_name(name).is_none() && metadata.property(name).is_none() {
            fields.insert(name.clone(), mapper.from_db_one(attribute, None)?);
        }
    }

    Ok(fields)
}
