//! Sequences and unique collections.

use super::Mapper;
use super::attribute::{Attribute, AttributeType};
use super::value::{Number, Value};
use crate::errors::MappingError;
use crate::metadata::{PropertyMetadata, RuntimeType};

/// Encode set members into a typed set. The caller has classified the set as
/// `tag`, so every member is of the matching scalar kind. Members that encode
/// to the same text or bytes collapse into the first one.
pub(crate) fn set_to_db(items: &[Value], tag: AttributeType) -> Result<Attribute, MappingError> {
    let mismatch = |v: &Value| MappingError::UnexpectedAttribute {
        expected: tag.to_string(),
        found: v.kind().to_string(),
    };

    Ok(match tag {
        AttributeType::Ss => Attribute::Ss(unique(items.iter().map(|v| {
            v.as_str().map(str::to_string).ok_or_else(|| mismatch(v))
        }))?),
        AttributeType::Ns => Attribute::Ns(unique(items.iter().map(|v| match v {
            Value::Number(n) => n.to_db_string(),
            Value::Enum(member) => Ok(member.value.to_string()),
            other => Err(mismatch(other)),
        }))?),
        AttributeType::Bs => Attribute::Bs(unique(items.iter().map(|v| match v {
            Value::Binary(bytes) => Ok(bytes.clone()),
            other => Err(mismatch(other)),
        }))?),
        other => {
            return Err(MappingError::UnexpectedAttribute {
                expected: "SS, NS or BS".to_string(),
                found: other.to_string(),
            });
        }
    })
}

// The store rejects sets with repeated members.
fn unique<T: PartialEq>(
    encoded: impl Iterator<Item = Result<T, MappingError>>,
) -> Result<Vec<T>, MappingError> {
    let mut out = Vec::new();
    for member in encoded {
        let member = member?;
        if !out.contains(&member) {
            out.push(member);
        }
    }
    Ok(out)
}

/// Encode items one by one into a list. An empty sequence stays an empty list.
pub(crate) fn list_to_db(
    mapper: &Mapper,
    items: &[Value],
    property: Option<&PropertyMetadata>,
) -> Result<Attribute, MappingError> {
    let item_model = property.and_then(PropertyMetadata::item_model);

    items
        .iter()
        .map(|item| match (item, item_model) {
            (Value::Map(fields), Some(model)) => {
                super::object::to_db(mapper, fields, Some(model)).map(Attribute::M)
            }
            _ => mapper.to_db_one(item, None),
        })
        .collect::<Result<Vec<_>, _>>()
        .map(Attribute::L)
}

/// Decode a typed set. Produces a set unless the property declares a list.
pub(crate) fn set_from_db(
    attribute: &Attribute,
    property: Option<&PropertyMetadata>,
) -> Result<Value, MappingError> {
    let items: Vec<Value> = match attribute {
        Attribute::Ss(items) => items.iter().cloned().map(Value::String).collect(),
        Attribute::Ns(items) => items
            .iter()
            .map(|n| Number::parse(n).map(Value::Number))
            .collect::<Result<_, _>>()?,
        Attribute::Bs(items) => items.iter().cloned().map(Value::Binary).collect(),
        other => return Err(other.unexpected("SS, NS or BS")),
    };

    if matches!(
        property.and_then(PropertyMetadata::declared_type),
        Some(RuntimeType::List)
    ) {
        Ok(Value::List(items))
    } else {
        Ok(Value::set(items))
    }
}

/// Decode a list. Produces a list unless the property declares a set, in
/// which case later duplicates collapse.
pub(crate) fn list_from_db(
    mapper: &Mapper,
    items: &[Attribute],
    property: Option<&PropertyMetadata>,
) -> Result<Value, MappingError> {
    let item_model = property.and_then(PropertyMetadata::item_model);

    let values = items
        .iter()
        .map(|item| match (item, item_model) {
            (Attribute::M(map), Some(model)) => {
                super::object::from_db(mapper, map, Some(model)).map(Value::Map)
            }
            _ => mapper.from_db_one(item, None),
        })
        .collect::<Result<Vec<_>, _>>()?;

    if matches!(
        property.and_then(PropertyMetadata::declared_type),
        Some(RuntimeType::Set)
    ) {
        Ok(Value::set(values))
    } else {
        Ok(Value::List(values))
    }
}
