//! Decide which wire tag a value maps to.

use super::attribute::AttributeType;
use super::value::Value;
use crate::metadata::PropertyMetadata;

/// Wire tag for `value`, or `None` when the property's custom codec takes over.
///
/// `date_type` is the tag the configured date strategy produces.
#[must_use]
pub fn classify(
    value: &Value,
    property: Option<&PropertyMetadata>,
    date_type: AttributeType,
) -> Option<AttributeType> {
    if property.is_some_and(|p| p.custom_codec().is_some()) {
        return None;
    }

    Some(match value {
        Value::Null => AttributeType::Null,
        // Empty strings are not valid scalar values in the store.
        Value::String(s) if s.is_empty() => AttributeType::Null,
        Value::String(_) => AttributeType::S,
        Value::Number(_) | Value::Enum(_) => AttributeType::N,
        Value::Bool(_) => AttributeType::Bool,
        Value::Date(_) => date_type,
        Value::Binary(_) => AttributeType::B,
        Value::Set(items) => classify_set(items),
        // Sequences never collapse into a set, whatever type is declared.
        Value::List(_) => AttributeType::L,
        Value::Map(_) => AttributeType::M,
    })
}

/// Sets become a typed set only when every member is of the same scalar kind.
/// Anything else falls back to a list whose members are mapped one by one.
fn classify_set(items: &[Value]) -> AttributeType {
    if items.is_empty() {
        // The store cannot persist empty sets.
        return AttributeType::Null;
    }
    if items
        .iter()
        .all(|v| matches!(v, Value::String(s) if !s.is_empty()))
    {
        AttributeType::Ss
    } else if items
        .iter()
        .all(|v| matches!(v, Value::Number(_) | Value::Enum(_)))
    {
        AttributeType::Ns
    } else if items.iter().all(|v| matches!(v, Value::Binary(_))) {
        AttributeType::Bs
    } else {
        AttributeType::L
    }
}
