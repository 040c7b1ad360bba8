//! Property-level codecs that replace the default mapping entirely.

use tracing::warn;

use super::attribute::Attribute;
use super::value::Value;
use crate::errors::MappingError;
use crate::metadata::PropertyMetadata;

/// Full codec for one property. When a property carries one, the default
/// classification is never consulted for it.
pub trait CustomCodec: Send + Sync {
    fn to_db(&self, value: &Value) -> Result<Attribute, MappingError>;

    fn from_db(&self, attribute: &Attribute) -> Result<Value, MappingError>;

    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Maps enum members through their name (`S`) instead of their numeric value.
///
/// Without this codec an enum member is stored as its number, like any other
/// number. Both behaviours are supported on purpose.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnumNameCodec;

impl CustomCodec for EnumNameCodec {
    fn to_db(&self, value: &Value) -> Result<Attribute, MappingError> {
        match value {
            Value::Enum(member) => Ok(Attribute::S(member.name.clone())),
            Value::String(name) if !name.is_empty() => Ok(Attribute::S(name.clone())),
            Value::Null => Ok(Attribute::Null),
            other => Err(MappingError::UnexpectedAttribute {
                expected: "enum".to_string(),
                found: other.kind().to_string(),
            }),
        }
    }

    fn from_db(&self, attribute: &Attribute) -> Result<Value, MappingError> {
        match attribute {
            Attribute::S(name) => Ok(Value::String(name.clone())),
            Attribute::Null => Ok(Value::Null),
            other => Err(other.unexpected("S")),
        }
    }
}

/// Key attributes must be scalars the store can index. Anything else needs a
/// custom codec that produces one.
pub(crate) fn ensure_key_compatible(
    value: &Value,
    property: &PropertyMetadata,
) -> Result<(), MappingError> {
    if property.custom_codec().is_some() {
        return Ok(());
    }
    match value {
        Value::Null
        | Value::String(_)
        | Value::Number(_)
        | Value::Binary(_)
        | Value::Date(_)
        | Value::Enum(_) => Ok(()),
        other => {
            warn!(
                "Key property '{}' holds a {} but declares no custom codec",
                property.name(),
                other.kind()
            );
            Err(MappingError::MissingCustomCodec {
                property: property.name().to_string(),
            })
        }
    }
}
