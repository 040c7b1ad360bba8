//! Single-tag values: strings, numbers, booleans, binaries, null and dates.

use super::attribute::Attribute;
use super::date::DateCodec;
use super::value::{Number, Value};
use crate::errors::MappingError;
use crate::metadata::{PropertyMetadata, RuntimeType};

pub(crate) fn to_db(value: &Value, dates: &dyn DateCodec) -> Result<Attribute, MappingError> {
    Ok(match value {
        Value::String(s) if s.is_empty() => Attribute::Null,
        Value::String(s) => Attribute::S(s.clone()),
        Value::Number(n) => Attribute::N(n.to_db_string()?),
        // Without a custom codec an enum member is just its number.
        Value::Enum(member) => Attribute::N(member.value.to_string()),
        Value::Bool(b) => Attribute::Bool(*b),
        Value::Date(date) => dates.to_db(date),
        Value::Binary(bytes) => Attribute::B(bytes.clone()),
        Value::Null => Attribute::Null,
        other => {
            return Err(MappingError::UnexpectedAttribute {
                expected: "scalar".to_string(),
                found: other.kind().to_string(),
            });
        }
    })
}

pub(crate) fn from_db(
    attribute: &Attribute,
    property: Option<&PropertyMetadata>,
    dates: &dyn DateCodec,
) -> Result<Value, MappingError> {
    let declared_date = matches!(
        property.and_then(PropertyMetadata::declared_type),
        Some(RuntimeType::Date)
    );

    match attribute {
        Attribute::S(_) | Attribute::N(_) if declared_date => dates.from_db(attribute).map(Value::Date),
        Attribute::S(s) => Ok(Value::String(s.clone())),
        Attribute::N(n) => Number::parse(n).map(Value::Number),
        Attribute::B(bytes) => Ok(Value::Binary(bytes.clone())),
        Attribute::Bool(b) => Ok(Value::Bool(*b)),
        Attribute::Null => Ok(Value::Null),
        other => Err(other.unexpected("scalar")),
    }
}
