//! Wire attributes exchanged with DynamoDB.
//!
//! An [`Attribute`] holds exactly one populated variant. Its serde form is the
//! store's JSON encoding (`{"S": "foo"}`, `{"NULL": true}`, base64 for binaries),
//! and it converts losslessly to and from the SDK's `AttributeValue`.

use std::collections::HashMap;
use std::fmt;

use aws_sdk_dynamodb::primitives::Blob;
use aws_sdk_dynamodb::types::AttributeValue;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::{Deserialize, Serialize};

use crate::errors::MappingError;

/// Attribute map of a single item, keyed by attribute name.
pub type Attributes = HashMap<String, Attribute>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "AttributeJson", into = "AttributeJson")]
pub enum Attribute {
    S(String),
    /// Decimal text form of a number.
    N(String),
    B(Vec<u8>),
    Bool(bool),
    Null,
    Ss(Vec<String>),
    Ns(Vec<String>),
    Bs(Vec<Vec<u8>>),
    L(Vec<Attribute>),
    M(Attributes),
}

/// Tag of an [`Attribute`], named the way the store names it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeType {
    S,
    N,
    B,
    Bool,
    Null,
    Ss,
    Ns,
    Bs,
    L,
    M,
}

impl AttributeType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            AttributeType::S => "S",
            AttributeType::N => "N",
            AttributeType::B => "B",
            AttributeType::Bool => "BOOL",
            AttributeType::Null => "NULL",
            AttributeType::Ss => "SS",
            AttributeType::Ns => "NS",
            AttributeType::Bs => "BS",
            AttributeType::L => "L",
            AttributeType::M => "M",
        }
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Attribute {
    #[must_use]
    pub fn attribute_type(&self) -> AttributeType {
        match self {
            Attribute::S(_) => AttributeType::S,
            Attribute::N(_) => AttributeType::N,
            Attribute::B(_) => AttributeType::B,
            Attribute::Bool(_) => AttributeType::Bool,
            Attribute::Null => AttributeType::Null,
            Attribute::Ss(_) => AttributeType::Ss,
            Attribute::Ns(_) => AttributeType::Ns,
            Attribute::Bs(_) => AttributeType::Bs,
            Attribute::L(_) => AttributeType::L,
            Attribute::M(_) => AttributeType::M,
        }
    }

    #[must_use]
    pub fn s(value: impl Into<String>) -> Self {
        Attribute::S(value.into())
    }

    #[must_use]
    pub fn n(value: impl Into<String>) -> Self {
        Attribute::N(value.into())
    }

    #[must_use]
    pub fn as_s(&self) -> Option<&str> {
        match self {
            Attribute::S(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_n(&self) -> Option<&str> {
        match self {
            Attribute::N(n) => Some(n),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Attribute::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_l(&self) -> Option<&[Attribute]> {
        match self {
            Attribute::L(items) => Some(items),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_m(&self) -> Option<&Attributes> {
        match self {
            Attribute::M(map) => Some(map),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_ss(&self) -> Option<&[String]> {
        match self {
            Attribute::Ss(items) => Some(items),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_ns(&self) -> Option<&[String]> {
        match self {
            Attribute::Ns(items) => Some(items),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Attribute::Null)
    }

    /// Build the error reported when this attribute is not the expected tag.
    pub(crate) fn unexpected(&self, expected: &str) -> MappingError {
        MappingError::UnexpectedAttribute {
            expected: expected.to_string(),
            found: self.attribute_type().to_string(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// DynamoDB JSON
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Serialize, Deserialize)]
enum AttributeJson {
    S(String),
    N(String),
    B(String),
    #[serde(rename = "BOOL")]
    Bool(bool),
    #[serde(rename = "NULL")]
    Null(bool),
    #[serde(rename = "SS")]
    Ss(Vec<String>),
    #[serde(rename = "NS")]
    Ns(Vec<String>),
    #[serde(rename = "BS")]
    Bs(Vec<String>),
    L(Vec<Attribute>),
    M(HashMap<String, Attribute>),
}

fn decode_base64(encoded: &str) -> Result<Vec<u8>, MappingError> {
    BASE64
        .decode(encoded)
        .map_err(|e| MappingError::InvalidValue(format!("binary attribute is not base64: {e}")))
}

impl TryFrom<AttributeJson> for Attribute {
    type Error = MappingError;

    fn try_from(json: AttributeJson) -> Result<Self, Self::Error> {
        Ok(match json {
            AttributeJson::S(s) => Attribute::S(s),
            AttributeJson::N(n) => Attribute::N(n),
            AttributeJson::B(b) => Attribute::B(decode_base64(&b)?),
            AttributeJson::Bool(b) => Attribute::Bool(b),
            AttributeJson::Null(true) => Attribute::Null,
            AttributeJson::Null(false) => {
                return Err(MappingError::InvalidValue(
                    "NULL attribute must be true".to_string(),
                ));
            }
            AttributeJson::Ss(items) => Attribute::Ss(items),
            AttributeJson::Ns(items) => Attribute::Ns(items),
            AttributeJson::Bs(items) => Attribute::Bs(
                items
                    .iter()
                    .map(|b| decode_base64(b))
                    .collect::<Result<_, _>>()?,
            ),
            AttributeJson::L(items) => Attribute::L(items),
            AttributeJson::M(map) => Attribute::M(map),
        })
    }
}

impl From<Attribute> for AttributeJson {
    fn from(attribute: Attribute) -> Self {
        match attribute {
            Attribute::S(s) => AttributeJson::S(s),
            Attribute::N(n) => AttributeJson::N(n),
            Attribute::B(b) => AttributeJson::B(BASE64.encode(b)),
            Attribute::Bool(b) => AttributeJson::Bool(b),
            Attribute::Null => AttributeJson::Null(true),
            Attribute::Ss(items) => AttributeJson::Ss(items),
            Attribute::Ns(items) => AttributeJson::Ns(items),
            Attribute::Bs(items) => AttributeJson::Bs(items.iter().map(|b| BASE64.encode(b)).collect()),
            Attribute::L(items) => AttributeJson::L(items),
            Attribute::M(map) => AttributeJson::M(map),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// AWS SDK conversion
// ─────────────────────────────────────────────────────────────────────────────

impl From<Attribute> for AttributeValue {
    fn from(attribute: Attribute) -> Self {
        match attribute {
            Attribute::S(s) => AttributeValue::S(s),
            Attribute::N(n) => AttributeValue::N(n),
            Attribute::B(b) => AttributeValue::B(Blob::new(b)),
            Attribute::Bool(b) => AttributeValue::Bool(b),
            Attribute::Null => AttributeValue::Null(true),
            Attribute::Ss(items) => AttributeValue::Ss(items),
            Attribute::Ns(items) => AttributeValue::Ns(items),
            Attribute::Bs(items) => AttributeValue::Bs(items.into_iter().map(Blob::new).collect()),
            Attribute::L(items) => AttributeValue::L(items.into_iter().map(Into::into).collect()),
            Attribute::M(map) => AttributeValue::M(to_item(map)),
        }
    }
}

impl TryFrom<AttributeValue> for Attribute {
    type Error = MappingError;

    fn try_from(value: AttributeValue) -> Result<Self, Self::Error> {
        Ok(match value {
            AttributeValue::S(s) => Attribute::S(s),
            AttributeValue::N(n) => Attribute::N(n),
            AttributeValue::B(b) => Attribute::B(b.into_inner()),
            AttributeValue::Bool(b) => Attribute::Bool(b),
            AttributeValue::Null(_) => Attribute::Null,
            AttributeValue::Ss(items) => Attribute::Ss(items),
            AttributeValue::Ns(items) => Attribute::Ns(items),
            AttributeValue::Bs(items) => Attribute::Bs(items.into_iter().map(Blob::into_inner).collect()),
            AttributeValue::L(items) => Attribute::L(
                items
                    .into_iter()
                    .map(Attribute::try_from)
                    .collect::<Result<_, _>>()?,
            ),
            AttributeValue::M(map) => Attribute::M(from_item(map)?),
            other => return Err(MappingError::UnsupportedAttribute(format!("{other:?}"))),
        })
    }
}

/// Convert an attribute map into the SDK item representation.
#[must_use]
pub fn to_item(attributes: Attributes) -> HashMap<String, AttributeValue> {
    attributes
        .into_iter()
        .map(|(name, attribute)| (name, attribute.into()))
        .collect()
}

/// Convert an SDK item into an attribute map.
pub fn from_item(item: HashMap<String, AttributeValue>) -> Result<Attributes, MappingError> {
    item.into_iter()
        .map(|(name, value)| Ok((name, Attribute::try_from(value)?)))
        .collect()
}
