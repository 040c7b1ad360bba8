//! Date representation strategies.
//!
//! The strategy is chosen once in [`MapperConfig`](crate::core::config::MapperConfig)
//! and injected into the mapper.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, Utc};

use super::attribute::{Attribute, AttributeType};
use crate::errors::MappingError;

pub trait DateCodec: Send + Sync + fmt::Debug {
    /// Tag the encoded dates carry.
    fn attribute_type(&self) -> AttributeType;

    fn to_db(&self, date: &DateTime<Utc>) -> Attribute;

    fn from_db(&self, attribute: &Attribute) -> Result<DateTime<Utc>, MappingError>;
}

/// ISO-8601 text with millisecond precision, e.g. `2017-03-21T00:00:00.000Z`.
#[derive(Debug, Clone, Copy, Default)]
pub struct IsoDateCodec;

impl DateCodec for IsoDateCodec {
    fn attribute_type(&self) -> AttributeType {
        AttributeType::S
    }

    fn to_db(&self, date: &DateTime<Utc>) -> Attribute {
        Attribute::S(date.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    fn from_db(&self, attribute: &Attribute) -> Result<DateTime<Utc>, MappingError> {
        let text = attribute.as_s().ok_or_else(|| attribute.unexpected("S"))?;
        DateTime::parse_from_rfc3339(text)
            .map(|d| d.with_timezone(&Utc))
            .map_err(|_| MappingError::InvalidDate(text.to_string()))
    }
}

/// Whole seconds since the unix epoch as a number, the form the store's TTL
/// feature expects.
#[derive(Debug, Clone, Copy, Default)]
pub struct EpochDateCodec;

impl DateCodec for EpochDateCodec {
    fn attribute_type(&self) -> AttributeType {
        AttributeType::N
    }

    fn to_db(&self, date: &DateTime<Utc>) -> Attribute {
        Attribute::N(date.timestamp().to_string())
    }

    fn from_db(&self, attribute: &Attribute) -> Result<DateTime<Utc>, MappingError> {
        let text = attribute.as_n().ok_or_else(|| attribute.unexpected("N"))?;
        text.parse::<i64>()
            .ok()
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
            .ok_or_else(|| MappingError::InvalidDate(text.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateFormat {
    #[default]
    Iso8601,
    EpochSeconds,
}

impl DateFormat {
    #[must_use]
    pub fn codec(self) -> Arc<dyn DateCodec> {
        match self {
            DateFormat::Iso8601 => Arc::new(IsoDateCodec),
            DateFormat::EpochSeconds => Arc::new(EpochDateCodec),
        }
    }
}

impl FromStr for DateFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "iso8601" | "iso" | "default" => Ok(DateFormat::Iso8601),
            "epoch" | "epoch_seconds" => Ok(DateFormat::EpochSeconds),
            other => Err(format!("unknown date format '{other}'")),
        }
    }
}
