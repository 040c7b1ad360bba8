//! Application-side values.
//!
//! Model types describe themselves as [`Value`]s, a closed set of semantic
//! categories the codecs know how to classify, so no runtime type inspection is
//! needed when mapping. [`ToValue`] and [`FromValue`] bridge concrete Rust
//! types to this model.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::fmt;
use std::hash::Hash;

use chrono::{DateTime, Utc};

use crate::errors::MappingError;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    String(String),
    Number(Number),
    Bool(bool),
    Date(DateTime<Utc>),
    Binary(Vec<u8>),
    /// Member of an enumeration, carrying both its name and numeric value.
    Enum(EnumMember),
    /// Ordered sequence.
    List(Vec<Value>),
    /// Unique collection in insertion order.
    Set(Vec<Value>),
    /// Structured value keyed by property name.
    Map(BTreeMap<String, Value>),
}

impl Value {
    /// Build a set value, dropping later duplicates.
    pub fn set<I, V>(items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let mut unique: Vec<Value> = Vec::new();
        for item in items {
            let item = item.into();
            if !unique.contains(&item) {
                unique.push(item);
            }
        }
        Value::Set(unique)
    }

    pub fn list<I, V>(items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Value::List(items.into_iter().map(Into::into).collect())
    }

    pub fn map<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Value::Map(entries.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }

    /// Human readable category, used in error messages.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::String(_) => "string",
            Value::Number(_) => "number",
            Value::Bool(_) => "boolean",
            Value::Date(_) => "date",
            Value::Binary(_) => "binary",
            Value::Enum(_) => "enum",
            Value::List(_) => "list",
            Value::Set(_) => "set",
            Value::Map(_) => "map",
        }
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_map(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    fn unexpected(&self, expected: &str) -> MappingError {
        MappingError::UnexpectedAttribute {
            expected: expected.to_string(),
            found: self.kind().to_string(),
        }
    }
}

/// Numeric value. Integers keep full precision; floats must be finite to be
/// stored.
#[derive(Debug, Clone, Copy)]
pub enum Number {
    Int(i64),
    UInt(u64),
    /// Integer beyond the 64-bit range. The store allows 38 significant
    /// digits, which `i128` covers.
    BigInt(i128),
    Float(f64),
}

impl Number {
    /// Parse the store's decimal text form.
    pub fn parse(text: &str) -> Result<Self, MappingError> {
        if let Ok(i) = text.parse::<i64>() {
            return Ok(Number::Int(i));
        }
        if let Ok(u) = text.parse::<u64>() {
            return Ok(Number::UInt(u));
        }
        if let Ok(i) = text.parse::<i128>() {
            return Ok(Number::BigInt(i));
        }
        match text.parse::<f64>() {
            Ok(f) if f.is_finite() && !text.is_empty() && is_decimal(text) => Ok(Number::Float(f)),
            _ => Err(MappingError::InvalidNumber(text.to_string())),
        }
    }

    /// Decimal text form, as stored in an `N` attribute.
    pub fn to_db_string(self) -> Result<String, MappingError> {
        match self {
            Number::Int(i) => Ok(i.to_string()),
            Number::UInt(u) => Ok(u.to_string()),
            Number::BigInt(i) => Ok(i.to_string()),
            Number::Float(f) if f.is_finite() => Ok(f.to_string()),
            Number::Float(f) => Err(MappingError::InvalidNumber(f.to_string())),
        }
    }

    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub const fn as_f64(self) -> f64 {
        match self {
            Number::Int(i) => i as f64,
            Number::UInt(u) => u as f64,
            Number::BigInt(i) => i as f64,
            Number::Float(f) => f,
        }
    }

    #[must_use]
    pub fn as_i64(self) -> Option<i64> {
        match self {
            Number::Int(i) => Some(i),
            Number::UInt(u) => i64::try_from(u).ok(),
            Number::BigInt(i) => i64::try_from(i).ok(),
            // `i64::MAX as f64` rounds up to 2^63, which is already out of range.
            #[allow(clippy::cast_possible_truncation)]
            Number::Float(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 => {
                Some(f as i64)
            }
            Number::Float(_) => None,
        }
    }

    /// Exact integer value, `None` for floats.
    const fn integral(self) -> Option<i128> {
        match self {
            Number::Int(i) => Some(i as i128),
            Number::UInt(u) => Some(u as i128),
            Number::BigInt(i) => Some(i),
            Number::Float(_) => None,
        }
    }
}

// `f64::from_str` also accepts "inf", "NaN" and friends; the store does not.
fn is_decimal(text: &str) -> bool {
    text.chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '-' | '+' | '.' | 'e' | 'E'))
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        match (self.integral(), other.integral()) {
            (Some(a), Some(b)) => a == b,
            _ => self.as_f64() == other.as_f64(),
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(i) => write!(f, "{i}"),
            Number::UInt(u) => write!(f, "{u}"),
            Number::BigInt(i) => write!(f, "{i}"),
            Number::Float(x) => write!(f, "{x}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumMember {
    pub name: String,
    pub value: i64,
}

impl EnumMember {
    pub fn new(name: impl Into<String>, value: i64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Conversions into Value
// ─────────────────────────────────────────────────────────────────────────────

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        Value::Number(n)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(date: DateTime<Utc>) -> Self {
        Value::Date(date)
    }
}

impl From<EnumMember> for Value {
    fn from(member: EnumMember) -> Self {
        Value::Enum(member)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

macro_rules! int_value {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(n: $t) -> Self {
                    Value::Number(Number::Int(i64::from(n)))
                }
            }
        )*
    };
}

int_value!(i8, i16, i32, i64, u8, u16, u32);

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Value::Number(i64::try_from(n).map_or(Number::UInt(n), Number::Int))
    }
}

impl From<i128> for Value {
    fn from(n: i128) -> Self {
        let number = i64::try_from(n)
            .map(Number::Int)
            .or_else(|_| u64::try_from(n).map(Number::UInt))
            .unwrap_or(Number::BigInt(n));
        Value::Number(number)
    }
}

impl From<f32> for Value {
    fn from(n: f32) -> Self {
        Value::Number(Number::Float(f64::from(n)))
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(Number::Float(n))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// ToValue / FromValue
// ─────────────────────────────────────────────────────────────────────────────

/// Describe a Rust value as a mapper [`Value`].
pub trait ToValue {
    fn to_value(&self) -> Value;
}

/// Rebuild a Rust value from a decoded mapper [`Value`].
pub trait FromValue: Sized {
    fn from_value(value: Value) -> Result<Self, MappingError>;
}

impl ToValue for Value {
    fn to_value(&self) -> Value {
        self.clone()
    }
}

impl FromValue for Value {
    fn from_value(value: Value) -> Result<Self, MappingError> {
        Ok(value)
    }
}

impl ToValue for String {
    fn to_value(&self) -> Value {
        Value::String(self.clone())
    }
}

impl ToValue for str {
    fn to_value(&self) -> Value {
        Value::String(self.to_string())
    }
}

impl FromValue for String {
    fn from_value(value: Value) -> Result<Self, MappingError> {
        match value {
            Value::String(s) => Ok(s),
            Value::Enum(member) => Ok(member.name),
            other => Err(other.unexpected("string")),
        }
    }
}

impl ToValue for bool {
    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }
}

impl FromValue for bool {
    fn from_value(value: Value) -> Result<Self, MappingError> {
        match value {
            Value::Bool(b) => Ok(b),
            other => Err(other.unexpected("boolean")),
        }
    }
}

fn number_of(value: Value) -> Result<Number, MappingError> {
    match value {
        Value::Number(n) => Ok(n),
        Value::Enum(member) => Ok(Number::Int(member.value)),
        other => Err(other.unexpected("number")),
    }
}

macro_rules! int_from_value {
    ($($t:ty),*) => {
        $(
            impl ToValue for $t {
                fn to_value(&self) -> Value {
                    Value::from(*self)
                }
            }

            impl FromValue for $t {
                fn from_value(value: Value) -> Result<Self, MappingError> {
                    let number = number_of(value)?;
                    let out_of_range =
                        || MappingError::InvalidValue(format!("{number} does not fit {}", stringify!($t)));
                    number
                        .integral()
                        .or_else(|| number.as_i64().map(i128::from))
                        .and_then(|i| <$t>::try_from(i).ok())
                        .ok_or_else(out_of_range)
                }
            }
        )*
    };
}

int_from_value!(i8, i16, i32, i64, i128, u8, u16, u32, u64);

impl ToValue for f64 {
    fn to_value(&self) -> Value {
        Value::from(*self)
    }
}

impl FromValue for f64 {
    fn from_value(value: Value) -> Result<Self, MappingError> {
        Ok(number_of(value)?.as_f64())
    }
}

impl ToValue for f32 {
    fn to_value(&self) -> Value {
        Value::from(*self)
    }
}

impl FromValue for f32 {
    #[allow(clippy::cast_possible_truncation)]
    fn from_value(value: Value) -> Result<Self, MappingError> {
        Ok(number_of(value)?.as_f64() as f32)
    }
}

impl ToValue for DateTime<Utc> {
    fn to_value(&self) -> Value {
        Value::Date(*self)
    }
}

impl FromValue for DateTime<Utc> {
    fn from_value(value: Value) -> Result<Self, MappingError> {
        match value {
            Value::Date(date) => Ok(date),
            // Dates nested in values without declared metadata come back as text.
            Value::String(s) => DateTime::parse_from_rfc3339(&s)
                .map(|d| d.with_timezone(&Utc))
                .map_err(|_| MappingError::InvalidDate(s)),
            other => Err(other.unexpected("date")),
        }
    }
}

impl<T: ToValue> ToValue for Option<T> {
    fn to_value(&self) -> Value {
        self.as_ref().map_or(Value::Null, ToValue::to_value)
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: Value) -> Result<Self, MappingError> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}

impl<T: ToValue> ToValue for Box<T> {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}

impl<T: ToValue> ToValue for Vec<T> {
    fn to_value(&self) -> Value {
        Value::List(self.iter().map(ToValue::to_value).collect())
    }
}

fn items_of(value: Value) -> Result<Vec<Value>, MappingError> {
    match value {
        Value::List(items) | Value::Set(items) => Ok(items),
        // Empty sets are stored as NULL.
        Value::Null => Ok(Vec::new()),
        other => Err(other.unexpected("list or set")),
    }
}

impl<T: FromValue> FromValue for Vec<T> {
    fn from_value(value: Value) -> Result<Self, MappingError> {
        items_of(value)?.into_iter().map(T::from_value).collect()
    }
}

impl<T: ToValue> ToValue for BTreeSet<T> {
    fn to_value(&self) -> Value {
        Value::Set(self.iter().map(ToValue::to_value).collect())
    }
}

impl<T: FromValue + Ord> FromValue for BTreeSet<T> {
    fn from_value(value: Value) -> Result<Self, MappingError> {
        items_of(value)?.into_iter().map(T::from_value).collect()
    }
}

impl<T: ToValue, S> ToValue for HashSet<T, S> {
    fn to_value(&self) -> Value {
        Value::Set(self.iter().map(ToValue::to_value).collect())
    }
}

impl<T: FromValue + Eq + Hash> FromValue for HashSet<T> {
    fn from_value(value: Value) -> Result<Self, MappingError> {
        items_of(value)?.into_iter().map(T::from_value).collect()
    }
}

impl<T: ToValue> ToValue for BTreeMap<String, T> {
    fn to_value(&self) -> Value {
        Value::Map(
            self.iter()
                .map(|(k, v)| (k.clone(), v.to_value()))
                .collect(),
        )
    }
}

impl<T: FromValue> FromValue for BTreeMap<String, T> {
    fn from_value(value: Value) -> Result<Self, MappingError> {
        match value {
            Value::Map(map) => map
                .into_iter()
                .map(|(k, v)| Ok((k, T::from_value(v)?)))
                .collect(),
            other => Err(other.unexpected("map")),
        }
    }
}

impl<T: ToValue, S> ToValue for HashMap<String, T, S> {
    fn to_value(&self) -> Value {
        Value::Map(
            self.iter()
                .map(|(k, v)| (k.clone(), v.to_value()))
                .collect(),
        )
    }
}

impl<T: FromValue> FromValue for HashMap<String, T> {
    fn from_value(value: Value) -> Result<Self, MappingError> {
        BTreeMap::<String, T>::from_value(value).map(|m| m.into_iter().collect())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Fields
// ─────────────────────────────────────────────────────────────────────────────

/// Property values of one model instance, keyed by property name.
///
/// A property that is not present is "undefined" and never reaches the wire;
/// an explicit [`Value::Null`] is stored as `NULL`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fields(BTreeMap<String, Value>);

impl Fields {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a property.
    #[must_use]
    pub fn with<T: ToValue + ?Sized>(mut self, name: &str, value: &T) -> Self {
        self.0.insert(name.to_string(), value.to_value());
        self
    }

    /// Set a property only when it has a value; `None` leaves it undefined.
    #[must_use]
    pub fn with_opt<T: ToValue>(mut self, name: &str, value: Option<&T>) -> Self {
        if let Some(value) = value {
            self.0.insert(name.to_string(), value.to_value());
        }
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: Value) {
        self.0.insert(name.into(), value);
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.0.remove(name)
    }

    /// Take a property, `None` if it is undefined.
    pub fn take<T: FromValue>(&mut self, name: &str) -> Result<Option<T>, MappingError> {
        self.0.remove(name).map(T::from_value).transpose()
    }

    /// Take a property that must be defined.
    pub fn require<T: FromValue>(&mut self, name: &str) -> Result<T, MappingError> {
        self.take(name)?.ok_or_else(|| MappingError::MissingProperty {
            property: name.to_string(),
        })
    }

    /// Take a property, falling back to the type's default when undefined.
    pub fn take_or_default<T: FromValue + Default>(&mut self, name: &str) -> Result<T, MappingError> {
        Ok(self.take(name)?.unwrap_or_default())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) const fn as_map(&self) -> &BTreeMap<String, Value> {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> BTreeMap<String, Value> {
        self.0
    }
}

impl From<BTreeMap<String, Value>> for Fields {
    fn from(map: BTreeMap<String, Value>) -> Self {
        Self(map)
    }
}

impl From<Fields> for Value {
    fn from(fields: Fields) -> Self {
        Value::Map(fields.0)
    }
}

impl TryFrom<Value> for Fields {
    type Error = MappingError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Map(map) => Ok(Self(map)),
            other => Err(other.unexpected("map")),
        }
    }
}

/// Implement [`ToValue`] and [`FromValue`] for a [`Model`](crate::metadata::Model)
/// so it can be nested inside another model's properties.
#[macro_export]
macro_rules! nested_model {
    ($($model:ty),+ $(,)?) => {
        $(
            impl $crate::mapper::value::ToValue for $model {
                fn to_value(&self) -> $crate::mapper::value::Value {
                    <$model as $crate::metadata::Model>::to_fields(self).into()
                }
            }

            impl $crate::mapper::value::FromValue for $model {
                fn from_value(
                    value: $crate::mapper::value::Value,
                ) -> ::std::result::Result<Self, $crate::errors::MappingError> {
                    let fields = $crate::mapper::value::Fields::try_from(value)?;
                    <$model as $crate::metadata::Model>::from_fields(fields)
                }
            }
        )+
    };
}
