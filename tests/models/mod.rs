#![allow(dead_code)]

use std::sync::Arc;

use chrono::{DateTime, Utc};
use dynamap::errors::MappingError;
use dynamap::mapper::attribute::Attribute;
use dynamap::mapper::custom::{CustomCodec, EnumNameCodec};
use dynamap::mapper::value::{EnumMember, Fields, FromValue, ToValue, Value};
use dynamap::metadata::{Model, ModelMetadata, ModelRef, PropertyMetadata, RuntimeType};
use dynamap::nested_model;
use once_cell::sync::Lazy;

fn build(builder: dynamap::metadata::ModelMetadataBuilder) -> ModelMetadata {
    builder.build().expect("test model metadata is valid")
}

fn set_of_strings(items: &[String]) -> Value {
    Value::set(items.iter().map(String::as_str))
}

// ─────────────────────────────────────────────────────────────────────────────
// Organization and its nested models
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct Gift {
    pub description: String,
}

impl Model for Gift {
    fn metadata() -> &'static ModelMetadata {
        static METADATA: Lazy<ModelMetadata> = Lazy::new(|| {
            build(
                ModelMetadata::builder("Gift")
                    .property(PropertyMetadata::new("description").partition_key()),
            )
        });
        &METADATA
    }

    fn to_fields(&self) -> Fields {
        Fields::new().with("description", &self.description)
    }

    fn from_fields(mut fields: Fields) -> Result<Self, MappingError> {
        Ok(Self {
            description: fields.require("description")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Birthday {
    pub date: DateTime<Utc>,
    pub presents: Vec<Gift>,
}

impl Birthday {
    pub fn new(date: DateTime<Utc>, presents: &[&str]) -> Self {
        Self {
            date,
            presents: presents
                .iter()
                .map(|description| Gift {
                    description: (*description).to_string(),
                })
                .collect(),
        }
    }
}

impl Model for Birthday {
    fn metadata() -> &'static ModelMetadata {
        static METADATA: Lazy<ModelMetadata> = Lazy::new(|| {
            build(
                ModelMetadata::builder("Birthday")
                    .property(
                        PropertyMetadata::new("date")
                            .of_type(RuntimeType::Date)
                            .partition_key(),
                    )
                    .property(PropertyMetadata::new("presents").list_of(ModelRef::of::<Gift>())),
            )
        });
        &METADATA
    }

    fn to_fields(&self) -> Fields {
        Fields::new()
            .with("date", &self.date)
            .with("presents", &self.presents)
    }

    fn from_fields(mut fields: Fields) -> Result<Self, MappingError> {
        Ok(Self {
            date: fields.require("date")?,
            presents: fields.take_or_default("presents")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Employee {
    pub name: String,
    pub age: u32,
    pub created_at: DateTime<Utc>,
    pub sorted_set: Vec<String>,
}

impl Employee {
    pub fn new(name: &str, age: u32, created_at: DateTime<Utc>) -> Self {
        Self {
            name: name.to_string(),
            age,
            created_at,
            sorted_set: Vec::new(),
        }
    }
}

impl Model for Employee {
    fn metadata() -> &'static ModelMetadata {
        static METADATA: Lazy<ModelMetadata> = Lazy::new(|| {
            build(
                ModelMetadata::builder("Employee")
                    .property(PropertyMetadata::new("name").partition_key())
                    .property(PropertyMetadata::new("age"))
                    .property(PropertyMetadata::new("createdAt").of_type(RuntimeType::Date))
                    .property(PropertyMetadata::new("sortedSet").of_type(RuntimeType::Set)),
            )
        });
        &METADATA
    }

    fn to_fields(&self) -> Fields {
        Fields::new()
            .with("name", &self.name)
            .with("age", &self.age)
            .with("createdAt", &self.created_at)
            .with("sortedSet", &set_of_strings(&self.sorted_set))
    }

    fn from_fields(mut fields: Fields) -> Result<Self, MappingError> {
        Ok(Self {
            name: fields.require("name")?,
            age: fields.take_or_default("age")?,
            created_at: fields.require("createdAt")?,
            sorted_set: fields.take_or_default("sortedSet")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrganizationEvent {
    pub name: String,
    pub participant_count: u32,
}

impl Model for OrganizationEvent {
    fn metadata() -> &'static ModelMetadata {
        static METADATA: Lazy<ModelMetadata> = Lazy::new(|| {
            build(
                ModelMetadata::builder("OrganizationEvent")
                    .property(PropertyMetadata::new("name").partition_key())
                    .property(PropertyMetadata::new("participantCount")),
            )
        });
        &METADATA
    }

    fn to_fields(&self) -> Fields {
        Fields::new()
            .with("name", &self.name)
            .with("participantCount", &self.participant_count)
    }

    fn from_fields(mut fields: Fields) -> Result<Self, MappingError> {
        Ok(Self {
            name: fields.require("name")?,
            participant_count: fields.take_or_default("participantCount")?,
        })
    }
}

nested_model!(Gift, Birthday, Employee, OrganizationEvent);

#[derive(Debug, Clone, PartialEq)]
pub struct Organization {
    pub id: String,
    pub name: String,
    pub created_at_date: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
    pub active: bool,
    pub count: i64,
    /// Stored as a string set.
    pub domains: Vec<String>,
    pub random_details: Vec<Value>,
    pub employees: Vec<Employee>,
    /// Stored as a string set.
    pub cities: Vec<String>,
    /// Set of structured values, so stored as a list of maps.
    pub birthdays: Vec<Birthday>,
    pub awards: Vec<String>,
    pub events: Vec<OrganizationEvent>,
    pub empty_set: Vec<String>,
    pub transient: Option<String>,
}

impl Model for Organization {
    fn metadata() -> &'static ModelMetadata {
        static METADATA: Lazy<ModelMetadata> = Lazy::new(|| {
            build(
                ModelMetadata::builder("Organization")
                    .table_name("organizations")
                    .property(PropertyMetadata::new("id").partition_key())
                    .property(PropertyMetadata::new("name"))
                    .property(PropertyMetadata::new("createdAtDate").of_type(RuntimeType::Date))
                    .property(PropertyMetadata::new("lastUpdated").of_type(RuntimeType::Date))
                    .property(PropertyMetadata::new("active"))
                    .property(PropertyMetadata::new("count"))
                    .property(PropertyMetadata::new("domains").of_type(RuntimeType::Set))
                    .property(PropertyMetadata::new("randomDetails").of_type(RuntimeType::List))
                    .property(PropertyMetadata::new("employees").list_of(ModelRef::of::<Employee>()))
                    .property(PropertyMetadata::new("cities").of_type(RuntimeType::Set))
                    .property(PropertyMetadata::new("birthdays").set_of(ModelRef::of::<Birthday>()))
                    .property(PropertyMetadata::new("awards").of_type(RuntimeType::List))
                    .property(
                        PropertyMetadata::new("events").set_of(ModelRef::of::<OrganizationEvent>()),
                    )
                    .property(PropertyMetadata::new("emptySet").of_type(RuntimeType::Set))
                    .property(PropertyMetadata::new("transient").transient()),
            )
        });
        &METADATA
    }

    fn to_fields(&self) -> Fields {
        Fields::new()
            .with("id", &self.id)
            .with("name", &self.name)
            .with("createdAtDate", &self.created_at_date)
            .with("lastUpdated", &self.last_updated)
            .with("active", &self.active)
            .with("count", &self.count)
            .with("domains", &set_of_strings(&self.domains))
            .with("randomDetails", &self.random_details)
            .with("employees", &self.employees)
            .with("cities", &set_of_strings(&self.cities))
            .with(
                "birthdays",
                &Value::set(self.birthdays.iter().map(ToValue::to_value)),
            )
            .with("awards", &self.awards)
            .with(
                "events",
                &Value::set(self.events.iter().map(ToValue::to_value)),
            )
            .with("emptySet", &set_of_strings(&self.empty_set))
            .with_opt("transient", self.transient.as_ref())
    }

    fn from_fields(mut fields: Fields) -> Result<Self, MappingError> {
        Ok(Self {
            id: fields.require("id")?,
            name: fields.take_or_default("name")?,
            created_at_date: fields.require("createdAtDate")?,
            last_updated: fields.require("lastUpdated")?,
            active: fields.take_or_default("active")?,
            count: fields.take_or_default("count")?,
            domains: fields.take_or_default("domains")?,
            random_details: fields.take_or_default("randomDetails")?,
            employees: fields.take_or_default("employees")?,
            cities: fields.take_or_default("cities")?,
            birthdays: fields.take_or_default("birthdays")?,
            awards: fields.take_or_default("awards")?,
            events: fields.take_or_default("events")?,
            empty_set: fields.take_or_default("emptySet")?,
            transient: fields.take("transient")?,
        })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Product with nested plain values
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Default)]
pub struct NestedObject {
    pub id: Option<String>,
    pub sorted_set: Vec<String>,
}

impl Model for NestedObject {
    fn metadata() -> &'static ModelMetadata {
        static METADATA: Lazy<ModelMetadata> = Lazy::new(|| {
            build(
                ModelMetadata::builder("NestedObject")
                    .property(PropertyMetadata::new("id").partition_key())
                    .property(PropertyMetadata::new("sortedSet").of_type(RuntimeType::List)),
            )
        });
        &METADATA
    }

    fn to_fields(&self) -> Fields {
        Fields::new()
            .with_opt("id", self.id.as_ref())
            .with("sortedSet", &self.sorted_set)
    }

    fn from_fields(mut fields: Fields) -> Result<Self, MappingError> {
        Ok(Self {
            id: fields.take("id")?,
            sorted_set: fields.take_or_default("sortedSet")?,
        })
    }
}

nested_model!(NestedObject);

#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: Option<String>,
    pub nested_value: NestedObject,
    pub list: Vec<CollectionEntry>,
}

/// Plain structured value without metadata of its own.
pub type CollectionEntry = std::collections::BTreeMap<String, Vec<String>>;

impl Default for Product {
    fn default() -> Self {
        let mut entry = CollectionEntry::new();
        entry.insert("collection".to_string(), vec!["1".to_string(), "2".to_string()]);
        Self {
            id: None,
            nested_value: NestedObject {
                id: None,
                sorted_set: vec!["firstValue".to_string(), "secondValue".to_string()],
            },
            list: vec![entry],
        }
    }
}

impl Model for Product {
    fn metadata() -> &'static ModelMetadata {
        static METADATA: Lazy<ModelMetadata> = Lazy::new(|| {
            build(
                ModelMetadata::builder("Product")
                    .property(PropertyMetadata::new("id").partition_key().auto_generate())
                    .property(
                        PropertyMetadata::new("nestedValue")
                            .of_type(RuntimeType::Model(ModelRef::of::<NestedObject>())),
                    )
                    .property(PropertyMetadata::new("list").of_type(RuntimeType::List)),
            )
        });
        &METADATA
    }

    fn to_fields(&self) -> Fields {
        Fields::new()
            .with_opt("id", self.id.as_ref())
            .with("nestedValue", &self.nested_value)
            .with("list", &self.list)
    }

    fn from_fields(mut fields: Fields) -> Result<Self, MappingError> {
        Ok(Self {
            id: fields.take("id")?,
            nested_value: fields.take_or_default("nestedValue")?,
            list: fields.take_or_default("list")?,
        })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Keys
// ─────────────────────────────────────────────────────────────────────────────

/// Compound id stored as a single string, e.g. `00202017`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Id {
    pub counter: u32,
    pub year: u32,
}

impl Id {
    pub const fn new(counter: u32, year: u32) -> Self {
        Self { counter, year }
    }
}

impl ToValue for Id {
    fn to_value(&self) -> Value {
        Value::map([("counter", self.counter), ("year", self.year)])
    }
}

impl FromValue for Id {
    fn from_value(value: Value) -> Result<Self, MappingError> {
        let mut fields = Fields::try_from(value)?;
        Ok(Self {
            counter: fields.require("counter")?,
            year: fields.require("year")?,
        })
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct IdCodec;

impl CustomCodec for IdCodec {
    fn to_db(&self, value: &Value) -> Result<Attribute, MappingError> {
        let id = Id::from_value(value.clone())?;
        Ok(Attribute::S(format!("{:04}{}", id.counter, id.year)))
    }

    fn from_db(&self, attribute: &Attribute) -> Result<Value, MappingError> {
        let text = attribute
            .as_s()
            .ok_or_else(|| MappingError::InvalidValue(format!("{attribute:?} is not an id")))?;
        let parse = |part: &str| {
            part.parse::<u32>()
                .map_err(|_| MappingError::InvalidValue(format!("'{text}' is not an id")))
        };
        let (counter, year) = text.split_at(text.len().min(4));
        Ok(Id::new(parse(counter)?, parse(year)?).to_value())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModelWithCustomMapper {
    pub id: Id,
}

impl Model for ModelWithCustomMapper {
    fn metadata() -> &'static ModelMetadata {
        static METADATA: Lazy<ModelMetadata> = Lazy::new(|| {
            build(
                ModelMetadata::builder("ModelWithCustomMapper").property(
                    PropertyMetadata::new("id")
                        .partition_key()
                        .codec(Arc::new(IdCodec)),
                ),
            )
        });
        &METADATA
    }

    fn to_fields(&self) -> Fields {
        Fields::new().with("id", &self.id)
    }

    fn from_fields(mut fields: Fields) -> Result<Self, MappingError> {
        Ok(Self {
            id: fields.require("id")?,
        })
    }
}

/// Same compound key, but without a codec for it.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelWithoutCustomMapper {
    pub id: Id,
    pub value: String,
}

impl Model for ModelWithoutCustomMapper {
    fn metadata() -> &'static ModelMetadata {
        static METADATA: Lazy<ModelMetadata> = Lazy::new(|| {
            build(
                ModelMetadata::builder("ModelWithoutCustomMapper")
                    .property(PropertyMetadata::new("id").partition_key())
                    .property(PropertyMetadata::new("value")),
            )
        });
        &METADATA
    }

    fn to_fields(&self) -> Fields {
        Fields::new().with("id", &self.id).with("value", &self.value)
    }

    fn from_fields(mut fields: Fields) -> Result<Self, MappingError> {
        Ok(Self {
            id: fields.require("id")?,
            value: fields.take_or_default("value")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ModelWithAutogeneratedId {
    pub id: Option<String>,
    pub name: Option<String>,
}

impl Model for ModelWithAutogeneratedId {
    fn metadata() -> &'static ModelMetadata {
        static METADATA: Lazy<ModelMetadata> = Lazy::new(|| {
            build(
                ModelMetadata::builder("ModelWithAutogeneratedId")
                    .property(PropertyMetadata::new("id").partition_key().auto_generate())
                    .property(PropertyMetadata::new("name")),
            )
        });
        &METADATA
    }

    fn to_fields(&self) -> Fields {
        Fields::new()
            .with_opt("id", self.id.as_ref())
            .with_opt("name", self.name.as_ref())
    }

    fn from_fields(mut fields: Fields) -> Result<Self, MappingError> {
        Ok(Self {
            id: fields.take("id")?,
            name: fields.take("name")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModelWithDateAsHashKey {
    pub start_date: DateTime<Utc>,
}

impl Model for ModelWithDateAsHashKey {
    fn metadata() -> &'static ModelMetadata {
        static METADATA: Lazy<ModelMetadata> = Lazy::new(|| {
            build(
                ModelMetadata::builder("ModelWithDateAsHashKey").property(
                    PropertyMetadata::new("startDate")
                        .of_type(RuntimeType::Date)
                        .partition_key(),
                ),
            )
        });
        &METADATA
    }

    fn to_fields(&self) -> Fields {
        Fields::new().with("startDate", &self.start_date)
    }

    fn from_fields(mut fields: Fields) -> Result<Self, MappingError> {
        Ok(Self {
            start_date: fields.require("startDate")?,
        })
    }
}

/// Item with a composite primary key.
#[derive(Debug, Clone, PartialEq)]
pub struct SimpleWithCompositeKey {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub age: u32,
}

impl Model for SimpleWithCompositeKey {
    fn metadata() -> &'static ModelMetadata {
        static METADATA: Lazy<ModelMetadata> = Lazy::new(|| {
            build(
                ModelMetadata::builder("SimpleWithCompositeKey")
                    .table_name("simple_composite")
                    .property(PropertyMetadata::new("id").db_name("pk").partition_key())
                    .property(
                        PropertyMetadata::new("createdAt")
                            .db_name("sk")
                            .of_type(RuntimeType::Date)
                            .sort_key(),
                    )
                    .property(PropertyMetadata::new("age")),
            )
        });
        &METADATA
    }

    fn to_fields(&self) -> Fields {
        Fields::new()
            .with("id", &self.id)
            .with("createdAt", &self.created_at)
            .with("age", &self.age)
    }

    fn from_fields(mut fields: Fields) -> Result<Self, MappingError> {
        Ok(Self {
            id: fields.require("id")?,
            created_at: fields.require("createdAt")?,
            age: fields.take_or_default("age")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimpleWithId {
    pub id: String,
    pub age: u32,
}

impl Model for SimpleWithId {
    fn metadata() -> &'static ModelMetadata {
        static METADATA: Lazy<ModelMetadata> = Lazy::new(|| {
            build(
                ModelMetadata::builder("SimpleWithId")
                    .property(PropertyMetadata::new("id").partition_key())
                    .property(PropertyMetadata::new("age")),
            )
        });
        &METADATA
    }

    fn to_fields(&self) -> Fields {
        Fields::new().with("id", &self.id).with("age", &self.age)
    }

    fn from_fields(mut fields: Fields) -> Result<Self, MappingError> {
        Ok(Self {
            id: fields.require("id")?,
            age: fields.take_or_default("age")?,
        })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Enums
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Type {
    #[default]
    FirstType,
    SecondType,
}

impl Type {
    pub const fn name(self) -> &'static str {
        match self {
            Type::FirstType => "FirstType",
            Type::SecondType => "SecondType",
        }
    }
}

impl ToValue for Type {
    fn to_value(&self) -> Value {
        Value::Enum(EnumMember::new(self.name(), *self as i64))
    }
}

impl FromValue for Type {
    fn from_value(value: Value) -> Result<Self, MappingError> {
        match value {
            Value::String(name) => match name.as_str() {
                "FirstType" => Ok(Type::FirstType),
                "SecondType" => Ok(Type::SecondType),
                _ => Err(MappingError::InvalidValue(format!("unknown Type '{name}'"))),
            },
            other => match i64::from_value(other)? {
                0 => Ok(Type::FirstType),
                1 => Ok(Type::SecondType),
                n => Err(MappingError::InvalidValue(format!("unknown Type {n}"))),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModelWithEnum {
    pub id: String,
    pub kind: Type,
    pub kind_by_name: Type,
}

impl Model for ModelWithEnum {
    fn metadata() -> &'static ModelMetadata {
        static METADATA: Lazy<ModelMetadata> = Lazy::new(|| {
            build(
                ModelMetadata::builder("ModelWithEnum")
                    .property(PropertyMetadata::new("id").partition_key())
                    .property(PropertyMetadata::new("type").of_type(RuntimeType::Enum))
                    .property(
                        PropertyMetadata::new("typeName")
                            .of_type(RuntimeType::Enum)
                            .codec(Arc::new(EnumNameCodec)),
                    ),
            )
        });
        &METADATA
    }

    fn to_fields(&self) -> Fields {
        Fields::new()
            .with("id", &self.id)
            .with("type", &self.kind)
            .with("typeName", &self.kind_by_name)
    }

    fn from_fields(mut fields: Fields) -> Result<Self, MappingError> {
        Ok(Self {
            id: fields.require("id")?,
            kind: fields.take_or_default("type")?,
            kind_by_name: fields.take_or_default("typeName")?,
        })
    }
}
