//! dynamap - an object mapper for DynamoDB.
//!
//! Converts application models to and from DynamoDB's native attribute
//! representation and builds typed get/put/delete/query/scan requests on top
//! of `aws-sdk-dynamodb`.
//!
//! # Architecture
//!
//! - `metadata`: per-model property metadata, declared once through builders
//! - `mapper`: the bidirectional value mapper (classifier, scalar, collection,
//!   object and custom codecs behind the `Mapper` façade)
//! - `request` / `store`: typed requests with key validation
//!
//! # Example
//!
//! ```
//! use dynamap::mapper::value::Fields;
//! use dynamap::metadata::{Model, ModelMetadata, PropertyMetadata};
//! use dynamap::errors::MappingError;
//! use once_cell::sync::Lazy;
//!
//! struct Person {
//!     id: String,
//!     age: u32,
//! }
//!
//! impl Model for Person {
//!     fn metadata() -> &'static ModelMetadata {
//!         static METADATA: Lazy<ModelMetadata> = Lazy::new(|| {
//!             ModelMetadata::builder("Person")
//!                 .property(PropertyMetadata::new("id").partition_key())
//!                 .property(PropertyMetadata::new("age"))
//!                 .build()
//!                 .expect("valid metadata")
//!         });
//!         &METADATA
//!     }
//!
//!     fn to_fields(&self) -> Fields {
//!         Fields::new().with("id", &self.id).with("age", &self.age)
//!     }
//!
//!     fn from_fields(mut fields: Fields) -> Result<Self, MappingError> {
//!         Ok(Self {
//!             id: fields.require("id")?,
//!             age: fields.take_or_default("age")?,
//!         })
//!     }
//! }
//!
//! let attributes = dynamap::mapper::to_db(&Person { id: "p1".into(), age: 42 }).unwrap();
//! assert_eq!(attributes["age"].as_n(), Some("42"));
//!
//! let person: Person = dynamap::mapper::from_db(&attributes).unwrap();
//! assert_eq!(person.id, "p1");
//! ```

// Module declarations
pub mod core;
pub mod errors;
pub mod mapper;
pub mod metadata;
pub mod request;
pub mod store;

pub use errors::{DynamoError, MappingError};
pub use mapper::Mapper;
pub use metadata::Model;

/// Configure structured logging with JSON format.
///
/// This function sets up tracing-subscriber with a JSON formatter suitable for
/// `CloudWatch` Logs integration. Call it once at startup; later calls are
/// ignored.
///
/// # Example
///
/// ```
/// dynamap::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::prelude::*;
    let fmt_layer = tracing_subscriber::fmt::layer().json().with_target(true);

    let _ = tracing_subscriber::registry().with(fmt_layer).try_init();
}
