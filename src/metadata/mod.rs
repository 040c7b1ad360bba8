//! Model and property metadata.
//!
//! Metadata is declared explicitly through builders instead of annotations:
//! each model type builds its [`ModelMetadata`] once and hands out a
//! `&'static` reference from [`Model::metadata`].

pub mod model;
pub mod property;

pub use model::{Model, ModelMetadata, ModelMetadataBuilder, metadata_for};
pub use property::{KeyRole, ModelRef, PropertyMetadata, RuntimeType, TypeInfo};
