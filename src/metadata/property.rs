use std::fmt;
use std::sync::Arc;

use super::model::ModelMetadata;
use crate::mapper::custom::CustomCodec;

/// Accessor for the metadata of a nested model type.
#[derive(Clone, Copy)]
pub struct ModelRef(fn() -> &'static ModelMetadata);

impl ModelRef {
    #[must_use]
    pub const fn new(metadata: fn() -> &'static ModelMetadata) -> Self {
        Self(metadata)
    }

    #[must_use]
    pub fn of<T: super::Model>() -> Self {
        Self(T::metadata)
    }

    #[must_use]
    pub fn get(self) -> &'static ModelMetadata {
        (self.0)()
    }
}

impl fmt::Debug for ModelRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ModelRef").field(&self.get().name()).finish()
    }
}

/// Declared type of a property.
#[derive(Debug, Clone, Copy)]
pub enum RuntimeType {
    String,
    Number,
    Boolean,
    Binary,
    Date,
    Enum,
    /// Ordered sequence.
    List,
    /// Unique collection.
    Set,
    Map,
    /// Nested model with its own metadata.
    Model(ModelRef),
}

#[derive(Debug, Clone, Copy)]
pub struct TypeInfo {
    pub runtime_type: RuntimeType,
    /// Whether the type was declared explicitly rather than left to inference.
    pub is_custom: bool,
    /// Model of the items of a list or set.
    pub generic: Option<ModelRef>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyRole {
    Partition,
    Sort,
}

/// Compiled description of one mapped property.
#[derive(Clone)]
pub struct PropertyMetadata {
    name: String,
    db_name: Option<String>,
    type_info: Option<TypeInfo>,
    codec: Option<Arc<dyn CustomCodec>>,
    transient: bool,
    key: Option<KeyRole>,
    auto_generate: bool,
}

impl PropertyMetadata {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            db_name: None,
            type_info: None,
            codec: None,
            transient: false,
            key: None,
            auto_generate: false,
        }
    }

    /// Store the property under a different attribute name.
    #[must_use]
    pub fn db_name(mut self, db_name: impl Into<String>) -> Self {
        self.db_name = Some(db_name.into());
        self
    }

    #[must_use]
    pub fn of_type(mut self, runtime_type: RuntimeType) -> Self {
        let generic = self.type_info.and_then(|t| t.generic);
        self.type_info = Some(TypeInfo {
            runtime_type,
            is_custom: true,
            generic,
        });
        self
    }

    /// Declare a list whose items are instances of a nested model.
    #[must_use]
    pub fn list_of(self, item: ModelRef) -> Self {
        self.with_generic(RuntimeType::List, item)
    }

    /// Declare a set whose items are instances of a nested model.
    #[must_use]
    pub fn set_of(self, item: ModelRef) -> Self {
        self.with_generic(RuntimeType::Set, item)
    }

    fn with_generic(mut self, runtime_type: RuntimeType, item: ModelRef) -> Self {
        self.type_info = Some(TypeInfo {
            runtime_type,
            is_custom: true,
            generic: Some(item),
        });
        self
    }

    #[must_use]
    pub fn codec(mut self, codec: Arc<dyn CustomCodec>) -> Self {
        self.codec = Some(codec);
        self
    }

    /// Exclude the property from mapping in both directions.
    #[must_use]
    pub const fn transient(mut self) -> Self {
        self.transient = true;
        self
    }

    #[must_use]
    pub const fn partition_key(mut self) -> Self {
        self.key = Some(KeyRole::Partition);
        self
    }

    #[must_use]
    pub const fn sort_key(mut self) -> Self {
        self.key = Some(KeyRole::Sort);
        self
    }

    /// Fill the property with a fresh UUID when it is undefined at write time.
    #[must_use]
    pub const fn auto_generate(mut self) -> Self {
        self.auto_generate = true;
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Attribute name on the wire.
    #[must_use]
    pub fn wire_name(&self) -> &str {
        self.db_name.as_deref().unwrap_or(&self.name)
    }

    #[must_use]
    pub const fn type_info(&self) -> Option<&TypeInfo> {
        self.type_info.as_ref()
    }

    #[must_use]
    pub fn custom_codec(&self) -> Option<&dyn CustomCodec> {
        self.codec.as_deref()
    }

    #[must_use]
    pub const fn is_transient(&self) -> bool {
        self.transient
    }

    #[must_use]
    pub const fn key_role(&self) -> Option<KeyRole> {
        self.key
    }

    #[must_use]
    pub const fn is_auto_generated(&self) -> bool {
        self.auto_generate
    }

    /// Declared runtime type, only when it was declared explicitly.
    pub(crate) fn declared_type(&self) -> Option<RuntimeType> {
        self.type_info
            .filter(|t| t.is_custom)
            .map(|t| t.runtime_type)
    }

    pub(crate) fn item_model(&self) -> Option<&'static ModelMetadata> {
        self.type_info.and_then(|t| t.generic).map(ModelRef::get)
    }

    pub(crate) fn nested_model(&self) -> Option<&'static ModelMetadata> {
        match self.declared_type() {
            Some(RuntimeType::Model(model)) => Some(model.get()),
            _ => None,
        }
    }
}

impl fmt::Debug for PropertyMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyMetadata")
            .field("name", &self.name)
            .field("db_name", &self.db_name)
            .field("type_info", &self.type_info)
            .field("codec", &self.codec.as_ref().map(|c| c.name()))
            .field("transient", &self.transient)
            .field("key", &self.key)
            .field("auto_generate", &self.auto_generate)
            .finish()
    }
}
