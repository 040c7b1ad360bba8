use std::marker::PhantomData;

use aws_sdk_dynamodb::Client;
use tracing::debug;

use crate::errors::DynamoError;
use crate::mapper::Mapper;
use crate::mapper::attribute::{Attributes, to_item};
use crate::metadata::Model;

pub struct PutRequest<T> {
    client: Client,
    table_name: String,
    item: Attributes,
    condition_expression: Option<String>,
    partition_key_name: String,
    _model: PhantomData<fn() -> T>,
}

impl<T: Model> PutRequest<T> {
    /// # Errors
    ///
    /// Returns an error if the item cannot be mapped or lacks a key attribute.
    pub fn new(
        client: Client,
        mapper: &Mapper,
        table_name: impl Into<String>,
        item: &T,
    ) -> Result<Self, DynamoError> {
        let metadata = T::metadata();
        let item = mapper.to_db(item)?;
        mapper.ensure_key_present(&item, metadata)?;

        Ok(Self {
            client,
            table_name: table_name.into(),
            item,
            condition_expression: None,
            partition_key_name: metadata.partition_key().wire_name().to_string(),
            _model: PhantomData,
        })
    }

    /// Only write when no item with the same key exists yet.
    #[must_use]
    pub fn if_not_exists(mut self) -> Self {
        self.condition_expression = Some("attribute_not_exists(#pk)".to_string());
        self
    }

    #[must_use]
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    #[must_use]
    pub const fn item(&self) -> &Attributes {
        &self.item
    }

    #[must_use]
    pub fn condition_expression(&self) -> Option<&str> {
        self.condition_expression.as_deref()
    }

    /// # Errors
    ///
    /// Returns an error if the request fails, including a failed
    /// `if_not_exists` condition.
    pub async fn exec(self) -> Result<(), DynamoError> {
        debug!("put_item request on {}: item={:?}", self.table_name, self.item);

        let mut request = self
            .client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(to_item(self.item)));

        if let Some(condition) = self.condition_expression {
            request = request
                .condition_expression(condition)
                .expression_attribute_names("#pk", self.partition_key_name);
        }

        request.send().await?;
        Ok(())
    }
}
