use std::marker::PhantomData;

use aws_sdk_dynamodb::Client;
use tracing::debug;

use super::{Page, map_items, map_last_key};
use crate::errors::DynamoError;
use crate::mapper::Mapper;
use crate::mapper::attribute::{Attribute, Attributes, to_item};
use crate::mapper::value::Value;
use crate::metadata::Model;

const KEY_CONDITION: &str = "#pk = :pk";

/// Query the items sharing one partition key.
pub struct QueryRequest<T> {
    client: Client,
    mapper: Mapper,
    table_name: String,
    partition_key_name: String,
    partition_key: Attribute,
    limit: Option<i32>,
    ascending: Option<bool>,
    consistent_read: bool,
    exclusive_start_key: Option<Attributes>,
    _model: PhantomData<fn() -> T>,
}

impl<T: Model> QueryRequest<T> {
    /// # Errors
    ///
    /// Returns an error if the partition key value is missing or cannot be mapped.
    pub fn new(
        client: Client,
        mapper: Mapper,
        table_name: impl Into<String>,
        partition_key: &Value,
    ) -> Result<Self, DynamoError> {
        let property = T::metadata().partition_key();
        let partition_key = mapper.to_key_attribute(partition_key, property)?;

        Ok(Self {
            client,
            mapper,
            table_name: table_name.into(),
            partition_key_name: property.wire_name().to_string(),
            partition_key,
            limit: None,
            ascending: None,
            consistent_read: false,
            exclusive_start_key: None,
            _model: PhantomData,
        })
    }

    #[must_use]
    pub const fn limit(mut self, limit: i32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Order by sort key, lowest first.
    #[must_use]
    pub const fn ascending(mut self) -> Self {
        self.ascending = Some(true);
        self
    }

    #[must_use]
    pub const fn descending(mut self) -> Self {
        self.ascending = Some(false);
        self
    }

    #[must_use]
    pub const fn consistent_read(mut self, consistent_read: bool) -> Self {
        self.consistent_read = consistent_read;
        self
    }

    /// Continue after the `last_evaluated_key` of a previous page.
    #[must_use]
    pub fn exclusive_start_key(mut self, key: Attributes) -> Self {
        self.exclusive_start_key = Some(key);
        self
    }

    #[must_use]
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    #[must_use]
    pub fn key_condition_expression(&self) -> &str {
        KEY_CONDITION
    }

    #[must_use]
    pub const fn partition_key(&self) -> &Attribute {
        &self.partition_key
    }

    #[must_use]
    pub const fn get_limit(&self) -> Option<i32> {
        self.limit
    }

    /// `None` leaves the order to the store, which defaults to ascending.
    #[must_use]
    pub const fn scan_index_forward(&self) -> Option<bool> {
        self.ascending
    }

    /// # Errors
    ///
    /// Returns an error if the request fails or an item cannot be mapped.
    pub async fn exec(self) -> Result<Page<T>, DynamoError> {
        debug!(
            "query request on {}: {}={:?} limit={:?}",
            self.table_name, self.partition_key_name, self.partition_key, self.limit
        );

        let output = self
            .client
            .query()
            .table_name(&self.table_name)
            .key_condition_expression(KEY_CONDITION)
            .expression_attribute_names("#pk", self.partition_key_name)
            .expression_attribute_values(":pk", self.partition_key.into())
            .set_limit(self.limit)
            .set_scan_index_forward(self.ascending)
            .consistent_read(self.consistent_read)
            .set_exclusive_start_key(self.exclusive_start_key.map(to_item))
            .send()
            .await?;

        debug!("query response: count={}", output.count);

        Ok(Page {
            items: map_items(&self.mapper, output.items)?,
            last_evaluated_key: map_last_key(output.last_evaluated_key)?,
        })
    }
}
