use std::marker::PhantomData;

use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::types::{ReturnConsumedCapacity, ReturnItemCollectionMetrics, ReturnValue};
use tracing::debug;

use crate::errors::DynamoError;
use crate::mapper::Mapper;
use crate::mapper::attribute::{Attributes, from_item, to_item};
use crate::mapper::value::Value;
use crate::metadata::Model;

pub struct DeleteRequest<T> {
    client: Client,
    mapper: Mapper,
    table_name: String,
    key: Attributes,
    return_old_item: bool,
    return_consumed_capacity: Option<ReturnConsumedCapacity>,
    return_item_collection_metrics: Option<ReturnItemCollectionMetrics>,
    _model: PhantomData<fn() -> T>,
}

impl<T: Model> DeleteRequest<T> {
    /// # Errors
    ///
    /// Returns an error if the key values are missing or cannot be mapped.
    pub fn new(
        client: Client,
        mapper: Mapper,
        table_name: impl Into<String>,
        partition_key: &Value,
        sort_key: Option<&Value>,
    ) -> Result<Self, DynamoError> {
        let key = mapper.to_key::<T>(partition_key, sort_key)?;
        Ok(Self {
            client,
            mapper,
            table_name: table_name.into(),
            key,
            return_old_item: false,
            return_consumed_capacity: None,
            return_item_collection_metrics: None,
            _model: PhantomData,
        })
    }

    /// Ask the store for the deleted item. Delete only knows `NONE` and
    /// `ALL_OLD` return values.
    #[must_use]
    pub const fn return_old_item(mut self) -> Self {
        self.return_old_item = true;
        self
    }

    #[must_use]
    pub fn return_consumed_capacity(mut self, level: ReturnConsumedCapacity) -> Self {
        self.return_consumed_capacity = Some(level);
        self
    }

    /// Only meaningful for tables with local secondary indexes.
    #[must_use]
    pub fn return_item_collection_metrics(mut self, metrics: ReturnItemCollectionMetrics) -> Self {
        self.return_item_collection_metrics = Some(metrics);
        self
    }

    #[must_use]
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    #[must_use]
    pub const fn key(&self) -> &Attributes {
        &self.key
    }

    #[must_use]
    pub const fn returns_old_item(&self) -> bool {
        self.return_old_item
    }

    #[must_use]
    pub const fn consumed_capacity_level(&self) -> Option<&ReturnConsumedCapacity> {
        self.return_consumed_capacity.as_ref()
    }

    #[must_use]
    pub const fn item_collection_metrics_level(&self) -> Option<&ReturnItemCollectionMetrics> {
        self.return_item_collection_metrics.as_ref()
    }

    /// Delete the item. Yields the old item when requested and it existed.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the old item cannot be mapped.
    pub async fn exec(self) -> Result<Option<T>, DynamoError> {
        debug!("delete_item request on {}: key={:?}", self.table_name, self.key);

        let return_values = if self.return_old_item {
            ReturnValue::AllOld
        } else {
            ReturnValue::None
        };

        let output = self
            .client
            .delete_item()
            .table_name(&self.table_name)
            .set_key(Some(to_item(self.key)))
            .return_values(return_values)
            .set_return_consumed_capacity(self.return_consumed_capacity)
            .set_return_item_collection_metrics(self.return_item_collection_metrics)
            .send()
            .await?;

        if let Some(capacity) = &output.consumed_capacity {
            debug!("delete_item on {} consumed {:?}", self.table_name, capacity.capacity_units());
        }

        match output.attributes {
            Some(old) if !old.is_empty() => Ok(Some(self.mapper.from_db(&from_item(old)?)?)),
            _ => Ok(None),
        }
    }
}
