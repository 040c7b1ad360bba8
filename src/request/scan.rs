use std::marker::PhantomData;

use aws_sdk_dynamodb::Client;
use tracing::debug;

use super::{Page, map_items, map_last_key};
use crate::errors::DynamoError;
use crate::mapper::Mapper;
use crate::mapper::attribute::{Attributes, to_item};
use crate::metadata::Model;

pub struct ScanRequest<T> {
    client: Client,
    mapper: Mapper,
    table_name: String,
    limit: Option<i32>,
    consistent_read: bool,
    exclusive_start_key: Option<Attributes>,
    _model: PhantomData<fn() -> T>,
}

impl<T: Model> ScanRequest<T> {
    pub fn new(client: Client, mapper: Mapper, table_name: impl Into<String>) -> Self {
        Self {
            client,
            mapper,
            table_name: table_name.into(),
            limit: None,
            consistent_read: false,
            exclusive_start_key: None,
            _model: PhantomData,
        }
    }

    #[must_use]
    pub const fn limit(mut self, limit: i32) -> Self {
        self.limit = Some(limit);
        self
    }

    #[must_use]
    pub const fn consistent_read(mut self, consistent_read: bool) -> Self {
        self.consistent_read = consistent_read;
        self
    }

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
    pub const fn get_limit(&self) -> Option<i32> {
        self.limit
    }

    /// # Errors
    ///
    /// Returns an error if the request fails or an item cannot be mapped.
    pub async fn exec(self) -> Result<Page<T>, DynamoError> {
        debug!("scan request on {}: limit={:?}", self.table_name, self.limit);

        let output = self
            .client
            .scan()
            .table_name(&self.table_name)
            .set_limit(self.limit)
            .consistent_read(self.consistent_read)
            .set_exclusive_start_key(self.exclusive_start_key.map(to_item))
            .send()
            .await?;

        debug!("scan response: count={}", output.count);

        Ok(Page {
            items: map_items(&self.mapper, output.items)?,
            last_evaluated_key: map_last_key(output.last_evaluated_key)?,
        })
    }
}
