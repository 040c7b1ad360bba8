use std::marker::PhantomData;

use aws_sdk_dynamodb::Client;
use tracing::debug;

use crate::errors::DynamoError;
use crate::mapper::Mapper;
use crate::mapper::attribute::{Attributes, from_item, to_item};
use crate::mapper::value::Value;
use crate::metadata::Model;

pub struct GetRequest<T> {
    client: Client,
    mapper: Mapper,
    table_name: String,
    key: Attributes,
    consistent_read: bool,
    _model: PhantomData<fn() -> T>,
}

impl<T: Model> GetRequest<T> {
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
            consistent_read: false,
            _model: PhantomData,
        })
    }

    #[must_use]
    pub const fn consistent_read(mut self, consistent_read: bool) -> Self {
        self.consistent_read = consistent_read;
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
    pub const fn is_consistent_read(&self) -> bool {
        self.consistent_read
    }

    /// Fetch the item, `None` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the item cannot be mapped.
    pub async fn exec(self) -> Result<Option<T>, DynamoError> {
        debug!("get_item request on {}: key={:?}", self.table_name, self.key);

        let output = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .set_key(Some(to_item(self.key)))
            .consistent_read(self.consistent_read)
            .send()
            .await?;

        debug!("get_item response: found={}", output.item.is_some());

        let Some(item) = output.item else {
            return Ok(None);
        };
        Ok(Some(self.mapper.from_db(&from_item(item)?)?))
    }
}
