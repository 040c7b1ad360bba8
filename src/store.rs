//! Entry point for working with the items of one model type.

use std::marker::PhantomData;

use aws_config::{BehaviorVersion, Region};
use aws_sdk_dynamodb::Client;
use tracing::info;

use crate::core::config::StoreConfig;
use crate::errors::DynamoError;
use crate::mapper::Mapper;
use crate::mapper::value::Value;
use crate::metadata::Model;
use crate::request::{DeleteRequest, GetRequest, PutRequest, QueryRequest, ScanRequest};

/// Builds requests against the table of `T`.
///
/// # Example
///
/// ```no_run
/// use dynamap::core::config::StoreConfig;
/// use dynamap::store::DynamoStore;
/// # use dynamap::metadata::{Model, ModelMetadata};
/// # use dynamap::mapper::value::Fields;
/// # use dynamap::errors::MappingError;
/// # struct Person;
/// # impl Model for Person {
/// #     fn metadata() -> &'static ModelMetadata { unimplemented!() }
/// #     fn to_fields(&self) -> Fields { Fields::new() }
/// #     fn from_fields(_: Fields) -> Result<Self, MappingError> { Ok(Person) }
/// # }
///
/// # async fn run() -> Result<(), dynamap::errors::DynamoError> {
/// let store = DynamoStore::<Person>::connect(&StoreConfig::from_env()?).await;
/// let person = store.get("some-id")?.consistent_read(true).exec().await?;
/// # Ok(())
/// # }
/// ```
pub struct DynamoStore<T> {
    client: Client,
    mapper: Mapper,
    table_name: String,
    _model: PhantomData<fn() -> T>,
}

impl<T> Clone for DynamoStore<T> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            mapper: self.mapper.clone(),
            table_name: self.table_name.clone(),
            _model: PhantomData,
        }
    }
}

impl<T: Model> DynamoStore<T> {
    #[must_use]
    pub fn new(client: Client, config: &StoreConfig) -> Self {
        Self {
            client,
            mapper: Mapper::new(config.mapper_config()),
            table_name: config.table_name(T::metadata().table_name()),
            _model: PhantomData,
        }
    }

    /// Load the shared AWS configuration and create a client for it.
    pub async fn connect(config: &StoreConfig) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = &config.region {
            loader = loader.region(Region::new(region.clone()));
        }
        if let Some(endpoint) = &config.endpoint_url {
            loader = loader.endpoint_url(endpoint);
        }
        let shared = loader.load().await;

        let store = Self::new(Client::new(&shared), config);
        info!("DynamoStore for {} uses table {}", T::metadata().name(), store.table_name);
        store
    }

    #[must_use]
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    #[must_use]
    pub const fn mapper(&self) -> &Mapper {
        &self.mapper
    }

    #[must_use]
    pub const fn client(&self) -> &Client {
        &self.client
    }

    /// # Errors
    ///
    /// Returns an error if the key is missing or cannot be mapped.
    pub fn get(&self, partition_key: impl Into<Value>) -> Result<GetRequest<T>, DynamoError> {
        self.get_with_sort_key(partition_key, None::<Value>)
    }

    /// # Errors
    ///
    /// Returns an error if a key value is missing or cannot be mapped.
    pub fn get_with_sort_key(
        &self,
        partition_key: impl Into<Value>,
        sort_key: Option<impl Into<Value>>,
    ) -> Result<GetRequest<T>, DynamoError> {
        GetRequest::new(
            self.client.clone(),
            self.mapper.clone(),
            &self.table_name,
            &partition_key.into(),
            sort_key.map(Into::<Value>::into).as_ref(),
        )
    }

    /// # Errors
    ///
    /// Returns an error if the item cannot be mapped or lacks a key attribute.
    pub fn put(&self, item: &T) -> Result<PutRequest<T>, DynamoError> {
        PutRequest::new(self.client.clone(), &self.mapper, &self.table_name, item)
    }

    /// # Errors
    ///
    /// Returns an error if the key is missing or cannot be mapped.
    pub fn delete(&self, partition_key: impl Into<Value>) -> Result<DeleteRequest<T>, DynamoError> {
        self.delete_with_sort_key(partition_key, None::<Value>)
    }

    /// # Errors
    ///
    /// Returns an error if a key value is missing or cannot be mapped.
    pub fn delete_with_sort_key(
        &self,
        partition_key: impl Into<Value>,
        sort_key: Option<impl Into<Value>>,
    ) -> Result<DeleteRequest<T>, DynamoError> {
        DeleteRequest::new(
            self.client.clone(),
            self.mapper.clone(),
            &self.table_name,
            &partition_key.into(),
            sort_key.map(Into::<Value>::into).as_ref(),
        )
    }

    /// # Errors
    ///
    /// Returns an error if the partition key is missing or cannot be mapped.
    pub fn query(&self, partition_key: impl Into<Value>) -> Result<QueryRequest<T>, DynamoError> {
        QueryRequest::new(
            self.client.clone(),
            self.mapper.clone(),
            &self.table_name,
            &partition_key.into(),
        )
    }

    #[must_use]
    pub fn scan(&self) -> ScanRequest<T> {
        ScanRequest::new(self.client.clone(), self.mapper.clone(), &self.table_name)
    }
}
