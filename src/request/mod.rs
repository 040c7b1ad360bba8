//! Typed request objects.
//!
//! Every key-bearing request maps and validates its key when it is built, so a
//! missing or malformed key fails before anything is sent to the store.

mod delete;
mod get;
mod put;
mod query;
mod scan;

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;

pub use delete::DeleteRequest;
pub use get::GetRequest;
pub use put::PutRequest;
pub use query::QueryRequest;
pub use scan::ScanRequest;

use crate::errors::MappingError;
use crate::mapper::Mapper;
use crate::mapper::attribute::{Attributes, from_item};
use crate::metadata::Model;

/// One page of items returned by a query or scan.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Key to pass as exclusive start key to fetch the next page.
    pub last_evaluated_key: Option<Attributes>,
}

fn map_items<T: Model>(
    mapper: &Mapper,
    items: Option<Vec<HashMap<String, AttributeValue>>>,
) -> Result<Vec<T>, MappingError> {
    items
        .unwrap_or_default()
        .into_iter()
        .map(|item| mapper.from_db(&from_item(item)?))
        .collect()
}

fn map_last_key(
    key: Option<HashMap<String, AttributeValue>>,
) -> Result<Option<Attributes>, MappingError> {
    key.map(from_item).transpose()
}
