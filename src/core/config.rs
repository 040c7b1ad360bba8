use std::env;
use std::sync::Arc;

use crate::errors::DynamoError;
use crate::mapper::date::{DateCodec, DateFormat};

/// Settings threaded into every [`Mapper`](crate::mapper::Mapper).
#[derive(Debug, Clone)]
pub struct MapperConfig {
    pub date_codec: Arc<dyn DateCodec>,
}

impl MapperConfig {
    #[must_use]
    pub fn with_date_format(format: DateFormat) -> Self {
        Self {
            date_codec: format.codec(),
        }
    }
}

impl Default for MapperConfig {
    fn default() -> Self {
        Self::with_date_format(DateFormat::default())
    }
}

#[derive(Debug, Clone, Default)]
pub struct StoreConfig {
    /// Prepended to every model's table name, e.g. `"dev-"`.
    pub table_name_prefix: String,
    pub region: Option<String>,
    /// Override for local endpoints such as DynamoDB Local.
    pub endpoint_url: Option<String>,
    pub date_format: DateFormat,
}

impl StoreConfig {
    pub fn from_env() -> Result<Self, DynamoError> {
        let date_format = match env::var("DYNAMAP_DATE_FORMAT") {
            Ok(raw) => raw
                .parse()
                .map_err(|e| DynamoError::ConfigError(format!("DYNAMAP_DATE_FORMAT: {e}")))?,
            Err(_) => DateFormat::default(),
        };

        Ok(Self {
            table_name_prefix: env::var("DYNAMAP_TABLE_PREFIX").unwrap_or_default(),
            region: env::var("DYNAMAP_REGION").ok(),
            endpoint_url: env::var("DYNAMAP_ENDPOINT_URL").ok(),
            date_format,
        })
    }

    #[must_use]
    pub fn mapper_config(&self) -> MapperConfig {
        MapperConfig::with_date_format(self.date_format)
    }

    #[must_use]
    pub fn table_name(&self, base: &str) -> String {
        format!("{}{}", self.table_name_prefix, base)
    }
}
