use thiserror::Error;

/// Failure while converting between application values and wire attributes.
///
/// Mapping is deterministic, so none of these are transient: retrying the
/// same input yields the same error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MappingError {
    #[error("Failed to parse number from '{0}'")]
    InvalidNumber(String),

    #[error("Failed to parse date from '{0}'")]
    InvalidDate(String),

    #[error("Property '{property}' needs a custom codec to be mapped")]
    MissingCustomCodec { property: String },

    #[error("Please provide an actual value for key '{property}'")]
    MissingKeyValue { property: String },

    #[error("Model '{model}' has no sort key but one was given")]
    UnexpectedSortKey { model: String },

    #[error("Model '{model}' declares no partition key")]
    MissingPartitionKey { model: String },

    #[error("Model '{model}' declares more than one partition key")]
    MultiplePartitionKeys { model: String },

    #[error("Model '{model}' declares more than one sort key")]
    MultipleSortKeys { model: String },

    #[error("Model '{model}' maps more than one property to attribute '{name}'")]
    DuplicateAttributeName { model: String, name: String },

    #[error("Expected {expected} but found {found}")]
    UnexpectedAttribute { expected: String, found: String },

    #[error("Required property '{property}' is missing")]
    MissingProperty { property: String },

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Unsupported attribute: {0}")]
    UnsupportedAttribute(String),
}

#[derive(Debug, Error)]
pub enum DynamoError {
    #[error("Failed to map item: {0}")]
    Mapping(#[from] MappingError),

    #[error("Failed to interact with DynamoDB: {0}")]
    AwsError(String),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),
}

// Generic implementation for AWS SDK errors
impl<E, R> From<aws_sdk_dynamodb::error::SdkError<E, R>> for DynamoError
where
    E: std::error::Error + 'static,
    R: std::fmt::Debug,
{
    fn from(error: aws_sdk_dynamodb::error::SdkError<E, R>) -> Self {
        DynamoError::AwsError(aws_sdk_dynamodb::error::DisplayErrorContext(&error).to_string())
    }
}
