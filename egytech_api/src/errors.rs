//! Error types for the API client.

/// A filter set failed validation before any request was built.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The field name is not part of the query schema.
    #[error("unknown field '{0}'")]
    UnknownField(String),
    /// The value has the wrong shape or is not a member of the field's value set.
    #[error("invalid value for '{field}': {reason}")]
    InvalidValue { field: &'static str, reason: String },
    /// An integer filter is outside its declared bounds.
    #[error("'{field}' must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },
    /// `min_yoe` is not below `max_yoe` while the ordered range policy is active.
    #[error("min_yoe ({min_yoe}) must be lower than max_yoe ({max_yoe})")]
    InvertedRange { min_yoe: u8, max_yoe: u8 },
    /// The filter set was not given as a JSON object.
    #[error("query filters must be a JSON object")]
    NotAnObject,
}

/// Errors that can occur when building or executing API requests.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The query failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The API answered with a non-200 status. Carries a body snippet.
    #[error("API call to {endpoint} failed with status {status}")]
    ApiCall {
        status: u16,
        endpoint: String,
        body: String,
    },
    /// The request never produced a response (connection, DNS, timeout).
    #[error("transport error")]
    Transport(#[from] reqwest::Error),
    /// The response body did not have the expected shape.
    #[error("failed to decode response: {0}")]
    Decode(String),
    /// The configured base URL and path do not form a valid URL.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}
