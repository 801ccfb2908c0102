//! Typed client for the egytech.fyi survey API.
//!
//! Queries are validated and encoded without any I/O; [`Client`] then sends
//! them and decodes the JSON into [`types::Dataset`] tables.

mod client;
pub mod config;
mod errors;
mod query;
pub mod types;
pub use self::client::Client;
pub use self::config::{ApiConfig, Endpoint};
pub use self::errors::{Error, ValidationError};
pub use self::query::{
    FlagEncoding, ParticipantsQuery, ParticipantsQueryBuilder, Query, RangePolicy, StatsQuery,
    MAX_YOE_RANGE, MIN_YOE_RANGE,
};
