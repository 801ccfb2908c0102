//! Library layer for egytech: config loading, pooled multi-query fetching,
//! file export and input validation.
//!
//! Wraps the `egytech_api` crate, which owns the query models and the
//! single-query client.

pub mod config;
pub mod error;
pub mod export;
pub mod pool;
pub mod validation;

pub use egytech_api;
pub use egytech_api::types;
pub use egytech_api::{
    ApiConfig, Client, Endpoint, ParticipantsQuery, Query, RangePolicy, StatsQuery,
    ValidationError,
};

pub use config::ConfigError;
pub use error::EgytechError;
pub use export::{Export, ExportError};
pub use pool::{PoolMode, PooledQueries, PooledResult, PoolingClient};
