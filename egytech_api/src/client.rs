//! HTTP client for the egytech survey API.

use std::time::Duration;

use serde::de::DeserializeOwned;
use url::Url;

use crate::{
    config::ApiConfig,
    query::{ParticipantsQuery, Query, StatsQuery},
    types::{ParticipantsResponse, ParticipantsResult, StatsResponse, StatsResult},
    Error,
};

/// Request timeout for a single API call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for the survey API.
///
/// Wraps one `reqwest::Client`, so every request made through the same
/// `Client` (or a clone of it) shares one connection pool. Building URLs is
/// pure; only the `get_*` methods touch the network.
#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    config: ApiConfig,
}

impl Client {
    /// Creates a client for the given endpoints.
    pub fn new(config: ApiConfig) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                Error::Transport(e)
            })?;
        Ok(Self { http, config })
    }

    /// Creates a client with default paths on a custom host. Used for testing with wiremock.
    pub fn with_base_url(base_url: &str) -> Result<Self, Error> {
        Self::new(ApiConfig::with_base_url(base_url))
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// The full request URL for a query, including its encoded filters.
    pub fn url_for<Q: Query>(&self, query: &Q) -> Result<Url, Error> {
        let url = self.config.endpoint_url(Q::ENDPOINT)?;
        Ok(query.add_to_url(&url))
    }

    pub fn participants_url(&self, query: &ParticipantsQuery) -> Result<Url, Error> {
        self.url_for(query)
    }

    pub fn stats_url(&self, query: &StatsQuery) -> Result<Url, Error> {
        self.url_for(query)
    }

    async fn get<T, Q>(&self, query: &Q) -> Result<T, Error>
    where
        T: DeserializeOwned,
        Q: Query,
    {
        let url = self.url_for(query)?;
        tracing::debug!("GET {}", url);
        let resp = self
            .http
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;

        if status != reqwest::StatusCode::OK {
            let snippet = truncate_body(&body);
            tracing::error!(
                "{} request failed with status {}: {}",
                Q::ENDPOINT,
                status,
                snippet
            );
            return Err(Error::ApiCall {
                status: status.as_u16(),
                endpoint: Q::ENDPOINT.to_string(),
                body: snippet,
            });
        }

        serde_json::from_str::<T>(&body).map_err(|e| {
            let snippet = truncate_body(&body);
            tracing::error!("Failed to parse {} response: {} | body: {}", Q::ENDPOINT, e, snippet);
            Error::Decode(e.to_string())
        })
    }

    /// Fetches the participants matching the query.
    pub async fn get_participants(
        &self,
        query: &ParticipantsQuery,
    ) -> Result<ParticipantsResult, Error> {
        let resp = self.get::<ParticipantsResponse, _>(query).await?;
        Ok(resp.into())
    }

    /// Fetches compensation statistics for the population matching the query.
    pub async fn get_stats(&self, query: &StatsQuery) -> Result<StatsResult, Error> {
        let resp = self.get::<StatsResponse, _>(query).await?;
        Ok(resp.into())
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        return body.to_string();
    }
    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...[truncated]", &body[..end])
}
