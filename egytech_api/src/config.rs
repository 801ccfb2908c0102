//! Endpoint locations for the survey API.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::Error;

/// Production API host.
pub const DEFAULT_BASE_URL: &str = "https://api.egytech.fyi";

/// The two resources the API exposes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Participants,
    Stats,
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Endpoint::Participants => "participants",
                Endpoint::Stats => "stats",
            }
        )
    }
}

/// Where requests are sent. Passed explicitly to every client.
///
/// The default points at the production API: `https://api.egytech.fyi` with
/// `/participants` and `/stats` as endpoint paths.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub participants_path: String,
    pub stats_path: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            participants_path: "/participants".to_string(),
            stats_path: "/stats".to_string(),
        }
    }
}

impl ApiConfig {
    /// Default paths on a custom host. Used for testing with wiremock.
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            ..Self::default()
        }
    }

    pub fn path(&self, endpoint: Endpoint) -> &str {
        match endpoint {
            Endpoint::Participants => &self.participants_path,
            Endpoint::Stats => &self.stats_path,
        }
    }

    /// Full URL of an endpoint, without query parameters.
    pub fn endpoint_url(&self, endpoint: Endpoint) -> Result<Url, Error> {
        let base = self.base_url.trim_end_matches('/');
        let path = self.path(endpoint);
        let joined = if path.starts_with('/') {
            format!("{}{}", base, path)
        } else {
            format!("{}/{}", base, path)
        };
        Url::parse(&joined).map_err(|e| {
            tracing::error!("Invalid URL constructed from '{}': {}", joined, e);
            Error::InvalidUrl(format!("{}: {}", joined, e))
        })
    }
}
