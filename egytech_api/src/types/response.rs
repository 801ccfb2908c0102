use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::dataset::{Dataset, Record};

/// Raw body of the participants endpoint.
#[derive(Serialize, Deserialize, Debug)]
pub struct ParticipantsResponse {
    pub results: Vec<Record>,
}

/// Raw body of the stats endpoint.
#[derive(Serialize, Deserialize, Debug)]
pub struct StatsResponse {
    pub buckets: Vec<Record>,
    pub stats: StatsSummary,
}

/// Headline compensation metrics for the filtered population.
///
/// The API documents these as strings. Numeric values are accepted too and
/// kept as their decimal text so the summary stays a flat string mapping.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StatsSummary {
    #[serde(deserialize_with = "string_or_number")]
    pub total_count: String,
    #[serde(deserialize_with = "string_or_number")]
    pub median: String,
    #[serde(deserialize_with = "string_or_number")]
    pub p20_compensation: String,
    #[serde(deserialize_with = "string_or_number")]
    pub p75_compensation: String,
    #[serde(deserialize_with = "string_or_number")]
    pub p90_compensation: String,
}

impl StatsSummary {
    /// Metric name (as sent by the API) and value pairs, in a fixed order.
    pub fn entries(&self) -> [(&'static str, &str); 5] {
        [
            ("totalCount", self.total_count.as_str()),
            ("median", self.median.as_str()),
            ("p20Compensation", self.p20_compensation.as_str()),
            ("p75Compensation", self.p75_compensation.as_str()),
            ("p90Compensation", self.p90_compensation.as_str()),
        ]
    }

    /// The summary as a single record, keyed by the API's metric names.
    pub fn to_record(&self) -> Record {
        self.entries()
            .iter()
            .map(|(k, v)| (k.to_string(), Value::String(v.to_string())))
            .collect()
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected a string or number, got {}",
            other
        ))),
    }
}

/// Decoded participants call: one row per participant.
#[derive(Debug, Clone)]
pub struct ParticipantsResult {
    participants: Dataset,
}

impl ParticipantsResult {
    pub fn dataset(&self) -> &Dataset {
        &self.participants
    }

    pub fn into_dataset(self) -> Dataset {
        self.participants
    }
}

impl From<ParticipantsResponse> for ParticipantsResult {
    fn from(resp: ParticipantsResponse) -> Self {
        Self {
            participants: Dataset::from_records(resp.results),
        }
    }
}

/// Decoded stats call: the summary metrics plus the compensation buckets.
#[derive(Debug, Clone)]
pub struct StatsResult {
    summary: StatsSummary,
    buckets: Dataset,
}

impl StatsResult {
    pub fn summary(&self) -> &StatsSummary {
        &self.summary
    }

    /// The compensation distribution, one row per bucket.
    pub fn buckets(&self) -> &Dataset {
        &self.buckets
    }

    pub fn into_parts(self) -> (StatsSummary, Dataset) {
        (self.summary, self.buckets)
    }
}

impl From<StatsResponse> for StatsResult {
    fn from(resp: StatsResponse) -> Self {
        Self {
            summary: resp.stats,
            buckets: Dataset::from_records(resp.buckets),
        }
    }
}
