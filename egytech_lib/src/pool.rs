//! Pooling: issue a batch of queries and merge their rows into one dataset.
//!
//! Both modes produce rows in the order the queries were submitted. Each
//! batch call builds its own connection pool and drops it when the call
//! returns, so nothing is shared between separate batches.

use egytech_api::types::Dataset;
use egytech_api::{ApiConfig, Client, Endpoint, ParticipantsQuery, StatsQuery};
use tokio::task::JoinSet;

use crate::error::EgytechError;

/// A batch of queries, tagged by the endpoint they target.
#[derive(Clone, Debug, PartialEq)]
pub enum PooledQueries {
    /// Rows are the participant records of every query, concatenated.
    Participants(Vec<ParticipantsQuery>),
    /// One row per query holding that query's summary metrics.
    Stats(Vec<StatsQuery>),
}

impl PooledQueries {
    pub fn endpoint(&self) -> Endpoint {
        match self {
            PooledQueries::Participants(_) => Endpoint::Participants,
            PooledQueries::Stats(_) => Endpoint::Stats,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            PooledQueries::Participants(queries) => queries.len(),
            PooledQueries::Stats(queries) => queries.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn entries(&self) -> Vec<PooledQuery> {
        match self {
            PooledQueries::Participants(queries) => queries
                .iter()
                .cloned()
                .map(PooledQuery::Participants)
                .collect(),
            PooledQueries::Stats(queries) => {
                queries.iter().cloned().map(PooledQuery::Stats).collect()
            }
        }
    }
}

impl From<Vec<ParticipantsQuery>> for PooledQueries {
    fn from(queries: Vec<ParticipantsQuery>) -> Self {
        PooledQueries::Participants(queries)
    }
}

impl From<Vec<StatsQuery>> for PooledQueries {
    fn from(queries: Vec<StatsQuery>) -> Self {
        PooledQueries::Stats(queries)
    }
}

#[derive(Clone, Debug)]
enum PooledQuery {
    Participants(ParticipantsQuery),
    Stats(StatsQuery),
}

impl PooledQuery {
    /// The rows one query contributes to the batch, with the columns its
    /// response carried.
    async fn fetch_rows(&self, client: &Client) -> Result<Dataset, egytech_api::Error> {
        match self {
            PooledQuery::Participants(query) => {
                Ok(client.get_participants(query).await?.into_dataset())
            }
            PooledQuery::Stats(query) => {
                let result = client.get_stats(query).await?;
                Ok(Dataset::from_records(vec![result.summary().to_record()]))
            }
        }
    }
}

/// How a batch is executed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PoolMode {
    /// One request at a time, in submission order.
    #[default]
    Sequential,
    /// All requests in flight together over one shared pool.
    Concurrent,
}

/// Merged rows of a whole batch.
#[derive(Debug, Clone)]
pub struct PooledResult {
    endpoint: Endpoint,
    queries: usize,
    dataset: Dataset,
}

impl PooledResult {
    pub fn endpoint(&self) -> Endpoint {
        self.endpoint
    }

    /// Number of queries that contributed rows.
    pub fn query_count(&self) -> usize {
        self.queries
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn into_dataset(self) -> Dataset {
        self.dataset
    }
}

/// Runs batches of queries against one API configuration.
pub struct PoolingClient {
    config: ApiConfig,
}

impl PoolingClient {
    pub fn new(config: ApiConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Runs the batch in the given mode.
    pub async fn fetch(
        &self,
        queries: &PooledQueries,
        mode: PoolMode,
    ) -> Result<PooledResult, EgytechError> {
        match mode {
            PoolMode::Sequential => self.fetch_sequential(queries).await,
            PoolMode::Concurrent => self.fetch_concurrent(queries).await,
        }
    }

    /// Runs the batch on a private single-threaded runtime, blocking the
    /// calling thread until it completes. Must not be called from within an
    /// async context.
    pub fn fetch_blocking(
        &self,
        queries: &PooledQueries,
        mode: PoolMode,
    ) -> Result<PooledResult, EgytechError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| EgytechError::Task(format!("failed to start runtime: {}", e)))?;
        runtime.block_on(self.fetch(queries, mode))
    }

    /// Issues each query in order over one reused connection. The first
    /// failure aborts the batch; later queries are never sent.
    pub async fn fetch_sequential(
        &self,
        queries: &PooledQueries,
    ) -> Result<PooledResult, EgytechError> {
        let client = Client::new(self.config.clone())?;
        let mut parts: Vec<Dataset> = Vec::with_capacity(queries.len());
        for (idx, query) in queries.entries().iter().enumerate() {
            let fetched = query.fetch_rows(&client).await.map_err(|e| {
                tracing::error!("Query {} of {} failed: {}", idx + 1, queries.len(), e);
                e
            })?;
            tracing::debug!("Query {} returned {} rows", idx + 1, fetched.len());
            parts.push(fetched);
        }
        Ok(self.finish(queries, parts, PoolMode::Sequential))
    }

    /// Issues every query at once over one shared connection pool.
    ///
    /// Each request runs as its own task tagged with its submission index, and
    /// the rows are put back into submission order before being flattened, so
    /// the merged order never depends on which response arrived first. The
    /// first failure observed aborts the outstanding requests and fails the
    /// batch.
    pub async fn fetch_concurrent(
        &self,
        queries: &PooledQueries,
    ) -> Result<PooledResult, EgytechError> {
        let client = Client::new(self.config.clone())?;
        let entries = queries.entries();
        let mut slots: Vec<Option<Dataset>> = vec![None; entries.len()];

        let mut join_set = JoinSet::new();
        for (idx, query) in entries.into_iter().enumerate() {
            let client = client.clone();
            join_set.spawn(async move { (idx, query.fetch_rows(&client).await) });
        }

        while let Some(joined) = join_set.join_next().await {
            let (idx, result) = joined.map_err(|e| {
                tracing::error!("Request task failed: {}", e);
                EgytechError::Task(e.to_string())
            })?;
            match result {
                Ok(fetched) => {
                    tracing::debug!("Query {} returned {} rows", idx + 1, fetched.len());
                    slots[idx] = Some(fetched);
                }
                Err(e) => {
                    tracing::error!("Query {} of {} failed: {}", idx + 1, queries.len(), e);
                    join_set.abort_all();
                    return Err(e.into());
                }
            }
        }

        let parts: Vec<Dataset> = slots.into_iter().flatten().collect();
        Ok(self.finish(queries, parts, PoolMode::Concurrent))
    }

    fn finish(&self, queries: &PooledQueries, parts: Vec<Dataset>, mode: PoolMode) -> PooledResult {
        let dataset = Dataset::concat(parts);
        tracing::info!(
            "Fetched {} rows from {} {} queries ({:?})",
            dataset.len(),
            queries.len(),
            queries.endpoint(),
            mode
        );
        PooledResult {
            endpoint: queries.endpoint(),
            queries: queries.len(),
            dataset,
        }
    }
}
