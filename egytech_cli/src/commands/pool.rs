use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, ValueEnum};
use egytech_lib::validation;
use egytech_lib::{
    ApiConfig, ParticipantsQuery, PoolMode, PooledQueries, PoolingClient, RangePolicy, StatsQuery,
};
use serde_json::{Map, Value};

use super::save_exports;
use crate::output::{print_dataset, OutputFormat};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum PoolEndpoint {
    Participants,
    Stats,
}

#[derive(Args)]
pub struct PoolArgs {
    /// One query as comma-separated filters, e.g. 'title=backend,min_yoe=2'.
    /// Repeat for more queries.
    #[arg(long = "query", value_name = "FILTERS")]
    pub queries: Vec<String>,

    /// JSON file holding an array of filter objects, run after any --query
    #[arg(long)]
    pub queries_file: Option<PathBuf>,

    /// Endpoint every query in the batch is sent to
    #[arg(long, value_enum, default_value_t = PoolEndpoint::Participants)]
    pub endpoint: PoolEndpoint,

    /// Send all queries at once instead of one after another
    #[arg(long)]
    pub concurrent: bool,

    /// Reject years ranges where min_yoe is not below max_yoe
    #[arg(long)]
    pub strict_range: bool,

    /// Also write the merged rows to BASE.csv
    #[arg(long, value_name = "BASE")]
    pub save_csv: Option<String>,

    /// Also write the merged rows to BASE.xlsx
    #[arg(long, value_name = "BASE")]
    pub save_excel: Option<String>,
}

impl PoolArgs {
    fn mode(&self) -> PoolMode {
        if self.concurrent {
            PoolMode::Concurrent
        } else {
            PoolMode::Sequential
        }
    }

    fn range_policy(&self) -> RangePolicy {
        if self.strict_range {
            RangePolicy::Ordered
        } else {
            RangePolicy::Unchecked
        }
    }

    fn filter_maps(&self) -> Result<Vec<Map<String, Value>>> {
        let mut maps = Vec::with_capacity(self.queries.len());
        for spec in &self.queries {
            maps.push(
                validation::parse_query_spec(spec)
                    .with_context(|| format!("invalid --query '{}'", spec))?,
            );
        }
        if let Some(path) = &self.queries_file {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            maps.extend(validation::parse_query_list(&content)?);
        }
        Ok(maps)
    }

    /// Validates every filter set before anything is sent.
    pub fn to_batch(&self) -> Result<PooledQueries> {
        let maps = self.filter_maps()?;
        if maps.is_empty() {
            bail!("no queries given: pass --query or --queries-file");
        }
        let policy = self.range_policy();

        let batch = match self.endpoint {
            PoolEndpoint::Participants => {
                let mut queries = Vec::with_capacity(maps.len());
                for (idx, map) in maps.iter().enumerate() {
                    queries.push(
                        ParticipantsQuery::from_map_with(map, policy)
                            .with_context(|| format!("query {} is invalid", idx + 1))?,
                    );
                }
                PooledQueries::Participants(queries)
            }
            PoolEndpoint::Stats => {
                let mut queries = Vec::with_capacity(maps.len());
                for (idx, map) in maps.iter().enumerate() {
                    queries.push(
                        StatsQuery::from_map_with(map, policy)
                            .with_context(|| format!("query {} is invalid", idx + 1))?,
                    );
                }
                PooledQueries::Stats(queries)
            }
        };
        Ok(batch)
    }
}

pub async fn run(args: &PoolArgs, config: &ApiConfig, format: OutputFormat) -> Result<()> {
    let batch = args.to_batch()?;
    let pool = PoolingClient::new(config.clone());
    let result = pool.fetch(&batch, args.mode()).await?;

    eprintln!(
        "{} rows from {} {} queries",
        result.dataset().len(),
        result.query_count(),
        result.endpoint()
    );
    print_dataset(result.dataset(), format)?;
    save_exports(&result, args.save_csv.as_deref(), args.save_excel.as_deref())
}
