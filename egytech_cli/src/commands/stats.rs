use anyhow::Result;
use clap::Args;
use egytech_lib::validation;
use egytech_lib::{ApiConfig, Client, StatsQuery};

use super::filters::FilterArgs;
use super::save_exports;
use crate::output::{print_dataset, print_summary, OutputFormat};

#[derive(Args)]
pub struct StatsArgs {
    #[command(flatten)]
    pub filters: FilterArgs,

    /// Programming language (e.g. python, javascript, c++, rust)
    #[arg(long)]
    pub programming_language: Option<String>,

    /// Also write the bucket distribution to BASE.csv
    #[arg(long, value_name = "BASE")]
    pub save_csv: Option<String>,

    /// Also write the bucket distribution to BASE.xlsx
    #[arg(long, value_name = "BASE")]
    pub save_excel: Option<String>,
}

impl StatsArgs {
    fn to_query(&self) -> Result<StatsQuery> {
        let base = self.filters.to_query()?;
        let language = self
            .programming_language
            .as_deref()
            .map(validation::validate_language)
            .transpose()?;
        Ok(StatsQuery::new(base, language))
    }
}

pub async fn run(args: &StatsArgs, config: &ApiConfig, format: OutputFormat) -> Result<()> {
    let query = args.to_query()?;
    let client = Client::new(config.clone())?;
    let result = client.get_stats(&query).await?;

    print_summary(result.summary());
    print_dataset(result.buckets(), format)?;
    save_exports(&result, args.save_csv.as_deref(), args.save_excel.as_deref())
}
