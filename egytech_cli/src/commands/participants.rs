use anyhow::Result;
use clap::Args;
use egytech_lib::{ApiConfig, Client};

use super::filters::FilterArgs;
use super::save_exports;
use crate::output::{print_dataset, OutputFormat};

#[derive(Args)]
pub struct ParticipantsArgs {
    #[command(flatten)]
    pub filters: FilterArgs,

    /// Also write the rows to BASE.csv
    #[arg(long, value_name = "BASE")]
    pub save_csv: Option<String>,

    /// Also write the rows to BASE.xlsx
    #[arg(long, value_name = "BASE")]
    pub save_excel: Option<String>,
}

pub async fn run(args: &ParticipantsArgs, config: &ApiConfig, format: OutputFormat) -> Result<()> {
    let query = args.filters.to_query()?;
    let client = Client::new(config.clone())?;
    let result = client.get_participants(&query).await?;

    eprintln!("{} participants", result.dataset().len());
    print_dataset(result.dataset(), format)?;
    save_exports(&result, args.save_csv.as_deref(), args.save_excel.as_deref())
}
