use anyhow::Result;
use egytech_lib::export::{cell_text, write_csv_to};
use egytech_lib::types::{Dataset, StatsSummary};
use tabled::builder::Builder;
use tabled::settings::Style;
use tabled::Table;

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
    Markdown,
}

// -- Table building --

/// The column set is only known at runtime, so rows go through the
/// dynamic builder instead of a derived `Tabled` struct.
fn build_table(dataset: &Dataset) -> Table {
    let mut builder = Builder::default();
    builder.push_record(dataset.columns().iter().map(|c| c.to_string()));
    for row in dataset.rows() {
        builder.push_record(row.iter().map(cell_text));
    }
    builder.build()
}

fn render_table(dataset: &Dataset) -> String {
    build_table(dataset).to_string()
}

fn render_markdown(dataset: &Dataset) -> String {
    let mut table = build_table(dataset);
    table.with(Style::markdown());
    table.to_string()
}

fn render_summary(summary: &StatsSummary) -> String {
    let width = summary
        .entries()
        .iter()
        .map(|(name, _)| name.len())
        .max()
        .unwrap_or(0);
    summary
        .entries()
        .iter()
        .map(|(name, value)| format!("{:<width$}  {}", name, value, width = width))
        .collect::<Vec<_>>()
        .join("\n")
}

// -- Printers --

pub fn print_dataset(dataset: &Dataset, format: OutputFormat) -> Result<()> {
    if dataset.is_empty() && format != OutputFormat::Json {
        eprintln!("No results");
        return Ok(());
    }
    match format {
        OutputFormat::Table => println!("{}", render_table(dataset)),
        OutputFormat::Markdown => println!("{}", render_markdown(dataset)),
        OutputFormat::Csv => write_csv_to(dataset, std::io::stdout())?,
        OutputFormat::Json => print_json(dataset),
    }
    Ok(())
}

/// The summary goes to stderr so stdout stays machine-readable.
pub fn print_summary(summary: &StatsSummary) {
    eprintln!("{}", render_summary(summary));
}

pub fn print_json<T: serde::Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
