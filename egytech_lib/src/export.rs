//! CSV and spreadsheet export of decoded results.
//!
//! Files get a header row of column names followed by one line per row, with
//! no index column. Null cells are left empty.

use std::io::Write;
use std::path::{Path, PathBuf};

use egytech_api::types::{Dataset, ParticipantsResult, StatsResult};
use rust_xlsxwriter::Workbook;
use serde_json::Value;
use thiserror::Error;

use crate::pool::PooledResult;

/// Spreadsheet row limit, header included.
const XLSX_MAX_ROWS: usize = 1_048_576;
/// Spreadsheet column limit.
const XLSX_MAX_COLUMNS: usize = 16_384;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("spreadsheet error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{rows} rows x {columns} columns does not fit in a worksheet")]
    TooLarge { rows: usize, columns: usize },
}

/// Text form of a cell. Nested arrays and objects become compact JSON.
pub fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Writes the dataset as CSV to any writer.
pub fn write_csv_to<W: Write>(dataset: &Dataset, writer: W) -> Result<(), ExportError> {
    let mut wtr = csv::Writer::from_writer(writer);
    if !dataset.columns().is_empty() {
        wtr.write_record(dataset.columns())?;
    }
    for row in dataset.rows() {
        wtr.write_record(row.iter().map(cell_text))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes the dataset as a CSV file at `path`.
pub fn write_csv(dataset: &Dataset, path: &Path) -> Result<(), ExportError> {
    let file = std::fs::File::create(path)?;
    write_csv_to(dataset, file)?;
    tracing::info!("Wrote {} rows to {}", dataset.len(), path.display());
    Ok(())
}

/// Writes the dataset as a single-sheet `.xlsx` workbook at `path`.
///
/// Numbers and booleans keep their cell types; everything else is text.
pub fn write_xlsx(dataset: &Dataset, path: &Path) -> Result<(), ExportError> {
    if dataset.len() + 1 > XLSX_MAX_ROWS || dataset.columns().len() > XLSX_MAX_COLUMNS {
        return Err(ExportError::TooLarge {
            rows: dataset.len(),
            columns: dataset.columns().len(),
        });
    }

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (col, name) in dataset.columns().iter().enumerate() {
        worksheet.write_string(0, col as u16, name)?;
    }
    for (idx, row) in dataset.rows().iter().enumerate() {
        let row_num = (idx + 1) as u32;
        for (col, cell) in row.iter().enumerate() {
            let col = col as u16;
            match cell {
                Value::Null => {}
                Value::Bool(b) => {
                    worksheet.write_boolean(row_num, col, *b)?;
                }
                Value::Number(n) => match n.as_f64() {
                    Some(f) => {
                        worksheet.write_number(row_num, col, f)?;
                    }
                    None => {
                        worksheet.write_string(row_num, col, n.to_string())?;
                    }
                },
                other => {
                    worksheet.write_string(row_num, col, cell_text(other))?;
                }
            }
        }
    }

    workbook.save(path)?;
    tracing::info!("Wrote {} rows to {}", dataset.len(), path.display());
    Ok(())
}

/// File export for anything that holds a decoded table.
///
/// `filename` is a base name: the extension is appended by the method, so
/// `"participants"` becomes `participants.csv` or `participants.xlsx`.
pub trait Export {
    fn export_dataset(&self) -> &Dataset;

    fn save_csv(&self, filename: &str) -> Result<PathBuf, ExportError> {
        let path = PathBuf::from(format!("{}.csv", filename));
        write_csv(self.export_dataset(), &path)?;
        Ok(path)
    }

    fn save_excel(&self, filename: &str) -> Result<PathBuf, ExportError> {
        let path = PathBuf::from(format!("{}.xlsx", filename));
        write_xlsx(self.export_dataset(), &path)?;
        Ok(path)
    }
}

impl Export for Dataset {
    fn export_dataset(&self) -> &Dataset {
        self
    }
}

impl Export for ParticipantsResult {
    fn export_dataset(&self) -> &Dataset {
        self.dataset()
    }
}

/// Exports the bucket distribution; the summary is not part of the table.
impl Export for StatsResult {
    fn export_dataset(&self) -> &Dataset {
        self.buckets()
    }
}

impl Export for PooledResult {
    fn export_dataset(&self) -> &Dataset {
        self.dataset()
    }
}
