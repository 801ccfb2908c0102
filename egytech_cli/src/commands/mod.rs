//! CLI subcommand implementations.

pub mod filters;
pub mod participants;
pub mod pool;
pub mod stats;

use anyhow::Result;
use egytech_lib::Export;

/// Writes the requested export files and reports where they went.
pub fn save_exports<E: Export>(
    result: &E,
    save_csv: Option<&str>,
    save_excel: Option<&str>,
) -> Result<()> {
    if let Some(base) = save_csv {
        let path = result.save_csv(base)?;
        eprintln!("Saved {}", path.display());
    }
    if let Some(base) = save_excel {
        let path = result.save_excel(base)?;
        eprintln!("Saved {}", path.display());
    }
    Ok(())
}
