mod export;
mod normalizer;
mod payload;
mod source;
mod summary;

use std::path::Path;

use tracing::info;

pub use export::{write_records, COLUMNS};
pub use normalizer::{FieldValue, VehicleRecord};
pub use source::{FileInventorySource, HttpInventorySource, InventorySource};
pub use summary::{ColumnKind, ColumnSummary, TableSummary};

#[derive(Debug, thiserror::Error)]
pub enum InventoryError {
    #[error("inventory request failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("inventory API returned HTTP {status} for {url}")]
    Status { status: u16, url: String },
    #[error("inventory payload is not valid JSON: {0}")]
    Decode(#[source] serde_json::Error),
    #[error("unexpected response structure: {0}")]
    Structure(String),
    #[error("inventory i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not encode inventory CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// Fetch, unwrap, normalize and export, one stage after another.
pub struct InventoryExporter;

impl InventoryExporter {
    /// Runs every stage except the file write.
    pub fn collect(source: &dyn InventorySource) -> Result<Vec<VehicleRecord>, InventoryError> {
        let raw = source.fetch()?;
        let items = payload::unwrap_items(raw)?;
        let records = normalizer::normalize_items(&items);
        info!(
            items = items.len(),
            records = records.len(),
            "inventory normalized"
        );
        Ok(records)
    }

    pub fn export_to_path<P: AsRef<Path>>(
        source: &dyn InventorySource,
        path: P,
    ) -> Result<TableSummary, InventoryError> {
        let path = path.as_ref();
        let records = Self::collect(source)?;
        export::write_csv_file(&records, path)?;
        info!(path = %path.display(), rows = records.len(), "inventory export written");
        Ok(TableSummary::from_records(&records))
    }
}
