use std::io::Write;
use std::path::Path;

use super::normalizer::VehicleRecord;
use super::InventoryError;

/// Export header, in output order.
pub const COLUMNS: [&str; 15] = [
    "MAKE",
    "MODEL",
    "GRADE",
    "CHASSIS NO",
    "STOCK_ID",
    "COLOUR",
    "IMAGE_URL",
    "ENGINE CC",
    "MILEAGE",
    "YEAR/MONTH",
    "LOCATION",
    "PRICE",
    "FEATURES",
    "YEAR",
    "MAKE_MODEL",
];

/// Writes the header and one row per record. The header is emitted even for
/// an empty table.
pub fn write_records<W: Write>(records: &[VehicleRecord], writer: W) -> Result<(), InventoryError> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    csv_writer.write_record(COLUMNS)?;
    for record in records {
        csv_writer.serialize(record)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Stages the CSV next to `path` and renames it into place once complete.
pub(crate) fn write_csv_file(records: &[VehicleRecord], path: &Path) -> Result<(), InventoryError> {
    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut staged = tempfile::NamedTempFile::new_in(directory)?;
    write_records(records, &mut staged)?;
    staged.as_file().sync_all()?;
    staged.persist(path).map_err(|err| err.error)?;
    Ok(())
}
