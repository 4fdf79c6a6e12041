use csv::ReaderBuilder;
use std::{fs::File, io::Read, path::Path};
use tracing::{debug, info};

use super::{Dataset, Record};
use crate::error::Result;
use crate::schema::is_header_label;

/// Re-hydrate a table previously written by [`super::write::write_csv`].
///
/// Any row whose first cell is a known header label is skipped. Every other
/// row must have exactly 25 cells; its values (derived ones included) are
/// taken as written.
#[tracing::instrument(level = "info", skip(path), fields(path = %path.as_ref().display()))]
pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<Dataset> {
    let file = File::open(&path)?;
    let dataset = load_reader(file)?;
    info!(records = dataset.len(), "loaded dataset");
    Ok(dataset)
}

pub fn load_reader<R: Read>(reader: R) -> Result<Dataset> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true) // width is checked per row so the error names the row
        .from_reader(reader);

    let mut records = Vec::new();
    let mut header_rows = 0usize;
    for (idx, result) in rdr.records().enumerate() {
        let row = result?;
        if row.get(0).is_some_and(is_header_label) {
            header_rows += 1;
            continue;
        }
        let cells: Vec<&str> = row.iter().collect();
        records.push(Record::from_fields(idx + 1, &cells)?);
    }
    debug!(header_rows, rows = records.len(), "parsed csv rows");

    Ok(Dataset::new(records))
}
