use arrow::{
    array::{ArrayRef, BooleanArray, Float64Array, Int64Array, Int8Array, StringArray},
    record_batch::RecordBatch,
};
use chrono::Utc;
use parquet::{
    arrow::ArrowWriter, basic::Compression, file::properties::WriterProperties,
    format::KeyValue,
};
use std::{
    fs::{self, File},
    path::{Path, PathBuf},
    sync::Arc,
};
use tracing::{debug, info};

use super::{Dataset, Value};
use crate::error::Result;
use crate::schema::{build_arrow_schema, headers, Column, ColumnKind};

/// Key under which the export time is stored in parquet file metadata.
pub const CREATED_AT_KEY: &str = "css_dataset.created_at";

/// Sibling temp path used for write-then-rename.
fn tmp_path_for(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "dataset".into());
    path.with_file_name(format!(".{}.tmp", name))
}

/// Run `write` against a sibling temp file, then rename it over `path`.
/// On failure the temp file is removed and `path` is left as it was.
fn replace_via_tmp<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&Path) -> Result<()>,
{
    let tmp_path = tmp_path_for(path);
    if let Err(e) = write(&tmp_path) {
        if let Err(rm) = fs::remove_file(&tmp_path) {
            debug!(path = %tmp_path.display(), error = %rm, "no temp file to remove");
        }
        return Err(e);
    }
    fs::rename(&tmp_path, path)?;
    Ok(())
}

/// Write the header row and one row per record. The target is replaced
/// atomically: rows go to a temp file that is renamed over `path`.
#[tracing::instrument(level = "info", skip(dataset, path), fields(path = %path.as_ref().display()))]
pub fn write_csv<P: AsRef<Path>>(dataset: &Dataset, path: P) -> Result<()> {
    replace_via_tmp(path.as_ref(), |tmp_path| {
        let mut wtr = csv::Writer::from_path(tmp_path)?;
        wtr.write_record(headers())?;
        for record in dataset {
            wtr.write_record(record.to_fields())?;
        }
        wtr.flush()?;
        Ok(())
    })?;
    debug!(rows = dataset.len(), "csv written");
    Ok(())
}

/// Build one typed column of the dataset. A cell whose variant does not
/// match the column kind becomes null, which the non-nullable schema rejects.
fn column_array(dataset: &Dataset, column: Column) -> ArrayRef {
    let values = dataset.iter().map(|r| r.value(column));
    match column.kind() {
        ColumnKind::Text => {
            let arr: StringArray = values
                .map(|v| match v {
                    Value::Text(s) => Some(s),
                    _ => None,
                })
                .collect();
            Arc::new(arr)
        }
        ColumnKind::Real => {
            let arr: Float64Array = values
                .map(|v| match v {
                    Value::Real(f) => Some(f),
                    _ => None,
                })
                .collect();
            Arc::new(arr)
        }
        ColumnKind::Integer => {
            let arr: Int64Array = values
                .map(|v| match v {
                    Value::Integer(i) => Some(i),
                    _ => None,
                })
                .collect();
            Arc::new(arr)
        }
        ColumnKind::Category => {
            let arr: Int8Array = values
                .map(|v| match v {
                    Value::Bit(b) => Some(b as i8),
                    _ => None,
                })
                .collect();
            Arc::new(arr)
        }
        ColumnKind::Flag => {
            let arr: BooleanArray = values
                .map(|v| match v {
                    Value::Bit(b) => Some(b),
                    _ => None,
                })
                .collect();
            Arc::new(arr)
        }
    }
}

/// Convert the dataset into a single Arrow batch with the typed schema.
pub fn to_record_batch(dataset: &Dataset) -> Result<RecordBatch> {
    let columns: Vec<ArrayRef> = Column::ALL
        .iter()
        .map(|c| column_array(dataset, *c))
        .collect();
    Ok(RecordBatch::try_new(build_arrow_schema(), columns)?)
}

/// Write the dataset as a Snappy-compressed parquet file. Returns bytes on disk.
#[tracing::instrument(level = "info", skip(dataset, path), fields(path = %path.as_ref().display()))]
pub fn write_parquet<P: AsRef<Path>>(dataset: &Dataset, path: P) -> Result<u64> {
    let path = path.as_ref();
    let batch = to_record_batch(dataset)?;

    let props = WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .set_key_value_metadata(Some(vec![KeyValue::new(
            CREATED_AT_KEY.to_string(),
            Utc::now().to_rfc3339(),
        )]))
        .build();

    replace_via_tmp(path, |tmp_path| {
        let file = File::create(tmp_path)?;
        let mut writer = ArrowWriter::try_new(file, batch.schema(), Some(props))?;
        writer.write(&batch)?;
        writer.close()?;
        Ok(())
    })?;

    let bytes = fs::metadata(path)?.len();
    info!(rows = batch.num_rows(), bytes, "wrote dataset parquet");
    Ok(bytes)
}
