// src/process/mod.rs
pub mod normalize;
pub mod reconcile;
pub mod score;
pub mod utils;

use rayon::prelude::*;
use std::{fs, path::Path};
use tracing::{debug, info};

use crate::dataset::Record;
use crate::error::Result;
use normalize::normalize_line;
use reconcile::{is_skippable, reconcile_line};

/// Reconcile, normalize and score one report line.
///
/// `line_no` is 1-based and only used for error context.
pub fn extract_line(line_no: usize, line: &str) -> Result<Option<Record>> {
    let Some(reconciled) = reconcile_line(line_no, line)? else {
        return Ok(None);
    };
    let raw = normalize_line(&reconciled)?;
    Ok(Some(Record::from_raw(raw)))
}

/// Turn a whole report into records, in source order.
///
/// All-or-nothing: the first malformed line (in source order) is returned as
/// the error and no records are produced.
pub fn extract_lines(text: &str) -> Result<Vec<Record>> {
    let data_lines: Vec<(usize, &str)> = text
        .lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l))
        .filter(|(_, l)| !is_skippable(l))
        .collect();
    debug!(data_lines = data_lines.len(), "tokenizing report");

    // Lines are independent; map in parallel, then fold in order so the
    // reported error is always the earliest one.
    let results: Vec<Result<Option<Record>>> = data_lines
        .par_iter()
        .map(|(line_no, line)| extract_line(*line_no, line))
        .collect();

    let mut records = Vec::with_capacity(results.len());
    for result in results {
        if let Some(record) = result? {
            records.push(record);
        }
    }
    Ok(records)
}

/// Read a report file from disk and extract it.
#[tracing::instrument(level = "info", skip(path), fields(path = %path.as_ref().display()))]
pub fn extract_report<P: AsRef<Path>>(path: P) -> Result<Vec<Record>> {
    let text = fs::read_to_string(&path)?;
    let records = extract_lines(&text)?;
    info!(records = records.len(), "extracted report");
    Ok(records)
}
