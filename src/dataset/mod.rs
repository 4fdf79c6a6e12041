// src/dataset/mod.rs
pub mod load;
pub mod write;

use std::fmt;
use std::path::Path;
use tracing::info;

use crate::error::{DatasetError, Result};
use crate::process::{
    self,
    normalize::RawRecord,
    score::{DerivedFeatures, Score, Segment},
    utils::{bit, parse_bit, parse_integer, parse_real},
};
use crate::schema::{headers, Column, ColumnKind, COLUMN_COUNT};

/// A fully-derived row: the parsed fields plus their four scores.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub raw: RawRecord,
    pub derived: DerivedFeatures,
}

/// A single typed cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value<'a> {
    Text(&'a str),
    Real(f64),
    Integer(i64),
    /// 0/1 encoded category or flag.
    Bit(bool),
}

impl Value<'_> {
    /// Numeric view; text has none.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Text(_) => None,
            Value::Real(v) => Some(*v),
            Value::Integer(v) => Some(*v as f64),
            Value::Bit(b) => Some(if *b { 1.0 } else { 0.0 }),
        }
    }
}

impl fmt::Display for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) => f.write_str(s),
            Value::Real(v) => write!(f, "{}", v),
            Value::Integer(v) => write!(f, "{}", v),
            Value::Bit(b) => f.write_str(bit(*b)),
        }
    }
}

impl Record {
    /// Score a freshly normalized record.
    pub fn from_raw(raw: RawRecord) -> Self {
        let derived = DerivedFeatures::compute(&raw);
        Record { raw, derived }
    }

    pub fn value(&self, column: Column) -> Value<'_> {
        let r = &self.raw;
        let d = &self.derived;
        match column {
            Column::Name => Value::Text(&r.name),
            Column::MarketShare => Value::Real(r.market_share),
            Column::UnitsSold => Value::Integer(r.units_sold),
            Column::LastRevisionDate => Value::Text(&r.last_revision_date),
            Column::StockOut => Value::Bit(r.stock_out),
            Column::Pfmn => Value::Real(r.pfmn),
            Column::Size => Value::Real(r.size),
            Column::PositionDifference => Value::Real(d.position.value),
            Column::Price => Value::Real(r.price),
            Column::PriceDifference => Value::Real(d.price.value),
            Column::Mtbf => Value::Integer(r.mtbf),
            Column::MtbfDifference => Value::Real(d.reliability.value),
            Column::Age => Value::Real(r.age),
            Column::AgeDifference => Value::Real(d.age.value),
            Column::PromoBudget => Value::Real(r.promo_budget),
            Column::CustomerAwareness => Value::Real(r.customer_awareness),
            Column::SalesBudget => Value::Real(r.sales_budget),
            Column::CustomerAccessibility => Value::Real(r.customer_accessibility),
            Column::Segment => Value::Bit(r.segment == Segment::High),
            Column::Round => Value::Integer(r.round),
            Column::PositionOutOfRange => Value::Bit(d.position.out_of_range),
            Column::PriceOutOfRange => Value::Bit(d.price.out_of_range),
            Column::MtbfOutOfRange => Value::Bit(d.reliability.out_of_range),
            Column::AgeOutOfRange => Value::Bit(d.age.out_of_range),
            Column::Css => Value::Real(r.css),
        }
    }

    /// The 25 cells in column order, as text.
    pub fn to_fields(&self) -> Vec<String> {
        Column::ALL
            .iter()
            .map(|c| self.value(*c).to_string())
            .collect()
    }

    /// Rebuild a record from an exported row. Derived cells are taken as
    /// written, not recomputed.
    ///
    /// `row` is the 1-based row number used in error messages.
    pub fn from_fields<S: AsRef<str>>(row: usize, cells: &[S]) -> Result<Self> {
        if cells.len() != COLUMN_COUNT {
            return Err(DatasetError::Schema {
                row,
                found: cells.len(),
                expected: COLUMN_COUNT,
            });
        }
        let cell = |c: Column| cells[c.index()].as_ref().trim();
        let bad = |c: Column| {
            let expected = match c.kind() {
                ColumnKind::Text => "text",
                ColumnKind::Real => "number",
                ColumnKind::Integer => "integer",
                ColumnKind::Category | ColumnKind::Flag => "0 or 1",
            };
            DatasetError::format(
                row,
                cell(c),
                format!("column `{}` expects {}", c.header(), expected),
            )
        };
        let real = |c: Column| parse_real(cell(c)).ok_or_else(|| bad(c));
        let int = |c: Column| parse_integer(cell(c)).ok_or_else(|| bad(c));
        let flag = |c: Column| parse_bit(cell(c)).ok_or_else(|| bad(c));
        let score = |value: Column, out: Column| -> Result<Score> {
            Ok(Score {
                value: real(value)?,
                out_of_range: flag(out)?,
            })
        };

        let segment = if flag(Column::Segment)? {
            Segment::High
        } else {
            Segment::Low
        };

        let raw = RawRecord {
            name: cell(Column::Name).to_string(),
            market_share: real(Column::MarketShare)?,
            units_sold: int(Column::UnitsSold)?,
            last_revision_date: cell(Column::LastRevisionDate).to_string(),
            stock_out: flag(Column::StockOut)?,
            pfmn: real(Column::Pfmn)?,
            size: real(Column::Size)?,
            price: real(Column::Price)?,
            mtbf: int(Column::Mtbf)?,
            age: real(Column::Age)?,
            promo_budget: real(Column::PromoBudget)?,
            customer_awareness: real(Column::CustomerAwareness)?,
            sales_budget: real(Column::SalesBudget)?,
            customer_accessibility: real(Column::CustomerAccessibility)?,
            segment,
            round: int(Column::Round)?,
            css: real(Column::Css)?,
        };
        let derived = DerivedFeatures {
            position: score(Column::PositionDifference, Column::PositionOutOfRange)?,
            price: score(Column::PriceDifference, Column::PriceOutOfRange)?,
            reliability: score(Column::MtbfDifference, Column::MtbfOutOfRange)?,
            age: score(Column::AgeDifference, Column::AgeOutOfRange)?,
        };

        Ok(Record { raw, derived })
    }
}

/// An ordered table of records sharing the fixed 25-column contract.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    pub fn new(records: Vec<Record>) -> Self {
        Dataset { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// Text rows; with `with_headers` the first row is the header list.
    pub fn rows(&self, with_headers: bool) -> Vec<Vec<String>> {
        let mut out = Vec::with_capacity(self.records.len() + 1);
        if with_headers {
            out.push(headers().iter().map(|h| h.to_string()).collect());
        }
        out.extend(self.records.iter().map(Record::to_fields));
        out
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Owns one table and rebuilds it from scratch on every extract or load.
///
/// A failed call leaves the previously held table in place.
#[derive(Debug, Default)]
pub struct ExtractData {
    dataset: Dataset,
}

impl ExtractData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the table with the records extracted from a text report.
    pub fn extract_data<P: AsRef<Path>>(&mut self, input_file: P) -> Result<()> {
        let records = process::extract_report(input_file)?;
        self.dataset = Dataset::new(records);
        Ok(())
    }

    /// Same as [`ExtractData::extract_data`] for report text already in memory.
    pub fn extract_str(&mut self, report: &str) -> Result<()> {
        let records = process::extract_lines(report)?;
        self.dataset = Dataset::new(records);
        Ok(())
    }

    /// Replace the table with the contents of a previously exported CSV.
    pub fn load_dataset<P: AsRef<Path>>(&mut self, input_file: P) -> Result<()> {
        self.dataset = load::load_csv(input_file)?;
        Ok(())
    }

    pub fn write_to_csv<P: AsRef<Path>>(&self, file_name: P) -> Result<()> {
        write::write_csv(&self.dataset, file_name)?;
        info!(records = self.dataset.len(), "wrote dataset csv");
        Ok(())
    }

    pub fn write_to_parquet<P: AsRef<Path>>(&self, file_name: P) -> Result<u64> {
        write::write_parquet(&self.dataset, file_name)
    }

    /// A copy of the current table.
    pub fn dataset(&self) -> Dataset {
        self.dataset.clone()
    }

    pub fn rows(&self, with_headers: bool) -> Vec<Vec<String>> {
        self.dataset.rows(with_headers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{init_test_logging, REPORT};

    #[test]
    fn record_renders_25_fields() {
        let records = process::extract_lines(REPORT).unwrap();
        let able = records[0].to_fields();
        assert_eq!(able.len(), COLUMN_COUNT);
        assert_eq!(able[Column::Name.index()], "Able");
        assert_eq!(able[Column::MarketShare.index()], "0.125");
        assert_eq!(able[Column::UnitsSold.index()], "1234");
        assert_eq!(able[Column::StockOut.index()], "1");
        assert_eq!(able[Column::Price.index()], "28");
        assert_eq!(able[Column::PriceDifference.index()], "13");
        assert_eq!(able[Column::MtbfDifference.index()], "2000");
        assert_eq!(able[Column::Segment.index()], "0");
        assert_eq!(able[Column::PositionOutOfRange.index()], "0");
        assert_eq!(able[Column::Css.index()], "40");

        let bold = records[2].to_fields();
        assert_eq!(bold[Column::Segment.index()], "1");
        assert_eq!(bold[Column::Round.index()], "2");
    }

    #[test]
    fn fields_round_trip_through_text() {
        for record in process::extract_lines(REPORT).unwrap() {
            let back = Record::from_fields(1, &record.to_fields()).unwrap();
            assert_eq!(back, record);
        }
    }

    #[test]
    fn from_fields_checks_width() {
        let cells = vec!["x"; 24];
        match Record::from_fields(3, &cells) {
            Err(DatasetError::Schema {
                row,
                found,
                expected,
            }) => {
                assert_eq!((row, found, expected), (3, 24, 25));
            }
            other => panic!("expected schema error, got {other:?}"),
        }
    }

    #[test]
    fn from_fields_rejects_bad_cell() {
        let records = process::extract_lines(REPORT).unwrap();
        let mut cells = records[1].to_fields();
        cells[Column::Mtbf.index()] = "lots".to_string();
        let err = Record::from_fields(2, &cells).unwrap_err();
        assert!(err.to_string().contains("MTBF"));
    }

    #[test]
    fn rows_with_and_without_headers() {
        let mut data = ExtractData::new();
        data.extract_str(REPORT).unwrap();
        let with = data.rows(true);
        let without = data.rows(false);
        assert_eq!(with.len(), 4);
        assert_eq!(without.len(), 3);
        assert_eq!(with[0][0], "Name");
        assert_eq!(with[1..], without[..]);
    }

    #[test]
    fn failed_extract_keeps_previous_table() {
        init_test_logging();
        let mut data = ExtractData::new();
        data.extract_str(REPORT).unwrap();
        let before = data.dataset();

        let bad = "Able 12.50% 1,234 6/2/2024 5.3 14.7 $28.00 18000 2.1 $1,400 55% $1,500 60% 40 LOW";
        assert!(data.extract_str(bad).is_err());
        assert_eq!(data.dataset(), before);
    }

    #[test]
    fn each_extract_replaces_the_table() {
        let mut data = ExtractData::new();
        data.extract_str(REPORT).unwrap();
        data.extract_str(REPORT).unwrap();
        assert_eq!(data.dataset().len(), 3);
    }

    #[test]
    fn returned_dataset_is_a_copy() {
        let mut data = ExtractData::new();
        data.extract_str(REPORT).unwrap();
        let copy = data.dataset();
        data.extract_str("# empty\n").unwrap();
        assert_eq!(copy.len(), 3);
        assert!(data.dataset().is_empty());
    }

    #[test]
    fn file_extract_export_and_reload() -> anyhow::Result<()> {
        init_test_logging();
        let dir = tempfile::tempdir()?;
        let report = dir.path().join("report.txt");
        let csv = dir.path().join("dataset.csv");
        let parquet = dir.path().join("dataset.parquet");
        std::fs::write(&report, REPORT)?;

        let mut data = ExtractData::new();
        data.extract_data(&report)?;
        let extracted = data.dataset();
        assert_eq!(extracted.len(), 3);
        data.write_to_csv(&csv)?;
        assert!(data.write_to_parquet(&parquet)? > 0);

        // missing input is an io error and the table survives
        let missing = dir.path().join("missing.csv");
        assert!(matches!(
            data.load_dataset(&missing),
            Err(DatasetError::Io(_))
        ));
        assert_eq!(data.dataset(), extracted);

        let mut reloaded = ExtractData::new();
        reloaded.load_dataset(&csv)?;
        assert_eq!(reloaded.dataset(), extracted);
        assert_eq!(reloaded.rows(true), data.rows(true));
        Ok(())
    }
}
