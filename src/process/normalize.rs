use tracing::trace;

use crate::error::{DatasetError, Result};
use crate::process::reconcile::ReconciledLine;
use crate::process::score::Segment;
use crate::process::utils::{
    parse_currency, parse_integer, parse_percent, parse_real, parse_thousands,
};

/// Token positions in a reconciled report line.
pub mod pos {
    pub const NAME: usize = 0;
    pub const MARKET_SHARE: usize = 1;
    pub const UNITS_SOLD: usize = 2;
    pub const REVISION_DATE: usize = 3;
    pub const STOCK_OUT: usize = 4;
    pub const PFMN: usize = 5;
    pub const SIZE: usize = 6;
    pub const PRICE: usize = 7;
    pub const MTBF: usize = 8;
    pub const AGE: usize = 9;
    pub const PROMO_BUDGET: usize = 10;
    pub const AWARENESS: usize = 11;
    pub const SALES_BUDGET: usize = 12;
    pub const ACCESSIBILITY: usize = 13;
    pub const CSS: usize = 14;
    pub const SEGMENT: usize = 15;
    pub const ROUND: usize = 16;
}

/// A record with every directly-parsed field set and nothing derived yet.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    pub name: String,
    /// Fraction, nominally in [0, 1].
    pub market_share: f64,
    pub units_sold: i64,
    pub last_revision_date: String,
    pub stock_out: bool,
    pub pfmn: f64,
    pub size: f64,
    pub price: f64,
    /// Reliability in hours.
    pub mtbf: i64,
    pub age: f64,
    pub promo_budget: f64,
    pub customer_awareness: f64,
    pub sales_budget: f64,
    pub customer_accessibility: f64,
    pub segment: Segment,
    pub round: i64,
    pub css: f64,
}

/// Map the fixed token positions of a reconciled line onto typed fields.
pub fn normalize_line(line: &ReconciledLine<'_>) -> Result<RawRecord> {
    let field = |idx: usize, what: &str, parsed: Option<f64>| -> Result<f64> {
        parsed.ok_or_else(|| bad_token(line, idx, what))
    };
    let whole = |idx: usize, what: &str, parsed: Option<i64>| -> Result<i64> {
        parsed.ok_or_else(|| bad_token(line, idx, what))
    };

    let segment = Segment::from_literal(line.get(pos::SEGMENT))
        .ok_or_else(|| bad_token(line, pos::SEGMENT, "segment (LOW or HIGH)"))?;

    let record = RawRecord {
        name: line.get(pos::NAME).to_string(),
        market_share: field(
            pos::MARKET_SHARE,
            "percentage",
            parse_percent(line.get(pos::MARKET_SHARE)),
        )?,
        units_sold: whole(
            pos::UNITS_SOLD,
            "unit count",
            parse_thousands(line.get(pos::UNITS_SOLD)),
        )?,
        last_revision_date: line.get(pos::REVISION_DATE).to_string(),
        stock_out: line.stocked_out(),
        pfmn: field(pos::PFMN, "number", parse_real(line.get(pos::PFMN)))?,
        size: field(pos::SIZE, "number", parse_real(line.get(pos::SIZE)))?,
        price: field(pos::PRICE, "currency", parse_currency(line.get(pos::PRICE)))?,
        mtbf: whole(pos::MTBF, "integer", parse_integer(line.get(pos::MTBF)))?,
        age: field(pos::AGE, "number", parse_real(line.get(pos::AGE)))?,
        promo_budget: field(
            pos::PROMO_BUDGET,
            "currency",
            parse_currency(line.get(pos::PROMO_BUDGET)),
        )?,
        customer_awareness: field(
            pos::AWARENESS,
            "percentage",
            parse_percent(line.get(pos::AWARENESS)),
        )?,
        sales_budget: field(
            pos::SALES_BUDGET,
            "currency",
            parse_currency(line.get(pos::SALES_BUDGET)),
        )?,
        customer_accessibility: field(
            pos::ACCESSIBILITY,
            "percentage",
            parse_percent(line.get(pos::ACCESSIBILITY)),
        )?,
        segment,
        round: whole(pos::ROUND, "integer", parse_integer(line.get(pos::ROUND)))?,
        css: field(pos::CSS, "number", parse_real(line.get(pos::CSS)))?,
    };

    trace!(line = line.line_no, name = %record.name, "normalized");
    Ok(record)
}

fn bad_token(line: &ReconciledLine<'_>, idx: usize, what: &str) -> DatasetError {
    DatasetError::format(
        line.line_no,
        line.tokens.join(" "),
        format!("token {} `{}` is not a valid {}", idx, line.get(idx), what),
    )
}
