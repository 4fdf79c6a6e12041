//! Numeric views of a dataset in the shape the CSS model consumes.
//!
//! Stocked-out products are excluded, identity and outcome columns (name,
//! market share, units sold, revision date, stock-out) are dropped, and the
//! remaining columns are split into one feature matrix per segment with CSS
//! as the target.

use tracing::debug;

use crate::dataset::{Dataset, Record};
use crate::process::score::Segment;
use crate::schema::Column;

pub const FEATURE_COUNT: usize = 19;

/// Feature columns in matrix order. CSS is the target and not listed.
pub const MODEL_FEATURE_COLUMNS: [Column; FEATURE_COUNT] = [
    Column::Pfmn,
    Column::Size,
    Column::PositionDifference,
    Column::Price,
    Column::PriceDifference,
    Column::Mtbf,
    Column::MtbfDifference,
    Column::Age,
    Column::AgeDifference,
    Column::PromoBudget,
    Column::CustomerAwareness,
    Column::SalesBudget,
    Column::CustomerAccessibility,
    Column::Segment,
    Column::Round,
    Column::PositionOutOfRange,
    Column::PriceOutOfRange,
    Column::MtbfOutOfRange,
    Column::AgeOutOfRange,
];

/// Feature rows and CSS targets for one segment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SegmentMatrix {
    pub features: Vec<[f64; FEATURE_COUNT]>,
    pub targets: Vec<f64>,
}

impl SegmentMatrix {
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    fn push(&mut self, record: &Record) {
        let mut row = [0.0; FEATURE_COUNT];
        for (slot, col) in row.iter_mut().zip(MODEL_FEATURE_COLUMNS.iter()) {
            // every feature column is numeric
            *slot = record.value(*col).as_f64().unwrap_or(f64::NAN);
        }
        self.features.push(row);
        self.targets.push(record.raw.css);
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelView {
    pub low: SegmentMatrix,
    pub high: SegmentMatrix,
    /// Records left out because the product stocked out.
    pub stocked_out: usize,
}

impl ModelView {
    pub fn from_dataset(dataset: &Dataset) -> Self {
        let mut view = ModelView::default();
        for record in dataset {
            if record.raw.stock_out {
                view.stocked_out += 1;
                continue;
            }
            match record.raw.segment {
                Segment::Low => view.low.push(record),
                Segment::High => view.high.push(record),
            }
        }
        debug!(
            low = view.low.len(),
            high = view.high.len(),
            stocked_out = view.stocked_out,
            "built model view"
        );
        view
    }

    pub fn segment(&self, segment: Segment) -> &SegmentMatrix {
        match segment {
            Segment::Low => &self.low,
            Segment::High => &self.high,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::REPORT;
    use crate::process::extract_lines;
    use crate::schema::ColumnKind;

    #[test]
    fn feature_columns_are_numeric_and_exclude_dropped() {
        for col in MODEL_FEATURE_COLUMNS {
            assert_ne!(col.kind(), ColumnKind::Text);
            assert!(col.index() > Column::StockOut.index());
            assert_ne!(col, Column::Css);
        }
    }

    #[test]
    fn splits_by_segment_without_stock_outs() {
        let dataset = Dataset::new(extract_lines(REPORT).unwrap());
        let view = ModelView::from_dataset(&dataset);

        assert_eq!(view.stocked_out, 1);
        assert_eq!(view.low.len(), 1);
        assert_eq!(view.high.len(), 1);
        assert_eq!(view.segment(Segment::Low).targets, vec![35.0]);
        assert_eq!(view.segment(Segment::High).targets, vec![52.0]);

        let acre = view.low.features[0];
        assert_eq!(acre[0], 5.5); // Pfmn
        assert_eq!(acre[5], 17500.0); // MTBF
        assert_eq!(acre[6], 2500.0); // MTBF Difference
        assert_eq!(acre[13], 0.0); // Segment
        assert_eq!(acre[14], 1.0); // Round

        let bold = view.high.features[0];
        assert_eq!(bold[13], 1.0);
    }

    #[test]
    fn empty_dataset_gives_empty_view() {
        let view = ModelView::from_dataset(&Dataset::default());
        assert!(view.low.is_empty());
        assert!(view.high.is_empty());
        assert_eq!(view.stocked_out, 0);
    }
}
