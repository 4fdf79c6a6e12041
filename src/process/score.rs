//! Segment-dependent "ideal value" deltas.
//!
//! Each scoring function is a pure function of one record's own fields, so
//! records can be scored in any order or in parallel.

use crate::process::normalize::RawRecord;

/// Market category a product competes in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Low-tech, encoded 0.
    Low,
    /// High-tech, encoded 1.
    High,
}

impl Segment {
    pub fn code(&self) -> i8 {
        match self {
            Segment::Low => 0,
            Segment::High => 1,
        }
    }

    /// Reads the literal appended to each report line.
    pub fn from_literal(s: &str) -> Option<Self> {
        match s {
            "LOW" => Some(Segment::Low),
            "HIGH" => Some(Segment::High),
            _ => None,
        }
    }
}

/// A derived value and whether it crossed its severity threshold.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Score {
    pub value: f64,
    pub out_of_range: bool,
}

impl Score {
    fn against(value: f64, threshold: f64) -> Self {
        Score {
            value,
            out_of_range: value >= threshold,
        }
    }
}

pub const POSITION_THRESHOLD: f64 = 4.0;
pub const PRICE_THRESHOLD: f64 = 20.0;
pub const RELIABILITY_THRESHOLD: f64 = 6000.0;
pub const AGE_THRESHOLD: f64 = 1.0;

/// Ideal (performance, size) for a segment in a given round.
pub fn ideal_position(round: i64, segment: Segment) -> (f64, f64) {
    let r = round as f64;
    match segment {
        Segment::Low => (4.8 + 0.5 * r, 15.2 - 0.5 * r),
        Segment::High => (7.4 + 0.7 * r, 12.6 - 0.7 * r),
    }
}

/// Euclidean distance from the round's ideal spot on the perceptual map.
pub fn position_score(pfmn: f64, size: f64, round: i64, segment: Segment) -> Score {
    let (ideal_pfmn, ideal_size) = ideal_position(round, segment);
    let distance = (pfmn - ideal_pfmn).hypot(size - ideal_size);
    Score::against(distance, POSITION_THRESHOLD)
}

/// Signed distance from the segment's ideal price; negative is underpriced.
pub fn price_score(price: f64, segment: Segment) -> Score {
    let ideal = match segment {
        Segment::Low => 15.0,
        Segment::High => 25.0,
    };
    Score::against(price - ideal, PRICE_THRESHOLD)
}

/// Shortfall below the ideal MTBF. Exceeding the ideal earns nothing.
pub fn reliability_score(mtbf: i64, segment: Segment) -> Score {
    let ideal: i64 = match segment {
        Segment::Low => 20_000,
        Segment::High => 23_000,
    };
    let shortfall = ideal.saturating_sub(mtbf).max(0);
    Score::against(shortfall as f64, RELIABILITY_THRESHOLD)
}

/// Low-tech buyers want age 3; high-tech buyers want brand new (age 0).
pub fn age_score(age: f64, segment: Segment) -> Score {
    let diff = match segment {
        Segment::Low => (age - 3.0).abs(),
        Segment::High => age,
    };
    Score::against(diff, AGE_THRESHOLD)
}

/// The four derived scores of one record.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DerivedFeatures {
    pub position: Score,
    pub price: Score,
    pub reliability: Score,
    pub age: Score,
}

impl DerivedFeatures {
    pub fn compute(raw: &RawRecord) -> Self {
        DerivedFeatures {
            position: position_score(raw.pfmn, raw.size, raw.round, raw.segment),
            price: price_score(raw.price, raw.segment),
            reliability: reliability_score(raw.mtbf, raw.segment),
            age: age_score(raw.age, raw.segment),
        }
    }
}
