use crate::error::{DatasetError, Result};

/// Token the pasted report carries in the stock-out column when a product sold out.
pub const STOCK_OUT_MARKER: &str = "YES";

/// Token inserted when the stock-out column was blank in the paste.
pub const STOCK_OUT_PLACEHOLDER: &str = "NO";

/// Position of the (optional) stock-out column.
pub const STOCK_OUT_POSITION: usize = 4;

/// Width of every reconciled line.
pub const RECONCILED_WIDTH: usize = 17;

/// A data line whose token positions are stable regardless of the stock-out column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconciledLine<'a> {
    pub line_no: usize,
    pub tokens: [&'a str; RECONCILED_WIDTH],
}

impl<'a> ReconciledLine<'a> {
    pub fn get(&self, idx: usize) -> &'a str {
        self.tokens[idx]
    }

    pub fn stocked_out(&self) -> bool {
        self.tokens[STOCK_OUT_POSITION] == STOCK_OUT_MARKER
    }
}

/// True for comment (`#`) and blank lines.
pub fn is_skippable(line: &str) -> bool {
    line.starts_with('#') || line.trim().is_empty()
}

/// Tokenize one report line and repair the optional stock-out column.
///
/// Returns `Ok(None)` for lines that carry no record. A data line must split
/// into 16 tokens (stock-out column blank) or 17 tokens with the marker at
/// position 4; anything else is a format error.
pub fn reconcile_line(line_no: usize, line: &str) -> Result<Option<ReconciledLine<'_>>> {
    if is_skippable(line) {
        return Ok(None);
    }

    let mut tokens: Vec<&str> = line.split_whitespace().collect();
    let found = tokens.len();
    if found != RECONCILED_WIDTH - 1 && found != RECONCILED_WIDTH {
        return Err(DatasetError::format(
            line_no,
            line.trim_end(),
            format!(
                "expected {} or {} whitespace-separated tokens, found {}",
                RECONCILED_WIDTH - 1,
                RECONCILED_WIDTH,
                found
            ),
        ));
    }

    if tokens[STOCK_OUT_POSITION] != STOCK_OUT_MARKER {
        tokens.insert(STOCK_OUT_POSITION, STOCK_OUT_PLACEHOLDER);
    }

    let width = tokens.len();
    let tokens: [&str; RECONCILED_WIDTH] = tokens.try_into().map_err(|_| {
        DatasetError::format(
            line_no,
            line.trim_end(),
            format!(
                "expected {} tokens after reconciling the stock-out column, found {}",
                RECONCILED_WIDTH, width
            ),
        )
    })?;

    Ok(Some(ReconciledLine { line_no, tokens }))
}

#[cfg(test)]
mod tests {
    use super::*;

    const STOCKED: &str = "Able 12.50% 1,234 6/2/2024 YES 5.3 14.7 $28.00 18000 2.1 $1,400 55% $1,500 60% 40 LOW 1";
    const NOT_STOCKED: &str = "Acre 10.00% 987 5/25/2024 5.5 14.5 $20.00 17500 3.1 $1,000 50% $1,100 45% 35 LOW 1";

    #[test]
    fn skips_comments_and_blanks() {
        assert_eq!(reconcile_line(1, "# header comment").unwrap(), None);
        assert_eq!(reconcile_line(2, "").unwrap(), None);
        assert_eq!(reconcile_line(3, "   \t").unwrap(), None);
    }

    #[test]
    fn sixteen_tokens_gain_placeholder() {
        let line = reconcile_line(1, NOT_STOCKED).unwrap().unwrap();
        assert_eq!(line.tokens.len(), RECONCILED_WIDTH);
        assert_eq!(line.get(STOCK_OUT_POSITION), STOCK_OUT_PLACEHOLDER);
        assert_eq!(line.get(3), "5/25/2024");
        assert_eq!(line.get(5), "5.5");
        assert_eq!(line.get(16), "1");
        assert!(!line.stocked_out());
    }

    #[test]
    fn seventeen_tokens_with_marker_untouched() {
        let line = reconcile_line(7, STOCKED).unwrap().unwrap();
        let raw: Vec<&str> = STOCKED.split_whitespace().collect();
        assert_eq!(line.tokens.to_vec(), raw);
        assert_eq!(line.line_no, 7);
        assert!(line.stocked_out());
    }

    #[test]
    fn fifteen_tokens_rejected() {
        let short = "Acre 10.00% 987 5/25/2024 5.5 14.5 $20.00 17500 3.1 $1,000 50% $1,100 45% 35 LOW";
        let err = reconcile_line(4, short).unwrap_err();
        match err {
            DatasetError::Format { line, message, .. } => {
                assert_eq!(line, 4);
                assert!(message.contains("found 15"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn seventeen_tokens_without_marker_rejected() {
        let extra = format!("{NOT_STOCKED} extra");
        assert!(matches!(
            reconcile_line(1, &extra),
            Err(DatasetError::Format { .. })
        ));
    }

    #[test]
    fn sixteen_tokens_with_marker_rejected() {
        let missing = "Able 12.50% 1,234 6/2/2024 YES 5.3 14.7 $28.00 18000 2.1 $1,400 55% $1,500 60% 40 LOW";
        assert!(matches!(
            reconcile_line(1, missing),
            Err(DatasetError::Format { .. })
        ));
    }
}
