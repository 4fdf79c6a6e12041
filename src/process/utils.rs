/// `"45.20%"` → `0.452`. Values outside [0, 1] pass through.
pub fn parse_percent(raw: &str) -> Option<f64> {
    let v: f64 = raw.trim_end_matches('%').parse().ok()?;
    Some(v / 100.0)
}

/// `"$1,250.00"` → `1250.0`. Drops every `$` and `,`.
pub fn parse_currency(raw: &str) -> Option<f64> {
    let cleaned: String = raw.chars().filter(|c| *c != '$' && *c != ',').collect();
    cleaned.parse().ok()
}

/// `"1,234"` → `1234`.
pub fn parse_thousands(raw: &str) -> Option<i64> {
    let cleaned: String = raw.chars().filter(|c| *c != ',').collect();
    cleaned.parse().ok()
}

pub fn parse_real(raw: &str) -> Option<f64> {
    raw.parse().ok()
}

pub fn parse_integer(raw: &str) -> Option<i64> {
    raw.parse().ok()
}

/// Text form of a 0/1 encoded value.
pub fn bit(b: bool) -> &'static str {
    if b {
        "1"
    } else {
        "0"
    }
}

/// Reads a 0/1 cell; also accepts the `True`/`False` spelling older exports used.
pub fn parse_bit(raw: &str) -> Option<bool> {
    match raw.trim() {
        "1" | "1.0" | "True" | "true" => Some(true),
        "0" | "0.0" | "False" | "false" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent() {
        assert_eq!(parse_percent("25%"), Some(0.25));
        assert_eq!(parse_percent("12.5"), Some(0.125));
        assert_eq!(parse_percent("150%"), Some(1.5));
        assert_eq!(parse_percent("abc%"), None);
        assert_eq!(parse_percent("%"), None);
    }

    #[test]
    fn currency() {
        assert_eq!(parse_currency("$28.00"), Some(28.0));
        assert_eq!(parse_currency("$1,400,000"), Some(1_400_000.0));
        assert_eq!(parse_currency("1500"), Some(1500.0));
        assert_eq!(parse_currency("$"), None);
        assert_eq!(parse_currency("USD12"), None);
    }

    #[test]
    fn thousands() {
        assert_eq!(parse_thousands("1,234"), Some(1234));
        assert_eq!(parse_thousands("987"), Some(987));
        assert_eq!(parse_thousands("1,234.5"), None);
    }

    #[test]
    fn plain_numbers() {
        assert_eq!(parse_real("5.3"), Some(5.3));
        assert_eq!(parse_real("5,3"), None);
        assert_eq!(parse_integer("18000"), Some(18000));
        assert_eq!(parse_integer("18000.5"), None);
    }

    #[test]
    fn bits() {
        assert_eq!(bit(true), "1");
        assert_eq!(parse_bit("0"), Some(false));
        assert_eq!(parse_bit("True"), Some(true));
        assert_eq!(parse_bit("2"), None);
    }
}
