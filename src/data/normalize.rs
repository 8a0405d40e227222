// ---------------------------------------------------------------------------
// Price normalization – the cleaning step every listing passes through
// ---------------------------------------------------------------------------

/// Convert a raw price string into a single numeric value.
///
/// Listing prices arrive in several textual shapes:
/// * plain numbers: `"100"`, `"99.95"`
/// * currency-prefixed: `"$100"`, `"$99.95"`
/// * ranges: `"$50-$150"`, `"50 - 150"` → the midpoint is used
///
/// Returns `None` for anything that does not fit those shapes. Malformed
/// input is data, not a programming error, so nothing here panics.
///
/// Policy notes:
/// * `"-50"` splits into `["", "50"]` and fails the range parse, so a
///   lone negative price is treated as unparseable.
/// * `"10-20-30"` has three range parts and is likewise rejected.
pub fn clean_price(raw: &str) -> Option<f64> {
    let stripped = raw.replace('$', "");

    if stripped.contains('-') {
        let parts: Vec<&str> = stripped.split('-').collect();
        if parts.len() != 2 {
            return None;
        }
        let low: f64 = parts[0].trim().parse().ok()?;
        let high: f64 = parts[1].trim().parse().ok()?;
        return Some((low + high) / 2.0);
    }

    stripped.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_number() {
        assert_eq!(clean_price("100"), Some(100.0));
        assert_eq!(clean_price("99.95"), Some(99.95));
    }

    #[test]
    fn dollar_prefix_is_stripped() {
        assert_eq!(clean_price("$100"), Some(100.0));
        assert_eq!(clean_price("$ 249.50"), Some(249.5));
    }

    #[test]
    fn range_returns_midpoint() {
        assert_eq!(clean_price("50-150"), Some(100.0));
        assert_eq!(clean_price("$50-$150"), Some(100.0));
        assert_eq!(clean_price("10 - 20"), Some(15.0));
    }

    #[test]
    fn whitespace_is_tolerated() {
        assert_eq!(clean_price("  42  "), Some(42.0));
        assert_eq!(clean_price("$ 10 - 30 "), Some(20.0));
    }

    #[test]
    fn leading_minus_is_unparseable() {
        // "-50" splits into ["", "50"]; the empty first part fails.
        assert_eq!(clean_price("-50"), None);
    }

    #[test]
    fn multi_part_range_is_unparseable() {
        assert_eq!(clean_price("10-20-30"), None);
    }

    #[test]
    fn junk_is_unparseable() {
        assert_eq!(clean_price("free"), None);
        assert_eq!(clean_price(""), None);
        assert_eq!(clean_price("$"), None);
        assert_eq!(clean_price("10-abc"), None);
    }

    #[test]
    fn matches_plain_parse_when_numeric() {
        for s in ["0", "1", "17.25", "$3.99", "1000000"] {
            let plain: f64 = s.replace('$', "").parse().unwrap();
            assert_eq!(clean_price(s), Some(plain));
        }
    }
}
