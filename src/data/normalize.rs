use std::sync::OnceLock;

use regex::Regex;

use super::model::MovieRecord;

// ---------------------------------------------------------------------------
// Field normalizer – messy text columns → numeric derived fields
// ---------------------------------------------------------------------------
//
// The scraped dataset carries three textual columns that need cleaning:
//   rating    "8.5", "", "N/A"
//   votes     "12.5K", "1.2M", "1,200", "abc"
//   duration  "2h 15m", "1h", "45m", ""
//
// All parsers are total: bad input degrades to a default (0 for votes,
// `None` for rating and duration), never an error.

fn hours_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d+)\s*h").expect("valid hours pattern"))
}

fn minutes_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d+)\s*m").expect("valid minutes pattern"))
}

/// Parse a textual rating. Empty and "N/A" mean missing; so does anything
/// that is not a finite number.
pub fn parse_rating(raw: &str) -> Option<f64> {
    let s = raw.trim();
    if s.is_empty() || s.eq_ignore_ascii_case("n/a") {
        return None;
    }
    s.parse::<f64>().ok().filter(|r| r.is_finite())
}

/// Parse a textual vote count. Handles comma grouping and K/M suffixes:
/// `"12.5K"` → 12 500, `"1.2M"` → 1 200 000, `"1,200"` → 1 200.
///
/// Never fails: if numeric parsing breaks down, the digits alone are kept
/// ("~3 400 votes" → 3400) and an empty remainder yields 0.
pub fn parse_votes(raw: &str) -> u64 {
    let stripped = raw.replace(',', "");
    let s = stripped.trim();

    let scaled = if let Some(prefix) = s.strip_suffix(['K', 'k']) {
        prefix.trim().parse::<f64>().ok().map(|v| v * 1_000.0)
    } else if let Some(prefix) = s.strip_suffix(['M', 'm']) {
        prefix.trim().parse::<f64>().ok().map(|v| v * 1_000_000.0)
    } else {
        s.parse::<f64>().ok()
    };

    match scaled {
        // Negative counts are nonsense; clamp instead of recovering digits.
        Some(v) if v.is_finite() => v.max(0.0) as u64,
        _ => {
            // Lossy recovery: keep the digits, drop everything else.
            let digits: String = s.chars().filter(char::is_ascii_digit).collect();
            digits.parse::<u64>().unwrap_or(0)
        }
    }
}

/// Parse a free-text runtime like "2h 15m". The hour and minute tokens are
/// searched independently; either may be absent.
///
/// A zero total is reported as `None`: a zero-length movie is not a
/// meaningful runtime and must not satisfy any duration bucket.
pub fn parse_duration(raw: &str) -> Option<u32> {
    let hours = hours_re()
        .captures(raw)
        .and_then(|c| c[1].parse::<u32>().ok())
        .unwrap_or(0);
    let minutes = minutes_re()
        .captures(raw)
        .and_then(|c| c[1].parse::<u32>().ok())
        .unwrap_or(0);

    let total = hours.saturating_mul(60).saturating_add(minutes);
    (total > 0).then_some(total)
}

/// Compute all derived fields for one record. Applied exactly once per
/// record when a dataset is built.
pub fn normalize(record: &mut MovieRecord) {
    record.rating_numeric = parse_rating(&record.rating);
    record.votes_numeric = parse_votes(&record.votes);
    record.duration_minutes = parse_duration(&record.duration);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rating_plain() {
        assert_eq!(parse_rating("8.5"), Some(8.5));
        assert_eq!(parse_rating(" 7.0 "), Some(7.0));
        assert_eq!(parse_rating("10"), Some(10.0));
    }

    #[test]
    fn test_parse_rating_missing() {
        assert_eq!(parse_rating(""), None);
        assert_eq!(parse_rating("   "), None);
        assert_eq!(parse_rating("N/A"), None);
        assert_eq!(parse_rating("n/a"), None);
        assert_eq!(parse_rating("excellent"), None);
    }

    #[test]
    fn test_parse_votes_suffixes() {
        assert_eq!(parse_votes("12.5K"), 12_500);
        assert_eq!(parse_votes("3K"), 3_000);
        assert_eq!(parse_votes("3k"), 3_000);
        assert_eq!(parse_votes("1.2M"), 1_200_000);
        assert_eq!(parse_votes("2m"), 2_000_000);
    }

    #[test]
    fn test_parse_votes_plain_and_grouped() {
        assert_eq!(parse_votes("1200"), 1_200);
        assert_eq!(parse_votes("1,200"), 1_200);
        assert_eq!(parse_votes("1,234,567"), 1_234_567);
        assert_eq!(parse_votes("987.6"), 987);
    }

    #[test]
    fn test_parse_votes_garbage_defaults_to_zero() {
        assert_eq!(parse_votes(""), 0);
        assert_eq!(parse_votes("abc"), 0);
        assert_eq!(parse_votes("N/A"), 0);
        assert_eq!(parse_votes("-5"), 0);
    }

    #[test]
    fn test_parse_votes_lossy_digit_recovery() {
        assert_eq!(parse_votes("~3400 votes"), 3_400);
        assert_eq!(parse_votes("12..5K"), 125);
    }

    #[test]
    fn test_parse_duration_tokens() {
        assert_eq!(parse_duration("2h 15m"), Some(135));
        assert_eq!(parse_duration("1h"), Some(60));
        assert_eq!(parse_duration("45m"), Some(45));
        assert_eq!(parse_duration("3 h 5 m"), Some(185));
    }

    #[test]
    fn test_parse_duration_undefined() {
        assert_eq!(parse_duration(""), None);
        assert_eq!(parse_duration("garbage"), None);
        assert_eq!(parse_duration("0h 0m"), None);
    }

    #[test]
    fn test_normalize_votes_scenario() {
        // The canonical three-record scenario: ["1,200", "3K", "N/A"].
        let votes = ["1,200", "3K", "N/A"];
        let parsed: Vec<u64> = votes.iter().map(|v| parse_votes(v)).collect();
        assert_eq!(parsed, vec![1_200, 3_000, 0]);
    }

    #[test]
    fn test_normalize_sets_all_derived_fields() {
        let mut rec = MovieRecord::from_raw("X", "Action", "9.1", "2.5K", "1h 30m");
        normalize(&mut rec);
        assert_eq!(rec.rating_numeric, Some(9.1));
        assert_eq!(rec.votes_numeric, 2_500);
        assert_eq!(rec.duration_minutes, Some(90));
    }
}
