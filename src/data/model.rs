use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::normalize;

// ---------------------------------------------------------------------------
// MovieRecord – one row of the dataset
// ---------------------------------------------------------------------------

/// A single movie: the raw text columns as they arrive from the store or the
/// fallback CSV, plus the derived numeric fields computed at load time.
#[derive(Debug, Clone, Default)]
pub struct MovieRecord {
    pub title: String,
    /// Free-text genre label, possibly multi-valued ("Action, Comedy").
    pub genre: String,
    pub rating: String,
    pub votes: String,
    pub duration: String,

    /// Parsed rating in [0, 10]; `None` for empty / "N/A" / non-numeric text.
    pub rating_numeric: Option<f64>,
    /// Parsed vote count. Always defined: any parse failure yields 0.
    pub votes_numeric: u64,
    /// Total runtime in minutes; `None` when unparseable or zero.
    pub duration_minutes: Option<u32>,
}

impl MovieRecord {
    /// Build a record from raw text fields. Derived fields start at their
    /// defaults; [`MovieDataset::from_records`] runs the normalizer.
    pub fn from_raw(
        title: impl Into<String>,
        genre: impl Into<String>,
        rating: impl Into<String>,
        votes: impl Into<String>,
        duration: impl Into<String>,
    ) -> Self {
        MovieRecord {
            title: title.into(),
            genre: genre.into(),
            rating: rating.into(),
            votes: votes.into(),
            duration: duration.into(),
            ..Default::default()
        }
    }
}

// ---------------------------------------------------------------------------
// DurationBucket – runtime filter ranges
// ---------------------------------------------------------------------------

/// Runtime buckets offered by the duration filter.
///
/// A record with undefined `duration_minutes` matches only [`DurationBucket::All`]:
/// an unknown runtime is never treated as "under two hours".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DurationBucket {
    #[default]
    All,
    Under2h,
    Between2And3h,
    Over3h,
}

impl DurationBucket {
    pub const ALL_BUCKETS: [DurationBucket; 4] = [
        DurationBucket::All,
        DurationBucket::Under2h,
        DurationBucket::Between2And3h,
        DurationBucket::Over3h,
    ];

    /// UI label, matching the selector wording.
    pub fn label(self) -> &'static str {
        match self {
            DurationBucket::All => "All",
            DurationBucket::Under2h => "< 2 hrs",
            DurationBucket::Between2And3h => "2-3 hrs",
            DurationBucket::Over3h => "> 3 hrs",
        }
    }

    /// Whether a runtime falls in this bucket.
    pub fn contains(self, minutes: Option<u32>) -> bool {
        match self {
            DurationBucket::All => true,
            DurationBucket::Under2h => matches!(minutes, Some(m) if m < 120),
            DurationBucket::Between2And3h => matches!(minutes, Some(m) if (120..=180).contains(&m)),
            DurationBucket::Over3h => matches!(minutes, Some(m) if m > 180),
        }
    }
}

impl fmt::Display for DurationBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// MovieDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full normalized dataset for one session, plus the distinct genre
/// labels used to populate the genre multi-select.
///
/// Immutable after construction: filters return index views and never
/// mutate the records.
#[derive(Debug, Clone, Default)]
pub struct MovieDataset {
    pub records: Vec<MovieRecord>,
    /// Sorted distinct genre labels (multi-valued strings split apart).
    pub genres: BTreeSet<String>,
}

impl MovieDataset {
    /// Normalize every record once and build the genre index.
    pub fn from_records(mut records: Vec<MovieRecord>) -> Self {
        for rec in &mut records {
            normalize::normalize(rec);
        }
        let genres = records
            .iter()
            .flat_map(|rec| split_genres(&rec.genre))
            .collect();
        MovieDataset { records, genres }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Split a possibly multi-valued genre string ("Action, Comedy" or
/// "Drama/Thriller") into trimmed labels.
pub fn split_genres(genre: &str) -> Vec<String> {
    genre
        .split([',', '/'])
        .map(str::trim)
        .filter(|label| !label.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_records_normalizes_and_indexes() {
        let dataset = MovieDataset::from_records(vec![
            MovieRecord::from_raw("Alpha", "Action, Comedy", "8.5", "12.5K", "2h 15m"),
            MovieRecord::from_raw("Beta", "Drama/Thriller", "N/A", "1,200", "45m"),
        ]);

        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.records[0].rating_numeric, Some(8.5));
        assert_eq!(dataset.records[0].votes_numeric, 12_500);
        assert_eq!(dataset.records[0].duration_minutes, Some(135));
        assert_eq!(dataset.records[1].rating_numeric, None);
        assert_eq!(dataset.records[1].votes_numeric, 1_200);
        assert_eq!(dataset.records[1].duration_minutes, Some(45));

        let genres: Vec<&str> = dataset.genres.iter().map(String::as_str).collect();
        assert_eq!(genres, vec!["Action", "Comedy", "Drama", "Thriller"]);
    }

    #[test]
    fn test_split_genres_handles_separators_and_whitespace() {
        assert_eq!(split_genres("Action, Comedy"), vec!["Action", "Comedy"]);
        assert_eq!(split_genres("Drama/Thriller"), vec!["Drama", "Thriller"]);
        assert_eq!(split_genres("  Horror  "), vec!["Horror"]);
        assert!(split_genres("").is_empty());
        assert!(split_genres(" , / ").is_empty());
    }

    #[test]
    fn test_duration_bucket_boundaries() {
        use DurationBucket::*;
        assert!(Under2h.contains(Some(119)));
        assert!(!Under2h.contains(Some(120)));
        assert!(Between2And3h.contains(Some(120)));
        assert!(Between2And3h.contains(Some(180)));
        assert!(!Between2And3h.contains(Some(181)));
        assert!(Over3h.contains(Some(181)));
        assert!(!Over3h.contains(Some(180)));
    }

    #[test]
    fn test_undefined_duration_matches_only_all() {
        assert!(DurationBucket::All.contains(None));
        assert!(!DurationBucket::Under2h.contains(None));
        assert!(!DurationBucket::Between2And3h.contains(None));
        assert!(!DurationBucket::Over3h.contains(None));
    }
}
