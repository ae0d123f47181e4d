use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::model::{DurationBucket, MovieDataset, MovieRecord};

// ---------------------------------------------------------------------------
// FilterSpec – the user-selected predicates
// ---------------------------------------------------------------------------

/// All active filter predicates. Combined with logical AND; each predicate
/// has a "no constraint" resting value so the default spec passes everything.
///
/// Serialized as JSON so the last-used filters survive across sessions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterSpec {
    /// Selected genre labels. Empty set means no genre constraint; otherwise
    /// a record matches if its genre string contains ANY selected label as a
    /// case-insensitive substring (union semantics).
    pub genres: BTreeSet<String>,
    /// Minimum rating threshold. 0.0 means "no filter": records with a
    /// missing rating pass. Any positive threshold rejects missing ratings.
    pub min_rating: f64,
    /// Minimum vote count; `votes_numeric` is always defined so this is a
    /// plain comparison.
    pub min_votes: u64,
    pub duration: DurationBucket,
}

impl Default for FilterSpec {
    fn default() -> Self {
        FilterSpec {
            genres: BTreeSet::new(),
            min_rating: 0.0,
            min_votes: 0,
            duration: DurationBucket::All,
        }
    }
}

impl FilterSpec {
    /// Whether a single record passes every active predicate.
    pub fn matches(&self, record: &MovieRecord) -> bool {
        if !self.genres.is_empty() {
            let genre = record.genre.to_lowercase();
            let any = self
                .genres
                .iter()
                .any(|label| genre.contains(&label.to_lowercase()));
            if !any {
                return false;
            }
        }

        if self.min_rating > 0.0 {
            match record.rating_numeric {
                Some(r) if r >= self.min_rating => {}
                _ => return false,
            }
        }

        if record.votes_numeric < self.min_votes {
            return false;
        }

        self.duration.contains(record.duration_minutes)
    }
}

/// Return indices of records that pass all active predicates. Pure: an empty
/// result is a valid outcome, and the dataset is never mutated.
pub fn filtered_indices(dataset: &MovieDataset, spec: &FilterSpec) -> Vec<usize> {
    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| spec.matches(rec))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::MovieRecord;

    fn fixture() -> MovieDataset {
        MovieDataset::from_records(vec![
            MovieRecord::from_raw("No Rating", "Action", "", "500", "1h 30m"),
            MovieRecord::from_raw("Almost", "Action, Comedy", "7.9", "3K", "2h"),
            MovieRecord::from_raw("Exact", "Drama", "8.0", "1,200", "2h 45m"),
            MovieRecord::from_raw("Best", "Sci-Fi/Thriller", "9.1", "1.2M", "3h 10m"),
            MovieRecord::from_raw("Short", "Comedy", "6.5", "12.5K", "45m"),
            MovieRecord::from_raw("Unknown Runtime", "Drama", "7.0", "N/A", ""),
        ])
    }

    fn titles(dataset: &MovieDataset, indices: &[usize]) -> Vec<String> {
        indices
            .iter()
            .map(|&i| dataset.records[i].title.clone())
            .collect()
    }

    #[test]
    fn test_default_spec_passes_everything() {
        let dataset = fixture();
        let indices = filtered_indices(&dataset, &FilterSpec::default());
        assert_eq!(indices.len(), dataset.len());
    }

    #[test]
    fn test_min_rating_excludes_missing_and_below() {
        let dataset = fixture();
        let spec = FilterSpec {
            min_rating: 8.0,
            ..Default::default()
        };
        let indices = filtered_indices(&dataset, &spec);
        assert_eq!(titles(&dataset, &indices), vec!["Exact", "Best"]);
    }

    #[test]
    fn test_min_rating_zero_means_no_filter() {
        let dataset = fixture();
        let spec = FilterSpec {
            min_rating: 0.0,
            ..Default::default()
        };
        // "No Rating" has rating_numeric == None and must still pass.
        let indices = filtered_indices(&dataset, &spec);
        assert_eq!(indices.len(), dataset.len());
    }

    #[test]
    fn test_genre_union_substring_case_insensitive() {
        let dataset = fixture();
        let spec = FilterSpec {
            genres: ["comedy".to_string(), "thriller".to_string()]
                .into_iter()
                .collect(),
            ..Default::default()
        };
        let indices = filtered_indices(&dataset, &spec);
        assert_eq!(titles(&dataset, &indices), vec!["Almost", "Best", "Short"]);
    }

    #[test]
    fn test_min_votes_uses_always_defined_count() {
        let dataset = fixture();
        let spec = FilterSpec {
            min_votes: 3_000,
            ..Default::default()
        };
        let indices = filtered_indices(&dataset, &spec);
        assert_eq!(titles(&dataset, &indices), vec!["Almost", "Best", "Short"]);
    }

    #[test]
    fn test_duration_bucket_excludes_undefined() {
        let dataset = fixture();
        let spec = FilterSpec {
            duration: DurationBucket::Under2h,
            ..Default::default()
        };
        let indices = filtered_indices(&dataset, &spec);
        // "Unknown Runtime" has no parsed duration and must not appear.
        assert_eq!(titles(&dataset, &indices), vec!["No Rating", "Short"]);
    }

    #[test]
    fn test_filter_idempotence() {
        let dataset = fixture();
        let spec = FilterSpec {
            min_rating: 7.0,
            min_votes: 1_000,
            duration: DurationBucket::Between2And3h,
            ..Default::default()
        };
        let once = filtered_indices(&dataset, &spec);
        let survivors = MovieDataset::from_records(
            once.iter()
                .map(|&i| dataset.records[i].clone())
                .collect(),
        );
        let twice = filtered_indices(&survivors, &spec);
        assert_eq!(twice.len(), once.len());
    }

    #[test]
    fn test_filter_commutativity() {
        let dataset = fixture();
        let genre_only = FilterSpec {
            genres: ["Drama".to_string()].into_iter().collect(),
            ..Default::default()
        };
        let rating_only = FilterSpec {
            min_rating: 7.5,
            ..Default::default()
        };

        let apply = |spec: &FilterSpec, indices: &[usize]| -> Vec<usize> {
            indices
                .iter()
                .copied()
                .filter(|&i| spec.matches(&dataset.records[i]))
                .collect()
        };

        let all: Vec<usize> = (0..dataset.len()).collect();
        let genre_then_rating = apply(&rating_only, &apply(&genre_only, &all));
        let rating_then_genre = apply(&genre_only, &apply(&rating_only, &all));
        assert_eq!(genre_then_rating, rating_then_genre);
        assert_eq!(titles(&dataset, &genre_then_rating), vec!["Exact"]);
    }

    #[test]
    fn test_empty_result_is_valid() {
        let dataset = fixture();
        let spec = FilterSpec {
            min_rating: 9.9,
            ..Default::default()
        };
        assert!(filtered_indices(&dataset, &spec).is_empty());
    }

    #[test]
    fn test_spec_json_round_trip() {
        let spec = FilterSpec {
            genres: ["Action".to_string()].into_iter().collect(),
            min_rating: 6.0,
            min_votes: 100,
            duration: DurationBucket::Over3h,
        };
        let json = serde_json::to_string(&spec).unwrap();
        let back: FilterSpec = serde_json::from_str(&json).unwrap();
        assert_eq!(back, spec);
    }
}
