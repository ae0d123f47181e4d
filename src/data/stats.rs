use std::collections::BTreeMap;

use super::model::{split_genres, MovieDataset, MovieRecord};

// ---------------------------------------------------------------------------
// Display aggregates over the filtered view
// ---------------------------------------------------------------------------

/// Number of half-point histogram bins covering ratings 0..=10.
pub const HISTOGRAM_BINS: usize = 20;

/// Top `n` records by rating, descending. Records with a missing rating are
/// excluded; ties keep dataset order.
pub fn top_rated<'a>(
    dataset: &'a MovieDataset,
    indices: &[usize],
    n: usize,
) -> Vec<&'a MovieRecord> {
    let mut rated: Vec<&MovieRecord> = indices
        .iter()
        .map(|&i| &dataset.records[i])
        .filter(|rec| rec.rating_numeric.is_some())
        .collect();
    rated.sort_by(|a, b| {
        let ra = a.rating_numeric.unwrap_or(f64::NEG_INFINITY);
        let rb = b.rating_numeric.unwrap_or(f64::NEG_INFINITY);
        rb.total_cmp(&ra)
    });
    rated.truncate(n);
    rated
}

/// Genre label frequencies across the view, most frequent first, capped at
/// `top`. Multi-valued genre strings contribute one count per label.
pub fn genre_counts(dataset: &MovieDataset, indices: &[usize], top: usize) -> Vec<(String, usize)> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for &i in indices {
        for label in split_genres(&dataset.records[i].genre) {
            *counts.entry(label).or_default() += 1;
        }
    }
    let mut ordered: Vec<(String, usize)> = counts.into_iter().collect();
    // Stable sort keeps the alphabetical order of the map within equal counts.
    ordered.sort_by(|a, b| b.1.cmp(&a.1));
    ordered.truncate(top);
    ordered
}

/// Rating histogram with bins of width 0.5 over [0, 10]. Missing ratings are
/// excluded; a rating of exactly 10.0 lands in the last bin.
pub fn rating_histogram(dataset: &MovieDataset, indices: &[usize]) -> [usize; HISTOGRAM_BINS] {
    let mut bins = [0usize; HISTOGRAM_BINS];
    for &i in indices {
        if let Some(r) = dataset.records[i].rating_numeric {
            let bin = ((r.clamp(0.0, 10.0) * 2.0) as usize).min(HISTOGRAM_BINS - 1);
            bins[bin] += 1;
        }
    }
    bins
}

/// Votes-vs-rating scatter points (`[votes, rating]`) for records with a
/// defined rating.
pub fn scatter_points(dataset: &MovieDataset, indices: &[usize]) -> Vec<[f64; 2]> {
    indices
        .iter()
        .filter_map(|&i| {
            let rec = &dataset.records[i];
            rec.rating_numeric
                .map(|r| [rec.votes_numeric as f64, r])
        })
        .collect()
}
