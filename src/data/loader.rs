use std::path::Path;

use anyhow::{Context, Result};

use super::model::{MovieDataset, MovieRecord};

// ---------------------------------------------------------------------------
// CSV fallback loader
// ---------------------------------------------------------------------------

/// Load the fallback CSV into a normalized dataset.
///
/// The file must have a header row with at least a `title` column; `genre`,
/// `rating`, `votes` and `duration` are picked up by name when present.
/// Malformed rows are skipped, never propagated — only a missing or
/// unreadable file is an error.
pub fn load_csv(path: &Path) -> Result<MovieDataset> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("opening CSV at {}", path.display()))?;

    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.trim().to_lowercase())
        .collect();
    let column = |name: &str| headers.iter().position(|h| h == name);

    let title_idx = column("title").context("CSV missing 'title' column")?;
    let genre_idx = column("genre");
    let rating_idx = column("rating");
    let votes_idx = column("votes");
    let duration_idx = column("duration");

    let mut records = Vec::new();
    let mut skipped = 0usize;

    for result in reader.records() {
        let row = match result {
            Ok(row) => row,
            Err(e) => {
                log::debug!("skipping malformed CSV row: {e}");
                skipped += 1;
                continue;
            }
        };
        let field = |idx: Option<usize>| {
            idx.and_then(|i| row.get(i)).unwrap_or("").to_string()
        };
        records.push(MovieRecord::from_raw(
            field(Some(title_idx)),
            field(genre_idx),
            field(rating_idx),
            field(votes_idx),
            field(duration_idx),
        ));
    }

    if skipped > 0 {
        log::warn!("skipped {skipped} malformed rows in {}", path.display());
    }

    Ok(MovieDataset::from_records(records))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn write_temp_csv(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("movie_dash_loader_{name}.csv"));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_load_well_formed_csv() {
        let path = write_temp_csv(
            "ok",
            "title,genre,rating,votes,duration\n\
             Alpha,Action,8.5,12.5K,2h 15m\n\
             Beta,\"Drama, Romance\",N/A,\"1,200\",45m\n",
        );
        let dataset = load_csv(&path).unwrap();
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.records[0].title, "Alpha");
        assert_eq!(dataset.records[0].votes_numeric, 12_500);
        assert_eq!(dataset.records[1].rating_numeric, None);
        assert_eq!(dataset.records[1].votes_numeric, 1_200);
    }

    #[test]
    fn test_malformed_rows_are_skipped() {
        let path = write_temp_csv(
            "bad_rows",
            "title,genre,rating,votes,duration\n\
             Good One,Action,7.1,900,1h 40m\n\
             Broken,Action,6.0,100,1h,extra,fields,here\n\
             Good Two,Comedy,6.9,2K,1h 35m\n",
        );
        let dataset = load_csv(&path).unwrap();
        let titles: Vec<&str> = dataset.records.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["Good One", "Good Two"]);
    }

    #[test]
    fn test_missing_optional_columns_default_empty() {
        let path = write_temp_csv("title_only", "title\nLonely\n");
        let dataset = load_csv(&path).unwrap();
        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.records[0].votes_numeric, 0);
        assert_eq!(dataset.records[0].rating_numeric, None);
        assert_eq!(dataset.records[0].duration_minutes, None);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let path = std::env::temp_dir().join("movie_dash_loader_does_not_exist.csv");
        assert!(load_csv(&path).is_err());
    }

    #[test]
    fn test_missing_title_column_is_an_error() {
        let path = write_temp_csv("no_title", "genre,rating\nAction,8.0\n");
        assert!(load_csv(&path).is_err());
    }
}
