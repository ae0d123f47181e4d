use std::path::PathBuf;

use crate::config::StoreConfig;
use crate::data::filter::{filtered_indices, FilterSpec};
use crate::data::model::MovieDataset;
use crate::data::query::{self, ResultTable};
use crate::data::source::{self, DataOrigin};

/// Fixed relative fallback file, mirroring the deployed layout.
pub const FALLBACK_CSV: &str = "data/movies_2024_detailed.csv";

const FILTER_STATE_FILE: &str = "filter_spec.json";

// ---------------------------------------------------------------------------
// Session state
// ---------------------------------------------------------------------------

/// All session-scoped state, independent of rendering.
///
/// The dataset is resolved at most once per session ([`Self::ensure_loaded`])
/// and cached here; the explicit Reload action is the only invalidation.
pub struct AppState {
    pub store: StoreConfig,
    pub fallback_path: PathBuf,

    /// Cached dataset (None before the first load or after a fatal failure).
    pub dataset: Option<MovieDataset>,
    /// Which path served the cached dataset.
    pub origin: Option<DataOrigin>,
    /// Fatal load failure: rendered as a blocking error, halts all
    /// filter/chart processing.
    pub load_error: Option<String>,

    pub filter: FilterSpec,
    /// Indices of records passing the current filter (cached view).
    pub visible_indices: Vec<usize>,

    pub query_text: String,
    pub query_result: Option<ResultTable>,
    pub query_error: Option<String>,

    load_attempted: bool,
}

impl AppState {
    /// Production constructor: store config from the environment, fixed
    /// fallback path, last session's filters restored when present.
    pub fn from_env() -> Self {
        Self::with_source(StoreConfig::from_env(), PathBuf::from(FALLBACK_CSV))
    }

    pub fn with_source(store: StoreConfig, fallback_path: PathBuf) -> Self {
        let filter = load_persisted_filter(&fallback_path).unwrap_or_default();
        let query_text = format!("SELECT * FROM {} LIMIT 50;", store.table);
        AppState {
            store,
            fallback_path,
            dataset: None,
            origin: None,
            load_error: None,
            filter,
            visible_indices: Vec::new(),
            query_text,
            query_result: None,
            query_error: None,
            load_attempted: false,
        }
    }

    /// Resolve the dataset once per session; later calls hit the cache.
    pub fn ensure_loaded(&mut self) {
        if self.load_attempted {
            return;
        }
        self.load_attempted = true;
        self.reload();
    }

    /// Explicit reload: drop the cache and resolve again.
    pub fn reload(&mut self) {
        self.load_error = None;
        match source::resolve(&self.store, &self.fallback_path) {
            Ok((dataset, origin)) => {
                if dataset.is_empty() {
                    // An empty dataset means "no data available"; halt
                    // before any filter or chart runs against it.
                    self.load_error = Some(
                        "No data available to display. Ensure the CSV is present \
                         or DB credentials are configured."
                            .to_string(),
                    );
                    self.dataset = None;
                    self.origin = None;
                    self.visible_indices.clear();
                    return;
                }
                self.origin = Some(origin);
                self.dataset = Some(dataset);
                self.refilter();
            }
            Err(e) => {
                log::error!("{e}");
                self.dataset = None;
                self.origin = None;
                self.visible_indices.clear();
                self.load_error = Some(e.to_string());
            }
        }
    }

    /// Recompute the visible view after a filter change and persist the
    /// spec so the next session starts where this one left off.
    pub fn refilter(&mut self) {
        if let Some(dataset) = &self.dataset {
            self.visible_indices = filtered_indices(dataset, &self.filter);
        }
        self.persist_filter();
    }

    /// Run the ad-hoc query against the store. Failures are scoped to this
    /// action; the cached dataset stays usable.
    pub fn run_query(&mut self) {
        self.query_error = None;
        match query::execute(&self.store, &self.query_text) {
            Ok(table) => {
                log::info!("ad-hoc query returned {} rows", table.rows.len());
                self.query_result = Some(table);
            }
            Err(e) => {
                log::error!("ad-hoc query failed: {e}");
                self.query_result = None;
                self.query_error = Some(e.to_string());
            }
        }
    }

    pub fn toggle_genre(&mut self, label: &str) {
        if !self.filter.genres.remove(label) {
            self.filter.genres.insert(label.to_string());
        }
        self.refilter();
    }

    pub fn clear_genres(&mut self) {
        self.filter.genres.clear();
        self.refilter();
    }

    /// Best-effort write of the current filter spec; failures are logged at
    /// debug level and otherwise ignored.
    fn persist_filter(&self) {
        let Some(path) = filter_state_path(&self.fallback_path) else {
            return;
        };
        let json = match serde_json::to_string_pretty(&self.filter) {
            Ok(json) => json,
            Err(e) => {
                log::debug!("could not serialize filter spec: {e}");
                return;
            }
        };
        if let Some(dir) = path.parent() {
            let _ = std::fs::create_dir_all(dir);
        }
        if let Err(e) = std::fs::write(&path, json) {
            log::debug!("could not persist filter spec: {e}");
        }
    }
}

fn filter_state_path(fallback_path: &std::path::Path) -> Option<PathBuf> {
    fallback_path.parent().map(|dir| dir.join(FILTER_STATE_FILE))
}

/// Best-effort read of the previous session's filter spec.
fn load_persisted_filter(fallback_path: &std::path::Path) -> Option<FilterSpec> {
    let path = filter_state_path(fallback_path)?;
    let text = std::fs::read_to_string(path).ok()?;
    serde_json::from_str(&text).ok()
}
