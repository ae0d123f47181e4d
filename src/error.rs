use thiserror::Error;

// ---------------------------------------------------------------------------
// Error taxonomy
// ---------------------------------------------------------------------------
//
// Only two failures are ever user-visible: `SourceError::DataUnavailable`
// (fatal for the session) and `QueryError` (fatal for one query action).
// Everything else is recovered in place: a store failure falls back to the
// CSV, and per-row field parse failures degrade to defaults inside the
// normalizer without ever becoming an error value.

/// Dataset resolution failures.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The remote store could not be reached or read. Recovered by falling
    /// back to the local CSV; surfaced only as a warning.
    #[error("database read failed: {0}")]
    StoreUnavailable(String),

    /// Both the store path and the fallback file failed. Fatal for the
    /// session: no filters or charts run after this.
    #[error("no data available: {0}")]
    DataUnavailable(String),
}

/// Ad-hoc query failures. Scoped to a single "run query" action; the
/// session and its cached dataset stay intact.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("no database credentials configured")]
    NoStoreConfigured,

    /// The store rejected the query or the round trip failed. Carries the
    /// store's own message for display.
    #[error("query execution failed: {0}")]
    Execution(String),
}
