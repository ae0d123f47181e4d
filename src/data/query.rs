use mysql::prelude::Queryable;
use mysql::{Conn, Row};

use crate::config::StoreConfig;
use crate::error::QueryError;

use super::source::value_text;

// ---------------------------------------------------------------------------
// Ad-hoc query executor
// ---------------------------------------------------------------------------

/// Result of one ad-hoc query: column names and stringified cells.
///
/// Independent lifecycle from the session dataset — created per execution,
/// displayed, and never merged back.
#[derive(Debug, Clone, Default)]
pub struct ResultTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ResultTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Execute the user-supplied query text verbatim against the remote store.
///
/// The dashboard is a trusted single-operator tool, so the text is not
/// validated or rewritten. Zero rows is a valid result. The store's own
/// error message is carried back for display; a failed query never touches
/// the cached dataset or ends the session.
pub fn execute(config: &StoreConfig, query_text: &str) -> Result<ResultTable, QueryError> {
    if !config.is_complete() {
        return Err(QueryError::NoStoreConfigured);
    }

    let exec_err = |e: mysql::Error| QueryError::Execution(e.to_string());

    let mut conn = Conn::new(config.opts()).map_err(exec_err)?;
    let rows: Vec<Row> = conn.query(query_text).map_err(exec_err)?;

    let columns = rows
        .first()
        .map(|row| {
            row.columns_ref()
                .iter()
                .map(|c| c.name_str().into_owned())
                .collect()
        })
        .unwrap_or_default();

    let rows = rows
        .iter()
        .map(|row| {
            (0..row.len())
                .map(|i| row.as_ref(i).map(value_text).unwrap_or_default())
                .collect()
        })
        .collect();

    Ok(ResultTable { columns, rows })
}
