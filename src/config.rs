use mysql::{Opts, OptsBuilder};

// ---------------------------------------------------------------------------
// Store configuration from the environment
// ---------------------------------------------------------------------------

const DEFAULT_HOST: &str = "localhost";
const DEFAULT_PORT: u16 = 3306;
const DEFAULT_TABLE: &str = "movies_2024";

/// Connection settings for the remote movie store, read once at startup.
///
/// Host, port and table carry baked-in defaults; user, password and database
/// name must come from the environment. When any of the latter is missing the
/// store path is skipped entirely and the session runs on the CSV fallback.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub host: String,
    pub port: u16,
    pub user: Option<String>,
    pub password: Option<String>,
    pub database: Option<String>,
    /// Table read by the session load and used in the default query text.
    pub table: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            user: None,
            password: None,
            database: None,
            table: DEFAULT_TABLE.to_string(),
        }
    }
}

impl StoreConfig {
    /// Read `MOVIE_DB_*` / `MOVIE_TABLE` environment variables, falling back
    /// to defaults for host, port and table.
    pub fn from_env() -> Self {
        let var = |name: &str| std::env::var(name).ok().filter(|v| !v.is_empty());
        StoreConfig {
            host: var("MOVIE_DB_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: var("MOVIE_DB_PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            user: var("MOVIE_DB_USER"),
            password: var("MOVIE_DB_PASS"),
            database: var("MOVIE_DB_NAME"),
            table: var("MOVIE_TABLE").unwrap_or_else(|| DEFAULT_TABLE.to_string()),
        }
    }

    /// Whether enough credentials are present to attempt a connection.
    pub fn is_complete(&self) -> bool {
        self.user.is_some() && self.password.is_some() && self.database.is_some()
    }

    /// Build connection options. Only meaningful when [`Self::is_complete`].
    pub fn opts(&self) -> Opts {
        OptsBuilder::new()
            .ip_or_hostname(Some(self.host.clone()))
            .tcp_port(self.port)
            .user(self.user.clone())
            .pass(self.password.clone())
            .db_name(self.database.clone())
            .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_incomplete() {
        let config = StoreConfig::default();
        assert!(!config.is_complete());
        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, 3306);
        assert_eq!(config.table, "movies_2024");
    }

    #[test]
    fn test_complete_requires_all_three_credentials() {
        let mut config = StoreConfig {
            user: Some("reader".into()),
            password: Some("secret".into()),
            database: Some("imdb".into()),
            ..Default::default()
        };
        assert!(config.is_complete());

        config.password = None;
        assert!(!config.is_complete());
    }
}
