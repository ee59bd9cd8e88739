/// Where the record store is loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Csv { path: String },
    Postgres { conn_str: String, table: String },
}

/// Settings of the `mortrank_api` service, read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
    pub source: DataSource,
    pub default_selector: String,
    pub default_k: usize,
}

impl ApiConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Unset or unparsable values fall back to defaults;
    /// a non-empty `PG_CONN_STR` selects Postgres over `DATA_CSV`.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port: u16 = lookup("PORT").and_then(|v| v.parse().ok()).unwrap_or(8000);

        let source = match lookup("PG_CONN_STR").filter(|s| !s.trim().is_empty()) {
            Some(conn_str) => DataSource::Postgres {
                conn_str,
                table: lookup("PG_TABLE").unwrap_or_else(|| "ihme_opioid".to_string()),
            },
            None => DataSource::Csv {
                path: lookup("DATA_CSV").unwrap_or_else(|| "data/IHME_opioid_data.csv".to_string()),
            },
        };

        let default_selector = lookup("DEFAULT_SELECTOR").unwrap_or_else(|| "Male".to_string());
        let default_k: usize = lookup("DEFAULT_K")
            .and_then(|v| v.parse().ok())
            .filter(|k| *k > 0)
            .unwrap_or(10);

        Self {
            host,
            port,
            source,
            default_selector,
            default_k,
        }
    }
}
