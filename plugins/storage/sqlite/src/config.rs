use std::time::Duration;

fn default_path() -> String {
    "requests.db".to_string()
}

fn default_busy_timeout_ms() -> u64 {
    5_000
}

/// Settings for the SQLite store (the `[storage]` table with `kind = "sqlite"`).
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct SqliteStoreConfig {
    /// Database file. `:memory:` opens a private in-memory database.
    #[serde(default = "default_path")]
    pub path: String,
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
}

impl Default for SqliteStoreConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            busy_timeout_ms: default_busy_timeout_ms(),
        }
    }
}

impl SqliteStoreConfig {
    pub fn busy_timeout(&self) -> Duration {
        Duration::from_millis(self.busy_timeout_ms)
    }

    pub fn is_in_memory(&self) -> bool {
        self.path == ":memory:"
    }
}
