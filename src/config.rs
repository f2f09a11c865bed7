use anyhow::{Context, Result, bail};
use std::path::PathBuf;

pub const STORE_PATH_VAR: &str = "MOODMELODY_STORE_PATH";
pub const SEARCH_LIMIT_VAR: &str = "MOODMELODY_SEARCH_LIMIT";

pub const DEFAULT_STORE_PATH: &str = "moodmelody-store.json";
pub const DEFAULT_SEARCH_LIMIT: usize = 10;

/// Configuration loaded from environment variables
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// JSON file backing the cache, liked sets and feedback log
    pub store_path: PathBuf,
    /// Number of tracks requested per search
    pub search_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
            search_limit: DEFAULT_SEARCH_LIMIT,
        }
    }
}

impl Config {
    /// Build a config from a variable lookup; unset variables take defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Config>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(path) = lookup(STORE_PATH_VAR).filter(|path| !path.trim().is_empty()) {
            config.store_path = PathBuf::from(path.trim());
        }

        if let Some(raw) = lookup(SEARCH_LIMIT_VAR) {
            config.search_limit = parse_search_limit(&raw)
                .with_context(|| format!("Invalid {SEARCH_LIMIT_VAR}"))?;
        }

        Ok(config)
    }
}

/// Parse a result limit, which must be a positive integer
pub fn parse_search_limit(raw: &str) -> Result<usize> {
    let limit: usize = raw
        .trim()
        .parse()
        .with_context(|| format!("'{raw}' is not a number"))?;
    if limit == 0 {
        bail!("search limit must be at least 1");
    }
    Ok(limit)
}

/// Load configuration from `.env` and environment
pub fn load_config() -> Result<Config> {
    // Load `.env` file if present
    dotenv::dotenv().ok();
    Config::from_lookup(|name| std::env::var(name).ok())
}
