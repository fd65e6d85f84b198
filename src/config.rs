//! Configuration loading from a TOML file.
//!
//! Resolution order: an explicit `--config` path, then
//! `$CONFIG_DIR/docqa/config.toml` if it exists, then built-in defaults.
//!
//! ```toml
//! corpus = "corpus.json"          # optional, defaults to the built-in dataset
//!
//! [server]
//! bind = "127.0.0.1:8080"
//!
//! [search]
//! min_relevance = 0.3
//! mode = "best-only"              # or "top-k"
//! top_k = 10
//! response_delay_ms = 1000
//! deadline_ms = 10000             # optional
//!
//! [[rules.intents]]
//! name = "dental"
//! keywords = ["dental", "teeth"]
//! template = "According to the {filename}, {excerpt}"
//! ```

use crate::error::ConfigError;
use crate::rules::RuleSet;
use crate::search::{DEFAULT_MIN_RELEVANCE, DEFAULT_TOP_K, RankingPolicy, ResultMode};
use serde::Deserialize;
use std::net::{Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default HTTP listen port.
pub const DEFAULT_PORT: u16 = 8080;

/// Simulated inference latency applied before a successful response.
const DEFAULT_RESPONSE_DELAY_MS: u64 = 1000;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub server: ServerConfig,
    pub search: SearchConfig,
    /// JSON corpus file; the built-in dataset is used when absent
    pub corpus: Option<PathBuf>,
    pub rules: RuleSet,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub bind: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from((Ipv4Addr::LOCALHOST, DEFAULT_PORT)),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchConfig {
    /// Excerpts must score strictly above this to be returned
    pub min_relevance: f32,
    pub mode: ResultMode,
    /// Result count in `top-k` mode
    pub top_k: usize,
    pub response_delay_ms: u64,
    /// Upper bound on a whole search, including the simulated delay
    pub deadline_ms: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            min_relevance: DEFAULT_MIN_RELEVANCE,
            mode: ResultMode::default(),
            top_k: DEFAULT_TOP_K,
            response_delay_ms: DEFAULT_RESPONSE_DELAY_MS,
            deadline_ms: None,
        }
    }
}

impl SearchConfig {
    pub const fn ranking_policy(&self) -> RankingPolicy {
        RankingPolicy {
            min_relevance: self.min_relevance,
            mode: self.mode,
            top_k: self.top_k,
        }
    }

    pub const fn response_delay(&self) -> Duration {
        Duration::from_millis(self.response_delay_ms)
    }

    pub fn deadline(&self) -> Option<Duration> {
        self.deadline_ms.map(Duration::from_millis)
    }
}

impl Config {
    /// Load from `path`, or from the default location, or fall back to defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            return Self::from_file(path);
        }

        match Self::default_path() {
            Some(path) if path.is_file() => Self::from_file(&path),
            _ => {
                tracing::debug!("No config file found, using defaults");
                Self::default().validated()
            }
        }
    }

    /// `$CONFIG_DIR/docqa/config.toml`, e.g. `~/.config/docqa/config.toml` on Linux.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("docqa").join("config.toml"))
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config: Self = toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        // Relative corpus paths are relative to the config file
        if let Some(corpus) = config.corpus.take() {
            let base = path.parent().unwrap_or_else(|| Path::new("."));
            config.corpus = Some(base.join(corpus));
        }

        tracing::info!(path = %path.display(), "Loaded configuration");
        config.validated()
    }

    /// Check value ranges and normalize the rule tables.
    pub fn validated(mut self) -> Result<Self, ConfigError> {
        let search = &self.search;
        if !(0.0..1.0).contains(&search.min_relevance) {
            return Err(ConfigError::Invalid(format!(
                "search.min_relevance must be in [0, 1), got {}",
                search.min_relevance
            )));
        }
        if search.top_k == 0 {
            return Err(ConfigError::Invalid(
                "search.top_k must be at least 1".to_string(),
            ));
        }
        if search.deadline_ms == Some(0) {
            return Err(ConfigError::Invalid(
                "search.deadline_ms must be positive when set".to_string(),
            ));
        }

        self.rules = self.rules.validated()?;
        Ok(self)
    }
}
