//! Cagestats: a UFC results harvester
//!
//! This crate implements a bounded-concurrency scraper that walks the
//! completed-events listing of ufcstats.com, extracts events, fights,
//! fighters and per-round statistics into typed records, and persists the
//! result set to SQLite and a flat CSV export.

pub mod cache;
pub mod config;
pub mod document;
pub mod export;
pub mod extract;
pub mod fetch;
pub mod harvest;
pub mod model;
pub mod storage;

use thiserror::Error;

/// Main error type for cagestats operations
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("CSV export error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Expected two fighter links on fight page {url}, found {found}")]
    FighterPair { url: String, found: usize },

    #[error(
        "Round {round} statistics could not be matched to the expected fighters \
         (expected {expected:?}, found {found:?})"
    )]
    RoundIdentity {
        round: u8,
        expected: (String, String),
        found: Vec<String>,
    },

    #[error("Storage error: {0}")]
    Storage(String),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias for cagestats operations
pub type Result<T> = std::result::Result<T, ScrapeError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use cache::FighterCache;
pub use config::Config;
pub use document::Document;
pub use harvest::{Harvester, RunOutcome};
pub use model::{Event, Fight, FightOutcome, Fighter, Gender, Round, RoundStats};
