use chrono::NaiveDate;
use serde::Deserialize;

/// Main configuration structure for Cagestats
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub scrape: ScrapeConfig,
    pub output: OutputConfig,
}

/// Scrape behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScrapeConfig {
    /// URL of the completed-events listing page
    #[serde(rename = "listing-url")]
    pub listing_url: String,

    /// User-Agent header sent with every request
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// Maximum number of concurrent page fetches per batch
    #[serde(rename = "max-concurrent-fetches")]
    pub max_concurrent_fetches: usize,

    /// Only events strictly newer than this date (YYYY-MM-DD) are
    /// harvested. Unset means "newer than the latest stored event".
    #[serde(rename = "cutoff-date")]
    pub cutoff_date: Option<String>,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            listing_url: "http://ufcstats.com/statistics/events/completed?page=all".to_string(),
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/85.0.4183.121 Safari/537.36"
                .to_string(),
            max_concurrent_fetches: crate::fetch::DEFAULT_FETCH_WIDTH,
            cutoff_date: None,
        }
    }
}

impl ScrapeConfig {
    /// The configured cutoff date, parsed. Validation guarantees that a
    /// present value parses.
    pub fn cutoff(&self) -> Option<NaiveDate> {
        self.cutoff_date
            .as_deref()
            .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path to the SQLite database file
    #[serde(rename = "database-path")]
    pub database_path: String,

    /// Path to the flat CSV export file
    #[serde(rename = "csv-path")]
    pub csv_path: String,
}
