use crate::config::types::{Config, OutputConfig, ScrapeConfig};
use crate::ConfigError;
use chrono::NaiveDate;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_scrape_config(&config.scrape)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates scrape configuration
fn validate_scrape_config(config: &ScrapeConfig) -> Result<(), ConfigError> {
    if config.listing_url.is_empty() {
        return Err(ConfigError::Validation(
            "listing_url cannot be empty".to_string(),
        ));
    }

    if !config.listing_url.starts_with("http") {
        return Err(ConfigError::Validation(format!(
            "listing_url must be an http(s) URL, got '{}'",
            config.listing_url
        )));
    }

    if config.user_agent.is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    if config.max_concurrent_fetches < 1 || config.max_concurrent_fetches > 64 {
        return Err(ConfigError::Validation(format!(
            "max_concurrent_fetches must be between 1 and 64, got {}",
            config.max_concurrent_fetches
        )));
    }

    if let Some(cutoff) = &config.cutoff_date {
        NaiveDate::parse_from_str(cutoff, "%Y-%m-%d").map_err(|_| {
            ConfigError::Validation(format!(
                "cutoff_date must be in YYYY-MM-DD form, got '{}'",
                cutoff
            ))
        })?;
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.database_path.is_empty() {
        return Err(ConfigError::Validation(
            "database_path cannot be empty".to_string(),
        ));
    }

    if config.csv_path.is_empty() {
        return Err(ConfigError::Validation(
            "csv_path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::Config;

    fn valid_config() -> Config {
        Config {
            scrape: ScrapeConfig::default(),
            output: OutputConfig {
                database_path: "./ufc.db".to_string(),
                csv_path: "./ufc.csv".to_string(),
            },
        }
    }

    #[test]
    fn test_defaults_validate() {
        assert!(validate(&valid_config()).is_ok());
    }

    #[test]
    fn test_rejects_bad_listing_url() {
        let mut config = valid_config();
        config.scrape.listing_url = "ftp://example.com".to_string();
        assert!(validate(&config).is_err());

        config.scrape.listing_url = String::new();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_rejects_concurrency_out_of_range() {
        let mut config = valid_config();
        config.scrape.max_concurrent_fetches = 0;
        assert!(validate(&config).is_err());

        config.scrape.max_concurrent_fetches = 65;
        assert!(validate(&config).is_err());

        config.scrape.max_concurrent_fetches = 64;
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_rejects_malformed_cutoff_date() {
        let mut config = valid_config();
        config.scrape.cutoff_date = Some("March 5, 2024".to_string());
        assert!(validate(&config).is_err());

        config.scrape.cutoff_date = Some("2024-03-05".to_string());
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_rejects_empty_output_paths() {
        let mut config = valid_config();
        config.output.database_path = String::new();
        assert!(validate(&config).is_err());

        let mut config = valid_config();
        config.output.csv_path = String::new();
        assert!(validate(&config).is_err());
    }
}
