use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use std::path::Path;

/// Loads and parses a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use cagestats::config::load_config;
///
/// let config = load_config(Path::new("config.toml")).unwrap();
/// println!("Listing URL: {}", config.scrape.listing_url);
/// ```
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    // Read the configuration file
    let content = std::fs::read_to_string(path)?;

    // Parse TOML
    let config: Config = toml::from_str(&content)?;

    // Validate the configuration
    validate(&config)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_valid_config() {
        let config_content = r#"
[scrape]
listing-url = "http://ufcstats.com/statistics/events/completed?page=all"
user-agent = "TestAgent/1.0"
max-concurrent-fetches = 4
cutoff-date = "2024-01-01"

[output]
database-path = "./test.db"
csv-path = "./export.csv"
"#;

        let file = create_temp_config(config_content);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.scrape.max_concurrent_fetches, 4);
        assert_eq!(config.scrape.user_agent, "TestAgent/1.0");
        assert_eq!(
            config.scrape.cutoff(),
            chrono::NaiveDate::from_ymd_opt(2024, 1, 1)
        );
        assert_eq!(config.output.database_path, "./test.db");
    }

    #[test]
    fn test_scrape_section_defaults() {
        let config_content = r#"
[output]
database-path = "./test.db"
csv-path = "./export.csv"
"#;

        let file = create_temp_config(config_content);
        let config = load_config(file.path()).unwrap();

        assert!(config.scrape.listing_url.contains("ufcstats.com"));
        assert_eq!(config.scrape.max_concurrent_fetches, 10);
        assert_eq!(config.scrape.cutoff_date, None);
    }

    #[test]
    fn test_load_config_with_invalid_path() {
        let result = load_config(Path::new("/nonexistent/config.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_with_invalid_toml() {
        let config_content = "this is not valid TOML {{{";
        let file = create_temp_config(config_content);
        let result = load_config(file.path());
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_with_validation_error() {
        let config_content = r#"
[scrape]
max-concurrent-fetches = 0

[output]
database-path = "./test.db"
csv-path = "./export.csv"
"#;

        let file = create_temp_config(config_content);
        let result = load_config(file.path());
        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), ConfigError::Validation(_)));
    }
}
