use crate::config::types::{Config, CrawlerConfig, OutputConfig, UserAgentConfig};
use crate::ConfigError;

/// Deepest crawl the configuration accepts
pub const MAX_DEPTH_LIMIT: u32 = 100;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.max_depth > MAX_DEPTH_LIMIT {
        return Err(ConfigError::Validation(format!(
            "max_depth must be <= {}, got {}",
            MAX_DEPTH_LIMIT, config.max_depth
        )));
    }

    if config.max_pages < 1 {
        return Err(ConfigError::Validation(format!(
            "max_pages must be >= 1, got {}",
            config.max_pages
        )));
    }

    if config.timeout_secs < 1 || config.timeout_secs > 300 {
        return Err(ConfigError::Validation(format!(
            "timeout_secs must be between 1 and 300, got {}",
            config.timeout_secs
        )));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.value.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user agent cannot be empty".to_string(),
        ));
    }

    // reqwest refuses header values with control characters
    if config.value.chars().any(|c| c.is_control()) {
        return Err(ConfigError::Validation(
            "user agent cannot contain control characters".to_string(),
        ));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.root.trim().is_empty() {
        return Err(ConfigError::Validation(
            "output root cannot be empty".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_zero_depth_is_valid() {
        let mut config = Config::default();
        config.crawler.max_depth = 0;
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_depth_limit() {
        let mut config = Config::default();
        config.crawler.max_depth = MAX_DEPTH_LIMIT + 1;
        assert!(matches!(validate(&config), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_zero_max_pages() {
        let mut config = Config::default();
        config.crawler.max_pages = 0;
        assert!(matches!(validate(&config), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_timeout_bounds() {
        let mut config = Config::default();
        config.crawler.timeout_secs = 0;
        assert!(validate(&config).is_err());

        config.crawler.timeout_secs = 301;
        assert!(validate(&config).is_err());

        config.crawler.timeout_secs = 300;
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_empty_user_agent() {
        let mut config = Config::default();
        config.user_agent.value = "   ".to_string();
        assert!(validate(&config).is_err());

        config.user_agent.value = "bad\nagent".to_string();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_empty_root() {
        let mut config = Config::default();
        config.output.root = String::new();
        assert!(validate(&config).is_err());
    }
}
