use crate::config::types::{
    Config, CrawlerConfig, OutputConfig, SiteConfig, UserAgentConfig, LETTER_PLACEHOLDER,
};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_site_config(&config.site)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_crawler_config(&config.crawler)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates the upstream listing locations
fn validate_site_config(config: &SiteConfig) -> Result<(), ConfigError> {
    validate_http_url("events-url", &config.events_url)?;

    if !config.fighters_url_template.contains(LETTER_PLACEHOLDER) {
        return Err(ConfigError::Validation(format!(
            "fighters-url-template must contain {}, got '{}'",
            LETTER_PLACEHOLDER, config.fighters_url_template
        )));
    }
    validate_http_url("fighters-url-template", &config.fighters_url('a'))?;

    if config.letters.is_empty() {
        return Err(ConfigError::Validation(
            "letters cannot be empty".to_string(),
        ));
    }

    if !config.letters.chars().all(|c| c.is_ascii_lowercase()) {
        return Err(ConfigError::Validation(format!(
            "letters must be lowercase ASCII letters only, got '{}'",
            config.letters
        )));
    }

    Ok(())
}

fn validate_http_url(key: &str, value: &str) -> Result<(), ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid {} '{}': {}", key, value, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "{} '{}' must use http or https",
            key, value
        )));
    }

    Ok(())
}

fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.identity.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent identity cannot be empty".to_string(),
        ));
    }
    Ok(())
}

fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.timeout < 1 {
        return Err(ConfigError::Validation(format!(
            "timeout must be >= 1s, got {}s",
            config.timeout
        )));
    }
    Ok(())
}

fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.database_path.is_empty() {
        return Err(ConfigError::Validation(
            "database-path cannot be empty".to_string(),
        ));
    }
    Ok(())
}
