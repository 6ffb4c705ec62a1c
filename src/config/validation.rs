use crate::config::types::{Config, CrawlerConfig, UserAgentConfig};
use crate::ConfigError;
use url::Url;

/// Upper bound on `request-timeout`, in seconds
const MAX_REQUEST_TIMEOUT: u64 = 300;

/// Upper bound on `max-redirects`
const MAX_REDIRECTS: usize = 20;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_user_agent_config(&config.user_agent)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    // Any max_crawls value is legal: non-positive means unbounded

    if config.request_timeout < 1 || config.request_timeout > MAX_REQUEST_TIMEOUT {
        return Err(ConfigError::Validation(format!(
            "request_timeout must be between 1 and {} seconds, got {}",
            MAX_REQUEST_TIMEOUT, config.request_timeout
        )));
    }

    if config.connect_timeout < 1 || config.connect_timeout > config.request_timeout {
        return Err(ConfigError::Validation(format!(
            "connect_timeout must be between 1 and request_timeout ({}), got {}",
            config.request_timeout, config.connect_timeout
        )));
    }

    if config.max_redirects > MAX_REDIRECTS {
        return Err(ConfigError::Validation(format!(
            "max_redirects must be <= {}, got {}",
            MAX_REDIRECTS, config.max_redirects
        )));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    // Validate crawler name: non-empty, alphanumeric + hyphens only
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler_name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    if config.crawler_version.trim().is_empty() {
        return Err(ConfigError::Validation(
            "crawler_version cannot be empty".to_string(),
        ));
    }

    // Validate contact URL
    Url::parse(&config.contact_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact_url: {}", e)))?;

    // Validate contact email (basic validation)
    validate_email(&config.contact_email)?;

    Ok(())
}

/// Basic email validation
fn validate_email(email: &str) -> Result<(), ConfigError> {
    if email.is_empty() {
        return Err(ConfigError::Validation(
            "contact_email cannot be empty".to_string(),
        ));
    }

    // Must contain exactly one @ with text on both sides
    let Some((local, domain)) = email.split_once('@') else {
        return Err(ConfigError::Validation(format!(
            "Invalid email format: '{}'",
            email
        )));
    };

    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return Err(ConfigError::Validation(format!(
            "Invalid email format: '{}'",
            email
        )));
    }

    // Domain part should contain at least one dot
    if !domain.contains('.') {
        return Err(ConfigError::Validation(format!(
            "Invalid email domain: '{}'",
            email
        )));
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
    fn test_negative_max_crawls_is_valid() {
        let mut config = Config::default();
        config.crawler.max_crawls = -1;
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_request_timeout_bounds() {
        let mut config = Config::default();
        config.crawler.request_timeout = 0;
        assert!(matches!(validate(&config), Err(ConfigError::Validation(_))));

        config.crawler.request_timeout = MAX_REQUEST_TIMEOUT + 1;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_connect_timeout_cannot_exceed_request_timeout() {
        let mut config = Config::default();
        config.crawler.request_timeout = 5;
        config.crawler.connect_timeout = 6;
        assert!(validate(&config).is_err());

        config.crawler.connect_timeout = 5;
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_max_redirects_bound() {
        let mut config = Config::default();
        config.crawler.max_redirects = MAX_REDIRECTS + 1;
        assert!(validate(&config).is_err());

        config.crawler.max_redirects = 0;
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_crawler_name_characters() {
        let mut config = Config::default();
        config.user_agent.crawler_name = "My Crawler".to_string();
        assert!(validate(&config).is_err());

        config.user_agent.crawler_name = "my-crawler2".to_string();
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_invalid_contact_url() {
        let mut config = Config::default();
        config.user_agent.contact_url = "not a url".to_string();
        assert!(matches!(validate(&config), Err(ConfigError::InvalidUrl(_))));
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("user@example.com").is_ok());
        assert!(validate_email("admin@sub.example.com").is_ok());

        assert!(validate_email("").is_err());
        assert!(validate_email("invalid").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("user@").is_err());
        assert!(validate_email("user@domain").is_err());
        assert!(validate_email("a@b@example.com").is_err());
    }
}
