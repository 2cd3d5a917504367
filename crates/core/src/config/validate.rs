use reqwest::Url;

use super::{
    types::{AssetMode, Config},
    ConfigError,
};

/// Longest accepted debounce window.
const MAX_DEBOUNCE_MS: u64 = 10_000;

/// Validate configuration
/// Currently validates:
/// - Server port is not 0
/// - Artwork prefix is a non-root absolute path
/// - CORS origin and browser URLs parse
/// - Debounce window is within (0, 10s]
/// - Production mode has a frontend directory
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    let prefix = &config.assets.url_prefix;
    if !prefix.starts_with('/') || prefix.trim_end_matches('/').is_empty() {
        return Err(ConfigError::ValidationError(format!(
            "assets.url_prefix must be an absolute, non-root path (got {:?})",
            prefix
        )));
    }

    if config.assets.mode == AssetMode::Production && config.assets.frontend_dir.is_none() {
        return Err(ConfigError::ValidationError(
            "assets.frontend_dir is required in production mode".to_string(),
        ));
    }

    if let Some(origin) = &config.cors.allowed_origin {
        parse_http_url("cors.allowed_origin", origin)?;
    }

    parse_http_url("browser.api_base_url", &config.browser.api_base_url)?;
    if let Some(base) = &config.browser.asset_base_url {
        parse_http_url("browser.asset_base_url", base)?;
    }

    if config.browser.debounce_ms == 0 || config.browser.debounce_ms > MAX_DEBOUNCE_MS {
        return Err(ConfigError::ValidationError(format!(
            "browser.debounce_ms must be between 1 and {}",
            MAX_DEBOUNCE_MS
        )));
    }

    Ok(())
}

fn parse_http_url(key: &str, value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::ValidationError(format!("{} is not a valid URL: {}", key, e)))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::ValidationError(format!(
            "{} must use http or https (got {})",
            key, other
        ))),
    }
}
