use std::env::{self, VarError};
use std::time::Duration;

use log::{debug, error, info};
use url::Url;

use crate::commands::Variant;
use crate::error::{AgentError, Result};
use crate::lookup::{DEFAULT_JOKE_API_URL, DEFAULT_QUOTE_API_URL, DEFAULT_WEATHER_API_URL};

const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct Config {
    pub variant: Variant,
    pub quote_api_url: Url,
    pub joke_api_url: Url,
    pub weather_api_url: Url,
    pub openweather_api_key: Option<String>,
    pub http_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        debug!("Loading configuration from environment");
        dotenvy::dotenv().ok();

        Self::from_vars(|name| env::var(name))
    }

    /// Builds the configuration from an arbitrary variable source.
    ///
    /// Unset or empty variables fall back to their defaults.
    pub fn from_vars<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> std::result::Result<String, VarError>,
    {
        let read = |name: &'static str| -> Result<Option<String>> {
            match lookup(name) {
                Ok(value) if value.trim().is_empty() => Ok(None),
                Ok(value) => Ok(Some(value.trim().to_string())),
                Err(VarError::NotPresent) => Ok(None),
                Err(e) => {
                    error!("Failed to load {} from environment: {}", name, e);
                    Err(e.into())
                }
            }
        };

        let variant = match read("AGENT_VARIANT")? {
            Some(raw) => raw.parse::<Variant>().map_err(|_| {
                AgentError::Config(format!(
                    "AGENT_VARIANT must be one of quote, weather, joke or all (got '{raw}')"
                ))
            })?,
            None => Variant::default(),
        };

        let quote_api_url = parse_url("QUOTE_API_URL", read("QUOTE_API_URL")?, DEFAULT_QUOTE_API_URL)?;
        let joke_api_url = parse_url("JOKE_API_URL", read("JOKE_API_URL")?, DEFAULT_JOKE_API_URL)?;
        let weather_api_url = parse_url(
            "WEATHER_API_URL",
            read("WEATHER_API_URL")?,
            DEFAULT_WEATHER_API_URL,
        )?;

        let openweather_api_key = read("OPENWEATHER_API_KEY")?;

        let http_timeout = match read("HTTP_TIMEOUT_SECS")? {
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(AgentError::Config(format!(
                        "HTTP_TIMEOUT_SECS must be a positive number of seconds (got '{raw}')"
                    )));
                }
            },
            None => Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        };

        info!("Configuration loaded successfully");
        debug!("Agent variant: {}", variant);
        debug!("Quote API: {}", quote_api_url);
        debug!("Joke API: {}", joke_api_url);
        debug!("Weather API: {}", weather_api_url);
        match &openweather_api_key {
            Some(key) => debug!("OpenWeather API key length: {} characters", key.len()),
            None => debug!("OpenWeather API key not set, weather lookups are disabled"),
        }
        debug!("HTTP timeout: {}s", http_timeout.as_secs());

        Ok(Self {
            variant,
            quote_api_url,
            joke_api_url,
            weather_api_url,
            openweather_api_key,
            http_timeout,
        })
    }
}

fn parse_url(name: &'static str, value: Option<String>, default: &str) -> Result<Url> {
    let raw = value.as_deref().unwrap_or(default);
    Url::parse(raw).map_err(|source| {
        error!("Failed to parse {} ('{}'): {}", name, raw, source);
        AgentError::InvalidUrl { name, source }
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn from_map(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        Config::from_vars(|name| vars.get(name).cloned().ok_or(VarError::NotPresent))
    }

    #[test]
    fn defaults_apply_when_unset() -> Result<()> {
        let config = from_map(&[])?;
        assert_eq!(config.variant, Variant::Quote);
        assert_eq!(config.quote_api_url.as_str(), DEFAULT_QUOTE_API_URL);
        assert_eq!(config.joke_api_url.as_str(), DEFAULT_JOKE_API_URL);
        assert_eq!(config.weather_api_url.as_str(), DEFAULT_WEATHER_API_URL);
        assert!(config.openweather_api_key.is_none());
        assert_eq!(config.http_timeout, Duration::from_secs(10));
        Ok(())
    }

    #[test]
    fn reads_overrides() -> Result<()> {
        let config = from_map(&[
            ("AGENT_VARIANT", "Weather"),
            ("QUOTE_API_URL", "http://localhost:8080/quotes"),
            ("OPENWEATHER_API_KEY", " secret "),
            ("HTTP_TIMEOUT_SECS", "3"),
        ])?;
        assert_eq!(config.variant, Variant::Weather);
        assert_eq!(config.quote_api_url.as_str(), "http://localhost:8080/quotes");
        assert_eq!(config.openweather_api_key.as_deref(), Some("secret"));
        assert_eq!(config.http_timeout, Duration::from_secs(3));
        Ok(())
    }

    #[test]
    fn empty_api_key_is_unset() -> Result<()> {
        let config = from_map(&[("OPENWEATHER_API_KEY", "")])?;
        assert!(config.openweather_api_key.is_none());
        Ok(())
    }

    #[test]
    fn rejects_unknown_variant() {
        let err = from_map(&[("AGENT_VARIANT", "trivia")]).unwrap_err();
        assert!(matches!(err, AgentError::Config(_)));
    }

    #[test]
    fn rejects_zero_timeout() {
        let err = from_map(&[("HTTP_TIMEOUT_SECS", "0")]).unwrap_err();
        assert!(matches!(err, AgentError::Config(_)));
    }

    #[test]
    fn rejects_invalid_url() {
        let err = from_map(&[("JOKE_API_URL", "not a url")]).unwrap_err();
        assert!(matches!(
            err,
            AgentError::InvalidUrl {
                name: "JOKE_API_URL",
                ..
            }
        ));
    }
}
