//! The message handler: classify, optionally look something up, reply.

use log::{debug, info, warn};
use url::Url;

use crate::commands::{Command, Variant};
use crate::config::Config;
use crate::error::Result;
use crate::http::{Fetch, HttpClient};
use crate::lookup::{
    LookupError, fetch_joke, fetch_quote, fetch_weather, joke_reply, quote_reply, weather_reply,
};

pub const GREETING: &str = "Hello, welcome to NEAR AI!";
pub const FALLBACK: &str = "I'm sorry, I didn't understand your message.";
pub const MISSING_CITY: &str = "Please provide a city name, e.g. \"weather London\".";
pub const WEATHER_NOT_CONFIGURED: &str =
    "Sorry, the weather command isn't configured with an API key.";

/// Answers one message at a time. Holds no state between calls.
pub struct MessageHandler<F> {
    fetcher: F,
    variant: Variant,
    quote_api_url: Url,
    joke_api_url: Url,
    weather_api_url: Url,
    openweather_api_key: Option<String>,
}

impl MessageHandler<HttpClient> {
    pub fn from_config(config: &Config) -> Result<Self> {
        let fetcher = HttpClient::new(config.http_timeout)?;
        Ok(Self::new(fetcher, config))
    }
}

impl<F: Fetch> MessageHandler<F> {
    pub fn new(fetcher: F, config: &Config) -> Self {
        Self {
            fetcher,
            variant: config.variant,
            quote_api_url: config.quote_api_url.clone(),
            joke_api_url: config.joke_api_url.clone(),
            weather_api_url: config.weather_api_url.clone(),
            openweather_api_key: config.openweather_api_key.clone(),
        }
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// Produce the reply for `message`. Performs at most one outbound request.
    pub async fn handle(&self, message: &str) -> String {
        let command = Command::classify(message, self.variant);
        debug!("Classified message as {:?}", command);

        match command {
            Command::Greeting => GREETING.to_string(),
            Command::Quote => {
                let result = fetch_quote(&self.fetcher, &self.quote_api_url).await;
                log_failure("quote", &result);
                quote_reply(result)
            }
            Command::Joke => {
                let result = fetch_joke(&self.fetcher, &self.joke_api_url).await;
                log_failure("joke", &result);
                joke_reply(result)
            }
            Command::Weather { city } => {
                if city.is_empty() {
                    return MISSING_CITY.to_string();
                }
                let Some(api_key) = self.openweather_api_key.as_deref() else {
                    info!(
                        "Weather requested for '{}' but no API key is configured",
                        city
                    );
                    return WEATHER_NOT_CONFIGURED.to_string();
                };
                let result = fetch_weather(&self.fetcher, &self.weather_api_url, &city, api_key).await;
                log_failure("weather", &result);
                weather_reply(&city, result)
            }
            Command::Unknown => FALLBACK.to_string(),
        }
    }
}

fn log_failure<T>(lookup: &str, result: &std::result::Result<T, LookupError>) {
    if let Err(e) = result {
        warn!("{} lookup failed: {}", lookup, e);
    }
}
