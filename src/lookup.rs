//! Lookup commands backed by public JSON APIs.

mod joke;
mod quote;
mod weather;

use reqwest::StatusCode;
use thiserror::Error;

use crate::http::FetchError;

pub use joke::{DEFAULT_JOKE_API_URL, Joke, fetch_joke, joke_reply};
pub use quote::{DEFAULT_QUOTE_API_URL, Quote, fetch_quote, quote_reply};
pub use weather::{DEFAULT_WEATHER_API_URL, WeatherReport, fetch_weather, weather_reply, weather_url};

/// Why a lookup produced no record. Every variant ends up as reply text.
#[derive(Error, Debug)]
pub enum LookupError {
    #[error("{0}")]
    Request(String),

    #[error("unexpected status {0}")]
    Status(StatusCode),

    #[error("the API returned no entries")]
    Empty,

    #[error("the API response was missing required fields")]
    Incomplete,

    #[error("the API did not recognise the request")]
    NotFound,
}

impl From<FetchError> for LookupError {
    fn from(err: FetchError) -> Self {
        LookupError::Request(err.to_string())
    }
}

impl From<serde_json::Error> for LookupError {
    fn from(err: serde_json::Error) -> Self {
        LookupError::Request(format!("invalid JSON in response: {err}"))
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.is_empty())
}
