//! Breaking Bad quote lookup.

use std::fmt;

use log::debug;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;
use url::Url;

use crate::http::Fetch;

use super::{LookupError, non_empty};

pub const DEFAULT_QUOTE_API_URL: &str = "https://api.breakingbadquotes.xyz/v1/quotes";

/// A quote with its attribution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quote {
    pub text: String,
    pub author: String,
}

impl fmt::Display for Quote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Breaking Bad Quote: \"{}\" - {}", self.text, self.author)
    }
}

#[derive(Debug, Deserialize)]
struct QuoteEntry {
    quote: Option<String>,
    author: Option<String>,
}

/// Fetch one quote. The API answers with a list; only the first entry is used.
pub async fn fetch_quote<F: Fetch>(fetcher: &F, url: &Url) -> Result<Quote, LookupError> {
    let response = fetcher.get(url).await?;
    if response.status != StatusCode::OK {
        return Err(LookupError::Status(response.status));
    }

    let payload: Value = serde_json::from_str(&response.body)?;
    let Some(first) = payload.as_array().and_then(|entries| entries.first()) else {
        debug!("Quote API returned no entries");
        return Err(LookupError::Empty);
    };

    let entry: QuoteEntry =
        serde_json::from_value(first.clone()).map_err(|_| LookupError::Incomplete)?;

    match (non_empty(entry.quote), non_empty(entry.author)) {
        (Some(text), Some(author)) => Ok(Quote { text, author }),
        _ => Err(LookupError::Incomplete),
    }
}

/// Turn the outcome of [`fetch_quote`] into reply text.
pub fn quote_reply(result: Result<Quote, LookupError>) -> String {
    match result {
        Ok(quote) => quote.to_string(),
        Err(LookupError::Request(detail)) => {
            format!("Sorry, an error occurred while fetching the quote: {detail}")
        }
        Err(LookupError::Status(status)) => {
            format!(
                "Sorry, failed to fetch a quote. Status code: {}",
                status.as_u16()
            )
        }
        Err(LookupError::Empty) => "Sorry, the quote API didn't return any quotes.".to_string(),
        Err(LookupError::Incomplete | LookupError::NotFound) => {
            "Sorry, I couldn't fetch a quote properly.".to_string()
        }
    }
}
