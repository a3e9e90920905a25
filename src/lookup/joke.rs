//! Random joke lookup.

use std::fmt;

use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;
use url::Url;

use crate::http::Fetch;

use super::{LookupError, non_empty};

pub const DEFAULT_JOKE_API_URL: &str = "https://official-joke-api.appspot.com/random_joke";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Joke {
    pub setup: String,
    pub punchline: String,
}

impl fmt::Display for Joke {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Here's a joke: {} {}", self.setup, self.punchline)
    }
}

#[derive(Debug, Deserialize)]
struct JokeEntry {
    setup: Option<String>,
    punchline: Option<String>,
}

pub async fn fetch_joke<F: Fetch>(fetcher: &F, url: &Url) -> Result<Joke, LookupError> {
    let response = fetcher.get(url).await?;
    if response.status != StatusCode::OK {
        return Err(LookupError::Status(response.status));
    }

    let payload: Value = serde_json::from_str(&response.body)?;
    if !payload.is_object() {
        return Err(LookupError::Incomplete);
    }
    let entry: JokeEntry = serde_json::from_value(payload).map_err(|_| LookupError::Incomplete)?;

    match (non_empty(entry.setup), non_empty(entry.punchline)) {
        (Some(setup), Some(punchline)) => Ok(Joke { setup, punchline }),
        _ => Err(LookupError::Incomplete),
    }
}

pub fn joke_reply(result: Result<Joke, LookupError>) -> String {
    match result {
        Ok(joke) => joke.to_string(),
        Err(LookupError::Request(detail)) => {
            format!("Sorry, an error occurred while fetching the joke: {detail}")
        }
        Err(LookupError::Status(status)) => {
            format!(
                "Sorry, failed to fetch a joke. Status code: {}",
                status.as_u16()
            )
        }
        Err(LookupError::Empty | LookupError::Incomplete | LookupError::NotFound) => {
            "Sorry, I couldn't fetch a joke properly.".to_string()
        }
    }
}
