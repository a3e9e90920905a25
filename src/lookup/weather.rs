//! Current weather lookup against the OpenWeatherMap API.

use std::fmt;

use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;
use url::Url;

use crate::http::Fetch;

use super::{LookupError, non_empty};

pub const DEFAULT_WEATHER_API_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

/// Current conditions for a city, temperature in degrees Celsius.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReport {
    pub city: String,
    pub temperature: f64,
    pub description: String,
}

impl fmt::Display for WeatherReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Weather in {}: {:.1}°C, {}",
            self.city, self.temperature, self.description
        )
    }
}

#[derive(Debug, Deserialize)]
struct WeatherResponse {
    name: Option<String>,
    main: Option<MainReadings>,
    #[serde(default)]
    weather: Vec<Condition>,
}

#[derive(Debug, Deserialize)]
struct MainReadings {
    temp: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct Condition {
    description: Option<String>,
}

/// Build the request URL for `city`, in metric units.
pub fn weather_url(base: &Url, city: &str, api_key: &str) -> Url {
    let mut url = base.clone();
    url.query_pairs_mut()
        .append_pair("q", city)
        .append_pair("appid", api_key)
        .append_pair("units", "metric");
    url
}

pub async fn fetch_weather<F: Fetch>(
    fetcher: &F,
    base: &Url,
    city: &str,
    api_key: &str,
) -> Result<WeatherReport, LookupError> {
    let response = fetcher.get(&weather_url(base, city, api_key)).await?;
    match response.status {
        StatusCode::OK => {}
        StatusCode::NOT_FOUND => return Err(LookupError::NotFound),
        status => return Err(LookupError::Status(status)),
    }

    let payload: Value = serde_json::from_str(&response.body)?;
    if !payload.is_object() {
        return Err(LookupError::Incomplete);
    }
    let parsed: WeatherResponse =
        serde_json::from_value(payload).map_err(|_| LookupError::Incomplete)?;

    let temperature = parsed
        .main
        .and_then(|main| main.temp)
        .ok_or(LookupError::Incomplete)?;
    let description = parsed
        .weather
        .into_iter()
        .next()
        .and_then(|condition| non_empty(condition.description))
        .ok_or(LookupError::Incomplete)?;

    Ok(WeatherReport {
        city: non_empty(parsed.name).unwrap_or_else(|| city.to_string()),
        temperature,
        description,
    })
}

pub fn weather_reply(city: &str, result: Result<WeatherReport, LookupError>) -> String {
    match result {
        Ok(report) => report.to_string(),
        Err(LookupError::Request(detail)) => {
            format!("Sorry, an error occurred while fetching the weather: {detail}")
        }
        Err(LookupError::NotFound) => format!("Sorry, I couldn't find weather for \"{city}\"."),
        Err(LookupError::Status(status)) => {
            format!(
                "Sorry, failed to fetch the weather. Status code: {}",
                status.as_u16()
            )
        }
        Err(LookupError::Empty | LookupError::Incomplete) => {
            "Sorry, I couldn't fetch the weather properly.".to_string()
        }
    }
}
