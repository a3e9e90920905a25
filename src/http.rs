//! Outbound HTTP used by the lookup commands.

use std::future::Future;
use std::time::Duration;

use log::debug;
use reqwest::{Client, StatusCode};
use thiserror::Error;
use url::Url;

use crate::error::Result;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Status and body of a completed GET request.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub body: String,
}

/// The request never produced a readable response.
///
/// A non-success status is not a fetch error; callers inspect
/// [`HttpResponse::status`] themselves.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error(transparent)]
    Reqwest(#[from] reqwest::Error),

    #[error("{0}")]
    Transport(String),
}

/// A single GET with no body and default headers.
pub trait Fetch {
    fn get(
        &self,
        url: &Url,
    ) -> impl Future<Output = std::result::Result<HttpResponse, FetchError>> + Send;
}

/// Production fetcher backed by `reqwest`, bounded by a timeout and never retried.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { client })
    }
}

impl Fetch for HttpClient {
    async fn get(&self, url: &Url) -> std::result::Result<HttpResponse, FetchError> {
        // Only host and path: the weather query carries the API key, which is
        // also why errors are stripped of their URL.
        debug!(
            "GET {}{}",
            url.host_str().unwrap_or_default(),
            url.path()
        );

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(reqwest::Error::without_url)?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(reqwest::Error::without_url)?;

        debug!("Received {} ({} bytes)", status, body.len());
        Ok(HttpResponse { status, body })
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_client_with_timeout() {
        assert!(HttpClient::new(Duration::from_secs(1)).is_ok());
    }

    #[test]
    fn user_agent_names_the_crate() {
        assert!(USER_AGENT.starts_with("workshop-agent/"));
    }

    #[tokio::test]
    async fn unresponsive_server_times_out() -> Result<()> {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let server = tokio::spawn(async move {
            // Hold the connection open without ever answering.
            if let Ok((socket, _)) = listener.accept().await {
                tokio::time::sleep(Duration::from_secs(30)).await;
                drop(socket);
            }
        });

        let client = HttpClient::new(Duration::from_millis(200))?;
        let url = Url::parse(&format!("http://{addr}/v1/quotes")).expect("valid test url");
        let result = tokio::time::timeout(Duration::from_secs(5), client.get(&url))
            .await
            .expect("request should give up before the outer deadline");
        server.abort();

        let err = result.expect_err("request to a silent server must fail");
        let reply = crate::lookup::quote_reply(Err(err.into()));
        assert!(reply.starts_with("Sorry, an error occurred while fetching the quote:"));
        Ok(())
    }

    #[tokio::test]
    async fn transport_errors_omit_the_url() -> Result<()> {
        let client = HttpClient::new(Duration::from_secs(2))?;
        let url = Url::parse("http://127.0.0.1:1/weather?appid=SECRETKEY").expect("valid test url");
        let err = client
            .get(&url)
            .await
            .expect_err("nothing listens on port 1");
        assert!(!err.to_string().contains("SECRETKEY"));
        Ok(())
    }

    #[tokio::test]
    async fn canned_fetch_records_requests() -> std::result::Result<(), FetchError> {
        let fetcher = testing::CannedFetch::respond(200, "[]");
        let url = Url::parse("http://quotes.test/v1").map_err(|e| FetchError::Transport(e.to_string()))?;
        let response = fetcher.get(&url).await?;
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body, "[]");
        assert_eq!(fetcher.requests(), vec![url]);
        Ok(())
    }
}
