//! Plain HTTP transport for ranking feeds.
//!
//! The default way to reach a mirror: one shared [`reqwest::Client`] with a
//! bounded timeout and redirect chain. Anything other than `200 OK` is an
//! error so the fetcher moves on to the next mirror instead of trying to
//! parse an error page.

use super::FeedTransport;
use std::error::Error;
use std::time::Duration;
use tracing::{debug, instrument};

/// Feed transport backed by a reqwest HTTP client.
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Build a transport whose requests time out after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying TLS backend cannot be initialized.
    pub fn new(timeout: Duration) -> Result<Self, Box<dyn Error>> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;
        Ok(Self { client })
    }
}

impl FeedTransport for HttpTransport {
    #[instrument(level = "debug", skip_all, fields(%url))]
    async fn fetch_text(&self, url: &str) -> Result<String, Box<dyn Error>> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(format!("mirror answered with status {status}").into());
        }
        let body = response.text().await?;
        debug!(bytes = body.len(), "Mirror answered");
        Ok(body)
    }
}
