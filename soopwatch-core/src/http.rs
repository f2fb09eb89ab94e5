//! HTTP client abstraction for the platform integration.
//!
//! The live-status endpoint is a single form-encoded POST; wrapping the
//! client in a trait keeps the platform code free of reqwest specifics and
//! lets tests substitute canned responses without touching the network.

use async_trait::async_trait;

use crate::Error;

/// A minimal port over the HTTP client: POST a pre-encoded
/// `application/x-www-form-urlencoded` body and return the response text.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn post_form(&self, url: String, body: String) -> Result<String, Error>;
}

#[derive(Clone)]
pub struct DefaultHttpClient {
    client: reqwest::Client,
}

impl DefaultHttpClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for DefaultHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClient for DefaultHttpClient {
    async fn post_form(&self, url: String, body: String) -> Result<String, Error> {
        let response = self.client
            .post(&url)
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(body)
            .send()
            .await?
            .text()
            .await?;
        Ok(response)
    }
}
