use std::time::Duration;

use reqwest::blocking::Client;

use crate::feed::error::FetchError;

/// One round trip to the element feed. Returns the raw response body.
pub trait FeedClient: Send + Sync {
    fn get_group(&self, group: &str) -> Result<String, FetchError>;
}

pub struct HttpFeedClient {
    client: Client,
    base_url: String,
}

impl HttpFeedClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.to_string(),
        })
    }
}

impl FeedClient for HttpFeedClient {
    fn get_group(&self, group: &str) -> Result<String, FetchError> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("GROUP", group), ("FORMAT", "json")])
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        Ok(response.text()?)
    }
}
