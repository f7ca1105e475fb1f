use serde_json::Value;

use crate::elements::RawRecord;
use crate::feed::client::FeedClient;
use crate::feed::error::FetchError;
use crate::feed::retry::{RetryPolicy, Sleeper};

pub struct Fetcher {
    client: Box<dyn FeedClient>,
    retry: RetryPolicy,
    sleeper: Box<dyn Sleeper>,
}

impl Fetcher {
    pub fn new(client: Box<dyn FeedClient>, retry: RetryPolicy, sleeper: Box<dyn Sleeper>) -> Self {
        Self {
            client,
            retry,
            sleeper,
        }
    }

    /// Fetch one group, retrying transport errors, bad statuses and
    /// empty or malformed payloads.
    pub fn fetch(&self, group: &str) -> Result<Vec<RawRecord>, FetchError> {
        self.retry.run(self.sleeper.as_ref(), group, |_| {
            let body = self.client.get_group(group)?;
            parse_payload(&body)
        })
    }

    /// Like [`Fetcher::fetch`], but a group that exhausts its retries
    /// degrades to no records so the other groups can still load.
    pub fn fetch_or_empty(&self, group: &str) -> Vec<RawRecord> {
        match self.fetch(group) {
            Ok(records) => {
                log::info!("{}: retrieved {} records", group, records.len());
                records
            }
            Err(e) => {
                log::warn!(
                    "{}: giving up after {} attempts: {}",
                    group,
                    self.retry.max_attempts,
                    e
                );
                Vec::new()
            }
        }
    }
}

fn parse_payload(body: &str) -> Result<Vec<RawRecord>, FetchError> {
    let value: Value =
        serde_json::from_str(body).map_err(|e| FetchError::InvalidPayload(e.to_string()))?;

    let Value::Array(items) = value else {
        return Err(FetchError::InvalidPayload("expected a JSON array".into()));
    };
    if items.is_empty() {
        return Err(FetchError::EmptyPayload);
    }

    let records: Vec<RawRecord> = items
        .into_iter()
        .filter_map(|item| match item {
            Value::Object(record) => Some(record),
            _ => None,
        })
        .collect();

    if records.is_empty() {
        return Err(FetchError::InvalidPayload(
            "array contains no element records".into(),
        ));
    }
    Ok(records)
}
