mod client;
mod error;
mod fetcher;
mod retry;

pub use client::HttpFeedClient;
pub use error::FetchError;
pub use fetcher::Fetcher;
pub use retry::{Backoff, RetryPolicy, ThreadSleeper};

#[cfg(test)]
pub use fetcher::testing;
#[cfg(test)]
pub use retry::Sleeper;
