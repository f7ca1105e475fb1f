use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::thread;

use crate::catalog::catalog::Catalog;
use crate::catalog::types::GroupRecords;
use crate::config::FeedConfig;
use crate::elements::normalize_records;
use crate::feed::{FetchError, Fetcher, HttpFeedClient, ThreadSleeper};
use crate::propagation::{ModelBuilder, Sgp4Builder};

/// Runs the build phase: fetch every group, normalize, build models.
pub struct CatalogLoader {
    fetcher: Fetcher,
    builder: Box<dyn ModelBuilder>,
    groups: Vec<String>,
    workers: usize,
}

impl CatalogLoader {
    pub fn new(
        fetcher: Fetcher,
        builder: Box<dyn ModelBuilder>,
        groups: Vec<String>,
        workers: usize,
    ) -> Self {
        Self {
            fetcher,
            builder,
            groups,
            workers: workers.max(1),
        }
    }

    pub fn from_config(config: &FeedConfig) -> Result<Self, FetchError> {
        let client = HttpFeedClient::new(&config.base_url, config.timeout)?;
        let fetcher = Fetcher::new(
            Box::new(client),
            config.retry.clone(),
            Box::new(ThreadSleeper),
        );
        Ok(Self::new(
            fetcher,
            Box::new(Sgp4Builder),
            config.groups.clone(),
            config.workers,
        ))
    }

    /// Build a fresh catalog from the live feed. Never fails: unreachable
    /// groups come back empty.
    pub fn load(&self) -> Catalog {
        log::info!("Downloading {} groups", self.groups.len());
        let groups = if self.workers > 1 && self.groups.len() > 1 {
            self.fetch_concurrently()
        } else {
            self.groups.iter().map(|g| self.fetch_group(g)).collect()
        };
        Catalog::build(groups, self.builder.as_ref())
    }

    fn fetch_group(&self, label: &str) -> GroupRecords {
        let raw = self.fetcher.fetch_or_empty(label);
        GroupRecords {
            label: label.to_string(),
            records: normalize_records(label, raw),
        }
    }

    /// Bounded worker pool over the group list. Results are slotted by group
    /// position so the catalog is built in configured order.
    fn fetch_concurrently(&self) -> Vec<GroupRecords> {
        let next = AtomicUsize::new(0);
        let slots: Mutex<Vec<Option<GroupRecords>>> =
            Mutex::new((0..self.groups.len()).map(|_| None).collect());

        thread::scope(|scope| {
            for _ in 0..self.workers.min(self.groups.len()) {
                scope.spawn(|| loop {
                    let i = next.fetch_add(1, Ordering::Relaxed);
                    let Some(label) = self.groups.get(i) else {
                        break;
                    };
                    let fetched = self.fetch_group(label);
                    let mut slots = slots.lock().unwrap_or_else(|p| p.into_inner());
                    slots[i] = Some(fetched);
                });
            }
        });

        slots
            .into_inner()
            .unwrap_or_else(|p| p.into_inner())
            .into_iter()
            .zip(&self.groups)
            .map(|(slot, label)| {
                slot.unwrap_or_else(|| GroupRecords {
                    label: label.clone(),
                    records: Vec::new(),
                })
            })
            .collect()
    }
}
