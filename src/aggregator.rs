//! Aggregator.
//!
//! One poll = fetch the listing, check every folder concurrently, split the
//! results into online and offline. Nothing survives between polls.

use chrono::{DateTime, Utc};
use futures::future::join_all;
use std::sync::Arc;
use tokio::sync::Semaphore;

use crate::adapters::ReqwestHttpClient;
use crate::clock::format_in_offset;
use crate::config::ServiceConfig;
use crate::error::{ServiceResult, StatusError};
use crate::freshness::{check_thumbnail, FreshnessPolicy};
use crate::listing::fetch_folders;
use crate::models::{Folder, StatusReport, StatusResult};
use crate::traits::HttpClient;

/// Runs polls against one upstream listing.
///
/// Cheap to share behind an `Arc`; each call to [`StatusPoller::poll`] is
/// independent.
pub struct StatusPoller {
    client: Arc<dyn HttpClient>,
    base_url: String,
    policy: FreshnessPolicy,
    max_concurrency: Option<usize>,
}

impl StatusPoller {
    /// Create a poller using the given client.
    pub fn new(client: Arc<dyn HttpClient>, config: &ServiceConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.clone(),
            policy: FreshnessPolicy::from(config),
            max_concurrency: config.max_concurrency,
        }
    }

    /// Create a poller backed by reqwest, honoring the configured timeout.
    pub fn from_config(config: &ServiceConfig) -> Self {
        let client = match config.request_timeout {
            Some(timeout) => ReqwestHttpClient::with_timeout(timeout),
            None => ReqwestHttpClient::new(),
        };
        Self::new(Arc::new(client), config)
    }

    /// Poll now.
    pub async fn poll(&self) -> ServiceResult<StatusReport> {
        self.poll_at(Utc::now()).await
    }

    /// Poll using `now` as the reference time for every check and for
    /// `currentTime`.
    pub async fn poll_at(&self, now: DateTime<Utc>) -> ServiceResult<StatusReport> {
        let folders = fetch_folders(self.client.as_ref(), &self.base_url).await;
        let results = check_all(
            Arc::clone(&self.client),
            folders,
            now,
            self.policy,
            self.max_concurrency,
        )
        .await?;

        let report = StatusReport::partition(format_in_offset(now, self.policy.offset), results);
        tracing::info!(
            online = report.online.len(),
            offline = report.offline.len(),
            "Polled {}",
            self.base_url
        );
        Ok(report)
    }
}

/// Check every folder concurrently and return results in folder order.
///
/// Each check runs as its own task. With `max_concurrency` unset all checks
/// are in flight at once; otherwise a semaphore caps them. A task that
/// panics fails the whole batch; ordinary check failures never do.
pub async fn check_all(
    client: Arc<dyn HttpClient>,
    folders: Vec<Folder>,
    now: DateTime<Utc>,
    policy: FreshnessPolicy,
    max_concurrency: Option<usize>,
) -> ServiceResult<Vec<StatusResult>> {
    let semaphore = max_concurrency.map(|limit| {
        Arc::new(Semaphore::new(limit.clamp(1, Semaphore::MAX_PERMITS)))
    });

    let tasks: Vec<_> = folders
        .into_iter()
        .map(|folder| {
            let client = Arc::clone(&client);
            let semaphore = semaphore.clone();
            let name = folder.name.clone();
            let handle = tokio::spawn(async move {
                let _permit = match semaphore {
                    Some(semaphore) => semaphore.acquire_owned().await.ok(),
                    None => None,
                };
                check_thumbnail(client.as_ref(), &folder, now, &policy).await
            });
            (name, handle)
        })
        .collect();

    let joined = join_all(
        tasks
            .into_iter()
            .map(|(name, handle)| async move { (name, handle.await) }),
    )
    .await;

    joined
        .into_iter()
        .map(|(folder, outcome)| {
            outcome.map_err(|e| {
                tracing::error!("Status check for '{}' aborted: {}", folder, e);
                StatusError::CheckAborted {
                    folder,
                    message: e.to_string(),
                }
            })
        })
        .collect()
}
