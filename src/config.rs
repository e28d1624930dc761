//! Service configuration.
//!
//! Every setting has a built-in default matching the production deployment;
//! `PLAYER_STATUS_*` environment variables override them.

use chrono::{FixedOffset, Offset, Utc};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::sync::Semaphore;

use crate::clock::offset_from_hours;
use crate::error::{ServiceResult, StatusError};

/// Directory listing polled when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "https://demuk.magicsigncloud.com/24media/logs_player/";

/// Default listen port.
pub const DEFAULT_PORT: u16 = 3000;

/// Thumbnails at most this many whole minutes old count as online.
pub const DEFAULT_ONLINE_THRESHOLD_MINUTES: i64 = 5;

/// Reporting offset, hours east of UTC.
pub const DEFAULT_UTC_OFFSET_HOURS: i32 = 7;

/// File whose `Last-Modified` marks a player as alive.
pub const THUMBNAIL_FILE: &str = "thumbnail.jpg";

pub const ENV_BASE_URL: &str = "PLAYER_STATUS_BASE_URL";
pub const ENV_BIND: &str = "PLAYER_STATUS_BIND";
pub const ENV_THRESHOLD_MINUTES: &str = "PLAYER_STATUS_THRESHOLD_MINUTES";
pub const ENV_UTC_OFFSET_HOURS: &str = "PLAYER_STATUS_UTC_OFFSET_HOURS";
pub const ENV_TIMEOUT_SECS: &str = "PLAYER_STATUS_TIMEOUT_SECS";
pub const ENV_MAX_CONCURRENCY: &str = "PLAYER_STATUS_MAX_CONCURRENCY";

/// Configuration for the poller and the HTTP endpoint.
///
/// # Example
///
/// ```
/// use player_status::config::ServiceConfig;
///
/// let config = ServiceConfig::default()
///     .with_base_url("http://files.local/players")
///     .with_max_concurrency(Some(16));
/// assert_eq!(config.base_url, "http://files.local/players/");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    /// Directory listing URL, always ending with `/`
    pub base_url: String,
    /// Address the HTTP server binds to
    pub bind_addr: SocketAddr,
    /// Maximum thumbnail age, in whole minutes, for a player to be online
    pub online_threshold_minutes: i64,
    /// Offset used for every reported timestamp
    pub utc_offset: FixedOffset,
    /// Per-request timeout for upstream calls; `None` keeps the client default
    pub request_timeout: Option<Duration>,
    /// Cap on thumbnail checks in flight; `None` means all at once
    pub max_concurrency: Option<usize>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            bind_addr: SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT)),
            online_threshold_minutes: DEFAULT_ONLINE_THRESHOLD_MINUTES,
            utc_offset: offset_from_hours(DEFAULT_UTC_OFFSET_HOURS).unwrap_or_else(|| Utc.fix()),
            request_timeout: None,
            max_concurrency: None,
        }
    }
}

impl ServiceConfig {
    /// Create a ServiceConfig with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load defaults and apply `PLAYER_STATUS_*` overrides from the environment.
    pub fn from_env() -> ServiceResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load defaults and apply overrides from an arbitrary key lookup.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> ServiceResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let mut config = Self::default();

        if let Some(url) = get(ENV_BASE_URL) {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(StatusError::config(ENV_BASE_URL, "must be an http(s) URL"));
            }
            config = config.with_base_url(url);
        }

        if let Some(bind) = get(ENV_BIND) {
            let addr = match bind.parse::<SocketAddr>() {
                Ok(addr) => addr,
                // A bare port binds on every interface
                Err(_) => bind
                    .parse::<u16>()
                    .map(|port| SocketAddr::from(([0, 0, 0, 0], port)))
                    .map_err(|_| {
                        StatusError::config(ENV_BIND, format!("'{}' is not an address or port", bind))
                    })?,
            };
            config.bind_addr = addr;
        }

        if let Some(minutes) = get(ENV_THRESHOLD_MINUTES) {
            let minutes = minutes
                .parse::<i64>()
                .ok()
                .filter(|m| *m >= 0)
                .ok_or_else(|| StatusError::config(ENV_THRESHOLD_MINUTES, "must be a non-negative integer"))?;
            config.online_threshold_minutes = minutes;
        }

        if let Some(hours) = get(ENV_UTC_OFFSET_HOURS) {
            config.utc_offset = hours
                .parse::<i32>()
                .ok()
                .and_then(offset_from_hours)
                .ok_or_else(|| {
                    StatusError::config(ENV_UTC_OFFSET_HOURS, "must be an integer between -23 and 23")
                })?;
        }

        if let Some(secs) = get(ENV_TIMEOUT_SECS) {
            let secs = secs
                .parse::<u64>()
                .ok()
                .filter(|s| *s > 0)
                .ok_or_else(|| StatusError::config(ENV_TIMEOUT_SECS, "must be a positive integer"))?;
            config.request_timeout = Some(Duration::from_secs(secs));
        }

        if let Some(limit) = get(ENV_MAX_CONCURRENCY) {
            let limit = limit
                .parse::<usize>()
                .ok()
                .filter(|l| (1..=Semaphore::MAX_PERMITS).contains(l))
                .ok_or_else(|| {
                    StatusError::config(
                        ENV_MAX_CONCURRENCY,
                        format!("must be an integer between 1 and {}", Semaphore::MAX_PERMITS),
                    )
                })?;
            config.max_concurrency = Some(limit);
        }

        Ok(config)
    }

    /// Set the listing URL. A trailing `/` is added if missing.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        let mut url = url.into();
        if !url.ends_with('/') {
            url.push('/');
        }
        self.base_url = url;
        self
    }

    /// Set the bind address.
    pub fn with_bind_addr(mut self, addr: SocketAddr) -> Self {
        self.bind_addr = addr;
        self
    }

    /// Set the online threshold in minutes.
    pub fn with_online_threshold_minutes(mut self, minutes: i64) -> Self {
        self.online_threshold_minutes = minutes;
        self
    }

    /// Set the reporting offset.
    pub fn with_utc_offset(mut self, offset: FixedOffset) -> Self {
        self.utc_offset = offset;
        self
    }

    /// Set the upstream request timeout.
    pub fn with_request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Set the fan-out cap.
    pub fn with_max_concurrency(mut self, limit: Option<usize>) -> Self {
        self.max_concurrency = limit;
        self
    }
}
