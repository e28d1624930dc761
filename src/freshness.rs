//! Freshness Checker.
//!
//! A player is online when the `Last-Modified` of its `thumbnail.jpg` is
//! recent. The HEAD request lives in [`check_thumbnail`]; the decision is the
//! pure [`classify`] so it can be exercised with fixed clocks.

use chrono::{DateTime, FixedOffset, Utc};

use crate::clock::{format_in_offset, parse_http_date};
use crate::config::{ServiceConfig, THUMBNAIL_FILE};
use crate::models::{Folder, StatusResult};
use crate::traits::{HttpClient, HttpError, Response};

/// Error reported when the thumbnail has no `Last-Modified` header.
pub const NO_LAST_MODIFIED: &str = "No Last-Modified header found.";

/// Thresholds applied to every folder in a poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FreshnessPolicy {
    /// Maximum age in whole minutes (inclusive) to count as online
    pub threshold_minutes: i64,
    /// Offset used to render `lastModified`
    pub offset: FixedOffset,
}

impl From<&ServiceConfig> for FreshnessPolicy {
    fn from(config: &ServiceConfig) -> Self {
        Self {
            threshold_minutes: config.online_threshold_minutes,
            offset: config.utc_offset,
        }
    }
}

impl Default for FreshnessPolicy {
    fn default() -> Self {
        FreshnessPolicy::from(&ServiceConfig::default())
    }
}

/// Message for a missing thumbnail.
pub fn not_found_message() -> String {
    format!("File {} not found.", THUMBNAIL_FILE)
}

/// HEAD the folder's thumbnail and classify the outcome.
///
/// Never fails: every problem becomes an offline result with an error string.
pub async fn check_thumbnail(
    client: &dyn HttpClient,
    folder: &Folder,
    now: DateTime<Utc>,
    policy: &FreshnessPolicy,
) -> StatusResult {
    let url = folder.file_url(THUMBNAIL_FILE);
    let outcome = client.head(&url).await;
    let result = classify(&folder.name, outcome, now, policy);

    if let Some(err) = &result.error {
        tracing::debug!(folder = %folder.name, "offline: {}", err);
    } else {
        tracing::debug!(folder = %folder.name, online = result.is_online, "checked {}", url);
    }

    result
}

/// Turn a HEAD outcome into a status.
pub fn classify(
    folder: &str,
    outcome: Result<Response, HttpError>,
    now: DateTime<Utc>,
    policy: &FreshnessPolicy,
) -> StatusResult {
    let response = match outcome {
        Ok(response) => response,
        Err(e) => return StatusResult::offline(folder, e.to_string()),
    };

    if response.status == 404 {
        return StatusResult::offline(folder, not_found_message());
    }
    if !response.is_success() {
        return StatusResult::offline(
            folder,
            format!("Request failed with status code {}", response.status),
        );
    }

    let Some(raw) = response.header("last-modified") else {
        return StatusResult::offline(folder, NO_LAST_MODIFIED);
    };
    let Some(last_modified) = parse_http_date(raw) else {
        return StatusResult::offline(folder, format!("Invalid Last-Modified header: {}", raw));
    };

    let display = format_in_offset(last_modified, policy.offset);
    if is_fresh(last_modified, now, policy.threshold_minutes) {
        StatusResult::online(folder, display)
    } else {
        StatusResult::stale(folder, display)
    }
}

/// Age is counted in whole minutes, truncated toward zero, so anything under
/// `threshold + 1` minutes old passes. Timestamps in the future pass too.
pub fn is_fresh(last_modified: DateTime<Utc>, now: DateTime<Utc>, threshold_minutes: i64) -> bool {
    (now - last_modified).num_minutes() <= threshold_minutes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{MockHttpClient, MockResponse};
    use bytes::Bytes;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 4, 10, 2, 0, 0).unwrap()
    }

    fn http_date(t: DateTime<Utc>) -> String {
        t.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
    }

    fn head_ok(last_modified: Option<&str>) -> Result<Response, HttpError> {
        let response = Response::new(200, Bytes::new());
        Ok(match last_modified {
            Some(v) => response.header_pair("Last-Modified", v),
            None => response,
        })
    }

    #[test]
    fn test_recent_thumbnail_is_online() {
        let lm = now() - Duration::minutes(2);
        let r = classify("a", head_ok(Some(http_date(lm).as_str())), now(), &FreshnessPolicy::default());
        assert!(r.is_online);
        assert_eq!(r.last_modified.as_deref(), Some("2024-04-10 08:58:00"));
        assert!(r.error.is_none());
    }

    #[test]
    fn test_old_thumbnail_is_offline_with_timestamp() {
        let lm = now() - Duration::minutes(6);
        let r = classify("a", head_ok(Some(http_date(lm).as_str())), now(), &FreshnessPolicy::default());
        assert!(!r.is_online);
        assert_eq!(r.last_modified.as_deref(), Some("2024-04-10 08:54:00"));
        assert!(r.error.is_none());
    }

    #[test]
    fn test_threshold_boundary_truncates_minutes() {
        assert!(is_fresh(now() - Duration::minutes(5), now(), 5));
        assert!(is_fresh(now() - Duration::seconds(5 * 60 + 59), now(), 5));
        assert!(!is_fresh(now() - Duration::minutes(6), now(), 5));
    }

    #[test]
    fn test_future_timestamp_is_fresh() {
        assert!(is_fresh(now() + Duration::minutes(30), now(), 5));
    }

    #[test]
    fn test_missing_header() {
        let r = classify("a", head_ok(None), now(), &FreshnessPolicy::default());
        assert!(!r.is_online);
        assert!(r.last_modified.is_none());
        assert_eq!(r.error.as_deref(), Some(NO_LAST_MODIFIED));
    }

    #[test]
    fn test_unparseable_header() {
        let r = classify("a", head_ok(Some("soon")), now(), &FreshnessPolicy::default());
        assert!(!r.is_online);
        assert!(r.last_modified.is_none());
        assert_eq!(r.error.as_deref(), Some("Invalid Last-Modified header: soon"));
    }

    #[test]
    fn test_not_found() {
        let outcome = Ok(Response::new(404, Bytes::new()));
        let r = classify("b", outcome, now(), &FreshnessPolicy::default());
        assert!(!r.is_online);
        assert_eq!(r.error.as_deref(), Some("File thumbnail.jpg not found."));
    }

    #[test]
    fn test_other_status() {
        let outcome = Ok(Response::new(503, Bytes::new()));
        let r = classify("b", outcome, now(), &FreshnessPolicy::default());
        assert_eq!(r.error.as_deref(), Some("Request failed with status code 503"));
    }

    #[test]
    fn test_transport_error_keeps_description() {
        let outcome = Err(HttpError::Timeout("operation timed out".to_string()));
        let r = classify("b", outcome, now(), &FreshnessPolicy::default());
        assert!(!r.is_online);
        assert_eq!(r.error.as_deref(), Some("Request timeout: operation timed out"));
    }

    #[test]
    fn test_custom_policy() {
        let policy = FreshnessPolicy {
            threshold_minutes: 1,
            offset: FixedOffset::east_opt(0).unwrap(),
        };
        let lm = now() - Duration::minutes(2);
        let r = classify("a", head_ok(Some(http_date(lm).as_str())), now(), &policy);
        assert!(!r.is_online);
        assert_eq!(r.last_modified.as_deref(), Some("2024-04-10 01:58:00"));
    }

    #[tokio::test]
    async fn test_check_thumbnail_heads_the_right_url() {
        let client = MockHttpClient::new();
        let folder = Folder::under("http://files.local/players/", "lobby");
        client.set_response(
            "http://files.local/players/lobby/thumbnail.jpg",
            MockResponse::Success(
                Response::new(200, Bytes::new())
                    .header_pair("last-modified", &http_date(now() - Duration::minutes(1))),
            ),
        );

        let r = check_thumbnail(&client, &folder, now(), &FreshnessPolicy::default()).await;
        assert!(r.is_online);
        assert_eq!(r.folder, "lobby");

        let requests = client.get_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, "HEAD");
        assert_eq!(requests[0].url, "http://files.local/players/lobby/thumbnail.jpg");
    }
}
