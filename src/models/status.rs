use serde::{Deserialize, Serialize};

/// Outcome of checking one player folder during a poll.
///
/// The checker builds these through [`StatusResult::online`],
/// [`StatusResult::stale`] and [`StatusResult::offline`]. Only `online`
/// sets `is_online`, and it always pairs it with a timestamp and no error.
/// The fields stay public for deserializing responses, so code that builds
/// a result by hand has to keep that pairing itself.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StatusResult {
    /// Folder name as it appeared in the listing
    pub folder: String,
    pub is_online: bool,
    /// `Last-Modified` of the thumbnail, rendered in the report's offset
    pub last_modified: Option<String>,
    pub error: Option<String>,
}

impl StatusResult {
    /// A player whose thumbnail is fresh enough.
    pub fn online(folder: impl Into<String>, last_modified: impl Into<String>) -> Self {
        Self {
            folder: folder.into(),
            is_online: true,
            last_modified: Some(last_modified.into()),
            error: None,
        }
    }

    /// A player with a readable but stale thumbnail timestamp.
    pub fn stale(folder: impl Into<String>, last_modified: impl Into<String>) -> Self {
        Self {
            folder: folder.into(),
            is_online: false,
            last_modified: Some(last_modified.into()),
            error: None,
        }
    }

    /// A player whose check failed.
    pub fn offline(folder: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            folder: folder.into(),
            is_online: false,
            last_modified: None,
            error: Some(error.into()),
        }
    }
}

/// Aggregated result of one poll.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StatusReport {
    /// Poll time, `YYYY-MM-DD HH:mm:ss` in the configured offset
    pub current_time: String,
    pub online: Vec<StatusResult>,
    pub offline: Vec<StatusResult>,
}

impl StatusReport {
    /// Split results into online and offline, keeping their relative order.
    pub fn partition(current_time: String, results: Vec<StatusResult>) -> Self {
        let (online, offline) = results.into_iter().partition(|r| r.is_online);
        Self {
            current_time,
            online,
            offline,
        }
    }

    /// Total number of folders checked.
    pub fn len(&self) -> usize {
        self.online.len() + self.offline.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
