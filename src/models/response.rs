//! JSON bodies returned by `GET /api/status`.

use serde::{Deserialize, Serialize};

use super::status::{StatusReport, StatusResult};

/// Message attached to every successful response.
pub const SUCCESS_MESSAGE: &str = "24 Media.";

/// Message attached to every failed response.
pub const FAILURE_MESSAGE: &str = "Error fetching folders status.";

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct StatusData {
    pub online: Vec<StatusResult>,
    pub offline: Vec<StatusResult>,
}

/// 200 body.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub success: bool,
    pub message: String,
    pub current_time: String,
    pub data: StatusData,
}

impl From<StatusReport> for StatusResponse {
    fn from(report: StatusReport) -> Self {
        Self {
            success: true,
            message: SUCCESS_MESSAGE.to_string(),
            current_time: report.current_time,
            data: StatusData {
                online: report.online,
                offline: report.offline,
            },
        }
    }
}

/// 500 body.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            message: FAILURE_MESSAGE.to_string(),
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_response_shape() {
        let report = StatusReport::partition(
            "2024-05-01 12:00:00".to_string(),
            vec![StatusResult::online("a", "2024-05-01 11:58:00")],
        );
        let json = serde_json::to_value(StatusResponse::from(report)).unwrap();

        assert_eq!(json["success"], true);
        assert_eq!(json["message"], "24 Media.");
        assert_eq!(json["currentTime"], "2024-05-01 12:00:00");
        assert_eq!(json["data"]["online"][0]["folder"], "a");
        assert_eq!(json["data"]["offline"], serde_json::json!([]));
    }

    #[test]
    fn test_error_response_shape() {
        let json = serde_json::to_value(ErrorResponse::new("boom")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "success": false,
                "message": "Error fetching folders status.",
                "error": "boom"
            })
        );
    }
}
