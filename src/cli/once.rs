//! One-shot poll for cron jobs and debugging.

use crate::aggregator::StatusPoller;
use crate::error::ServiceResult;
use crate::models::StatusResponse;

/// Poll once and render the same body `GET /api/status` would return.
pub async fn render_once(poller: &StatusPoller) -> ServiceResult<String> {
    let report = poller.poll().await?;
    let body = serde_json::to_string_pretty(&StatusResponse::from(report))?;
    Ok(body)
}

/// Handle the --once command.
pub async fn handle_once_command(poller: &StatusPoller) -> ServiceResult<()> {
    let body = render_once(poller).await?;
    println!("{}", body);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{MockHttpClient, MockResponse};
    use crate::config::ServiceConfig;
    use crate::traits::HttpError;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_render_once_with_unreachable_listing() {
        let client = MockHttpClient::new();
        client.set_default_response(MockResponse::Error(HttpError::ConnectionFailed(
            "refused".to_string(),
        )));
        let poller = StatusPoller::new(Arc::new(client), &ServiceConfig::default());

        let body = render_once(&poller).await.unwrap();
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["data"]["online"], serde_json::json!([]));
        assert_eq!(json["data"]["offline"], serde_json::json!([]));
    }
}
