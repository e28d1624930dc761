//! HTTP Endpoint.
//!
//! Serves the aggregated player status on `GET /api/status`.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use tokio::task::JoinHandle;
use tower_http::cors::{Any, CorsLayer};

use crate::aggregator::StatusPoller;
use crate::error::ServiceResult;
use crate::models::{ErrorResponse, StatusResponse};

/// Route serving the status report.
pub const STATUS_ROUTE: &str = "/api/status";

/// Shared state for request handlers.
#[derive(Clone)]
pub struct AppState {
    pub poller: Arc<StatusPoller>,
}

/// Build the router with CORS open to any origin.
pub fn router(poller: Arc<StatusPoller>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(STATUS_ROUTE, get(status_handler))
        .layer(cors)
        .with_state(AppState { poller })
}

/// Start the server on `addr` in a background task.
///
/// Returns the task handle and the address actually bound, which differs
/// from `addr` when port 0 is requested.
pub async fn start_server_on(
    addr: SocketAddr,
    poller: Arc<StatusPoller>,
) -> ServiceResult<(JoinHandle<()>, SocketAddr)> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    let actual_addr = listener.local_addr()?;
    let app = router(poller);

    tracing::info!("Server is running on http://{}", actual_addr);

    let handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!("Server error: {}", e);
        }
    });

    Ok((handle, actual_addr))
}

/// Serve on `addr` until `shutdown` resolves.
pub async fn serve_until<F>(addr: SocketAddr, poller: Arc<StatusPoller>, shutdown: F) -> ServiceResult<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Server is running on http://{}", listener.local_addr()?);

    axum::serve(listener, router(poller))
        .with_graceful_shutdown(shutdown)
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Handler for `GET /api/status`.
async fn status_handler(State(state): State<AppState>) -> Response {
    match state.poller.poll().await {
        Ok(report) => (StatusCode::OK, Json(StatusResponse::from(report))).into_response(),
        Err(e) => {
            tracing::error!("Status poll failed ({}): {}", e.error_code(), e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new(e.to_string())),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{MockHttpClient, MockResponse};
    use crate::config::ServiceConfig;
    use crate::traits::Response as HttpResponse;
    use bytes::Bytes;

    fn poller_with_listing(html: &str) -> Arc<StatusPoller> {
        let client = MockHttpClient::new();
        client.set_response(
            "http://files.local/",
            MockResponse::Success(HttpResponse::new(200, Bytes::from(html.to_string()))),
        );
        client.set_default_response(MockResponse::Success(HttpResponse::new(404, Bytes::new())));
        let config = ServiceConfig::default().with_base_url("http://files.local/");
        Arc::new(StatusPoller::new(Arc::new(client), &config))
    }

    #[tokio::test]
    async fn test_handler_returns_report() {
        let poller = poller_with_listing(r#"<pre><a href="a/">a/</a></pre>"#);
        let response = status_handler(State(AppState { poller })).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_start_server_binds_random_port() {
        let poller = poller_with_listing("<pre></pre>");
        let addr: SocketAddr = "127.0.0.1:0".parse().unwrap();
        let (handle, bound) = start_server_on(addr, poller).await.unwrap();
        assert_ne!(bound.port(), 0);
        handle.abort();
    }

    #[tokio::test]
    async fn test_serve_until_returns_after_shutdown() {
        let poller = poller_with_listing("<pre></pre>");
        let addr: SocketAddr = "127.0.0.1:0".parse().unwrap();
        let (tx, rx) = tokio::sync::oneshot::channel::<()>();

        let server = tokio::spawn(serve_until(addr, poller, async move {
            let _ = rx.await;
        }));
        tx.send(()).unwrap();

        let result = tokio::time::timeout(std::time::Duration::from_secs(5), server)
            .await
            .expect("server did not stop")
            .unwrap();
        assert!(result.is_ok());
    }
}
