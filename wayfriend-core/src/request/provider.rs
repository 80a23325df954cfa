use std::{future::Future, time::Duration};

use reqwest::Client;

use super::types::{RouteRequest, RouteResponse};
use crate::Error;

/// Default path of the backend's route search endpoint.
pub const DEFAULT_ROUTE_PATH: &str = "/route/find";

/// Source of obstacle-aware routes.
pub trait RouteProvider: Send + Sync {
    /// Finds a path for `request`.
    fn find_route(
        &self,
        request: &RouteRequest,
    ) -> impl Future<Output = Result<RouteResponse, Error>> + Send;
}

/// Calls the routing backend over HTTP.
#[derive(Debug, Clone)]
pub struct HttpRouteProvider {
    client: Client,
    endpoint: String,
}

impl HttpRouteProvider {
    /// # Errors
    ///
    /// Fails only if the HTTP client cannot be constructed.
    pub fn new(backend_url: &str, route_path: &str, timeout: Duration) -> Result<Self, Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, join_url(backend_url, route_path)))
    }

    pub fn with_client(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl RouteProvider for HttpRouteProvider {
    async fn find_route(&self, request: &RouteRequest) -> Result<RouteResponse, Error> {
        log::debug!(
            "[PROVIDER] POST {} ({}, {}) -> ({}, {}), avoiding {:?}",
            self.endpoint,
            request.start_lat,
            request.start_lng,
            request.end_lat,
            request.end_lng,
            request.avoid_types
        );

        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .inspect_err(|e| log::error!("Failed to reach routing backend {}: {e}", self.endpoint))?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(Error::Backend {
                status: status.as_u16(),
                body: text,
            });
        }

        serde_json::from_str(&text).map_err(|e| {
            log::error!(
                "Failed to parse route response from {}: {e}. Body: {text}",
                self.endpoint
            );
            Error::Decode(e)
        })
    }
}

/// Join a base URL and a path with exactly one slash between them.
pub fn join_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    if path.is_empty() {
        base.to_string()
    } else {
        format!("{base}/{path}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_url_normalises_slashes() {
        assert_eq!(
            join_url("http://localhost:8000/", "/route/find"),
            "http://localhost:8000/route/find"
        );
        assert_eq!(join_url("http://h", "route/find"), "http://h/route/find");
        assert_eq!(join_url("http://h/", ""), "http://h");
    }

    #[test]
    fn provider_endpoint() {
        let provider =
            HttpRouteProvider::new("http://backend:8000", DEFAULT_ROUTE_PATH, Duration::from_secs(1))
                .unwrap();
        assert_eq!(provider.endpoint(), "http://backend:8000/route/find");
    }

    async fn serve(router: axum::Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn request() -> RouteRequest {
        RouteRequest::new(
            crate::model::Coordinate::new(37.5665, 126.978),
            crate::model::Coordinate::new(37.5685, 126.98),
        )
    }

    #[tokio::test]
    async fn posts_request_and_parses_response() {
        use axum::{Json, routing::post};

        let router = axum::Router::new().route(
            "/route/find",
            post(|Json(req): Json<RouteRequest>| async move {
                Json(serde_json::json!({
                    "route": [[req.start_lat, req.start_lng], [req.end_lat, req.end_lng]],
                    "distance_m": 250.0,
                    "risk_factors": req.avoid_types,
                }))
            }),
        );
        let base = serve(router).await;

        let provider = HttpRouteProvider::new(&base, DEFAULT_ROUTE_PATH, Duration::from_secs(5)).unwrap();
        let mut req = request();
        req.avoid_types = vec!["curb".into()];
        let response = provider.find_route(&req).await.unwrap();

        assert_eq!(response.route.len(), 2);
        assert_eq!(response.distance_m, 250.0);
        assert_eq!(response.risk_factors, vec!["curb"]);
    }

    #[tokio::test]
    async fn non_success_status_is_backend_error() {
        use axum::{http::StatusCode, routing::post};

        let router = axum::Router::new().route(
            "/route/find",
            post(|| async { (StatusCode::SERVICE_UNAVAILABLE, "graph not loaded") }),
        );
        let base = serve(router).await;

        let provider = HttpRouteProvider::new(&base, DEFAULT_ROUTE_PATH, Duration::from_secs(5)).unwrap();
        match provider.find_route(&request()).await {
            Err(Error::Backend { status, body }) => {
                assert_eq!(status, 503);
                assert_eq!(body, "graph not loaded");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn malformed_body_is_decode_error() {
        use axum::routing::post;

        let router = axum::Router::new().route("/route/find", post(|| async { "not json" }));
        let base = serve(router).await;

        let provider = HttpRouteProvider::new(&base, DEFAULT_ROUTE_PATH, Duration::from_secs(5)).unwrap();
        assert!(matches!(
            provider.find_route(&request()).await,
            Err(Error::Decode(_))
        ));
    }
}
