//! HTTP front end for route-step synthesis and the routing backend.

use std::sync::Arc;

use axum::{
    BoxError, Json, Router,
    error_handling::HandleErrorLayer,
    http::{
        Method, StatusCode,
        header::{AUTHORIZATION, CONTENT_TYPE},
    },
    response::{IntoResponse, Response},
    routing::{any, get, post},
};
use serde_json::json;
use tower::{ServiceBuilder, limit::ConcurrencyLimitLayer, timeout::TimeoutLayer};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use wayfriend_core::request::{HttpRouteProvider, RoutePlanner, join_url};

pub mod config;
pub mod error;
mod handlers;
mod proxy;

pub use config::{ConfigError, Overrides, ServerConfig};
pub use error::ServerError;

pub struct AppState {
    pub config: ServerConfig,
    pub planner: RoutePlanner<HttpRouteProvider>,
    /// Shared by the planner and the proxy.
    pub http: reqwest::Client,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Result<Self, ServerError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;
        let provider = HttpRouteProvider::with_client(
            http.clone(),
            join_url(&config.backend_url, &config.route_path),
        );
        let planner = RoutePlanner::new(provider, config.locale);

        Ok(Self {
            config,
            planner,
            http,
        })
    }
}

pub fn build_router(state: Arc<AppState>) -> Router {
    let prefix = state.config.proxy_prefix.trim_end_matches('/').to_string();

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
            Method::PATCH,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION]);

    let middleware = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(HandleErrorLayer::new(handle_middleware_error))
        .layer(TimeoutLayer::new(state.config.request_timeout()))
        .layer(ConcurrencyLimitLayer::new(state.config.max_concurrency));

    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/route/steps", post(handlers::steps))
        .route("/api/route/geojson", post(handlers::geojson))
        .route("/api/route/calculate", post(handlers::calculate))
        .route(&prefix, any(proxy::missing_path))
        .route(&format!("{prefix}/"), any(proxy::missing_path))
        .route(&format!("{prefix}/{{*path}}"), any(proxy::forward))
        .layer(middleware)
        .with_state(state)
}

async fn handle_middleware_error(err: BoxError) -> Response {
    if err.is::<tower::timeout::error::Elapsed>() {
        return (
            StatusCode::REQUEST_TIMEOUT,
            Json(json!({ "error": "Request timed out" })),
        )
            .into_response();
    }

    tracing::error!(error = %err, "unhandled middleware error");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "Internal error", "message": err.to_string() })),
    )
        .into_response()
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// Serves `router` on an ephemeral port, returning its base URL.
    pub async fn spawn_backend(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    pub async fn app(backend_url: &str) -> Router {
        let config = ServerConfig::default()
            .apply(Overrides {
                listen: None,
                backend_url: Some(backend_url.to_string()),
            })
            .unwrap();
        build_router(Arc::new(AppState::new(config).unwrap()))
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, header},
    };
    use tower::ServiceExt;

    use super::{testing::app, *};

    #[tokio::test]
    async fn preflight_mirrors_origin() {
        let app = app("http://127.0.0.1:9").await;
        let response = app
            .oneshot(
                Request::builder()
                    .method(Method::OPTIONS)
                    .uri("/api/proxy/route/find")
                    .header(header::ORIGIN, "http://localhost:5173")
                    .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let headers = response.headers();
        assert_eq!(
            headers[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "http://localhost:5173"
        );
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");
        let methods = headers[header::ACCESS_CONTROL_ALLOW_METHODS].to_str().unwrap();
        assert!(methods.contains("PATCH"));
    }

    #[tokio::test]
    async fn simple_requests_carry_cors_headers() {
        let app = app("http://127.0.0.1:9").await;
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .header(header::ORIGIN, "https://wayfriend.app")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "https://wayfriend.app"
        );
    }

    #[tokio::test]
    async fn requests_without_origin_get_no_allow_origin() {
        let app = app("http://127.0.0.1:9").await;
        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
    }

    #[tokio::test]
    async fn timeouts_map_to_408() {
        let err: BoxError = Box::new(tower::timeout::error::Elapsed::new());
        let response = handle_middleware_error(err).await;
        assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
    }

    #[tokio::test]
    async fn unknown_routes_are_404() {
        let app = app("http://127.0.0.1:9").await;
        let response = app
            .oneshot(Request::builder().uri("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
