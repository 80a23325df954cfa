//! Forwarding proxy to the routing backend.
//!
//! Lets a browser reach the backend through this server's origin. CORS is
//! handled by the router's `CorsLayer`; upstream CORS headers are dropped so
//! they never conflict with it.

use std::sync::Arc;

use axum::{
    Json,
    body::{Body, Bytes},
    extract::{Path, State},
    http::{
        HeaderMap, HeaderName, Method, StatusCode, Uri,
        header::{AUTHORIZATION, CONTENT_TYPE},
    },
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};
use tracing::{debug, error};
use wayfriend_core::request::join_url;

use crate::AppState;

const HOP_BY_HOP: [&str; 4] = ["connection", "transfer-encoding", "content-length", "keep-alive"];

/// Mounted at the bare prefix, with and without a trailing slash, where no
/// backend path was given.
pub async fn missing_path(uri: Uri) -> Response {
    invalid_path("", &uri)
}

pub async fn forward(
    State(state): State<Arc<AppState>>,
    Path(path): Path<String>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    if path.trim_matches('/').is_empty() {
        return invalid_path(&path, &uri);
    }

    let mut url = join_url(&state.config.backend_url, &path);
    if let Some(query) = uri.query() {
        url.push('?');
        url.push_str(query);
    }
    debug!(%method, %url, "proxying request");

    let mut upstream = state
        .http
        .request(method.clone(), &url)
        .header(CONTENT_TYPE, "application/json");
    if let Some(auth) = headers.get(AUTHORIZATION) {
        upstream = upstream.header(AUTHORIZATION, auth.clone());
    }
    if method != Method::GET && method != Method::HEAD && !body.is_empty() {
        upstream = upstream.body(body);
    }

    let response = match upstream.send().await {
        Ok(response) => response,
        Err(e) => return proxy_error(&url, &e),
    };

    let status = response.status();
    let upstream_headers = response.headers().clone();
    let bytes = match response.bytes().await {
        Ok(bytes) => bytes,
        Err(e) => return proxy_error(&url, &e),
    };

    let content_type = upstream_headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    let body = if content_type.contains("application/json") {
        let value: Value = serde_json::from_slice(&bytes).unwrap_or_else(|_| json!({}));
        Body::from(value.to_string())
    } else {
        Body::from(bytes)
    };

    let mut relayed = (status, body).into_response();
    let headers = relayed.headers_mut();
    for (name, value) in &upstream_headers {
        if is_forwardable(name) {
            headers.append(name.clone(), value.clone());
        }
    }
    relayed
}

fn is_forwardable(name: &HeaderName) -> bool {
    let name = name.as_str();
    !name.starts_with("access-control-") && !HOP_BY_HOP.contains(&name)
}

fn invalid_path(path: &str, uri: &Uri) -> Response {
    let body = json!({
        "error": "Invalid path",
        "message": "Path is required",
        "received": { "path": path, "url": uri.to_string() },
    });
    (StatusCode::BAD_REQUEST, Json(body)).into_response()
}

fn proxy_error(url: &str, e: &reqwest::Error) -> Response {
    error!(%url, error = %e, "proxy request failed");
    let body = json!({
        "error": "Proxy error",
        "message": e.to_string(),
        "url": url,
    });
    (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
}
