//! Test utilities for integration tests.
//!
//! Provides router construction with injectable delays, request builders for
//! JSON and multipart bodies, and response helpers.

use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;

use horizons_backend::{create_router, DelayProfile, GenerationService, RouterConfig};

/// Boundary used by [`MultipartBuilder`].
pub const BOUNDARY: &str = "----horizons-test-boundary-7MA4YWxkTrZu0gW";

// =============================================================================
// Routers
// =============================================================================

/// Router with no artificial delays and tracing disabled.
pub fn instant_router() -> Router {
    router_with_delays(DelayProfile::none())
}

/// Router with the given delays and tracing disabled.
pub fn router_with_delays(delays: DelayProfile) -> Router {
    router_with_config(delays, RouterConfig::new().with_tracing(false))
}

pub fn router_with_config(delays: DelayProfile, config: RouterConfig) -> Router {
    create_router(GenerationService::new(delays), config)
}

/// Delay profile where only the generation delay is set.
pub fn generation_delay(delay: Duration) -> DelayProfile {
    DelayProfile {
        generation: delay,
        ..DelayProfile::none()
    }
}

// =============================================================================
// Requests
// =============================================================================

/// `POST` a JSON value with `Content-Type: application/json`.
pub fn json_request(uri: &str, body: &Value) -> Request<Body> {
    raw_request(uri, Some("application/json"), body.to_string())
}

/// `POST` an arbitrary body with an optional content type.
pub fn raw_request(uri: &str, content_type: Option<&str>, body: impl Into<Body>) -> Request<Body> {
    let mut builder = Request::builder().method(Method::POST).uri(uri);
    if let Some(content_type) = content_type {
        builder = builder.header(header::CONTENT_TYPE, content_type);
    }
    builder.body(body.into()).unwrap()
}

pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Builder for `multipart/form-data` bodies.
#[derive(Default)]
pub struct MultipartBuilder {
    body: Vec<u8>,
}

impl MultipartBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file part.
    pub fn file(mut self, name: &str, file_name: &str, content_type: &str, data: &[u8]) -> Self {
        self.boundary_line();
        self.body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n\
                 Content-Type: {}\r\n\r\n",
                name, file_name, content_type
            )
            .as_bytes(),
        );
        self.body.extend_from_slice(data);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    /// Add a plain text field.
    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.boundary_line();
        self.body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                name, value
            )
            .as_bytes(),
        );
        self
    }

    /// Finish the body and wrap it in an upload request.
    pub fn into_request(mut self, uri: &str) -> Request<Body> {
        self.body
            .extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
        raw_request(
            uri,
            Some(&format!("multipart/form-data; boundary={}", BOUNDARY)),
            self.body,
        )
    }

    fn boundary_line(&mut self) {
        self.body
            .extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    }
}

// =============================================================================
// Responses
// =============================================================================

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = body_bytes(response).await;
    serde_json::from_slice(&bytes).unwrap()
}

/// Check whether `id` is `<prefix>-<digits>-<digits>`.
pub fn matches_id_pattern(id: &str, prefix: &str) -> bool {
    horizons_backend::generation::ids::is_well_formed(id, prefix)
}
