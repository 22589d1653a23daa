//! Router configuration for the Horizons backend.
//!
//! This module defines the HTTP routes and applies middleware for CORS,
//! request tracing, body limits and panic recovery.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                           - Availability message
//! GET  /health                     - Health check
//! POST /api/upload                 - File upload (multipart)
//! POST /api/generate/image         - Image generation (delayed)
//! POST /api/generate/short-video   - Short video generation (delayed)
//! POST /api/generate/long-video    - Long video job (202, immediate)
//! POST /api/generate/avatar        - Avatar generation (delayed)
//! POST /api/settings/update        - Settings echo
//! ```
//!
//! # Example
//!
//! ```ignore
//! use horizons_backend::generation::{DelayProfile, GenerationService};
//! use horizons_backend::server::routes::{create_router, RouterConfig};
//!
//! let service = GenerationService::new(DelayProfile::default());
//! let router = create_router(service, RouterConfig::new());
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
//! axum::serve(listener, router).await?;
//! ```

use std::any::Any;
use std::time::Duration;

use axum::{
    body::Body,
    extract::DefaultBodyLimit,
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use http::header::CONTENT_TYPE;
use http::Method;
use tower_http::catch_panic::{CatchPanicLayer, ResponseForPanic};
use tower_http::cors::{Any as AnyOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers::{
    avatar_handler, health_handler, image_handler, long_video_handler, not_found_handler,
    root_handler, settings_handler, short_video_handler, upload_handler, AppState,
};
use crate::config::DEFAULT_MAX_UPLOAD_BYTES;
use crate::error::ApiError;
use crate::generation::GenerationService;

// =============================================================================
// Router Configuration
// =============================================================================

/// Configuration for the HTTP router.
#[derive(Debug, Clone)]
pub struct RouterConfig {
    /// Allowed CORS origins (None = allow any origin)
    pub cors_origins: Option<Vec<String>>,

    /// Whether to enable request tracing
    pub enable_tracing: bool,

    /// Maximum request body size in bytes
    pub max_upload_bytes: usize,
}

impl RouterConfig {
    /// Create a router configuration with defaults.
    ///
    /// By default:
    /// - CORS allows any origin
    /// - Tracing is enabled
    /// - Bodies up to 100MB are accepted
    pub fn new() -> Self {
        Self {
            cors_origins: None,
            enable_tracing: true,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }

    /// Set specific allowed CORS origins.
    ///
    /// Pass an empty vec to disallow all cross-origin requests.
    pub fn with_cors_origins(mut self, origins: Vec<String>) -> Self {
        self.cors_origins = Some(origins);
        self
    }

    /// Allow any CORS origin.
    pub fn with_cors_any_origin(mut self) -> Self {
        self.cors_origins = None;
        self
    }

    /// Enable or disable request tracing.
    pub fn with_tracing(mut self, enabled: bool) -> Self {
        self.enable_tracing = enabled;
        self
    }

    /// Set the maximum request body size in bytes.
    pub fn with_max_upload_bytes(mut self, bytes: usize) -> Self {
        self.max_upload_bytes = bytes;
        self
    }
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Router Builder
// =============================================================================

/// Create the main application router.
///
/// Layers, outermost first: tracing (optional), CORS, panic recovery, body
/// limit. Unknown routes get a JSON 404.
pub fn create_router(service: GenerationService, config: RouterConfig) -> Router {
    let app_state = AppState::new(service);
    let cors = build_cors_layer(&config);

    let router = Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/api/upload", post(upload_handler))
        .route("/api/generate/image", post(image_handler))
        .route("/api/generate/short-video", post(short_video_handler))
        .route("/api/generate/long-video", post(long_video_handler))
        .route("/api/generate/avatar", post(avatar_handler))
        .route("/api/settings/update", post(settings_handler))
        .fallback(not_found_handler)
        .with_state(app_state)
        .layer(DefaultBodyLimit::max(config.max_upload_bytes))
        .layer(CatchPanicLayer::custom(PanicResponder))
        .layer(cors);

    if config.enable_tracing {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    }
}

/// Build the CORS layer based on configuration.
fn build_cors_layer(config: &RouterConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(86400)); // 24 hours

    match &config.cors_origins {
        None => cors.allow_origin(AnyOrigin),
        Some(origins) if origins.is_empty() => cors,
        Some(origins) => {
            let parsed_origins: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();
            cors.allow_origin(parsed_origins)
        }
    }
}

// =============================================================================
// Panic Recovery
// =============================================================================

/// Turns a handler panic into an [`ApiError::Panic`] response.
#[derive(Debug, Clone, Copy)]
pub struct PanicResponder;

impl ResponseForPanic for PanicResponder {
    type ResponseBody = Body;

    fn response_for_panic(
        &mut self,
        err: Box<dyn Any + Send + 'static>,
    ) -> http::Response<Self::ResponseBody> {
        let details = if let Some(s) = err.downcast_ref::<String>() {
            s.clone()
        } else if let Some(s) = err.downcast_ref::<&str>() {
            s.to_string()
        } else {
            "handler panicked with a non-string payload".to_string()
        };

        ApiError::Panic(details).into_response()
    }
}

// =============================================================================
// Tests
// =============================================================================
