//! HTTP request handlers for the Horizons backend API.
//!
//! # Endpoints
//!
//! - `GET /` - Plain-text availability message
//! - `GET /health` - JSON health check
//! - `POST /api/upload` - In-memory file upload
//! - `POST /api/generate/image` - Delayed image generation
//! - `POST /api/generate/short-video` - Delayed short-video generation
//! - `POST /api/generate/long-video` - Asynchronous long-video job (202)
//! - `POST /api/generate/avatar` - Delayed avatar generation
//! - `POST /api/settings/update` - Settings echo

use std::sync::Arc;

use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        Multipart, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::error::ApiError;
use crate::generation::{
    AvatarRequest, GenerationKind, GenerationMetadata, GenerationRequest, GenerationService,
    SettingsSummary, UploadedFile,
};

use super::extract::PermissiveJson;

/// Multipart field name carrying the uploaded file.
pub const UPLOAD_FIELD: &str = "file";

/// Body of `GET /`.
pub const ROOT_MESSAGE: &str =
    "Horizons backend server is running. Ready to accept API requests!";

// =============================================================================
// Application State
// =============================================================================

/// Shared application state containing the generation service.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<GenerationService>,
}

impl AppState {
    pub fn new(service: GenerationService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

// =============================================================================
// Response Types
// =============================================================================

/// JSON error body returned for all error conditions.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Always `false`
    pub success: bool,

    /// Human-readable error message
    pub message: String,

    /// Error type identifier (e.g., "missing_upload_file")
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            error: error.into(),
        }
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub success: bool,
    pub message: String,
    pub file_info: UploadedFile,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResponse {
    pub success: bool,
    pub message: String,
    pub result_url: String,
    pub metadata: GenerationMetadata,
}

/// Response of the long-video endpoint. Only the job id is ever reported.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobAcceptedResponse {
    pub success: bool,
    pub message: String,
    pub job_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvatarResponse {
    pub success: bool,
    pub message: String,
    pub avatar_id: String,
    pub avatar_url: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsResponse {
    pub success: bool,
    pub message: String,
    pub current_settings: Value,
}

// =============================================================================
// Error Mapping
// =============================================================================

/// Convert ApiError to an HTTP response.
///
/// 4xx errors are logged at WARN level, 5xx at ERROR level.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error_type = self.error_type();
        let message = self.to_string();

        if status.is_server_error() {
            error!(
                error_type = error_type,
                status = status.as_u16(),
                "Server error: {}",
                message
            );
        } else {
            warn!(
                error_type = error_type,
                status = status.as_u16(),
                "Client error: {}",
                message
            );
        }

        (status, Json(ErrorResponse::new(error_type, message))).into_response()
    }
}

fn multipart_error(err: MultipartError) -> ApiError {
    ApiError::InvalidMultipart {
        status: err.status(),
        message: err.body_text(),
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Handle `GET /`.
pub async fn root_handler() -> &'static str {
    ROOT_MESSAGE
}

/// Handle `GET /health`.
///
/// ```json
/// { "status": "healthy", "version": "0.1.0" }
/// ```
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Handle file uploads.
///
/// # Endpoint
///
/// `POST /api/upload` with a `multipart/form-data` body
///
/// Only the first part named `file` that carries a filename and a non-empty
/// payload counts as the upload. Other parts are skipped. The payload is
/// measured and dropped; nothing is written to disk.
///
/// # Response
///
/// - `200 OK`: `{success, message, fileInfo: {name, size, mimeType, resourceId}}`
/// - `400 Bad Request`: no file part, or the body is not multipart
/// - `413 Payload Too Large`: body exceeds the configured upload limit
pub async fn upload_handler(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, ApiError> {
    let mut multipart = multipart.map_err(|rejection| {
        debug!("Upload request is not multipart: {}", rejection.body_text());
        ApiError::MissingUploadFile
    })?;

    let mut uploaded = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if uploaded.is_some() || field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        // Parts without a filename are plain form fields, not files
        let Some(file_name) = field.file_name().map(str::to_string) else {
            continue;
        };
        let mime_type = field.content_type().map(str::to_string);

        let data = field.bytes().await.map_err(multipart_error)?;
        if data.is_empty() {
            debug!(file_name = %file_name, "Ignoring empty file part");
            continue;
        }

        uploaded = Some(
            state
                .service
                .register_upload(file_name, data.len() as u64, mime_type.as_deref()),
        );
    }

    let file_info = uploaded.ok_or(ApiError::MissingUploadFile)?;

    Ok(Json(UploadResponse {
        success: true,
        message: "File upload processed successfully!".to_string(),
        file_info,
    }))
}

async fn generate(
    state: &AppState,
    kind: GenerationKind,
    request: &GenerationRequest,
) -> Json<GenerationResponse> {
    let output = state.service.generate(kind, request).await;

    Json(GenerationResponse {
        success: true,
        message: format!("{} generated successfully!", kind.label()),
        result_url: output.result_url,
        metadata: output.metadata,
    })
}

/// Handle `POST /api/generate/image`. Responds after the generation delay.
pub async fn image_handler(
    State(state): State<AppState>,
    PermissiveJson(request): PermissiveJson<GenerationRequest>,
) -> Json<GenerationResponse> {
    generate(&state, GenerationKind::Image, &request).await
}

/// Handle `POST /api/generate/short-video`. Responds after the generation delay.
pub async fn short_video_handler(
    State(state): State<AppState>,
    PermissiveJson(request): PermissiveJson<GenerationRequest>,
) -> Json<GenerationResponse> {
    generate(&state, GenerationKind::ShortVideo, &request).await
}

/// Handle long-video generation.
///
/// # Endpoint
///
/// `POST /api/generate/long-video`
///
/// # Response
///
/// `202 Accepted` immediately, with `{success, message, jobId}`. The job
/// finishes in the background and its outcome is only logged.
pub async fn long_video_handler(
    State(state): State<AppState>,
    PermissiveJson(request): PermissiveJson<GenerationRequest>,
) -> (StatusCode, Json<JobAcceptedResponse>) {
    // Detached: dropping the handle leaves the job running
    let (job, _handle) = state.service.submit_long_video(&request);

    (
        StatusCode::ACCEPTED,
        Json(JobAcceptedResponse {
            success: true,
            message: "Long video generation started. The job runs in the background.".to_string(),
            job_id: job.job_id,
        }),
    )
}

/// Handle `POST /api/generate/avatar`. Responds after the avatar delay.
pub async fn avatar_handler(
    State(state): State<AppState>,
    PermissiveJson(request): PermissiveJson<AvatarRequest>,
) -> Json<AvatarResponse> {
    let avatar = state.service.create_avatar(&request).await;

    Json(AvatarResponse {
        success: true,
        message: "Avatar generated successfully!".to_string(),
        avatar_id: avatar.avatar_id,
        avatar_url: avatar.avatar_url,
    })
}

/// Handle settings updates.
///
/// # Endpoint
///
/// `POST /api/settings/update`
///
/// Nothing is stored. The body is echoed back under `currentSettings`
/// exactly as received, so concurrent clients never see each other's values.
pub async fn settings_handler(
    PermissiveJson(settings): PermissiveJson<Value>,
) -> Json<SettingsResponse> {
    let summary = SettingsSummary::from_value(&settings);
    info!(
        aspect_ratio = ?summary.aspect_ratio,
        quality_mode = ?summary.quality_mode,
        auto_sound = ?summary.auto_sound,
        auto_speech = ?summary.auto_speech,
        "Received settings update"
    );

    Json(SettingsResponse {
        success: true,
        message: "Settings updated successfully.".to_string(),
        current_settings: settings,
    })
}

/// Fallback for unknown routes.
pub async fn not_found_handler() -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse::new("not_found", "Route not found.")),
    )
}

// =============================================================================
// Tests
// =============================================================================
