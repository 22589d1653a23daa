use http::StatusCode;
use thiserror::Error;

/// Errors surfaced by the API.
///
/// Generation and settings endpoints never reject a request for its content;
/// missing fields are defaulted instead. The only content-level failure is an
/// upload without a file.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// Upload request carried no file part (or an empty one)
    #[error("No file was uploaded.")]
    MissingUploadFile,

    /// Multipart stream could not be read to the end
    #[error("Invalid multipart data: {message}")]
    InvalidMultipart { status: StatusCode, message: String },

    /// JSON body is syntactically invalid
    #[error("Malformed request body: {message}")]
    MalformedBody { message: String },

    /// A handler panicked; the panic was caught at the service boundary
    #[error("Internal server error: {0}")]
    Panic(String),
}

impl ApiError {
    /// HTTP status this error maps to.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingUploadFile => StatusCode::BAD_REQUEST,
            ApiError::InvalidMultipart { status, .. } => *status,
            ApiError::MalformedBody { .. } => StatusCode::BAD_REQUEST,
            ApiError::Panic(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable machine-readable identifier for the error kind.
    pub fn error_type(&self) -> &'static str {
        match self {
            ApiError::MissingUploadFile => "missing_upload_file",
            ApiError::InvalidMultipart { .. } => "invalid_multipart",
            ApiError::MalformedBody { .. } => "malformed_body",
            ApiError::Panic(_) => "internal_error",
        }
    }
}
