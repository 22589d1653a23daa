//! # Horizons Backend
//!
//! A mock backend for an AI content-generation API.
//!
//! The service answers the requests a generation frontend makes (image,
//! short video, long video and avatar generation, file upload, settings
//! update) with fabricated but well-formed responses. Synchronous endpoints
//! hold their response for a configurable artificial delay; the long-video
//! endpoint returns a job id at once and finishes its job in a detached
//! background task whose outcome is only logged.
//!
//! ## Features
//!
//! - **Injectable latency**: every delay comes from a [`DelayProfile`], so tests run with zero or paused time
//! - **Permissive input**: missing, empty or oddly typed fields fall back to documented defaults
//! - **Stateless**: no request can observe another; settings updates are pure echoes
//! - **Process-unique identifiers**: resource, job and avatar ids never collide within a process
//!
//! ## Architecture
//!
//! - [`generation`] - Request/result types, identifiers and the [`GenerationService`]
//! - [`server`] - Axum-based HTTP handlers and routes
//! - [`config`] - CLI and configuration types
//! - [`error`] - API error taxonomy
//!
//! ## Example
//!
//! ```rust,no_run
//! use horizons_backend::{create_router, DelayProfile, GenerationService, RouterConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let service = GenerationService::new(DelayProfile::default());
//!     let router = create_router(service, RouterConfig::new());
//!
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await.unwrap();
//!     axum::serve(listener, router).await.unwrap();
//! }
//! ```

pub mod config;
pub mod error;
pub mod generation;
pub mod server;

// Re-export commonly used types
pub use config::Config;
pub use error::ApiError;
pub use generation::{
    AsyncJob, Avatar, AvatarRequest, DelayProfile, GenerationKind, GenerationMetadata,
    GenerationOutput, GenerationRequest, GenerationService, IdGenerator, UploadedFile,
};
pub use server::{create_router, AppState, ErrorResponse, PermissiveJson, RouterConfig};
