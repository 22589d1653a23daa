//! Simulated content generation.
//!
//! Nothing here generates anything. The module fabricates the responses a
//! real generation backend would produce: result locators, job and avatar
//! identifiers, upload descriptions. It applies configurable artificial
//! latency along the way.
//!
//! - [`request`] - Loose request shapes and result types
//! - [`ids`] - Process-unique identifier generation
//! - [`service`] - [`GenerationService`] and its [`DelayProfile`]

pub mod ids;
pub mod request;
pub mod service;

pub use ids::{IdGenerator, AVATAR_ID_PREFIX, JOB_ID_PREFIX, RESOURCE_ID_PREFIX};
pub use request::{
    AsyncJob, Avatar, AvatarRequest, GenerationKind, GenerationMetadata, GenerationOutput,
    GenerationRequest, SettingsSummary, UploadedFile, DEFAULT_ASPECT_RATIO, DEFAULT_QUALITY_MODE,
    NO_AVATAR,
};
pub use service::{
    simulate_latency, DelayProfile, GenerationService, DEFAULT_AVATAR_CDN_BASE_URL,
    DEFAULT_AVATAR_DELAY, DEFAULT_CDN_BASE_URL, DEFAULT_GENERATION_DELAY,
    DEFAULT_LONG_VIDEO_DELAY, DEFAULT_UPLOAD_MIME_TYPE,
};
