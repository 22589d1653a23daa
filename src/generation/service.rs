//! Generation service.
//!
//! The service owns everything the handlers need to fabricate a response:
//! the delay profile, the CDN locations results are "published" to, and the
//! identifier generator. It holds no per-request state, so concurrent
//! requests never observe each other.
//!
//! # Delays
//!
//! Every delay is a cooperative `tokio::time::sleep`. A delayed request only
//! suspends its own future; the runtime keeps serving other requests.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use super::ids::IdGenerator;
use super::request::{
    AsyncJob, Avatar, AvatarRequest, GenerationKind, GenerationMetadata, GenerationOutput,
    GenerationRequest, UploadedFile,
};

/// Default delay before an image or short video is returned (5 seconds).
pub const DEFAULT_GENERATION_DELAY: Duration = Duration::from_secs(5);

/// Default delay before an avatar is returned (3 seconds).
pub const DEFAULT_AVATAR_DELAY: Duration = Duration::from_secs(3);

/// Default time a long-video job spends "processing" in the background (20 seconds).
pub const DEFAULT_LONG_VIDEO_DELAY: Duration = Duration::from_secs(20);

/// Default base URL for generated images and videos.
pub const DEFAULT_CDN_BASE_URL: &str = "https://generated-content-cdn.com";

/// Default base URL for generated avatars.
pub const DEFAULT_AVATAR_CDN_BASE_URL: &str = "https://avatar-cdn.com";

/// MIME type reported for uploads that did not declare one.
pub const DEFAULT_UPLOAD_MIME_TYPE: &str = "application/octet-stream";

// =============================================================================
// Delay Profile
// =============================================================================

/// Artificial latencies applied by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelayProfile {
    /// Delay for image and short-video generation
    pub generation: Duration,

    /// Delay for avatar generation
    pub avatar: Duration,

    /// Background processing time of a long-video job
    pub long_video: Duration,
}

impl DelayProfile {
    /// A profile with every delay set to zero.
    pub fn none() -> Self {
        Self {
            generation: Duration::ZERO,
            avatar: Duration::ZERO,
            long_video: Duration::ZERO,
        }
    }
}

impl Default for DelayProfile {
    fn default() -> Self {
        Self {
            generation: DEFAULT_GENERATION_DELAY,
            avatar: DEFAULT_AVATAR_DELAY,
            long_video: DEFAULT_LONG_VIDEO_DELAY,
        }
    }
}

// =============================================================================
// Generation Service
// =============================================================================

/// Fabricates generation results, avatars, jobs and upload descriptions.
#[derive(Debug, Clone)]
pub struct GenerationService {
    delays: DelayProfile,
    cdn_base_url: String,
    avatar_cdn_base_url: String,
    ids: IdGenerator,
}

impl GenerationService {
    /// Create a service with the given delays and the default CDN locations.
    pub fn new(delays: DelayProfile) -> Self {
        Self {
            delays,
            cdn_base_url: DEFAULT_CDN_BASE_URL.to_string(),
            avatar_cdn_base_url: DEFAULT_AVATAR_CDN_BASE_URL.to_string(),
            ids: IdGenerator::new(),
        }
    }

    /// Set the base URL for image and video locators.
    pub fn with_cdn_base_url(mut self, url: impl Into<String>) -> Self {
        self.cdn_base_url = trim_base(url.into());
        self
    }

    /// Set the base URL for avatar locators.
    pub fn with_avatar_cdn_base_url(mut self, url: impl Into<String>) -> Self {
        self.avatar_cdn_base_url = trim_base(url.into());
        self
    }

    pub fn delays(&self) -> DelayProfile {
        self.delays
    }

    /// Simulate a synchronous generation: wait the generation delay, then
    /// return a freshly minted result locator.
    pub async fn generate(
        &self,
        kind: GenerationKind,
        request: &GenerationRequest,
    ) -> GenerationOutput {
        info!(
            kind = %kind,
            prompt = request.prompt.as_deref().unwrap_or_default(),
            "Simulating generation"
        );

        simulate_latency(self.delays.generation).await;

        let result_url = format!(
            "{}/{}.{}",
            self.cdn_base_url,
            self.ids.next_id(kind.slug()),
            kind.extension()
        );

        debug!(kind = %kind, result_url = %result_url, "Generation finished");

        GenerationOutput {
            kind,
            result_url,
            metadata: GenerationMetadata {
                aspect_ratio: request.aspect_ratio().to_string(),
                quality_mode: request.quality_mode().to_string(),
                prompt: request.prompt.clone(),
                model: kind.model().to_string(),
                avatar_used: request.avatar_used().to_string(),
            },
        }
    }

    /// Submit a long-video job.
    ///
    /// Returns immediately. The job runs as a detached task that waits the
    /// long-video delay and then logs its result locator; nothing else can
    /// observe it. The join handle is returned for callers that want to wait
    /// on it (tests); dropping it does not cancel the task.
    pub fn submit_long_video(&self, request: &GenerationRequest) -> (AsyncJob, JoinHandle<()>) {
        let job_id = self.ids.job_id();
        let delay = self.delays.long_video;
        let result_url = format!(
            "{}/{}.{}",
            self.cdn_base_url,
            job_id,
            GenerationKind::LongVideo.extension()
        );

        info!(
            job_id = %job_id,
            prompt = request.prompt.as_deref().unwrap_or_default(),
            "Starting asynchronous long video job"
        );

        let task_job_id = job_id.clone();
        let handle = tokio::spawn(async move {
            simulate_latency(delay).await;
            info!(
                job_id = %task_job_id,
                result_url = %result_url,
                "Long video job completed"
            );
        });

        (AsyncJob { job_id }, handle)
    }

    /// Simulate avatar generation: wait the avatar delay, then mint an avatar.
    pub async fn create_avatar(&self, request: &AvatarRequest) -> Avatar {
        debug!(
            name = request.name.as_deref().unwrap_or_default(),
            file_name = request.file_name.as_deref().unwrap_or_default(),
            "Simulating avatar generation"
        );

        simulate_latency(self.delays.avatar).await;

        let avatar_id = self.ids.avatar_id();
        let avatar_url = format!("{}/{}.png", self.avatar_cdn_base_url, avatar_id);

        Avatar {
            avatar_id,
            avatar_url,
        }
    }

    /// Describe an uploaded file and assign it a resource id.
    pub fn register_upload(
        &self,
        name: impl Into<String>,
        size: u64,
        mime_type: Option<&str>,
    ) -> UploadedFile {
        let file = UploadedFile {
            name: name.into(),
            size,
            mime_type: mime_type
                .filter(|m| !m.is_empty())
                .unwrap_or(DEFAULT_UPLOAD_MIME_TYPE)
                .to_string(),
            resource_id: self.ids.resource_id(),
        };

        info!(file_name = %file.name, size = file.size, "File received");
        file
    }
}

impl Default for GenerationService {
    fn default() -> Self {
        Self::new(DelayProfile::default())
    }
}

/// Wait `delay` without blocking the runtime. Zero delays return at once.
pub async fn simulate_latency(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

fn trim_base(url: String) -> String {
    url.trim_end_matches('/').to_string()
}
