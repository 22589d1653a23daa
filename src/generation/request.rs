//! Request and result shapes for the generation endpoints.
//!
//! Requests are deliberately loose: every field is optional, scalars of any
//! JSON type are accepted as strings, and anything else is treated as absent.
//! Defaults are applied when the value is read, not when it is parsed.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Aspect ratio reported when the request does not specify one.
pub const DEFAULT_ASPECT_RATIO: &str = "16:9";

/// Quality mode reported when the request does not specify one.
pub const DEFAULT_QUALITY_MODE: &str = "Standard";

/// Value reported for `avatarUsed` when no avatar was selected.
pub const NO_AVATAR: &str = "none";

// =============================================================================
// Generation Kind
// =============================================================================

/// The kinds of content the service pretends to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GenerationKind {
    Image,
    ShortVideo,
    LongVideo,
}

impl GenerationKind {
    /// URL slug, also used as the result file stem.
    pub fn slug(&self) -> &'static str {
        match self {
            GenerationKind::Image => "image",
            GenerationKind::ShortVideo => "short-video",
            GenerationKind::LongVideo => "long-video",
        }
    }

    /// Human-readable name used in response messages.
    pub fn label(&self) -> &'static str {
        match self {
            GenerationKind::Image => "Image",
            GenerationKind::ShortVideo => "Short video",
            GenerationKind::LongVideo => "Long video",
        }
    }

    /// File extension of the fabricated result.
    pub fn extension(&self) -> &'static str {
        match self {
            GenerationKind::Image => "png",
            GenerationKind::ShortVideo | GenerationKind::LongVideo => "mp4",
        }
    }

    /// Name of the simulated model reported in result metadata.
    pub fn model(&self) -> &'static str {
        match self {
            GenerationKind::Image => "horizons-image-sim-1",
            GenerationKind::ShortVideo | GenerationKind::LongVideo => "horizons-video-sim-1",
        }
    }
}

impl std::fmt::Display for GenerationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.slug())
    }
}

// =============================================================================
// Requests
// =============================================================================

/// Body of the image and video generation endpoints.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    #[serde(default, deserialize_with = "lenient_string")]
    pub prompt: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub aspect_ratio: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub quality_mode: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub avatar_id: Option<String>,
}

impl GenerationRequest {
    /// Requested aspect ratio, or [`DEFAULT_ASPECT_RATIO`] if absent or empty.
    pub fn aspect_ratio(&self) -> &str {
        non_empty(&self.aspect_ratio).unwrap_or(DEFAULT_ASPECT_RATIO)
    }

    /// Requested quality mode, or [`DEFAULT_QUALITY_MODE`] if absent or empty.
    pub fn quality_mode(&self) -> &str {
        non_empty(&self.quality_mode).unwrap_or(DEFAULT_QUALITY_MODE)
    }

    /// Selected avatar, or [`NO_AVATAR`].
    pub fn avatar_used(&self) -> &str {
        non_empty(&self.avatar_id).unwrap_or(NO_AVATAR)
    }
}

/// Body of the avatar generation endpoint.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvatarRequest {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub file_name: Option<String>,
}

/// The settings keys the service knows about.
///
/// Only used to log what a client sent. The settings endpoint echoes the raw
/// body, so unknown keys and odd types pass through untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingsSummary {
    pub aspect_ratio: Option<Value>,
    pub quality_mode: Option<Value>,
    pub auto_sound: Option<Value>,
    pub auto_speech: Option<Value>,
}

impl SettingsSummary {
    /// Pick the known keys out of an arbitrary settings body.
    pub fn from_value(settings: &Value) -> Self {
        let field = |key: &str| settings.get(key).cloned();
        Self {
            aspect_ratio: field("aspectRatio"),
            quality_mode: field("qualityMode"),
            auto_sound: field("autoSound"),
            auto_speech: field("autoSpeech"),
        }
    }
}

// =============================================================================
// Results
// =============================================================================

/// Metadata attached to every generation result.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationMetadata {
    pub aspect_ratio: String,
    pub quality_mode: String,
    pub prompt: Option<String>,
    pub model: String,
    pub avatar_used: String,
}

/// A finished (simulated) generation.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationOutput {
    pub kind: GenerationKind,
    pub result_url: String,
    pub metadata: GenerationMetadata,
}

/// A submitted long-running job. Its outcome is never exposed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsyncJob {
    pub job_id: String,
}

/// A generated avatar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Avatar {
    pub avatar_id: String,
    pub avatar_url: String,
}

/// Description of an uploaded file. The payload itself is not kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFile {
    pub name: String,
    pub size: u64,
    pub mime_type: String,
    pub resource_id: String,
}

// =============================================================================
// Helpers
// =============================================================================

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// Accept any JSON scalar as a string; arrays, objects and null become `None`.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}
