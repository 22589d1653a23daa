//! Identifier generation for uploads, jobs and avatars.
//!
//! Identifiers have the shape `<prefix>-<unix millis>-<seq>`. The timestamp
//! keeps them readable; the sequence number comes from a shared atomic
//! counter and is what makes them unique within the process, even when two
//! requests land in the same millisecond.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

/// Prefix for uploaded file resource identifiers.
pub const RESOURCE_ID_PREFIX: &str = "uploaded-file";

/// Prefix for long-video job identifiers.
pub const JOB_ID_PREFIX: &str = "job-video-long";

/// Prefix for avatar identifiers.
pub const AVATAR_ID_PREFIX: &str = "avatar";

/// Generator for process-unique identifiers.
///
/// Cloning is cheap and clones share the same counter.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    sequence: Arc<AtomicU64>,
}

impl IdGenerator {
    /// Create a generator whose sequence starts at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Produce the next identifier with the given prefix.
    pub fn next_id(&self, prefix: &str) -> String {
        let seq = self.sequence.fetch_add(1, Ordering::Relaxed);
        format!("{}-{}-{}", prefix, unix_millis(), seq)
    }

    pub fn resource_id(&self) -> String {
        self.next_id(RESOURCE_ID_PREFIX)
    }

    pub fn job_id(&self) -> String {
        self.next_id(JOB_ID_PREFIX)
    }

    pub fn avatar_id(&self) -> String {
        self.next_id(AVATAR_ID_PREFIX)
    }
}

/// Milliseconds since the Unix epoch, or 0 if the clock is before it.
pub fn unix_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0)
}

/// Check whether `id` has the `<prefix>-<millis>-<seq>` shape.
pub fn is_well_formed(id: &str, prefix: &str) -> bool {
    let Some(rest) = id
        .strip_prefix(prefix)
        .and_then(|rest| rest.strip_prefix('-'))
    else {
        return false;
    };

    let mut parts = rest.split('-');
    let millis = parts.next();
    let seq = parts.next();
    let is_number = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());

    matches!((millis, seq, parts.next()), (Some(m), Some(s), None) if is_number(m) && is_number(s))
}
