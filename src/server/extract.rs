//! Permissive JSON body extraction.
//!
//! The generation and settings endpoints accept almost anything. Unlike
//! `axum::Json`, [`PermissiveJson`] does not reject a request for a missing
//! content type or an unexpected shape:
//!
//! | Request                              | Result                         |
//! |--------------------------------------|--------------------------------|
//! | content type is not JSON             | [`PermissiveBody::empty`]      |
//! | empty body                           | [`PermissiveBody::empty`]      |
//! | JSON object                          | deserialized `T`               |
//! | other JSON value (array, string, ..) | [`PermissiveBody::from_other`] |
//! | syntactically invalid JSON           | [`ApiError::MalformedBody`]    |

use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::{header, HeaderMap},
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::ApiError;
use crate::generation::{AvatarRequest, GenerationRequest};

/// A body type [`PermissiveJson`] can produce.
pub trait PermissiveBody: DeserializeOwned + Default {
    /// The body used when the request carried none.
    fn empty() -> Self {
        Self::default()
    }

    /// Build the body from a JSON value that is not an object.
    ///
    /// Structured request types ignore such values.
    fn from_other(_value: Value) -> Self {
        Self::default()
    }
}

impl PermissiveBody for GenerationRequest {}

impl PermissiveBody for AvatarRequest {}

/// Raw bodies keep whatever the client sent. A missing body reads as `{}`.
impl PermissiveBody for Value {
    fn empty() -> Self {
        Value::Object(Map::new())
    }

    fn from_other(value: Value) -> Self {
        value
    }
}

/// JSON extractor that defaults instead of rejecting.
#[derive(Debug, Clone, Default)]
pub struct PermissiveJson<T>(pub T);

impl<T: PermissiveBody> PermissiveJson<T> {
    /// Parse a body that was declared as JSON.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ApiError> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self(T::empty()));
        }

        let value: Value = serde_json::from_slice(bytes).map_err(|e| ApiError::MalformedBody {
            message: e.to_string(),
        })?;

        if !value.is_object() {
            return Ok(Self(T::from_other(value)));
        }

        serde_json::from_value(value)
            .map(Self)
            .map_err(|e| ApiError::MalformedBody {
                message: e.to_string(),
            })
    }
}

impl<T, S> FromRequest<S> for PermissiveJson<T>
where
    T: PermissiveBody + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !has_json_content_type(req.headers()) {
            debug!("Request body is not JSON, using defaults");
            return Ok(Self(T::empty()));
        }

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::MalformedBody {
                message: rejection.body_text(),
            })?;

        Self::from_bytes(&bytes)
    }
}

/// Whether the request declares `application/json` or a `+json` media type.
fn has_json_content_type(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
    else {
        return false;
    };

    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    essence == "application/json" || (essence.starts_with("application/") && essence.ends_with("+json"))
}
