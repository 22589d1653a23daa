//! HTTP server layer for the Horizons backend.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                         HTTP Layer                              │
//! │        POST /api/generate/{image,short-video,long-video}        │
//! │                                                                 │
//! │  ┌─────────────┐  ┌──────────────────┐  ┌────────────────────┐  │
//! │  │  handlers   │  │     extract      │  │       routes       │  │
//! │  │ (requests)  │  │ (permissive JSON)│  │ (router, layers)   │  │
//! │  └─────────────┘  └──────────────────┘  └────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//!                    ┌──────────▼──────────┐
//!                    │  GenerationService  │
//!                    └─────────────────────┘
//! ```

pub mod extract;
pub mod handlers;
pub mod routes;

pub use extract::{PermissiveBody, PermissiveJson};
pub use handlers::{
    avatar_handler, health_handler, image_handler, long_video_handler, not_found_handler,
    root_handler, settings_handler, short_video_handler, upload_handler, AppState,
    AvatarResponse, ErrorResponse, GenerationResponse, HealthResponse, JobAcceptedResponse,
    SettingsResponse, UploadResponse, ROOT_MESSAGE, UPLOAD_FIELD,
};
pub use routes::{create_router, PanicResponder, RouterConfig};
