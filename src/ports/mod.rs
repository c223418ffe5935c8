//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the gateway core and an
//! external system. Implementations live in `src/adapters/`.

pub mod image_backend;
pub mod video_backend;

pub use image_backend::{GeneratedImage, ImageBackend, ImageFuture, ImageJob};
pub use video_backend::{FrameSequence, VideoBackend, VideoFuture, VideoJob};
