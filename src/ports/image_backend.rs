//! Image backend port for text-to-image inference.

use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

use crate::error::GenError;

/// A single unit of image work: one (possibly rewritten) prompt plus
/// the requested output dimensions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageJob {
    /// The prompt actually dispatched to the backend.
    pub prompt: String,
    /// Requested image width in pixels.
    pub width: u32,
    /// Requested image height in pixels.
    pub height: u32,
}

/// A single generated image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedImage {
    /// Raw encoded image bytes.
    pub data: Vec<u8>,
    /// MIME type of the image (e.g., `"image/png"`).
    pub mime_type: String,
}

/// Boxed future type returned by [`ImageBackend::generate`].
pub type ImageFuture<'a> =
    Pin<Box<dyn Future<Output = Result<GeneratedImage, GenError>> + Send + 'a>>;

/// Generates an image from a text prompt. The actual inference is a black
/// box: a remote diffusion server, or a synthetic mock in tests.
pub trait ImageBackend: Send + Sync {
    /// Generate one image for the given job.
    fn generate(&self, job: &ImageJob) -> ImageFuture<'_>;
}
