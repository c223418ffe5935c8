//! Video backend port for image-to-video inference.

use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

use crate::error::GenError;
use crate::ports::image_backend::GeneratedImage;

/// A video animation job: a reference image to animate plus frame count
/// and frame rate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoJob {
    /// The reference image the video starts from.
    pub reference: GeneratedImage,
    /// Number of frames to generate.
    pub num_frames: u32,
    /// Target frames per second.
    pub fps: u32,
}

/// An ordered sequence of generated frames, each PNG-encoded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameSequence {
    /// Frame bytes in playback order.
    pub frames: Vec<Vec<u8>>,
}

/// Boxed future type returned by [`VideoBackend::animate`].
pub type VideoFuture<'a> =
    Pin<Box<dyn Future<Output = Result<FrameSequence, GenError>> + Send + 'a>>;

/// Animates a reference image into a frame sequence. Inference is a black
/// box behind this boundary; container assembly stays on the gateway side.
pub trait VideoBackend: Send + Sync {
    /// Generate the frame sequence for the given job.
    fn animate(&self, job: &VideoJob) -> VideoFuture<'_>;
}
