//! Generation gateway: validation, style rewrite, and backend orchestration.
//!
//! The gateway owns no model state. Backends are injected once at startup
//! and every call is scoped to a single request: validate, rewrite, dispatch
//! under a timeout, encode, persist, respond.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::adapters::live::{DiffusionImageBackend, DiffusionVideoBackend};
use crate::adapters::mock::{MockImageBackend, MockVideoBackend};
use crate::config::{BackendMode, Config};
use crate::encode;
use crate::error::GenError;
use crate::ports::{GeneratedImage, ImageBackend, ImageJob, VideoBackend, VideoJob};
use crate::storage::{ArtifactKind, ArtifactStore};
use crate::style::StyleTemplate;

fn default_dimension() -> u32 {
    512
}

fn default_frames() -> u32 {
    24
}

fn default_fps() -> u32 {
    24
}

/// A request to generate one image per prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageBatchRequest {
    /// Prompts to generate, in order. Must be non-empty.
    pub prompts: Vec<String>,
    /// Image width in pixels.
    #[serde(default = "default_dimension")]
    pub width: u32,
    /// Image height in pixels.
    #[serde(default = "default_dimension")]
    pub height: u32,
    /// Whether to expand each prompt through the style template.
    #[serde(default)]
    pub styled: bool,
}

/// A request to generate a single video from one prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoRequest {
    /// The single prompt to generate from.
    pub prompt: String,
    /// Frame width in pixels.
    #[serde(default = "default_dimension")]
    pub width: u32,
    /// Frame height in pixels.
    #[serde(default = "default_dimension")]
    pub height: u32,
    /// Number of frames to generate.
    #[serde(default = "default_frames")]
    pub num_frames: u32,
    /// Playback frame rate.
    #[serde(default = "default_fps")]
    pub fps: u32,
    /// Whether to expand the prompt through the style template.
    #[serde(default)]
    pub styled: bool,
}

/// Outcome of one unit of image work. Exactly one variant is present,
/// so a result can never carry both a payload and an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ImageOutcome {
    /// The backend produced an image.
    Ok {
        /// Base64-encoded image bytes.
        image_base64: String,
        /// Storage locator, when persistence is enabled.
        #[serde(skip_serializing_if = "Option::is_none")]
        file_path: Option<String>,
    },
    /// This unit of work failed; siblings in the batch are unaffected.
    Err {
        /// Human-readable cause.
        error: String,
    },
}

/// Per-prompt result within an image batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageResult {
    /// The prompt actually dispatched (post style rewrite).
    pub prompt: String,
    /// Success payload or error message.
    #[serde(flatten)]
    pub outcome: ImageOutcome,
}

impl ImageResult {
    /// Whether this unit of work succeeded.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        matches!(self.outcome, ImageOutcome::Ok { .. })
    }
}

/// Result of a successful video call. Failures surface as `GenError`;
/// there is no partial video.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoResult {
    /// The prompt actually dispatched (post style rewrite).
    pub prompt: String,
    /// Base64-encoded video container.
    pub video_base64: String,
    /// Storage locator, when persistence is enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_path: Option<String>,
}

/// Fixed liveness payload. Carries no backend state.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Health {
    /// Always `"healthy"`.
    pub status: &'static str,
}

/// The generation gateway. Construct once at startup and share behind an
/// `Arc` across transports.
pub struct Gateway {
    image: Box<dyn ImageBackend>,
    video: Box<dyn VideoBackend>,
    store: Option<ArtifactStore>,
    style: StyleTemplate,
    call_timeout: Duration,
}

impl Gateway {
    /// Create a gateway from explicit collaborators.
    #[must_use]
    pub fn new(
        image: Box<dyn ImageBackend>,
        video: Box<dyn VideoBackend>,
        store: Option<ArtifactStore>,
        style: StyleTemplate,
        call_timeout: Duration,
    ) -> Self {
        Self { image, video, store, style, call_timeout }
    }

    /// Build a gateway from configuration, selecting mock or remote backends.
    ///
    /// # Errors
    ///
    /// Returns an error if the style template is invalid or remote mode is
    /// configured without a base URL.
    pub fn from_config(config: &Config) -> Result<Self, GenError> {
        let style = StyleTemplate::new(config.style.template.clone())?;
        let store = config
            .storage
            .enabled
            .then(|| ArtifactStore::new(config.storage.output_dir.clone()));
        let call_timeout = Duration::from_secs(config.backend.timeout_secs);

        let (image, video): (Box<dyn ImageBackend>, Box<dyn VideoBackend>) =
            match config.backend.mode {
                BackendMode::Mock => (Box::new(MockImageBackend), Box::new(MockVideoBackend)),
                BackendMode::Remote => {
                    let base_url = config.backend_base_url().ok_or_else(|| {
                        GenError::Config(
                            "backend.mode = \"remote\" requires backend.base_url \
                             or MEDIAGEN_BACKEND_URL"
                                .to_string(),
                        )
                    })?;
                    (
                        Box::new(DiffusionImageBackend::new(base_url.clone())),
                        Box::new(DiffusionVideoBackend::new(base_url)),
                    )
                }
            };

        Ok(Self::new(image, video, store, style, call_timeout))
    }

    /// Generate one image per prompt, in input order.
    ///
    /// A failing prompt yields an error entry for that prompt only; the
    /// returned sequence always has exactly one entry per input prompt.
    ///
    /// # Errors
    ///
    /// Returns an error only when the request fails validation; the backend
    /// is never consulted in that case.
    pub async fn submit_image_batch(
        &self,
        request: &ImageBatchRequest,
    ) -> Result<Vec<ImageResult>, GenError> {
        validate_image_batch(request)?;

        tracing::info!(prompts = request.prompts.len(), styled = request.styled, "image batch");

        let mut results = Vec::with_capacity(request.prompts.len());
        for prompt in &request.prompts {
            let prompt = self.style.rewrite(prompt, request.styled);
            let outcome = match self
                .generate_image_unit(&prompt, request.width, request.height)
                .await
            {
                Ok(outcome) => outcome,
                Err(e) => {
                    tracing::warn!(%prompt, error = %e, "image unit failed");
                    ImageOutcome::Err { error: e.to_string() }
                }
            };
            results.push(ImageResult { prompt, outcome });
        }

        Ok(results)
    }

    /// Generate a single video: reference image first, then animation.
    ///
    /// # Errors
    ///
    /// Returns a validation error before any backend call for out-of-range
    /// fields, and a backend/encoding error if any pipeline stage fails.
    /// A reference-image failure short-circuits the video backend.
    pub async fn submit_video(&self, request: &VideoRequest) -> Result<VideoResult, GenError> {
        validate_video(request)?;

        let prompt = self.style.rewrite(&request.prompt, request.styled);
        tracing::info!(%prompt, frames = request.num_frames, fps = request.fps, "video request");

        let reference = self
            .call_image(&ImageJob {
                prompt: prompt.clone(),
                width: request.width,
                height: request.height,
            })
            .await?;

        let sequence = self
            .call_video(&VideoJob {
                reference,
                num_frames: request.num_frames,
                fps: request.fps,
            })
            .await?;

        let container = encode::assemble_animation(&sequence.frames, request.fps)?;
        let video_path = self.persist(ArtifactKind::Video, &prompt, "gif", &container)?;

        Ok(VideoResult { prompt, video_base64: encode::to_base64(&container), video_path })
    }

    /// Liveness check. Never consults a backend.
    #[must_use]
    pub fn health(&self) -> Health {
        Health { status: "healthy" }
    }

    async fn generate_image_unit(
        &self,
        prompt: &str,
        width: u32,
        height: u32,
    ) -> Result<ImageOutcome, GenError> {
        let job = ImageJob { prompt: prompt.to_string(), width, height };
        let image = self.call_image(&job).await?;
        let file_path = self.persist(ArtifactKind::Image, prompt, "png", &image.data)?;
        Ok(ImageOutcome::Ok { image_base64: encode::to_base64(&image.data), file_path })
    }

    async fn call_image(&self, job: &ImageJob) -> Result<GeneratedImage, GenError> {
        tokio::time::timeout(self.call_timeout, self.image.generate(job))
            .await
            .map_err(|_| {
                GenError::Backend(format!(
                    "image backend timed out after {}s",
                    self.call_timeout.as_secs()
                ))
            })?
    }

    async fn call_video(&self, job: &VideoJob) -> Result<crate::ports::FrameSequence, GenError> {
        tokio::time::timeout(self.call_timeout, self.video.animate(job))
            .await
            .map_err(|_| {
                GenError::Backend(format!(
                    "video backend timed out after {}s",
                    self.call_timeout.as_secs()
                ))
            })?
    }

    fn persist(
        &self,
        kind: ArtifactKind,
        prompt: &str,
        extension: &str,
        data: &[u8],
    ) -> Result<Option<String>, GenError> {
        match &self.store {
            Some(store) => {
                let path = store.save(kind, prompt, extension, data)?;
                Ok(Some(path.display().to_string()))
            }
            None => Ok(None),
        }
    }
}

fn ensure_positive(value: u32, field: &str) -> Result<(), GenError> {
    if value == 0 {
        return Err(GenError::Validation(format!("{field} must be positive")));
    }
    Ok(())
}

fn validate_image_batch(request: &ImageBatchRequest) -> Result<(), GenError> {
    if request.prompts.is_empty() {
        return Err(GenError::Validation("prompts must not be empty".to_string()));
    }
    ensure_positive(request.width, "width")?;
    ensure_positive(request.height, "height")
}

fn validate_video(request: &VideoRequest) -> Result<(), GenError> {
    ensure_positive(request.width, "width")?;
    ensure_positive(request.height, "height")?;
    ensure_positive(request.num_frames, "num_frames")?;
    ensure_positive(request.fps, "fps")
}
