//! Live adapters for an AUTOMATIC1111-compatible diffusion server.
//!
//! Text-to-image goes through `/sdapi/v1/txt2img`; image-to-video through
//! `/sdapi/v1/img2vid`. Both endpoints exchange base64-encoded PNG data.

use reqwest::Client;
use serde::Deserialize;

use crate::encode::{from_base64, to_base64};
use crate::error::GenError;
use crate::ports::image_backend::{GeneratedImage, ImageBackend, ImageFuture, ImageJob};
use crate::ports::video_backend::{FrameSequence, VideoBackend, VideoFuture, VideoJob};

const INFERENCE_STEPS: u32 = 50;

/// Text-to-image backend over a remote diffusion server.
pub struct DiffusionImageBackend {
    client: Client,
    base_url: String,
}

impl DiffusionImageBackend {
    /// Create an image backend for the given server base URL.
    #[must_use]
    pub fn new(base_url: String) -> Self {
        Self { client: Client::new(), base_url }
    }
}

impl ImageBackend for DiffusionImageBackend {
    fn generate(&self, job: &ImageJob) -> ImageFuture<'_> {
        let job = job.clone();
        Box::pin(async move {
            let url = format!("{}/sdapi/v1/txt2img", self.base_url.trim_end_matches('/'));
            let body = serde_json::json!({
                "prompt": job.prompt,
                "width": job.width,
                "height": job.height,
                "steps": INFERENCE_STEPS,
            });

            let response = self.client.post(&url).json(&body).send().await?;

            let status = response.status();
            let response_text = response.text().await?;

            if !status.is_success() {
                return Err(GenError::Backend(format!(
                    "txt2img returned {status}: {response_text}"
                )));
            }

            let parsed: Txt2ImgResponse = serde_json::from_str(&response_text).map_err(|e| {
                GenError::Backend(format!("failed to parse txt2img response: {e}"))
            })?;

            let encoded = parsed
                .images
                .first()
                .ok_or_else(|| GenError::Backend("txt2img returned no images".to_string()))?;
            let data = from_base64(encoded)
                .map_err(|e| GenError::Backend(format!("undecodable txt2img payload: {e}")))?;

            Ok(GeneratedImage { data, mime_type: "image/png".to_string() })
        })
    }
}

/// Image-to-video backend over a remote diffusion server.
pub struct DiffusionVideoBackend {
    client: Client,
    base_url: String,
}

impl DiffusionVideoBackend {
    /// Create a video backend for the given server base URL.
    #[must_use]
    pub fn new(base_url: String) -> Self {
        Self { client: Client::new(), base_url }
    }
}

impl VideoBackend for DiffusionVideoBackend {
    fn animate(&self, job: &VideoJob) -> VideoFuture<'_> {
        let job = job.clone();
        Box::pin(async move {
            let url = format!("{}/sdapi/v1/img2vid", self.base_url.trim_end_matches('/'));
            let body = serde_json::json!({
                "init_image": to_base64(&job.reference.data),
                "num_frames": job.num_frames,
                "fps": job.fps,
                "steps": INFERENCE_STEPS,
            });

            let response = self.client.post(&url).json(&body).send().await?;

            let status = response.status();
            let response_text = response.text().await?;

            if !status.is_success() {
                return Err(GenError::Backend(format!(
                    "img2vid returned {status}: {response_text}"
                )));
            }

            let parsed: Img2VidResponse = serde_json::from_str(&response_text).map_err(|e| {
                GenError::Backend(format!("failed to parse img2vid response: {e}"))
            })?;

            if parsed.frames.is_empty() {
                return Err(GenError::Backend("img2vid returned no frames".to_string()));
            }

            let mut frames = Vec::with_capacity(parsed.frames.len());
            for (index, encoded) in parsed.frames.iter().enumerate() {
                let data = from_base64(encoded).map_err(|e| {
                    GenError::Backend(format!("undecodable frame {index}: {e}"))
                })?;
                frames.push(data);
            }

            Ok(FrameSequence { frames })
        })
    }
}

// --- Diffusion server response types ---

#[derive(Deserialize)]
struct Txt2ImgResponse {
    images: Vec<String>,
}

#[derive(Deserialize)]
struct Img2VidResponse {
    frames: Vec<String>,
}
