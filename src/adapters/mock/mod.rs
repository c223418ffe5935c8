//! Deterministic synthetic backends.
//!
//! The mocks exercise the full gateway control flow without inference cost:
//! real PNG frames at the requested dimensions, derived purely from the
//! inputs so repeated calls produce identical bytes.

use std::io::Cursor;

use image::{Rgb, RgbImage};

use crate::error::GenError;
use crate::ports::image_backend::{GeneratedImage, ImageBackend, ImageFuture, ImageJob};
use crate::ports::video_backend::{FrameSequence, VideoBackend, VideoFuture, VideoJob};

/// Image backend that renders a solid color derived from the prompt.
#[derive(Debug, Default)]
pub struct MockImageBackend;

/// Video backend that derives each frame from the reference image with a
/// per-frame brightness shift.
#[derive(Debug, Default)]
pub struct MockVideoBackend;

/// Fold a prompt into a stable RGB color. FNV-style so the mapping does not
/// depend on the process or std hasher seeds.
fn prompt_color(prompt: &str) -> Rgb<u8> {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for byte in prompt.bytes() {
        hash ^= u64::from(byte);
        hash = hash.wrapping_mul(0x0100_0000_01b3);
    }
    let bytes = hash.to_be_bytes();
    Rgb([bytes[0], bytes[3], bytes[6]])
}

fn encode_png(img: &RgbImage) -> Result<Vec<u8>, GenError> {
    let mut bytes = Vec::new();
    image::DynamicImage::ImageRgb8(img.clone())
        .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .map_err(|e| GenError::Encoding(format!("failed to encode mock frame: {e}")))?;
    Ok(bytes)
}

impl ImageBackend for MockImageBackend {
    fn generate(&self, job: &ImageJob) -> ImageFuture<'_> {
        let job = job.clone();
        Box::pin(async move {
            let img = RgbImage::from_pixel(job.width, job.height, prompt_color(&job.prompt));
            let data = encode_png(&img)?;
            Ok(GeneratedImage { data, mime_type: "image/png".to_string() })
        })
    }
}

impl VideoBackend for MockVideoBackend {
    fn animate(&self, job: &VideoJob) -> VideoFuture<'_> {
        let job = job.clone();
        Box::pin(async move {
            let reference = image::load_from_memory(&job.reference.data)
                .map_err(|e| GenError::Backend(format!("undecodable reference image: {e}")))?
                .to_rgb8();

            let mut frames = Vec::with_capacity(job.num_frames as usize);
            for index in 0..job.num_frames {
                let shift = u8::try_from((index * 7) % 128).unwrap_or(0);
                let mut frame = reference.clone();
                for pixel in frame.pixels_mut() {
                    pixel.0 = [
                        pixel.0[0].wrapping_add(shift),
                        pixel.0[1].wrapping_add(shift),
                        pixel.0[2].wrapping_add(shift),
                    ];
                }
                frames.push(encode_png(&frame)?);
            }

            Ok(FrameSequence { frames })
        })
    }
}
