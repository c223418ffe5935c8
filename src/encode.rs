//! Payload encoding: base64 transport encoding and frame-sequence assembly.

use std::io::Cursor;

use base64::Engine;
use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame};

use crate::error::GenError;

/// Encode raw media bytes as standard base64 for text-safe transport.
#[must_use]
pub fn to_base64(data: &[u8]) -> String {
    base64::engine::general_purpose::STANDARD.encode(data)
}

/// Decode a standard base64 payload back into raw bytes.
///
/// # Errors
///
/// Returns an error if the input is not valid base64.
pub fn from_base64(encoded: &str) -> Result<Vec<u8>, GenError> {
    base64::engine::general_purpose::STANDARD
        .decode(encoded)
        .map_err(|e| GenError::Encoding(format!("invalid base64 payload: {e}")))
}

/// Assemble a sequence of PNG-encoded frames into an animated GIF container
/// at the requested frame rate.
///
/// # Errors
///
/// Returns an error if the frame list is empty, a frame cannot be decoded,
/// or the container cannot be written.
pub fn assemble_animation(frames: &[Vec<u8>], fps: u32) -> Result<Vec<u8>, GenError> {
    if frames.is_empty() {
        return Err(GenError::Encoding("backend returned no frames".to_string()));
    }

    let delay = Delay::from_numer_denom_ms(1000, fps);
    let mut container = Vec::new();
    {
        let mut encoder = GifEncoder::new(Cursor::new(&mut container));
        encoder
            .set_repeat(Repeat::Infinite)
            .map_err(|e| GenError::Encoding(format!("failed to initialize container: {e}")))?;

        for (index, png) in frames.iter().enumerate() {
            let decoded = image::load_from_memory(png)
                .map_err(|e| GenError::Encoding(format!("failed to decode frame {index}: {e}")))?;
            let frame = Frame::from_parts(decoded.to_rgba8(), 0, 0, delay);
            encoder
                .encode_frame(frame)
                .map_err(|e| GenError::Encoding(format!("failed to encode frame {index}: {e}")))?;
        }
    }

    Ok(container)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbaImage;

    fn png_frame(r: u8) -> Vec<u8> {
        let img = RgbaImage::from_pixel(4, 4, image::Rgba([r, 0, 0, 255]));
        let mut bytes = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn base64_round_trip() {
        let data = vec![0x00, 0x01, 0xFE, 0xFF, 0x89, b'P', b'N', b'G'];
        assert_eq!(from_base64(&to_base64(&data)).unwrap(), data);
    }

    #[test]
    fn base64_rejects_garbage() {
        assert!(from_base64("not valid base64!!!").is_err());
    }

    #[test]
    fn animation_has_gif_magic() {
        let frames = vec![png_frame(0), png_frame(128), png_frame(255)];
        let container = assemble_animation(&frames, 12).unwrap();
        assert!(container.starts_with(b"GIF8"));
    }

    #[test]
    fn empty_frame_list_is_rejected() {
        assert!(matches!(assemble_animation(&[], 24), Err(GenError::Encoding(_))));
    }

    #[test]
    fn undecodable_frame_is_rejected() {
        let frames = vec![vec![1, 2, 3, 4]];
        assert!(matches!(assemble_animation(&frames, 24), Err(GenError::Encoding(_))));
    }
}
