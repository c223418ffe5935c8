//! Line-oriented transport: one JSON record per stdin line, one payload or
//! error line per reply. Malformed input never terminates the loop.

use serde::Deserialize;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use crate::error::GenError;
use crate::gateway::{Gateway, ImageBatchRequest, ImageOutcome, VideoRequest};

/// Prompt prefix that selects video mode for a line.
pub const VIDEO_PREFIX: &str = "!video";

/// Leading content of failure replies, so callers can discriminate by
/// inspecting the start of the line.
pub const ERROR_PREFIX: &str = "Error:";

fn default_dimension() -> u32 {
    512
}

fn default_frames() -> u32 {
    24
}

fn default_fps() -> u32 {
    24
}

/// One inbound line: a prompt plus optional generation parameters.
#[derive(Debug, Deserialize)]
struct LineRecord {
    prompt: String,
    #[serde(default = "default_dimension")]
    width: u32,
    #[serde(default = "default_dimension")]
    height: u32,
    #[serde(default = "default_frames")]
    num_frames: u32,
    #[serde(default = "default_fps")]
    fps: u32,
    #[serde(default)]
    styled: bool,
}

/// Read records from stdin until EOF, writing one reply line each.
///
/// # Errors
///
/// Returns an error only for stdin/stdout I/O failures; per-record failures
/// are reported as `Error:` lines and the loop continues.
pub async fn run(gateway: &Gateway) -> Result<(), GenError> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    while let Some(line) = lines.next_line().await? {
        let reply = handle_line(gateway, &line).await;
        stdout.write_all(reply.as_bytes()).await?;
        stdout.write_all(b"\n").await?;
        stdout.flush().await?;
    }

    tracing::info!("stdin closed, pipe transport exiting");
    Ok(())
}

/// Handle one inbound line and produce the reply line.
async fn handle_line(gateway: &Gateway, line: &str) -> String {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return format!("{ERROR_PREFIX} empty input line");
    }

    let record: LineRecord = match serde_json::from_str(trimmed) {
        Ok(record) => record,
        Err(e) => {
            tracing::warn!(error = %e, "unparsable input line");
            return format!("{ERROR_PREFIX} invalid request line: {e}");
        }
    };

    if let Some(rest) = record.prompt.strip_prefix(VIDEO_PREFIX) {
        let request = VideoRequest {
            prompt: rest.trim().to_string(),
            width: record.width,
            height: record.height,
            num_frames: record.num_frames,
            fps: record.fps,
            styled: record.styled,
        };
        match gateway.submit_video(&request).await {
            Ok(result) => result.video_base64,
            Err(e) => format!("{ERROR_PREFIX} {e}"),
        }
    } else {
        let request = ImageBatchRequest {
            prompts: vec![record.prompt],
            width: record.width,
            height: record.height,
            styled: record.styled,
        };
        match gateway.submit_image_batch(&request).await {
            Ok(results) => match results.into_iter().next().map(|r| r.outcome) {
                Some(ImageOutcome::Ok { image_base64, .. }) => image_base64,
                Some(ImageOutcome::Err { error }) => format!("{ERROR_PREFIX} {error}"),
                None => format!("{ERROR_PREFIX} no result produced"),
            },
            Err(e) => format!("{ERROR_PREFIX} {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::adapters::mock::{MockImageBackend, MockVideoBackend};
    use crate::encode::from_base64;
    use crate::style::StyleTemplate;

    fn mock_gateway() -> Gateway {
        Gateway::new(
            Box::new(MockImageBackend),
            Box::new(MockVideoBackend),
            None,
            StyleTemplate::default(),
            Duration::from_secs(5),
        )
    }

    #[tokio::test]
    async fn image_line_replies_with_base64_png() {
        let gateway = mock_gateway();
        let reply =
            handle_line(&gateway, r#"{"prompt": "a cat", "width": 8, "height": 8}"#).await;

        assert!(!reply.starts_with(ERROR_PREFIX));
        let bytes = from_base64(&reply).unwrap();
        assert!(bytes.starts_with(&[0x89, b'P', b'N', b'G']));
    }

    #[tokio::test]
    async fn video_prefix_replies_with_base64_gif() {
        let gateway = mock_gateway();
        let line = r#"{"prompt": "!video a cat", "width": 8, "height": 8, "num_frames": 2, "fps": 4}"#;
        let reply = handle_line(&gateway, line).await;

        assert!(!reply.starts_with(ERROR_PREFIX));
        let bytes = from_base64(&reply).unwrap();
        assert!(bytes.starts_with(b"GIF8"));
    }

    #[tokio::test]
    async fn malformed_json_replies_with_error_line() {
        let gateway = mock_gateway();
        let reply = handle_line(&gateway, "this is not json").await;
        assert!(reply.starts_with(ERROR_PREFIX));
    }

    #[tokio::test]
    async fn empty_line_replies_with_error_line() {
        let gateway = mock_gateway();
        let reply = handle_line(&gateway, "   ").await;
        assert!(reply.starts_with(ERROR_PREFIX));
    }

    #[tokio::test]
    async fn missing_prompt_field_replies_with_error_line() {
        let gateway = mock_gateway();
        let reply = handle_line(&gateway, r#"{"width": 8}"#).await;
        assert!(reply.starts_with(ERROR_PREFIX));
        assert!(reply.contains("prompt"));
    }

    #[tokio::test]
    async fn invalid_video_params_reply_with_error_line() {
        let gateway = mock_gateway();
        let reply = handle_line(&gateway, r#"{"prompt": "!video a cat", "fps": 0}"#).await;
        assert!(reply.starts_with(ERROR_PREFIX));
        assert!(reply.contains("fps"));
    }
}
