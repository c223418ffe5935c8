//! Transport adapters wrapping the gateway.
//!
//! - `http` — axum HTTP API
//! - `line` — line-oriented stdin/stdout protocol

pub mod http;
pub mod line;
