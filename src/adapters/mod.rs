//! Adapter implementations for port traits.
//!
//! - `live/` — HTTP clients for a remote diffusion inference server
//! - `mock/` — Deterministic synthetic backends for tests and offline use

pub mod live;
pub mod mock;
