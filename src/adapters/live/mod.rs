//! Live adapters that call a remote diffusion inference server.

pub mod diffusion;

pub use diffusion::{DiffusionImageBackend, DiffusionVideoBackend};
