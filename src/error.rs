//! Error types
//!
//! Only two fault classes surface to callers: bad configuration (rejected before it
//! reaches the simulation) and a failed startup (fatal, logged by the host).

use thiserror::Error;

/// Rejected configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cue power must be positive and finite, got {0}")]
    NonPositivePower(f32),

    #[error("cue power {power} exceeds the maximum of {max}")]
    PowerAboveMax { power: f32, max: f32 },

    #[error("baseline power {baseline} must be within (0, {ceiling}]")]
    BaselineOutOfRange { baseline: f32, ceiling: f32 },

    #[error("table must be finite and at least one ball across, got {width}x{height}")]
    InvalidTableSize { width: f32, height: f32 },

    #[error("malformed settings: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failure to bring up the table and its rendering surface
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("no canvas element found")]
    MissingCanvas,

    #[error("invalid table configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    #[error("no suitable adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),

    #[error("failed to create device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),

    #[error("surface reports no usable {0}")]
    UnsupportedSurface(&'static str),
}
