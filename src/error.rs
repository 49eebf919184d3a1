//! Error types for game configuration and rendering.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{name} must be finite and positive, got {value}")]
    NotPositive { name: &'static str, value: f32 },

    #[error("gap height {gap} must be smaller than playfield height {height}")]
    GapTooTall { gap: f32, height: f32 },

    #[error("bird x {x} with radius {radius} does not fit inside playfield width {width}")]
    BirdOutOfBounds { x: f32, radius: f32, width: f32 },

    #[error("spawn interval {interval} leaves no pipes on a playfield {width} wide")]
    NoPipes { interval: f32, width: f32 },

    #[error("jump impulse must be finite, got {0}")]
    InvalidImpulse(f32),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Failures while bringing up or drawing with the GPU
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    #[error("no suitable adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),

    #[error("failed to create device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),

    #[error("surface reports no supported formats")]
    NoSurfaceFormat,

    #[error("frame acquisition failed: {0}")]
    Frame(#[from] wgpu::SurfaceError),
}
