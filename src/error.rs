//! Error types for plexus.
//!
//! Configuration problems are reported as [`ConfigError`], GPU setup failures
//! as [`GpuError`], and anything that stops the windowed host as [`RunError`].
//! The per-frame update itself never fails.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or validating a configuration, or while
/// assembling a network from explicit parts.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Connection probability outside `[0, 1]`.
    #[error("connection probability must lie in [0, 1], got {0}")]
    ProbabilityOutOfRange(f32),

    /// Bound half-extent not strictly positive.
    #[error("bounds must be a positive finite half-extent, got {0}")]
    InvalidBounds(f32),

    /// Negative or non-finite connection distance.
    #[error("connection distance must be finite and >= 0, got {0}")]
    InvalidDistance(f32),

    /// Negative or non-finite velocity range.
    #[error("max speed must be finite and >= 0, got {0}")]
    InvalidSpeed(f32),

    /// Velocity range too large for the cube: a point could step past any
    /// finite coordinate before it turns around.
    #[error("max speed {speed} is too large for bounds {bounds}")]
    SpeedExceedsBounds { speed: f32, bounds: f32 },

    /// Non-positive animation time step.
    #[error("time step must be a positive finite number of seconds, got {0}")]
    InvalidTimeStep(f32),

    /// A connection refers to a point that does not exist.
    #[error("connection ({a}, {b}) refers to a point outside 0..{len}")]
    ConnectionOutOfRange { a: usize, b: usize, len: usize },

    /// A connection joins a point to itself.
    #[error("point {0} cannot be connected to itself")]
    SelfConnection(usize),

    /// A point has a NaN or infinite position or velocity.
    #[error("point {0} has a non-finite position or velocity")]
    NonFinitePoint(usize),

    /// A network's rule constants differ from the configuration it is
    /// being animated with.
    #[error("network was built with a different bounds, connection distance or visual rule than the configuration")]
    NetworkMismatch,

    /// The same pair of points is linked twice.
    #[error("points {a} and {b} are already connected")]
    DuplicateConnection { a: usize, b: usize },

    /// Failed to read a configuration file.
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse a configuration file.
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors that can occur during GPU initialization.
#[derive(Debug, Error)]
pub enum GpuError {
    /// Failed to create a surface for rendering.
    #[error("failed to create GPU surface: {0}")]
    SurfaceCreation(#[from] wgpu::CreateSurfaceError),

    /// No compatible GPU adapter found.
    #[error("no compatible GPU adapter found; a Vulkan, Metal, DX12 or WebGPU capable device is required")]
    NoAdapter,

    /// Failed to create GPU device.
    #[error("failed to create GPU device: {0}")]
    DeviceCreation(#[from] wgpu::RequestDeviceError),
}

/// Errors that stop the windowed animation host.
#[derive(Debug, Error)]
pub enum RunError {
    /// Failed to create event loop.
    #[error("failed to create event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    /// Failed to create window.
    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),

    /// GPU initialization failed.
    #[error("GPU error: {0}")]
    Gpu(#[from] GpuError),

    /// The configuration was rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The surface could not be presented and did not recover.
    #[error("render surface error: {0}")]
    Surface(#[from] wgpu::SurfaceError),
}
