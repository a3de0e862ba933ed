//! # plexus
//!
//! An animated particle network: points drift inside a cube, bounce off its
//! walls, pulse in size, and are joined by lines that fade as their
//! endpoints move apart. The whole scene is viewed through a slowly
//! drifting camera.
//!
//! ## Quick Start
//!
//! ```ignore
//! use plexus::prelude::*;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = PlexusConfig::default()
//!         .with_node_count(150)
//!         .with_connection_distance(0.8)
//!         .with_seed(42);
//!
//!     plexus::window::run(config)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Network
//!
//! A [`Network`] is a list of [`Point`]s and a fixed set of
//! [`Connection`]s between them. Connections are decided once, when the
//! network is generated: every pair closer than the connection distance is
//! linked with the configured probability. After that only positions,
//! scales and link opacities change.
//!
//! ### Animator
//!
//! An [`Animator`] owns the network, the clock, the camera and a
//! [`Renderer`]. Each call to [`Animator::frame`] advances the network by
//! one step and draws it. Wrap it in a [`FrameLoop`] to get a
//! [`CancellationToken`] that stops the animation cleanly:
//!
//! ```ignore
//! let mut rng = StdRng::seed_from_u64(7);
//! let animator = Animator::init(&config, &mut rng, NullRenderer::new())?;
//! let mut frames = FrameLoop::new(animator);
//! let token = frames.token();
//!
//! frames.run_frames(600)?;
//! token.cancel();
//! assert_eq!(frames.tick()?, Tick::Cancelled);
//! ```
//!
//! ### Renderers
//!
//! Anything implementing [`Renderer`] can draw a network. The crate ships
//! [`GpuRenderer`](gpu::GpuRenderer), a wgpu renderer used by the window
//! host, and [`NullRenderer`], which draws nothing and is used for headless
//! runs and tests.
//!
//! ## Configuration
//!
//! [`PlexusConfig`] can be built in code or loaded from JSON. Missing
//! fields take their defaults:
//!
//! ```json
//! {
//!   "network": { "node_count": 300, "connection_distance": 0.6, "seed": 1 },
//!   "visuals": { "line_color": 16711935 }
//! }
//! ```

pub mod animator;
pub mod camera;
pub mod config;
pub mod error;
pub mod gpu;
pub mod network;
pub mod render;
pub mod scheduler;
pub mod spawn;
pub mod time;
pub mod window;

pub use animator::Animator;
pub use camera::DriftCamera;
pub use config::{CameraConfig, NetworkConfig, PlexusConfig, VisualConfig};
pub use error::{ConfigError, GpuError, RunError};
pub use glam::{Mat4, Vec3};
pub use network::{Connection, Network, NetworkStats, Point};
pub use render::{Frame, NullRenderer, Renderer, Segment};
pub use scheduler::{CancellationToken, FrameLoop, Tick};
pub use spawn::SpawnContext;
pub use time::Time;

/// Everything needed to build and run a network.
pub mod prelude {
    pub use crate::animator::Animator;
    pub use crate::camera::DriftCamera;
    pub use crate::config::{CameraConfig, NetworkConfig, PlexusConfig, VisualConfig};
    pub use crate::error::{ConfigError, RunError};
    pub use crate::network::{Connection, Network, NetworkStats, Point};
    pub use crate::render::{Frame, NullRenderer, Renderer, Segment};
    pub use crate::scheduler::{CancellationToken, FrameLoop, Tick};
    pub use crate::spawn::rng_from_seed;
    pub use crate::time::Time;
    pub use crate::{Mat4, Vec3};
    pub use rand::rngs::StdRng;
    pub use rand::SeedableRng;
}
