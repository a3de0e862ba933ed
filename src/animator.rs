//! The animator: owns the network, the clock, the camera and the renderer.
//!
//! Lifecycle:
//!
//! 1. [`Animator::init`] builds the network from a random source.
//! 2. The host calls [`Animator::resize`] with the initial surface size and
//!    again whenever the surface changes.
//! 3. The host calls [`Animator::frame`] once per display refresh, usually
//!    through a [`FrameLoop`](crate::scheduler::FrameLoop).
//! 4. [`Animator::teardown`] consumes the animator and hands the renderer
//!    back.

use rand::Rng;

use crate::camera::DriftCamera;
use crate::config::PlexusConfig;
use crate::error::ConfigError;
use crate::network::Network;
use crate::render::{Frame, Renderer};
use crate::time::Time;

/// Drives a [`Network`] and draws it through a [`Renderer`].
pub struct Animator<R: Renderer> {
    network: Network,
    time: Time,
    camera: DriftCamera,
    renderer: R,
}

impl<R: Renderer> Animator<R> {
    /// Generate a network from `rng` and wrap it.
    pub fn init<G: Rng>(
        config: &PlexusConfig,
        rng: &mut G,
        renderer: R,
    ) -> Result<Self, ConfigError> {
        let network = Network::generate(config, rng)?;
        Self::with_network(network, config, renderer)
    }

    /// Wrap an existing network.
    ///
    /// `config` supplies the clock and camera settings and must describe the
    /// same rule the network was built with (bounds, connection distance,
    /// pulse and opacity); node count and seed may differ.
    pub fn with_network(
        network: Network,
        config: &PlexusConfig,
        renderer: R,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        if !network.matches_config(config) {
            return Err(ConfigError::NetworkMismatch);
        }
        tracing::info!(
            points = network.len(),
            connections = network.connections().len(),
            "animator initialized"
        );
        Ok(Self {
            network,
            time: Time::new(config.time_step),
            camera: DriftCamera::new(config.camera.clone(), 1.0),
            renderer,
        })
    }

    /// Run one tick: update the network, advance the clock, move the camera
    /// and draw.
    ///
    /// The update itself cannot fail; only the renderer can.
    pub fn frame(&mut self) -> Result<(), R::Error> {
        let time = self.time.animation();
        let index = self.time.frame();

        self.network.update(time);
        if self.time.advance() {
            tracing::debug!(fps = self.time.fps(), frame = index, "frame rate");
        }
        self.camera.update(self.time.wall_elapsed());

        let frame = Frame::new(
            &self.network,
            self.camera.view_matrix(),
            self.camera.projection_matrix(),
            self.camera.position(),
            index,
            time,
        );
        tracing::trace!(frame = index, time, "rendering frame");
        self.renderer.render(&frame)
    }

    /// React to a new surface size. Zero-sized surfaces are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        let aspect = width as f32 / height as f32;
        self.camera.set_aspect_ratio(aspect);
        self.renderer.set_aspect_ratio(aspect);
        self.renderer.set_viewport_size(width, height);
        tracing::info!(width, height, "viewport resized");
    }

    /// Stop animating and give the renderer back.
    pub fn teardown(self) -> R {
        tracing::info!(frames = self.time.frame(), "animator torn down");
        self.renderer
    }

    #[inline]
    pub fn network(&self) -> &Network {
        &self.network
    }

    #[inline]
    pub fn time(&self) -> &Time {
        &self.time
    }

    #[inline]
    pub fn camera(&self) -> &DriftCamera {
        &self.camera
    }

    #[inline]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[inline]
    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }
}
