//! The boundary between the animator and whatever draws it.
//!
//! The animator hands a [`Frame`] to a [`Renderer`] once per tick. A
//! renderer never mutates the network; it only reads positions, scales,
//! colors and link opacities out of the frame.

use std::convert::Infallible;

use glam::{Mat4, Vec3};

use crate::network::{Connection, Network, Point};

/// Something that can draw a particle network.
pub trait Renderer {
    /// Error raised when a frame could not be drawn.
    type Error;

    /// Draw one frame.
    fn render(&mut self, frame: &Frame<'_>) -> Result<(), Self::Error>;

    /// The drawable area changed size, in physical pixels.
    fn set_viewport_size(&mut self, width: u32, height: u32);

    /// The drawable area changed shape (width / height).
    fn set_aspect_ratio(&mut self, ratio: f32);
}

/// A line segment ready to draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Vec3,
    pub end: Vec3,
    pub opacity: f32,
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    network: &'a Network,
    /// World to camera space.
    pub view: Mat4,
    /// Camera to clip space.
    pub projection: Mat4,
    pub camera_position: Vec3,
    /// Index of this frame, starting at 0.
    pub index: u64,
    /// Animation time this frame was computed for.
    pub time: f32,
}

impl<'a> Frame<'a> {
    pub fn new(
        network: &'a Network,
        view: Mat4,
        projection: Mat4,
        camera_position: Vec3,
        index: u64,
        time: f32,
    ) -> Self {
        Self {
            network,
            view,
            projection,
            camera_position,
            index,
            time,
        }
    }

    #[inline]
    pub fn points(&self) -> &'a [Point] {
        self.network.points()
    }

    #[inline]
    pub fn connections(&self) -> &'a [Connection] {
        self.network.connections()
    }

    /// Each link as two endpoint positions and an opacity.
    pub fn segments(&self) -> impl Iterator<Item = Segment> + 'a {
        let network = self.network;
        network.connections().iter().map(move |c| {
            let (start, end) = network.endpoints(c);
            Segment {
                start,
                end,
                opacity: c.opacity,
            }
        })
    }

    /// Combined view-projection matrix.
    #[inline]
    pub fn view_proj(&self) -> Mat4 {
        self.projection * self.view
    }
}

/// Renderer that draws nothing, for headless runs.
///
/// It still remembers the last viewport it was given and counts frames.
#[derive(Debug, Default, Clone)]
pub struct NullRenderer {
    frames: u64,
    viewport: (u32, u32),
    aspect: f32,
}

impl NullRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames rendered so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn viewport(&self) -> (u32, u32) {
        self.viewport
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }
}

impl Renderer for NullRenderer {
    type Error = Infallible;

    fn render(&mut self, _frame: &Frame<'_>) -> Result<(), Self::Error> {
        self.frames += 1;
        Ok(())
    }

    fn set_viewport_size(&mut self, width: u32, height: u32) {
        self.viewport = (width, height);
    }

    fn set_aspect_ratio(&mut self, ratio: f32) {
        self.aspect = ratio;
    }
}
