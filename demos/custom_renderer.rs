//! # Custom Renderer
//!
//! Draws the network as ASCII art in the terminal by implementing
//! [`Renderer`] directly. Points are projected with the frame's
//! view-projection matrix and plotted on a character grid; brighter links
//! are drawn as denser dots along their length.
//!
//! Run with: `cargo run --example custom_renderer`

use std::convert::Infallible;

use plexus::prelude::*;

const SHADES: [char; 4] = ['.', ':', '+', '#'];

struct AsciiRenderer {
    columns: usize,
    rows: usize,
    /// Print every n-th frame.
    every: u64,
}

impl AsciiRenderer {
    fn new(columns: usize, rows: usize, every: u64) -> Self {
        Self {
            columns,
            rows,
            every,
        }
    }

    /// Map a world position to a grid cell, if it lands in view.
    fn cell(&self, view_proj: Mat4, world: Vec3) -> Option<(usize, usize)> {
        let clip = view_proj * world.extend(1.0);
        if clip.w <= 0.0 {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        if ndc.x.abs() > 1.0 || ndc.y.abs() > 1.0 {
            return None;
        }
        let col = ((ndc.x + 1.0) * 0.5 * (self.columns - 1) as f32).round() as usize;
        let row = ((1.0 - ndc.y) * 0.5 * (self.rows - 1) as f32).round() as usize;
        Some((col, row))
    }
}

impl Renderer for AsciiRenderer {
    type Error = Infallible;

    fn render(&mut self, frame: &Frame<'_>) -> Result<(), Self::Error> {
        if frame.index % self.every != 0 {
            return Ok(());
        }

        let view_proj = frame.view_proj();
        let mut grid = vec![vec![' '; self.columns]; self.rows];

        for segment in frame.segments() {
            let steps = 12;
            let shade = SHADES[((segment.opacity / 0.3) * 2.0).clamp(0.0, 2.0) as usize];
            for s in 1..steps {
                let t = s as f32 / steps as f32;
                if let Some((c, r)) = self.cell(view_proj, segment.start.lerp(segment.end, t)) {
                    grid[r][c] = shade;
                }
            }
        }
        for point in frame.points() {
            if let Some((c, r)) = self.cell(view_proj, point.position) {
                grid[r][c] = SHADES[3];
            }
        }

        println!("frame {} (t = {:.2}s)", frame.index, frame.time);
        for row in grid {
            println!("{}", row.into_iter().collect::<String>());
        }
        Ok(())
    }

    fn set_viewport_size(&mut self, width: u32, height: u32) {
        println!("viewport {}x{}", width, height);
    }

    fn set_aspect_ratio(&mut self, _ratio: f32) {}
}

fn main() -> anyhow::Result<()> {
    let config = PlexusConfig::default()
        .with_node_count(40)
        .with_max_speed(0.01)
        .with_seed(7);

    let mut rng = rng_from_seed(config.network.seed);
    let mut animator = Animator::init(&config, &mut rng, AsciiRenderer::new(72, 28, 60))?;
    // Terminal cells are about twice as tall as they are wide.
    animator.resize(72, 56);

    let mut frames = FrameLoop::new(animator);
    let ran = match frames.run_frames(181) {
        Ok(ran) => ran,
        Err(never) => match never {},
    };

    println!("{} frames: {}", ran, frames.animator().network().stats());
    Ok(())
}
