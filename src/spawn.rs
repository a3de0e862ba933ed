//! Random sampling for point initialization.
//!
//! All randomness flows through a caller-supplied [`rand::Rng`], so a seeded
//! [`StdRng`] reproduces the same network on every run.

use crate::config::{NetworkConfig, VisualConfig};
use crate::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Build the random source for a network.
///
/// A fixed seed gives a reproducible layout; `None` seeds from the OS.
pub fn rng_from_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Sampling helpers bound to a random source and the network settings.
///
/// Draw order matters for reproducibility: [`SpawnContext::color`],
/// [`SpawnContext::position`] and [`SpawnContext::velocity`] each consume a
/// fixed number of draws.
pub struct SpawnContext<'a, R: Rng> {
    rng: &'a mut R,
    network: &'a NetworkConfig,
    visuals: &'a VisualConfig,
}

impl<'a, R: Rng> SpawnContext<'a, R> {
    pub fn new(rng: &'a mut R, network: &'a NetworkConfig, visuals: &'a VisualConfig) -> Self {
        Self {
            rng,
            network,
            visuals,
        }
    }

    /// Random f32 between 0.0 and 1.0.
    #[inline]
    pub fn random(&mut self) -> f32 {
        self.rng.gen()
    }

    /// Uniform in `[-half, half)` on each axis.
    pub fn random_in_cube(&mut self, half: f32) -> Vec3 {
        let x = (self.random() - 0.5) * 2.0 * half;
        let y = (self.random() - 0.5) * 2.0 * half;
        let z = (self.random() - 0.5) * 2.0 * half;
        Vec3::new(x, y, z)
    }

    /// Spawn position inside the bounding cube. Three draws.
    pub fn position(&mut self) -> Vec3 {
        self.random_in_cube(self.network.bounds)
    }

    /// Initial velocity, each axis independent. Three draws.
    pub fn velocity(&mut self) -> Vec3 {
        self.random_in_cube(self.network.max_speed)
    }

    /// Point color from the configured hue/lightness band. Two draws.
    pub fn color(&mut self) -> Vec3 {
        let hue = self.visuals.hue_base + self.random() * self.visuals.hue_range;
        let lightness = self.visuals.lightness_base + self.random() * self.visuals.lightness_range;
        hsl_to_rgb(hue, 1.0, lightness)
    }

    /// Whether a candidate pair becomes a link. One draw.
    pub fn link_gate(&mut self) -> bool {
        self.random() < self.network.connection_probability
    }
}

/// Convert HSL (all components 0..1, hue wraps) to RGB.
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> Vec3 {
    let h = h.rem_euclid(1.0);
    let s = s.clamp(0.0, 1.0);
    let l = l.clamp(0.0, 1.0);

    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = c * (1.0 - ((h * 6.0) % 2.0 - 1.0).abs());
    let m = l - c / 2.0;

    let (r, g, b) = match (h * 6.0) as u32 % 6 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    Vec3::new(r + m, g + m, b + m)
}

/// Convert `0xRRGGBB` to RGB components in 0..1.
pub fn hex_to_rgb(hex: u32) -> Vec3 {
    let r = ((hex >> 16) & 0xff) as f32 / 255.0;
    let g = ((hex >> 8) & 0xff) as f32 / 255.0;
    let b = (hex & 0xff) as f32 / 255.0;
    Vec3::new(r, g, b)
}
