//! Configuration for the particle network, its visuals and the drift camera.
//!
//! Every field has a default matching the portfolio background, so an empty
//! JSON object (`{}`) is a valid configuration file. Use the `with_*`
//! builder methods to override values in code:
//!
//! ```ignore
//! let config = PlexusConfig::default()
//!     .with_node_count(300)
//!     .with_connection_distance(0.6)
//!     .with_seed(7);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlexusConfig {
    pub network: NetworkConfig,
    pub visuals: VisualConfig,
    pub camera: CameraConfig,
    /// Seconds the animation clock advances per frame.
    pub time_step: f32,
}

impl Default for PlexusConfig {
    fn default() -> Self {
        Self {
            network: NetworkConfig::default(),
            visuals: VisualConfig::default(),
            camera: CameraConfig::default(),
            time_step: 1.0 / 60.0,
        }
    }
}

impl PlexusConfig {
    /// Read a JSON configuration file and validate it.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Parse a JSON configuration string and validate it.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every precondition of network construction.
    ///
    /// Negative node counts cannot be expressed (`usize`), and the JSON
    /// parser rejects them before this point.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.network.validate()?;
        if !(self.time_step.is_finite() && self.time_step > 0.0) {
            return Err(ConfigError::InvalidTimeStep(self.time_step));
        }
        Ok(())
    }

    /// Set the number of points.
    pub fn with_node_count(mut self, count: usize) -> Self {
        self.network.node_count = count;
        self
    }

    /// Set the bounding cube half-extent.
    pub fn with_bounds(mut self, bounds: f32) -> Self {
        self.network.bounds = bounds;
        self
    }

    /// Set the distance below which points may be linked.
    pub fn with_connection_distance(mut self, distance: f32) -> Self {
        self.network.connection_distance = distance;
        self
    }

    /// Set the probability that an eligible pair is linked.
    pub fn with_connection_probability(mut self, probability: f32) -> Self {
        self.network.connection_probability = probability;
        self
    }

    /// Set the per-axis velocity range.
    pub fn with_max_speed(mut self, speed: f32) -> Self {
        self.network.max_speed = speed;
        self
    }

    /// Fix the random seed for reproducible layouts.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.network.seed = Some(seed);
        self
    }
}

/// Shape of the point cloud and how its links are formed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Number of points, fixed for the lifetime of the network.
    pub node_count: usize,
    /// Half-extent of the bounding cube. Points spawn inside `[-bounds, bounds]`
    /// on every axis and bounce when they leave it.
    pub bounds: f32,
    /// Pairs closer than this at spawn time are candidates for a link.
    /// Also the distance at which a link fades out completely.
    pub connection_distance: f32,
    /// Chance that a candidate pair is actually linked.
    pub connection_probability: f32,
    /// Velocity components are drawn uniformly from `[-max_speed, max_speed)`.
    pub max_speed: f32,
    /// Seed for the random source. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            node_count: 150,
            bounds: 2.0,
            connection_distance: 0.8,
            connection_probability: 0.3,
            max_speed: 0.001,
            seed: None,
        }
    }
}

impl NetworkConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let p = self.connection_probability;
        if !(0.0..=1.0).contains(&p) {
            return Err(ConfigError::ProbabilityOutOfRange(p));
        }
        if !(self.bounds.is_finite() && self.bounds > 0.0) {
            return Err(ConfigError::InvalidBounds(self.bounds));
        }
        if !(self.connection_distance.is_finite() && self.connection_distance >= 0.0) {
            return Err(ConfigError::InvalidDistance(self.connection_distance));
        }
        if !(self.max_speed.is_finite() && self.max_speed >= 0.0) {
            return Err(ConfigError::InvalidSpeed(self.max_speed));
        }
        // Positions never leave [-(bounds + max_speed), bounds + max_speed].
        if self.max_speed > self.bounds || !(self.bounds + self.max_speed).is_finite() {
            return Err(ConfigError::SpeedExceedsBounds {
                speed: self.max_speed,
                bounds: self.bounds,
            });
        }
        Ok(())
    }
}

/// Rendering attributes: colors, pulse and link opacity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualConfig {
    /// Angular rate of the size pulse, radians per second of animation time.
    pub pulse_rate: f32,
    /// Peak relative size change of the pulse.
    pub pulse_amplitude: f32,
    /// Opacity of a link whose endpoints coincide.
    pub base_opacity: f32,
    /// World-space radius of a point at scale 1.
    pub node_radius: f32,
    /// Lowest hue of a point (0..1 turns).
    pub hue_base: f32,
    /// Width of the hue band above `hue_base`.
    pub hue_range: f32,
    /// Lowest HSL lightness of a point.
    pub lightness_base: f32,
    /// Width of the lightness band above `lightness_base`.
    pub lightness_range: f32,
    /// Link color as `0xRRGGBB`.
    pub line_color: u32,
    /// Clear color as `0xRRGGBB`.
    pub background: u32,
}

impl Default for VisualConfig {
    fn default() -> Self {
        Self {
            pulse_rate: 1.0,
            pulse_amplitude: 0.2,
            base_opacity: 0.3,
            node_radius: 0.02,
            hue_base: 0.5,
            hue_range: 0.2,
            lightness_base: 0.5,
            lightness_range: 0.3,
            line_color: 0x00f5d4,
            background: 0x0a0a0a,
        }
    }
}

/// Perspective and drift of the camera.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    /// Distance from the origin along z.
    pub distance: f32,
    /// Radius of the x/y drift circle.
    pub drift_radius: f32,
    /// Angular rate of the drift, radians per wall-clock second.
    pub drift_rate: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
            distance: 3.0,
            drift_radius: 0.5,
            drift_rate: 0.1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = PlexusConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.network.node_count, 150);
        assert_eq!(config.network.bounds, 2.0);
        assert_eq!(config.network.connection_distance, 0.8);
        assert_eq!(config.network.connection_probability, 0.3);
    }

    #[test]
    fn test_probability_bounds_are_inclusive() {
        for p in [0.0, 0.5, 1.0] {
            let config = PlexusConfig::default().with_connection_probability(p);
            assert!(config.validate().is_ok(), "p = {p} should be accepted");
        }
    }

    #[test]
    fn test_probability_out_of_range_rejected() {
        for p in [-0.1, 1.01, f32::NAN] {
            let config = PlexusConfig::default().with_connection_probability(p);
            assert!(matches!(
                config.validate(),
                Err(ConfigError::ProbabilityOutOfRange(_))
            ));
        }
    }

    #[test]
    fn test_non_positive_bounds_rejected() {
        let config = PlexusConfig::default().with_bounds(0.0);
        assert!(matches!(config.validate(), Err(ConfigError::InvalidBounds(_))));

        let config = PlexusConfig::default().with_bounds(f32::INFINITY);
        assert!(matches!(config.validate(), Err(ConfigError::InvalidBounds(_))));
    }

    #[test]
    fn test_speed_must_fit_inside_bounds() {
        let config = PlexusConfig::default().with_bounds(1.0).with_max_speed(1.0);
        assert!(config.validate().is_ok());

        let config = PlexusConfig::default().with_bounds(1.0).with_max_speed(1.5);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::SpeedExceedsBounds { .. })
        ));

        let config = PlexusConfig::default().with_bounds(3e38).with_max_speed(3e38);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::SpeedExceedsBounds { .. })
        ));
    }

    #[test]
    fn test_zero_distance_allowed_negative_rejected() {
        let config = PlexusConfig::default().with_connection_distance(0.0);
        assert!(config.validate().is_ok());

        let config = PlexusConfig::default().with_connection_distance(-1.0);
        assert!(matches!(config.validate(), Err(ConfigError::InvalidDistance(_))));
    }

    #[test]
    fn test_bad_time_step_rejected() {
        let config = PlexusConfig {
            time_step: 0.0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidTimeStep(_))));
    }

    #[test]
    fn test_empty_json_uses_defaults() {
        let config = PlexusConfig::from_json("{}").unwrap();
        assert_eq!(config, PlexusConfig::default());
    }

    #[test]
    fn test_partial_json_overrides() {
        let config = PlexusConfig::from_json(
            r#"{ "network": { "node_count": 12, "seed": 99 }, "visuals": { "base_opacity": 0.5 } }"#,
        )
        .unwrap();
        assert_eq!(config.network.node_count, 12);
        assert_eq!(config.network.seed, Some(99));
        assert_eq!(config.network.bounds, 2.0);
        assert_eq!(config.visuals.base_opacity, 0.5);
    }

    #[test]
    fn test_negative_node_count_rejected_by_parser() {
        let err = PlexusConfig::from_json(r#"{ "network": { "node_count": -5 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_invalid_json_values_rejected_after_parse() {
        let err =
            PlexusConfig::from_json(r#"{ "network": { "connection_probability": 2.0 } }"#)
                .unwrap_err();
        assert!(matches!(err, ConfigError::ProbabilityOutOfRange(p) if p == 2.0));
    }
}
