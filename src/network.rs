//! The particle network: points drifting in a cube, joined by static links.
//!
//! A [`Network`] is built once, either randomly with [`Network::generate`] or
//! from an explicit layout with [`Network::from_parts`]. After that the set of
//! points and the set of links never change; [`Network::update`] only moves
//! the points and refreshes the derived visual attributes.
//!
//! # Per-frame rule
//!
//! ```text
//! position += velocity
//! if |position.axis| > bounds { velocity.axis = -velocity.axis }   // no clamp
//! scale    = 1 + sin(time * pulse_rate + index) * pulse_amplitude
//! opacity  = max(0, 1 - distance / connection_distance) * base_opacity
//! ```
//!
//! The bounce only flips the sign of the velocity. A point may sit just
//! outside the cube for a frame before it turns around.

use std::collections::HashSet;
use std::fmt;

use rand::Rng;

use crate::config::PlexusConfig;
use crate::error::ConfigError;
use crate::spawn::SpawnContext;
use crate::Vec3;

/// One animated particle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub position: Vec3,
    pub velocity: Vec3,
    /// Size multiplier from the pulse, recomputed every frame.
    pub scale: f32,
    /// RGB in 0..1, fixed at creation.
    pub color: Vec3,
}

impl Point {
    pub fn new(position: Vec3, velocity: Vec3, color: Vec3) -> Self {
        Self {
            position,
            velocity,
            scale: 1.0,
            color,
        }
    }
}

/// A link between two points, identified by the ordered pair `a < b`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Connection {
    a: usize,
    b: usize,
    /// Line opacity derived from the current endpoint distance.
    pub opacity: f32,
}

impl Connection {
    /// Index of the lower endpoint.
    #[inline]
    pub fn a(&self) -> usize {
        self.a
    }

    /// Index of the higher endpoint.
    #[inline]
    pub fn b(&self) -> usize {
        self.b
    }
}

/// Opacity of a link whose endpoints are `distance` apart.
///
/// Falls linearly from `base_opacity` at distance 0 to 0 at `max_distance`
/// and stays 0 beyond it. A non-positive `max_distance` always yields 0.
#[inline]
pub fn link_opacity(distance: f32, max_distance: f32, base_opacity: f32) -> f32 {
    if max_distance <= 0.0 {
        return 0.0;
    }
    (1.0 - distance / max_distance).max(0.0) * base_opacity
}

/// Flip each velocity component whose position component lies outside
/// `[-bounds, bounds]`. The position itself is left alone.
#[inline]
pub fn bounce(point: &mut Point, bounds: f32) {
    let outside = point.position.abs().cmpgt(Vec3::splat(bounds));
    point.velocity = Vec3::select(outside, -point.velocity, point.velocity);
}

/// Constants of the per-frame rule, copied out of the configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Rule {
    bounds: f32,
    connection_distance: f32,
    pulse_rate: f32,
    pulse_amplitude: f32,
    base_opacity: f32,
}

impl Rule {
    fn from_config(config: &PlexusConfig) -> Self {
        Self {
            bounds: config.network.bounds,
            connection_distance: config.network.connection_distance,
            pulse_rate: config.visuals.pulse_rate,
            pulse_amplitude: config.visuals.pulse_amplitude,
            base_opacity: config.visuals.base_opacity,
        }
    }
}

/// Fixed set of points and links, plus the rule that animates them.
#[derive(Debug, Clone)]
pub struct Network {
    points: Vec<Point>,
    connections: Vec<Connection>,
    rule: Rule,
}

impl Network {
    /// Spawn `node_count` random points and link nearby pairs.
    ///
    /// Each point draws its color, then its position, then its velocity from
    /// `rng`. Every pair `i < j` closer than `connection_distance` then draws
    /// once more and is linked when that draw falls below
    /// `connection_probability`. Pairs that are too far apart consume no draw.
    pub fn generate<R: Rng>(config: &PlexusConfig, rng: &mut R) -> Result<Self, ConfigError> {
        config.validate()?;

        let count = config.network.node_count;
        let max_distance = config.network.connection_distance;
        let mut ctx = SpawnContext::new(rng, &config.network, &config.visuals);

        let points: Vec<Point> = (0..count)
            .map(|_| {
                let color = ctx.color();
                let position = ctx.position();
                let velocity = ctx.velocity();
                Point::new(position, velocity, color)
            })
            .collect();

        let mut connections = Vec::new();
        for i in 0..count {
            for j in (i + 1)..count {
                let distance = points[i].position.distance(points[j].position);
                if distance < max_distance && ctx.link_gate() {
                    connections.push(Connection {
                        a: i,
                        b: j,
                        opacity: 0.0,
                    });
                }
            }
        }

        let mut network = Self {
            points,
            connections,
            rule: Rule::from_config(config),
        };
        network.refresh_opacity();

        tracing::debug!(
            points = network.points.len(),
            connections = network.connections.len(),
            "generated network"
        );
        Ok(network)
    }

    /// Build a network from an explicit layout.
    ///
    /// Each link may be given in either order and is stored as `(min, max)`.
    /// Points must have finite positions and velocities. Links must name two
    /// distinct existing points, and each pair may appear only once.
    pub fn from_parts(
        points: Vec<Point>,
        links: impl IntoIterator<Item = (usize, usize)>,
        config: &PlexusConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        if let Some(index) = points
            .iter()
            .position(|p| !(p.position.is_finite() && p.velocity.is_finite()))
        {
            return Err(ConfigError::NonFinitePoint(index));
        }

        let len = points.len();
        let mut seen = HashSet::new();
        let mut connections = Vec::new();
        for (i, j) in links {
            if i >= len || j >= len {
                return Err(ConfigError::ConnectionOutOfRange { a: i, b: j, len });
            }
            if i == j {
                return Err(ConfigError::SelfConnection(i));
            }
            let (a, b) = (i.min(j), i.max(j));
            if !seen.insert((a, b)) {
                return Err(ConfigError::DuplicateConnection { a, b });
            }
            connections.push(Connection { a, b, opacity: 0.0 });
        }

        let mut network = Self {
            points,
            connections,
            rule: Rule::from_config(config),
        };
        network.refresh_opacity();
        Ok(network)
    }

    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    #[inline]
    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Half-extent of the bounding cube.
    #[inline]
    pub fn bounds(&self) -> f32 {
        self.rule.bounds
    }

    /// Whether `config` describes the same per-frame rule this network was
    /// built with.
    pub fn matches_config(&self, config: &PlexusConfig) -> bool {
        self.rule == Rule::from_config(config)
    }

    /// Current endpoint positions of a link.
    #[inline]
    pub fn endpoints(&self, connection: &Connection) -> (Vec3, Vec3) {
        (
            self.points[connection.a].position,
            self.points[connection.b].position,
        )
    }

    /// Advance one frame. `time` is the animation clock in seconds and only
    /// drives the pulse.
    pub fn update(&mut self, time: f32) {
        let rule = self.rule;
        for (index, point) in self.points.iter_mut().enumerate() {
            point.position += point.velocity;
            bounce(point, rule.bounds);
            point.scale = 1.0 + (time * rule.pulse_rate + index as f32).sin() * rule.pulse_amplitude;
        }
        self.refresh_opacity();
    }

    fn refresh_opacity(&mut self) {
        let rule = self.rule;
        for connection in &mut self.connections {
            let distance = self.points[connection.a]
                .position
                .distance(self.points[connection.b].position);
            connection.opacity =
                link_opacity(distance, rule.connection_distance, rule.base_opacity);
        }
    }

    /// Summary of the current state.
    pub fn stats(&self) -> NetworkStats {
        let (sum, max) = self
            .connections
            .iter()
            .fold((0.0_f32, 0.0_f32), |(sum, max), c| (sum + c.opacity, max.max(c.opacity)));
        let mean_opacity = if self.connections.is_empty() {
            0.0
        } else {
            sum / self.connections.len() as f32
        };
        let max_excursion = self
            .points
            .iter()
            .map(|p| (p.position.abs().max_element() - self.rule.bounds).max(0.0))
            .fold(0.0_f32, f32::max);

        NetworkStats {
            points: self.points.len(),
            connections: self.connections.len(),
            mean_opacity,
            max_opacity: max,
            max_excursion,
        }
    }
}

/// Snapshot of network-wide figures, for logs and the headless runner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NetworkStats {
    pub points: usize,
    pub connections: usize,
    pub mean_opacity: f32,
    pub max_opacity: f32,
    /// How far the furthest point currently sits outside the cube.
    pub max_excursion: f32,
}

impl fmt::Display for NetworkStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} points, {} connections, opacity mean {:.4} max {:.4}, max excursion {:.5}",
            self.points, self.connections, self.mean_opacity, self.max_opacity, self.max_excursion
        )
    }
}
