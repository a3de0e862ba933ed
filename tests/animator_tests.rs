//! Integration tests for the animator lifecycle.
//!
//! These drive whole frames through a recording renderer and check what the
//! renderer was handed, rather than poking at network internals.

use std::io::Write;
use std::thread;

use plexus::prelude::*;
use plexus::ConfigError;

/// What a renderer saw for one frame.
#[derive(Debug, Clone)]
struct FrameRecord {
    index: u64,
    time: f32,
    points: usize,
    opacities: Vec<f32>,
    camera_position: Vec3,
}

/// Renderer that keeps every frame it was given.
#[derive(Default)]
struct RecordingRenderer {
    frames: Vec<FrameRecord>,
    viewport: Option<(u32, u32)>,
    aspect: Option<f32>,
    /// Refuse to draw once this many frames have been recorded.
    fail_after: Option<usize>,
}

impl Renderer for RecordingRenderer {
    type Error = String;

    fn render(&mut self, frame: &Frame<'_>) -> Result<(), Self::Error> {
        if self.fail_after == Some(self.frames.len()) {
            return Err(format!("surface lost at frame {}", frame.index));
        }
        self.frames.push(FrameRecord {
            index: frame.index,
            time: frame.time,
            points: frame.points().len(),
            opacities: frame.segments().map(|s| s.opacity).collect(),
            camera_position: frame.camera_position,
        });
        Ok(())
    }

    fn set_viewport_size(&mut self, width: u32, height: u32) {
        self.viewport = Some((width, height));
    }

    fn set_aspect_ratio(&mut self, ratio: f32) {
        self.aspect = Some(ratio);
    }
}

const NO_LINKS: [(usize, usize); 0] = [];

fn still(x: f32, y: f32, z: f32) -> Point {
    Point::new(Vec3::new(x, y, z), Vec3::ZERO, Vec3::ONE)
}

// ============================================================================
// End-to-end frames
// ============================================================================

#[test]
fn test_two_still_points_keep_constant_opacity() {
    let config = PlexusConfig::default()
        .with_connection_distance(10.0)
        .with_connection_probability(1.0);
    let network = Network::from_parts(
        vec![still(0.0, 0.0, 0.0), still(1.0, 0.0, 0.0)],
        [(0, 1)],
        &config,
    )
    .unwrap();

    let animator = Animator::with_network(network, &config, RecordingRenderer::default()).unwrap();
    let mut frames = FrameLoop::new(animator);
    assert_eq!(frames.run_frames(240).unwrap(), 240);

    let renderer = frames.teardown();
    assert_eq!(renderer.frames.len(), 240);
    for record in &renderer.frames {
        assert_eq!(record.opacities.len(), 1);
        assert!((record.opacities[0] - 0.27).abs() < 1e-6);
    }
}

#[test]
fn test_empty_network_renders_empty_frames() {
    let config = PlexusConfig::default().with_node_count(0);
    let mut rng = StdRng::seed_from_u64(1);
    let mut animator = Animator::init(&config, &mut rng, RecordingRenderer::default()).unwrap();

    animator.resize(800, 600);
    animator.frame().unwrap();
    animator.frame().unwrap();

    let renderer = animator.teardown();
    assert_eq!(renderer.frames.len(), 2);
    assert!(renderer.frames.iter().all(|f| f.points == 0 && f.opacities.is_empty()));
}

#[test]
fn test_frames_carry_index_and_fixed_step_time() {
    let config = PlexusConfig::default().with_node_count(10);
    let mut rng = StdRng::seed_from_u64(2);
    let animator = Animator::init(&config, &mut rng, RecordingRenderer::default()).unwrap();
    let mut frames = FrameLoop::new(animator);
    frames.run_frames(5).unwrap();

    let renderer = frames.teardown();
    for (i, record) in renderer.frames.iter().enumerate() {
        assert_eq!(record.index, i as u64);
        assert!((record.time - i as f32 * config.time_step).abs() < 1e-6);
        assert_eq!(record.points, 10);
    }
}

#[test]
fn test_camera_stays_on_drift_circle() {
    let config = PlexusConfig::default().with_node_count(5);
    let mut rng = StdRng::seed_from_u64(3);
    let mut animator = Animator::init(&config, &mut rng, RecordingRenderer::default()).unwrap();
    for _ in 0..10 {
        animator.frame().unwrap();
    }

    for record in &animator.renderer().frames {
        let p = record.camera_position;
        assert_eq!(p.z, config.camera.distance);
        let radius = Vec3::new(p.x, p.y, 0.0).length();
        assert!((radius - config.camera.drift_radius).abs() < 1e-5);
    }
}

#[test]
fn test_opacity_never_exceeds_base() {
    let config = PlexusConfig::default()
        .with_node_count(120)
        .with_max_speed(0.02)
        .with_seed(4);
    let mut rng = rng_from_seed(config.network.seed);
    let mut animator = Animator::init(&config, &mut rng, RecordingRenderer::default()).unwrap();
    for _ in 0..60 {
        animator.frame().unwrap();
    }

    let base = config.visuals.base_opacity;
    for record in &animator.renderer().frames {
        assert!(record.opacities.iter().all(|&o| (0.0..=base).contains(&o)));
    }
}

// ============================================================================
// Bounce
// ============================================================================

#[test]
fn test_point_past_bound_turns_back_on_one_axis() {
    let config = PlexusConfig::default().with_bounds(2.0);
    let start = Point::new(Vec3::new(2.0005, 0.5, -0.5), Vec3::new(0.001, 0.002, -0.003), Vec3::ONE);
    let mut network = Network::from_parts(vec![start], NO_LINKS, &config).unwrap();

    network.update(0.0);
    let point = network.points()[0];
    assert_eq!(point.velocity, Vec3::new(-0.001, 0.002, -0.003));
}

#[test]
fn test_point_inside_bound_never_turns() {
    let config = PlexusConfig::default().with_bounds(2.0);
    let velocity = Vec3::new(0.001, 0.001, -0.001);
    let start = Point::new(Vec3::new(1.0, -1.5, 0.3), velocity, Vec3::ONE);
    let mut network = Network::from_parts(vec![start], NO_LINKS, &config).unwrap();

    for frame in 0..100 {
        network.update(frame as f32 / 60.0);
        assert_eq!(network.points()[0].velocity, velocity);
    }
}

#[test]
fn test_points_stay_near_cube() {
    let config = PlexusConfig::default()
        .with_node_count(200)
        .with_max_speed(0.05)
        .with_seed(9);
    let mut rng = rng_from_seed(config.network.seed);
    let animator = Animator::init(&config, &mut rng, NullRenderer::new()).unwrap();
    let mut frames = FrameLoop::new(animator);
    frames.run_frames(1000).unwrap();

    // A point overshoots by at most one step before turning around.
    let stats = frames.animator().network().stats();
    assert!(stats.max_excursion <= config.network.max_speed + 1e-5);
}

// ============================================================================
// Generation
// ============================================================================

#[test]
fn test_same_seed_same_network() {
    let config = PlexusConfig::default().with_node_count(80).with_seed(1234);
    let a = Network::generate(&config, &mut rng_from_seed(config.network.seed)).unwrap();
    let b = Network::generate(&config, &mut rng_from_seed(config.network.seed)).unwrap();

    assert_eq!(a.points(), b.points());
    assert_eq!(a.connections(), b.connections());
}

#[test]
fn test_full_probability_links_every_close_pair() {
    let config = PlexusConfig::default()
        .with_node_count(60)
        .with_connection_probability(1.0);
    let mut rng = StdRng::seed_from_u64(77);
    let network = Network::generate(&config, &mut rng).unwrap();

    let points = network.points();
    let mut expected = Vec::new();
    for i in 0..points.len() {
        for j in (i + 1)..points.len() {
            if points[i].position.distance(points[j].position) < config.network.connection_distance {
                expected.push((i, j));
            }
        }
    }
    let actual: Vec<_> = network.connections().iter().map(|c| (c.a(), c.b())).collect();
    assert_eq!(actual, expected);
}

#[test]
fn test_zero_probability_links_nothing() {
    let config = PlexusConfig::default()
        .with_node_count(60)
        .with_connection_probability(0.0);
    let mut rng = StdRng::seed_from_u64(77);
    let network = Network::generate(&config, &mut rng).unwrap();
    assert!(network.connections().is_empty());
}

// ============================================================================
// Resize and cancellation
// ============================================================================

#[test]
fn test_resize_reaches_renderer() {
    let config = PlexusConfig::default().with_node_count(3);
    let mut rng = StdRng::seed_from_u64(5);
    let mut animator = Animator::init(&config, &mut rng, RecordingRenderer::default()).unwrap();

    animator.resize(1000, 500);
    animator.resize(0, 0);
    assert_eq!(animator.renderer().viewport, Some((1000, 500)));
    assert_eq!(animator.renderer().aspect, Some(2.0));
}

#[test]
fn test_cancel_from_another_thread() {
    let config = PlexusConfig::default().with_node_count(10);
    let mut rng = StdRng::seed_from_u64(6);
    let animator = Animator::init(&config, &mut rng, RecordingRenderer::default()).unwrap();
    let mut frames = FrameLoop::new(animator);
    frames.run_frames(3).unwrap();

    let token = frames.token();
    thread::spawn(move || token.cancel()).join().unwrap();

    assert_eq!(frames.tick().unwrap(), Tick::Cancelled);
    assert_eq!(frames.run_frames(10).unwrap(), 0);
    assert_eq!(frames.teardown().frames.len(), 3);
}

#[test]
fn test_renderer_error_surfaces_from_tick() {
    let config = PlexusConfig::default().with_node_count(10);
    let mut rng = StdRng::seed_from_u64(8);
    let renderer = RecordingRenderer {
        fail_after: Some(2),
        ..Default::default()
    };
    let animator = Animator::init(&config, &mut rng, renderer).unwrap();
    let mut frames = FrameLoop::new(animator);

    let err = frames.run_frames(5).unwrap_err();
    assert_eq!(err, "surface lost at frame 2");
    assert_eq!(frames.animator().renderer().frames.len(), 2);
}

// ============================================================================
// Configuration files
// ============================================================================

#[test]
fn test_load_config_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{ "network": {{ "node_count": 42, "seed": 5 }}, "visuals": {{ "base_opacity": 0.5 }} }}"#
    )
    .unwrap();

    let config = PlexusConfig::load(file.path()).unwrap();
    assert_eq!(config.network.node_count, 42);
    assert_eq!(config.network.seed, Some(5));
    assert_eq!(config.visuals.base_opacity, 0.5);
    assert_eq!(config.camera, CameraConfig::default());
}

#[test]
fn test_load_rejects_invalid_probability() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{ "network": {{ "connection_probability": 1.5 }} }}"#).unwrap();

    let err = PlexusConfig::load(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::ProbabilityOutOfRange(p) if p == 1.5));
}

#[test]
fn test_load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = PlexusConfig::load(dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
}

#[test]
fn test_load_rejects_negative_node_count() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{ "network": {{ "node_count": -3 }} }}"#).unwrap();

    let err = PlexusConfig::load(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}
