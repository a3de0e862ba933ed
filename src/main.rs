use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use plexus::prelude::*;

/// Animated particle network.
#[derive(Debug, Parser)]
#[command(name = "plexus", version, about)]
struct Cli {
    /// JSON configuration file; missing fields take their defaults.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of points (overrides the config file).
    #[arg(short, long)]
    nodes: Option<usize>,

    /// Random seed for a reproducible network.
    #[arg(short, long)]
    seed: Option<u64>,

    /// Run without a window and print network stats at the end.
    #[arg(long)]
    headless: bool,

    /// Frames to run in headless mode.
    #[arg(long, default_value_t = 600)]
    frames: u64,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("plexus=info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => PlexusConfig::load(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => PlexusConfig::default(),
    };
    if let Some(nodes) = cli.nodes {
        config = config.with_node_count(nodes);
    }
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }
    config.validate()?;

    if cli.headless {
        run_headless(&config, cli.frames)
    } else {
        plexus::window::run(config)?;
        Ok(())
    }
}

fn run_headless(config: &PlexusConfig, frames: u64) -> anyhow::Result<()> {
    let mut rng = rng_from_seed(config.network.seed);
    let animator = Animator::init(config, &mut rng, NullRenderer::new())?;
    let mut frame_loop = FrameLoop::new(animator);

    let ran = match frame_loop.run_frames(frames) {
        Ok(ran) => ran,
        Err(never) => match never {},
    };
    println!("{} frames: {}", ran, frame_loop.animator().network().stats());

    frame_loop.teardown();
    Ok(())
}
