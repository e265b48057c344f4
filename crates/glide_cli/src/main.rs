//! glide - easing and tween playground
//!
//! Lists the named easing presets, samples any easing string, dumps bezier
//! sample tables and plays TOML tween scenes at a fixed frame rate.

mod config;
mod driver;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use glide_animation::{bezier_presets, presets, CubicBezier, Easing};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::SceneConfig;

#[derive(Parser)]
#[command(name = "glide")]
#[command(about = "Inspect easing curves and play tween scenes")]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the named easing presets
    Presets,

    /// Print `t, ease(t)` over a uniform grid
    Sample {
        /// Preset name, `bezier:<name>`, `cubic-bezier(x1,y1,x2,y2)` or `pow-in(n)`
        easing: String,

        /// Number of intervals between 0 and 1
        #[arg(short, long, default_value = "10")]
        steps: usize,
    },

    /// Print the sample table of a cubic bezier
    Table {
        /// Control points as `x1,y1,x2,y2`
        curve: String,

        /// Number of samples along the curve
        #[arg(short, long, default_value = "30")]
        points: usize,
    },

    /// Play a scene file until every tween settles
    Play {
        /// Path to the scene TOML file
        scene: PathBuf,

        /// Override the scene's frame rate
        #[arg(long)]
        fps: Option<f64>,

        /// Pace frames against the wall clock
        #[arg(long)]
        realtime: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| level.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(io::stderr))
        .init();

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Presets => cmd_presets(&mut out),
        Commands::Sample { easing, steps } => cmd_sample(&mut out, &easing, steps),
        Commands::Table { curve, points } => cmd_table(&mut out, &curve, points),
        Commands::Play {
            scene,
            fps,
            realtime,
        } => cmd_play(&mut out, &scene, fps, realtime),
    }
}

fn cmd_presets(out: &mut impl Write) -> Result<()> {
    for (name, _) in presets() {
        writeln!(out, "{name}")?;
    }
    writeln!(out)?;
    for (name, curve) in bezier_presets() {
        writeln!(out, "bezier:{name:<12} {curve}")?;
    }
    Ok(())
}

fn cmd_sample(out: &mut impl Write, easing: &str, steps: usize) -> Result<()> {
    anyhow::ensure!(steps > 0, "--steps must be at least 1");
    let easing: Easing = easing
        .parse()
        .with_context(|| format!("Invalid easing `{easing}`"))?;

    for i in 0..=steps {
        let t = i as f64 / steps as f64;
        writeln!(out, "{t:.4}, {:.6}", easing.ease(t))?;
    }
    Ok(())
}

fn cmd_table(out: &mut impl Write, curve: &str, points: usize) -> Result<()> {
    let parsed = CubicBezier::parse(curve).with_context(|| format!("Invalid curve `{curve}`"))?;
    let curve = CubicBezier::new(parsed.config().with_points_amount(points))?;

    for (i, sample) in curve.table().iter().enumerate() {
        writeln!(out, "{i:>4} {:.6} {:.6}", sample.x, sample.y)?;
    }
    Ok(())
}

fn cmd_play(out: &mut impl Write, path: &std::path::Path, fps: Option<f64>, realtime: bool) -> Result<()> {
    let scene = SceneConfig::load(path)?;
    let fps = fps.unwrap_or(scene.player.fps);

    let playback = driver::play(&scene, fps, realtime, out)?;
    tracing::info!(frames = playback.frames, settled = playback.settled, "done");
    Ok(())
}
