//! Fixed-rate playback of a scene
//!
//! The driver is the host side of the tween contract: it owns the clock,
//! calls `update` once per frame and reads the values back.

use std::io::Write;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use glide_animation::TweenContext;

use crate::config::SceneConfig;

/// Outcome of one playback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Playback {
    /// Frames written, including frame zero
    pub frames: usize,
    /// Whether every tween settled before `max_frames`
    pub settled: bool,
}

/// Register every tween of `scene` in a fresh context, armed at `start`
pub fn load_scene(scene: &SceneConfig, start: Instant) -> TweenContext {
    let mut ctx = TweenContext::with_config(scene.defaults.clone());
    for entry in &scene.tweens {
        ctx.get_or_create(&entry.name).jump_to(entry.from);
        let config = entry.config(&scene.defaults);
        ctx.animate_at(start, &entry.name, entry.to, config);
    }
    ctx
}

/// Play `scene` at `fps`, writing one line per frame to `out`.
///
/// Frame `n` is sampled at `start + n / fps`. With `realtime` the loop sleeps
/// until each frame is due; otherwise it runs as fast as it can.
pub fn play(scene: &SceneConfig, fps: f64, realtime: bool, out: &mut impl Write) -> Result<Playback> {
    anyhow::ensure!(fps.is_finite() && fps > 0.0, "fps must be positive, got {fps}");

    let start = Instant::now();
    let mut ctx = load_scene(scene, start);
    tracing::info!(tweens = ctx.len(), fps, "playing scene");

    for frame in 0..=scene.player.max_frames {
        let offset = Duration::try_from_secs_f64(frame as f64 / fps)
            .with_context(|| format!("frame {frame} at {fps} fps is out of range"))?;
        let now = start
            .checked_add(offset)
            .with_context(|| format!("frame {frame} at {fps} fps is out of range"))?;
        if realtime {
            if let Some(wait) = now.checked_duration_since(Instant::now()) {
                thread::sleep(wait);
            }
        }

        let alive = ctx.update_at(now);
        write_frame(out, frame, offset, &ctx)?;

        if !alive {
            tracing::debug!(frame, "all tweens settled");
            return Ok(Playback {
                frames: frame + 1,
                settled: true,
            });
        }
    }

    tracing::warn!(max_frames = scene.player.max_frames, "stopped before every tween settled");
    Ok(Playback {
        frames: scene.player.max_frames + 1,
        settled: false,
    })
}

fn write_frame(out: &mut impl Write, frame: usize, offset: Duration, ctx: &TweenContext) -> Result<()> {
    write!(out, "{frame:>5} {:>8.1}ms", offset.as_secs_f64() * 1000.0)?;
    for (name, tween) in ctx.iter() {
        write!(out, " {name}={:.4}", tween.value())?;
    }
    writeln!(out)?;
    Ok(())
}
