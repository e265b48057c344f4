//! Scene file handling

use anyhow::{Context, Result};
use glide_animation::{Easing, TweenConfig};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Top-level scene description (scene.toml)
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SceneConfig {
    /// Registry defaults applied to every tween
    #[serde(default)]
    pub defaults: TweenConfig,
    #[serde(default)]
    pub player: PlayerConfig,
    #[serde(default, rename = "tween")]
    pub tweens: Vec<TweenEntry>,
}

/// Playback settings
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlayerConfig {
    /// Frames per second of the fixed-rate loop
    #[serde(default = "default_fps")]
    pub fps: f64,
    /// Hard stop, even if tweens are still running
    #[serde(default = "default_max_frames")]
    pub max_frames: usize,
}

fn default_fps() -> f64 {
    60.0
}

fn default_max_frames() -> usize {
    600
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            fps: default_fps(),
            max_frames: default_max_frames(),
        }
    }
}

/// One named tween; unset fields fall back to `[defaults]`
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TweenEntry {
    pub name: String,
    #[serde(default)]
    pub from: f64,
    pub to: f64,
    #[serde(default)]
    pub duration_ms: Option<u64>,
    #[serde(default)]
    pub easing: Option<Easing>,
    #[serde(default)]
    pub delay_ms: Option<u64>,
}

impl TweenEntry {
    /// Merge this entry's overrides onto `defaults`
    pub fn config(&self, defaults: &TweenConfig) -> TweenConfig {
        let mut config = defaults.clone();
        if let Some(ms) = self.duration_ms {
            config.duration = Duration::from_millis(ms);
        }
        if let Some(easing) = &self.easing {
            config.easing = easing.clone();
        }
        if let Some(ms) = self.delay_ms {
            config.delay = Duration::from_millis(ms);
        }
        config
    }
}

impl SceneConfig {
    /// Load a scene from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            anyhow::bail!("No scene file found at {}", path.display());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        Self::from_toml(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let scene: SceneConfig = toml::from_str(content)?;
        scene.validate()?;
        Ok(scene)
    }

    fn validate(&self) -> Result<()> {
        anyhow::ensure!(
            self.player.fps.is_finite() && self.player.fps > 0.0,
            "player.fps must be a positive number, got {}",
            self.player.fps
        );
        for entry in &self.tweens {
            anyhow::ensure!(!entry.name.is_empty(), "tween names must not be empty");
            anyhow::ensure!(
                entry.from.is_finite() && entry.to.is_finite(),
                "tween `{}` has a non-finite endpoint",
                entry.name
            );
        }
        Ok(())
    }
}
