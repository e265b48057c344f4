//! Named tween registry
//!
//! Groups many tweens under string names with shared defaults. Names are
//! compared exactly: `"Opacity"` and `"opacity"` are two tweens.

use std::time::Instant;

use indexmap::map::Entry;
use indexmap::IndexMap;

use crate::tween::{Tween, TweenConfig};

/// Insertion-ordered `name -> Tween` map with default configuration
#[derive(Clone, Debug, Default)]
pub struct TweenContext {
    tweens: IndexMap<String, Tween>,
    defaults: TweenConfig,
}

impl TweenContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with `defaults` instead of the one second linear default
    pub fn with_config(defaults: TweenConfig) -> Self {
        Self {
            tweens: IndexMap::new(),
            defaults,
        }
    }

    pub fn defaults(&self) -> &TweenConfig {
        &self.defaults
    }

    pub fn set_defaults(&mut self, defaults: TweenConfig) {
        self.defaults = defaults;
    }

    /// The tween registered under `name`, created at rest on 0 if missing
    pub fn get_or_create(&mut self, name: &str) -> &mut Tween {
        match self.tweens.entry(name.to_string()) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                tracing::trace!(name, "registering tween");
                entry.insert(Tween::default())
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&Tween> {
        self.tweens.get(name)
    }

    /// Last updated value of `name`
    pub fn value(&self, name: &str) -> Option<f64> {
        self.tweens.get(name).map(Tween::value)
    }

    pub fn animate(&mut self, name: &str, value: f64, config: TweenConfig) -> bool {
        self.animate_at(Instant::now(), name, value, config)
    }

    /// Make `config` the new defaults, then animate `name` with it
    pub fn animate_at(&mut self, now: Instant, name: &str, value: f64, config: TweenConfig) -> bool {
        self.defaults = config.clone();
        self.get_or_create(name).animate_at(now, value, config)
    }

    /// Animate `name` with the current defaults
    pub fn set(&mut self, name: &str, value: f64) -> bool {
        self.set_at(Instant::now(), name, value)
    }

    pub fn set_at(&mut self, now: Instant, name: &str, value: f64) -> bool {
        let config = self.defaults.clone();
        self.get_or_create(name).animate_at(now, value, config)
    }

    /// Install `defaults` and run a batch of [`TweenContext::set`] calls under them
    pub fn with_defaults<F>(&mut self, defaults: TweenConfig, batch: F)
    where
        F: FnOnce(&mut Self),
    {
        self.defaults = defaults;
        batch(self);
    }

    /// Update every tween. Returns whether any is still active.
    pub fn update(&mut self) -> bool {
        self.update_at(Instant::now())
    }

    pub fn update_at(&mut self, now: Instant) -> bool {
        self.tweens
            .values_mut()
            .fold(false, |alive, tween| tween.update_at(now) | alive)
    }

    pub fn has_active_at(&self, now: Instant) -> bool {
        self.tweens.values().any(|tween| tween.is_alive_at(now))
    }

    pub fn remove(&mut self, name: &str) -> Option<Tween> {
        self.tweens.shift_remove(name)
    }

    pub fn clear(&mut self) {
        self.tweens.clear();
    }

    pub fn len(&self) -> usize {
        self.tweens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tweens.is_empty()
    }

    /// Tweens in registration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Tween)> {
        self.tweens.iter().map(|(name, tween)| (name.as_str(), tween))
    }
}
