//! Animation scheduler
//!
//! Owns anonymous tweens behind generational handles and updates them together.
//! It keeps no clock: the host decides when to call [`AnimationScheduler::tick`].

use slotmap::{new_key_type, SlotMap};
use std::time::Instant;

use crate::tween::{Tween, TweenPhase};

new_key_type! {
    pub struct TweenId;
}

/// Collection of tweens ticked as a group
#[derive(Clone, Debug, Default)]
pub struct AnimationScheduler {
    tweens: SlotMap<TweenId, Tween>,
}

impl AnimationScheduler {
    pub fn new() -> Self {
        Self {
            tweens: SlotMap::with_key(),
        }
    }

    pub fn add(&mut self, tween: Tween) -> TweenId {
        self.tweens.insert(tween)
    }

    pub fn get(&self, id: TweenId) -> Option<&Tween> {
        self.tweens.get(id)
    }

    pub fn get_mut(&mut self, id: TweenId) -> Option<&mut Tween> {
        self.tweens.get_mut(id)
    }

    pub fn remove(&mut self, id: TweenId) -> Option<Tween> {
        self.tweens.remove(id)
    }

    /// Tick all tweens
    pub fn tick(&mut self) -> bool {
        self.tick_at(Instant::now())
    }

    /// Update every tween against one timestamp. Returns whether any is active.
    pub fn tick_at(&mut self, now: Instant) -> bool {
        self.tweens
            .values_mut()
            .fold(false, |alive, tween| tween.update_at(now) | alive)
    }

    /// Check if any animations are still active
    pub fn has_active_animations(&self) -> bool {
        self.has_active_animations_at(Instant::now())
    }

    pub fn has_active_animations_at(&self, now: Instant) -> bool {
        self.tweens.values().any(|tween| tween.is_alive_at(now))
    }

    /// Drop tweens that have reached their target. Idle tweens are kept.
    pub fn prune_settled_at(&mut self, now: Instant) -> usize {
        let before = self.tweens.len();
        self.tweens
            .retain(|_, tween| tween.phase_at(now) != TweenPhase::Settled);
        before - self.tweens.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (TweenId, &Tween)> {
        self.tweens.iter()
    }

    pub fn len(&self) -> usize {
        self.tweens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tweens.is_empty()
    }
}
