//! Timed status effects
//!
//! Every per-entity timer that runs independently of behavior lives here and
//! is advanced exactly once per tick by `advance_status`, before any unit
//! acts. Behavior code only reads these timers or restarts them.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::config::EnemyAiConfig;
use crate::entity::store::EntityStore;

/// A timer counting down to zero
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Countdown(u32);

impl Countdown {
    pub fn idle() -> Self {
        Self(0)
    }

    pub fn start(&mut self, ticks: u32) {
        self.0 = ticks;
    }

    pub fn advance(&mut self) {
        self.0 = self.0.saturating_sub(1);
    }

    pub fn is_running(&self) -> bool {
        self.0 > 0
    }

    pub fn remaining(&self) -> u32 {
        self.0
    }
}

/// Periodic slowdown
///
/// Toggles between normal and slowed each time its interval elapses. A new
/// interval is drawn from the configured range on every toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlowEffect {
    active: bool,
    elapsed: u32,
    interval: u32,
}

impl SlowEffect {
    pub fn new(rng: &mut impl Rng, min_interval: u32, max_interval: u32) -> Self {
        Self {
            active: false,
            elapsed: 0,
            interval: rng.gen_range(min_interval..=max_interval),
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn interval(&self) -> u32 {
        self.interval
    }

    /// Advance one tick; returns true if the effect toggled
    pub fn advance(&mut self, rng: &mut impl Rng, min_interval: u32, max_interval: u32) -> bool {
        self.elapsed += 1;
        if self.elapsed < self.interval {
            return false;
        }
        self.active = !self.active;
        self.elapsed = 0;
        self.interval = rng.gen_range(min_interval..=max_interval);
        true
    }
}

/// Advance every status timer of every living entity by one tick
pub fn advance_status(entities: &mut EntityStore, enemy_ai: &EnemyAiConfig, rng: &mut impl Rng) {
    for entity in entities.iter_mut().filter(|e| e.is_alive()) {
        if let Some(slow) = entity.slow.as_mut() {
            if slow.advance(rng, enemy_ai.slow_min_interval, enemy_ai.slow_max_interval) {
                tracing::trace!(
                    "{} slow {}",
                    entity.name,
                    if slow.is_active() { "on" } else { "off" }
                );
            }
        }
        if let Some(healing) = entity.healing.as_mut() {
            healing.effect.advance();
        }
        if let Some(shot) = entity.shot.as_mut() {
            shot.cooldown.advance();
        }
    }
}
