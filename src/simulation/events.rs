//! Discrete gameplay events
//!
//! Collected during a tick and returned to the caller. Audio and UI layers
//! react to them; the simulation never waits on a listener.

use serde::Serialize;

use crate::combat::projectile::ProjectileKind;
use crate::core::types::{EntityId, Tick};

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GameOutcome {
    /// Every hostile unit is dead
    Victory,
    /// Every human player is dead
    Defeat,
    /// Both sides died on the same tick
    Draw,
}

/// Events generated during a simulation tick
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum GameEvent {
    /// A projectile was launched
    ProjectileFired {
        shooter: EntityId,
        kind: ProjectileKind,
    },
    /// Damage landed, by melee or projectile
    Hit {
        attacker: EntityId,
        target: EntityId,
        amount: f32,
    },
    /// hp restored (amount after clamping to max hp)
    Healed {
        healer: EntityId,
        target: EntityId,
        amount: f32,
    },
    /// An entity's hp dropped to zero or below
    Killed { entity: EntityId },
    /// Emitted once, on the tick the session ends
    SessionEnded {
        tick: Tick,
        outcome: GameOutcome,
        coins: u32,
    },
}

/// Fire-and-forget listener for gameplay events (sound effects and the like)
pub trait AudioSink {
    fn notify(&mut self, event: &GameEvent);
}

impl<F: FnMut(&GameEvent)> AudioSink for F {
    fn notify(&mut self, event: &GameEvent) {
        self(event)
    }
}
