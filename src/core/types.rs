//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};

pub use glam::Vec2;

/// Index of an entity inside the session's entity store
///
/// Entities are never removed from the store during a session, so an id stays
/// valid until restart. Holding an id never keeps an entity alive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl EntityId {
    pub fn new(index: u32) -> Self {
        Self(index)
    }

    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

/// Frame counter (one tick per display refresh)
pub type Tick = u64;

/// Which side an entity fights for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Faction {
    /// Players and their allies
    Friendly,
    /// Enemy robots
    Hostile,
}

impl Faction {
    pub fn opponent(&self) -> Faction {
        match self {
            Faction::Friendly => Faction::Hostile,
            Faction::Hostile => Faction::Friendly,
        }
    }
}

/// Character archetype, shared by human-controlled and AI-controlled units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Generic shooter, the default single-player character
    Gunner,
    Archer,
    Healer,
    /// Enemy melee unit
    Robot,
}

impl Role {
    pub fn faction(&self) -> Faction {
        match self {
            Role::Robot => Faction::Hostile,
            _ => Faction::Friendly,
        }
    }
}

/// Perpendicular of a vector (rotated 90 degrees counter-clockwise in screen space)
pub fn perpendicular(v: Vec2) -> Vec2 {
    Vec2::new(-v.y, v.x)
}
