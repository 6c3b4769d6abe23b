//! In-flight projectiles

use serde::{Deserialize, Serialize};

use crate::core::config::ProjectileConfig;
use crate::core::types::{EntityId, Faction, Vec2};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectileKind {
    /// Bullet from the gunner or an ally archer's bolt
    Damage,
    /// Heals friendly units it reaches
    Heal,
    /// Player archer arrow; wider hit radius than `Damage`
    Arrow,
}

impl ProjectileKind {
    /// Distance at which this kind connects with a recipient
    pub fn hit_radius(&self, config: &ProjectileConfig) -> f32 {
        match self {
            ProjectileKind::Damage => config.damage_hit_radius,
            ProjectileKind::Arrow => config.arrow_hit_radius,
            ProjectileKind::Heal => config.heal_hit_radius,
        }
    }

    pub fn heals(&self) -> bool {
        matches!(self, ProjectileKind::Heal)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub position: Vec2,
    /// Unit direction of travel
    pub direction: Vec2,
    pub speed: f32,
    /// Damage dealt or hp restored
    pub payload: f32,
    pub kind: ProjectileKind,
    pub shooter: EntityId,
    /// Faction of the shooter; decides who can be hit
    pub source: Faction,
    /// Bound recipient for direct-target projectiles, `None` for area ones
    pub target: Option<EntityId>,
}

impl Projectile {
    /// An area projectile resolved against whoever it reaches first
    pub fn area(
        shooter: EntityId,
        source: Faction,
        kind: ProjectileKind,
        position: Vec2,
        direction: Vec2,
        speed: f32,
        payload: f32,
    ) -> Self {
        Self {
            position,
            direction: direction.normalize_or_zero(),
            speed,
            payload,
            kind,
            shooter,
            source,
            target: None,
        }
    }

    /// A direct-target projectile that can only hit `target`
    #[allow(clippy::too_many_arguments)]
    pub fn direct(
        shooter: EntityId,
        source: Faction,
        kind: ProjectileKind,
        position: Vec2,
        direction: Vec2,
        speed: f32,
        payload: f32,
        target: EntityId,
    ) -> Self {
        Self {
            target: Some(target),
            ..Self::area(shooter, source, kind, position, direction, speed, payload)
        }
    }

    /// Move one tick along the direction of travel
    pub fn advance(&mut self) {
        self.position += self.direction * self.speed;
    }
}
