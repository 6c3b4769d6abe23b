//! Unit records: players, allies and enemies share one shape

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::combat::projectile::ProjectileKind;
use crate::core::config::{EnemyAiConfig, UnitConfig};
use crate::core::types::{EntityId, Faction, Role, Vec2};
use crate::entity::status::{Countdown, SlowEffect};
use crate::progression::StatModifiers;

/// Who decides what a unit does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Controller {
    /// Driven by input slot `slot`
    Human { slot: usize },
    Ai,
}

/// Melee/ranged attack state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CombatStats {
    pub damage: f32,
    pub attack_range: f32,
    /// Ticks the attack timer must reach before an attack lands
    pub attack_cooldown: u32,
    /// Counts up while attacking; reset to 0 on every attack
    pub attack_timer: u32,
}

/// Healing state for healer allies
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HealingStats {
    pub heal_amount: f32,
    pub heal_cooldown: u32,
    /// Counts up to `heal_cooldown`
    pub heal_timer: u32,
    /// Cosmetic glow shown after a heal
    pub effect: Countdown,
}

/// Shooting ability of a human-controlled unit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShotStats {
    pub kind: ProjectileKind,
    /// Damage or heal carried by each projectile
    pub payload: f32,
    pub cooldown_ticks: u32,
    pub cooldown: Countdown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub name: String,
    pub role: Role,
    pub faction: Faction,
    pub controller: Controller,
    /// World position (center of the bounding box)
    pub position: Vec2,
    /// Bounding box width and height
    pub size: Vec2,
    pub speed: f32,
    pub hp: f32,
    pub max_hp: f32,
    pub collision_radius: f32,
    /// AI allies stop approaching the camera inside this distance
    pub follow_distance: f32,
    pub combat: Option<CombatStats>,
    pub healing: Option<HealingStats>,
    pub shot: Option<ShotStats>,
    pub is_attacking: bool,
    pub slow: Option<SlowEffect>,
    /// Enemy target; a lookup key, never ownership
    pub current_target: Option<EntityId>,
    /// Ticks until the next target re-evaluation
    pub retarget_timer: u32,
}

impl Entity {
    fn base(id: EntityId, name: String, role: Role, spawn: Vec2, stats: &UnitConfig) -> Self {
        Self {
            id,
            name,
            role,
            faction: role.faction(),
            controller: Controller::Ai,
            position: spawn,
            size: Vec2::new(stats.width, stats.height),
            speed: stats.speed,
            hp: stats.max_hp,
            max_hp: stats.max_hp,
            collision_radius: stats.collision_radius,
            follow_distance: stats.follow_distance,
            combat: None,
            healing: None,
            shot: None,
            is_attacking: false,
            slow: None,
            current_target: None,
            retarget_timer: 0,
        }
    }

    /// A human-controlled unit with progression modifiers applied
    pub fn player(
        id: EntityId,
        slot: usize,
        role: Role,
        spawn: Vec2,
        stats: &UnitConfig,
        modifiers: &StatModifiers,
    ) -> Self {
        let name = format!("Player {} ({:?})", slot + 1, role);
        let mut entity = Self::base(id, name, role, spawn, stats);
        entity.controller = Controller::Human { slot };
        entity.speed *= modifiers.speed;
        entity.max_hp *= modifiers.max_hp;
        entity.hp = entity.max_hp;

        let (kind, payload) = match role {
            Role::Healer => (ProjectileKind::Heal, stats.heal_amount * modifiers.heal),
            Role::Archer => (ProjectileKind::Arrow, stats.damage * modifiers.damage),
            Role::Gunner | Role::Robot => (ProjectileKind::Damage, stats.damage * modifiers.damage),
        };
        entity.shot = Some(ShotStats {
            kind,
            payload,
            cooldown_ticks: stats.attack_cooldown,
            cooldown: Countdown::idle(),
        });
        entity
    }

    /// An AI ally (archer or healer)
    pub fn ally(id: EntityId, role: Role, spawn: Vec2, stats: &UnitConfig) -> Self {
        let name = format!("Ally {:?}", role);
        let mut entity = Self::base(id, name, role, spawn, stats);
        match role {
            Role::Healer => {
                entity.healing = Some(HealingStats {
                    heal_amount: stats.heal_amount,
                    heal_cooldown: stats.heal_cooldown,
                    heal_timer: 0,
                    effect: Countdown::idle(),
                });
            }
            _ => {
                entity.combat = Some(CombatStats {
                    damage: stats.damage,
                    attack_range: stats.attack_range,
                    attack_cooldown: stats.attack_cooldown,
                    attack_timer: 0,
                });
            }
        }
        entity
    }

    /// An enemy robot with a randomized slowdown schedule
    pub fn enemy(
        id: EntityId,
        spawn: Vec2,
        stats: &UnitConfig,
        enemy_ai: &EnemyAiConfig,
        rng: &mut impl Rng,
    ) -> Self {
        let mut entity = Self::base(id, format!("Robot {}", id.0), Role::Robot, spawn, stats);
        entity.combat = Some(CombatStats {
            damage: stats.damage,
            attack_range: stats.attack_range,
            attack_cooldown: stats.attack_cooldown,
            attack_timer: 0,
        });
        entity.slow = Some(SlowEffect::new(
            rng,
            enemy_ai.slow_min_interval,
            enemy_ai.slow_max_interval,
        ));
        entity
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0.0
    }

    /// Alive but below full health
    pub fn is_injured(&self) -> bool {
        self.is_alive() && self.hp < self.max_hp
    }

    pub fn is_human(&self) -> bool {
        matches!(self.controller, Controller::Human { .. })
    }

    pub fn human_slot(&self) -> Option<usize> {
        match self.controller {
            Controller::Human { slot } => Some(slot),
            Controller::Ai => None,
        }
    }

    /// Subtract damage; returns true if this blow killed the entity
    ///
    /// hp may go negative. It is never raised by damage.
    pub fn apply_damage(&mut self, amount: f32) -> bool {
        let was_alive = self.is_alive();
        self.hp -= amount.max(0.0);
        was_alive && !self.is_alive()
    }

    /// Heal a living entity up to `max_hp`; returns the hp actually restored
    pub fn heal(&mut self, amount: f32) -> f32 {
        if !self.is_alive() {
            return 0.0;
        }
        let before = self.hp;
        self.hp = (self.hp + amount.max(0.0)).min(self.max_hp);
        self.hp - before
    }

    /// Movement speed after status effects
    pub fn current_speed(&self, slow_factor: f32) -> f32 {
        match self.slow {
            Some(slow) if slow.is_active() => self.speed * slow_factor,
            _ => self.speed,
        }
    }

    pub fn distance_to(&self, other: &Entity) -> f32 {
        self.position.distance(other.position)
    }
}
