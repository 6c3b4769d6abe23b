//! Enemy robot behavior
//!
//! Per tick, in priority order: dodge a nearby projectile, close in on the
//! target while weaving sideways, or stand and hit it once the attack timer
//! fills.

use ordered_float::OrderedFloat;

use crate::ai::movement::{clamp_step, step_with_partial_fallback};
use crate::combat::projectile::Projectile;
use crate::core::config::GameConfig;
use crate::core::types::{perpendicular, EntityId, Faction, Tick, Vec2};
use crate::entity::store::EntityStore;
use crate::simulation::events::GameEvent;
use crate::world::obstacles::ObstacleField;

/// What an enemy decided to do this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EnemyIntent {
    /// Sidestep a projectile
    Evade(Vec2),
    /// Move toward the target
    Approach(Vec2),
    /// In range of the target
    Attack(EntityId),
    Idle,
}

/// Nearest projectile position strictly inside `radius` of `from`
pub fn nearest_threat(from: Vec2, projectiles: &[Projectile], radius: f32) -> Option<Vec2> {
    projectiles
        .iter()
        .map(|p| p.position)
        .filter(|p| from.distance(*p) < radius)
        .min_by_key(|p| OrderedFloat(from.distance(*p)))
}

/// Sinusoidal sideways offset used while approaching
pub fn circle_offset(tick: Tick, config: &GameConfig) -> f32 {
    let ai = &config.enemy_ai;
    let elapsed_ms = tick as f32 * config.map.frame_ms;
    (elapsed_ms / ai.circle_period_ms).sin() * ai.circle_amplitude * ai.circle_weight
}

/// Refresh `current_target` when the interval expires or the target is gone
fn refresh_target(id: EntityId, entities: &mut EntityStore, interval: u32) {
    let Some(enemy) = entities.get_living(id) else {
        return;
    };
    let target_alive = enemy
        .current_target
        .is_some_and(|t| entities.get_living(t).is_some());

    let retarget = enemy.retarget_timer == 0 || !target_alive;
    let target = if retarget {
        entities.nearest_living(enemy.position, Faction::Friendly)
    } else {
        enemy.current_target
    };

    if let Some(enemy) = entities.get_mut(id) {
        if retarget {
            enemy.current_target = target;
            enemy.retarget_timer = interval;
        }
        enemy.retarget_timer = enemy.retarget_timer.saturating_sub(1);
    }
}

/// Choose this tick's action for one enemy
pub fn decide(
    id: EntityId,
    entities: &EntityStore,
    projectiles: &[Projectile],
    config: &GameConfig,
    tick: Tick,
) -> EnemyIntent {
    let Some(enemy) = entities.get_living(id) else {
        return EnemyIntent::Idle;
    };
    let ai = &config.enemy_ai;
    let speed = enemy.current_speed(ai.slow_factor);

    if let Some(threat) = nearest_threat(enemy.position, projectiles, ai.danger_radius) {
        let away = perpendicular(threat - enemy.position).normalize_or_zero();
        return EnemyIntent::Evade(away * speed * ai.evade_speed_factor);
    }

    let Some(target) = enemy.current_target.and_then(|t| entities.get_living(t)) else {
        return EnemyIntent::Idle;
    };
    let Some(combat) = enemy.combat else {
        return EnemyIntent::Idle;
    };

    let to_target = target.position - enemy.position;
    if to_target.length() > combat.attack_range {
        let heading = to_target.normalize_or_zero();
        let weave = perpendicular(to_target).normalize_or_zero() * circle_offset(tick, config);
        EnemyIntent::Approach(heading * speed + weave)
    } else {
        EnemyIntent::Attack(target.id)
    }
}

/// Carry out an intent: move, or advance the attack timer and strike
fn act(
    id: EntityId,
    intent: EnemyIntent,
    entities: &mut EntityStore,
    obstacles: &ObstacleField,
    config: &GameConfig,
    events: &mut Vec<GameEvent>,
) {
    let slow_factor = config.enemy_ai.slow_factor;
    let Some(enemy) = entities.get_living_mut(id) else {
        return;
    };

    match intent {
        EnemyIntent::Evade(step) | EnemyIntent::Approach(step) => {
            enemy.is_attacking = false;
            let step = clamp_step(step, enemy.current_speed(slow_factor));
            if step != Vec2::ZERO {
                enemy.position =
                    step_with_partial_fallback(enemy.position, step, enemy.collision_radius, obstacles);
            }
        }
        EnemyIntent::Idle => enemy.is_attacking = false,
        EnemyIntent::Attack(target) => {
            enemy.is_attacking = true;
            let Some(combat) = enemy.combat.as_mut() else {
                return;
            };
            combat.attack_timer += 1;
            if combat.attack_timer < combat.attack_cooldown {
                return;
            }
            combat.attack_timer = 0;
            let damage = combat.damage;

            if let Some(victim) = entities.get_living_mut(target) {
                let killed = victim.apply_damage(damage);
                tracing::trace!("{:?} strikes {} for {}", id, victim.name, damage);
                events.push(GameEvent::Hit {
                    attacker: id,
                    target,
                    amount: damage,
                });
                if killed {
                    events.push(GameEvent::Killed { entity: target });
                }
            }
        }
    }
}

/// Run every living enemy for one tick
pub fn update_enemies(
    entities: &mut EntityStore,
    projectiles: &[Projectile],
    obstacles: &ObstacleField,
    config: &GameConfig,
    tick: Tick,
    events: &mut Vec<GameEvent>,
) {
    let ids: Vec<EntityId> = entities.living_of(Faction::Hostile).map(|e| e.id).collect();

    for id in ids {
        refresh_target(id, entities, config.enemy_ai.retarget_interval);
        let intent = decide(id, entities, projectiles, config, tick);
        act(id, intent, entities, obstacles, config, events);
    }
}
