//! Projectile resolution
//!
//! Each tick every projectile advances, then either lands on a recipient or is
//! discarded once it flies out of every viewport. Linear scan over projectiles
//! and units; entity counts are small.

use crate::combat::projectile::Projectile;
use crate::core::config::ProjectileConfig;
use crate::core::types::EntityId;
use crate::entity::store::EntityStore;
use crate::simulation::events::GameEvent;
use crate::world::camera::Camera;

/// Find who a projectile connects with at its current position
///
/// Direct-target projectiles only consider their bound target, and only while
/// it lives. Area heals take the first injured friendly unit in range other
/// than the shooter; area damage takes the first living opponent in range.
pub fn find_recipient(
    projectile: &Projectile,
    entities: &EntityStore,
    config: &ProjectileConfig,
) -> Option<EntityId> {
    let radius = projectile.kind.hit_radius(config);
    let in_range = |position| projectile.position.distance(position) <= radius;

    match projectile.target {
        Some(target) => entities
            .get_living(target)
            .filter(|t| in_range(t.position))
            .map(|t| t.id),
        None if projectile.kind.heals() => entities
            .living_of(projectile.source)
            .find(|e| e.id != projectile.shooter && e.is_injured() && in_range(e.position))
            .map(|e| e.id),
        None => entities
            .living_of(projectile.source.opponent())
            .find(|e| in_range(e.position))
            .map(|e| e.id),
    }
}

/// Apply a projectile's payload to `recipient`
fn land(projectile: &Projectile, recipient: EntityId, entities: &mut EntityStore, events: &mut Vec<GameEvent>) {
    let Some(entity) = entities.get_mut(recipient) else {
        return;
    };

    if projectile.kind.heals() {
        let amount = entity.heal(projectile.payload);
        events.push(GameEvent::Healed {
            healer: projectile.shooter,
            target: recipient,
            amount,
        });
    } else {
        let killed = entity.apply_damage(projectile.payload);
        tracing::trace!("{} hit for {}", entity.name, projectile.payload);
        events.push(GameEvent::Hit {
            attacker: projectile.shooter,
            target: recipient,
            amount: projectile.payload,
        });
        if killed {
            events.push(GameEvent::Killed { entity: recipient });
        }
    }
}

/// Advance, resolve and cull every projectile for one tick
pub fn update_projectiles(
    projectiles: &mut Vec<Projectile>,
    entities: &mut EntityStore,
    cameras: &[Camera],
    config: &ProjectileConfig,
    events: &mut Vec<GameEvent>,
) {
    projectiles.retain_mut(|projectile| {
        projectile.advance();

        if let Some(recipient) = find_recipient(projectile, entities, config) {
            land(projectile, recipient, entities, events);
            return false;
        }

        cameras
            .iter()
            .any(|camera| camera.sees(projectile.position, config.offscreen_margin))
    });
}
