//! AI ally behavior
//!
//! Allies trail the primary camera. Archers shoot direct-target bolts at the
//! nearest enemy in range; healers top up the first injured AI ally.

use ordered_float::OrderedFloat;

use crate::ai::movement::step_with_sidestep;
use crate::combat::projectile::{Projectile, ProjectileKind};
use crate::core::config::GameConfig;
use crate::core::types::{EntityId, Faction, Vec2};
use crate::entity::store::EntityStore;
use crate::simulation::events::GameEvent;
use crate::world::obstacles::ObstacleField;

/// Move toward `anchor` until inside the follow distance
fn follow(id: EntityId, anchor: Vec2, entities: &mut EntityStore, obstacles: &ObstacleField, config: &GameConfig) {
    let Some(ally) = entities.get_living_mut(id) else {
        return;
    };
    let to_anchor = anchor - ally.position;
    if to_anchor.length() <= ally.follow_distance {
        return;
    }
    let step = to_anchor.normalize_or_zero() * ally.speed;
    let sidestep = ally.speed * config.ally_ai.sidestep_factor;
    ally.position = step_with_sidestep(
        ally.position,
        step,
        to_anchor,
        sidestep,
        ally.collision_radius,
        obstacles,
    );
}

/// Count up the attack timer and fire at the nearest enemy in range when ready
fn shoot(
    id: EntityId,
    entities: &mut EntityStore,
    projectiles: &mut Vec<Projectile>,
    config: &GameConfig,
    events: &mut Vec<GameEvent>,
) {
    let Some(archer) = entities.get_living(id) else {
        return;
    };
    let Some(mut combat) = archer.combat else {
        return;
    };
    let origin = archer.position;

    if combat.attack_timer < combat.attack_cooldown {
        combat.attack_timer += 1;
    }

    if combat.attack_timer >= combat.attack_cooldown {
        let target = entities
            .living_of(Faction::Hostile)
            .filter(|enemy| origin.distance(enemy.position) < combat.attack_range)
            .min_by_key(|enemy| OrderedFloat(origin.distance(enemy.position)))
            .map(|enemy| (enemy.id, enemy.position));

        if let Some((target, at)) = target {
            projectiles.push(Projectile::direct(
                id,
                Faction::Friendly,
                ProjectileKind::Damage,
                origin,
                at - origin,
                config.projectiles.speed,
                combat.damage,
                target,
            ));
            events.push(GameEvent::ProjectileFired {
                shooter: id,
                kind: ProjectileKind::Damage,
            });
            combat.attack_timer = 0;
        }
    }

    if let Some(archer) = entities.get_mut(id) {
        archer.combat = Some(combat);
    }
}

/// Count up the heal timer and heal the first injured AI ally when ready
fn heal(id: EntityId, entities: &mut EntityStore, config: &GameConfig, events: &mut Vec<GameEvent>) {
    let Some(mut healing) = entities.get_living(id).and_then(|h| h.healing) else {
        return;
    };

    healing.heal_timer = healing.heal_timer.saturating_add(1);

    if healing.heal_timer >= healing.heal_cooldown {
        let patient = entities
            .living_of(Faction::Friendly)
            .find(|e| !e.is_human() && e.is_injured())
            .map(|e| e.id);

        if let Some(patient) = patient.and_then(|p| entities.get_mut(p)) {
            let amount = patient.heal(healing.heal_amount);
            events.push(GameEvent::Healed {
                healer: id,
                target: patient.id,
                amount,
            });
            healing.heal_timer = 0;
            healing.effect.start(config.ally_ai.heal_effect_ticks);
        }
    }

    if let Some(healer) = entities.get_mut(id) {
        healer.healing = Some(healing);
    }
}

/// Run every living AI ally for one tick
///
/// `anchor` is the primary camera's offset, the point allies gather around.
pub fn update_allies(
    entities: &mut EntityStore,
    projectiles: &mut Vec<Projectile>,
    obstacles: &ObstacleField,
    config: &GameConfig,
    anchor: Vec2,
    events: &mut Vec<GameEvent>,
) {
    let ids: Vec<EntityId> = entities
        .living_of(Faction::Friendly)
        .filter(|e| !e.is_human())
        .map(|e| e.id)
        .collect();

    for id in ids {
        follow(id, anchor, entities, obstacles, config);
        shoot(id, entities, projectiles, config, events);
        heal(id, entities, config, events);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::UnitConfig;
    use crate::core::types::Role;
    use crate::entity::unit::Entity;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn spawn_ally(store: &mut EntityStore, role: Role, at: Vec2) -> EntityId {
        let stats = match role {
            Role::Healer => UnitConfig::ally_healer(),
            _ => UnitConfig::ally_archer(),
        };
        store.spawn(Entity::ally(store.next_id(), role, at, &stats))
    }

    fn spawn_robot(store: &mut EntityStore, at: Vec2) -> EntityId {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        store.spawn(Entity::enemy(
            store.next_id(),
            at,
            &UnitConfig::robot(),
            &Default::default(),
            &mut rng,
        ))
    }

    fn run(store: &mut EntityStore, projectiles: &mut Vec<Projectile>, anchor: Vec2) -> Vec<GameEvent> {
        let mut events = Vec::new();
        update_allies(
            store,
            projectiles,
            &ObstacleField::default(),
            &GameConfig::default(),
            anchor,
            &mut events,
        );
        events
    }

    #[test]
    fn test_ally_follows_anchor() {
        let mut store = EntityStore::new();
        let archer = spawn_ally(&mut store, Role::Archer, Vec2::new(-100.0, 0.0));
        run(&mut store, &mut Vec::new(), Vec2::ZERO);
        assert!((store.get(archer).unwrap().position.x - -97.2).abs() < 1e-4);
    }

    #[test]
    fn test_ally_stops_inside_follow_distance() {
        let mut store = EntityStore::new();
        let archer = spawn_ally(&mut store, Role::Archer, Vec2::new(-50.0, 0.0));
        run(&mut store, &mut Vec::new(), Vec2::ZERO);
        assert_eq!(store.get(archer).unwrap().position, Vec2::new(-50.0, 0.0));
    }

    #[test]
    fn test_archer_fires_direct_bolt_when_ready() {
        let mut store = EntityStore::new();
        let archer = spawn_ally(&mut store, Role::Archer, Vec2::ZERO);
        let robot = spawn_robot(&mut store, Vec2::new(150.0, 0.0));
        store.get_mut(archer).unwrap().combat.as_mut().unwrap().attack_timer = 59;

        let mut projectiles = Vec::new();
        let events = run(&mut store, &mut projectiles, Vec2::ZERO);

        assert_eq!(projectiles.len(), 1);
        assert_eq!(projectiles[0].target, Some(robot));
        assert_eq!(projectiles[0].payload, 15.0);
        assert_eq!(projectiles[0].direction, Vec2::new(1.0, 0.0));
        assert_eq!(store.get(archer).unwrap().combat.unwrap().attack_timer, 0);
        assert_eq!(
            events,
            vec![GameEvent::ProjectileFired {
                shooter: archer,
                kind: ProjectileKind::Damage
            }]
        );
    }

    #[test]
    fn test_archer_targets_nearest_enemy_in_range() {
        let mut store = EntityStore::new();
        let archer = spawn_ally(&mut store, Role::Archer, Vec2::ZERO);
        spawn_robot(&mut store, Vec2::new(190.0, 0.0));
        let near = spawn_robot(&mut store, Vec2::new(30.0, 0.0));
        store.get_mut(archer).unwrap().combat.as_mut().unwrap().attack_timer = 59;

        let mut projectiles = Vec::new();
        run(&mut store, &mut projectiles, Vec2::ZERO);

        assert_eq!(projectiles.len(), 1);
        assert_eq!(projectiles[0].target, Some(near));
    }

    #[test]
    fn test_archer_holds_fire_without_targets_in_range() {
        let mut store = EntityStore::new();
        let archer = spawn_ally(&mut store, Role::Archer, Vec2::ZERO);
        spawn_robot(&mut store, Vec2::new(250.0, 0.0));
        store.get_mut(archer).unwrap().combat.as_mut().unwrap().attack_timer = 60;

        let mut projectiles = Vec::new();
        run(&mut store, &mut projectiles, Vec2::ZERO);

        assert!(projectiles.is_empty());
        assert_eq!(store.get(archer).unwrap().combat.unwrap().attack_timer, 60);
    }

    #[test]
    fn test_healer_heals_first_injured_and_starts_effect() {
        let mut store = EntityStore::new();
        let archer = spawn_ally(&mut store, Role::Archer, Vec2::ZERO);
        let healer = spawn_ally(&mut store, Role::Healer, Vec2::new(10.0, 0.0));
        store.get_mut(archer).unwrap().hp = 95.0;
        store.get_mut(healer).unwrap().healing.as_mut().unwrap().heal_timer = 89;

        let events = run(&mut store, &mut Vec::new(), Vec2::ZERO);

        assert_eq!(store.get(archer).unwrap().hp, 100.0);
        let healing = store.get(healer).unwrap().healing.unwrap();
        assert_eq!(healing.heal_timer, 0);
        assert_eq!(healing.effect.remaining(), 30);
        assert!(events.contains(&GameEvent::Healed {
            healer,
            target: archer,
            amount: 5.0
        }));
    }

    #[test]
    fn test_healer_passes_over_injured_players() {
        let mut store = EntityStore::new();
        let player = store.spawn(Entity::player(
            store.next_id(),
            0,
            Role::Gunner,
            Vec2::ZERO,
            &UnitConfig::gunner(),
            &Default::default(),
        ));
        let archer = spawn_ally(&mut store, Role::Archer, Vec2::new(-40.0, 0.0));
        let healer = spawn_ally(&mut store, Role::Healer, Vec2::new(10.0, 0.0));
        store.get_mut(player).unwrap().hp = 60.0;
        store.get_mut(archer).unwrap().hp = 50.0;
        store.get_mut(healer).unwrap().healing.as_mut().unwrap().heal_timer = 89;

        run(&mut store, &mut Vec::new(), Vec2::ZERO);

        assert_eq!(store.get(player).unwrap().hp, 60.0);
        assert_eq!(store.get(archer).unwrap().hp, 60.0);
    }

    #[test]
    fn test_healer_skips_dead_units() {
        let mut store = EntityStore::new();
        let archer = spawn_ally(&mut store, Role::Archer, Vec2::ZERO);
        let healer = spawn_ally(&mut store, Role::Healer, Vec2::new(10.0, 0.0));
        store.get_mut(archer).unwrap().hp = 0.0;
        store.get_mut(healer).unwrap().healing.as_mut().unwrap().heal_timer = 89;

        let events = run(&mut store, &mut Vec::new(), Vec2::ZERO);

        assert!(events.is_empty());
        assert_eq!(store.get(archer).unwrap().hp, 0.0);
        assert_eq!(store.get(healer).unwrap().healing.unwrap().heal_timer, 90);
    }
}
