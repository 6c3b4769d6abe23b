//! Human player movement and shooting

use crate::ai::movement::{step_or_stay, step_per_axis};
use crate::combat::projectile::Projectile;
use crate::core::types::{EntityId, Faction, Vec2};
use crate::simulation::events::GameEvent;
use crate::simulation::input::InputSource;
use crate::simulation::session::GameSession;
use crate::world::camera::{aim_direction, CameraMode};

/// Move one player from its slot's movement intent
///
/// The owner of a `Drive` camera moves the camera itself, one axis at a time,
/// and is pinned to the new offset. Everyone else steps in world space and a
/// `Follow` camera recenters on them afterwards.
fn move_player(session: &mut GameSession, id: EntityId, input: &impl InputSource) {
    let Some(player) = session.entities.get_living_mut(id) else {
        return;
    };
    let Some(slot) = player.human_slot() else {
        return;
    };

    let step = input.movement(slot).clamp(Vec2::splat(-1.0), Vec2::splat(1.0)) * player.speed;
    let camera = session.cameras.iter_mut().find(|c| c.owner == Some(id));

    match camera {
        Some(camera) if camera.mode == CameraMode::Drive => {
            camera.offset =
                step_per_axis(camera.offset, step, player.collision_radius, &session.obstacles);
            player.position = camera.offset;
        }
        camera => {
            if step != Vec2::ZERO {
                player.position =
                    step_or_stay(player.position, step, player.collision_radius, &session.obstacles);
            }
            if let Some(camera) = camera {
                camera.center_on(player.position);
            }
        }
    }
}

/// Fire the slot's projectile if the trigger is held and the cooldown is over
///
/// Aim comes from the pointer through whichever viewport it is in. Without a
/// usable pointer the shot follows the movement intent; a player standing
/// still with no pointer does not fire.
fn fire(session: &mut GameSession, id: EntityId, input: &impl InputSource, events: &mut Vec<GameEvent>) {
    let Some(player) = session.entities.get_living(id) else {
        return;
    };
    let (Some(slot), Some(shot)) = (player.human_slot(), player.shot) else {
        return;
    };
    if !input.shoot(slot) || shot.cooldown.is_running() {
        return;
    }

    let origin = player.position;
    let direction = input
        .pointer(slot)
        .and_then(|pointer| aim_direction(&session.cameras, pointer, origin))
        .or_else(|| input.movement(slot).try_normalize());
    let Some(direction) = direction else {
        return;
    };

    session.projectiles.push(Projectile::area(
        id,
        Faction::Friendly,
        shot.kind,
        origin,
        direction,
        session.config.projectiles.speed,
        shot.payload,
    ));
    events.push(GameEvent::ProjectileFired {
        shooter: id,
        kind: shot.kind,
    });

    if let Some(shot) = session
        .entities
        .get_mut(id)
        .and_then(|p| p.shot.as_mut())
    {
        shot.cooldown.start(shot.cooldown_ticks);
    }
}

/// Movement for every player, then shooting for every player
pub fn update_players(session: &mut GameSession, input: &impl InputSource, events: &mut Vec<GameEvent>) {
    let order = session.players_in_turn_order();
    for &id in &order {
        move_player(session, id, input);
    }
    for &id in &order {
        fire(session, id, input, events);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::projectile::ProjectileKind;
    use crate::core::config::{GameConfig, RosterConfig};
    use crate::progression::StatModifiers;
    use crate::simulation::input::FrameInput;
    use crate::world::obstacles::{Obstacle, ObstacleField};

    fn session(roster: RosterConfig) -> GameSession {
        let mut config = GameConfig::with_roster(roster);
        config.session.seed = Some(11);
        let mut session = GameSession::new(config, StatModifiers::default()).unwrap();
        session.obstacles = ObstacleField::default();
        session
    }

    #[test]
    fn test_drive_camera_moves_with_owner() {
        let mut s = session(RosterConfig::single_player());
        let input = FrameInput::new().with_movement(0, Vec2::new(1.0, 0.0));
        update_players(&mut s, &input, &mut Vec::new());

        let player = s.players[0];
        assert_eq!(s.cameras[0].offset, Vec2::new(4.0, 0.0));
        assert_eq!(s.entities.get(player).unwrap().position, Vec2::new(4.0, 0.0));
    }

    #[test]
    fn test_drive_camera_blocked_axis() {
        let mut s = session(RosterConfig::single_player());
        s.obstacles = ObstacleField::from_obstacles(vec![Obstacle::new(
            Vec2::new(43.0, 0.0),
            Vec2::new(40.0, 400.0),
            "#7f8c8d",
        )]);
        let input = FrameInput::new().with_movement(0, Vec2::new(1.0, 1.0));
        update_players(&mut s, &input, &mut Vec::new());
        assert_eq!(s.cameras[0].offset, Vec2::new(0.0, 4.0));
    }

    #[test]
    fn test_follow_camera_recenters() {
        let mut s = session(RosterConfig::split_screen());
        let input = FrameInput::new().with_movement(1, Vec2::new(0.0, -1.0));
        update_players(&mut s, &input, &mut Vec::new());

        let healer = s.players[1];
        assert_eq!(s.entities.get(healer).unwrap().position, Vec2::new(80.0, -2.5));
        assert_eq!(s.cameras[1].offset, Vec2::new(80.0, -2.5));
        assert_eq!(s.cameras[0].offset, Vec2::ZERO);
    }

    #[test]
    fn test_shot_aims_at_pointer_and_starts_cooldown() {
        let mut s = session(RosterConfig::single_player());
        let mut events = Vec::new();
        // 100px right of the viewport center
        let input = FrameInput::new().with_shot(0, Some(Vec2::new(500.0, 300.0)));
        update_players(&mut s, &input, &mut events);

        assert_eq!(s.projectiles.len(), 1);
        let projectile = &s.projectiles[0];
        assert_eq!(projectile.direction, Vec2::new(1.0, 0.0));
        assert_eq!(projectile.kind, ProjectileKind::Damage);
        assert_eq!(projectile.target, None);
        assert_eq!(events.len(), 1);

        let shot = s.entities.get(s.players[0]).unwrap().shot.unwrap();
        assert_eq!(shot.cooldown.remaining(), 60);

        // Still cooling down
        update_players(&mut s, &input, &mut events);
        assert_eq!(s.projectiles.len(), 1);
    }

    #[test]
    fn test_shot_without_aim_is_skipped() {
        let mut s = session(RosterConfig::single_player());
        let input = FrameInput::new().with_shot(0, None);
        update_players(&mut s, &input, &mut Vec::new());
        assert!(s.projectiles.is_empty());
    }

    #[test]
    fn test_shot_falls_back_to_movement_direction() {
        let mut s = session(RosterConfig::split_screen());
        let input = FrameInput::new()
            .with_shot(1, None)
            .with_movement(1, Vec2::new(0.0, 1.0));
        update_players(&mut s, &input, &mut Vec::new());

        assert_eq!(s.projectiles.len(), 1);
        assert_eq!(s.projectiles[0].kind, ProjectileKind::Heal);
        assert_eq!(s.projectiles[0].direction, Vec2::new(0.0, 1.0));
    }

    #[test]
    fn test_dead_player_does_not_act() {
        let mut s = session(RosterConfig::single_player());
        let player = s.players[0];
        s.entities.get_mut(player).unwrap().hp = 0.0;
        let input = FrameInput::new()
            .with_movement(0, Vec2::new(1.0, 0.0))
            .with_shot(0, Some(Vec2::new(500.0, 300.0)));
        update_players(&mut s, &input, &mut Vec::new());
        assert_eq!(s.cameras[0].offset, Vec2::ZERO);
        assert!(s.projectiles.is_empty());
    }
}
