//! Render hand-off
//!
//! Provides a read-only view of the session for whatever draws it.
//! This module never modifies simulation state.

pub mod colors;

use serde::Serialize;

use crate::combat::projectile::Projectile;
use crate::core::types::{EntityId, Faction, Role, Tick, Vec2};
use crate::simulation::events::GameOutcome;
use crate::simulation::session::GameSession;
use crate::world::camera::Camera;
use crate::world::obstacles::Obstacle;

pub use colors::Color;

/// Lightweight snapshot of a unit for rendering
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderUnit {
    pub id: EntityId,
    pub role: Role,
    pub faction: Faction,
    pub human: bool,
    pub position: Vec2,
    pub size: Vec2,
    pub hp: f32,
    pub max_hp: f32,
    pub color: Color,
    pub is_attacking: bool,
    pub is_slowed: bool,
    /// A healer's glow is showing
    pub healing: bool,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, Serialize)]
pub struct FrameSnapshot<'a> {
    pub tick: Tick,
    pub canvas_size: Vec2,
    /// Clear color for the whole canvas
    pub background: Color,
    pub units: Vec<RenderUnit>,
    pub projectiles: &'a [Projectile],
    pub obstacles: &'a [Obstacle],
    pub cameras: &'a [Camera],
    pub outcome: Option<GameOutcome>,
}

/// Receives one snapshot per frame
pub trait RenderSink {
    fn present(&mut self, snapshot: &FrameSnapshot<'_>);
}

/// Collects all living units from the session into a reusable buffer.
/// Call this once per frame, passing the same buffer to avoid allocations.
pub fn collect_render_units(session: &GameSession, buffer: &mut Vec<RenderUnit>) {
    buffer.clear();

    for entity in session.entities.living() {
        let is_slowed = entity.slow.is_some_and(|s| s.is_active());
        let healing = entity.healing.is_some_and(|h| h.effect.is_running());

        let color = if entity.is_attacking {
            colors::ATTACKING
        } else if is_slowed {
            colors::SLOWED
        } else if healing {
            colors::HEAL_GLOW
        } else {
            colors::role_color(entity.role, entity.is_human())
        };

        buffer.push(RenderUnit {
            id: entity.id,
            role: entity.role,
            faction: entity.faction,
            human: entity.is_human(),
            position: entity.position,
            size: entity.size,
            hp: entity.hp,
            max_hp: entity.max_hp,
            color,
            is_attacking: entity.is_attacking,
            is_slowed,
            healing,
        });
    }
}

/// Build a snapshot of the current frame
pub fn snapshot(session: &GameSession) -> FrameSnapshot<'_> {
    let mut units = Vec::with_capacity(session.entities.len());
    collect_render_units(session, &mut units);

    FrameSnapshot {
        tick: session.tick,
        canvas_size: session.canvas_size(),
        background: colors::BACKGROUND,
        units,
        projectiles: &session.projectiles,
        obstacles: session.obstacles.obstacles(),
        cameras: &session.cameras,
        outcome: session.outcome,
    }
}

/// Screen position of each obstacle's top-left corner as seen by `camera`
pub fn obstacle_screen_rects(obstacles: &[Obstacle], camera: &Camera) -> Vec<(Vec2, Vec2, Color)> {
    obstacles
        .iter()
        .map(|o| {
            let color = Color::from_hex(&o.color).unwrap_or(colors::OBSTACLE);
            (camera.to_screen(o.min()), o.size, color)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{GameConfig, RosterConfig};
    use crate::progression::StatModifiers;
    use crate::world::camera::{CameraMode, Viewport};

    fn session() -> GameSession {
        let mut config = GameConfig::with_roster(RosterConfig::single_player());
        config.session.seed = Some(2);
        GameSession::new(config, StatModifiers::default()).unwrap()
    }

    #[test]
    fn test_dead_units_not_rendered() {
        let mut s = session();
        let mut buffer = Vec::new();
        collect_render_units(&s, &mut buffer);
        assert_eq!(buffer.len(), 4);

        let player = s.players[0];
        s.entities.get_mut(player).unwrap().hp = -3.0;
        collect_render_units(&s, &mut buffer);
        assert_eq!(buffer.len(), 3);
        assert!(buffer.iter().all(|u| u.id != player));
    }

    #[test]
    fn test_attacking_enemy_drawn_red() {
        let mut s = session();
        let robot = s.entities.living_of(Faction::Hostile).map(|e| e.id).next().unwrap();
        s.entities.get_mut(robot).unwrap().is_attacking = true;

        let snap = snapshot(&s);
        let unit = snap.units.iter().find(|u| u.id == robot).unwrap();
        assert_eq!(unit.color, colors::ATTACKING);
        assert_eq!(snap.cameras.len(), 1);
        assert_eq!(snap.background, colors::BACKGROUND);
        assert_eq!(snap.outcome, None);
    }

    #[test]
    fn test_obstacle_screen_rects() {
        let camera = Camera::new(
            Viewport::new(Vec2::ZERO, Vec2::new(800.0, 600.0)),
            None,
            CameraMode::Drive,
        );
        let obstacles = vec![Obstacle::new(Vec2::new(100.0, 0.0), Vec2::new(60.0, 80.0), "bad")];
        let rects = obstacle_screen_rects(&obstacles, &camera);
        assert_eq!(rects[0].0, Vec2::new(470.0, 260.0));
        assert_eq!(rects[0].2, colors::OBSTACLE);
    }
}
