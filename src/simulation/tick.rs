//! Simulation tick - orchestrates all systems in a fixed order

use crate::ai::ally::update_allies;
use crate::ai::enemy::update_enemies;
use crate::combat::resolution::update_projectiles;
use crate::core::types::Vec2;
use crate::entity::status::advance_status;
use crate::render::{snapshot, RenderSink};
use crate::simulation::control::update_players;
use crate::simulation::events::{AudioSink, GameEvent};
use crate::simulation::input::InputSource;
use crate::simulation::session::GameSession;

/// Run a single simulation tick
///
/// Does nothing once the session has ended. The order is fixed: status timers,
/// human players, enemies, allies, projectiles, then the win check.
pub fn run_tick(session: &mut GameSession, input: &impl InputSource) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if !session.active {
        return events;
    }

    advance_status(&mut session.entities, &session.config.enemy_ai, &mut session.rng);

    update_players(session, input, &mut events);

    update_enemies(
        &mut session.entities,
        &session.projectiles,
        &session.obstacles,
        &session.config,
        session.tick,
        &mut events,
    );

    let anchor = session
        .primary_camera()
        .map(|camera| camera.offset)
        .unwrap_or(Vec2::ZERO);
    update_allies(
        &mut session.entities,
        &mut session.projectiles,
        &session.obstacles,
        &session.config,
        anchor,
        &mut events,
    );

    update_projectiles(
        &mut session.projectiles,
        &mut session.entities,
        &session.cameras,
        &session.config.projectiles,
        &mut events,
    );

    if let Some(outcome) = session.check_win_condition() {
        session.finish(outcome, &mut events);
    }

    session.tick += 1;
    events
}

/// One display frame: simulate, notify audio, then render
///
/// Rendering continues after the session ends so the result screen stays up.
pub fn run_frame(
    session: &mut GameSession,
    input: &impl InputSource,
    render: &mut impl RenderSink,
    audio: &mut impl AudioSink,
) -> Vec<GameEvent> {
    let events = run_tick(session, input);
    for event in &events {
        audio.notify(event);
    }
    render.present(&snapshot(session));
    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{GameConfig, RosterConfig};
    use crate::core::types::Faction;
    use crate::progression::StatModifiers;
    use crate::render::FrameSnapshot;
    use crate::simulation::events::GameOutcome;
    use crate::simulation::input::FrameInput;
    use crate::world::obstacles::ObstacleField;

    fn session() -> GameSession {
        let mut config = GameConfig::with_roster(RosterConfig::single_player());
        config.session.seed = Some(21);
        let mut session = GameSession::new(config, StatModifiers::default()).unwrap();
        session.obstacles = ObstacleField::default();
        session
    }

    #[test]
    fn test_tick_advances_counter() {
        let mut s = session();
        run_tick(&mut s, &FrameInput::new());
        run_tick(&mut s, &FrameInput::new());
        assert_eq!(s.tick, 2);
    }

    #[test]
    fn test_victory_ends_session_once() {
        let mut s = session();
        let robots: Vec<_> = s
            .entities
            .living_of(Faction::Hostile)
            .map(|e| e.id)
            .collect();
        for id in robots {
            s.entities.get_mut(id).unwrap().hp = 0.0;
        }

        let events = run_tick(&mut s, &FrameInput::new());
        let ended: Vec<_> = events
            .iter()
            .filter(|e| matches!(e, GameEvent::SessionEnded { .. }))
            .collect();
        assert_eq!(ended.len(), 1);
        assert!(matches!(
            ended[0],
            GameEvent::SessionEnded {
                outcome: GameOutcome::Victory,
                coins: 10,
                ..
            }
        ));
        assert!(!s.is_active());

        // Inactive sessions do not simulate
        let tick = s.tick;
        assert!(run_tick(&mut s, &FrameInput::new()).is_empty());
        assert_eq!(s.tick, tick);
    }

    #[test]
    fn test_run_frame_forwards_events_and_renders_after_end() {
        struct CountingSink(usize);
        impl RenderSink for CountingSink {
            fn present(&mut self, _snapshot: &FrameSnapshot<'_>) {
                self.0 += 1;
            }
        }

        let mut s = session();
        let player = s.players[0];
        s.entities.get_mut(player).unwrap().hp = 0.0;

        let mut heard = Vec::new();
        let mut audio = |event: &GameEvent| heard.push(event.clone());
        let mut render = CountingSink(0);

        run_frame(&mut s, &FrameInput::new(), &mut render, &mut audio);
        run_frame(&mut s, &FrameInput::new(), &mut render, &mut audio);

        assert_eq!(render.0, 2);
        assert_eq!(heard.len(), 1);
        assert_eq!(s.outcome, Some(GameOutcome::Defeat));
    }
}
