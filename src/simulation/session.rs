//! Game session state
//!
//! A session owns everything one round needs: units, obstacles, cameras and
//! projectiles, plus the RNG that drives obstacle layout and enemy slowdowns.
//! Restarting rebuilds all of it from the same config and modifiers.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::combat::projectile::Projectile;
use crate::core::config::GameConfig;
use crate::core::error::Result;
use crate::core::types::{EntityId, Faction, Tick, Vec2};
use crate::entity::store::EntityStore;
use crate::entity::unit::Entity;
use crate::progression::StatModifiers;
use crate::simulation::events::{GameEvent, GameOutcome};
use crate::world::camera::{Camera, Viewport};
use crate::world::obstacles::ObstacleField;

#[derive(Debug, Clone)]
pub struct GameSession {
    pub config: GameConfig,
    pub modifiers: StatModifiers,
    pub obstacles: ObstacleField,
    pub entities: EntityStore,
    /// Human player ids indexed by input slot
    pub players: Vec<EntityId>,
    pub cameras: Vec<Camera>,
    pub projectiles: Vec<Projectile>,
    pub tick: Tick,
    pub active: bool,
    pub outcome: Option<GameOutcome>,
    pub coins_awarded: bool,
    seed: u64,
    pub(crate) rng: ChaCha8Rng,
}

impl GameSession {
    /// Validate the config and build a fresh session
    pub fn new(config: GameConfig, modifiers: StatModifiers) -> Result<Self> {
        config.validate()?;
        let seed = config.session.seed.unwrap_or_else(rand::random);

        let mut session = Self {
            config,
            modifiers,
            obstacles: ObstacleField::default(),
            entities: EntityStore::new(),
            players: Vec::new(),
            cameras: Vec::new(),
            projectiles: Vec::new(),
            tick: 0,
            active: true,
            outcome: None,
            coins_awarded: false,
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
        };
        session.populate();
        Ok(session)
    }

    /// Start a new round with the same config and modifiers
    ///
    /// The RNG keeps running, so the new round gets a fresh obstacle layout.
    pub fn restart(&mut self) {
        self.populate();
        tracing::debug!("Session restarted");
    }

    fn populate(&mut self) {
        let roster = &self.config.roster;
        let mut entities = EntityStore::new();
        let mut players = Vec::with_capacity(roster.players.len());
        let mut cameras = Vec::with_capacity(roster.camera_count());
        let viewports = Viewport::side_by_side(
            roster.camera_count(),
            self.config.viewport.width,
            self.config.viewport.height,
        );

        for (slot, player) in roster.players.iter().enumerate() {
            let spawn = Vec2::from(player.spawn);
            let id = entities.spawn(Entity::player(
                entities.next_id(),
                slot,
                player.role,
                spawn,
                self.config.player_stats(player.role),
                &self.modifiers,
            ));
            players.push(id);

            if let Some(mode) = player.camera {
                let mut camera = Camera::new(viewports[cameras.len()], Some(id), mode);
                camera.center_on(spawn);
                cameras.push(camera);
            }
        }

        for ally in &roster.allies {
            entities.spawn(Entity::ally(
                entities.next_id(),
                ally.role,
                Vec2::from(ally.spawn),
                self.config.ai_stats(ally.role),
            ));
        }

        for enemy in &roster.enemies {
            entities.spawn(Entity::enemy(
                entities.next_id(),
                Vec2::from(enemy.spawn),
                self.config.ai_stats(enemy.role),
                &self.config.enemy_ai,
                &mut self.rng,
            ));
        }

        self.obstacles = ObstacleField::generate(
            &self.config.obstacles,
            &self.config.map,
            &roster.spawn_points(),
            &mut self.rng,
        );
        self.entities = entities;
        self.players = players;
        self.cameras = cameras;
        self.projectiles.clear();
        self.tick = 0;
        self.active = true;
        self.outcome = None;
        self.coins_awarded = false;

        tracing::debug!(
            "Session ready: {} players, {} units, {} obstacles (seed {})",
            self.players.len(),
            self.entities.len(),
            self.obstacles.len(),
            self.seed
        );
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// The first camera; AI allies gather around its offset
    pub fn primary_camera(&self) -> Option<&Camera> {
        self.cameras.first()
    }

    /// Total canvas size covering every viewport
    pub fn canvas_size(&self) -> Vec2 {
        Vec2::new(
            self.config.viewport.width * self.cameras.len() as f32,
            self.config.viewport.height,
        )
    }

    pub fn living_players(&self) -> impl Iterator<Item = &Entity> {
        self.players.iter().filter_map(|id| self.entities.get_living(*id))
    }

    /// Human players with their own camera act first
    pub(crate) fn players_in_turn_order(&self) -> Vec<EntityId> {
        let (drivers, rest): (Vec<EntityId>, Vec<EntityId>) = self
            .players
            .iter()
            .copied()
            .partition(|id| self.cameras.iter().any(|c| c.owner == Some(*id)));
        drivers.into_iter().chain(rest).collect()
    }

    /// Outcome if the round is decided, `None` while both sides stand
    pub fn check_win_condition(&self) -> Option<GameOutcome> {
        let hostiles_alive = self.entities.any_living(Faction::Hostile);
        let players_alive = self.living_players().next().is_some();

        match (hostiles_alive, players_alive) {
            (false, true) => Some(GameOutcome::Victory),
            (true, false) => Some(GameOutcome::Defeat),
            (false, false) => Some(GameOutcome::Draw),
            (true, true) => None,
        }
    }

    /// End the round: stop simulating and award coins exactly once
    pub(crate) fn finish(&mut self, outcome: GameOutcome, events: &mut Vec<GameEvent>) {
        if !self.active {
            return;
        }
        self.active = false;
        self.outcome = Some(outcome);

        let coins = if self.coins_awarded {
            0
        } else {
            self.coins_awarded = true;
            self.config.session.coins_per_game
        };

        tracing::info!(
            "Session ended at tick {}: {:?}, {} coins",
            self.tick,
            outcome,
            coins
        );
        events.push(GameEvent::SessionEnded {
            tick: self.tick,
            outcome,
            coins,
        });
    }
}
