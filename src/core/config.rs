//! Game configuration with documented defaults
//!
//! All tunable numbers live here. Defaults reproduce the arcade game's
//! balance at 60 frames per second; every timer and speed is expressed per
//! frame (tick), distances in world units.
//!
//! A TOML file may override any subset of fields. The file is deep-merged over
//! the defaults, so `[robot]\nspeed = 2.0` changes only the robot speed.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{ClashError, Result};
use crate::core::types::{Role, Vec2};
use crate::world::camera::CameraMode;

/// Complete configuration for one game session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub map: MapConfig,
    pub viewport: ViewportConfig,
    /// Human-controlled generic shooter
    pub player_gunner: UnitConfig,
    /// Human-controlled archer
    pub player_archer: UnitConfig,
    /// Human-controlled healer
    pub player_healer: UnitConfig,
    /// AI archer following the primary camera
    pub ally_archer: UnitConfig,
    /// AI healer following the primary camera
    pub ally_healer: UnitConfig,
    pub robot: UnitConfig,
    pub enemy_ai: EnemyAiConfig,
    pub ally_ai: AllyAiConfig,
    pub obstacles: ObstacleConfig,
    pub projectiles: ProjectileConfig,
    pub session: SessionConfig,
    pub roster: RosterConfig,
}

/// World dimensions and frame timing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// World width; obstacles are placed in [-w/2, w/2)
    pub world_width: f32,
    /// World height; obstacles are placed in [-h/2, h/2)
    pub world_height: f32,
    /// Milliseconds represented by one tick, used for time-varying motion
    pub frame_ms: f32,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            world_width: 2000.0,
            world_height: 2000.0,
            frame_ms: 1000.0 / 60.0,
        }
    }
}

/// Size of a single viewport in pixels
///
/// Split-screen layouts place one viewport per camera side by side, so the
/// canvas is `width * cameras` wide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
        }
    }
}

/// Stats shared by every unit kind
///
/// Not every role reads every field: robots ignore healing, healers ignore
/// `damage`, human players ignore `follow_distance`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnitConfig {
    pub width: f32,
    pub height: f32,
    /// Maximum movement per tick
    pub speed: f32,
    pub max_hp: f32,
    pub damage: f32,
    pub attack_range: f32,
    /// Ticks between attacks (or shots for human players)
    pub attack_cooldown: u32,
    pub heal_amount: f32,
    /// Ticks between heals
    pub heal_cooldown: u32,
    /// AI allies stop approaching the camera inside this distance
    pub follow_distance: f32,
    /// Radius used for obstacle collision checks
    pub collision_radius: f32,
}

impl Default for UnitConfig {
    fn default() -> Self {
        Self {
            width: 40.0,
            height: 50.0,
            speed: 3.0,
            max_hp: 100.0,
            damage: 0.0,
            attack_range: 0.0,
            attack_cooldown: 60,
            heal_amount: 0.0,
            heal_cooldown: 0,
            follow_distance: 0.0,
            collision_radius: 20.0,
        }
    }
}

impl UnitConfig {
    pub fn gunner() -> Self {
        Self {
            width: 40.0,
            height: 50.0,
            speed: 4.0,
            max_hp: 120.0,
            damage: 10.0,
            attack_cooldown: 60,
            collision_radius: 20.0,
            ..Self::default()
        }
    }

    pub fn player_archer() -> Self {
        Self {
            width: 30.0,
            height: 40.0,
            speed: 3.0,
            max_hp: 100.0,
            damage: 15.0,
            attack_cooldown: 60,
            collision_radius: 15.0,
            ..Self::default()
        }
    }

    pub fn player_healer() -> Self {
        Self {
            width: 30.0,
            height: 40.0,
            speed: 2.5,
            max_hp: 80.0,
            heal_amount: 15.0,
            attack_cooldown: 90,
            collision_radius: 15.0,
            ..Self::default()
        }
    }

    pub fn ally_archer() -> Self {
        Self {
            width: 35.0,
            height: 45.0,
            speed: 2.8,
            max_hp: 100.0,
            damage: 15.0,
            attack_range: 200.0,
            attack_cooldown: 60,
            follow_distance: 50.0,
            collision_radius: 20.0,
            ..Self::default()
        }
    }

    pub fn ally_healer() -> Self {
        Self {
            width: 35.0,
            height: 45.0,
            speed: 3.0,
            max_hp: 80.0,
            heal_amount: 10.0,
            heal_cooldown: 90,
            follow_distance: 40.0,
            collision_radius: 20.0,
            ..Self::default()
        }
    }

    pub fn robot() -> Self {
        Self {
            width: 45.0,
            height: 55.0,
            speed: 1.5,
            max_hp: 150.0,
            damage: 12.0,
            attack_range: 60.0,
            attack_cooldown: 80,
            collision_radius: 25.0,
            ..Self::default()
        }
    }
}

/// Enemy behavior tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyAiConfig {
    /// Ticks between nearest-target re-evaluations
    pub retarget_interval: u32,
    /// Projectiles closer than this trigger evasion
    pub danger_radius: f32,
    /// Evasion speed as a multiple of current speed
    pub evade_speed_factor: f32,
    /// Speed multiplier while slowed
    pub slow_factor: f32,
    pub slow_min_interval: u32,
    pub slow_max_interval: u32,
    /// Period of the sinusoidal circling offset
    pub circle_period_ms: f32,
    pub circle_amplitude: f32,
    /// Fraction of the amplitude blended into the approach vector
    pub circle_weight: f32,
}

impl Default for EnemyAiConfig {
    fn default() -> Self {
        Self {
            retarget_interval: 30,
            danger_radius: 150.0,
            evade_speed_factor: 1.5,
            slow_factor: 0.3,
            slow_min_interval: 100,
            slow_max_interval: 300,
            circle_period_ms: 500.0,
            circle_amplitude: 30.0,
            circle_weight: 0.1,
        }
    }
}

/// Ally behavior tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AllyAiConfig {
    /// Sidestep length as a fraction of speed when the direct path is blocked
    pub sidestep_factor: f32,
    /// Duration of the cosmetic heal effect
    pub heal_effect_ticks: u32,
}

impl Default for AllyAiConfig {
    fn default() -> Self {
        Self {
            sidestep_factor: 0.7,
            heal_effect_ticks: 30,
        }
    }
}

/// Obstacle generation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObstacleConfig {
    pub count_min: u32,
    pub count_max: u32,
    pub min_width: f32,
    pub max_width: f32,
    pub min_height: f32,
    pub max_height: f32,
    pub color: String,
    /// Minimum center distance between two obstacles
    pub min_distance: f32,
    /// Minimum center distance between an obstacle and any unit
    pub min_distance_from_units: f32,
    /// Samples tried per obstacle before generation gives up
    pub max_placement_attempts: u32,
}

impl Default for ObstacleConfig {
    fn default() -> Self {
        Self {
            count_min: 15,
            count_max: 20,
            min_width: 60.0,
            max_width: 100.0,
            min_height: 60.0,
            max_height: 100.0,
            color: "#7f8c8d".to_string(),
            min_distance: 200.0,
            min_distance_from_units: 250.0,
            max_placement_attempts: 1000,
        }
    }
}

/// Projectile flight and hit parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileConfig {
    /// Distance travelled per tick
    pub speed: f32,
    pub damage_hit_radius: f32,
    pub arrow_hit_radius: f32,
    pub heal_hit_radius: f32,
    /// Pixels beyond the viewport edge before a projectile is discarded
    pub offscreen_margin: f32,
}

impl Default for ProjectileConfig {
    fn default() -> Self {
        Self {
            speed: 5.0,
            damage_hit_radius: 20.0,
            arrow_hit_radius: 30.0,
            heal_hit_radius: 35.0,
            offscreen_margin: 50.0,
        }
    }
}

/// Session-level settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Fixed RNG seed; a random seed is drawn when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Coins awarded once when a session ends
    pub coins_per_game: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: None,
            coins_per_game: crate::progression::COINS_PER_GAME,
        }
    }
}

/// A human-controlled unit slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSlot {
    pub role: Role,
    pub spawn: [f32; 2],
    /// Camera bound to this player, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub camera: Option<CameraMode>,
}

/// An AI-controlled unit slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitSlot {
    pub role: Role,
    pub spawn: [f32; 2],
}

/// Who takes part in a session and where they start
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RosterConfig {
    pub players: Vec<PlayerSlot>,
    pub allies: Vec<UnitSlot>,
    pub enemies: Vec<UnitSlot>,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self::single_player()
    }
}

impl RosterConfig {
    /// One gunner driving the only camera, escorted by an AI archer and healer
    pub fn single_player() -> Self {
        Self {
            players: vec![PlayerSlot {
                role: Role::Gunner,
                spawn: [0.0, 0.0],
                camera: Some(CameraMode::Drive),
            }],
            allies: Self::default_allies(),
            enemies: Self::default_enemies(),
        }
    }

    /// Three players sharing one camera driven by the gunner
    pub fn three_player() -> Self {
        Self {
            players: vec![
                PlayerSlot {
                    role: Role::Gunner,
                    spawn: [0.0, 0.0],
                    camera: Some(CameraMode::Drive),
                },
                PlayerSlot {
                    role: Role::Archer,
                    spawn: [-80.0, 0.0],
                    camera: None,
                },
                PlayerSlot {
                    role: Role::Healer,
                    spawn: [80.0, 0.0],
                    camera: None,
                },
            ],
            allies: Self::default_allies(),
            enemies: Self::default_enemies(),
        }
    }

    /// Two players with one camera each, rendered side by side
    pub fn split_screen() -> Self {
        Self {
            players: vec![
                PlayerSlot {
                    role: Role::Archer,
                    spawn: [0.0, 0.0],
                    camera: Some(CameraMode::Drive),
                },
                PlayerSlot {
                    role: Role::Healer,
                    spawn: [80.0, 0.0],
                    camera: Some(CameraMode::Follow),
                },
            ],
            allies: Vec::new(),
            enemies: Self::default_enemies(),
        }
    }

    fn default_allies() -> Vec<UnitSlot> {
        vec![
            UnitSlot {
                role: Role::Archer,
                spawn: [-40.0, 60.0],
            },
            UnitSlot {
                role: Role::Healer,
                spawn: [60.0, 40.0],
            },
        ]
    }

    fn default_enemies() -> Vec<UnitSlot> {
        vec![UnitSlot {
            role: Role::Robot,
            spawn: [200.0, -100.0],
        }]
    }

    /// All spawn positions, used to keep obstacles clear of starting units
    pub fn spawn_points(&self) -> Vec<Vec2> {
        self.players
            .iter()
            .map(|p| p.spawn)
            .chain(self.allies.iter().map(|a| a.spawn))
            .chain(self.enemies.iter().map(|e| e.spawn))
            .map(Vec2::from)
            .collect()
    }

    /// Number of cameras this roster needs
    pub fn camera_count(&self) -> usize {
        self.players.iter().filter(|p| p.camera.is_some()).count()
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            map: MapConfig::default(),
            viewport: ViewportConfig::default(),
            player_gunner: UnitConfig::gunner(),
            player_archer: UnitConfig::player_archer(),
            player_healer: UnitConfig::player_healer(),
            ally_archer: UnitConfig::ally_archer(),
            ally_healer: UnitConfig::ally_healer(),
            robot: UnitConfig::robot(),
            enemy_ai: EnemyAiConfig::default(),
            ally_ai: AllyAiConfig::default(),
            obstacles: ObstacleConfig::default(),
            projectiles: ProjectileConfig::default(),
            session: SessionConfig::default(),
            roster: RosterConfig::default(),
        }
    }
}

impl GameConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults with a different roster
    pub fn with_roster(roster: RosterConfig) -> Self {
        Self {
            roster,
            ..Self::default()
        }
    }

    /// Load a TOML file and merge it over the defaults
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Parse TOML text and merge it over the defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let overrides: toml::Table = content.parse()?;
        let mut merged = match toml::Value::try_from(Self::default())? {
            toml::Value::Table(table) => table,
            _ => return Err(ClashError::InvalidConfig("defaults are not a table".into())),
        };
        merge_tables(&mut merged, overrides);
        let config: GameConfig = toml::Value::Table(merged).try_into()?;
        config.validate()?;
        Ok(config)
    }

    /// Role stats for a human-controlled unit
    pub fn player_stats(&self, role: Role) -> &UnitConfig {
        match role {
            Role::Archer => &self.player_archer,
            Role::Healer => &self.player_healer,
            Role::Gunner | Role::Robot => &self.player_gunner,
        }
    }

    /// Role stats for an AI-controlled unit
    pub fn ai_stats(&self, role: Role) -> &UnitConfig {
        match role {
            Role::Archer => &self.ally_archer,
            Role::Healer => &self.ally_healer,
            Role::Robot => &self.robot,
            Role::Gunner => &self.player_gunner,
        }
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.roster.players.is_empty() {
            return Err(ClashError::EmptyRoster("players"));
        }

        if self.roster.camera_count() == 0 {
            return Err(ClashError::InvalidConfig(
                "at least one player must own a camera".into(),
            ));
        }

        if self.map.world_width <= 0.0 || self.map.world_height <= 0.0 {
            return Err(ClashError::InvalidConfig(format!(
                "world size must be positive, got {}x{}",
                self.map.world_width, self.map.world_height
            )));
        }

        if self.viewport.width <= 0.0 || self.viewport.height <= 0.0 {
            return Err(ClashError::InvalidConfig(format!(
                "viewport size must be positive, got {}x{}",
                self.viewport.width, self.viewport.height
            )));
        }

        if !(self.map.frame_ms > 0.0) || !(self.enemy_ai.circle_period_ms > 0.0) {
            return Err(ClashError::InvalidConfig(format!(
                "map.frame_ms ({}) and enemy_ai.circle_period_ms ({}) must be positive",
                self.map.frame_ms, self.enemy_ai.circle_period_ms
            )));
        }

        let obstacles = &self.obstacles;
        if obstacles.count_min > obstacles.count_max {
            return Err(ClashError::InvalidConfig(format!(
                "obstacles.count_min ({}) should be <= count_max ({})",
                obstacles.count_min, obstacles.count_max
            )));
        }
        if obstacles.min_width > obstacles.max_width
            || obstacles.min_height > obstacles.max_height
        {
            return Err(ClashError::InvalidConfig(
                "obstacle size ranges must have min <= max".into(),
            ));
        }
        if obstacles.min_width <= 0.0 || obstacles.min_height <= 0.0 {
            return Err(ClashError::InvalidConfig("obstacle sizes must be positive".into()));
        }
        if obstacles.max_placement_attempts == 0 {
            return Err(ClashError::InvalidConfig(
                "obstacles.max_placement_attempts must be at least 1".into(),
            ));
        }

        // Each obstacle keeps a disk of radius min_distance / 2 to itself
        let keep_out = std::f32::consts::PI * (obstacles.min_distance * 0.5).powi(2);
        let world_area = self.map.world_width * self.map.world_height;
        if obstacles.count_max as f32 * keep_out > world_area {
            return Err(ClashError::InvalidConfig(format!(
                "{} obstacles spaced {} apart cannot fit a {}x{} world",
                obstacles.count_max,
                obstacles.min_distance,
                self.map.world_width,
                self.map.world_height
            )));
        }

        if self.enemy_ai.slow_min_interval > self.enemy_ai.slow_max_interval {
            return Err(ClashError::InvalidConfig(format!(
                "enemy_ai.slow_min_interval ({}) should be <= slow_max_interval ({})",
                self.enemy_ai.slow_min_interval, self.enemy_ai.slow_max_interval
            )));
        }
        if self.enemy_ai.retarget_interval == 0 {
            return Err(ClashError::InvalidConfig(
                "enemy_ai.retarget_interval must be at least 1".into(),
            ));
        }

        for (name, unit) in [
            ("player_gunner", &self.player_gunner),
            ("player_archer", &self.player_archer),
            ("player_healer", &self.player_healer),
            ("ally_archer", &self.ally_archer),
            ("ally_healer", &self.ally_healer),
            ("robot", &self.robot),
        ] {
            if unit.speed < 0.0 || unit.max_hp <= 0.0 {
                return Err(ClashError::InvalidConfig(format!(
                    "{}: speed must be >= 0 and max_hp > 0",
                    name
                )));
            }
        }

        if self.projectiles.speed <= 0.0 {
            return Err(ClashError::InvalidConfig("projectile speed must be positive".into()));
        }

        Ok(())
    }
}

/// Recursively overlay `overrides` onto `base`; non-table values replace
fn merge_tables(base: &mut toml::Table, overrides: toml::Table) {
    for (key, value) in overrides {
        match (base.get_mut(&key), value) {
            (Some(toml::Value::Table(existing)), toml::Value::Table(incoming)) => {
                merge_tables(existing, incoming);
            }
            (_, value) => {
                base.insert(key, value);
            }
        }
    }
}
