//! ClashRun - Headless Runner
//!
//! Plays a session with scripted bots in every player slot and prints a
//! summary. Useful for balance checks and reproducing seeds.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use clashrun::core::config::{GameConfig, RosterConfig};
use clashrun::core::error::Result;
use clashrun::core::types::Faction;
use clashrun::progression::{Progression, StatModifiers};
use clashrun::simulation::{run_tick, FrameInput, GameEvent, GameSession};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Layout {
    /// Config roster as loaded (single player unless the file overrides it)
    Config,
    Single,
    ThreePlayer,
    SplitScreen,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Json,
    Text,
}

/// Headless ClashRun session with bot players
#[derive(Parser, Debug)]
#[command(name = "clashrun")]
#[command(about = "Run a ClashRun session with scripted players and report the result")]
struct Args {
    /// TOML file merged over the default config
    #[arg(long)]
    config: Option<PathBuf>,

    /// Player roster
    #[arg(long, value_enum, default_value_t = Layout::Config)]
    layout: Layout,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Maximum ticks before giving up
    #[arg(long, default_value_t = 18_000)]
    max_ticks: u64,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Json)]
    format: Format,

    /// Saved progression (JSON) whose upgrades apply to the players
    #[arg(long)]
    progression: Option<PathBuf>,
}

/// JSON output structure
#[derive(Serialize)]
struct SessionSummary {
    outcome: String,
    ticks: u64,
    seed: u64,
    friendly_survivors: usize,
    hostile_survivors: usize,
    players_alive: usize,
    shots_fired: usize,
    kills: usize,
    obstacles: usize,
    obstacle_shortfall: usize,
    coins: u32,
}

/// Distance bots try to keep from their target
const BOT_STANDOFF: f32 = 150.0;

/// Steer every living player toward the nearest enemy and shoot at it
///
/// Healers aim at the nearest injured friendly instead, and hold fire when
/// nobody needs healing.
fn bot_input(session: &GameSession) -> FrameInput {
    let mut input = FrameInput::new();
    let Some(camera) = session.primary_camera() else {
        return input;
    };

    for (slot, id) in session.players.iter().enumerate() {
        let Some(player) = session.entities.get_living(*id) else {
            continue;
        };
        let Some(enemy) = session
            .entities
            .nearest_living(player.position, Faction::Hostile)
            .and_then(|e| session.entities.get(e))
        else {
            continue;
        };

        let to_enemy = enemy.position - player.position;
        let movement = if to_enemy.length() > BOT_STANDOFF {
            to_enemy.normalize_or_zero()
        } else {
            -to_enemy.normalize_or_zero()
        };
        input = input.with_movement(slot, movement);

        let heals = player.shot.is_some_and(|s| s.kind.heals());
        let aim_at = if heals {
            session
                .entities
                .living_of(Faction::Friendly)
                .filter(|e| e.id != *id && e.is_injured())
                .map(|e| e.position)
                .next()
        } else {
            Some(enemy.position)
        };

        if let Some(target) = aim_at {
            let own_camera = session.cameras.iter().find(|c| c.owner == Some(*id));
            let pointer = own_camera.unwrap_or(camera).to_screen(target);
            input = input.with_shot(slot, Some(pointer));
        }
    }
    input
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("clashrun=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    match args.layout {
        Layout::Config => {}
        Layout::Single => config.roster = RosterConfig::single_player(),
        Layout::ThreePlayer => config.roster = RosterConfig::three_player(),
        Layout::SplitScreen => config.roster = RosterConfig::split_screen(),
    }
    if args.seed.is_some() {
        config.session.seed = args.seed;
    }

    let modifiers = match &args.progression {
        Some(path) => {
            let progression: Progression = serde_json::from_str(&std::fs::read_to_string(path)?)?;
            progression.modifiers()
        }
        None => StatModifiers::default(),
    };

    let mut session = GameSession::new(config, modifiers)?;
    tracing::info!("ClashRun starting (seed {})", session.seed());

    let mut shots_fired = 0;
    let mut kills = 0;
    let mut coins = 0;

    while session.is_active() && session.tick < args.max_ticks {
        let input = bot_input(&session);
        for event in run_tick(&mut session, &input) {
            match event {
                GameEvent::ProjectileFired { .. } => shots_fired += 1,
                GameEvent::Killed { .. } => kills += 1,
                GameEvent::SessionEnded { coins: awarded, .. } => coins += awarded,
                _ => {}
            }
        }
    }

    let outcome = match session.outcome {
        Some(outcome) => format!("{:?}", outcome),
        None => "Timeout".to_string(),
    };

    let summary = SessionSummary {
        outcome,
        ticks: session.tick,
        seed: session.seed(),
        friendly_survivors: session.entities.living_of(Faction::Friendly).count(),
        hostile_survivors: session.entities.living_of(Faction::Hostile).count(),
        players_alive: session.living_players().count(),
        shots_fired,
        kills,
        obstacles: session.obstacles.len(),
        obstacle_shortfall: session.obstacles.shortfall(),
        coins,
    };

    match args.format {
        Format::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
        Format::Text => {
            println!("Session Result");
            println!("==============");
            println!("Outcome: {}", summary.outcome);
            println!("Ticks: {}", summary.ticks);
            println!("Seed: {}", summary.seed);
            println!(
                "Survivors: {} friendly ({} players), {} hostile",
                summary.friendly_survivors, summary.players_alive, summary.hostile_survivors
            );
            println!("Shots fired: {}, kills: {}", summary.shots_fired, summary.kills);
            println!(
                "Obstacles: {} ({} not placed)",
                summary.obstacles, summary.obstacle_shortfall
            );
            println!("Coins earned: {}", summary.coins);
        }
    }

    Ok(())
}
