//! Coins and permanent upgrades
//!
//! Coins are earned once per finished session and spent on upgrades that
//! scale player stats in later sessions. Persisting a `Progression` is up to
//! the caller; it round-trips through serde.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::error::{ClashError, Result};

/// Coins awarded for finishing a session, win or lose
pub const COINS_PER_GAME: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Upgrade {
    /// Archer arrows hit for 20 instead of 15
    ArcherDamage,
    /// Healer projectiles restore 20 instead of 15
    HealerPotency,
    /// +20% movement speed
    SpeedBoost,
    /// +20% max hp
    HealthBoost,
}

impl Upgrade {
    pub const ALL: [Upgrade; 4] = [
        Upgrade::ArcherDamage,
        Upgrade::HealerPotency,
        Upgrade::SpeedBoost,
        Upgrade::HealthBoost,
    ];

    pub fn price(&self) -> u32 {
        match self {
            Upgrade::ArcherDamage | Upgrade::HealerPotency => 150,
            Upgrade::SpeedBoost | Upgrade::HealthBoost => 100,
        }
    }
}

impl fmt::Display for Upgrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Upgrade::ArcherDamage => "archer damage",
            Upgrade::HealerPotency => "healer potency",
            Upgrade::SpeedBoost => "speed boost",
            Upgrade::HealthBoost => "health boost",
        };
        f.write_str(name)
    }
}

/// Multipliers applied to human players when a session starts
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatModifiers {
    pub damage: f32,
    pub heal: f32,
    pub speed: f32,
    pub max_hp: f32,
}

impl Default for StatModifiers {
    fn default() -> Self {
        Self {
            damage: 1.0,
            heal: 1.0,
            speed: 1.0,
            max_hp: 1.0,
        }
    }
}

/// A player's wallet and owned upgrades
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Progression {
    pub total_coins: u32,
    pub upgrades: BTreeSet<Upgrade>,
}

impl Progression {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn owns(&self, upgrade: Upgrade) -> bool {
        self.upgrades.contains(&upgrade)
    }

    pub fn award(&mut self, coins: u32) {
        self.total_coins = self.total_coins.saturating_add(coins);
    }

    /// Buy an upgrade, deducting its price
    pub fn purchase(&mut self, upgrade: Upgrade) -> Result<()> {
        if self.owns(upgrade) {
            return Err(ClashError::AlreadyOwned(upgrade));
        }
        let needed = upgrade.price();
        if self.total_coins < needed {
            return Err(ClashError::InsufficientCoins {
                upgrade,
                needed,
                available: self.total_coins,
            });
        }
        self.total_coins -= needed;
        self.upgrades.insert(upgrade);
        tracing::info!("Purchased {} for {} coins", upgrade, needed);
        Ok(())
    }

    /// Stat multipliers for the owned upgrades
    pub fn modifiers(&self) -> StatModifiers {
        let mut modifiers = StatModifiers::default();
        for upgrade in &self.upgrades {
            match upgrade {
                Upgrade::ArcherDamage => modifiers.damage *= 4.0 / 3.0,
                Upgrade::HealerPotency => modifiers.heal *= 4.0 / 3.0,
                Upgrade::SpeedBoost => modifiers.speed *= 1.2,
                Upgrade::HealthBoost => modifiers.max_hp *= 1.2,
            }
        }
        modifiers
    }
}
