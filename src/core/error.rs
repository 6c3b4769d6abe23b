use thiserror::Error;

use crate::progression::Upgrade;

#[derive(Error, Debug)]
pub enum ClashError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Roster has no {0}")]
    EmptyRoster(&'static str),

    #[error("Not enough coins for {upgrade}: need {needed}, have {available}")]
    InsufficientCoins {
        upgrade: Upgrade,
        needed: u32,
        available: u32,
    },

    #[error("Upgrade already owned: {0}")]
    AlreadyOwned(Upgrade),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Config serialization error: {0}")]
    TomlSerError(#[from] toml::ser::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ClashError>;
