pub mod config;
pub mod error;
pub mod types;

pub use config::GameConfig;
pub use error::{ClashError, Result};
pub use types::{EntityId, Faction, Role, Tick, Vec2};
