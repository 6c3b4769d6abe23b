//! Entity records, storage and timed status effects

pub mod status;
pub mod store;
pub mod unit;

pub use status::{advance_status, Countdown, SlowEffect};
pub use store::EntityStore;
pub use unit::{CombatStats, Controller, Entity, HealingStats, ShotStats};
