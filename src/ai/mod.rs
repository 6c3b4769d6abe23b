//! Computer-controlled unit behavior

pub mod ally;
pub mod enemy;
pub mod movement;

pub use ally::update_allies;
pub use enemy::{update_enemies, EnemyIntent};
