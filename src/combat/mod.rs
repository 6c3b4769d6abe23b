//! Projectiles and hit resolution

pub mod projectile;
pub mod resolution;

pub use projectile::{Projectile, ProjectileKind};
pub use resolution::update_projectiles;
