//! ClashRun - arcade battle simulation core
//!
//! Squads of human players and AI allies fight enemy robots across an
//! obstacle-strewn world viewed through one or more cameras.

pub mod ai;
pub mod combat;
pub mod core;
pub mod entity;
pub mod progression;
pub mod render;
pub mod simulation;
pub mod world;
