//! World-space geometry: obstacles and cameras

pub mod camera;
pub mod obstacles;

pub use camera::{aim_direction, Camera, CameraMode, Viewport};
pub use obstacles::{Obstacle, ObstacleField};
