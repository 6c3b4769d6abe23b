//! Static obstacle field
//!
//! Obstacles are axis-aligned rectangles scattered over the world once per
//! session by rejection sampling. Every movement system asks `collides` before
//! committing a step.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::config::{MapConfig, ObstacleConfig};
use crate::core::types::Vec2;

/// A rectangular obstacle in world space
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Rectangle center
    pub center: Vec2,
    /// Full width and height
    pub size: Vec2,
    /// Display color (CSS hex string)
    pub color: String,
}

impl Obstacle {
    pub fn new(center: Vec2, size: Vec2, color: impl Into<String>) -> Self {
        Self {
            center,
            size,
            color: color.into(),
        }
    }

    pub fn half_extents(&self) -> Vec2 {
        self.size * 0.5
    }

    pub fn min(&self) -> Vec2 {
        self.center - self.half_extents()
    }

    pub fn max(&self) -> Vec2 {
        self.center + self.half_extents()
    }

    /// Closest point of the rectangle (edges included) to `point`
    pub fn closest_point(&self, point: Vec2) -> Vec2 {
        point.clamp(self.min(), self.max())
    }

    /// True if `point` lies inside the rectangle or on its edge
    pub fn contains(&self, point: Vec2) -> bool {
        let (min, max) = (self.min(), self.max());
        point.x >= min.x && point.x <= max.x && point.y >= min.y && point.y <= max.y
    }

    /// Circle/rectangle overlap using the closest-point distance
    ///
    /// A point inside the rectangle always overlaps, even with zero radius.
    pub fn intersects_circle(&self, point: Vec2, radius: f32) -> bool {
        if self.contains(point) {
            return true;
        }
        point.distance_squared(self.closest_point(point)) < radius * radius
    }
}

/// All obstacles of one session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObstacleField {
    obstacles: Vec<Obstacle>,
    /// How many obstacles generation was asked for
    requested: usize,
}

impl ObstacleField {
    /// A field with exactly these obstacles
    pub fn from_obstacles(obstacles: Vec<Obstacle>) -> Self {
        let requested = obstacles.len();
        Self {
            obstacles,
            requested,
        }
    }

    /// Scatter obstacles over the world by rejection sampling
    ///
    /// Each candidate center must keep `min_distance` from every accepted
    /// obstacle and `min_distance_from_units` from every unit position. A
    /// single obstacle gets at most `max_placement_attempts` samples; when they
    /// run out the field is returned with fewer obstacles than requested and a
    /// warning is logged, so an over-dense config cannot hang session start.
    pub fn generate(
        config: &ObstacleConfig,
        map: &MapConfig,
        units: &[Vec2],
        rng: &mut impl Rng,
    ) -> Self {
        let requested = rng.gen_range(config.count_min..=config.count_max) as usize;
        let mut obstacles: Vec<Obstacle> = Vec::with_capacity(requested);

        for _ in 0..requested {
            let mut placed = None;

            for _ in 0..config.max_placement_attempts {
                let center = Vec2::new(
                    rng.gen::<f32>() * map.world_width - map.world_width / 2.0,
                    rng.gen::<f32>() * map.world_height - map.world_height / 2.0,
                );

                let clear_of_obstacles = obstacles
                    .iter()
                    .all(|other| center.distance(other.center) >= config.min_distance);
                let clear_of_units = units
                    .iter()
                    .all(|unit| center.distance(*unit) >= config.min_distance_from_units);

                if clear_of_obstacles && clear_of_units {
                    let size = Vec2::new(
                        rng.gen_range(config.min_width..=config.max_width),
                        rng.gen_range(config.min_height..=config.max_height),
                    );
                    placed = Some(Obstacle::new(center, size, config.color.clone()));
                    break;
                }
            }

            match placed {
                Some(obstacle) => obstacles.push(obstacle),
                None => {
                    tracing::warn!(
                        "Obstacle placement gave up after {} attempts: placed {} of {} (map too dense)",
                        config.max_placement_attempts,
                        obstacles.len(),
                        requested
                    );
                    break;
                }
            }
        }

        tracing::debug!("Generated {} obstacles", obstacles.len());

        Self {
            obstacles,
            requested,
        }
    }

    /// True if a circle at `point` overlaps any obstacle
    pub fn collides(&self, point: Vec2, radius: f32) -> bool {
        self.obstacles
            .iter()
            .any(|obstacle| obstacle.intersects_circle(point, radius))
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    /// Obstacles that could not be placed within the attempt budget
    pub fn shortfall(&self) -> usize {
        self.requested.saturating_sub(self.obstacles.len())
    }
}
