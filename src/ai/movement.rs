//! Obstacle-gated movement shared by every unit kind
//!
//! Each helper takes a desired step and returns the position the unit ends up
//! at. A blocked unit tries its fallbacks in order and otherwise stays put.

use crate::core::types::{perpendicular, Vec2};
use crate::world::obstacles::ObstacleField;

/// Limit a step to at most `max_len` world units
pub fn clamp_step(step: Vec2, max_len: f32) -> Vec2 {
    step.clamp_length_max(max_len.max(0.0))
}

/// Take the whole step or nothing
pub fn step_or_stay(position: Vec2, step: Vec2, radius: f32, obstacles: &ObstacleField) -> Vec2 {
    let candidate = position + step;
    if obstacles.collides(candidate, radius) {
        position
    } else {
        candidate
    }
}

/// Full step, then (half-x, y), then (x, half-y)
pub fn step_with_partial_fallback(
    position: Vec2,
    step: Vec2,
    radius: f32,
    obstacles: &ObstacleField,
) -> Vec2 {
    [
        step,
        Vec2::new(step.x * 0.5, step.y),
        Vec2::new(step.x, step.y * 0.5),
    ]
    .into_iter()
    .map(|s| position + s)
    .find(|candidate| !obstacles.collides(*candidate, radius))
    .unwrap_or(position)
}

/// Full step, then a sidestep perpendicular to `heading`, then the opposite one
///
/// `sidestep_len` is the length of the sideways move in world units.
pub fn step_with_sidestep(
    position: Vec2,
    step: Vec2,
    heading: Vec2,
    sidestep_len: f32,
    radius: f32,
    obstacles: &ObstacleField,
) -> Vec2 {
    let direct = position + step;
    if !obstacles.collides(direct, radius) {
        return direct;
    }

    let Some(side) = perpendicular(heading).try_normalize() else {
        return position;
    };
    let side = side * sidestep_len;

    [position + side, position - side]
        .into_iter()
        .find(|candidate| !obstacles.collides(*candidate, radius))
        .unwrap_or(position)
}

/// Drive-camera movement: each axis is gated on its own
///
/// Returns the new offset. A unit pressed against a wall can still slide
/// along it on the free axis.
pub fn step_per_axis(position: Vec2, step: Vec2, radius: f32, obstacles: &ObstacleField) -> Vec2 {
    let mut result = position;
    if step.y != 0.0 && !obstacles.collides(Vec2::new(result.x, result.y + step.y), radius) {
        result.y += step.y;
    }
    if step.x != 0.0 && !obstacles.collides(Vec2::new(result.x + step.x, result.y), radius) {
        result.x += step.x;
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::obstacles::Obstacle;

    fn wall_at(x: f32, y: f32, w: f32, h: f32) -> ObstacleField {
        ObstacleField::from_obstacles(vec![Obstacle::new(
            Vec2::new(x, y),
            Vec2::new(w, h),
            "#7f8c8d",
        )])
    }

    #[test]
    fn test_clamp_step() {
        let step = clamp_step(Vec2::new(3.0, 4.0), 2.5);
        assert!((step.length() - 2.5).abs() < 1e-6);
        assert_eq!(clamp_step(Vec2::new(1.0, 0.0), 2.5), Vec2::new(1.0, 0.0));
    }

    #[test]
    fn test_unblocked_step_taken() {
        let field = ObstacleField::default();
        let end = step_with_partial_fallback(Vec2::ZERO, Vec2::new(1.0, 1.0), 25.0, &field);
        assert_eq!(end, Vec2::new(1.0, 1.0));
    }

    #[test]
    fn test_partial_fallback_halves_x() {
        // Wall whose left edge sits at x = 26.75; radius 25 blocks x > 1.75
        let field = wall_at(76.75, 0.0, 100.0, 400.0);
        let end = step_with_partial_fallback(Vec2::ZERO, Vec2::new(2.0, 1.0), 25.0, &field);
        assert_eq!(end, Vec2::new(1.0, 1.0));
    }

    #[test]
    fn test_fully_blocked_stays_put() {
        let field = wall_at(0.0, 0.0, 100.0, 100.0);
        let start = Vec2::new(10.0, 10.0);
        let end = step_with_partial_fallback(start, Vec2::new(1.0, 0.0), 25.0, &field);
        assert_eq!(end, start);
        assert_eq!(step_or_stay(start, Vec2::new(1.0, 0.0), 25.0, &field), start);
    }

    #[test]
    fn test_sidestep_when_direct_path_blocked() {
        // Clear path is taken as is
        let field = wall_at(60.0, 0.0, 40.0, 20.0);
        let end = step_with_sidestep(
            Vec2::ZERO,
            Vec2::new(3.0, 0.0),
            Vec2::new(1.0, 0.0),
            2.1,
            20.0,
            &field,
        );
        assert_eq!(end, Vec2::new(3.0, 0.0));

        let field = wall_at(22.0, 0.0, 40.0, 20.0);
        let end = step_with_sidestep(
            Vec2::new(0.0, 29.0),
            Vec2::new(3.0, 0.0),
            Vec2::new(1.0, 0.0),
            2.0,
            20.0,
            &field,
        );
        // Perpendicular of +x is +y
        assert_eq!(end, Vec2::new(0.0, 31.0));
    }

    #[test]
    fn test_reverse_sidestep_when_first_side_blocked() {
        // Below the wall: the direct step and the +y sidestep both clip it
        let field = wall_at(22.0, 0.0, 40.0, 20.0);
        let end = step_with_sidestep(
            Vec2::new(0.0, -29.0),
            Vec2::new(3.0, 0.0),
            Vec2::new(1.0, 0.0),
            2.0,
            20.0,
            &field,
        );
        assert_eq!(end, Vec2::new(0.0, -31.0));
    }

    #[test]
    fn test_per_axis_slides_along_wall() {
        // Wall to the right; moving diagonally keeps the y component
        let field = wall_at(42.0, 0.0, 40.0, 400.0);
        let end = step_per_axis(Vec2::ZERO, Vec2::new(4.0, 4.0), 20.0, &field);
        assert_eq!(end, Vec2::new(0.0, 4.0));
    }
}
