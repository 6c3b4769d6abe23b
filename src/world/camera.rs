//! Cameras and viewports
//!
//! Handles world/screen coordinate transforms for one or more viewports that
//! share a single canvas. Screen coordinates are canvas pixels.

use serde::{Deserialize, Serialize};

use crate::core::types::{EntityId, Vec2};

/// How a camera tracks its owner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CameraMode {
    /// Owner input moves the camera; the owner stays at the viewport center
    Drive,
    /// Owner moves in world space and the camera recenters on it
    Follow,
}

/// Screen-space rectangle inside the canvas
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Top-left corner in canvas pixels
    pub origin: Vec2,
    /// Width and height in pixels
    pub size: Vec2,
}

impl Viewport {
    pub fn new(origin: Vec2, size: Vec2) -> Self {
        Self { origin, size }
    }

    /// Center of the viewport in canvas pixels
    pub fn center(&self) -> Vec2 {
        self.origin + self.size * 0.5
    }

    pub fn contains(&self, screen: Vec2) -> bool {
        self.contains_with_margin(screen, 0.0)
    }

    /// True if `screen` lies within the viewport grown by `margin` on every side
    pub fn contains_with_margin(&self, screen: Vec2, margin: f32) -> bool {
        let min = self.origin - Vec2::splat(margin);
        let max = self.origin + self.size + Vec2::splat(margin);
        screen.x >= min.x && screen.x <= max.x && screen.y >= min.y && screen.y <= max.y
    }

    /// `count` viewports of equal size laid out left to right
    pub fn side_by_side(count: usize, width: f32, height: f32) -> Vec<Viewport> {
        (0..count)
            .map(|i| Viewport::new(Vec2::new(i as f32 * width, 0.0), Vec2::new(width, height)))
            .collect()
    }
}

/// A camera mapping world space into one viewport
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// World point shown at the viewport center
    pub offset: Vec2,
    pub viewport: Viewport,
    /// Entity this camera is bound to
    pub owner: Option<EntityId>,
    pub mode: CameraMode,
}

impl Camera {
    pub fn new(viewport: Viewport, owner: Option<EntityId>, mode: CameraMode) -> Self {
        Self {
            offset: Vec2::ZERO,
            viewport,
            owner,
            mode,
        }
    }

    /// Convert world coordinates to canvas coordinates
    pub fn to_screen(&self, world: Vec2) -> Vec2 {
        world - self.offset + self.viewport.center()
    }

    /// Convert canvas coordinates to world coordinates
    pub fn to_world(&self, screen: Vec2) -> Vec2 {
        screen - self.viewport.center() + self.offset
    }

    /// Move the camera by a delta in world units
    pub fn pan(&mut self, delta: Vec2) {
        self.offset += delta;
    }

    pub fn center_on(&mut self, world: Vec2) {
        self.offset = world;
    }

    /// True if a world point projects inside this viewport grown by `margin`
    pub fn sees(&self, world: Vec2, margin: f32) -> bool {
        self.viewport.contains_with_margin(self.to_screen(world), margin)
    }
}

/// Index of the camera whose viewport contains the pointer
pub fn camera_at(cameras: &[Camera], pointer: Vec2) -> Option<usize> {
    cameras.iter().position(|camera| camera.viewport.contains(pointer))
}

/// Unit aim vector from `from_world` toward the pointer
///
/// The pointer is resolved through whichever viewport it currently occupies.
/// Returns `None` when it is outside every viewport or on top of `from_world`.
pub fn aim_direction(cameras: &[Camera], pointer: Vec2, from_world: Vec2) -> Option<Vec2> {
    let camera = &cameras[camera_at(cameras, pointer)?];
    let target = camera.to_world(pointer);
    (target - from_world).try_normalize()
}
