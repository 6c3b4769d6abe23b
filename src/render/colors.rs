//! Color definitions for roles and visual states

use serde::Serialize;

use crate::core::types::Role;

/// RGBA color (0.0 to 1.0 per channel)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Parse `#rrggbb`; `None` for anything else
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#')?;
        if digits.len() != 6 {
            return None;
        }
        let channel = |i: usize| {
            u8::from_str_radix(digits.get(i..i + 2)?, 16)
                .ok()
                .map(|v| v as f32 / 255.0)
        };
        Some(Self::new(channel(0)?, channel(2)?, channel(4)?, 1.0))
    }
}

/// Canvas clear color
pub const BACKGROUND: Color = Color::new(0.925, 0.941, 0.945, 1.0);

/// Fallback for obstacles with an unparsable color
pub const OBSTACLE: Color = Color::new(0.498, 0.549, 0.553, 1.0);

/// Enemy mid-attack
pub const ATTACKING: Color = Color::new(0.753, 0.224, 0.169, 1.0);

/// Enemy while slowed
pub const SLOWED: Color = Color::new(0.498, 0.549, 0.553, 1.0);

/// Healer glow after a heal
pub const HEAL_GLOW: Color = Color::new(0.180, 0.800, 0.443, 1.0);

/// Get the base color for a role
pub fn role_color(role: Role, human: bool) -> Color {
    match (role, human) {
        (Role::Gunner, _) => Color::new(0.204, 0.596, 0.859, 1.0), // Blue
        (Role::Archer, true) => Color::new(0.153, 0.682, 0.376, 1.0), // Green
        (Role::Archer, false) => Color::new(0.906, 0.298, 0.235, 1.0), // Red
        (Role::Healer, true) => Color::new(0.557, 0.267, 0.678, 1.0), // Purple
        (Role::Healer, false) => Color::new(0.153, 0.682, 0.376, 1.0), // Green
        (Role::Robot, _) => Color::new(0.584, 0.647, 0.651, 1.0),   // Steel
    }
}
