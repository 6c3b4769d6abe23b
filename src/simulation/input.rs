//! Player input abstraction
//!
//! The host samples its devices once per frame and exposes the result through
//! `InputSource`. Slots index `RosterConfig::players`.

use crate::core::types::Vec2;

pub trait InputSource {
    /// Movement intent for a player slot; each component in -1..=1
    fn movement(&self, slot: usize) -> Vec2;

    /// Whether the slot's fire control is held
    fn shoot(&self, slot: usize) -> bool;

    /// Aim point for the slot in canvas pixels, if it has one
    fn pointer(&self, slot: usize) -> Option<Vec2>;
}

/// Controls sampled for one player slot
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SlotInput {
    pub movement: Vec2,
    pub shoot: bool,
    pub pointer: Option<Vec2>,
}

/// Plain per-frame input; missing slots read as idle
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameInput {
    pub slots: Vec<SlotInput>,
}

impl FrameInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn slot_mut(&mut self, slot: usize) -> &mut SlotInput {
        if self.slots.len() <= slot {
            self.slots.resize(slot + 1, SlotInput::default());
        }
        &mut self.slots[slot]
    }

    pub fn with_movement(mut self, slot: usize, movement: Vec2) -> Self {
        self.slot_mut(slot).movement = movement;
        self
    }

    pub fn with_shot(mut self, slot: usize, pointer: Option<Vec2>) -> Self {
        let input = self.slot_mut(slot);
        input.shoot = true;
        input.pointer = pointer;
        self
    }
}

impl InputSource for FrameInput {
    fn movement(&self, slot: usize) -> Vec2 {
        self.slots
            .get(slot)
            .map(|s| s.movement.clamp(Vec2::splat(-1.0), Vec2::splat(1.0)))
            .unwrap_or(Vec2::ZERO)
    }

    fn shoot(&self, slot: usize) -> bool {
        self.slots.get(slot).is_some_and(|s| s.shoot)
    }

    fn pointer(&self, slot: usize) -> Option<Vec2> {
        self.slots.get(slot).and_then(|s| s.pointer)
    }
}
