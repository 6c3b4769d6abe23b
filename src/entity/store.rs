//! Entity storage
//!
//! A flat vector indexed by `EntityId`. Dead entities stay in place so ids
//! held as targets remain valid lookups for the whole session.

use ordered_float::OrderedFloat;

use crate::core::types::{EntityId, Faction, Vec2};
use crate::entity::unit::Entity;

#[derive(Debug, Clone, Default)]
pub struct EntityStore {
    entities: Vec<Entity>,
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id the next spawned entity will receive
    pub fn next_id(&self) -> EntityId {
        EntityId(self.entities.len() as u32)
    }

    /// Add an entity built for `next_id()`
    pub fn spawn(&mut self, entity: Entity) -> EntityId {
        debug_assert_eq!(entity.id, self.next_id());
        let id = entity.id;
        self.entities.push(entity);
        id
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(id.index())
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(id.index())
    }

    /// Lookup that treats dead entities as absent
    pub fn get_living(&self, id: EntityId) -> Option<&Entity> {
        self.get(id).filter(|e| e.is_alive())
    }

    pub fn get_living_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.get_mut(id).filter(|e| e.is_alive())
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.entities.iter().map(|e| e.id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.entities.iter_mut()
    }

    pub fn living(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter().filter(|e| e.is_alive())
    }

    pub fn living_of(&self, faction: Faction) -> impl Iterator<Item = &Entity> {
        self.living().filter(move |e| e.faction == faction)
    }

    pub fn any_living(&self, faction: Faction) -> bool {
        self.living_of(faction).next().is_some()
    }

    /// Nearest living entity of `faction`; ties go to the earliest id
    pub fn nearest_living(&self, from: Vec2, faction: Faction) -> Option<EntityId> {
        self.living_of(faction)
            .min_by_key(|e| OrderedFloat(from.distance(e.position)))
            .map(|e| e.id)
    }
}
