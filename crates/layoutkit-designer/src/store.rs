//! Placed-entity store.
//!
//! One arena holds every area, storage and facility of a layout. Entities are
//! addressed by id through a map into the arena, and drawn in insertion order
//! (last is top-most). All area outlines are committed through
//! [`EntityStore::commit_area`], which enforces the bounding-box invariant.

use std::collections::HashMap;

use layoutkit_core::EditorError;

use crate::geometry::{fit_box_to_outline, satisfies_bounds_invariant};
use crate::model::{Area, Placeable, PlacedEntity, Point};

/// Tolerance, in layout units, for the box-vs-outline check.
const BOUNDS_TOLERANCE: f64 = 1.0;

#[derive(Debug, Clone, Default)]
pub struct EntityStore {
    slots: Vec<Option<PlacedEntity>>,
    free: Vec<usize>,
    index: HashMap<u64, usize>,
    order: Vec<u64>,
    next_id: u64,
}

/// Repairs a non-rectangle area whose box does not match its outline.
fn enforce_invariant(area: Area) -> Area {
    if satisfies_bounds_invariant(&area, BOUNDS_TOLERANCE) {
        return area;
    }
    tracing::warn!(
        "area {} box ({}, {}) {}x{} does not enclose its outline, refitting",
        area.id,
        area.x,
        area.y,
        area.width,
        area.height
    );
    fit_box_to_outline(&area)
}

impl EntityStore {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            ..Default::default()
        }
    }

    /// Builds a store from loaded entities, repairing any invalid area box.
    ///
    /// An entity whose id is already taken gets a fresh id above every loaded one.
    pub fn from_entities(entities: impl IntoIterator<Item = PlacedEntity>) -> Self {
        let entities: Vec<PlacedEntity> = entities.into_iter().collect();
        let mut store = Self::new();
        store.next_id = entities.iter().map(|e| e.id() + 1).fold(1, u64::max);
        for entity in entities {
            let id = entity.id();
            let entity = if store.contains(id) {
                let fresh = store.generate_id();
                tracing::warn!(
                    "duplicate id {} for {} '{}', reassigned to {}",
                    id,
                    entity.kind(),
                    entity.name(),
                    fresh
                );
                entity.with_id(fresh)
            } else {
                entity
            };
            store.insert(entity);
        }
        store
    }

    /// Reserves a fresh id.
    pub fn generate_id(&mut self) -> u64 {
        let id = self.next_id.max(1);
        self.next_id = id + 1;
        id
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, id: u64) -> bool {
        self.index.contains_key(&id)
    }

    /// Adds an entity on top of the draw order, replacing any entity with the same id.
    pub fn insert(&mut self, entity: PlacedEntity) -> u64 {
        let entity = match entity {
            PlacedEntity::Area(area) => PlacedEntity::Area(enforce_invariant(area)),
            other => other,
        };
        let id = entity.id();
        if self.contains(id) {
            self.remove(id);
        }
        self.next_id = self.next_id.max(id + 1);

        let slot = match self.free.pop() {
            Some(slot) => {
                self.slots[slot] = Some(entity);
                slot
            }
            None => {
                self.slots.push(Some(entity));
                self.slots.len() - 1
            }
        };
        self.index.insert(id, slot);
        self.order.push(id);
        id
    }

    pub fn remove(&mut self, id: u64) -> Option<PlacedEntity> {
        let slot = self.index.remove(&id)?;
        self.order.retain(|&other| other != id);
        self.free.push(slot);
        self.slots.get_mut(slot)?.take()
    }

    pub fn get(&self, id: u64) -> Option<&PlacedEntity> {
        let slot = *self.index.get(&id)?;
        self.slots.get(slot)?.as_ref()
    }

    pub fn area(&self, id: u64) -> Option<&Area> {
        self.get(id)?.as_area()
    }

    fn get_mut(&mut self, id: u64) -> Option<&mut PlacedEntity> {
        let slot = *self.index.get(&id)?;
        self.slots.get_mut(slot)?.as_mut()
    }

    /// Replaces an existing area. The stored value always satisfies the
    /// bounding-box invariant; the committed value is returned.
    ///
    /// Areas with non-finite coordinates are refused and the stored value is kept.
    pub fn commit_area(&mut self, area: Area) -> Result<Area, EditorError> {
        let id = area.id;
        if !area.is_finite() {
            return Err(EditorError::NonFiniteGeometry { id });
        }
        let area = enforce_invariant(area);
        match self.get_mut(id) {
            Some(PlacedEntity::Area(slot)) => {
                *slot = area.clone();
                Ok(area)
            }
            _ => Err(EditorError::EntityNotFound { id }),
        }
    }

    /// Replaces an existing entity of any kind.
    pub fn replace(&mut self, entity: PlacedEntity) -> Result<(), EditorError> {
        match entity {
            PlacedEntity::Area(area) => self.commit_area(area).map(|_| ()),
            other => {
                let id = other.id();
                let slot = self
                    .get_mut(id)
                    .ok_or(EditorError::EntityNotFound { id })?;
                *slot = other;
                Ok(())
            }
        }
    }

    /// Moves an entity's box origin. Outlines are relative, so the invariant holds.
    pub fn set_origin(&mut self, id: u64, x: f64, y: f64) -> Result<(), EditorError> {
        let entity = self
            .get_mut(id)
            .ok_or(EditorError::EntityNotFound { id })?;
        entity.set_origin(x, y);
        Ok(())
    }

    /// Entities bottom to top.
    pub fn iter(&self) -> impl Iterator<Item = &PlacedEntity> + '_ {
        self.order.iter().filter_map(move |id| self.get(*id))
    }

    pub fn areas(&self) -> impl Iterator<Item = &Area> + '_ {
        self.iter().filter_map(PlacedEntity::as_area)
    }

    pub fn ids(&self) -> &[u64] {
        &self.order
    }

    /// Top-most entity containing `point`.
    pub fn top_most_at(&self, point: &Point, tolerance: f64) -> Option<u64> {
        self.order
            .iter()
            .rev()
            .copied()
            .find(|id| {
                self.get(*id)
                    .is_some_and(|e| e.contains_point(point, tolerance))
            })
    }

    pub fn bring_to_front(&mut self, id: u64) -> bool {
        if !self.contains(id) {
            return false;
        }
        self.order.retain(|&other| other != id);
        self.order.push(id);
        true
    }
}
