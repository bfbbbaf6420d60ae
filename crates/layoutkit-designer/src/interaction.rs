//! Drag sessions.
//!
//! A [`DragSession`] exists exactly while one drag is in progress: moving an
//! entity, resizing a rectangle, or dragging a draft vertex. It carries what
//! is needed to restore the pre-drag state on cancel. The controller holds at
//! most one session and drops it on every exit path (pointer up, pointer
//! leaving the canvas, Escape, or the controller itself going away).

use crate::model::{Placeable, PlacedEntity, Point};
use crate::resize::{ResizeHandle, ResizeSession};

#[derive(Debug, Clone, PartialEq)]
pub enum DragKind {
    /// Moving an entity; `grab` is the pointer position relative to the entity origin.
    Move { grab: Point },
    Resize(ResizeSession),
    /// Dragging one draft vertex of the polygon editor.
    PointDrag { index: usize },
}

/// State to put back when a drag is cancelled.
#[derive(Debug, Clone, PartialEq)]
pub enum DragSnapshot {
    Entity(PlacedEntity),
    Point { index: usize, point: Point },
}

#[derive(Debug)]
pub struct DragSession {
    kind: DragKind,
    snapshot: DragSnapshot,
}

impl DragSession {
    pub fn begin_move(entity: &PlacedEntity, pointer: Point) -> Self {
        let origin = entity.footprint();
        tracing::trace!("drag session: move entity {}", entity.id());
        Self {
            kind: DragKind::Move {
                grab: Point::new(pointer.x - origin.x, pointer.y - origin.y),
            },
            snapshot: DragSnapshot::Entity(entity.clone()),
        }
    }

    pub fn begin_resize(entity: &PlacedEntity, resize: ResizeSession) -> Self {
        tracing::trace!(
            "drag session: resize entity {} from {}",
            resize.entity_id,
            resize.handle
        );
        Self {
            kind: DragKind::Resize(resize),
            snapshot: DragSnapshot::Entity(entity.clone()),
        }
    }

    pub fn begin_point_drag(index: usize, point: Point) -> Self {
        tracing::trace!("drag session: vertex {}", index);
        Self {
            kind: DragKind::PointDrag { index },
            snapshot: DragSnapshot::Point { index, point },
        }
    }

    pub fn kind(&self) -> &DragKind {
        &self.kind
    }

    pub fn snapshot(&self) -> &DragSnapshot {
        &self.snapshot
    }

    /// The entity being dragged, if the drag targets one.
    pub fn entity(&self) -> Option<&PlacedEntity> {
        match &self.snapshot {
            DragSnapshot::Entity(entity) => Some(entity),
            DragSnapshot::Point { .. } => None,
        }
    }

    pub fn resize_handle(&self) -> Option<ResizeHandle> {
        match &self.kind {
            DragKind::Resize(resize) => Some(resize.handle),
            _ => None,
        }
    }

    pub fn mode_name(&self) -> &'static str {
        match self.kind {
            DragKind::Move { .. } => "moving",
            DragKind::Resize(_) => "resizing",
            DragKind::PointDrag { .. } => "dragging point",
        }
    }
}

impl Drop for DragSession {
    fn drop(&mut self) {
        tracing::trace!("drag session released ({})", self.mode_name());
    }
}
