//! Layout editor controller.
//!
//! Owns the entity store, the viewport, the selection and the active
//! interaction, and routes raw pointer events to the polygon editor, the
//! resize controller or an entity move. Exactly one interaction mode is
//! active at a time; starting another one while a mode is active is refused.
//!
//! Committed changes are recorded for undo and announced through the
//! [`EventDispatcher`]. Live drag states are written to the store as the
//! pointer moves but only the final state is recorded.

use layoutkit_core::constants::{
    DEFAULT_AREA_HEIGHT, DEFAULT_AREA_WIDTH, DEFAULT_HISTORY_LIMIT, GRID_SIZE, PICK_TOLERANCE,
};
use layoutkit_core::{EditorError, EventDispatcher, LayoutEvent};

use crate::catalog::Catalog;
use crate::geometry::{self, polygon_from_absolute, FlipAxis, PolygonOutline};
use crate::history::{Change, History};
use crate::interaction::{DragKind, DragSession, DragSnapshot};
use crate::model::{
    Area, FacilityPlacement, Placeable, PlacedEntity, Point, StoragePlacement,
};
use crate::polygon_editor::{apply_outline, PolygonEditor, PolygonEditorState};
use crate::renderer::{self, DrawCommand, RenderOptions};
use crate::resize::{self, ResizeSession};
use crate::store::EntityStore;
use crate::templates::ShapeTemplate;
use crate::viewport::Viewport;

/// Stroke color of in-progress polygon drafts.
const DRAFT_STROKE: &str = "#1976d2";

/// Editor behavior that hosts usually take from their configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct EditorOptions {
    pub default_zoom: f64,
    pub grid_snap: bool,
    pub grid_size: f64,
    pub vertex_handles: bool,
    pub history_limit: usize,
    pub new_area_width: f64,
    pub new_area_height: f64,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            default_zoom: 1.0,
            grid_snap: false,
            grid_size: GRID_SIZE,
            vertex_handles: true,
            history_limit: DEFAULT_HISTORY_LIMIT,
            new_area_width: DEFAULT_AREA_WIDTH,
            new_area_height: DEFAULT_AREA_HEIGHT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionMode {
    Idle,
    Drawing,
    EditingPoints,
    Moving,
    Resizing,
    DraggingPoint,
}

impl InteractionMode {
    pub fn name(&self) -> &'static str {
        match self {
            InteractionMode::Idle => "idle",
            InteractionMode::Drawing => "drawing",
            InteractionMode::EditingPoints => "editing points",
            InteractionMode::Moving => "moving",
            InteractionMode::Resizing => "resizing",
            InteractionMode::DraggingPoint => "dragging point",
        }
    }
}

impl std::fmt::Display for InteractionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

pub struct LayoutEditor {
    store: EntityStore,
    viewport: Viewport,
    selection: Option<u64>,
    grid_snap: bool,
    polygon: PolygonEditor,
    session: Option<DragSession>,
    history: History,
    events: EventDispatcher,
    options: EditorOptions,
}

impl Default for LayoutEditor {
    fn default() -> Self {
        Self::new(EditorOptions::default())
    }
}

impl LayoutEditor {
    pub fn new(options: EditorOptions) -> Self {
        Self::with_store(EntityStore::new(), options)
    }

    /// Creates an editor over an existing set of entities (e.g. a loaded document).
    pub fn with_store(store: EntityStore, options: EditorOptions) -> Self {
        let mut viewport = Viewport::new();
        viewport.set_zoom(options.default_zoom);
        viewport.set_grid_size(options.grid_size);
        Self {
            store,
            viewport,
            selection: None,
            grid_snap: options.grid_snap,
            polygon: PolygonEditor::new(),
            session: None,
            history: History::with_limit(options.history_limit),
            events: EventDispatcher::default(),
            options,
        }
    }

    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    pub fn into_store(self) -> EntityStore {
        self.store
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    pub fn zoom(&self) -> f64 {
        self.viewport.zoom()
    }

    /// Sets the zoom, clamped to `[0.2, 3.0]`; returns the applied value.
    pub fn set_zoom(&mut self, zoom: f64) -> f64 {
        self.viewport.set_zoom(zoom)
    }

    pub fn grid_snap(&self) -> bool {
        self.grid_snap
    }

    pub fn set_grid_snap(&mut self, enabled: bool) {
        self.grid_snap = enabled;
    }

    pub fn selection(&self) -> Option<u64> {
        self.selection
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Dispatcher hosts subscribe to for layout events.
    pub fn events(&self) -> &EventDispatcher {
        &self.events
    }

    pub fn polygon_editor(&self) -> &PolygonEditor {
        &self.polygon
    }

    pub fn mode(&self) -> InteractionMode {
        if let Some(session) = &self.session {
            return match session.kind() {
                DragKind::Move { .. } => InteractionMode::Moving,
                DragKind::Resize(_) => InteractionMode::Resizing,
                DragKind::PointDrag { .. } => InteractionMode::DraggingPoint,
            };
        }
        match self.polygon.state() {
            PolygonEditorState::Idle => InteractionMode::Idle,
            PolygonEditorState::Drawing => InteractionMode::Drawing,
            PolygonEditorState::EditingPoints { .. } => InteractionMode::EditingPoints,
        }
    }

    fn publish(&self, event: LayoutEvent) {
        self.events.publish(event);
    }

    fn publish_mode(&self) {
        let mode = self.mode();
        tracing::debug!("interaction mode: {}", mode);
        self.publish(LayoutEvent::ModeChanged {
            mode: mode.to_string(),
        });
    }

    /// Reports a refused operation and hands the error back.
    fn refuse(&self, err: EditorError) -> EditorError {
        tracing::warn!("{}", err);
        self.publish(LayoutEvent::ValidationFailed {
            message: err.to_string(),
        });
        err
    }

    fn require_idle(&self) -> Result<(), EditorError> {
        match self.mode() {
            InteractionMode::Idle => Ok(()),
            active => Err(self.refuse(EditorError::InteractionActive {
                active: active.to_string(),
            })),
        }
    }

    fn require_no_drag(&self) -> Result<(), EditorError> {
        match &self.session {
            None => Ok(()),
            Some(session) => Err(self.refuse(EditorError::InteractionActive {
                active: session.mode_name().to_string(),
            })),
        }
    }

    pub fn select(&mut self, id: Option<u64>) {
        if self.selection != id {
            self.selection = id;
            self.publish(LayoutEvent::SelectionChanged { id });
        }
    }

    /// Selects the top-most entity under a document point.
    pub fn select_at(&mut self, point: Point) -> Option<u64> {
        let tolerance = PICK_TOLERANCE / self.viewport.zoom();
        let hit = self.store.top_most_at(&point, tolerance);
        self.select(hit);
        hit
    }

    fn document_point(&self, screen: Point, snap: bool) -> Point {
        self.viewport.screen_to_document(screen.x, screen.y, snap)
    }

    /// Pointer position relative to the canvas, in screen units.
    fn canvas_point(&self, screen: Point) -> Point {
        let origin = self.viewport.origin();
        Point::new(screen.x - origin.x, screen.y - origin.y)
    }

    fn add_entity(&mut self, entity: PlacedEntity, label: &str) -> u64 {
        let id = self.store.insert(entity);
        let stored = self.store.get(id).cloned();
        self.history.record(Change::new(id, label, None, stored));
        tracing::info!("{} {}", label, id);
        self.publish(LayoutEvent::EntityAdded { id });
        id
    }

    fn commit_area_change(
        &mut self,
        label: &str,
        before: Area,
        after: Area,
    ) -> Result<Area, EditorError> {
        let id = before.id;
        let committed = self.store.commit_area(after).map_err(|e| self.refuse(e))?;
        self.history.record(Change::new(
            id,
            label,
            Some(PlacedEntity::Area(before)),
            Some(PlacedEntity::Area(committed.clone())),
        ));
        self.publish(LayoutEvent::EntityUpdated { id });
        Ok(committed)
    }

    fn commit_new_polygon(&mut self, outline: PolygonOutline, name: Option<String>) -> u64 {
        let id = self.store.generate_id();
        let f = outline.footprint;
        let name = name.unwrap_or_else(|| format!("Area {}", id));
        let area = Area::with_shape(id, name, f.x, f.y, f.width, f.height, outline.shape);
        let id = self.add_entity(PlacedEntity::Area(area), "Add polygon");
        self.select(Some(id));
        id
    }

    // ---- entity commands ----

    /// Adds a default-sized rectangle area with its top-left corner at `(x, y)`.
    pub fn add_rectangle(&mut self, x: f64, y: f64) -> u64 {
        let id = self.store.generate_id();
        let area = Area::new(
            id,
            format!("Area {}", id),
            x,
            y,
            self.options.new_area_width,
            self.options.new_area_height,
        );
        self.add_entity(PlacedEntity::Area(area), "Add area")
    }

    /// Adds an area as-is. An id of 0 or one already in use gets a fresh id.
    pub fn add_area(&mut self, mut area: Area) -> u64 {
        if area.id == 0 || self.store.contains(area.id) {
            area.id = self.store.generate_id();
        }
        self.add_entity(PlacedEntity::Area(area), "Add area")
    }

    /// Creates a polygon area from a template filling the given box.
    pub fn add_from_template(
        &mut self,
        template: ShapeTemplate,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> Result<u64, EditorError> {
        self.require_idle()?;
        let outline = polygon_from_absolute(&template.points(x, y, width, height))
            .map_err(|e| self.refuse(e))?;
        Ok(self.commit_new_polygon(outline, Some(format!("{} area", template))))
    }

    /// Places a catalog storage unit, sized from its record.
    pub fn place_storage(
        &mut self,
        catalog: &Catalog,
        storage_id: u64,
        x: f64,
        y: f64,
    ) -> layoutkit_core::Result<u64> {
        let record = catalog.storages.get(storage_id)?;
        let id = self.store.generate_id();
        let placement = StoragePlacement {
            id,
            storage_id,
            area_id: self.area_under(x, y),
            name: record.name.clone(),
            x,
            y,
            width: record.width,
            height: record.height,
        };
        Ok(self.add_entity(PlacedEntity::Storage(placement), "Place storage"))
    }

    /// Places a catalog facility, sized from its record.
    pub fn place_facility(
        &mut self,
        catalog: &Catalog,
        facility_id: u64,
        x: f64,
        y: f64,
    ) -> layoutkit_core::Result<u64> {
        let record = catalog.facilities.get(facility_id)?;
        let id = self.store.generate_id();
        let placement = FacilityPlacement {
            id,
            facility_id,
            area_id: self.area_under(x, y),
            name: record.name.clone(),
            x,
            y,
            width: record.width,
            height: record.height,
        };
        Ok(self.add_entity(PlacedEntity::Facility(placement), "Place facility"))
    }

    /// Top-most area containing a document point.
    fn area_under(&self, x: f64, y: f64) -> Option<u64> {
        let p = Point::new(x, y);
        self.store
            .areas()
            .filter(|a| a.contains_point(&p, 0.0))
            .last()
            .map(|a| a.id)
    }

    fn transform_selected(
        &mut self,
        label: &str,
        transform: impl FnOnce(&Area) -> Area,
    ) -> Result<Option<Area>, EditorError> {
        self.require_idle()?;
        let Some(area) = self.selection.and_then(|id| self.store.area(id)).cloned() else {
            return Ok(None);
        };
        let updated = transform(&area);
        self.commit_area_change(label, area, updated).map(Some)
    }

    /// Rotates the selected area. Returns `None` when no area is selected.
    pub fn rotate_selected(&mut self, degrees: f64) -> Result<Option<Area>, EditorError> {
        self.transform_selected("Rotate", |a| geometry::rotate(a, degrees))
    }

    pub fn scale_selected(
        &mut self,
        scale_x: f64,
        scale_y: f64,
    ) -> Result<Option<Area>, EditorError> {
        self.transform_selected("Scale", |a| geometry::scale(a, scale_x, scale_y))
    }

    pub fn flip_selected(&mut self, axis: FlipAxis) -> Result<Option<Area>, EditorError> {
        self.transform_selected("Flip", |a| geometry::flip(a, axis))
    }

    /// Edits name and colors of an area; geometry is untouched.
    pub fn update_area_fields(
        &mut self,
        id: u64,
        name: Option<String>,
        color: Option<String>,
        border_color: Option<String>,
    ) -> Result<Area, EditorError> {
        let before = self
            .store
            .area(id)
            .cloned()
            .ok_or(EditorError::EntityNotFound { id })
            .map_err(|e| self.refuse(e))?;
        let mut after = before.clone();
        if let Some(name) = name {
            after.name = name;
        }
        if let Some(color) = color {
            after.color = color;
        }
        if let Some(border_color) = border_color {
            after.border_color = border_color;
        }
        self.commit_area_change("Edit area", before, after)
    }

    pub fn delete_selected(&mut self) -> Result<Option<PlacedEntity>, EditorError> {
        self.require_idle()?;
        let Some(id) = self.selection else {
            return Ok(None);
        };
        let removed = self.store.remove(id);
        if let Some(entity) = &removed {
            self.history
                .record(Change::new(id, "Delete", Some(entity.clone()), None));
            tracing::info!("Deleted {} {}", entity.kind(), id);
            self.publish(LayoutEvent::EntityRemoved { id });
        }
        self.select(None);
        Ok(removed)
    }

    /// Moves the selected entity to the top of the draw order.
    pub fn bring_selected_to_front(&mut self) -> Result<bool, EditorError> {
        self.require_idle()?;
        let Some(id) = self.selection else {
            return Ok(false);
        };
        if self.store.ids().last() == Some(&id) || !self.store.bring_to_front(id) {
            return Ok(false);
        }
        tracing::debug!("brought {} to front", id);
        self.publish(LayoutEvent::EntityUpdated { id });
        Ok(true)
    }

    fn apply_state(&mut self, id: u64, state: Option<PlacedEntity>) {
        match state {
            None => {
                self.store.remove(id);
                if self.selection == Some(id) {
                    self.select(None);
                }
                self.publish(LayoutEvent::EntityRemoved { id });
            }
            Some(entity) if self.store.contains(id) => {
                if let Err(err) = self.store.replace(entity) {
                    tracing::warn!("history replay failed: {}", err);
                }
                self.publish(LayoutEvent::EntityUpdated { id });
            }
            Some(entity) => {
                self.store.insert(entity);
                self.publish(LayoutEvent::EntityAdded { id });
            }
        }
    }

    /// Reverts the last committed change. Only available while idle.
    pub fn undo(&mut self) -> bool {
        if self.mode() != InteractionMode::Idle {
            return false;
        }
        let Some(change) = self.history.undo() else {
            return false;
        };
        tracing::debug!("undo {} on {}", change.label, change.id);
        self.apply_state(change.id, change.before);
        true
    }

    pub fn redo(&mut self) -> bool {
        if self.mode() != InteractionMode::Idle {
            return false;
        }
        let Some(change) = self.history.redo() else {
            return false;
        };
        tracing::debug!("redo {} on {}", change.label, change.id);
        self.apply_state(change.id, change.after);
        true
    }

    // ---- polygon editor ----

    pub fn start_drawing(&mut self) -> Result<(), EditorError> {
        self.require_no_drag()?;
        self.polygon.start_drawing().map_err(|e| self.refuse(e))?;
        self.select(None);
        self.publish_mode();
        Ok(())
    }

    /// Appends a document point to the draft.
    pub fn append_point(&mut self, point: Point) -> Result<(), EditorError> {
        self.polygon.append_point(point).map_err(|e| self.refuse(e))
    }

    /// Commits the draft as a new polygon area and selects it.
    pub fn finish_drawing(&mut self) -> Result<u64, EditorError> {
        let outline = self.polygon.finish_drawing().map_err(|e| self.refuse(e))?;
        let id = self.commit_new_polygon(outline, None);
        self.publish_mode();
        Ok(id)
    }

    pub fn cancel_drawing(&mut self) {
        if self.polygon.state() == PolygonEditorState::Drawing {
            self.polygon.cancel_drawing();
            self.publish_mode();
        }
    }

    pub fn start_editing_points(&mut self, id: u64) -> Result<(), EditorError> {
        self.require_no_drag()?;
        let area = self
            .store
            .area(id)
            .cloned()
            .ok_or(EditorError::EntityNotFound { id })
            .map_err(|e| self.refuse(e))?;
        self.polygon.start_editing(&area).map_err(|e| self.refuse(e))?;
        self.select(Some(id));
        self.publish_mode();
        Ok(())
    }

    pub fn move_point(&mut self, index: usize, point: Point) -> Result<(), EditorError> {
        self.polygon
            .move_point(index, point)
            .map_err(|e| self.refuse(e))
    }

    /// Removes a draft vertex; refused when fewer than three would remain.
    pub fn delete_point(&mut self, index: usize) -> Result<Point, EditorError> {
        self.polygon.delete_point(index).map_err(|e| self.refuse(e))
    }

    /// Writes the edited outline back onto its area.
    pub fn finish_editing_points(&mut self) -> Result<Area, EditorError> {
        self.require_no_drag()?;
        let (id, outline) = self.polygon.finish_editing().map_err(|e| self.refuse(e))?;
        let result = match self.store.area(id).cloned() {
            Some(before) => {
                let after = apply_outline(&before, outline);
                self.commit_area_change("Edit points", before, after)
            }
            None => Err(self.refuse(EditorError::EntityNotFound { id })),
        };
        self.publish_mode();
        result
    }

    pub fn cancel_editing_points(&mut self) {
        if matches!(
            self.polygon.state(),
            PolygonEditorState::EditingPoints { .. }
        ) {
            self.session = None;
            self.polygon.cancel_editing();
            self.publish_mode();
        }
    }

    // ---- pointer events (screen coordinates) ----

    pub fn pointer_down(&mut self, screen: Point) -> Result<(), EditorError> {
        self.require_no_drag()?;
        let zoom = self.viewport.zoom();
        let raw = self.document_point(screen, false);

        match self.polygon.state() {
            PolygonEditorState::Drawing => {
                let point = self.document_point(screen, self.grid_snap);
                return self.append_point(point);
            }
            PolygonEditorState::EditingPoints { .. } => {
                let grabbed = self
                    .polygon
                    .point_at(&raw, PICK_TOLERANCE / zoom)
                    .and_then(|index| self.polygon.draft().get(index).map(|p| (index, *p)));
                if let Some((index, point)) = grabbed {
                    self.session = Some(DragSession::begin_point_drag(index, point));
                    self.publish_mode();
                }
                return Ok(());
            }
            PolygonEditorState::Idle => {}
        }

        let canvas = self.canvas_point(screen);
        if let Some(entity) = self.selection.and_then(|id| self.store.get(id)) {
            let handle = entity
                .as_area()
                .and_then(|area| resize::handle_at(area, zoom, &canvas, PICK_TOLERANCE / 2.0));
            if let (Some(handle), Some(area)) = (handle, entity.as_area()) {
                let resize = ResizeSession::begin(area, handle, canvas, zoom)?;
                self.session = Some(DragSession::begin_resize(entity, resize));
                self.publish_mode();
                return Ok(());
            }
        }

        match self.select_at(raw) {
            Some(id) => {
                if let Some(entity) = self.store.get(id) {
                    self.session = Some(DragSession::begin_move(entity, raw));
                    self.publish_mode();
                }
            }
            None => tracing::trace!("pointer down on empty canvas"),
        }
        Ok(())
    }

    /// Updates the active drag; the latest position wins.
    pub fn pointer_move(&mut self, screen: Point) -> Result<(), EditorError> {
        let Some(session) = &self.session else {
            return Ok(());
        };
        let kind = session.kind().clone();
        let before = session.entity().cloned();

        match (kind, before) {
            (DragKind::Move { grab }, Some(entity)) => {
                let raw = self.document_point(screen, false);
                let mut origin = Point::new(raw.x - grab.x, raw.y - grab.y);
                if self.grid_snap {
                    origin = self.viewport.snap(origin);
                }
                self.store.set_origin(entity.id(), origin.x, origin.y)
            }
            (DragKind::Resize(resize), Some(PlacedEntity::Area(mut area))) => {
                let footprint = resize.box_at(self.canvas_point(screen));
                area.set_footprint(footprint);
                self.store.replace(PlacedEntity::Area(area))
            }
            (DragKind::PointDrag { index }, _) => {
                let point = self.document_point(screen, self.grid_snap);
                self.polygon.move_point(index, point)
            }
            _ => Ok(()),
        }
    }

    /// Ends the active drag at `screen` and commits it.
    pub fn pointer_up(&mut self, screen: Point) -> Result<(), EditorError> {
        let moved = self.pointer_move(screen);
        let ended = self.end_drag();
        moved.and(ended)
    }

    /// The pointer left the canvas: the drag ends and is committed where it is.
    pub fn pointer_leave(&mut self) -> Result<(), EditorError> {
        self.end_drag()
    }

    fn end_drag(&mut self) -> Result<(), EditorError> {
        let Some(session) = self.session.take() else {
            return Ok(());
        };
        let label = match session.kind() {
            DragKind::Move { .. } => "Move",
            DragKind::Resize(_) => "Resize",
            DragKind::PointDrag { .. } => "Move point",
        };

        let mut result = Ok(());
        if let DragSnapshot::Entity(before) = session.snapshot() {
            let id = before.id();
            if let Some(PlacedEntity::Area(area)) = self.store.get(id).cloned() {
                result = self.store.commit_area(area).map(|_| ());
            }
            let after = self.store.get(id).cloned();
            if after.as_ref() != Some(before) {
                self.history
                    .record(Change::new(id, label, Some(before.clone()), after));
                self.publish(LayoutEvent::EntityUpdated { id });
            }
        }
        drop(session);
        self.publish_mode();
        result
    }

    /// Cancels the active drag and restores the state from before it started.
    fn cancel_drag(&mut self) {
        let Some(session) = self.session.take() else {
            return;
        };
        match session.snapshot() {
            DragSnapshot::Entity(before) => {
                if let Err(err) = self.store.replace(before.clone()) {
                    tracing::warn!("could not restore entity after cancelled drag: {}", err);
                }
            }
            DragSnapshot::Point { index, point } => {
                if let Err(err) = self.polygon.move_point(*index, *point) {
                    tracing::warn!("could not restore draft point: {}", err);
                }
            }
        }
        tracing::debug!("{} cancelled", session.mode_name());
    }

    /// Escape: cancels the innermost active interaction, or clears the selection.
    pub fn escape(&mut self) {
        if self.session.is_some() {
            self.cancel_drag();
        } else {
            match self.polygon.state() {
                PolygonEditorState::Drawing => self.polygon.cancel_drawing(),
                PolygonEditorState::EditingPoints { .. } => self.polygon.cancel_editing(),
                PolygonEditorState::Idle => {
                    self.select(None);
                    return;
                }
            }
        }
        self.publish_mode();
    }

    /// Double click: removes a draft vertex while editing points, or starts
    /// point editing on a polygon area.
    pub fn double_click(&mut self, screen: Point) -> Result<(), EditorError> {
        self.require_no_drag()?;
        let raw = self.document_point(screen, false);
        let tolerance = PICK_TOLERANCE / self.viewport.zoom();
        match self.polygon.state() {
            PolygonEditorState::EditingPoints { .. } => {
                if let Some(index) = self.polygon.point_at(&raw, tolerance) {
                    self.delete_point(index)?;
                }
                Ok(())
            }
            PolygonEditorState::Drawing => Ok(()),
            PolygonEditorState::Idle => match self.store.top_most_at(&raw, tolerance) {
                Some(id) if self.store.area(id).is_some_and(Area::is_polygon) => {
                    self.start_editing_points(id)
                }
                _ => Ok(()),
            },
        }
    }

    /// Mouse wheel; zooms only while the modifier is held.
    pub fn wheel(&mut self, delta_y: f64, modifier: bool) -> bool {
        let changed = self.viewport.handle_wheel(delta_y, modifier);
        if changed {
            tracing::debug!("zoom {}", self.viewport.zoom());
        }
        changed
    }

    // ---- rendering ----

    /// Draw commands for the whole canvas, bottom to top.
    pub fn render_frame(&self) -> Vec<DrawCommand> {
        let zoom = self.viewport.zoom();
        let options = RenderOptions {
            vertex_handles: self.options.vertex_handles,
        };
        let editing = match self.polygon.state() {
            PolygonEditorState::EditingPoints { area_id } => Some(area_id),
            _ => None,
        };

        let mut commands = Vec::new();
        for entity in self.store.iter() {
            let id = entity.id();
            if Some(id) == editing {
                continue;
            }
            let selected = self.selection == Some(id);
            commands.extend(renderer::render_entity(entity, zoom, selected, options));
        }

        if editing.is_none() {
            if let Some(area) = self.selection.and_then(|id| self.store.area(id)) {
                commands.extend(renderer::render_resize_handles(area, zoom));
            }
        }
        if !self.polygon.is_idle() {
            commands.extend(renderer::render_draft(
                self.polygon.draft(),
                zoom,
                DRAFT_STROKE,
            ));
        }
        commands
    }
}
