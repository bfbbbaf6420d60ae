//! Eight-handle resize of rectangle areas.
//!
//! Handles sit on the corners and edge midpoints of an area's box, in screen
//! space (document box multiplied by zoom). A drag records the pointer and the
//! box at pointer-down; each move derives a new box from the accumulated delta
//! so the most recent pointer position always wins.

use layoutkit_core::constants::{HANDLE_SIZE, MIN_HANDLE_SIZE};
use layoutkit_core::EditorError;
use smallvec::SmallVec;

use crate::model::{Area, Footprint, Point};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResizeHandle {
    NorthWest,
    NorthEast,
    SouthWest,
    SouthEast,
    North,
    South,
    East,
    West,
}

impl ResizeHandle {
    pub const ALL: [ResizeHandle; 8] = [
        ResizeHandle::NorthWest,
        ResizeHandle::NorthEast,
        ResizeHandle::SouthWest,
        ResizeHandle::SouthEast,
        ResizeHandle::North,
        ResizeHandle::South,
        ResizeHandle::East,
        ResizeHandle::West,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            ResizeHandle::NorthWest => "nw",
            ResizeHandle::NorthEast => "ne",
            ResizeHandle::SouthWest => "sw",
            ResizeHandle::SouthEast => "se",
            ResizeHandle::North => "n",
            ResizeHandle::South => "s",
            ResizeHandle::East => "e",
            ResizeHandle::West => "w",
        }
    }

    /// Position of the handle as a fraction of the box: `(0,0)` is top-left.
    fn anchor(&self) -> (f64, f64) {
        match self {
            ResizeHandle::NorthWest => (0.0, 0.0),
            ResizeHandle::NorthEast => (1.0, 0.0),
            ResizeHandle::SouthWest => (0.0, 1.0),
            ResizeHandle::SouthEast => (1.0, 1.0),
            ResizeHandle::North => (0.5, 0.0),
            ResizeHandle::South => (0.5, 1.0),
            ResizeHandle::East => (1.0, 0.5),
            ResizeHandle::West => (0.0, 0.5),
        }
    }

    fn moves_left_edge(&self) -> bool {
        matches!(
            self,
            ResizeHandle::NorthWest | ResizeHandle::SouthWest | ResizeHandle::West
        )
    }

    fn moves_right_edge(&self) -> bool {
        matches!(
            self,
            ResizeHandle::NorthEast | ResizeHandle::SouthEast | ResizeHandle::East
        )
    }

    fn moves_top_edge(&self) -> bool {
        matches!(
            self,
            ResizeHandle::NorthWest | ResizeHandle::NorthEast | ResizeHandle::North
        )
    }

    fn moves_bottom_edge(&self) -> bool {
        matches!(
            self,
            ResizeHandle::SouthWest | ResizeHandle::SouthEast | ResizeHandle::South
        )
    }
}

impl std::fmt::Display for ResizeHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for ResizeHandle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ResizeHandle::ALL
            .into_iter()
            .find(|h| h.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown resize handle '{}'", s))
    }
}

/// A handle placed in screen space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandleMarker {
    pub handle: ResizeHandle,
    /// Center of the marker in screen coordinates.
    pub center: Point,
}

impl HandleMarker {
    pub fn contains(&self, screen: &Point, tolerance: f64) -> bool {
        let half = HANDLE_SIZE / 2.0 + tolerance;
        (screen.x - self.center.x).abs() <= half && (screen.y - self.center.y).abs() <= half
    }
}

pub type HandleSet = SmallVec<[HandleMarker; 8]>;

/// Synthesizes the eight handles for an area, or `None` if it is not a rectangle.
pub fn handles_for(area: &Area, zoom: f64) -> Option<HandleSet> {
    if !area.is_resizable() {
        return None;
    }
    let f = area.footprint();
    Some(
        ResizeHandle::ALL
            .iter()
            .map(|&handle| {
                let (ax, ay) = handle.anchor();
                HandleMarker {
                    handle,
                    center: Point::new(
                        (f.x + f.width * ax) * zoom,
                        (f.y + f.height * ay) * zoom,
                    ),
                }
            })
            .collect(),
    )
}

/// The handle under a screen position, if any.
pub fn handle_at(area: &Area, zoom: f64, screen: &Point, tolerance: f64) -> Option<ResizeHandle> {
    handles_for(area, zoom)?
        .iter()
        .find(|m| m.contains(screen, tolerance))
        .map(|m| m.handle)
}

/// New box for a handle dragged by `delta` document units.
///
/// Opposite edges stay anchored; width and height never drop below
/// [`MIN_HANDLE_SIZE`].
pub fn resize_from_handle(start: Footprint, handle: ResizeHandle, delta: Point) -> Footprint {
    let (w, h) = (start.width, start.height);

    let mut width = w;
    if handle.moves_right_edge() {
        width = w + delta.x;
    } else if handle.moves_left_edge() {
        width = w - delta.x;
    }
    let mut height = h;
    if handle.moves_bottom_edge() {
        height = h + delta.y;
    } else if handle.moves_top_edge() {
        height = h - delta.y;
    }
    let width = width.max(MIN_HANDLE_SIZE);
    let height = height.max(MIN_HANDLE_SIZE);

    let x = if handle.moves_left_edge() {
        start.x + (w - width)
    } else {
        start.x
    };
    let y = if handle.moves_top_edge() {
        start.y + (h - height)
    } else {
        start.y
    };
    Footprint::new(x, y, width, height)
}

/// State recorded at pointer-down on a handle.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeSession {
    pub entity_id: u64,
    pub handle: ResizeHandle,
    /// Pointer position at pointer-down, in screen coordinates.
    pub start_pointer: Point,
    pub start_box: Footprint,
    pub zoom: f64,
}

impl ResizeSession {
    /// Starts a resize. Refused for anything other than a rectangle area.
    pub fn begin(
        area: &Area,
        handle: ResizeHandle,
        start_pointer: Point,
        zoom: f64,
    ) -> Result<Self, EditorError> {
        if !area.is_resizable() {
            return Err(EditorError::NotResizable { id: area.id });
        }
        Ok(Self {
            entity_id: area.id,
            handle,
            start_pointer,
            start_box: area.footprint(),
            zoom,
        })
    }

    /// Box for the current pointer position (screen coordinates).
    pub fn box_at(&self, pointer: Point) -> Footprint {
        let delta = Point::new(
            (pointer.x - self.start_pointer.x) / self.zoom,
            (pointer.y - self.start_pointer.y) / self.zoom,
        );
        resize_from_handle(self.start_box, self.handle, delta)
    }
}
