//! Error handling for LayoutKit
//!
//! Provides error types for the layers of the editor engine:
//! - Editor errors (validation failures reported to the user)
//! - Catalog errors (master-data repositories)
//!
//! All error types use `thiserror` for ergonomic error handling.
//! None of them is fatal: every failing operation leaves the editor in
//! its previous valid state.

use thiserror::Error;

/// Editor error type
///
/// Validation failures raised by the polygon editor, the resize controller
/// and the layout editor when an operation is refused.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditorError {
    /// Not enough vertices to form (or keep) a polygon
    #[error("A polygon needs at least {required} points, got {actual}")]
    InsufficientPoints {
        /// Minimum number of points.
        required: usize,
        /// Number of points that would remain.
        actual: usize,
    },

    /// Point editing was requested for an area that is not a polygon
    #[error("Area {id} is not a polygon")]
    NotAPolygon {
        /// The offending area id.
        id: u64,
    },

    /// Resize handles are only available for rectangle areas
    #[error("Entity {id} cannot be resized with handles")]
    NotResizable {
        /// The offending entity id.
        id: u64,
    },

    /// No entity with this id exists
    #[error("Entity {id} not found")]
    EntityNotFound {
        /// The missing id.
        id: u64,
    },

    /// A committed box or outline has NaN or infinite coordinates
    #[error("Area {id} has non-finite coordinates")]
    NonFiniteGeometry {
        /// The offending area id.
        id: u64,
    },

    /// A draft point index is out of range
    #[error("Point index {index} out of range (points: {len})")]
    PointOutOfRange {
        /// The requested index.
        index: usize,
        /// Current number of draft points.
        len: usize,
    },

    /// Another interaction mode is already active
    #[error("Cannot start a new interaction while {active} is active")]
    InteractionActive {
        /// Name of the active mode.
        active: String,
    },

    /// The operation is not valid in the current mode
    #[error("Invalid mode: expected {expected}, currently {actual}")]
    InvalidMode {
        /// Mode required by the operation.
        expected: String,
        /// Mode the editor is in.
        actual: String,
    },
}

/// Catalog error type
///
/// Errors raised by the master-data repositories (storages, facilities, shelves).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    /// No record with this id
    #[error("{kind} {id} not found")]
    RecordNotFound {
        /// Record kind (e.g. "storage").
        kind: &'static str,
        /// The missing id.
        id: u64,
    },

    /// Codes must be unique within a repository
    #[error("{kind} code '{code}' is already in use")]
    DuplicateCode {
        /// Record kind.
        kind: &'static str,
        /// The duplicated code.
        code: String,
    },

    /// The record failed validation
    #[error("Invalid {kind}: {reason}")]
    InvalidRecord {
        /// Record kind.
        kind: &'static str,
        /// Why the record was rejected.
        reason: String,
    },
}

/// Main error type for LayoutKit
#[derive(Error, Debug)]
pub enum Error {
    /// Editor validation error
    #[error(transparent)]
    Editor(#[from] EditorError),

    /// Catalog error
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a user-facing validation error
    pub fn is_validation_error(&self) -> bool {
        matches!(self, Error::Editor(_) | Error::Catalog(_))
    }
}

/// Result type for LayoutKit operations
pub type Result<T> = std::result::Result<T, Error>;
