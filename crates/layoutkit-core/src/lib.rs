//! # LayoutKit Core
//!
//! Core types and utilities shared by the LayoutKit crates.
//! Provides the engine constants, the error hierarchy and the
//! layout event dispatcher used to notify hosts of document changes.

pub mod constants;
pub mod error;
pub mod event;

pub use error::{CatalogError, EditorError, Error, Result};
pub use event::{EventDispatcher, LayoutEvent};
