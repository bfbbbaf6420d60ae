//! Layout document files.
//!
//! A layout is saved as pretty-printed JSON holding its metadata, the view
//! state and the placed areas, storages and facilities.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use uuid::Uuid;

use crate::editor::{EditorOptions, LayoutEditor};
use crate::model::{Area, FacilityPlacement, PlacedEntity, StoragePlacement};
use crate::store::EntityStore;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutMetadata {
    pub id: Uuid,
    pub name: String,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewState {
    pub zoom: f64,
    #[serde(default)]
    pub grid_snap: bool,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            grid_snap: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutDocument {
    pub metadata: LayoutMetadata,
    #[serde(default)]
    pub view: ViewState,
    #[serde(default)]
    pub areas: Vec<Area>,
    #[serde(default)]
    pub storages: Vec<StoragePlacement>,
    #[serde(default)]
    pub facilities: Vec<FacilityPlacement>,
}

impl LayoutDocument {
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            metadata: LayoutMetadata {
                id: Uuid::new_v4(),
                name: name.into(),
                created: now,
                modified: now,
                description: String::new(),
            },
            view: ViewState::default(),
            areas: Vec::new(),
            storages: Vec::new(),
            facilities: Vec::new(),
        }
    }

    /// Replaces the document content with the entities of `store`, in draw order.
    pub fn set_entities(&mut self, store: &EntityStore) {
        self.areas.clear();
        self.storages.clear();
        self.facilities.clear();
        for entity in store.iter() {
            match entity {
                PlacedEntity::Area(a) => self.areas.push(a.clone()),
                PlacedEntity::Storage(s) => self.storages.push(s.clone()),
                PlacedEntity::Facility(f) => self.facilities.push(f.clone()),
            }
        }
        self.metadata.modified = Utc::now();
    }

    /// Captures the editor's entities and view.
    pub fn update_from_editor(&mut self, editor: &LayoutEditor) {
        self.set_entities(editor.store());
        self.view = ViewState {
            zoom: editor.zoom(),
            grid_snap: editor.grid_snap(),
        };
    }

    /// Builds a store: areas first, then storages and facilities on top.
    pub fn to_store(&self) -> EntityStore {
        EntityStore::from_entities(
            self.areas
                .iter()
                .cloned()
                .map(PlacedEntity::Area)
                .chain(self.storages.iter().cloned().map(PlacedEntity::Storage))
                .chain(self.facilities.iter().cloned().map(PlacedEntity::Facility)),
        )
    }

    /// Opens an editor on this document with its saved view.
    pub fn open(&self, options: EditorOptions) -> LayoutEditor {
        let options = EditorOptions {
            default_zoom: self.view.zoom,
            grid_snap: self.view.grid_snap,
            ..options
        };
        LayoutEditor::with_store(self.to_store(), options)
    }

    pub fn entity_count(&self) -> usize {
        self.areas.len() + self.storages.len() + self.facilities.len()
    }

    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self).context("Failed to serialize layout")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write layout file {}", path.display()))?;
        tracing::info!("Saved layout '{}' to {}", self.metadata.name, path.display());
        Ok(())
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read layout file {}", path.display()))?;
        let document: LayoutDocument =
            serde_json::from_str(&content).context("Failed to parse layout file")?;
        tracing::info!(
            "Loaded layout '{}' ({} entities) from {}",
            document.metadata.name,
            document.entity_count(),
            path.display()
        );
        Ok(document)
    }
}
