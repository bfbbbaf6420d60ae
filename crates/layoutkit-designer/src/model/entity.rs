use serde::{Deserialize, Serialize};

use super::{Area, Footprint, Point};

/// Common behavior of everything placed on the floor plan.
pub trait Placeable {
    fn id(&self) -> u64;
    fn name(&self) -> &str;
    fn footprint(&self) -> Footprint;
    fn set_origin(&mut self, x: f64, y: f64);
    fn contains_point(&self, p: &Point, tolerance: f64) -> bool {
        self.footprint().contains(p, tolerance)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Area,
    Storage,
    Facility,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityKind::Area => write!(f, "area"),
            EntityKind::Storage => write!(f, "storage"),
            EntityKind::Facility => write!(f, "facility"),
        }
    }
}

/// A storage unit from the catalog placed on the floor plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoragePlacement {
    pub id: u64,
    pub storage_id: u64,
    #[serde(default)]
    pub area_id: Option<u64>,
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// A facility (door, pillar, charging station...) placed on the floor plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacilityPlacement {
    pub id: u64,
    pub facility_id: u64,
    #[serde(default)]
    pub area_id: Option<u64>,
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Placeable for Area {
    fn id(&self) -> u64 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn footprint(&self) -> Footprint {
        Area::footprint(self)
    }

    fn set_origin(&mut self, x: f64, y: f64) {
        self.x = x;
        self.y = y;
    }

    fn contains_point(&self, p: &Point, tolerance: f64) -> bool {
        Area::contains_point(self, p, tolerance)
    }
}

impl Placeable for StoragePlacement {
    fn id(&self) -> u64 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn footprint(&self) -> Footprint {
        Footprint::new(self.x, self.y, self.width, self.height)
    }

    fn set_origin(&mut self, x: f64, y: f64) {
        self.x = x;
        self.y = y;
    }
}

impl Placeable for FacilityPlacement {
    fn id(&self) -> u64 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn footprint(&self) -> Footprint {
        Footprint::new(self.x, self.y, self.width, self.height)
    }

    fn set_origin(&mut self, x: f64, y: f64) {
        self.x = x;
        self.y = y;
    }
}

/// One entity of the layout, tagged by kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PlacedEntity {
    Area(Area),
    Storage(StoragePlacement),
    Facility(FacilityPlacement),
}

impl PlacedEntity {
    pub fn kind(&self) -> EntityKind {
        match self {
            PlacedEntity::Area(_) => EntityKind::Area,
            PlacedEntity::Storage(_) => EntityKind::Storage,
            PlacedEntity::Facility(_) => EntityKind::Facility,
        }
    }

    /// The same entity under another id.
    pub fn with_id(mut self, id: u64) -> Self {
        match &mut self {
            PlacedEntity::Area(e) => e.id = id,
            PlacedEntity::Storage(e) => e.id = id,
            PlacedEntity::Facility(e) => e.id = id,
        }
        self
    }

    pub fn as_area(&self) -> Option<&Area> {
        match self {
            PlacedEntity::Area(area) => Some(area),
            _ => None,
        }
    }

}

impl Placeable for PlacedEntity {
    fn id(&self) -> u64 {
        match self {
            PlacedEntity::Area(e) => e.id,
            PlacedEntity::Storage(e) => e.id,
            PlacedEntity::Facility(e) => e.id,
        }
    }

    fn name(&self) -> &str {
        match self {
            PlacedEntity::Area(e) => &e.name,
            PlacedEntity::Storage(e) => &e.name,
            PlacedEntity::Facility(e) => &e.name,
        }
    }

    fn footprint(&self) -> Footprint {
        match self {
            PlacedEntity::Area(e) => e.footprint(),
            PlacedEntity::Storage(e) => Placeable::footprint(e),
            PlacedEntity::Facility(e) => Placeable::footprint(e),
        }
    }

    fn set_origin(&mut self, x: f64, y: f64) {
        match self {
            PlacedEntity::Area(e) => e.set_origin(x, y),
            PlacedEntity::Storage(e) => e.set_origin(x, y),
            PlacedEntity::Facility(e) => e.set_origin(x, y),
        }
    }

    fn contains_point(&self, p: &Point, tolerance: f64) -> bool {
        match self {
            PlacedEntity::Area(e) => e.contains_point(p, tolerance),
            PlacedEntity::Storage(e) => Placeable::contains_point(e, p, tolerance),
            PlacedEntity::Facility(e) => Placeable::contains_point(e, p, tolerance),
        }
    }
}
