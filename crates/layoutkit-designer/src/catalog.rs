//! Master data: storage units, facilities and shelves.
//!
//! Each record kind lives in its own [`Repository`]. A [`Catalog`] groups the
//! three and is created once by the host and passed to whoever needs it.

use std::collections::BTreeMap;

use layoutkit_core::CatalogError;
use serde::{Deserialize, Serialize};

/// A record stored in a [`Repository`].
pub trait Record: Clone {
    /// Human-readable kind used in error messages.
    const KIND: &'static str;

    fn id(&self) -> u64;
    fn set_id(&mut self, id: u64);
    /// Unique code within the repository.
    fn code(&self) -> &str;

    fn validate(&self) -> Result<(), CatalogError> {
        if self.code().trim().is_empty() {
            return Err(CatalogError::InvalidRecord {
                kind: Self::KIND,
                reason: "code must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

fn require_positive(kind: &'static str, width: f64, height: f64) -> Result<(), CatalogError> {
    if width > 0.0 && height > 0.0 && width.is_finite() && height.is_finite() {
        Ok(())
    } else {
        Err(CatalogError::InvalidRecord {
            kind,
            reason: format!("size must be positive, got {}x{}", width, height),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageUnit {
    #[serde(default)]
    pub id: u64,
    pub code: String,
    pub name: String,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub capacity: u32,
}

impl StorageUnit {
    pub fn new(code: impl Into<String>, name: impl Into<String>, width: f64, height: f64) -> Self {
        Self {
            id: 0,
            code: code.into(),
            name: name.into(),
            width,
            height,
            capacity: 0,
        }
    }
}

impl Record for StorageUnit {
    const KIND: &'static str = "storage";

    fn id(&self) -> u64 {
        self.id
    }

    fn set_id(&mut self, id: u64) {
        self.id = id;
    }

    fn code(&self) -> &str {
        &self.code
    }

    fn validate(&self) -> Result<(), CatalogError> {
        if self.code.trim().is_empty() {
            return Err(CatalogError::InvalidRecord {
                kind: Self::KIND,
                reason: "code must not be empty".to_string(),
            });
        }
        require_positive(Self::KIND, self.width, self.height)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Facility {
    #[serde(default)]
    pub id: u64,
    pub code: String,
    pub name: String,
    /// Free-form category, e.g. "door", "pillar", "charger".
    #[serde(default)]
    pub facility_type: String,
    pub width: f64,
    pub height: f64,
}

impl Facility {
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        facility_type: impl Into<String>,
        width: f64,
        height: f64,
    ) -> Self {
        Self {
            id: 0,
            code: code.into(),
            name: name.into(),
            facility_type: facility_type.into(),
            width,
            height,
        }
    }
}

impl Record for Facility {
    const KIND: &'static str = "facility";

    fn id(&self) -> u64 {
        self.id
    }

    fn set_id(&mut self, id: u64) {
        self.id = id;
    }

    fn code(&self) -> &str {
        &self.code
    }

    fn validate(&self) -> Result<(), CatalogError> {
        if self.code.trim().is_empty() {
            return Err(CatalogError::InvalidRecord {
                kind: Self::KIND,
                reason: "code must not be empty".to_string(),
            });
        }
        require_positive(Self::KIND, self.width, self.height)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shelf {
    #[serde(default)]
    pub id: u64,
    pub code: String,
    pub name: String,
    /// Storage unit holding this shelf.
    #[serde(default)]
    pub storage_id: Option<u64>,
    #[serde(default)]
    pub levels: u32,
}

impl Shelf {
    pub fn new(code: impl Into<String>, name: impl Into<String>, storage_id: Option<u64>) -> Self {
        Self {
            id: 0,
            code: code.into(),
            name: name.into(),
            storage_id,
            levels: 1,
        }
    }
}

impl Record for Shelf {
    const KIND: &'static str = "shelf";

    fn id(&self) -> u64 {
        self.id
    }

    fn set_id(&mut self, id: u64) {
        self.id = id;
    }

    fn code(&self) -> &str {
        &self.code
    }
}

/// In-memory store of one record kind with unique codes.
#[derive(Debug, Clone)]
pub struct Repository<T: Record> {
    records: BTreeMap<u64, T>,
    next_id: u64,
}

impl<T: Record> Default for Repository<T> {
    fn default() -> Self {
        Self {
            records: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl<T: Record> Repository<T> {
    pub fn new() -> Self {
        Self::default()
    }

    fn check_code(&self, record: &T, except: Option<u64>) -> Result<(), CatalogError> {
        let taken = self
            .records
            .values()
            .any(|r| Some(r.id()) != except && r.code() == record.code());
        if taken {
            return Err(CatalogError::DuplicateCode {
                kind: T::KIND,
                code: record.code().to_string(),
            });
        }
        Ok(())
    }

    /// Stores a new record under a fresh id and returns the stored copy.
    pub fn create(&mut self, mut record: T) -> Result<T, CatalogError> {
        record.validate()?;
        self.check_code(&record, None)?;
        let id = self.next_id;
        self.next_id += 1;
        record.set_id(id);
        self.records.insert(id, record.clone());
        tracing::debug!("created {} {} ({})", T::KIND, id, record.code());
        Ok(record)
    }

    pub fn update(&mut self, record: T) -> Result<T, CatalogError> {
        let id = record.id();
        if !self.records.contains_key(&id) {
            return Err(CatalogError::RecordNotFound { kind: T::KIND, id });
        }
        record.validate()?;
        self.check_code(&record, Some(id))?;
        self.records.insert(id, record.clone());
        Ok(record)
    }

    pub fn delete(&mut self, id: u64) -> Result<T, CatalogError> {
        self.records
            .remove(&id)
            .ok_or(CatalogError::RecordNotFound { kind: T::KIND, id })
    }

    pub fn get(&self, id: u64) -> Result<&T, CatalogError> {
        self.records
            .get(&id)
            .ok_or(CatalogError::RecordNotFound { kind: T::KIND, id })
    }

    pub fn find_by_code(&self, code: &str) -> Option<&T> {
        self.records.values().find(|r| r.code() == code)
    }

    /// Records ordered by id.
    pub fn list(&self) -> impl Iterator<Item = &T> + '_ {
        self.records.values()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub storages: Repository<StorageUnit>,
    pub facilities: Repository<Facility>,
    pub shelves: Repository<Shelf>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deletes a storage unit and detaches its shelves.
    pub fn delete_storage(&mut self, id: u64) -> Result<StorageUnit, CatalogError> {
        let removed = self.storages.delete(id)?;
        let orphans: Vec<Shelf> = self
            .shelves
            .list()
            .filter(|s| s.storage_id == Some(id))
            .cloned()
            .collect();
        for mut shelf in orphans {
            shelf.storage_id = None;
            self.shelves.update(shelf)?;
        }
        Ok(removed)
    }

    pub fn shelves_of(&self, storage_id: u64) -> Vec<&Shelf> {
        self.shelves
            .list()
            .filter(|s| s.storage_id == Some(storage_id))
            .collect()
    }
}
