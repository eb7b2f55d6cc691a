/// Encounter content loading from RON files.
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::validate::{validate, ContentIntegrityError};
use crate::schema::encounter::Encounter;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("content integrity error: {0}")]
    Integrity(#[from] ContentIntegrityError),
    #[error("duplicate encounter id: {0}")]
    DuplicateId(String),
}

impl Encounter {
    /// Parse an encounter definition from a RON string. Does not validate.
    pub fn parse_ron(input: &str) -> Result<Encounter, LoadError> {
        Ok(ron::from_str(input)?)
    }

    /// Load an encounter definition from a RON file. Does not validate.
    pub fn load_from_ron(path: &Path) -> Result<Encounter, LoadError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_ron(&contents)
    }
}

/// A validated set of encounters keyed by id.
#[derive(Debug, Clone, Default)]
pub struct EncounterLibrary {
    encounters: BTreeMap<String, Encounter>,
}

impl EncounterLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// The `.ron` files directly inside `dir`, sorted. Subdirectories are
    /// not searched.
    pub fn ron_files(dir: &Path) -> Result<Vec<PathBuf>, LoadError> {
        let mut paths = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("ron") {
                paths.push(path);
            }
        }
        paths.sort();
        Ok(paths)
    }

    /// Load and validate every file [`ron_files`](Self::ron_files) finds in `dir`.
    pub fn load_dir(dir: &Path) -> Result<EncounterLibrary, LoadError> {
        let mut library = Self::new();
        for path in Self::ron_files(dir)? {
            let encounter = Encounter::load_from_ron(&path)?;
            tracing::debug!(path = %path.display(), encounter = %encounter.id, "loaded encounter");
            library.insert(encounter)?;
        }
        Ok(library)
    }

    /// Validate and add an encounter. Ids must be unique.
    pub fn insert(&mut self, encounter: Encounter) -> Result<(), LoadError> {
        validate(&encounter)?;
        if self.encounters.contains_key(&encounter.id) {
            return Err(LoadError::DuplicateId(encounter.id));
        }
        self.encounters.insert(encounter.id.clone(), encounter);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&Encounter> {
        self.encounters.get(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.encounters.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.encounters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.encounters.is_empty()
    }
}
