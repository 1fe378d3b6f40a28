//! Unlocked-weapon persistence
//!
//! The simulation never touches storage directly. The driver reads the
//! unlock list once at startup through an [`UnlockStore`] and writes the
//! whole list back whenever a weapon is unlocked.
//!
//! Stored format is a JSON array of weapon names, e.g. `["PISTOL","UZI"]`.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::StorageError;
use crate::sim::{UnlockedWeapons, WeaponKind};

/// Read-all / write-all storage port for the unlock list
pub trait UnlockStore {
    /// Read the stored list. `Ok(None)` when nothing has been saved yet.
    fn read(&self) -> Result<Option<Vec<WeaponKind>>, StorageError>;

    /// Replace the stored list
    fn write(&mut self, weapons: &[WeaponKind]) -> Result<(), StorageError>;
}

/// Load unlocks, falling back to the default (pistol only) on any failure
pub fn load_unlocks(store: &dyn UnlockStore) -> UnlockedWeapons {
    match store.read() {
        Ok(Some(list)) => {
            let unlocked = UnlockedWeapons::from_list(list);
            log::info!("Loaded {} unlocked weapons", unlocked.len());
            unlocked
        }
        Ok(None) => {
            log::info!("No unlocks found, starting fresh");
            UnlockedWeapons::default()
        }
        Err(err) => {
            log::warn!("Could not read unlocks ({err}), using defaults");
            UnlockedWeapons::default()
        }
    }
}

/// Persist the unlock list, logging instead of failing the caller
pub fn save_unlocks(store: &mut dyn UnlockStore, unlocked: &UnlockedWeapons) {
    match store.write(unlocked.as_slice()) {
        Ok(()) => log::info!("Unlocks saved ({} weapons)", unlocked.len()),
        Err(err) => log::warn!("Could not save unlocks: {err}"),
    }
}

/// JSON file on disk
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl UnlockStore for FileStore {
    fn read(&self) -> Result<Option<Vec<WeaponKind>>, StorageError> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        Ok(Some(serde_json::from_str(&json)?))
    }

    fn write(&mut self, weapons: &[WeaponKind]) -> Result<(), StorageError> {
        let json = serde_json::to_string(weapons).map_err(StorageError::Encode)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

/// In-memory store holding the raw JSON text (tests, wasm hosts that sync
/// the string to their own storage)
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub json: Option<String>,
}

impl MemoryStore {
    pub fn with_json(json: impl Into<String>) -> Self {
        Self {
            json: Some(json.into()),
        }
    }
}

impl UnlockStore for MemoryStore {
    fn read(&self) -> Result<Option<Vec<WeaponKind>>, StorageError> {
        match &self.json {
            Some(json) => Ok(Some(serde_json::from_str(json)?)),
            None => Ok(None),
        }
    }

    fn write(&mut self, weapons: &[WeaponKind]) -> Result<(), StorageError> {
        self.json = Some(serde_json::to_string(weapons).map_err(StorageError::Encode)?);
        Ok(())
    }
}
