//! Persistence collaborator for the reservation book
//!
//! # Document format
//!
//! ```json
//! { "reservations": [ { "id": "...", "name": "...", ..., "table": null } ] }
//! ```
//!
//! The whole collection is rewritten on every save. [`JsonFileStorage`] writes
//! to a sibling temp file and renames it over the target so a crash mid-write
//! never leaves a truncated document behind. A document that cannot be read
//! is renamed to `<file>.corrupt-<timestamp>` before the book starts empty, so
//! the first save never destroys it.

use chrono::Utc;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use shared::models::Reservation;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Data file not found: {0}")]
    Missing(PathBuf),

    #[error("Simulated write failure")]
    Unavailable,
}

pub type StorageResult<T> = Result<T, StorageError>;

/// On-disk document shape
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct BookDocument {
    #[serde(default)]
    pub reservations: Vec<Reservation>,
}

/// Durable home of the reservation collection
pub trait ReservationPersistence: Send {
    /// Read the full collection
    fn load(&self) -> StorageResult<Vec<Reservation>>;

    /// Replace the stored collection with `reservations`
    fn save(&self, reservations: &[Reservation]) -> StorageResult<()>;

    /// Move an unreadable document out of the way, returning where it went
    fn set_aside(&self) -> StorageResult<Option<PathBuf>> {
        Ok(None)
    }
}

/// JSON document on the local filesystem
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StorageError {
        StorageError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn corrupt_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(format!(".corrupt-{}", Utc::now().format("%Y%m%d%H%M%S%3f")));
        self.path.with_file_name(name)
    }
}

impl ReservationPersistence for JsonFileStorage {
    fn load(&self) -> StorageResult<Vec<Reservation>> {
        if !self.path.exists() {
            return Err(StorageError::Missing(self.path.clone()));
        }
        let bytes = fs::read(&self.path).map_err(|e| self.io_error(e))?;
        let document: BookDocument = serde_json::from_slice(&bytes)?;
        Ok(document.reservations)
    }

    fn save(&self, reservations: &[Reservation]) -> StorageResult<()> {
        #[derive(Serialize)]
        struct BookRef<'a> {
            reservations: &'a [Reservation],
        }

        let json = serde_json::to_vec_pretty(&BookRef { reservations })?;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        let tmp = self.temp_path();
        {
            let mut file = fs::File::create(&tmp).map_err(|e| self.io_error(e))?;
            file.write_all(&json).map_err(|e| self.io_error(e))?;
            file.sync_all().map_err(|e| self.io_error(e))?;
        }
        fs::rename(&tmp, &self.path).map_err(|e| self.io_error(e))?;
        Ok(())
    }

    fn set_aside(&self) -> StorageResult<Option<PathBuf>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let target = self.corrupt_path();
        fs::rename(&self.path, &target).map_err(|e| self.io_error(e))?;
        Ok(Some(target))
    }
}

/// In-process persistence (for testing)
///
/// Keeps the last saved collection; `fail_writes` makes every save fail
/// without touching the kept copy.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    saved: Mutex<Option<Vec<Reservation>>>,
    fail_writes: Mutex<bool>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with an already-persisted collection
    pub fn with_reservations(reservations: Vec<Reservation>) -> Self {
        Self {
            saved: Mutex::new(Some(reservations)),
            fail_writes: Mutex::new(false),
        }
    }

    pub fn set_fail_writes(&self, fail: bool) {
        *self.fail_writes.lock() = fail;
    }

    /// Last successfully saved collection
    pub fn saved(&self) -> Option<Vec<Reservation>> {
        self.saved.lock().clone()
    }
}

impl ReservationPersistence for MemoryStorage {
    fn load(&self) -> StorageResult<Vec<Reservation>> {
        Ok(self.saved.lock().clone().unwrap_or_default())
    }

    fn save(&self, reservations: &[Reservation]) -> StorageResult<()> {
        if *self.fail_writes.lock() {
            return Err(StorageError::Unavailable);
        }
        *self.saved.lock() = Some(reservations.to_vec());
        Ok(())
    }
}

impl<P: ReservationPersistence + Sync> ReservationPersistence for std::sync::Arc<P> {
    fn load(&self) -> StorageResult<Vec<Reservation>> {
        (**self).load()
    }

    fn save(&self, reservations: &[Reservation]) -> StorageResult<()> {
        (**self).save(reservations)
    }

    fn set_aside(&self) -> StorageResult<Option<PathBuf>> {
        (**self).set_aside()
    }
}
