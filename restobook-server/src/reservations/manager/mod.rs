//! ReservationManager - reservation lifecycle orchestration
//!
//! This module handles:
//! - Submission (validate, capacity check, record creation)
//! - Table assignment through the configured [`TableSelector`]
//! - Deletion and listing
//! - Availability queries and CSV export
//!
//! # Concurrency
//!
//! The store and the selector live behind one mutex. Every mutating operation
//! runs check-then-act and the persistence write inside a single critical
//! section, so two submissions can never both take the last free table and two
//! assignments can never bind the same table on one date.
//!
//! # Submit Flow
//!
//! ```text
//! submit(request)
//!     ├─ 1. Validate fields (outside the lock)
//!     ├─ 2. Lock
//!     ├─ 3. available(date) > 0, else CapacityExceeded
//!     ├─ 4. Generate unique timestamp id
//!     ├─ 5. Store.add (persist, rolled back on failure)
//!     └─ 6. Return the pending record
//! ```

mod error;
pub use error::*;

use super::allocator::{self, TableSelection, TableSelector};
use super::capacity;
use super::export::{self, ExportOutcome};
use super::storage::{JsonFileStorage, ReservationPersistence};
use super::store::ReservationStore;
use super::validator;
use chrono::{NaiveDate, Timelike};
use chrono_tz::Tz;
use parking_lot::Mutex;
use serde::Serialize;
use shared::models::{
    DayAvailability, Reservation, ReservationCreate, TableAssignment, TableNumber,
};
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use crate::utils::time;

/// Result of a table assignment request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "table", rename_all = "snake_case")]
pub enum AssignOutcome {
    /// A free table was bound just now
    Assigned(TableNumber),
    /// The reservation already had this table; nothing changed
    AlreadyAssigned(TableNumber),
}

impl AssignOutcome {
    pub fn table(&self) -> TableNumber {
        match self {
            Self::Assigned(n) | Self::AlreadyAssigned(n) => *n,
        }
    }
}

struct Book {
    store: ReservationStore,
    selector: Box<dyn TableSelector>,
}

/// Reservation lifecycle service shared by all request handlers
pub struct ReservationManager {
    book: Mutex<Book>,
    /// 业务时区
    tz: Tz,
}

impl std::fmt::Debug for ReservationManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReservationManager")
            .field("store", &self.book.lock().store)
            .field("selector", &"<dyn TableSelector>")
            .field("tz", &self.tz)
            .finish()
    }
}

impl ReservationManager {
    /// Open the JSON reservation book at `data_file`
    ///
    /// Never fails: a missing or unreadable file starts an empty book.
    pub fn open(data_file: impl Into<PathBuf>, tz: Tz, selection: TableSelection) -> Self {
        let storage = JsonFileStorage::new(data_file);
        tracing::info!(
            path = %storage.path().display(),
            selection = %selection,
            tz = %tz,
            "Opening reservation book"
        );
        Self::with_storage(Box::new(storage), selection.selector(), tz)
    }

    /// Create a manager over any persistence collaborator and selector
    pub fn with_storage(
        persistence: Box<dyn ReservationPersistence>,
        selector: Box<dyn TableSelector>,
        tz: Tz,
    ) -> Self {
        Self {
            book: Mutex::new(Book {
                store: ReservationStore::load(persistence),
                selector,
            }),
            tz,
        }
    }

    pub fn timezone(&self) -> Tz {
        self.tz
    }

    /// Today in the business timezone
    pub fn today(&self) -> NaiveDate {
        time::today(self.tz)
    }

    // ========== Lifecycle ==========

    /// Validate and admit a new reservation (pending, no table)
    pub fn submit(&self, request: &ReservationCreate) -> ManagerResult<Reservation> {
        let valid = validator::validate(request, self.today()).inspect_err(|e| {
            tracing::debug!(field = e.field, reason = %e.reason, "Submission rejected");
        })?;

        let mut book = self.book.lock();

        if capacity::available(book.store.all(), valid.date) == 0 {
            tracing::info!(date = %valid.date, "Submission refused, day fully booked");
            return Err(ManagerError::CapacityExceeded { date: valid.date });
        }

        // id keeps microseconds, created_at is stored to the second
        let created_at = time::now_local(self.tz);
        let id = book.store.next_id(created_at);

        let reservation = Reservation {
            id,
            name: valid.name,
            phone: valid.phone,
            party_size: valid.party_size,
            date: valid.date,
            time: valid.time,
            reservation_type: valid.reservation_type,
            table: TableAssignment::Unassigned,
            created_at: created_at.with_nanosecond(0).unwrap_or(created_at),
        };

        book.store.add(reservation.clone())?;

        tracing::info!(
            reservation_id = %reservation.id,
            date = %reservation.date,
            party_size = reservation.party_size,
            "Reservation submitted"
        );
        Ok(reservation)
    }

    /// Bind a free table to a pending reservation
    ///
    /// Already-assigned reservations are left untouched and reported as
    /// [`AssignOutcome::AlreadyAssigned`]. When the date is full the record
    /// stays pending and `NoTableAvailable` is returned.
    pub fn assign_table(&self, id: &str) -> ManagerResult<AssignOutcome> {
        let mut book = self.book.lock();
        let Book { store, selector } = &mut *book;

        let reservation = store
            .find(id)
            .ok_or_else(|| ManagerError::ReservationNotFound(id.to_string()))?;

        if let Some(table) = reservation.table_number() {
            tracing::debug!(reservation_id = %id, table, "Table already assigned");
            return Ok(AssignOutcome::AlreadyAssigned(table));
        }

        let date = reservation.date;
        let table = allocator::allocate(store.all(), date, selector.as_mut()).inspect_err(|_| {
            tracing::warn!(reservation_id = %id, date = %date, "No free table to assign");
        })?;

        store.assign_table(id, table)?;

        tracing::info!(reservation_id = %id, date = %date, table, "Table assigned");
        Ok(AssignOutcome::Assigned(table))
    }

    /// Remove a reservation, assigned or not
    ///
    /// Returns `false` when the id was already gone; that is not an error.
    pub fn delete(&self, id: &str) -> ManagerResult<bool> {
        let removed = self.book.lock().store.remove(id)?;
        match &removed {
            Some(r) => tracing::info!(
                reservation_id = %id,
                date = %r.date,
                table = ?r.table_number(),
                "Reservation deleted"
            ),
            None => tracing::debug!(reservation_id = %id, "Delete of unknown reservation ignored"),
        }
        Ok(removed.is_some())
    }

    // ========== Queries ==========

    /// Reservations in insertion order, optionally only those on `date`
    pub fn list(&self, date: Option<NaiveDate>) -> Vec<Reservation> {
        let book = self.book.lock();
        book.store
            .all()
            .iter()
            .filter(|r| date.is_none_or(|d| r.date == d))
            .cloned()
            .collect()
    }

    /// Reservations for today (business timezone)
    pub fn list_today(&self) -> Vec<Reservation> {
        self.list(Some(self.today()))
    }

    pub fn find(&self, id: &str) -> Option<Reservation> {
        self.book.lock().store.find(id).cloned()
    }

    pub fn len(&self) -> usize {
        self.book.lock().store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Reservations holding a table on `date`
    pub fn assigned_count(&self, date: NaiveDate) -> usize {
        capacity::assigned_count(self.book.lock().store.all(), date)
    }

    /// Free tables on `date`
    pub fn available(&self, date: NaiveDate) -> u8 {
        capacity::available(self.book.lock().store.all(), date)
    }

    /// Free tables for today and the following six days
    pub fn week_availability(&self) -> Vec<DayAvailability> {
        let today = self.today();
        capacity::week_availability(self.book.lock().store.all(), today)
    }

    // ========== Export ==========

    /// Write the whole book as CSV to `path`
    ///
    /// The file is written to a `.tmp` sibling and renamed into place while
    /// the book is locked, so concurrent exports never interleave and a
    /// reader never sees a half-written file. An empty book writes nothing
    /// and reports [`ExportOutcome::Empty`].
    pub fn export_csv(&self, path: impl AsRef<Path>) -> ManagerResult<ExportOutcome> {
        let path = path.as_ref();
        let book = self.book.lock();
        let reservations = book.store.all();
        if reservations.is_empty() {
            tracing::info!("Export skipped, no reservations");
            return Ok(ExportOutcome::Empty);
        }

        let export_error = |source| ManagerError::Export {
            path: path.to_path_buf(),
            source,
        };
        let tmp = export_temp_path(path);
        let written = File::create(&tmp)
            .and_then(|file| export::write_csv(reservations, BufWriter::new(file)))
            .and_then(|rows| fs::rename(&tmp, path).map(|()| rows));
        let rows = match written {
            Ok(rows) => rows,
            Err(e) => {
                let _ = fs::remove_file(&tmp);
                return Err(export_error(e));
            }
        };

        tracing::info!(path = %path.display(), rows, "Reservations exported");
        Ok(ExportOutcome::Written { rows })
    }
}

fn export_temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests;
