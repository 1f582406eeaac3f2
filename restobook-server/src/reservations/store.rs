//! ReservationStore - the in-memory reservation book
//!
//! Owns every [`Reservation`] in insertion order and mirrors each mutation to
//! its persistence collaborator. Mutations that fail to persist are undone in
//! memory before the error is returned, so memory never runs ahead of disk.
//!
//! Ids handed out by [`ReservationStore::next_id`] stay unique for the life of
//! the store: the highest id ever held is remembered, so a deleted record's id
//! is not reissued even if the clock steps backwards.
//!
//! The store is not internally synchronized; [`ReservationManager`] holds it
//! behind a single lock.
//!
//! [`ReservationManager`]: super::ReservationManager

use super::storage::{ReservationPersistence, StorageError, StorageResult};
use chrono::NaiveDateTime;
use shared::models::{Reservation, TableAssignment, TableNumber};
use shared::util::{next_reservation_id, parse_reservation_id};

pub struct ReservationStore {
    reservations: Vec<Reservation>,
    persistence: Box<dyn ReservationPersistence>,
    /// Highest timestamp id this store has held
    high_water: Option<String>,
}

impl std::fmt::Debug for ReservationStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReservationStore")
            .field("reservations", &self.reservations.len())
            .field("high_water", &self.high_water)
            .field("persistence", &"<dyn ReservationPersistence>")
            .finish()
    }
}

impl ReservationStore {
    /// Load the book from `persistence`
    ///
    /// A missing or unreadable document yields an empty book (logged, never fatal).
    pub fn load(persistence: Box<dyn ReservationPersistence>) -> Self {
        let reservations = match persistence.load() {
            Ok(reservations) => {
                tracing::info!(count = reservations.len(), "Reservation book loaded");
                reservations
            }
            Err(StorageError::Missing(path)) => {
                tracing::info!(path = %path.display(), "No reservation book yet, starting empty");
                Vec::new()
            }
            Err(e) => {
                match persistence.set_aside() {
                    Ok(Some(backup)) => tracing::warn!(
                        error = %e,
                        backup = %backup.display(),
                        "Failed to load reservation book, kept a copy and starting empty"
                    ),
                    Ok(None) => tracing::warn!(
                        error = %e,
                        "Failed to load reservation book, starting empty"
                    ),
                    Err(move_err) => tracing::error!(
                        error = %e,
                        set_aside_error = %move_err,
                        "Failed to load reservation book and could not set it aside"
                    ),
                }
                Vec::new()
            }
        };

        let high_water = reservations
            .iter()
            .map(|r| r.id.as_str())
            .filter(|id| parse_reservation_id(id).is_some())
            .max()
            .map(str::to_string);

        Self {
            reservations,
            persistence,
            high_water,
        }
    }

    fn raise_high_water(&mut self, id: &str) {
        if parse_reservation_id(id).is_none() {
            return;
        }
        if self.high_water.as_deref().is_none_or(|h| id > h) {
            self.high_water = Some(id.to_string());
        }
    }

    /// Fresh id for a record created at `at`
    pub fn next_id(&self, at: NaiveDateTime) -> String {
        next_reservation_id(at, self.high_water.as_deref(), |id| self.contains(id))
    }

    /// All reservations in insertion order
    pub fn all(&self) -> &[Reservation] {
        &self.reservations
    }

    pub fn len(&self) -> usize {
        self.reservations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reservations.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.reservations.iter().any(|r| r.id == id)
    }

    pub fn find(&self, id: &str) -> Option<&Reservation> {
        self.reservations.iter().find(|r| r.id == id)
    }

    /// Append and persist
    pub fn add(&mut self, reservation: Reservation) -> StorageResult<()> {
        self.raise_high_water(&reservation.id);
        self.reservations.push(reservation);
        if let Err(e) = self.persist() {
            self.reservations.pop();
            return Err(e);
        }
        Ok(())
    }

    /// Remove by id and persist
    ///
    /// Returns the removed record, or `None` when the id is unknown (no write
    /// happens in that case).
    pub fn remove(&mut self, id: &str) -> StorageResult<Option<Reservation>> {
        let Some(index) = self.reservations.iter().position(|r| r.id == id) else {
            return Ok(None);
        };

        let removed = self.reservations.remove(index);
        if let Err(e) = self.persist() {
            self.reservations.insert(index, removed);
            return Err(e);
        }
        Ok(Some(removed))
    }

    /// Bind `table` to the reservation `id` and persist
    ///
    /// Returns `false` when the id is unknown. The caller is responsible for
    /// checking that the reservation is still pending and the table is free.
    pub fn assign_table(&mut self, id: &str, table: TableNumber) -> StorageResult<bool> {
        let Some(reservation) = self.reservations.iter_mut().find(|r| r.id == id) else {
            return Ok(false);
        };

        let previous = std::mem::replace(&mut reservation.table, TableAssignment::Assigned(table));
        if let Err(e) = self.persist() {
            if let Some(reservation) = self.reservations.iter_mut().find(|r| r.id == id) {
                reservation.table = previous;
            }
            return Err(e);
        }
        Ok(true)
    }

    /// Rewrite the whole book to persistence
    pub fn persist(&self) -> StorageResult<()> {
        self.persistence.save(&self.reservations)
    }
}

#[cfg(test)]
mod tests {
    use super::super::storage::MemoryStorage;
    use super::*;
    use chrono::NaiveDate;
    use shared::models::ReservationType;
    use std::sync::Arc;

    fn reservation(id: &str) -> Reservation {
        Reservation {
            id: id.to_string(),
            name: "Dewi".to_string(),
            phone: "0811".to_string(),
            party_size: 3,
            date: NaiveDate::from_ymd_opt(2026, 12, 24).unwrap(),
            time: "20:00".to_string(),
            reservation_type: ReservationType::Vip,
            table: TableAssignment::Unassigned,
            created_at: NaiveDate::from_ymd_opt(2026, 10, 16)
                .unwrap()
                .and_hms_opt(8, 0, 0)
                .unwrap(),
        }
    }

    fn store_with(storage: &Arc<MemoryStorage>) -> ReservationStore {
        ReservationStore::load(Box::new(Arc::clone(storage)))
    }

    #[test]
    fn test_add_keeps_insertion_order_and_persists() {
        let storage = Arc::new(MemoryStorage::new());
        let mut store = store_with(&storage);

        store.add(reservation("b")).unwrap();
        store.add(reservation("a")).unwrap();

        let ids: Vec<_> = store.all().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["b", "a"]);
        assert_eq!(storage.saved().unwrap().len(), 2);
    }

    #[test]
    fn test_add_rolls_back_on_storage_failure() {
        let storage = Arc::new(MemoryStorage::new());
        let mut store = store_with(&storage);
        store.add(reservation("a")).unwrap();

        storage.set_fail_writes(true);
        assert!(store.add(reservation("b")).is_err());
        assert_eq!(store.len(), 1);
        assert!(!store.contains("b"));
    }

    #[test]
    fn test_remove_unknown_id_is_noop() {
        let storage = Arc::new(MemoryStorage::new());
        let mut store = store_with(&storage);
        store.add(reservation("a")).unwrap();

        assert!(store.remove("zzz").unwrap().is_none());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_remove_rolls_back_at_original_position() {
        let storage = Arc::new(MemoryStorage::new());
        let mut store = store_with(&storage);
        for id in ["a", "b", "c"] {
            store.add(reservation(id)).unwrap();
        }

        storage.set_fail_writes(true);
        assert!(store.remove("b").is_err());
        let ids: Vec<_> = store.all().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c"]);
    }

    #[test]
    fn test_assign_table_rolls_back_on_storage_failure() {
        let storage = Arc::new(MemoryStorage::new());
        let mut store = store_with(&storage);
        store.add(reservation("a")).unwrap();

        storage.set_fail_writes(true);
        assert!(store.assign_table("a", 3).is_err());
        assert_eq!(store.find("a").unwrap().table, TableAssignment::Unassigned);

        storage.set_fail_writes(false);
        assert!(store.assign_table("a", 3).unwrap());
        assert_eq!(store.find("a").unwrap().table_number(), Some(3));
        assert!(!store.assign_table("missing", 4).unwrap());
    }

    #[test]
    fn test_load_falls_back_to_empty_on_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("book.json");
        std::fs::write(&path, "[[[").unwrap();

        let store = ReservationStore::load(Box::new(
            super::super::storage::JsonFileStorage::new(&path),
        ));
        assert!(store.is_empty());

        let backups: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().path())
            .filter(|p| p != &path)
            .collect();
        assert_eq!(backups.len(), 1);
        assert_eq!(std::fs::read_to_string(&backups[0]).unwrap(), "[[[");
    }

    #[test]
    fn test_next_id_does_not_reuse_deleted_id() {
        let storage = Arc::new(MemoryStorage::new());
        let mut store = store_with(&storage);
        store.add(reservation("20261016120000000005")).unwrap();
        store.remove("20261016120000000005").unwrap();

        // Clock stepped back an hour
        let at = NaiveDate::from_ymd_opt(2026, 10, 16)
            .unwrap()
            .and_hms_opt(11, 0, 0)
            .unwrap();
        assert_eq!(store.next_id(at), "20261016120000000006");
    }

    #[test]
    fn test_high_water_restored_from_loaded_book() {
        let storage = Arc::new(MemoryStorage::with_reservations(vec![
            reservation("20261016120000000009"),
            reservation("legacy"),
            reservation("20261016110000000000"),
        ]));
        let store = store_with(&storage);
        let at = NaiveDate::from_ymd_opt(2026, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(store.next_id(at), "20261016120000000010");
    }

    #[test]
    fn test_load_reads_existing_book() {
        let storage = Arc::new(MemoryStorage::with_reservations(vec![
            reservation("x"),
            reservation("y"),
        ]));
        let store = store_with(&storage);
        assert_eq!(store.len(), 2);
        assert!(store.find("y").is_some());
    }
}
