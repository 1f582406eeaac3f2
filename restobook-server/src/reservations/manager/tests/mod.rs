use super::*;
use crate::reservations::allocator::{FirstFitSelector, RandomSelector};
use crate::reservations::storage::MemoryStorage;
use chrono::Duration;
use shared::models::{ReservationStatus, ReservationType, TOTAL_TABLES};
use std::collections::{BTreeSet, VecDeque};
use std::sync::Arc;

const TZ: Tz = chrono_tz::Asia::Jakarta;

/// Selector that hands out a fixed sequence of tables
///
/// Falls back to the lowest free table once the script runs out, and never
/// returns a table that is not free.
struct ScriptedSelector {
    script: VecDeque<TableNumber>,
}

impl ScriptedSelector {
    fn new(script: impl IntoIterator<Item = TableNumber>) -> Self {
        Self {
            script: script.into_iter().collect(),
        }
    }
}

impl TableSelector for ScriptedSelector {
    fn select(&mut self, free: &BTreeSet<TableNumber>) -> Option<TableNumber> {
        match self.script.pop_front() {
            Some(table) if free.contains(&table) => Some(table),
            _ => free.first().copied(),
        }
    }
}

fn create_test_manager() -> ReservationManager {
    ReservationManager::with_storage(
        Box::new(MemoryStorage::new()),
        Box::new(FirstFitSelector),
        TZ,
    )
}

fn create_manager_with(
    storage: &Arc<MemoryStorage>,
    selector: impl TableSelector + 'static,
) -> ReservationManager {
    ReservationManager::with_storage(Box::new(Arc::clone(storage)), Box::new(selector), TZ)
}

/// `days` after today in the business timezone
fn day(days: i64) -> NaiveDate {
    time::today(TZ) + Duration::days(days)
}

fn request(name: &str, date: NaiveDate) -> ReservationCreate {
    ReservationCreate {
        name: name.to_string(),
        phone: "0812-0000-1111".to_string(),
        party_size: "2".to_string(),
        date: date.to_string(),
        time: "19:00".to_string(),
        reservation_type: ReservationType::Standard,
    }
}

/// Persisted record built directly (bypasses validation)
fn stored(id: &str, date: NaiveDate, table: Option<TableNumber>) -> Reservation {
    Reservation {
        id: id.to_string(),
        name: format!("Guest {id}"),
        phone: "0800".to_string(),
        party_size: 2,
        date,
        time: "20:00".to_string(),
        reservation_type: ReservationType::Standard,
        table: TableAssignment::from(table),
        created_at: (day(0) - Duration::days(1)).and_hms_opt(9, 0, 0).unwrap(),
    }
}

/// Submit and return the new id
fn submit_ok(manager: &ReservationManager, name: &str, date: NaiveDate) -> String {
    manager
        .submit(&request(name, date))
        .unwrap_or_else(|e| panic!("submission for {name} failed: {e}"))
        .id
}

/// Table numbers bound on `date`
fn tables_on(manager: &ReservationManager, date: NaiveDate) -> Vec<TableNumber> {
    manager
        .list(Some(date))
        .iter()
        .filter_map(Reservation::table_number)
        .collect()
}

fn assert_book_invariants(manager: &ReservationManager) {
    let all = manager.list(None);
    let dates: BTreeSet<_> = all.iter().map(|r| r.date).collect();
    for date in dates {
        let tables = tables_on(manager, date);
        assert!(
            tables.len() <= usize::from(TOTAL_TABLES),
            "{date} oversold: {} tables",
            tables.len()
        );
        let distinct: BTreeSet<_> = tables.iter().copied().collect();
        assert_eq!(distinct.len(), tables.len(), "{date} has a double-booked table");
        assert!(tables.iter().all(|t| (1..=TOTAL_TABLES).contains(t)));
    }
    let ids: BTreeSet<_> = all.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids.len(), all.len(), "duplicate reservation id");
}

mod test_assign;
mod test_persistence;
