use super::*;


#[test]
fn test_assign_uses_selector_choice() {
    let storage = Arc::new(MemoryStorage::new());
    let manager = create_manager_with(&storage, ScriptedSelector::new([7, 3]));
    let a = submit_ok(&manager, "A", day(1));
    let b = submit_ok(&manager, "B", day(1));

    assert_eq!(manager.assign_table(&a).unwrap(), AssignOutcome::Assigned(7));
    assert_eq!(manager.assign_table(&b).unwrap(), AssignOutcome::Assigned(3));
    assert_eq!(manager.find(&a).unwrap().status(), ReservationStatus::Assigned);
}


#[test]
fn test_assign_twice_is_noop() {
    let manager = create_test_manager();
    let id = submit_ok(&manager, "A", day(1));

    let first = manager.assign_table(&id).unwrap();
    let second = manager.assign_table(&id).unwrap();

    assert_eq!(first, AssignOutcome::Assigned(1));
    assert_eq!(second, AssignOutcome::AlreadyAssigned(1));
    assert_eq!(manager.find(&id).unwrap().table_number(), Some(1));
    assert_eq!(manager.assigned_count(day(1)), 1);
}


#[test]
fn test_same_table_number_allowed_on_different_dates() {
    let manager = create_test_manager();
    let a = submit_ok(&manager, "A", day(1));
    let b = submit_ok(&manager, "B", day(2));

    assert_eq!(manager.assign_table(&a).unwrap().table(), 1);
    assert_eq!(manager.assign_table(&b).unwrap().table(), 1);
}


#[test]
fn test_assign_unknown_id() {
    let manager = create_test_manager();
    let err = manager.assign_table("20990101000000000000").unwrap_err();
    assert!(matches!(err, ManagerError::ReservationNotFound(id) if id == "20990101000000000000"));
}


// ========================================================================
// Scenario D: stale pending record on a full day
// ========================================================================

#[test]
fn test_no_table_available_leaves_reservation_pending() {
    let date = day(5);
    let mut book: Vec<_> = (1..=TOTAL_TABLES)
        .map(|n| stored(&format!("seated-{n}"), date, Some(n)))
        .collect();
    book.push(stored("stale", date, None));

    let storage = Arc::new(MemoryStorage::with_reservations(book));
    let manager = create_manager_with(&storage, RandomSelector::seeded(5));

    let err = manager.assign_table("stale").unwrap_err();
    assert!(matches!(err, ManagerError::NoTableAvailable { date: d } if d == date));

    let stale = manager.find("stale").unwrap();
    assert_eq!(stale.status(), ReservationStatus::Pending);
    assert_eq!(manager.assigned_count(date), usize::from(TOTAL_TABLES));

    // Retry succeeds once a table is freed.
    assert!(manager.delete("seated-4").unwrap());
    assert_eq!(manager.assign_table("stale").unwrap(), AssignOutcome::Assigned(4));
    assert_book_invariants(&manager);
}


#[test]
fn test_assign_storage_failure_keeps_pending() {
    let storage = Arc::new(MemoryStorage::new());
    let manager = create_manager_with(&storage, FirstFitSelector);
    let id = submit_ok(&manager, "A", day(1));

    storage.set_fail_writes(true);
    let err = manager.assign_table(&id).unwrap_err();
    assert!(matches!(err, ManagerError::Storage(_)));
    assert_eq!(manager.find(&id).unwrap().status(), ReservationStatus::Pending);
    assert_eq!(manager.available(day(1)), TOTAL_TABLES);

    storage.set_fail_writes(false);
    assert_eq!(manager.assign_table(&id).unwrap(), AssignOutcome::Assigned(1));
}
