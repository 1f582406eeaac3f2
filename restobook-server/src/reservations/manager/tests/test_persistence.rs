use super::*;
use crate::reservations::allocator::TableSelection;
use crate::reservations::export::ExportOutcome;


#[test]
fn test_every_mutation_is_persisted() {
    let storage = Arc::new(MemoryStorage::new());
    let manager = create_manager_with(&storage, FirstFitSelector);

    let id = submit_ok(&manager, "A", day(1));
    assert_eq!(storage.saved().unwrap().len(), 1);

    manager.assign_table(&id).unwrap();
    assert_eq!(storage.saved().unwrap()[0].table_number(), Some(1));

    manager.delete(&id).unwrap();
    assert!(storage.saved().unwrap().is_empty());
}


#[test]
fn test_submit_storage_failure_rolls_back() {
    let storage = Arc::new(MemoryStorage::new());
    let manager = create_manager_with(&storage, FirstFitSelector);
    submit_ok(&manager, "kept", day(1));

    storage.set_fail_writes(true);
    let err = manager.submit(&request("lost", day(1))).unwrap_err();
    assert!(matches!(err, ManagerError::Storage(_)));
    assert_eq!(manager.len(), 1);
    assert_eq!(storage.saved().unwrap().len(), 1);
}


#[test]
fn test_delete_storage_failure_keeps_record() {
    let storage = Arc::new(MemoryStorage::new());
    let manager = create_manager_with(&storage, FirstFitSelector);
    let id = submit_ok(&manager, "A", day(1));

    storage.set_fail_writes(true);
    assert!(manager.delete(&id).is_err());
    assert!(manager.find(&id).is_some());
}


#[test]
fn test_reopen_restores_identical_book() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("restobook_data.json");

    let manager = ReservationManager::open(&path, TZ, TableSelection::Random);
    for i in 0..4 {
        let id = submit_ok(&manager, &format!("g{i}"), day(i));
        if i % 2 == 0 {
            manager.assign_table(&id).unwrap();
        }
    }
    let before = manager.list(None);
    drop(manager);

    let reopened = ReservationManager::open(&path, TZ, TableSelection::FirstFit);
    assert_eq!(reopened.list(None), before);
}


#[test]
fn test_open_corrupt_file_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("restobook_data.json");
    std::fs::write(&path, "{\"reservations\": [{\"id\": 1}]}").unwrap();

    let manager = ReservationManager::open(&path, TZ, TableSelection::FirstFit);
    assert!(manager.is_empty());

    submit_ok(&manager, "fresh", day(1));
    let reopened = ReservationManager::open(&path, TZ, TableSelection::FirstFit);
    assert_eq!(reopened.len(), 1);

    // The unreadable document survives next to the new book
    let backup = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().path())
        .find(|p| p.to_string_lossy().contains(".corrupt-"))
        .unwrap();
    assert_eq!(
        std::fs::read_to_string(backup).unwrap(),
        "{\"reservations\": [{\"id\": 1}]}"
    );
}


#[test]
fn test_legacy_record_without_party_size_is_kept() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("restobook_data.json");
    let date = day(3);
    let legacy = serde_json::json!({
        "reservations": [
            {
                "id": "20250101100000000001",
                "name": "Old Guest",
                "phone": "0811",
                "date": date.to_string(),
                "time": "18:00",
                "type": "Umum",
                "table": 2,
                "created_at": "2025-01-01 10:00:00"
            },
            {
                "id": "20250101100000000002",
                "name": "New Guest",
                "phone": "0812",
                "jumlah_orang": "4",
                "date": date.to_string(),
                "time": "19:00",
                "type": "VIP",
                "table": null,
                "created_at": "2025-01-01 10:00:00"
            }
        ]
    });
    std::fs::write(&path, legacy.to_string()).unwrap();

    let manager = ReservationManager::open(&path, TZ, TableSelection::FirstFit);
    assert_eq!(manager.len(), 2);
    let old = manager.find("20250101100000000001").unwrap();
    assert_eq!(old.party_size, 1);
    assert_eq!(manager.assigned_count(date), 1);

    submit_ok(&manager, "Walk-in", date);
    drop(manager);

    let reopened = ReservationManager::open(&path, TZ, TableSelection::FirstFit);
    assert_eq!(reopened.len(), 3);
    assert_eq!(reopened.find("20250101100000000001").unwrap().party_size, 1);
}


#[test]
fn test_export_csv() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("restobook_export.csv");
    let manager = create_test_manager();

    assert_eq!(manager.export_csv(&out).unwrap(), ExportOutcome::Empty);
    assert!(!out.exists());

    let a = submit_ok(&manager, "A", day(1));
    manager.assign_table(&a).unwrap();
    submit_ok(&manager, "B", day(2));

    assert_eq!(
        manager.export_csv(&out).unwrap(),
        ExportOutcome::Written { rows: 2 }
    );
    let text = std::fs::read_to_string(&out).unwrap();
    let lines: Vec<_> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[1].starts_with(&format!("{a},A,")));
    assert!(lines[1].contains(",Standard,1,"));
    assert!(lines[2].contains(",Standard,,"));
}


#[test]
fn test_export_to_missing_directory_fails() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("no-such-dir").join("export.csv");
    let manager = create_test_manager();
    submit_ok(&manager, "A", day(1));

    assert!(matches!(
        manager.export_csv(&out),
        Err(ManagerError::Export { .. })
    ));
}


#[test]
fn test_concurrent_exports_never_interleave() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("restobook_export.csv");
    let manager = Arc::new(create_test_manager());
    for i in 0..5 {
        submit_ok(&manager, &format!("seed{i}"), day(1));
    }

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let manager = Arc::clone(&manager);
            let out = out.clone();
            std::thread::spawn(move || {
                submit_ok(&manager, &format!("w{i}"), day(2));
                for _ in 0..5 {
                    manager.export_csv(&out).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    manager.export_csv(&out).unwrap();
    let text = std::fs::read_to_string(&out).unwrap();
    let lines: Vec<_> = text.lines().collect();
    assert_eq!(lines.len(), 1 + 13);
    assert_eq!(lines.iter().filter(|l| l.starts_with("id,")).count(), 1);
    assert!(lines[1..].iter().all(|l| l.split(',').count() == 9));
    assert!(!dir.path().join("restobook_export.csv.tmp").exists());
}
