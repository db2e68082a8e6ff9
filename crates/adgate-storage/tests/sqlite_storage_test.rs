//! SqliteStorage as the substrate for AdStateStore.

use adgate_core::gating::AdSession;
use adgate_core::plans::PlanPolicy;
use adgate_core::state::{AdStateStore, KeyValueStorage, SessionAdState};
use adgate_storage::SqliteStorage;

#[test]
fn counters_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ads.db");

    let session_id = {
        let storage = SqliteStorage::open(&path).unwrap();
        let session = AdSession::new(AdStateStore::open(storage).unwrap());
        session.record_impression(100).unwrap();
        session.record_impression(400).unwrap();
        session.store().session_id().to_string()
    };

    let storage = SqliteStorage::open(&path).unwrap();
    let store = AdStateStore::open(storage).unwrap();
    assert_eq!(store.session_id(), session_id);
    assert_eq!(
        store.read(),
        SessionAdState {
            shown_count: 2,
            last_shown_at: Some(400),
        }
    );
}

#[test]
fn cap_is_enforced_across_restarts() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ads.db");
    let policy = PlanPolicy::limited(1, 0);

    {
        let session = AdSession::new(AdStateStore::open(SqliteStorage::open(&path).unwrap()).unwrap());
        assert!(session.check(&policy, 0).is_allowed());
        session.record_impression(0).unwrap();
    }

    let session = AdSession::new(AdStateStore::open(SqliteStorage::open(&path).unwrap()).unwrap());
    assert!(!session.check(&policy, 1_000).is_allowed());
}

#[test]
fn clear_leaves_foreign_rows() {
    let storage = SqliteStorage::open_in_memory().unwrap();
    storage.set("cookie-consent", "granted").unwrap();
    storage.set("ad.count.old-session", "7").unwrap();

    let store = AdStateStore::open(&storage).unwrap();
    store
        .write(&SessionAdState {
            shown_count: 1,
            last_shown_at: Some(9),
        })
        .unwrap();

    assert_eq!(store.clear().unwrap(), 4);
    assert_eq!(storage.keys().unwrap(), vec!["cookie-consent".to_string()]);
}

#[test]
fn corrupt_row_reads_as_zero() {
    let storage = SqliteStorage::open_in_memory().unwrap();
    storage.set("ad.count.s", "NaN").unwrap();
    let store = AdStateStore::with_session(&storage, "s");
    assert_eq!(store.read(), SessionAdState::ZERO);
}
