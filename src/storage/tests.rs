#![allow(clippy::unwrap_used)]

use super::*;
use crate::models::UserType;

// ── Raw items ─────────────────────────────────────────────────

#[test]
fn test_missing_item_is_none() {
    let storage = LocalStorage::open_in_memory().unwrap();
    assert!(storage.get_item("user").unwrap().is_none());
}

#[test]
fn test_set_then_get() {
    let storage = LocalStorage::open_in_memory().unwrap();
    storage.set_item("jwt", "token-1").unwrap();
    assert_eq!(storage.get_item("jwt").unwrap().as_deref(), Some("token-1"));
}

#[test]
fn test_set_overwrites() {
    let storage = LocalStorage::open_in_memory().unwrap();
    storage.set_item("jwt", "token-1").unwrap();
    storage.set_item("jwt", "token-2").unwrap();
    assert_eq!(storage.jwt().unwrap().as_deref(), Some("token-2"));
}

#[test]
fn test_remove_item() {
    let storage = LocalStorage::open_in_memory().unwrap();
    storage.set_item("jwt", "token").unwrap();
    storage.set_item("other", "x").unwrap();
    storage.remove_item("jwt").unwrap();
    assert!(storage.jwt().unwrap().is_none());
    assert_eq!(storage.get_item("other").unwrap().as_deref(), Some("x"));
}

#[test]
fn test_clear() {
    let storage = LocalStorage::open_in_memory().unwrap();
    storage.set_item("jwt", "token").unwrap();
    storage
        .save_session(&Session::employee("a@a"))
        .unwrap();
    storage.clear().unwrap();
    assert!(storage.jwt().unwrap().is_none());
    assert!(storage.session().unwrap().is_none());
}

// ── Session ───────────────────────────────────────────────────

#[test]
fn test_session_roundtrip() {
    let storage = LocalStorage::open_in_memory().unwrap();
    let session = Session::new(UserType::Employee, "employee@test.tld");
    storage.save_session(&session).unwrap();
    assert_eq!(storage.session().unwrap(), Some(session));
}

#[test]
fn test_session_stored_as_user_json() {
    let storage = LocalStorage::open_in_memory().unwrap();
    storage
        .save_session(&Session::new(UserType::Admin, "admin@test.tld"))
        .unwrap();
    let raw = storage.get_item(USER_KEY).unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value["type"], "Admin");
    assert_eq!(value["email"], "admin@test.tld");
    assert_eq!(value["status"], "connected");
}

#[test]
fn test_unreadable_session_is_signed_out() {
    let storage = LocalStorage::open_in_memory().unwrap();
    storage.set_item(USER_KEY, "{not json").unwrap();
    assert!(storage.session().unwrap().is_none());
}

// ── On disk ───────────────────────────────────────────────────

#[test]
fn test_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.db");
    {
        let storage = LocalStorage::open(&path).unwrap();
        storage.save_session(&Session::employee("a@a")).unwrap();
    }
    let storage = LocalStorage::open(&path).unwrap();
    assert_eq!(storage.session().unwrap(), Some(Session::employee("a@a")));
}

#[test]
fn test_reopen_does_not_reapply_schema() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.db");
    LocalStorage::open(&path).unwrap();
    let storage = LocalStorage::open(&path).unwrap();
    let versions: i64 = storage
        .conn
        .query_row("SELECT COUNT(*) FROM schema_version", [], |row| row.get(0))
        .unwrap();
    assert_eq!(versions, 1);
}

#[test]
fn test_older_version_is_stamped_current_and_keeps_items() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.db");
    {
        let storage = LocalStorage::open(&path).unwrap();
        storage.set_item(JWT_KEY, "token").unwrap();
        storage
            .conn
            .execute("UPDATE schema_version SET version = 0", [])
            .unwrap();
    }
    let storage = LocalStorage::open(&path).unwrap();
    let version: i32 = storage
        .conn
        .query_row("SELECT version FROM schema_version", [], |row| row.get(0))
        .unwrap();
    assert_eq!(version, schema::CURRENT_VERSION);
    assert_eq!(storage.jwt().unwrap().as_deref(), Some("token"));
}
