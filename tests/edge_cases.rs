//! Interactive Session Edge Cases
//!
//! Drives full CLI sessions against a real `SQLite` store, feeding scripted
//! answers and checking both the transcript and the table. Tests include:
//! - Multi-record `addUser` runs and where they stop
//! - Invalid answers aborting before any write
//! - Malformed ids
//! - Unicode and whitespace in names
//! - Unknown commands falling through

#![cfg(feature = "sqlite")]

use gymdb::cli::{Operation, Session, ADD_ANOTHER_PROMPT, ID_PROMPT, OPERATION_PROMPT};
use gymdb::engine::sqlite::SqliteStore;
use gymdb::{GymError, MemberRepository};
use std::io::Cursor;
use std::path::{Path, PathBuf};

// ============================================================================
// Test Helpers
// ============================================================================

fn create_test_db() -> PathBuf {
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::time::{SystemTime, UNIX_EPOCH};
    static COUNTER: AtomicU64 = AtomicU64::new(0);

    let timestamp = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_nanos();
    let seq = COUNTER.fetch_add(1, Ordering::SeqCst);
    let temp_file = std::env::temp_dir().join(format!("gymdb_edge_{timestamp}_{seq}.db"));
    let _ = std::fs::remove_file(&temp_file);
    temp_file
}

fn cleanup_db(path: &Path) {
    let _ = std::fs::remove_file(path);
}

async fn open_store(path: &Path) -> SqliteStore {
    let store = SqliteStore::open(path).expect("Failed to open store");
    store.ensure_schema().await.expect("Failed to create schema");
    store
}

fn row_count(path: &Path) -> i64 {
    rusqlite::Connection::open(path)
        .unwrap()
        .query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))
        .unwrap()
}

/// Run one scripted session; returns the outcome and the transcript
async fn run_session(
    store: &SqliteStore,
    script: &str,
) -> (gymdb::Result<Option<Operation>>, String) {
    let mut session = Session::new(Cursor::new(script.as_bytes().to_vec()), Vec::new());
    let outcome = session.run(store).await;
    (outcome, String::from_utf8(session.into_output()).unwrap())
}

const BO: &str = "Bo\nLi\n41\n180\n88.2\nMale\nMaster\nfully-interactive\n";

// ============================================================================
// addUser
// ============================================================================

#[tokio::test]
async fn test_add_three_users_in_one_session() {
    let path = create_test_db();
    let store = open_store(&path).await;

    let (outcome, transcript) = run_session(&store, &format!("addUser\n{BO}y\n{BO}Y\n{BO}n\n")).await;

    assert_eq!(outcome.unwrap(), Some(Operation::AddUser));
    assert_eq!(row_count(&path), 3);
    assert_eq!(transcript.matches("User inserted successfully with id of ").count(), 3);
    assert_eq!(transcript.matches(ADD_ANOTHER_PROMPT).count(), 3);
    assert!(transcript.ends_with("Exiting program.\n"));

    cleanup_db(&path);
}

#[tokio::test]
async fn test_printed_id_matches_stored_row() {
    let path = create_test_db();
    let store = open_store(&path).await;

    let (_, transcript) = run_session(&store, &format!("addUser\n{BO}n\n")).await;

    let printed = transcript
        .split("User inserted successfully with id of ")
        .nth(1)
        .and_then(|rest| rest.split('!').next())
        .expect("transcript should contain the new id");
    let id = uuid::Uuid::parse_str(printed).expect("printed id should be a UUID");

    let stored: String = rusqlite::Connection::open(&path)
        .unwrap()
        .query_row("SELECT id FROM users", [], |row| row.get(0))
        .unwrap();
    assert_eq!(stored, id.to_string());

    cleanup_db(&path);
}

#[tokio::test]
async fn test_invalid_enum_answers_write_nothing() {
    let scripts = [
        "addUser\nAna\nDiaz\n30\n165\n60.5\nOther\nBeginner\nnormal\nn\n",
        "addUser\nAna\nDiaz\n30\n165\n60.5\nFemale\nExpert\nnormal\nn\n",
        "addUser\nAna\nDiaz\n30\n165\n60.5\nFemale\nBeginner\nplatinum\nn\n",
    ];

    for script in scripts {
        let path = create_test_db();
        let store = open_store(&path).await;

        let (outcome, transcript) = run_session(&store, script).await;

        assert!(matches!(outcome, Err(GymError::ValidationFailed(_))), "{script:?}");
        assert_eq!(row_count(&path), 0);
        assert!(!transcript.contains("User inserted"));

        cleanup_db(&path);
    }
}

#[tokio::test]
async fn test_unicode_and_spaces_in_names() {
    let path = create_test_db();
    let store = open_store(&path).await;

    let script = "addUser\n  José María  \nO'Brien-Núñez\n28\n170\n70\nMale\nIntermediate\nnormal\nn\n";
    let (outcome, _) = run_session(&store, script).await;
    outcome.unwrap();

    let (name, last_name): (String, String) = rusqlite::Connection::open(&path)
        .unwrap()
        .query_row("SELECT name, last_name FROM users", [], |row| Ok((row.get(0)?, row.get(1)?)))
        .unwrap();
    assert_eq!(name, "José María");
    assert_eq!(last_name, "O'Brien-Núñez");

    cleanup_db(&path);
}

#[tokio::test]
async fn test_windows_line_endings() {
    let path = create_test_db();
    let store = open_store(&path).await;

    let script = "addUser\r\nAna\r\nDiaz\r\n30\r\n165\r\n60.5\r\nFemale\r\nBeginner\r\nnormal\r\nn\r\n";
    let (outcome, _) = run_session(&store, script).await;

    assert_eq!(outcome.unwrap(), Some(Operation::AddUser));
    assert_eq!(row_count(&path), 1);

    cleanup_db(&path);
}

// ============================================================================
// deleteUser / editUser
// ============================================================================

#[tokio::test]
async fn test_delete_then_edit_missing_member() {
    let path = create_test_db();
    let store = open_store(&path).await;

    let (_, transcript) = run_session(&store, &format!("addUser\n{BO}n\n")).await;
    let id = transcript
        .split("User inserted successfully with id of ")
        .nth(1)
        .and_then(|rest| rest.split('!').next())
        .unwrap()
        .to_string();

    let (outcome, transcript) = run_session(&store, &format!("deleteUser\n{id}\n")).await;
    assert_eq!(outcome.unwrap(), Some(Operation::DeleteUser));
    assert_eq!(transcript, format!("{OPERATION_PROMPT}{ID_PROMPT}"));
    assert_eq!(row_count(&path), 0);

    // Deleting again and editing the gone member both succeed without effect
    let (outcome, _) = run_session(&store, &format!("deleteUser\n{id}\n")).await;
    assert!(outcome.is_ok());
    let (outcome, transcript) = run_session(&store, &format!("editUser\n{id}\nAge\n50\n")).await;
    assert!(outcome.is_ok());
    assert!(transcript.ends_with("successfully changed.\n"));

    cleanup_db(&path);
}

#[tokio::test]
async fn test_uppercase_id_is_accepted() {
    let path = create_test_db();
    let store = open_store(&path).await;

    let (_, transcript) = run_session(&store, &format!("addUser\n{BO}n\n")).await;
    let id = transcript
        .split("User inserted successfully with id of ")
        .nth(1)
        .and_then(|rest| rest.split('!').next())
        .unwrap()
        .to_uppercase();

    let (outcome, _) = run_session(&store, &format!("deleteUser\n{id}\n")).await;
    outcome.unwrap();
    assert_eq!(row_count(&path), 0);

    cleanup_db(&path);
}

#[tokio::test]
async fn test_malformed_ids_are_fatal() {
    let path = create_test_db();
    let store = open_store(&path).await;
    run_session(&store, &format!("addUser\n{BO}n\n")).await.0.unwrap();

    for script in ["deleteUser\nnot-a-uuid\n", "editUser\n12345\nAge\n1\n", "deleteUser\n\n"] {
        let (outcome, _) = run_session(&store, script).await;
        assert!(matches!(outcome, Err(GymError::InvalidInput(_))), "{script:?}");
    }
    assert_eq!(row_count(&path), 1);

    cleanup_db(&path);
}

// ============================================================================
// Fallthrough
// ============================================================================

#[tokio::test]
async fn test_unknown_and_empty_commands_do_nothing() {
    let path = create_test_db();
    let store = open_store(&path).await;

    for script in ["removeUser\n", "ADDUSER\n", "", "\n"] {
        let (outcome, transcript) = run_session(&store, script).await;
        assert_eq!(outcome.unwrap(), None);
        assert_eq!(transcript, OPERATION_PROMPT);
    }
    assert_eq!(row_count(&path), 0);

    cleanup_db(&path);
}
