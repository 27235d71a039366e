#![allow(dead_code)]

use cobra_amigo::AppState;
use cobra_amigo::config::Config;
use cobra_amigo::database::{Db, init_db};
use cobra_amigo::debts::DebtStore;
use cobra_amigo::models::{Debt, NewDebt};
use std::sync::Arc;
use tempfile::{TempDir, tempdir};
use time::{Date, macros::date};
use tower_sessions::{MemoryStore, Session};

pub const TEST_OWNER: &str = "U1";
pub const OTHER_OWNER: &str = "U2";
pub const TEST_BASE_URL: &str = "https://cobra.example";
pub const TEST_SESSION_SECRET: &str =
    "0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef";

pub const TEST_START_DATE: Date = date!(2024 - 01 - 01);

/// The returned `TempDir` must be kept alive for the duration of the test.
pub async fn setup_test_environment() -> (Db, DebtStore, TempDir) {
    let temp_dir = tempdir().expect("Failed to create temporary directory");
    let data_path = temp_dir
        .path()
        .to_str()
        .expect("Failed to convert path to string")
        .to_string();

    let db = init_db(&data_path)
        .await
        .unwrap_or_else(|e| panic!("Failed to initialize database at {}: {}", data_path, e));
    let store = DebtStore::new(db.clone());

    (db, store, temp_dir)
}

pub fn test_config(data_path: &str) -> Config {
    Config::new("127.0.0.1", "3000", data_path, TEST_SESSION_SECRET, TEST_BASE_URL)
        .expect("test config should be valid")
}

pub async fn setup_test_state() -> (AppState, TempDir) {
    let (db, _store, temp_dir) = setup_test_environment().await;
    let config = test_config(temp_dir.path().to_str().unwrap());
    (AppState::new(db, config), temp_dir)
}

/// A session that is not attached to any request, backed by its own store.
pub fn empty_session() -> Session {
    Session::new(None, Arc::new(MemoryStore::default()), None)
}

pub async fn session_for(user_id: &str) -> Session {
    let session = empty_session();
    session
        .insert("user_id", user_id)
        .await
        .expect("Failed to insert user_id into session");
    session
        .insert("username", format!("user-{}", user_id))
        .await
        .expect("Failed to insert username into session");
    session
}

pub fn new_debt(debtor_name: &str, amount: f64) -> NewDebt {
    NewDebt {
        debtor_name: debtor_name.to_string(),
        amount,
        start_date: TEST_START_DATE,
        pix_key: format!("{}@pix", debtor_name.to_lowercase()),
    }
}

pub async fn create_test_debt(store: &DebtStore, owner_id: &str, debtor_name: &str, amount: f64) -> Debt {
    store
        .create(owner_id, new_debt(debtor_name, amount))
        .await
        .unwrap_or_else(|e| panic!("Failed to create test debt '{}': {}", debtor_name, e))
}
