use anyhow::Result;
use libsql::{Builder, Connection};
use std::{path::Path, sync::Arc};
use tokio::sync::RwLock;

use crate::constants::DATABASE_FILE;

const CREATE_USERS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id             TEXT    PRIMARY KEY,
    name           TEXT    UNIQUE NOT NULL,
    password_hash  TEXT    NOT NULL
);
"#;

const CREATE_DEBTS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS debts (
    id           TEXT    PRIMARY KEY,
    owner_id     TEXT    NOT NULL,
    debtor_name  TEXT    NOT NULL,
    amount       REAL    NOT NULL CHECK (amount >= 0),
    start_date   TEXT    NOT NULL,
    pix_key      TEXT    NOT NULL,
    created_at   INTEGER NOT NULL,
    updated_at   INTEGER NOT NULL
);
"#;

const CREATE_DEBTS_OWNER_INDEX: &str = r#"
CREATE INDEX IF NOT EXISTS idx_debts_owner_created
    ON debts (owner_id, created_at DESC);
"#;

pub type Db = Arc<RwLock<Connection>>;

/// Opens (or creates) the application database under `data_dir` and runs
/// the schema statements.
pub async fn init_db(data_dir: &str) -> Result<Db> {
    tokio::fs::create_dir_all(data_dir).await?;
    let path = Path::new(data_dir).join(DATABASE_FILE);
    let db = Builder::new_local(path).build().await?;
    let conn = db.connect()?;

    for statement in [CREATE_USERS_TABLE, CREATE_DEBTS_TABLE, CREATE_DEBTS_OWNER_INDEX] {
        conn.execute(statement, ()).await?;
    }

    Ok(Arc::new(RwLock::new(conn)))
}
