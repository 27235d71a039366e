use time::{Date, OffsetDateTime, format_description::BorrowedFormatItem, macros::format_description};
use tracing::{debug, info};
use uuid::Uuid;

use crate::constants::*;
use crate::database::Db;
use crate::error::DebtError;
use crate::models::{Debt, NewDebt};
use crate::utils::validate_string_length;

pub const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

const DEBT_COLUMNS: &str =
    "id, owner_id, debtor_name, amount, start_date, pix_key, created_at, updated_at";

pub fn validate_debtor_name(name: &str) -> Result<(), DebtError> {
    validate_string_length(name, "Debtor name", MAX_DEBTOR_NAME_LENGTH)
}

pub fn validate_pix_key(pix_key: &str) -> Result<(), DebtError> {
    validate_string_length(pix_key, "PIX key", MAX_PIX_KEY_LENGTH)
}

pub fn validate_amount(amount: f64) -> Result<(), DebtError> {
    if !amount.is_finite() {
        return Err(DebtError::validation("Amount must be a number"));
    }
    if amount < 0.0 {
        return Err(DebtError::validation("Amount cannot be negative"));
    }
    Ok(())
}

pub fn parse_start_date(value: &str) -> Result<Date, DebtError> {
    Date::parse(value.trim(), DATE_FORMAT)
        .map_err(|_| DebtError::validation("Start date must be in YYYY-MM-DD format"))
}

pub fn extract_debt_from_row(row: libsql::Row) -> Result<Debt, DebtError> {
    let start_date: String = row.get(4)?;
    let start_date = Date::parse(&start_date, DATE_FORMAT)
        .map_err(|e| DebtError::Decode(format!("start_date {:?}: {}", start_date, e)))?;

    Ok(Debt {
        id: row.get(0)?,
        owner_id: row.get(1)?,
        debtor_name: row.get(2)?,
        amount: row.get(3)?,
        start_date,
        pix_key: row.get(5)?,
        created_at: row.get(6)?,
        updated_at: row.get(7)?,
    })
}

/// Data access for the `debts` table.
///
/// Listing and deletion are scoped to the owning user. Lookup by id is not:
/// the identifier itself is what grants read access to the public debt page.
#[derive(Clone)]
pub struct DebtStore {
    db: Db,
}

impl DebtStore {
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    pub async fn create(&self, owner_id: &str, new_debt: NewDebt) -> Result<Debt, DebtError> {
        if owner_id.trim().is_empty() {
            return Err(DebtError::validation("Owner is required"));
        }
        validate_debtor_name(&new_debt.debtor_name)?;
        validate_pix_key(&new_debt.pix_key)?;
        validate_amount(new_debt.amount)?;

        let now = OffsetDateTime::now_utc().unix_timestamp();
        let debt = Debt {
            id: Uuid::new_v4().to_string(),
            owner_id: owner_id.to_string(),
            debtor_name: new_debt.debtor_name.trim().to_string(),
            amount: new_debt.amount,
            start_date: new_debt.start_date,
            pix_key: new_debt.pix_key.trim().to_string(),
            created_at: now,
            updated_at: now,
        };
        let start_date = debt
            .start_date
            .format(DATE_FORMAT)
            .map_err(|e| DebtError::validation(format!("Invalid start date: {}", e)))?;

        let conn = self.db.write().await;
        conn.execute(
            "INSERT INTO debts (id, owner_id, debtor_name, amount, start_date, pix_key, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
            (
                debt.id.as_str(),
                debt.owner_id.as_str(),
                debt.debtor_name.as_str(),
                debt.amount,
                start_date.as_str(),
                debt.pix_key.as_str(),
                debt.created_at,
                debt.updated_at,
            ),
        )
        .await?;

        info!(debt_id = %debt.id, owner_id = %debt.owner_id, "debt created");
        Ok(debt)
    }

    /// Newest first. Debts created within the same second keep insertion order.
    pub async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<Debt>, DebtError> {
        let conn = self.db.read().await;
        let mut rows = conn
            .query(
                &format!(
                    "SELECT {} FROM debts WHERE owner_id = ? ORDER BY created_at DESC, rowid DESC",
                    DEBT_COLUMNS
                ),
                [owner_id],
            )
            .await?;

        let mut debts = Vec::new();
        while let Some(row) = rows.next().await? {
            debts.push(extract_debt_from_row(row)?);
        }
        Ok(debts)
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Debt, DebtError> {
        let conn = self.db.read().await;
        let mut rows = conn
            .query(
                &format!("SELECT {} FROM debts WHERE id = ?", DEBT_COLUMNS),
                [id],
            )
            .await?;

        match rows.next().await? {
            Some(row) => extract_debt_from_row(row),
            None => {
                debug!(debt_id = %id, "debt lookup missed");
                Err(DebtError::NotFound(id.to_string()))
            }
        }
    }

    /// Deleting an id that does not exist, or that belongs to someone else,
    /// is not an error.
    pub async fn delete_by_id(&self, owner_id: &str, id: &str) -> Result<(), DebtError> {
        let conn = self.db.write().await;
        let affected = conn
            .execute(
                "DELETE FROM debts WHERE id = ? AND owner_id = ?",
                (id, owner_id),
            )
            .await?;

        info!(debt_id = %id, owner_id = %owner_id, affected, "debt delete issued");
        Ok(())
    }
}
