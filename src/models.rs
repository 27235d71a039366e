use serde::{Deserialize, Serialize};
use time::Date;

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct User {
    pub id: String,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PublicUser {
    pub id: String,
    pub username: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct RegisterPayload {
    pub username: String,
    pub password: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct LoginPayload {
    pub username: String,
    pub password: String,
}

/// A debt owed to `owner_id` by a friend.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Debt {
    pub id: String,
    pub owner_id: String,
    pub debtor_name: String,
    pub amount: f64,
    #[serde(with = "iso_date")]
    pub start_date: Date,
    pub pix_key: String,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Validated input for [`crate::debts::DebtStore::create`].
#[derive(Debug, Clone, PartialEq)]
pub struct NewDebt {
    pub debtor_name: String,
    pub amount: f64,
    pub start_date: Date,
    pub pix_key: String,
}

#[derive(Serialize, Debug, Clone)]
pub struct CreatedDebtResponse {
    pub debt: Debt,
    pub share_link: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct DebtSummary {
    pub total_amount: f64,
    pub count: usize,
    pub overdue_count: usize,
}

#[derive(Serialize, Debug, Clone)]
pub struct ListDebtsResponse {
    pub debts: Vec<Debt>,
    pub summary: DebtSummary,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct DebtPageQuery {
    #[serde(rename = "debtId")]
    pub debt_id: Option<String>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct BannerResponse {
    pub messages: Vec<&'static str>,
}
