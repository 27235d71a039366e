use serde::Serialize;
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};
use tracing::debug;

use crate::constants::*;
use crate::debts::DebtStore;
use crate::error::DebtError;
use crate::models::{Debt, DebtSummary};
use crate::qr::pix_payload;

const PT_BR_DATE: &[BorrowedFormatItem<'static>] = format_description!("[day]/[month]/[year]");

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct DebtDetail {
    pub debt: Debt,
    pub days_elapsed: i64,
    pub formatted_amount: String,
    pub since: String,
    pub overdue_hint: Option<&'static str>,
    pub pix_payload: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DebtView {
    NotFound,
    Found(Box<DebtDetail>),
}

/// Whole days from `start_date` to `today`. Future-dated debts count as zero.
pub fn days_elapsed(start_date: Date, today: Date) -> i64 {
    (today - start_date).whole_days().max(0)
}

pub fn format_amount(amount: f64) -> String {
    format!("{} {:.2}", CURRENCY_PREFIX, amount)
}

pub fn format_since(start_date: Date) -> String {
    start_date
        .format(PT_BR_DATE)
        .unwrap_or_else(|_| start_date.to_string())
}

pub fn overdue_hint(days: i64) -> Option<&'static str> {
    match days {
        d if d <= 0 => None,
        d if d > LONG_OVERDUE_AFTER_DAYS => Some("Tempo demais, não acha? 🤨"),
        d if d > OVERDUE_AFTER_DAYS => Some("Já passou da hora! ⏰"),
        _ => Some("Ainda dá tempo de resolver rapidinho! 😉"),
    }
}

pub fn describe(debt: Debt, today: Date) -> DebtDetail {
    let days = days_elapsed(debt.start_date, today);
    DebtDetail {
        days_elapsed: days,
        formatted_amount: format_amount(debt.amount),
        since: format_since(debt.start_date),
        overdue_hint: overdue_hint(days),
        pix_payload: pix_payload(&debt),
        debt,
    }
}

/// Resolves the public debt page for a `debtId` request parameter.
///
/// A missing id or a lookup miss is the terminal not-found view; only
/// database failures come back as errors.
pub async fn resolve(
    store: &DebtStore,
    debt_id: Option<&str>,
    today: Date,
) -> Result<DebtView, DebtError> {
    let Some(id) = debt_id.map(str::trim).filter(|id| !id.is_empty()) else {
        debug!("debt page requested without an id");
        return Ok(DebtView::NotFound);
    };

    match store.get_by_id(id).await {
        Ok(debt) => Ok(DebtView::Found(Box::new(describe(debt, today)))),
        Err(DebtError::NotFound(_)) => Ok(DebtView::NotFound),
        Err(e) => Err(e),
    }
}

/// Dashboard totals over an owner's debts. A debt counts as overdue once
/// its start date is a full week or more in the past.
pub fn summarize(debts: &[Debt], today: Date) -> DebtSummary {
    DebtSummary {
        total_amount: debts.iter().map(|d| d.amount).sum(),
        count: debts.len(),
        overdue_count: debts
            .iter()
            .filter(|d| days_elapsed(d.start_date, today) >= OVERDUE_AFTER_DAYS)
            .count(),
    }
}
