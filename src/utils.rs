use time::{Date, OffsetDateTime};

use crate::error::DebtError;

pub fn validate_string_length(
    value: &str,
    field_name: &str,
    max_length: usize,
) -> Result<(), DebtError> {
    if value.trim().is_empty() {
        return Err(DebtError::Validation(format!(
            "{} cannot be empty",
            field_name
        )));
    }
    if value.chars().count() > max_length {
        return Err(DebtError::Validation(format!(
            "{} must be less than {} characters",
            field_name, max_length
        )));
    }
    Ok(())
}

/// Public link to the debt page. Anyone holding it can read the debt.
pub fn share_link(base_url: &str, debt_id: &str) -> String {
    format!("{}/debt?debtId={}", base_url.trim_end_matches('/'), debt_id)
}

pub fn today_utc() -> Date {
    OffsetDateTime::now_utc().date()
}
