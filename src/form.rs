use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

use crate::cache::DebtCache;
use crate::debts::{DebtStore, parse_start_date, validate_amount};
use crate::error::DebtError;
use crate::models::{Debt, NewDebt};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormState {
    #[default]
    Hidden,
    Visible,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    DebtorName,
    Amount,
    StartDate,
    PixKey,
}

/// Raw form input as typed by the user.
///
/// Missing fields deserialize as empty so they are reported by
/// [`DebtDraft::validate`] rather than by the JSON extractor.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct DebtDraft {
    pub debtor_name: String,
    #[serde(deserialize_with = "amount_as_text")]
    pub amount: String,
    pub start_date: String,
    pub pix_key: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum AmountInput {
    Text(String),
    Number(f64),
}

fn amount_as_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match AmountInput::deserialize(deserializer)? {
        AmountInput::Text(text) => text,
        AmountInput::Number(n) => n.to_string(),
    })
}

impl DebtDraft {
    pub fn is_empty(&self) -> bool {
        *self == DebtDraft::default()
    }

    /// Required-field and amount checks that gate submission.
    pub fn validate(&self) -> Result<NewDebt, DebtError> {
        let required = [
            (&self.debtor_name, "Debtor name"),
            (&self.amount, "Amount"),
            (&self.start_date, "Start date"),
            (&self.pix_key, "PIX key"),
        ];
        for (value, label) in required {
            if value.trim().is_empty() {
                return Err(DebtError::Validation(format!("{} is required", label)));
            }
        }

        let amount: f64 = self
            .amount
            .trim()
            .parse()
            .map_err(|_| DebtError::validation("Amount must be a number"))?;
        validate_amount(amount)?;

        Ok(NewDebt {
            debtor_name: self.debtor_name.clone(),
            amount,
            start_date: parse_start_date(&self.start_date)?,
            pix_key: self.pix_key.clone(),
        })
    }
}

/// The "new debt" form on the dashboard.
#[derive(Debug, Clone, Default)]
pub struct DebtForm {
    state: FormState,
    draft: DebtDraft,
}

impl DebtForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// An open form pre-filled with `draft`, as posted by a client.
    pub fn with_draft(draft: DebtDraft) -> Self {
        Self {
            state: FormState::Visible,
            draft,
        }
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    pub fn draft(&self) -> &DebtDraft {
        &self.draft
    }

    pub fn toggle(&mut self) {
        self.state = match self.state {
            FormState::Hidden => FormState::Visible,
            FormState::Visible => FormState::Hidden,
        };
    }

    pub fn edit(&mut self, field: DraftField, value: impl Into<String>) {
        let value = value.into();
        match field {
            DraftField::DebtorName => self.draft.debtor_name = value,
            DraftField::Amount => self.draft.amount = value,
            DraftField::StartDate => self.draft.start_date = value,
            DraftField::PixKey => self.draft.pix_key = value,
        }
    }

    /// Creates the drafted debt for `owner_id`.
    ///
    /// Only an open form can be submitted; a hidden form is rejected as a
    /// validation error without touching the draft.
    ///
    /// The store is never called when the draft does not validate. On success
    /// the debt is prepended to the owner's cached list, the draft is cleared
    /// and the form closes. On any failure the form stays open with the draft
    /// untouched so the user can retry.
    pub async fn submit(
        &mut self,
        store: &DebtStore,
        owner_id: &str,
        cache: &DebtCache,
    ) -> Result<Debt, DebtError> {
        if self.state == FormState::Hidden {
            return Err(DebtError::validation("Open the form before submitting"));
        }
        let new_debt = self.draft.validate()?;

        let debt = store.create(owner_id, new_debt).await.inspect_err(|e| {
            warn!(owner_id = %owner_id, error = %e, "debt submission failed");
        })?;

        cache.prepend(owner_id, debt.clone()).await;
        self.draft = DebtDraft::default();
        self.state = FormState::Hidden;
        Ok(debt)
    }
}
