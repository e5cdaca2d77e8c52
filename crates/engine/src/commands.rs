//! Command structs for engine operations.
//!
//! [`ExpenseDraft`] carries the raw input of the "add expense" form. Nothing
//! in it is trusted: the ledger validates every field before creating an
//! [`ExpenseRecord`](crate::ExpenseRecord).

use crate::MoneyCents;

/// Amount as entered by the user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AmountInput {
    /// Free text, parsed with [`MoneyCents::from_str`](std::str::FromStr).
    Text(String),
    /// Already parsed amount.
    Cents(MoneyCents),
}

/// Create an expense.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExpenseDraft {
    pub payer: Option<String>,
    pub amount: Option<AmountInput>,
    pub description: String,
    pub split_with: Vec<String>,
}

impl ExpenseDraft {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn payer(mut self, payer: impl Into<String>) -> Self {
        self.payer = Some(payer.into());
        self
    }

    #[must_use]
    pub fn amount(mut self, amount: impl Into<String>) -> Self {
        self.amount = Some(AmountInput::Text(amount.into()));
        self
    }

    #[must_use]
    pub fn amount_cents(mut self, amount: MoneyCents) -> Self {
        self.amount = Some(AmountInput::Cents(amount));
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Adds one participant to the split.
    #[must_use]
    pub fn split_with(mut self, participant: impl Into<String>) -> Self {
        self.split_with.push(participant.into());
        self
    }

    /// Replaces the whole split.
    #[must_use]
    pub fn split_among<I, S>(mut self, participants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.split_with = participants.into_iter().map(Into::into).collect();
        self
    }

    /// Adds `participant` to the split, or removes it when already there.
    pub fn toggle_split(&mut self, participant: &str) {
        if let Some(pos) = self.split_with.iter().position(|p| p == participant) {
            self.split_with.remove(pos);
        } else {
            self.split_with.push(participant.to_string());
        }
    }
}
