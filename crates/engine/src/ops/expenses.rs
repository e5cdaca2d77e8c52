use crate::{ExpenseDraft, ExpenseId, ExpenseRecord, ResultEngine};

use super::{Engine, with_tx};

impl Engine {
    /// Validates `draft` and records it as a new expense.
    ///
    /// On failure nothing changes and every invalid field is reported in
    /// [`EngineError::Validation`](crate::EngineError::Validation).
    pub fn add_expense(&mut self, draft: &ExpenseDraft) -> ResultEngine<ExpenseRecord> {
        let expense = with_tx!(self, |ledger| ledger.add_expense(draft))?;
        tracing::debug!(
            id = %expense.id,
            payer = %expense.payer,
            amount = %expense.amount,
            split = expense.split_with.len(),
            "expense added"
        );
        Ok(expense)
    }

    /// Removes an expense by id.
    pub fn remove_expense(&mut self, id: ExpenseId) -> ResultEngine<ExpenseRecord> {
        let expense = with_tx!(self, |ledger| ledger.remove_expense(id))?;
        tracing::debug!(id = %id, "expense removed");
        Ok(expense)
    }
}
