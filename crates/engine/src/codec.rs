//! JSON document a [`Ledger`] is saved to and loaded from.
//!
//! The document holds exactly the participants and the expenses. Balances
//! are derived and never written.
//!
//! ```json
//! {
//!   "users": ["Alice", "Bob"],
//!   "expenses": [
//!     { "id": 1, "paidBy": "Alice", "amount": 12.5,
//!       "description": "Lunch", "splitWith": ["Alice", "Bob"] }
//!   ]
//! }
//! ```
//!
//! Loading is all-or-nothing: a document is fully validated into a fresh
//! [`Ledger`] and any problem rejects it as a whole.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::{
    EngineError, ExpenseId, ExpenseRecord, Ledger, MoneyCents, Participant, ResultEngine,
    util::normalize_name,
};

/// File name proposed when exporting a ledger.
pub const DEFAULT_FILE_NAME: &str = "expense-sharing-data.json";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LedgerDocument {
    pub users: Vec<String>,
    pub expenses: Vec<ExpenseDocument>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseDocument {
    pub id: u64,
    pub paid_by: String,
    /// Major units (e.g. `12.5`).
    pub amount: f64,
    pub description: String,
    pub split_with: Vec<String>,
}

/// Snapshot of `ledger` as a document.
#[must_use]
pub fn serialize(ledger: &Ledger) -> LedgerDocument {
    LedgerDocument {
        users: ledger
            .participants()
            .iter()
            .map(ToString::to_string)
            .collect(),
        expenses: ledger
            .expenses()
            .iter()
            .map(|expense| ExpenseDocument {
                id: expense.id.get(),
                paid_by: expense.payer.to_string(),
                amount: expense.amount.to_major_f64(),
                description: expense.description.clone(),
                split_with: expense.split_with.iter().map(ToString::to_string).collect(),
            })
            .collect(),
    }
}

/// Pretty JSON with 2-space indentation.
pub fn to_json(ledger: &Ledger) -> ResultEngine<String> {
    Ok(serde_json::to_string_pretty(&serialize(ledger))?)
}

/// Parses and validates a JSON document.
pub fn from_json(input: &str) -> ResultEngine<Ledger> {
    let document: LedgerDocument = serde_json::from_str(input)
        .map_err(|err| EngineError::MalformedDocument(err.to_string()))?;
    deserialize(document)
}

/// Validates `document` against the ledger invariants and builds a
/// [`Ledger`] from it.
///
/// Every problem is collected before failing, so the error lists all of
/// them.
pub fn deserialize(document: LedgerDocument) -> ResultEngine<Ledger> {
    let mut problems: Vec<String> = Vec::new();

    let mut participants: Vec<Participant> = Vec::with_capacity(document.users.len());
    for raw in &document.users {
        match normalize_name(raw) {
            None => problems.push("empty user name".to_string()),
            Some(name) if participants.iter().any(|p| *p == name.as_str()) => {
                problems.push(format!("duplicate user \"{name}\""));
            }
            Some(name) => participants.push(Participant::new(name)),
        }
    }

    let lookup = |name: &str| participants.iter().find(|p| *p == name.trim()).cloned();

    let mut seen_ids: HashSet<u64> = HashSet::new();
    let mut expenses: Vec<ExpenseRecord> = Vec::with_capacity(document.expenses.len());
    for expense in document.expenses {
        let label = format!("expense {}", expense.id);
        if !seen_ids.insert(expense.id) {
            problems.push(format!("{label}: duplicate id"));
        }

        let payer = lookup(&expense.paid_by);
        if payer.is_none() {
            problems.push(format!(
                "{label}: payer \"{}\" is not a user",
                expense.paid_by
            ));
        }

        let amount = match MoneyCents::from_major_f64(expense.amount) {
            Ok(amount) => Some(amount),
            Err(err) => {
                problems.push(format!("{label}: {err}"));
                None
            }
        };

        let description = expense.description.trim().to_string();
        if description.is_empty() {
            problems.push(format!("{label}: empty description"));
        }

        if expense.split_with.is_empty() {
            problems.push(format!("{label}: empty split"));
        }
        let mut split_with: Vec<Participant> = Vec::with_capacity(expense.split_with.len());
        for name in &expense.split_with {
            match lookup(name) {
                Some(p) if !split_with.contains(&p) => split_with.push(p),
                Some(_) => {}
                None => problems.push(format!("{label}: \"{name}\" is not a user")),
            }
        }

        if let (Some(payer), Some(amount)) = (payer, amount) {
            expenses.push(ExpenseRecord {
                id: ExpenseId::new(expense.id),
                payer,
                amount,
                description,
                split_with,
            });
        }
    }

    if !problems.is_empty() {
        return Err(EngineError::MalformedDocument(problems.join("; ")));
    }

    Ok(Ledger::from_parts(participants, expenses))
}
