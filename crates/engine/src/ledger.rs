//! The `Ledger` holds the participants and the expenses they share.
//!
//! It is the only place where the data model is mutated, and it enforces the
//! structural invariants on every mutation:
//!
//! - participant names are unique and never blank;
//! - every expense references current participants only, and its split is
//!   never empty;
//! - removing a participant removes every expense that mentions it;
//! - expense ids are unique for the whole life of the ledger.

use std::{borrow::Borrow, fmt};

use crate::{
    EngineError, MoneyCents, ResultEngine,
    commands::{AmountInput, ExpenseDraft},
    error::{Field, ValidationErrors},
    util::normalize_name,
};

/// A person sharing expenses, identified by its (trimmed) name.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Participant(String);

impl Participant {
    pub(crate) fn new(name: String) -> Self {
        Self(name)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Participant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Participant {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Participant {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for Participant {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Participant {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Stable identifier of an expense.
///
/// Assigned by the ledger from a monotonic counter, so two expenses created
/// in the same instant still get distinct ids.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ExpenseId(u64);

impl ExpenseId {
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ExpenseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An expense paid by one participant and split equally among others.
///
/// Records are immutable: a correction is a removal followed by a new expense.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExpenseRecord {
    pub id: ExpenseId,
    pub payer: Participant,
    /// Negative amounts are refunds and reverse the direction of the debt.
    pub amount: MoneyCents,
    pub description: String,
    /// Ordered set of participants sharing the cost. Never empty.
    pub split_with: Vec<Participant>,
}

impl ExpenseRecord {
    /// Returns `true` if `name` paid this expense or is part of its split.
    #[must_use]
    pub fn involves(&self, name: &str) -> bool {
        self.payer == name || self.split_with.iter().any(|p| p == name)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ledger {
    participants: Vec<Participant>,
    expenses: Vec<ExpenseRecord>,
    next_id: u64,
}

impl Default for Ledger {
    fn default() -> Self {
        Self {
            participants: Vec::new(),
            expenses: Vec::new(),
            next_id: 1,
        }
    }
}

impl Ledger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a ledger from already validated parts. The id counter resumes
    /// after the highest id found.
    pub(crate) fn from_parts(participants: Vec<Participant>, expenses: Vec<ExpenseRecord>) -> Self {
        let next_id = expenses
            .iter()
            .map(|e| e.id.get().saturating_add(1))
            .max()
            .unwrap_or(1);
        Self {
            participants,
            expenses,
            next_id,
        }
    }

    /// Participants in insertion order.
    #[must_use]
    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    /// Expenses in creation order.
    #[must_use]
    pub fn expenses(&self) -> &[ExpenseRecord] {
        &self.expenses
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.participants.iter().any(|p| p == name)
    }

    #[must_use]
    pub fn expense(&self, id: ExpenseId) -> Option<&ExpenseRecord> {
        self.expenses.iter().find(|e| e.id == id)
    }

    /// Sum of every expense amount, refunds included.
    pub fn total_spent(&self) -> ResultEngine<MoneyCents> {
        self.expenses
            .iter()
            .try_fold(MoneyCents::ZERO, |total, e| total.checked_add(e.amount))
            .ok_or_else(|| EngineError::Overflow("total spent".to_string()))
    }

    /// Expenses paid by `name`.
    pub fn paid_by<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a ExpenseRecord> {
        self.expenses.iter().filter(move |e| e.payer == name)
    }

    /// Appends a participant. The name is trimmed first.
    ///
    /// A name that is blank after trimming is rejected like a duplicate,
    /// carrying the empty name.
    pub fn add_participant(&mut self, name: &str) -> ResultEngine<Participant> {
        let Some(name) = normalize_name(name) else {
            return Err(EngineError::DuplicateParticipant(String::new()));
        };
        if self.contains(&name) {
            return Err(EngineError::DuplicateParticipant(name));
        }
        let participant = Participant::new(name);
        self.participants.push(participant.clone());
        Ok(participant)
    }

    /// Removes a participant together with every expense it paid or shares.
    ///
    /// Returns the expenses removed by the cascade.
    pub fn remove_participant(&mut self, name: &str) -> ResultEngine<Vec<ExpenseRecord>> {
        let name = name.trim();
        let index = self
            .participants
            .iter()
            .position(|p| p == name)
            .ok_or_else(|| EngineError::NotFound(name.to_string()))?;
        self.participants.remove(index);

        let (removed, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.expenses)
            .into_iter()
            .partition(|expense| expense.involves(name));
        self.expenses = kept;
        Ok(removed)
    }

    /// Validates `draft` and appends the resulting expense.
    ///
    /// Every field is checked before anything changes; on failure all the
    /// problems are returned together in [`EngineError::Validation`].
    pub fn add_expense(&mut self, draft: &ExpenseDraft) -> ResultEngine<ExpenseRecord> {
        let mut errors = ValidationErrors::new();

        let payer = match draft.payer.as_deref().map(str::trim) {
            None | Some("") => {
                errors.push(Field::Payer, "Please select who paid");
                None
            }
            Some(name) => match self.participant(name) {
                Some(p) => Some(p.clone()),
                None => {
                    errors.push(Field::Payer, format!("{name} is not a participant"));
                    None
                }
            },
        };

        let amount = match &draft.amount {
            None => {
                errors.push(Field::Amount, "Please enter an amount");
                None
            }
            Some(AmountInput::Text(raw)) if raw.trim().is_empty() => {
                errors.push(Field::Amount, "Please enter an amount");
                None
            }
            Some(AmountInput::Text(raw)) => match raw.parse::<MoneyCents>() {
                Ok(amount) => Some(amount),
                Err(err) => {
                    errors.push(Field::Amount, format!("Please enter a valid number ({err})"));
                    None
                }
            },
            Some(AmountInput::Cents(amount)) => Some(*amount),
        };

        let description = draft.description.trim();
        if description.is_empty() {
            errors.push(Field::Description, "Please enter a description");
        }

        let mut split_with: Vec<Participant> = Vec::with_capacity(draft.split_with.len());
        let mut unknown = Vec::new();
        for name in draft.split_with.iter().map(|n| n.trim()).filter(|n| !n.is_empty()) {
            match self.participant(name) {
                Some(p) if !split_with.contains(p) => split_with.push(p.clone()),
                Some(_) => {}
                None => unknown.push(name),
            }
        }
        if split_with.is_empty() && unknown.is_empty() {
            errors.push(
                Field::SplitWith,
                "Please select at least one person to split with",
            );
        } else if !unknown.is_empty() {
            errors.push(
                Field::SplitWith,
                format!("not participants: {}", unknown.join(", ")),
            );
        }

        let (payer, amount) = match (payer, amount) {
            (Some(payer), Some(amount)) if errors.is_empty() => (payer, amount),
            _ => return Err(errors.into()),
        };

        let expense = ExpenseRecord {
            id: self.allocate_id()?,
            payer,
            amount,
            description: description.to_string(),
            split_with,
        };
        self.expenses.push(expense.clone());
        Ok(expense)
    }

    /// Removes one expense.
    pub fn remove_expense(&mut self, id: ExpenseId) -> ResultEngine<ExpenseRecord> {
        let index = self
            .expenses
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| EngineError::NotFound(format!("expense {id}")))?;
        Ok(self.expenses.remove(index))
    }

    fn participant(&self, name: &str) -> Option<&Participant> {
        self.participants.iter().find(|p| *p == name)
    }

    fn allocate_id(&mut self) -> ResultEngine<ExpenseId> {
        let id = self.next_id;
        self.next_id = id
            .checked_add(1)
            .ok_or_else(|| EngineError::Overflow("expense ids exhausted".to_string()))?;
        Ok(ExpenseId::new(id))
    }
}
