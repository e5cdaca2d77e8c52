use crate::{ExpenseRecord, Participant, ResultEngine};

use super::{Engine, with_tx};

impl Engine {
    /// Adds a participant. Fails on blank or already used names.
    pub fn add_participant(&mut self, name: &str) -> ResultEngine<Participant> {
        let participant = with_tx!(self, |ledger| ledger.add_participant(name))?;
        tracing::debug!(participant = %participant, "participant added");
        Ok(participant)
    }

    /// Removes a participant and every expense it paid or shares.
    ///
    /// Returns the expenses removed with it. A missing name is reported as
    /// [`EngineError::NotFound`](crate::EngineError::NotFound) and changes
    /// nothing.
    pub fn remove_participant(&mut self, name: &str) -> ResultEngine<Vec<ExpenseRecord>> {
        let removed = with_tx!(self, |ledger| ledger.remove_participant(name))?;
        tracing::debug!(
            participant = name.trim(),
            cascaded = removed.len(),
            "participant removed"
        );
        Ok(removed)
    }
}
