use crate::{ResultEngine, codec};

use super::Engine;

impl Engine {
    /// Replaces the ledger with the one described by a JSON document.
    ///
    /// The document is validated in full first. If it is malformed, or its
    /// balances cannot be computed, the current ledger is kept as is.
    pub fn load(&mut self, document: &str) -> ResultEngine<()> {
        let ledger = match codec::from_json(document) {
            Ok(ledger) => ledger,
            Err(err) => {
                tracing::warn!("rejected ledger document: {err}");
                return Err(err);
            }
        };
        let balances = crate::compute_balances(&ledger)?;
        tracing::debug!(
            participants = ledger.participants().len(),
            expenses = ledger.expenses().len(),
            "ledger loaded"
        );
        self.ledger = ledger;
        self.balances = balances;
        Ok(())
    }

    /// JSON document for the current ledger.
    pub fn save(&self) -> ResultEngine<String> {
        codec::to_json(&self.ledger)
    }
}
