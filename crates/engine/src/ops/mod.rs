use crate::{BalanceMatrix, ExpenseRecord, Ledger, Participant, ResultEngine, compute_balances};

mod documents;
mod expenses;
mod participants;

/// Run a block against a scratch copy of the ledger, committing the copy and
/// its recomputed balances only when both succeed.
macro_rules! with_tx {
    ($self:expr, |$ledger:ident| $body:expr) => {{
        let mut $ledger = $self.ledger.clone();
        let result = $body;
        match result {
            Ok(value) => {
                let balances = $crate::compute_balances(&$ledger)?;
                $self.ledger = $ledger;
                $self.balances = balances;
                Ok(value)
            }
            Err(err) => Err(err),
        }
    }};
}

pub(crate) use with_tx;

/// Entry point for the presentation layer.
///
/// Owns the current [`Ledger`] and the [`BalanceMatrix`] derived from it. The
/// balances are recomputed after every successful mutation, so readers never
/// observe balances that lag behind the ledger. A failed mutation leaves both
/// untouched.
#[derive(Clone, Debug, Default)]
pub struct Engine {
    ledger: Ledger,
    balances: BalanceMatrix,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    /// An engine over an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Participants in insertion order.
    #[must_use]
    pub fn participants(&self) -> &[Participant] {
        self.ledger.participants()
    }

    /// Expenses in creation order.
    #[must_use]
    pub fn expenses(&self) -> &[ExpenseRecord] {
        self.ledger.expenses()
    }

    /// Current netted balances.
    #[must_use]
    pub fn balances(&self) -> &BalanceMatrix {
        &self.balances
    }
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    ledger: Option<Ledger>,
}

impl EngineBuilder {
    /// Start from an existing ledger instead of an empty one.
    pub fn ledger(mut self, ledger: Ledger) -> EngineBuilder {
        self.ledger = Some(ledger);
        self
    }

    /// Construct `Engine`
    pub fn build(self) -> ResultEngine<Engine> {
        let ledger = self.ledger.unwrap_or_default();
        let balances = compute_balances(&ledger)?;
        Ok(Engine { ledger, balances })
    }
}
