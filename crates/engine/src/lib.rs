//! Shared expense ledger.
//!
//! The crate keeps track of who paid for what among a group of participants
//! and works out who owes whom:
//!
//! - [`Ledger`] stores participants and expenses and enforces their
//!   invariants;
//! - [`compute_balances`] derives the netted [`BalanceMatrix`] from a ledger;
//! - [`codec`] saves and loads ledgers as JSON documents;
//! - [`Engine`] ties them together for a user interface, recomputing the
//!   balances after every change.
//!
//! ```rust
//! use engine::{Engine, ExpenseDraft, MoneyCents};
//!
//! let mut engine = Engine::new();
//! engine.add_participant("Alice").unwrap();
//! engine.add_participant("Bob").unwrap();
//! engine
//!     .add_expense(
//!         &ExpenseDraft::new()
//!             .payer("Alice")
//!             .amount("60")
//!             .description("Dinner")
//!             .split_among(["Alice", "Bob"]),
//!     )
//!     .unwrap();
//!
//! assert_eq!(engine.balances().owed("Bob", "Alice"), MoneyCents::new(30_00));
//! ```

pub use balances::{BalanceMatrix, Debt, NetMatrix, Share, compute_balances, share_of};
pub use commands::{AmountInput, ExpenseDraft};
pub use error::{EngineError, Field, FieldError, ValidationErrors};
pub use ledger::{ExpenseId, ExpenseRecord, Ledger, Participant};
pub use money::MoneyCents;
pub use ops::{Engine, EngineBuilder};

mod balances;
pub mod codec;
mod commands;
mod error;
mod ledger;
mod money;
mod ops;
mod util;

pub type ResultEngine<T> = Result<T, EngineError>;
