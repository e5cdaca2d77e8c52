//! Derives who owes whom from a [`Ledger`].
//!
//! Nothing here is stored: the [`BalanceMatrix`] is a pure projection of the
//! ledger and is rebuilt from scratch whenever it is needed.
//!
//! Equal splits like `100 / 3` do not terminate in cents, so amounts are
//! accumulated in units of `1 / SUB_CENTS` cent. `SUB_CENTS` is divisible by
//! every split size up to 32, so those shares are exact; larger splits are
//! rounded to the nearest sub-cent unit, far below anything visible. Rounding
//! to cents happens once, when the [`BalanceMatrix`] is produced.

use std::collections::HashMap;

use crate::{
    EngineError, ExpenseRecord, Ledger, MoneyCents, Participant, ResultEngine,
    util::{div_round_half_away, gcd},
};

/// Sub-cent units per cent: the least common multiple of `1..=32`.
const SUB_CENTS: i128 = 144_403_552_893_600;

/// Computes the netted balances of `ledger`.
pub fn compute_balances(ledger: &Ledger) -> ResultEngine<BalanceMatrix> {
    let mut matrix = NetMatrix::accumulate(ledger)?;
    matrix.net();
    matrix.to_balances()
}

/// Pairwise debts before presentation, in sub-cent units.
///
/// `owed[d][c]` is what participant `d` owes participant `c`, in units of
/// `1 / SUB_CENTS` cent. Entries are never negative.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NetMatrix {
    participants: Vec<Participant>,
    owed: Vec<Vec<i128>>,
}

impl NetMatrix {
    /// Replays every expense of `ledger` without netting.
    ///
    /// A positive amount makes each split member owe its share to the payer;
    /// a negative amount makes the payer owe each member instead. The payer's
    /// own share stays with the payer.
    pub fn accumulate(ledger: &Ledger) -> ResultEngine<Self> {
        let participants = ledger.participants().to_vec();
        let size = participants.len();
        let index: HashMap<&str, usize> = participants
            .iter()
            .enumerate()
            .map(|(idx, p)| (p.as_str(), idx))
            .collect();

        let overflow = || EngineError::Overflow("balance computation".to_string());

        let mut owed = vec![vec![0i128; size]; size];
        for expense in ledger.expenses() {
            if expense.split_with.is_empty() {
                continue;
            }
            let payer = *index
                .get(expense.payer.as_str())
                .ok_or_else(|| EngineError::NotFound(expense.payer.to_string()))?;
            let parts = i128::try_from(expense.split_with.len()).map_err(|_| overflow())?;
            let share = i128::from(expense.amount.cents())
                .checked_mul(SUB_CENTS)
                .map(|total| div_round_half_away(total, parts))
                .ok_or_else(overflow)?;

            for member in &expense.split_with {
                let member = *index
                    .get(member.as_str())
                    .ok_or_else(|| EngineError::NotFound(member.to_string()))?;
                if member == payer {
                    continue;
                }
                let (debtor, creditor, value) = if share >= 0 {
                    (member, payer, share)
                } else {
                    (payer, member, share.checked_neg().ok_or_else(overflow)?)
                };
                let cell = &mut owed[debtor][creditor];
                *cell = cell.checked_add(value).ok_or_else(overflow)?;
            }
        }

        Ok(Self { participants, owed })
    }

    /// Collapses opposite debts between each pair into a single direction.
    ///
    /// Afterwards at most one of `owed[a][b]` and `owed[b][a]` is positive.
    /// Running it again changes nothing.
    pub fn net(&mut self) {
        let size = self.participants.len();
        for a in 0..size {
            for b in (a + 1)..size {
                let ab = self.owed[a][b];
                let ba = self.owed[b][a];
                if ab > 0 && ba > 0 {
                    if ab >= ba {
                        self.owed[a][b] = ab - ba;
                        self.owed[b][a] = 0;
                    } else {
                        self.owed[b][a] = ba - ab;
                        self.owed[a][b] = 0;
                    }
                }
            }
        }
    }

    /// Returns `true` when no pair owes in both directions.
    #[must_use]
    pub fn is_netted(&self) -> bool {
        let size = self.participants.len();
        (0..size).all(|a| ((a + 1)..size).all(|b| self.owed[a][b] == 0 || self.owed[b][a] == 0))
    }

    /// Amount `debtor` owes `creditor` in cents, as a reduced
    /// `(numerator, denominator)` fraction.
    #[must_use]
    pub fn owed_exact(&self, debtor: &str, creditor: &str) -> Option<(i128, i128)> {
        let d = self.position(debtor)?;
        let c = self.position(creditor)?;
        let owed = self.owed[d][c];
        let common = gcd(owed, SUB_CENTS);
        Some((owed / common, SUB_CENTS / common))
    }

    /// Rounds every positive entry to cents, dropping the ones that round
    /// to zero.
    pub fn to_balances(&self) -> ResultEngine<BalanceMatrix> {
        let mut debts = Vec::new();
        for (d, debtor) in self.participants.iter().enumerate() {
            for (c, creditor) in self.participants.iter().enumerate() {
                let exact = self.owed[d][c];
                if d == c || exact <= 0 {
                    continue;
                }
                let cents = i64::try_from(div_round_half_away(exact, SUB_CENTS))
                    .map_err(|_| EngineError::Overflow("balance too large".to_string()))?;
                if cents > 0 {
                    debts.push(Debt {
                        debtor: debtor.clone(),
                        creditor: creditor.clone(),
                        amount: MoneyCents::new(cents),
                    });
                }
            }
        }
        Ok(BalanceMatrix { debts })
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.participants.iter().position(|p| p == name)
    }
}

/// "`debtor` owes `creditor` `amount`".
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Debt {
    pub debtor: Participant,
    pub creditor: Participant,
    pub amount: MoneyCents,
}

/// The presentation-ready set of strictly positive pairwise debts, ordered by
/// debtor then creditor in participant order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BalanceMatrix {
    debts: Vec<Debt>,
}

impl BalanceMatrix {
    #[must_use]
    pub fn debts(&self) -> &[Debt] {
        &self.debts
    }

    pub fn iter(&self) -> impl Iterator<Item = &Debt> {
        self.debts.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.debts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.debts.is_empty()
    }

    /// Everyone is settled up.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.debts.is_empty()
    }

    /// What `debtor` owes `creditor`, zero when nothing is owed.
    #[must_use]
    pub fn owed(&self, debtor: &str, creditor: &str) -> MoneyCents {
        self.debts
            .iter()
            .find(|d| d.debtor == debtor && d.creditor == creditor)
            .map_or(MoneyCents::ZERO, |d| d.amount)
    }

    /// What others owe `name` minus what `name` owes others.
    pub fn net_position(&self, name: &str) -> ResultEngine<MoneyCents> {
        self.debts
            .iter()
            .try_fold(MoneyCents::ZERO, |acc, debt| {
                if debt.creditor == name {
                    acc.checked_add(debt.amount)
                } else if debt.debtor == name {
                    acc.checked_sub(debt.amount)
                } else {
                    Some(acc)
                }
            })
            .ok_or_else(|| EngineError::Overflow("net position".to_string()))
    }
}

impl<'a> IntoIterator for &'a BalanceMatrix {
    type Item = &'a Debt;
    type IntoIter = std::slice::Iter<'a, Debt>;

    fn into_iter(self) -> Self::IntoIter {
        self.debts.iter()
    }
}

/// Exact share of one split member: `amount / parts`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Share {
    pub amount: MoneyCents,
    pub parts: u32,
}

impl Share {
    /// The share rounded half away from zero to cents.
    #[must_use]
    pub fn rounded(self) -> MoneyCents {
        if self.parts == 0 {
            return MoneyCents::ZERO;
        }
        let cents = div_round_half_away(i128::from(self.amount.cents()), i128::from(self.parts));
        // |amount / parts| <= |amount|, so this always fits.
        MoneyCents::new(cents as i64)
    }
}

/// Share of `expense` carried by `name`, `None` when not in the split.
///
/// The payer's own share is included here even though it is never owed to
/// anyone.
#[must_use]
pub fn share_of(expense: &ExpenseRecord, name: &str) -> Option<Share> {
    if !expense.split_with.iter().any(|p| p == name) {
        return None;
    }
    let parts = u32::try_from(expense.split_with.len()).ok()?;
    Some(Share {
        amount: expense.amount,
        parts,
    })
}
