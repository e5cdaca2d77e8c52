//! Plain text views of the ledger.

use engine::{Engine, MoneyCents};

use crate::error::Result;

pub struct Renderer<'a> {
    symbol: &'a str,
}

impl<'a> Renderer<'a> {
    pub fn new(symbol: &'a str) -> Self {
        Self { symbol }
    }

    pub fn money(&self, amount: MoneyCents) -> String {
        let text = amount.to_string();
        match text.strip_prefix('-') {
            Some(abs) => format!("-{}{abs}", self.symbol),
            None => format!("{}{text}", self.symbol),
        }
    }

    pub fn participants(&self, engine: &Engine) -> String {
        if engine.participants().is_empty() {
            return "No people yet.".to_string();
        }
        engine
            .participants()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn expenses(&self, engine: &Engine) -> Result<String> {
        if engine.expenses().is_empty() {
            return Ok("No expenses yet.".to_string());
        }
        let mut lines: Vec<String> = engine
            .expenses()
            .iter()
            .map(|expense| {
                let split = expense
                    .split_with
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ");
                format!(
                    "#{} {}: {} paid {} (split with {split})",
                    expense.id,
                    expense.description,
                    expense.payer,
                    self.money(expense.amount),
                )
            })
            .collect();
        lines.push(format!(
            "Total: {}",
            self.money(engine.ledger().total_spent()?)
        ));
        Ok(lines.join("\n"))
    }

    pub fn balances(&self, engine: &Engine) -> String {
        let balances = engine.balances();
        if balances.is_settled() {
            return "Everyone is settled up!".to_string();
        }
        balances
            .iter()
            .map(|debt| {
                format!(
                    "{} owes {} {}",
                    debt.debtor,
                    debt.creditor,
                    self.money(debt.amount)
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use engine::ExpenseDraft;

    use super::*;

    #[test]
    fn balances_read_as_sentences() {
        let mut engine = Engine::new();
        for name in ["Alice", "Bob", "Carol"] {
            engine.add_participant(name).unwrap();
        }
        let renderer = Renderer::new("$");
        assert_eq!(renderer.balances(&engine), "Everyone is settled up!");

        engine
            .add_expense(
                &ExpenseDraft::new()
                    .payer("Alice")
                    .amount("90")
                    .description("Dinner")
                    .split_among(["Alice", "Bob", "Carol"]),
            )
            .unwrap();
        assert_eq!(
            renderer.balances(&engine),
            "Bob owes Alice $30.00\nCarol owes Alice $30.00"
        );
        assert_eq!(
            renderer.expenses(&engine).unwrap(),
            "#1 Dinner: Alice paid $90.00 (split with Alice, Bob, Carol)\nTotal: $90.00"
        );
    }

    #[test]
    fn negative_money_puts_sign_first() {
        assert_eq!(Renderer::new("€").money(MoneyCents::new(-1050)), "-€10.50");
        assert_eq!(
            Renderer::new("$").money(MoneyCents::new(i64::MIN)),
            "-$92233720368547758.08"
        );
    }

    #[test]
    fn huge_totals_fail_instead_of_wrapping() {
        let mut engine = Engine::new();
        engine.add_participant("Alice").unwrap();
        let draft = ExpenseDraft::new()
            .payer("Alice")
            .amount("90000000000000000")
            .description("Yacht")
            .split_with("Alice");
        engine.add_expense(&draft).unwrap();
        engine.add_expense(&draft).unwrap();

        let renderer = Renderer::new("$");
        assert!(matches!(
            renderer.expenses(&engine),
            Err(crate::error::AppError::Engine(engine::EngineError::Overflow(_)))
        ));
    }
}
