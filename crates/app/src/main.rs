use clap::{Args, Parser, Subcommand};
use engine::{AmountInput, EngineError, ExpenseDraft, ExpenseId, codec};
use settings::{Overrides, Settings};

use crate::{error::Result, render::Renderer};

mod error;
mod render;
mod settings;
mod store;

#[derive(Parser, Debug)]
#[command(name = "sparagne")]
#[command(about = "Track shared expenses and see who owes whom")]
struct Cli {
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<String>,
    /// Ledger document to work on.
    #[arg(long, env = "SPARAGNE_LEDGER")]
    ledger: Option<String>,
    /// Symbol printed in front of amounts.
    #[arg(long)]
    currency: Option<String>,
    /// Log filter level (error, warn, info, debug, trace).
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Participant(Participant),
    Expense(Expense),
    /// List participants and expenses.
    List,
    /// Show who owes whom.
    Balances,
    /// Replace the ledger with a document, after validating it.
    Import { file: String },
    /// Write the ledger to another file.
    Export { file: Option<String> },
}

#[derive(Args, Debug)]
struct Participant {
    #[command(subcommand)]
    command: ParticipantCommand,
}

#[derive(Subcommand, Debug)]
enum ParticipantCommand {
    Add { name: String },
    /// Remove a participant and every expense involving it.
    Remove { name: String },
}

#[derive(Args, Debug)]
struct Expense {
    #[command(subcommand)]
    command: ExpenseCommand,
}

#[derive(Subcommand, Debug)]
enum ExpenseCommand {
    Add(ExpenseAddArgs),
    Remove { id: u64 },
}

#[derive(Args, Debug)]
struct ExpenseAddArgs {
    #[arg(long)]
    payer: Option<String>,
    /// Negative amounts record a refund.
    #[arg(long, allow_hyphen_values = true)]
    amount: Option<String>,
    #[arg(long, default_value = "")]
    description: String,
    /// Participants sharing the cost (repeat or comma separate).
    #[arg(long, value_delimiter = ',')]
    split: Vec<String>,
}

impl From<ExpenseAddArgs> for ExpenseDraft {
    fn from(args: ExpenseAddArgs) -> Self {
        ExpenseDraft {
            payer: args.payer,
            amount: args.amount.map(AmountInput::Text),
            description: args.description,
            split_with: args.split,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let settings = match Settings::new(Overrides {
        config: cli.config.clone(),
        ledger_path: cli.ledger.clone(),
        currency_symbol: cli.currency.clone(),
        log_level: cli.log_level.clone(),
    }) {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "sparagne={level},engine={level}",
            level = settings.log_level
        ))
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run(cli.command, &settings) {
        tracing::debug!("command failed: {err:?}");
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run(command: Command, settings: &Settings) -> Result<()> {
    let path = settings.ledger_path.as_str();
    let renderer = Renderer::new(&settings.currency_symbol);
    let mut engine = store::open(path)?;

    match command {
        Command::Participant(Participant { command }) => match command {
            ParticipantCommand::Add { name } => match engine.add_participant(&name) {
                Ok(participant) => {
                    store::save(&engine, path)?;
                    println!("added {participant}");
                }
                Err(EngineError::DuplicateParticipant(name)) if name.is_empty() => {
                    println!("Please enter a name");
                }
                Err(err) => return Err(err.into()),
            },
            ParticipantCommand::Remove { name } => match engine.remove_participant(&name) {
                Ok(removed) => {
                    store::save(&engine, path)?;
                    println!("removed {} ({} expenses removed)", name.trim(), removed.len());
                }
                Err(EngineError::NotFound(name)) => {
                    tracing::info!(participant = %name, "nothing to remove");
                    println!("no participant named {name}");
                }
                Err(err) => return Err(err.into()),
            },
        },
        Command::Expense(Expense { command }) => match command {
            ExpenseCommand::Add(args) => {
                let expense = engine.add_expense(&args.into())?;
                store::save(&engine, path)?;
                println!("added expense #{}", expense.id);
                println!("{}", renderer.balances(&engine));
            }
            ExpenseCommand::Remove { id } => match engine.remove_expense(ExpenseId::new(id)) {
                Ok(expense) => {
                    store::save(&engine, path)?;
                    println!("removed expense #{} ({})", expense.id, expense.description);
                }
                Err(EngineError::NotFound(what)) => {
                    tracing::info!(%what, "nothing to remove");
                    println!("no expense #{id}");
                }
                Err(err) => return Err(err.into()),
            },
        },
        Command::List => {
            println!("People: {}", renderer.participants(&engine));
            println!("{}", renderer.expenses(&engine)?);
        }
        Command::Balances => println!("{}", renderer.balances(&engine)),
        Command::Import { file } => {
            store::import(&mut engine, &file, path)?;
            println!(
                "imported {} people and {} expenses from {file}",
                engine.participants().len(),
                engine.expenses().len()
            );
        }
        Command::Export { file } => {
            let file = file.unwrap_or_else(|| codec::DEFAULT_FILE_NAME.to_string());
            store::write(&file, &engine.save()?)?;
            println!("exported to {file}");
        }
    }

    Ok(())
}
