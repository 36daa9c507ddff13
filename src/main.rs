use clap::{Parser, Subcommand};
use log::{debug, error};
use rust_decimal::Decimal;
use serde::Serialize;
use settleup::config::CONFIG;
use settleup::{
    GroupLedger, LedgerError, LedgerSnapshot, Money, ParticipantId, SnapshotError, SplitError,
    SplitInput, SplitMethod, compute_split,
};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Parser)]
#[command(name = "settleup", version, about = "Split shared expenses and work out who owes whom")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Split one amount between participants
    Split {
        #[arg(long)]
        total: Money,
        #[arg(long, default_value = "equal")]
        method: String,
        /// Repeat once per participant, in order
        #[arg(long = "participant", required = true)]
        participants: Vec<String>,
        /// Per-participant values for exact, percentage and shares, in participant order
        #[arg(long = "value")]
        values: Vec<Decimal>,
    },
    /// Net balance per member
    Balances { snapshot: PathBuf },
    /// Suggested settling transfers
    Debts {
        snapshot: PathBuf,
        /// List pairwise obligations instead of simplified debts
        #[arg(long)]
        raw: bool,
    },
    /// Who owes whom, pair by pair, without simplification
    Obligations { snapshot: PathBuf },
    /// Paid, owed and settled amounts per member
    Summary { snapshot: PathBuf },
    /// Balance between two members
    Contact {
        snapshot: PathBuf,
        #[arg(long)]
        user: String,
        #[arg(long)]
        contact: String,
    },
}

#[derive(Error, Debug)]
enum CliError {
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
    #[error(transparent)]
    Split(#[from] SplitError),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error("Failed to render output: {0}")]
    Output(#[from] serde_json::Error),
    #[error("Expected {expected} values, got {actual}")]
    ValueCount { expected: usize, actual: usize },
}

fn main() {
    env_logger::Builder::new()
        .parse_filters(&CONFIG.log_level)
        .init();
    debug!("Loaded configuration: {:?}", *CONFIG);

    let cli = Cli::parse();
    if let Err(e) = run(cli.command) {
        error!("{e}");
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run(command: Command) -> Result<(), CliError> {
    match command {
        Command::Split {
            total,
            method,
            participants,
            values,
        } => {
            let method: SplitMethod = method.parse()?;
            let participants: Vec<ParticipantId> =
                participants.into_iter().map(ParticipantId::from).collect();
            let inputs = if method.needs_inputs() {
                if values.len() != participants.len() {
                    return Err(CliError::ValueCount {
                        expected: participants.len(),
                        actual: values.len(),
                    });
                }
                participants
                    .iter()
                    .cloned()
                    .zip(values)
                    .map(|(participant, value)| SplitInput::new(participant, value))
                    .collect()
            } else {
                Vec::new()
            };
            print_json(&compute_split(method, total, &participants, &inputs)?)
        }
        Command::Balances { snapshot } => print_json(&load(&snapshot)?.balances()),
        Command::Debts { snapshot, raw } => {
            let ledger = load(&snapshot)?;
            if raw || !CONFIG.simplify_debts {
                print_json(&ledger.obligations())
            } else {
                print_json(&ledger.debts())
            }
        }
        Command::Obligations { snapshot } => print_json(&load(&snapshot)?.obligations()),
        Command::Summary { snapshot } => print_json(&load(&snapshot)?.summaries()),
        Command::Contact {
            snapshot,
            user,
            contact,
        } => {
            let ledger = load(&snapshot)?;
            let balance = ledger.contact_balance(&user.into(), &contact.into())?;
            print_json(&balance)
        }
    }
}

fn load(path: &Path) -> Result<GroupLedger, CliError> {
    Ok(LedgerSnapshot::load(path)?.into_ledger(&CONFIG.currency)?)
}

fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
