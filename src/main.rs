use clap::{Parser, Subcommand, ValueEnum};
use miette::{IntoDiagnostic, Result};
use paybook::application::ledger::PayrollLedger;
use paybook::domain::money::Money;
use paybook::domain::transaction::{NewTransaction, TransactionId, TransactionType};
use paybook::domain::worker::{NewWorker, WorkerId};
use paybook::infrastructure::in_memory::{InMemoryTransactionStore, InMemoryWorkerStore};
#[cfg(feature = "storage-rocksdb")]
use paybook::infrastructure::rocksdb::RocksDBStore;
use paybook::interfaces::csv::balance_writer::BalanceWriter;
use paybook::interfaces::csv::transaction_reader::TransactionReader;
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::json;
use std::fs::File;
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the RocksDB database (needs the `storage-rocksdb` feature).
    ///
    /// Without it every invocation starts from an empty in-memory ledger, so
    /// workers and transactions do not outlive the command that created them.
    #[arg(long, env = "PAYBOOK_DB_PATH", global = true)]
    db_path: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `paybook=trace`. Overrides RUST_LOG.
    #[arg(long, env = "PAYBOOK_LOG", global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Manage workers
    #[command(subcommand)]
    Worker(WorkerCommand),
    /// Manage transactions
    #[command(subcommand)]
    Tx(TxCommand),
    /// Show one worker's balance with its transactions
    Balance { worker_id: String },
    /// Show the balance of every worker
    Balances {
        #[arg(long, value_enum, default_value_t = OutputFormat::Csv)]
        format: OutputFormat,
    },
}

#[derive(Subcommand)]
enum WorkerCommand {
    /// Register a worker
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        position: Option<String>,
        #[arg(long)]
        phone: Option<String>,
    },
    /// List workers
    List,
    /// Show a worker
    Show { id: String },
    /// Delete a worker and all of its transactions
    Remove { id: String },
}

#[derive(Subcommand)]
enum TxCommand {
    /// Record an amount due to or paid to a worker
    Add {
        #[arg(long = "worker")]
        worker_id: String,
        #[arg(long = "type", value_name = "due|paid")]
        kind: TransactionType,
        #[arg(long, allow_negative_numbers = true)]
        amount: Decimal,
        #[arg(long)]
        description: Option<String>,
    },
    /// List transactions, newest first
    List {
        #[arg(long = "worker")]
        worker_id: Option<String>,
    },
    /// Show a transaction
    Show { id: String },
    /// Delete a transaction
    Remove { id: String },
    /// Record every row of a `worker_id,type,amount,description` CSV file
    Import { input: PathBuf },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Csv,
    Json,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_level.as_deref());

    let ledger = open_ledger(cli.db_path)?;

    match cli.command {
        Command::Worker(command) => run_worker(&ledger, command).await,
        Command::Tx(command) => run_tx(&ledger, command).await,
        Command::Balance { worker_id } => {
            let balance = ledger
                .worker_balance(&WorkerId::from(worker_id))
                .await
                .into_diagnostic()?;
            print_json(&balance)
        }
        Command::Balances { format } => {
            let balances = ledger.all_worker_balances().await.into_diagnostic()?;
            match format {
                OutputFormat::Csv => {
                    let stdout = io::stdout();
                    let mut writer = BalanceWriter::new(stdout.lock());
                    writer.write_balances(&balances).into_diagnostic()
                }
                OutputFormat::Json => print_json(&balances),
            }
        }
    }
}

fn init_tracing(filter: Option<&str>) {
    let filter = match filter {
        Some(directives) => EnvFilter::new(directives),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };

    // stdout carries command output, so logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .init();
}

fn in_memory_ledger() -> PayrollLedger {
    PayrollLedger::new(
        Box::new(InMemoryWorkerStore::new()),
        Box::new(InMemoryTransactionStore::new()),
    )
}

#[cfg(feature = "storage-rocksdb")]
fn open_ledger(db_path: Option<PathBuf>) -> Result<PayrollLedger> {
    match db_path {
        Some(path) => {
            let store = RocksDBStore::open(path).into_diagnostic()?;
            Ok(PayrollLedger::new(Box::new(store.clone()), Box::new(store)))
        }
        None => Ok(in_memory_ledger()),
    }
}

#[cfg(not(feature = "storage-rocksdb"))]
fn open_ledger(db_path: Option<PathBuf>) -> Result<PayrollLedger> {
    if db_path.is_some() {
        warn!(
            "Persistent storage requested via --db-path, but 'storage-rocksdb' feature is not enabled. Falling back to in-memory storage. Nothing recorded by this command is kept."
        );
    }
    Ok(in_memory_ledger())
}

async fn run_worker(ledger: &PayrollLedger, command: WorkerCommand) -> Result<()> {
    match command {
        WorkerCommand::Add {
            name,
            position,
            phone,
        } => {
            let worker = ledger
                .create_worker(NewWorker {
                    name,
                    position,
                    phone,
                })
                .await
                .into_diagnostic()?;
            print_json(&worker)
        }
        WorkerCommand::List => print_json(&ledger.list_workers().await.into_diagnostic()?),
        WorkerCommand::Show { id } => {
            let worker = ledger
                .get_worker(&WorkerId::from(id))
                .await
                .into_diagnostic()?;
            print_json(&worker)
        }
        WorkerCommand::Remove { id } => {
            let id = WorkerId::from(id);
            let removed = ledger.delete_worker(&id).await.into_diagnostic()?;
            print_json(&json!({ "deleted": id, "transactions_deleted": removed }))
        }
    }
}

async fn run_tx(ledger: &PayrollLedger, command: TxCommand) -> Result<()> {
    match command {
        TxCommand::Add {
            worker_id,
            kind,
            amount,
            description,
        } => {
            let tx = ledger
                .create_transaction(NewTransaction {
                    worker_id: WorkerId::from(worker_id),
                    r#type: kind,
                    amount: Money::new(amount),
                    description,
                })
                .await
                .into_diagnostic()?;
            print_json(&tx)
        }
        TxCommand::List { worker_id } => {
            let transactions = match worker_id {
                Some(worker_id) => {
                    ledger
                        .list_worker_transactions(&WorkerId::from(worker_id))
                        .await
                }
                None => ledger.list_transactions().await,
            }
            .into_diagnostic()?;
            print_json(&transactions)
        }
        TxCommand::Show { id } => {
            let tx = ledger
                .get_transaction(&TransactionId::from(id))
                .await
                .into_diagnostic()?;
            print_json(&tx)
        }
        TxCommand::Remove { id } => {
            let id = TransactionId::from(id);
            ledger.delete_transaction(&id).await.into_diagnostic()?;
            print_json(&json!({ "deleted": id }))
        }
        TxCommand::Import { input } => {
            let file = File::open(input).into_diagnostic()?;
            let reader = TransactionReader::new(file);
            let mut imported = 0usize;
            let mut rejected = 0usize;

            // Row numbers count the header as line 1.
            for (index, entry) in reader.entries().enumerate() {
                let line = index + 2;
                match entry {
                    Ok(entry) => match ledger.create_transaction(entry).await {
                        Ok(_) => imported += 1,
                        Err(e) => {
                            rejected += 1;
                            warn!(line, error = %e, "Error recording transaction");
                        }
                    },
                    Err(e) => {
                        rejected += 1;
                        warn!(line, error = %e, "Error reading transaction");
                    }
                }
            }

            print_json(&json!({ "imported": imported, "rejected": rejected }))
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    serde_json::to_writer_pretty(&mut out, value).into_diagnostic()?;
    writeln!(out).into_diagnostic()
}
