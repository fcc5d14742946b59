mod commands;
mod error;
mod util;

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

use crate::commands::{completions, contacts, import, Book, Context};
use crate::error::{exit_code_for, report_error};
use addressbook_config as config;
use addressbook_config::Backend;
use addressbook_core::MemoryAddressBook;
use addressbook_store::{paths, Store};

#[derive(Debug, Parser)]
#[command(name = "addressbook", version, about = "addressbook CLI")]
struct Cli {
    #[arg(long, global = true)]
    db_path: Option<PathBuf>,
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[arg(long, global = true, value_enum)]
    backend: Option<BackendArg>,
    #[arg(long, global = true)]
    json: bool,
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum BackendArg {
    Sqlite,
    Memory,
}

impl From<BackendArg> for Backend {
    fn from(arg: BackendArg) -> Self {
        match arg {
            BackendArg::Sqlite => Backend::Sqlite,
            BackendArg::Memory => Backend::Memory,
        }
    }
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate shell completions
    Completions(completions::CompletionsArgs),
    Add(contacts::AddArgs),
    Show(contacts::ShowArgs),
    List(contacts::ListArgs),
    Delete(contacts::DeleteArgs),
    /// Add every contact from a JSON file
    Import(import::ImportArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let verbose = cli.verbose;
    init_logging(verbose);
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err, verbose);
            exit_code_for(&err)
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let Cli {
        db_path,
        config: config_path,
        backend,
        json,
        verbose,
        command,
    } = cli;

    match command {
        Command::Completions(args) => completions::emit(args),
        command => run_with_book(db_path, config_path, backend, json, verbose, command),
    }
}

fn run_with_book(
    db_path: Option<PathBuf>,
    config_path: Option<PathBuf>,
    backend: Option<BackendArg>,
    json: bool,
    verbose: bool,
    command: Command,
) -> Result<()> {
    let app_config = config::load(config_path.clone()).with_context(|| "load config")?;
    if verbose {
        match config::resolve_config_path(config_path) {
            Ok(path) => {
                if path.exists() {
                    debug!(path = %path.display(), "config resolved");
                } else {
                    debug!(path = %path.display(), "config missing, using defaults");
                }
            }
            Err(err) => {
                debug!(error = %err, "config unavailable");
            }
        }
    }

    let backend = backend.map(Backend::from).unwrap_or(app_config.backend);
    match backend {
        Backend::Sqlite => {
            let db_path = paths::resolve_db_path(db_path.or(app_config.db_path))
                .with_context(|| "resolve database path")?;
            debug!(path = %db_path.display(), "database path resolved");

            let store = Store::open(&db_path)
                .with_context(|| format!("open database {}", db_path.display()))?;
            store.migrate().with_context(|| "run migrations")?;

            let mut ctx = Context {
                book: Book::Sqlite(store.contacts()),
                json,
            };
            dispatch(&mut ctx, command)
        }
        Backend::Memory => {
            debug!(
                id_generator = app_config.id_generator.as_str(),
                "using in-memory address book"
            );
            let mut ctx = Context {
                book: Book::Memory(MemoryAddressBook::new(app_config.id_generator.build())),
                json,
            };
            dispatch(&mut ctx, command)
        }
    }
}

fn dispatch(ctx: &mut Context<'_>, command: Command) -> Result<()> {
    match command {
        Command::Add(args) => contacts::add_contact(ctx, args),
        Command::Show(args) => contacts::show_contact(ctx, args),
        Command::List(args) => contacts::list_contacts(ctx, args),
        Command::Delete(args) => contacts::delete_contact(ctx, args),
        Command::Import(args) => import::import_contacts(ctx, args),
        Command::Completions(_) => {
            unreachable!("completions command handled before address book initialization")
        }
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .try_init();
}
