mod commands;
mod output;

use atelie::config::{self, CliArgs};
use atelie::store::FileStore;
use clap::{Parser, Subcommand};
use output::{OutputConfig, OutputFormat};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

/// CLI for the Ateliê student management system
#[derive(Parser, Debug)]
#[clap(name = "atelie", about = "Art-school student management")]
struct Cli {
    #[command(flatten)]
    config: CliArgs,

    /// Output format
    #[clap(long, value_enum, default_value_t = OutputFormat::Human, global = true)]
    format: OutputFormat,

    /// Quiet mode: minimal output (just IDs or counts)
    #[clap(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Manage students
    #[command(subcommand)]
    Student(commands::student::StudentCommands),
    /// Register and inspect payments
    #[command(subcommand)]
    Payment(commands::payment::PaymentCommands),
    /// Manage tasks
    #[command(subcommand)]
    Task(commands::task::TaskCommands),
    /// Manage weekly class schedules
    #[command(subcommand)]
    Schedule(commands::schedule::ScheduleCommands),
    /// Reporting dashboards
    #[command(subcommand)]
    Report(commands::report::ReportCommands),
    /// Backup, export, and import
    #[command(subcommand)]
    Backup(commands::backup::BackupCommands),
    /// Show storage information
    Info,
    /// Remove all student data (backups are kept)
    Clear {
        /// Skip the confirmation prompt
        #[clap(long)]
        yes: bool,
    },
}

/// Initializes logging to stderr, keeping stdout clean for command output
///
/// RUST_LOG takes precedence; otherwise `--debug` selects debug level and
/// normal runs only surface warnings.
fn init_tracing(debug: bool) -> tracing_appender::non_blocking::WorkerGuard {
    let default_level = if debug { "atelie=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    let (writer, guard) = tracing_appender::non_blocking(std::io::stderr());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .init();
    guard
}

fn main() {
    // Load environment variables
    if std::fs::metadata(".env").is_ok() {
        dotenv::dotenv().ok();
    }

    let cli = Cli::parse();
    let _log_guard = init_tracing(cli.config.debug);

    let config = config::get_config(cli.config);
    let store = match FileStore::open(PathBuf::from(&config.data_dir)) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Error: could not open data directory: {}", e);
            process::exit(1);
        }
    };

    let output_config = OutputConfig {
        format: cli.format,
        quiet: cli.quiet,
    };

    let result = match cli.command {
        Commands::Student(cmd) => commands::student::execute(&store, cmd, &output_config),
        Commands::Payment(cmd) => commands::payment::execute(&store, cmd, &output_config),
        Commands::Task(cmd) => commands::task::execute(&store, cmd, &output_config),
        Commands::Schedule(cmd) => commands::schedule::execute(&store, cmd, &output_config),
        Commands::Report(cmd) => commands::report::execute(&store, cmd, &output_config),
        Commands::Backup(cmd) => {
            commands::backup::execute(&store, cmd, &config, &output_config)
        }
        Commands::Info => commands::system::info(&store, &output_config),
        Commands::Clear { yes } => commands::system::clear(&store, yes, &output_config),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
