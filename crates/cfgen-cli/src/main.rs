//! cfgen command-line driver
//!
//! Reads a JSON-encoded syntax tree, lowers every function to a control-flow
//! graph and prints the result or reports the first failure.

mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing::Level;

#[derive(Parser)]
#[command(name = "cfgen")]
#[command(about = "Lower syntax trees to control-flow graphs", long_about = None)]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Lower a module and print its graphs
    Lower {
        /// JSON file holding a module (or a single function)
        file: PathBuf,
        /// Output format
        #[arg(long, value_enum, default_value_t = Emit::Text)]
        emit: Emit,
        /// Lowering options (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Lower and verify a module without printing the graphs
    Check {
        /// JSON file holding a module (or a single function)
        file: PathBuf,
        /// Lowering options (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Emit {
    Text,
    Json,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Lower { file, emit, config } => {
            commands::lower::execute(&file, emit, config.as_deref())
        }
        Commands::Check { file, config } => commands::check::execute(&file, config.as_deref()),
    }
}
