//! CLI for quantumvault: keep the vault stable, or evacuate.

mod commands;
mod tui;

use clap::{Parser, Subcommand};
use quantumvault_core::{DEFAULT_WARN_BELOW, VaultConfig};

#[derive(Parser)]
#[command(name = "quantumvault")]
#[command(about = "quantumvault: quantum vault control panel")]
#[command(version = quantumvault_core::VERSION)]
struct Cli {
    /// Seed the object generator for a reproducible session
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Counter used for the first generated id (N0001 by default)
    #[arg(long, global = true, default_value = "1")]
    start: u32,

    /// Stability below which an analysis warns about critical level (0-100)
    #[arg(long, global = true, value_parser = parse_warn_below)]
    #[arg(default_value_t = DEFAULT_WARN_BELOW)]
    warn_below: f64,

    /// Stderr log level: errors only, -v warn, -vv info, -vvv debug (RUST_LOG overrides)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Numbered text menu (default)
    Console,

    /// Interactive terminal control panel with log and status bar
    Panel,

    /// Read commands from stdin, one per line (pipe-friendly)
    Batch {
        /// Emit one JSON object per event
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    fn vault_config(&self) -> VaultConfig {
        VaultConfig {
            start_counter: self.start,
            warn_below: self.warn_below,
        }
    }
}

/// A finite stability in `[0, 100]`.
fn parse_warn_below(s: &str) -> Result<f64, String> {
    let value = s
        .parse::<f64>()
        .map_err(|_| format!("'{s}' is not a number"))?;
    if !(0.0..=100.0).contains(&value) {
        return Err(format!("'{s}' is not a stability between 0 and 100"));
    }
    Ok(value)
}

fn main() {
    let cli = Cli::parse();
    let config = cli.vault_config();
    let command = cli.command.unwrap_or(Commands::Console);

    // The panel owns the terminal; a stderr logger would tear the screen.
    if !matches!(command, Commands::Panel) {
        commands::init_logging(cli.verbose);
    }

    let vault = commands::make_vault(cli.seed, config);
    let code = match command {
        Commands::Console => commands::console::run(vault),
        Commands::Panel => commands::panel::run(vault),
        Commands::Batch { json } => commands::batch::run(vault, json),
    };
    std::process::exit(code);
}
