pub mod batch;
pub mod console;
pub mod panel;

use quantumvault_core::{Vault, VaultConfig};

/// Exit status for a normal quit or end of input.
pub const EXIT_OK: i32 = 0;
/// Exit status after an unhandled quantum collapse.
pub const EXIT_COLLAPSE: i32 = 1;
/// Exit status when the terminal itself fails.
pub const EXIT_IO_ERROR: i32 = 2;

/// Fatal banner printed by every driver on collapse.
pub const EVACUATION_NOTICE: &str = "SYSTEM FAILURE! EVACUATION STARTED...";

/// Build the session vault, seeded when a seed is given.
pub fn make_vault(seed: Option<u64>, config: VaultConfig) -> Vault {
    match seed {
        Some(seed) => {
            log::info!("seeded session (seed {seed})");
            Vault::seeded(seed, config)
        }
        None => Vault::from_entropy(config),
    }
}

/// Map `-v` count to a default log filter.
pub fn log_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "error",
        1 => "warn",
        2 => "info",
        _ => "debug",
    }
}

/// Install the stderr logger. `RUST_LOG` wins over `-v`.
pub fn init_logging(verbose: u8) {
    let env = env_logger::Env::default().default_filter_or(log_filter(verbose));
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .try_init();
}
