//! Command-line interface: argument parsing, command dispatch and reporting.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

mod args;
mod commands;
mod exit_status;
mod report;

pub use args::{Arguments, Command, CommonArgs, TranslateCommand};
pub use exit_status::ExitStatus;

/// Environment variable holding the log filter (falls back to `RUST_LOG`).
pub const LOG_ENV: &str = "QI18N_LOG";

pub fn run_cli(args: Arguments) -> Result<ExitStatus> {
    init_logging(args.verbose());

    let Some(Arguments {
        command: Some(command),
    }) = args.with_command_or_help()
    else {
        return Ok(ExitStatus::Success);
    };

    match command {
        Command::Translate(cmd) => commands::translate::translate(cmd),
        Command::Init => commands::init::init(),
    }
}

/// Install a stderr subscriber so stdout only carries translated text.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    // A subscriber may already be installed when embedded; keep it.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
