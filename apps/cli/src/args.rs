use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Conciliador back-office: session and navigation inspection.
#[derive(Debug, Parser)]
#[command(name = "concil", version, about)]
pub struct Cli {
    /// Configuration file; defaults to `conciliador.*` in the working directory.
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Overrides the configured log level (`error`, `warn`, `info`, `debug`, `trace`, `off`).
    #[arg(long, global = true, value_name = "LEVEL")]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Signs in with a response saved from the authentication endpoint.
    Login {
        /// JSON login response; `-` reads standard input.
        #[arg(short, long, value_name = "FILE")]
        response: PathBuf,
    },
    /// Signs out and removes the persisted session.
    Logout,
    /// Shows the current session.
    Whoami,
    /// Prints the menu the current user may see, as JSON.
    Menu {
        /// Classifies the device from this user agent.
        #[arg(long, value_name = "UA", conflicts_with = "mobile")]
        user_agent: Option<String>,
        /// Renders for a mobile device.
        #[arg(long)]
        mobile: bool,
    },
    /// Checks a permission tag; exits non-zero when access is refused.
    Check {
        #[arg(allow_negative_numbers = true)]
        tag: i32,
        /// Guards a full page: a refusal redirects to the access-denied route.
        #[arg(long)]
        page: bool,
    },
}
