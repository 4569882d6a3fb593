use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// ywr — chat with YWR Intelligence from the terminal.
#[derive(Parser, Debug)]
#[command(name = "ywr", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Chat WebSocket endpoint override.
    #[arg(long)]
    pub url: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create an account and confirm it with the emailed code.
    Register,
}
