//! ywr: terminal chat client for YWR Intelligence.
//!
//! Authenticates against the Cognito user pool, opens the WebSocket chat
//! session, and runs a line-based chat loop. Incoming answers are pushed
//! through the session event channel, so the terminal updates without
//! polling.

mod cli;
mod flow;

use clap::Parser;

#[tokio::main]
async fn main() {
    let args = cli::Args::parse();
    if let Err(e) = run(args).await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run(args: cli::Args) -> ywr_common::Result<()> {
    let mut config = ywr_config::load_config(args.config.as_deref())?;
    if let Some(url) = args.url {
        config.chat.ws_url = url;
        ywr_config::validation::validate(&config)?;
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.logging.filter.clone().into()),
        )
        .init();

    match args.command {
        Some(cli::Command::Register) => flow::register(&config).await,
        None => flow::chat(&config).await,
    }
}
