mod cli;
mod client;
mod commands;
mod config;
mod dashboard;
mod error;
mod output;
mod types;
mod view;

use std::error::Error;
use std::io;

use clap::{CommandFactory, Parser};
use clap_complete::generate;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use client::TeamsClient;
use config::Config;
use error::Result;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {e}");

        // Show error chain if verbose flag was passed
        if std::env::args().any(|arg| arg == "--verbose" || arg == "-v") {
            let mut source = e.source();
            while let Some(cause) = source {
                eprintln!("Caused by: {cause}");
                source = cause.source();
            }
        }

        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);
    output::set_format(cli.output_format());
    output::set_quiet(cli.quiet);

    match cli.command {
        // Commands that don't require config/client
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "team-admin", &mut io::stdout());
        }
        Commands::Init => {
            commands::init::run().await?;
        }
        // Commands that require config and client
        command => {
            let config = Config::load()?;
            let base_url = config.base_url(cli.base_url.as_deref())?;
            tracing::debug!("Using backend at {}", base_url);
            let client = TeamsClient::new(base_url);

            match command {
                Commands::Dashboard => {
                    commands::dashboard::run(client).await?;
                }
                Commands::List => {
                    commands::teams::list(&client).await?;
                }
                Commands::Show { id } => {
                    commands::teams::show(&client, &id).await?;
                }
                Commands::Create(args) => {
                    commands::teams::create(&client, args).await?;
                }
                Commands::Update(args) => {
                    commands::teams::update(&client, args).await?;
                }
                Commands::Delete { id } => {
                    commands::teams::delete(&client, &id).await?;
                }
                Commands::Completions { .. } | Commands::Init => {
                    // Already handled above
                }
            }
        }
    }

    Ok(())
}
