use clap::Parser;
use std::process::ExitCode;

mod cli;
mod commands;

use cli::{Cli, Commands, ConfigCommands};
use commands::config::load_config;
use commands::{CommandContext, CommandError};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli);

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if cli.json {
                let error_json = serde_json::json!({
                    "error": {
                        "code": e.code(),
                        "message": e.to_string(),
                    }
                });
                eprintln!("{:#}", error_json);
            } else {
                eprintln!("Error: {e}");
            }
            exit_code(&e)
        }
    }
}

fn init_logging(cli: &Cli) {
    let default_filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter.to_string());

    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .with_env_filter(filter)
        .init();
}

fn exit_code(e: &CommandError) -> ExitCode {
    ExitCode::from(u8::try_from(e.exit_code()).unwrap_or(1))
}

async fn run(cli: &Cli) -> commands::Result<()> {
    let ctx = CommandContext::from_cli(cli);

    match &cli.command {
        Commands::Compile { query } => {
            let config = load_config()?;
            let compiled = commands::compile::compile_from_args(cli, query, &config)?;
            commands::compile::execute(&ctx, &compiled)
        }
        Commands::Search { query } => {
            let config = load_config()?;
            let compiled = commands::compile::compile_from_args(cli, query, &config)?;
            let client = commands::search::build_client(&config.client)?;
            commands::search::execute(&ctx, &client, &compiled).await
        }
        Commands::Cursor { command } => commands::cursor::execute(&ctx, command),
        Commands::Config { command } => match command {
            ConfigCommands::Show => commands::config::execute_show(&ctx),
            ConfigCommands::Path => commands::config::execute_path(&ctx),
            ConfigCommands::Set { key, value } => commands::config::execute_set(&ctx, key, value),
        },
        Commands::Completions { shell } => Ok(commands::completions::execute(*shell)?),
    }
}
