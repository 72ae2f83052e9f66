use bookmarket_cli::{args::CliArgs, commands, config, console};
use clap::Parser;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();

    let config = match config::resolve(&args) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {}", console::error_message(&err));
            return ExitCode::FAILURE;
        }
    };
    init_tracing(&config.logging.level);
    debug!(version = bookmarket_cli::VERSION, command = ?args.command, "starting");

    match commands::run(args, config).await {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {}", console::error_message(&err));
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(level: &str) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .try_init();
}
