use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;

use cli::{Cli, CliError, Command};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Steps {
            files,
            mode,
            locale,
            geojson,
        } => {
            let output = cli::steps(&files, mode, locale, geojson)?;
            println!("{}", serde_json::to_string_pretty(&output.value)?);
            if output.failures > 0 {
                return Err(CliError::Partial(output.failures));
            }
        }
        Command::Plan(args) => {
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
                .map_err(CliError::Runtime)?;
            let value = runtime.block_on(cli::plan(args))?;
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
    }
    Ok(())
}
