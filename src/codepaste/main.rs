use clap::Parser;
use colored::Colorize;
use env_logger::{Builder, Env};
use std::process::ExitCode;

mod cli;
use cli::setup::Cli;

fn init_logger(verbose: bool) {
    // RUST_LOG wins when set; -v only changes the default.
    let default_level = if verbose { "debug" } else { "warn" };
    Builder::from_env(Env::default().default_filter_or(default_level))
        .format_timestamp_millis()
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    match cli::commands::run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {}", "Error:".red(), e);
            ExitCode::FAILURE
        }
    }
}
