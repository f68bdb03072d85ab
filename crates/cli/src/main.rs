//! catq: compile catalogue requests into search-engine queries.

use catalogue_cli::{CliConfig, EXIT_REJECTED, execute, init_logging, read_input};
use clap::Parser;
use tracing::{debug, info};

fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();
    init_logging(&cli.log_level);

    if let Err(errors) = cli.validate() {
        for error in &errors {
            eprintln!("Configuration error: {}", error);
        }
        std::process::exit(1);
    }

    let config = cli.query_config()?;
    debug!(?config, "Loaded query configuration");

    let input = read_input(cli.command.input())?;
    let outcome = execute(&cli.command, input, &config);
    info!(
        command = cli.command.name(),
        rejected = outcome.is_rejected(),
        "Request compiled"
    );

    println!("{}", serde_json::to_string_pretty(&outcome.to_json())?);

    if outcome.is_rejected() {
        std::process::exit(EXIT_REJECTED);
    }
    Ok(())
}
