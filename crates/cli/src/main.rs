use clap::Parser;
use std::process::ExitCode;

mod commands;
mod execute;
mod formats;

use commands::Commands;

#[derive(Parser)]
#[command(name = "buildplan")]
#[command(about = "Validate module descriptors and emit deterministic build plans", long_about = None)]
#[command(version)]
struct Cli {
    /// Log filter used when BUILDPLAN_LOG is unset (e.g. info, buildplan_graph=debug)
    #[arg(long, global = true, value_name = "FILTER")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

fn main() -> eyre::Result<ExitCode> {
    color_eyre::install()?;

    let cli = Cli::parse();
    buildplan_utils::tracing::init(cli.log_level.as_deref()).map_err(|e| eyre::eyre!(e))?;

    cli.command.execute()
}
