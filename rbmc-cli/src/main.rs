//! RBMC CLI - command line tool for RBMC GNSS station telemetry.

use clap::Parser;
use log::LevelFilter;

#[derive(Parser)]
#[command(
    name = "rbmc-cli",
    version,
    about = "RBMC GNSS station telemetry toolkit"
)]
struct Cli {
    #[command(flatten)]
    api: rbmc_cmd::ApiArgs,

    /// More logging (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: rbmc_cmd::Command,
}

fn log_level(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::new()
        .filter_level(log_level(cli.verbose))
        .parse_default_env()
        .init();
    rbmc_cmd::run(cli.command, &cli.api).await
}
