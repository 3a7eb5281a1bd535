use crate::commands::{run_catalog, run_check, CheckArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use lot_check::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Lot Check",
    about = "Answer whether a permit may park in a lot, over HTTP or from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Evaluate a single parking request against the configured sheets
    Check(CheckArgs),
    /// List the lots and permit types found in the configured sheets
    Catalog,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Check(args) => run_check(args),
        Command::Catalog => run_catalog(),
    }
}
