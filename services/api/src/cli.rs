use crate::demo::{run_batch, run_demo, run_mao, run_score, BatchArgs, MaoArgs, ScoreArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use wholesale_ai::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Wholesale AI",
    about = "Score wholesale real estate deals and run the Wholesale AI service",
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
    /// Score a single property with the local rules or the remote analysis
    Score(ScoreArgs),
    /// Compute the maximum allowable offer for a property
    Mao(MaoArgs),
    /// Score every row of a property CSV export
    Batch(BatchArgs),
    /// Walk through the scoring, MAO and portfolio flows with sample deals
    Demo,
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
        Command::Score(args) => run_score(args).await,
        Command::Mao(args) => run_mao(args),
        Command::Batch(args) => run_batch(args),
        Command::Demo => run_demo().await,
    }
}
