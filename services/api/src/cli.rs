use crate::demo::{run_rank_demo, RankDemoArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use outreach_ai::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Placement Outreach Matcher",
    about = "Rank partner organizations against a placement request, as a service or from the command line",
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
    /// Rank the bundled sample organizations against a skill set
    Rank(RankDemoArgs),
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
        Command::Rank(args) => run_rank_demo(args).await,
    }
}
