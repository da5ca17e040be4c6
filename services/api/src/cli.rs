use crate::demo::{
    run_billing, run_calculation, run_demo, run_fee_summary, BillingArgs, CalculateArgs,
    RosterArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use fleet_fees::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Fleet Fees",
    about = "Calculate bus fee scholarships and run the fleet fee service from the command line",
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
    /// Evaluate scholarship eligibility for a single family
    Scholarship {
        #[command(subcommand)]
        command: ScholarshipCommand,
    },
    /// Summaries and monthly billing for the enrolled roster
    Fees {
        #[command(subcommand)]
        command: FeesCommand,
    },
    /// Walk the sample roster through evaluation, summary and billing
    Demo,
}

#[derive(Subcommand, Debug)]
enum ScholarshipCommand {
    /// Print eligible awards, the recommendation and the final monthly fee
    Calculate(CalculateArgs),
}

#[derive(Subcommand, Debug)]
enum FeesCommand {
    /// Print scholarship and revenue totals for the roster
    Summary(RosterArgs),
    /// Generate monthly fee records with late fees applied
    Bill(BillingArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Roster CSV export to serve. The service starts with no students otherwise.
    #[arg(long)]
    pub(crate) roster: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Scholarship {
            command: ScholarshipCommand::Calculate(args),
        } => run_calculation(args),
        Command::Fees {
            command: FeesCommand::Summary(args),
        } => run_fee_summary(args),
        Command::Fees {
            command: FeesCommand::Bill(args),
        } => run_billing(args),
        Command::Demo => run_demo(),
    }
}
