use crate::diagnose::{run_diagnose, run_import_balance, DiagnoseArgs, ImportBalanceArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use funding_diagnosis::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Funding Diagnosis",
    about = "Check eligibility for public funding programs and size venture-debt financing",
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
    /// Evaluate a questionnaire and print every program checklist
    Diagnose(DiagnoseArgs),
    /// Read both balance years from a spreadsheet CSV export
    ImportBalance(ImportBalanceArgs),
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
        Command::Diagnose(args) => run_diagnose(args),
        Command::ImportBalance(args) => run_import_balance(args),
    }
}
