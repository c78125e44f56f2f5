use crate::commands::{run_apply, run_rules_delete, run_rules_list, run_rules_show, ApplyArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use doc_rules::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Document Request Rules Admin",
    about = "Manage document request rules and try them against mock applications",
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
    /// Inspect or delete rules stored in the backend
    Rules {
        #[command(subcommand)]
        command: RulesCommand,
    },
    /// Submit a mock application and print the documents it must provide
    Apply(ApplyArgs),
}

#[derive(Subcommand, Debug)]
enum RulesCommand {
    /// Print every rule with its conditions and required documents
    List,
    /// Print a single rule
    Show {
        /// Backend identifier of the rule
        id: String,
    },
    /// Delete a rule, then print the refreshed list
    Delete {
        /// Backend identifier of the rule
        id: String,
    },
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
        Command::Rules { command } => match command {
            RulesCommand::List => run_rules_list().await,
            RulesCommand::Show { id } => run_rules_show(id).await,
            RulesCommand::Delete { id } => run_rules_delete(id).await,
        },
        Command::Apply(args) => run_apply(args).await,
    }
}
