use crate::commands::{run_policy_check, run_policy_show, run_score};
use crate::infra::parse_team;
use crate::server;
use clap::{ArgGroup, Args, Parser, Subcommand};
use lol_prophet::error::AppError;
use lol_prophet::scoring::TeamSide;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "LoL Prophet",
    about = "Score ten-player matches and announce who carried and who was the horse",
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
    /// Score a finished match from a JSON or CSV export
    Score(ScoreArgs),
    /// Inspect or validate scoring policies
    Policy {
        #[command(subcommand)]
        command: PolicyCommand,
    },
}

#[derive(Subcommand, Debug)]
enum PolicyCommand {
    /// Print the policy that scoring would use
    Show(PolicyShowArgs),
    /// Validate a policy document without installing it
    Check(PolicyCheckArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Override the persisted policy document path
    #[arg(long)]
    pub(crate) policy: Option<PathBuf>,
}

#[derive(Args, Debug)]
#[command(group(ArgGroup::new("source").required(true).args(["input", "csv"])))]
pub(crate) struct ScoreArgs {
    /// Match stats as JSON (game_id, duration_secs, players)
    #[arg(long)]
    pub(crate) input: Option<PathBuf>,
    /// Match stats as CSV, one row per player in roster order
    #[arg(long)]
    pub(crate) csv: Option<PathBuf>,
    /// Game id recorded for CSV input
    #[arg(long, default_value_t = 0)]
    pub(crate) game_id: u64,
    /// Game length in seconds; overrides the JSON value when given
    #[arg(long)]
    pub(crate) duration_secs: Option<u32>,
    /// Policy document to score with instead of the embedded default
    #[arg(long)]
    pub(crate) policy: Option<PathBuf>,
    /// Only announce players on this side (blue or red)
    #[arg(long, value_parser = parse_team)]
    pub(crate) team: Option<TeamSide>,
    /// Your summoner name, left out of announcements unless --include-self
    #[arg(long)]
    pub(crate) summoner: Option<String>,
    #[arg(long)]
    pub(crate) include_self: bool,
    /// Print the scored match as JSON instead of a table
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct PolicyShowArgs {
    /// Policy document to load instead of the embedded default
    #[arg(long)]
    pub(crate) policy: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct PolicyCheckArgs {
    /// Policy document to validate
    pub(crate) file: PathBuf,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Score(args) => run_score(args),
        Command::Policy {
            command: PolicyCommand::Show(args),
        } => run_policy_show(args),
        Command::Policy {
            command: PolicyCommand::Check(args),
        } => run_policy_check(args),
    }
}
