use crate::cli::{PolicyCheckArgs, PolicyShowArgs, ScoreArgs};
use crate::infra::load_policy_handle;
use lol_prophet::error::AppError;
use lol_prophet::policy::FilePolicySource;
use lol_prophet::report::{HorseMessages, MessageOptions};
use lol_prophet::scoring::{MatchImporter, MatchStats, ScoreEngine, ScoreError, ScorePolicy};
use std::io::{Error as IoError, ErrorKind};

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let stats = load_stats(&args)?;
    let engine = ScoreEngine::new(load_policy_handle(args.policy.as_deref()));
    let score = engine.score_match(&stats)?;

    if args.json {
        let rendered = serde_json::to_string_pretty(&score.to_view()).map_err(IoError::from)?;
        println!("{rendered}");
        return Ok(());
    }

    let view = score.to_view();
    println!(
        "Game {} scored with policy v{}",
        view.game_id, view.policy_version
    );
    for player in &view.players {
        println!(
            "  {:<8} {:<18} {:<5} {:>7.1}  {}",
            player.horse,
            player.summoner,
            player.team.label(),
            player.total,
            player.kda
        );
    }

    let options = MessageOptions {
        team: args.team,
        self_summoner: args.summoner,
        include_self: args.include_self,
        announce_tiers: Vec::new(),
    };
    let messages = HorseMessages::render(&score, &options);
    if !messages.is_empty() {
        println!("\nAnnouncements:");
        for line in &messages.lines {
            println!("  {line}");
        }
    }

    Ok(())
}

fn load_stats(args: &ScoreArgs) -> Result<MatchStats, AppError> {
    if let Some(path) = &args.input {
        let mut stats = MatchImporter::from_json_path(path)?;
        if let Some(duration) = args.duration_secs {
            stats.duration_secs = duration;
        }
        return Ok(stats);
    }

    match &args.csv {
        Some(path) => Ok(MatchImporter::from_csv_path(
            path,
            args.game_id,
            args.duration_secs.unwrap_or(0),
        )?),
        None => Err(IoError::new(ErrorKind::InvalidInput, "pass --input or --csv").into()),
    }
}

pub(crate) fn run_policy_show(args: PolicyShowArgs) -> Result<(), AppError> {
    let active = load_policy_handle(args.policy.as_deref()).snapshot();
    let rendered = serde_json::to_string_pretty(active.as_ref()).map_err(IoError::from)?;
    println!("{rendered}");
    Ok(())
}

pub(crate) fn run_policy_check(args: PolicyCheckArgs) -> Result<(), AppError> {
    let policy = check_policy_file(&args)?;
    println!(
        "{} is valid: enabled={}, {} tiers, KDA x{} above {}",
        args.file.display(),
        policy.enabled,
        policy.tiers.len(),
        policy.kda_adjustment.multiplier,
        policy.kda_adjustment.trigger
    );
    Ok(())
}

fn check_policy_file(args: &PolicyCheckArgs) -> Result<ScorePolicy, AppError> {
    let document = FilePolicySource::new(&args.file).load()?.ok_or_else(|| {
        IoError::new(
            ErrorKind::NotFound,
            format!("{} does not exist", args.file.display()),
        )
    })?;

    ScorePolicy::try_from(document).map_err(|violation| ScoreError::from(violation).into())
}
