use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::calculator::{ScoreBreakdown, ScoreCalculator};
use super::domain::{MatchStats, PlayerStats, TeamSide, MATCH_SIZE};
use super::error::ScoreError;
use super::ranking::RankingContext;
use super::tier::{TierAssignment, TierClassifier};
use crate::policy::{ActivePolicy, PolicyHandle};

/// Lifecycle of one match inside a [`MatchSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchPhase {
    Idle,
    CollectingStats,
    Ranking,
    Scoring,
    Classified,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerScore {
    pub summoner: String,
    pub team: TeamSide,
    pub kda_line: String,
    pub breakdown: ScoreBreakdown,
    pub tier: TierAssignment,
}

/// Scores for every participant of one match, all computed under the same
/// policy version.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchScore {
    pub game_id: u64,
    pub policy_version: u64,
    pub merge_messages: bool,
    pub players: Vec<PlayerScore>,
}

impl MatchScore {
    pub fn player(&self, summoner: &str) -> Option<&PlayerScore> {
        self.players
            .iter()
            .find(|player| player.summoner == summoner)
    }
}

/// Runs ranking, scoring and classification against the active policy.
#[derive(Clone)]
pub struct ScoreEngine {
    policy: PolicyHandle,
}

impl ScoreEngine {
    pub fn new(policy: PolicyHandle) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &PolicyHandle {
        &self.policy
    }

    /// Scores a complete roster in one pass. The policy is read once on entry,
    /// so a concurrent refresh never splits a match across two versions.
    pub fn score_match(&self, stats: &MatchStats) -> Result<MatchScore, ScoreError> {
        let active = self.policy.snapshot();
        let context = RankingContext::from_match(stats)?;
        let breakdowns = score_players(&active, &stats.players, &context);
        Ok(classify_players(
            &active,
            stats.game_id,
            &stats.players,
            breakdowns,
        ))
    }

    pub fn session(&self) -> MatchSession {
        MatchSession::new(self.clone())
    }
}

fn score_players(
    active: &ActivePolicy,
    players: &[PlayerStats],
    context: &RankingContext,
) -> Vec<ScoreBreakdown> {
    let calculator = ScoreCalculator::new(&active.policy);
    players
        .iter()
        .enumerate()
        .map(|(slot, player)| calculator.score(player, context, slot))
        .collect()
}

fn classify_players(
    active: &ActivePolicy,
    game_id: u64,
    players: &[PlayerStats],
    breakdowns: Vec<ScoreBreakdown>,
) -> MatchScore {
    let classifier = TierClassifier::new(&active.policy.tiers);
    let players = players
        .iter()
        .zip(breakdowns)
        .map(|(player, breakdown)| PlayerScore {
            summoner: player.summoner.clone(),
            team: player.team,
            kda_line: player.kda_line(),
            tier: classifier.classify(breakdown.total),
            breakdown,
        })
        .collect();

    MatchScore {
        game_id,
        policy_version: active.version,
        merge_messages: active.policy.merge_messages,
        players,
    }
}

struct PendingMatch {
    game_id: u64,
    started_at: DateTime<Utc>,
    players: Vec<PlayerStats>,
}

/// Collects participants as they arrive and scores only once the roster is
/// full. Partial rosters are discarded, never scored.
pub struct MatchSession {
    engine: ScoreEngine,
    phase: MatchPhase,
    pending: Option<PendingMatch>,
}

impl MatchSession {
    pub fn new(engine: ScoreEngine) -> Self {
        Self {
            engine,
            phase: MatchPhase::Idle,
            pending: None,
        }
    }

    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    pub fn collected(&self) -> usize {
        self.pending
            .as_ref()
            .map(|pending| pending.players.len())
            .unwrap_or(0)
    }

    pub fn begin_match(&mut self, game_id: u64, now: DateTime<Utc>) -> Result<(), ScoreError> {
        self.expect_phase(MatchPhase::Idle)?;
        self.pending = Some(PendingMatch {
            game_id,
            started_at: now,
            players: Vec::with_capacity(MATCH_SIZE),
        });
        self.transition(MatchPhase::CollectingStats);
        Ok(())
    }

    /// Adds one participant; returns how many are collected so far.
    pub fn submit(&mut self, stats: PlayerStats) -> Result<usize, ScoreError> {
        self.expect_phase(MatchPhase::CollectingStats)?;
        let pending = self
            .pending
            .as_mut()
            .ok_or(ScoreError::UnexpectedPhase {
                expected: MatchPhase::CollectingStats,
                actual: MatchPhase::Idle,
            })?;

        if pending
            .players
            .iter()
            .any(|player| player.summoner == stats.summoner)
        {
            return Err(ScoreError::DuplicatePlayer(stats.summoner));
        }
        if pending.players.len() == MATCH_SIZE {
            return Err(ScoreError::InvalidMatchSize {
                expected: MATCH_SIZE,
                actual: MATCH_SIZE + 1,
            });
        }

        pending.players.push(stats);
        Ok(pending.players.len())
    }

    /// Ranks, scores and classifies the collected roster, then returns to
    /// idle. A short roster is discarded and reported as `InvalidMatchSize`.
    pub fn complete(&mut self, duration_secs: u32) -> Result<MatchScore, ScoreError> {
        self.expect_phase(MatchPhase::CollectingStats)?;
        let Some(pending) = self.pending.take() else {
            self.transition(MatchPhase::Idle);
            return Err(ScoreError::UnexpectedPhase {
                expected: MatchPhase::CollectingStats,
                actual: MatchPhase::Idle,
            });
        };

        let active = self.engine.policy.snapshot();

        self.transition(MatchPhase::Ranking);
        let context = match RankingContext::build(&pending.players, duration_secs) {
            Ok(context) => context,
            Err(err) => {
                warn!(
                    game_id = pending.game_id,
                    collected = pending.players.len(),
                    "discarding incomplete match"
                );
                self.transition(MatchPhase::Idle);
                return Err(err);
            }
        };

        self.transition(MatchPhase::Scoring);
        let breakdowns = score_players(&active, &pending.players, &context);

        self.transition(MatchPhase::Classified);
        let score = classify_players(&active, pending.game_id, &pending.players, breakdowns);

        info!(
            game_id = score.game_id,
            policy_version = score.policy_version,
            "match scored"
        );
        self.transition(MatchPhase::Idle);
        Ok(score)
    }

    /// Drops any collected stats, e.g. when the match ends early.
    pub fn abandon(&mut self, reason: &str) {
        if let Some(pending) = self.pending.take() {
            warn!(
                game_id = pending.game_id,
                collected = pending.players.len(),
                reason,
                "match abandoned before scoring"
            );
        }
        self.transition(MatchPhase::Idle);
    }

    /// Abandons a match that has been collecting for longer than `timeout`.
    pub fn expire_stale(&mut self, now: DateTime<Utc>, timeout: Duration) -> bool {
        let stale = self
            .pending
            .as_ref()
            .map(|pending| now - pending.started_at > timeout)
            .unwrap_or(false);

        if stale {
            self.abandon("timed out collecting stats");
        }
        stale
    }

    fn expect_phase(&self, expected: MatchPhase) -> Result<(), ScoreError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(ScoreError::UnexpectedPhase {
                expected,
                actual: self.phase,
            })
        }
    }

    fn transition(&mut self, next: MatchPhase) {
        debug!(from = ?self.phase, to = ?next, "match phase");
        self.phase = next;
    }
}
