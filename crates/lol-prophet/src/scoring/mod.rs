//! Match scoring: ten players' stats in, one score and one horse per player out.

pub mod calculator;
pub mod domain;
pub mod engine;
pub mod error;
pub mod import;
pub mod ladder;
pub mod policy;
pub mod ranking;
pub mod tier;

#[cfg(test)]
mod tests;

pub use calculator::{ContributionKind, ScoreBreakdown, ScoreCalculator, ScoreComponent};
pub use domain::{MatchStats, PlayerStats, TeamSide, MATCH_SIZE};
pub use engine::{MatchPhase, MatchScore, MatchSession, PlayerScore, ScoreEngine};
pub use error::{PolicyViolation, ScoreError};
pub use import::{ImportError, MatchImporter};
pub use ladder::{Ladder, LadderStep};
pub use policy::{PolicyDocument, ScorePolicy};
pub use ranking::{PlayerShares, RankDimension, RankingContext};
pub use tier::{TierAssignment, TierClassifier};
