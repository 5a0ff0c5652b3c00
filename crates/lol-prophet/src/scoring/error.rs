use super::engine::MatchPhase;

/// Failures surfaced by the scoring pipeline. None of them is fatal to the process.
#[derive(Debug, thiserror::Error)]
pub enum ScoreError {
    #[error("match must have exactly {expected} participants, got {actual}")]
    InvalidMatchSize { expected: usize, actual: usize },
    #[error("invalid score policy: {0}")]
    InvalidPolicy(#[from] PolicyViolation),
    #[error("match session is {actual:?}, expected {expected:?}")]
    UnexpectedPhase {
        expected: MatchPhase,
        actual: MatchPhase,
    },
    #[error("participant '{0}' already submitted for this match")]
    DuplicatePlayer(String),
}

/// Structural defects that make a candidate policy unusable.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PolicyViolation {
    #[error("{table} must contain at least one entry")]
    Empty { table: String },
    #[error("{table} thresholds must strictly decrease ({previous} then {next})")]
    NotDescending {
        table: String,
        previous: f64,
        next: f64,
    },
    #[error("{table} threshold {threshold} must not be negative")]
    NegativeThreshold { table: String, threshold: f64 },
    #[error("{table} contains a non-finite value")]
    NonFinite { table: String },
    #[error("{table} references rank {rank} outside 1..={max}")]
    RankOutOfRange { table: String, rank: u8, max: usize },
    #[error("{table} lists rank {rank} more than once")]
    DuplicateRank { table: String, rank: u8 },
    #[error("{table} has {len} entries; expected 2 or 4")]
    UnsupportedRankTable { table: String, len: usize },
    #[error("KDA adjustment needs a finite multiplier and trigger (got {multiplier} at {trigger})")]
    InvalidKdaAdjustment { multiplier: f64, trigger: f64 },
}
