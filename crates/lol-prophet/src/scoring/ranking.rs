//! Cross-player comparisons for one match.
//!
//! Each ranked dimension is a permutation of `1..=MATCH_SIZE`; equal values
//! keep their input order, so the result is deterministic for any input.

use serde::Serialize;

use super::domain::{MatchStats, PlayerStats, TeamSide, MATCH_SIZE};
use super::error::ScoreError;

const DIMENSIONS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RankDimension {
    JoinTeamRate,
    GoldEarned,
    Hurt,
    MoneyToHurt,
    VisionScore,
}

impl RankDimension {
    pub const ALL: [RankDimension; DIMENSIONS] = [
        RankDimension::JoinTeamRate,
        RankDimension::GoldEarned,
        RankDimension::Hurt,
        RankDimension::MoneyToHurt,
        RankDimension::VisionScore,
    ];

    fn index(self) -> usize {
        match self {
            RankDimension::JoinTeamRate => 0,
            RankDimension::GoldEarned => 1,
            RankDimension::Hurt => 2,
            RankDimension::MoneyToHurt => 3,
            RankDimension::VisionScore => 4,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RankDimension::JoinTeamRate => "join team rate",
            RankDimension::GoldEarned => "gold earned",
            RankDimension::Hurt => "hurt",
            RankDimension::MoneyToHurt => "money to hurt",
            RankDimension::VisionScore => "vision score",
        }
    }
}

/// Team-relative percentages derived from the full roster.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PlayerShares {
    /// Kills as a percentage of the team's kills.
    pub kill_rate: f64,
    /// Champion damage as a percentage of the team's champion damage.
    pub hurt_rate: f64,
    /// Assists as a percentage of the team's kills.
    pub assist_rate: f64,
    /// Kill participation, `(kills + assists)` over team kills.
    pub join_team_rate: f64,
    /// Champion damage per gold earned.
    pub money_to_hurt: f64,
}

impl PlayerShares {
    fn derive(player: &PlayerStats, totals: TeamTotals) -> Self {
        let kills = f64::from(player.kills);
        let assists = f64::from(player.assists);
        Self {
            kill_rate: percent(kills, totals.kills),
            hurt_rate: percent(player.damage_to_champions as f64, totals.damage),
            assist_rate: percent(assists, totals.kills),
            join_team_rate: percent(kills + assists, totals.kills),
            money_to_hurt: ratio(
                player.damage_to_champions as f64,
                f64::from(player.gold_earned),
            ),
        }
    }
}

fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

fn percent(numerator: f64, denominator: f64) -> f64 {
    ratio(numerator, denominator) * 100.0
}

#[derive(Debug, Clone, Copy, Default)]
/// Summed as floats so no roster can overflow the totals.
struct TeamTotals {
    kills: f64,
    damage: f64,
}

fn team_totals(players: &[PlayerStats], side: TeamSide) -> TeamTotals {
    players
        .iter()
        .filter(|player| player.team == side)
        .fold(TeamTotals::default(), |totals, player| TeamTotals {
            kills: totals.kills + f64::from(player.kills),
            damage: totals.damage + player.damage_to_champions as f64,
        })
}

/// Ranks and shares for the ten participants of one match, indexed by the
/// player's position in the input roster.
#[derive(Debug, Clone, PartialEq)]
pub struct RankingContext {
    ranks: [[u8; MATCH_SIZE]; DIMENSIONS],
    shares: [PlayerShares; MATCH_SIZE],
    game_minutes: f64,
}

impl RankingContext {
    pub fn build(players: &[PlayerStats], duration_secs: u32) -> Result<Self, ScoreError> {
        if players.len() != MATCH_SIZE {
            return Err(ScoreError::InvalidMatchSize {
                expected: MATCH_SIZE,
                actual: players.len(),
            });
        }

        let blue = team_totals(players, TeamSide::Blue);
        let red = team_totals(players, TeamSide::Red);

        let mut shares = [PlayerShares::default(); MATCH_SIZE];
        for (slot, player) in players.iter().enumerate() {
            let totals = match player.team {
                TeamSide::Blue => blue,
                TeamSide::Red => red,
            };
            shares[slot] = PlayerShares::derive(player, totals);
        }

        let mut ranks = [[0u8; MATCH_SIZE]; DIMENSIONS];
        for dimension in RankDimension::ALL {
            let values: Vec<f64> = players
                .iter()
                .zip(shares.iter())
                .map(|(player, share)| dimension_value(dimension, player, share))
                .collect();

            let mut order: Vec<usize> = (0..MATCH_SIZE).collect();
            // stable: ties keep roster order
            order.sort_by(|&a, &b| values[b].total_cmp(&values[a]));

            for (position, slot) in order.into_iter().enumerate() {
                ranks[dimension.index()][slot] = (position + 1) as u8;
            }
        }

        Ok(Self {
            ranks,
            shares,
            game_minutes: f64::from(duration_secs) / 60.0,
        })
    }

    pub fn from_match(stats: &MatchStats) -> Result<Self, ScoreError> {
        Self::build(&stats.players, stats.duration_secs)
    }

    /// 1-based rank of the player at `slot`; 1 is best.
    pub fn rank(&self, dimension: RankDimension, slot: usize) -> u8 {
        self.ranks[dimension.index()][slot]
    }

    pub fn ranks(&self, dimension: RankDimension) -> &[u8; MATCH_SIZE] {
        &self.ranks[dimension.index()]
    }

    pub fn shares(&self, slot: usize) -> &PlayerShares {
        &self.shares[slot]
    }

    pub fn game_minutes(&self) -> f64 {
        self.game_minutes
    }
}

fn dimension_value(dimension: RankDimension, player: &PlayerStats, share: &PlayerShares) -> f64 {
    match dimension {
        RankDimension::JoinTeamRate => share.join_team_rate,
        RankDimension::GoldEarned => f64::from(player.gold_earned),
        RankDimension::Hurt => player.damage_to_champions as f64,
        RankDimension::MoneyToHurt => share.money_to_hurt,
        RankDimension::VisionScore => f64::from(player.vision_score),
    }
}
