use serde::{Deserialize, Serialize};

use super::domain::PlayerStats;
use super::policy::{MinionBasis, ScorePolicy};
use super::ranking::{RankDimension, RankingContext};

/// Named source of points in a breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContributionKind {
    FirstBloodKill,
    FirstBloodAssist,
    PentaKills,
    QuadraKills,
    TripleKills,
    JoinTeamRateRank,
    GoldEarnedRank,
    HurtRank,
    MoneyToHurtRank,
    VisionScoreRank,
    Minions,
    KillRate,
    HurtRate,
    AssistRate,
}

impl From<RankDimension> for ContributionKind {
    fn from(dimension: RankDimension) -> Self {
        match dimension {
            RankDimension::JoinTeamRate => ContributionKind::JoinTeamRateRank,
            RankDimension::GoldEarned => ContributionKind::GoldEarnedRank,
            RankDimension::Hurt => ContributionKind::HurtRank,
            RankDimension::MoneyToHurt => ContributionKind::MoneyToHurtRank,
            RankDimension::VisionScore => ContributionKind::VisionScoreRank,
        }
    }
}

/// Discrete contribution to a player's score, kept for transparent audits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub kind: ContributionKind,
    pub points: f64,
    pub notes: String,
}

/// Additive components, the KDA scaling decision and the final total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub components: Vec<ScoreComponent>,
    /// Sum of the additive components before KDA scaling.
    pub subtotal: f64,
    pub kda: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kda_multiplier: Option<f64>,
    pub total: f64,
}

impl ScoreBreakdown {
    pub fn points(&self, kind: ContributionKind) -> f64 {
        self.components
            .iter()
            .filter(|component| component.kind == kind)
            .map(|component| component.points)
            .sum()
    }
}

#[derive(Default)]
struct Tally {
    components: Vec<ScoreComponent>,
    subtotal: f64,
}

impl Tally {
    fn add(&mut self, kind: ContributionKind, points: f64, notes: impl FnOnce() -> String) {
        if points == 0.0 {
            return;
        }
        self.subtotal += points;
        self.components.push(ScoreComponent {
            kind,
            points,
            notes: notes(),
        });
    }
}

/// Pure scoring function over a borrowed policy snapshot.
pub struct ScoreCalculator<'a> {
    policy: &'a ScorePolicy,
}

impl<'a> ScoreCalculator<'a> {
    pub fn new(policy: &'a ScorePolicy) -> Self {
        Self { policy }
    }

    /// Scores the player at roster position `slot` of the match that built
    /// `context`. Identical inputs always yield an identical breakdown.
    pub fn score(
        &self,
        player: &PlayerStats,
        context: &RankingContext,
        slot: usize,
    ) -> ScoreBreakdown {
        let policy = self.policy;
        let mut tally = Tally::default();

        if player.first_blood_kill {
            tally.add(
                ContributionKind::FirstBloodKill,
                policy.first_blood.kill,
                || "first blood kill".to_string(),
            );
        }
        if player.first_blood_assist {
            tally.add(
                ContributionKind::FirstBloodAssist,
                policy.first_blood.assist,
                || "first blood assist".to_string(),
            );
        }

        let multi_kills = [
            (
                ContributionKind::PentaKills,
                player.penta_kills,
                policy.multi_kills.penta,
                "penta",
            ),
            (
                ContributionKind::QuadraKills,
                player.quadra_kills,
                policy.multi_kills.quadra,
                "quadra",
            ),
            (
                ContributionKind::TripleKills,
                player.triple_kills,
                policy.multi_kills.triple,
                "triple",
            ),
        ];
        for (kind, count, bonus, label) in multi_kills {
            tally.add(kind, f64::from(count) * bonus, || {
                format!("{count} {label} kill(s) at {bonus} each")
            });
        }

        for dimension in RankDimension::ALL {
            let rank = context.rank(dimension, slot);
            let bonus = policy.rank_table(dimension).bonus(rank);
            tally.add(dimension.into(), bonus, || {
                format!("rank {rank} in {}", dimension.label())
            });
        }

        let minion_metric = match policy.minions.basis {
            MinionBasis::Total => f64::from(player.minions_killed),
            MinionBasis::PerMinute if context.game_minutes() > 0.0 => {
                f64::from(player.minions_killed) / context.game_minutes()
            }
            MinionBasis::PerMinute => 0.0,
        };
        tally.add(
            ContributionKind::Minions,
            policy.minions.ladder.bonus(minion_metric),
            || format!("{minion_metric:.1} minions ({:?})", policy.minions.basis),
        );

        let shares = context.shares(slot);
        let kills = f64::from(player.kills);
        let assists = f64::from(player.assists);
        tally.add(
            ContributionKind::KillRate,
            policy.kill_rate.bonus(shares.kill_rate, kills),
            || format!("{kills} kills at {:.0}% of team kills", shares.kill_rate),
        );
        tally.add(
            ContributionKind::HurtRate,
            policy.hurt_rate.bonus(shares.hurt_rate, kills),
            || format!("{kills} kills at {:.0}% of team damage", shares.hurt_rate),
        );
        tally.add(
            ContributionKind::AssistRate,
            policy.assist_rate.bonus(shares.assist_rate, assists),
            || {
                format!(
                    "{assists} assists at {:.0}% of team kills",
                    shares.assist_rate
                )
            },
        );

        let kda = player.kda();
        let kda_multiplier = policy.kda_adjustment.factor_for(kda);
        let total = tally.subtotal * kda_multiplier.unwrap_or(1.0);

        ScoreBreakdown {
            components: tally.components,
            subtotal: tally.subtotal,
            kda,
            kda_multiplier,
            total,
        }
    }
}
