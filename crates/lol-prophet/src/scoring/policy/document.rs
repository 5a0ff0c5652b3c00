use serde::{Deserialize, Serialize};

use super::super::error::PolicyViolation;
use super::super::ladder::{Ladder, LadderStep};
use super::{
    FirstBloodBonus, KdaAdjustment, MinionBasis, MinionLadder, MultiKillBonus, RankBuckets,
    RankTable, RateTable, ScorePolicy, TierLadder,
};

/// Compact policy shape served by the remote configuration endpoint and
/// stored on disk. Converting it into a [`ScorePolicy`] validates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyDocument {
    pub enabled: bool,
    /// Freshness marker; an unchanged version is not reinstalled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u64>,
    #[serde(default)]
    pub merge_msg: bool,
    /// `[kill, assist]`.
    pub first_blood: [f64; 2],
    pub penta_kills: [f64; 1],
    pub quadra_kills: [f64; 1],
    pub triple_kills: [f64; 1],
    pub join_team_rate_rank: Vec<f64>,
    pub gold_earned_rank: Vec<f64>,
    pub hurt_rank: Vec<f64>,
    #[serde(rename = "money2hurtRateRank")]
    pub money_to_hurt_rate_rank: Vec<f64>,
    pub vision_score_rank: Vec<f64>,
    /// `[threshold, bonus]` pairs, highest threshold first.
    pub minions_killed: Vec<[f64; 2]>,
    #[serde(default)]
    pub minion_basis: MinionBasis,
    pub kill_rate: Vec<RateItemDocument>,
    pub hurt_rate: Vec<RateItemDocument>,
    pub assist_rate: Vec<RateItemDocument>,
    /// `[multiplier, trigger]`.
    #[serde(rename = "adjustKDA")]
    pub adjust_kda: [f64; 2],
    pub horse: Vec<HorseDocument>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateItemDocument {
    pub limit: f64,
    pub score_conf: Vec<[f64; 2]>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HorseDocument {
    pub score: f64,
    pub name: String,
}

fn pairs_to_ladder(table: &str, pairs: &[[f64; 2]]) -> Result<Ladder<f64>, PolicyViolation> {
    Ladder::new(
        table,
        pairs
            .iter()
            .map(|[threshold, bonus]| LadderStep::new(*threshold, *bonus))
            .collect(),
    )
}

fn rate_table(table: &str, items: &[RateItemDocument]) -> Result<RateTable, PolicyViolation> {
    let mut bands = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        let inner = pairs_to_ladder(&format!("{table} band {index}"), &item.score_conf)?;
        bands.push(LadderStep::new(item.limit, inner));
    }
    RateTable::new(table, bands)
}

impl TryFrom<PolicyDocument> for ScorePolicy {
    type Error = PolicyViolation;

    fn try_from(document: PolicyDocument) -> Result<Self, Self::Error> {
        let [first_blood_kill, first_blood_assist] = document.first_blood;
        let [multiplier, trigger] = document.adjust_kda;

        let tiers = TierLadder::new(
            document
                .horse
                .into_iter()
                .map(|horse| LadderStep::new(horse.score, horse.name))
                .collect(),
        )?;

        let policy = ScorePolicy {
            enabled: document.enabled,
            merge_messages: document.merge_msg,
            first_blood: FirstBloodBonus {
                kill: first_blood_kill,
                assist: first_blood_assist,
            },
            multi_kills: MultiKillBonus {
                penta: document.penta_kills[0],
                quadra: document.quadra_kills[0],
                triple: document.triple_kills[0],
            },
            rank_buckets: RankBuckets {
                join_team_rate: RankTable::from_extremes(
                    "join team rate rank",
                    &document.join_team_rate_rank,
                )?,
                gold_earned: RankTable::from_extremes(
                    "gold earned rank",
                    &document.gold_earned_rank,
                )?,
                hurt: RankTable::from_extremes("hurt rank", &document.hurt_rank)?,
                money_to_hurt: RankTable::from_extremes(
                    "money to hurt rank",
                    &document.money_to_hurt_rate_rank,
                )?,
                vision_score: RankTable::from_extremes(
                    "vision score rank",
                    &document.vision_score_rank,
                )?,
            },
            minions: MinionLadder {
                basis: document.minion_basis,
                ladder: pairs_to_ladder("minions", &document.minions_killed)?,
            },
            kill_rate: rate_table("kill rate", &document.kill_rate)?,
            hurt_rate: rate_table("hurt rate", &document.hurt_rate)?,
            assist_rate: rate_table("assist rate", &document.assist_rate)?,
            kda_adjustment: KdaAdjustment {
                multiplier,
                trigger,
            },
            tiers,
        };

        policy.validate()?;
        Ok(policy)
    }
}
