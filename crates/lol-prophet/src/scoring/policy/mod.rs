mod defaults;
mod document;

pub use defaults::{
    HORSE_BEST, HORSE_LOWER, HORSE_MIDDLE, HORSE_NONE, HORSE_UPPER, HORSE_WORKHORSE,
};
pub use document::{HorseDocument, PolicyDocument, RateItemDocument};

use serde::{Deserialize, Serialize};

use super::domain::MATCH_SIZE;
use super::error::PolicyViolation;
use super::ladder::{Ladder, LadderStep};
use super::ranking::RankDimension;

/// Every weight and threshold the calculator reads. A policy is never edited
/// in place once published; refreshes replace it whole.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScorePolicy {
    pub enabled: bool,
    /// Consumed by the messaging side only.
    pub merge_messages: bool,
    pub first_blood: FirstBloodBonus,
    pub multi_kills: MultiKillBonus,
    pub rank_buckets: RankBuckets,
    pub minions: MinionLadder,
    pub kill_rate: RateTable,
    pub hurt_rate: RateTable,
    pub assist_rate: RateTable,
    pub kda_adjustment: KdaAdjustment,
    pub tiers: TierLadder,
}

impl ScorePolicy {
    /// Checks every structural invariant; a failing candidate must not be installed.
    pub fn validate(&self) -> Result<(), PolicyViolation> {
        let scalars = [
            self.first_blood.kill,
            self.first_blood.assist,
            self.multi_kills.penta,
            self.multi_kills.quadra,
            self.multi_kills.triple,
        ];
        if scalars.iter().any(|value| !value.is_finite()) {
            return Err(PolicyViolation::NonFinite {
                table: "scalar bonuses".to_string(),
            });
        }

        for dimension in RankDimension::ALL {
            self.rank_buckets
                .table(dimension)
                .check(&format!("{} rank", dimension.label()))?;
        }

        self.minions.ladder.check("minions")?;
        self.minions.ladder.require_non_negative("minions")?;
        self.minions.ladder.require_finite_values("minions")?;

        self.kill_rate.check("kill rate")?;
        self.hurt_rate.check("hurt rate")?;
        self.assist_rate.check("assist rate")?;

        self.kda_adjustment.check()?;
        self.tiers.check()
    }

    /// The table that ranks `dimension`.
    pub fn rank_table(&self, dimension: RankDimension) -> &RankTable {
        self.rank_buckets.table(dimension)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FirstBloodBonus {
    pub kill: f64,
    pub assist: f64,
}

/// Per-occurrence bonuses; counts multiply, they are not flags.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MultiKillBonus {
    pub penta: f64,
    pub quadra: f64,
    pub triple: f64,
}

/// Signed bonus for specific 1-based ranks; unlisted ranks earn nothing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RankTable {
    buckets: Vec<RankBonus>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RankBonus {
    pub rank: u8,
    pub bonus: f64,
}

impl RankTable {
    pub fn new(table: &str, buckets: Vec<RankBonus>) -> Result<Self, PolicyViolation> {
        let rank_table = Self { buckets };
        rank_table.check(table)?;
        Ok(rank_table)
    }

    pub(crate) fn from_buckets_unchecked(buckets: Vec<RankBonus>) -> Self {
        Self { buckets }
    }

    /// Maps the compact wire form: two values reward ranks 1 and 2, four
    /// values additionally penalise the last two ranks (values are magnitudes).
    pub fn from_extremes(table: &str, values: &[f64]) -> Result<Self, PolicyViolation> {
        let last = MATCH_SIZE as u8;
        let buckets = match values {
            [first, second] => vec![
                RankBonus { rank: 1, bonus: *first },
                RankBonus { rank: 2, bonus: *second },
            ],
            [first, second, next_to_last, bottom] => vec![
                RankBonus { rank: 1, bonus: *first },
                RankBonus { rank: 2, bonus: *second },
                RankBonus {
                    rank: last - 1,
                    bonus: -*next_to_last,
                },
                RankBonus {
                    rank: last,
                    bonus: -*bottom,
                },
            ],
            other => {
                return Err(PolicyViolation::UnsupportedRankTable {
                    table: table.to_string(),
                    len: other.len(),
                })
            }
        };
        Self::new(table, buckets)
    }

    pub fn bonus(&self, rank: u8) -> f64 {
        self.buckets
            .iter()
            .find(|bucket| bucket.rank == rank)
            .map(|bucket| bucket.bonus)
            .unwrap_or(0.0)
    }

    pub fn buckets(&self) -> &[RankBonus] {
        &self.buckets
    }

    pub fn check(&self, table: &str) -> Result<(), PolicyViolation> {
        let mut seen = [false; MATCH_SIZE + 1];
        for bucket in &self.buckets {
            if bucket.rank == 0 || usize::from(bucket.rank) > MATCH_SIZE {
                return Err(PolicyViolation::RankOutOfRange {
                    table: table.to_string(),
                    rank: bucket.rank,
                    max: MATCH_SIZE,
                });
            }
            if !bucket.bonus.is_finite() {
                return Err(PolicyViolation::NonFinite {
                    table: table.to_string(),
                });
            }
            let slot = &mut seen[usize::from(bucket.rank)];
            if *slot {
                return Err(PolicyViolation::DuplicateRank {
                    table: table.to_string(),
                    rank: bucket.rank,
                });
            }
            *slot = true;
        }
        Ok(())
    }
}

/// One rank table per ranked dimension.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankBuckets {
    pub join_team_rate: RankTable,
    pub gold_earned: RankTable,
    pub hurt: RankTable,
    pub money_to_hurt: RankTable,
    pub vision_score: RankTable,
}

impl RankBuckets {
    pub fn table(&self, dimension: RankDimension) -> &RankTable {
        match dimension {
            RankDimension::JoinTeamRate => &self.join_team_rate,
            RankDimension::GoldEarned => &self.gold_earned,
            RankDimension::Hurt => &self.hurt,
            RankDimension::MoneyToHurt => &self.money_to_hurt,
            RankDimension::VisionScore => &self.vision_score,
        }
    }
}

/// What the minion ladder is evaluated against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MinionBasis {
    #[default]
    PerMinute,
    Total,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MinionLadder {
    pub basis: MinionBasis,
    pub ladder: Ladder<f64>,
}

/// Bands keyed by a team-share percentage; the selected band's inner ladder
/// is then read with the player's absolute count.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RateTable {
    bands: Ladder<Ladder<f64>>,
}

impl RateTable {
    pub fn new(table: &str, bands: Vec<LadderStep<Ladder<f64>>>) -> Result<Self, PolicyViolation> {
        let rate_table = Self {
            bands: Ladder::new(table, bands)?,
        };
        rate_table.check(table)?;
        Ok(rate_table)
    }

    pub(crate) fn from_bands_unchecked(bands: Vec<LadderStep<Ladder<f64>>>) -> Self {
        Self {
            bands: Ladder::from_steps_unchecked(bands),
        }
    }

    /// 0 when `rate` is below the lowest band or the inner ladder has no match.
    pub fn bonus(&self, rate: f64, value: f64) -> f64 {
        self.bands
            .lookup(rate)
            .map(|inner| inner.bonus(value))
            .unwrap_or(0.0)
    }

    pub fn bands(&self) -> &[LadderStep<Ladder<f64>>] {
        self.bands.steps()
    }

    pub fn check(&self, table: &str) -> Result<(), PolicyViolation> {
        self.bands.check(table)?;
        self.bands.require_non_negative(table)?;
        for (index, band) in self.bands.steps().iter().enumerate() {
            let inner = format!("{table} band {index}");
            band.value.check(&inner)?;
            band.value.require_non_negative(&inner)?;
            band.value.require_finite_values(&inner)?;
        }
        Ok(())
    }
}

/// Scales the additive subtotal once the KDA ratio passes `trigger`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct KdaAdjustment {
    pub multiplier: f64,
    pub trigger: f64,
}

impl KdaAdjustment {
    /// The multiplier to apply for `kda`, if any.
    pub fn factor_for(&self, kda: f64) -> Option<f64> {
        (kda > self.trigger).then_some(self.multiplier)
    }

    fn check(&self) -> Result<(), PolicyViolation> {
        if self.multiplier.is_finite() && self.trigger.is_finite() {
            Ok(())
        } else {
            Err(PolicyViolation::InvalidKdaAdjustment {
                multiplier: self.multiplier,
                trigger: self.trigger,
            })
        }
    }
}

/// Horse labels ordered by descending minimum score. The final entry is the
/// catch-all for anything below it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TierLadder {
    ladder: Ladder<String>,
}

impl TierLadder {
    pub fn new(steps: Vec<LadderStep<String>>) -> Result<Self, PolicyViolation> {
        let tiers = Self {
            ladder: Ladder::new("tiers", steps)?,
        };
        tiers.check()?;
        Ok(tiers)
    }

    pub(crate) fn from_steps_unchecked(steps: Vec<LadderStep<String>>) -> Self {
        Self {
            ladder: Ladder::from_steps_unchecked(steps),
        }
    }

    pub fn ladder(&self) -> &Ladder<String> {
        &self.ladder
    }

    pub fn len(&self) -> usize {
        self.ladder.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ladder.is_empty()
    }

    pub fn check(&self) -> Result<(), PolicyViolation> {
        if self.ladder.is_empty() {
            return Err(PolicyViolation::Empty {
                table: "tiers".to_string(),
            });
        }
        self.ladder.check("tiers")
    }
}
