use super::super::domain::MATCH_SIZE;
use super::super::ladder::{Ladder, LadderStep};
use super::{
    FirstBloodBonus, KdaAdjustment, MinionBasis, MinionLadder, MultiKillBonus, RankBonus,
    RankBuckets, RankTable, RateTable, ScorePolicy, TierLadder,
};

pub const HORSE_BEST: &str = "汗血宝马";
pub const HORSE_UPPER: &str = "上等马";
pub const HORSE_MIDDLE: &str = "中等马";
pub const HORSE_LOWER: &str = "下等马";
pub const HORSE_WORKHORSE: &str = "牛马";
pub const HORSE_NONE: &str = "没有马";

fn ladder(steps: &[(f64, f64)]) -> Ladder<f64> {
    Ladder::from_steps_unchecked(
        steps
            .iter()
            .map(|(threshold, bonus)| LadderStep::new(*threshold, *bonus))
            .collect(),
    )
}

fn top_two(first: f64, second: f64) -> RankTable {
    RankTable::from_buckets_unchecked(vec![
        RankBonus { rank: 1, bonus: first },
        RankBonus { rank: 2, bonus: second },
    ])
}

fn top_and_bottom_two(first: f64, second: f64, next_to_last: f64, bottom: f64) -> RankTable {
    let last = MATCH_SIZE as u8;
    RankTable::from_buckets_unchecked(vec![
        RankBonus { rank: 1, bonus: first },
        RankBonus { rank: 2, bonus: second },
        RankBonus {
            rank: last - 1,
            bonus: -next_to_last,
        },
        RankBonus {
            rank: last,
            bonus: -bottom,
        },
    ])
}

fn rate_table(bands: Vec<(f64, Vec<(f64, f64)>)>) -> RateTable {
    RateTable::from_bands_unchecked(
        bands
            .into_iter()
            .map(|(limit, inner)| LadderStep::new(limit, ladder(&inner)))
            .collect(),
    )
}

impl Default for ScorePolicy {
    /// The embedded policy used until a valid override arrives.
    fn default() -> Self {
        Self {
            enabled: true,
            merge_messages: false,
            first_blood: FirstBloodBonus {
                kill: 10.0,
                assist: 5.0,
            },
            multi_kills: MultiKillBonus {
                penta: 20.0,
                quadra: 10.0,
                triple: 5.0,
            },
            rank_buckets: RankBuckets {
                join_team_rate: top_and_bottom_two(10.0, 5.0, 5.0, 10.0),
                gold_earned: top_and_bottom_two(10.0, 5.0, 5.0, 10.0),
                hurt: top_two(10.0, 5.0),
                money_to_hurt: top_two(10.0, 5.0),
                vision_score: top_two(10.0, 5.0),
            },
            minions: MinionLadder {
                basis: MinionBasis::PerMinute,
                ladder: ladder(&[(10.0, 20.0), (9.0, 10.0), (8.0, 5.0)]),
            },
            kill_rate: rate_table(vec![
                (50.0, vec![(15.0, 40.0), (10.0, 20.0), (5.0, 10.0)]),
                (40.0, vec![(15.0, 20.0), (10.0, 10.0), (5.0, 5.0)]),
            ]),
            hurt_rate: rate_table(vec![
                (40.0, vec![(15.0, 40.0), (10.0, 20.0), (5.0, 10.0)]),
                (30.0, vec![(15.0, 20.0), (10.0, 10.0), (5.0, 5.0)]),
            ]),
            assist_rate: rate_table(vec![
                (
                    50.0,
                    vec![
                        (20.0, 30.0),
                        (18.0, 25.0),
                        (15.0, 20.0),
                        (10.0, 10.0),
                        (5.0, 5.0),
                    ],
                ),
                (
                    40.0,
                    vec![(20.0, 15.0), (15.0, 10.0), (10.0, 5.0), (5.0, 3.0)],
                ),
            ]),
            kda_adjustment: KdaAdjustment {
                multiplier: 2.0,
                trigger: 5.0,
            },
            tiers: TierLadder::from_steps_unchecked(vec![
                LadderStep::new(160.0, HORSE_BEST.to_string()),
                LadderStep::new(130.0, HORSE_UPPER.to_string()),
                LadderStep::new(110.0, HORSE_MIDDLE.to_string()),
                LadderStep::new(90.0, HORSE_LOWER.to_string()),
                LadderStep::new(50.0, HORSE_WORKHORSE.to_string()),
                LadderStep::new(0.0001, HORSE_NONE.to_string()),
            ]),
        }
    }
}
