use super::common::*;
use crate::scoring::domain::{TeamSide, MATCH_SIZE};
use crate::scoring::error::ScoreError;
use crate::scoring::ranking::{RankDimension, RankingContext};

fn assert_permutation(ranks: &[u8; MATCH_SIZE]) {
    let mut sorted = ranks.to_vec();
    sorted.sort_unstable();
    let expected: Vec<u8> = (1..=MATCH_SIZE as u8).collect();
    assert_eq!(sorted, expected);
}

#[test]
fn every_dimension_is_a_permutation_of_ranks() {
    let context = context(&roster());
    for dimension in RankDimension::ALL {
        assert_permutation(context.ranks(dimension));
    }
}

#[test]
fn highest_value_ranks_first() {
    let context = context(&roster());
    assert_eq!(context.rank(RankDimension::GoldEarned, FOCUS), 1);
    assert_eq!(context.rank(RankDimension::VisionScore, FOCUS), 10);
    // Amumu dealt the most champion damage
    assert_eq!(context.rank(RankDimension::Hurt, 1), 1);
    assert_eq!(context.rank(RankDimension::Hurt, FOCUS), 6);
}

#[test]
fn ties_keep_roster_order() {
    let players: Vec<_> = (0..MATCH_SIZE)
        .map(|slot| {
            let team = if slot < 5 { TeamSide::Blue } else { TeamSide::Red };
            player(&format!("twin-{slot}"), team, (1, 1, 1), 10_000, 10_000, 20)
        })
        .collect();

    let context = context(&players);
    for dimension in RankDimension::ALL {
        assert_permutation(context.ranks(dimension));
        for slot in 0..MATCH_SIZE {
            assert_eq!(usize::from(context.rank(dimension, slot)), slot + 1);
        }
    }
}

#[test]
fn join_team_ties_resolve_by_roster_position() {
    let context = context(&roster());
    // Amumu and Ezreal both joined 60% of their team's kills
    assert_eq!(context.rank(RankDimension::JoinTeamRate, 1), 1);
    assert_eq!(context.rank(RankDimension::JoinTeamRate, 5), 2);
    assert_eq!(context.rank(RankDimension::JoinTeamRate, FOCUS), 4);
}

#[test]
fn shares_are_relative_to_own_team() {
    let context = context(&roster());
    let shares = context.shares(FOCUS);
    assert!((shares.kill_rate - 20.0).abs() < 1e-9);
    assert!((shares.assist_rate - 20.0).abs() < 1e-9);
    assert!((shares.join_team_rate - 40.0).abs() < 1e-9);
    assert!((shares.hurt_rate - 10_000.0 / 65_000.0 * 100.0).abs() < 1e-9);
    assert!((shares.money_to_hurt - 10_000.0 / 15_000.0).abs() < 1e-9);
    assert!((context.game_minutes() - 30.0).abs() < 1e-9);
}

#[test]
fn zero_denominators_yield_zero_shares() {
    let players: Vec<_> = (0..MATCH_SIZE)
        .map(|slot| {
            let team = if slot < 5 { TeamSide::Blue } else { TeamSide::Red };
            player(&format!("afk-{slot}"), team, (0, 0, 0), 0, 0, 0)
        })
        .collect();

    let context = RankingContext::build(&players, 0).expect("ten players");
    let shares = context.shares(3);
    assert_eq!(shares.kill_rate, 0.0);
    assert_eq!(shares.hurt_rate, 0.0);
    assert_eq!(shares.money_to_hurt, 0.0);
    assert_eq!(context.game_minutes(), 0.0);
}

#[test]
fn rejects_rosters_that_are_not_ten_players() {
    let mut players = roster();
    players.pop();

    match RankingContext::build(&players, THIRTY_MINUTES) {
        Err(ScoreError::InvalidMatchSize {
            expected: 10,
            actual: 9,
        }) => {}
        other => panic!("expected invalid match size, got {other:?}"),
    }
}

#[test]
fn extreme_counts_do_not_overflow_team_totals() {
    let mut players = roster();
    players[FOCUS].kills = u32::MAX;
    players[FOCUS].assists = u32::MAX;
    players[1].kills = u32::MAX;
    players[1].damage_to_champions = u64::MAX;

    let context = context(&players);

    assert_eq!(context.rank(RankDimension::JoinTeamRate, FOCUS), 1);
    let shares = context.shares(FOCUS);
    assert!(shares.kill_rate.is_finite());
    assert!(shares.join_team_rate.is_finite());
    assert!(context.shares(1).hurt_rate <= 100.0);
}
