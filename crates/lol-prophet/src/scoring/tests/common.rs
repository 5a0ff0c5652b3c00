use serde_json::json;

use crate::policy::PolicyHandle;
use crate::scoring::domain::{MatchStats, PlayerStats, TeamSide};
use crate::scoring::policy::{PolicyDocument, ScorePolicy};
use crate::scoring::ranking::RankingContext;
use crate::scoring::ScoreEngine;

pub(super) const GAME_ID: u64 = 7_301_442;
pub(super) const THIRTY_MINUTES: u32 = 1_800;

/// Roster slot of the player the scenarios revolve around.
pub(super) const FOCUS: usize = 0;

pub(super) fn player(
    summoner: &str,
    team: TeamSide,
    (kills, deaths, assists): (u32, u32, u32),
    gold_earned: u32,
    damage_to_champions: u64,
    vision_score: u32,
) -> PlayerStats {
    PlayerStats {
        summoner: summoner.to_string(),
        team,
        kills,
        deaths,
        assists,
        first_blood_kill: false,
        first_blood_assist: false,
        penta_kills: 0,
        quadra_kills: 0,
        triple_kills: 0,
        gold_earned,
        damage_to_champions,
        vision_score,
        minions_killed: 150,
    }
}

/// Ten players where the focus player drew first blood, earned the most gold,
/// has the lowest vision score and sits mid-table everywhere else.
pub(super) fn roster() -> Vec<PlayerStats> {
    let mut focus = player("Poro", TeamSide::Blue, (2, 2, 2), 15_000, 10_000, 5);
    focus.first_blood_kill = true;

    vec![
        focus,
        player("Amumu", TeamSide::Blue, (3, 2, 3), 12_000, 20_000, 30),
        player("Braum", TeamSide::Blue, (3, 3, 2), 11_500, 15_000, 40),
        player("Corki", TeamSide::Blue, (1, 3, 1), 9_000, 12_000, 25),
        player("Draven", TeamSide::Blue, (1, 2, 0), 8_500, 8_000, 12),
        player("Ezreal", TeamSide::Red, (3, 2, 3), 12_500, 18_000, 35),
        player("Fizz", TeamSide::Red, (3, 2, 1), 11_000, 16_000, 20),
        player("Garen", TeamSide::Red, (2, 2, 1), 10_000, 9_000, 15),
        player("Heimer", TeamSide::Red, (1, 3, 1), 9_500, 7_000, 22),
        player("Irelia", TeamSide::Red, (1, 3, 0), 8_000, 5_000, 10),
    ]
}

pub(super) fn match_stats() -> MatchStats {
    MatchStats {
        game_id: GAME_ID,
        duration_secs: THIRTY_MINUTES,
        players: roster(),
    }
}

pub(super) fn context(players: &[PlayerStats]) -> RankingContext {
    RankingContext::build(players, THIRTY_MINUTES).expect("ten-player roster")
}

pub(super) fn engine() -> ScoreEngine {
    ScoreEngine::new(PolicyHandle::default())
}

pub(super) fn engine_with(policy: ScorePolicy) -> ScoreEngine {
    ScoreEngine::new(PolicyHandle::new(policy).expect("valid test policy"))
}

/// Wire form of the embedded default policy.
pub(super) fn default_document() -> PolicyDocument {
    serde_json::from_value(json!({
        "enabled": true,
        "mergeMsg": false,
        "firstBlood": [10.0, 5.0],
        "pentaKills": [20.0],
        "quadraKills": [10.0],
        "tripleKills": [5.0],
        "joinTeamRateRank": [10.0, 5.0, 5.0, 10.0],
        "goldEarnedRank": [10.0, 5.0, 5.0, 10.0],
        "hurtRank": [10.0, 5.0],
        "money2hurtRateRank": [10.0, 5.0],
        "visionScoreRank": [10.0, 5.0],
        "minionsKilled": [[10.0, 20.0], [9.0, 10.0], [8.0, 5.0]],
        "killRate": [
            { "limit": 50.0, "scoreConf": [[15.0, 40.0], [10.0, 20.0], [5.0, 10.0]] },
            { "limit": 40.0, "scoreConf": [[15.0, 20.0], [10.0, 10.0], [5.0, 5.0]] }
        ],
        "hurtRate": [
            { "limit": 40.0, "scoreConf": [[15.0, 40.0], [10.0, 20.0], [5.0, 10.0]] },
            { "limit": 30.0, "scoreConf": [[15.0, 20.0], [10.0, 10.0], [5.0, 5.0]] }
        ],
        "assistRate": [
            {
                "limit": 50.0,
                "scoreConf": [[20.0, 30.0], [18.0, 25.0], [15.0, 20.0], [10.0, 10.0], [5.0, 5.0]]
            },
            { "limit": 40.0, "scoreConf": [[20.0, 15.0], [15.0, 10.0], [10.0, 5.0], [5.0, 3.0]] }
        ],
        "adjustKDA": [2.0, 5.0],
        "horse": [
            { "score": 160.0, "name": "汗血宝马" },
            { "score": 130.0, "name": "上等马" },
            { "score": 110.0, "name": "中等马" },
            { "score": 90.0, "name": "下等马" },
            { "score": 50.0, "name": "牛马" },
            { "score": 0.0001, "name": "没有马" }
        ]
    }))
    .expect("default document deserializes")
}
