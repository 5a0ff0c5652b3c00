use serde::Serialize;

use crate::scoring::{ContributionKind, MatchScore, PlayerScore, TeamSide};

/// Flattened player result for API responses and CLI tables.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerScoreView {
    pub summoner: String,
    pub team: TeamSide,
    pub horse: String,
    pub total: f64,
    pub kda: String,
    pub contributions: Vec<(ContributionKind, f64)>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchScoreView {
    pub game_id: u64,
    pub policy_version: u64,
    pub players: Vec<PlayerScoreView>,
}

impl PlayerScore {
    pub fn to_view(&self) -> PlayerScoreView {
        PlayerScoreView {
            summoner: self.summoner.clone(),
            team: self.team,
            horse: self.tier.label.clone(),
            total: self.breakdown.total,
            kda: self.kda_line.clone(),
            contributions: self
                .breakdown
                .components
                .iter()
                .map(|component| (component.kind, component.points))
                .collect(),
        }
    }
}

impl MatchScore {
    /// Players ordered best first; ties keep roster order.
    pub fn to_view(&self) -> MatchScoreView {
        let mut players: Vec<PlayerScoreView> =
            self.players.iter().map(PlayerScore::to_view).collect();
        players.sort_by(|a, b| b.total.total_cmp(&a.total));

        MatchScoreView {
            game_id: self.game_id,
            policy_version: self.policy_version,
            players,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::policy::PolicyHandle;
    use crate::scoring::{MatchStats, PlayerStats, ScoreEngine, TeamSide};

    fn stats() -> MatchStats {
        let players = (0..10u32)
            .map(|slot| PlayerStats {
                summoner: format!("p{slot}"),
                team: if slot < 5 { TeamSide::Blue } else { TeamSide::Red },
                kills: slot,
                deaths: 3,
                assists: 2,
                first_blood_kill: false,
                first_blood_assist: false,
                penta_kills: 0,
                quadra_kills: 0,
                triple_kills: 0,
                gold_earned: 8_000 + slot * 500,
                damage_to_champions: 10_000 + u64::from(slot) * 1_000,
                vision_score: 10 + slot,
                minions_killed: 150,
            })
            .collect();
        MatchStats {
            game_id: 9,
            duration_secs: 1_500,
            players,
        }
    }

    #[test]
    fn view_orders_players_best_first() {
        let score = ScoreEngine::new(PolicyHandle::default())
            .score_match(&stats())
            .expect("full roster");
        let view = score.to_view();

        assert_eq!(view.players.len(), 10);
        assert!(view
            .players
            .windows(2)
            .all(|pair| pair[0].total >= pair[1].total));
        assert_eq!(view.policy_version, 1);
    }
}
