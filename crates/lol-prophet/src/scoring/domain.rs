use serde::{Deserialize, Serialize};

/// Number of participants a ranked match must present before scoring.
pub const MATCH_SIZE: usize = 10;

/// Side of the map a participant played on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TeamSide {
    Blue,
    Red,
}

impl TeamSide {
    pub fn label(&self) -> &'static str {
        match self {
            TeamSide::Blue => "blue",
            TeamSide::Red => "red",
        }
    }
}

/// End-of-match telemetry for a single participant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub summoner: String,
    pub team: TeamSide,
    pub kills: u32,
    pub deaths: u32,
    pub assists: u32,
    #[serde(default)]
    pub first_blood_kill: bool,
    #[serde(default)]
    pub first_blood_assist: bool,
    #[serde(default)]
    pub penta_kills: u32,
    #[serde(default)]
    pub quadra_kills: u32,
    #[serde(default)]
    pub triple_kills: u32,
    pub gold_earned: u32,
    /// Damage dealt to enemy champions.
    pub damage_to_champions: u64,
    pub vision_score: u32,
    pub minions_killed: u32,
}

impl PlayerStats {
    /// `(kills + assists) / max(deaths, 1)`.
    pub fn kda(&self) -> f64 {
        (f64::from(self.kills) + f64::from(self.assists)) / f64::from(self.deaths.max(1))
    }

    pub fn kda_line(&self) -> String {
        format!("{}/{}/{}", self.kills, self.deaths, self.assists)
    }
}

/// A completed match as delivered by the match-stats collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchStats {
    pub game_id: u64,
    /// Game length, used for per-minute metrics.
    #[serde(default)]
    pub duration_secs: u32,
    pub players: Vec<PlayerStats>,
}

impl MatchStats {
    pub fn minutes(&self) -> f64 {
        f64::from(self.duration_secs) / 60.0
    }
}
