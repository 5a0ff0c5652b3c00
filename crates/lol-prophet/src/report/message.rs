use crate::scoring::{MatchScore, PlayerScore, TeamSide};

/// Which players get announced and how.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MessageOptions {
    /// Announce only this side (usually the caller's own team).
    pub team: Option<TeamSide>,
    /// Caller's own summoner name, used with `include_self`.
    pub self_summoner: Option<String>,
    pub include_self: bool,
    /// Per-tier switch indexed by tier position; missing entries announce.
    pub announce_tiers: Vec<bool>,
}

impl MessageOptions {
    fn announces(&self, player: &PlayerScore) -> bool {
        if let Some(team) = self.team {
            if player.team != team {
                return false;
            }
        }

        if !self.include_self
            && self
                .self_summoner
                .as_deref()
                .is_some_and(|name| name == player.summoner)
        {
            return false;
        }

        self.announce_tiers
            .get(player.tier.position)
            .copied()
            .unwrap_or(true)
    }
}

/// Rendered announcement lines; one per player unless the policy merges them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HorseMessages {
    pub lines: Vec<String>,
}

impl HorseMessages {
    pub fn render(score: &MatchScore, options: &MessageOptions) -> Self {
        let lines: Vec<String> = score
            .players
            .iter()
            .filter(|player| options.announces(player))
            .map(render_line)
            .collect();

        if score.merge_messages && !lines.is_empty() {
            Self {
                lines: vec![lines.join(" | ")],
            }
        } else {
            Self { lines }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

fn render_line(player: &PlayerScore) -> String {
    format!(
        "【{}】{} score {:.1} kda {}",
        player.tier.label, player.summoner, player.breakdown.total, player.kda_line
    )
}
