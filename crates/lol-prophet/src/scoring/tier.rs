use serde::{Deserialize, Serialize};

use super::policy::TierLadder;

/// Horse assigned to a score; `position` 0 is the best tier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierAssignment {
    pub position: usize,
    pub label: String,
}

pub struct TierClassifier<'a> {
    tiers: &'a TierLadder,
}

impl<'a> TierClassifier<'a> {
    pub fn new(tiers: &'a TierLadder) -> Self {
        Self { tiers }
    }

    /// First tier whose minimum is at or below `score`. Scores under every
    /// minimum, NaN included, fall into the last (catch-all) tier.
    pub fn classify(&self, score: f64) -> TierAssignment {
        let ladder = self.tiers.ladder();
        let position = ladder
            .position(score)
            .unwrap_or_else(|| ladder.len().saturating_sub(1));

        ladder
            .steps()
            .get(position)
            .map(|step| TierAssignment {
                position,
                label: step.value.clone(),
            })
            .unwrap_or_default()
    }
}
