//! First-match-wins lookup over descending thresholds.
//!
//! Minion, rate-band, rate-inner and tier tables all share this one lookup so
//! they cannot drift apart in how boundaries are treated: an input equal to a
//! threshold matches that step.

use serde::Serialize;

use super::error::PolicyViolation;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LadderStep<T> {
    pub threshold: f64,
    pub value: T,
}

impl<T> LadderStep<T> {
    pub fn new(threshold: f64, value: T) -> Self {
        Self { threshold, value }
    }
}

/// Steps ordered by strictly decreasing threshold. Ordering is checked on
/// construction, never at lookup time.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Ladder<T> {
    steps: Vec<LadderStep<T>>,
}

impl<T> Ladder<T> {
    pub fn new(table: &str, steps: Vec<LadderStep<T>>) -> Result<Self, PolicyViolation> {
        let ladder = Self { steps };
        ladder.check(table)?;
        Ok(ladder)
    }

    /// Builds a ladder from data already known to be ordered.
    pub(crate) fn from_steps_unchecked(steps: Vec<LadderStep<T>>) -> Self {
        Self { steps }
    }

    /// Index of the first step whose threshold is `<= input`.
    pub fn position(&self, input: f64) -> Option<usize> {
        self.steps.iter().position(|step| step.threshold <= input)
    }

    /// Value of the first step whose threshold is `<= input`.
    pub fn lookup(&self, input: f64) -> Option<&T> {
        self.position(input).map(|index| &self.steps[index].value)
    }

    pub fn steps(&self) -> &[LadderStep<T>] {
        &self.steps
    }

    pub fn last(&self) -> Option<&LadderStep<T>> {
        self.steps.last()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Re-runs the construction checks; used when validating whole policies.
    pub fn check(&self, table: &str) -> Result<(), PolicyViolation> {
        for step in &self.steps {
            if !step.threshold.is_finite() {
                return Err(PolicyViolation::NonFinite {
                    table: table.to_string(),
                });
            }
        }
        for pair in self.steps.windows(2) {
            if pair[1].threshold >= pair[0].threshold {
                return Err(PolicyViolation::NotDescending {
                    table: table.to_string(),
                    previous: pair[0].threshold,
                    next: pair[1].threshold,
                });
            }
        }
        Ok(())
    }

    pub fn require_non_negative(&self, table: &str) -> Result<(), PolicyViolation> {
        match self.steps.iter().find(|step| step.threshold < 0.0) {
            Some(step) => Err(PolicyViolation::NegativeThreshold {
                table: table.to_string(),
                threshold: step.threshold,
            }),
            None => Ok(()),
        }
    }
}

impl Ladder<f64> {
    /// Bonus for `input`, or 0 when no step matches.
    pub fn bonus(&self, input: f64) -> f64 {
        self.lookup(input).copied().unwrap_or(0.0)
    }

    pub fn require_finite_values(&self, table: &str) -> Result<(), PolicyViolation> {
        if self.steps.iter().all(|step| step.value.is_finite()) {
            Ok(())
        } else {
            Err(PolicyViolation::NonFinite {
                table: table.to_string(),
            })
        }
    }
}
