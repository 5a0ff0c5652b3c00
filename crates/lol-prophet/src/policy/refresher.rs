use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::handle::PolicyHandle;
use super::source::{PolicySource, PolicySourceError};
use crate::scoring::{PolicyViolation, ScorePolicy};

/// What a single refresh attempt did to the active policy.
#[derive(Debug)]
pub enum RefreshOutcome {
    Installed { version: u64 },
    /// The source had no document to offer.
    Empty,
    /// The candidate has its enable flag cleared.
    Disabled,
    /// The candidate carries the version already installed.
    Unchanged,
    Rejected(PolicyViolation),
    FetchFailed(PolicySourceError),
}

impl RefreshOutcome {
    pub fn installed(&self) -> bool {
        matches!(self, RefreshOutcome::Installed { .. })
    }
}

/// Periodically pulls a candidate policy and swaps it in when it is enabled,
/// new and valid. Every other outcome keeps the current policy.
pub struct PolicyRefresher {
    source: Arc<dyn PolicySource>,
    handle: PolicyHandle,
    interval: Duration,
}

impl PolicyRefresher {
    pub fn new(source: Arc<dyn PolicySource>, handle: PolicyHandle, interval: Duration) -> Self {
        Self {
            source,
            handle,
            interval,
        }
    }

    pub async fn refresh_once(&self) -> RefreshOutcome {
        let document = match self.source.fetch().await {
            Ok(Some(document)) => document,
            Ok(None) => {
                debug!(source = %self.source.describe(), "no policy document offered");
                return RefreshOutcome::Empty;
            }
            Err(err) => {
                warn!(source = %self.source.describe(), error = %err, "policy fetch failed");
                return RefreshOutcome::FetchFailed(err);
            }
        };

        if !document.enabled {
            debug!(source = %self.source.describe(), "fetched policy is disabled");
            return RefreshOutcome::Disabled;
        }

        let source_version = document.version;
        if source_version.is_some() && source_version == self.handle.snapshot().source_version {
            return RefreshOutcome::Unchanged;
        }

        let installed = ScorePolicy::try_from(document)
            .and_then(|policy| self.handle.install(policy, source_version));

        match installed {
            Ok(version) => RefreshOutcome::Installed { version },
            Err(violation) => {
                warn!(
                    source = %self.source.describe(),
                    error = %violation,
                    "fetched policy rejected, keeping current"
                );
                RefreshOutcome::Rejected(violation)
            }
        }
    }

    /// Refreshes immediately and then once per interval until `shutdown`
    /// flips to `true` or its sender is dropped.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        let mut ticker = tokio::time::interval(self.interval);
        info!(
            source = %self.source.describe(),
            interval_secs = self.interval.as_secs(),
            "policy refresh loop started"
        );

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.refresh_once().await;
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }

        info!("policy refresh loop stopped");
    }

    pub fn spawn(self, shutdown: watch::Receiver<bool>) -> JoinHandle<()> {
        tokio::spawn(self.run(shutdown))
    }
}
