use std::sync::{Arc, PoisonError, RwLock};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use crate::scoring::{PolicyDocument, PolicyViolation, ScorePolicy};

/// A published policy. Never mutated after it is installed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivePolicy {
    /// Local install counter, starting at 1 for the startup policy.
    pub version: u64,
    /// Version reported by the document this policy came from, if any.
    pub source_version: Option<u64>,
    pub installed_at: DateTime<Utc>,
    pub policy: ScorePolicy,
}

/// Process-wide holder for the active policy.
///
/// Readers take an `Arc` snapshot and keep using it for the whole calculation;
/// writers swap in a new `Arc`, so a reader sees either the old or the new
/// policy and never a mix.
#[derive(Debug, Clone)]
pub struct PolicyHandle {
    current: Arc<RwLock<Arc<ActivePolicy>>>,
}

impl Default for PolicyHandle {
    fn default() -> Self {
        Self::from_trusted(ScorePolicy::default(), None)
    }
}

impl PolicyHandle {
    pub fn new(policy: ScorePolicy) -> Result<Self, PolicyViolation> {
        policy.validate()?;
        Ok(Self::from_trusted(policy, None))
    }

    /// Starts from a persisted or fetched document, falling back to the
    /// embedded default when it is absent, disabled or structurally invalid.
    /// Applies the same acceptance rule as a refresh.
    pub fn from_document_or_default(document: Option<PolicyDocument>) -> Self {
        let Some(document) = document else {
            return Self::default();
        };
        if !document.enabled {
            info!("stored policy is disabled, using embedded default");
            return Self::default();
        }

        let source_version = document.version;
        match ScorePolicy::try_from(document) {
            Ok(policy) => Self::from_trusted(policy, source_version),
            Err(err) => {
                warn!(error = %err, "stored policy rejected, using embedded default");
                Self::default()
            }
        }
    }

    fn from_trusted(policy: ScorePolicy, source_version: Option<u64>) -> Self {
        Self {
            current: Arc::new(RwLock::new(Arc::new(ActivePolicy {
                version: 1,
                source_version,
                installed_at: Utc::now(),
                policy,
            }))),
        }
    }

    pub fn snapshot(&self) -> Arc<ActivePolicy> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn version(&self) -> u64 {
        self.snapshot().version
    }

    /// Validates `policy` and replaces the active one. Returns the new local version.
    pub fn install(
        &self,
        policy: ScorePolicy,
        source_version: Option<u64>,
    ) -> Result<u64, PolicyViolation> {
        policy.validate()?;

        let mut guard = self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let version = guard.version + 1;
        *guard = Arc::new(ActivePolicy {
            version,
            source_version,
            installed_at: Utc::now(),
            policy,
        });
        drop(guard);

        info!(version, ?source_version, "score policy installed");
        Ok(version)
    }
}
