use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;

use crate::scoring::PolicyDocument;

#[derive(Debug, thiserror::Error)]
pub enum PolicySourceError {
    #[error("policy request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("policy endpoint answered with status {0}")]
    Status(u16),
    #[error("failed to read policy document: {0}")]
    Io(#[from] std::io::Error),
    #[error("policy document is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Supplies candidate policy documents. `Ok(None)` means the source has
/// nothing to offer right now, which callers treat as "no change".
#[async_trait]
pub trait PolicySource: Send + Sync {
    async fn fetch(&self) -> Result<Option<PolicyDocument>, PolicySourceError>;

    fn describe(&self) -> String;
}

/// Fixed document, or nothing at all when the embedded default is enough.
#[derive(Debug, Clone, Default)]
pub struct StaticPolicySource {
    document: Option<PolicyDocument>,
}

impl StaticPolicySource {
    pub fn new(document: Option<PolicyDocument>) -> Self {
        Self { document }
    }
}

#[async_trait]
impl PolicySource for StaticPolicySource {
    async fn fetch(&self) -> Result<Option<PolicyDocument>, PolicySourceError> {
        Ok(self.document.clone())
    }

    fn describe(&self) -> String {
        "static".to_string()
    }
}

/// Policy document persisted as JSON on local disk. A missing file yields `None`.
#[derive(Debug, Clone)]
pub struct FilePolicySource {
    path: PathBuf,
}

impl FilePolicySource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Blocking variant used at startup, before the runtime is driving refreshes.
    pub fn load(&self) -> Result<Option<PolicyDocument>, PolicySourceError> {
        match std::fs::read(&self.path) {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }
}

#[async_trait]
impl PolicySource for FilePolicySource {
    async fn fetch(&self) -> Result<Option<PolicyDocument>, PolicySourceError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }
}
