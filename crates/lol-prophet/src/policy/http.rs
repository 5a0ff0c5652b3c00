use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::StatusCode;

use super::source::{PolicySource, PolicySourceError};
use crate::scoring::PolicyDocument;

/// Fetches the current policy document from a remote configuration endpoint.
#[derive(Debug, Clone)]
pub struct HttpPolicySource {
    client: reqwest::Client,
    url: String,
}

impl HttpPolicySource {
    pub fn new(url: &str, timeout: Duration) -> Result<Self, PolicySourceError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            url: url.trim_end_matches('/').to_string(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl PolicySource for HttpPolicySource {
    async fn fetch(&self) -> Result<Option<PolicyDocument>, PolicySourceError> {
        let response = self.client.get(&self.url).send().await?;

        match response.status() {
            StatusCode::NO_CONTENT | StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => {
                let bytes = response.bytes().await?;
                Ok(Some(serde_json::from_slice(&bytes)?))
            }
            status => Err(PolicySourceError::Status(status.as_u16())),
        }
    }

    fn describe(&self) -> String {
        format!("http {}", self.url)
    }
}
