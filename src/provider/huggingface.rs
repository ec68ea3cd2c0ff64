//! Hugging Face Inference API provider.
//!
//! Sends the raw image bytes as the POST body with a bearer authorization
//! header and parses the model output array (`[{"generated_text": "..."}]`).

use super::CaptionProvider;
use crate::config::ProviderConfig;
use crate::error::CaptionError;
use crate::types::{Caption, UploadCandidate};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::{Duration, Instant};

/// Sentinel left in place by setup templates; treated the same as no key.
pub const PLACEHOLDER_API_KEY: &str = "your_huggingface_api_key_here";

/// Captioning provider backed by the Hugging Face Inference API.
pub struct HuggingFaceProvider {
    endpoint: String,
    api_key: String,
    client: reqwest::Client,
}

impl HuggingFaceProvider {
    /// Create a provider with an explicit endpoint and credential.
    ///
    /// The credential is injected here rather than read from ambient state so
    /// the client stays testable with fixture keys. An empty or placeholder
    /// key is accepted at construction and rejected per request.
    pub fn new(endpoint: &str, api_key: &str) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            api_key: api_key.to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Create a provider from config, resolving `${ENV_VAR}` in the key.
    pub fn from_config(config: &ProviderConfig) -> Self {
        let api_key = config.resolved_api_key().unwrap_or_default();
        Self::new(&config.url(), &api_key)
    }

    fn credential_missing(&self) -> bool {
        self.api_key.is_empty() || self.api_key == PLACEHOLDER_API_KEY
    }
}

/// One record of the model output array.
#[derive(Debug, Deserialize)]
pub struct CaptionRecord {
    pub generated_text: Option<String>,
}

/// Extract the caption from a parsed response.
///
/// The first record's text field wins; an empty array, a record without the
/// field, or an empty string all count as malformed.
pub fn extract_caption(records: Vec<CaptionRecord>) -> Result<Caption, CaptionError> {
    records
        .into_iter()
        .next()
        .and_then(|record| record.generated_text)
        .filter(|text| !text.is_empty())
        .map(Caption::new)
        .ok_or(CaptionError::MalformedResponse)
}

#[async_trait]
impl CaptionProvider for HuggingFaceProvider {
    fn name(&self) -> &str {
        "huggingface"
    }

    async fn request_caption(&self, candidate: &UploadCandidate) -> Result<Caption, CaptionError> {
        // Fail before touching the network when no usable credential exists;
        // the controller turns this into the demo-caption error state.
        if self.credential_missing() {
            return Err(CaptionError::MissingCredential);
        }

        let start = Instant::now();

        let resp = self
            .client
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", candidate.mime_type.clone())
            .body(candidate.bytes.clone())
            .timeout(self.timeout())
            .send()
            .await
            .map_err(|e| CaptionError::RequestFailed {
                status_text: e.to_string(),
                status_code: None,
            })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(CaptionError::RequestFailed {
                status_text: status
                    .canonical_reason()
                    .unwrap_or("unknown status")
                    .to_string(),
                status_code: Some(status.as_u16()),
            });
        }

        let records: Vec<CaptionRecord> = resp
            .json()
            .await
            .map_err(|_| CaptionError::MalformedResponse)?;

        let caption = extract_caption(records)?;
        tracing::debug!(
            "Caption generated in {}ms ({} chars)",
            start.elapsed().as_millis(),
            caption.text.len()
        );
        Ok(caption)
    }

    fn timeout(&self) -> Duration {
        Duration::from_secs(60)
    }
}
