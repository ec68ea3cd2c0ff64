//! Caption provider integration.
//!
//! Provides an object-safe provider trait (so controllers can hold
//! `Arc<dyn CaptionProvider>` and tests can substitute mocks) plus the
//! Hugging Face Inference API implementation used by the reference setup.

pub(crate) mod huggingface;

use crate::error::CaptionError;
use crate::types::{Caption, UploadCandidate};
use async_trait::async_trait;
use std::time::Duration;

pub use huggingface::{extract_caption, CaptionRecord, HuggingFaceProvider, PLACEHOLDER_API_KEY};

/// Trait implemented by captioning backends.
///
/// Uses `async_trait` because native async fn in trait is not object-safe
/// (we need `Arc<dyn CaptionProvider>` for dynamic dispatch).
#[async_trait]
pub trait CaptionProvider: Send + Sync {
    /// Provider name for logging (e.g., "huggingface").
    fn name(&self) -> &str;

    /// Issue exactly one captioning request for the candidate.
    ///
    /// No retries and no caching; repeated calls are independent.
    async fn request_caption(&self, candidate: &UploadCandidate) -> Result<Caption, CaptionError>;

    /// Per-request timeout for this provider.
    fn timeout(&self) -> Duration;
}
