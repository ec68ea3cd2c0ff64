//! Glimpse - Caption request lifecycle core for AI-powered image captioning.
//!
//! Glimpse takes a user-supplied image file and drives one asynchronous
//! request to an external vision-to-text provider, exposing a small finite
//! state that any presentation layer (GUI, web view, TUI) can render.
//!
//! # Architecture
//!
//! ```text
//! Intent → Validate → { Preview encode ∥ Provider call } → State update → Snapshot
//! ```
//!
//! The [`CaptionController`] owns the observable state and is the sole
//! mutator; presentation layers forward [`Intent`]s into it and observe
//! [`Snapshot`]s back. Validation, preview encoding, the provider client,
//! and clipboard export are independent leaves underneath it.
//!
//! # Usage
//!
//! ```rust,ignore
//! use glimpse::{CaptionController, Config, Intent, UploadCandidate};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = Config::load().unwrap_or_default();
//!     let controller = CaptionController::from_config(&config);
//!
//!     let bytes = std::fs::read("photo.jpg").unwrap();
//!     let candidate = UploadCandidate::new("image/jpeg", bytes);
//!     controller.handle(Intent::FileSelected(candidate)).await;
//!
//!     println!("{:?}", controller.snapshot().lifecycle);
//! }
//! ```

// Module declarations
pub mod clipboard;
pub mod config;
pub mod controller;
pub mod error;
pub mod preview;
pub mod provider;
pub mod types;
pub mod validate;

// Re-exports for convenient access
pub use clipboard::{ClipboardBackend, SystemClipboard};
pub use config::{Config, LimitsConfig, ProviderConfig};
pub use controller::{CaptionController, ControllerOptions, FALLBACK_CAPTION};
pub use error::{CaptionError, ConfigError, Result};
pub use provider::{CaptionProvider, HuggingFaceProvider};
pub use types::{Caption, Intent, LifecycleState, PreviewImage, Snapshot, UploadCandidate};
pub use validate::Validator;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_controller_from_default_config() {
        let config = Config::default();
        let controller = CaptionController::from_config(&config);
        assert!(controller.snapshot().lifecycle.is_idle());
    }
}
