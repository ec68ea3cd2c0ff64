//! Caption lifecycle controller.
//!
//! Owns the observable session state (lifecycle, preview, copy flag) and
//! drives one caption request at a time: validate the upload, enter loading,
//! run preview encoding and the provider call concurrently, classify the
//! outcome. Presentation layers observe `Snapshot`s and forward `Intent`s;
//! they never mutate state themselves.

use crate::clipboard::{ClipboardBackend, SystemClipboard};
use crate::config::Config;
use crate::error::CaptionError;
use crate::preview;
use crate::provider::{CaptionProvider, HuggingFaceProvider};
use crate::types::{Caption, Intent, LifecycleState, PreviewImage, Snapshot, UploadCandidate};
use crate::validate::Validator;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// Fixed demonstration caption shown when the credential is missing, so the
/// feature stays showable without live provider access.
pub const FALLBACK_CAPTION: &str =
    "Demo: A beautiful landscape with mountains and clear blue sky reflecting in a calm lake.";

/// Tunables for the controller.
#[derive(Debug, Clone)]
pub struct ControllerOptions {
    /// How long the copied acknowledgement stays set after a clipboard write
    pub copy_ack_window: Duration,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            copy_ack_window: Duration::from_millis(2000),
        }
    }
}

/// Mutable session state. The controller is the sole mutator; the mutex
/// serializes transitions and is never held across an await point.
struct Session {
    lifecycle: LifecycleState,
    preview: Option<PreviewImage>,
    copied: bool,
    /// Advances on every submission and reset; async completions compare
    /// their captured value and discard themselves when stale
    generation: u64,
    /// Advances on every successful copy so only the latest revert timer
    /// clears the acknowledgement (a second copy restarts the window)
    copy_epoch: u64,
}

impl Session {
    fn new() -> Self {
        Self {
            lifecycle: LifecycleState::Idle,
            preview: None,
            copied: false,
            generation: 0,
            copy_epoch: 0,
        }
    }
}

struct Inner {
    provider: Arc<dyn CaptionProvider>,
    clipboard: Arc<dyn ClipboardBackend>,
    validator: Validator,
    options: ControllerOptions,
    session: Mutex<Session>,
}

impl Inner {
    fn lock_session(&self) -> MutexGuard<'_, Session> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Orchestrates the caption request lifecycle for one session.
///
/// Cheap to clone; clones share the same session state, so a presentation
/// layer can hand copies to event handlers freely.
#[derive(Clone)]
pub struct CaptionController {
    inner: Arc<Inner>,
}

impl CaptionController {
    pub fn new(
        provider: Arc<dyn CaptionProvider>,
        clipboard: Arc<dyn ClipboardBackend>,
        validator: Validator,
        options: ControllerOptions,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                provider,
                clipboard,
                validator,
                options,
                session: Mutex::new(Session::new()),
            }),
        }
    }

    /// Build a controller wired to the Hugging Face provider and the system
    /// clipboard, per the given configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            Arc::new(HuggingFaceProvider::from_config(&config.provider)),
            Arc::new(SystemClipboard),
            Validator::new(config.limits.clone()),
            ControllerOptions::default(),
        )
    }

    /// Dispatch a presentation-layer intent.
    pub async fn handle(&self, intent: Intent) {
        match intent {
            Intent::FileSelected(candidate) => self.submit_file(candidate).await,
            Intent::FilesDropped(candidates) => {
                if let Some(first) = candidates.into_iter().next() {
                    self.submit_file(first).await;
                }
            }
            Intent::CopyRequested => self.copy_caption(),
            Intent::ResetRequested => self.reset(),
        }
    }

    /// Submit a file for captioning.
    ///
    /// Rejected candidates go straight to the error state; loading is never
    /// entered. Accepted candidates supersede any request still in flight:
    /// the generation advances and stale completions discard themselves.
    pub async fn submit_file(&self, candidate: UploadCandidate) {
        let generation = {
            let mut session = self.inner.lock_session();
            session.generation += 1;
            if let Err(e) = self.inner.validator.validate(&candidate) {
                tracing::debug!("Upload rejected: {e}");
                session.lifecycle = LifecycleState::Error {
                    message: e.to_string(),
                    fallback: None,
                };
                return;
            }
            session.preview = None;
            session.lifecycle = LifecycleState::Loading;
            session.generation
        };

        tracing::debug!(
            "Submitting {} byte upload ({}) to {}",
            candidate.size_bytes(),
            candidate.mime_type,
            self.inner.provider.name()
        );

        // Preview encoding runs concurrently with the provider call and
        // populates the preview slot on its own schedule; neither completion
        // waits for or orders against the other.
        let encode_inner = Arc::clone(&self.inner);
        let encode_candidate = candidate.clone();
        tokio::spawn(async move {
            if let Some(preview) = preview::encode(&encode_candidate).await {
                let mut session = encode_inner.lock_session();
                if session.generation == generation {
                    session.preview = Some(preview);
                }
            }
        });

        let result = self.inner.provider.request_caption(&candidate).await;

        let mut session = self.inner.lock_session();
        if session.generation != generation {
            tracing::debug!("Discarding superseded caption result");
            return;
        }
        session.lifecycle = match result {
            Ok(caption) => LifecycleState::Success(caption),
            Err(e @ CaptionError::MissingCredential) => LifecycleState::Error {
                message: e.to_string(),
                fallback: Some(Caption::new(FALLBACK_CAPTION)),
            },
            Err(e) => {
                tracing::warn!("Caption request failed: {e}");
                LifecycleState::Error {
                    message: e.to_string(),
                    fallback: None,
                }
            }
        };
    }

    /// Copy the current caption slot to the clipboard.
    ///
    /// No-op when the slot is empty. On success the copied flag is set and a
    /// single revert timer is scheduled; a second copy within the window
    /// restarts it. Clipboard failures are logged and never reach the
    /// lifecycle state.
    ///
    /// Must be called from within a tokio runtime (spawns the revert timer).
    pub fn copy_caption(&self) {
        let text = {
            let session = self.inner.lock_session();
            session.lifecycle.caption_text().map(String::from)
        };
        let Some(text) = text else {
            return;
        };

        if let Err(e) = self.inner.clipboard.set_text(&text) {
            tracing::warn!("Failed to copy caption to clipboard: {e}");
            return;
        }

        let epoch = {
            let mut session = self.inner.lock_session();
            session.copied = true;
            session.copy_epoch += 1;
            session.copy_epoch
        };

        let revert_inner = Arc::clone(&self.inner);
        let window = self.inner.options.copy_ack_window;
        tokio::spawn(async move {
            tokio::time::sleep(window).await;
            let mut session = revert_inner.lock_session();
            if session.copy_epoch == epoch {
                session.copied = false;
            }
        });
    }

    /// Return to idle from any state, clearing preview, caption, error, and
    /// the copy acknowledgement. In-flight completions become stale.
    pub fn reset(&self) {
        let mut session = self.inner.lock_session();
        session.generation += 1;
        session.copy_epoch += 1;
        session.lifecycle = LifecycleState::Idle;
        session.preview = None;
        session.copied = false;
        tracing::debug!("Session reset");
    }

    /// Read-only observation of the current state for presentation.
    pub fn snapshot(&self) -> Snapshot {
        let session = self.inner.lock_session();
        Snapshot {
            lifecycle: session.lifecycle.clone(),
            preview: session.preview.clone(),
            caption: session.lifecycle.caption_text().map(String::from),
            copied: session.copied,
        }
    }
}
