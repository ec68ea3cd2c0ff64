//! Core data model: upload candidates, previews, captions, lifecycle state.

/// A user-supplied file awaiting validation.
///
/// Ephemeral: created on file selection, discarded once encoded or rejected.
#[derive(Debug, Clone)]
pub struct UploadCandidate {
    /// MIME type reported for the file (e.g., "image/jpeg")
    pub mime_type: String,
    /// Raw file contents
    pub bytes: Vec<u8>,
}

impl UploadCandidate {
    pub fn new(mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// Size of the raw file in bytes.
    pub fn size_bytes(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// A base64 `data:` URI rendition of an upload, suitable for direct display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewImage(pub(crate) String);

impl PreviewImage {
    /// The data URI as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the preview, yielding the data URI.
    pub fn into_inner(self) -> String {
        self.0
    }
}

/// A generated image description from the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caption {
    pub text: String,
}

impl Caption {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// The single authoritative status of the current caption request.
///
/// Exactly one variant holds at any time; transitions are driven only by
/// controller operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleState {
    /// No request active
    Idle,
    /// Validation passed, provider call in flight
    Loading,
    /// Provider returned a caption
    Success(Caption),
    /// Request failed; `fallback` is populated only for credential failures
    /// so the feature remains showable without live configuration
    Error {
        message: String,
        fallback: Option<Caption>,
    },
}

impl LifecycleState {
    pub fn is_idle(&self) -> bool {
        matches!(self, LifecycleState::Idle)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LifecycleState::Loading)
    }

    /// The text currently occupying the caption slot, if any.
    ///
    /// Filled by a successful request, or by the demonstration fallback when
    /// the credential is missing. Empty in every other state.
    pub fn caption_text(&self) -> Option<&str> {
        match self {
            LifecycleState::Success(caption) => Some(&caption.text),
            LifecycleState::Error {
                fallback: Some(caption),
                ..
            } => Some(&caption.text),
            _ => None,
        }
    }
}

/// Read-only observation of the controller state for a presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub lifecycle: LifecycleState,
    pub preview: Option<PreviewImage>,
    /// Current caption slot contents (success text or credential fallback)
    pub caption: Option<String>,
    /// True for a fixed window after a successful clipboard copy
    pub copied: bool,
}

/// User intents forwarded by the presentation layer.
#[derive(Debug, Clone)]
pub enum Intent {
    FileSelected(UploadCandidate),
    /// Dropped file set; only the first candidate is submitted
    FilesDropped(Vec<UploadCandidate>),
    CopyRequested,
    ResetRequested,
}
