//! Clipboard export behind an injectable backend trait.

use crate::error::CaptionError;

/// Destination for caption text copies.
///
/// A trait seam so the controller can be tested with a recording fake; the
/// production implementation talks to the system clipboard.
pub trait ClipboardBackend: Send + Sync {
    fn set_text(&self, text: &str) -> Result<(), CaptionError>;
}

/// System clipboard via `arboard`.
///
/// The handle is constructed per call: `arboard::Clipboard` is not `Sync` and
/// copies are rare enough that reconstruction cost does not matter.
pub struct SystemClipboard;

impl ClipboardBackend for SystemClipboard {
    fn set_text(&self, text: &str) -> Result<(), CaptionError> {
        let mut clipboard =
            arboard::Clipboard::new().map_err(|e| CaptionError::Clipboard(e.to_string()))?;
        clipboard
            .set_text(text)
            .map_err(|e| CaptionError::Clipboard(e.to_string()))
    }
}
