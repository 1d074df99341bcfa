//! Clipboard access for copy/paste.
//!
//! [`Clipboard`] is the seam the copy/paste component talks to. Two backends
//! ship with the crate:
//!
//! - [`SystemClipboard`]: a thin wrapper around the `arboard` crate that
//!   stages rich markup as HTML with a plain text alternative
//! - [`MemoryClipboard`]: an in-process clipboard for tests and for hosts
//!   without a display
//!
//! # Example
//!
//! ```
//! use folio::clipboard::{Clipboard, ClipboardPayload, MemoryClipboard};
//!
//! let clipboard = MemoryClipboard::new();
//! clipboard.set_payload(&ClipboardPayload::plain("Hello")).unwrap();
//! assert_eq!(clipboard.payload().unwrap().text, "Hello");
//! ```
//!
//! # Platform Notes
//!
//! - **Windows**: Uses the Win32 clipboard API
//! - **macOS**: Uses NSPasteboard
//! - **Linux**: Uses X11 selections or Wayland data-control protocol

use std::fmt;
use std::sync::Arc;

use folio_core::logging::targets;
use parking_lot::Mutex;

use crate::error::{Error, Result};

/// What copy stages and paste reads: plain text plus optional rich markup.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClipboardPayload {
    /// Plain text rendering, always present.
    pub text: String,
    /// XHTML markup, when the source was rich text.
    pub markup: Option<String>,
}

impl ClipboardPayload {
    /// A payload with text only.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            markup: None,
        }
    }

    /// A payload with both representations.
    pub fn rich(text: impl Into<String>, markup: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            markup: Some(markup.into()),
        }
    }
}

/// A clipboard the copy/paste component can stage to and read from.
pub trait Clipboard: Send + Sync {
    /// Replace the clipboard contents.
    fn set_payload(&self, payload: &ClipboardPayload) -> Result<()>;

    /// Read the clipboard contents.
    ///
    /// Fails when the clipboard is empty, holds no text, or cannot be
    /// reached.
    fn payload(&self) -> Result<ClipboardPayload>;
}

/// The system clipboard.
///
/// While `SystemClipboard` is `Send + Sync`, it's recommended to perform
/// clipboard operations on the main/UI thread for best compatibility across
/// platforms.
pub struct SystemClipboard {
    inner: Mutex<arboard::Clipboard>,
}

impl SystemClipboard {
    /// Open the system clipboard.
    ///
    /// # Errors
    ///
    /// Returns an error if the clipboard cannot be accessed, which can happen
    /// if the system clipboard is unavailable or there is no display.
    pub fn new() -> Result<Self> {
        Ok(Self {
            inner: Mutex::new(arboard::Clipboard::new()?),
        })
    }
}

impl Clipboard for SystemClipboard {
    fn set_payload(&self, payload: &ClipboardPayload) -> Result<()> {
        let mut inner = self.inner.lock();
        match &payload.markup {
            Some(markup) => inner.set_html(markup.as_str(), Some(payload.text.as_str()))?,
            None => inner.set_text(payload.text.as_str())?,
        }
        Ok(())
    }

    fn payload(&self) -> Result<ClipboardPayload> {
        let mut inner = self.inner.lock();
        let text = inner.get_text()?;
        let markup = inner.get().html().ok();
        Ok(ClipboardPayload { text, markup })
    }
}

impl fmt::Debug for SystemClipboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SystemClipboard").finish_non_exhaustive()
    }
}

/// An in-process clipboard.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    payload: Mutex<Option<ClipboardPayload>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a clipboard already holding `payload`.
    pub fn with_payload(payload: ClipboardPayload) -> Self {
        Self {
            payload: Mutex::new(Some(payload)),
        }
    }

    /// Empty the clipboard.
    pub fn clear(&self) {
        *self.payload.lock() = None;
    }
}

impl Clipboard for MemoryClipboard {
    fn set_payload(&self, payload: &ClipboardPayload) -> Result<()> {
        *self.payload.lock() = Some(payload.clone());
        Ok(())
    }

    fn payload(&self) -> Result<ClipboardPayload> {
        self.payload
            .lock()
            .clone()
            .ok_or_else(|| Error::clipboard("clipboard is empty"))
    }
}

/// Open the system clipboard, falling back to an in-process one when it is
/// unavailable.
pub fn default_clipboard() -> Arc<dyn Clipboard> {
    match SystemClipboard::new() {
        Ok(clipboard) => Arc::new(clipboard),
        Err(err) => {
            tracing::warn!(target: targets::CLIPBOARD, %err, "system clipboard unavailable, using in-process clipboard");
            Arc::new(MemoryClipboard::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_clipboard() {
        let clipboard = MemoryClipboard::new();
        assert!(matches!(clipboard.payload(), Err(Error::Clipboard(_))));

        let payload = ClipboardPayload::rich("Hi", "<p>Hi</p>");
        clipboard.set_payload(&payload).unwrap();
        assert_eq!(clipboard.payload().unwrap(), payload);

        clipboard.clear();
        assert!(clipboard.payload().is_err());
    }

    #[test]
    fn test_default_clipboard_always_available() {
        // Falls back to memory in environments without a display.
        let clipboard = default_clipboard();
        let _ = clipboard.payload();
    }
}
