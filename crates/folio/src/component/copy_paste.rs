//! Cut, copy and paste.

use std::fmt;
use std::sync::Arc;

use folio_core::Signal;
use folio_core::logging::targets;

use super::{Component, finish};
use crate::clipboard::{Clipboard, ClipboardPayload};
use crate::document::{DocumentFragment, EditingContext, markup};

/// Moves selections between the editing context and a [`Clipboard`].
///
/// Copy stages two representations: the plain text and an XHTML rendering
/// that keeps character and paragraph formats. Paste prefers the markup and
/// falls back to plain text when there is none or it does not parse.
/// Clipboard failures are logged and treated as an empty clipboard.
pub struct CopyPasteComponent {
    context: EditingContext,
    clipboard: Arc<dyn Clipboard>,
    /// Emitted after a cut, a copy of a selection, or any paste.
    pub applied: Signal<()>,
}

impl CopyPasteComponent {
    pub fn new(context: EditingContext, clipboard: Arc<dyn Clipboard>) -> Self {
        Self {
            context,
            clipboard,
            applied: Signal::new(),
        }
    }

    pub fn clipboard(&self) -> &Arc<dyn Clipboard> {
        &self.clipboard
    }

    /// Stage the selection and delete it. Does nothing without a selection.
    pub fn cut(&self) -> bool {
        if !self.context.has_selection() {
            tracing::trace!(target: targets::COMPONENT, "cut without selection");
            return false;
        }
        self.stage_selection();
        let removed = self.context.remove_selected_text().is_some();
        finish(&self.applied, removed, "cut")
    }

    /// Stage the selection. Does nothing without a selection.
    pub fn copy(&self) -> bool {
        if !self.context.has_selection() {
            tracing::trace!(target: targets::COMPONENT, "copy without selection");
            return false;
        }
        self.stage_selection();
        finish(&self.applied, true, "copy")
    }

    /// Insert the clipboard contents at the cursor, replacing the selection.
    ///
    /// Rich markup is inserted with its formats; plain text is inserted
    /// unformatted. Always emits `applied`.
    pub fn paste(&self) -> bool {
        let payload = self.read_payload();
        let fragment = match payload.markup.as_deref().map(markup::parse_markup) {
            Some(Ok(fragment)) if !fragment.is_empty() => fragment,
            Some(Ok(_)) => DocumentFragment::from_plain_text(&payload.text),
            Some(Err(err)) => {
                tracing::debug!(target: targets::CLIPBOARD, %err, "markup unreadable, pasting plain text");
                DocumentFragment::from_plain_text(&payload.text)
            }
            None => DocumentFragment::from_plain_text(&payload.text),
        };
        self.insert(&fragment);
        finish(&self.applied, true, "paste")
    }

    /// Insert only the plain text of the clipboard, unformatted.
    pub fn paste_plain(&self) -> bool {
        let payload = self.read_payload();
        self.insert(&DocumentFragment::from_plain_text(&payload.text));
        finish(&self.applied, true, "paste_plain")
    }

    fn insert(&self, fragment: &DocumentFragment) {
        if fragment.to_plain_text().is_empty() && !self.context.has_selection() {
            return;
        }
        self.context.insert_fragment(fragment);
    }

    fn stage_selection(&self) {
        let fragment = self.context.selection_fragment();
        let text = fragment.to_plain_text();
        let payload = match markup::to_markup(&fragment) {
            Ok(markup) => ClipboardPayload::rich(text, markup),
            Err(err) => {
                tracing::warn!(target: targets::CLIPBOARD, %err, "could not render markup, staging plain text");
                ClipboardPayload::plain(text)
            }
        };
        if let Err(err) = self.clipboard.set_payload(&payload) {
            tracing::warn!(target: targets::CLIPBOARD, %err, "could not write clipboard");
        }
    }

    fn read_payload(&self) -> ClipboardPayload {
        self.clipboard.payload().unwrap_or_else(|err| {
            tracing::debug!(target: targets::CLIPBOARD, %err, "clipboard unreadable, pasting nothing");
            ClipboardPayload::default()
        })
    }
}

impl Component for CopyPasteComponent {
    fn applied(&self) -> &Signal<()> {
        &self.applied
    }
}

impl fmt::Debug for CopyPasteComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CopyPasteComponent")
            .field("context", &self.context)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::MemoryClipboard;
    use crate::component::FormatComponent;
    use crate::component::test_support::{counter, selected};
    use crate::document::{CharFormat, MoveMode};

    fn component(context: &EditingContext) -> (CopyPasteComponent, Arc<MemoryClipboard>) {
        let clipboard = Arc::new(MemoryClipboard::new());
        (CopyPasteComponent::new(context.clone(), clipboard.clone()), clipboard)
    }

    #[test]
    fn test_cut_without_selection_is_silent() {
        let context = selected("Hello", 2, 2);
        let (copy_paste, clipboard) = component(&context);
        let applied = counter(&copy_paste.applied);

        assert!(!copy_paste.cut());
        assert!(!copy_paste.copy());
        assert_eq!(context.text(), "Hello");
        assert!(clipboard.payload().is_err());
        assert_eq!(*applied.lock(), 0);
    }

    #[test]
    fn test_cut_removes_selection_and_stages_both() {
        let context = selected("Hello world", 0, 6);
        FormatComponent::new(context.clone()).turn_bold(true);
        let (copy_paste, clipboard) = component(&context);
        let applied = counter(&copy_paste.applied);

        assert!(copy_paste.cut());

        assert_eq!(context.text(), "world");
        let payload = clipboard.payload().unwrap();
        assert_eq!(payload.text, "Hello ");
        assert!(payload.markup.unwrap().contains("font-weight:bold"));
        assert_eq!(*applied.lock(), 1);
    }

    #[test]
    fn test_copy_keeps_text() {
        let context = selected("Hello", 1, 4);
        let (copy_paste, clipboard) = component(&context);

        assert!(copy_paste.copy());
        assert_eq!(context.text(), "Hello");
        assert_eq!(clipboard.payload().unwrap().text, "ell");
    }

    #[test]
    fn test_paste_rich_keeps_formats() {
        let source = selected("bold", 0, 4);
        FormatComponent::new(source.clone()).turn_bold(true);
        let (copy_paste, clipboard) = component(&source);
        copy_paste.copy();

        let target = EditingContext::new();
        let paste = CopyPasteComponent::new(target.clone(), clipboard);
        assert!(paste.paste());

        assert_eq!(target.text(), "bold");
        assert!(target.document().format_at(0).bold);
    }

    #[test]
    fn test_paste_plain_payload_is_unformatted() {
        let context = selected("ab", 0, 2);
        FormatComponent::new(context.clone()).turn_bold(true);
        context.set_position(1, MoveMode::MoveAnchor);
        let clipboard = Arc::new(MemoryClipboard::with_payload(ClipboardPayload::plain("XY")));
        let copy_paste = CopyPasteComponent::new(context.clone(), clipboard);

        assert!(copy_paste.paste());
        assert_eq!(context.text(), "aXYb");
        assert_eq!(context.document().format_at(1), CharFormat::default());
        assert_eq!(context.position(), 3);
    }

    #[test]
    fn test_paste_plain_drops_markup() {
        let context = EditingContext::new();
        let clipboard = Arc::new(MemoryClipboard::with_payload(ClipboardPayload::rich(
            "plain",
            "<p><span style=\"font-weight:bold\">rich</span></p>",
        )));
        let copy_paste = CopyPasteComponent::new(context.clone(), clipboard);

        assert!(copy_paste.paste_plain());
        assert_eq!(context.text(), "plain");
        assert!(!context.document().format_at(0).bold);
    }

    #[test]
    fn test_paste_unparsable_markup_falls_back_to_text() {
        let context = EditingContext::new();
        let clipboard = Arc::new(MemoryClipboard::with_payload(ClipboardPayload::rich(
            "fallback",
            "<p><span>broken</p>",
        )));
        let copy_paste = CopyPasteComponent::new(context.clone(), clipboard);

        copy_paste.paste();
        assert_eq!(context.text(), "fallback");
    }

    #[test]
    fn test_paste_empty_clipboard_still_notifies() {
        let context = selected("keep", 4, 4);
        let (copy_paste, _clipboard) = component(&context);
        let applied = counter(&copy_paste.applied);

        assert!(copy_paste.paste());
        assert_eq!(context.text(), "keep");
        assert!(!context.can_undo());
        assert_eq!(*applied.lock(), 1);
    }

    #[test]
    fn test_paste_multiple_blocks() {
        let context = selected("start", 5, 5);
        let clipboard = Arc::new(MemoryClipboard::with_payload(ClipboardPayload::plain("one\ntwo")));
        let copy_paste = CopyPasteComponent::new(context.clone(), clipboard);

        copy_paste.paste();
        assert_eq!(context.text(), "startone\ntwo");
        assert_eq!(context.block_count(), 2);
        context.set_position(0, MoveMode::MoveAnchor);
        assert!(context.undo());
        assert_eq!(context.text(), "start");
    }
}
