//! Shared editing context: one document, its cursor and its history.
//!
//! Every editable surface (body, header, footer) owns one [`EditingContext`].
//! Components receive a clone of the handle at construction and go through
//! it for every read and mutation, so they never hold cursor state of their
//! own. Each method takes the lock for the duration of the call only;
//! callers must not emit signals while holding a guard from [`read`].
//!
//! [`read`]: EditingContext::read

use std::fmt;
use std::ops::Range;
use std::sync::Arc;

use folio_core::logging::targets;
use parking_lot::RwLock;

use super::cursor::{MoveMode, MoveOperation, SelectionType, TextCursor};
use super::format::{BlockFormat, BlockFormatDelta, CharFormat, CharFormatDelta};
use super::fragment::DocumentFragment;
use super::history::{EditCommand, EditKind, UndoStack};
use super::styled_document::StyledDocument;

/// The state behind an [`EditingContext`].
#[derive(Debug, Clone, Default)]
pub struct EditingState {
    pub document: StyledDocument,
    pub cursor: TextCursor,
    pub history: UndoStack,
}

impl EditingState {
    /// Run an edit, recording it in the history if the document changed.
    fn edit<F>(&mut self, kind: EditKind, apply: F) -> bool
    where
        F: FnOnce(&mut StyledDocument, &mut TextCursor),
    {
        let before = self.document.clone();
        let cursor_before = self.cursor.clone();

        apply(&mut self.document, &mut self.cursor);
        self.cursor.clamp(&self.document);

        if self.document == before {
            return false;
        }

        self.history.push(EditCommand {
            kind,
            before,
            after: self.document.clone(),
            cursor_before,
            cursor_after: self.cursor.clone(),
        });
        true
    }

    /// Replace the selection with `text` in `format`.
    fn insert(&mut self, text: &str, format: CharFormat) -> bool {
        let kind = if self.cursor.has_selection() || text.contains('\n') {
            EditKind::Other
        } else {
            EditKind::Typing
        };
        self.edit(kind, |document, cursor| {
            let range = cursor.selection_range();
            document.delete(range.clone());
            document.insert(range.start, text, format);
            cursor.set_position(document, range.start + text.len(), MoveMode::MoveAnchor);
        })
    }

    /// Merge a char delta into the pending format. Returns `true` if the
    /// format new text gets at the cursor changed.
    fn merge_pending(&mut self, delta: &CharFormatDelta) -> bool {
        if delta.is_empty() {
            return false;
        }
        let current = self.cursor.char_format(&self.document);
        let merged = current.merged(delta);
        let changed = current != merged;
        self.cursor.set_pending_format(merged);
        changed
    }

    /// The format new text gets at the cursor.
    fn insertion_format(&self) -> CharFormat {
        match self.cursor.pending_format() {
            Some(format) => format.clone(),
            None if self.cursor.has_selection() => self.document.format_at(self.cursor.selection_start()),
            None => self.cursor.char_format(&self.document),
        }
    }
}

/// A cheaply clonable handle to one editable surface.
#[derive(Clone, Default)]
pub struct EditingContext {
    state: Arc<RwLock<EditingState>>,
}

impl fmt::Debug for EditingContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.read();
        f.debug_struct("EditingContext")
            .field("len", &state.document.len())
            .field("blocks", &state.document.paragraph_count())
            .field("position", &state.cursor.position())
            .field("anchor", &state.cursor.anchor())
            .finish()
    }
}

impl EditingContext {
    /// Create a context over an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a context over an existing document, cursor at the start.
    pub fn from_document(document: StyledDocument) -> Self {
        Self::with_state(EditingState {
            document,
            ..EditingState::default()
        })
    }

    /// Create a context whose history keeps at most `limit` steps.
    pub fn with_undo_limit(limit: usize) -> Self {
        Self::with_state(EditingState {
            history: UndoStack::with_limit(limit),
            ..EditingState::default()
        })
    }

    fn with_state(state: EditingState) -> Self {
        Self {
            state: Arc::new(RwLock::new(state)),
        }
    }

    /// Check whether two handles point at the same surface.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.state, &other.state)
    }

    /// Read the state under a shared lock.
    pub fn read<R>(&self, f: impl FnOnce(&EditingState) -> R) -> R {
        f(&self.state.read())
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn text(&self) -> String {
        self.state.read().document.text().to_string()
    }

    /// A snapshot of the document.
    pub fn document(&self) -> StyledDocument {
        self.state.read().document.clone()
    }

    /// A snapshot of the cursor.
    pub fn cursor(&self) -> TextCursor {
        self.state.read().cursor.clone()
    }

    pub fn position(&self) -> usize {
        self.state.read().cursor.position()
    }

    pub fn has_selection(&self) -> bool {
        self.state.read().cursor.has_selection()
    }

    pub fn selection_range(&self) -> Range<usize> {
        self.state.read().cursor.selection_range()
    }

    pub fn selected_text(&self) -> String {
        let state = self.state.read();
        state.cursor.selected_text(&state.document).to_string()
    }

    /// Number of blocks in the document.
    pub fn block_count(&self) -> usize {
        self.state.read().document.paragraph_count()
    }

    /// Index of the block under the cursor.
    pub fn block_number(&self) -> usize {
        let state = self.state.read();
        state.cursor.block_number(&state.document)
    }

    /// Grapheme column of the cursor in its block.
    pub fn column(&self) -> usize {
        let state = self.state.read();
        state.cursor.column(&state.document)
    }

    /// The char format at the cursor (see [`TextCursor::char_format`]).
    pub fn char_format(&self) -> CharFormat {
        let state = self.state.read();
        state.cursor.char_format(&state.document)
    }

    /// The block format of the block under the cursor.
    pub fn block_format(&self) -> BlockFormat {
        let state = self.state.read();
        state
            .document
            .block_format_at(state.cursor.block_number(&state.document))
    }

    /// The selection as a formatted fragment.
    pub fn selection_fragment(&self) -> DocumentFragment {
        let state = self.state.read();
        state.document.fragment(state.cursor.selection_range())
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    pub fn move_position(&self, operation: MoveOperation, mode: MoveMode, count: usize) -> bool {
        let mut state = self.state.write();
        let EditingState {
            document, cursor, ..
        } = &mut *state;
        cursor.move_position(document, operation, mode, count)
    }

    pub fn set_position(&self, position: usize, mode: MoveMode) {
        let mut state = self.state.write();
        let EditingState {
            document, cursor, ..
        } = &mut *state;
        cursor.set_position(document, position, mode);
    }

    pub fn select(&self, selection: SelectionType) {
        let mut state = self.state.write();
        let EditingState {
            document, cursor, ..
        } = &mut *state;
        cursor.select(document, selection);
    }

    pub fn clear_selection(&self) {
        self.state.write().cursor.clear_selection();
    }

    // =========================================================================
    // Formatting
    // =========================================================================

    /// Merge a char format delta at the cursor.
    ///
    /// With a selection the delta is merged onto the selected text as one
    /// undo step. Without one it is merged into the cursor's pending format
    /// for the next insertion. Returns `true` if anything changed.
    pub fn merge_char_format(&self, delta: &CharFormatDelta) -> bool {
        if delta.is_empty() {
            return false;
        }
        let mut state = self.state.write();

        if state.cursor.has_selection() {
            let range = state.cursor.selection_range();
            let changed = state.edit(EditKind::Other, |document, _| {
                document.merge_format(range, delta);
            });
            tracing::trace!(target: targets::DOCUMENT, changed, "merged char format onto selection");
            return changed;
        }

        let changed = state.merge_pending(delta);
        tracing::trace!(target: targets::DOCUMENT, changed, "merged char format into pending format");
        changed
    }

    /// Merge a block format delta onto every block the selection touches
    /// (or the block under the cursor). Returns `true` if anything changed.
    pub fn merge_block_format(&self, delta: &BlockFormatDelta) -> bool {
        if delta.is_empty() {
            return false;
        }
        let mut state = self.state.write();
        let blocks = state.cursor.block_range(&state.document);
        let changed = state.edit(EditKind::Other, |document, _| {
            document.merge_block_format(blocks.clone(), delta);
        });
        tracing::trace!(target: targets::DOCUMENT, ?blocks, changed, "merged block format");
        changed
    }

    /// Merge a char delta and a block delta as one step.
    ///
    /// The char delta goes where [`merge_char_format`] puts it, the block
    /// delta onto the blocks the selection touches. With a selection both
    /// land in a single undo step.
    ///
    /// [`merge_char_format`]: Self::merge_char_format
    pub fn merge_formats(&self, char_delta: &CharFormatDelta, block_delta: &BlockFormatDelta) -> bool {
        let mut state = self.state.write();
        let blocks = state.cursor.block_range(&state.document);
        let selection = state.cursor.has_selection().then(|| state.cursor.selection_range());

        let edited = state.edit(EditKind::Other, |document, _| {
            if let Some(range) = &selection {
                document.merge_format(range.clone(), char_delta);
            }
            document.merge_block_format(blocks, block_delta);
        });
        let pending = selection.is_none() && state.merge_pending(char_delta);
        tracing::trace!(target: targets::DOCUMENT, edited, pending, "merged char and block formats");
        edited || pending
    }

    /// Merge a paragraph style: `char_delta` onto the whole text of every
    /// block the selection touches and `block_delta` onto those blocks, as
    /// one undo step. Without a selection the char delta also becomes the
    /// pending format, so text typed into an empty paragraph takes it.
    pub fn merge_paragraph_format(&self, char_delta: &CharFormatDelta, block_delta: &BlockFormatDelta) -> bool {
        let mut state = self.state.write();
        let blocks = state.cursor.block_range(&state.document);
        let has_selection = state.cursor.has_selection();

        let edited = state.edit(EditKind::Other, |document, _| {
            let start = document.paragraph_range(blocks.start).map(|range| range.start);
            let end = document
                .paragraph_content_range(blocks.end.saturating_sub(1))
                .map(|range| range.end);
            if let (Some(start), Some(end)) = (start, end) {
                document.merge_format(start..end, char_delta);
            }
            document.merge_block_format(blocks, block_delta);
        });
        let pending = !has_selection && state.merge_pending(char_delta);
        tracing::trace!(target: targets::DOCUMENT, edited, pending, "merged paragraph format");
        edited || pending
    }

    // =========================================================================
    // Editing
    // =========================================================================

    /// Insert text at the cursor, replacing the selection.
    ///
    /// The text takes the pending format, or the format the cursor continues.
    pub fn insert_text(&self, text: &str) -> bool {
        if text.is_empty() && !self.has_selection() {
            return false;
        }
        let mut state = self.state.write();
        let format = state.insertion_format();
        state.insert(text, format)
    }

    /// Insert text with an explicit format, replacing the selection.
    pub fn insert_text_with_format(&self, text: &str, format: CharFormat) -> bool {
        let mut state = self.state.write();
        state.insert(text, format)
    }

    /// Insert a fragment at the cursor, replacing the selection.
    pub fn insert_fragment(&self, fragment: &DocumentFragment) -> bool {
        let mut state = self.state.write();
        state.edit(EditKind::Other, |document, cursor| {
            let range = cursor.selection_range();
            document.delete(range.clone());
            let end = document.insert_fragment(range.start, fragment);
            cursor.set_position(document, end, MoveMode::MoveAnchor);
        })
    }

    /// Split the block at the cursor, leaving the cursor in the new block.
    pub fn insert_block(&self) -> bool {
        let mut state = self.state.write();
        let format = state.insertion_format();
        state.edit(EditKind::Other, |document, cursor| {
            let range = cursor.selection_range();
            document.delete(range.clone());
            document.insert(range.start, "\n", format);
            cursor.set_position(document, range.start + 1, MoveMode::MoveAnchor);
        })
    }

    /// Delete the selection, returning the removed text.
    pub fn remove_selected_text(&self) -> Option<String> {
        let mut state = self.state.write();
        if !state.cursor.has_selection() {
            return None;
        }
        let mut removed = String::new();
        state.edit(EditKind::Other, |document, cursor| {
            let range = cursor.selection_range();
            removed = document.delete(range.clone());
            cursor.set_position(document, range.start, MoveMode::MoveAnchor);
        });
        Some(removed)
    }

    /// Delete the selection, or the grapheme before the cursor.
    pub fn delete_previous_char(&self) -> bool {
        if self.has_selection() {
            return self.remove_selected_text().is_some();
        }
        let mut state = self.state.write();
        state.edit(EditKind::Other, |document, cursor| {
            let end = cursor.position();
            if cursor.move_position(document, MoveOperation::PreviousCharacter, MoveMode::MoveAnchor, 1) {
                document.delete(cursor.position()..end);
            }
        })
    }

    /// Delete the selection, or the grapheme after the cursor.
    pub fn delete_char(&self) -> bool {
        if self.has_selection() {
            return self.remove_selected_text().is_some();
        }
        let mut state = self.state.write();
        state.edit(EditKind::Other, |document, cursor| {
            let start = cursor.position();
            let mut probe = cursor.clone();
            if probe.move_position(document, MoveOperation::NextCharacter, MoveMode::MoveAnchor, 1) {
                document.delete(start..probe.position());
            }
        })
    }

    /// Replace the whole document with plain text, clearing history.
    pub fn set_text(&self, text: &str) {
        let mut state = self.state.write();
        state.document.set_text(text);
        state.cursor = TextCursor::new();
        state.history.clear();
    }

    // =========================================================================
    // History
    // =========================================================================

    pub fn can_undo(&self) -> bool {
        self.state.read().history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.state.read().history.can_redo()
    }

    /// Revert the last step. Returns `false` when there is nothing to undo.
    pub fn undo(&self) -> bool {
        let mut state = self.state.write();
        let Some(command) = state.history.undo().cloned() else {
            return false;
        };
        state.document = command.before;
        state.cursor = command.cursor_before;
        true
    }

    /// Reapply the last undone step. Returns `false` when there is nothing
    /// to redo.
    pub fn redo(&self) -> bool {
        let mut state = self.state.write();
        let Some(command) = state.history.redo().cloned() else {
            return false;
        };
        state.document = command.after;
        state.cursor = command.cursor_after;
        true
    }

    /// Stop the next edit from coalescing with the previous one.
    pub fn break_undo_merge(&self) {
        self.state.write().history.break_merge();
    }

    /// Forget every undo and redo step. Steps recorded before a structural
    /// edit would restore a document that no longer matches its owner.
    pub fn clear_history(&self) {
        self.state.write().history.clear();
    }
}
