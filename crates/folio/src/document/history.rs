//! Undo/redo history for an editing context.
//!
//! Each command stores the document before and after one edit together with
//! the cursor on either side, so undo and redo restore formatting as well as
//! text. Consecutive typed insertions coalesce into a single step.

use super::cursor::TextCursor;
use super::styled_document::StyledDocument;

/// Default number of steps kept.
pub const DEFAULT_UNDO_LIMIT: usize = 100;

/// The kind of edit a command records, used for coalescing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKind {
    /// A typed insertion without newlines.
    Typing,
    /// Anything else: deletions, formatting, pastes, block insertions.
    Other,
}

/// One undoable edit.
#[derive(Debug, Clone, PartialEq)]
pub struct EditCommand {
    pub kind: EditKind,
    pub before: StyledDocument,
    pub after: StyledDocument,
    pub cursor_before: TextCursor,
    pub cursor_after: TextCursor,
}

impl EditCommand {
    /// Try to merge another command into this one for coalescing.
    ///
    /// Typing merges when the new insertion starts where this one left the
    /// cursor.
    fn try_merge(&mut self, other: &EditCommand) -> bool {
        if self.kind != EditKind::Typing || other.kind != EditKind::Typing {
            return false;
        }
        if self.after != other.before
            || self.cursor_after.position() != other.cursor_before.position()
        {
            return false;
        }
        self.after = other.after.clone();
        self.cursor_after = other.cursor_after.clone();
        true
    }
}

/// Manages undo/redo history.
#[derive(Debug, Clone)]
pub struct UndoStack {
    /// Stack of edit commands.
    commands: Vec<EditCommand>,
    /// Current position in the stack.
    index: usize,
    /// Maximum stack size.
    max_size: usize,
    /// Whether command merging is enabled.
    merge_enabled: bool,
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::new()
    }
}

impl UndoStack {
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_UNDO_LIMIT)
    }

    /// Create a stack keeping at most `max_size` steps (at least one).
    pub fn with_limit(max_size: usize) -> Self {
        Self {
            commands: Vec::new(),
            index: 0,
            max_size: max_size.max(1),
            merge_enabled: true,
        }
    }

    pub fn push(&mut self, command: EditCommand) {
        // Remove any commands after current position
        self.commands.truncate(self.index);

        if self.merge_enabled
            && let Some(last) = self.commands.last_mut()
            && last.try_merge(&command)
        {
            return;
        }
        self.merge_enabled = true;

        self.commands.push(command);

        if self.commands.len() > self.max_size {
            let excess = self.commands.len() - self.max_size;
            self.commands.drain(..excess);
        }
        self.index = self.commands.len();
    }

    /// Step back, returning the command to revert.
    pub fn undo(&mut self) -> Option<&EditCommand> {
        if self.index > 0 {
            self.index -= 1;
            // The next typed character must not extend an undone step.
            self.merge_enabled = false;
            self.commands.get(self.index)
        } else {
            None
        }
    }

    /// Step forward, returning the command to reapply.
    pub fn redo(&mut self) -> Option<&EditCommand> {
        if self.index < self.commands.len() {
            self.index += 1;
            self.merge_enabled = false;
            self.commands.get(self.index - 1)
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        self.commands.clear();
        self.index = 0;
    }

    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.index < self.commands.len()
    }

    /// Number of undoable steps.
    pub fn undo_count(&self) -> usize {
        self.index
    }

    /// Stop the next command from merging into the previous one.
    pub fn break_merge(&mut self) {
        self.merge_enabled = false;
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::format::CharFormat;

    fn typed(before: &StyledDocument, pos: usize, text: &str) -> (EditCommand, StyledDocument) {
        let mut after = before.clone();
        after.insert(pos, text, CharFormat::default());
        let command = EditCommand {
            kind: EditKind::Typing,
            before: before.clone(),
            after: after.clone(),
            cursor_before: TextCursor::at(before, pos),
            cursor_after: TextCursor::at(&after, pos + text.len()),
        };
        (command, after)
    }

    #[test]
    fn test_typing_coalesces() {
        let mut stack = UndoStack::new();
        let doc = StyledDocument::new();
        let (first, doc) = typed(&doc, 0, "a");
        let (second, doc) = typed(&doc, 1, "b");
        stack.push(first);
        stack.push(second);

        assert_eq!(stack.undo_count(), 1);
        let command = stack.undo().unwrap();
        assert_eq!(command.before.text(), "");
        assert_eq!(command.after.text(), doc.text());
    }

    #[test]
    fn test_break_merge() {
        let mut stack = UndoStack::new();
        let doc = StyledDocument::new();
        let (first, doc) = typed(&doc, 0, "a");
        let (second, _) = typed(&doc, 1, "b");
        stack.push(first);
        stack.break_merge();
        stack.push(second);

        assert_eq!(stack.undo_count(), 2);
    }

    #[test]
    fn test_undo_redo_walk() {
        let mut stack = UndoStack::new();
        assert!(!stack.can_undo());
        assert!(stack.undo().is_none());

        let doc = StyledDocument::new();
        let (first, _) = typed(&doc, 0, "a");
        stack.push(first);

        assert!(stack.can_undo());
        assert!(stack.undo().is_some());
        assert!(!stack.can_undo());
        assert!(stack.can_redo());
        assert!(stack.redo().is_some());
        assert!(!stack.can_redo());
    }

    #[test]
    fn test_limit_drops_oldest() {
        let mut stack = UndoStack::with_limit(2);
        let mut doc = StyledDocument::new();
        for i in 0..4 {
            let (command, next) = typed(&doc, i, "x");
            stack.push(command);
            stack.break_merge();
            doc = next;
        }

        assert_eq!(stack.undo_count(), 2);
        assert_eq!(stack.undo().unwrap().before.text(), "xxx");
        assert_eq!(stack.undo().unwrap().before.text(), "xx");
        assert!(stack.undo().is_none());
    }

    #[test]
    fn test_push_after_undo_discards_redo() {
        let mut stack = UndoStack::new();
        let doc = StyledDocument::new();
        let (first, _) = typed(&doc, 0, "a");
        let (other, _) = typed(&doc, 0, "b");
        stack.push(first);
        stack.undo();
        stack.push(other);

        assert!(!stack.can_redo());
        assert_eq!(stack.undo_count(), 1);
    }
}
