//! Undo and redo.

use folio_core::Signal;

use super::{Component, finish};
use crate::document::EditingContext;

/// Steps through the editing context's history.
pub struct HistoryComponent {
    context: EditingContext,
    /// Emitted after a step was undone or redone.
    pub applied: Signal<()>,
}

impl HistoryComponent {
    pub fn new(context: EditingContext) -> Self {
        Self {
            context,
            applied: Signal::new(),
        }
    }

    /// Revert the last step. Does nothing when the history is empty.
    pub fn undo(&self) -> bool {
        let changed = self.context.undo();
        finish(&self.applied, changed, "undo")
    }

    /// Reapply the last undone step. Does nothing when there is none.
    pub fn redo(&self) -> bool {
        let changed = self.context.redo();
        finish(&self.applied, changed, "redo")
    }

    pub fn can_undo(&self) -> bool {
        self.context.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.context.can_redo()
    }
}

impl Component for HistoryComponent {
    fn applied(&self) -> &Signal<()> {
        &self.applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::FormatComponent;
    use crate::component::test_support::{counter, selected};

    #[test]
    fn test_empty_history_is_silent() {
        let history = HistoryComponent::new(EditingContext::new());
        let applied = counter(&history.applied);

        assert!(!history.can_undo());
        assert!(!history.undo());
        assert!(!history.redo());
        assert_eq!(*applied.lock(), 0);
    }

    #[test]
    fn test_undo_redo_format_change() {
        let context = selected("Hello", 0, 5);
        let format = FormatComponent::new(context.clone());
        let history = HistoryComponent::new(context.clone());
        let applied = counter(&history.applied);

        format.turn_bold(true);
        assert!(history.can_undo());

        assert!(history.undo());
        assert!(!context.document().format_at(0).bold);
        assert_eq!(context.selection_range(), 0..5);
        assert!(history.can_redo());

        assert!(history.redo());
        assert!(context.document().format_at(0).bold);
        assert!(!history.can_redo());
        assert_eq!(*applied.lock(), 2);
    }

    #[test]
    fn test_typing_coalesces() {
        let context = EditingContext::new();
        let history = HistoryComponent::new(context.clone());

        for ch in ["H", "i", "!"] {
            context.insert_text(ch);
        }
        assert!(history.undo());
        assert_eq!(context.text(), "");
        assert!(!history.can_undo());
    }
}
