//! Header and footer pages.

use folio_core::logging::targets;
use folio_core::{Property, Signal};

use super::{Component, finish};
use crate::document::{EditingContext, MoveMode, MoveOperation};

/// Keeps one block of a header or footer document per page.
///
/// Adding a page appends a block at the end of the document; removing one
/// deletes the trailing block. The page count only ever moves by the number
/// of blocks actually inserted or deleted, so it stays in step with the
/// document. Page edits are not undoable: each one clears the surface's undo
/// history, since an older snapshot would bring back a different number of
/// blocks.
pub struct PageComponent {
    context: EditingContext,
    page_count: Property<usize>,
    first_page_included: Property<bool>,
    /// Emitted after pages were added or removed, or the first-page flag
    /// changed.
    pub applied: Signal<()>,
}

impl PageComponent {
    /// Create a page component with no pages. The first page is included.
    pub fn new(context: EditingContext) -> Self {
        Self {
            context,
            page_count: Property::new(0),
            first_page_included: Property::new(true),
            applied: Signal::new(),
        }
    }

    pub fn page_count(&self) -> usize {
        self.page_count.get()
    }

    /// Whether the header or footer also appears on the first page.
    pub fn first_page_included(&self) -> bool {
        self.first_page_included.get()
    }

    /// Append `count` pages. Does nothing for zero.
    pub fn add_page(&self, count: usize) -> bool {
        let mut added = 0;
        for _ in 0..count {
            self.context
                .move_position(MoveOperation::End, MoveMode::MoveAnchor, 1);
            if !self.context.insert_block() {
                break;
            }
            added += 1;
        }
        if added > 0 {
            self.context.clear_history();
            self.page_count.set(self.page_count() + added);
            tracing::debug!(target: targets::COMPONENT, added, pages = self.page_count(), "added pages");
        }
        finish(&self.applied, added > 0, "add_page")
    }

    /// Remove up to `count` trailing pages and return how many were removed.
    ///
    /// The request is clamped to the current page count and to the blocks
    /// the document can give up. Nothing is emitted when nothing was removed.
    pub fn remove_page(&self, count: usize) -> usize {
        let requested = count.min(self.page_count());
        let mut removed = 0;
        while removed < requested && self.remove_trailing_block() {
            removed += 1;
        }
        if removed > 0 {
            self.context.clear_history();
            self.page_count.set(self.page_count() - removed);
            tracing::debug!(target: targets::COMPONENT, removed, pages = self.page_count(), "removed pages");
        }
        finish(&self.applied, removed > 0, "remove_page");
        removed
    }

    /// Set whether the first page carries the header or footer.
    pub fn set_first_page_included(&self, included: bool) -> bool {
        let changed = self.first_page_included.set(included);
        finish(&self.applied, changed, "set_first_page_included")
    }

    /// Select the last block together with the separator before it and
    /// delete both.
    fn remove_trailing_block(&self) -> bool {
        let context = &self.context;
        context.move_position(MoveOperation::End, MoveMode::MoveAnchor, 1);
        context.move_position(MoveOperation::StartOfBlock, MoveMode::KeepAnchor, 1);
        if !context.move_position(MoveOperation::PreviousCharacter, MoveMode::KeepAnchor, 1) {
            context.clear_selection();
            return false;
        }
        context.remove_selected_text().is_some()
    }
}

impl Component for PageComponent {
    fn applied(&self) -> &Signal<()> {
        &self.applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::test_support::counter;

    #[test]
    fn test_add_then_remove_restores_counts() {
        let context = EditingContext::new();
        let pages = PageComponent::new(context.clone());
        let applied = counter(&pages.applied);

        assert!(pages.add_page(3));
        assert_eq!(pages.page_count(), 3);
        assert_eq!(context.block_count(), 4);

        assert_eq!(pages.remove_page(3), 3);
        assert_eq!(pages.page_count(), 0);
        assert_eq!(context.block_count(), 1);
        assert_eq!(*applied.lock(), 2);
    }

    #[test]
    fn test_undo_cannot_split_pages_from_blocks() {
        let context = EditingContext::new();
        context.insert_text("Draft");
        let pages = PageComponent::new(context.clone());

        assert!(pages.add_page(2));
        assert!(!context.undo());
        assert_eq!(context.block_count(), pages.page_count() + 1);

        assert_eq!(pages.remove_page(2), 2);
        assert!(!context.undo());
        assert_eq!(pages.page_count(), 0);
        assert_eq!(context.block_count(), 1);
        assert_eq!(context.text(), "Draft");
    }

    #[test]
    fn test_zero_is_noop() {
        let pages = PageComponent::new(EditingContext::new());
        let applied = counter(&pages.applied);

        assert!(!pages.add_page(0));
        assert_eq!(pages.remove_page(0), 0);
        assert_eq!(*applied.lock(), 0);
    }

    #[test]
    fn test_remove_is_clamped_to_page_count() {
        let context = EditingContext::new();
        let pages = PageComponent::new(context.clone());
        pages.add_page(2);

        assert_eq!(pages.remove_page(5), 2);
        assert_eq!(pages.page_count(), 0);
        assert_eq!(context.block_count(), 1);

        let applied = counter(&pages.applied);
        assert_eq!(pages.remove_page(1), 0);
        assert_eq!(*applied.lock(), 0);
    }

    #[test]
    fn test_remove_takes_trailing_block_text() {
        let context = EditingContext::new();
        let pages = PageComponent::new(context.clone());
        pages.add_page(2);
        context.insert_text("last");

        assert_eq!(pages.remove_page(1), 1);
        assert_eq!(context.text(), "\n");
    }

    #[test]
    fn test_first_page_flag_is_change_detected() {
        let pages = PageComponent::new(EditingContext::new());
        let applied = counter(&pages.applied);

        assert!(pages.first_page_included());
        assert!(pages.set_first_page_included(false));
        assert!(!pages.set_first_page_included(false));
        assert!(!pages.first_page_included());
        assert_eq!(*applied.lock(), 1);
    }
}
