//! Editing components.
//!
//! A component is a small mediator between a UI command ("make this bold",
//! "add a header page") and an [`EditingContext`]. It is constructed over a
//! clone of the context handle, performs its operation through the context's
//! cursor and announces every successful mutation on its `applied` signal so
//! the host can repaint and toolbars can resynchronize.
//!
//! | Component | Operations |
//! |---|---|
//! | [`FontComponent`] | font family, point size |
//! | [`FormatComponent`] | bold, italic, underline, strikethrough |
//! | [`ColorComponent`] | foreground and background color |
//! | [`IndentComponent`] | paragraph indent right/left |
//! | [`AlignmentComponent`] | paragraph alignment |
//! | [`HistoryComponent`] | undo, redo |
//! | [`CopyPasteComponent`] | cut, copy, paste |
//! | [`PageComponent`] | header/footer pages |
//! | [`PaginationComponent`] | page numbering |
//! | [`TextComponent`] | header/footer free text |
//!
//! Components never emit while holding the context lock, so slots may read
//! the context freely.
//!
//! [`EditingContext`]: crate::document::EditingContext

mod alignment;
mod color;
mod copy_paste;
mod font;
mod format;
mod history;
mod indent;
mod page;
mod pagination;
mod text;

pub use alignment::AlignmentComponent;
pub use color::ColorComponent;
pub use copy_paste::CopyPasteComponent;
pub use font::FontComponent;
pub use format::FormatComponent;
pub use history::HistoryComponent;
pub use indent::IndentComponent;
pub use page::PageComponent;
pub use pagination::{DEFAULT_STARTING_NUMBER, PaginationComponent};
pub use text::TextComponent;

use folio_core::Signal;
use folio_core::logging::targets;

use crate::document::{BlockFormatDelta, CharFormatDelta, EditingContext};

/// Common surface of every editing component.
pub trait Component {
    /// Signal emitted after each successful mutation.
    fn applied(&self) -> &Signal<()>;
}

/// Merge a char delta through the context and emit `applied` on change.
pub(crate) fn apply_char_delta(
    context: &EditingContext,
    applied: &Signal<()>,
    delta: &CharFormatDelta,
    operation: &'static str,
) -> bool {
    let changed = context.merge_char_format(delta);
    finish(applied, changed, operation)
}

/// Merge a block delta through the context and emit `applied` on change.
pub(crate) fn apply_block_delta(
    context: &EditingContext,
    applied: &Signal<()>,
    delta: &BlockFormatDelta,
    operation: &'static str,
) -> bool {
    let changed = context.merge_block_format(delta);
    finish(applied, changed, operation)
}

/// Log the outcome of an operation and emit `applied` if it changed state.
pub(crate) fn finish(applied: &Signal<()>, changed: bool, operation: &'static str) -> bool {
    if changed {
        tracing::debug!(target: targets::COMPONENT, operation, "applied");
        applied.emit(());
    } else {
        tracing::trace!(target: targets::COMPONENT, operation, "no change");
    }
    changed
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use folio_core::Signal;
    use parking_lot::Mutex;

    use crate::document::{EditingContext, MoveMode, StyledDocument};

    /// Counts emissions of a signal.
    pub(crate) fn counter<T: 'static>(signal: &Signal<T>) -> Arc<Mutex<usize>> {
        let count = Arc::new(Mutex::new(0));
        let count_clone = count.clone();
        signal.connect(move |_| *count_clone.lock() += 1);
        count
    }

    /// Records emitted values of a signal.
    pub(crate) fn recorder<T: Clone + Send + 'static>(signal: &Signal<T>) -> Arc<Mutex<Vec<T>>> {
        let values = Arc::new(Mutex::new(Vec::new()));
        let values_clone = values.clone();
        signal.connect(move |value: &T| values_clone.lock().push(value.clone()));
        values
    }

    /// A context over `text` with `start..end` selected.
    pub(crate) fn selected(text: &str, start: usize, end: usize) -> EditingContext {
        let context = EditingContext::from_document(StyledDocument::from_text(text));
        context.set_position(start, MoveMode::MoveAnchor);
        context.set_position(end, MoveMode::KeepAnchor);
        context
    }
}
