//! Applying style records to text.

use folio_core::Signal;
use folio_core::logging::targets;

use super::record::{StyleKind, StyleRecord};
use crate::component::{Component, finish};
use crate::document::EditingContext;

/// Applies style records at the cursor of an editing context.
///
/// A paragraph style formats the whole of every paragraph the selection
/// touches; a character style formats the selection only, or the next
/// insertion when nothing is selected. Each application is one undo step.
pub struct StyleApplier {
    context: EditingContext,
    /// Emitted after a style changed the text.
    pub applied: Signal<()>,
}

impl StyleApplier {
    pub fn new(context: EditingContext) -> Self {
        Self {
            context,
            applied: Signal::new(),
        }
    }

    /// Apply `record`. Returns `true` if anything changed.
    pub fn apply(&self, record: &StyleRecord) -> bool {
        tracing::trace!(target: targets::STYLE, name = %record.name, kind = ?record.kind, "applying style");
        let changed = match record.kind {
            StyleKind::Paragraph => self
                .context
                .merge_paragraph_format(&record.char_format, &record.block_format),
            StyleKind::Character => self.context.merge_char_format(&record.char_format),
        };
        finish(&self.applied, changed, "apply_style")
    }
}

impl Component for StyleApplier {
    fn applied(&self) -> &Signal<()> {
        &self.applied
    }
}
