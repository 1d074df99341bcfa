//! Paragraph alignment.

use folio_core::Signal;

use super::{Component, apply_block_delta};
use crate::document::{Alignment, BlockFormatDelta, EditingContext};

/// Aligns the paragraphs the selection touches.
pub struct AlignmentComponent {
    context: EditingContext,
    /// Emitted after the alignment changed.
    pub applied: Signal<()>,
}

impl AlignmentComponent {
    pub fn new(context: EditingContext) -> Self {
        Self {
            context,
            applied: Signal::new(),
        }
    }

    pub fn set_alignment(&self, alignment: Alignment) -> bool {
        let delta = BlockFormatDelta::new().with_alignment(alignment);
        apply_block_delta(&self.context, &self.applied, &delta, "set_alignment")
    }

    /// The alignment of the block under the cursor.
    pub fn alignment(&self) -> Alignment {
        self.context.block_format().alignment
    }
}

impl Component for AlignmentComponent {
    fn applied(&self) -> &Signal<()> {
        &self.applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::test_support::{counter, selected};

    #[test]
    fn test_set_alignment() {
        let context = selected("left\ncenter", 6, 6);
        let alignment = AlignmentComponent::new(context.clone());
        let applied = counter(&alignment.applied);

        assert!(alignment.set_alignment(Alignment::Center));
        assert!(!alignment.set_alignment(Alignment::Center));

        assert_eq!(alignment.alignment(), Alignment::Center);
        assert_eq!(context.document().block_format_at(0).alignment, Alignment::Left);
        assert_eq!(*applied.lock(), 1);
    }
}
