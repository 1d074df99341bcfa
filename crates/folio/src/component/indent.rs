//! Paragraph indentation.

use folio_core::Signal;
use folio_core::logging::targets;

use super::{Component, apply_block_delta};
use crate::config::DEFAULT_INDENT_STEP;
use crate::document::{BlockFormatDelta, EditingContext};

/// Moves paragraphs right or left by a fixed step.
///
/// The current indent is read from the block under the cursor; the new value
/// is applied to every block the selection touches, so a multi-paragraph
/// selection lines up on the cursor's block.
pub struct IndentComponent {
    context: EditingContext,
    step: u32,
    /// Emitted after the indent changed.
    pub applied: Signal<()>,
}

impl IndentComponent {
    /// Create an indent component with the default step.
    pub fn new(context: EditingContext) -> Self {
        Self::with_step(context, DEFAULT_INDENT_STEP)
    }

    /// Create an indent component with a custom step.
    pub fn with_step(context: EditingContext, step: u32) -> Self {
        Self {
            context,
            step,
            applied: Signal::new(),
        }
    }

    pub fn step(&self) -> u32 {
        self.step
    }

    /// The indent of the block under the cursor.
    pub fn indent(&self) -> u32 {
        self.context.block_format().indent
    }

    /// Increase the indent by one step.
    pub fn indent_paragraph_right(&self) -> bool {
        let indent = self.indent().saturating_add(self.step);
        self.apply(indent, "indent_paragraph_right")
    }

    /// Decrease the indent by one step. Does nothing if the indent would
    /// become negative.
    pub fn indent_paragraph_left(&self) -> bool {
        let current = self.indent();
        let Some(indent) = current.checked_sub(self.step) else {
            tracing::trace!(target: targets::COMPONENT, current, step = self.step, "indent already at minimum");
            return false;
        };
        self.apply(indent, "indent_paragraph_left")
    }

    fn apply(&self, indent: u32, operation: &'static str) -> bool {
        let delta = BlockFormatDelta::new().with_indent(indent);
        apply_block_delta(&self.context, &self.applied, &delta, operation)
    }
}

impl Component for IndentComponent {
    fn applied(&self) -> &Signal<()> {
        &self.applied
    }
}
