//! Font family and size.

use folio_core::Signal;
use folio_core::logging::targets;

use super::{Component, apply_char_delta};
use crate::document::{CharFormatDelta, EditingContext};

/// Sets the font family and point size of the selection, or of the next
/// insertion when nothing is selected.
pub struct FontComponent {
    context: EditingContext,
    /// Emitted after the font changed.
    pub applied: Signal<()>,
}

impl FontComponent {
    pub fn new(context: EditingContext) -> Self {
        Self {
            context,
            applied: Signal::new(),
        }
    }

    /// Set the font family. An empty name is ignored.
    pub fn set_font_family(&self, family: &str) -> bool {
        if family.is_empty() {
            tracing::debug!(target: targets::COMPONENT, "ignoring empty font family");
            return false;
        }
        let delta = CharFormatDelta::new().with_font_family(family);
        apply_char_delta(&self.context, &self.applied, &delta, "set_font_family")
    }

    /// Set the point size. Sizes that are not positive finite numbers are
    /// ignored.
    pub fn set_font_size(&self, points: f32) -> bool {
        if !(points.is_finite() && points > 0.0) {
            tracing::debug!(target: targets::COMPONENT, points, "ignoring invalid font size");
            return false;
        }
        let delta = CharFormatDelta::new().with_font_size(points);
        apply_char_delta(&self.context, &self.applied, &delta, "set_font_size")
    }

    /// The family at the cursor, if one is set.
    pub fn font_family(&self) -> Option<String> {
        self.context.char_format().font_family
    }

    /// The point size at the cursor, if one is set.
    pub fn font_size(&self) -> Option<f32> {
        self.context.char_format().font_size
    }
}

impl Component for FontComponent {
    fn applied(&self) -> &Signal<()> {
        &self.applied
    }
}
