//! Text and paragraph colors.

use folio_core::Signal;
use folio_core::logging::targets;

use super::{Component, finish};
use crate::document::{BlockFormatDelta, CharFormatDelta, Color, EditingContext};

/// Sets foreground and background colors.
///
/// A color applies to both scopes at once: it is merged onto the character
/// format of the selection and onto the block format of every block the
/// selection touches.
pub struct ColorComponent {
    context: EditingContext,
    /// Emitted after a color changed.
    pub applied: Signal<()>,
}

impl ColorComponent {
    pub fn new(context: EditingContext) -> Self {
        Self {
            context,
            applied: Signal::new(),
        }
    }

    pub fn set_foreground_color(&self, color: Color) -> bool {
        tracing::trace!(target: targets::COMPONENT, color = %color, "foreground");
        self.apply(
            CharFormatDelta::new().with_foreground(color),
            BlockFormatDelta::new().with_foreground(color),
            "set_foreground_color",
        )
    }

    pub fn set_background_color(&self, color: Color) -> bool {
        tracing::trace!(target: targets::COMPONENT, color = %color, "background");
        self.apply(
            CharFormatDelta::new().with_background(color),
            BlockFormatDelta::new().with_background(color),
            "set_background_color",
        )
    }

    /// The foreground color at the cursor, if one is set.
    pub fn foreground_color(&self) -> Option<Color> {
        self.context.char_format().foreground
    }

    /// The background color at the cursor, if one is set.
    pub fn background_color(&self) -> Option<Color> {
        self.context.char_format().background
    }

    fn apply(&self, char_delta: CharFormatDelta, block_delta: BlockFormatDelta, operation: &'static str) -> bool {
        let changed = self.context.merge_formats(&char_delta, &block_delta);
        finish(&self.applied, changed, operation)
    }
}

impl Component for ColorComponent {
    fn applied(&self) -> &Signal<()> {
        &self.applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::test_support::{counter, selected};

    #[test]
    fn test_color_applies_to_both_scopes() {
        let context = selected("Hello\nworld", 0, 8);
        let colors = ColorComponent::new(context.clone());
        let applied = counter(&colors.applied);

        assert!(colors.set_foreground_color(Color::RED));

        let document = context.document();
        assert_eq!(document.format_at(0).foreground, Some(Color::RED));
        assert_eq!(document.format_at(7).foreground, Some(Color::RED));
        assert_eq!(document.format_at(9).foreground, None);
        assert_eq!(document.block_format_at(0).foreground, Some(Color::RED));
        assert_eq!(document.block_format_at(1).foreground, Some(Color::RED));
        assert_eq!(*applied.lock(), 1);
    }

    #[test]
    fn test_repeat_is_noop() {
        let context = selected("Hello", 1, 3);
        let colors = ColorComponent::new(context.clone());
        let applied = counter(&colors.applied);

        assert!(colors.set_background_color(Color::YELLOW));
        let snapshot = context.document();
        assert!(!colors.set_background_color(Color::YELLOW));

        assert_eq!(context.document(), snapshot);
        assert_eq!(colors.background_color(), Some(Color::YELLOW));
        assert_eq!(*applied.lock(), 1);

        // One color change is one undo step.
        assert!(context.undo());
        assert_eq!(context.document().block_format_at(0).background, None);
        assert!(!context.can_undo());
    }

    #[test]
    fn test_without_selection_colors_block_and_pending_format() {
        let context = selected("Hello", 5, 5);
        let colors = ColorComponent::new(context.clone());

        assert!(colors.set_foreground_color(Color::BLUE));
        assert_eq!(context.block_format().foreground, Some(Color::BLUE));

        context.insert_text("!");
        assert_eq!(context.document().format_at(5).foreground, Some(Color::BLUE));
        assert_eq!(context.document().format_at(0).foreground, None);
    }
}
