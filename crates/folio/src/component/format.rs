//! Character style toggles.

use folio_core::Signal;

use super::{Component, apply_char_delta};
use crate::document::{CharFormatDelta, EditingContext};

/// Turns bold, italic, underline and strikethrough on or off.
///
/// Every operation sets the attribute to the given value rather than
/// toggling it, so repeating a call leaves the format unchanged.
pub struct FormatComponent {
    context: EditingContext,
    /// Emitted after a style changed.
    pub applied: Signal<()>,
}

impl FormatComponent {
    pub fn new(context: EditingContext) -> Self {
        Self {
            context,
            applied: Signal::new(),
        }
    }

    pub fn turn_bold(&self, on: bool) -> bool {
        let delta = CharFormatDelta::new().with_bold(on);
        apply_char_delta(&self.context, &self.applied, &delta, "turn_bold")
    }

    pub fn turn_italic(&self, on: bool) -> bool {
        let delta = CharFormatDelta::new().with_italic(on);
        apply_char_delta(&self.context, &self.applied, &delta, "turn_italic")
    }

    pub fn turn_underline(&self, on: bool) -> bool {
        let delta = CharFormatDelta::new().with_underline(on);
        apply_char_delta(&self.context, &self.applied, &delta, "turn_underline")
    }

    pub fn turn_strikethrough(&self, on: bool) -> bool {
        let delta = CharFormatDelta::new().with_strikethrough(on);
        apply_char_delta(&self.context, &self.applied, &delta, "turn_strikethrough")
    }

    /// Whether the text at the cursor is bold.
    pub fn is_bold(&self) -> bool {
        self.context.char_format().bold
    }

    pub fn is_italic(&self) -> bool {
        self.context.char_format().italic
    }

    pub fn is_underline(&self) -> bool {
        self.context.char_format().underline
    }

    pub fn is_strikethrough(&self) -> bool {
        self.context.char_format().strikethrough
    }
}

impl Component for FormatComponent {
    fn applied(&self) -> &Signal<()> {
        &self.applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::test_support::{counter, selected};

    #[test]
    fn test_turn_bold_is_idempotent() {
        let context = selected("Hello world", 0, 5);
        let format = FormatComponent::new(context.clone());
        let applied = counter(&format.applied);

        assert!(format.turn_bold(true));
        let after_first = context.document();
        assert!(!format.turn_bold(true));

        assert_eq!(context.document(), after_first);
        assert!(format.is_bold());
        assert_eq!(*applied.lock(), 1);
    }

    #[test]
    fn test_turn_off() {
        let context = selected("Hello", 0, 5);
        let format = FormatComponent::new(context.clone());

        format.turn_italic(true);
        format.turn_underline(true);
        assert!(format.turn_italic(false));

        let char_format = context.document().format_at(2);
        assert!(!char_format.italic);
        assert!(char_format.underline);
    }

    #[test]
    fn test_each_change_is_one_undo_step() {
        let context = selected("Hello", 0, 5);
        let format = FormatComponent::new(context.clone());

        format.turn_bold(true);
        format.turn_strikethrough(true);
        assert!(context.undo());

        let char_format = context.document().format_at(0);
        assert!(char_format.bold);
        assert!(!char_format.strikethrough);
    }
}
