//! Color button.
//!
//! Shows a color swatch. Clicking applies the shown color; changing the color
//! (from a picker, or from the cursor's format) updates the swatch.

use folio_core::logging::targets;
use folio_core::{Property, Signal};

use super::{ControlBase, FocusPolicy, InputControl};
use crate::document::Color;

/// A button that displays and applies a color.
///
/// # Signals
///
/// - `clicked(Color)`: the button was clicked; carries the current color
/// - `color_changed(Color)`: the displayed color changed
#[derive(Debug)]
pub struct ColorButton {
    base: ControlBase,
    color: Property<Color>,
    /// Emitted with the current color when the button is clicked.
    pub clicked: Signal<Color>,
    /// Emitted when the displayed color changes.
    pub color_changed: Signal<Color>,
}

impl ColorButton {
    pub fn new(color: Color) -> Self {
        Self {
            base: ControlBase::new(FocusPolicy::StrongFocus),
            color: Property::new(color),
            clicked: Signal::new(),
            color_changed: Signal::new(),
        }
    }

    pub fn color(&self) -> Color {
        self.color.get()
    }

    /// Change the displayed color. Returns `true` if it changed.
    pub fn set_color(&self, color: Color) -> bool {
        let changed = self.color.set(color);
        if changed {
            tracing::trace!(target: targets::WIDGET, color = %color, "color button changed");
            self.color_changed.emit(color);
        }
        changed
    }

    /// Click the button. Disabled buttons ignore clicks.
    pub fn click(&self) -> bool {
        if !self.is_enabled() {
            return false;
        }
        self.clicked.emit(self.color());
        true
    }
}

impl Default for ColorButton {
    fn default() -> Self {
        Self::new(Color::BLACK)
    }
}

impl InputControl for ColorButton {
    fn base(&self) -> &ControlBase {
        &self.base
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use parking_lot::Mutex;

    use super::*;

    #[test]
    fn test_set_color_emits_on_change() {
        let button = ColorButton::default();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = seen.clone();
        button.color_changed.connect(move |color| seen_clone.lock().push(*color));

        assert!(button.set_color(Color::RED));
        assert!(!button.set_color(Color::RED));
        assert_eq!(*seen.lock(), vec![Color::RED]);
    }

    #[test]
    fn test_click_carries_color() {
        let button = ColorButton::new(Color::BLUE);
        let clicked = Arc::new(Mutex::new(None));
        let clicked_clone = clicked.clone();
        button.clicked.connect(move |color| *clicked_clone.lock() = Some(*color));

        assert!(button.click());
        assert_eq!(*clicked.lock(), Some(Color::BLUE));

        button.set_enabled(false);
        *clicked.lock() = None;
        assert!(!button.click());
        assert_eq!(*clicked.lock(), None);
    }
}
