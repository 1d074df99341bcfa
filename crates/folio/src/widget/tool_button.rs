//! Tool button.

use folio_core::logging::targets;
use folio_core::{Property, Signal};

use super::{ControlBase, FocusPolicy, InputControl};

/// A toolbar button, optionally checkable.
///
/// Tool buttons do not take focus, so clicking one leaves the keyboard focus
/// in the document.
///
/// # Signals
///
/// - `triggered()`: the button was clicked
/// - `toggled(bool)`: the checked state changed
#[derive(Debug)]
pub struct ToolButton {
    base: ControlBase,
    text: String,
    checkable: bool,
    checked: Property<bool>,
    /// Emitted when the button is clicked.
    pub triggered: Signal<()>,
    /// Emitted with the new state when a checkable button toggles.
    pub toggled: Signal<bool>,
}

impl ToolButton {
    /// A plain push-style button.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            base: ControlBase::new(FocusPolicy::NoFocus),
            text: text.into(),
            checkable: false,
            checked: Property::new(false),
            triggered: Signal::new(),
            toggled: Signal::new(),
        }
    }

    /// A button that keeps an on/off state.
    pub fn checkable(text: impl Into<String>) -> Self {
        Self {
            checkable: true,
            ..Self::new(text)
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_checkable(&self) -> bool {
        self.checkable
    }

    pub fn is_checked(&self) -> bool {
        self.checked.get()
    }

    /// Set the checked state, emitting `toggled` on change. Ignored for
    /// buttons that are not checkable.
    pub fn set_checked(&self, checked: bool) -> bool {
        if !self.checkable {
            return false;
        }
        let changed = self.checked.set(checked);
        if changed {
            self.toggled.emit(checked);
        }
        changed
    }

    /// Set the checked state without emitting.
    pub fn set_checked_silent(&self, checked: bool) {
        if self.checkable {
            self.checked.set_silent(checked);
        }
    }

    /// Click the button: toggle if checkable, then emit `triggered`.
    /// Disabled buttons ignore clicks.
    pub fn click(&self) -> bool {
        if !self.is_enabled() {
            tracing::trace!(target: targets::WIDGET, button = %self.text, "click on disabled button");
            return false;
        }
        if self.checkable {
            self.set_checked(!self.is_checked());
        }
        self.triggered.emit(());
        true
    }
}

impl InputControl for ToolButton {
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
    fn test_checkable_click_toggles() {
        let button = ToolButton::checkable("Bold");
        let states = Arc::new(Mutex::new(Vec::new()));
        let states_clone = states.clone();
        button.toggled.connect(move |checked| states_clone.lock().push(*checked));

        assert!(button.click());
        assert!(button.is_checked());
        assert!(button.click());
        assert!(!button.is_checked());
        assert_eq!(*states.lock(), vec![true, false]);
    }

    #[test]
    fn test_plain_button_never_checks() {
        let button = ToolButton::new("Undo");
        let triggers = Arc::new(Mutex::new(0));
        let triggers_clone = triggers.clone();
        button.triggered.connect(move |_| *triggers_clone.lock() += 1);

        assert!(button.click());
        assert!(!button.set_checked(true));
        assert!(!button.is_checked());
        assert_eq!(*triggers.lock(), 1);
    }

    #[test]
    fn test_silent_check_and_disabled_click() {
        let button = ToolButton::checkable("Italic");
        let toggles = Arc::new(Mutex::new(0));
        let toggles_clone = toggles.clone();
        button.toggled.connect(move |_| *toggles_clone.lock() += 1);

        button.set_checked_silent(true);
        assert!(button.is_checked());

        button.set_enabled(false);
        assert!(!button.click());
        assert!(button.is_checked());
        assert_eq!(*toggles.lock(), 0);
        assert_eq!(button.focus_policy(), FocusPolicy::NoFocus);
    }
}
