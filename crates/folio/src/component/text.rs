//! Header and footer free text.

use folio_core::{Property, Signal};

use super::{Component, finish};

/// A free-text line shown in a header or footer, and whether it is shown.
pub struct TextComponent {
    turned: Property<bool>,
    text: Property<String>,
    /// Emitted with the new state when the text is turned on or off.
    pub text_turned: Signal<bool>,
    /// Emitted with the new text when it changes.
    pub text_changed: Signal<String>,
    /// Emitted after any change.
    pub applied: Signal<()>,
}

impl TextComponent {
    pub fn new() -> Self {
        Self {
            turned: Property::new(false),
            text: Property::new(String::new()),
            text_turned: Signal::new(),
            text_changed: Signal::new(),
            applied: Signal::new(),
        }
    }

    pub fn is_text_turned(&self) -> bool {
        self.turned.get()
    }

    pub fn text(&self) -> String {
        self.text.get()
    }

    pub fn set_text_turned(&self, on: bool) -> bool {
        let changed = self.turned.set(on);
        if changed {
            self.text_turned.emit(on);
        }
        finish(&self.applied, changed, "set_text_turned")
    }

    pub fn set_text(&self, text: impl Into<String>) -> bool {
        let text = text.into();
        let changed = self.text.set(text.clone());
        if changed {
            self.text_changed.emit(text);
        }
        finish(&self.applied, changed, "set_text")
    }
}

impl Default for TextComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for TextComponent {
    fn applied(&self) -> &Signal<()> {
        &self.applied
    }
}
