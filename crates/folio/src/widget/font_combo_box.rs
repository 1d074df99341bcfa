//! Font family and font size combo boxes.
//!
//! Neither box reacts to the mouse wheel.

use folio_core::logging::targets;
use folio_core::{Property, Signal};

use super::{ControlBase, FocusPolicy, InputControl};

// ============================================================================
// FontComboBox
// ============================================================================

/// A combo box listing font families.
///
/// The current family may be one the list does not contain (for example a
/// family read from pasted text); it is shown as is.
///
/// # Signals
///
/// - `font_changed(String)`: the current family changed
#[derive(Debug)]
pub struct FontComboBox {
    base: ControlBase,
    families: Vec<String>,
    current: Property<Option<String>>,
    /// Emitted with the new family when the selection changes.
    pub font_changed: Signal<String>,
}

impl FontComboBox {
    pub fn new(families: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            base: ControlBase::new(FocusPolicy::StrongFocus),
            families: families.into_iter().map(Into::into).collect(),
            current: Property::new(None),
            font_changed: Signal::new(),
        }
    }

    /// Number of listed families.
    pub fn count(&self) -> usize {
        self.families.len()
    }

    pub fn families(&self) -> &[String] {
        &self.families
    }

    /// The listed family at `index`.
    pub fn font_family(&self, index: usize) -> Option<&str> {
        self.families.get(index).map(String::as_str)
    }

    /// Index of `family` in the list, matched case-insensitively.
    pub fn find_font(&self, family: &str) -> Option<usize> {
        self.families
            .iter()
            .position(|listed| listed.eq_ignore_ascii_case(family))
    }

    pub fn current_font(&self) -> Option<String> {
        self.current.get()
    }

    /// Index of the current family, if it is listed.
    pub fn current_index(&self) -> Option<usize> {
        self.current
            .with(|current| current.as_deref().and_then(|family| self.find_font(family)))
    }

    /// Make `family` current. Empty names are rejected.
    pub fn set_current_font(&self, family: &str) -> bool {
        if family.is_empty() {
            return false;
        }
        // Use the listed spelling when the family is known.
        let family = self
            .find_font(family)
            .map_or_else(|| family.to_string(), |index| self.families[index].clone());
        let changed = self.current.set(Some(family.clone()));
        if changed {
            tracing::trace!(target: targets::WIDGET, family = %family, "font combo changed");
            self.font_changed.emit(family);
        }
        changed
    }

    /// Make the listed family at `index` current.
    pub fn set_current_index(&self, index: usize) -> bool {
        match self.families.get(index).cloned() {
            Some(family) => self.set_current_font(&family),
            None => false,
        }
    }
}

impl InputControl for FontComboBox {
    fn base(&self) -> &ControlBase {
        &self.base
    }
}

// ============================================================================
// FontSizeComboBox
// ============================================================================

/// An editable combo box of point sizes.
///
/// # Signals
///
/// - `size_changed(f32)`: the current size changed
#[derive(Debug)]
pub struct FontSizeComboBox {
    base: ControlBase,
    sizes: Vec<f32>,
    current: Property<f32>,
    /// Emitted with the new size when it changes.
    pub size_changed: Signal<f32>,
}

impl FontSizeComboBox {
    /// Create a size box offering `sizes`, showing `current`.
    pub fn new(sizes: impl IntoIterator<Item = f32>, current: f32) -> Self {
        Self {
            base: ControlBase::new(FocusPolicy::StrongFocus),
            sizes: sizes.into_iter().collect(),
            current: Property::new(current),
            size_changed: Signal::new(),
        }
    }

    /// The preset sizes.
    pub fn sizes(&self) -> &[f32] {
        &self.sizes
    }

    pub fn size(&self) -> f32 {
        self.current.get()
    }

    /// The current size as shown in the edit field.
    pub fn text(&self) -> String {
        format_size(self.size())
    }

    /// Set the size. Sizes that are not positive finite numbers are
    /// rejected.
    pub fn set_size(&self, size: f32) -> bool {
        if !(size.is_finite() && size > 0.0) {
            tracing::debug!(target: targets::WIDGET, size, "rejected font size");
            return false;
        }
        let changed = self.current.set(size);
        if changed {
            self.size_changed.emit(size);
        }
        changed
    }

    /// Parse typed input such as `"12"`, `"10.5"` or `"14 pt"`.
    pub fn set_text(&self, text: &str) -> bool {
        let trimmed = text.trim();
        let number = trimmed
            .strip_suffix("pt")
            .unwrap_or(trimmed)
            .trim_end();
        match number.parse::<f32>() {
            Ok(size) => self.set_size(size),
            Err(_) => {
                tracing::debug!(target: targets::WIDGET, text, "unparsable font size");
                false
            }
        }
    }
}

impl InputControl for FontSizeComboBox {
    fn base(&self) -> &ControlBase {
        &self.base
    }
}

/// Format a size without a trailing `.0`.
fn format_size(size: f32) -> String {
    if size.fract() == 0.0 {
        format!("{size:.0}")
    } else {
        size.to_string()
    }
}
