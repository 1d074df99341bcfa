//! Color picker with a standard palette and recent colors.
//!
//! # Example
//!
//! ```
//! use folio::document::Color;
//! use folio::widget::ColorPicker;
//!
//! let picker = ColorPicker::new(4);
//! picker.color_selected.connect(|color| println!("picked {color}"));
//!
//! picker.pick(Color::RED);
//! picker.pick(Color::BLUE);
//! assert_eq!(picker.recent_colors(), vec![Color::BLUE, Color::RED]);
//! ```

use folio_core::Signal;
use folio_core::logging::targets;
use parking_lot::RwLock;

use super::{ControlBase, FocusPolicy, InputControl};
use crate::document::Color;

/// The fixed palette offered by every picker.
pub const STANDARD_COLORS: [Color; 16] = [
    Color::BLACK,
    Color::from_rgb8(64, 64, 64),
    Color::GRAY,
    Color::from_rgb8(192, 192, 192),
    Color::WHITE,
    Color::from_rgb8(128, 0, 0),
    Color::RED,
    Color::from_rgb8(255, 165, 0),
    Color::YELLOW,
    Color::GREEN,
    Color::from_rgb8(0, 255, 0),
    Color::from_rgb8(0, 128, 128),
    Color::from_rgb8(0, 0, 128),
    Color::BLUE,
    Color::from_rgb8(128, 0, 128),
    Color::from_rgb8(255, 0, 255),
];

/// Default number of recent colors remembered.
const DEFAULT_RECENT_LIMIT: usize = 10;

/// A palette of standard colors plus the colors picked most recently.
///
/// # Signals
///
/// - `color_selected(Color)`: a color was picked
#[derive(Debug)]
pub struct ColorPicker {
    base: ControlBase,
    /// Most recent first, no duplicates.
    recent: RwLock<Vec<Color>>,
    recent_limit: usize,
    /// Emitted when a color is picked.
    pub color_selected: Signal<Color>,
}

impl ColorPicker {
    /// Create a picker remembering up to `recent_limit` colors.
    pub fn new(recent_limit: usize) -> Self {
        Self {
            base: ControlBase::new(FocusPolicy::StrongFocus),
            recent: RwLock::new(Vec::new()),
            recent_limit,
            color_selected: Signal::new(),
        }
    }

    pub fn standard_colors(&self) -> &'static [Color] {
        &STANDARD_COLORS
    }

    pub fn recent_colors(&self) -> Vec<Color> {
        self.recent.read().clone()
    }

    pub fn recent_limit(&self) -> usize {
        self.recent_limit
    }

    /// Pick `color`: remember it and emit `color_selected`.
    pub fn pick(&self, color: Color) -> bool {
        if !self.is_enabled() {
            return false;
        }
        self.add_recent(color);
        tracing::trace!(target: targets::WIDGET, color = %color, "color picked");
        self.color_selected.emit(color);
        true
    }

    /// Move `color` to the front of the recent list without emitting.
    pub fn add_recent(&self, color: Color) {
        let mut recent = self.recent.write();
        recent.retain(|&existing| existing != color);
        recent.insert(0, color);
        recent.truncate(self.recent_limit);
    }

    pub fn clear_recent(&self) {
        self.recent.write().clear();
    }
}

impl Default for ColorPicker {
    fn default() -> Self {
        Self::new(DEFAULT_RECENT_LIMIT)
    }
}

impl InputControl for ColorPicker {
    fn base(&self) -> &ControlBase {
        &self.base
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recent_is_bounded_and_deduplicated() {
        let picker = ColorPicker::new(3);
        for color in [Color::RED, Color::GREEN, Color::BLUE, Color::RED, Color::YELLOW] {
            picker.pick(color);
        }
        assert_eq!(
            picker.recent_colors(),
            vec![Color::YELLOW, Color::RED, Color::BLUE]
        );

        picker.clear_recent();
        assert!(picker.recent_colors().is_empty());
    }

    #[test]
    fn test_disabled_picker_ignores_picks() {
        let picker = ColorPicker::default();
        picker.set_enabled(false);
        assert!(!picker.pick(Color::RED));
        assert!(picker.recent_colors().is_empty());
    }

    #[test]
    fn test_standard_palette() {
        let picker = ColorPicker::default();
        assert_eq!(picker.standard_colors().len(), 16);
        assert!(picker.standard_colors().contains(&Color::WHITE));
    }
}
