//! Headless toolbar controls.
//!
//! The controls here hold the state a toolbar shows (current font, size,
//! color, toggle states) and expose it through signals; rendering belongs to
//! the host toolkit. [`FormatToolbar`] binds a full set of controls to the
//! formatting components of one editing surface.
//!
//! All controls use interior mutability so they can be shared behind an
//! `Arc` between the toolbar, its signal connections and the host.
//!
//! # Wheel Handling
//!
//! Combo boxes and spin boxes ignore the mouse wheel so scrolling a toolbar
//! never changes the font by accident; the zoom slider accepts it. The policy
//! is carried by [`FocusPolicy`]: only [`FocusPolicy::WheelFocus`] controls
//! react to [`InputControl::wheel`].

mod color_button;
mod color_picker;
mod font_combo_box;
mod format_toolbar;
mod spin_box;
mod tool_button;
mod zoom_slider;

pub use color_button::ColorButton;
pub use color_picker::{ColorPicker, STANDARD_COLORS};
pub use font_combo_box::{FontComboBox, FontSizeComboBox};
pub use format_toolbar::{ColorTarget, FormatToolbar};
pub use spin_box::SpinBox;
pub use tool_button::ToolButton;
pub use zoom_slider::ZoomSlider;

use folio_core::Property;
use folio_core::logging::targets;

/// How a control takes keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FocusPolicy {
    /// Never takes focus.
    NoFocus,
    /// Takes focus by tabbing.
    TabFocus,
    /// Takes focus by clicking.
    ClickFocus,
    /// Takes focus by tabbing and clicking.
    #[default]
    StrongFocus,
    /// Takes focus by tabbing, clicking and the mouse wheel, and reacts to
    /// the wheel.
    WheelFocus,
}

/// State every control shares.
#[derive(Debug)]
pub struct ControlBase {
    enabled: Property<bool>,
    focus_policy: FocusPolicy,
}

impl ControlBase {
    pub fn new(focus_policy: FocusPolicy) -> Self {
        Self {
            enabled: Property::new(true),
            focus_policy,
        }
    }

    pub fn focus_policy(&self) -> FocusPolicy {
        self.focus_policy
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.get()
    }

    /// Returns `true` if the state changed.
    pub fn set_enabled(&self, enabled: bool) -> bool {
        self.enabled.set(enabled)
    }
}

/// Common capabilities of toolbar controls.
pub trait InputControl {
    /// The shared control state.
    fn base(&self) -> &ControlBase;

    fn focus_policy(&self) -> FocusPolicy {
        self.base().focus_policy()
    }

    fn is_enabled(&self) -> bool {
        self.base().is_enabled()
    }

    fn set_enabled(&self, enabled: bool) {
        self.base().set_enabled(enabled);
    }

    /// Whether the control reacts to the mouse wheel.
    fn accepts_wheel(&self) -> bool {
        self.focus_policy() == FocusPolicy::WheelFocus
    }

    /// Deliver `steps` wheel notches (positive away from the user).
    ///
    /// Returns `true` if the control consumed the event. Controls that do
    /// not accept the wheel, and disabled controls, ignore it.
    fn wheel(&self, steps: i32) -> bool {
        if !self.accepts_wheel() || !self.is_enabled() {
            tracing::trace!(target: targets::WIDGET, steps, "wheel ignored");
            return false;
        }
        self.handle_wheel(steps)
    }

    /// React to wheel notches. Only called for wheel-accepting, enabled
    /// controls.
    fn handle_wheel(&self, _steps: i32) -> bool {
        false
    }
}
