//! Zoom slider.

use folio_core::logging::targets;
use folio_core::{Property, Signal};

use super::{ControlBase, FocusPolicy, InputControl};
use crate::config::ZoomConfig;

/// A zoom percentage slider.
///
/// Unlike the other toolbar controls the slider follows the mouse wheel:
/// each notch moves it by one step.
///
/// # Signals
///
/// - `value_changed(i32)`: the zoom percentage changed
#[derive(Debug)]
pub struct ZoomSlider {
    base: ControlBase,
    range: ZoomConfig,
    value: Property<i32>,
    /// Emitted with the new percentage when it changes.
    pub value_changed: Signal<i32>,
}

impl ZoomSlider {
    /// Create a slider over the configured range, at the default zoom.
    pub fn from_config(config: &ZoomConfig) -> Self {
        let (minimum, maximum) = if config.min <= config.max {
            (config.min, config.max)
        } else {
            (config.max, config.min)
        };
        let range = ZoomConfig {
            min: minimum,
            max: maximum,
            step: config.step.max(1),
            default: config.default.clamp(minimum, maximum),
        };
        Self {
            base: ControlBase::new(FocusPolicy::WheelFocus),
            value: Property::new(range.default),
            range,
            value_changed: Signal::new(),
        }
    }

    pub fn value(&self) -> i32 {
        self.value.get()
    }

    /// The zoom as a scale factor, `1.0` at 100%.
    pub fn scale(&self) -> f32 {
        self.value() as f32 / 100.0
    }

    pub fn minimum(&self) -> i32 {
        self.range.min
    }

    pub fn maximum(&self) -> i32 {
        self.range.max
    }

    pub fn step(&self) -> i32 {
        self.range.step
    }

    /// Set the zoom, clamped to the range.
    pub fn set_value(&self, value: i32) -> bool {
        let value = value.clamp(self.range.min, self.range.max);
        let changed = self.value.set(value);
        if changed {
            tracing::trace!(target: targets::WIDGET, zoom = value, "zoom changed");
            self.value_changed.emit(value);
        }
        changed
    }

    pub fn zoom_in(&self) -> bool {
        self.set_value(self.value().saturating_add(self.range.step))
    }

    pub fn zoom_out(&self) -> bool {
        self.set_value(self.value().saturating_sub(self.range.step))
    }

    /// Return to the default zoom.
    pub fn reset(&self) -> bool {
        self.set_value(self.range.default)
    }
}

impl Default for ZoomSlider {
    fn default() -> Self {
        Self::from_config(&ZoomConfig::default())
    }
}

impl InputControl for ZoomSlider {
    fn base(&self) -> &ControlBase {
        &self.base
    }

    fn handle_wheel(&self, steps: i32) -> bool {
        let delta = steps.saturating_mul(self.range.step);
        self.set_value(self.value().saturating_add(delta))
    }
}
