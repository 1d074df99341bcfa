//! Integer spin box.

use folio_core::Signal;
use parking_lot::Mutex;

use super::{ControlBase, FocusPolicy, InputControl};

#[derive(Debug, Clone, Copy)]
struct Range {
    value: i32,
    minimum: i32,
    maximum: i32,
    step: i32,
}

/// An integer input bounded by a range.
///
/// The value is always clamped to `minimum..=maximum`. The wheel is ignored.
///
/// # Signals
///
/// - `value_changed(i32)`: the value changed
#[derive(Debug)]
pub struct SpinBox {
    base: ControlBase,
    range: Mutex<Range>,
    /// Emitted with the new value when it changes.
    pub value_changed: Signal<i32>,
}

impl SpinBox {
    /// A spin box over `0..=99` with step 1.
    pub fn new() -> Self {
        Self {
            base: ControlBase::new(FocusPolicy::StrongFocus),
            range: Mutex::new(Range {
                value: 0,
                minimum: 0,
                maximum: 99,
                step: 1,
            }),
            value_changed: Signal::new(),
        }
    }

    /// Set the range using builder pattern.
    pub fn with_range(self, minimum: i32, maximum: i32) -> Self {
        self.set_range(minimum, maximum);
        self
    }

    /// Set the step using builder pattern.
    pub fn with_step(self, step: i32) -> Self {
        self.set_step(step);
        self
    }

    /// Set the value using builder pattern.
    pub fn with_value(self, value: i32) -> Self {
        self.set_value(value);
        self
    }

    pub fn value(&self) -> i32 {
        self.range.lock().value
    }

    pub fn minimum(&self) -> i32 {
        self.range.lock().minimum
    }

    pub fn maximum(&self) -> i32 {
        self.range.lock().maximum
    }

    pub fn step(&self) -> i32 {
        self.range.lock().step
    }

    /// Set the value, clamped to the range.
    pub fn set_value(&self, value: i32) -> bool {
        let changed = {
            let mut range = self.range.lock();
            let value = value.clamp(range.minimum, range.maximum);
            (range.value != value).then(|| {
                range.value = value;
                value
            })
        };
        self.notify(changed)
    }

    /// Set the range; swapped bounds are reordered. The value is clamped to
    /// the new range.
    pub fn set_range(&self, minimum: i32, maximum: i32) -> bool {
        let (minimum, maximum) = if minimum <= maximum {
            (minimum, maximum)
        } else {
            (maximum, minimum)
        };
        let changed = {
            let mut range = self.range.lock();
            range.minimum = minimum;
            range.maximum = maximum;
            let value = range.value.clamp(minimum, maximum);
            (range.value != value).then(|| {
                range.value = value;
                value
            })
        };
        self.notify(changed)
    }

    /// Set the step. Steps below 1 become 1.
    pub fn set_step(&self, step: i32) {
        self.range.lock().step = step.max(1);
    }

    pub fn step_up(&self) -> bool {
        let target = {
            let range = self.range.lock();
            range.value.saturating_add(range.step)
        };
        self.set_value(target)
    }

    pub fn step_down(&self) -> bool {
        let target = {
            let range = self.range.lock();
            range.value.saturating_sub(range.step)
        };
        self.set_value(target)
    }

    fn notify(&self, changed: Option<i32>) -> bool {
        match changed {
            Some(value) => {
                self.value_changed.emit(value);
                true
            }
            None => false,
        }
    }
}

impl Default for SpinBox {
    fn default() -> Self {
        Self::new()
    }
}

impl InputControl for SpinBox {
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
    fn test_value_is_clamped() {
        let spin = SpinBox::new().with_range(1, 10);
        assert_eq!(spin.value(), 1);
        assert!(spin.set_value(50));
        assert_eq!(spin.value(), 10);
        assert!(!spin.set_value(11));
    }

    #[test]
    fn test_swapped_range_and_reclamp() {
        let spin = SpinBox::new().with_range(10, 0).with_value(8);
        assert_eq!((spin.minimum(), spin.maximum()), (0, 10));
        assert!(spin.set_range(0, 5));
        assert_eq!(spin.value(), 5);
    }

    #[test]
    fn test_steps_emit_changes() {
        let spin = SpinBox::new().with_range(0, 10).with_step(4);
        let values = Arc::new(Mutex::new(Vec::new()));
        let values_clone = values.clone();
        spin.value_changed.connect(move |v| values_clone.lock().push(*v));

        spin.step_up();
        spin.step_up();
        spin.step_up();
        assert!(!spin.step_up());
        spin.step_down();

        assert_eq!(*values.lock(), vec![4, 8, 10, 6]);
    }

    #[test]
    fn test_wheel_ignored() {
        let spin = SpinBox::new().with_value(5);
        assert!(!spin.wheel(3));
        assert_eq!(spin.value(), 5);
    }
}
