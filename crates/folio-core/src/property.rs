//! Change-detecting properties.
//!
//! A [`Property`] wraps a value and reports whether a write actually changed
//! it. Components pair a property with a [`Signal`](crate::Signal) and emit
//! only when `set` returns `true`, which is how every setter in Folio stays
//! idempotent.
//!
//! # Example
//!
//! ```
//! use folio_core::{Property, Signal};
//!
//! struct PageNumbering {
//!     enabled: Property<bool>,
//!     toggled: Signal<bool>,
//! }
//!
//! impl PageNumbering {
//!     fn turn(&self, on: bool) {
//!         if self.enabled.set(on) {
//!             self.toggled.emit(on);
//!         }
//!     }
//! }
//!
//! let numbering = PageNumbering { enabled: Property::new(false), toggled: Signal::new() };
//! numbering.turn(true);
//! numbering.turn(true);
//! assert!(numbering.enabled.get());
//! ```

use std::fmt;

use parking_lot::RwLock;

/// A value behind a lock that knows when it changes.
///
/// `Property<T>` is `Send + Sync` whenever `T` is, so it can live in
/// components shared through `Arc`.
pub struct Property<T> {
    value: RwLock<T>,
}

impl<T: Clone> Property<T> {
    pub fn new(value: T) -> Self {
        Self {
            value: RwLock::new(value),
        }
    }

    /// A clone of the current value.
    pub fn get(&self) -> T {
        self.value.read().clone()
    }

    /// Borrow the value for the duration of `f`.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.value.read())
    }

    /// Overwrite the value with no change report. Used when mirroring state
    /// that must not echo back as a notification.
    pub fn set_silent(&self, value: T) {
        *self.value.write() = value;
    }
}

impl<T: Clone + PartialEq> Property<T> {
    /// Store `value`. Returns `true` only if it differs from the old value;
    /// the caller emits its notification in that case.
    pub fn set(&self, value: T) -> bool {
        let mut slot = self.value.write();
        if *slot == value {
            return false;
        }
        *slot = value;
        true
    }

    /// Modify the value in place. Returns `true` if `f` changed it.
    pub fn update(&self, f: impl FnOnce(&mut T)) -> bool {
        let mut slot = self.value.write();
        let before = slot.clone();
        f(&mut slot);
        *slot != before
    }
}

impl<T: Clone + Default> Default for Property<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for Property<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Property").field(&*self.value.read()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_reports_change() {
        let count = Property::new(3usize);
        assert!(!count.set(3));
        assert!(count.set(5));
        assert_eq!(count.get(), 5);
    }

    #[test]
    fn test_set_silent_overwrites() {
        let checked = Property::new(false);
        checked.set_silent(true);
        assert!(checked.get());
    }

    #[test]
    fn test_update_in_place() {
        let recent = Property::new(vec![1, 2]);
        assert!(recent.update(|v| v.push(3)));
        assert!(!recent.update(|v| v.retain(|_| true)));
        assert_eq!(recent.with(|v| v.len()), 3);
    }

    #[test]
    fn test_default_and_debug() {
        let text: Property<String> = Property::default();
        assert_eq!(text.get(), "");
        assert_eq!(format!("{text:?}"), "Property(\"\")");
    }
}
