//! Core systems for Folio.
//!
//! This crate provides the notification fabric the editing layer is built on:
//!
//! - **Signal/Slot System**: Type-safe, synchronous, ordered notifications
//! - **Property System**: Change-detecting values that pair with signals
//! - **Logging**: `tracing` targets and a performance span guard
//!
//! # Example
//!
//! ```
//! use folio_core::{Property, Signal};
//!
//! struct Toggle {
//!     enabled: Property<bool>,
//!     toggled: Signal<bool>,
//! }
//!
//! impl Toggle {
//!     fn set_enabled(&self, enabled: bool) {
//!         if self.enabled.set(enabled) {
//!             self.toggled.emit(enabled);
//!         }
//!     }
//! }
//!
//! let toggle = Toggle { enabled: Property::new(false), toggled: Signal::new() };
//! toggle.toggled.connect(|on| println!("toggled: {on}"));
//! toggle.set_enabled(true);
//! toggle.set_enabled(true); // no second notification
//! ```

mod error;
pub mod logging;
pub mod property;
pub mod signal;

pub use error::{CoreError, Result, SignalError};
pub use logging::PerfSpan;
pub use property::Property;
pub use signal::{ConnectionId, Signal};
