//! Named styles: records, stores and the table model that lists them.
//!
//! - [`StyleRecord`]: a named bundle of char and block attributes
//! - [`StyleStore`]: where records live; [`MemoryStyleStore`] keeps them in
//!   memory and [`JsonStyleStore`] persists them to a JSON file
//! - [`StyleTableModel`]: a one-column view of a store, filtered by name and
//!   sorted, refreshed whenever the store changes
//! - [`StyleApplier`]: applies a record at the cursor

mod applier;
mod json_store;
mod record;
mod store;
mod table_model;

pub use applier::StyleApplier;
pub use json_store::JsonStyleStore;
pub use record::{StyleKind, StyleRecord};
pub use store::{MemoryStyleStore, SortOrder, StyleQuery, StyleStore};
pub use table_model::{NAME_HEADER, StyleTableModel, TableState};
