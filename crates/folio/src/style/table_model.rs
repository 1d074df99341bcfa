//! Table model over a style store.

use std::fmt;
use std::sync::{Arc, Weak};

use folio_core::logging::targets;
use folio_core::{ConnectionId, PerfSpan, Property, Signal};
use parking_lot::RwLock;

use super::record::StyleRecord;
use super::store::{SortOrder, StyleQuery, StyleStore};
use crate::error::Result;

/// Header of the single column.
pub const NAME_HEADER: &str = "Name";

/// Whether the model is waiting on its store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TableState {
    #[default]
    Idle,
    Querying,
}

/// A one-column table of style names, filtered and sorted by name.
///
/// The model is created behind an [`Arc`] because it subscribes to the
/// store's `changed` signal and refreshes itself whenever the store changes.
/// The subscription holds only a weak reference and is removed when the
/// model is dropped.
///
/// Search text and sort order are plain setters: they take effect at the
/// next [`update_table`](Self::update_table).
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use folio::style::{MemoryStyleStore, SortOrder, StyleRecord, StyleTableModel};
///
/// let store = Arc::new(MemoryStyleStore::with_records([
///     StyleRecord::paragraph("Heading 2"),
///     StyleRecord::paragraph("Body"),
///     StyleRecord::paragraph("Heading 1"),
/// ]));
/// let model = StyleTableModel::new(store.clone());
///
/// model.set_search_data("Head");
/// model.update_table().unwrap();
/// assert_eq!(model.data(0, 0).as_deref(), Some("Heading 1"));
///
/// model.set_sort_data(SortOrder::Descending);
/// model.update_table().unwrap();
/// assert_eq!(model.data(0, 0).as_deref(), Some("Heading 2"));
/// ```
pub struct StyleTableModel {
    store: Arc<dyn StyleStore>,
    connection: ConnectionId,
    query: RwLock<StyleQuery>,
    rows: RwLock<Vec<StyleRecord>>,
    state: Property<TableState>,
    /// Emitted just before the rows are replaced.
    pub model_about_to_reset: Signal<()>,
    /// Emitted after the rows were replaced.
    pub model_reset: Signal<()>,
}

impl StyleTableModel {
    /// Create a model over `store` and load its rows.
    ///
    /// A failing first query is logged and leaves the model empty.
    pub fn new(store: Arc<dyn StyleStore>) -> Arc<Self> {
        let model = Arc::new_cyclic(|weak: &Weak<Self>| {
            let weak = weak.clone();
            let connection = store.changed().connect(move |_| {
                if let Some(model) = weak.upgrade() {
                    model.refresh();
                }
            });
            Self {
                store,
                connection,
                query: RwLock::new(StyleQuery::default()),
                rows: RwLock::new(Vec::new()),
                state: Property::new(TableState::Idle),
                model_about_to_reset: Signal::new(),
                model_reset: Signal::new(),
            }
        });
        model.refresh();
        model
    }

    // =========================================================================
    // Query parameters
    // =========================================================================

    /// Set the name filter used by the next update.
    pub fn set_search_data(&self, search: impl Into<String>) {
        self.query.write().search = search.into();
    }

    /// Set the order used by the next update.
    pub fn set_sort_data(&self, sort: SortOrder) {
        self.query.write().sort = sort;
    }

    pub fn search_data(&self) -> String {
        self.query.read().search.clone()
    }

    pub fn sort_data(&self) -> SortOrder {
        self.query.read().sort
    }

    pub fn state(&self) -> TableState {
        self.state.get()
    }

    // =========================================================================
    // Refresh
    // =========================================================================

    /// Query the store with the current search text and order and publish
    /// the result.
    ///
    /// On failure the previous rows stay in place and nothing is emitted.
    pub fn update_table(&self) -> Result<()> {
        let _span = PerfSpan::new("update_table");
        let query = self.query.read().clone();

        self.state.set(TableState::Querying);
        let result = self.store.query(&query);
        self.state.set(TableState::Idle);

        match result {
            Ok(rows) => {
                let count = rows.len();
                self.model_about_to_reset.emit(());
                *self.rows.write() = rows;
                tracing::debug!(target: targets::STYLE, search = %query.search, sort = ?query.sort, rows = count, "style table updated");
                self.model_reset.emit(());
                Ok(())
            }
            Err(err) => {
                tracing::warn!(target: targets::STYLE, %err, "style query failed, keeping previous rows");
                Err(err)
            }
        }
    }

    fn refresh(&self) {
        // Errors are already logged; the previous rows stay.
        let _ = self.update_table();
    }

    // =========================================================================
    // Read API
    // =========================================================================

    pub fn row_count(&self) -> usize {
        self.rows.read().len()
    }

    pub fn column_count(&self) -> usize {
        1
    }

    /// The display text of a cell.
    pub fn data(&self, row: usize, column: usize) -> Option<String> {
        if column != 0 {
            return None;
        }
        self.rows.read().get(row).map(|record| record.name.clone())
    }

    /// The header of a column.
    pub fn header_data(&self, section: usize) -> Option<&'static str> {
        (section == 0).then_some(NAME_HEADER)
    }

    /// The full record behind a row.
    pub fn record(&self, row: usize) -> Option<StyleRecord> {
        self.rows.read().get(row).cloned()
    }

    /// The row showing the style called `name`.
    pub fn find_row(&self, name: &str) -> Option<usize> {
        self.rows.read().iter().position(|record| record.name == name)
    }

    /// A snapshot of all rows.
    pub fn rows(&self) -> Vec<StyleRecord> {
        self.rows.read().clone()
    }
}

impl Drop for StyleTableModel {
    fn drop(&mut self) {
        self.store.changed().disconnect(self.connection);
    }
}

impl fmt::Debug for StyleTableModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StyleTableModel")
            .field("query", &*self.query.read())
            .field("rows", &self.rows.read().len())
            .field("state", &self.state.get())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};

    use parking_lot::Mutex;

    use super::*;
    use crate::error::Error;
    use crate::style::MemoryStyleStore;

    fn names(model: &StyleTableModel) -> Vec<String> {
        (0..model.row_count())
            .filter_map(|row| model.data(row, 0))
            .collect()
    }

    fn store() -> Arc<MemoryStyleStore> {
        Arc::new(MemoryStyleStore::with_records(
            ["Heading 2", "Body", "Heading 1", "Caption"].map(StyleRecord::paragraph),
        ))
    }

    /// A store whose queries can be made to fail.
    #[derive(Default)]
    struct FlakyStore {
        inner: MemoryStyleStore,
        failing: AtomicBool,
    }

    impl StyleStore for FlakyStore {
        fn query(&self, query: &StyleQuery) -> Result<Vec<StyleRecord>> {
            if self.failing.load(Ordering::SeqCst) {
                return Err(Error::store("connection lost"));
            }
            self.inner.query(query)
        }

        fn changed(&self) -> &Signal<()> {
            self.inner.changed()
        }
    }

    #[test]
    fn test_loads_on_construction() {
        let model = StyleTableModel::new(store());
        assert_eq!(names(&model), ["Body", "Caption", "Heading 1", "Heading 2"]);
        assert_eq!(model.column_count(), 1);
        assert_eq!(model.header_data(0), Some("Name"));
        assert_eq!(model.header_data(1), None);
        assert_eq!(model.data(0, 1), None);
        assert_eq!(model.state(), TableState::Idle);
    }

    #[test]
    fn test_search_and_sort() {
        let model = StyleTableModel::new(store());
        let resets = Arc::new(Mutex::new(0));
        let resets_clone = resets.clone();
        model.model_reset.connect(move |_| *resets_clone.lock() += 1);

        model.set_search_data("Head");
        assert_eq!(model.search_data(), "Head");
        assert_eq!(model.row_count(), 4, "setters take effect on update");
        model.update_table().unwrap();
        assert_eq!(names(&model), ["Heading 1", "Heading 2"]);

        model.set_sort_data(model.sort_data().reversed());
        model.update_table().unwrap();
        assert_eq!(names(&model), ["Heading 2", "Heading 1"]);
        assert_eq!(model.rows()[0].name, "Heading 2");
        assert_eq!(*resets.lock(), 2);
    }

    #[test]
    fn test_refreshes_on_store_change() {
        let store = store();
        let model = StyleTableModel::new(store.clone());
        model.set_search_data("Head");
        model.update_table().unwrap();

        store.upsert(StyleRecord::paragraph("Heading 3"));
        assert_eq!(names(&model), ["Heading 1", "Heading 2", "Heading 3"]);
        assert_eq!(model.find_row("Heading 3"), Some(2));

        store.remove("Heading 1");
        assert_eq!(model.find_row("Heading 1"), None);
        assert_eq!(model.record(0).unwrap().name, "Heading 2");
    }

    #[test]
    fn test_drop_disconnects() {
        let store = store();
        let model = StyleTableModel::new(store.clone());
        assert_eq!(store.changed().connection_count(), 1);

        drop(model);
        assert_eq!(store.changed().connection_count(), 0);
        store.upsert(StyleRecord::paragraph("After"));
    }

    #[test]
    fn test_failed_query_keeps_rows() {
        let store = Arc::new(FlakyStore::default());
        store.inner.upsert(StyleRecord::paragraph("Body"));
        let model = StyleTableModel::new(store.clone());
        assert_eq!(model.row_count(), 1);

        store.failing.store(true, Ordering::SeqCst);
        model.set_search_data("nothing matches");
        assert!(matches!(model.update_table(), Err(Error::Store(_))));
        assert_eq!(names(&model), ["Body"]);

        // Change notifications swallow the error the same way.
        store.inner.upsert(StyleRecord::paragraph("Other"));
        assert_eq!(names(&model), ["Body"]);
    }
}
