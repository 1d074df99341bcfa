//! Style stores.

use std::fmt;

use folio_core::Signal;
use folio_core::logging::targets;
use parking_lot::RwLock;

use super::record::StyleRecord;
use crate::error::Result;

/// Row order of a style query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    /// The opposite order.
    pub fn reversed(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

/// Which styles to fetch and in what order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StyleQuery {
    /// Name substring, matched case-sensitively. Empty matches every style.
    pub search: String,
    /// Order by name.
    pub sort: SortOrder,
}

impl StyleQuery {
    pub fn new(search: impl Into<String>, sort: SortOrder) -> Self {
        Self {
            search: search.into(),
            sort,
        }
    }

    /// Check whether a style name passes the search filter.
    pub fn matches(&self, name: &str) -> bool {
        name.contains(self.search.as_str())
    }

    /// Filter and order records.
    ///
    /// The sort is stable, so records with equal names keep their original
    /// order in both directions.
    pub fn apply<'a>(&self, records: impl IntoIterator<Item = &'a StyleRecord>) -> Vec<StyleRecord> {
        let mut rows: Vec<StyleRecord> = records
            .into_iter()
            .filter(|record| self.matches(&record.name))
            .cloned()
            .collect();
        match self.sort {
            SortOrder::Ascending => rows.sort_by(|a, b| a.name.cmp(&b.name)),
            SortOrder::Descending => rows.sort_by(|a, b| b.name.cmp(&a.name)),
        }
        rows
    }
}

/// A source of style records.
pub trait StyleStore: Send + Sync {
    /// Fetch the records matching `query`, in its order.
    fn query(&self, query: &StyleQuery) -> Result<Vec<StyleRecord>>;

    /// Signal emitted after the stored records changed.
    fn changed(&self) -> &Signal<()>;
}

/// Insert `record`, replacing a record of the same name in place.
/// Returns `false` if an identical record was already stored.
pub(crate) fn upsert_into(records: &mut Vec<StyleRecord>, record: StyleRecord) -> bool {
    match records.iter_mut().find(|existing| existing.name == record.name) {
        Some(existing) if *existing == record => false,
        Some(existing) => {
            *existing = record;
            true
        }
        None => {
            records.push(record);
            true
        }
    }
}

/// Remove the record called `name`.
pub(crate) fn remove_from(records: &mut Vec<StyleRecord>, name: &str) -> Option<StyleRecord> {
    let index = records.iter().position(|record| record.name == name)?;
    Some(records.remove(index))
}

/// An in-memory style store keeping records in insertion order.
#[derive(Default)]
pub struct MemoryStyleStore {
    records: RwLock<Vec<StyleRecord>>,
    changed: Signal<()>,
}

impl MemoryStyleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding `records`. Later duplicates replace earlier
    /// records of the same name.
    pub fn with_records(records: impl IntoIterator<Item = StyleRecord>) -> Self {
        let mut stored = Vec::new();
        for record in records {
            upsert_into(&mut stored, record);
        }
        Self {
            records: RwLock::new(stored),
            changed: Signal::new(),
        }
    }

    /// Insert or replace a record. Returns `true` if the store changed.
    pub fn upsert(&self, record: StyleRecord) -> bool {
        let name = record.name.clone();
        let changed = upsert_into(&mut self.records.write(), record);
        if changed {
            tracing::debug!(target: targets::STYLE, name = %name, "stored style");
            self.changed.emit(());
        }
        changed
    }

    /// Remove the record called `name`, returning it.
    pub fn remove(&self, name: &str) -> Option<StyleRecord> {
        let removed = remove_from(&mut self.records.write(), name);
        if removed.is_some() {
            tracing::debug!(target: targets::STYLE, name, "removed style");
            self.changed.emit(());
        }
        removed
    }

    pub fn get(&self, name: &str) -> Option<StyleRecord> {
        self.records
            .read()
            .iter()
            .find(|record| record.name == name)
            .cloned()
    }

    /// All records in insertion order.
    pub fn records(&self) -> Vec<StyleRecord> {
        self.records.read().clone()
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

impl StyleStore for MemoryStyleStore {
    fn query(&self, query: &StyleQuery) -> Result<Vec<StyleRecord>> {
        Ok(query.apply(self.records.read().iter()))
    }

    fn changed(&self) -> &Signal<()> {
        &self.changed
    }
}

impl fmt::Debug for MemoryStyleStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryStyleStore")
            .field("records", &self.records.read().len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use parking_lot::Mutex;

    use super::*;
    use crate::style::StyleKind;

    fn names(records: &[StyleRecord]) -> Vec<&str> {
        records.iter().map(|record| record.name.as_str()).collect()
    }

    fn store() -> MemoryStyleStore {
        MemoryStyleStore::with_records(
            ["Heading 2", "Body", "Heading 1", "Quote", "Subheading"].map(StyleRecord::paragraph),
        )
    }

    #[test]
    fn test_query_filters_and_orders() {
        let store = store();

        let rows = store.query(&StyleQuery::new("Head", SortOrder::Ascending)).unwrap();
        assert_eq!(names(&rows), ["Heading 1", "Heading 2"]);

        let rows = store.query(&StyleQuery::new("Head", SortOrder::Descending)).unwrap();
        assert_eq!(names(&rows), ["Heading 2", "Heading 1"]);

        let rows = store.query(&StyleQuery::default()).unwrap();
        assert_eq!(rows.len(), 5);
    }

    #[test]
    fn test_search_is_case_sensitive() {
        let rows = store().query(&StyleQuery::new("head", SortOrder::Ascending)).unwrap();
        assert_eq!(names(&rows), ["Subheading"]);
        assert!(store().query(&StyleQuery::new("QUO", SortOrder::Ascending)).unwrap().is_empty());
    }

    #[test]
    fn test_ties_keep_insertion_order() {
        let mut first = StyleRecord::paragraph("Same");
        first.kind = StyleKind::Character;
        let second = StyleRecord::paragraph("Same");
        let query = StyleQuery::new("", SortOrder::Descending);

        let rows = query.apply([&first, &second]);
        assert_eq!(rows, vec![first.clone(), second.clone()]);
    }

    #[test]
    fn test_upsert_and_remove_notify() {
        let store = MemoryStyleStore::new();
        let count = Arc::new(Mutex::new(0));
        let count_clone = count.clone();
        store.changed().connect(move |_| *count_clone.lock() += 1);

        assert!(store.upsert(StyleRecord::paragraph("Body")));
        assert!(!store.upsert(StyleRecord::paragraph("Body")));
        assert!(store.upsert(StyleRecord::character("Body")));
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("Body").unwrap().kind, StyleKind::Character);

        assert!(store.remove("Body").is_some());
        assert!(store.remove("Body").is_none());
        assert!(store.is_empty());
        assert_eq!(*count.lock(), 3);
    }
}
