//! A style store persisted as a JSON file.

use std::fmt;
use std::path::{Path, PathBuf};

use folio_core::Signal;
use folio_core::logging::targets;
use parking_lot::RwLock;

use super::record::StyleRecord;
use super::store::{StyleQuery, StyleStore, remove_from, upsert_into};
use crate::error::{Error, Result};
use crate::persist;

/// A style store backed by a JSON array of records on disk.
///
/// Every mutation rewrites the file atomically before it takes effect in
/// memory, so a failed write leaves both the file and the store unchanged.
///
/// # Example
///
/// ```no_run
/// use folio::style::{JsonStyleStore, StyleRecord};
///
/// let store = JsonStyleStore::open("styles.json")?;
/// store.upsert(StyleRecord::paragraph("Heading 1"))?;
/// # Ok::<(), folio::Error>(())
/// ```
pub struct JsonStyleStore {
    path: PathBuf,
    records: RwLock<Vec<StyleRecord>>,
    changed: Signal<()>,
}

impl JsonStyleStore {
    /// Open the store at `path`. A missing file opens an empty store; the
    /// file is created by the first mutation.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let records = if path.exists() {
            let content = persist::read_text(&path)?;
            let mut records = Vec::new();
            for record in serde_json::from_str::<Vec<StyleRecord>>(&content)
                .map_err(|err| Error::json(&path, err))?
            {
                upsert_into(&mut records, record);
            }
            records
        } else {
            Vec::new()
        };
        tracing::debug!(target: targets::STYLE, path = %path.display(), styles = records.len(), "opened style store");
        Ok(Self {
            path,
            records: RwLock::new(records),
            changed: Signal::new(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Insert or replace a record. Returns `true` if the store changed.
    pub fn upsert(&self, record: StyleRecord) -> Result<bool> {
        self.mutate(|records| upsert_into(records, record))
    }

    /// Remove the record called `name`, returning it.
    pub fn remove(&self, name: &str) -> Result<Option<StyleRecord>> {
        let mut removed = None;
        self.mutate(|records| {
            removed = remove_from(records, name);
            removed.is_some()
        })?;
        Ok(removed)
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

    /// Apply `change` to a copy of the records and, if it reports a change,
    /// write the copy out and commit it.
    fn mutate(&self, change: impl FnOnce(&mut Vec<StyleRecord>) -> bool) -> Result<bool> {
        {
            let mut records = self.records.write();
            let mut updated = records.clone();
            if !change(&mut updated) {
                return Ok(false);
            }
            let json = serde_json::to_vec_pretty(&updated).map_err(|err| Error::json(&self.path, err))?;
            if let Err(err) = persist::atomic_write(&self.path, &json) {
                tracing::warn!(target: targets::STYLE, path = %self.path.display(), %err, "could not save styles");
                return Err(err);
            }
            *records = updated;
        }
        tracing::debug!(target: targets::STYLE, path = %self.path.display(), "saved styles");
        self.changed.emit(());
        Ok(true)
    }
}

impl StyleStore for JsonStyleStore {
    fn query(&self, query: &StyleQuery) -> Result<Vec<StyleRecord>> {
        Ok(query.apply(self.records.read().iter()))
    }

    fn changed(&self) -> &Signal<()> {
        &self.changed
    }
}

impl fmt::Debug for JsonStyleStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonStyleStore")
            .field("path", &self.path)
            .field("records", &self.records.read().len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::CharFormatDelta;
    use crate::style::SortOrder;

    #[test]
    fn test_missing_file_opens_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStyleStore::open(dir.path().join("styles.json")).unwrap();
        assert!(store.is_empty());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("styles.json");

        let store = JsonStyleStore::open(&path).unwrap();
        let heading = StyleRecord::paragraph("Heading 1")
            .with_char_format(CharFormatDelta::new().with_bold(true));
        assert!(store.upsert(heading.clone()).unwrap());
        assert!(store.upsert(StyleRecord::character("Emphasis")).unwrap());
        assert!(store.remove("Emphasis").unwrap().is_some());
        drop(store);

        let reopened = JsonStyleStore::open(&path).unwrap();
        assert_eq!(reopened.records(), vec![heading]);
        let rows = reopened
            .query(&StyleQuery::new("Head", SortOrder::Ascending))
            .unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_noop_remove_does_not_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("styles.json");
        let store = JsonStyleStore::open(&path).unwrap();

        assert!(store.remove("absent").unwrap().is_none());
        assert!(!path.exists());
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("styles.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(matches!(JsonStyleStore::open(&path), Err(Error::Json { .. })));
    }
}
