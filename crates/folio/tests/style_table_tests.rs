//! Style table model over in-memory and JSON stores.

use std::sync::Arc;

use folio::document::{BlockFormatDelta, CharFormatDelta};
use folio::style::{
    JsonStyleStore, MemoryStyleStore, NAME_HEADER, SortOrder, StyleRecord, StyleTableModel,
    TableState,
};

fn names(model: &StyleTableModel) -> Vec<String> {
    (0..model.row_count())
        .filter_map(|row| model.data(row, 0))
        .collect()
}

fn sample_store() -> Arc<MemoryStyleStore> {
    Arc::new(MemoryStyleStore::with_records([
        StyleRecord::paragraph("Heading 2"),
        StyleRecord::paragraph("Body"),
        StyleRecord::paragraph("Heading 1"),
        StyleRecord::character("Header Footer"),
        StyleRecord::paragraph("Subheading"),
    ]))
}

#[test]
fn test_search_filters_and_sort_toggles() {
    let model = StyleTableModel::new(sample_store());
    assert_eq!(model.row_count(), 5);
    assert_eq!(model.header_data(0), Some(NAME_HEADER));

    model.set_search_data("Head");
    // Setters take effect at the next update.
    assert_eq!(model.row_count(), 5);
    model.update_table().unwrap();
    assert_eq!(names(&model), ["Header Footer", "Heading 1", "Heading 2"]);

    model.set_sort_data(model.sort_data().reversed());
    model.update_table().unwrap();
    assert_eq!(names(&model), ["Heading 2", "Heading 1", "Header Footer"]);
    assert_eq!(model.state(), TableState::Idle);
}

#[test]
fn test_search_only_keeps_names_containing_the_text() {
    let model = StyleTableModel::new(sample_store());
    model.set_search_data("Head");
    model.set_sort_data(SortOrder::Ascending);
    model.update_table().unwrap();

    let rows = names(&model);
    assert!(rows.iter().all(|name| name.contains("Head")));
    assert!(!rows.contains(&"Subheading".to_string()));

    model.set_search_data("heading");
    model.update_table().unwrap();
    assert_eq!(names(&model), ["Subheading"]);
}

#[test]
fn test_store_changes_refresh_model() {
    let store = sample_store();
    let model = StyleTableModel::new(store.clone());
    model.set_search_data("Head");
    model.update_table().unwrap();

    store.upsert(StyleRecord::paragraph("Headline"));
    assert_eq!(model.find_row("Headline"), Some(3));
    store.remove("Heading 1");
    assert_eq!(names(&model), ["Header Footer", "Heading 2", "Headline"]);
}

#[test]
fn test_json_store_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("styles.json");

    let store = Arc::new(JsonStyleStore::open(&path).unwrap());
    store
        .upsert(
            StyleRecord::paragraph("Title")
                .with_char_format(CharFormatDelta::new().with_bold(true).with_font_size(24.0))
                .with_block_format(BlockFormatDelta::new().with_indent(48)),
        )
        .unwrap();
    store.upsert(StyleRecord::character("Code")).unwrap();
    drop(store);

    let reopened = Arc::new(JsonStyleStore::open(&path).unwrap());
    let model = StyleTableModel::new(reopened.clone());
    assert_eq!(names(&model), ["Code", "Title"]);

    let title = model.record(1).unwrap();
    assert_eq!(title.char_format.bold, Some(true));
    assert_eq!(title.block_format.indent, Some(48));
}
