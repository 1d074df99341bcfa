//! Editor composition.
//!
//! An [`Editor`] wires one word-processor window's worth of pieces
//! together: the body surface with its formatting components, a header and a
//! footer surface, the formatting toolbar, the zoom slider and the style
//! table. Every mutation anywhere is forwarded to
//! [`Editor::repaint_requested`] so a host needs a single connection to know
//! when to redraw.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use folio::clipboard::MemoryClipboard;
//! use folio::config::EditorConfig;
//! use folio::editor::Editor;
//!
//! let editor = Editor::with_clipboard(EditorConfig::default(), Arc::new(MemoryClipboard::new()))?;
//! editor.repaint_requested().connect(|_| println!("repaint"));
//!
//! editor.header().page.add_page(2);
//! editor.body().insert_text("Chapter one");
//! assert_eq!(editor.status().header_pages, 2);
//! # Ok::<(), folio::Error>(())
//! ```

use std::fmt;
use std::sync::Arc;

use folio_core::Signal;
use folio_core::logging::targets;

use crate::clipboard::{Clipboard, default_clipboard};
use crate::component::{
    AlignmentComponent, ColorComponent, Component, CopyPasteComponent, FontComponent,
    FormatComponent, HistoryComponent, IndentComponent, PageComponent, PaginationComponent,
    TextComponent,
};
use crate::config::EditorConfig;
use crate::document::EditingContext;
use crate::error::Result;
use crate::style::{JsonStyleStore, MemoryStyleStore, StyleApplier, StyleStore, StyleTableModel};
use crate::widget::{FormatToolbar, SpinBox, ZoomSlider};

// ============================================================================
// Body
// ============================================================================

/// The formatting, history and clipboard components of the body surface.
pub struct BodyComponents {
    pub font: Arc<FontComponent>,
    pub format: Arc<FormatComponent>,
    pub color: Arc<ColorComponent>,
    pub indent: Arc<IndentComponent>,
    pub alignment: Arc<AlignmentComponent>,
    pub history: Arc<HistoryComponent>,
    pub copy_paste: Arc<CopyPasteComponent>,
    pub styles: Arc<StyleApplier>,
}

impl BodyComponents {
    /// Build every body component over `context`.
    pub fn new(context: &EditingContext, indent_step: u32, clipboard: Arc<dyn Clipboard>) -> Self {
        Self {
            font: Arc::new(FontComponent::new(context.clone())),
            format: Arc::new(FormatComponent::new(context.clone())),
            color: Arc::new(ColorComponent::new(context.clone())),
            indent: Arc::new(IndentComponent::with_step(context.clone(), indent_step)),
            alignment: Arc::new(AlignmentComponent::new(context.clone())),
            history: Arc::new(HistoryComponent::new(context.clone())),
            copy_paste: Arc::new(CopyPasteComponent::new(context.clone(), clipboard)),
            styles: Arc::new(StyleApplier::new(context.clone())),
        }
    }

    /// Every component's `applied` signal.
    pub(crate) fn applied_signals(&self) -> [&Signal<()>; 8] {
        [
            self.font.applied(),
            self.format.applied(),
            self.color.applied(),
            self.indent.applied(),
            self.alignment.applied(),
            self.history.applied(),
            self.copy_paste.applied(),
            &self.styles.applied,
        ]
    }
}

// ============================================================================
// Header / Footer
// ============================================================================

/// Highest page number the starting-number spin box offers.
pub const MAX_STARTING_NUMBER: i32 = 9999;

/// A header or footer surface: its own document plus page, pagination and
/// free-text components, and the spin box that edits the first page number.
pub struct HeaderFooter {
    context: EditingContext,
    pub page: Arc<PageComponent>,
    pub pagination: Arc<PaginationComponent>,
    pub text: Arc<TextComponent>,
    pub starting_number: Arc<SpinBox>,
}

impl HeaderFooter {
    pub fn new(undo_limit: usize) -> Self {
        let context = EditingContext::with_undo_limit(undo_limit);
        let page = Arc::new(PageComponent::new(context.clone()));
        let pagination = Arc::new(PaginationComponent::new(page.clone()));
        let first = i32::try_from(pagination.starting_number()).unwrap_or(MAX_STARTING_NUMBER);
        let starting_number = Arc::new(
            SpinBox::new()
                .with_range(0, MAX_STARTING_NUMBER)
                .with_value(first),
        );
        bind_starting_number(&starting_number, &pagination);
        Self {
            text: Arc::new(TextComponent::new()),
            pagination,
            starting_number,
            page,
            context,
        }
    }

    /// The surface's editing context.
    pub fn context(&self) -> &EditingContext {
        &self.context
    }

    fn applied_signals(&self) -> [&Signal<()>; 3] {
        [
            self.page.applied(),
            &self.pagination.applied,
            &self.text.applied,
        ]
    }
}

/// Keep `spin` and the starting number of `pagination` in step, in both
/// directions.
fn bind_starting_number(spin: &Arc<SpinBox>, pagination: &Arc<PaginationComponent>) {
    let weak_pagination = Arc::downgrade(pagination);
    spin.value_changed.connect(move |&value| {
        if let (Some(pagination), Ok(number)) = (weak_pagination.upgrade(), u32::try_from(value)) {
            pagination.set_pagination_starting_number(number);
        }
    });

    let weak_spin = Arc::downgrade(spin);
    pagination.starting_number_changed.connect(move |&number| {
        let Some(spin) = weak_spin.upgrade() else {
            return;
        };
        let value = i32::try_from(number).unwrap_or(MAX_STARTING_NUMBER);
        let was_blocked = spin.value_changed.is_blocked();
        spin.value_changed.set_blocked(true);
        spin.set_value(value);
        spin.value_changed.set_blocked(was_blocked);
    });
}

// ============================================================================
// Editor
// ============================================================================

/// Snapshot for a status bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditorStatus {
    /// Zero-based block under the body cursor.
    pub block: usize,
    /// Zero-based grapheme column in that block.
    pub column: usize,
    /// Zoom percentage.
    pub zoom: i32,
    /// Pages in the header surface.
    pub header_pages: usize,
}

impl fmt::Display for EditorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Ln {}, Col {} | {}% | {} header page(s)",
            self.block + 1,
            self.column + 1,
            self.zoom,
            self.header_pages
        )
    }
}

/// One editing window: body, header, footer, toolbar, zoom and styles.
pub struct Editor {
    config: EditorConfig,
    body: EditingContext,
    components: BodyComponents,
    header: HeaderFooter,
    footer: HeaderFooter,
    toolbar: Arc<FormatToolbar>,
    zoom: Arc<ZoomSlider>,
    style_store: Arc<dyn StyleStore>,
    style_table: Arc<StyleTableModel>,
    repaint_requested: Arc<Signal<()>>,
}

impl Editor {
    /// Create an editor on the system clipboard.
    ///
    /// Styles persist to `config.style_store_path` when set and live in
    /// memory otherwise.
    pub fn new(config: EditorConfig) -> Result<Self> {
        Self::with_clipboard(config, default_clipboard())
    }

    /// Create an editor on the given clipboard.
    pub fn with_clipboard(config: EditorConfig, clipboard: Arc<dyn Clipboard>) -> Result<Self> {
        let store: Arc<dyn StyleStore> = match &config.style_store_path {
            Some(path) => Arc::new(JsonStyleStore::open(path)?),
            None => Arc::new(MemoryStyleStore::new()),
        };
        Self::with_parts(config, clipboard, store)
    }

    /// Create an editor from explicit collaborators.
    pub fn with_parts(
        config: EditorConfig,
        clipboard: Arc<dyn Clipboard>,
        style_store: Arc<dyn StyleStore>,
    ) -> Result<Self> {
        config.validate()?;

        let body = EditingContext::with_undo_limit(config.undo_limit);
        let components = BodyComponents::new(&body, config.indent_step, clipboard);
        let header = HeaderFooter::new(config.undo_limit);
        let footer = HeaderFooter::new(config.undo_limit);
        let toolbar = FormatToolbar::new(&config);
        let zoom = Arc::new(ZoomSlider::from_config(&config.zoom));
        let style_table = StyleTableModel::new(style_store.clone());

        // Toolbar slots run before the repaint forwarding slots.
        toolbar.bind(body.clone(), &components);

        let editor = Self {
            config,
            body,
            components,
            header,
            footer,
            toolbar,
            zoom,
            style_store,
            style_table,
            repaint_requested: Arc::new(Signal::new()),
        };
        editor.forward_repaints();
        tracing::debug!(target: targets::COMPONENT, "editor created");
        Ok(editor)
    }

    fn forward_repaints(&self) {
        let signals = self
            .components
            .applied_signals()
            .into_iter()
            .chain(self.header.applied_signals())
            .chain(self.footer.applied_signals());
        for signal in signals {
            let repaint = self.repaint_requested.clone();
            signal.connect(move |_| repaint.emit(()));
        }
        let repaint = self.repaint_requested.clone();
        self.zoom.value_changed.connect(move |_| repaint.emit(()));
        let repaint = self.repaint_requested.clone();
        self.style_table.model_reset.connect(move |_| repaint.emit(()));
    }

    /// Emitted after any mutation of any surface, the zoom or the style
    /// table.
    pub fn repaint_requested(&self) -> &Signal<()> {
        &self.repaint_requested
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// The body surface.
    pub fn body(&self) -> &EditingContext {
        &self.body
    }

    pub fn body_components(&self) -> &BodyComponents {
        &self.components
    }

    pub fn header(&self) -> &HeaderFooter {
        &self.header
    }

    pub fn footer(&self) -> &HeaderFooter {
        &self.footer
    }

    pub fn toolbar(&self) -> &Arc<FormatToolbar> {
        &self.toolbar
    }

    pub fn zoom(&self) -> &Arc<ZoomSlider> {
        &self.zoom
    }

    pub fn style_store(&self) -> &Arc<dyn StyleStore> {
        &self.style_store
    }

    pub fn style_table(&self) -> &Arc<StyleTableModel> {
        &self.style_table
    }

    /// Tell the editor the body cursor moved without an edit, so the
    /// toolbar shows the format under it.
    pub fn cursor_moved(&self) {
        self.toolbar.sync();
    }

    /// Apply the style listed at `row` of the style table to the body.
    pub fn apply_style_row(&self, row: usize) -> bool {
        match self.style_table.record(row) {
            Some(record) => self.components.styles.apply(&record),
            None => {
                tracing::trace!(target: targets::STYLE, row, "no style at row");
                false
            }
        }
    }

    pub fn status(&self) -> EditorStatus {
        EditorStatus {
            block: self.body.block_number(),
            column: self.body.column(),
            zoom: self.zoom.value(),
            header_pages: self.header.page.page_count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use parking_lot::Mutex;

    use super::*;
    use crate::clipboard::MemoryClipboard;
    use crate::style::StyleRecord;

    fn editor() -> Editor {
        Editor::with_clipboard(EditorConfig::default(), Arc::new(MemoryClipboard::new())).unwrap()
    }

    fn repaints(editor: &Editor) -> Arc<Mutex<usize>> {
        let count = Arc::new(Mutex::new(0));
        let count_clone = count.clone();
        editor.repaint_requested().connect(move |_| *count_clone.lock() += 1);
        count
    }

    #[test]
    fn test_repaint_forwarding() {
        let editor = editor();
        let count = repaints(&editor);

        editor.body().insert_text("abc");
        editor.body_components().format.turn_bold(true);
        editor.header().page.add_page(1);
        editor.footer().pagination.set_pagination_turned(true);
        editor.footer().text.set_text("Confidential");
        editor.zoom().zoom_in();
        assert_eq!(*count.lock(), 5);

        // No-ops do not repaint.
        editor.footer().pagination.set_pagination_turned(true);
        editor.body_components().indent.indent_paragraph_left();
        assert_eq!(*count.lock(), 5);
    }

    #[test]
    fn test_status() {
        let editor = editor();
        editor.body().insert_text("one\ntwo");
        editor.header().page.add_page(2);

        let status = editor.status();
        assert_eq!(
            status,
            EditorStatus {
                block: 1,
                column: 3,
                zoom: 100,
                header_pages: 2,
            }
        );
        assert_eq!(status.to_string(), "Ln 2, Col 4 | 100% | 2 header page(s)");
    }

    #[test]
    fn test_apply_style_row() {
        let store = Arc::new(MemoryStyleStore::new());
        let editor = Editor::with_parts(
            EditorConfig::default(),
            Arc::new(MemoryClipboard::new()),
            store.clone(),
        )
        .unwrap();
        store.upsert(StyleRecord::character("Emphasis").with_char_format(
            crate::document::CharFormatDelta::new().with_italic(true),
        ));
        assert_eq!(editor.style_table().row_count(), 1);

        editor.body().insert_text("word");
        editor.body().select(crate::document::SelectionType::Document);
        assert!(editor.apply_style_row(0));
        assert!(editor.body().char_format().italic);
        assert!(editor.toolbar().italic.is_checked());
        assert!(!editor.apply_style_row(1));
    }

    #[test]
    fn test_header_and_footer_are_independent() {
        let editor = editor();
        editor.header().page.add_page(3);
        assert_eq!(editor.footer().page.page_count(), 0);
        assert_eq!(editor.header().context().block_count(), 4);
        assert!(!editor.header().context().ptr_eq(editor.footer().context()));
    }

    #[test]
    fn test_starting_number_spin_box_round_trip() {
        let editor = editor();
        let header = editor.header();
        let count = repaints(&editor);
        assert_eq!(header.starting_number.value(), 1);

        // Gesture on the control reaches the component.
        assert!(header.starting_number.set_value(5));
        assert_eq!(header.pagination.starting_number(), 5);

        // A component change shows up on the control.
        let echoed = Arc::new(Mutex::new(0));
        let echoed_clone = echoed.clone();
        header.starting_number.value_changed.connect(move |_| *echoed_clone.lock() += 1);
        assert!(header.pagination.set_pagination_starting_number(12));
        assert_eq!(header.starting_number.value(), 12);
        assert_eq!(*echoed.lock(), 0);

        assert_eq!(editor.footer().pagination.starting_number(), 1);
        assert_eq!(*count.lock(), 2);
    }

    #[test]
    fn test_header_undo_keeps_pages_and_blocks_in_step() {
        let editor = editor();
        let header = editor.header();
        header.context().insert_text("Title");
        header.page.add_page(2);

        assert!(!header.context().undo());
        assert_eq!(header.page.remove_page(2), 2);
        assert_eq!(header.page.page_count(), 0);
        assert_eq!(header.context().block_count(), 1);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = EditorConfig {
            indent_step: 0,
            ..EditorConfig::default()
        };
        assert!(Editor::with_clipboard(config, Arc::new(MemoryClipboard::new())).is_err());
    }
}
