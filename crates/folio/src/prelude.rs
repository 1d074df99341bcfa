//! Commonly used types.
//!
//! ```
//! use folio::prelude::*;
//! ```

// ============================================================================
// Signals
// ============================================================================

pub use folio_core::{ConnectionId, Property, Signal};

// ============================================================================
// Document
// ============================================================================

pub use crate::document::{
    Alignment, BlockFormat, BlockFormatDelta, CharFormat, CharFormatDelta, Color, EditingContext,
    MoveMode, MoveOperation, SelectionType,
};

// ============================================================================
// Components
// ============================================================================

pub use crate::component::{
    AlignmentComponent, ColorComponent, Component, CopyPasteComponent, FontComponent,
    FormatComponent, HistoryComponent, IndentComponent, PageComponent, PaginationComponent,
    TextComponent,
};

// ============================================================================
// Styles, widgets, editor
// ============================================================================

pub use crate::clipboard::{Clipboard, ClipboardPayload, MemoryClipboard};
pub use crate::config::EditorConfig;
pub use crate::editor::Editor;
pub use crate::style::{MemoryStyleStore, SortOrder, StyleRecord, StyleStore, StyleTableModel};
pub use crate::widget::{FormatToolbar, InputControl, ZoomSlider};
pub use crate::{Error, Result};
