//! Rich-text document model and the editing context built on it.
//!
//! - [`StyledDocument`]: text with character format runs and per-paragraph
//!   block formats
//! - [`TextCursor`]: position and selection, with grapheme and word movement
//! - [`UndoStack`]: snapshot history with typing coalescing
//! - [`EditingContext`]: the shared handle components operate on
//! - [`DocumentFragment`] and the [`markup`] codec: the copy/paste unit

mod context;
mod cursor;
mod format;
mod fragment;
mod history;
pub mod markup;
mod styled_document;

pub use context::{EditingContext, EditingState};
pub use cursor::{MoveMode, MoveOperation, SelectionType, TextCursor};
pub use format::{
    Alignment, BlockFormat, BlockFormatDelta, CharFormat, CharFormatDelta, Color,
};
pub use fragment::{DocumentFragment, FragmentBlock, FragmentSpan};
pub use history::{DEFAULT_UNDO_LIMIT, EditCommand, EditKind, UndoStack};
pub use styled_document::{FormatRun, StyledDocument};
