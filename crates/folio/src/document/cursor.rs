//! Text cursor: a position and selection into a [`StyledDocument`].
//!
//! The cursor stores byte offsets only; every movement takes the document it
//! moves over, so a cursor can never outlive or disagree with the text it
//! points into for longer than one edit. Offsets always sit on grapheme or
//! char boundaries.

use std::ops::Range;

use unicode_segmentation::UnicodeSegmentation;

use super::format::CharFormat;
use super::styled_document::StyledDocument;

/// Where a cursor movement goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveOperation {
    /// Start of the document.
    Start,
    /// End of the document.
    End,
    /// Start of the current block.
    StartOfBlock,
    /// End of the current block, before its newline.
    EndOfBlock,
    /// One grapheme back.
    PreviousCharacter,
    /// One grapheme forward.
    NextCharacter,
    /// Start of the previous word.
    PreviousWord,
    /// End of the next word.
    NextWord,
    /// Start of the previous block.
    PreviousBlock,
    /// Start of the next block.
    NextBlock,
}

/// Whether a movement drags the anchor along or extends the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MoveMode {
    #[default]
    MoveAnchor,
    KeepAnchor,
}

/// Units for [`TextCursor::select`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectionType {
    WordUnderCursor,
    BlockUnderCursor,
    Document,
}

/// A position and optional selection inside a document.
///
/// The selection is the range between `anchor` and `position`; it is empty
/// when both are equal. With no selection, a pending char format set through
/// the formatting components applies to the next insertion and is dropped
/// when the cursor moves.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextCursor {
    position: usize,
    anchor: usize,
    pending_format: Option<CharFormat>,
}

impl TextCursor {
    /// Create a cursor at the start of a document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cursor at `position` with no selection.
    pub fn at(doc: &StyledDocument, position: usize) -> Self {
        let position = doc.clamp_position(position);
        Self {
            position,
            anchor: position,
            pending_format: None,
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn anchor(&self) -> usize {
        self.anchor
    }

    /// Check if the cursor has a non-empty selection.
    pub fn has_selection(&self) -> bool {
        self.position != self.anchor
    }

    /// The selected byte range, ordered.
    pub fn selection_range(&self) -> Range<usize> {
        self.position.min(self.anchor)..self.position.max(self.anchor)
    }

    pub fn selection_start(&self) -> usize {
        self.position.min(self.anchor)
    }

    pub fn selection_end(&self) -> usize {
        self.position.max(self.anchor)
    }

    /// Collapse the selection onto the position.
    pub fn clear_selection(&mut self) {
        self.anchor = self.position;
    }

    /// The selected text.
    pub fn selected_text<'a>(&self, doc: &'a StyledDocument) -> &'a str {
        let range = self.selection_range();
        &doc.text()[doc.clamp_position(range.start)..doc.clamp_position(range.end)]
    }

    /// Index of the block holding the position.
    pub fn block_number(&self, doc: &StyledDocument) -> usize {
        doc.paragraph_at(self.position)
    }

    /// Grapheme column of the position within its block.
    pub fn column(&self, doc: &StyledDocument) -> usize {
        let block = self.block_number(doc);
        let start = doc.paragraph_range(block).map_or(0, |range| range.start);
        doc.text()[start..self.position].graphemes(true).count()
    }

    /// Blocks touched by the selection, or the position's block.
    pub fn block_range(&self, doc: &StyledDocument) -> Range<usize> {
        doc.paragraphs_in(&self.selection_range())
    }

    /// Move to an absolute position.
    pub fn set_position(&mut self, doc: &StyledDocument, position: usize, mode: MoveMode) {
        let position = doc.clamp_position(position);
        if position != self.position {
            self.pending_format = None;
        }
        self.position = position;
        if mode == MoveMode::MoveAnchor {
            self.anchor = position;
        }
    }

    /// Perform a movement `count` times.
    ///
    /// Returns `true` if every step moved. A movement that cannot proceed
    /// (e.g. `NextCharacter` at the end) stops early; the cursor keeps the
    /// progress made so far.
    pub fn move_position(
        &mut self,
        doc: &StyledDocument,
        operation: MoveOperation,
        mode: MoveMode,
        count: usize,
    ) -> bool {
        let mut position = doc.clamp_position(self.position);
        let mut complete = true;

        for _ in 0..count {
            match target(doc, position, operation) {
                Some(next) => position = next,
                None => {
                    complete = false;
                    break;
                }
            }
        }

        self.set_position(doc, position, mode);
        complete
    }

    /// Select a unit around the cursor.
    pub fn select(&mut self, doc: &StyledDocument, selection: SelectionType) {
        let range = match selection {
            SelectionType::Document => 0..doc.len(),
            SelectionType::BlockUnderCursor => doc
                .paragraph_content_range(self.block_number(doc))
                .unwrap_or(self.position..self.position),
            SelectionType::WordUnderCursor => word_at(doc.text(), self.position),
        };
        self.set_position(doc, range.start, MoveMode::MoveAnchor);
        self.set_position(doc, range.end, MoveMode::KeepAnchor);
    }

    /// The pending format for the next insertion, if one was set.
    pub fn pending_format(&self) -> Option<&CharFormat> {
        self.pending_format.as_ref()
    }

    pub fn set_pending_format(&mut self, format: CharFormat) {
        self.pending_format = Some(format);
    }

    /// The char format at the cursor.
    ///
    /// With a selection this is the format of its first character. Without
    /// one it is the pending format, or else the format of the character
    /// before the cursor, which new text continues.
    pub fn char_format(&self, doc: &StyledDocument) -> CharFormat {
        if self.has_selection() {
            return doc.format_at(self.selection_start());
        }
        if let Some(format) = &self.pending_format {
            return format.clone();
        }
        match doc.text()[..self.position].chars().next_back() {
            Some(previous) if previous != '\n' => {
                doc.format_at(self.position - previous.len_utf8())
            }
            _ => doc.format_at(self.position),
        }
    }

    /// Re-clamp the cursor after the document changed underneath it.
    pub fn clamp(&mut self, doc: &StyledDocument) {
        self.position = doc.clamp_position(self.position);
        self.anchor = doc.clamp_position(self.anchor);
    }
}

fn target(doc: &StyledDocument, position: usize, operation: MoveOperation) -> Option<usize> {
    let text = doc.text();
    let block = doc.paragraph_at(position);

    let next = match operation {
        MoveOperation::Start => 0,
        MoveOperation::End => text.len(),
        MoveOperation::StartOfBlock => doc.paragraph_range(block)?.start,
        MoveOperation::EndOfBlock => doc.paragraph_content_range(block)?.end,
        MoveOperation::PreviousCharacter => {
            position - text[..position].graphemes(true).next_back()?.len()
        }
        MoveOperation::NextCharacter => {
            position + text[position..].graphemes(true).next()?.len()
        }
        MoveOperation::PreviousWord => {
            if position == 0 {
                return None;
            }
            previous_word(text, position)
        }
        MoveOperation::NextWord => {
            if position == text.len() {
                return None;
            }
            next_word(text, position)
        }
        MoveOperation::PreviousBlock => doc.paragraph_range(block.checked_sub(1)?)?.start,
        MoveOperation::NextBlock => doc.paragraph_range(block + 1)?.start,
    };
    Some(next)
}

fn is_word(segment: &str) -> bool {
    segment.chars().any(char::is_alphanumeric)
}

/// End of the word at or after `position`.
fn next_word(text: &str, position: usize) -> usize {
    let mut offset = position;
    let mut found = false;

    for segment in text[position..].split_word_bounds() {
        let word = is_word(segment);
        if found && !word {
            break;
        }
        found |= word;
        offset += segment.len();
    }

    offset
}

/// Start of the word at or before `position`.
fn previous_word(text: &str, position: usize) -> usize {
    let mut offset = position;
    let mut found = false;

    for segment in text[..position].split_word_bounds().rev() {
        let word = is_word(segment);
        if found && !word {
            break;
        }
        found |= word;
        offset -= segment.len();
    }

    offset
}

/// The word segment containing `position`, or an empty range when the
/// cursor sits between non-word characters.
fn word_at(text: &str, position: usize) -> Range<usize> {
    for (start, segment) in text.split_word_bound_indices() {
        let end = start + segment.len();
        if (start..=end).contains(&position) && is_word(segment) {
            return start..end;
        }
        if start > position {
            break;
        }
    }
    position..position
}
