//! The rich-text document behind every editing surface.
//!
//! Text is one `String`. Character formatting lives in [`FormatRun`]s over
//! byte ranges; unstyled text has no run at all. Paragraph formatting lives
//! in a list with exactly one [`BlockFormat`] per paragraph, kept in step
//! with the newlines on every insert and delete. The whole value is cheap to
//! clone, which is how the undo history snapshots it.

use std::ops::Range;

use super::format::{BlockFormat, BlockFormatDelta, CharFormat, CharFormatDelta};
use super::fragment::{DocumentFragment, FragmentBlock};

/// A styled byte range.
#[derive(Debug, Clone, PartialEq)]
pub struct FormatRun {
    pub range: Range<usize>,
    pub format: CharFormat,
}

impl FormatRun {
    pub fn new(range: Range<usize>, format: CharFormat) -> Self {
        Self { range, format }
    }

    fn overlaps(&self, range: &Range<usize>) -> bool {
        self.range.start < range.end && range.start < self.range.end
    }
}

/// Text with character format runs and per-paragraph block formats.
///
/// Runs are sorted, never overlap, never touch another run with an equal
/// format and never carry the unstyled format. Paragraphs are separated by
/// `'\n'`; an empty document has one paragraph.
#[derive(Debug, Clone, PartialEq)]
pub struct StyledDocument {
    text: String,
    runs: Vec<FormatRun>,
    blocks: Vec<BlockFormat>,
}

impl Default for StyledDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl StyledDocument {
    pub fn new() -> Self {
        Self {
            text: String::new(),
            runs: Vec::new(),
            blocks: vec![BlockFormat::default()],
        }
    }

    /// An unstyled document holding `text`.
    pub fn from_text(text: impl Into<String>) -> Self {
        let mut doc = Self::new();
        doc.set_text(text);
        doc
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn format_runs(&self) -> &[FormatRun] {
        &self.runs
    }

    /// One entry per paragraph.
    pub fn block_formats(&self) -> &[BlockFormat] {
        &self.blocks
    }

    /// Replace the text and drop all formatting.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.runs.clear();
        self.blocks = vec![BlockFormat::default(); self.paragraph_count()];
    }

    /// Clamp `pos` into the text and back onto a char boundary.
    pub fn clamp_position(&self, pos: usize) -> usize {
        let mut pos = pos.min(self.text.len());
        while !self.text.is_char_boundary(pos) {
            pos -= 1;
        }
        pos
    }

    fn clamp_range(&self, range: &Range<usize>) -> Range<usize> {
        let start = self.clamp_position(range.start);
        start..self.clamp_position(range.end).max(start)
    }

    /// The format of the character starting at byte `pos`.
    pub fn format_at(&self, pos: usize) -> CharFormat {
        let index = self.runs.partition_point(|run| run.range.end <= pos);
        match self.runs.get(index) {
            Some(run) if run.range.start <= pos => run.format.clone(),
            _ => CharFormat::default(),
        }
    }

    /// The first offset after `pos` (capped at `max`) where the format may
    /// change.
    pub fn next_format_change(&self, pos: usize, max: usize) -> usize {
        let index = self.runs.partition_point(|run| run.range.end <= pos);
        match self.runs.get(index) {
            Some(run) if run.range.start <= pos => run.range.end.min(max),
            Some(run) => run.range.start.min(max),
            None => max,
        }
    }

    /// Insert `text` at `pos` carrying exactly `format`.
    ///
    /// Each newline in `text` opens a paragraph that copies the block format
    /// of the paragraph it was split from.
    pub fn insert(&mut self, pos: usize, text: &str, format: CharFormat) {
        if text.is_empty() {
            return;
        }
        let pos = self.clamp_position(pos);
        let len = text.len();
        let paragraph = self.paragraph_at(pos);
        let opened = newline_count(text);

        self.text.insert_str(pos, text);
        for run in &mut self.runs {
            if run.range.start >= pos {
                run.range.start += len;
            }
            if run.range.end > pos {
                run.range.end += len;
            }
        }
        // A run that spanned `pos` now spans the new text too; restyle it.
        self.set_format(pos..pos + len, format);

        if opened > 0 {
            let inherited = self.block_format_at(paragraph);
            let at = (paragraph + 1).min(self.blocks.len());
            self.blocks
                .splice(at..at, std::iter::repeat_n(inherited, opened));
        }
    }

    /// Remove `range` and return the removed text.
    ///
    /// When paragraphs are joined the first one's block format survives.
    pub fn delete(&mut self, range: Range<usize>) -> String {
        let range = self.clamp_range(&range);
        if range.is_empty() {
            return String::new();
        }
        let paragraph = self.paragraph_at(range.start);
        let removed: String = self.text.drain(range.clone()).collect();

        for run in &mut self.runs {
            run.range.start = shift_past_removal(run.range.start, &range);
            run.range.end = shift_past_removal(run.range.end, &range);
        }
        self.normalize_runs();

        let joined = newline_count(&removed);
        if joined > 0 {
            let from = (paragraph + 1).min(self.blocks.len());
            let to = (from + joined).min(self.blocks.len());
            self.blocks.drain(from..to);
        }
        removed
    }

    /// Give `range` exactly `format`, splitting runs at its edges.
    pub fn set_format(&mut self, range: Range<usize>, format: CharFormat) {
        let range = self.clamp_range(&range);
        if range.is_empty() {
            return;
        }
        self.cut_runs(&range);
        if format.is_styled() {
            self.runs.push(FormatRun::new(range, format));
        }
        self.normalize_runs();
    }

    /// Merge `delta` into the format of every character in `range`,
    /// leaving attributes the delta does not name untouched. Returns `true`
    /// if any character changed.
    pub fn merge_format(&mut self, range: Range<usize>, delta: &CharFormatDelta) -> bool {
        let range = self.clamp_range(&range);
        if range.is_empty() || delta.is_empty() {
            return false;
        }
        let pieces: Vec<_> = self
            .sections(range)
            .into_iter()
            .map(|(piece, format)| (piece, format.merged(delta)))
            .collect();

        let before = self.runs.clone();
        for (piece, format) in pieces {
            self.set_format(piece, format);
        }
        self.runs != before
    }

    /// Split `range` where the format changes.
    fn sections(&self, range: Range<usize>) -> Vec<(Range<usize>, CharFormat)> {
        let mut sections = Vec::new();
        let mut pos = range.start;
        while pos < range.end {
            let next = self.next_format_change(pos, range.end);
            sections.push((pos..next, self.format_at(pos)));
            pos = next;
        }
        sections
    }

    fn cut_runs(&mut self, range: &Range<usize>) {
        let mut kept = Vec::with_capacity(self.runs.len() + 1);
        for run in self.runs.drain(..) {
            if !run.overlaps(range) {
                kept.push(run);
                continue;
            }
            if run.range.start < range.start {
                kept.push(FormatRun::new(run.range.start..range.start, run.format.clone()));
            }
            if run.range.end > range.end {
                kept.push(FormatRun::new(range.end..run.range.end, run.format));
            }
        }
        self.runs = kept;
    }

    fn normalize_runs(&mut self) {
        self.runs
            .retain(|run| !run.range.is_empty() && run.format.is_styled());
        self.runs.sort_by_key(|run| run.range.start);

        let mut merged: Vec<FormatRun> = Vec::with_capacity(self.runs.len());
        for run in self.runs.drain(..) {
            match merged.last_mut() {
                Some(last) if last.range.end == run.range.start && last.format == run.format => {
                    last.range.end = run.range.end;
                }
                _ => merged.push(run),
            }
        }
        self.runs = merged;
    }

    // =========================================================================
    // Paragraphs
    // =========================================================================

    pub fn paragraph_count(&self) -> usize {
        newline_count(&self.text) + 1
    }

    /// Byte range of paragraph `index`, including its trailing newline.
    pub fn paragraph_range(&self, index: usize) -> Option<Range<usize>> {
        let mut start = 0;
        for (paragraph, line) in self.text.split_inclusive('\n').enumerate() {
            if paragraph == index {
                return Some(start..start + line.len());
            }
            start += line.len();
        }
        // The paragraph after a trailing newline (or of an empty text).
        (index + 1 == self.paragraph_count()).then_some(start..start)
    }

    /// Byte range of paragraph `index` without its newline.
    pub fn paragraph_content_range(&self, index: usize) -> Option<Range<usize>> {
        self.paragraph_range(index).map(|range| {
            if self.text[range.clone()].ends_with('\n') {
                range.start..range.end - 1
            } else {
                range
            }
        })
    }

    /// Index of the paragraph containing byte `pos`.
    pub fn paragraph_at(&self, pos: usize) -> usize {
        let pos = pos.min(self.text.len());
        newline_count(&self.text.as_bytes()[..pos])
    }

    /// Paragraphs a byte range touches; an empty range touches one.
    pub fn paragraphs_in(&self, range: &Range<usize>) -> Range<usize> {
        let first = self.paragraph_at(range.start);
        first..self.paragraph_at(range.end.max(range.start)) + 1
    }

    pub fn block_format_at(&self, index: usize) -> BlockFormat {
        self.blocks.get(index).cloned().unwrap_or_default()
    }

    /// Merge `delta` into paragraphs `range`. Returns `true` on change.
    pub fn merge_block_format(&mut self, range: Range<usize>, delta: &BlockFormatDelta) -> bool {
        let end = range.end.min(self.blocks.len());
        let start = range.start.min(end);
        let mut changed = false;
        for block in &mut self.blocks[start..end] {
            let merged = block.merged(delta);
            changed |= *block != merged;
            *block = merged;
        }
        changed
    }

    // =========================================================================
    // Fragments
    // =========================================================================

    /// Copy `range` with its character and paragraph formats.
    pub fn fragment(&self, range: Range<usize>) -> DocumentFragment {
        let range = self.clamp_range(&range);
        let mut fragment = DocumentFragment::new();
        for paragraph in self.paragraphs_in(&range) {
            let Some(content) = self.paragraph_content_range(paragraph) else {
                continue;
            };
            let start = content.start.max(range.start);
            let end = content.end.min(range.end).max(start);

            let mut block = FragmentBlock::new(Some(self.block_format_at(paragraph)));
            for (piece, format) in self.sections(start..end) {
                block.push_span(&self.text[piece], format);
            }
            fragment.push_block(block);
        }
        fragment
    }

    /// Insert `fragment` at `pos` and return the offset just after it.
    ///
    /// Every block after the first opens a paragraph. A block's format
    /// replaces the format of the paragraph it lands in unless it is `None`;
    /// the first block only does so when `pos` starts a paragraph.
    pub fn insert_fragment(&mut self, pos: usize, fragment: &DocumentFragment) -> usize {
        let mut pos = self.clamp_position(pos);
        let at_paragraph_start = self
            .paragraph_range(self.paragraph_at(pos))
            .is_some_and(|range| range.start == pos);

        for (index, block) in fragment.blocks().iter().enumerate() {
            if index > 0 {
                self.insert(pos, "\n", CharFormat::default());
                pos += 1;
            }
            if let Some(format) = &block.format
                && (index > 0 || at_paragraph_start)
            {
                let paragraph = self.paragraph_at(pos);
                if let Some(slot) = self.blocks.get_mut(paragraph) {
                    *slot = format.clone();
                }
            }
            for span in &block.spans {
                self.insert(pos, &span.text, span.format.clone());
                pos += span.text.len();
            }
        }
        pos
    }
}

fn newline_count(text: impl AsRef<[u8]>) -> usize {
    text.as_ref().iter().filter(|&&b| b == b'\n').count()
}

/// Where `offset` ends up once `removed` is cut out of the text.
fn shift_past_removal(offset: usize, removed: &Range<usize>) -> usize {
    if offset <= removed.start {
        offset
    } else if offset >= removed.end {
        offset - removed.len()
    } else {
        removed.start
    }
}
