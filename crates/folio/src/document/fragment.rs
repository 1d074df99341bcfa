//! Document fragments: the unit of copy and paste.

use super::format::{BlockFormat, CharFormat};

/// A run of text sharing one character format. Never contains a newline.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FragmentSpan {
    pub text: String,
    pub format: CharFormat,
}

impl FragmentSpan {
    pub fn new(text: impl Into<String>, format: CharFormat) -> Self {
        Self {
            text: text.into(),
            format,
        }
    }
}

/// One paragraph of a fragment.
///
/// `format` is `None` when the source carried no block formatting (plain
/// text); such a block inherits the format of the paragraph it lands in.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FragmentBlock {
    pub spans: Vec<FragmentSpan>,
    pub format: Option<BlockFormat>,
}

impl FragmentBlock {
    /// Create an empty block.
    pub fn new(format: Option<BlockFormat>) -> Self {
        Self {
            spans: Vec::new(),
            format,
        }
    }

    /// Append a span, merging it into the previous one when formats match.
    pub fn push_span(&mut self, text: &str, format: CharFormat) {
        if text.is_empty() {
            return;
        }
        match self.spans.last_mut() {
            Some(last) if last.format == format => last.text.push_str(text),
            _ => self.spans.push(FragmentSpan::new(text, format)),
        }
    }

    /// The block's text without formatting.
    pub fn text(&self) -> String {
        self.spans.iter().map(|span| span.text.as_str()).collect()
    }
}

/// A formatted excerpt of a document, split into paragraphs.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DocumentFragment {
    blocks: Vec<FragmentBlock>,
}

impl DocumentFragment {
    /// Create an empty fragment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an unformatted fragment from plain text.
    pub fn from_plain_text(text: &str) -> Self {
        let blocks = text
            .split('\n')
            .map(|line| {
                let mut block = FragmentBlock::new(None);
                block.push_span(line, CharFormat::default());
                block
            })
            .collect();
        Self { blocks }
    }

    /// Build a fragment from already split blocks.
    pub fn from_blocks(blocks: Vec<FragmentBlock>) -> Self {
        Self { blocks }
    }

    pub fn blocks(&self) -> &[FragmentBlock] {
        &self.blocks
    }

    /// Append a block.
    pub fn push_block(&mut self, block: FragmentBlock) {
        self.blocks.push(block);
    }

    /// Check whether the fragment holds no text and no paragraph breaks.
    pub fn is_empty(&self) -> bool {
        self.blocks.len() <= 1 && self.blocks.iter().all(|block| block.spans.is_empty())
    }

    /// The fragment's text, paragraphs joined with `'\n'`.
    pub fn to_plain_text(&self) -> String {
        self.blocks
            .iter()
            .map(FragmentBlock::text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Check whether any span or block carries formatting.
    pub fn has_formatting(&self) -> bool {
        self.blocks.iter().any(|block| {
            block.format.as_ref().is_some_and(BlockFormat::is_styled)
                || block.spans.iter().any(|span| span.format.is_styled())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_plain_text() {
        let fragment = DocumentFragment::from_plain_text("one\ntwo\n");
        assert_eq!(fragment.blocks().len(), 3);
        assert_eq!(fragment.blocks()[0].text(), "one");
        assert!(fragment.blocks()[2].spans.is_empty());
        assert!(fragment.blocks().iter().all(|b| b.format.is_none()));
        assert_eq!(fragment.to_plain_text(), "one\ntwo\n");
        assert!(!fragment.has_formatting());
    }

    #[test]
    fn test_push_span_merges_equal_formats() {
        let mut block = FragmentBlock::new(None);
        block.push_span("Hel", CharFormat::bold());
        block.push_span("lo", CharFormat::bold());
        block.push_span(" there", CharFormat::default());
        block.push_span("", CharFormat::italic());

        assert_eq!(block.spans.len(), 2);
        assert_eq!(block.spans[0].text, "Hello");
        assert_eq!(block.text(), "Hello there");
    }

    #[test]
    fn test_is_empty() {
        assert!(DocumentFragment::new().is_empty());
        assert!(DocumentFragment::from_plain_text("").is_empty());
        assert!(!DocumentFragment::from_plain_text("\n").is_empty());
        assert!(!DocumentFragment::from_plain_text("x").is_empty());
    }
}
