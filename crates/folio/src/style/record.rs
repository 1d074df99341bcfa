//! Named style records.

use serde::{Deserialize, Serialize};

use crate::document::{BlockFormatDelta, CharFormatDelta};

/// What a style applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StyleKind {
    /// Applies char and block attributes to whole paragraphs.
    #[default]
    Paragraph,
    /// Applies char attributes to the selection only.
    Character,
}

/// A named bundle of formatting attributes.
///
/// Attributes are stored as deltas: a style only overrides what it sets.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StyleRecord {
    pub name: String,
    #[serde(default)]
    pub kind: StyleKind,
    #[serde(default, skip_serializing_if = "CharFormatDelta::is_empty")]
    pub char_format: CharFormatDelta,
    #[serde(default, skip_serializing_if = "BlockFormatDelta::is_empty")]
    pub block_format: BlockFormatDelta,
}

impl StyleRecord {
    /// A paragraph style with no attributes.
    pub fn paragraph(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: StyleKind::Paragraph,
            ..Self::default()
        }
    }

    /// A character style with no attributes.
    pub fn character(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: StyleKind::Character,
            ..Self::default()
        }
    }

    pub fn with_char_format(mut self, delta: CharFormatDelta) -> Self {
        self.char_format = delta;
        self
    }

    pub fn with_block_format(mut self, delta: BlockFormatDelta) -> Self {
        self.block_format = delta;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Alignment, Color};

    #[test]
    fn test_json_shape() {
        let record = StyleRecord::paragraph("Heading 1")
            .with_char_format(CharFormatDelta::new().with_bold(true).with_font_size(20.0))
            .with_block_format(BlockFormatDelta::new().with_alignment(Alignment::Center));

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["name"], "Heading 1");
        assert_eq!(json["kind"], "paragraph");
        assert_eq!(json["char_format"]["bold"], true);
        assert_eq!(json["block_format"]["alignment"], "center");

        let back: StyleRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_minimal_record() {
        let record: StyleRecord = serde_json::from_str(r#"{"name":"Quote"}"#).unwrap();
        assert_eq!(record.kind, StyleKind::Paragraph);
        assert!(record.char_format.is_empty());

        let record = StyleRecord::character("Red").with_char_format(CharFormatDelta::new().with_foreground(Color::RED));
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("#FF0000"));
        assert!(!json.contains("block_format"));
    }
}
