//! Rich markup for the clipboard.
//!
//! Fragments are written as an XHTML body fragment: one `<p>` per block with
//! the block format as inline CSS, and one `<span>` per formatted run. The
//! reader accepts that shape plus the common inline tags (`b`, `strong`,
//! `i`, `em`, `u`, `s`, `del`) and `<br/>`, which is enough for markup
//! produced by other editors as long as it is well-formed.

use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use super::format::{Alignment, BlockFormat, CharFormat, Color};
use super::fragment::{DocumentFragment, FragmentBlock};
use crate::error::{Error, Result};

/// Serialize a fragment to XHTML markup.
pub fn to_markup(fragment: &DocumentFragment) -> Result<String> {
    let mut writer = Writer::new(Vec::new());

    for block in fragment.blocks() {
        let mut paragraph = BytesStart::new("p");
        let style = block.format.as_ref().map(block_style).unwrap_or_default();
        if !style.is_empty() {
            paragraph.push_attribute(("style", style.as_str()));
        }
        write(&mut writer, Event::Start(paragraph))?;

        for span in &block.spans {
            let style = char_style(&span.format);
            if style.is_empty() {
                write(&mut writer, Event::Text(BytesText::new(&span.text)))?;
                continue;
            }
            let mut tag = BytesStart::new("span");
            tag.push_attribute(("style", style.as_str()));
            write(&mut writer, Event::Start(tag))?;
            write(&mut writer, Event::Text(BytesText::new(&span.text)))?;
            write(&mut writer, Event::End(BytesEnd::new("span")))?;
        }

        write(&mut writer, Event::End(BytesEnd::new("p")))?;
    }

    String::from_utf8(writer.into_inner()).map_err(|err| Error::markup(err.to_string()))
}

/// Parse XHTML markup into a fragment.
///
/// Fails on malformed markup (unbalanced tags, unknown entities).
pub fn parse_markup(markup: &str) -> Result<DocumentFragment> {
    let mut reader = Reader::from_str(markup);
    reader.config_mut().trim_text(false);

    let mut builder = FragmentBuilder::default();
    loop {
        match reader.read_event() {
            Ok(Event::Start(start)) => builder.open(&start),
            Ok(Event::Empty(empty)) => builder.empty(&empty),
            Ok(Event::End(_)) => builder.close(),
            Ok(Event::Text(text)) => {
                let content = text.unescape().map_err(|err| Error::markup(err.to_string()))?;
                builder.text(&content);
            }
            Ok(Event::CData(data)) => builder.text(&String::from_utf8_lossy(&data)),
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(err) => {
                return Err(Error::markup(format!(
                    "{err} at byte {}",
                    reader.buffer_position()
                )));
            }
        }
    }

    Ok(builder.finish())
}

fn write(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<()> {
    writer
        .write_event(event)
        .map_err(|err| Error::markup(err.to_string()))
}

fn char_style(format: &CharFormat) -> String {
    let mut rules = Vec::new();
    if let Some(family) = &format.font_family {
        rules.push(format!("font-family:{}", css_string(family)));
    }
    if let Some(size) = format.font_size {
        rules.push(format!("font-size:{size}pt"));
    }
    if format.bold {
        rules.push("font-weight:bold".to_string());
    }
    if format.italic {
        rules.push("font-style:italic".to_string());
    }
    match (format.underline, format.strikethrough) {
        (true, true) => rules.push("text-decoration:underline line-through".to_string()),
        (true, false) => rules.push("text-decoration:underline".to_string()),
        (false, true) => rules.push("text-decoration:line-through".to_string()),
        (false, false) => {}
    }
    if let Some(color) = format.foreground {
        rules.push(format!("color:{color}"));
    }
    if let Some(color) = format.background {
        rules.push(format!("background-color:{color}"));
    }
    rules.join(";")
}

fn block_style(format: &BlockFormat) -> String {
    let mut rules = Vec::new();
    match format.alignment {
        Alignment::Left => {}
        Alignment::Center => rules.push("text-align:center".to_string()),
        Alignment::Right => rules.push("text-align:right".to_string()),
        Alignment::Justified => rules.push("text-align:justify".to_string()),
    }
    if format.indent > 0 {
        rules.push(format!("margin-left:{}px", format.indent));
    }
    if let Some(color) = format.foreground {
        rules.push(format!("color:{color}"));
    }
    if let Some(color) = format.background {
        rules.push(format!("background-color:{color}"));
    }
    rules.join(";")
}

/// Quote `text` as a CSS string. Characters that delimit declarations,
/// values or the string itself are written as hex escapes.
fn css_string(text: &str) -> String {
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('\'');
    for c in text.chars() {
        match c {
            '\'' | '"' | '\\' | ';' | ':' | ',' => {
                quoted.push_str(&format!("\\{:x} ", u32::from(c)));
            }
            _ => quoted.push(c),
        }
    }
    quoted.push('\'');
    quoted
}

/// Resolve CSS escapes: `\` followed by up to six hex digits and one
/// optional space, or `\` followed by any other character.
fn css_unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let mut hex = String::new();
        while hex.len() < 6 {
            match chars.peek() {
                Some(d) if d.is_ascii_hexdigit() => {
                    hex.push(*d);
                    chars.next();
                }
                _ => break,
            }
        }
        if hex.is_empty() {
            if let Some(next) = chars.next() {
                out.push(next);
            }
            continue;
        }
        if let Some(decoded) = u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
            out.push(decoded);
        }
        if chars.peek() == Some(&' ') {
            chars.next();
        }
    }
    out
}

/// Split an inline CSS declaration list into lowercase property names and
/// trimmed values.
fn declarations(style: &str) -> impl Iterator<Item = (String, &str)> {
    style.split(';').filter_map(|rule| {
        let (name, value) = rule.split_once(':')?;
        Some((name.trim().to_ascii_lowercase(), value.trim()))
    })
}

fn apply_char_style(format: &mut CharFormat, style: &str) {
    for (name, value) in declarations(style) {
        let lowered = value.to_ascii_lowercase();
        match name.as_str() {
            "font-family" => {
                let family = value
                    .split(',')
                    .next()
                    .unwrap_or_default()
                    .trim()
                    .trim_matches(|c| c == '\'' || c == '"');
                let family = css_unescape(family);
                if !family.is_empty() {
                    format.font_family = Some(family);
                }
            }
            "font-size" => {
                if let Some(size) = parse_point_size(&lowered) {
                    format.font_size = Some(size);
                }
            }
            "font-weight" => {
                format.bold = match lowered.as_str() {
                    "bold" | "bolder" => true,
                    other => other.parse::<u32>().is_ok_and(|weight| weight >= 600),
                };
            }
            "font-style" => format.italic = lowered == "italic" || lowered == "oblique",
            "text-decoration" | "text-decoration-line" => {
                format.underline = lowered.contains("underline");
                format.strikethrough = lowered.contains("line-through");
            }
            "color" => {
                if let Some(color) = parse_css_color(&lowered) {
                    format.foreground = Some(color);
                }
            }
            "background-color" | "background" => {
                if let Some(color) = parse_css_color(&lowered) {
                    format.background = Some(color);
                }
            }
            _ => {}
        }
    }
}

fn parse_block_style(style: &str) -> BlockFormat {
    let mut format = BlockFormat::default();
    for (name, value) in declarations(style) {
        let lowered = value.to_ascii_lowercase();
        match name.as_str() {
            "text-align" => {
                format.alignment = match lowered.as_str() {
                    "center" => Alignment::Center,
                    "right" => Alignment::Right,
                    "justify" => Alignment::Justified,
                    _ => Alignment::Left,
                };
            }
            "margin-left" => {
                let number = lowered.trim_end_matches("px").trim();
                if let Ok(indent) = number.parse::<f32>() {
                    format.indent = indent.max(0.0).round() as u32;
                }
            }
            "color" => format.foreground = parse_css_color(&lowered),
            "background-color" | "background" => format.background = parse_css_color(&lowered),
            _ => {}
        }
    }
    format
}

/// Parse a CSS length as points. Pixels convert at 96 dpi.
fn parse_point_size(value: &str) -> Option<f32> {
    let (number, factor) = if let Some(number) = value.strip_suffix("pt") {
        (number, 1.0)
    } else if let Some(number) = value.strip_suffix("px") {
        (number, 0.75)
    } else {
        (value, 1.0)
    };
    let size = number.trim().parse::<f32>().ok()? * factor;
    (size.is_finite() && size > 0.0).then_some(size)
}

fn parse_css_color(value: &str) -> Option<Color> {
    if value.starts_with('#') {
        return Color::from_hex(value);
    }
    let inner = value
        .strip_prefix("rgb(")
        .or_else(|| value.strip_prefix("rgba("))?
        .strip_suffix(')')?;
    let mut parts = inner.split(',').map(str::trim);
    let r = parts.next()?.parse().ok()?;
    let g = parts.next()?.parse().ok()?;
    let b = parts.next()?.parse().ok()?;
    let a = match parts.next() {
        Some(alpha) => (alpha.parse::<f32>().ok()?.clamp(0.0, 1.0) * 255.0).round() as u8,
        None => 255,
    };
    Some(Color::from_rgba8(r, g, b, a))
}

fn tag_name(start: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(start.local_name().as_ref()).to_ascii_lowercase()
}

fn style_attribute(start: &BytesStart<'_>) -> Option<String> {
    start
        .attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == b"style")
        .and_then(|attr| attr.unescape_value().ok().map(|value| value.into_owned()))
}

/// What an open element contributes, so its end tag can undo it.
enum Open {
    Block,
    Inline,
    Skipped,
    Other,
}

#[derive(Default)]
struct FragmentBuilder {
    fragment: DocumentFragment,
    current: Option<FragmentBlock>,
    /// The block format of the `<p>` being read, reused after `<br/>`.
    block_format: Option<BlockFormat>,
    formats: Vec<CharFormat>,
    open: Vec<Open>,
    skip_depth: usize,
}

impl FragmentBuilder {
    fn open(&mut self, start: &BytesStart<'_>) {
        let name = tag_name(start);
        let entry = match name.as_str() {
            "head" | "style" | "script" | "title" => {
                self.skip_depth += 1;
                Open::Skipped
            }
            "p" | "div" | "li" | "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
                self.finish_block();
                let format = style_attribute(start)
                    .map(|style| parse_block_style(&style))
                    .unwrap_or_default();
                self.block_format = Some(format.clone());
                self.current = Some(FragmentBlock::new(Some(format)));
                Open::Block
            }
            "html" | "body" | "ul" | "ol" | "table" | "tbody" | "tr" | "td" => Open::Other,
            _ => {
                let mut format = self.formats.last().cloned().unwrap_or_default();
                match name.as_str() {
                    "b" | "strong" => format.bold = true,
                    "i" | "em" => format.italic = true,
                    "u" | "ins" => format.underline = true,
                    "s" | "strike" | "del" => format.strikethrough = true,
                    _ => {}
                }
                if let Some(style) = style_attribute(start) {
                    apply_char_style(&mut format, &style);
                }
                self.formats.push(format);
                Open::Inline
            }
        };
        self.open.push(entry);
    }

    fn empty(&mut self, element: &BytesStart<'_>) {
        match tag_name(element).as_str() {
            "br" => {
                let format = self.block_format.clone();
                self.finish_block();
                self.current = Some(FragmentBlock::new(format));
            }
            "p" | "div" => {
                self.finish_block();
                let format = style_attribute(element)
                    .map(|style| parse_block_style(&style))
                    .unwrap_or_default();
                self.fragment.push_block(FragmentBlock::new(Some(format)));
            }
            _ => {}
        }
    }

    fn close(&mut self) {
        match self.open.pop() {
            Some(Open::Block) => {
                self.finish_block();
                self.block_format = None;
            }
            Some(Open::Inline) => {
                self.formats.pop();
            }
            Some(Open::Skipped) => self.skip_depth = self.skip_depth.saturating_sub(1),
            Some(Open::Other) | None => {}
        }
    }

    fn text(&mut self, content: &str) {
        if self.skip_depth > 0 {
            return;
        }
        if self.current.is_none() && content.trim().is_empty() {
            return;
        }
        let content = content.replace(['\r', '\n'], " ");
        let format = self.formats.last().cloned().unwrap_or_default();
        self.current
            .get_or_insert_with(|| FragmentBlock::new(None))
            .push_span(&content, format);
    }

    fn finish_block(&mut self) {
        if let Some(block) = self.current.take() {
            self.fragment.push_block(block);
        }
    }

    fn finish(mut self) -> DocumentFragment {
        self.finish_block();
        self.fragment
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_fragment() -> DocumentFragment {
        let mut first = FragmentBlock::new(Some(
            BlockFormat::new()
                .with_alignment(Alignment::Center)
                .with_indent(48),
        ));
        first.push_span("Plain ", CharFormat::default());
        first.push_span(
            "bold & red",
            CharFormat {
                bold: true,
                foreground: Some(Color::RED),
                font_family: Some("Times New Roman".into()),
                font_size: Some(14.0),
                ..CharFormat::default()
            },
        );

        let mut second = FragmentBlock::new(Some(BlockFormat::default()));
        second.push_span(
            "<under>",
            CharFormat {
                underline: true,
                strikethrough: true,
                ..CharFormat::default()
            },
        );

        DocumentFragment::from_blocks(vec![first, second])
    }

    #[test]
    fn test_write_shape() {
        let markup = to_markup(&sample_fragment()).unwrap();

        assert!(markup.starts_with(r#"<p style="text-align:center;margin-left:48px">Plain <span"#));
        assert!(markup.contains("bold &amp; red</span></p>"));
        assert!(markup.contains("&lt;under&gt;"));
    }

    #[test]
    fn test_markup_round_trip() {
        let fragment = sample_fragment();
        let parsed = parse_markup(&to_markup(&fragment).unwrap()).unwrap();
        assert_eq!(parsed, fragment);
    }

    #[test]
    fn test_font_family_with_css_delimiters_round_trips() {
        let family = r#"Bob's "Hand"; Bold: v2, \narrow"#;
        let mut block = FragmentBlock::new(Some(BlockFormat::default()));
        block.push_span(
            "signed",
            CharFormat {
                font_family: Some(family.into()),
                italic: true,
                ..CharFormat::default()
            },
        );
        let fragment = DocumentFragment::from_blocks(vec![block]);

        let parsed = parse_markup(&to_markup(&fragment).unwrap()).unwrap();
        let format = &parsed.blocks()[0].spans[0].format;
        assert_eq!(format.font_family.as_deref(), Some(family));
        assert!(format.italic);
    }

    #[test]
    fn test_css_escapes() {
        assert_eq!(css_string("a;b"), r"'a\3b b'");
        assert_eq!(css_unescape(r"a\3b b"), "a;b");
        assert_eq!(css_unescape(r"\41\42"), "AB");
        assert_eq!(css_unescape(r"x\,y"), "x,y");
    }

    #[test]
    fn test_parse_inline_tags() {
        let parsed = parse_markup("<p><b>bold</b> and <em>it<u>alic</u></em><br/>next</p>").unwrap();

        assert_eq!(parsed.blocks().len(), 2);
        let spans = &parsed.blocks()[0].spans;
        assert_eq!(spans[0].text, "bold");
        assert!(spans[0].format.bold);
        assert_eq!(spans[1].text, " and ");
        assert!(!spans[1].format.is_styled());
        assert!(spans[2].format.italic && !spans[2].format.underline);
        assert!(spans[3].format.italic && spans[3].format.underline);
        assert_eq!(parsed.blocks()[1].text(), "next");
    }

    #[test]
    fn test_parse_ignores_document_chrome() {
        let markup = "<html>\n<head><title>clip</title><style>p {}</style></head>\n<body>\n<p>one</p>\n<p>two</p>\n</body></html>";
        let parsed = parse_markup(markup).unwrap();

        assert_eq!(parsed.to_plain_text(), "one\ntwo");
    }

    #[test]
    fn test_parse_css_values() {
        let mut format = CharFormat::default();
        apply_char_style(
            &mut format,
            "font-family: \"Fira Sans\", sans-serif; font-size: 16px; font-weight: 700; color: rgb(0, 0, 255); text-decoration: none",
        );

        assert_eq!(format.font_family.as_deref(), Some("Fira Sans"));
        assert_eq!(format.font_size, Some(12.0));
        assert!(format.bold);
        assert_eq!(format.foreground, Some(Color::BLUE));
        assert!(!format.underline);
    }

    #[test]
    fn test_bare_text_has_no_block_format() {
        let parsed = parse_markup("just <i>text</i>").unwrap();
        assert_eq!(parsed.blocks().len(), 1);
        assert!(parsed.blocks()[0].format.is_none());
    }

    #[test]
    fn test_malformed_markup_fails() {
        assert!(matches!(parse_markup("<p><b>open</p>"), Err(Error::Markup(_))));
        assert!(parse_markup("<p>&nbsp;</p>").is_err());
    }
}
