//! Formatting toolbar.
//!
//! [`FormatToolbar`] owns one control per formatting command and binds them
//! to the components of an editing surface in both directions:
//!
//! - control gestures call the matching component operation
//! - every component `applied` notification re-reads the cursor's format and
//!   updates the controls without re-triggering them
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use folio::clipboard::MemoryClipboard;
//! use folio::config::EditorConfig;
//! use folio::document::MoveMode;
//! use folio::editor::Editor;
//!
//! let editor = Editor::with_clipboard(EditorConfig::default(), Arc::new(MemoryClipboard::new()))?;
//! editor.body().insert_text("Hello");
//! editor.body().set_position(0, MoveMode::MoveAnchor);
//! editor.body().set_position(5, MoveMode::KeepAnchor);
//! editor.cursor_moved();
//!
//! let toolbar = editor.toolbar();
//! toolbar.bold.click();
//! assert!(editor.body().char_format().bold);
//! assert!(toolbar.bold.is_checked());
//! # Ok::<(), folio::Error>(())
//! ```

use std::sync::{Arc, Weak};

use folio_core::logging::targets;
use folio_core::{Property, Signal};
use parking_lot::RwLock;

use super::{ColorButton, ColorPicker, FontComboBox, FontSizeComboBox, InputControl, ToolButton};
use crate::config::EditorConfig;
use crate::document::{Alignment, Color, EditingContext};
use crate::editor::BodyComponents;

/// Which color button the shared picker feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorTarget {
    #[default]
    Foreground,
    Background,
}

/// The controls of a formatting toolbar.
pub struct FormatToolbar {
    pub bold: Arc<ToolButton>,
    pub italic: Arc<ToolButton>,
    pub underline: Arc<ToolButton>,
    pub strikethrough: Arc<ToolButton>,

    pub align_left: Arc<ToolButton>,
    pub align_center: Arc<ToolButton>,
    pub align_right: Arc<ToolButton>,
    pub align_justify: Arc<ToolButton>,

    pub indent_left: Arc<ToolButton>,
    pub indent_right: Arc<ToolButton>,

    pub undo: Arc<ToolButton>,
    pub redo: Arc<ToolButton>,
    pub cut: Arc<ToolButton>,
    pub copy: Arc<ToolButton>,
    pub paste: Arc<ToolButton>,

    pub font_family: Arc<FontComboBox>,
    pub font_size: Arc<FontSizeComboBox>,

    pub foreground: Arc<ColorButton>,
    pub background: Arc<ColorButton>,
    pub color_picker: Arc<ColorPicker>,
    picker_target: Property<ColorTarget>,

    default_family: String,
    default_size: f32,
    context: RwLock<Option<EditingContext>>,
}

impl FormatToolbar {
    /// Create an unbound toolbar populated from `config`.
    pub fn new(config: &EditorConfig) -> Arc<Self> {
        let font_family = FontComboBox::new(config.font_families.iter().cloned());
        font_family.set_current_font(&config.default_font_family);

        Arc::new(Self {
            bold: Arc::new(ToolButton::checkable("Bold")),
            italic: Arc::new(ToolButton::checkable("Italic")),
            underline: Arc::new(ToolButton::checkable("Underline")),
            strikethrough: Arc::new(ToolButton::checkable("Strikethrough")),
            align_left: Arc::new(ToolButton::checkable("Align Left")),
            align_center: Arc::new(ToolButton::checkable("Center")),
            align_right: Arc::new(ToolButton::checkable("Align Right")),
            align_justify: Arc::new(ToolButton::checkable("Justify")),
            indent_left: Arc::new(ToolButton::new("Decrease Indent")),
            indent_right: Arc::new(ToolButton::new("Increase Indent")),
            undo: Arc::new(ToolButton::new("Undo")),
            redo: Arc::new(ToolButton::new("Redo")),
            cut: Arc::new(ToolButton::new("Cut")),
            copy: Arc::new(ToolButton::new("Copy")),
            paste: Arc::new(ToolButton::new("Paste")),
            font_family: Arc::new(font_family),
            font_size: Arc::new(FontSizeComboBox::new(
                config.font_sizes.iter().copied(),
                config.default_font_size,
            )),
            foreground: Arc::new(ColorButton::new(Color::BLACK)),
            background: Arc::new(ColorButton::new(Color::WHITE)),
            color_picker: Arc::new(ColorPicker::new(config.recent_colors_limit)),
            picker_target: Property::new(ColorTarget::Foreground),
            default_family: config.default_font_family.clone(),
            default_size: config.default_font_size,
            context: RwLock::new(None),
        })
    }

    /// Connect the controls to `body`, whose components edit `context`.
    pub fn bind(self: &Arc<Self>, context: EditingContext, body: &BodyComponents) {
        *self.context.write() = Some(context);

        let format = &body.format;
        connect_toggle(&self.bold, format, |f, on| f.turn_bold(on));
        connect_toggle(&self.italic, format, |f, on| f.turn_italic(on));
        connect_toggle(&self.underline, format, |f, on| f.turn_underline(on));
        connect_toggle(&self.strikethrough, format, |f, on| f.turn_strikethrough(on));

        for (button, alignment) in [
            (&self.align_left, Alignment::Left),
            (&self.align_center, Alignment::Center),
            (&self.align_right, Alignment::Right),
            (&self.align_justify, Alignment::Justified),
        ] {
            let component = body.alignment.clone();
            let toolbar = Arc::downgrade(self);
            button.triggered.connect(move |_| {
                component.set_alignment(alignment);
                // A click on the active button unchecks it; restore exclusivity.
                resync(&toolbar);
            });
        }

        connect_trigger(&self.indent_left, &body.indent, |c| c.indent_paragraph_left());
        connect_trigger(&self.indent_right, &body.indent, |c| c.indent_paragraph_right());
        connect_trigger(&self.undo, &body.history, |c| c.undo());
        connect_trigger(&self.redo, &body.history, |c| c.redo());
        connect_trigger(&self.cut, &body.copy_paste, |c| c.cut());
        connect_trigger(&self.copy, &body.copy_paste, |c| c.copy());
        connect_trigger(&self.paste, &body.copy_paste, |c| c.paste());

        let font = body.font.clone();
        self.font_family.font_changed.connect(move |family| {
            font.set_font_family(family);
        });
        let font = body.font.clone();
        self.font_size.size_changed.connect(move |size| {
            font.set_font_size(*size);
        });

        let color = body.color.clone();
        self.foreground.clicked.connect(move |c| {
            color.set_foreground_color(*c);
        });
        let color = body.color.clone();
        self.background.clicked.connect(move |c| {
            color.set_background_color(*c);
        });

        let toolbar = Arc::downgrade(self);
        self.color_picker.color_selected.connect(move |c| {
            if let Some(toolbar) = toolbar.upgrade() {
                toolbar.apply_picked(*c);
            }
        });

        for signal in body.applied_signals() {
            let toolbar = Arc::downgrade(self);
            signal.connect(move |_| resync(&toolbar));
        }

        self.sync();
        tracing::debug!(target: targets::WIDGET, "format toolbar bound");
    }

    /// The button the color picker currently feeds.
    pub fn picker_target(&self) -> ColorTarget {
        self.picker_target.get()
    }

    /// Route the next picked color to `target`.
    pub fn set_picker_target(&self, target: ColorTarget) {
        self.picker_target.set(target);
    }

    fn apply_picked(&self, color: Color) {
        let button = match self.picker_target() {
            ColorTarget::Foreground => &self.foreground,
            ColorTarget::Background => &self.background,
        };
        button.set_color(color);
        button.click();
    }

    /// Re-read the cursor's format and update every control silently.
    pub fn sync(&self) {
        let Some(context) = self.context.read().clone() else {
            return;
        };
        let char_format = context.char_format();
        let block_format = context.block_format();
        let has_selection = context.has_selection();
        let (can_undo, can_redo) = (context.can_undo(), context.can_redo());

        self.bold.set_checked_silent(char_format.bold);
        self.italic.set_checked_silent(char_format.italic);
        self.underline.set_checked_silent(char_format.underline);
        self.strikethrough.set_checked_silent(char_format.strikethrough);

        self.align_left.set_checked_silent(block_format.alignment == Alignment::Left);
        self.align_center.set_checked_silent(block_format.alignment == Alignment::Center);
        self.align_right.set_checked_silent(block_format.alignment == Alignment::Right);
        self.align_justify.set_checked_silent(block_format.alignment == Alignment::Justified);

        let family = char_format.font_family.as_deref().unwrap_or(&self.default_family);
        blocked(&self.font_family.font_changed, || {
            self.font_family.set_current_font(family);
        });
        let size = char_format.font_size.unwrap_or(self.default_size);
        blocked(&self.font_size.size_changed, || {
            self.font_size.set_size(size);
        });
        let foreground = char_format.foreground.unwrap_or(Color::BLACK);
        blocked(&self.foreground.color_changed, || {
            self.foreground.set_color(foreground);
        });
        let background = char_format.background.unwrap_or(Color::WHITE);
        blocked(&self.background.color_changed, || {
            self.background.set_color(background);
        });

        self.indent_left.set_enabled(block_format.indent > 0);
        self.undo.set_enabled(can_undo);
        self.redo.set_enabled(can_redo);
        self.cut.set_enabled(has_selection);
        self.copy.set_enabled(has_selection);

        tracing::trace!(target: targets::WIDGET, "format toolbar synchronized");
    }
}

fn resync(toolbar: &Weak<FormatToolbar>) {
    if let Some(toolbar) = toolbar.upgrade() {
        toolbar.sync();
    }
}

/// Run `f` with `signal` blocked.
fn blocked<T: 'static>(signal: &Signal<T>, f: impl FnOnce()) {
    let was_blocked = signal.is_blocked();
    signal.set_blocked(true);
    f();
    signal.set_blocked(was_blocked);
}

fn connect_toggle<C, F>(button: &ToolButton, component: &Arc<C>, op: F)
where
    C: Send + Sync + 'static,
    F: Fn(&C, bool) -> bool + Send + Sync + 'static,
{
    let component = component.clone();
    button.toggled.connect(move |on| {
        op(&component, *on);
    });
}

fn connect_trigger<C, F>(button: &ToolButton, component: &Arc<C>, op: F)
where
    C: Send + Sync + 'static,
    F: Fn(&C) -> bool + Send + Sync + 'static,
{
    let component = component.clone();
    button.triggered.connect(move |_| {
        op(&component);
    });
}
