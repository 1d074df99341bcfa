//! Folio - the editing layer of a word processor.
//!
//! Folio sits between toolbar gestures and a rich-text document. Small
//! components turn commands ("bold", "indent", "add a header page") into
//! cursor operations on an [`EditingContext`](document::EditingContext) and
//! announce every change on an `applied` signal; headless toolbar controls
//! drive those components and mirror the cursor's format back.
//!
//! - [`document`]: styled document, cursor, undo history, markup
//! - [`component`]: formatting, history, clipboard, page, pagination and text
//!   components
//! - [`style`]: named styles, their stores and the style table model
//! - [`widget`]: headless toolbar controls and the formatting toolbar
//! - [`editor`]: one window's worth of the above wired together
//!
//! # Example
//!
//! ```
//! use folio::prelude::*;
//!
//! let context = EditingContext::new();
//! context.insert_text("Hello");
//! context.select(SelectionType::Document);
//!
//! let format = FormatComponent::new(context.clone());
//! format.applied.connect(|_| println!("repaint"));
//! assert!(format.turn_bold(true));
//! assert!(!format.turn_bold(true));
//! assert!(context.char_format().bold);
//! ```

pub mod clipboard;
pub mod component;
pub mod config;
pub mod document;
pub mod editor;
mod error;
mod persist;
pub mod prelude;
pub mod style;
pub mod widget;

pub use error::{Error, Result};
pub use folio_core::{ConnectionId, Property, Signal};
