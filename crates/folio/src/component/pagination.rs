//! Page numbering.

use std::sync::Arc;

use folio_core::{Property, Signal};

use super::{Component, PageComponent, finish};

/// The first page number when none was set.
pub const DEFAULT_STARTING_NUMBER: u32 = 1;

/// Turns page numbering on or off and sets its starting number.
///
/// Labels are computed against the paired [`PageComponent`]: every page is
/// counted, and a first page that does not carry the header or footer simply
/// shows no label.
pub struct PaginationComponent {
    pages: Arc<PageComponent>,
    enabled: Property<bool>,
    starting_number: Property<u32>,
    /// Emitted with the new state when numbering is turned on or off.
    pub pagination_turned: Signal<bool>,
    /// Emitted with the new value when the starting number changes.
    pub starting_number_changed: Signal<u32>,
    /// Emitted after any change.
    pub applied: Signal<()>,
}

impl PaginationComponent {
    /// Create a pagination component, numbering off, starting at 1.
    pub fn new(pages: Arc<PageComponent>) -> Self {
        Self {
            pages,
            enabled: Property::new(false),
            starting_number: Property::new(DEFAULT_STARTING_NUMBER),
            pagination_turned: Signal::new(),
            starting_number_changed: Signal::new(),
            applied: Signal::new(),
        }
    }

    pub fn is_pagination_turned(&self) -> bool {
        self.enabled.get()
    }

    pub fn starting_number(&self) -> u32 {
        self.starting_number.get()
    }

    pub fn set_pagination_turned(&self, on: bool) -> bool {
        let changed = self.enabled.set(on);
        if changed {
            self.pagination_turned.emit(on);
        }
        finish(&self.applied, changed, "set_pagination_turned")
    }

    pub fn set_pagination_starting_number(&self, number: u32) -> bool {
        let changed = self.starting_number.set(number);
        if changed {
            self.starting_number_changed.emit(number);
        }
        finish(&self.applied, changed, "set_pagination_starting_number")
    }

    /// The number shown on page `page_index` (zero-based), if any.
    ///
    /// `None` when numbering is off, the page does not exist, or it is the
    /// first page and the first page is excluded.
    pub fn page_label(&self, page_index: usize) -> Option<u32> {
        if !self.is_pagination_turned() || page_index >= self.pages.page_count() {
            return None;
        }
        if page_index == 0 && !self.pages.first_page_included() {
            return None;
        }
        let offset = u32::try_from(page_index).ok()?;
        self.starting_number().checked_add(offset)
    }
}

impl Component for PaginationComponent {
    fn applied(&self) -> &Signal<()> {
        &self.applied
    }
}
