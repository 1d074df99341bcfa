//! Logging facilities for Folio.
//!
//! Folio uses the `tracing` crate for instrumentation. To see logs, install a
//! subscriber in the host application:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("folio::component=debug,folio::style=debug")
//!     .init();
//! ```

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Signal/slot system target.
    pub const SIGNAL: &str = "folio::signal";
    /// Document, cursor and history target.
    pub const DOCUMENT: &str = "folio::document";
    /// Formatting, page and history components target.
    pub const COMPONENT: &str = "folio::component";
    /// Clipboard access target.
    pub const CLIPBOARD: &str = "folio::clipboard";
    /// Style store and table model target.
    pub const STYLE: &str = "folio::style";
    /// Toolbar controls target.
    pub const WIDGET: &str = "folio::widget";
    /// Configuration loading target.
    pub const CONFIG: &str = "folio::config";
}

/// A guard for timing a named operation.
///
/// Creates an info-level span on the `folio::perf` target that stays entered
/// until the guard is dropped.
///
/// # Example
///
/// ```
/// use folio_core::logging::PerfSpan;
///
/// {
///     let _span = PerfSpan::new("update_table");
///     // ... timed work ...
/// }
/// ```
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create a new performance span.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::info_span!(target: "folio::perf", "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perf_span_without_subscriber() {
        let _span = PerfSpan::new("test_operation");
        tracing::debug!(target: targets::COMPONENT, "inside span");
    }
}
