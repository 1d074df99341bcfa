//! Errors raised by signals and guarded properties.

/// Failures of the notification layer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    #[error("signal: {0}")]
    Signal(#[from] SignalError),
    /// A value was refused before it reached a property.
    #[error("'{property}' rejected: {reason}")]
    InvalidValue {
        property: &'static str,
        reason: String,
    },
}

impl CoreError {
    pub fn invalid_value(property: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            property,
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SignalError {
    /// The id was never issued by this signal or its slot is already gone.
    #[error("unknown connection")]
    UnknownConnection,
}

pub type Result<T> = std::result::Result<T, CoreError>;
