//! Errors surfaced by the dispatch entry points.

use dispatch_args::BindingError;
use thiserror::Error;

/// A dispatch call failed. Nothing is retried or compensated.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// Arguments did not fit the target's signature
    #[error(transparent)]
    Binding(#[from] BindingError),

    /// The target type rejected the bound values
    #[error("failed to construct {event_type}: {source}")]
    Construction {
        event_type: &'static str,
        #[source]
        source: anyhow::Error,
    },

    /// The event channel refused the submission
    #[error("channel rejected {event_type}: {source}")]
    Channel {
        event_type: &'static str,
        #[source]
        source: anyhow::Error,
    },
}

impl DispatchError {
    pub fn is_binding(&self) -> bool {
        matches!(self, DispatchError::Binding(_))
    }
}

/// Result type alias for dispatch calls.
pub type DispatchResult<T = ()> = std::result::Result<T, DispatchError>;
