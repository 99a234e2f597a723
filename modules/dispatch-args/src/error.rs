//! Typed errors for argument resolution.

use thiserror::Error;

/// A call's arguments could not be bound to the target's declared parameters.
///
/// These are programmer errors at the call site. They are raised before
/// anything is constructed and are never retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindingError {
    /// More positional values than declared parameters
    #[error("too many positional arguments: {declared} declared, {given} given")]
    ArityOverflow { declared: usize, given: usize },

    /// A named argument matches no declared parameter
    #[error("unknown named argument: {name}")]
    UnknownArgument { name: String },

    /// A parameter received no argument and has no default
    #[error("missing required argument: {name}")]
    MissingArgument { name: &'static str },

    /// The same name was supplied twice in one call
    #[error("argument supplied more than once: {name}")]
    DuplicateArgument { name: String },

    /// A positional value followed a named one under strict ordering
    #[error("positional argument at position {position} follows a named argument")]
    PositionalAfterNamed { position: usize },

    /// Two parameters in one signature share a name
    #[error("duplicate parameter in signature: {name}")]
    DuplicateParameter { name: &'static str },
}

/// Result type alias for resolution.
pub type BindingResult<T> = std::result::Result<T, BindingError>;
