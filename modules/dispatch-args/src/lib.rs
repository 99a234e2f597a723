//! Argument resolution for dispatchable types.
//!
//! A dispatchable type declares its constructor parameters once as a static
//! [`Signature`]. Each call supplies [`Args`] (positional, named, or both),
//! and [`resolve`] turns them into a complete [`Binding`] the constructor can
//! consume. Pure: no I/O, no shared state.

pub mod args;
pub mod binding;
pub mod error;
pub mod param;
pub mod resolve;

pub use args::{Arg, Args};
pub use binding::Binding;
pub use error::{BindingError, BindingResult};
pub use param::{Param, Signature};
pub use resolve::{resolve, ArgumentOrder, Resolver};
pub use serde_json::Value;
