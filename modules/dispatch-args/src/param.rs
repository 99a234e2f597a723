//! Static parameter tables for dispatchable types.

use std::collections::HashSet;

use serde_json::Value;

use crate::error::{BindingError, BindingResult};

/// One declared constructor parameter.
///
/// The ordinal position is the parameter's index in its [`Signature`].
#[derive(Debug, Clone, Copy)]
pub struct Param {
    name: &'static str,
    default: Option<fn() -> Value>,
}

impl Param {
    /// A parameter the caller must always supply.
    pub const fn required(name: &'static str) -> Self {
        Self {
            name,
            default: None,
        }
    }

    /// A parameter that falls back to `default()` when omitted.
    ///
    /// The provider runs once per call that omits the parameter, so mutable
    /// defaults (maps, lists) are never shared between instances.
    pub const fn with_default(name: &'static str, default: fn() -> Value) -> Self {
        Self {
            name,
            default: Some(default),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }

    /// Produce a fresh default value, if the parameter declares one.
    pub fn default_value(&self) -> Option<Value> {
        self.default.map(|provider| provider())
    }
}

/// Ordered constructor parameters of a dispatchable type.
///
/// Declared once per type as a `static` and read-only afterwards:
///
/// ```
/// use dispatch_args::{Param, Signature};
/// use serde_json::{json, Value};
///
/// static SIGNATURE: Signature = Signature::new(&[
///     Param::with_default("named", || Value::String(String::new())),
///     Param::with_default("data", || json!({})),
/// ]);
///
/// assert_eq!(SIGNATURE.position("data"), Some(1));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Signature {
    params: &'static [Param],
}

impl Signature {
    pub const fn new(params: &'static [Param]) -> Self {
        Self { params }
    }

    /// A signature with no parameters. Resolves to an empty binding.
    pub const fn empty() -> Self {
        Self { params: &[] }
    }

    pub fn params(&self) -> &'static [Param] {
        self.params
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Ordinal position of the parameter called `name`.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.params.iter().position(|p| p.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Check that parameter names are unique.
    pub fn validate(&self) -> BindingResult<()> {
        let mut seen = HashSet::with_capacity(self.params.len());
        for param in self.params {
            if !seen.insert(param.name) {
                return Err(BindingError::DuplicateParameter { name: param.name });
            }
        }
        Ok(())
    }
}
