//! Per-call arguments: positional values, named values, or a mix.

use serde_json::Value;

/// One argument as the caller supplied it.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    Positional(Value),
    Named(String, Value),
}

/// The actual arguments of one dispatch call, in call order.
///
/// Built fresh per call and consumed by resolution. Use the builder methods
/// or the [`args!`](crate::args) macro:
///
/// ```
/// use dispatch_args::{args, Args};
/// use serde_json::json;
///
/// let a = Args::new().arg("the-name").named("data", json!({"the-key": "the-value"}));
/// let b = args!["the-name", data = json!({"the-key": "the-value"})];
/// assert_eq!(a, b);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Args {
    items: Vec<Arg>,
}

impl Args {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a positional value.
    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.items.push(Arg::Positional(value.into()));
        self
    }

    /// Append a value bound by parameter name.
    pub fn named(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.items.push(Arg::Named(name.into(), value.into()));
        self
    }

    /// Purely positional arguments.
    pub fn positional<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self {
            items: values
                .into_iter()
                .map(|v| Arg::Positional(v.into()))
                .collect(),
        }
    }

    /// Purely named arguments, e.g. from a decoded JSON object.
    pub fn from_named<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Self {
            items: pairs
                .into_iter()
                .map(|(k, v)| Arg::Named(k.into(), v.into()))
                .collect(),
        }
    }

    pub fn items(&self) -> &[Arg] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Positional values in call order.
    pub fn positional_values(&self) -> impl Iterator<Item = &Value> {
        self.items.iter().filter_map(|item| match item {
            Arg::Positional(v) => Some(v),
            Arg::Named(..) => None,
        })
    }

    /// Named values in call order.
    pub fn named_values(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.items.iter().filter_map(|item| match item {
            Arg::Named(name, v) => Some((name.as_str(), v)),
            Arg::Positional(_) => None,
        })
    }

    pub fn into_items(self) -> Vec<Arg> {
        self.items
    }
}

impl From<Vec<Value>> for Args {
    fn from(values: Vec<Value>) -> Self {
        Self::positional(values)
    }
}

impl From<serde_json::Map<String, Value>> for Args {
    fn from(map: serde_json::Map<String, Value>) -> Self {
        Self::from_named(map)
    }
}

/// Build [`Args`] with call syntax: bare expressions are positional,
/// `name = expr` is named.
///
/// ```
/// use dispatch_args::args;
///
/// let empty = args![];
/// let positional = args!["the-name", 3];
/// let named = args![named = "the-name", count = 3];
/// assert!(empty.is_empty());
/// assert_eq!(positional.len(), 2);
/// assert_eq!(named.named_values().count(), 2);
/// ```
#[macro_export]
macro_rules! args {
    (@munch $acc:expr;) => {
        $acc
    };
    (@munch $acc:expr; $name:ident = $value:expr $(, $($rest:tt)*)?) => {
        $crate::args!(@munch $acc.named(stringify!($name), $value); $($($rest)*)?)
    };
    (@munch $acc:expr; $value:expr $(, $($rest:tt)*)?) => {
        $crate::args!(@munch $acc.arg($value); $($($rest)*)?)
    };
    () => {
        $crate::Args::new()
    };
    ($($rest:tt)+) => {
        $crate::args!(@munch $crate::Args::new(); $($rest)+)
    };
}
