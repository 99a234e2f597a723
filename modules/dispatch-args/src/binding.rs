//! The resolved parameter bindings handed to a constructor.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Exactly one value per declared parameter, in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    entries: Vec<(&'static str, Value)>,
}

impl Binding {
    pub(crate) fn new(entries: Vec<(&'static str, Value)>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &Value)> {
        self.entries.iter().map(|(n, v)| (*n, v))
    }

    /// Move the value bound to `name` out and decode it.
    ///
    /// The slot is left as `null`. Decode failures are constructor failures,
    /// not binding failures.
    pub fn take<T: DeserializeOwned>(&mut self, name: &str) -> Result<T> {
        let slot = self
            .entries
            .iter_mut()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v)
            .with_context(|| format!("no parameter named `{name}` in binding"))?;
        serde_json::from_value(std::mem::take(slot))
            .with_context(|| format!("invalid value for `{name}`"))
    }

    pub fn into_entries(self) -> Vec<(&'static str, Value)> {
        self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::BTreeMap;

    fn binding() -> Binding {
        Binding::new(vec![
            ("named", json!("the-name")),
            ("data", json!({"the-key": "the-value"})),
        ])
    }

    #[test]
    fn take_decodes_typed_values() {
        let mut b = binding();
        let named: String = b.take("named").unwrap();
        let data: BTreeMap<String, String> = b.take("data").unwrap();
        assert_eq!(named, "the-name");
        assert_eq!(data["the-key"], "the-value");
        assert_eq!(b.get("named"), Some(&Value::Null));
    }

    #[test]
    fn take_reports_type_mismatch() {
        let mut b = binding();
        let err = b.take::<u32>("named").unwrap_err();
        assert!(err.to_string().contains("named"));
    }

    #[test]
    fn take_reports_unknown_slot() {
        let mut b = binding();
        assert!(b.take::<String>("nope").is_err());
    }

    #[test]
    fn iteration_keeps_declaration_order() {
        let names: Vec<_> = binding().iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["named", "data"]);
    }
}
