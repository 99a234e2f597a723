//! Bind a call's arguments to a signature.
//!
//! Named arguments fill by name, positional arguments fill by position, and
//! anything left over falls back to its declared default.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::trace;

use crate::args::{Arg, Args};
use crate::binding::Binding;
use crate::error::{BindingError, BindingResult};
use crate::param::Signature;

/// How a positional argument written after a named one is treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArgumentOrder {
    /// Reject with [`BindingError::PositionalAfterNamed`].
    #[default]
    Strict,
    /// Bind it to the parameter at its position in the call.
    Ordinal,
}

/// Argument resolver. Stateless apart from its ordering policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct Resolver {
    order: ArgumentOrder,
}

impl Resolver {
    pub fn new(order: ArgumentOrder) -> Self {
        Self { order }
    }

    pub fn order(&self) -> ArgumentOrder {
        self.order
    }

    /// Produce one value per declared parameter.
    ///
    /// Precedence per parameter: named argument, then positional slot, then
    /// default. Errors are checked in a fixed order: duplicate parameters in
    /// the signature, repeated names, positional-after-named, arity overflow,
    /// unknown names, missing values.
    pub fn resolve(&self, signature: &Signature, args: Args) -> BindingResult<Binding> {
        signature.validate()?;

        let declared = signature.len();
        let items = args.into_items();

        let mut names = HashSet::new();
        for item in &items {
            if let Arg::Named(name, _) = item {
                if !names.insert(name.as_str()) {
                    return Err(BindingError::DuplicateArgument { name: name.clone() });
                }
            }
        }

        // Assign each positional value its ordinal slot.
        let mut slotted = Vec::new();
        let mut seen_named = false;
        for (call_pos, item) in items.iter().enumerate() {
            match item {
                Arg::Named(..) => seen_named = true,
                Arg::Positional(_) if seen_named && self.order == ArgumentOrder::Strict => {
                    return Err(BindingError::PositionalAfterNamed { position: call_pos });
                }
                Arg::Positional(_) if seen_named => slotted.push(call_pos),
                Arg::Positional(_) => slotted.push(slotted.len()),
            }
        }
        if let Some(&last) = slotted.iter().max() {
            if last >= declared {
                let given = match self.order {
                    ArgumentOrder::Strict => slotted.len(),
                    ArgumentOrder::Ordinal => last + 1,
                };
                return Err(BindingError::ArityOverflow { declared, given });
            }
        }

        for item in &items {
            if let Arg::Named(name, _) = item {
                if !signature.contains(name) {
                    return Err(BindingError::UnknownArgument { name: name.clone() });
                }
            }
        }

        let mut by_name: Vec<Option<Value>> = vec![None; declared];
        let mut by_position: Vec<Option<Value>> = vec![None; declared];
        let mut slots = slotted.into_iter();
        for item in items {
            match item {
                Arg::Named(name, value) => {
                    if let Some(pos) = signature.position(&name) {
                        by_name[pos] = Some(value);
                    }
                }
                Arg::Positional(value) => {
                    if let Some(pos) = slots.next() {
                        by_position[pos] = Some(value);
                    }
                }
            }
        }

        let mut entries = Vec::with_capacity(declared);
        for (pos, param) in signature.params().iter().enumerate() {
            let value = by_name[pos]
                .take()
                .or_else(|| by_position[pos].take())
                .or_else(|| param.default_value())
                .ok_or(BindingError::MissingArgument { name: param.name() })?;
            entries.push((param.name(), value));
        }

        trace!(params = declared, "resolved binding");
        Ok(Binding::new(entries))
    }
}

/// Resolve with the default (strict) ordering policy.
pub fn resolve(signature: &Signature, args: Args) -> BindingResult<Binding> {
    Resolver::default().resolve(signature, args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::param::Param;
    use serde_json::json;

    static THREE: Signature = Signature::new(&[
        Param::required("a"),
        Param::with_default("b", || json!("b-default")),
        Param::with_default("c", || json!(0)),
    ]);

    fn values(binding: &Binding) -> Vec<Value> {
        binding.iter().map(|(_, v)| v.clone()).collect()
    }

    #[test]
    fn positional_fills_by_position() {
        let b = resolve(&THREE, Args::positional([1, 2, 3])).unwrap();
        assert_eq!(values(&b), vec![json!(1), json!(2), json!(3)]);
    }

    #[test]
    fn omitted_trailing_parameters_use_defaults() {
        let b = resolve(&THREE, Args::new().arg("x")).unwrap();
        assert_eq!(values(&b), vec![json!("x"), json!("b-default"), json!(0)]);
    }

    #[test]
    fn named_can_skip_a_middle_parameter() {
        let b = resolve(&THREE, Args::new().arg("x").named("c", 9)).unwrap();
        assert_eq!(values(&b), vec![json!("x"), json!("b-default"), json!(9)]);
    }

    #[test]
    fn named_beats_positional_for_the_same_parameter() {
        let b = resolve(&THREE, Args::new().arg("pos").named("a", "by-name")).unwrap();
        assert_eq!(b.get("a"), Some(&json!("by-name")));
    }

    #[test]
    fn missing_required_argument_fails() {
        assert_eq!(
            resolve(&THREE, Args::new().named("b", 1)),
            Err(BindingError::MissingArgument { name: "a" })
        );
    }

    #[test]
    fn empty_signature_with_no_arguments_is_empty_binding() {
        let b = resolve(&Signature::empty(), Args::new()).unwrap();
        assert!(b.is_empty());
    }

    #[test]
    fn strict_order_rejects_positional_after_named() {
        assert_eq!(
            resolve(&THREE, Args::new().named("a", 1).arg(2)),
            Err(BindingError::PositionalAfterNamed { position: 1 })
        );
    }

    #[test]
    fn ordinal_order_binds_by_call_position() {
        let resolver = Resolver::new(ArgumentOrder::Ordinal);
        let b = resolver
            .resolve(&THREE, Args::new().named("a", 1).arg(2))
            .unwrap();
        assert_eq!(values(&b), vec![json!(1), json!(2), json!(0)]);
    }

    #[test]
    fn ordinal_order_still_checks_arity() {
        let resolver = Resolver::new(ArgumentOrder::Ordinal);
        assert_eq!(
            resolver.resolve(&THREE, Args::new().named("a", 1).arg(2).arg(3).arg(4)),
            Err(BindingError::ArityOverflow {
                declared: 3,
                given: 4
            })
        );
    }

    #[test]
    fn duplicate_parameter_names_fail_every_call_shape() {
        static DUP: Signature = Signature::new(&[Param::required("a"), Param::required("a")]);
        let expected = Err(BindingError::DuplicateParameter { name: "a" });

        assert_eq!(resolve(&DUP, Args::new().named("a", 1)), expected);
        assert_eq!(resolve(&DUP, Args::positional([1, 2])), expected);
        assert_eq!(resolve(&DUP, Args::new()), expected);
    }

    #[test]
    fn repeated_name_is_rejected_first() {
        let args = Args::new().named("zzz", 1).named("zzz", 2);
        assert_eq!(
            resolve(&THREE, args),
            Err(BindingError::DuplicateArgument { name: "zzz".into() })
        );
    }

    #[test]
    fn arity_is_checked_before_unknown_names() {
        let args = Args::positional([1, 2, 3, 4]).named("zzz", 1);
        assert!(matches!(
            resolve(&THREE, args),
            Err(BindingError::ArityOverflow { .. })
        ));
    }
}
