//! Core validation traits
//!
//! [`Rule`] is the universal unit of validation. [`BasicRule`] narrows it
//! to rules with a fixed error shape, which is what composition needs:
//! a wrapper can only rewrite errors it can enumerate up front.
//! [`Validator`] adds the type-anchored entry point used by the registry.

use std::fmt::Debug;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::foundation::error::{ErrorKey, ErrorMap, RuleTypeError};
use crate::value::{TypeDesc, Value};

// ============================================================================
// TRAITS
// ============================================================================

/// A single validation unit.
///
/// Rules are stateless and shared freely across threads; both methods
/// take `&self`.
pub trait Rule: Debug + Send + Sync {
    /// Checks one value, returning an empty map on success.
    ///
    /// Keys in the returned map are relative to the value, not to any
    /// containing structure; callers re-key via [`ErrorMap::merge_into`].
    fn validate_value(&self, value: &Value) -> ErrorMap;

    /// Verifies at registration time that this rule can handle `desc`.
    fn type_check(&self, desc: &TypeDesc) -> Result<(), RuleTypeError>;
}

/// A rule whose possible errors are fixed and enumerable up front.
///
/// Wrapping combinators rely on this to invert or re-key the error set
/// without ever running the rule.
pub trait BasicRule: Rule {
    /// Every error this rule can produce, with zero-value field data.
    fn error_map(&self) -> ErrorMap;
}

/// A rule anchored to a concrete type, usable as a registry entry point.
pub trait Validator: Rule {
    /// The type this validator was built for.
    fn type_desc(&self) -> &TypeDesc;

    /// Validates `value` and merges any errors into `dest` under `path`.
    fn validate_merge(&self, value: &Value, path: &ErrorKey, dest: &mut ErrorMap);
}

// ============================================================================
// RULE COLLECTIONS
// ============================================================================

/// An ordered list of shared rules.
pub type Rules = Vec<Arc<dyn Rule>>;

/// Field name to rules, for struct validators. Sorted for deterministic
/// traversal.
pub type RuleMap = std::collections::BTreeMap<&'static str, Rules>;

/// A shared, interior-mutable rule slot.
///
/// The registry hands these out before the rules behind them exist: a
/// field referencing a not-yet-registered type gets an empty list that
/// is filled in when the type arrives. Cloning shares the slot.
#[derive(Debug, Clone, Default)]
pub struct RuleList(Arc<RwLock<Rules>>);

impl RuleList {
    /// Creates a slot holding `rules`.
    #[must_use]
    pub fn new(rules: Rules) -> Self {
        Self(Arc::new(RwLock::new(rules)))
    }

    /// Appends a rule to the slot.
    pub fn push(&self, rule: Arc<dyn Rule>) {
        self.0.write().push(rule);
    }

    /// The number of rules currently in the slot.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.read().len()
    }

    /// True when the slot holds no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.read().is_empty()
    }

    /// Runs every rule in order, merging errors into `dest` under `path`.
    pub fn validate_merge(&self, value: &Value, path: &ErrorKey, dest: &mut ErrorMap) {
        for rule in self.0.read().iter() {
            rule.validate_value(value).merge_into(path, dest);
        }
    }

    /// Runs every rule in order against a standalone value.
    #[must_use]
    pub fn validate_value(&self, value: &Value) -> ErrorMap {
        let mut dest = ErrorMap::new();
        self.validate_merge(value, &ErrorKey::default(), &mut dest);
        dest
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::error::TemplateError;

    #[derive(Debug)]
    struct AlwaysFails(&'static str);

    impl Rule for AlwaysFails {
        fn validate_value(&self, _: &Value) -> ErrorMap {
            ErrorMap::of(self.0, TemplateError::new("failed"))
        }

        fn type_check(&self, _: &TypeDesc) -> Result<(), RuleTypeError> {
            Ok(())
        }
    }

    #[test]
    fn rule_list_shares_pushes_across_clones() {
        let list = RuleList::default();
        let alias = list.clone();
        list.push(Arc::new(AlwaysFails("A")));
        assert_eq!(alias.len(), 1);
    }

    #[test]
    fn rule_list_merges_under_path() {
        let list = RuleList::new(vec![
            Arc::new(AlwaysFails("A")) as Arc<dyn Rule>,
            Arc::new(AlwaysFails("B")),
        ]);
        let mut dest = ErrorMap::new();
        list.validate_merge(&Value::Int(1), &ErrorKey::new("Root.Field"), &mut dest);
        assert_eq!(dest.len(), 2);
        assert!(dest.get(&ErrorKey::new("Root.Field.A")).is_some());
        assert!(dest.get(&ErrorKey::new("Root.Field.B")).is_some());
    }

    #[test]
    fn empty_rule_list_is_a_no_op() {
        let list = RuleList::default();
        assert!(list.is_empty());
        assert!(list.validate_value(&Value::Nil).is_empty());
    }
}
