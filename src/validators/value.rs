use std::sync::Arc;

use crate::foundation::{ErrorKey, ErrorMap, Rule, RuleTypeError, Rules, Validator};
use crate::validators::ValidatorError;
use crate::value::{TypeDesc, Value};

/// Validates a single value against an ordered rule list.
///
/// The registry's per-type entry point: a registered type becomes a
/// `ValueValidator` holding its top-level rules plus, when field rules
/// exist, a [`StructValidator`](crate::validators::StructValidator).
#[derive(Debug, Clone)]
pub struct ValueValidator {
    desc: TypeDesc,
    rules: Rules,
}

impl ValueValidator {
    /// Binds `rules` to `desc`, type-checking each rule.
    pub fn new(desc: TypeDesc, rules: Rules) -> Result<Self, ValidatorError> {
        if matches!(desc, TypeDesc::Ptr(_)) {
            return Err(ValidatorError::Rule(RuleTypeError::new(
                desc,
                "is a pointer, not supported",
            )));
        }
        for rule in &rules {
            rule.type_check(&desc)?;
        }
        Ok(Self { desc, rules })
    }

    /// Binds pre-checked rules without re-running type checks.
    pub(crate) fn from_parts(desc: TypeDesc, rules: Rules) -> Self {
        Self { desc, rules }
    }

    /// The bound rules, in run order.
    #[must_use]
    pub fn rules(&self) -> &[Arc<dyn Rule>] {
        &self.rules
    }
}

impl Rule for ValueValidator {
    fn validate_value(&self, value: &Value) -> ErrorMap {
        let mut dest = ErrorMap::new();
        self.validate_merge(value, &ErrorKey::default(), &mut dest);
        dest
    }

    fn type_check(&self, desc: &TypeDesc) -> Result<(), RuleTypeError> {
        if *desc == self.desc {
            Ok(())
        } else {
            Err(RuleTypeError::new(desc.clone(), format!("is not a {}", self.desc)))
        }
    }
}

impl Validator for ValueValidator {
    fn type_desc(&self) -> &TypeDesc {
        &self.desc
    }

    fn validate_merge(&self, value: &Value, path: &ErrorKey, dest: &mut ErrorMap) {
        let value = value.indirect();
        for rule in &self.rules {
            rule.validate_value(value).merge_into(path, dest);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::ErrorKey;
    use crate::rules::{present, trim_present};

    #[test]
    fn runs_rules_in_order_under_the_path() {
        let validator =
            ValueValidator::new(TypeDesc::Str, crate::rules![present(), trim_present()]).unwrap();

        let mut dest = ErrorMap::new();
        validator.validate_merge(&Value::Str("  ".into()), &ErrorKey::new("Name"), &mut dest);
        assert_eq!(dest.len(), 1);
        assert!(dest.get(&ErrorKey::new("Name.TrimPresent")).is_some());
    }

    #[test]
    fn construction_type_checks_rules() {
        let err = ValueValidator::new(TypeDesc::Int, crate::rules![trim_present()]).unwrap_err();
        assert!(matches!(err, ValidatorError::Rule(_)));
    }

    #[test]
    fn rejects_pointer_descriptors() {
        let desc = TypeDesc::Ptr(Box::new(TypeDesc::Int));
        assert!(ValueValidator::new(desc, Vec::new()).is_err());
    }

    #[test]
    fn dereferences_pointers_at_validate_time() {
        let validator = ValueValidator::new(TypeDesc::Str, crate::rules![present()]).unwrap();
        let wrapped = Value::Ptr(Some(Box::new(Value::Str("a".into()))));
        assert!(validator.validate_value(&wrapped).is_empty());
    }
}
