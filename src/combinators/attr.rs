use crate::attrs::Attribute;
use crate::foundation::{BasicRule, ErrorKey, ErrorMap, Rule, RuleTypeError};
use crate::value::{TypeDesc, Value};

/// Applies a rule to a derived attribute of the value.
///
/// `Attr::new(Len, equal(1))` validates the length of a string or
/// sequence, reporting under the key `Len-Equal` with the message
/// prefixed `attribute, Len, `.
#[derive(Debug, Clone)]
pub struct Attr<A: Attribute, R: BasicRule> {
    of: A,
    rule: R,
}

impl<A: Attribute, R: BasicRule> Attr<A, R> {
    /// Applies `rule` to the `of` attribute.
    pub fn new(of: A, rule: R) -> Self {
        Self { of, rule }
    }

    fn rekey(&self, original: ErrorMap) -> ErrorMap {
        original
            .into_iter()
            .map(|(key, mut error)| {
                error.template = format!("attribute, {{attr_name}}, {}", error.template).into();
                let error = error.with_field("attr_name", self.of.name());
                (ErrorKey::new(format!("{}-{key}", self.of.name())), error)
            })
            .collect()
    }
}

impl<A: Attribute, R: BasicRule> Rule for Attr<A, R> {
    fn validate_value(&self, value: &Value) -> ErrorMap {
        self.rekey(self.rule.validate_value(&self.of.get(value)))
    }

    fn type_check(&self, desc: &TypeDesc) -> Result<(), RuleTypeError> {
        self.of.type_check(desc)?;
        self.rule.type_check(&self.of.type_desc()).map_err(|mut err| {
            err.bad_condition =
                format!("has Attr, {}, which {}", self.of.name(), err.bad_condition);
            err
        })
    }
}

impl<A: Attribute, R: BasicRule> BasicRule for Attr<A, R> {
    fn error_map(&self) -> ErrorMap {
        self.rekey(self.rule.error_map())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attrs::{Len, TrimSpace};
    use crate::rules::{equal, less_or_equal, trim_present};

    #[test]
    fn validates_the_derived_value() {
        let rule = Attr::new(Len, equal(1_i64));
        assert!(rule.validate_value(&Value::Str("a".into())).is_empty());

        let map = rule.validate_value(&Value::Str("ab".into()));
        let error = map.get(&ErrorKey::new("Len-Equal")).unwrap();
        assert_eq!(error.render(), "attribute, Len, is not equal to 1");
    }

    #[test]
    fn composes_string_attributes() {
        let rule = Attr::new(TrimSpace, trim_present());
        let map = rule.validate_value(&Value::Str("  \t".into()));
        let error = map.get(&ErrorKey::new("TrimSpace-TrimPresent")).unwrap();
        assert_eq!(error.render(), "attribute, TrimSpace, is just spaces or empty");
    }

    #[test]
    fn type_check_rejects_unsupported_source() {
        let err = Attr::new(Len, equal(1_i64)).type_check(&TypeDesc::Int).unwrap_err();
        assert_eq!(
            err.bad_condition,
            "does not have a length (not a sequence, map or string)"
        );
    }

    #[test]
    fn type_check_rewrites_rule_mismatch() {
        // Len derives an int; a string-typed rule cannot apply to it.
        let err = Attr::new(Len, trim_present())
            .type_check(&TypeDesc::Str)
            .unwrap_err();
        assert_eq!(err.bad_condition, "has Attr, Len, which is not a string");
    }

    #[test]
    fn canonical_errors_carry_the_prefix() {
        let map = Attr::new(Len, less_or_equal(3_i64)).error_map();
        assert!(map.get(&ErrorKey::new("Len-LessOrEqual")).is_some());
    }
}
