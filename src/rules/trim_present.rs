use crate::foundation::{BasicRule, ErrorMap, Rule, RuleTypeError, TemplateError};
use crate::value::{TypeDesc, Value};

/// Checks that a string is non-empty after trimming whitespace.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrimPresent;

impl Rule for TrimPresent {
    fn validate_value(&self, value: &Value) -> ErrorMap {
        match value.indirect() {
            Value::Str(s) if !s.trim().is_empty() => ErrorMap::new(),
            _ => self.error_map(),
        }
    }

    fn type_check(&self, desc: &TypeDesc) -> Result<(), RuleTypeError> {
        match desc.indirect() {
            TypeDesc::Str => Ok(()),
            _ => Err(RuleTypeError::new(desc.clone(), "is not a string")),
        }
    }
}

impl BasicRule for TrimPresent {
    fn error_map(&self) -> ErrorMap {
        ErrorMap::of("TrimPresent", TemplateError::new("is just spaces or empty"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_only_fails() {
        assert!(!TrimPresent.validate_value(&Value::Str("\t \n".into())).is_empty());
        assert!(!TrimPresent.validate_value(&Value::Str(String::new())).is_empty());
    }

    #[test]
    fn surrounded_content_passes() {
        assert!(TrimPresent.validate_value(&Value::Str(" a ".into())).is_empty());
    }

    #[test]
    fn error_shape() {
        let map = TrimPresent.validate_value(&Value::Str(String::new()));
        let (key, error) = map.iter().next().unwrap();
        assert_eq!(key.as_str(), "TrimPresent");
        assert_eq!(error.render(), "is just spaces or empty");
    }

    #[test]
    fn type_check_rejects_non_strings() {
        assert!(TrimPresent.type_check(&TypeDesc::Str).is_ok());
        let err = TrimPresent.type_check(&TypeDesc::Int).unwrap_err();
        assert_eq!(err.bad_condition, "is not a string");
    }
}
