use crate::foundation::{BasicRule, ErrorMap, Rule, RuleTypeError, TemplateError};
use crate::value::{TypeDesc, Value};

/// Checks that a value is meaningfully present.
///
/// Absent values are the zero value of their kind, empty strings,
/// sequences and maps, nil pointers, and pointers whose target is
/// itself absent. Applies to every type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Present;

impl Present {
    fn is_present(value: &Value) -> bool {
        match value {
            Value::Nil => false,
            Value::Ptr(None) => false,
            Value::Ptr(Some(inner)) => Self::is_present(inner),
            other => {
                if other.is_zero() {
                    return false;
                }
                other.len().is_none_or(|len| len > 0)
            }
        }
    }
}

impl Rule for Present {
    fn validate_value(&self, value: &Value) -> ErrorMap {
        if Self::is_present(value) {
            ErrorMap::new()
        } else {
            self.error_map()
        }
    }

    fn type_check(&self, _: &TypeDesc) -> Result<(), RuleTypeError> {
        Ok(())
    }
}

impl BasicRule for Present {
    fn error_map(&self) -> ErrorMap {
        ErrorMap::of("Present", TemplateError::new("is not present"))
    }
}
