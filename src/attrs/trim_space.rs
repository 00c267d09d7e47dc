use crate::attrs::Attribute;
use crate::foundation::RuleTypeError;
use crate::value::{TypeDesc, Value};

/// Derives the whitespace-trimmed form of a string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrimSpace;

impl Attribute for TrimSpace {
    fn name(&self) -> &'static str {
        "TrimSpace"
    }

    fn type_desc(&self) -> TypeDesc {
        TypeDesc::Str
    }

    fn get(&self, value: &Value) -> Value {
        match value.indirect() {
            Value::Str(s) => Value::Str(s.trim().to_owned()),
            _ => Value::Str(String::new()),
        }
    }

    fn type_check(&self, desc: &TypeDesc) -> Result<(), RuleTypeError> {
        match desc.indirect() {
            TypeDesc::Str => Ok(()),
            _ => Err(RuleTypeError::new(desc.clone(), "is not a string")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_trims_surrounding_whitespace() {
        assert_eq!(
            TrimSpace.get(&Value::Str("\t not space \n".into())),
            Value::Str("not space".into())
        );
        assert_eq!(
            TrimSpace.get(&Value::Str("\t \t\n \n".into())),
            Value::Str(String::new())
        );
    }

    #[test]
    fn type_check_rejects_non_strings() {
        assert!(TrimSpace.type_check(&TypeDesc::Str).is_ok());
        let err = TrimSpace.type_check(&TypeDesc::Int).unwrap_err();
        assert_eq!(err.bad_condition, "is not a string");
    }
}
