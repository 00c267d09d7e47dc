use crate::attrs::Attribute;
use crate::foundation::RuleTypeError;
use crate::value::{TypeDesc, Value};

/// Derives the length of a string, sequence or map as an `Int`.
///
/// Strings count characters, not bytes. Pointers are dereferenced; a
/// nil pointer has length zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Len;

impl Attribute for Len {
    fn name(&self) -> &'static str {
        "Len"
    }

    fn type_desc(&self) -> TypeDesc {
        TypeDesc::Int
    }

    fn get(&self, value: &Value) -> Value {
        Value::Int(value.len().unwrap_or(0) as i64)
    }

    fn type_check(&self, desc: &TypeDesc) -> Result<(), RuleTypeError> {
        match desc.indirect() {
            TypeDesc::Str | TypeDesc::Seq(_) | TypeDesc::Map(_) => Ok(()),
            _ => Err(RuleTypeError::new(
                desc.clone(),
                "does not have a length (not a sequence, map or string)",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_counts_entries() {
        assert_eq!(Len.get(&Value::Str("abc".into())), Value::Int(3));
        assert_eq!(
            Len.get(&Value::Seq(vec![Value::Int(1), Value::Int(2)])),
            Value::Int(2)
        );
        assert_eq!(Len.get(&Value::Nil), Value::Int(0));
    }

    #[test]
    fn get_counts_chars_not_bytes() {
        assert_eq!(Len.get(&Value::Str("héllo".into())), Value::Int(5));
    }

    #[test]
    fn type_check_accepts_length_kinds() {
        assert!(Len.type_check(&TypeDesc::Str).is_ok());
        assert!(Len.type_check(&TypeDesc::Seq(Box::new(TypeDesc::Int))).is_ok());
        assert!(Len.type_check(&TypeDesc::Map(Box::new(TypeDesc::Int))).is_ok());
        assert!(
            Len.type_check(&TypeDesc::Ptr(Box::new(TypeDesc::Seq(Box::new(TypeDesc::Int)))))
                .is_ok()
        );
    }

    #[test]
    fn type_check_rejects_scalars() {
        let err = Len.type_check(&TypeDesc::Int).unwrap_err();
        assert_eq!(
            err.bad_condition,
            "does not have a length (not a sequence, map or string)"
        );
    }
}
