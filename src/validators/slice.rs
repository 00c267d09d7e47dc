use crate::foundation::{ErrorKey, ErrorMap, Rule, RuleList, RuleTypeError, Rules, Validator};
use crate::validators::ValidatorError;
use crate::value::{TypeDesc, Value};

/// Validates every element of a sequence against a shared rule list.
///
/// Errors for element `i` land under `path[i]`, index attached to the
/// sequence's own segment.
#[derive(Debug, Clone)]
pub struct SliceValidator {
    desc: TypeDesc,
    element_rules: RuleList,
}

impl SliceValidator {
    /// Binds `element_rules` to the sequence `desc`, type-checking each
    /// rule against the element type.
    pub fn new(desc: TypeDesc, element_rules: Rules) -> Result<Self, ValidatorError> {
        let TypeDesc::Seq(element) = &desc else {
            return Err(ValidatorError::NotASequence(desc));
        };
        for rule in &element_rules {
            rule.type_check(element).map_err(ValidatorError::ElementRule)?;
        }
        Ok(Self { desc, element_rules: RuleList::new(element_rules) })
    }

    /// Binds a pre-checked shared slot without re-running checks.
    pub(crate) fn from_parts(desc: TypeDesc, element_rules: RuleList) -> Self {
        Self { desc, element_rules }
    }

    /// The shared element rule slot.
    #[must_use]
    pub fn element_rules(&self) -> &RuleList {
        &self.element_rules
    }
}

impl Rule for SliceValidator {
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

impl Validator for SliceValidator {
    fn type_desc(&self) -> &TypeDesc {
        &self.desc
    }

    fn validate_merge(&self, value: &Value, path: &ErrorKey, dest: &mut ErrorMap) {
        let Value::Seq(items) = value.indirect() else { return };
        for (i, item) in items.iter().enumerate() {
            self.element_rules.validate_merge(item.indirect(), &path.indexed(i), dest);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{present, trim_present};
    use crate::value::Inspect;

    fn string_seq() -> TypeDesc {
        Vec::<String>::type_desc()
    }

    #[test]
    fn indexes_attach_to_the_path_segment() {
        let validator = SliceValidator::new(string_seq(), crate::rules![present()]).unwrap();
        let data = vec!["a".to_owned(), String::new(), "c".to_owned()];

        let mut dest = ErrorMap::new();
        validator.validate_merge(&data.to_value(), &ErrorKey::new("Root.Items"), &mut dest);

        assert_eq!(dest.len(), 1);
        assert!(dest.get(&ErrorKey::new("Root.Items[1].Present")).is_some());
    }

    #[test]
    fn empty_sequence_passes() {
        let validator = SliceValidator::new(string_seq(), crate::rules![present()]).unwrap();
        assert!(validator.validate_value(&Vec::<String>::new().to_value()).is_empty());
    }

    #[test]
    fn element_rule_mismatch_is_a_construction_error() {
        let err = SliceValidator::new(Vec::<i64>::type_desc(), crate::rules![trim_present()])
            .unwrap_err();
        assert!(matches!(err, ValidatorError::ElementRule(_)));
    }

    #[test]
    fn non_sequence_descriptor_is_rejected() {
        let err = SliceValidator::new(TypeDesc::Str, Vec::new()).unwrap_err();
        assert!(matches!(err, ValidatorError::NotASequence(_)));
    }
}
