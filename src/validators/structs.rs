use std::collections::BTreeMap;

use crate::foundation::{ErrorKey, ErrorMap, Rule, RuleList, RuleMap, RuleTypeError, Validator};
use crate::value::{TypeDesc, Value};
use crate::validators::ValidatorError;

/// Validates a struct's fields against per-field rule lists.
///
/// Field lists are shared [`RuleList`] slots so the registry can append
/// forward-referenced validators after construction. Fields without a
/// list are skipped.
#[derive(Debug, Clone)]
pub struct StructValidator {
    desc: TypeDesc,
    rule_map: BTreeMap<&'static str, RuleList>,
}

impl StructValidator {
    /// Binds `rule_map` to the struct `desc`, checking field names and
    /// type-checking every rule against its field's type.
    pub fn new(desc: TypeDesc, rule_map: RuleMap) -> Result<Self, ValidatorError> {
        let TypeDesc::Struct(struct_desc) = &desc else {
            return Err(ValidatorError::NotAStruct(desc));
        };

        let mut checked = BTreeMap::new();
        for (field, rules) in rule_map {
            let Some(field_desc) = struct_desc.field(field) else {
                return Err(ValidatorError::UnknownField { desc: desc.clone(), field });
            };
            let field_type = field_desc.type_desc();
            for rule in &rules {
                rule.type_check(&field_type).map_err(|source| ValidatorError::FieldRule {
                    desc: desc.clone(),
                    field,
                    source,
                })?;
            }
            checked.insert(field, RuleList::new(rules));
        }
        Ok(Self { desc, rule_map: checked })
    }

    /// Binds pre-checked rule-list slots without re-running checks.
    pub(crate) fn from_parts(
        desc: TypeDesc,
        rule_map: BTreeMap<&'static str, RuleList>,
    ) -> Self {
        Self { desc, rule_map }
    }

    /// The shared rule-list slot for `field`, if any.
    #[must_use]
    pub fn field_rules(&self, field: &str) -> Option<&RuleList> {
        self.rule_map.get(field)
    }
}

impl Rule for StructValidator {
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

impl Validator for StructValidator {
    fn type_desc(&self) -> &TypeDesc {
        &self.desc
    }

    fn validate_merge(&self, value: &Value, path: &ErrorKey, dest: &mut ErrorMap) {
        let value = value.indirect();
        for (field, rules) in &self.rule_map {
            let Some(field_value) = value.field(field) else { continue };
            rules.validate_merge(field_value.indirect(), &path.child(field), dest);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{present, trim_present};
    use crate::value::Inspect;

    crate::inspect_struct!(Card {
        name: String,
        count: i64,
    });

    #[test]
    fn validates_each_mapped_field() {
        let validator = StructValidator::new(
            Card::type_desc(),
            crate::rule_map! { "name" => [trim_present()], "count" => [present()] },
        )
        .unwrap();

        let card = Card { name: "  ".into(), count: 0 };
        let mut dest = ErrorMap::new();
        validator.validate_merge(&card.to_value(), &ErrorKey::new("Card"), &mut dest);

        assert_eq!(dest.len(), 2);
        assert!(dest.get(&ErrorKey::new("Card.name.TrimPresent")).is_some());
        assert!(dest.get(&ErrorKey::new("Card.count.Present")).is_some());
    }

    #[test]
    fn unmapped_fields_are_skipped() {
        let validator = StructValidator::new(
            Card::type_desc(),
            crate::rule_map! { "name" => [trim_present()] },
        )
        .unwrap();

        let card = Card { name: "ok".into(), count: 0 };
        assert!(validator.validate_value(&card.to_value()).is_empty());
    }

    #[test]
    fn unknown_field_is_a_construction_error() {
        let err = StructValidator::new(
            Card::type_desc(),
            crate::rule_map! { "missing" => [present()] },
        )
        .unwrap_err();
        assert!(matches!(err, ValidatorError::UnknownField { field: "missing", .. }));
    }

    #[test]
    fn field_rule_mismatch_is_a_construction_error() {
        let err = StructValidator::new(
            Card::type_desc(),
            crate::rule_map! { "count" => [trim_present()] },
        )
        .unwrap_err();
        assert!(matches!(err, ValidatorError::FieldRule { field: "count", .. }));
    }

    #[test]
    fn non_struct_descriptor_is_rejected() {
        let err = StructValidator::new(TypeDesc::Int, RuleMap::new()).unwrap_err();
        assert!(matches!(err, ValidatorError::NotAStruct(_)));
    }
}
