//! Type registration and forward-reference resolution
//!
//! The registry owns the type name to validator map. Types may reference
//! each other in any order: a field whose type is not yet registered gets
//! a shared [`RuleList`] slot recorded as pending, and the slot is filled
//! retroactively when that type registers. Self-referential types record
//! a pending slot on themselves and resolve it in the same call.
//!
//! Registration is a start-up activity; afterwards the registry is
//! read-only and shares freely across threads.

use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

use tracing::debug;

use crate::foundation::{
    ErrorKey, ErrorMap, Report, Rule, RuleList, RuleMap, Rules, RuleTypeError, TemplateError,
    Validator,
};
use crate::validators::{SliceValidator, StructValidator, ValidatorError, ValueValidator};
use crate::value::{Inspect, TypeDesc, Value};

// ============================================================================
// NOT-FOUND FALLBACK
// ============================================================================

/// The rule behind the package-level fallback validator: always fails,
/// naming the unregistered type.
#[derive(Debug, Clone, Copy, Default)]
pub struct NotFound;

impl Rule for NotFound {
    fn validate_value(&self, value: &Value) -> ErrorMap {
        ErrorMap::of(
            "NotFound",
            TemplateError::new("type, {kind}, not found in Registry")
                .with_field("kind", value.type_name().to_owned()),
        )
    }

    fn type_check(&self, _: &TypeDesc) -> Result<(), RuleTypeError> {
        Ok(())
    }
}

static NOT_FOUND_VALIDATOR: LazyLock<Arc<ValueValidator>> = LazyLock::new(|| {
    Arc::new(ValueValidator::from_parts(TypeDesc::Any, crate::rules![NotFound]))
});

// ============================================================================
// DEFINITION BUILDER
// ============================================================================

/// A validation definition for one type, built fluently and handed to
/// [`Registry::register_type`].
///
/// Both builder methods are single-use; calling one twice is a
/// programmer error and panics.
#[derive(Debug)]
pub struct Definition {
    desc: TypeDesc,
    top_level_rules: Rules,
    rule_map: RuleMap,
}

impl Definition {
    /// Starts a definition for `T`.
    #[must_use]
    pub fn new<T: Inspect>() -> Self {
        Self::for_desc(T::type_desc())
    }

    /// Starts a definition from an explicit descriptor.
    #[must_use]
    pub fn for_desc(desc: TypeDesc) -> Self {
        Self { desc, top_level_rules: Rules::new(), rule_map: RuleMap::new() }
    }

    /// Attaches rules that run against the whole value.
    ///
    /// # Panics
    ///
    /// Panics when called twice.
    #[must_use]
    pub fn validates_top_level(mut self, rules: Rules) -> Self {
        assert!(
            self.top_level_rules.is_empty(),
            "validates_top_level() called twice in type: {}",
            self.desc
        );
        self.top_level_rules = rules;
        self
    }

    /// Attaches per-field rules.
    ///
    /// # Panics
    ///
    /// Panics when called twice, or with a field name the type does not
    /// have.
    #[must_use]
    pub fn validates(mut self, rule_map: RuleMap) -> Self {
        assert!(
            self.rule_map.is_empty(),
            "validates() called twice in type: {}",
            self.desc
        );
        for field in rule_map.keys() {
            assert!(
                self.desc.field(field).is_some(),
                "validates() called with field, {field}, not in type: {}",
                self.desc
            );
        }
        self.rule_map = rule_map;
        self
    }
}

// ============================================================================
// REGISTRY
// ============================================================================

/// A registration-time defect reported by [`Registry::register_type`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RegistryError {
    /// The type was registered twice.
    #[error("type, {0}, already registered in Registry")]
    AlreadyRegistered(String),

    /// A rule or rule-map entry failed its type check.
    #[error(transparent)]
    Validator(#[from] ValidatorError),
}

/// Owner of type to validator bindings.
///
/// The intended lifecycle is register everything at start-up, then
/// validate concurrently; lookups never mutate.
#[derive(Debug, Default)]
pub struct Registry {
    validators: HashMap<String, Arc<ValueValidator>>,
    pending: HashMap<String, Vec<RuleList>>,
    /// Overrides the package-level fallback for unregistered types.
    pub default_validator: Option<Arc<dyn Validator>>,
}

impl Registry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `definition`'s type, resolving forward references in
    /// both directions.
    pub fn register_type(&mut self, definition: Definition) -> Result<(), RegistryError> {
        let Definition { desc, top_level_rules, rule_map } = definition;
        let name = desc.indirect().to_string();
        if self.validators.contains_key(&name) {
            return Err(RegistryError::AlreadyRegistered(name));
        }

        for rule in &top_level_rules {
            rule.type_check(&desc).map_err(ValidatorError::Rule)?;
        }

        let mut rules = top_level_rules;
        if !rule_map.is_empty() {
            let field_lists = self.build_field_lists(&desc, rule_map)?;
            rules.push(Arc::new(StructValidator::from_parts(desc.clone(), field_lists)));
        }

        let validator = Arc::new(ValueValidator::from_parts(desc, rules));
        self.validators.insert(name.clone(), validator.clone());
        debug!(%name, "registered type");

        if let Some(slots) = self.pending.remove(&name) {
            debug!(%name, slots = slots.len(), "resolved pending references");
            for slot in slots {
                slot.push(validator.clone());
            }
        }
        Ok(())
    }

    /// [`Registry::register_type`], panicking on error.
    pub fn must_register_type(&mut self, definition: Definition) {
        if let Err(err) = self.register_type(definition) {
            panic!("register_type(): {err}");
        }
    }

    fn build_field_lists(
        &mut self,
        desc: &TypeDesc,
        rule_map: RuleMap,
    ) -> Result<std::collections::BTreeMap<&'static str, RuleList>, RegistryError> {
        let TypeDesc::Struct(struct_desc) = desc else {
            return Err(ValidatorError::NotAStruct(desc.clone()).into());
        };

        let mut field_lists = std::collections::BTreeMap::new();
        for (field, rules) in rule_map {
            let Some(field_desc) = struct_desc.field(field) else {
                return Err(ValidatorError::UnknownField { desc: desc.clone(), field }.into());
            };
            let field_type = field_desc.type_desc();
            for rule in &rules {
                rule.type_check(&field_type).map_err(|source| ValidatorError::FieldRule {
                    desc: desc.clone(),
                    field,
                    source,
                })?;
            }
            let list = RuleList::new(rules);
            self.attach_references(&field_type, &list);
            field_lists.insert(field, list);
        }
        Ok(field_lists)
    }

    /// Hooks `slot` up to the validator of the type `desc` references,
    /// directly when registered, as a pending reference otherwise.
    /// Sequence types gain a fresh slice validator per nesting level.
    fn attach_references(&mut self, desc: &TypeDesc, slot: &RuleList) {
        match desc.indirect() {
            TypeDesc::Struct(struct_desc) => {
                let name = struct_desc.name();
                match self.validators.get(name) {
                    Some(validator) => slot.push(validator.clone()),
                    None => {
                        self.pending.entry(name.to_owned()).or_default().push(slot.clone());
                    }
                }
            }
            seq @ TypeDesc::Seq(element) => {
                if references_struct(element) {
                    let element_rules = RuleList::default();
                    self.attach_references(element, &element_rules);
                    slot.push(Arc::new(SliceValidator::from_parts(seq.clone(), element_rules)));
                }
            }
            _ => {}
        }
    }

    /// The registered validator for `desc`, if any.
    #[must_use]
    pub fn validator(&self, desc: &TypeDesc) -> Option<&Arc<ValueValidator>> {
        self.validators.get(&desc.indirect().to_string())
    }

    /// The registered validator for `value`'s type, if any.
    #[must_use]
    pub fn validator_for(&self, value: &Value) -> Option<&Arc<ValueValidator>> {
        self.validators.get(value.type_name())
    }

    /// The validator for `value`'s type, falling back to the registry
    /// default and then the package-level not-found validator.
    #[must_use]
    pub fn defaulted_validator(&self, value: &Value) -> Arc<dyn Validator> {
        if let Some(validator) = self.validator_for(value) {
            return validator.clone();
        }
        debug!(kind = value.type_name(), "validator not found, using fallback");
        match &self.default_validator {
            Some(validator) => validator.clone(),
            None => NOT_FOUND_VALIDATOR.clone(),
        }
    }

    /// Validates `data`, reporting errors under its type's name.
    #[must_use]
    pub fn validate<T: Inspect>(&self, data: &T) -> Report {
        let value = data.to_value();
        let mut dest = ErrorMap::new();
        let root = ErrorKey::new(value.type_name());
        self.defaulted_validator(&value).validate_merge(&value, &root, &mut dest);
        Report::new(dest)
    }

    /// Validates a dynamic value with an empty root path.
    #[must_use]
    pub fn validate_value(&self, value: &Value) -> ErrorMap {
        let mut dest = ErrorMap::new();
        self.validate_merge(value, &ErrorKey::default(), &mut dest);
        dest
    }

    /// Validates a dynamic value, merging errors into `dest` under `path`.
    pub fn validate_merge(&self, value: &Value, path: &ErrorKey, dest: &mut ErrorMap) {
        self.defaulted_validator(value).validate_merge(value, path, dest);
    }
}

fn references_struct(desc: &TypeDesc) -> bool {
    match desc.indirect() {
        TypeDesc::Struct(_) => true,
        TypeDesc::Seq(element) => references_struct(element),
        _ => false,
    }
}
