//! Comparison rules against a captured reference value
//!
//! Each rule captures the reference as a [`Value`] plus its descriptor;
//! `type_check` demands the exact descriptor, so a mismatched comparison
//! is caught at registration. At validate time a value that cannot be
//! compared (wrong kind reaching a rule outside the registry) collects
//! the rule's canonical errors rather than panicking.

use std::cmp::Ordering;

use crate::foundation::{BasicRule, ErrorMap, Rule, RuleTypeError, TemplateError};
use crate::value::{Inspect, TypeDesc, Value};

fn exact_type_check(to_desc: &TypeDesc, desc: &TypeDesc) -> Result<(), RuleTypeError> {
    if desc == to_desc {
        Ok(())
    } else {
        Err(RuleTypeError::new(desc.clone(), format!("is not a {to_desc}")))
    }
}

fn ordered_error_map(name: &str, to: &Value, or_equal: bool) -> ErrorMap {
    let (key, suffix) = if or_equal {
        (format!("{name}OrEqual"), "or equal to ")
    } else {
        (name.to_owned(), "")
    };
    let template = format!("is not {} than {suffix}{{to}}", name.to_lowercase());
    ErrorMap::of(key, TemplateError::new(template).with_field("to", to.to_string()))
}

// ============================================================================
// EQUAL
// ============================================================================

/// Checks that a value equals the captured reference.
#[derive(Debug, Clone, PartialEq)]
pub struct Equal {
    to: Value,
    to_desc: TypeDesc,
}

impl Equal {
    /// Captures `to` as the reference value.
    pub fn new<T: Inspect>(to: T) -> Self {
        Self { to: to.to_value(), to_desc: T::type_desc() }
    }
}

impl Rule for Equal {
    fn validate_value(&self, value: &Value) -> ErrorMap {
        if *value == self.to {
            ErrorMap::new()
        } else {
            self.error_map()
        }
    }

    fn type_check(&self, desc: &TypeDesc) -> Result<(), RuleTypeError> {
        exact_type_check(&self.to_desc, desc)
    }
}

impl BasicRule for Equal {
    fn error_map(&self) -> ErrorMap {
        ErrorMap::of(
            "Equal",
            TemplateError::new("is not equal to {to}").with_field("to", self.to.to_string()),
        )
    }
}

// ============================================================================
// LESS / GREATER
// ============================================================================

/// Checks that a value orders strictly below the captured reference,
/// or at-or-below with [`Less::or_equal`].
#[derive(Debug, Clone, PartialEq)]
pub struct Less {
    to: Value,
    to_desc: TypeDesc,
    or_equal: bool,
}

impl Less {
    /// Captures `to` as the reference value.
    pub fn new<T: Inspect>(to: T) -> Self {
        Self { to: to.to_value(), to_desc: T::type_desc(), or_equal: false }
    }

    /// Also accepts equality. Renames the rule to `LessOrEqual`.
    #[must_use]
    pub fn or_equal(mut self) -> Self {
        self.or_equal = true;
        self
    }
}

impl Rule for Less {
    fn validate_value(&self, value: &Value) -> ErrorMap {
        match value.compare(&self.to) {
            Some(Ordering::Less) => ErrorMap::new(),
            Some(Ordering::Equal) if self.or_equal => ErrorMap::new(),
            _ => self.error_map(),
        }
    }

    fn type_check(&self, desc: &TypeDesc) -> Result<(), RuleTypeError> {
        exact_type_check(&self.to_desc, desc)
    }
}

impl BasicRule for Less {
    fn error_map(&self) -> ErrorMap {
        ordered_error_map("Less", &self.to, self.or_equal)
    }
}

/// Checks that a value orders strictly above the captured reference,
/// or at-or-above with [`Greater::or_equal`].
#[derive(Debug, Clone, PartialEq)]
pub struct Greater {
    to: Value,
    to_desc: TypeDesc,
    or_equal: bool,
}

impl Greater {
    /// Captures `to` as the reference value.
    pub fn new<T: Inspect>(to: T) -> Self {
        Self { to: to.to_value(), to_desc: T::type_desc(), or_equal: false }
    }

    /// Also accepts equality. Renames the rule to `GreaterOrEqual`.
    #[must_use]
    pub fn or_equal(mut self) -> Self {
        self.or_equal = true;
        self
    }
}

impl Rule for Greater {
    fn validate_value(&self, value: &Value) -> ErrorMap {
        match value.compare(&self.to) {
            Some(Ordering::Greater) => ErrorMap::new(),
            Some(Ordering::Equal) if self.or_equal => ErrorMap::new(),
            _ => self.error_map(),
        }
    }

    fn type_check(&self, desc: &TypeDesc) -> Result<(), RuleTypeError> {
        exact_type_check(&self.to_desc, desc)
    }
}

impl BasicRule for Greater {
    fn error_map(&self) -> ErrorMap {
        ordered_error_map("Greater", &self.to, self.or_equal)
    }
}
