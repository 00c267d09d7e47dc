//! Convenient single-import surface.
//!
//! ```rust,ignore
//! use rigor::prelude::*;
//! ```

// ============================================================================
// FOUNDATION: traits, error model, report
// ============================================================================

pub use crate::foundation::{
    BasicRule, ErrorKey, ErrorMap, Report, Rule, RuleList, RuleMap, RuleTypeError, Rules,
    TemplateError, Validator,
};

// ============================================================================
// VALUE MODEL
// ============================================================================

pub use crate::value::{Inspect, TypeDesc, Value};

// ============================================================================
// RULES, ATTRIBUTES, COMBINATORS
// ============================================================================

pub use crate::attrs::{Attribute, Len, TrimSpace};
pub use crate::combinators::{Attr, Not, attr, not};
pub use crate::rules::{
    Equal, Greater, Less, Present, TrimPresent, equal, greater, greater_or_equal, less,
    less_or_equal, present, trim_present,
};

// ============================================================================
// VALIDATORS AND REGISTRY
// ============================================================================

pub use crate::registry::{Definition, NotFound, Registry, RegistryError};
pub use crate::validators::{
    SliceValidator, StructValidator, ValidatorError, ValueValidator,
};
