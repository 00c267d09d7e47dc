//! Type-anchored validators
//!
//! Validators bind rules to a concrete type descriptor, type-checking
//! everything at construction so validation itself never reports
//! programmer errors. All three are themselves [`Rule`]s, so they nest:
//! a struct field's rule list may hold a slice validator whose element
//! rules hold another struct validator.
//!
//! [`Rule`]: crate::foundation::Rule

mod slice;
mod structs;
mod value;

pub use slice::SliceValidator;
pub use structs::StructValidator;
pub use value::ValueValidator;

use crate::foundation::RuleTypeError;
use crate::value::TypeDesc;

/// A construction-time validator defect.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidatorError {
    /// The descriptor handed to [`StructValidator`] is not a struct.
    #[error("type, {0}, is not a struct")]
    NotAStruct(TypeDesc),

    /// The descriptor handed to [`SliceValidator`] is not a sequence.
    #[error("type, {0}, is not a sequence")]
    NotASequence(TypeDesc),

    /// A rule-map field name missing from the struct.
    #[error("field, {field}, not found in type: {desc}")]
    UnknownField {
        /// The struct the field was looked up in.
        desc: TypeDesc,
        /// The missing field name.
        field: &'static str,
    },

    /// A rule rejected the field type it was attached to.
    #[error("field, {field}, in {desc}: {source}")]
    FieldRule {
        /// The struct holding the field.
        desc: TypeDesc,
        /// The field the rule was attached to.
        field: &'static str,
        /// The underlying mismatch.
        source: RuleTypeError,
    },

    /// A rule rejected the sequence's element type.
    #[error("element type: {0}")]
    ElementRule(RuleTypeError),

    /// A rule rejected the validator's own type.
    #[error(transparent)]
    Rule(#[from] RuleTypeError),
}
