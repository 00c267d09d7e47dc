//! Attributes: derived views of a value
//!
//! An attribute projects a value onto a derived value of a known type,
//! such as its length or its trimmed form. Rules compose with attributes
//! through [`crate::combinators::Attr`], which validates the derivation
//! instead of the value itself.

mod len;
mod trim_space;

pub use len::Len;
pub use trim_space::TrimSpace;

use std::fmt::Debug;

use crate::foundation::RuleTypeError;
use crate::value::{TypeDesc, Value};

/// A derived view of a value.
///
/// `get` is only called on values whose type passed `type_check`, so
/// implementations may assume a conforming kind.
pub trait Attribute: Debug + Send + Sync {
    /// The attribute's name, used in error keys and messages.
    fn name(&self) -> &'static str;

    /// The type of the derived value.
    fn type_desc(&self) -> TypeDesc;

    /// Derives the attribute value.
    fn get(&self, value: &Value) -> Value;

    /// Verifies the attribute applies to `desc`.
    fn type_check(&self, desc: &TypeDesc) -> Result<(), RuleTypeError>;
}
