//! Rules that wrap other rules

mod attr;
mod not;

pub use attr::Attr;
pub use not::Not;

use crate::attrs::Attribute;
use crate::foundation::BasicRule;

/// Wraps `rule` so it passes exactly when it would have failed.
#[must_use]
pub fn not<R: BasicRule>(rule: R) -> Not<R> {
    Not::new(rule)
}

/// Applies `rule` to the `of` attribute of the value.
#[must_use]
pub fn attr<A: Attribute, R: BasicRule>(of: A, rule: R) -> Attr<A, R> {
    Attr::new(of, rule)
}
