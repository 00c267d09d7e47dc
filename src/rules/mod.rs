//! Primitive rules
//!
//! Each rule here is a [`BasicRule`](crate::foundation::BasicRule): its
//! error set is fixed, so the combinators in [`crate::combinators`] can
//! wrap it. Factory functions mirror the constructors for fluent rule
//! lists.

mod compare;
mod present;
mod trim_present;

pub use compare::{Equal, Greater, Less};
pub use present::Present;
pub use trim_present::TrimPresent;

use crate::value::Inspect;

/// Creates a [`Present`] rule.
#[must_use]
pub fn present() -> Present {
    Present
}

/// Creates a [`TrimPresent`] rule.
#[must_use]
pub fn trim_present() -> TrimPresent {
    TrimPresent
}

/// Creates an [`Equal`] rule against `to`.
#[must_use]
pub fn equal<T: Inspect>(to: T) -> Equal {
    Equal::new(to)
}

/// Creates a strict [`Less`] rule against `to`.
#[must_use]
pub fn less<T: Inspect>(to: T) -> Less {
    Less::new(to)
}

/// Creates a [`Less`] rule that also accepts equality.
#[must_use]
pub fn less_or_equal<T: Inspect>(to: T) -> Less {
    Less::new(to).or_equal()
}

/// Creates a strict [`Greater`] rule against `to`.
#[must_use]
pub fn greater<T: Inspect>(to: T) -> Greater {
    Greater::new(to)
}

/// Creates a [`Greater`] rule that also accepts equality.
#[must_use]
pub fn greater_or_equal<T: Inspect>(to: T) -> Greater {
    Greater::new(to).or_equal()
}
