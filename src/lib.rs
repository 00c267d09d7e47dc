//! # rigor
//!
//! A structural validation engine with path-addressable error reports.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use rigor::prelude::*;
//!
//! rigor::inspect_struct!(Child {
//!     name: String,
//! });
//!
//! let mut registry = Registry::new();
//! registry.must_register_type(
//!     Definition::new::<Child>().validates(rigor::rule_map! {
//!         "name" => [trim_present()],
//!     }),
//! );
//!
//! let report = registry.validate(&Child { name: " ".into() });
//! assert_eq!(report.error().unwrap().0.as_str(), "Child.name.TrimPresent");
//! ```
//!
//! ## Building blocks
//!
//! - **Rules**: [`Present`](rules::Present), [`TrimPresent`](rules::TrimPresent),
//!   [`Equal`](rules::Equal), [`Less`](rules::Less), [`Greater`](rules::Greater)
//! - **Combinators**: [`Not`](combinators::Not), [`Attr`](combinators::Attr)
//! - **Attributes**: [`Len`](attrs::Len), [`TrimSpace`](attrs::TrimSpace)
//! - **Validators**: [`ValueValidator`](validators::ValueValidator),
//!   [`StructValidator`](validators::StructValidator),
//!   [`SliceValidator`](validators::SliceValidator)
//!
//! Types register with a [`Registry`](registry::Registry) through the
//! [`Definition`](registry::Definition) builder; registration order does
//! not matter, forward references resolve retroactively. Validating a
//! type nobody registered reports a `NotFound` error instead of
//! panicking or silently passing.

pub mod attrs;
pub mod combinators;
pub mod foundation;
mod macros;
pub mod prelude;
pub mod registry;
pub mod rules;
pub mod validators;
pub mod value;

pub use foundation::{ErrorKey, ErrorMap, Report, RuleTypeError, TemplateError};
pub use registry::{Definition, Registry, RegistryError};
