//! Core contracts: traits, the error model and the validation report.

pub mod error;
pub mod report;
pub mod traits;

pub use error::{ErrorKey, ErrorMap, RuleTypeError, TemplateError};
pub use report::Report;
pub use traits::{BasicRule, Rule, RuleList, RuleMap, Rules, Validator};
