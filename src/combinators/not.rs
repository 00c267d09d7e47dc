use crate::foundation::{BasicRule, ErrorMap, Rule, RuleTypeError};
use crate::value::{TypeDesc, Value};

/// Inverts a [`BasicRule`]: valid exactly when the wrapped rule fails.
///
/// Canonical errors are the wrapped rule's with keys prefixed `Not` and
/// templates suffixed `--Not`, so `Not<Equal>` reports under `NotEqual`.
#[derive(Debug, Clone)]
pub struct Not<R: BasicRule> {
    rule: R,
}

impl<R: BasicRule> Not<R> {
    /// Wraps `rule`.
    pub fn new(rule: R) -> Self {
        Self { rule }
    }
}

impl<R: BasicRule> Rule for Not<R> {
    fn validate_value(&self, value: &Value) -> ErrorMap {
        if self.rule.validate_value(value).is_empty() {
            self.error_map()
        } else {
            ErrorMap::new()
        }
    }

    fn type_check(&self, desc: &TypeDesc) -> Result<(), RuleTypeError> {
        self.rule.type_check(desc)
    }
}

impl<R: BasicRule> BasicRule for Not<R> {
    fn error_map(&self) -> ErrorMap {
        self.rule
            .error_map()
            .into_iter()
            .map(|(key, mut error)| {
                error.template = format!("{}--Not", error.template).into();
                (format!("Not{key}").into(), error)
            })
            .collect()
    }
}
