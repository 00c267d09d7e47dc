//! Validation outcome presented to callers

use std::fmt;

use serde::Serialize;

use crate::foundation::error::{ErrorKey, ErrorMap, TemplateError};

/// The outcome of a registry validation run.
///
/// A thin view over the collected [`ErrorMap`]; an empty map means the
/// value passed.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Report {
    errors: ErrorMap,
}

impl Report {
    /// Wraps a collected error map.
    #[must_use]
    pub fn new(errors: ErrorMap) -> Self {
        Self { errors }
    }

    /// True when no rule failed.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// The full error map.
    #[must_use]
    pub fn error_map(&self) -> &ErrorMap {
        &self.errors
    }

    /// All errors in key order.
    pub fn errors(&self) -> impl Iterator<Item = (&ErrorKey, &TemplateError)> {
        self.errors.iter()
    }

    /// The first error in key order, or `None` when valid.
    #[must_use]
    pub fn error(&self) -> Option<(&ErrorKey, &TemplateError)> {
        self.errors.iter().next()
    }

    /// Consumes the report, yielding the map.
    #[must_use]
    pub fn into_error_map(self) -> ErrorMap {
        self.errors
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            f.write_str("valid")
        } else {
            self.errors.fmt(f)
        }
    }
}

impl From<ErrorMap> for Report {
    fn from(errors: ErrorMap) -> Self {
        Self::new(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_report() {
        let report = Report::default();
        assert!(report.is_valid());
        assert_eq!(report.error(), None);
        assert_eq!(report.to_string(), "valid");
    }

    #[test]
    fn first_error_is_key_ordered() {
        let mut map = ErrorMap::new();
        map.insert(ErrorKey::new("Z.Present"), TemplateError::new("later"));
        map.insert(ErrorKey::new("A.Present"), TemplateError::new("first"));
        let report = Report::new(map);
        assert!(!report.is_valid());
        let (key, error) = report.error().unwrap();
        assert_eq!(key.as_str(), "A.Present");
        assert_eq!(error.template, "first");
    }
}
