//! Path-keyed, template-rendered validation diagnostics
//!
//! Two failure channels live here and must not be conflated:
//!
//! - [`ErrorMap`] entries are *data* problems: a value failed a rule. They
//!   are path-keyed, template-rendered and safe to show to callers.
//! - [`RuleTypeError`] is a *programming* problem: a rule was attached to
//!   a field whose type it cannot handle. These surface at registration
//!   time, never on user data.
//!
//! Template rendering never panics: a missing field renders the visible
//! `<no value>` marker and a malformed template degrades to
//! `"<template> (bad format)"` so the defect stays observable.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use serde::ser::SerializeStruct;
use smallvec::SmallVec;

use crate::value::TypeDesc;

const KEY_SEPARATOR: char = '.';

// ============================================================================
// ERROR KEY
// ============================================================================

/// A dotted path addressing one error in an [`ErrorMap`].
///
/// Segments are joined with `.`; sequence indices attach to their segment
/// without a separator, e.g. `Parent.Items[1].Name.TrimPresent`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct ErrorKey(String);

impl ErrorKey {
    /// Creates a key from a single segment or pre-joined path.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// The key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for the empty (root) key.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Joins two key fragments, dropping empty fragments.
    #[must_use]
    pub fn join(&self, other: &ErrorKey) -> ErrorKey {
        self.child(other.as_str())
    }

    /// Appends a path segment, dropping empty fragments.
    #[must_use]
    pub fn child(&self, segment: &str) -> ErrorKey {
        if self.0.is_empty() {
            return ErrorKey::new(segment);
        }
        if segment.is_empty() {
            return self.clone();
        }
        ErrorKey(format!("{}{KEY_SEPARATOR}{segment}", self.0))
    }

    /// Appends a sequence index to the last segment, without a separator.
    #[must_use]
    pub fn indexed(&self, index: usize) -> ErrorKey {
        ErrorKey(format!("{}[{index}]", self.0))
    }

    /// The first path segment - the root type's name.
    #[must_use]
    pub fn type_name(&self) -> &str {
        self.0.split(KEY_SEPARATOR).next().unwrap_or("")
    }

    /// The last path segment - the failing rule's name.
    #[must_use]
    pub fn error_name(&self) -> &str {
        self.0.rsplit(KEY_SEPARATOR).next().unwrap_or("")
    }
}

impl From<&str> for ErrorKey {
    fn from(key: &str) -> Self {
        Self(key.to_owned())
    }
}

impl From<String> for ErrorKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

impl fmt::Display for ErrorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// TEMPLATE ERROR
// ============================================================================

type TemplateFields = SmallVec<[(Cow<'static, str>, String); 2]>;

/// One validation diagnostic: a message template plus substitution fields.
///
/// Templates use `{name}` placeholders. Both halves use `Cow<'static, str>`
/// so the common static-template case allocates nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateError {
    /// The message template, with `{name}` placeholders.
    pub template: Cow<'static, str>,
    fields: TemplateFields,
}

impl TemplateError {
    /// Creates an error from a template.
    pub fn new(template: impl Into<Cow<'static, str>>) -> Self {
        Self {
            template: template.into(),
            fields: TemplateFields::new(),
        }
    }

    /// Adds a substitution field.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_field(mut self, key: impl Into<Cow<'static, str>>, value: impl Into<String>) -> Self {
        self.fields.push((key.into(), value.into()));
        self
    }

    /// Looks up a substitution field by key.
    #[must_use]
    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k.as_ref() == key)
            .map(|(_, v)| v.as_str())
    }

    /// Renders the template, substituting `{name}` placeholders.
    ///
    /// A field missing from the map renders as `<no value>`; an unclosed
    /// or non-identifier placeholder renders the whole template with a
    /// ` (bad format)` suffix. Never panics.
    #[must_use]
    pub fn render(&self) -> String {
        let bad_format = || format!("{} (bad format)", self.template);

        let mut out = String::with_capacity(self.template.len());
        let mut rest = self.template.as_ref();
        while let Some(open) = rest.find('{') {
            if rest[..open].contains('}') {
                return bad_format();
            }
            out.push_str(&rest[..open]);
            rest = &rest[open + 1..];
            let Some(close) = rest.find('}') else {
                return bad_format();
            };
            let name = &rest[..close];
            let valid = !name.is_empty()
                && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
            if !valid {
                return bad_format();
            }
            match self.field(name) {
                Some(value) => out.push_str(value),
                None => out.push_str("<no value>"),
            }
            rest = &rest[close + 1..];
        }
        if rest.contains('}') {
            return bad_format();
        }
        out.push_str(rest);
        out
    }
}

impl fmt::Display for TemplateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl std::error::Error for TemplateError {}

impl Serialize for TemplateError {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("TemplateError", 3)?;
        state.serialize_field("template", self.template.as_ref())?;
        let fields: BTreeMap<&str, &str> = self
            .fields
            .iter()
            .map(|(k, v)| (k.as_ref(), v.as_str()))
            .collect();
        state.serialize_field("fields", &fields)?;
        state.serialize_field("message", &self.render())?;
        state.end()
    }
}

// ============================================================================
// ERROR MAP
// ============================================================================

/// The structured, path-addressable result of a validation run.
///
/// Keys are unique; inserting at an existing key overwrites (last-write
/// wins). Backed by a sorted map so rendering is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ErrorMap(BTreeMap<ErrorKey, TemplateError>);

impl ErrorMap {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a single-entry map - the shape every primitive rule emits.
    #[must_use]
    pub fn of(key: impl Into<ErrorKey>, error: TemplateError) -> Self {
        let mut map = Self::new();
        map.insert(key.into(), error);
        map
    }

    /// Inserts an entry, overwriting any existing entry at that key.
    pub fn insert(&mut self, key: ErrorKey, error: TemplateError) {
        self.0.insert(key, error);
    }

    /// Looks up an entry by key.
    #[must_use]
    pub fn get(&self, key: &ErrorKey) -> Option<&TemplateError> {
        self.0.get(key)
    }

    /// The number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when the map holds no errors.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&ErrorKey, &TemplateError)> {
        self.0.iter()
    }

    /// The keys, in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &ErrorKey> {
        self.0.keys()
    }

    /// Merges every entry into `dest`, re-keyed under `path`.
    pub fn merge_into(self, path: &ErrorKey, dest: &mut ErrorMap) {
        for (key, error) in self.0 {
            dest.insert(path.join(&key), error);
        }
    }

    /// The explicit emptiness check: `None` when the map has no entries,
    /// otherwise the map unchanged.
    #[must_use]
    pub fn into_option(self) -> Option<ErrorMap> {
        if self.0.is_empty() { None } else { Some(self) }
    }
}

impl IntoIterator for ErrorMap {
    type Item = (ErrorKey, TemplateError);
    type IntoIter = std::collections::btree_map::IntoIter<ErrorKey, TemplateError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl FromIterator<(ErrorKey, TemplateError)> for ErrorMap {
    fn from_iter<I: IntoIterator<Item = (ErrorKey, TemplateError)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for ErrorMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, error)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{key}: {error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ErrorMap {}

// ============================================================================
// RULE TYPE ERROR
// ============================================================================

/// A registration-time type mismatch between a rule and the type it was
/// attached to.
///
/// Carries the offending type descriptor and a "bad condition" phrase,
/// e.g. `is not a string`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleTypeError {
    /// The type the rule was attached to.
    pub type_desc: TypeDesc,
    /// What the type fails to satisfy.
    pub bad_condition: String,
}

impl RuleTypeError {
    /// Creates a new rule type error.
    pub fn new(type_desc: TypeDesc, bad_condition: impl Into<String>) -> Self {
        Self {
            type_desc,
            bad_condition: bad_condition.into(),
        }
    }

    /// The diagnostic as a renderable [`TemplateError`].
    #[must_use]
    pub fn template_error(&self) -> TemplateError {
        TemplateError::new(format!("value to validate {}, got {{kind}}", self.bad_condition))
            .with_field("kind", self.type_desc.to_string())
    }
}

impl fmt::Display for RuleTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.template_error().render())
    }
}

impl std::error::Error for RuleTypeError {}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_join_drops_empty_fragments() {
        let root = ErrorKey::new("Parent");
        assert_eq!(root.child(""), root);
        assert_eq!(ErrorKey::default().child("Name").as_str(), "Name");
        assert_eq!(root.child("Name").as_str(), "Parent.Name");
    }

    #[test]
    fn key_indexed_attaches_without_separator() {
        let key = ErrorKey::new("Parent.Items").indexed(1);
        assert_eq!(key.as_str(), "Parent.Items[1]");
    }

    #[test]
    fn key_accessors() {
        let key = ErrorKey::new("Parent.Items[1].Name.TrimPresent");
        assert_eq!(key.type_name(), "Parent");
        assert_eq!(key.error_name(), "TrimPresent");

        let single = ErrorKey::new("NotFound");
        assert_eq!(single.type_name(), "NotFound");
        assert_eq!(single.error_name(), "NotFound");
    }

    #[test]
    fn render_substitutes_fields() {
        let error = TemplateError::new("is not equal to {to}").with_field("to", "9");
        assert_eq!(error.render(), "is not equal to 9");
    }

    #[test]
    fn render_missing_field_is_visible() {
        let error = TemplateError::new("type, {kind}, not found");
        assert_eq!(error.render(), "type, <no value>, not found");
    }

    #[test]
    fn render_bad_format() {
        assert_eq!(
            TemplateError::new("unclosed {here").render(),
            "unclosed {here (bad format)"
        );
        assert_eq!(
            TemplateError::new("stray } brace").render(),
            "stray } brace (bad format)"
        );
        assert_eq!(
            TemplateError::new("nested {a{b}}").render(),
            "nested {a{b}} (bad format)"
        );
    }

    #[test]
    fn merge_into_prefixes_keys() {
        let src = ErrorMap::of("Present", TemplateError::new("is not present"));
        let mut dest = ErrorMap::new();
        src.merge_into(&ErrorKey::new("Parent.Name"), &mut dest);
        assert_eq!(dest.len(), 1);
        assert!(dest.get(&ErrorKey::new("Parent.Name.Present")).is_some());
    }

    #[test]
    fn merge_into_overwrites_existing() {
        let mut dest = ErrorMap::of("a.k", TemplateError::new("old"));
        ErrorMap::of("k", TemplateError::new("new")).merge_into(&ErrorKey::new("a"), &mut dest);
        assert_eq!(dest.get(&ErrorKey::new("a.k")).unwrap().template, "new");
    }

    #[test]
    fn into_option_empty_is_none() {
        assert_eq!(ErrorMap::new().into_option(), None);
        let map = ErrorMap::of("k", TemplateError::new("t"));
        assert_eq!(map.clone().into_option(), Some(map));
    }

    #[test]
    fn display_is_key_sorted() {
        let mut map = ErrorMap::new();
        map.insert(ErrorKey::new("b"), TemplateError::new("second"));
        map.insert(ErrorKey::new("a"), TemplateError::new("first"));
        assert_eq!(map.to_string(), "a: first, b: second");
    }

    #[test]
    fn rule_type_error_display() {
        let error = RuleTypeError::new(TypeDesc::Int, "is not a string");
        assert_eq!(error.to_string(), "value to validate is not a string, got int");
    }
}
