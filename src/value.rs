//! Dynamic value model - the runtime handle over statically-typed data
//!
//! Validation rules operate on [`Value`], a dynamically-typed view of the
//! data being validated, paired with [`TypeDesc`], the parallel type
//! descriptor used for registration-time type checking. The [`Inspect`]
//! trait bridges the two: any type implementing it can be validated.
//!
//! Struct field descriptors are lazy thunks (`fn() -> TypeDesc`) so that
//! self-referential types (a struct holding an optional pointer to itself)
//! have finite descriptors.
//!
//! # Examples
//!
//! ```rust,ignore
//! use rigor::value::{Inspect, Value};
//!
//! let value = "hello".to_string().to_value();
//! assert_eq!(value, Value::Str("hello".into()));
//! assert_eq!(value.len(), Some(5));
//! ```

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

// ============================================================================
// TYPE DESCRIPTORS
// ============================================================================

/// Describes the shape of a validatable type.
///
/// `Any` is a wildcard matched by every value; it is only produced by the
/// registry fallback validator, never by [`Inspect`] implementations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeDesc {
    /// Wildcard descriptor, matches any type.
    Any,
    /// Boolean.
    Bool,
    /// Signed integer.
    Int,
    /// Unsigned integer.
    Uint,
    /// Floating point number.
    Float,
    /// Character string.
    Str,
    /// Sequence with a single element type.
    Seq(Box<TypeDesc>),
    /// String-keyed dictionary with a single value type.
    Map(Box<TypeDesc>),
    /// Struct with named fields.
    Struct(StructDesc),
    /// Optional pointer to another type.
    Ptr(Box<TypeDesc>),
}

impl TypeDesc {
    /// Strips pointer descriptors down to the pointee type.
    #[must_use]
    pub fn indirect(&self) -> &TypeDesc {
        let mut desc = self;
        while let TypeDesc::Ptr(inner) = desc {
            desc = inner;
        }
        desc
    }

    /// Looks up a field descriptor by name, for struct descriptors.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldDesc> {
        match self {
            TypeDesc::Struct(sd) => sd.field(name),
            _ => None,
        }
    }
}

impl fmt::Display for TypeDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeDesc::Any => f.write_str("any"),
            TypeDesc::Bool => f.write_str("bool"),
            TypeDesc::Int => f.write_str("int"),
            TypeDesc::Uint => f.write_str("uint"),
            TypeDesc::Float => f.write_str("float"),
            TypeDesc::Str => f.write_str("string"),
            TypeDesc::Seq(elem) => write!(f, "[{elem}]"),
            TypeDesc::Map(value) => write!(f, "map[{value}]"),
            TypeDesc::Struct(sd) => f.write_str(sd.name()),
            TypeDesc::Ptr(elem) => write!(f, "*{elem}"),
        }
    }
}

/// Descriptor of a struct type: its name and named field descriptors.
///
/// Compares by name only - two descriptors with the same name describe the
/// same registered type.
#[derive(Debug, Clone)]
pub struct StructDesc {
    name: &'static str,
    fields: Vec<FieldDesc>,
}

impl StructDesc {
    /// Creates a new struct descriptor.
    #[must_use]
    pub fn new(name: &'static str, fields: Vec<FieldDesc>) -> Self {
        Self { name, fields }
    }

    /// The struct's type name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The struct's field descriptors, in declaration order.
    #[must_use]
    pub fn fields(&self) -> &[FieldDesc] {
        &self.fields
    }

    /// Looks up a field descriptor by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldDesc> {
        self.fields.iter().find(|fd| fd.name() == name)
    }
}

impl PartialEq for StructDesc {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for StructDesc {}

/// A single named field of a struct descriptor.
///
/// The field's type is a thunk rather than an eager descriptor so that
/// recursive types terminate.
#[derive(Debug, Clone, Copy)]
pub struct FieldDesc {
    name: &'static str,
    thunk: fn() -> TypeDesc,
}

impl FieldDesc {
    /// Creates a new field descriptor.
    #[must_use]
    pub fn new(name: &'static str, thunk: fn() -> TypeDesc) -> Self {
        Self { name, thunk }
    }

    /// The field name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Resolves the field's type descriptor.
    #[must_use]
    pub fn type_desc(&self) -> TypeDesc {
        (self.thunk)()
    }
}

// ============================================================================
// VALUES
// ============================================================================

/// A dynamically-typed handle over a statically-typed value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// The absent value.
    Nil,
    /// Boolean.
    Bool(bool),
    /// Signed integer.
    Int(i64),
    /// Unsigned integer.
    Uint(u64),
    /// Floating point number.
    Float(f64),
    /// Character string.
    Str(String),
    /// Sequence of homogeneous values.
    Seq(Vec<Value>),
    /// String-keyed dictionary.
    Map(BTreeMap<String, Value>),
    /// Struct with named fields.
    Struct(StructValue),
    /// Optional pointer.
    Ptr(Option<Box<Value>>),
}

static NIL_VALUE: Value = Value::Nil;

impl Value {
    /// Strips pointers down to the concrete value; a nil pointer yields
    /// [`Value::Nil`].
    #[must_use]
    pub fn indirect(&self) -> &Value {
        match self {
            Value::Ptr(Some(inner)) => inner.indirect(),
            Value::Ptr(None) => &NIL_VALUE,
            other => other,
        }
    }

    /// Returns true when the value equals its type's zero value.
    ///
    /// Structs are zero when every field is zero; non-nil pointers are
    /// never zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        match self {
            Value::Nil => true,
            Value::Bool(b) => !b,
            Value::Int(i) => *i == 0,
            Value::Uint(u) => *u == 0,
            Value::Float(f) => *f == 0.0,
            Value::Str(s) => s.is_empty(),
            Value::Seq(v) => v.is_empty(),
            Value::Map(m) => m.is_empty(),
            Value::Struct(sv) => sv.fields.iter().all(|(_, v)| v.is_zero()),
            Value::Ptr(ptr) => ptr.is_none(),
        }
    }

    /// The number of elements, for values that have a length.
    ///
    /// Strings count Unicode scalar values; sequences and dictionaries
    /// count entries. Pointers measure their target.
    #[must_use]
    pub fn len(&self) -> Option<usize> {
        match self.indirect() {
            Value::Str(s) => Some(s.chars().count()),
            Value::Seq(v) => Some(v.len()),
            Value::Map(m) => Some(m.len()),
            _ => None,
        }
    }

    /// The value's type name: a struct name, or a kind name such as
    /// `string`. Pointers report their target's name.
    #[must_use]
    pub fn type_name(&self) -> &str {
        match self.indirect() {
            Value::Nil => "nil",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Uint(_) => "uint",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::Seq(_) => "sequence",
            Value::Map(_) => "map",
            Value::Struct(sv) => sv.name,
            Value::Ptr(_) => unreachable!("indirect strips pointers"),
        }
    }

    /// Looks up a struct field value by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        match self {
            Value::Struct(sv) => sv.field(name),
            _ => None,
        }
    }

    /// Ordering comparison, defined for same-kind integers, floats and
    /// strings only.
    #[must_use]
    pub fn compare(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
            (Value::Uint(a), Value::Uint(b)) => Some(a.cmp(b)),
            (Value::Float(a), Value::Float(b)) => a.partial_cmp(b),
            (Value::Str(a), Value::Str(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => f.write_str("nil"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Uint(u) => write!(f, "{u}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Str(s) => f.write_str(s),
            Value::Seq(v) => {
                f.write_str("[")?;
                for (i, elem) in v.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{elem}")?;
                }
                f.write_str("]")
            }
            Value::Map(m) => {
                f.write_str("map[")?;
                for (i, (k, v)) in m.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{k}: {v}")?;
                }
                f.write_str("]")
            }
            Value::Struct(sv) => {
                write!(f, "{}{{", sv.name)?;
                for (i, (k, v)) in sv.fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{k}: {v}")?;
                }
                f.write_str("}")
            }
            Value::Ptr(None) => f.write_str("nil"),
            Value::Ptr(Some(inner)) => write!(f, "{inner}"),
        }
    }
}

/// A struct value: its type name and named field values.
#[derive(Debug, Clone, PartialEq)]
pub struct StructValue {
    name: &'static str,
    fields: Vec<(&'static str, Value)>,
}

impl StructValue {
    /// Creates a new struct value.
    #[must_use]
    pub fn new(name: &'static str, fields: Vec<(&'static str, Value)>) -> Self {
        Self { name, fields }
    }

    /// The struct's type name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The struct's field values, in declaration order.
    #[must_use]
    pub fn fields(&self) -> &[(&'static str, Value)] {
        &self.fields
    }

    /// Looks up a field value by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.iter().find(|(n, _)| *n == name).map(|(_, v)| v)
    }
}

// ============================================================================
// INSPECT TRAIT
// ============================================================================

/// Bridges statically-typed data into the dynamic value model.
///
/// Implemented for primitives, strings, `Option<T>` (pointer), `Box<T>`
/// (transparent), sequences and string-keyed maps. Use the
/// [`inspect_struct!`](crate::inspect_struct) macro to implement it for
/// user structs.
pub trait Inspect {
    /// The static type descriptor.
    fn type_desc() -> TypeDesc;

    /// Converts the data into a dynamic value.
    fn to_value(&self) -> Value;
}

impl<T: Inspect + ?Sized> Inspect for &T {
    fn type_desc() -> TypeDesc {
        T::type_desc()
    }

    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}

impl<T: Inspect + ?Sized> Inspect for Box<T> {
    fn type_desc() -> TypeDesc {
        T::type_desc()
    }

    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}

impl<T: Inspect> Inspect for Option<T> {
    fn type_desc() -> TypeDesc {
        TypeDesc::Ptr(Box::new(T::type_desc()))
    }

    fn to_value(&self) -> Value {
        Value::Ptr(self.as_ref().map(|v| Box::new(v.to_value())))
    }
}

impl Inspect for bool {
    fn type_desc() -> TypeDesc {
        TypeDesc::Bool
    }

    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }
}

macro_rules! inspect_int {
    ($($ty:ty),*) => {
        $(impl Inspect for $ty {
            fn type_desc() -> TypeDesc {
                TypeDesc::Int
            }

            fn to_value(&self) -> Value {
                Value::Int(*self as i64)
            }
        })*
    };
}

macro_rules! inspect_uint {
    ($($ty:ty),*) => {
        $(impl Inspect for $ty {
            fn type_desc() -> TypeDesc {
                TypeDesc::Uint
            }

            fn to_value(&self) -> Value {
                Value::Uint(*self as u64)
            }
        })*
    };
}

inspect_int!(i8, i16, i32, i64, isize);
inspect_uint!(u8, u16, u32, u64, usize);

impl Inspect for f32 {
    fn type_desc() -> TypeDesc {
        TypeDesc::Float
    }

    fn to_value(&self) -> Value {
        Value::Float(f64::from(*self))
    }
}

impl Inspect for f64 {
    fn type_desc() -> TypeDesc {
        TypeDesc::Float
    }

    fn to_value(&self) -> Value {
        Value::Float(*self)
    }
}

impl Inspect for str {
    fn type_desc() -> TypeDesc {
        TypeDesc::Str
    }

    fn to_value(&self) -> Value {
        Value::Str(self.to_owned())
    }
}

impl Inspect for String {
    fn type_desc() -> TypeDesc {
        TypeDesc::Str
    }

    fn to_value(&self) -> Value {
        Value::Str(self.clone())
    }
}

impl<T: Inspect> Inspect for Vec<T> {
    fn type_desc() -> TypeDesc {
        TypeDesc::Seq(Box::new(T::type_desc()))
    }

    fn to_value(&self) -> Value {
        Value::Seq(self.iter().map(Inspect::to_value).collect())
    }
}

impl<T: Inspect, const N: usize> Inspect for [T; N] {
    fn type_desc() -> TypeDesc {
        TypeDesc::Seq(Box::new(T::type_desc()))
    }

    fn to_value(&self) -> Value {
        Value::Seq(self.iter().map(Inspect::to_value).collect())
    }
}

impl<T: Inspect> Inspect for BTreeMap<String, T> {
    fn type_desc() -> TypeDesc {
        TypeDesc::Map(Box::new(T::type_desc()))
    }

    fn to_value(&self) -> Value {
        Value::Map(self.iter().map(|(k, v)| (k.clone(), v.to_value())).collect())
    }
}

impl<T: Inspect> Inspect for HashMap<String, T> {
    fn type_desc() -> TypeDesc {
        TypeDesc::Map(Box::new(T::type_desc()))
    }

    fn to_value(&self) -> Value {
        Value::Map(self.iter().map(|(k, v)| (k.clone(), v.to_value())).collect())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indirect_strips_pointers() {
        let v = Value::Ptr(Some(Box::new(Value::Ptr(Some(Box::new(Value::Int(3)))))));
        assert_eq!(v.indirect(), &Value::Int(3));
    }

    #[test]
    fn indirect_nil_pointer() {
        let v = Value::Ptr(None);
        assert_eq!(v.indirect(), &Value::Nil);
    }

    #[test]
    fn is_zero_scalars() {
        assert!(Value::Int(0).is_zero());
        assert!(!Value::Int(7).is_zero());
        assert!(Value::Str(String::new()).is_zero());
        assert!(!Value::Str(" ".into()).is_zero());
        assert!(Value::Bool(false).is_zero());
        assert!(Value::Nil.is_zero());
    }

    #[test]
    fn is_zero_struct_recurses() {
        let zero = StructValue::new("Pair", vec![("a", Value::Int(0)), ("b", Value::Str(String::new()))]);
        assert!(Value::Struct(zero).is_zero());

        let nonzero = StructValue::new("Pair", vec![("a", Value::Int(0)), ("b", Value::Str("x".into()))]);
        assert!(!Value::Struct(nonzero).is_zero());
    }

    #[test]
    fn len_counts_chars_not_bytes() {
        assert_eq!("h\u{e9}llo".to_value().len(), Some(5));
        assert_eq!(Value::Seq(vec![Value::Int(1)]).len(), Some(1));
        assert_eq!(Value::Int(1).len(), None);
    }

    #[test]
    fn type_names() {
        assert_eq!(1i32.to_value().type_name(), "int");
        assert_eq!("x".to_value().type_name(), "string");
        assert_eq!(Value::Ptr(None).type_name(), "nil");
    }

    #[test]
    fn option_maps_to_pointer() {
        let some: Option<i64> = Some(5);
        assert_eq!(some.to_value(), Value::Ptr(Some(Box::new(Value::Int(5)))));
        assert_eq!(<Option<i64>>::type_desc(), TypeDesc::Ptr(Box::new(TypeDesc::Int)));

        let none: Option<i64> = None;
        assert_eq!(none.to_value(), Value::Ptr(None));
    }

    #[test]
    fn struct_desc_compares_by_name() {
        let a = StructDesc::new("Node", vec![]);
        let b = StructDesc::new("Node", vec![FieldDesc::new("next", <Option<i64>>::type_desc)]);
        assert_eq!(a, b);
    }

    #[test]
    fn compare_same_kind_only() {
        assert_eq!(Value::Int(1).compare(&Value::Int(2)), Some(Ordering::Less));
        assert_eq!(
            Value::Str("b".into()).compare(&Value::Str("a".into())),
            Some(Ordering::Greater)
        );
        assert_eq!(Value::Int(1).compare(&Value::Str("a".into())), None);
    }

    #[test]
    fn display_type_desc() {
        assert_eq!(TypeDesc::Seq(Box::new(TypeDesc::Str)).to_string(), "[string]");
        assert_eq!(TypeDesc::Ptr(Box::new(TypeDesc::Int)).to_string(), "*int");
        assert_eq!(TypeDesc::Struct(StructDesc::new("Item", vec![])).to_string(), "Item");
    }
}
