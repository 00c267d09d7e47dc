//! Declarative helpers for building rule lists and inspectable structs

/// Builds a [`Rules`](crate::foundation::Rules) list without `Arc` noise.
///
/// ```rust,ignore
/// let rules = rigor::rules![present(), Attr::new(Len, less_or_equal(10))];
/// ```
#[macro_export]
macro_rules! rules {
    () => {
        $crate::foundation::Rules::new()
    };
    ($($rule:expr),+ $(,)?) => {
        <[_]>::into_vec(::std::boxed::Box::new([
            $(::std::sync::Arc::new($rule) as ::std::sync::Arc<dyn $crate::foundation::Rule>),+
        ]))
    };
}

/// Builds a [`RuleMap`](crate::foundation::RuleMap) from field names to
/// rule lists.
///
/// ```rust,ignore
/// let map = rigor::rule_map! {
///     "name" => [trim_present()],
///     "count" => [greater(0_i64)],
/// };
/// ```
#[macro_export]
macro_rules! rule_map {
    () => {
        $crate::foundation::RuleMap::new()
    };
    ($($field:literal => [$($rule:expr),* $(,)?]),+ $(,)?) => {{
        let mut map = $crate::foundation::RuleMap::new();
        $(map.insert($field, $crate::rules![$($rule),*]);)+
        map
    }};
}

/// Defines a struct and implements [`Inspect`](crate::value::Inspect)
/// for it, standing in for derive-style reflection.
///
/// Every named field's type must itself implement `Inspect`. Recursive
/// types work through `Option<Box<Self>>` fields: descriptors are
/// resolved lazily, one level at a time.
///
/// ```rust,ignore
/// rigor::inspect_struct!(Child {
///     name: String,
/// });
/// ```
#[macro_export]
macro_rules! inspect_struct {
    ($name:ident { $($field:ident : $ty:ty),+ $(,)? }) => {
        #[derive(Debug, Clone, PartialEq)]
        pub struct $name {
            $(pub $field: $ty),+
        }

        impl $crate::value::Inspect for $name {
            fn type_desc() -> $crate::value::TypeDesc {
                $crate::value::TypeDesc::Struct($crate::value::StructDesc::new(
                    stringify!($name),
                    vec![$($crate::value::FieldDesc::new(
                        stringify!($field),
                        <$ty as $crate::value::Inspect>::type_desc,
                    )),+],
                ))
            }

            fn to_value(&self) -> $crate::value::Value {
                $crate::value::Value::Struct($crate::value::StructValue::new(
                    stringify!($name),
                    vec![$((
                        stringify!($field),
                        $crate::value::Inspect::to_value(&self.$field),
                    )),+],
                ))
            }
        }
    };
}
