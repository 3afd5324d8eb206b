use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::value::{Object, ObjectRef};

// -----------------------------------------------------------------------------
// Value

/// A dynamically typed value.
///
/// Collections hold values by copy; objects are held through shared
/// [`ObjectRef`] handles, so cloning a `Value::Object` aliases the object.
///
/// # Examples
///
/// ```
/// use vc_nav::Value;
///
/// let v = Value::list([1_i64, 2, 3]);
/// assert_eq!(v.as_list().map(<[Value]>::len), Some(3));
///
/// assert_eq!(Value::from("abc").as_str(), Some("abc"));
/// assert!(Value::Null.is_null());
/// ```
#[derive(Clone, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<Value>),
    Map(BTreeMap<String, Value>),
    Object(ObjectRef),
}

impl Value {
    /// Wraps a host object into a new shared handle.
    #[inline]
    pub fn object<T: Object>(value: T) -> Self {
        Self::Object(ObjectRef::new(value))
    }

    /// Collects a list.
    #[inline]
    pub fn list<T: Into<Value>>(items: impl IntoIterator<Item = T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }

    /// Collects a string keyed map.
    #[inline]
    pub fn map<K: Into<String>, T: Into<Value>>(entries: impl IntoIterator<Item = (K, T)>) -> Self {
        Self::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    #[inline]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[inline]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the number, converting integers.
    #[inline]
    pub const fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(v) => Some(*v),
            Self::Int(v) => Some(*v as f64),
            _ => None,
        }
    }

    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(v) => Some(v),
            _ => None,
        }
    }

    #[inline]
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(v) => Some(v),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_map(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Self::Map(v) => Some(v),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_object(&self) -> Option<&ObjectRef> {
        match self {
            Self::Object(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the number of items of a list, map or string.
    pub fn len(&self) -> Option<usize> {
        match self {
            Self::List(v) => Some(v.len()),
            Self::Map(v) => Some(v.len()),
            Self::Str(v) => Some(v.chars().count()),
            _ => None,
        }
    }

    /// A short name of the value kind, used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "Null",
            Self::Bool(_) => "Bool",
            Self::Int(_) => "Int",
            Self::Float(_) => "Float",
            Self::Str(_) => "Str",
            Self::List(_) => "List",
            Self::Map(_) => "Map",
            Self::Object(object) => object.class_info().ty().name(),
        }
    }
}

impl PartialEq for Value {
    /// Structural equality; objects compare by identity.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a == b,
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::List(a), Self::List(b)) => a == b,
            (Self::Map(a), Self::Map(b)) => a == b,
            (Self::Object(a), Self::Object(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("Null"),
            Self::Bool(v) => write!(f, "Bool({v})"),
            Self::Int(v) => write!(f, "Int({v})"),
            Self::Float(v) => write!(f, "Float({v})"),
            Self::Str(v) => write!(f, "Str({v:?})"),
            Self::List(v) => f.debug_list().entries(v).finish(),
            Self::Map(v) => f.debug_map().entries(v).finish(),
            Self::Object(v) => fmt::Debug::fmt(v, f),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Str(v) => f.write_str(v),
            Self::List(v) => {
                f.write_str("[")?;
                for (index, item) in v.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Self::Map(v) => {
                f.write_str("{")?;
                for (index, (key, item)) in v.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key:?}: {item}")?;
                }
                f.write_str("}")
            }
            Self::Object(v) => fmt::Debug::fmt(v, f),
        }
    }
}

// -----------------------------------------------------------------------------
// Conversions

macro_rules! impl_from {
    ($variant:ident: $($ty:ty),+ => $conv:expr) => {
        $(
            impl From<$ty> for Value {
                #[inline]
                fn from(value: $ty) -> Self {
                    Self::$variant($conv(value))
                }
            }
        )+
    };
}

impl_from!(Bool: bool => core::convert::identity);
impl_from!(Int: i8, i16, i32, i64, u8, u16, u32 => i64::from);
impl_from!(Float: f32, f64 => f64::from);
impl_from!(Str: String, &str, &String, char => String::from);
impl_from!(List: Vec<Value> => core::convert::identity);
impl_from!(Map: BTreeMap<String, Value> => core::convert::identity);
impl_from!(Object: ObjectRef => core::convert::identity);

impl From<usize> for Value {
    /// Saturates at `i64::MAX`.
    #[inline]
    fn from(value: usize) -> Self {
        Self::Int(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    #[inline]
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => value.into(),
            None => Self::Null,
        }
    }
}

impl From<()> for Value {
    #[inline]
    fn from((): ()) -> Self {
        Self::Null
    }
}

#[cfg(test)]
mod tests {
    use super::Value;

    #[test]
    fn equality_is_structural() {
        assert_eq!(Value::list([1_i64, 2]), Value::list([1_i64, 2]));
        assert_ne!(Value::Int(1), Value::Float(1.0));
        assert_eq!(
            Value::map([("a", 1_i64)]),
            Value::map([(String::from("a"), Value::Int(1))])
        );
    }

    #[test]
    fn display() {
        assert_eq!(Value::list(["a", "b"]).to_string(), "[a, b]");
        assert_eq!(Value::map([("k", 2_i64)]).to_string(), "{\"k\": 2}");
        assert_eq!(Value::from(Some(1.5_f64)).to_string(), "1.5");
        assert_eq!(Value::from(None::<i64>).to_string(), "null");
    }
}
