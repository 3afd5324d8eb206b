use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

use crate::value::{InvokeError, ObjectRef, Value};

// -----------------------------------------------------------------------------
// FromValue

/// Fallible conversion out of a [`Value`], used for member arguments.
pub trait FromValue: Sized {
    /// The name of the expected kind, used in error messages.
    const EXPECTED: &'static str;

    /// Converts, or returns the value back if it has another kind.
    fn from_value(value: Value) -> Result<Self, Value>;
}

impl FromValue for Value {
    const EXPECTED: &'static str = "any value";

    #[inline]
    fn from_value(value: Value) -> Result<Self, Value> {
        Ok(value)
    }
}

macro_rules! impl_from_value {
    ($ty:ty, $expected:literal, $pat:pat => $out:expr) => {
        impl FromValue for $ty {
            const EXPECTED: &'static str = $expected;

            #[inline]
            fn from_value(value: Value) -> Result<Self, Value> {
                match value {
                    $pat => Ok($out),
                    other => Err(other),
                }
            }
        }
    };
}

impl_from_value!(bool, "Bool", Value::Bool(v) => v);
impl_from_value!(i64, "Int", Value::Int(v) => v);
impl_from_value!(String, "Str", Value::Str(v) => v);
impl_from_value!(Vec<Value>, "List", Value::List(v) => v);
impl_from_value!(BTreeMap<String, Value>, "Map", Value::Map(v) => v);
impl_from_value!(ObjectRef, "Object", Value::Object(v) => v);

impl FromValue for f64 {
    const EXPECTED: &'static str = "Float";

    #[inline]
    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::Float(v) => Ok(v),
            Value::Int(v) => Ok(v as f64),
            other => Err(other),
        }
    }
}

impl FromValue for usize {
    const EXPECTED: &'static str = "non-negative Int";

    #[inline]
    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::Int(v) => usize::try_from(v).map_err(|_| Value::Int(v)),
            other => Err(other),
        }
    }
}

impl<T: FromValue> FromValue for Option<T> {
    const EXPECTED: &'static str = T::EXPECTED;

    #[inline]
    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}

/// Extracts and converts the argument at `index`.
///
/// # Examples
///
/// ```
/// use vc_nav::value::{arg, InvokeError, Value};
///
/// let args = [Value::Int(2), Value::from("x")];
/// assert_eq!(arg::<usize>(&args, 0), Ok(2));
/// assert_eq!(arg::<String>(&args, 1).as_deref(), Ok("x"));
/// assert!(matches!(arg::<bool>(&args, 1), Err(InvokeError::ArgumentType { index: 1, .. })));
/// assert!(matches!(arg::<bool>(&args, 2), Err(InvokeError::ArgumentCount { .. })));
/// ```
pub fn arg<T: FromValue>(args: &[Value], index: usize) -> Result<T, InvokeError> {
    let Some(value) = args.get(index) else {
        return Err(InvokeError::ArgumentCount {
            expected: index + 1,
            found: args.len(),
        });
    };
    T::from_value(value.clone()).map_err(|found| InvokeError::ArgumentType {
        index,
        expected: T::EXPECTED,
        found: found.kind_name(),
    })
}
