//! Conversions between [`Value`] and Rust types at the function boundary.
//!
//! - [`FromValue`] - extract a typed argument from a positional value
//! - [`IntoReturn`] - turn a function's output into the call result

use crate::{
    callable::Callable,
    error::{BoxError, CallError},
    value::{Map, Value},
};
use std::sync::Arc;

/// An argument did not have the expected type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeMismatch {
    /// Expected type description.
    pub expected: &'static str,
    /// Type name of the supplied value.
    pub found: &'static str,
}

impl TypeMismatch {
    /// Record a mismatch between `expected` and the type of `found`.
    pub fn new(expected: &'static str, found: &Value) -> Self {
        Self {
            expected,
            found: found.type_name(),
        }
    }

    /// Attach the argument position.
    pub fn at(self, index: usize) -> CallError {
        CallError::Argument {
            index,
            expected: self.expected,
            found: self.found,
        }
    }
}

/// Extract a typed argument from a [`Value`].
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be extracted from a `Value`",
    label = "missing `FromValue` implementation",
    note = "Implement `FromValue` for `{Self}` or take a `Value` and convert it yourself."
)]
pub trait FromValue: Sized {
    /// Attempt the conversion.
    fn from_value(value: &Value) -> Result<Self, TypeMismatch>;
}

impl FromValue for Value {
    fn from_value(value: &Value) -> Result<Self, TypeMismatch> {
        Ok(value.clone())
    }
}

impl FromValue for bool {
    fn from_value(value: &Value) -> Result<Self, TypeMismatch> {
        value
            .as_bool()
            .ok_or_else(|| TypeMismatch::new("boolean", value))
    }
}

impl FromValue for f64 {
    fn from_value(value: &Value) -> Result<Self, TypeMismatch> {
        value
            .as_f64()
            .ok_or_else(|| TypeMismatch::new("number", value))
    }
}

impl FromValue for f32 {
    fn from_value(value: &Value) -> Result<Self, TypeMismatch> {
        f64::from_value(value).map(|n| n as f32)
    }
}

macro_rules! impl_from_value_int {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FromValue for $ty {
                fn from_value(value: &Value) -> Result<Self, TypeMismatch> {
                    // `MAX as f64` rounds up for 64-bit types, so the upper
                    // bound is the exclusive power of two instead.
                    let signed = <$ty>::MIN != 0;
                    let upper = 2f64.powi((<$ty>::BITS - u32::from(signed)) as i32);
                    match value {
                        Value::Number(n)
                            if n.fract() == 0.0 && *n >= <$ty>::MIN as f64 && *n < upper =>
                        {
                            Ok(*n as $ty)
                        }
                        _ => Err(TypeMismatch::new("integer", value)),
                    }
                }
            }
        )*
    };
}

impl_from_value_int!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl FromValue for String {
    fn from_value(value: &Value) -> Result<Self, TypeMismatch> {
        value
            .as_str()
            .map(str::to_owned)
            .ok_or_else(|| TypeMismatch::new("string", value))
    }
}

impl FromValue for Arc<str> {
    fn from_value(value: &Value) -> Result<Self, TypeMismatch> {
        match value {
            Value::String(s) => Ok(Arc::clone(s)),
            _ => Err(TypeMismatch::new("string", value)),
        }
    }
}

impl FromValue for Callable {
    fn from_value(value: &Value) -> Result<Self, TypeMismatch> {
        value
            .as_callable()
            .cloned()
            .ok_or_else(|| TypeMismatch::new("function", value))
    }
}

impl FromValue for Map {
    fn from_value(value: &Value) -> Result<Self, TypeMismatch> {
        value
            .as_map()
            .cloned()
            .ok_or_else(|| TypeMismatch::new("object", value))
    }
}

impl<T: FromValue> FromValue for Vec<T> {
    fn from_value(value: &Value) -> Result<Self, TypeMismatch> {
        value
            .as_list()
            .ok_or_else(|| TypeMismatch::new("array", value))?
            .iter()
            .map(T::from_value)
            .collect()
    }
}

// `undefined` and `null` both mean "not supplied".
impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: &Value) -> Result<Self, TypeMismatch> {
        if value.is_nullish() {
            Ok(None)
        } else {
            T::from_value(value).map(Some)
        }
    }
}

/// Convert a function's output into the result of a call.
///
/// # Default Implementations
///
/// - Plain values (`()`, numbers, strings, `Value`, ...) → `Ok(value)`
/// - `Result<T, E>` → `T` converted, or `E` surfaced as [`CallError::Thrown`]
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be returned from a service function",
    label = "missing `IntoReturn` implementation",
    note = "Return a type convertible into `Value`, or a `Result` of one."
)]
pub trait IntoReturn {
    /// Convert the output.
    fn into_return(self) -> Result<Value, CallError>;
}

macro_rules! impl_into_return {
    ($($ty:ty),* $(,)?) => {
        $(
            impl IntoReturn for $ty {
                fn into_return(self) -> Result<Value, CallError> {
                    Ok(Value::from(self))
                }
            }
        )*
    };
}

impl_into_return!(
    (),
    bool,
    f64,
    f32,
    i8,
    i16,
    i32,
    i64,
    isize,
    u8,
    u16,
    u32,
    u64,
    usize,
    String,
    &'static str,
    Arc<str>,
    Map,
    Callable,
);

impl IntoReturn for Value {
    fn into_return(self) -> Result<Value, CallError> {
        Ok(self)
    }
}

impl<T: Into<Value>> IntoReturn for Vec<T> {
    fn into_return(self) -> Result<Value, CallError> {
        Ok(Value::from(self))
    }
}

impl<T: Into<Value>> IntoReturn for Option<T> {
    fn into_return(self) -> Result<Value, CallError> {
        Ok(Value::from(self))
    }
}

impl<T, E> IntoReturn for Result<T, E>
where
    T: Into<Value>,
    E: Into<BoxError>,
{
    fn into_return(self) -> Result<Value, CallError> {
        self.map(Into::into).map_err(|e| CallError::Thrown(e.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_extraction() {
        assert_eq!(i32::from_value(&Value::from(7)), Ok(7));
        assert_eq!(
            i32::from_value(&Value::from(7.5)),
            Err(TypeMismatch {
                expected: "integer",
                found: "number"
            })
        );
        assert!(u8::from_value(&Value::from(256)).is_err());
        assert!(u8::from_value(&Value::from(-1)).is_err());
        assert_eq!(u8::from_value(&Value::from(255)), Ok(255));
        assert_eq!(i8::from_value(&Value::from(-128)), Ok(-128));
        assert!(i8::from_value(&Value::from(128)).is_err());
    }

    #[test]
    fn test_integer_extraction_at_64_bit_limits() {
        let two_pow_63 = 9_223_372_036_854_775_808.0;
        let two_pow_64 = 18_446_744_073_709_551_616.0;

        assert_eq!(
            i64::from_value(&Value::from(two_pow_63)),
            Err(TypeMismatch {
                expected: "integer",
                found: "number"
            })
        );
        assert!(isize::from_value(&Value::from(two_pow_63)).is_err());
        assert_eq!(i64::from_value(&Value::from(-two_pow_63)), Ok(i64::MIN));

        assert!(u64::from_value(&Value::from(two_pow_64)).is_err());
        assert!(usize::from_value(&Value::from(two_pow_64)).is_err());
        assert_eq!(u64::from_value(&Value::from(two_pow_63)), Ok(1 << 63));

        assert!(i64::from_value(&Value::from(f64::INFINITY)).is_err());
        assert!(u64::from_value(&Value::from(f64::NAN)).is_err());
    }

    #[test]
    fn test_option_treats_null_as_absent() {
        assert_eq!(Option::<bool>::from_value(&Value::Null), Ok(None));
        assert_eq!(Option::<bool>::from_value(&Value::Undefined), Ok(None));
        assert_eq!(Option::<bool>::from_value(&Value::Bool(true)), Ok(Some(true)));
        assert!(Option::<bool>::from_value(&Value::from(1)).is_err());
    }

    #[test]
    fn test_vec_extraction() {
        let list = Value::list(["a", "b"]);
        assert_eq!(
            Vec::<String>::from_value(&list),
            Ok(vec!["a".to_string(), "b".to_string()])
        );
        assert!(Vec::<String>::from_value(&Value::list([1])).is_err());
    }

    #[test]
    fn test_result_return() {
        let ok: Result<i32, std::io::Error> = Ok(3);
        assert_eq!(ok.into_return().unwrap(), Value::from(3));

        let err: Result<i32, std::io::Error> = Err(std::io::Error::other("boom"));
        match err.into_return() {
            Err(CallError::Thrown(e)) => assert_eq!(e.to_string(), "boom"),
            other => panic!("expected thrown error, got {other:?}"),
        }
    }
}
