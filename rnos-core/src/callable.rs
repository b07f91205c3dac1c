//! # Callables
//!
//! A [`Callable`] is the function variant of [`Value`]: a shared closure over
//! a positional argument slice.
//!
//! Typed Rust closures become callables through [`IntoCallable`], which
//! extracts each argument with [`FromValue`] and converts the return value
//! with [`IntoReturn`]. Missing arguments are passed as `Undefined`, so an
//! `Option<T>` parameter makes an argument optional.
//!
//! ```rust,ignore
//! let add = Callable::from_fn(|a: f64, b: f64| a + b);
//! assert_eq!(add.call(&[2.into(), 3.into()])?, Value::from(5));
//! ```

use crate::{
    convert::{FromValue, IntoReturn},
    error::CallError,
    value::Value,
};
use std::{fmt, sync::Arc};

type DynFn = dyn Fn(&[Value]) -> Result<Value, CallError> + Send + Sync;

/// A shared, reference-counted function object.
#[derive(Clone)]
pub struct Callable {
    name: Option<Arc<str>>,
    func: Arc<DynFn>,
}

impl Callable {
    /// Create a callable from a raw closure over the argument slice.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value, CallError> + Send + Sync + 'static,
    {
        Self {
            name: None,
            func: Arc::new(f),
        }
    }

    /// Create a callable from a typed closure.
    pub fn from_fn<Args, F>(f: F) -> Self
    where
        F: IntoCallable<Args>,
    {
        f.into_callable()
    }

    /// Attach a name, used in debug output.
    pub fn with_name(mut self, name: impl Into<Arc<str>>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// The name given with [`with_name`](Self::with_name).
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Invoke with positional arguments.
    pub fn call(&self, args: &[Value]) -> Result<Value, CallError> {
        (self.func)(args)
    }

    /// Whether both handles point at the same function object.
    pub fn ptr_eq(&self, other: &Callable) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&self.func), Arc::as_ptr(&other.func))
    }
}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "[Function: {name}]"),
            None => f.write_str("[Function (anonymous)]"),
        }
    }
}

/// Conversion of a typed function into a [`Callable`].
///
/// `Args` is a marker tuple of the parameter types; it keeps the
/// implementations for different arities apart.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be used as a service function",
    label = "not convertible into a `Callable`",
    note = "Parameters must implement `FromValue`, the return type `IntoReturn`, and there can be at most six parameters."
)]
pub trait IntoCallable<Args>: Send + Sync + 'static {
    /// Erase the function's signature.
    fn into_callable(self) -> Callable;
}

macro_rules! impl_into_callable {
    ($($ty:ident),*) => {
        impl<F, R, $($ty,)*> IntoCallable<($($ty,)*)> for F
        where
            F: Fn($($ty),*) -> R + Send + Sync + 'static,
            R: IntoReturn,
            $($ty: FromValue,)*
        {
            #[allow(non_snake_case, unused_mut, unused_variables, unused_assignments)]
            fn into_callable(self) -> Callable {
                Callable::new(move |args: &[Value]| {
                    let mut index = 0usize;
                    $(
                        let arg = args.get(index).unwrap_or(Value::undefined());
                        let $ty = <$ty as FromValue>::from_value(arg)
                            .map_err(|mismatch| mismatch.at(index))?;
                        index += 1;
                    )*
                    (self)($($ty),*).into_return()
                })
            }
        }
    };
}

impl_into_callable!();
impl_into_callable!(A1);
impl_into_callable!(A1, A2);
impl_into_callable!(A1, A2, A3);
impl_into_callable!(A1, A2, A3, A4);
impl_into_callable!(A1, A2, A3, A4, A5);
impl_into_callable!(A1, A2, A3, A4, A5, A6);
