//! Path resolution and invocation.
//!
//! The invoker starts at the value registered under a path's first segment
//! and walks the remaining segments one property at a time. The first
//! segment that does not resolve stops the walk with
//! [`InvokeError::PropertyNotFound`]; there is no fallback or default.
//! The value at the end of the walk is called with the arguments.
//!
//! An unknown service id is not an error by itself: the cursor simply
//! starts out `undefined`, which fails on the next segment, or at call time
//! when the path has no properties.

use rnos_core::{InvokeError, Path, ServiceSource, Value, snapshot};
use serde::{Deserialize, Serialize};

/// Rule deciding whether a property counts as resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lookup {
    /// A property resolves only if its value is truthy.
    ///
    /// `0`, `false`, `""` and `null` are treated exactly like a missing
    /// property.
    #[default]
    Truthy,
    /// A property resolves if it exists and is not `undefined`.
    Present,
}

impl Lookup {
    /// Whether `value`, found at a property, lets resolution continue.
    pub fn accepts(self, value: &Value) -> bool {
        match self {
            Lookup::Truthy => value.is_truthy(),
            Lookup::Present => !value.is_undefined(),
        }
    }
}

/// Resolves paths against a [`ServiceSource`] and calls the result.
#[derive(Debug, Clone, Copy, Default)]
pub struct Invoker {
    lookup: Lookup,
}

impl Invoker {
    /// Create an invoker with the default [`Lookup::Truthy`] rule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an invoker with the given lookup rule.
    pub fn with_lookup(lookup: Lookup) -> Self {
        Self { lookup }
    }

    /// The lookup rule in use.
    pub fn lookup(&self) -> Lookup {
        self.lookup
    }

    /// Walk `path` and return the value it names, without calling it.
    pub fn resolve<'s, S>(&self, source: &'s S, path: &Path) -> Result<&'s Value, InvokeError>
    where
        S: ServiceSource + ?Sized,
    {
        let mut cursor = source.lookup(path.root()).unwrap_or(Value::undefined());

        for segment in path.properties() {
            match cursor.get(segment) {
                Some(next) if self.lookup.accepts(next) => cursor = next,
                _ => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(
                        path = %path,
                        segment = %segment,
                        cursor = cursor.type_name(),
                        "Property not found"
                    );
                    return Err(InvokeError::PropertyNotFound {
                        segment: segment.clone(),
                        snapshot: snapshot(cursor),
                    });
                }
            }
        }

        Ok(cursor)
    }

    /// Resolve `path` and call the result with `args`.
    ///
    /// The callable's return value is passed through unchanged; errors it
    /// raises surface as [`InvokeError::Call`].
    pub fn invoke<S>(&self, source: &S, path: &Path, args: &[Value]) -> Result<Value, InvokeError>
    where
        S: ServiceSource + ?Sized,
    {
        let target = self.resolve(source, path)?;
        let Some(callable) = target.as_callable() else {
            return Err(InvokeError::NotCallable {
                path: path.to_string(),
                found: target.type_name(),
            });
        };

        #[cfg(feature = "tracing")]
        tracing::trace!(path = %path, args = args.len(), "Invoking service function");

        Ok(callable.call(args)?)
    }
}
