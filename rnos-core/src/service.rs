//! Service identity and the conversion of Rust types into service objects.

use crate::value::{Map, Value};
use std::{
    collections::{BTreeMap, HashMap, hash_map::DefaultHasher},
    fmt,
    hash::{Hash, Hasher},
    sync::Arc,
};

/// A registry key derived from where and what was registered.
///
/// The id hashes the source file name together with the source text of the
/// registered expression, so the same registration site produces the same
/// id on every run of one build. Rendered as a decimal number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ServiceId(u64);

impl ServiceId {
    /// Derive an id from a file name and an expression's source text.
    pub fn derive(filename: &str, expression: &str) -> Self {
        let mut hasher = DefaultHasher::new();
        expression.hash(&mut hasher);
        filename.hash(&mut hasher);
        Self(hasher.finish())
    }

    /// Wrap a raw id.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw id.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ServiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<ServiceId> for String {
    fn from(id: ServiceId) -> Self {
        id.to_string()
    }
}

/// A type that can be registered as a service object.
///
/// Usually implemented by the `#[service]` attribute, which exposes each
/// `pub fn(&self, ..)` of an `impl` block as a callable property.
pub trait IntoService {
    /// Build the object exposed to path resolution.
    fn into_service(self) -> Value;
}

impl IntoService for Value {
    fn into_service(self) -> Value {
        self
    }
}

impl IntoService for Map {
    fn into_service(self) -> Value {
        Value::from(self)
    }
}

/// Where the invoker finds the object named by a path's first segment.
///
/// The registry in `rnos-std` is the usual source; plain maps work too.
pub trait ServiceSource {
    /// The value registered under `id`, if any.
    fn lookup(&self, id: &str) -> Option<&Value>;
}

impl<S: std::hash::BuildHasher> ServiceSource for HashMap<String, Value, S> {
    fn lookup(&self, id: &str) -> Option<&Value> {
        self.get(id)
    }
}

impl ServiceSource for BTreeMap<String, Value> {
    fn lookup(&self, id: &str) -> Option<&Value> {
        self.get(id)
    }
}

impl<T: ServiceSource + ?Sized> ServiceSource for &T {
    fn lookup(&self, id: &str) -> Option<&Value> {
        (**self).lookup(id)
    }
}

impl<T: ServiceSource + ?Sized> ServiceSource for Box<T> {
    fn lookup(&self, id: &str) -> Option<&Value> {
        (**self).lookup(id)
    }
}

impl<T: ServiceSource + ?Sized> ServiceSource for Arc<T> {
    fn lookup(&self, id: &str) -> Option<&Value> {
        (**self).lookup(id)
    }
}
