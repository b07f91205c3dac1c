//! Service registry.
//!
//! The registry maps string ids to registered [`Value`]s. Registering
//! hands the value back unchanged, so a service can be created and
//! registered in one expression. Registering under an existing id replaces
//! the previous value without complaint.

use rnos_core::{IntoService, ServiceSource, Value};
use std::{collections::HashMap, fmt};

/// A mapping from service ids to registered values.
///
/// Values are shared: the registry holds another handle to the same object
/// the caller registered, and does not manage its lifetime beyond that.
#[derive(Clone, Default)]
pub struct Registry {
    entries: HashMap<String, Value>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start building a registry fluently.
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Register `value` under `id` and return it.
    ///
    /// An existing entry under `id` is replaced.
    pub fn register(&mut self, id: impl Into<String>, value: impl Into<Value>) -> Value {
        let id = id.into();
        let value = value.into();

        #[cfg(feature = "tracing")]
        {
            if self.entries.contains_key(&id) {
                tracing::debug!(id = %id, kind = value.type_name(), "Overwriting service");
            } else {
                tracing::debug!(id = %id, kind = value.type_name(), "Registering service");
            }
        }

        self.entries.insert(id, value.clone());
        value
    }

    /// Register a Rust service object.
    pub fn register_service<T: IntoService>(
        &mut self,
        id: impl Into<String>,
        service: T,
    ) -> Value {
        self.register(id, service.into_service())
    }

    /// The value registered under `id`.
    pub fn get(&self, id: &str) -> Option<&Value> {
        self.entries.get(id)
    }

    /// Whether anything is registered under `id`.
    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// Iterate over registered ids, in no particular order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Get the number of registered services.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Install every service submitted with [`inventory::submit!`].
    ///
    /// Returns how many were installed. Submissions sharing an id overwrite
    /// each other in link order.
    #[cfg(feature = "inventory")]
    pub fn register_submitted(&mut self) -> usize {
        let mut installed = 0;
        for registration in inventory::iter::<ServiceRegistration>() {
            self.register(registration.id, (registration.factory)());
            installed += 1;
        }
        installed
    }
}

impl ServiceSource for Registry {
    fn lookup(&self, id: &str) -> Option<&Value> {
        self.get(id)
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut ids: Vec<_> = self.ids().collect();
        ids.sort_unstable();
        f.debug_struct("Registry").field("ids", &ids).finish()
    }
}

/// Builder for constructing a [`Registry`].
#[derive(Default)]
pub struct RegistryBuilder {
    registry: Registry,
}

impl RegistryBuilder {
    /// Register a value.
    pub fn register(mut self, id: impl Into<String>, value: impl Into<Value>) -> Self {
        self.registry.register(id, value);
        self
    }

    /// Register a Rust service object.
    pub fn service<T: IntoService>(mut self, id: impl Into<String>, service: T) -> Self {
        self.registry.register_service(id, service);
        self
    }

    /// Build the registry.
    pub fn build(self) -> Registry {
        self.registry
    }
}

/// Registration entry for a service installed at startup.
///
/// This struct is submitted to `inventory` for automatic collection, usually
/// by `#[service(id = "...")]`.
///
/// ```rust,ignore
/// fn make_clock() -> Value {
///     Clock::default().into_service()
/// }
///
/// inventory::submit! {
///     ServiceRegistration::new("clock", make_clock)
/// }
/// ```
#[cfg(feature = "inventory")]
pub struct ServiceRegistration {
    /// The id the service is registered under.
    pub id: &'static str,
    /// Builds the service value.
    pub factory: fn() -> Value,
}

#[cfg(feature = "inventory")]
impl ServiceRegistration {
    /// Create a registration entry.
    pub const fn new(id: &'static str, factory: fn() -> Value) -> Self {
        Self { id, factory }
    }
}

#[cfg(feature = "inventory")]
inventory::collect!(ServiceRegistration);
