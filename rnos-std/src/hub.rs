//! # Service Hub
//!
//! [`ServiceHub`] bundles a [`Registry`], an [`Invoker`] and a
//! [`HubConfig`] into the one object an application passes around: the
//! producer side registers services on it, the consumer side invokes paths
//! through it.
//!
//! ```rust,ignore
//! let mut hub = ServiceHub::new();
//! hub.register("math", Value::object([
//!     ("add", Value::function(|a: f64, b: f64| a + b)),
//! ]));
//!
//! let sum = hub.invoke("math.add", &[2.into(), 3.into()])?;
//! assert_eq!(sum, Value::from(5));
//! ```

use crate::{
    config::{ConfigError, HubConfig},
    invoker::Invoker,
    registry::Registry,
};
use rnos_core::{IntoPath, IntoService, InvokeError, Path, RnosError, ServiceId, Value};

/// An owned registry plus the rules for invoking paths against it.
#[derive(Debug, Clone, Default)]
pub struct ServiceHub {
    registry: Registry,
    invoker: Invoker,
    config: HubConfig,
}

impl ServiceHub {
    /// Create a hub with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a hub with the given configuration.
    pub fn with_config(config: HubConfig) -> Self {
        Self {
            registry: Registry::new(),
            invoker: Invoker::with_lookup(config.lookup),
            config,
        }
    }

    /// Create a hub from a JSON configuration document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        HubConfig::from_json(json).map(Self::with_config)
    }

    /// Replace the registry, keeping the configuration.
    pub fn with_registry(mut self, registry: Registry) -> Self {
        self.registry = registry;
        self
    }

    /// The active configuration.
    pub fn config(&self) -> &HubConfig {
        &self.config
    }

    /// The underlying registry.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Mutable access to the underlying registry.
    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    /// Register `value` under `id` and return it.
    pub fn register(&mut self, id: impl Into<String>, value: impl Into<Value>) -> Value {
        self.registry.register(id, value)
    }

    /// Register a Rust service object.
    pub fn register_service<T: IntoService>(&mut self, id: impl Into<String>, service: T) -> Value {
        self.registry.register_service(id, service)
    }

    /// Derive an id for `expression` in the configured file.
    pub fn derive_id(&self, expression: &str) -> ServiceId {
        ServiceId::derive(self.config.filename.as_deref().unwrap_or_default(), expression)
    }

    /// Resolve `path` without calling the result.
    pub fn resolve<P: IntoPath>(&self, path: P) -> Result<&Value, RnosError> {
        let path = path.into_path()?;
        Ok(self.invoker.resolve(&self.registry, &path)?)
    }

    /// Resolve `path` and call the result with `args`.
    ///
    /// Strings are parsed as accessor notation (`"math.add"`); arrays and
    /// vectors of segments are used verbatim.
    pub fn invoke<P: IntoPath>(&self, path: P, args: &[Value]) -> Result<Value, RnosError> {
        let path = path.into_path()?;
        Ok(self.invoker.invoke(&self.registry, &path, args)?)
    }

    /// A handle for calling into the service registered under `id`.
    pub fn client(&self, id: impl Into<String>) -> ServiceRef {
        ServiceRef::new(id)
    }
}

/// A handle naming one registered service.
///
/// Property paths given to [`call`](Self::call) are relative to the service.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ServiceRef {
    id: String,
}

impl ServiceRef {
    /// Create a handle for `id`.
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    /// The service id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The path naming the service itself.
    pub fn path(&self) -> Path {
        Path::from_id(self.id.clone())
    }

    /// Call the function at `properties` on the service.
    pub fn call<I, S>(
        &self,
        hub: &ServiceHub,
        properties: I,
        args: &[Value],
    ) -> Result<Value, InvokeError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let path = self.path().join(properties);
        hub.invoker.invoke(&hub.registry, &path, args)
    }
}

impl From<ServiceId> for ServiceRef {
    fn from(id: ServiceId) -> Self {
        ServiceRef::new(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invoker::Lookup;
    use rnos_core::PathError;

    fn math() -> Value {
        Value::object([
            ("add", Value::function(|a: f64, b: f64| a + b)),
            ("zero", Value::from(0)),
        ])
    }

    #[test]
    fn test_invoke_by_string_and_segments() {
        let mut hub = ServiceHub::new();
        hub.register("math", math());

        let args = [Value::from(2), Value::from(3)];
        assert_eq!(hub.invoke("math.add", &args).unwrap(), Value::from(5));
        assert_eq!(hub.invoke(["math", "add"], &args).unwrap(), Value::from(5));
    }

    #[test]
    fn test_invalid_path() {
        let hub = ServiceHub::new();
        let err = hub.invoke("", &[]).unwrap_err();
        assert!(matches!(err, RnosError::Path(PathError::Empty)));
    }

    #[test]
    fn test_config_selects_lookup() {
        let mut hub = ServiceHub::from_json(r#"{ "lookup": "present" }"#).unwrap();
        hub.register("math", math());
        assert_eq!(hub.resolve("math.zero").unwrap(), &Value::from(0));

        let mut hub = ServiceHub::with_config(HubConfig::default().with_lookup(Lookup::Truthy));
        hub.register("math", math());
        assert!(hub.resolve("math.zero").is_err());
    }

    #[test]
    fn test_derive_id_uses_configured_filename() {
        let hub = ServiceHub::with_config(HubConfig::default().with_filename("src/app.rs"));
        assert_eq!(
            hub.derive_id("Calculator"),
            ServiceId::derive("src/app.rs", "Calculator")
        );
        assert_eq!(
            ServiceHub::new().derive_id("Calculator"),
            ServiceId::derive("", "Calculator")
        );
    }

    #[test]
    fn test_client_handle() {
        let mut hub = ServiceHub::new();
        let id = hub.derive_id("math()");
        hub.register(id, math());

        let client = hub.client(id.to_string());
        let sum = client
            .call(&hub, ["add"], &[Value::from(1), Value::from(1)])
            .unwrap();
        assert_eq!(sum, Value::from(2));
        assert_eq!(ServiceRef::from(id), client);
    }
}
