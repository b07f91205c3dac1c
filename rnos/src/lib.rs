//! # rnos - In-process Service Registry
//!
//! `rnos` lets one part of an application register objects under string ids
//! and another part call functions on them by **property path**, without the
//! two sides holding references to each other.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use rnos::prelude::*;
//!
//! let mut hub = ServiceHub::new();
//! hub.register("math", Value::object([
//!     ("add", Value::function(|a: f64, b: f64| a + b)),
//! ]));
//!
//! // Segment lists and accessor strings are interchangeable.
//! assert_eq!(hub.invoke(["math", "add"], &[2.into(), 3.into()])?, Value::from(5));
//! assert_eq!(hub.invoke("math.add", &[2.into(), 3.into()])?, Value::from(5));
//! ```
//!
//! ## Rust services
//!
//! With the `macros` feature an inherent `impl` block becomes a service
//! object:
//!
//! ```rust,ignore
//! struct Greeter;
//!
//! #[rnos::service]
//! impl Greeter {
//!     pub fn hello(&self, name: String) -> String {
//!         format!("hello {name}")
//!     }
//! }
//!
//! let id = rnos::register!(hub, Greeter);
//! hub.client(id).call(&hub, ["hello"], &["ada".into()])?;
//! ```
//!
//! ## Features
//!
//! - `tracing` (default): log registrations, lookups and navigation
//! - `macros`: `#[service]` and `#[derive(IntoValue)]`
//! - `inventory`: `#[service(id = "...")]` static registration

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

pub use rnos_core::{
    // Error types
    BoxError,
    CallError,
    // Values
    Callable,
    FromValue,
    IntoCallable,
    // Paths
    IntoPath,
    IntoReturn,
    // Services
    IntoService,
    InvokeError,
    Map,
    Path,
    PathError,
    RnosError,
    ServiceId,
    ServiceSource,
    TypeMismatch,
    Value,
    snapshot,
};

pub use rnos_std::{
    ConfigError, HubConfig, Invoker, LocationSource, Lookup, Navigator, Registry,
    RegistryBuilder, ServiceHub, ServiceRef, SharedLocation,
};

#[cfg(feature = "inventory")]
pub use rnos_std::ServiceRegistration;

/// Testing utilities.
pub mod testing {
    pub use rnos_std::testing::{CountingCallable, RecordingCallable};
}

/// Prelude module - common imports for rnos.
///
/// # Usage
///
/// ```rust,ignore
/// use rnos::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        Callable, FromValue, IntoPath, IntoService, InvokeError, Lookup, Map, Navigator, Path,
        RnosError, ServiceHub, ServiceId, ServiceRef, Value,
    };
}

/// Register a service under an id derived from its call site.
///
/// The id hashes `file!()` together with the source text of the expression,
/// so the same expression in the same file always lands on the same id.
/// The expression must implement [`IntoService`]. Evaluates to the
/// [`ServiceId`] used.
///
/// ```rust,ignore
/// let id = rnos::register!(hub, Value::object([("ping", Value::function(|| "pong"))]));
/// hub.client(id).call(&hub, ["ping"], &[])?;
/// ```
#[macro_export]
macro_rules! register {
    ($hub:expr, $service:expr $(,)?) => {{
        let __id = $crate::ServiceId::derive(::core::file!(), ::core::stringify!($service));
        let __service = $service;
        $hub.register_service(__id, __service);
        __id
    }};
}

#[cfg(feature = "macros")]
pub use rnos_macros::{IntoValue, service};

#[cfg(feature = "inventory")]
pub use inventory;
