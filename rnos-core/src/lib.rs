//! # rnos-core
//!
//! Core value model for the rnos service registry.
//!
//! This crate has minimal dependencies and holds everything a service author
//! needs without pulling in the registry itself:
//!
//! - [`Value`] - the dynamic value every service, property and argument is
//! - [`Callable`] - the function variant, with typed adapters via
//!   [`IntoCallable`], [`FromValue`] and [`IntoReturn`]
//! - [`Path`] - a service id followed by property segments
//! - [`ServiceId`] - hash-derived registry keys
//! - [`ServiceSource`] - the lookup seam the invoker resolves ids through
//!
//! # Error Types
//!
//! - [`RnosError`] - Top-level error type
//! - [`InvokeError`] - Resolution and invocation errors
//! - [`CallError`] - Errors raised by a callable
//! - [`PathError`] - Path construction errors

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod callable;
mod convert;
mod error;
mod path;
mod service;
mod snapshot;
mod value;

// Re-exports
pub use callable::{Callable, IntoCallable};
pub use convert::{FromValue, IntoReturn, TypeMismatch};
pub use error::{BoxError, CallError, InvokeError, PathError, RnosError};
pub use path::{IntoPath, Path};
pub use service::{IntoService, ServiceId, ServiceSource};
pub use snapshot::snapshot;
pub use value::{Map, Value};
