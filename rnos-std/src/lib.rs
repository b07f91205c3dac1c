//! # rnos-std
//!
//! Standard implementations for the rnos service registry.
//!
//! This crate provides:
//! - **Registry**: [`Registry`], [`RegistryBuilder`]
//! - **Invocation**: [`Invoker`] with its [`Lookup`] rule
//! - **Hub**: [`ServiceHub`] and [`ServiceRef`] handles
//! - **Configuration**: [`HubConfig`]
//! - **Navigation stub**: [`Navigator`]
//! - **Testing utilities**: [`testing`]

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core types
pub use rnos_core;

// Modules
pub mod config;
pub mod hub;
pub mod invoker;
pub mod location;
pub mod registry;
pub mod testing;

pub use config::{ConfigError, HubConfig};
pub use hub::{ServiceHub, ServiceRef};
pub use invoker::{Invoker, Lookup};
pub use location::{LocationSource, Navigator, SharedLocation};
pub use registry::{Registry, RegistryBuilder};

#[cfg(feature = "inventory")]
pub use registry::ServiceRegistration;

#[cfg(feature = "inventory")]
pub use inventory;
