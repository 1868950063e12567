//! # Fibre Container
//!
//! A keyed, thread-safe service container for Rust.
//!
//! Fibre Container is a runtime registry that maps opaque keys to values or
//! value-producing resolvers. Application bootstrap code registers bindings
//! once and resolves them anywhere the container is reachable.
//!
//! ## Core Concepts
//!
//! - **BindingKey**: numbers, booleans, strings, Rust types, objects (by
//!   reference identity) and unique `Symbol`s can all identify a binding.
//! - **Bindings**: an `instance` is a fixed value, a `singleton` runs its
//!   resolver once and caches the result, a `binding` (transient) runs its
//!   resolver on every resolution.
//! - **Aliases**: string names that stand in for a binding key.
//! - **Resolvers** receive the container, so they can resolve their own
//!   dependencies. Circular dependencies fail with
//!   [`ContainerError::CircularDependency`] instead of overflowing the stack.
//!
//! ## Quick Start
//!
//! ```
//! use fibre_container::{Container, ContainerError};
//! use std::sync::Arc;
//!
//! struct Connection {
//!   url: String,
//! }
//!
//! let container = Container::new();
//! container
//!   .instance("database_url", String::from("postgres://localhost/app"))
//!   .singleton("db", |c| {
//!     let url = c.make::<String>("database_url")?;
//!     Ok(Connection { url: (*url).clone() })
//!   })
//!   .alias("db", ["database", "connection"]);
//!
//! let db = container.make::<Connection>("connection").unwrap();
//! assert_eq!(db.url, "postgres://localhost/app");
//! assert!(Arc::ptr_eq(&db, &container.make::<Connection>("db").unwrap()));
//!
//! container.clear();
//! assert!(matches!(
//!   container.make::<Connection>("db"),
//!   Err(ContainerError::NotBound { .. })
//! ));
//! ```

mod alias;
mod binding;
mod config;
mod container;
mod core;
mod error;
mod key;
mod macros;

pub use alias::IntoAliases;
pub use binding::{Binding, Instance, Lifetime, Resolver, Singleton, Transient, Value};
pub use config::ContainerConfig;
pub use container::Container;
pub use error::{BoxError, ContainerError, Result};
pub use key::{BindingKey, ObjectKey, Symbol, TypeKey};
