//! Binding variants: how a registered key produces its value.

use crate::container::Container;
use crate::error::Result;
use once_cell::sync::OnceCell;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// A type-erased value stored in or produced by a binding.
pub type Value = Arc<dyn Any + Send + Sync>;

/// A type-erased resolver. It receives the container so it can resolve its
/// own dependencies.
pub type Resolver = Box<dyn Fn(&Container) -> Result<Value> + Send + Sync>;

/// The caching policy of a binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lifetime {
  /// A fixed value; no resolver is ever called.
  Instance,
  /// The resolver runs at most once and its result is cached.
  Singleton,
  /// The resolver runs on every resolution.
  Transient,
}

impl fmt::Display for Lifetime {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      Lifetime::Instance => "instance",
      Lifetime::Singleton => "singleton",
      Lifetime::Transient => "transient",
    })
  }
}

/// A registry entry's resolution strategy.
///
/// Implement this to register custom strategies with [`Container::bind`].
/// Returning `Ok(None)` means the binding has no value, which the container
/// reports as [`ContainerError::Unresolvable`](crate::ContainerError::Unresolvable).
pub trait Binding: Send + Sync {
  fn resolve(&self, container: &Container) -> Result<Option<Value>>;

  fn lifetime(&self) -> Lifetime;
}

/// Wraps a typed resolver into a type-erased one.
pub(crate) fn erase<T, F>(resolver: F) -> Resolver
where
  T: Any + Send + Sync,
  F: Fn(&Container) -> Result<T> + Send + Sync + 'static,
{
  Box::new(move |container: &Container| {
    resolver(container).map(|value| Arc::new(value) as Value)
  })
}

// --- Instance ---

/// A binding holding a fixed value.
pub struct Instance {
  value: Option<Value>,
}

impl Instance {
  pub fn new<T: Any + Send + Sync>(value: T) -> Self {
    Self::from_value(Arc::new(value))
  }

  pub fn from_value(value: Value) -> Self {
    Self { value: Some(value) }
  }

  /// An instance binding whose value was never set.
  pub fn empty() -> Self {
    Self { value: None }
  }
}

impl Binding for Instance {
  fn resolve(&self, _container: &Container) -> Result<Option<Value>> {
    Ok(self.value.clone())
  }

  fn lifetime(&self) -> Lifetime {
    Lifetime::Instance
  }
}

// --- Singleton ---

/// A binding whose resolver runs once; the result is cached on the binding.
///
/// Initialization is synchronized: concurrent first resolutions run the
/// resolver exactly once. A failed resolver leaves the binding cold and the
/// next resolution tries again.
pub struct Singleton {
  cell: OnceCell<Value>,
  resolver: Resolver,
}

impl Singleton {
  pub fn new<T, F>(resolver: F) -> Self
  where
    T: Any + Send + Sync,
    F: Fn(&Container) -> Result<T> + Send + Sync + 'static,
  {
    Self::from_resolver(erase(resolver))
  }

  pub fn from_resolver(resolver: Resolver) -> Self {
    Self {
      cell: OnceCell::new(),
      resolver,
    }
  }

  /// Whether the resolver has already produced the cached value.
  pub fn is_cached(&self) -> bool {
    self.cell.get().is_some()
  }
}

impl Binding for Singleton {
  fn resolve(&self, container: &Container) -> Result<Option<Value>> {
    self
      .cell
      .get_or_try_init(|| (self.resolver)(container))
      .map(|value| Some(value.clone()))
  }

  fn lifetime(&self) -> Lifetime {
    Lifetime::Singleton
  }
}

// --- Transient ---

/// A binding whose resolver runs on every resolution.
pub struct Transient {
  resolver: Resolver,
}

impl Transient {
  pub fn new<T, F>(resolver: F) -> Self
  where
    T: Any + Send + Sync,
    F: Fn(&Container) -> Result<T> + Send + Sync + 'static,
  {
    Self::from_resolver(erase(resolver))
  }

  pub fn from_resolver(resolver: Resolver) -> Self {
    Self { resolver }
  }
}

impl Binding for Transient {
  fn resolve(&self, container: &Container) -> Result<Option<Value>> {
    (self.resolver)(container).map(Some)
  }

  fn lifetime(&self) -> Lifetime {
    Lifetime::Transient
  }
}
