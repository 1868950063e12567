//! The main `Container` struct and its associated methods.

use crate::alias::{AliasTable, IntoAliases};
use crate::binding::{Binding, Instance, Lifetime, Singleton, Transient, Value};
use crate::config::ContainerConfig;
use crate::core::ResolutionGuard;
use crate::error::{ContainerError, Result};
use crate::key::BindingKey;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::any::{type_name, Any};
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

static NEXT_CONTAINER_ID: AtomicU64 = AtomicU64::new(1);

/// The service container.
///
/// Maps [`BindingKey`]s to bindings (fixed instances, cached singletons or
/// transient resolvers) and string aliases to keys. It is thread-safe; every
/// operation takes `&self`, and registration methods return `&Self` so calls
/// can be chained.
///
/// Every operation that takes a key first rewrites it through the alias
/// table, so an alias stands for its target key everywhere, registration
/// included.
pub struct Container {
  id: u64,
  name: String,
  bindings: DashMap<BindingKey, Arc<dyn Binding>>,
  aliases: AliasTable,
}

impl Default for Container {
  fn default() -> Self {
    Self::with_config(ContainerConfig::default())
  }
}

impl fmt::Debug for Container {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Container")
      .field("name", &self.name)
      .field("bindings", &self.bindings.len())
      .field("aliases", &self.aliases.len())
      .finish()
  }
}

impl Container {
  /// Creates a new, empty `Container`.
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_config(config: ContainerConfig) -> Self {
    Self {
      id: NEXT_CONTAINER_ID.fetch_add(1, Ordering::Relaxed),
      name: config.name,
      bindings: DashMap::with_capacity(config.capacity),
      aliases: AliasTable::with_capacity(config.alias_capacity),
    }
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  // --- PRIVATE HELPERS ---

  fn key(&self, key: impl Into<BindingKey>) -> BindingKey {
    self.aliases.rewrite(key.into())
  }

  /// Inserts `binding` at an already alias-rewritten key.
  fn insert(&self, key: BindingKey, binding: Arc<dyn Binding>) -> &Self {
    let lifetime = binding.lifetime();
    if self.bindings.insert(key.clone(), binding).is_some() {
      tracing::debug!(container = %self.name, key = %key, %lifetime, "binding replaced");
    } else {
      tracing::trace!(container = %self.name, key = %key, %lifetime, "binding registered");
    }
    self
  }

  /// Inserts the binding built by `make` unless the (rewritten) key is
  /// already bound. Check and insert happen under the same shard lock.
  fn insert_if_absent(&self, key: BindingKey, make: impl FnOnce() -> Arc<dyn Binding>) -> bool {
    match self.bindings.entry(key) {
      Entry::Occupied(entry) => {
        tracing::debug!(
          container = %self.name,
          key = %entry.key(),
          "key already bound, registration skipped"
        );
        false
      }
      Entry::Vacant(entry) => {
        let binding = make();
        tracing::trace!(
          container = %self.name,
          key = %entry.key(),
          lifetime = %binding.lifetime(),
          "binding registered"
        );
        entry.insert(binding);
        true
      }
    }
  }

  fn lookup(&self, key: &BindingKey) -> Option<Arc<dyn Binding>> {
    self.bindings.get(key).map(|entry| Arc::clone(entry.value()))
  }

  /// Resolves an already alias-rewritten key.
  ///
  /// The binding is cloned out of the registry before its resolver runs, so
  /// no map lock is held while resolvers re-enter the container.
  fn resolve_key(&self, key: &BindingKey) -> Result<Value> {
    let binding = self
      .lookup(key)
      .ok_or_else(|| ContainerError::NotBound { key: key.clone() })?;

    let _guard = ResolutionGuard::enter(self.id, key).inspect_err(|err| {
      tracing::warn!(container = %self.name, key = %key, error = %err, "resolution cycle");
    })?;

    tracing::trace!(
      container = %self.name,
      key = %key,
      lifetime = %binding.lifetime(),
      "resolving"
    );

    match binding.resolve(self) {
      Ok(Some(value)) => Ok(value),
      Ok(None) => Err(ContainerError::Unresolvable { key: key.clone() }),
      Err(err) => Err(err.with_key(key)),
    }
  }

  fn downcast<T: Any + Send + Sync>(key: BindingKey, value: Value) -> Result<Arc<T>> {
    value.downcast::<T>().map_err(|_| ContainerError::TypeMismatch {
      key,
      expected: type_name::<T>(),
    })
  }

  // --- PUBLIC API ---

  // --- Aliases ---

  /// Registers one or more aliases for `key`. The key does not need to be bound.
  ///
  /// If `key` is itself an alias, the new names point at its target, so every
  /// stored alias refers to a real key.
  pub fn alias(&self, key: impl Into<BindingKey>, names: impl IntoAliases) -> &Self {
    self.aliases.insert(&self.key(key), names.into_aliases());
    self
  }

  /// Whether `name` is a registered alias. The registry is not consulted.
  pub fn is_alias(&self, name: &str) -> bool {
    self.aliases.contains(name)
  }

  pub fn get_alias_key(&self, name: &str) -> Option<BindingKey> {
    self.aliases.get(name)
  }

  /// Removes an alias, returning the key it pointed at.
  pub fn unalias(&self, name: &str) -> Option<BindingKey> {
    self.aliases.remove(name)
  }

  // --- Instance Registration ---

  pub fn instance<T: Any + Send + Sync>(&self, key: impl Into<BindingKey>, value: T) -> &Self {
    self.insert(self.key(key), Arc::new(Instance::new(value)))
  }

  pub fn instance_if<T: Any + Send + Sync>(&self, key: impl Into<BindingKey>, value: T) -> &Self {
    self.insert_if_absent(self.key(key), || Arc::new(Instance::new(value)));
    self
  }

  /// Registers an existing `Arc`; resolutions return that same allocation.
  pub fn instance_arc<T: Any + Send + Sync>(
    &self,
    key: impl Into<BindingKey>,
    value: Arc<T>,
  ) -> &Self {
    self.insert(self.key(key), Arc::new(Instance::from_value(value)))
  }

  // --- Singleton Registration ---

  pub fn singleton<T, F>(&self, key: impl Into<BindingKey>, resolver: F) -> &Self
  where
    T: Any + Send + Sync,
    F: Fn(&Container) -> Result<T> + Send + Sync + 'static,
  {
    self.insert(self.key(key), Arc::new(Singleton::new(resolver)))
  }

  pub fn singleton_if<T, F>(&self, key: impl Into<BindingKey>, resolver: F) -> &Self
  where
    T: Any + Send + Sync,
    F: Fn(&Container) -> Result<T> + Send + Sync + 'static,
  {
    self.insert_if_absent(self.key(key), || Arc::new(Singleton::new(resolver)));
    self
  }

  /// Registers a singleton resolved as the trait object `I` through
  /// [`make_trait`](Self::make_trait).
  pub fn singleton_trait<I, F>(&self, key: impl Into<BindingKey>, resolver: F) -> &Self
  where
    I: ?Sized + Send + Sync + 'static,
    F: Fn(&Container) -> Result<Arc<I>> + Send + Sync + 'static,
  {
    self.insert(self.key(key), Arc::new(Singleton::new(resolver)))
  }

  // --- Transient Registration ---

  pub fn binding<T, F>(&self, key: impl Into<BindingKey>, resolver: F) -> &Self
  where
    T: Any + Send + Sync,
    F: Fn(&Container) -> Result<T> + Send + Sync + 'static,
  {
    self.insert(self.key(key), Arc::new(Transient::new(resolver)))
  }

  pub fn binding_if<T, F>(&self, key: impl Into<BindingKey>, resolver: F) -> &Self
  where
    T: Any + Send + Sync,
    F: Fn(&Container) -> Result<T> + Send + Sync + 'static,
  {
    self.insert_if_absent(self.key(key), || Arc::new(Transient::new(resolver)));
    self
  }

  // --- Custom and composite registration ---

  /// Registers a custom [`Binding`] implementation.
  pub fn bind(&self, key: impl Into<BindingKey>, binding: impl Binding + 'static) -> &Self {
    self.insert(self.key(key), Arc::new(binding))
  }

  /// Registers `resolver` as a singleton or transient binding, then aliases it.
  pub fn auto_binding<T, F>(
    &self,
    name: impl Into<BindingKey>,
    resolver: F,
    singleton: bool,
    aliases: &[&str],
  ) -> &Self
  where
    T: Any + Send + Sync,
    F: Fn(&Container) -> Result<T> + Send + Sync + 'static,
  {
    let key = name.into();
    if singleton {
      self.singleton(key.clone(), resolver);
    } else {
      self.binding(key.clone(), resolver);
    }
    if !aliases.is_empty() {
      self.alias(key, aliases);
    }
    self
  }

  /// Registers `T` under its own type key, built with `T::default()`.
  pub fn auto_binding_default<T>(&self, singleton: bool, aliases: &[&str]) -> &Self
  where
    T: Default + Any + Send + Sync,
  {
    self.auto_binding(BindingKey::of::<T>(), |_| Ok(T::default()), singleton, aliases)
  }

  /// Removes the binding for `key`. Aliases pointing at it are kept.
  pub fn forget(&self, key: impl Into<BindingKey>) -> bool {
    let key = self.key(key);
    let removed = self.bindings.remove(&key).is_some();
    if removed {
      tracing::debug!(container = %self.name, key = %key, "binding removed");
    }
    removed
  }

  // --- Resolution ---

  /// Whether `key` (after alias rewriting) has a binding.
  pub fn bound(&self, key: impl Into<BindingKey>) -> bool {
    self.bindings.contains_key(&self.key(key))
  }

  /// Same as [`bound`](Self::bound).
  pub fn has(&self, key: impl Into<BindingKey>) -> bool {
    self.bound(key)
  }

  /// Resolves `key` without downcasting the value.
  pub fn make_any(&self, key: impl Into<BindingKey>) -> Result<Value> {
    self.resolve_key(&self.key(key))
  }

  /// Resolves `key` as a `T`.
  ///
  /// # Errors
  ///
  /// `NotBound` if nothing is registered, `Unresolvable` if the binding has no
  /// value, `TypeMismatch` if the value is not a `T`, and whatever the
  /// binding's resolver returned.
  pub fn make<T: Any + Send + Sync>(&self, key: impl Into<BindingKey>) -> Result<Arc<T>> {
    let key = self.key(key);
    let value = self.resolve_key(&key)?;
    Self::downcast(key, value)
  }

  /// Resolves a binding registered with [`singleton_trait`](Self::singleton_trait).
  pub fn make_trait<I>(&self, key: impl Into<BindingKey>) -> Result<Arc<I>>
  where
    I: ?Sized + Send + Sync + 'static,
  {
    let key = self.key(key);
    let value = self.resolve_key(&key)?;
    value
      .downcast_ref::<Arc<I>>()
      .cloned()
      .ok_or_else(|| ContainerError::TypeMismatch {
        key,
        expected: type_name::<Arc<I>>(),
      })
  }

  /// Resolves `key`, constructing it with `T::default()` if it is unbound.
  ///
  /// With `singleton` set to `None` an unbound key fails with `NotBound`.
  /// With `Some(flag)` the default constructor is registered as a singleton
  /// (`true`) or transient (`false`) binding first.
  ///
  /// `T` must be `Default` even when the key is already bound; use
  /// [`make`](Self::make) for types without a default constructor.
  pub fn resolve<T>(&self, key: impl Into<BindingKey>, singleton: Option<bool>) -> Result<Arc<T>>
  where
    T: Default + Any + Send + Sync,
  {
    match singleton {
      Some(singleton) => self.resolve_with(key, singleton, |_| Ok(T::default())),
      None => self.make(key),
    }
  }

  /// Resolves `key`, first binding `resolver` as a singleton or transient if
  /// the key is unbound. An existing binding always wins.
  pub fn resolve_with<T, F>(
    &self,
    key: impl Into<BindingKey>,
    singleton: bool,
    resolver: F,
  ) -> Result<Arc<T>>
  where
    T: Any + Send + Sync,
    F: Fn(&Container) -> Result<T> + Send + Sync + 'static,
  {
    let key = self.key(key);
    self.insert_if_absent(key.clone(), || -> Arc<dyn Binding> {
      if singleton {
        Arc::new(Singleton::new(resolver))
      } else {
        Arc::new(Transient::new(resolver))
      }
    });
    let value = self.resolve_key(&key)?;
    Self::downcast(key, value)
  }

  /// Returns a handle that performs a fresh [`make`](Self::make) every time
  /// it is called. Nothing is resolved until then.
  pub fn factory<T: Any + Send + Sync>(
    &self,
    key: impl Into<BindingKey>,
  ) -> impl Fn() -> Result<Arc<T>> + '_ {
    let key = key.into();
    move || self.make::<T>(key.clone())
  }

  // --- Introspection ---

  /// Removes every binding and alias.
  pub fn clear(&self) -> &Self {
    self.bindings.clear();
    self.aliases.clear();
    tracing::debug!(container = %self.name, "container cleared");
    self
  }

  /// A snapshot of the registry. Changes to it do not affect the container.
  pub fn get_bindings(&self) -> HashMap<BindingKey, Arc<dyn Binding>> {
    self
      .bindings
      .iter()
      .map(|entry| (entry.key().clone(), Arc::clone(entry.value())))
      .collect()
  }

  /// A snapshot of the alias table. Changes to it do not affect the container.
  pub fn get_aliases(&self) -> HashMap<String, BindingKey> {
    self.aliases.snapshot()
  }

  /// The lifetime of the binding at `key`, if any.
  pub fn lifetime(&self, key: impl Into<BindingKey>) -> Option<Lifetime> {
    self.lookup(&self.key(key)).map(|binding| binding.lifetime())
  }

  pub fn len(&self) -> usize {
    self.bindings.len()
  }

  pub fn is_empty(&self) -> bool {
    self.bindings.is_empty()
  }
}
