//! Binding keys: the opaque tokens bindings and aliases are registered under.

use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::num::TryFromIntError;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

static NEXT_SYMBOL_ID: AtomicU64 = AtomicU64::new(1);

/// A key identifying a binding in a [`Container`](crate::Container).
///
/// Primitive variants compare by value. `Object` compares by reference
/// identity, `Symbol` by the id it was minted with and `Type` by `TypeId`.
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum BindingKey {
  Number(i64),
  Bool(bool),
  Str(String),
  Type(TypeKey),
  Object(ObjectKey),
  Symbol(Symbol),
}

impl BindingKey {
  /// The key for the Rust type `T`.
  pub fn of<T: ?Sized + Any>() -> Self {
    BindingKey::Type(TypeKey::of::<T>())
  }

  /// Returns the string payload if this is a `Str` key.
  pub fn as_str(&self) -> Option<&str> {
    match self {
      BindingKey::Str(s) => Some(s),
      _ => None,
    }
  }
}

impl fmt::Debug for BindingKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      BindingKey::Number(n) => write!(f, "Key(Number({}))", n),
      BindingKey::Bool(b) => write!(f, "Key(Bool({}))", b),
      BindingKey::Str(s) => write!(f, "Key(Str({:?}))", s),
      BindingKey::Type(t) => write!(f, "Key({:?})", t),
      BindingKey::Object(o) => write!(f, "Key({:?})", o),
      BindingKey::Symbol(s) => write!(f, "Key({:?})", s),
    }
  }
}

impl fmt::Display for BindingKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      BindingKey::Number(n) => write!(f, "{}", n),
      BindingKey::Bool(b) => write!(f, "{}", b),
      BindingKey::Str(s) => write!(f, "'{}'", s),
      BindingKey::Type(t) => write!(f, "type {}", t.name),
      BindingKey::Object(o) => write!(f, "object@{:#x}", o.addr()),
      BindingKey::Symbol(s) => write!(f, "Symbol({})", s.description),
    }
  }
}

/// A Rust type used as a binding key.
#[derive(Clone, Copy)]
pub struct TypeKey {
  id: TypeId,
  name: &'static str,
}

impl TypeKey {
  pub fn of<T: ?Sized + Any>() -> Self {
    Self {
      id: TypeId::of::<T>(),
      name: std::any::type_name::<T>(),
    }
  }

  pub fn type_name(&self) -> &'static str {
    self.name
  }
}

impl PartialEq for TypeKey {
  fn eq(&self, other: &Self) -> bool {
    self.id == other.id
  }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
  fn hash<H: Hasher>(&self, state: &mut H) {
    self.id.hash(state);
  }
}

impl fmt::Debug for TypeKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "Type({})", self.name)
  }
}

/// An object used as a binding key, compared by reference identity.
///
/// Two `ObjectKey`s are equal only when they wrap the same allocation, even if
/// the objects themselves compare equal.
#[derive(Clone)]
pub struct ObjectKey(Arc<dyn Any + Send + Sync>);

impl ObjectKey {
  pub fn new<T: Any + Send + Sync>(object: Arc<T>) -> Self {
    ObjectKey(object)
  }

  /// Returns the wrapped object if it is a `T`.
  pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
    self.0.downcast_ref::<T>()
  }

  fn addr(&self) -> usize {
    Arc::as_ptr(&self.0) as *const () as usize
  }
}

impl PartialEq for ObjectKey {
  fn eq(&self, other: &Self) -> bool {
    self.addr() == other.addr()
  }
}

impl Eq for ObjectKey {}

impl Hash for ObjectKey {
  fn hash<H: Hasher>(&self, state: &mut H) {
    self.addr().hash(state);
  }
}

impl fmt::Debug for ObjectKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "Object({:#x})", self.addr())
  }
}

/// A unique token. Every call to [`Symbol::new`] mints a distinct symbol,
/// regardless of its description; clones stay equal to their original.
#[derive(Clone)]
pub struct Symbol {
  id: u64,
  description: Arc<str>,
}

impl Symbol {
  pub fn new(description: impl Into<Arc<str>>) -> Self {
    Self {
      id: NEXT_SYMBOL_ID.fetch_add(1, Ordering::Relaxed),
      description: description.into(),
    }
  }

  pub fn description(&self) -> &str {
    &self.description
  }
}

impl PartialEq for Symbol {
  fn eq(&self, other: &Self) -> bool {
    self.id == other.id
  }
}

impl Eq for Symbol {}

impl Hash for Symbol {
  fn hash<H: Hasher>(&self, state: &mut H) {
    self.id.hash(state);
  }
}

impl fmt::Debug for Symbol {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "Symbol({}#{})", self.description, self.id)
  }
}

// --- Conversions ---

impl From<i64> for BindingKey {
  fn from(n: i64) -> Self {
    BindingKey::Number(n)
  }
}

impl From<i32> for BindingKey {
  fn from(n: i32) -> Self {
    BindingKey::Number(n.into())
  }
}

impl From<u32> for BindingKey {
  fn from(n: u32) -> Self {
    BindingKey::Number(n.into())
  }
}

impl From<i8> for BindingKey {
  fn from(n: i8) -> Self {
    BindingKey::Number(n.into())
  }
}

impl From<i16> for BindingKey {
  fn from(n: i16) -> Self {
    BindingKey::Number(n.into())
  }
}

impl From<u8> for BindingKey {
  fn from(n: u8) -> Self {
    BindingKey::Number(n.into())
  }
}

impl From<u16> for BindingKey {
  fn from(n: u16) -> Self {
    BindingKey::Number(n.into())
  }
}

// Wider unsigned integers do not always fit a number key.

impl TryFrom<u64> for BindingKey {
  type Error = TryFromIntError;

  fn try_from(n: u64) -> Result<Self, Self::Error> {
    i64::try_from(n).map(BindingKey::Number)
  }
}

impl TryFrom<usize> for BindingKey {
  type Error = TryFromIntError;

  fn try_from(n: usize) -> Result<Self, Self::Error> {
    i64::try_from(n).map(BindingKey::Number)
  }
}

impl From<bool> for BindingKey {
  fn from(b: bool) -> Self {
    BindingKey::Bool(b)
  }
}

impl From<&str> for BindingKey {
  fn from(s: &str) -> Self {
    BindingKey::Str(s.to_owned())
  }
}

impl From<String> for BindingKey {
  fn from(s: String) -> Self {
    BindingKey::Str(s)
  }
}

impl From<&String> for BindingKey {
  fn from(s: &String) -> Self {
    BindingKey::Str(s.clone())
  }
}

impl From<TypeKey> for BindingKey {
  fn from(t: TypeKey) -> Self {
    BindingKey::Type(t)
  }
}

impl From<ObjectKey> for BindingKey {
  fn from(o: ObjectKey) -> Self {
    BindingKey::Object(o)
  }
}

impl From<Symbol> for BindingKey {
  fn from(s: Symbol) -> Self {
    BindingKey::Symbol(s)
  }
}

impl From<&Symbol> for BindingKey {
  fn from(s: &Symbol) -> Self {
    BindingKey::Symbol(s.clone())
  }
}

impl From<&BindingKey> for BindingKey {
  fn from(k: &BindingKey) -> Self {
    k.clone()
  }
}
