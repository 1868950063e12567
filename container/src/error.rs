use crate::key::BindingKey;
use thiserror::Error;

/// Boxed error type carried by [`ContainerError::ResolverFailed`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The error type for all container operations.
#[derive(Debug, Error)]
pub enum ContainerError {
  /// No binding is registered for the (alias-rewritten) key.
  #[error("No binding registered for key {key}")]
  NotBound { key: BindingKey },

  /// A binding exists but produced no value.
  #[error("Binding for key {key} resolved to no value")]
  Unresolvable { key: BindingKey },

  /// The resolved value is not of the requested type.
  #[error("Binding for key {key} does not hold a value of type {expected}")]
  TypeMismatch {
    key: BindingKey,
    expected: &'static str,
  },

  /// A resolver re-entered the resolution of a key that is still in progress.
  #[error("Circular dependency detected while resolving {key}: {chain}")]
  CircularDependency { key: BindingKey, chain: String },

  /// A resolver returned an error of its own.
  ///
  /// `key` is `None` until the error passes through the binding that raised it.
  #[error("{}", resolver_failure(.key))]
  ResolverFailed {
    key: Option<BindingKey>,
    #[source]
    source: BoxError,
  },

  #[error("Invalid container configuration: {0}")]
  Config(String),
}

fn resolver_failure(key: &Option<BindingKey>) -> String {
  match key {
    Some(key) => format!("Resolver for key {key} failed"),
    None => "Resolver failed".to_string(),
  }
}

impl ContainerError {
  /// Wraps an arbitrary error raised inside a resolver.
  ///
  /// ```
  /// use fibre_container::{Container, ContainerError};
  ///
  /// let container = Container::new();
  /// container.singleton("port", |_| {
  ///   "80a".parse::<u16>().map_err(ContainerError::resolver)
  /// });
  /// assert!(matches!(
  ///   container.make::<u16>("port"),
  ///   Err(ContainerError::ResolverFailed { .. })
  /// ));
  /// ```
  pub fn resolver<E>(error: E) -> Self
  where
    E: Into<BoxError>,
  {
    ContainerError::ResolverFailed {
      key: None,
      source: error.into(),
    }
  }

  /// Attaches `key` to a `ResolverFailed` error that does not carry one yet.
  pub(crate) fn with_key(self, key: &BindingKey) -> Self {
    match self {
      ContainerError::ResolverFailed { key: None, source } => ContainerError::ResolverFailed {
        key: Some(key.clone()),
        source,
      },
      other => other,
    }
  }
}

/// A specialized `Result` type for container operations.
pub type Result<T, E = ContainerError> = std::result::Result<T, E>;
