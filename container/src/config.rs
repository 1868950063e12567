//! Construction-time options for a [`Container`](crate::Container).

#[cfg(feature = "serde")]
use crate::error::{ContainerError, Result};

/// Options applied when a container is created.
///
/// With the `serde` feature enabled the config can be read from YAML (or any
/// other serde format):
///
/// ```
/// # #[cfg(feature = "serde")] {
/// use fibre_container::{Container, ContainerConfig};
///
/// let config = ContainerConfig::from_yaml_str("name: app\ncapacity: 32\n").unwrap();
/// let container = Container::with_config(config);
/// assert_eq!(container.name(), "app");
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct ContainerConfig {
  /// Name attached to every log event the container emits.
  pub name: String,
  /// Initial capacity of the binding registry.
  pub capacity: usize,
  /// Initial capacity of the alias table.
  pub alias_capacity: usize,
}

impl Default for ContainerConfig {
  fn default() -> Self {
    Self {
      name: default_name(),
      capacity: 0,
      alias_capacity: 0,
    }
  }
}

fn default_name() -> String {
  "default".to_string()
}

impl ContainerConfig {
  pub fn named(name: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      ..Self::default()
    }
  }

  #[cfg(feature = "serde")]
  pub fn from_yaml_str(source: &str) -> Result<Self> {
    serde_yaml::from_str(source).map_err(|e| ContainerError::Config(e.to_string()))
  }
}
