//! The alias table: secondary names that point at binding keys.
//!
//! Aliases only ever point at binding keys and are rewritten in a single hop,
//! so an alias whose target happens to be another alias's name is looked up
//! as a plain key. Alias cycles therefore cannot loop.

use crate::key::BindingKey;
use dashmap::DashMap;
use std::collections::HashMap;

/// Anything that can name one or more aliases.
pub trait IntoAliases {
  fn into_aliases(self) -> Vec<String>;
}

impl IntoAliases for &str {
  fn into_aliases(self) -> Vec<String> {
    vec![self.to_owned()]
  }
}

impl IntoAliases for String {
  fn into_aliases(self) -> Vec<String> {
    vec![self]
  }
}

impl IntoAliases for &[&str] {
  fn into_aliases(self) -> Vec<String> {
    self.iter().map(|s| (*s).to_owned()).collect()
  }
}

impl<const N: usize> IntoAliases for [&str; N] {
  fn into_aliases(self) -> Vec<String> {
    self.iter().map(|s| (*s).to_owned()).collect()
  }
}

impl IntoAliases for Vec<&str> {
  fn into_aliases(self) -> Vec<String> {
    self.into_iter().map(str::to_owned).collect()
  }
}

impl IntoAliases for Vec<String> {
  fn into_aliases(self) -> Vec<String> {
    self
  }
}

#[derive(Default)]
pub(crate) struct AliasTable {
  aliases: DashMap<String, BindingKey>,
}

impl AliasTable {
  pub(crate) fn with_capacity(capacity: usize) -> Self {
    Self {
      aliases: DashMap::with_capacity(capacity),
    }
  }

  /// Points every name at `key`, replacing earlier targets.
  pub(crate) fn insert(&self, key: &BindingKey, names: Vec<String>) {
    for name in names {
      if let Some(previous) = self.aliases.insert(name.clone(), key.clone()) {
        if previous != *key {
          tracing::debug!(alias = %name, from = %previous, to = %key, "alias retargeted");
        }
      }
    }
  }

  pub(crate) fn contains(&self, name: &str) -> bool {
    self.aliases.contains_key(name)
  }

  pub(crate) fn get(&self, name: &str) -> Option<BindingKey> {
    self.aliases.get(name).map(|entry| entry.value().clone())
  }

  pub(crate) fn remove(&self, name: &str) -> Option<BindingKey> {
    self.aliases.remove(name).map(|(_, key)| key)
  }

  /// Rewrites `key` to its alias target when `key` is a registered alias.
  pub(crate) fn rewrite(&self, key: BindingKey) -> BindingKey {
    match key.as_str().and_then(|name| self.get(name)) {
      Some(target) => target,
      None => key,
    }
  }

  pub(crate) fn len(&self) -> usize {
    self.aliases.len()
  }

  pub(crate) fn snapshot(&self) -> HashMap<String, BindingKey> {
    self
      .aliases
      .iter()
      .map(|entry| (entry.key().clone(), entry.value().clone()))
      .collect()
  }

  pub(crate) fn clear(&self) {
    self.aliases.clear();
  }
}
