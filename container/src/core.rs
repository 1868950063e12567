//! Core, non-public resolution bookkeeping for the container.

use crate::error::{ContainerError, Result};
use crate::key::BindingKey;
use std::cell::RefCell;

thread_local! {
  // Keys currently being resolved on this thread, in resolution order, tagged
  // with the id of the container resolving them.
  static RESOLVING_STACK: RefCell<Vec<(u64, BindingKey)>> = const { RefCell::new(Vec::new()) };
}

/// An RAII guard that detects circular dependencies.
///
/// Creating a guard pushes the key onto the thread-local resolution stack and
/// fails if the same container is already resolving that key on this thread.
/// Dropping the guard pops the key again.
pub(crate) struct ResolutionGuard {
  container_id: u64,
}

impl ResolutionGuard {
  pub(crate) fn enter(container_id: u64, key: &BindingKey) -> Result<Self> {
    RESOLVING_STACK.with(|stack| {
      let mut stack = stack.borrow_mut();
      let in_progress = stack
        .iter()
        .position(|(id, k)| *id == container_id && k == key);

      if let Some(start) = in_progress {
        let chain = stack[start..]
          .iter()
          .filter(|(id, _)| *id == container_id)
          .map(|(_, k)| k.to_string())
          .chain(std::iter::once(key.to_string()))
          .collect::<Vec<_>>()
          .join(" -> ");
        return Err(ContainerError::CircularDependency {
          key: key.clone(),
          chain,
        });
      }

      stack.push((container_id, key.clone()));
      Ok(Self { container_id })
    })
  }
}

impl Drop for ResolutionGuard {
  fn drop(&mut self) {
    RESOLVING_STACK.with(|stack| {
      let mut stack = stack.borrow_mut();
      if let Some(pos) = stack.iter().rposition(|(id, _)| *id == self.container_id) {
        stack.remove(pos);
      }
    });
  }
}
