use fibre_container::{make, Container, ContainerError};
use std::panic;

struct UnregisteredService;

fn main() {
  let container = Container::new();

  // --- Using the panicking `make!` macro ---
  println!("Attempting to resolve a service that was never registered...");

  let result = panic::catch_unwind(panic::AssertUnwindSafe(|| {
    // This line will panic!
    let _service = make!(container, UnregisteredService);
  }));

  assert!(result.is_err(), "make! should have panicked.");
  println!("Successfully caught the expected panic from make!.");

  // --- Using the fallible `make()` method ---
  println!("\nNow, attempting to resolve using the fallible `make()` method...");

  match container.make::<UnregisteredService>("unregistered") {
    Ok(_) => panic!("Should not have found the service!"),
    Err(err @ ContainerError::NotBound { .. }) => println!("Correctly received: {}", err),
    Err(other) => panic!("Unexpected error: {}", other),
  }
}
