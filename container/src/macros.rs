//! Public macros for ergonomic resolution at the composition root.

/// Resolves a value from a container, panicking if it cannot be resolved.
///
/// Meant for bootstrap code where a missing binding is a wiring bug. Use
/// [`Container::make`](crate::Container::make) directly to handle the error.
///
/// # Panics
///
/// Panics with the underlying [`ContainerError`](crate::ContainerError) when
/// resolution fails.
///
/// # Examples
///
/// ```
/// use fibre_container::{make, BindingKey, Container};
///
/// let container = Container::new();
/// container.instance(BindingKey::of::<String>(), String::from("hello"));
/// container.instance("port", 8080_u16);
///
/// // Keyed by the type itself.
/// let greeting = make!(container, String);
/// assert_eq!(*greeting, "hello");
///
/// // Keyed explicitly.
/// let port = make!(container, u16, "port");
/// assert_eq!(*port, 8080);
/// ```
///
/// ```
/// use fibre_container::{make, Container};
/// use std::sync::Arc;
///
/// trait Greeter: Send + Sync { fn greet(&self) -> String; }
/// struct EnglishGreeter;
/// impl Greeter for EnglishGreeter { fn greet(&self) -> String { "Hello!".to_string() } }
///
/// let container = Container::new();
/// container.singleton_trait::<dyn Greeter, _>("greeter", |_| Ok(Arc::new(EnglishGreeter)));
///
/// let greeter = make!(container, trait Greeter, "greeter");
/// assert_eq!(greeter.greet(), "Hello!");
/// ```
#[macro_export]
macro_rules! make {
    // make!(container, trait MyTrait, key)
    ($container:expr, trait $trait_ident:ident, $key:expr) => {
        $container
            .make_trait::<dyn $trait_ident>($key)
            .unwrap_or_else(|err| {
                panic!(
                    "Failed to resolve required trait service {}: {}",
                    std::any::type_name::<dyn $trait_ident>(),
                    err
                )
            })
    };

    // make!(container, trait MyTrait), keyed by the trait object type
    ($container:expr, trait $trait_ident:ident) => {
        $crate::make!($container, trait $trait_ident, $crate::BindingKey::of::<dyn $trait_ident>())
    };

    // make!(container, MyService, key)
    ($container:expr, $type:ty, $key:expr) => {
        $container.make::<$type>($key).unwrap_or_else(|err| {
            panic!(
                "Failed to resolve required service {}: {}",
                std::any::type_name::<$type>(),
                err
            )
        })
    };

    // make!(container, MyService), keyed by the type
    ($container:expr, $type:ty) => {
        $crate::make!($container, $type, $crate::BindingKey::of::<$type>())
    };
}
