use fibre_container::{BindingKey, Container, ContainerError, Instance, ObjectKey, Symbol};
use pretty_assertions::assert_eq;
use std::sync::{
  atomic::{AtomicUsize, Ordering},
  Arc,
};

// --- Test Fixtures ---

#[derive(Debug, PartialEq, Eq)]
struct SimpleService {
  id: u32,
}

struct Connection;

// --- Basic Tests ---

#[test]
fn test_instance_resolves_stored_value() {
  // Arrange
  let container = Container::new();
  container.instance("service", SimpleService { id: 101 });

  // Act
  let r1 = container.make::<SimpleService>("service").unwrap();
  let r2 = container.make::<SimpleService>("service").unwrap();

  // Assert
  assert_eq!(r1.id, 101);
  assert!(Arc::ptr_eq(&r1, &r2));
}

#[test]
fn test_instance_if_keeps_existing_binding() {
  let container = Container::new();
  container.instance("k", 1_u32).instance_if("k", 2_u32);

  assert_eq!(*container.make::<u32>("k").unwrap(), 1);
}

#[test]
fn test_instance_if_registers_when_unbound() {
  let container = Container::new();
  container.instance_if("k", 2_u32);

  assert_eq!(*container.make::<u32>("k").unwrap(), 2);
}

#[test]
fn test_singleton_resolver_runs_once() {
  // Arrange
  let calls = Arc::new(AtomicUsize::new(0));
  let counter = calls.clone();
  let container = Container::new();
  container.singleton("service", move |_| {
    counter.fetch_add(1, Ordering::SeqCst);
    Ok(SimpleService { id: 7 })
  });

  // Act
  let r1 = container.make::<SimpleService>("service").unwrap();
  let r2 = container.make::<SimpleService>("service").unwrap();

  // Assert
  assert_eq!(calls.load(Ordering::SeqCst), 1);
  assert!(Arc::ptr_eq(&r1, &r2));
}

#[test]
fn test_singleton_if_does_not_replace() {
  let container = Container::new();
  container
    .singleton("svc", |_| Ok(SimpleService { id: 1 }))
    .singleton_if("svc", |_| Ok(SimpleService { id: 2 }));

  assert_eq!(container.make::<SimpleService>("svc").unwrap().id, 1);
}

#[test]
fn test_transient_binding_builds_fresh_values() {
  // Arrange
  let container = Container::new();
  container.binding("service", |_| Ok(SimpleService { id: 303 }));

  // Act
  let r1 = container.make::<SimpleService>("service").unwrap();
  let r2 = container.make::<SimpleService>("service").unwrap();

  // Assert
  assert_eq!(*r1, *r2);
  assert!(!Arc::ptr_eq(&r1, &r2));
}

#[test]
fn test_binding_if_does_not_replace() {
  let container = Container::new();
  container
    .instance("svc", SimpleService { id: 1 })
    .binding_if("svc", |_| Ok(SimpleService { id: 2 }));

  assert_eq!(container.make::<SimpleService>("svc").unwrap().id, 1);
}

#[test]
fn test_reregistration_replaces_binding() {
  let container = Container::new();
  container.instance("value", "first value");
  container.singleton("value", |_| Ok("second value"));

  assert_eq!(*container.make::<&str>("value").unwrap(), "second value");
  assert_eq!(container.len(), 1);
}

#[test]
fn test_alias_indirection() {
  // Arrange
  let container = Container::new();
  container.instance("config", SimpleService { id: 5 });
  container.alias("config", "cfg");

  // Act
  let via_alias = container.make::<SimpleService>("cfg").unwrap();
  let direct = container.make::<SimpleService>("config").unwrap();

  // Assert
  assert!(Arc::ptr_eq(&via_alias, &direct));
  assert!(container.is_alias("cfg"));
  assert!(!container.is_alias("config"));
  assert_eq!(container.get_alias_key("cfg"), Some(BindingKey::from("config")));
  assert_eq!(container.get_alias_key("missing"), None);
}

#[test]
fn test_alias_many_names_at_once() {
  let container = Container::new();
  container.instance(42, "answer").alias(42, ["a", "b", "c"]);

  for name in ["a", "b", "c"] {
    assert_eq!(*container.make::<&str>(name).unwrap(), "answer");
  }
  assert_eq!(container.get_aliases().len(), 3);
}

#[test]
fn test_alias_to_unbound_key_is_not_bound() {
  // Alias existence is independent of binding existence.
  let container = Container::new();
  container.alias("nowhere", "stale");

  assert!(container.is_alias("stale"));
  assert!(!container.bound("stale"));
  assert!(matches!(
    container.make::<u8>("stale"),
    Err(ContainerError::NotBound { key }) if key == BindingKey::from("nowhere")
  ));
}

#[test]
fn test_alias_overwrites_previous_target() {
  let container = Container::new();
  container.instance("one", 1_u8).instance("two", 2_u8);
  container.alias("one", "n").alias("two", "n");

  assert_eq!(*container.make::<u8>("n").unwrap(), 2);
}

#[test]
fn test_alias_of_an_alias_points_at_the_real_key() {
  // Arrange
  let container = Container::new();
  container.instance("config", 9_u8).alias("config", "cfg");

  // Act
  container.alias("cfg", "settings");

  // Assert
  assert_eq!(container.get_alias_key("settings"), Some(BindingKey::from("config")));
  assert_eq!(*container.make::<u8>("settings").unwrap(), 9);
}

#[test]
fn test_unalias_removes_only_the_alias() {
  let container = Container::new();
  container.instance("k", 1_u8).alias("k", "a");

  assert_eq!(container.unalias("a"), Some(BindingKey::from("k")));
  assert!(!container.bound("a"));
  assert!(container.bound("k"));
}

#[test]
fn test_unbound_key_fails() {
  let container = Container::new();

  assert!(!container.bound("missing"));
  assert!(!container.has("missing"));
  assert!(matches!(
    container.make::<u8>("missing"),
    Err(ContainerError::NotBound { .. })
  ));
}

#[test]
fn test_bound_and_has_follow_aliases() {
  let container = Container::new();
  container.instance(true, 1_u8).alias(true, "yes");

  assert!(container.bound(true));
  assert!(container.has("yes"));
}

#[test]
fn test_empty_instance_is_unresolvable() {
  let container = Container::new();
  container.bind("nothing", Instance::empty());

  assert!(container.bound("nothing"));
  assert!(matches!(
    container.make_any("nothing"),
    Err(ContainerError::Unresolvable { .. })
  ));
}

#[test]
fn test_wrong_type_is_a_type_mismatch() {
  let container = Container::new();
  container.instance("port", 8080_u16);

  match container.make::<String>("port") {
    Err(ContainerError::TypeMismatch { expected, .. }) => {
      assert_eq!(expected, std::any::type_name::<String>());
    }
    other => panic!("expected a type mismatch, got {:?}", other.map(|_| ())),
  }
}

#[test]
fn test_instance_arc_preserves_identity() {
  let shared = Arc::new(String::from("shared config data"));
  let container = Container::new();
  container.instance_arc("shared", shared.clone());

  let resolved = container.make::<String>("shared").unwrap();
  assert!(Arc::ptr_eq(&shared, &resolved));
}

#[test]
fn test_key_kinds_are_distinct() {
  // Arrange
  let container = Container::new();
  let symbol = Symbol::new("db");
  let object = Arc::new(Connection);
  container
    .instance(1, "number")
    .instance(true, "bool")
    .instance("1", "string")
    .instance(&symbol, "symbol")
    .instance(ObjectKey::new(object.clone()), "object")
    .instance(BindingKey::of::<Connection>(), "type");

  // Act & Assert
  assert_eq!(container.len(), 6);
  assert_eq!(*container.make::<&str>(1).unwrap(), "number");
  assert_eq!(*container.make::<&str>(true).unwrap(), "bool");
  assert_eq!(*container.make::<&str>("1").unwrap(), "string");
  assert_eq!(*container.make::<&str>(&symbol).unwrap(), "symbol");
  assert_eq!(
    *container.make::<&str>(ObjectKey::new(object)).unwrap(),
    "object"
  );
  assert_eq!(
    *container.make::<&str>(BindingKey::of::<Connection>()).unwrap(),
    "type"
  );

  // A symbol with the same description is a different key.
  assert!(!container.bound(Symbol::new("db")));
  // So is an equal but distinct object.
  assert!(!container.bound(ObjectKey::new(Arc::new(Connection))));
}

#[test]
fn test_factory_is_lazy_and_reresolves() {
  // Arrange
  let calls = Arc::new(AtomicUsize::new(0));
  let counter = calls.clone();
  let container = Container::new();
  container.binding("fresh", move |_| {
    Ok(counter.fetch_add(1, Ordering::SeqCst))
  });

  // Act
  let factory = container.factory::<usize>("fresh");

  // Assert
  assert_eq!(calls.load(Ordering::SeqCst), 0);
  assert_eq!(*factory().unwrap(), 0);
  assert_eq!(*factory().unwrap(), 1);
  assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn test_factory_over_singleton_returns_cached_value() {
  let container = Container::new();
  container.singleton("db", |_| Ok(Connection));

  let factory = container.factory::<Connection>("db");
  assert!(Arc::ptr_eq(&factory().unwrap(), &factory().unwrap()));
}

#[test]
fn test_factory_sees_later_registrations() {
  let container = Container::new();
  let factory = container.factory::<u8>("late");
  assert!(factory().is_err());

  container.instance("late", 9_u8);
  assert_eq!(*factory().unwrap(), 9);
}

#[test]
fn test_clear_resets_bindings_and_aliases() {
  // Arrange
  let container = Container::new();
  container
    .instance("a", 1_u8)
    .singleton("b", |_| Ok(2_u8))
    .binding("c", |_| Ok(3_u8))
    .alias("a", "alias_a");

  // Act
  container.clear();

  // Assert
  assert!(container.get_bindings().is_empty());
  assert!(container.get_aliases().is_empty());
  assert!(container.is_empty());
  for key in ["a", "b", "c", "alias_a"] {
    assert!(!container.bound(key));
  }
}

#[test]
fn test_forget_removes_one_binding() {
  let container = Container::new();
  container.instance("a", 1_u8).instance("b", 2_u8).alias("a", "first");

  assert!(container.forget("first"));
  assert!(!container.forget("a"));
  assert!(!container.bound("a"));
  assert!(container.bound("b"));
}

#[test]
fn test_snapshots_do_not_mutate_container() {
  let container = Container::new();
  container.instance("a", 1_u8).alias("a", "x");

  let mut bindings = container.get_bindings();
  let mut aliases = container.get_aliases();
  bindings.clear();
  aliases.clear();

  assert!(container.bound("a"));
  assert!(container.is_alias("x"));
}

#[test]
fn test_end_to_end_singleton_then_clear() {
  let container = Container::new();
  container.singleton("db", |_| Ok(Connection));

  let first = container.make::<Connection>("db").unwrap();
  let second = container.make::<Connection>("db").unwrap();
  assert!(Arc::ptr_eq(&first, &second));

  container.clear();
  assert!(matches!(
    container.make::<Connection>("db"),
    Err(ContainerError::NotBound { .. })
  ));
}
