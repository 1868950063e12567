use fibre_container::{Container, ContainerConfig, ContainerError};
use pretty_assertions::assert_eq;

#[test]
fn test_defaults() {
  let config = ContainerConfig::default();
  assert_eq!(config.name, "default");
  assert_eq!(config.capacity, 0);
  assert_eq!(Container::new().name(), "default");
}

#[test]
fn test_parse_full_yaml() {
  let yaml = r#"
name: bootstrap
capacity: 64
alias_capacity: 8
"#;
  let config = ContainerConfig::from_yaml_str(yaml).unwrap();
  assert_eq!(
    config,
    ContainerConfig {
      name: "bootstrap".to_string(),
      capacity: 64,
      alias_capacity: 8,
    }
  );
}

#[test]
fn test_missing_fields_fall_back_to_defaults() {
  let config = ContainerConfig::from_yaml_str("capacity: 4").unwrap();
  assert_eq!(config.name, "default");
  assert_eq!(config.capacity, 4);
}

#[test]
fn test_unknown_fields_are_rejected() {
  let result = ContainerConfig::from_yaml_str("name: x\nthreads: 4\n");
  assert!(matches!(result, Err(ContainerError::Config(_))));
}

#[test]
fn test_with_config_applies_name() {
  let container = Container::with_config(ContainerConfig::named("workers"));
  container.instance("k", 1_u8);
  assert_eq!(container.name(), "workers");
  assert!(container.bound("k"));
}
