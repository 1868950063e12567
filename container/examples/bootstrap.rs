use fibre_container::{Container, ContainerConfig, Result};
use tracing_subscriber::EnvFilter;

struct Settings {
  database_url: String,
}

struct Connection {
  url: String,
}

struct UserRepository {
  connection: std::sync::Arc<Connection>,
}

// The composition root: everything is wired against one explicit container.
fn wire(container: &Container) -> &Container {
  container
    .instance(
      "settings",
      Settings {
        database_url: "postgres://localhost/app".to_string(),
      },
    )
    .singleton("db", |c| {
      let settings = c.make::<Settings>("settings")?;
      println!("Opening connection to {}", settings.database_url);
      Ok(Connection {
        url: settings.database_url.clone(),
      })
    })
    .binding("users", |c| {
      Ok(UserRepository {
        connection: c.make::<Connection>("db")?,
      })
    })
}

fn main() -> Result<()> {
  // RUST_LOG overrides the default filter, e.g. RUST_LOG=fibre_container=debug.
  let filter = EnvFilter::try_from_default_env()
    .unwrap_or_else(|_| EnvFilter::new("fibre_container=trace"));
  tracing_subscriber::fmt().with_env_filter(filter).init();

  let config = ContainerConfig::from_yaml_str("name: bootstrap\ncapacity: 8\n")?;
  let container = Container::with_config(config);
  wire(&container);

  let repo = container.make::<UserRepository>("users")?;
  println!("Repository uses {}", repo.connection.url);

  // Tear down at shutdown.
  container.clear();
  Ok(())
}
