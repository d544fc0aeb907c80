//! Example: wiring a small application with the container
//!
//! Shows autowiring, singletons, contextual bindings, method injection and
//! service providers. Run with `RUST_LOG=elif_container=trace` to watch the
//! resolution engine at work.

use std::sync::Arc;

use elif_container::{
    CallTarget, ClassDescriptor, Container, ContainerConfig, ContainerError, Injectable, Instance, MethodDescriptor,
    ParameterSpec, Parameters, ProviderRegistry, ResolvedArguments, ServiceProvider,
};
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
struct Database {
    dsn: String,
}

impl Injectable for Database {
    fn class_name() -> &'static str {
        "Database"
    }

    fn parameters() -> Vec<ParameterSpec> {
        vec![ParameterSpec::primitive("dsn").with_default(Instance::new("sqlite::memory:".to_string()))]
    }

    fn create(args: ResolvedArguments) -> Result<Self, ContainerError> {
        Ok(Database { dsn: args.value(0)? })
    }
}

struct UserRepository {
    database: Arc<Database>,
}

impl Injectable for UserRepository {
    fn class_name() -> &'static str {
        "UserRepository"
    }

    fn parameters() -> Vec<ParameterSpec> {
        vec![ParameterSpec::class("database", "Database")]
    }

    fn create(args: ResolvedArguments) -> Result<Self, ContainerError> {
        Ok(UserRepository { database: args.get(0)? })
    }
}

struct AnalyticsRepository {
    database: Arc<Database>,
}

impl Injectable for AnalyticsRepository {
    fn class_name() -> &'static str {
        "AnalyticsRepository"
    }

    fn parameters() -> Vec<ParameterSpec> {
        vec![ParameterSpec::class("database", "Database")]
    }

    fn create(args: ResolvedArguments) -> Result<Self, ContainerError> {
        Ok(AnalyticsRepository { database: args.get(0)? })
    }
}

struct UserController;

struct DatabaseProvider;

impl ServiceProvider for DatabaseProvider {
    fn name(&self) -> &'static str {
        "database"
    }

    fn register(&self, container: &Container) -> Result<(), ContainerError> {
        container.register::<Database>();
        container.singleton("Database", "Database")?;
        container.alias("Database", "db")
    }
}

struct RepositoryProvider;

impl ServiceProvider for RepositoryProvider {
    fn name(&self) -> &'static str {
        "repositories"
    }

    fn dependencies(&self) -> Vec<&'static str> {
        vec!["database"]
    }

    fn register(&self, container: &Container) -> Result<(), ContainerError> {
        container.register::<UserRepository>();
        container.register::<AnalyticsRepository>();
        container
            .when("AnalyticsRepository")
            .needs("db")
            .give_value(Database {
                dsn: "postgres://analytics".to_string(),
            })
    }

    fn boot(&self, container: &Container) -> Result<(), ContainerError> {
        container.declare(
            ClassDescriptor::concrete("UserController", |_| Ok(Instance::new(UserController)))
                .method(
                    "show",
                    MethodDescriptor::instance(
                        vec![
                            ParameterSpec::class("users", "UserRepository"),
                            ParameterSpec::primitive("id"),
                        ],
                        |_, args| {
                            let users = args.get::<UserRepository>(0)?;
                            let id = args.value::<u64>(1)?;
                            Ok(Instance::new(format!("user {} from {}", id, users.database.dsn)))
                        },
                    ),
                ),
        );
        Ok(())
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let container = Container::with_config(ContainerConfig::from_env()?);
    let mut providers = ProviderRegistry::new();
    providers.register(RepositoryProvider);
    providers.register(DatabaseProvider);
    providers.register_all(&container)?;
    providers.boot_all(&container)?;

    let users = container.make_as::<UserRepository>("UserRepository")?;
    let analytics = container.make_as::<AnalyticsRepository>("AnalyticsRepository")?;
    println!("users use {}", users.database.dsn);
    println!("analytics use {}", analytics.database.dsn);

    let shown = container.call(
        "UserController@show",
        Parameters::new().with_value("id", 7u64),
        None,
    )?;
    println!("{}", shown.downcast::<String>()?);

    let controller = container.make("UserController")?;
    let again = container.call(
        CallTarget::method(controller, "show"),
        Parameters::new().with_value("id", 8u64),
        None,
    )?;
    println!("{}", again.downcast::<String>()?);

    println!("bindings: {:?}", container.get_bindings());
    Ok(())
}
