//! Class fixtures shared by the integration tests

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use elif_container::container::{Callable, ClassDescriptor, MethodDescriptor, ParameterSpec};
use elif_container::{Container, ContainerError, Injectable, Instance, ResolvedArguments};

#[derive(Debug)]
pub struct Clock;

impl Injectable for Clock {
    fn class_name() -> &'static str {
        "Clock"
    }

    fn create(_args: ResolvedArguments) -> Result<Self, ContainerError> {
        Ok(Clock)
    }
}

#[derive(Debug)]
pub struct PostgresRepository;

impl Injectable for PostgresRepository {
    fn class_name() -> &'static str {
        "PostgresRepository"
    }

    fn implements() -> Vec<&'static str> {
        vec!["Repository"]
    }

    fn create(_args: ResolvedArguments) -> Result<Self, ContainerError> {
        Ok(PostgresRepository)
    }
}

#[derive(Debug)]
pub struct SqliteRepository;

impl Injectable for SqliteRepository {
    fn class_name() -> &'static str {
        "SqliteRepository"
    }

    fn implements() -> Vec<&'static str> {
        vec!["Repository"]
    }

    fn create(_args: ResolvedArguments) -> Result<Self, ContainerError> {
        Ok(SqliteRepository)
    }
}

/// Depends on the `Repository` interface
pub struct UserService {
    pub repository: Instance,
}

impl Injectable for UserService {
    fn class_name() -> &'static str {
        "UserService"
    }

    fn parameters() -> Vec<ParameterSpec> {
        vec![ParameterSpec::class("repository", "Repository")]
    }

    fn create(args: ResolvedArguments) -> Result<Self, ContainerError> {
        Ok(UserService {
            repository: args.instance(0)?.clone(),
        })
    }
}

pub struct UserController {
    pub service: Arc<UserService>,
}

impl Injectable for UserController {
    fn class_name() -> &'static str {
        "UserController"
    }

    fn parameters() -> Vec<ParameterSpec> {
        vec![ParameterSpec::class("service", "UserService")]
    }

    fn create(args: ResolvedArguments) -> Result<Self, ContainerError> {
        Ok(UserController {
            service: args.get(0)?,
        })
    }
}

/// A class dependency plus a primitive with a default
pub struct Mailer {
    pub clock: Arc<Clock>,
    pub host: String,
}

impl Injectable for Mailer {
    fn class_name() -> &'static str {
        "Mailer"
    }

    fn parameters() -> Vec<ParameterSpec> {
        vec![
            ParameterSpec::class("clock", "Clock"),
            ParameterSpec::primitive("host").with_default(Instance::new("localhost".to_string())),
        ]
    }

    fn create(args: ResolvedArguments) -> Result<Self, ContainerError> {
        Ok(Mailer {
            clock: args.get(0)?,
            host: args.value(1)?,
        })
    }
}

/// Primitives without defaults on either side of a class dependency
pub struct Importer {
    pub source: Instance,
    pub target: Instance,
}

impl Injectable for Importer {
    fn class_name() -> &'static str {
        "Importer"
    }

    fn parameters() -> Vec<ParameterSpec> {
        vec![
            ParameterSpec::primitive("source"),
            ParameterSpec::class("clock", "Clock"),
            ParameterSpec::primitive("target"),
        ]
    }

    fn create(args: ResolvedArguments) -> Result<Self, ContainerError> {
        Ok(Importer {
            source: args.instance(0)?.clone(),
            target: args.instance(2)?.clone(),
        })
    }
}

/// Two consumers of `Repository` used to scope contextual rules
pub struct ReportExporter {
    pub repository: Instance,
}

impl Injectable for ReportExporter {
    fn class_name() -> &'static str {
        "ReportExporter"
    }

    fn parameters() -> Vec<ParameterSpec> {
        vec![ParameterSpec::class("repository", "Repository")]
    }

    fn create(args: ResolvedArguments) -> Result<Self, ContainerError> {
        Ok(ReportExporter {
            repository: args.instance(0)?.clone(),
        })
    }
}

pub struct InvoiceExporter {
    pub repository: Instance,
}

impl Injectable for InvoiceExporter {
    fn class_name() -> &'static str {
        "InvoiceExporter"
    }

    fn parameters() -> Vec<ParameterSpec> {
        vec![ParameterSpec::class("repository", "Repository")]
    }

    fn create(args: ResolvedArguments) -> Result<Self, ContainerError> {
        Ok(InvoiceExporter {
            repository: args.instance(0)?.clone(),
        })
    }
}

/// A class dependency plus a required primitive
pub struct RateLimiter {
    pub limit: Instance,
}

impl Injectable for RateLimiter {
    fn class_name() -> &'static str {
        "RateLimiter"
    }

    fn parameters() -> Vec<ParameterSpec> {
        vec![
            ParameterSpec::class("clock", "Clock"),
            ParameterSpec::primitive("limit"),
        ]
    }

    fn create(args: ResolvedArguments) -> Result<Self, ContainerError> {
        Ok(RateLimiter {
            limit: args.instance(1)?.clone(),
        })
    }
}

/// `Repository` implementation with a required primitive
pub struct CachedRepository {
    pub ttl: Instance,
}

impl Injectable for CachedRepository {
    fn class_name() -> &'static str {
        "CachedRepository"
    }

    fn parameters() -> Vec<ParameterSpec> {
        vec![
            ParameterSpec::class("clock", "Clock"),
            ParameterSpec::primitive("ttl"),
        ]
    }

    fn implements() -> Vec<&'static str> {
        vec!["Repository"]
    }

    fn create(args: ResolvedArguments) -> Result<Self, ContainerError> {
        Ok(CachedRepository {
            ttl: args.instance(1)?.clone(),
        })
    }
}

/// Optional dependency on an interface that is never bound
pub struct AuditLog {
    pub sink: Instance,
}

impl Injectable for AuditLog {
    fn class_name() -> &'static str {
        "AuditLog"
    }

    fn parameters() -> Vec<ParameterSpec> {
        vec![ParameterSpec::class("sink", "LogSink").nullable()]
    }

    fn create(args: ResolvedArguments) -> Result<Self, ContainerError> {
        Ok(AuditLog {
            sink: args.instance(0)?.clone(),
        })
    }
}

/// `Repository` implementation counting its constructions
pub struct CountingRepository;

pub static COUNTING_REPOSITORY_BUILDS: AtomicUsize = AtomicUsize::new(0);

impl Injectable for CountingRepository {
    fn class_name() -> &'static str {
        "CountingRepository"
    }

    fn implements() -> Vec<&'static str> {
        vec!["Repository"]
    }

    fn create(_args: ResolvedArguments) -> Result<Self, ContainerError> {
        COUNTING_REPOSITORY_BUILDS.fetch_add(1, Ordering::SeqCst);
        Ok(CountingRepository)
    }
}

pub struct TaskRunner;

/// Methods mirroring the three call shapes: variadic, injected and unresolvable
pub fn task_runner() -> ClassDescriptor {
    ClassDescriptor::injectable::<TaskRunner>()
        .method(
            "work",
            MethodDescriptor::instance(Vec::new(), |_, args| Ok(Instance::new(args.into_vec()))),
        )
        .method(
            "inject",
            MethodDescriptor::instance(inject_parameters(), |_, args| {
                Ok(Instance::new(args.into_vec()))
            }),
        )
        .method(
            "unresolvable",
            MethodDescriptor::instance(
                vec![ParameterSpec::primitive("first"), ParameterSpec::primitive("second")],
                |_, args| Ok(Instance::new(args.into_vec())),
            ),
        )
}

impl TaskRunner {
    pub fn unresolvable(&self, first: Instance, second: Instance) -> Vec<Instance> {
        vec![first, second]
    }
}

impl Injectable for TaskRunner {
    fn class_name() -> &'static str {
        "TaskRunner"
    }

    fn create(_args: ResolvedArguments) -> Result<Self, ContainerError> {
        Ok(TaskRunner)
    }
}

pub fn inject_parameters() -> Vec<ParameterSpec> {
    vec![
        ParameterSpec::class("clock", "Clock"),
        ParameterSpec::primitive("label").with_default(Instance::new("default".to_string())),
    ]
}

pub fn task_factory() -> ClassDescriptor {
    ClassDescriptor::concrete("TaskFactory", |_| Ok(Instance::new(()))).method(
        "inject",
        MethodDescriptor::static_method(inject_parameters(), |_, args| {
            Ok(Instance::new(args.into_vec()))
        }),
    )
}

pub fn run_task() -> Callable {
    inject_parameters()
        .into_iter()
        .fold(
            Callable::new(|_, args| Ok(Instance::new(args.into_vec()))),
            Callable::param,
        )
}

/// A container with every fixture declared
pub fn container() -> Container {
    let container = Container::new();
    container.register::<Clock>();
    container.declare(ClassDescriptor::interface("Repository"));
    container.register::<PostgresRepository>();
    container.register::<SqliteRepository>();
    container.register::<UserService>();
    container.register::<UserController>();
    container.register::<Mailer>();
    container.register::<Importer>();
    container.register::<ReportExporter>();
    container.register::<InvoiceExporter>();
    container.register::<RateLimiter>();
    container.register::<CachedRepository>();
    container.register::<AuditLog>();
    container.register::<CountingRepository>();
    container.declare(task_runner());
    container.declare(task_factory());
    container.declare_function("run_task", run_task());
    container
}

/// Downcast a `Vec<Instance>` result and read each element as a string slice
pub fn strings(result: &Instance) -> Vec<String> {
    result
        .downcast_ref::<Vec<Instance>>()
        .map(|values| {
            values
                .iter()
                .filter_map(|value| {
                    value
                        .downcast_ref::<String>()
                        .cloned()
                        .or_else(|| value.downcast_ref::<&str>().map(|s| s.to_string()))
                })
                .collect()
        })
        .unwrap_or_default()
}
