//! Module registry resolving descriptors into native loggers

use super::descriptor::ModuleDescriptor;
use crate::backends::{ConsoleLogger, JsonLogger};
use crate::core::{AdapterError, NativeLogger, Result};
use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

pub const CONSOLE_MODULE: &str = "console-logger";
pub const CONSOLE_CONSTRUCTOR: &str = "ConsoleLogger";
pub const JSON_MODULE: &str = "json-logger";
pub const JSON_CONSTRUCTOR: &str = "JsonLogger";

/// Synchronous constructor taking the descriptor's `paramsArray`
pub type ConstructorFn = dyn Fn(&[Value]) -> Result<Arc<dyn NativeLogger>> + Send + Sync;

/// Constructor that must be awaited
///
/// # Example
///
/// ```
/// use rust_logger_adapter::module::AsyncConstructor;
/// use rust_logger_adapter::backends::ConsoleLogger;
/// use rust_logger_adapter::core::{NativeLogger, Result};
/// use async_trait::async_trait;
/// use serde_json::Value;
/// use std::sync::Arc;
///
/// struct SlowConsole;
///
/// #[async_trait]
/// impl AsyncConstructor for SlowConsole {
///     async fn construct(&self, _params: &[Value]) -> Result<Arc<dyn NativeLogger>> {
///         tokio::time::sleep(std::time::Duration::from_millis(1)).await;
///         Ok(Arc::new(ConsoleLogger::new()))
///     }
/// }
/// ```
#[async_trait]
pub trait AsyncConstructor: Send + Sync {
    async fn construct(&self, params: &[Value]) -> Result<Arc<dyn NativeLogger>>;
}

#[derive(Clone)]
enum Constructor {
    Sync(Arc<ConstructorFn>),
    Async(Arc<dyn AsyncConstructor>),
}

impl Constructor {
    fn kind(&self) -> &'static str {
        match self {
            Constructor::Sync(_) => "synchronous",
            Constructor::Async(_) => "asynchronous",
        }
    }
}

/// Named modules, each exporting named native logger constructors.
pub struct ModuleRegistry {
    modules: RwLock<HashMap<String, HashMap<String, Constructor>>>,
}

impl ModuleRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            modules: RwLock::new(HashMap::new()),
        }
    }

    /// Create a registry holding the built-in console and JSON modules
    pub fn with_builtins() -> Self {
        let registry = Self::new();
        registry.register(CONSOLE_MODULE, CONSOLE_CONSTRUCTOR, |params| {
            Ok(Arc::new(ConsoleLogger::from_params(params)?))
        });
        registry.register(JSON_MODULE, JSON_CONSTRUCTOR, |params| {
            Ok(Arc::new(JsonLogger::from_params(params)?))
        });
        registry
    }

    /// Process-wide registry used by [`LoggerAdapter::new`](crate::core::LoggerAdapter::new)
    pub fn global() -> Arc<ModuleRegistry> {
        static GLOBAL: OnceLock<Arc<ModuleRegistry>> = OnceLock::new();
        Arc::clone(GLOBAL.get_or_init(|| Arc::new(ModuleRegistry::with_builtins())))
    }

    /// Register a synchronous constructor, replacing any previous one
    pub fn register<F>(&self, module: impl Into<String>, constructor: impl Into<String>, factory: F)
    where
        F: Fn(&[Value]) -> Result<Arc<dyn NativeLogger>> + Send + Sync + 'static,
    {
        self.insert(module.into(), constructor.into(), Constructor::Sync(Arc::new(factory)));
    }

    /// Register an asynchronous constructor, replacing any previous one
    pub fn register_async<C>(
        &self,
        module: impl Into<String>,
        constructor: impl Into<String>,
        factory: C,
    ) where
        C: AsyncConstructor + 'static,
    {
        self.insert(module.into(), constructor.into(), Constructor::Async(Arc::new(factory)));
    }

    fn insert(&self, module: String, constructor: String, entry: Constructor) {
        self.modules
            .write()
            .entry(module)
            .or_default()
            .insert(constructor, entry);
    }

    pub fn contains(&self, module: &str) -> bool {
        self.modules.read().contains_key(module)
    }

    fn lookup(&self, descriptor: &ModuleDescriptor) -> Result<Constructor> {
        let modules = self.modules.read();
        let constructors = modules
            .get(&descriptor.module_name)
            .ok_or_else(|| AdapterError::module_not_found(&descriptor.module_name))?;
        constructors
            .get(&descriptor.constructor_name)
            .cloned()
            .ok_or_else(|| {
                AdapterError::constructor_not_found(
                    &descriptor.module_name,
                    &descriptor.constructor_name,
                )
            })
    }

    /// Resolve without awaiting. Fails for asynchronous constructors.
    pub fn resolve_sync(&self, descriptor: &ModuleDescriptor) -> Result<Arc<dyn NativeLogger>> {
        match self.lookup(descriptor)? {
            Constructor::Sync(factory) => run_guarded(descriptor, || factory(&descriptor.params_array)),
            other => Err(AdapterError::ConstructorMismatch {
                module: descriptor.module_name.clone(),
                constructor: descriptor.constructor_name.clone(),
                expected: "synchronous",
                actual: other.kind(),
            }),
        }
    }

    /// Resolve a descriptor with either constructor kind.
    ///
    /// Panics inside an asynchronous constructor are not caught here; the
    /// adapter runs this future as its own task and reports a join failure.
    pub async fn resolve(&self, descriptor: &ModuleDescriptor) -> Result<Arc<dyn NativeLogger>> {
        match self.lookup(descriptor)? {
            Constructor::Sync(factory) => run_guarded(descriptor, || factory(&descriptor.params_array)),
            Constructor::Async(factory) => factory
                .construct(&descriptor.params_array)
                .await
                .map_err(|e| wrap_failure(descriptor, e)),
        }
    }
}

impl Default for ModuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Run a synchronous constructor, turning errors and panics into `ConstructorFailed`
fn run_guarded<F>(descriptor: &ModuleDescriptor, factory: F) -> Result<Arc<dyn NativeLogger>>
where
    F: FnOnce() -> Result<Arc<dyn NativeLogger>>,
{
    match std::panic::catch_unwind(std::panic::AssertUnwindSafe(factory)) {
        Ok(Ok(logger)) => Ok(logger),
        Ok(Err(e)) => Err(wrap_failure(descriptor, e)),
        Err(panic_info) => Err(AdapterError::constructor_failed(
            &descriptor.module_name,
            &descriptor.constructor_name,
            format!("panicked: {}", panic_message(&*panic_info)),
        )),
    }
}

fn wrap_failure(descriptor: &ModuleDescriptor, error: AdapterError) -> AdapterError {
    match error {
        AdapterError::ConstructorFailed { .. } => error,
        other => AdapterError::constructor_failed(
            &descriptor.module_name,
            &descriptor.constructor_name,
            other.to_string(),
        ),
    }
}

pub(crate) fn panic_message(panic_info: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = panic_info.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic_info.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}
