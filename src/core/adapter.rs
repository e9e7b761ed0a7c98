//! Deferred-backend logger facade
//!
//! A [`LoggerAdapter`] is usable as soon as it is built. When the execution
//! context names a module instead of an instance, records go to a console
//! fallback until the module resolves, after which the active logger is
//! swapped atomically. Calls are never buffered or replayed: each call is
//! served by whichever logger is active at that moment.

use super::{
    attributes::{render_attributes, OwnerLabels},
    error::{AdapterError, Result},
    execution_context::{BackendSelection, LogExecutionContext, LogLevelManagement},
    log_level::LogLevel,
    log_record::LogRecord,
    metrics::AdapterMetrics,
    native_logger::NativeLogger,
};
use crate::backends::ConsoleLogger;
use crate::module::registry::panic_message;
use crate::module::{ModuleDescriptor, ModuleRegistry};
use arc_swap::ArcSwap;
use serde_json::{json, Value};
use std::sync::Arc;
use std::thread;
use tokio::sync::watch;

/// Failures are reported on the first occurrence and every this many thereafter
const FAILURE_ALERT_INTERVAL: u64 = 1000;

/// Which logger currently serves emission calls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdapterState {
    /// The console fallback; initial state in descriptor-mode
    FallbackActive,
    /// The native logger; terminal
    BackendActive,
}

/// Progress of native logger resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionStatus {
    /// An instance was supplied; nothing to resolve
    Native,
    /// Resolution has started and not finished
    Pending,
    /// The resolved logger is active
    Resolved,
    /// Resolution failed; the fallback stays active
    Failed(String),
}

impl ResolutionStatus {
    pub fn is_pending(&self) -> bool {
        matches!(self, ResolutionStatus::Pending)
    }
}

struct ActiveLogger {
    logger: Arc<dyn NativeLogger>,
    state: AdapterState,
}

/// State shared between the adapter and its resolution task
struct Inner {
    attributes: Value,
    level: LogLevel,
    fallback: Arc<dyn NativeLogger>,
    active: ArcSwap<ActiveLogger>,
    status: watch::Sender<ResolutionStatus>,
    metrics: AdapterMetrics,
}

impl Inner {
    /// Apply the outcome of resolution exactly once.
    ///
    /// Deferred resolutions announce the switch through the new backend.
    fn settle(&self, descriptor: &ModuleDescriptor, result: Result<Arc<dyn NativeLogger>>, deferred: bool) {
        match result {
            Ok(logger) => {
                let current = self.active.load_full();
                if current.state == AdapterState::FallbackActive {
                    let next = Arc::new(ActiveLogger {
                        logger,
                        state: AdapterState::BackendActive,
                    });
                    let previous = self.active.compare_and_swap(&current, next);
                    if Arc::ptr_eq(&*previous, &current) {
                        self.metrics.record_swap();
                        if deferred {
                            self.notice(
                                format!("Native logger module '{}' loaded dynamically", descriptor.module_name),
                                json!({
                                    "moduleName": descriptor.module_name,
                                    "constructorName": descriptor.constructor_name,
                                }),
                            );
                        }
                    }
                }
                self.status.send_replace(ResolutionStatus::Resolved);
            }
            Err(e) => {
                self.warn_via_fallback(
                    format!(
                        "Native logger module '{}' could not be resolved, staying on fallback: {}",
                        descriptor.module_name, e
                    ),
                    json!({
                        "moduleName": descriptor.module_name,
                        "constructorName": descriptor.constructor_name,
                    }),
                );
                self.status.send_replace(ResolutionStatus::Failed(e.to_string()));
            }
        }
    }

    fn report_failure(&self, active: &ActiveLogger, reason: String) {
        let previous = self.metrics.record_failure();

        let should_alert = previous == 0 || (previous + 1) % FAILURE_ALERT_INTERVAL == 0;
        if !should_alert {
            return;
        }

        let error = AdapterError::emission(active.logger.name(), reason);
        if active.state == AdapterState::FallbackActive {
            eprintln!("[LOGGER ERROR] Fallback unusable: {} (failures: {})", error, previous + 1);
            return;
        }

        self.warn_via_fallback(error.to_string(), json!({ "failures": previous + 1 }));
    }

    /// Debug-level progress record through whichever logger is active
    fn notice(&self, message: String, data: Value) {
        if LogLevel::Debug < self.level {
            return;
        }

        let record = LogRecord::new(LogLevel::Debug, message)
            .with_attributes(self.attributes.clone())
            .with_data(data);
        let active = self.active.load_full();
        match std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| active.logger.log(&record))) {
            Ok(Ok(())) => {}
            Ok(Err(e)) => eprintln!("[LOGGER ERROR] Notice via '{}' failed: {}", active.logger.name(), e),
            Err(panic_info) => eprintln!(
                "[LOGGER CRITICAL] Notice via '{}' panicked: {}",
                active.logger.name(),
                panic_message(&*panic_info)
            ),
        }
    }

    fn warn_via_fallback(&self, message: String, data: Value) {
        let record = LogRecord::new(LogLevel::Warn, message)
            .with_attributes(self.attributes.clone())
            .with_data(data);

        match std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| self.fallback.log(&record))) {
            Ok(Ok(())) => {}
            Ok(Err(e)) => eprintln!("[LOGGER ERROR] Fallback logger failed: {}", e),
            Err(panic_info) => eprintln!(
                "[LOGGER CRITICAL] Fallback logger panicked: {}",
                panic_message(&*panic_info)
            ),
        }
    }
}

/// Stable logging interface over a native logger that may arrive later.
///
/// # Example
///
/// ```
/// use rust_logger_adapter::prelude::*;
/// use serde_json::json;
///
/// let ctx = LogExecutionContext::console();
/// let log = LoggerAdapter::new(&ctx, "examples", "index", "main").unwrap();
///
/// log.info(json!({"hello": "world"}), "This is example output");
/// assert_eq!(log.state(), AdapterState::BackendActive);
/// ```
pub struct LoggerAdapter {
    inner: Arc<Inner>,
    level: LogLevel,
    level_management: LogLevelManagement,
}

impl LoggerAdapter {
    /// Build an adapter resolving modules through [`ModuleRegistry::global`]
    pub fn new(
        ctx: &LogExecutionContext,
        repo: impl Into<String>,
        source: impl Into<String>,
        method: impl Into<String>,
    ) -> Result<Self> {
        Self::builder(ctx).repo(repo).source(source).method(method).build()
    }

    /// Create a builder; the context is copied, never mutated
    #[must_use]
    pub fn builder(ctx: &LogExecutionContext) -> LoggerAdapterBuilder {
        LoggerAdapterBuilder::new(ctx)
    }

    pub fn log(&self, level: LogLevel, data: Value, message: impl Into<String>) {
        let active = self.inner.active.load_full();

        // The fallback is not the native logger, so the adapter applies the level for it
        let adapter_filters = self.level_management == LogLevelManagement::Adapter
            || active.state == AdapterState::FallbackActive;
        if adapter_filters && level < self.level {
            self.inner.metrics.record_filtered();
            return;
        }

        let record = LogRecord::new(level, message)
            .with_attributes(self.inner.attributes.clone())
            .with_data(data);

        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            active.logger.log(&record)
        }));

        match outcome {
            Ok(Ok(())) => {
                match active.state {
                    AdapterState::FallbackActive => self.inner.metrics.record_fallback(),
                    AdapterState::BackendActive => self.inner.metrics.record_backend(),
                };
            }
            Ok(Err(e)) => self.inner.report_failure(&active, e.to_string()),
            Err(panic_info) => self
                .inner
                .report_failure(&active, format!("panicked: {}", panic_message(&*panic_info))),
        }
    }

    #[inline]
    pub fn trace(&self, data: Value, message: impl Into<String>) {
        self.log(LogLevel::Trace, data, message);
    }

    #[inline]
    pub fn debug(&self, data: Value, message: impl Into<String>) {
        self.log(LogLevel::Debug, data, message);
    }

    #[inline]
    pub fn info(&self, data: Value, message: impl Into<String>) {
        self.log(LogLevel::Info, data, message);
    }

    #[inline]
    pub fn warn(&self, data: Value, message: impl Into<String>) {
        self.log(LogLevel::Warn, data, message);
    }

    #[inline]
    pub fn error(&self, data: Value, message: impl Into<String>) {
        self.log(LogLevel::Error, data, message);
    }

    /// Flush the active logger; failures are reported, never returned
    pub fn flush(&self) {
        let active = self.inner.active.load_full();
        match std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| active.logger.flush())) {
            Ok(Ok(())) => {}
            Ok(Err(e)) => self.inner.report_failure(&active, format!("flush: {}", e)),
            Err(panic_info) => self.inner.report_failure(
                &active,
                format!("panicked during flush: {}", panic_message(&*panic_info)),
            ),
        }
    }

    pub fn state(&self) -> AdapterState {
        self.inner.active.load().state
    }

    pub fn resolution_status(&self) -> ResolutionStatus {
        self.inner.status.borrow().clone()
    }

    /// Wait until resolution is no longer pending.
    ///
    /// Returns immediately in instance-mode or once resolution has finished.
    /// A resolution that never completes keeps this future pending.
    pub async fn settled(&self) -> ResolutionStatus {
        let mut status = self.inner.status.subscribe();
        // Bound to a local so the borrowed `Ref` is dropped before `status`
        let settled = match status.wait_for(|s| !s.is_pending()).await {
            Ok(settled) => (*settled).clone(),
            Err(_) => self.resolution_status(),
        };
        settled
    }

    /// Name of the logger currently serving calls
    pub fn active_logger_name(&self) -> String {
        self.inner.active.load().logger.name().to_string()
    }

    /// Static attributes attached to every record
    pub fn attributes(&self) -> &Value {
        &self.inner.attributes
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    pub fn level_management(&self) -> LogLevelManagement {
        self.level_management
    }

    pub fn metrics(&self) -> &AdapterMetrics {
        &self.inner.metrics
    }
}

/// Builder for constructing a [`LoggerAdapter`]
///
/// # Example
/// ```
/// use rust_logger_adapter::prelude::*;
/// use std::sync::Arc;
///
/// let ctx = LogExecutionContext::json_base();
/// let log = LoggerAdapter::builder(&ctx)
///     .repo("examples")
///     .source("index")
///     .method("passed by parameter")
///     .native_logger(Arc::new(ConsoleLogger::new()))
///     .build()
///     .unwrap();
///
/// assert_eq!(log.resolution_status(), ResolutionStatus::Native);
/// ```
pub struct LoggerAdapterBuilder {
    ctx: LogExecutionContext,
    labels: OwnerLabels,
    native_logger: Option<Arc<dyn NativeLogger>>,
    registry: Option<Arc<ModuleRegistry>>,
    fallback: Option<Arc<dyn NativeLogger>>,
}

impl LoggerAdapterBuilder {
    pub fn new(ctx: &LogExecutionContext) -> Self {
        Self {
            ctx: ctx.clone(),
            labels: OwnerLabels::default(),
            native_logger: None,
            registry: None,
            fallback: None,
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn repo(mut self, repo: impl Into<String>) -> Self {
        self.labels.repo = repo.into();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.labels.source = source.into();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.labels.method = method.into();
        self
    }

    /// Use this logger regardless of the context's selection
    #[must_use = "builder methods return a new value"]
    pub fn native_logger(mut self, logger: Arc<dyn NativeLogger>) -> Self {
        self.native_logger = Some(logger);
        self
    }

    /// Resolve modules through this registry instead of the global one
    #[must_use = "builder methods return a new value"]
    pub fn registry(mut self, registry: Arc<ModuleRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Replace the console fallback
    #[must_use = "builder methods return a new value"]
    pub fn fallback(mut self, fallback: Arc<dyn NativeLogger>) -> Self {
        self.fallback = Some(fallback);
        self
    }

    /// Build the adapter.
    ///
    /// Fails only for configuration errors. Resolution errors leave the
    /// adapter on its fallback and are reported through it.
    pub fn build(self) -> Result<LoggerAdapter> {
        let selection = match self.native_logger {
            Some(logger) => BackendSelection::Instance(logger),
            None => self.ctx.backend_selection()?,
        };

        let fallback = self
            .fallback
            .unwrap_or_else(|| Arc::new(default_fallback(&self.ctx)));
        let attributes = render_attributes(&self.labels, &self.ctx);

        let (active, status, pending) = match selection {
            BackendSelection::Instance(logger) => (
                ActiveLogger {
                    logger,
                    state: AdapterState::BackendActive,
                },
                ResolutionStatus::Native,
                None,
            ),
            BackendSelection::Module(descriptor) => (
                ActiveLogger {
                    logger: Arc::clone(&fallback),
                    state: AdapterState::FallbackActive,
                },
                ResolutionStatus::Pending,
                Some(descriptor),
            ),
        };

        let (status_tx, _) = watch::channel(status);
        let inner = Arc::new(Inner {
            attributes,
            level: self.ctx.log.level,
            fallback,
            active: ArcSwap::from_pointee(active),
            status: status_tx,
            metrics: AdapterMetrics::new(),
        });

        if let Some(descriptor) = pending {
            let registry = self.registry.unwrap_or_else(ModuleRegistry::global);
            if descriptor.is_deferred() {
                inner.notice(
                    format!(
                        "Native logger module '{}' loads asynchronously; using the console fallback until it loads",
                        descriptor.module_name
                    ),
                    json!({
                        "moduleName": descriptor.module_name,
                        "moduleResolution": descriptor.module_resolution,
                    }),
                );
                spawn_resolution(Arc::clone(&inner), registry, descriptor);
            } else {
                let result = registry.resolve_sync(&descriptor);
                inner.settle(&descriptor, result, false);
            }
        }

        Ok(LoggerAdapter {
            inner,
            level: self.ctx.log.level,
            level_management: self.ctx.log.log_level_management,
        })
    }
}

/// Console fallback used when the builder is given none.
///
/// Its threshold never exceeds `Warn` so the adapter's own warnings always
/// get through; caller records are filtered by the adapter while it is active.
fn default_fallback(ctx: &LogExecutionContext) -> ConsoleLogger {
    ConsoleLogger::new().with_min_level(ctx.log.level.min(LogLevel::Warn))
}

/// Resolve a deferred descriptor off the caller's path.
///
/// Runs on the ambient tokio runtime when there is one; otherwise a
/// dedicated thread drives a current-thread runtime.
fn spawn_resolution(inner: Arc<Inner>, registry: Arc<ModuleRegistry>, descriptor: ModuleDescriptor) {
    enum Driver {
        Ambient(tokio::runtime::Handle),
        Dedicated(tokio::runtime::Runtime),
    }

    let driver = match tokio::runtime::Handle::try_current() {
        Ok(handle) => Driver::Ambient(handle),
        Err(_) => match tokio::runtime::Builder::new_current_thread().enable_time().build() {
            Ok(runtime) => Driver::Dedicated(runtime),
            Err(e) => {
                let error = AdapterError::io_operation("starting resolver runtime", "cannot build runtime", e);
                inner.settle(&descriptor, Err(error), true);
                return;
            }
        },
    };

    let task_inner = Arc::clone(&inner);
    let task_descriptor = descriptor.clone();
    let task = async move {
        let resolving = {
            let descriptor = task_descriptor.clone();
            tokio::spawn(async move { registry.resolve(&descriptor).await })
        };
        let result = match resolving.await {
            Ok(result) => result,
            Err(join_error) => {
                let reason = if join_error.is_panic() {
                    format!("panicked: {}", panic_message(&*join_error.into_panic()))
                } else {
                    "resolution task was cancelled".to_string()
                };
                Err(AdapterError::constructor_failed(
                    &task_descriptor.module_name,
                    &task_descriptor.constructor_name,
                    reason,
                ))
            }
        };
        task_inner.settle(&task_descriptor, result, true);
    };

    match driver {
        Driver::Ambient(handle) => {
            handle.spawn(task);
        }
        Driver::Dedicated(runtime) => {
            let spawned = thread::Builder::new()
                .name("logger-adapter-resolver".to_string())
                .spawn(move || runtime.block_on(task));
            if let Err(e) = spawned {
                let error = AdapterError::io_operation("spawning resolver thread", "cannot spawn", e);
                inner.settle(&descriptor, Err(error), true);
            }
        }
    }
}
