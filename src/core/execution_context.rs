//! Execution context handed to every logger adapter
//!
//! The context selects the native logger (an instance, or a module
//! descriptor resolved later) and carries the application and execution
//! metadata attached to every record. It serializes with camelCase keys so
//! the same document can be loaded from JSON configuration.

use super::error::{AdapterError, Result};
use super::log_level::LogLevel;
use super::merge::deep_merge;
use super::native_logger::NativeLogger;
use crate::module::{ModuleDescriptor, CONSOLE_CONSTRUCTOR, CONSOLE_MODULE};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// Application-wide context label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppContext {
    pub app_context: String,
}

impl Default for AppContext {
    fn default() -> Self {
        Self {
            app_context: "Global".to_string(),
        }
    }
}

/// Per-execution correlation identifiers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExecutionMetadata {
    pub thread: String,
    pub request_id: String,
    pub authorization: String,
    pub local_context: String,
}

impl Default for ExecutionMetadata {
    fn default() -> Self {
        Self {
            thread: format!("Thread: {}", Uuid::new_v4()),
            request_id: format!("Request: {}", Uuid::new_v4()),
            authorization: "None".to_string(),
            local_context: "None".to_string(),
        }
    }
}

/// Who applies the minimum level
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevelManagement {
    /// The adapter drops records below `log.level`
    #[default]
    Adapter,
    /// Every record reaches the native logger, which filters on its own
    Native,
}

/// Which static attributes are left out of records
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AttributeVisibility {
    pub hide_app_context: bool,
    pub hide_repo: bool,
    pub hide_source_file: bool,
    pub hide_method: bool,
    pub hide_thread: bool,
    pub hide_request_id: bool,
    pub hide_authorization: bool,
    pub hide_local_context: bool,
}

/// Native logger selection: exactly one of `instance` or `module`
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NativeLoggerConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module: Option<ModuleDescriptor>,
    #[serde(skip)]
    pub instance: Option<Arc<dyn NativeLogger>>,
}

impl fmt::Debug for NativeLoggerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeLoggerConfig")
            .field("module", &self.module)
            .field("instance", &self.instance.as_ref().map(|logger| logger.name()))
            .finish()
    }
}

/// Resolved outcome of validating a [`NativeLoggerConfig`]
#[derive(Clone)]
pub enum BackendSelection {
    Instance(Arc<dyn NativeLogger>),
    Module(ModuleDescriptor),
}

impl NativeLoggerConfig {
    pub fn selection(&self) -> Result<BackendSelection> {
        match (&self.instance, &self.module) {
            (Some(instance), None) => Ok(BackendSelection::Instance(Arc::clone(instance))),
            (None, Some(module)) => {
                module.validate()?;
                Ok(BackendSelection::Module(module.clone()))
            }
            (Some(_), Some(_)) => Err(AdapterError::config(
                "log.nativeLogger",
                "both instance and module are set; choose one",
            )),
            (None, None) => Err(AdapterError::config(
                "log.nativeLogger",
                "neither instance nor module is set",
            )),
        }
    }
}

/// Logging section of the execution context
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LogConfig {
    pub level: LogLevel,
    pub log_level_management: LogLevelManagement,
    pub attributes: AttributeVisibility,
    pub native_logger: NativeLoggerConfig,
}

/// Configuration value object consumed by [`LoggerAdapter`](super::LoggerAdapter)
///
/// # Example
///
/// ```
/// use rust_logger_adapter::core::LogExecutionContext;
/// use rust_logger_adapter::module::{ModuleDescriptor, ModuleResolution};
/// use serde_json::json;
///
/// let base = LogExecutionContext::json_base();
///
/// // Copy the shared template before filling in the backend
/// let mut options = base.clone();
/// options.log.native_logger.module = Some(
///     ModuleDescriptor::new("json-logger", "JsonLogger")
///         .with_resolution(ModuleResolution::Es)
///         .with_param(json!({"name": "example", "level": "info"})),
/// );
///
/// assert!(options.backend_selection().is_ok());
/// assert!(base.backend_selection().is_err());
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LogExecutionContext {
    pub app: AppContext,
    pub execution: ExecutionMetadata,
    pub log: LogConfig,
}

impl LogExecutionContext {
    /// Context selecting the built-in console module, resolved synchronously
    pub fn console() -> Self {
        let mut ctx = Self::default();
        ctx.log.native_logger.module = Some(ModuleDescriptor::new(CONSOLE_MODULE, CONSOLE_CONSTRUCTOR));
        ctx
    }

    /// Template for bunyan-style JSON backends: native level management and
    /// no backend selected yet
    pub fn json_base() -> Self {
        let mut ctx = Self::default();
        ctx.log.log_level_management = LogLevelManagement::Native;
        ctx
    }

    #[must_use]
    pub fn with_instance(mut self, instance: Arc<dyn NativeLogger>) -> Self {
        self.log.native_logger.instance = Some(instance);
        self
    }

    #[must_use]
    pub fn with_module(mut self, module: ModuleDescriptor) -> Self {
        self.log.native_logger.module = Some(module);
        self
    }

    #[must_use]
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.log.level = level;
        self
    }

    #[must_use]
    pub fn with_level_management(mut self, management: LogLevelManagement) -> Self {
        self.log.log_level_management = management;
        self
    }

    pub fn backend_selection(&self) -> Result<BackendSelection> {
        self.log.native_logger.selection()
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_value(value: Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// Serializable part of the context; the native logger instance is omitted
    pub fn to_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Deep-merge a JSON override onto a copy of this context.
    ///
    /// The native logger instance is not part of the JSON tree; the result
    /// shares it with `self` by reference.
    pub fn merged_with(&self, overrides: &Value) -> Result<Self> {
        let merged = deep_merge(&self.to_value()?, overrides);
        let mut ctx = Self::from_value(merged)?;
        ctx.log.native_logger.instance = self.log.native_logger.instance.clone();
        Ok(ctx)
    }
}
