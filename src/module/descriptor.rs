//! Deferred native logger descriptors

use crate::core::{AdapterError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// How a module is loaded
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModuleResolution {
    /// Loaded synchronously while the adapter is being built
    #[default]
    #[serde(rename = "commonjs")]
    CommonJs,
    /// Loaded dynamically; always completes after the adapter is built
    #[serde(rename = "es")]
    Es,
}

/// Names a native logger to be constructed by the module registry.
///
/// # Example
///
/// ```
/// use rust_logger_adapter::module::{ModuleDescriptor, ModuleResolution};
/// use serde_json::json;
///
/// let descriptor = ModuleDescriptor::new("json-logger", "JsonLogger")
///     .with_resolution(ModuleResolution::Es)
///     .with_param(json!({"name": "example", "level": "info"}));
///
/// assert!(descriptor.is_deferred());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleDescriptor {
    pub module_name: String,
    #[serde(default)]
    pub module_resolution: ModuleResolution,
    pub constructor_name: String,
    #[serde(default)]
    pub params_array: Vec<Value>,
    /// The constructor itself is asynchronous
    #[serde(default)]
    pub async_factory: bool,
}

impl ModuleDescriptor {
    pub fn new(module_name: impl Into<String>, constructor_name: impl Into<String>) -> Self {
        Self {
            module_name: module_name.into(),
            module_resolution: ModuleResolution::default(),
            constructor_name: constructor_name.into(),
            params_array: Vec::new(),
            async_factory: false,
        }
    }

    #[must_use]
    pub fn with_resolution(mut self, resolution: ModuleResolution) -> Self {
        self.module_resolution = resolution;
        self
    }

    #[must_use]
    pub fn with_param(mut self, param: Value) -> Self {
        self.params_array.push(param);
        self
    }

    #[must_use]
    pub fn with_params(mut self, params: Vec<Value>) -> Self {
        self.params_array = params;
        self
    }

    #[must_use]
    pub fn with_async_factory(mut self, async_factory: bool) -> Self {
        self.async_factory = async_factory;
        self
    }

    /// Resolution cannot finish before the adapter is returned
    pub fn is_deferred(&self) -> bool {
        self.module_resolution == ModuleResolution::Es || self.async_factory
    }

    pub fn validate(&self) -> Result<()> {
        if self.module_name.trim().is_empty() {
            return Err(AdapterError::config(
                "nativeLogger.module",
                "moduleName must not be empty",
            ));
        }
        if self.constructor_name.trim().is_empty() {
            return Err(AdapterError::config(
                "nativeLogger.module",
                format!("constructorName must not be empty for module '{}'", self.module_name),
            ));
        }
        Ok(())
    }
}
