//! # Rust Logger Adapter
//!
//! A logger facade that is usable the moment it is built, even when the
//! concrete logging backend has to be resolved later.
//!
//! ## Features
//!
//! - **Immediate use**: a console fallback serves calls until the backend resolves
//! - **Two integration styles**: pass a native logger instance, or name a module to inject
//! - **Atomic switchover**: no call is buffered, dropped, duplicated or reordered
//! - **Never throws**: backend failures are reported through the fallback

pub mod backends;
pub mod core;
pub mod macros;
pub mod module;

pub mod prelude {
    pub use crate::backends::{ConsoleLogger, JsonLogger, JsonLoggerOptions};
    pub use crate::core::{
        deep_merge, AdapterError, AdapterMetrics, AdapterState, LogExecutionContext, LogLevel,
        LogLevelManagement, LogRecord, LoggerAdapter, LoggerAdapterBuilder, NativeLogger,
        OutputFormat, ResolutionStatus, Result, TimestampFormat,
    };
    pub use crate::module::{AsyncConstructor, ModuleDescriptor, ModuleRegistry, ModuleResolution};
}

pub use backends::{ConsoleLogger, JsonLogger};
pub use core::{
    deep_merge, AdapterError, AdapterMetrics, AdapterState, LogExecutionContext, LogLevel,
    LogLevelManagement, LogRecord, LoggerAdapter, LoggerAdapterBuilder, NativeLogger,
    OutputFormat, ResolutionStatus, Result, TimestampFormat,
};
pub use module::{ModuleDescriptor, ModuleRegistry, ModuleResolution};

#[doc(hidden)]
pub mod __private {
    pub use serde_json::Value;
}
