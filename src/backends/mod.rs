//! Native logger implementations

pub mod console;
pub mod json;

pub use console::{ConsoleLogger, ConsoleOptions};
pub use json::{JsonLogger, JsonLoggerOptions, JsonStream};

// Re-export trait for convenience
pub use crate::core::NativeLogger;
