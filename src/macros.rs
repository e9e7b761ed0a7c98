//! Logging macros for ergonomic message formatting.
//!
//! Each macro takes the adapter, an optional `data = <expr>;` payload and a
//! `format!`-style message.
//!
//! # Examples
//!
//! ```
//! use rust_logger_adapter::prelude::*;
//! use rust_logger_adapter::info;
//! use serde_json::json;
//!
//! let log = LoggerAdapter::new(&LogExecutionContext::console(), "examples", "macros", "doc").unwrap();
//!
//! // Message only
//! info!(log, "Server started");
//!
//! // Payload plus formatted message
//! let port = 8080;
//! info!(log, data = json!({"port": port}); "Server listening on port {}", port);
//! ```

/// Log at an explicit level.
///
/// # Examples
///
/// ```
/// # use rust_logger_adapter::prelude::*;
/// # let log = LoggerAdapter::new(&LogExecutionContext::console(), "r", "s", "m").unwrap();
/// use rust_logger_adapter::log;
/// log!(log, LogLevel::Info, "Simple message");
/// log!(log, LogLevel::Error, data = serde_json::json!({"code": 500}); "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, data = $data:expr; $($arg:tt)+) => {
        $logger.log($level, $data, format!($($arg)+))
    };
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log($level, $crate::__private::Value::Null, format!($($arg)+))
    };
}

/// Log a trace-level message.
#[macro_export]
macro_rules! trace {
    ($logger:expr, data = $data:expr; $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Trace, data = $data; $($arg)+)
    };
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Trace, $($arg)+)
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, data = $data:expr; $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, data = $data; $($arg)+)
    };
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log an info-level message.
///
/// # Examples
///
/// ```
/// # use rust_logger_adapter::prelude::*;
/// # let log = LoggerAdapter::new(&LogExecutionContext::console(), "r", "s", "m").unwrap();
/// use rust_logger_adapter::info;
/// info!(log, "Application started");
/// info!(log, "Processing {} items", 100);
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr, data = $data:expr; $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, data = $data; $($arg)+)
    };
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warn {
    ($logger:expr, data = $data:expr; $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warn, data = $data; $($arg)+)
    };
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warn, $($arg)+)
    };
}

/// Log an error-level message.
///
/// # Examples
///
/// ```
/// # use rust_logger_adapter::prelude::*;
/// # let log = LoggerAdapter::new(&LogExecutionContext::console(), "r", "s", "m").unwrap();
/// use rust_logger_adapter::error;
/// error!(log, "Failed to connect to database");
/// error!(log, data = serde_json::json!({"retries": 3}); "Gave up after {} retries", 3);
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, data = $data:expr; $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, data = $data; $($arg)+)
    };
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}

#[cfg(test)]
mod tests {
    use crate::core::{LogExecutionContext, LogLevel, LogRecord, LoggerAdapter, NativeLogger, Result};
    use parking_lot::Mutex;
    use serde_json::json;
    use std::sync::Arc;

    #[derive(Default)]
    struct Capture(Mutex<Vec<LogRecord>>);

    impl NativeLogger for Capture {
        fn log(&self, record: &LogRecord) -> Result<()> {
            self.0.lock().push(record.clone());
            Ok(())
        }

        fn name(&self) -> &str {
            "capture"
        }
    }

    fn adapter() -> (LoggerAdapter, Arc<Capture>) {
        let capture = Arc::new(Capture::default());
        let ctx = LogExecutionContext::default()
            .with_instance(capture.clone())
            .with_level(LogLevel::Trace);
        (LoggerAdapter::new(&ctx, "r", "s", "m").unwrap(), capture)
    }

    #[test]
    fn test_log_macro() {
        let (log, capture) = adapter();
        log!(log, LogLevel::Info, "Test message");
        log!(log, LogLevel::Warn, "Formatted: {}", 42);

        let records = capture.0.lock();
        assert_eq!(records[0].message, "Test message");
        assert!(records[0].data.is_null());
        assert_eq!(records[1].message, "Formatted: 42");
        assert_eq!(records[1].level, LogLevel::Warn);
    }

    #[test]
    fn test_level_macros() {
        let (log, capture) = adapter();
        trace!(log, "Value: {}", 10);
        debug!(log, "Count: {}", 5);
        info!(log, "Items: {}", 100);
        warn!(log, "Retry {} of {}", 1, 3);
        error!(log, "Code: {}", 500);

        let levels: Vec<LogLevel> = capture.0.lock().iter().map(|r| r.level).collect();
        assert_eq!(levels, LogLevel::ALL.to_vec());
    }

    #[test]
    fn test_data_form() {
        let (log, capture) = adapter();
        info!(log, data = json!({"user": "alice"}); "User {} logged in", "alice");

        let records = capture.0.lock();
        assert_eq!(records[0].data["user"], "alice");
        assert_eq!(records[0].message, "User alice logged in");
    }
}
