//! Error types for the logger adapter

pub type Result<T> = std::result::Result<T, AdapterError>;

#[derive(Debug, thiserror::Error)]
pub enum AdapterError {
    /// IO error with context
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// No module registered under the requested name
    #[error("Module '{module}' is not registered")]
    ModuleNotFound { module: String },

    /// Module exists but does not export the requested constructor
    #[error("Module '{module}' has no constructor named '{constructor}'")]
    ConstructorNotFound { module: String, constructor: String },

    /// Constructor kind does not match the descriptor (sync vs async)
    #[error("Constructor '{constructor}' in module '{module}' is {actual}, descriptor expects {expected}")]
    ConstructorMismatch {
        module: String,
        constructor: String,
        expected: &'static str,
        actual: &'static str,
    },

    /// Constructor ran and failed
    #[error("Constructor '{constructor}' in module '{module}' failed: {message}")]
    ConstructorFailed {
        module: String,
        constructor: String,
        message: String,
    },

    /// Native logger failed to emit a record
    #[error("Native logger '{logger}' failed: {message}")]
    EmissionFailed { logger: String, message: String },

    /// Writer error (generic)
    #[error("Writer error: {0}")]
    WriterError(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl AdapterError {
    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        AdapterError::IoOperation {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        AdapterError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    pub fn module_not_found(module: impl Into<String>) -> Self {
        AdapterError::ModuleNotFound {
            module: module.into(),
        }
    }

    pub fn constructor_not_found(module: impl Into<String>, constructor: impl Into<String>) -> Self {
        AdapterError::ConstructorNotFound {
            module: module.into(),
            constructor: constructor.into(),
        }
    }

    pub fn constructor_failed(
        module: impl Into<String>,
        constructor: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        AdapterError::ConstructorFailed {
            module: module.into(),
            constructor: constructor.into(),
            message: message.into(),
        }
    }

    /// Create an emission error for a named native logger
    pub fn emission(logger: impl Into<String>, message: impl Into<String>) -> Self {
        AdapterError::EmissionFailed {
            logger: logger.into(),
            message: message.into(),
        }
    }

    /// Create a writer error (generic)
    pub fn writer<S: Into<String>>(msg: S) -> Self {
        AdapterError::WriterError(msg.into())
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        AdapterError::Other(msg.into())
    }

    /// True for errors raised while validating an execution context
    pub fn is_configuration(&self) -> bool {
        matches!(self, AdapterError::InvalidConfiguration { .. })
    }
}
