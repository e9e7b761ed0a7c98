//! Core adapter types and traits

pub mod adapter;
pub mod attributes;
pub mod error;
pub mod execution_context;
pub mod log_level;
pub mod log_record;
pub mod merge;
pub mod metrics;
pub mod native_logger;
pub mod output_format;
pub mod timestamp;

pub use adapter::{AdapterState, LoggerAdapter, LoggerAdapterBuilder, ResolutionStatus};
pub use attributes::OwnerLabels;
pub use error::{AdapterError, Result};
pub use execution_context::{
    AppContext, AttributeVisibility, BackendSelection, ExecutionMetadata, LogConfig,
    LogExecutionContext, LogLevelManagement, NativeLoggerConfig,
};
pub use log_level::LogLevel;
pub use log_record::LogRecord;
pub use merge::deep_merge;
pub use metrics::AdapterMetrics;
pub use native_logger::NativeLogger;
pub use output_format::OutputFormat;
pub use timestamp::TimestampFormat;
