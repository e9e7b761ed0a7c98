//! Console native logger, also used as the adapter's fallback

use crate::core::{LogLevel, LogRecord, NativeLogger, OutputFormat, Result, TimestampFormat};
use serde::Deserialize;
use serde_json::Value;

/// Options accepted as the first constructor parameter of the console module
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConsoleOptions {
    pub level: Option<LogLevel>,
    pub colors: Option<bool>,
    pub format: Option<OutputFormat>,
    pub timestamp: Option<TimestampFormat>,
}

pub struct ConsoleLogger {
    use_colors: bool,
    min_level: LogLevel,
    timestamp_format: TimestampFormat,
    output_format: OutputFormat,
}

impl ConsoleLogger {
    pub fn new() -> Self {
        Self {
            use_colors: cfg!(feature = "console"),
            min_level: LogLevel::Trace,
            timestamp_format: TimestampFormat::default(),
            output_format: OutputFormat::default(),
        }
    }

    pub fn with_colors(use_colors: bool) -> Self {
        Self {
            use_colors,
            ..Self::new()
        }
    }

    /// Build from a module descriptor's `paramsArray`
    pub fn from_params(params: &[Value]) -> Result<Self> {
        let options: ConsoleOptions = match params.first() {
            Some(value) => serde_json::from_value(value.clone())?,
            None => ConsoleOptions::default(),
        };
        Ok(Self::from_options(options))
    }

    pub fn from_options(options: ConsoleOptions) -> Self {
        let mut logger = Self::new();
        if let Some(level) = options.level {
            logger.min_level = level;
        }
        if let Some(colors) = options.colors {
            logger.use_colors = colors;
        }
        if let Some(format) = options.format {
            logger.output_format = format;
        }
        if let Some(timestamp) = options.timestamp {
            logger.timestamp_format = timestamp;
        }
        logger
    }

    #[must_use]
    pub fn with_min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    /// Set the output format for this logger
    ///
    /// # Example
    ///
    /// ```
    /// use rust_logger_adapter::backends::ConsoleLogger;
    /// use rust_logger_adapter::core::OutputFormat;
    ///
    /// let console = ConsoleLogger::new().with_output_format(OutputFormat::Json);
    /// ```
    #[must_use]
    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    pub fn min_level(&self) -> LogLevel {
        self.min_level
    }

    /// Render a record the way it will be printed
    pub fn render(&self, record: &LogRecord) -> String {
        match self.output_format {
            OutputFormat::Text => OutputFormat::format_text(
                record,
                &self.timestamp_format,
                &self.level_label(record.level),
            ),
            OutputFormat::Json => self.output_format.format(record, &self.timestamp_format),
        }
    }

    #[cfg(feature = "console")]
    fn level_label(&self, level: LogLevel) -> String {
        use colored::Colorize;
        let padded = format!("{:5}", level.to_str());
        if self.use_colors {
            padded.color(level.color_code()).to_string()
        } else {
            padded
        }
    }

    #[cfg(not(feature = "console"))]
    fn level_label(&self, level: LogLevel) -> String {
        format!("{:5}", level.to_str())
    }
}

impl Default for ConsoleLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl NativeLogger for ConsoleLogger {
    fn log(&self, record: &LogRecord) -> Result<()> {
        if record.level < self.min_level {
            return Ok(());
        }

        let output = self.render(record);
        match record.level {
            LogLevel::Error => eprintln!("{}", output),
            _ => println!("{}", output),
        }
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        use std::io::Write;
        std::io::stdout().flush()?;
        std::io::stderr().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}
