//! Bunyan-style JSON native logger
//!
//! Writes each record as a single-line JSON object (JSONL format) with the
//! field layout bunyan uses: `v`, `name`, `hostname`, `pid`, numeric `level`,
//! `msg`, `time`, followed by the adapter's `attributes` and `data`.

use crate::core::{AdapterError, LogLevel, LogRecord, NativeLogger, Result, TimestampFormat};
use parking_lot::Mutex;
use serde::Deserialize;
use serde_json::{json, Value};
use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Target stream when no file path is configured
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JsonStream {
    #[default]
    Stdout,
    Stderr,
}

/// Options accepted as the first constructor parameter of the JSON module
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonLoggerOptions {
    pub name: String,
    #[serde(default)]
    pub level: LogLevel,
    #[serde(default)]
    pub stream: JsonStream,
    /// Append to this file instead of writing to `stream`
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl JsonLoggerOptions {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            level: LogLevel::default(),
            stream: JsonStream::default(),
            path: None,
        }
    }
}

pub struct JsonLogger {
    name: String,
    min_level: LogLevel,
    hostname: String,
    pid: u32,
    writer: Mutex<Box<dyn Write + Send>>,
}

impl JsonLogger {
    pub fn new(options: JsonLoggerOptions) -> Result<Self> {
        let writer: Box<dyn Write + Send> = match (&options.path, options.stream) {
            (Some(path), _) => Box::new(BufWriter::new(Self::open(path)?)),
            (None, JsonStream::Stdout) => Box::new(std::io::stdout()),
            (None, JsonStream::Stderr) => Box::new(std::io::stderr()),
        };
        Ok(Self::with_writer(options.name, options.level, writer))
    }

    /// Build from a module descriptor's `paramsArray`; the first parameter is required
    pub fn from_params(params: &[Value]) -> Result<Self> {
        let first = params
            .first()
            .ok_or_else(|| AdapterError::config("JsonLogger", "expected options as first parameter"))?;
        let options: JsonLoggerOptions = serde_json::from_value(first.clone())?;
        Self::new(options)
    }

    /// Write to an arbitrary sink
    pub fn with_writer<W>(name: impl Into<String>, min_level: LogLevel, writer: W) -> Self
    where
        W: Write + Send + 'static,
    {
        Self {
            name: name.into(),
            min_level,
            hostname: std::env::var("HOSTNAME").unwrap_or_else(|_| "localhost".to_string()),
            pid: std::process::id(),
            writer: Mutex::new(Box::new(writer)),
        }
    }

    fn open(path: &Path) -> Result<std::fs::File> {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| AdapterError::io_operation("opening JSON log file", path.display().to_string(), e))
    }

    fn to_bunyan(&self, record: &LogRecord) -> Value {
        let mut line = json!({
            "v": 0,
            "name": self.name,
            "hostname": self.hostname,
            "pid": self.pid,
            "level": record.level.bunyan_code(),
            "msg": record.message,
            "time": TimestampFormat::Iso8601.format(&record.timestamp),
            "attributes": record.attributes,
        });
        if record.has_data() {
            line["data"] = record.data.clone();
        }
        line
    }
}

impl NativeLogger for JsonLogger {
    fn log(&self, record: &LogRecord) -> Result<()> {
        if record.level < self.min_level {
            return Ok(());
        }

        let line = serde_json::to_string(&self.to_bunyan(record))?;
        let mut writer = self.writer.lock();
        writeln!(writer, "{}", line)?;
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        self.writer.lock().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl Drop for JsonLogger {
    fn drop(&mut self) {
        let _ = self.writer.get_mut().flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_json_logger_writes_bunyan_lines() -> Result<()> {
        let dir = tempdir()?;
        let log_path = dir.path().join("example.jsonl");

        let mut options = JsonLoggerOptions::new("example");
        options.path = Some(log_path.clone());
        let logger = JsonLogger::new(options)?;

        let record = LogRecord::new(LogLevel::Info, "User logged in")
            .with_attributes(json!({"repo": "adapter"}))
            .with_data(json!({"user_id": 123}));
        logger.log(&record)?;
        logger.flush()?;

        let content = fs::read_to_string(&log_path)?;
        let parsed: Value = serde_json::from_str(content.trim())?;
        assert_eq!(parsed["name"], "example");
        assert_eq!(parsed["level"], 30);
        assert_eq!(parsed["msg"], "User logged in");
        assert_eq!(parsed["attributes"]["repo"], "adapter");
        assert_eq!(parsed["data"]["user_id"], 123);
        assert_eq!(parsed["v"], 0);

        Ok(())
    }

    #[test]
    fn test_json_logger_filters_below_level() -> Result<()> {
        let dir = tempdir()?;
        let log_path = dir.path().join("filtered.jsonl");

        let logger = JsonLogger::from_params(&[json!({
            "name": "filtered",
            "level": "warn",
            "path": log_path,
        })])?;

        logger.log(&LogRecord::new(LogLevel::Info, "dropped"))?;
        logger.log(&LogRecord::new(LogLevel::Error, "kept"))?;
        logger.flush()?;

        let content = fs::read_to_string(&log_path)?;
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("kept"));

        Ok(())
    }

    #[test]
    fn test_from_params_requires_options() {
        let err = JsonLogger::from_params(&[]).err().unwrap();
        assert!(err.is_configuration());
        assert!(JsonLogger::from_params(&[json!({"level": "info"})]).is_err());
    }
}
