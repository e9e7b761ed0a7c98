//! Output format configuration for log records
//!
//! - Text: Human-readable single line (default)
//! - Json: One JSON object per record

use super::log_record::LogRecord;
use super::timestamp::TimestampFormat;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Output format for log records
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text format (default)
    ///
    /// Example: `[2025-01-08T10:30:45.123Z] [INFO ] Request processed attributes={..} data={..}`
    #[default]
    Text,

    /// JSON format for machine processing
    ///
    /// Example: `{"timestamp":"2025-01-08T10:30:45.123Z","level":"INFO","message":"..","attributes":{..},"data":{..}}`
    Json,
}

impl OutputFormat {
    /// Format a log record according to this output format
    pub fn format(&self, record: &LogRecord, timestamp_format: &TimestampFormat) -> String {
        match self {
            OutputFormat::Text => Self::format_text(record, timestamp_format, record.level.to_str()),
            OutputFormat::Json => Self::format_json(record, timestamp_format),
        }
    }

    /// Text line with a caller-provided level label (the console colors it)
    pub(crate) fn format_text(
        record: &LogRecord,
        timestamp_format: &TimestampFormat,
        level_label: &str,
    ) -> String {
        let mut line = format!(
            "[{}] [{:5}] {}",
            timestamp_format.format(&record.timestamp),
            level_label,
            record.message
        );

        if record.attributes.as_object().is_some_and(|attrs| !attrs.is_empty()) {
            line.push_str(" attributes=");
            line.push_str(&record.attributes.to_string());
        }
        if record.has_data() {
            line.push_str(" data=");
            line.push_str(&record.data.to_string());
        }

        line
    }

    fn format_json(record: &LogRecord, timestamp_format: &TimestampFormat) -> String {
        let mut json_obj = Map::new();
        json_obj.insert(
            "timestamp".to_string(),
            timestamp_format.format_json(&record.timestamp),
        );
        json_obj.insert(
            "level".to_string(),
            Value::String(record.level.to_str().to_string()),
        );
        json_obj.insert("message".to_string(), Value::String(record.message.clone()));
        json_obj.insert("attributes".to_string(), record.attributes.clone());
        if record.has_data() {
            json_obj.insert("data".to_string(), record.data.clone());
        }

        Value::Object(json_obj).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LogLevel;
    use serde_json::json;

    fn record() -> LogRecord {
        LogRecord::new(LogLevel::Info, "Request processed")
            .with_attributes(json!({"repo": "adapter"}))
            .with_data(json!({"status": 200}))
    }

    #[test]
    fn test_text_format() {
        let line = OutputFormat::Text.format(&record(), &TimestampFormat::Iso8601);
        assert!(line.contains("[INFO ] Request processed"));
        assert!(line.contains("attributes={\"repo\":\"adapter\"}"));
        assert!(line.contains("data={\"status\":200}"));
    }

    #[test]
    fn test_text_format_omits_empty_data() {
        let record = LogRecord::new(LogLevel::Warn, "bare");
        let line = OutputFormat::Text.format(&record, &TimestampFormat::Iso8601);
        assert!(!line.contains("data="));
        assert!(!line.contains("attributes="));
    }

    #[test]
    fn test_json_format() {
        let line = OutputFormat::Json.format(&record(), &TimestampFormat::UnixMillis);
        let parsed: Value = serde_json::from_str(&line).unwrap();

        assert_eq!(parsed["level"], "INFO");
        assert_eq!(parsed["message"], "Request processed");
        assert_eq!(parsed["attributes"]["repo"], "adapter");
        assert_eq!(parsed["data"]["status"], 200);
        assert!(parsed["timestamp"].is_i64());
    }
}
