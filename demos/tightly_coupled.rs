//! Tightly coupled usage
//!
//! The application constructs its JSON logger itself and hands the instance
//! to the adapter, either through the execution context or directly.
//!
//! Run with: cargo run --example tightly_coupled

use rust_logger_adapter::backends::{JsonLogger, JsonLoggerOptions};
use rust_logger_adapter::prelude::*;
use serde_json::json;
use std::sync::Arc;

fn main() -> Result<()> {
    println!("=== Logger Adapter - Tightly Coupled Example ===\n");

    let backend: Arc<dyn NativeLogger> = Arc::new(JsonLogger::new(JsonLoggerOptions::new("example"))?);

    // Copy the shared template before selecting the backend
    let base = LogExecutionContext::json_base();
    let ctx = base.clone().with_instance(Arc::clone(&backend));

    println!("1. Instance from the execution context:");
    let log = LoggerAdapter::new(&ctx, "examples", "tightly-coupled", "main")?;
    log.info(json!({"hello": "world"}), "This is example output");

    println!("\n2. Instance passed by parameter:");
    let log2 = LoggerAdapter::builder(&base)
        .repo("examples")
        .source("tightly-coupled")
        .method("passed by parameter")
        .native_logger(backend)
        .build()?;
    log2.info(json!({"hello": "world"}), "This is example output");

    println!("\n3. Adapter-managed level on a merged context:");
    let quiet = ctx.merged_with(&json!({
        "log": {"level": "warn", "logLevelManagement": "adapter"}
    }))?;
    let log3 = LoggerAdapter::new(&quiet, "examples", "tightly-coupled", "quiet")?;
    log3.info(json!({}), "Info message (hidden)");
    log3.warn(json!({"retries": 3}), "Warning message (visible)");

    log.flush();

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
