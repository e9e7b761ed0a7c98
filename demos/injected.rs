//! Injected usage
//!
//! The execution context only names the JSON module. The adapter is usable
//! immediately: the first call goes to the console fallback, and once the
//! module has been resolved later calls reach the JSON logger.
//!
//! Run with: cargo run --example injected

use rust_logger_adapter::module::{ModuleDescriptor, ModuleResolution};
use rust_logger_adapter::prelude::*;
use serde_json::json;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<()> {
    println!("=== Logger Adapter - Injected Example ===\n");

    // Debug level shows the adapter's own notices around the switch
    let mut ctx = LogExecutionContext::json_base().with_level(LogLevel::Debug);
    ctx.log.native_logger.module = Some(
        ModuleDescriptor::new("json-logger", "JsonLogger")
            .with_resolution(ModuleResolution::Es)
            .with_param(json!({"name": "example", "level": "debug"})),
    );

    let log = LoggerAdapter::new(&ctx, "examples", "injected", "main")?;

    println!("1. Before resolution ({:?}):", log.state());
    log.info(json!({"hello": "world"}), "This is example output");

    tokio::time::sleep(Duration::from_millis(10)).await;
    let status = log.settled().await;

    println!("\n2. After resolution ({:?}, {:?}):", status, log.state());
    log.info(json!({"hello": "world"}), "This is example output");
    log.flush();

    let m = log.metrics();
    println!(
        "\nFallback: {}, backend: {}, swaps: {}",
        m.fallback_emitted(),
        m.backend_emitted(),
        m.backend_swaps()
    );

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
