//! Criterion benchmarks for rust_logger_adapter

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use rust_logger_adapter::prelude::*;
use serde_json::json;
use std::sync::Arc;

/// Native logger that discards everything
struct NullLogger;

impl NativeLogger for NullLogger {
    fn log(&self, record: &LogRecord) -> Result<()> {
        black_box(record);
        Ok(())
    }

    fn name(&self) -> &str {
        "null"
    }
}

fn instance_adapter(level: LogLevel) -> LoggerAdapter {
    let ctx = LogExecutionContext::default()
        .with_instance(Arc::new(NullLogger))
        .with_level(level);
    LoggerAdapter::new(&ctx, "bench", "adapter_benchmarks", "main").unwrap()
}

// ============================================================================
// Adapter Creation Benchmarks
// ============================================================================

fn bench_adapter_creation(c: &mut Criterion) {
    let mut group = c.benchmark_group("adapter_creation");
    group.throughput(Throughput::Elements(1));

    let instance_ctx = LogExecutionContext::default().with_instance(Arc::new(NullLogger));
    group.bench_function("instance", |b| {
        b.iter(|| black_box(LoggerAdapter::new(&instance_ctx, "r", "s", "m").unwrap()));
    });

    let registry = Arc::new(ModuleRegistry::new());
    registry.register("null", "NullLogger", |_| Ok(Arc::new(NullLogger) as Arc<dyn NativeLogger>));
    let module_ctx = LogExecutionContext::default().with_module(ModuleDescriptor::new("null", "NullLogger"));
    group.bench_function("commonjs_descriptor", |b| {
        b.iter(|| {
            black_box(
                LoggerAdapter::builder(&module_ctx)
                    .registry(Arc::clone(&registry))
                    .build()
                    .unwrap(),
            )
        });
    });

    group.finish();
}

// ============================================================================
// Emission Benchmarks
// ============================================================================

fn bench_emission(c: &mut Criterion) {
    let mut group = c.benchmark_group("emission");
    group.throughput(Throughput::Elements(1));

    let log = instance_adapter(LogLevel::Trace);

    group.bench_function("message_only", |b| {
        b.iter(|| log.info(serde_json::Value::Null, black_box("Info message")));
    });

    group.bench_function("with_data", |b| {
        b.iter(|| log.info(json!({"user_id": 42, "action": "login"}), black_box("User action")));
    });

    let filtering = instance_adapter(LogLevel::Error);
    group.bench_function("filtered_by_adapter", |b| {
        b.iter(|| filtering.debug(serde_json::Value::Null, black_box("Dropped message")));
    });

    group.finish();
}

// ============================================================================
// Configuration Benchmarks
// ============================================================================

fn bench_context_merge(c: &mut Criterion) {
    let mut group = c.benchmark_group("context_merge");

    let base = LogExecutionContext::json_base();
    let overrides = json!({
        "app": {"appContext": "Worker"},
        "log": {"level": "warn", "attributes": {"hideThread": true}},
    });

    group.bench_function("merged_with", |b| {
        b.iter(|| black_box(base.merged_with(black_box(&overrides)).unwrap()));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_adapter_creation,
    bench_emission,
    bench_context_merge,
);
criterion_main!(benches);
