//! Static contextual attributes attached to every record

use super::execution_context::{AttributeVisibility, LogExecutionContext};
use serde_json::{Map, Value};

/// Labels identifying the owner of a logger adapter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OwnerLabels {
    pub repo: String,
    pub source: String,
    pub method: String,
}

impl OwnerLabels {
    pub fn new(repo: impl Into<String>, source: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            repo: repo.into(),
            source: source.into(),
            method: method.into(),
        }
    }
}

/// Render the `attributes` object for an adapter.
///
/// Computed once per adapter from a copy of the context; hidden fields are
/// omitted, and empty `app`/`execution` sections are left out entirely.
pub(crate) fn render_attributes(labels: &OwnerLabels, ctx: &LogExecutionContext) -> Value {
    let hide: &AttributeVisibility = &ctx.log.attributes;
    let mut attributes = Map::new();

    if !hide.hide_repo {
        attributes.insert("repo".to_string(), Value::String(labels.repo.clone()));
    }
    if !hide.hide_source_file {
        attributes.insert("source".to_string(), Value::String(labels.source.clone()));
    }
    if !hide.hide_method {
        attributes.insert("method".to_string(), Value::String(labels.method.clone()));
    }
    if !hide.hide_app_context {
        let mut app = Map::new();
        app.insert("appContext".to_string(), Value::String(ctx.app.app_context.clone()));
        attributes.insert("app".to_string(), Value::Object(app));
    }

    let mut execution = Map::new();
    let fields = [
        (hide.hide_thread, "thread", &ctx.execution.thread),
        (hide.hide_request_id, "requestId", &ctx.execution.request_id),
        (hide.hide_authorization, "authorization", &ctx.execution.authorization),
        (hide.hide_local_context, "localContext", &ctx.execution.local_context),
    ];
    for (hidden, key, value) in fields {
        if !hidden {
            execution.insert(key.to_string(), Value::String(value.clone()));
        }
    }
    if !execution.is_empty() {
        attributes.insert("execution".to_string(), Value::Object(execution));
    }

    Value::Object(attributes)
}
