use anyhow::{Context, Result};
use serde_json::{json, Value};
use sqlforge_config::SqlforgeConfig;
use sqlforge_dialect::translate;
use sqlforge_sandbox::{QueryOutcome, Sandbox};
use std::path::Path;
use tracing::debug;

pub fn execute(config: SqlforgeConfig, schema_file: &Path, query: &str, no_translate: bool) -> Result<()> {
    let outcome = run(config, schema_file, query, no_translate)?;
    println!("{}", serde_json::to_string_pretty(&render(&outcome))?);
    Ok(())
}

/// Read, optionally translate, build and query
pub fn run(config: SqlforgeConfig, schema_file: &Path, query: &str, no_translate: bool) -> Result<QueryOutcome> {
    let script = std::fs::read_to_string(schema_file)
        .with_context(|| format!("Failed to read schema file {}", schema_file.display()))?;

    let schema = if no_translate {
        script
    } else {
        translate(&script)
    };
    debug!(chars = schema.len(), translated = !no_translate, "Schema ready");

    let outcome = Sandbox::new(config.sandbox).execute(&schema, query)?;
    Ok(outcome)
}

/// Same shape as the HTTP response body
pub fn render(outcome: &QueryOutcome) -> Value {
    json!({
        "success": true,
        "columns": outcome.columns(),
        "results": outcome.results_json(),
    })
}
