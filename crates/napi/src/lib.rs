#![deny(missing_docs)]
//! Node.js bindings that surface blokify's Rust implementation.

use blokify_core::{ComponentMetadata, extract_metadata as extract};
use blokify_storyblok::ClipboardFormat;
use convert::{
    indent_or_default, to_instance_options, to_json_value, to_napi_error, to_schema_options,
};
use napi_derive::napi;
use serde_json::Value as JsonValue;

/// Batch processing types.
pub mod batch;
/// Option conversion helpers.
mod convert;
/// NAPI-exposed data structures.
pub mod types;
pub use batch::*;
pub use types::*;

fn read_context(context: &JsonValue) -> napi::Result<ComponentMetadata> {
    extract(context).map_err(to_napi_error)
}

/// Extracts normalized component metadata from a story context.
#[napi]
pub fn extract_metadata(context: JsonValue) -> napi::Result<JsonValue> {
    let metadata = read_context(&context)?;
    to_json_value(&metadata)
}

/// Generates the Storyblok block schema for a story context.
#[napi]
pub fn generate_schema(
    context: JsonValue,
    options: Option<SchemaOptions>,
) -> napi::Result<JsonValue> {
    let metadata = read_context(&context)?;
    let schema = blokify_storyblok::generate_schema(&metadata, &to_schema_options(options.as_ref()));
    to_json_value(&schema)
}

/// Generates the block schema and returns it as indented JSON text.
#[napi]
pub fn format_schema(context: JsonValue, options: Option<SchemaOptions>) -> napi::Result<String> {
    let metadata = read_context(&context)?;
    let indent = indent_or_default(options.as_ref().and_then(|o| o.indent));
    let schema = blokify_storyblok::generate_schema(&metadata, &to_schema_options(options.as_ref()));
    blokify_storyblok::format_schema(&schema, indent).map_err(to_napi_error)
}

/// Generates one block instance with a fresh `_uid`.
#[napi]
pub fn generate_instance(
    context: JsonValue,
    options: Option<InstanceOptions>,
) -> napi::Result<JsonValue> {
    let metadata = read_context(&context)?;
    let instance = blokify_storyblok::generate_instance(&metadata, &to_instance_options(options));
    to_json_value(&instance)
}

/// Produces clipboard text for a story context.
///
/// `format` is `"array"` (default), `"wrapped"`, or `"single"`.
#[napi]
pub fn clipboard_payload(
    context: JsonValue,
    format: Option<String>,
    options: Option<InstanceOptions>,
) -> napi::Result<String> {
    let format = match format.as_deref() {
        Some(name) => name.parse::<ClipboardFormat>().map_err(to_napi_error)?,
        None => ClipboardFormat::default(),
    };
    let indent = indent_or_default(options.as_ref().and_then(|o| o.indent));
    let metadata = read_context(&context)?;
    blokify_storyblok::clipboard_text(&metadata, format, &to_instance_options(options), indent)
        .map_err(to_napi_error)
}

/// Checks clipboard text the way the Storyblok paste bookmarklet does and
/// returns the number of blocks it would accept.
#[napi]
pub fn check_paste_contract(text: String) -> napi::Result<u32> {
    blokify_storyblok::check_paste_contract(&text)
        .map(|count| count as u32)
        .map_err(to_napi_error)
}

/// Generates block schemas for many story contexts in parallel.
///
/// Results keep the input order. With `continue_on_error: false` inputs are
/// processed one by one and processing stops at the first failure.
#[napi]
pub fn generate_schema_batch(
    inputs: Vec<BatchInput>,
    options: Option<BatchOptions>,
) -> napi::Result<BatchProcessingResult> {
    use rayon::prelude::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Instant;

    let start = Instant::now();
    let opts = options.unwrap_or_default();
    let continue_on_error = opts.continue_on_error.unwrap_or(true);
    let schema_options = to_schema_options(opts.schema.as_ref());

    // Configure thread pool if max_threads is specified
    let pool = if let Some(max_threads) = opts.max_threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(max_threads as usize)
            .build()
            .ok()
    } else {
        None
    };

    let total = inputs.len() as u32;
    let succeeded = AtomicU32::new(0);
    let failed = AtomicU32::new(0);

    let process_input = |input: BatchInput| -> BatchResult {
        let outcome = extract(&input.context)
            .map(|metadata| blokify_storyblok::generate_schema(&metadata, &schema_options))
            .and_then(|schema| {
                serde_json::to_value(&schema).map_err(blokify_core::BlokifyError::Serialization)
            });
        match outcome {
            Ok(schema) => {
                succeeded.fetch_add(1, Ordering::Relaxed);
                BatchResult {
                    id: input.id,
                    schema: Some(schema),
                    error: None,
                }
            }
            Err(e) => {
                failed.fetch_add(1, Ordering::Relaxed);
                log::debug!("batch input {} failed: {}", input.id, e);
                BatchResult {
                    id: input.id,
                    schema: None,
                    error: Some(e.to_string()),
                }
            }
        }
    };

    let results: Vec<BatchResult> = if continue_on_error {
        // Process all inputs regardless of errors
        if let Some(pool) = pool {
            pool.install(|| inputs.into_par_iter().map(process_input).collect())
        } else {
            inputs.into_par_iter().map(process_input).collect()
        }
    } else {
        // Stop on first error
        let mut results = Vec::with_capacity(inputs.len());
        for input in inputs {
            let result = process_input(input);
            let had_error = result.error.is_some();
            results.push(result);
            if had_error {
                break;
            }
        }
        results
    };

    Ok(BatchProcessingResult {
        results,
        stats: BatchStats {
            total,
            succeeded: succeeded.load(Ordering::Relaxed),
            failed: failed.load(Ordering::Relaxed),
            processing_time_ms: start.elapsed().as_secs_f64() * 1000.0,
        },
    })
}
