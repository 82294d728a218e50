//! Batch processing types for exporting many component schemas in parallel.

use crate::types::SchemaOptions;
use napi_derive::napi;
use serde_json::Value as JsonValue;

/// Input for batch processing - one story context to convert.
#[napi(object)]
#[derive(Debug, Clone)]
pub struct BatchInput {
    /// Identifier echoed back in the result (typically the story id or title).
    pub id: String,
    /// Story context as plain JSON.
    pub context: JsonValue,
}

/// Result for a single story in a batch.
#[napi(object)]
#[derive(Debug, Clone)]
pub struct BatchResult {
    /// Identifier matching the input.
    pub id: String,
    /// Generated block schema (present on success).
    pub schema: Option<JsonValue>,
    /// Error message (present on failure).
    pub error: Option<String>,
}

/// Statistics for batch processing.
#[napi(object)]
#[derive(Debug, Clone)]
pub struct BatchStats {
    /// Total number of inputs received.
    pub total: u32,
    /// Number of schemas generated.
    pub succeeded: u32,
    /// Number of failed inputs.
    pub failed: u32,
    /// Total processing time in milliseconds.
    pub processing_time_ms: f64,
}

/// Options for batch processing.
#[napi(object)]
#[derive(Debug, Clone, Default)]
pub struct BatchOptions {
    /// Maximum number of threads to use. Defaults to number of CPU cores.
    pub max_threads: Option<u32>,
    /// Whether to continue processing after an error. Defaults to true.
    pub continue_on_error: Option<bool>,
    /// Schema options applied to every input.
    pub schema: Option<SchemaOptions>,
}

/// Result of batch processing containing all results and statistics.
#[napi(object)]
#[derive(Debug, Clone)]
pub struct BatchProcessingResult {
    /// Individual results, in input order.
    pub results: Vec<BatchResult>,
    /// Processing statistics.
    pub stats: BatchStats,
}
