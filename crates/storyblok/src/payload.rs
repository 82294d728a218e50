//! Clipboard payload shapes and the acceptance rule of the paste bookmarklet.

use crate::instance::{InstanceOptions, generate_instance};
use blokify_core::{BlokifyError, ComponentMetadata, Result, is_truthy, to_json_string};
use serde_json::{Map, Value as JsonValue};
use std::str::FromStr;

/// Marker key of the wrapped clipboard format.
pub const BRIDGE_MARKER: &str = "__sb_js_bridge_clipboard__";

/// Shape of the JSON written to the clipboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClipboardFormat {
    /// `[block]`, what a `bloks` field accepts on paste.
    #[default]
    Array,
    /// `{ "__sb_js_bridge_clipboard__": true, "blocks": [block] }`.
    Wrapped,
    /// The bare block object.
    Single,
}

impl ClipboardFormat {
    /// Name accepted by [`FromStr`].
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Array => "array",
            Self::Wrapped => "wrapped",
            Self::Single => "single",
        }
    }
}

impl FromStr for ClipboardFormat {
    type Err = BlokifyError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "array" => Ok(Self::Array),
            "wrapped" => Ok(Self::Wrapped),
            "single" => Ok(Self::Single),
            other => Err(BlokifyError::invalid_input(format!(
                "Unknown clipboard format '{other}' (expected array, wrapped or single)"
            ))),
        }
    }
}

/// Generates a fresh instance and wraps it in the requested clipboard shape.
pub fn clipboard_payload(
    metadata: &ComponentMetadata,
    format: ClipboardFormat,
    options: &InstanceOptions,
) -> Result<JsonValue> {
    let block = serde_json::to_value(generate_instance(metadata, options))
        .map_err(BlokifyError::Serialization)?;

    Ok(match format {
        ClipboardFormat::Array => JsonValue::Array(vec![block]),
        ClipboardFormat::Wrapped => {
            let mut wrapper = Map::new();
            wrapper.insert(BRIDGE_MARKER.to_string(), JsonValue::Bool(true));
            wrapper.insert("blocks".to_string(), JsonValue::Array(vec![block]));
            JsonValue::Object(wrapper)
        }
        ClipboardFormat::Single => block,
    })
}

/// Same as [`clipboard_payload`], serialized with `indent` spaces.
pub fn clipboard_text(
    metadata: &ComponentMetadata,
    format: ClipboardFormat,
    options: &InstanceOptions,
    indent: usize,
) -> Result<String> {
    to_json_string(&clipboard_payload(metadata, format, options)?, indent)
}

/// Checks clipboard text against what the paste bookmarklet accepts and returns
/// the number of blocks it would hand to Storyblok.
///
/// The text must be JSON; a non-array value counts as a single block, and every
/// block needs truthy `component` and `_uid` values (a numeric `_uid` passes,
/// `""`, `0` and `null` do not).
pub fn check_paste_contract(text: &str) -> Result<usize> {
    let data: JsonValue = serde_json::from_str(text)
        .map_err(|err| BlokifyError::invalid_input(format!("Clipboard text is not JSON: {err}")))?;

    let blocks = match data {
        JsonValue::Array(items) => items,
        other => vec![other],
    };

    for (index, block) in blocks.iter().enumerate() {
        for key in ["component", "_uid"] {
            if !block.get(key).is_some_and(is_truthy) {
                return Err(BlokifyError::invalid_input(format!(
                    "Block {index} is missing \"{key}\""
                )));
            }
        }
    }

    Ok(blocks.len())
}
