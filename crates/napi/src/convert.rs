use crate::types::{InstanceOptions, SchemaOptions};
use blokify_core::{BlokifyError, DEFAULT_INDENT};
use serde::Serialize;
use serde_json::Value as JsonValue;

/// Converts NAPI `SchemaOptions` to the engine's options.
pub fn to_schema_options(opts: Option<&SchemaOptions>) -> blokify_storyblok::SchemaOptions {
    match opts {
        Some(o) => blokify_storyblok::SchemaOptions {
            base_docs_url: o.base_docs_url.clone(),
            name_prefix: o.name_prefix.clone().unwrap_or_default(),
            add_docs_link: o.add_docs_link.unwrap_or(true),
        },
        None => blokify_storyblok::SchemaOptions::default(),
    }
}

/// Converts NAPI `InstanceOptions` to the engine's options.
///
/// `overrides` that are not an object are ignored.
pub fn to_instance_options(opts: Option<InstanceOptions>) -> blokify_storyblok::InstanceOptions {
    match opts {
        Some(o) => blokify_storyblok::InstanceOptions {
            name_prefix: o.name_prefix.unwrap_or_default(),
            include_all_props: o.include_all_props.unwrap_or(true),
            overrides: match o.overrides {
                Some(JsonValue::Object(map)) => map,
                _ => Default::default(),
            },
            use_kebab_case: o.use_kebab_case.unwrap_or(false),
        },
        None => blokify_storyblok::InstanceOptions::default(),
    }
}

/// Resolves an optional indent width.
pub fn indent_or_default(indent: Option<u32>) -> usize {
    indent.map(|i| i as usize).unwrap_or(DEFAULT_INDENT)
}

/// Surfaces an engine error to JavaScript.
pub fn to_napi_error(err: BlokifyError) -> napi::Error {
    napi::Error::from_reason(err.to_string())
}

/// Serializes an engine value into a plain JSON value for JavaScript.
pub fn to_json_value<T: Serialize>(value: &T) -> napi::Result<JsonValue> {
    serde_json::to_value(value).map_err(|e| to_napi_error(BlokifyError::Serialization(e)))
}
