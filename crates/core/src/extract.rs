//! Normalizes a Storybook story context into [`ComponentMetadata`].
//!
//! The story context is loosely typed: every field is optional and any shape
//! mismatch falls back to an empty value. Only an absent (`null`) context is an
//! error.

use crate::error::{BlokifyError, Result};
use crate::metadata::{ComponentMetadata, ControlKind, PropertyDefinition, StoryblokConfig};
use serde::Deserialize;
use serde_json::{Map, Value as JsonValue};
use std::collections::BTreeMap;

/// Component name used when the story has no usable title.
pub const UNKNOWN_COMPONENT: &str = "Unknown";

/// Args with this prefix are Storybook internals and never reach Storyblok.
const RESERVED_PREFIX: &str = "__";

/// Extracts component metadata from a story context.
///
/// # Errors
///
/// Returns [`BlokifyError::InvalidInput`] when the context is `null`.
pub fn extract_metadata(context: &JsonValue) -> Result<ComponentMetadata> {
    if context.is_null() {
        return Err(BlokifyError::invalid_input("Story context is required"));
    }

    let parameters = context.get("parameters");
    let component_name = component_name(context.get("title").and_then(JsonValue::as_str));
    let description = description(parameters);
    let props = context
        .get("argTypes")
        .and_then(JsonValue::as_object)
        .map(extract_props)
        .unwrap_or_default();
    let stories = story_names(context.get("componentStories"));
    let storyblok_config = parameters
        .and_then(|p| p.get("storyblok"))
        .and_then(storyblok_config);

    log::debug!(
        "extracted metadata for {}: {} props, {} stories",
        component_name,
        props.len(),
        stories.len()
    );

    Ok(ComponentMetadata {
        component_name,
        description,
        props,
        variants: stories.clone(),
        stories,
        storyblok_config,
    })
}

/// Parses JSON text and extracts component metadata from it.
pub fn extract_metadata_from_str(text: &str) -> Result<ComponentMetadata> {
    let context: JsonValue = serde_json::from_str(text)
        .map_err(|err| BlokifyError::invalid_input(format!("Story context is not JSON: {err}")))?;
    extract_metadata(&context)
}

fn component_name(title: Option<&str>) -> String {
    title
        .and_then(|t| t.split('/').filter(|segment| !segment.is_empty()).next_back())
        .unwrap_or(UNKNOWN_COMPONENT)
        .to_string()
}

fn description(parameters: Option<&JsonValue>) -> Option<String> {
    let parameters = parameters?;
    [
        parameters.pointer("/docs/description/component"),
        parameters.get("componentSubtitle"),
    ]
    .into_iter()
    .flatten()
    .filter_map(JsonValue::as_str)
    .find(|text| !text.is_empty())
    .map(str::to_string)
}

fn extract_props(arg_types: &Map<String, JsonValue>) -> BTreeMap<String, PropertyDefinition> {
    arg_types
        .iter()
        .filter(|(key, _)| !key.starts_with(RESERVED_PREFIX))
        .filter(|(_, arg)| !is_disabled(arg))
        .map(|(key, arg)| (key.clone(), property_definition(key, arg)))
        .collect()
}

fn is_disabled(arg: &JsonValue) -> bool {
    arg.pointer("/table/disable") == Some(&JsonValue::Bool(true))
}

fn property_definition(name: &str, arg: &JsonValue) -> PropertyDefinition {
    PropertyDefinition {
        name: name.to_string(),
        description: arg
            .get("description")
            .and_then(JsonValue::as_str)
            .map(str::to_string),
        control: control_kind(arg.get("control")),
        options: arg
            .get("options")
            .and_then(JsonValue::as_array)
            .or_else(|| arg.pointer("/control/options").and_then(JsonValue::as_array))
            .cloned(),
        default_value: arg.get("defaultValue").cloned(),
        default_summary: arg.pointer("/table/defaultValue/summary").cloned(),
        type_name: arg
            .pointer("/type/name")
            .or_else(|| arg.get("type"))
            .and_then(JsonValue::as_str)
            .map(str::to_string),
    }
}

// `control: "select"` and `control: { type: "select" }` are both accepted.
fn control_kind(control: Option<&JsonValue>) -> Option<ControlKind> {
    match control? {
        JsonValue::String(name) => Some(ControlKind::parse(name)),
        JsonValue::Object(obj) => obj
            .get("type")
            .and_then(JsonValue::as_str)
            .map(ControlKind::parse),
        _ => None,
    }
}

fn story_names(stories: Option<&JsonValue>) -> Vec<String> {
    stories
        .and_then(JsonValue::as_array)
        .map(|entries| {
            entries
                .iter()
                .filter_map(|story| story.get("name").and_then(JsonValue::as_str))
                .filter(|name| !name.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn storyblok_config(value: &JsonValue) -> Option<StoryblokConfig> {
    if value.is_null() {
        return None;
    }
    // Entries are read leniently, so only a non-object block fails here.
    match StoryblokConfig::deserialize(value) {
        Ok(config) => Some(config),
        Err(err) => {
            log::warn!("ignoring malformed parameters.storyblok block: {}", err);
            None
        }
    }
}
