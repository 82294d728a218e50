//! Builds pasteable Storyblok block instances.
//!
//! Unlike the schema's field defaults, instance values are real typed values:
//! a docs-table summary such as `"false"` or `"[]"` is parsed back into JSON
//! before it is used.

use blokify_core::{
    ComponentMetadata, ControlKind, PropertyDefinition, is_truthy, strip_whitespace,
    to_kebab_case,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use uuid::Uuid;

/// Keys owned by the block envelope; props with these names are not copied.
const ENVELOPE_KEYS: [&str; 3] = ["id", "_uid", "component"];

/// Options for [`generate_instance`].
#[derive(Debug, Clone)]
pub struct InstanceOptions {
    /// Prefix prepended to the component name.
    pub name_prefix: String,
    /// Fill in a value for every prop.
    pub include_all_props: bool,
    /// Values to use instead of the inferred defaults.
    pub overrides: Map<String, JsonValue>,
    /// Kebab-case the component id instead of keeping its casing.
    pub use_kebab_case: bool,
}

impl Default for InstanceOptions {
    fn default() -> Self {
        Self {
            name_prefix: String::new(),
            include_all_props: true,
            overrides: Map::new(),
            use_kebab_case: false,
        }
    }
}

/// A block as Storyblok's editor stores it on its clipboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockInstance {
    /// Always empty: Storyblok's marker for a block that was never saved.
    pub id: String,
    /// Random UUID v4 identifying this block.
    #[serde(rename = "_uid")]
    pub uid: String,
    /// Technical name of the block's component.
    pub component: String,
    /// Prop values keyed by prop name.
    #[serde(flatten)]
    pub values: Map<String, JsonValue>,
}

/// Resolves the component id for an instance.
///
/// A configured block name is used as-is; otherwise the prefixed component name is
/// kebab-cased or stripped of whitespace depending on `use_kebab_case`.
pub fn component_id(metadata: &ComponentMetadata, options: &InstanceOptions) -> String {
    if let Some(block_name) = metadata.block_name() {
        return block_name.to_string();
    }
    let full_name = format!("{}{}", options.name_prefix, metadata.component_name);
    if options.use_kebab_case {
        to_kebab_case(&full_name)
    } else {
        strip_whitespace(&full_name)
    }
}

/// Generates one block instance with a fresh `_uid`.
///
/// Props named `id`, `_uid` or `component` are left out so they never replace the
/// block envelope.
pub fn generate_instance(metadata: &ComponentMetadata, options: &InstanceOptions) -> BlockInstance {
    let component = component_id(metadata, options);
    let mut values = Map::new();

    if options.include_all_props {
        for (name, prop) in &metadata.props {
            if ENVELOPE_KEYS.contains(&name.as_str()) {
                log::warn!(
                    "skipping prop {} on {}: name collides with the block envelope",
                    name,
                    component
                );
                continue;
            }
            let value = options
                .overrides
                .get(name)
                .cloned()
                .unwrap_or_else(|| infer_default(prop));
            values.insert(name.clone(), value);
        }
    }

    let instance = BlockInstance {
        id: String::new(),
        uid: Uuid::new_v4().to_string(),
        component,
        values,
    };
    log::debug!(
        "generated {} instance {} with {} values",
        instance.component,
        instance.uid,
        instance.values.len()
    );
    instance
}

/// Generates `count` independent instances, each with its own `_uid`.
pub fn generate_instances(
    metadata: &ComponentMetadata,
    count: usize,
    options: &InstanceOptions,
) -> Vec<BlockInstance> {
    (0..count)
        .map(|_| generate_instance(metadata, options))
        .collect()
}

/// Wraps a single generated instance in the array a `bloks` field expects on paste.
pub fn generate_clipboard_payload(
    metadata: &ComponentMetadata,
    options: &InstanceOptions,
) -> Vec<BlockInstance> {
    vec![generate_instance(metadata, options)]
}

/// Infers the instance value for a prop.
///
/// Order: declared default, then the docs-table summary (a string is parsed as
/// JSON, or kept as-is when it is not JSON; any other value, `null` included, is
/// used directly), then a zero value for the control.
pub fn infer_default(prop: &PropertyDefinition) -> JsonValue {
    if let Some(value) = &prop.default_value {
        return value.clone();
    }
    if let Some(summary) = &prop.default_summary {
        return parse_summary(summary);
    }
    zero_value(prop)
}

fn parse_summary(summary: &JsonValue) -> JsonValue {
    match summary {
        JsonValue::String(text) => {
            serde_json::from_str(text).unwrap_or_else(|_| summary.clone())
        }
        other => other.clone(),
    }
}

fn zero_value(prop: &PropertyDefinition) -> JsonValue {
    let Some(control) = prop.control.as_ref() else {
        return JsonValue::String(String::new());
    };
    match control {
        ControlKind::Boolean => JsonValue::Bool(false),
        ControlKind::Number | ControlKind::Range => JsonValue::from(0),
        // A falsy first option reads as no option at all.
        kind if kind.is_single_choice() => prop
            .options
            .as_ref()
            .and_then(|options| options.first())
            .filter(|first| is_truthy(first))
            .cloned()
            .unwrap_or_else(|| JsonValue::String(String::new())),
        kind if kind.is_multi_choice() || kind.is_composite() => JsonValue::Array(Vec::new()),
        _ => JsonValue::String(String::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blokify_core::StoryblokConfig;
    use serde_json::json;
    use std::collections::HashSet;

    fn button() -> ComponentMetadata {
        ComponentMetadata::new("Button").with_prop(
            PropertyDefinition::new("variant")
                .with_control(ControlKind::Select)
                .with_options(["primary", "secondary"]),
        )
    }

    fn is_v4_layout(uid: &str) -> bool {
        let bytes = uid.as_bytes();
        bytes.len() == 36
            && bytes.iter().enumerate().all(|(i, b)| match i {
                8 | 13 | 18 | 23 => *b == b'-',
                _ => b.is_ascii_digit() || (b'a'..=b'f').contains(b),
            })
            && bytes[14] == b'4'
            && matches!(bytes[19], b'8' | b'9' | b'a' | b'b')
    }

    #[test]
    fn button_instance() {
        let instance = generate_instance(&button(), &InstanceOptions::default());
        assert_eq!(instance.id, "");
        assert_eq!(instance.component, "Button");
        assert_eq!(instance.values.get("variant"), Some(&json!("primary")));
        assert!(is_v4_layout(&instance.uid), "uid: {}", instance.uid);
    }

    #[test]
    fn envelope_serializes_first() {
        let instance = generate_instance(&button(), &InstanceOptions::default());
        let text = serde_json::to_string(&instance).unwrap();
        assert_eq!(
            text,
            format!(
                "{{\"id\":\"\",\"_uid\":\"{}\",\"component\":\"Button\",\"variant\":\"primary\"}}",
                instance.uid
            )
        );
        let parsed: BlockInstance = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, instance);
    }

    #[test]
    fn uids_are_unique() {
        let metadata = button();
        let options = InstanceOptions::default();
        let mut seen = HashSet::new();
        for _ in 0..10_000 {
            let instance = generate_instance(&metadata, &options);
            assert!(is_v4_layout(&instance.uid), "uid: {}", instance.uid);
            assert!(seen.insert(instance.uid));
        }
        assert_eq!(seen.len(), 10_000);
    }

    #[test]
    fn component_id_resolution() {
        let metadata = ComponentMetadata::new("Hero Banner");
        let mut options = InstanceOptions {
            name_prefix: "Sb ".into(),
            ..Default::default()
        };
        assert_eq!(component_id(&metadata, &options), "SbHeroBanner");

        options.use_kebab_case = true;
        assert_eq!(component_id(&metadata, &options), "sb-hero-banner");

        let metadata = metadata.with_config(StoryblokConfig {
            block_name: Some("Hero_Banner".into()),
            ..Default::default()
        });
        assert_eq!(component_id(&metadata, &options), "Hero_Banner");
    }

    #[test]
    fn summary_is_parsed_as_json() {
        let prop = PropertyDefinition::new("disabled")
            .with_control(ControlKind::Boolean)
            .with_summary("false");
        assert_eq!(infer_default(&prop), json!(false));

        let prop = PropertyDefinition::new("items").with_summary("[]");
        assert_eq!(infer_default(&prop), json!([]));

        let prop = PropertyDefinition::new("size").with_summary("\"medium\"");
        assert_eq!(infer_default(&prop), json!("medium"));

        let prop = PropertyDefinition::new("count").with_summary(json!(7));
        assert_eq!(infer_default(&prop), json!(7));
    }

    #[test]
    fn null_summary_is_used_before_options() {
        let prop = PropertyDefinition::new("v")
            .with_control(ControlKind::Select)
            .with_options(["a", "b"])
            .with_summary(JsonValue::Null);
        assert_eq!(infer_default(&prop), JsonValue::Null);
    }

    #[test]
    fn unparsable_summary_stays_a_string() {
        let prop = PropertyDefinition::new("mode")
            .with_control(ControlKind::Boolean)
            .with_summary("not-json");
        assert_eq!(infer_default(&prop), json!("not-json"));

        let prop = PropertyDefinition::new("empty").with_summary("");
        assert_eq!(infer_default(&prop), json!(""));
    }

    #[test]
    fn declared_default_wins() {
        let prop = PropertyDefinition::new("count")
            .with_control(ControlKind::Number)
            .with_default(json!(3))
            .with_summary("7");
        assert_eq!(infer_default(&prop), json!(3));

        let prop = PropertyDefinition::new("image").with_default(JsonValue::Null);
        assert_eq!(infer_default(&prop), JsonValue::Null);
    }

    #[test]
    fn zero_values_by_control() {
        let cases = [
            (ControlKind::Boolean, json!(false)),
            (ControlKind::Number, json!(0)),
            (ControlKind::Range, json!(0)),
            (ControlKind::Select, json!("")),
            (ControlKind::Radio, json!("")),
            (ControlKind::MultiSelect, json!([])),
            (ControlKind::InlineCheck, json!([])),
            (ControlKind::Object, json!([])),
            (ControlKind::Array, json!([])),
            (ControlKind::Text, json!("")),
            (ControlKind::Date, json!("")),
            (ControlKind::Other("slider".into()), json!("")),
        ];
        for (control, expected) in cases {
            let prop = PropertyDefinition::new("p").with_control(control.clone());
            assert_eq!(infer_default(&prop), expected, "control {control}");
        }
        assert_eq!(infer_default(&PropertyDefinition::new("p")), json!(""));

        let prop = PropertyDefinition::new("p")
            .with_control(ControlKind::InlineRadio)
            .with_options(["left", "right"]);
        assert_eq!(infer_default(&prop), json!("left"));

        let prop = PropertyDefinition::new("n")
            .with_control(ControlKind::Select)
            .with_options([json!(1), json!(2)]);
        assert_eq!(infer_default(&prop), json!(1));

        let prop = PropertyDefinition::new("n")
            .with_control(ControlKind::Select)
            .with_options([json!(0), json!(2)]);
        assert_eq!(infer_default(&prop), json!(""));
    }

    #[test]
    fn overrides_replace_defaults() {
        let mut overrides = Map::new();
        overrides.insert("variant".into(), json!("secondary"));
        overrides.insert("unknown".into(), json!(1));
        let options = InstanceOptions {
            overrides,
            ..Default::default()
        };
        let instance = generate_instance(&button(), &options);
        assert_eq!(instance.values.get("variant"), Some(&json!("secondary")));
        assert!(!instance.values.contains_key("unknown"));

        let mut overrides = Map::new();
        overrides.insert("variant".into(), JsonValue::Null);
        let options = InstanceOptions {
            overrides,
            ..Default::default()
        };
        let instance = generate_instance(&button(), &options);
        assert_eq!(instance.values.get("variant"), Some(&JsonValue::Null));
    }

    #[test]
    fn props_can_be_left_out() {
        let options = InstanceOptions {
            include_all_props: false,
            ..Default::default()
        };
        let instance = generate_instance(&button(), &options);
        assert!(instance.values.is_empty());
    }

    #[test]
    fn envelope_keys_are_protected() {
        let metadata = button()
            .with_prop(PropertyDefinition::new("id").with_default(json!("abc")))
            .with_prop(PropertyDefinition::new("component").with_default(json!("x")));
        let instance = generate_instance(&metadata, &InstanceOptions::default());
        assert_eq!(instance.id, "");
        assert_eq!(instance.component, "Button");
        assert_eq!(instance.values.len(), 1);
    }

    #[test]
    fn clipboard_payload_wraps_one_block() {
        let payload = generate_clipboard_payload(&button(), &InstanceOptions::default());
        assert_eq!(payload.len(), 1);
        assert_eq!(payload[0].component, "Button");
    }

    #[test]
    fn multiple_instances_have_distinct_uids() {
        let blocks = generate_instances(&button(), 3, &InstanceOptions::default());
        assert_eq!(blocks.len(), 3);
        let uids: HashSet<_> = blocks.iter().map(|b| b.uid.as_str()).collect();
        assert_eq!(uids.len(), 3);
        assert!(generate_instances(&button(), 0, &InstanceOptions::default()).is_empty());
    }
}
