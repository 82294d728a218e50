//! Canonical component metadata produced by the extractor.

use crate::case::capitalize_first;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value as JsonValue};
use std::collections::BTreeMap;

/// Deserializes an optional value so that an explicit JSON `null` is kept as
/// `Some(Value::Null)` instead of collapsing into `None`.
///
/// Pair with `#[serde(default)]` so a missing key still becomes `None`.
pub fn deserialize_present<'de, D>(deserializer: D) -> Result<Option<JsonValue>, D::Error>
where
    D: Deserializer<'de>,
{
    JsonValue::deserialize(deserializer).map(Some)
}

/// JavaScript truthiness of a JSON value.
///
/// `null`, `false`, `0` and `""` are falsy; every array and object is truthy.
pub fn is_truthy(value: &JsonValue) -> bool {
    match value {
        JsonValue::Null => false,
        JsonValue::Bool(b) => *b,
        JsonValue::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        JsonValue::String(s) => !s.is_empty(),
        JsonValue::Array(_) | JsonValue::Object(_) => true,
    }
}

/// Text form of a scalar: strings as-is, numbers and booleans as JSON text.
pub fn scalar_text(value: &JsonValue) -> Option<String> {
    match value {
        JsonValue::String(text) => Some(text.clone()),
        JsonValue::Number(n) => Some(n.to_string()),
        JsonValue::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

// Wrong-typed values read as unset instead of failing the surrounding record.
fn deserialize_lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match JsonValue::deserialize(deserializer)? {
        JsonValue::String(text) => Some(text),
        _ => None,
    })
}

fn deserialize_field_mappings<'de, D>(
    deserializer: D,
) -> Result<Option<BTreeMap<String, FieldOverride>>, D::Error>
where
    D: Deserializer<'de>,
{
    let JsonValue::Object(entries) = JsonValue::deserialize(deserializer)? else {
        return Ok(None);
    };
    Ok(Some(
        entries
            .into_iter()
            .filter(|(_, entry)| is_truthy(entry))
            .map(|(name, entry)| (name, FieldOverride::from(entry)))
            .collect(),
    ))
}

/// UI control category attached to a Storybook arg.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ControlKind {
    /// `select`
    Select,
    /// `inline-radio`
    InlineRadio,
    /// `radio`
    Radio,
    /// `multi-select`
    MultiSelect,
    /// `inline-check`
    InlineCheck,
    /// `check`
    Check,
    /// `text`
    Text,
    /// `number`
    Number,
    /// `range`
    Range,
    /// `boolean`
    Boolean,
    /// `date`
    Date,
    /// `color`
    Color,
    /// `object`
    Object,
    /// `array`
    Array,
    /// `file`
    File,
    /// Any control name Storybook may add later.
    Other(String),
}

impl ControlKind {
    /// Parses a Storybook control name.
    pub fn parse(name: &str) -> Self {
        match name {
            "select" => Self::Select,
            "inline-radio" => Self::InlineRadio,
            "radio" => Self::Radio,
            "multi-select" => Self::MultiSelect,
            "inline-check" => Self::InlineCheck,
            "check" => Self::Check,
            "text" => Self::Text,
            "number" => Self::Number,
            "range" => Self::Range,
            "boolean" => Self::Boolean,
            "date" => Self::Date,
            "color" => Self::Color,
            "object" => Self::Object,
            "array" => Self::Array,
            "file" => Self::File,
            other => Self::Other(other.to_string()),
        }
    }

    /// Returns the Storybook control name.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Select => "select",
            Self::InlineRadio => "inline-radio",
            Self::Radio => "radio",
            Self::MultiSelect => "multi-select",
            Self::InlineCheck => "inline-check",
            Self::Check => "check",
            Self::Text => "text",
            Self::Number => "number",
            Self::Range => "range",
            Self::Boolean => "boolean",
            Self::Date => "date",
            Self::Color => "color",
            Self::Object => "object",
            Self::Array => "array",
            Self::File => "file",
            Self::Other(name) => name,
        }
    }

    /// Controls that pick exactly one value from a list.
    pub fn is_single_choice(&self) -> bool {
        matches!(self, Self::Select | Self::InlineRadio | Self::Radio)
    }

    /// Controls that pick any number of values from a list.
    pub fn is_multi_choice(&self) -> bool {
        matches!(self, Self::MultiSelect | Self::InlineCheck | Self::Check)
    }

    /// Controls editing nested objects or arrays.
    pub fn is_composite(&self) -> bool {
        matches!(self, Self::Object | Self::Array)
    }
}

impl From<String> for ControlKind {
    fn from(name: String) -> Self {
        Self::parse(&name)
    }
}

impl From<ControlKind> for String {
    fn from(kind: ControlKind) -> Self {
        kind.as_str().to_string()
    }
}

impl std::fmt::Display for ControlKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single Storybook arg definition after extraction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDefinition {
    /// Arg name (the key in `argTypes`).
    pub name: String,
    /// Human-readable description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Control used to edit the arg, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub control: Option<ControlKind>,
    /// Selectable values for choice controls, as Storybook declared them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<JsonValue>>,
    /// Declared `defaultValue`. An explicit `null` counts as declared.
    #[serde(
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub default_value: Option<JsonValue>,
    /// `table.defaultValue.summary`, the default shown in docs tables. An explicit
    /// `null` counts as present.
    #[serde(
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub default_summary: Option<JsonValue>,
    /// `type.name` as inferred by Storybook's docgen.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
}

impl PropertyDefinition {
    /// Creates an empty definition for the given arg name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Sets the control kind.
    pub fn with_control(mut self, control: ControlKind) -> Self {
        self.control = Some(control);
        self
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the choice options.
    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<JsonValue>,
    {
        self.options = Some(options.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the declared default.
    pub fn with_default(mut self, value: JsonValue) -> Self {
        self.default_value = Some(value);
        self
    }

    /// Sets the docs-table default summary.
    pub fn with_summary(mut self, summary: impl Into<JsonValue>) -> Self {
        self.default_summary = Some(summary.into());
        self
    }
}

/// A `{ name, value }` entry of a Storyblok option or multiselect field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldOption {
    /// Label shown in the editor.
    pub name: String,
    /// Stored value.
    pub value: JsonValue,
}

impl FieldOption {
    /// Builds an option from a raw Storybook value, labelling it with the value's
    /// first character upper-cased.
    pub fn from_raw(value: &str) -> Self {
        Self {
            name: capitalize_first(value),
            value: JsonValue::String(value.to_string()),
        }
    }

    /// Builds an option from any scalar Storybook value, keeping the raw value and
    /// labelling it with its text form. Arrays, objects and `null` give `None`.
    pub fn from_value(value: &JsonValue) -> Option<Self> {
        let text = scalar_text(value)?;
        Some(Self {
            name: capitalize_first(&text),
            value: value.clone(),
        })
    }
}

/// Author-supplied replacement for a generated schema field.
///
/// When present for an arg, this record is the whole field: only `type`,
/// `description`, `required` and `default_value` are backfilled when unset.
///
/// Reading one never fails: a known key with the wrong type is dropped, except
/// `options`, which is then kept verbatim in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "JsonValue")]
pub struct FieldOverride {
    /// Storyblok field type.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub field_type: Option<String>,
    /// Field description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether the field is required.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    /// Default value for new blocks. An explicit `null` counts as set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<JsonValue>,
    /// Label shown in the editor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Choices for option fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<FieldOption>>,
    /// Every other Storyblok field key, copied through untouched.
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

fn take_field<T: DeserializeOwned>(fields: &mut Map<String, JsonValue>, key: &str) -> Option<T> {
    let value = fields.remove(key)?;
    match T::deserialize(&value) {
        Ok(parsed) => Some(parsed),
        Err(err) => {
            log::debug!("dropping field mapping key {}: {}", key, err);
            None
        }
    }
}

impl From<JsonValue> for FieldOverride {
    fn from(value: JsonValue) -> Self {
        let JsonValue::Object(mut fields) = value else {
            log::warn!("field mapping is not an object, using an empty override");
            return Self::default();
        };

        let options = match fields.get("options").map(Vec::<FieldOption>::deserialize) {
            Some(Ok(options)) => {
                fields.remove("options");
                Some(options)
            }
            _ => None,
        };

        Self {
            field_type: take_field(&mut fields, "type"),
            description: take_field(&mut fields, "description"),
            required: take_field(&mut fields, "required"),
            default_value: fields.remove("default_value"),
            display_name: take_field(&mut fields, "display_name"),
            options,
            extra: fields,
        }
    }
}

/// The `parameters.storyblok` block a story author can attach to a component.
///
/// Entries are read one by one: a wrong-typed name or URL reads as unset and a
/// falsy field mapping is skipped, so one bad entry never discards the rest.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryblokConfig {
    /// Technical block name (wins over any generated name).
    #[serde(
        default,
        deserialize_with = "deserialize_lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub block_name: Option<String>,
    /// Display name shown in the block library.
    #[serde(
        default,
        deserialize_with = "deserialize_lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub display_name: Option<String>,
    /// Block library category.
    #[serde(
        default,
        deserialize_with = "deserialize_lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub category: Option<String>,
    /// Block icon or preview image.
    #[serde(
        default,
        deserialize_with = "deserialize_lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub icon: Option<String>,
    /// Per-arg field overrides.
    #[serde(
        default,
        deserialize_with = "deserialize_field_mappings",
        skip_serializing_if = "Option::is_none"
    )]
    pub field_mappings: Option<BTreeMap<String, FieldOverride>>,
    /// Storybook documentation link.
    #[serde(
        rename = "documentation",
        alias = "documentationUrl",
        default,
        deserialize_with = "deserialize_lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub documentation_url: Option<String>,
    /// Figma (or other design tool) link.
    #[serde(
        rename = "figmaUrl",
        alias = "designUrl",
        default,
        deserialize_with = "deserialize_lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub design_url: Option<String>,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

impl StoryblokConfig {
    /// Configured block name, ignoring empty strings.
    pub fn block_name(&self) -> Option<&str> {
        non_empty(&self.block_name)
    }

    /// Configured display name, ignoring empty strings.
    pub fn display_name(&self) -> Option<&str> {
        non_empty(&self.display_name)
    }

    /// Configured icon, ignoring empty strings.
    pub fn icon(&self) -> Option<&str> {
        non_empty(&self.icon)
    }

    /// Configured documentation link, ignoring empty strings.
    pub fn documentation_url(&self) -> Option<&str> {
        non_empty(&self.documentation_url)
    }

    /// Configured design link, ignoring empty strings.
    pub fn design_url(&self) -> Option<&str> {
        non_empty(&self.design_url)
    }

    /// Field override for an arg, if one was configured.
    pub fn field_mapping(&self, name: &str) -> Option<&FieldOverride> {
        self.field_mappings.as_ref().and_then(|m| m.get(name))
    }
}

/// Normalized view of one component's documentation metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentMetadata {
    /// Last segment of the story title.
    pub component_name: String,
    /// Component description from the docs parameters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Displayable args keyed by name.
    #[serde(default)]
    pub props: BTreeMap<String, PropertyDefinition>,
    /// Story names, in source order.
    #[serde(default)]
    pub variants: Vec<String>,
    /// Same values as `variants`.
    #[serde(default)]
    pub stories: Vec<String>,
    /// Destination configuration from `parameters.storyblok`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storyblok_config: Option<StoryblokConfig>,
}

impl ComponentMetadata {
    /// Creates metadata with only a component name.
    pub fn new(component_name: impl Into<String>) -> Self {
        Self {
            component_name: component_name.into(),
            ..Default::default()
        }
    }

    /// Adds (or replaces) a prop, keyed by its name.
    pub fn with_prop(mut self, prop: PropertyDefinition) -> Self {
        self.props.insert(prop.name.clone(), prop);
        self
    }

    /// Attaches a destination configuration.
    pub fn with_config(mut self, config: StoryblokConfig) -> Self {
        self.storyblok_config = Some(config);
        self
    }

    /// Configured block name, if any.
    pub fn block_name(&self) -> Option<&str> {
        self.storyblok_config
            .as_ref()
            .and_then(StoryblokConfig::block_name)
    }
}
