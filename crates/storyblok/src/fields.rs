//! Maps Storybook arg definitions onto Storyblok schema fields.

use blokify_core::metadata::deserialize_present;
use blokify_core::{ControlKind, FieldOption, FieldOverride, PropertyDefinition, is_truthy};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use std::collections::BTreeMap;

/// Storyblok field types produced from Storybook controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    /// Single choice (`option`).
    Option,
    /// Multiple choice (`multiselect`).
    Multiselect,
    /// Single-line text (`text`).
    Text,
    /// Numeric input (`number`).
    Number,
    /// Toggle (`boolean`).
    Boolean,
    /// Date/time picker (`datetime`).
    Datetime,
    /// Color picker (`color`).
    Color,
    /// Nested blocks (`bloks`).
    Bloks,
    /// Asset picker (`asset`).
    Asset,
}

impl FieldType {
    /// Looks up the Storyblok type for a control. Unknown or missing controls map to text.
    pub fn for_control(control: Option<&ControlKind>) -> Self {
        let Some(control) = control else {
            return Self::Text;
        };
        match control {
            ControlKind::Select | ControlKind::InlineRadio | ControlKind::Radio => Self::Option,
            ControlKind::MultiSelect | ControlKind::InlineCheck | ControlKind::Check => {
                Self::Multiselect
            }
            ControlKind::Text => Self::Text,
            ControlKind::Number | ControlKind::Range => Self::Number,
            ControlKind::Boolean => Self::Boolean,
            ControlKind::Date => Self::Datetime,
            ControlKind::Color => Self::Color,
            ControlKind::Object | ControlKind::Array => Self::Bloks,
            ControlKind::File => Self::Asset,
            ControlKind::Other(_) => Self::Text,
        }
    }

    /// Storyblok's type tag.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Option => "option",
            Self::Multiselect => "multiselect",
            Self::Text => "text",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Datetime => "datetime",
            Self::Color => "color",
            Self::Bloks => "bloks",
            Self::Asset => "asset",
        }
    }

    /// Whether fields of this type carry an `options` list.
    pub fn is_choice(self) -> bool {
        matches!(self, Self::Option | Self::Multiselect)
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of a block schema's `schema` object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaField {
    /// Storyblok field type tag.
    #[serde(rename = "type")]
    pub field_type: String,
    /// Field description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether the field is required. Only set for author-mapped fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    /// Default value for new blocks.
    #[serde(
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub default_value: Option<JsonValue>,
    /// Label shown in the editor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Choices for option and multiselect fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<FieldOption>>,
    /// Additional keys from an author mapping.
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

impl SchemaField {
    /// A plain text field with a fixed default, used for injected link fields.
    pub fn text_link(
        display_name: impl Into<String>,
        description: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            field_type: FieldType::Text.as_str().to_string(),
            description: Some(description.into()),
            required: None,
            default_value: Some(JsonValue::String(url.into())),
            display_name: Some(display_name.into()),
            options: None,
            extra: Map::new(),
        }
    }
}

/// Maps every prop to a schema field, letting author mappings replace derived fields.
///
/// The result has exactly one entry per prop.
pub fn map_fields(
    props: &BTreeMap<String, PropertyDefinition>,
    custom_mappings: Option<&BTreeMap<String, FieldOverride>>,
) -> BTreeMap<String, SchemaField> {
    props
        .iter()
        .map(|(name, prop)| {
            let custom = custom_mappings.and_then(|m| m.get(name));
            (name.clone(), map_field(prop, custom))
        })
        .collect()
}

/// Maps a single prop, using `custom` wholesale when given.
pub fn map_field(prop: &PropertyDefinition, custom: Option<&FieldOverride>) -> SchemaField {
    match custom {
        Some(custom) => from_override(prop, custom),
        None => derive_field(prop),
    }
}

fn from_override(prop: &PropertyDefinition, custom: &FieldOverride) -> SchemaField {
    SchemaField {
        field_type: custom
            .field_type
            .clone()
            .filter(|field_type| !field_type.is_empty())
            .unwrap_or_else(|| FieldType::Text.as_str().to_string()),
        description: custom
            .description
            .clone()
            .or_else(|| prop.description.clone()),
        required: Some(custom.required.unwrap_or(false)),
        default_value: custom
            .default_value
            .clone()
            .or_else(|| prop.default_value.clone()),
        display_name: custom.display_name.clone(),
        options: custom.options.clone(),
        extra: custom.extra.clone(),
    }
}

fn derive_field(prop: &PropertyDefinition) -> SchemaField {
    let field_type = FieldType::for_control(prop.control.as_ref());

    // The summary is display text here; it is never parsed back into a value.
    let default_value = prop.default_value.clone().or_else(|| {
        prop.default_summary
            .as_ref()
            .filter(|summary| is_truthy(summary))
            .cloned()
    });

    let options = if field_type.is_choice() {
        prop.options
            .as_ref()
            .map(|values| values.iter().filter_map(FieldOption::from_value).collect())
    } else {
        None
    };

    SchemaField {
        field_type: field_type.as_str().to_string(),
        description: prop.description.clone(),
        required: None,
        default_value,
        display_name: None,
        options,
        extra: Map::new(),
    }
}
