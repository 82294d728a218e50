//! Builds Storyblok block schema documents from component metadata.

use crate::fields::{SchemaField, map_fields};
use blokify_core::{
    BlokifyError, ComponentMetadata, DEFAULT_INDENT, Result, StoryblokConfig, docs_path_segment,
    spaced_display_name, to_json_string, to_kebab_case,
};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;

/// Storybook dev server used for docs links when no base URL is configured.
pub const DEFAULT_STORYBOOK_URL: &str = "http://localhost:6006";

/// Schema key of the injected Storybook docs link.
pub const STORYBOOK_LINK_FIELD: &str = "_storybook_link";

/// Schema key of the injected design link.
pub const FIGMA_LINK_FIELD: &str = "_figma_link";

/// Options for [`generate_schema`].
#[derive(Debug, Clone)]
pub struct SchemaOptions {
    /// Storybook base URL for the synthesized docs link.
    pub base_docs_url: Option<String>,
    /// Prefix prepended to the component name before kebab-casing.
    pub name_prefix: String,
    /// Inject the `_storybook_link` field.
    pub add_docs_link: bool,
}

impl Default for SchemaOptions {
    fn default() -> Self {
        Self {
            base_docs_url: None,
            name_prefix: String::new(),
            add_docs_link: true,
        }
    }
}

/// A Storyblok block (component) definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaDocument {
    /// Technical block name.
    pub name: String,
    /// Name shown in the block library.
    pub display_name: String,
    /// Block description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Field definitions keyed by field name.
    pub schema: BTreeMap<String, SchemaField>,
    /// Block icon or preview image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Whether the block can be used as a content type.
    pub is_root: bool,
    /// Whether the block can be nested in `bloks` fields.
    pub is_nestable: bool,
    /// Presets attached to the block.
    pub all_presets: Vec<JsonValue>,
    /// Default preset.
    pub preset_id: Option<String>,
    /// Same as `name`.
    pub real_name: String,
    /// Block library folder.
    pub component_group_uuid: Option<String>,
}

impl SchemaDocument {
    /// Parses a schema document from JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text)
            .map_err(|err| BlokifyError::invalid_input(format!("Invalid schema document: {err}")))
    }

    /// Serializes with the default indent.
    pub fn to_json(&self) -> Result<String> {
        format_schema(self, DEFAULT_INDENT)
    }
}

/// Storybook docs page URL for a component.
///
/// ```
/// use blokify_storyblok::storybook_docs_url;
///
/// assert_eq!(
///     storybook_docs_url("Button", None),
///     "http://localhost:6006/?path=/docs/button--docs"
/// );
/// ```
pub fn storybook_docs_url(component_name: &str, base_url: Option<&str>) -> String {
    let base = base_url
        .filter(|url| !url.is_empty())
        .unwrap_or(DEFAULT_STORYBOOK_URL);
    format!("{}/?path=/docs/{}--docs", base, docs_path_segment(component_name))
}

/// Generates the block schema for a component.
pub fn generate_schema(metadata: &ComponentMetadata, options: &SchemaOptions) -> SchemaDocument {
    let config = metadata.storyblok_config.as_ref();

    let block_name = config
        .and_then(StoryblokConfig::block_name)
        .map(str::to_string)
        .unwrap_or_else(|| {
            to_kebab_case(&format!("{}{}", options.name_prefix, metadata.component_name))
        });

    let display_name = config
        .and_then(StoryblokConfig::display_name)
        .map(str::to_string)
        .unwrap_or_else(|| spaced_display_name(&metadata.component_name));

    let mut schema = map_fields(
        &metadata.props,
        config.and_then(|c| c.field_mappings.as_ref()),
    );

    if options.add_docs_link {
        let url = config
            .and_then(StoryblokConfig::documentation_url)
            .map(str::to_string)
            .unwrap_or_else(|| {
                storybook_docs_url(&metadata.component_name, options.base_docs_url.as_deref())
            });
        schema.insert(
            STORYBOOK_LINK_FIELD.to_string(),
            SchemaField::text_link(
                "Storybook Documentation",
                "Link to Storybook documentation",
                url,
            ),
        );
    }

    if let Some(design_url) = config.and_then(StoryblokConfig::design_url) {
        schema.insert(
            FIGMA_LINK_FIELD.to_string(),
            SchemaField::text_link("Figma Design", "Link to Figma design", design_url),
        );
    }

    log::debug!(
        "generated schema {} with {} fields",
        block_name,
        schema.len()
    );

    SchemaDocument {
        name: block_name.clone(),
        display_name,
        description: metadata.description.clone(),
        schema,
        image: config.and_then(StoryblokConfig::icon).map(str::to_string),
        is_root: false,
        is_nestable: true,
        all_presets: Vec::new(),
        preset_id: None,
        real_name: block_name,
        component_group_uuid: None,
    }
}

/// Serializes a schema document for display or copying.
pub fn format_schema(schema: &SchemaDocument, indent: usize) -> Result<String> {
    to_json_string(schema, indent)
}
