use napi_derive::napi;
use serde_json::Value as JsonValue;

/// Options for schema generation.
#[napi(object)]
#[derive(Debug, Clone, Default)]
pub struct SchemaOptions {
    /// Storybook base URL for the docs link. Defaults to `http://localhost:6006`.
    pub base_docs_url: Option<String>,
    /// Prefix prepended to the component name before kebab-casing.
    pub name_prefix: Option<String>,
    /// Inject the `_storybook_link` field. Defaults to true.
    pub add_docs_link: Option<bool>,
    /// Indent width for text output. Defaults to 2.
    pub indent: Option<u32>,
}

/// Options for block instance and clipboard generation.
#[napi(object)]
#[derive(Debug, Clone, Default)]
pub struct InstanceOptions {
    /// Prefix prepended to the component name.
    pub name_prefix: Option<String>,
    /// Fill in a value for every prop. Defaults to true.
    pub include_all_props: Option<bool>,
    /// Values keyed by prop name that replace inferred defaults.
    pub overrides: Option<JsonValue>,
    /// Kebab-case the component id. Defaults to false.
    pub use_kebab_case: Option<bool>,
    /// Indent width for text output. Defaults to 2.
    pub indent: Option<u32>,
}
