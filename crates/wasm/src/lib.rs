use blokify_core::{ComponentMetadata, DEFAULT_INDENT, extract_metadata as extract};
use blokify_storyblok::{ClipboardFormat, InstanceOptions, SchemaOptions};
use serde::Serialize;
use serde::de::DeserializeOwned;
use wasm_bindgen::JsValue;
use wasm_bindgen::prelude::*;

// ============================================================================
// Config
// ============================================================================

/// Options accepted by the schema functions.
/// Mirrors the NAPI `SchemaOptions`; the addon's original option names are accepted too.
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct WasmSchemaConfig {
    #[serde(default, alias = "baseDocsUrl", alias = "storybookBaseUrl")]
    pub base_docs_url: Option<String>,
    #[serde(default, alias = "namePrefix", alias = "componentPrefix")]
    pub name_prefix: Option<String>,
    #[serde(default, alias = "addDocsLink", alias = "addStorybookLink")]
    pub add_docs_link: Option<bool>,
    #[serde(default)]
    pub indent: Option<usize>,
}

/// Options accepted by the instance and clipboard functions.
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct WasmInstanceConfig {
    #[serde(default, alias = "namePrefix", alias = "componentPrefix")]
    pub name_prefix: Option<String>,
    #[serde(default, alias = "includeAllProps")]
    pub include_all_props: Option<bool>,
    #[serde(default, alias = "customValues")]
    pub overrides: Option<serde_json::Map<String, serde_json::Value>>,
    #[serde(default, alias = "useKebabCase")]
    pub use_kebab_case: Option<bool>,
    #[serde(default)]
    pub indent: Option<usize>,
}

fn parse_config<T: DeserializeOwned + Default>(config: JsValue) -> T {
    if config.is_undefined() || config.is_null() {
        return T::default();
    }
    serde_wasm_bindgen::from_value(config).unwrap_or_default()
}

fn build_schema_options(cfg: &WasmSchemaConfig) -> SchemaOptions {
    SchemaOptions {
        base_docs_url: cfg.base_docs_url.clone(),
        name_prefix: cfg.name_prefix.clone().unwrap_or_default(),
        add_docs_link: cfg.add_docs_link.unwrap_or(true),
    }
}

fn build_instance_options(cfg: WasmInstanceConfig) -> InstanceOptions {
    InstanceOptions {
        name_prefix: cfg.name_prefix.unwrap_or_default(),
        include_all_props: cfg.include_all_props.unwrap_or(true),
        overrides: cfg.overrides.unwrap_or_default(),
        use_kebab_case: cfg.use_kebab_case.unwrap_or(false),
    }
}

// ============================================================================
// Boundary helpers
// ============================================================================

/// Reads a story context passed either as a plain object or as JSON text.
///
/// `undefined` and `null` become JSON `null`, which extraction rejects.
fn read_context(context: JsValue) -> Result<ComponentMetadata, JsError> {
    let value = if context.is_undefined() || context.is_null() {
        serde_json::Value::Null
    } else if let Some(text) = context.as_string() {
        serde_json::from_str(&text)
            .map_err(|e| JsError::new(&format!("Invalid input: story context is not JSON: {}", e)))?
    } else {
        serde_wasm_bindgen::from_value(context)
            .map_err(|e| JsError::new(&format!("Invalid input: {}", e)))?
    };
    Ok(extract(&value)?)
}

fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsError> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}

// ============================================================================
// API
// ============================================================================

/// Extracts normalized component metadata from a story context.
#[wasm_bindgen]
pub fn extract_metadata(context: JsValue) -> Result<JsValue, JsError> {
    let metadata = read_context(context)?;
    to_js(&metadata)
}

/// Generates the Storyblok block schema for a story context.
///
/// # Example (JavaScript)
///
/// ```javascript
/// import { generate_schema } from './blokify_wasm';
///
/// const schema = generate_schema(context, { componentPrefix: 'sb-' });
/// // schema.name === 'sb-button'
/// ```
#[wasm_bindgen]
pub fn generate_schema(context: JsValue, options: JsValue) -> Result<JsValue, JsError> {
    let cfg: WasmSchemaConfig = parse_config(options);
    let metadata = read_context(context)?;
    let schema = blokify_storyblok::generate_schema(&metadata, &build_schema_options(&cfg));
    to_js(&schema)
}

/// Generates the block schema and returns it as indented JSON text.
#[wasm_bindgen]
pub fn format_schema(context: JsValue, options: JsValue) -> Result<String, JsError> {
    let cfg: WasmSchemaConfig = parse_config(options);
    let metadata = read_context(context)?;
    let schema = blokify_storyblok::generate_schema(&metadata, &build_schema_options(&cfg));
    Ok(blokify_storyblok::format_schema(
        &schema,
        cfg.indent.unwrap_or(DEFAULT_INDENT),
    )?)
}

/// Generates one block instance with a fresh `_uid`.
#[wasm_bindgen]
pub fn generate_instance(context: JsValue, options: JsValue) -> Result<JsValue, JsError> {
    let cfg: WasmInstanceConfig = parse_config(options);
    let metadata = read_context(context)?;
    let instance = blokify_storyblok::generate_instance(&metadata, &build_instance_options(cfg));
    to_js(&instance)
}

/// Produces the clipboard text for a story context.
///
/// `format` is `"array"` (default), `"wrapped"`, or `"single"`.
#[wasm_bindgen]
pub fn clipboard_payload(
    context: JsValue,
    format: Option<String>,
    options: JsValue,
) -> Result<String, JsError> {
    let format = match format.as_deref() {
        Some(name) => name.parse::<ClipboardFormat>()?,
        None => ClipboardFormat::default(),
    };
    let cfg: WasmInstanceConfig = parse_config(options);
    let indent = cfg.indent.unwrap_or(DEFAULT_INDENT);
    let metadata = read_context(context)?;
    Ok(blokify_storyblok::clipboard_text(
        &metadata,
        format,
        &build_instance_options(cfg),
        indent,
    )?)
}

/// Checks clipboard text the way the Storyblok paste bookmarklet does and
/// returns the number of blocks it would accept.
#[wasm_bindgen]
pub fn check_paste_contract(text: &str) -> Result<u32, JsError> {
    let count = blokify_storyblok::check_paste_contract(text)?;
    Ok(count as u32)
}
