#![deny(missing_docs)]
//! blokify Storyblok engine: field mapping, block schemas, and pasteable block instances.

/// Storybook control to Storyblok field mapping.
pub mod fields;
/// Block instance generation.
pub mod instance;
/// Clipboard payload shapes and the paste contract.
pub mod payload;
/// Block schema generation.
pub mod schema;

pub use fields::{FieldType, SchemaField, map_field, map_fields};
pub use instance::{
    BlockInstance, InstanceOptions, generate_clipboard_payload, generate_instance,
    generate_instances, infer_default,
};
pub use payload::{ClipboardFormat, check_paste_contract, clipboard_payload, clipboard_text};
pub use schema::{
    DEFAULT_STORYBOOK_URL, SchemaDocument, SchemaOptions, format_schema, generate_schema,
    storybook_docs_url,
};
