#![deny(missing_docs)]
//! blokify core: story context extraction, component metadata, and naming helpers.

/// Naming and casing helpers shared by the generators.
pub mod case;
/// Core error types.
pub mod error;
/// Story context to component metadata extraction.
pub mod extract;
/// Indented JSON formatting.
pub mod format;
/// Canonical component metadata model.
pub mod metadata;

pub use case::{
    capitalize_first, docs_path_segment, spaced_display_name, strip_whitespace, to_kebab_case,
};
pub use error::{BlokifyError, Result};
pub use extract::{UNKNOWN_COMPONENT, extract_metadata, extract_metadata_from_str};
pub use format::{DEFAULT_INDENT, to_json_string};
pub use metadata::{
    ComponentMetadata, ControlKind, FieldOption, FieldOverride, PropertyDefinition,
    StoryblokConfig, is_truthy, scalar_text,
};
