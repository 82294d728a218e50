//! Indented JSON output matching `JSON.stringify(value, null, indent)`.

use crate::error::{BlokifyError, Result};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

/// Indent width used when the caller does not choose one.
pub const DEFAULT_INDENT: usize = 2;

/// Widths above this are clamped, as `JSON.stringify` does.
const MAX_INDENT: usize = 10;

/// Serializes `value` as JSON text indented by `indent` spaces.
///
/// An indent of `0` produces compact output.
pub fn to_json_string<T>(value: &T, indent: usize) -> Result<String>
where
    T: Serialize + ?Sized,
{
    let width = indent.min(MAX_INDENT);
    if width == 0 {
        return serde_json::to_string(value).map_err(BlokifyError::Serialization);
    }

    let indent_bytes = vec![b' '; width];
    let mut out = Vec::with_capacity(256);
    let mut serializer = Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(&indent_bytes));
    value
        .serialize(&mut serializer)
        .map_err(BlokifyError::Serialization)?;

    String::from_utf8(out).map_err(|err| {
        BlokifyError::Serialization(<serde_json::Error as serde::ser::Error>::custom(err))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn default_indent_matches_two_spaces() {
        let text = to_json_string(&json!({ "a": [1, 2] }), DEFAULT_INDENT).unwrap();
        assert_eq!(text, "{\n  \"a\": [\n    1,\n    2\n  ]\n}");
    }

    #[test]
    fn zero_indent_is_compact() {
        let text = to_json_string(&json!({ "a": true }), 0).unwrap();
        assert_eq!(text, "{\"a\":true}");
    }

    #[test]
    fn wide_indent_is_clamped() {
        let text = to_json_string(&json!([1]), 40).unwrap();
        assert_eq!(text, format!("[\n{}1\n]", " ".repeat(10)));
    }

    #[test]
    fn empty_containers_stay_inline() {
        let text = to_json_string(&json!({ "all_presets": [], "schema": {} }), 2).unwrap();
        assert_eq!(text, "{\n  \"all_presets\": [],\n  \"schema\": {}\n}");
    }
}
