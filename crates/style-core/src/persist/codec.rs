//! YAML codec for style trees.
//!
//! The text form is the one `clang-format --dump-config` writes: one
//! top-level mapping, keys in schema order, enums as their member names,
//! nested structs as nested mappings and lists as sequences.  An optional
//! leaf that is absent is written as `null`.
//!
//! Decoding overlays the document onto a base style rather than building a
//! tree from scratch, so a partial document (say, just `IndentWidth: 4`) is a
//! complete style.  The base is LLVM unless the document names another preset
//! in a top-level `BasedOnStyle` key.  Every key must match a schema field and
//! every value must match that field's shape; anything else is a
//! [`SerializationFormatError`].

use serde_yaml::{Mapping, Number, Value};
use thiserror::Error;
use tracing::debug;

use crate::domain::node::{ScalarKind, ScalarValue, StyleNode};
use crate::domain::path::StylePath;
use crate::style::presets::Preset;

/// Key naming the preset a document is layered on.
pub const BASED_ON_STYLE_KEY: &str = "BasedOnStyle";

/// Errors produced while converting between a style tree and its text form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SerializationFormatError {
    #[error("malformed style text: {0}")]
    Syntax(String),

    #[error("style text must be a mapping at the top level, found {0}")]
    NotAMapping(&'static str),

    #[error("unknown style option `{path}`")]
    UnknownKey { path: String },

    #[error("`{path}` expects {expected}, found {found}")]
    TypeMismatch {
        path: String,
        expected: String,
        found: &'static str,
    },

    #[error("`{path}`: `{name}` is not a member of {enum_type}")]
    UnknownEnumMember {
        path: String,
        enum_type: &'static str,
        name: String,
    },

    #[error("`BasedOnStyle: {0}` does not name a known preset")]
    UnknownBasedOnStyle(String),

    #[error("failed to write style text: {0}")]
    Emit(String),
}

// ── Serialize ─────────────────────────────────────────────────────────────────

/// Writes `style` as YAML text.
pub fn serialize_style(style: &StyleNode) -> Result<String, SerializationFormatError> {
    serde_yaml::to_string(&to_value(style)).map_err(|e| SerializationFormatError::Emit(e.to_string()))
}

fn to_value(node: &StyleNode) -> Value {
    match node {
        StyleNode::Scalar(v) => scalar_value(v),
        StyleNode::Optional { value, .. } => value.as_ref().map(scalar_value).unwrap_or(Value::Null),
        StyleNode::Enum(v) => Value::String(v.name().to_string()),
        StyleNode::List(l) => Value::Sequence(l.items().iter().map(to_value).collect()),
        StyleNode::Struct(s) => {
            let mut map = Mapping::new();
            for (name, child) in s.fields() {
                map.insert(Value::String(name.to_string()), to_value(child));
            }
            Value::Mapping(map)
        }
    }
}

fn scalar_value(v: &ScalarValue) -> Value {
    match v {
        ScalarValue::Int(i) => Value::Number(Number::from(*i)),
        ScalarValue::Bool(b) => Value::Bool(*b),
        ScalarValue::Text(t) => Value::String(t.clone()),
    }
}

// ── Deserialize ───────────────────────────────────────────────────────────────

/// Parses YAML text into a complete style.
pub fn deserialize_style(text: &str) -> Result<StyleNode, SerializationFormatError> {
    let document: Value =
        serde_yaml::from_str(text).map_err(|e| SerializationFormatError::Syntax(e.to_string()))?;
    let Value::Mapping(mut map) = document else {
        return Err(SerializationFormatError::NotAMapping(describe(&document)));
    };

    let base = match map.remove(BASED_ON_STYLE_KEY) {
        Some(Value::String(name)) => {
            Preset::from_name(&name).ok_or(SerializationFormatError::UnknownBasedOnStyle(name))?
        }
        Some(other) => {
            return Err(SerializationFormatError::TypeMismatch {
                path: BASED_ON_STYLE_KEY.to_string(),
                expected: "a preset name".to_string(),
                found: describe(&other),
            })
        }
        None => Preset::Llvm,
    };
    debug!(base = base.name(), keys = map.len(), "decoding style text");

    let mut style = base.style();
    overlay(&mut style, &Value::Mapping(map), &StylePath::root())?;
    Ok(style)
}

/// Writes `value` over `node`, keeping everything `value` does not mention.
fn overlay(node: &mut StyleNode, value: &Value, path: &StylePath) -> Result<(), SerializationFormatError> {
    match node {
        StyleNode::Struct(s) => {
            let Value::Mapping(map) = value else {
                return Err(mismatch(path, "a mapping", value));
            };
            for (key, child_value) in map {
                let Value::String(key) = key else {
                    return Err(mismatch(path, "string keys", key));
                };
                let child_path = path.field(key.as_str());
                let child = s.get_mut(key).ok_or_else(|| SerializationFormatError::UnknownKey {
                    path: child_path.to_string(),
                })?;
                overlay(child, child_value, &child_path)?;
            }
            Ok(())
        }
        StyleNode::List(l) => {
            let Value::Sequence(seq) = value else {
                return Err(mismatch(path, "a sequence", value));
            };
            let mut items = Vec::with_capacity(seq.len());
            for (i, item_value) in seq.iter().enumerate() {
                let mut item = l.element().clone();
                overlay(&mut item, item_value, &path.index(i))?;
                items.push(item);
            }
            l.replace_items(items);
            Ok(())
        }
        StyleNode::Scalar(current) => {
            *current = read_scalar(current.kind(), value, path)?;
            Ok(())
        }
        StyleNode::Optional { kind, value: slot } => {
            *slot = match value {
                Value::Null => None,
                other => Some(read_scalar(*kind, other, path)?),
            };
            Ok(())
        }
        StyleNode::Enum(current) => {
            let Value::String(name) = value else {
                return Err(mismatch(path, "an enum member name", value));
            };
            *current = current
                .with_member(name)
                .ok_or_else(|| SerializationFormatError::UnknownEnumMember {
                    path: path.to_string(),
                    enum_type: current.enum_type().name,
                    name: name.clone(),
                })?;
            Ok(())
        }
    }
}

fn read_scalar(kind: ScalarKind, value: &Value, path: &StylePath) -> Result<ScalarValue, SerializationFormatError> {
    match (kind, value) {
        (ScalarKind::Int, Value::Number(n)) => n
            .as_i64()
            .map(ScalarValue::Int)
            .ok_or_else(|| mismatch(path, "an integer", value)),
        (ScalarKind::Bool, Value::Bool(b)) => Ok(ScalarValue::Bool(*b)),
        (ScalarKind::Text, Value::String(s)) => Ok(ScalarValue::Text(s.clone())),
        // Plain scalars such as `CommentPragmas: 42` are still text.
        (ScalarKind::Text, Value::Number(n)) => Ok(ScalarValue::Text(n.to_string())),
        (ScalarKind::Text, Value::Bool(b)) => Ok(ScalarValue::Text(b.to_string())),
        (kind, other) => Err(mismatch(path, &kind.to_string(), other)),
    }
}

fn mismatch(path: &StylePath, expected: &str, found: &Value) -> SerializationFormatError {
    SerializationFormatError::TypeMismatch {
        path: path.describe(),
        expected: expected.to_string(),
        found: describe(found),
    }
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(n) if n.is_i64() || n.is_u64() => "an integer",
        Value::Number(_) => "a float",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::navigate::resolve;

    #[test]
    fn test_serialize_writes_keys_in_schema_order() {
        let text = serialize_style(&Preset::Llvm.style()).unwrap();
        let language = text.find("Language:").unwrap();
        let column_limit = text.find("ColumnLimit:").unwrap();
        let use_tab = text.find("UseTab:").unwrap();
        assert!(language < column_limit && column_limit < use_tab);
    }

    #[test]
    fn test_serialize_writes_absent_optional_as_null() {
        let text = serialize_style(&Preset::Llvm.style()).unwrap();
        assert!(text.contains("BracedInitializerIndentWidth: null"));
    }

    #[test]
    fn test_deserialize_partial_document_overlays_llvm() {
        let style = deserialize_style("IndentWidth: 4\n").unwrap();
        assert_eq!(style.field("IndentWidth"), Some(&StyleNode::int(4)));
        assert_eq!(style.field("ColumnLimit"), Some(&StyleNode::int(80)));
    }

    #[test]
    fn test_deserialize_based_on_style_selects_preset() {
        let style = deserialize_style("BasedOnStyle: webkit\nColumnLimit: 100\n").unwrap();
        let mut expected = Preset::WebKit.style();
        if let StyleNode::Struct(s) = &mut expected {
            s.set("ColumnLimit", StyleNode::int(100));
        }
        assert_eq!(style, expected);
    }

    #[test]
    fn test_deserialize_nested_struct_field() {
        let style = deserialize_style("BraceWrapping:\n  AfterClass: true\n").unwrap();
        let path = StylePath::parse("BraceWrapping.AfterClass").unwrap();
        assert_eq!(resolve(&style, &path).unwrap(), &StyleNode::boolean(true));
    }

    #[test]
    fn test_deserialize_unknown_key_fails() {
        let err = deserialize_style("indent_width: 4\n").unwrap_err();
        assert_eq!(
            err,
            SerializationFormatError::UnknownKey {
                path: "indent_width".into()
            }
        );
    }

    #[test]
    fn test_deserialize_wrong_value_type_fails() {
        let err = deserialize_style("IndentWidth: not-a-number\n").unwrap_err();
        assert!(matches!(err, SerializationFormatError::TypeMismatch { .. }));
    }

    #[test]
    fn test_deserialize_unknown_enum_member_fails() {
        let err = deserialize_style("PointerAlignment: Sideways\n").unwrap_err();
        assert!(matches!(
            err,
            SerializationFormatError::UnknownEnumMember { enum_type: "PointerAlignmentStyle", .. }
        ));
    }

    #[test]
    fn test_deserialize_unknown_based_on_style_fails() {
        let err = deserialize_style("BasedOnStyle: Linux\n").unwrap_err();
        assert_eq!(err, SerializationFormatError::UnknownBasedOnStyle("Linux".into()));
    }

    #[test]
    fn test_deserialize_scalar_document_is_not_a_mapping() {
        let err = deserialize_style("just some words").unwrap_err();
        assert_eq!(err, SerializationFormatError::NotAMapping("a string"));
    }

    #[test]
    fn test_deserialize_broken_yaml_is_syntax_error() {
        let err = deserialize_style("IndentWidth: [1, 2\n").unwrap_err();
        assert!(matches!(err, SerializationFormatError::Syntax(_)));
    }

    #[test]
    fn test_deserialize_optional_accepts_value_or_null() {
        let style = deserialize_style("BracedInitializerIndentWidth: 4\n").unwrap();
        let path = StylePath::parse("BracedInitializerIndentWidth").unwrap();
        assert_eq!(
            resolve(&style, &path).unwrap(),
            &StyleNode::present(ScalarValue::Int(4))
        );

        let style = deserialize_style("BracedInitializerIndentWidth: null\n").unwrap();
        assert_eq!(
            resolve(&style, &path).unwrap(),
            &StyleNode::absent(ScalarKind::Int)
        );
    }
}
