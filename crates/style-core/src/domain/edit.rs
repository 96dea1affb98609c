//! Leaf transforms.
//!
//! An [`Edit`] describes one change a UI wants to make to the node at a path.
//! [`Edit::apply`] turns the current node into its replacement without
//! touching the tree; the mutator is responsible for writing it back.

use thiserror::Error;

use crate::domain::classify::{classify, Shape};
use crate::domain::enums::EnumValue;
use crate::domain::navigate::PathResolutionError;
use crate::domain::node::{ScalarKind, ScalarValue, StyleNode};
use crate::domain::path::PathParseError;

/// Errors produced by a rejected edit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error(transparent)]
    Path(#[from] PathResolutionError),

    #[error(transparent)]
    PathSyntax(#[from] PathParseError),

    #[error("expected {expected}, found {found}")]
    ShapeMismatch { expected: &'static str, found: Shape },

    #[error("expected a {expected} value, got a {found} value")]
    ScalarKindMismatch { expected: ScalarKind, found: ScalarKind },

    #[error("`{name}` is not a member of {enum_type}")]
    UnknownEnumMember { enum_type: &'static str, name: String },

    #[error("cannot assign a {found} value to a {expected} field")]
    EnumTypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("`{raw}` is not a valid {kind}")]
    InvalidLiteral { kind: ScalarKind, raw: String },

    #[error("list elements are {found}, not text")]
    NotATextList { found: Shape },
}

/// One requested change to a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit {
    /// Set a scalar, or set (and enable) an optional scalar.
    Replace(ScalarValue),
    /// Set an enum leaf to another value of the same enum type.
    SetEnum(EnumValue),
    /// Set an enum leaf to the member called `name`.
    RenameEnum(String),
    /// Enable an optional leaf with `initial` (or the kind's zero), or
    /// disable it.
    ToggleOptional {
        enabled: bool,
        initial: Option<ScalarValue>,
    },
    /// Replace a text list with one item per line of the given text.
    SetTextLines(String),
    /// Grow a list with prototype copies or truncate it.
    Resize(usize),
}

impl Edit {
    /// Computes the replacement for `node`.
    pub fn apply(&self, node: &StyleNode) -> Result<StyleNode, EditError> {
        match self {
            Edit::Replace(value) => replace(node, value),
            Edit::SetEnum(value) => match node {
                StyleNode::Enum(current) if current.same_type(value) => Ok(StyleNode::Enum(*value)),
                StyleNode::Enum(current) => Err(EditError::EnumTypeMismatch {
                    expected: current.enum_type().name,
                    found: value.enum_type().name,
                }),
                other => Err(shape_mismatch("an enum", other)),
            },
            Edit::RenameEnum(name) => match node {
                StyleNode::Enum(current) => current
                    .with_member(name)
                    .map(StyleNode::Enum)
                    .ok_or_else(|| EditError::UnknownEnumMember {
                        enum_type: current.enum_type().name,
                        name: name.clone(),
                    }),
                other => Err(shape_mismatch("an enum", other)),
            },
            Edit::ToggleOptional { enabled, initial } => match node {
                StyleNode::Optional { kind, .. } => {
                    if !enabled {
                        return Ok(StyleNode::absent(*kind));
                    }
                    let value = initial.clone().unwrap_or_else(|| kind.zero());
                    check_kind(*kind, &value)?;
                    Ok(StyleNode::Optional {
                        kind: *kind,
                        value: Some(value),
                    })
                }
                other => Err(shape_mismatch("an optional scalar", other)),
            },
            Edit::SetTextLines(text) => match node {
                StyleNode::List(list) => {
                    if !matches!(list.element(), StyleNode::Scalar(ScalarValue::Text(_))) {
                        return Err(EditError::NotATextList {
                            found: classify(list.element()),
                        });
                    }
                    let mut updated = list.clone();
                    updated.replace_items(text.lines().map(StyleNode::text).collect());
                    Ok(StyleNode::List(updated))
                }
                other => Err(shape_mismatch("a list", other)),
            },
            Edit::Resize(len) => match node {
                StyleNode::List(list) => {
                    let mut updated = list.clone();
                    updated.resize(*len);
                    Ok(StyleNode::List(updated))
                }
                other => Err(shape_mismatch("a list", other)),
            },
        }
    }

    /// Builds the edit a free-form text box would request for `node`.
    ///
    /// Scalars and optionals parse `raw` as their kind, enums rename to
    /// `raw`, and text lists take one item per line.
    pub fn from_text(node: &StyleNode, raw: &str) -> Result<Edit, EditError> {
        match node {
            StyleNode::Scalar(current) => Ok(Edit::Replace(ScalarValue::parse(current.kind(), raw)?)),
            StyleNode::Optional { kind, .. } => Ok(Edit::Replace(ScalarValue::parse(*kind, raw)?)),
            StyleNode::Enum(_) => Ok(Edit::RenameEnum(raw.trim().to_string())),
            StyleNode::List(_) => Ok(Edit::SetTextLines(raw.to_string())),
            StyleNode::Struct(_) => Err(shape_mismatch("a leaf or a text list", node)),
        }
    }
}

impl ScalarValue {
    /// Parses user-entered text as a value of `kind`.
    ///
    /// Integers are trimmed before parsing.  Booleans accept `true` and
    /// `false` in any case.  Text is taken verbatim.
    pub fn parse(kind: ScalarKind, raw: &str) -> Result<ScalarValue, EditError> {
        let invalid = || EditError::InvalidLiteral {
            kind,
            raw: raw.to_string(),
        };
        match kind {
            ScalarKind::Int => raw.trim().parse::<i64>().map(ScalarValue::Int).map_err(|_| invalid()),
            ScalarKind::Bool => match raw.trim().to_ascii_lowercase().as_str() {
                "true" => Ok(ScalarValue::Bool(true)),
                "false" => Ok(ScalarValue::Bool(false)),
                _ => Err(invalid()),
            },
            ScalarKind::Text => Ok(ScalarValue::Text(raw.to_string())),
        }
    }
}

fn replace(node: &StyleNode, value: &ScalarValue) -> Result<StyleNode, EditError> {
    match node {
        StyleNode::Scalar(current) => {
            check_kind(current.kind(), value)?;
            Ok(StyleNode::Scalar(value.clone()))
        }
        StyleNode::Optional { kind, .. } => {
            check_kind(*kind, value)?;
            Ok(StyleNode::Optional {
                kind: *kind,
                value: Some(value.clone()),
            })
        }
        other => Err(shape_mismatch("a scalar or an optional scalar", other)),
    }
}

fn check_kind(expected: ScalarKind, value: &ScalarValue) -> Result<(), EditError> {
    if value.kind() == expected {
        Ok(())
    } else {
        Err(EditError::ScalarKindMismatch {
            expected,
            found: value.kind(),
        })
    }
}

fn shape_mismatch(expected: &'static str, node: &StyleNode) -> EditError {
    EditError::ShapeMismatch {
        expected,
        found: classify(node),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::enums::EnumType;
    use crate::domain::node::{ListNode, StructNode};

    static ALIGN: EnumType = EnumType::new("Align", &["Left", "Right", "Middle"]);
    static OTHER: EnumType = EnumType::new("Other", &["Left"]);

    #[test]
    fn test_replace_scalar_with_same_kind() {
        let result = Edit::Replace(ScalarValue::Int(120)).apply(&StyleNode::int(80)).unwrap();
        assert_eq!(result, StyleNode::int(120));
    }

    #[test]
    fn test_replace_scalar_with_other_kind_is_rejected() {
        let err = Edit::Replace(ScalarValue::Bool(true)).apply(&StyleNode::int(80)).unwrap_err();
        assert_eq!(
            err,
            EditError::ScalarKindMismatch {
                expected: ScalarKind::Int,
                found: ScalarKind::Bool
            }
        );
    }

    #[test]
    fn test_replace_absent_optional_enables_it() {
        let result = Edit::Replace(ScalarValue::Int(2))
            .apply(&StyleNode::absent(ScalarKind::Int))
            .unwrap();
        assert_eq!(result, StyleNode::present(ScalarValue::Int(2)));
    }

    #[test]
    fn test_rename_enum_keeps_type() {
        let node = StyleNode::Enum(ALIGN.value("Right").unwrap());
        let result = Edit::RenameEnum("Left".into()).apply(&node).unwrap();
        assert_eq!(result, StyleNode::Enum(ALIGN.value("Left").unwrap()));
    }

    #[test]
    fn test_rename_enum_to_unknown_member_is_rejected() {
        let node = StyleNode::Enum(ALIGN.value("Right").unwrap());
        let err = Edit::RenameEnum("Sideways".into()).apply(&node).unwrap_err();
        assert!(matches!(err, EditError::UnknownEnumMember { enum_type: "Align", .. }));
    }

    #[test]
    fn test_set_enum_of_other_type_is_rejected() {
        let node = StyleNode::Enum(ALIGN.value("Left").unwrap());
        let err = Edit::SetEnum(OTHER.first()).apply(&node).unwrap_err();
        assert!(matches!(err, EditError::EnumTypeMismatch { .. }));
    }

    #[test]
    fn test_toggle_optional_off_then_on_restores_value() {
        let original = StyleNode::present(ScalarValue::Int(4));
        let disabled = Edit::ToggleOptional { enabled: false, initial: None }
            .apply(&original)
            .unwrap();
        assert_eq!(disabled, StyleNode::absent(ScalarKind::Int));

        let enabled = Edit::ToggleOptional {
            enabled: true,
            initial: Some(ScalarValue::Int(4)),
        }
        .apply(&disabled)
        .unwrap();

        assert_eq!(enabled, original);
    }

    #[test]
    fn test_toggle_optional_on_without_initial_uses_zero() {
        let enabled = Edit::ToggleOptional { enabled: true, initial: None }
            .apply(&StyleNode::absent(ScalarKind::Int))
            .unwrap();
        assert_eq!(enabled, StyleNode::present(ScalarValue::Int(0)));
    }

    #[test]
    fn test_set_text_lines_splits_on_newlines() {
        let node = StyleNode::text_list(&["old"]);
        let result = Edit::SetTextLines("foreach\nQ_FOREACH\r\nBOOST_FOREACH".into())
            .apply(&node)
            .unwrap();
        assert_eq!(result, StyleNode::text_list(&["foreach", "Q_FOREACH", "BOOST_FOREACH"]));
    }

    #[test]
    fn test_set_text_lines_on_struct_list_is_rejected() {
        let node = StyleNode::List(ListNode::new(StyleNode::Struct(StructNode::new("Item"))));
        let err = Edit::SetTextLines("a".into()).apply(&node).unwrap_err();
        assert_eq!(err, EditError::NotATextList { found: Shape::Struct });
    }

    #[test]
    fn test_resize_on_scalar_is_shape_mismatch() {
        let err = Edit::Resize(2).apply(&StyleNode::int(1)).unwrap_err();
        assert!(matches!(err, EditError::ShapeMismatch { found: Shape::Scalar, .. }));
    }

    #[test]
    fn test_parse_int_rejects_garbage() {
        let err = ScalarValue::parse(ScalarKind::Int, "not-a-number").unwrap_err();
        assert!(matches!(err, EditError::InvalidLiteral { kind: ScalarKind::Int, .. }));
    }

    #[test]
    fn test_parse_bool_is_case_insensitive() {
        assert_eq!(ScalarValue::parse(ScalarKind::Bool, "TRUE").unwrap(), ScalarValue::Bool(true));
    }

    #[test]
    fn test_from_text_picks_edit_by_shape() {
        assert_eq!(
            Edit::from_text(&StyleNode::int(1), " 42 ").unwrap(),
            Edit::Replace(ScalarValue::Int(42))
        );
        assert_eq!(
            Edit::from_text(&StyleNode::Enum(ALIGN.first()), "Middle").unwrap(),
            Edit::RenameEnum("Middle".into())
        );
        assert!(Edit::from_text(&StyleNode::Struct(StructNode::new("S")), "x").is_err());
    }
}
