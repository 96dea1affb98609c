//! The style node model.
//!
//! A style is a tree of [`StyleNode`]s.  Each node is exactly one of five
//! shapes:
//!
//! | Shape              | Variant                  | Example option                 |
//! |--------------------|--------------------------|--------------------------------|
//! | scalar             | [`StyleNode::Scalar`]    | `ColumnLimit: 80`              |
//! | optional scalar    | [`StyleNode::Optional`]  | `BracedInitializerIndentWidth` |
//! | enum               | [`StyleNode::Enum`]      | `PointerAlignment: Right`      |
//! | list               | [`StyleNode::List`]      | `IncludeCategories`            |
//! | struct             | [`StyleNode::Struct`]    | `BraceWrapping`                |
//!
//! Because the shape is carried by the variant, classification never has to
//! guess.  An optional scalar whose value is absent is still an optional
//! scalar: it remembers its [`ScalarKind`] so it can be re-enabled later.
//!
//! Lists carry an *element prototype*: the node a freshly-grown slot is filled
//! with.  Structs carry a fixed, ordered set of named fields; fields can be
//! replaced but never added or removed once the schema has built them.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::enums::EnumValue;

// ── Scalars ───────────────────────────────────────────────────────────────────

/// The primitive kind of a scalar leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalarKind {
    Int,
    Bool,
    Text,
}

impl ScalarKind {
    /// The default value used when an optional of this kind is enabled
    /// without an explicit initial value.
    pub fn zero(self) -> ScalarValue {
        match self {
            ScalarKind::Int => ScalarValue::Int(0),
            ScalarKind::Bool => ScalarValue::Bool(false),
            ScalarKind::Text => ScalarValue::Text(String::new()),
        }
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ScalarKind::Int => "integer",
            ScalarKind::Bool => "boolean",
            ScalarKind::Text => "text",
        };
        f.write_str(label)
    }
}

/// A primitive leaf value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScalarValue {
    Int(i64),
    Bool(bool),
    Text(String),
}

impl ScalarValue {
    /// Returns the kind of this value.
    pub fn kind(&self) -> ScalarKind {
        match self {
            ScalarValue::Int(_) => ScalarKind::Int,
            ScalarValue::Bool(_) => ScalarKind::Bool,
            ScalarValue::Text(_) => ScalarKind::Text,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            ScalarValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ScalarValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ScalarValue::Text(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarValue::Int(v) => write!(f, "{v}"),
            ScalarValue::Bool(v) => write!(f, "{v}"),
            ScalarValue::Text(v) => f.write_str(v),
        }
    }
}

impl From<i64> for ScalarValue {
    fn from(v: i64) -> Self {
        ScalarValue::Int(v)
    }
}

impl From<bool> for ScalarValue {
    fn from(v: bool) -> Self {
        ScalarValue::Bool(v)
    }
}

impl From<&str> for ScalarValue {
    fn from(v: &str) -> Self {
        ScalarValue::Text(v.to_string())
    }
}

impl From<String> for ScalarValue {
    fn from(v: String) -> Self {
        ScalarValue::Text(v)
    }
}

// ── Containers ────────────────────────────────────────────────────────────────

/// An ordered, resizable sequence of nodes built from one element prototype.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListNode {
    element: Box<StyleNode>,
    items: Vec<StyleNode>,
}

impl ListNode {
    /// Creates an empty list whose new slots are copies of `element`.
    pub fn new(element: StyleNode) -> Self {
        Self {
            element: Box::new(element),
            items: Vec::new(),
        }
    }

    /// Creates a list with initial `items`.
    pub fn with_items(element: StyleNode, items: Vec<StyleNode>) -> Self {
        Self {
            element: Box::new(element),
            items,
        }
    }

    /// The prototype new slots are filled with.
    pub fn element(&self) -> &StyleNode {
        &self.element
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[StyleNode] {
        &self.items
    }

    pub fn get(&self, index: usize) -> Option<&StyleNode> {
        self.items.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut StyleNode> {
        self.items.get_mut(index)
    }

    /// Replaces the item at `index`.  Returns `false` (and drops `node`) when
    /// `index` is out of bounds.
    pub fn set(&mut self, index: usize, node: StyleNode) -> bool {
        match self.items.get_mut(index) {
            Some(slot) => {
                *slot = node;
                true
            }
            None => false,
        }
    }

    pub fn push(&mut self, node: StyleNode) {
        self.items.push(node);
    }

    /// Replaces every item at once, keeping the prototype.
    pub fn replace_items(&mut self, items: Vec<StyleNode>) {
        self.items = items;
    }

    /// Grows the list with prototype copies or truncates it to `len`.
    pub fn resize(&mut self, len: usize) {
        let element = self.element.as_ref().clone();
        self.items.resize(len, element);
    }
}

/// A fixed, ordered set of named fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructNode {
    type_name: &'static str,
    fields: Vec<(&'static str, StyleNode)>,
}

impl StructNode {
    pub fn new(type_name: &'static str) -> Self {
        Self {
            type_name,
            fields: Vec::new(),
        }
    }

    /// Appends a field.  Only the schema builds structs, so this is the one
    /// place the field set grows.
    pub fn with_field(mut self, name: &'static str, node: StyleNode) -> Self {
        self.fields.push((name, node));
        self
    }

    /// The schema type name, e.g. `"BraceWrappingFlags"`.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&StyleNode> {
        self.fields.iter().find(|(n, _)| *n == name).map(|(_, node)| node)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut StyleNode> {
        self.fields
            .iter_mut()
            .find(|(n, _)| *n == name)
            .map(|(_, node)| node)
    }

    /// Replaces the field called `name`.  Returns `false` when there is no
    /// such field; the field set itself never changes.
    pub fn set(&mut self, name: &str, node: StyleNode) -> bool {
        match self.get_mut(name) {
            Some(slot) => {
                *slot = node;
                true
            }
            None => false,
        }
    }

    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|(n, _)| *n)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&'static str, &StyleNode)> {
        self.fields.iter().map(|(n, node)| (*n, node))
    }
}

// ── StyleNode ─────────────────────────────────────────────────────────────────

/// One node of a style tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyleNode {
    /// A primitive leaf.
    Scalar(ScalarValue),
    /// A leaf that may be absent.  `kind` is kept while absent.
    Optional {
        kind: ScalarKind,
        value: Option<ScalarValue>,
    },
    /// A leaf holding one member of a named enum type.
    Enum(EnumValue),
    /// An ordered, resizable sequence.
    List(ListNode),
    /// A record with a fixed set of named fields.
    Struct(StructNode),
}

impl StyleNode {
    pub fn int(v: i64) -> Self {
        StyleNode::Scalar(ScalarValue::Int(v))
    }

    pub fn boolean(v: bool) -> Self {
        StyleNode::Scalar(ScalarValue::Bool(v))
    }

    pub fn text(v: impl Into<String>) -> Self {
        StyleNode::Scalar(ScalarValue::Text(v.into()))
    }

    /// An optional leaf of `kind` that is currently absent.
    pub fn absent(kind: ScalarKind) -> Self {
        StyleNode::Optional { kind, value: None }
    }

    /// An optional leaf that is currently present.
    pub fn present(value: ScalarValue) -> Self {
        StyleNode::Optional {
            kind: value.kind(),
            value: Some(value),
        }
    }

    /// A list of text items, e.g. `ForEachMacros`.
    pub fn text_list<S: AsRef<str>>(items: &[S]) -> Self {
        StyleNode::List(ListNode::with_items(
            StyleNode::text(""),
            items.iter().map(|s| StyleNode::text(s.as_ref())).collect(),
        ))
    }

    /// Returns `true` for scalars, optionals and enums.
    pub fn is_leaf(&self) -> bool {
        !matches!(self, StyleNode::List(_) | StyleNode::Struct(_))
    }

    pub fn as_scalar(&self) -> Option<&ScalarValue> {
        match self {
            StyleNode::Scalar(v) => Some(v),
            StyleNode::Optional { value, .. } => value.as_ref(),
            _ => None,
        }
    }

    pub fn as_enum(&self) -> Option<&EnumValue> {
        match self {
            StyleNode::Enum(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&ListNode> {
        match self {
            StyleNode::List(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_struct(&self) -> Option<&StructNode> {
        match self {
            StyleNode::Struct(s) => Some(s),
            _ => None,
        }
    }

    /// Shorthand for reading a direct struct field.
    pub fn field(&self, name: &str) -> Option<&StyleNode> {
        self.as_struct().and_then(|s| s.get(name))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
