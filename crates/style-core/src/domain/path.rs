//! Style paths.
//!
//! A [`StylePath`] is an ordered sequence of segments from the root of a
//! style tree to one node.  A segment is either a struct field name or a list
//! index.  The empty path addresses the root itself.
//!
//! Paths have a textual form used by the CLI, the bridge DTOs and log
//! messages:
//!
//! ```text
//! ColumnLimit
//! BraceWrapping.AfterClass
//! IncludeCategories[1].Priority
//! RawStringFormats[0].Delimiters[2]
//! ```

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// One step of a path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// Select a struct field by name.
    Field(String),
    /// Select a list item by zero-based position.
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Field(name) => f.write_str(name),
            PathSegment::Index(i) => write!(f, "[{i}]"),
        }
    }
}

/// Errors produced when parsing the textual form of a path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathParseError {
    #[error("path `{path}` contains an empty field name")]
    EmptyField { path: String },

    #[error("path `{path}` has an unterminated `[`")]
    UnterminatedIndex { path: String },

    #[error("path `{path}` has invalid index `{raw}`")]
    InvalidIndex { path: String, raw: String },

    #[error("path `{path}` has unexpected character `{found}` after `]`")]
    UnexpectedCharacter { path: String, found: char },
}

/// An address of one node in a style tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct StylePath {
    segments: Vec<PathSegment>,
}

impl StylePath {
    /// The empty path, addressing the root.
    pub fn root() -> Self {
        Self::default()
    }

    pub fn new(segments: Vec<PathSegment>) -> Self {
        Self { segments }
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns this path extended by a field segment.
    pub fn field(&self, name: impl Into<String>) -> Self {
        self.child(PathSegment::Field(name.into()))
    }

    /// Returns this path extended by an index segment.
    pub fn index(&self, index: usize) -> Self {
        self.child(PathSegment::Index(index))
    }

    pub fn child(&self, segment: PathSegment) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment);
        Self { segments }
    }

    /// The path made of the first `len` segments.
    pub fn prefix(&self, len: usize) -> Self {
        Self {
            segments: self.segments[..len.min(self.segments.len())].to_vec(),
        }
    }

    /// The textual form, or `<root>` for the empty path.  Used in messages.
    pub fn describe(&self) -> String {
        if self.is_root() {
            "<root>".to_string()
        } else {
            self.to_string()
        }
    }

    /// Parses the textual form of a path.  The empty string is the root.
    pub fn parse(text: &str) -> Result<Self, PathParseError> {
        let mut segments = Vec::new();
        let mut rest = text;
        // True at the start and right after a '.', where a field name must follow.
        let mut expect_field = true;

        while !rest.is_empty() {
            if let Some(body) = rest.strip_prefix('[') {
                if expect_field && !segments.is_empty() {
                    return Err(PathParseError::EmptyField {
                        path: text.to_string(),
                    });
                }
                let close = body.find(']').ok_or_else(|| PathParseError::UnterminatedIndex {
                    path: text.to_string(),
                })?;
                let raw = &body[..close];
                let index = raw
                    .parse::<usize>()
                    .map_err(|_| PathParseError::InvalidIndex {
                        path: text.to_string(),
                        raw: raw.to_string(),
                    })?;
                segments.push(PathSegment::Index(index));
                rest = &body[close + 1..];
                expect_field = false;
            } else if let Some(after) = rest.strip_prefix('.') {
                if expect_field || after.is_empty() {
                    return Err(PathParseError::EmptyField {
                        path: text.to_string(),
                    });
                }
                rest = after;
                expect_field = true;
            } else {
                if !expect_field {
                    let found = rest.chars().next().unwrap_or_default();
                    return Err(PathParseError::UnexpectedCharacter {
                        path: text.to_string(),
                        found,
                    });
                }
                let end = rest.find(|c| c == '.' || c == '[').unwrap_or(rest.len());
                segments.push(PathSegment::Field(rest[..end].to_string()));
                rest = &rest[end..];
                expect_field = false;
            }
        }

        Ok(Self { segments })
    }
}

impl fmt::Display for StylePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 && matches!(segment, PathSegment::Field(_)) {
                f.write_str(".")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

impl FromStr for StylePath {
    type Err = PathParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<Vec<PathSegment>> for StylePath {
    fn from(segments: Vec<PathSegment>) -> Self {
        Self::new(segments)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_string_returns_root() {
        let path = StylePath::parse("").unwrap();
        assert!(path.is_root());
    }

    #[test]
    fn test_parse_mixed_fields_and_indices() {
        let path = StylePath::parse("RawStringFormats[0].Delimiters[2]").unwrap();
        assert_eq!(
            path.segments(),
            &[
                PathSegment::Field("RawStringFormats".into()),
                PathSegment::Index(0),
                PathSegment::Field("Delimiters".into()),
                PathSegment::Index(2),
            ]
        );
    }

    #[test]
    fn test_display_reproduces_parsed_text() {
        for text in ["ColumnLimit", "BraceWrapping.AfterClass", "IncludeCategories[1].Priority"] {
            assert_eq!(StylePath::parse(text).unwrap().to_string(), text);
        }
    }

    #[test]
    fn test_parse_rejects_trailing_dot() {
        assert!(matches!(
            StylePath::parse("BraceWrapping."),
            Err(PathParseError::EmptyField { .. })
        ));
    }

    #[test]
    fn test_parse_rejects_double_dot() {
        assert!(matches!(
            StylePath::parse("A..B"),
            Err(PathParseError::EmptyField { .. })
        ));
    }

    #[test]
    fn test_parse_rejects_non_numeric_index() {
        assert!(matches!(
            StylePath::parse("IncludeCategories[x]"),
            Err(PathParseError::InvalidIndex { .. })
        ));
    }

    #[test]
    fn test_parse_rejects_unterminated_index() {
        assert!(matches!(
            StylePath::parse("IncludeCategories[1"),
            Err(PathParseError::UnterminatedIndex { .. })
        ));
    }

    #[test]
    fn test_parse_rejects_name_glued_to_index() {
        assert!(matches!(
            StylePath::parse("List[0]Field"),
            Err(PathParseError::UnexpectedCharacter { found: 'F', .. })
        ));
    }

    #[test]
    fn test_prefix_and_describe() {
        let path = StylePath::parse("A.B[3]").unwrap();
        assert_eq!(path.prefix(0).describe(), "<root>");
        assert_eq!(path.prefix(2).to_string(), "A.B");
    }

    #[test]
    fn test_builder_methods_extend_path() {
        let path = StylePath::root().field("IncludeCategories").index(1).field("Priority");
        assert_eq!(path.to_string(), "IncludeCategories[1].Priority");
    }
}
