//! Read-modify-write along a path.
//!
//! # How an update works (for beginners)
//!
//! Containers are treated as values: reading a child hands back a copy, and
//! writing a child stores a new value into a container.  To change a leaf deep
//! in the tree the mutator therefore:
//!
//! 1. copies the root and reads each container on the path, keeping every
//!    intermediate copy (the *chain*);
//! 2. runs the caller's transform on the leaf to compute its replacement;
//! 3. walks the chain back from the leaf to the root, writing each updated
//!    child into its parent copy;
//! 4. stores the rebuilt root in place of the old one.
//!
//! If any step fails the caller's root is left exactly as it was.  Nodes that
//! are not on the path are carried over unchanged.
//!
//! The per-container read and write are behind the [`ContainerAccess`] trait
//! so a differently-backed tree can reuse the same algorithm.

use crate::domain::classify::classify;
use crate::domain::edit::{Edit, EditError};
use crate::domain::navigate::{self, PathResolutionError};
use crate::domain::node::StyleNode;
use crate::domain::path::{PathSegment, StylePath};

/// Reads and writes one child of a container node.
pub trait ContainerAccess {
    /// Returns a copy of the child `segment` selects in `container`.
    fn read_child(
        &self,
        container: &StyleNode,
        segment: &PathSegment,
        at: &StylePath,
    ) -> Result<StyleNode, PathResolutionError>;

    /// Stores `child` into `container` at `segment`.
    fn write_child(
        &self,
        container: &mut StyleNode,
        segment: &PathSegment,
        child: StyleNode,
        at: &StylePath,
    ) -> Result<(), PathResolutionError>;
}

/// [`ContainerAccess`] over plain in-memory [`StyleNode`] values.
#[derive(Debug, Default, Clone, Copy)]
pub struct ValueAccess;

impl ContainerAccess for ValueAccess {
    fn read_child(
        &self,
        container: &StyleNode,
        segment: &PathSegment,
        at: &StylePath,
    ) -> Result<StyleNode, PathResolutionError> {
        navigate::child(container, segment, at).cloned()
    }

    fn write_child(
        &self,
        container: &mut StyleNode,
        segment: &PathSegment,
        child: StyleNode,
        at: &StylePath,
    ) -> Result<(), PathResolutionError> {
        match (container, segment) {
            (StyleNode::Struct(s), PathSegment::Field(name)) => {
                if s.set(name, child) {
                    Ok(())
                } else {
                    Err(PathResolutionError::UnknownField {
                        at: at.describe(),
                        field: name.clone(),
                    })
                }
            }
            (StyleNode::List(l), PathSegment::Index(index)) => {
                let len = l.len();
                if l.set(*index, child) {
                    Ok(())
                } else {
                    Err(PathResolutionError::IndexOutOfBounds {
                        at: at.describe(),
                        index: *index,
                        len,
                    })
                }
            }
            (other, PathSegment::Field(name)) => Err(PathResolutionError::NotAStruct {
                at: at.describe(),
                shape: classify(other),
                field: name.clone(),
            }),
            (other, PathSegment::Index(index)) => Err(PathResolutionError::NotAList {
                at: at.describe(),
                shape: classify(other),
                index: *index,
            }),
        }
    }
}

/// Applies leaf transforms and writes the result back up to the root.
#[derive(Debug, Default, Clone, Copy)]
pub struct TreeMutator<A = ValueAccess> {
    access: A,
}

impl TreeMutator<ValueAccess> {
    pub fn new() -> Self {
        Self { access: ValueAccess }
    }
}

impl<A: ContainerAccess> TreeMutator<A> {
    pub fn with_access(access: A) -> Self {
        Self { access }
    }

    /// Replaces the node at `path` with `transform(old)`.
    ///
    /// On error `root` is unchanged.  An empty path transforms the root
    /// itself.
    pub fn update_at<F>(&self, root: &mut StyleNode, path: &StylePath, transform: F) -> Result<(), EditError>
    where
        F: FnOnce(&StyleNode) -> Result<StyleNode, EditError>,
    {
        let segments = path.segments();

        // ancestors[i] is the container that segments[i] is applied to.
        let mut ancestors: Vec<StyleNode> = Vec::with_capacity(segments.len());
        let mut current = root.clone();
        for (depth, segment) in segments.iter().enumerate() {
            let child = self.access.read_child(&current, segment, &path.prefix(depth))?;
            ancestors.push(std::mem::replace(&mut current, child));
        }

        let mut updated = transform(&current)?;

        for ((depth, segment), mut container) in segments
            .iter()
            .enumerate()
            .rev()
            .zip(ancestors.into_iter().rev())
        {
            self.access
                .write_child(&mut container, segment, updated, &path.prefix(depth))?;
            updated = container;
        }

        *root = updated;
        Ok(())
    }

    /// Applies `edit` to the node at `path`.
    pub fn apply(&self, root: &mut StyleNode, path: &StylePath, edit: &Edit) -> Result<(), EditError> {
        self.update_at(root, path, |node| edit.apply(node))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::node::{ListNode, ScalarValue, StructNode};
    use std::cell::Cell;

    fn category(priority: i64) -> StyleNode {
        StyleNode::Struct(
            StructNode::new("IncludeCategory")
                .with_field("Regex", StyleNode::text(".*"))
                .with_field("Priority", StyleNode::int(priority)),
        )
    }

    fn sample() -> StyleNode {
        StyleNode::Struct(
            StructNode::new("Root")
                .with_field("ColumnLimit", StyleNode::int(80))
                .with_field(
                    "IncludeCategories",
                    StyleNode::List(ListNode::with_items(
                        category(0),
                        vec![category(1), category(2)],
                    )),
                ),
        )
    }

    #[test]
    fn test_update_at_rewrites_nested_leaf_and_keeps_siblings() {
        // Arrange
        let mut root = sample();
        let before = root.clone();
        let path = StylePath::parse("IncludeCategories[1].Priority").unwrap();

        // Act
        TreeMutator::new()
            .apply(&mut root, &path, &Edit::Replace(ScalarValue::Int(9)))
            .unwrap();

        // Assert
        assert_eq!(navigate::resolve(&root, &path).unwrap(), &StyleNode::int(9));
        let untouched = StylePath::parse("IncludeCategories[0]").unwrap();
        assert_eq!(
            navigate::resolve(&root, &untouched).unwrap(),
            navigate::resolve(&before, &untouched).unwrap()
        );
        assert_eq!(root.field("ColumnLimit"), before.field("ColumnLimit"));
    }

    #[test]
    fn test_update_at_with_empty_path_transforms_root() {
        let mut root = sample();
        TreeMutator::new()
            .update_at(&mut root, &StylePath::root(), |_| Ok(StyleNode::int(1)))
            .unwrap();
        assert_eq!(root, StyleNode::int(1));
    }

    #[test]
    fn test_update_at_leaves_root_unchanged_when_path_is_invalid() {
        let mut root = sample();
        let before = root.clone();
        let called = Cell::new(false);

        let err = TreeMutator::new()
            .update_at(&mut root, &StylePath::parse("IncludeCategories[7]").unwrap(), |n| {
                called.set(true);
                Ok(n.clone())
            })
            .unwrap_err();

        assert!(matches!(err, EditError::Path(PathResolutionError::IndexOutOfBounds { .. })));
        assert!(!called.get(), "transform must not run on an unresolved path");
        assert_eq!(root, before);
    }

    #[test]
    fn test_update_at_leaves_root_unchanged_when_transform_fails() {
        let mut root = sample();
        let before = root.clone();

        let result = TreeMutator::new().apply(
            &mut root,
            &StylePath::parse("ColumnLimit").unwrap(),
            &Edit::RenameEnum("Left".into()),
        );

        assert!(result.is_err());
        assert_eq!(root, before);
    }

    #[test]
    fn test_resize_list_through_mutator() {
        let mut root = sample();
        let path = StylePath::parse("IncludeCategories").unwrap();

        TreeMutator::new().apply(&mut root, &path, &Edit::Resize(4)).unwrap();

        let list = navigate::resolve(&root, &path).unwrap().as_list().unwrap();
        assert_eq!(list.len(), 4);
        assert_eq!(list.get(0), Some(&category(1)));
        assert_eq!(list.get(3), Some(&category(0)));
    }

    /// Access wrapper that counts write-backs.
    struct CountingAccess<'a> {
        writes: &'a Cell<usize>,
    }

    impl ContainerAccess for CountingAccess<'_> {
        fn read_child(
            &self,
            container: &StyleNode,
            segment: &PathSegment,
            at: &StylePath,
        ) -> Result<StyleNode, PathResolutionError> {
            ValueAccess.read_child(container, segment, at)
        }

        fn write_child(
            &self,
            container: &mut StyleNode,
            segment: &PathSegment,
            child: StyleNode,
            at: &StylePath,
        ) -> Result<(), PathResolutionError> {
            self.writes.set(self.writes.get() + 1);
            ValueAccess.write_child(container, segment, child, at)
        }
    }

    #[test]
    fn test_update_at_writes_back_once_per_segment() {
        let writes = Cell::new(0);
        let mutator = TreeMutator::with_access(CountingAccess { writes: &writes });
        let mut root = sample();

        mutator
            .apply(
                &mut root,
                &StylePath::parse("IncludeCategories[0].Regex").unwrap(),
                &Edit::Replace(ScalarValue::Text("^<".into())),
            )
            .unwrap();

        assert_eq!(writes.get(), 3);
    }
}
