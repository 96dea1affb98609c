//! Integration tests for editing a preset through paths.
//!
//! Each test starts from a real preset and checks one editor interaction end
//! to end: resolve, classify, mutate, and verify the rest of the tree.

use style_core::{
    classify, classify_at, enum_values, resolve, resolve_chain, walk, Edit, EditError,
    PathResolutionError, Preset, ScalarKind, ScalarValue, Shape, StyleNode, StylePath, TreeMutator,
};

fn path(text: &str) -> StylePath {
    StylePath::parse(text).expect("test paths are well-formed")
}

#[test]
fn test_resize_include_categories_grows_with_prototype() {
    // Arrange
    let mut style = Preset::Llvm.style();
    let categories = path("IncludeCategories");
    let before = resolve(&style, &categories).unwrap().as_list().unwrap().clone();

    // Act
    TreeMutator::new()
        .apply(&mut style, &categories, &Edit::Resize(5))
        .unwrap();

    // Assert
    let after = resolve(&style, &categories).unwrap().as_list().unwrap();
    assert_eq!(after.len(), 5);
    assert_eq!(&after.items()[..3], before.items());
    assert_eq!(after.get(4), Some(before.element()));
}

#[test]
fn test_edit_changes_only_the_target_path() {
    let before = Preset::Mozilla.style();
    let mut style = before.clone();
    let target = path("BraceWrapping.AfterClass");

    TreeMutator::new()
        .apply(&mut style, &target, &Edit::Replace(ScalarValue::Bool(false)))
        .unwrap();

    for entry in walk(&before) {
        if entry.node.is_leaf() && entry.path != target {
            assert_eq!(
                resolve(&style, &entry.path).unwrap(),
                entry.node,
                "{} changed unexpectedly",
                entry.path
            );
        }
    }
    assert_eq!(resolve(&style, &target).unwrap(), &StyleNode::boolean(false));
}

#[test]
fn test_toggle_optional_round_trip_restores_tree() {
    let mut style = Preset::Llvm.style();
    let target = path("BracedInitializerIndentWidth");
    let mutator = TreeMutator::new();

    mutator
        .apply(
            &mut style,
            &target,
            &Edit::ToggleOptional {
                enabled: true,
                initial: Some(ScalarValue::Int(3)),
            },
        )
        .unwrap();
    let enabled = style.clone();
    mutator
        .apply(&mut style, &target, &Edit::ToggleOptional { enabled: false, initial: None })
        .unwrap();
    assert_eq!(resolve(&style, &target).unwrap(), &StyleNode::absent(ScalarKind::Int));

    mutator
        .apply(
            &mut style,
            &target,
            &Edit::ToggleOptional {
                enabled: true,
                initial: Some(ScalarValue::Int(3)),
            },
        )
        .unwrap();

    assert_eq!(style, enabled);
}

#[test]
fn test_rejected_enum_rename_leaves_style_unchanged() {
    let mut style = Preset::Gnu.style();
    let before = style.clone();

    let err = TreeMutator::new()
        .apply(&mut style, &path("BreakBeforeBraces"), &Edit::RenameEnum("Sideways".into()))
        .unwrap_err();

    assert!(matches!(err, EditError::UnknownEnumMember { enum_type: "BraceBreakingStyle", .. }));
    assert_eq!(style, before);
}

#[test]
fn test_classifier_drives_generic_rendering() {
    let style = Preset::Google.style();

    assert_eq!(classify_at(&style, &path("ColumnLimit")).unwrap(), Shape::Scalar);
    assert_eq!(
        classify_at(&style, &path("BracedInitializerIndentWidth")).unwrap(),
        Shape::OptionalScalar
    );
    assert_eq!(classify_at(&style, &path("BraceWrapping")).unwrap(), Shape::Struct);
    assert_eq!(classify_at(&style, &path("RawStringFormats[0].Delimiters")).unwrap(), Shape::List);

    let pointer = resolve(&style, &path("PointerAlignment")).unwrap();
    assert_eq!(classify(pointer), Shape::Enum);
    assert_eq!(enum_values(pointer), Some(&["Left", "Right", "Middle"][..]));
}

#[test]
fn test_resolve_chain_length_matches_path_depth() {
    let style = Preset::Google.style();
    let chain = resolve_chain(&style, &path("RawStringFormats[1].EnclosingFunctions[0]")).unwrap();
    assert_eq!(chain.len(), 5);
    assert_eq!(chain[4], &StyleNode::text("EqualsProto"));
}

#[test]
fn test_index_past_end_reports_path_error() {
    let mut style = Preset::Llvm.style();

    let err = TreeMutator::new()
        .apply(&mut style, &path("IncludeCategories[10].Priority"), &Edit::Replace(ScalarValue::Int(1)))
        .unwrap_err();

    assert!(matches!(
        err,
        EditError::Path(PathResolutionError::IndexOutOfBounds { index: 10, len: 3, .. })
    ));
}

#[test]
fn test_shrink_after_edit_keeps_original_first_element() {
    // Arrange: LLVM starts with no raw string formats.
    let mut style = Preset::Llvm.style();
    let formats = path("RawStringFormats");
    let mutator = TreeMutator::new();
    let prototype = resolve(&style, &formats).unwrap().as_list().unwrap().element().clone();

    // Act
    mutator.apply(&mut style, &formats, &Edit::Resize(3)).unwrap();
    mutator
        .apply(
            &mut style,
            &path("RawStringFormats[1].CanonicalDelimiter"),
            &Edit::Replace(ScalarValue::Text("pb".into())),
        )
        .unwrap();
    mutator.apply(&mut style, &formats, &Edit::Resize(1)).unwrap();

    // Assert
    let list = resolve(&style, &formats).unwrap().as_list().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list.get(0), Some(&prototype));
}

#[test]
fn test_resize_to_current_length_is_noop() {
    let mut style = Preset::Google.style();
    let before = style.clone();

    TreeMutator::new()
        .apply(&mut style, &path("IncludeCategories"), &Edit::Resize(4))
        .unwrap();

    assert_eq!(style, before);
}

#[test]
fn test_resize_down_up_down_restores_prefix() {
    let mut style = Preset::Llvm.style();
    let macros = path("ForEachMacros");
    let mutator = TreeMutator::new();
    let original = resolve(&style, &macros).unwrap().clone();

    mutator.apply(&mut style, &macros, &Edit::Resize(2)).unwrap();
    let shrunk = resolve(&style, &macros).unwrap().clone();
    mutator.apply(&mut style, &macros, &Edit::Resize(6)).unwrap();
    mutator.apply(&mut style, &macros, &Edit::Resize(2)).unwrap();

    assert_eq!(resolve(&style, &macros).unwrap(), &shrunk);
    assert_eq!(
        &shrunk.as_list().unwrap().items()[..],
        &original.as_list().unwrap().items()[..2]
    );
}

#[test]
fn test_presets_do_not_share_state() {
    let mut first = Preset::Google.style();
    let second = Preset::Google.style();

    TreeMutator::new()
        .apply(&mut first, &path("ColumnLimit"), &Edit::Replace(ScalarValue::Int(120)))
        .unwrap();

    assert_eq!(second.field("ColumnLimit"), Some(&StyleNode::int(80)));
}
