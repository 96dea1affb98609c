//! Named style presets.
//!
//! Each preset is the LLVM base style (or another preset) with a table of
//! overrides applied on top.  Overrides are written as `(path, value)` pairs
//! and applied through the same [`TreeMutator`] the editor uses, so a typo in
//! a table shows up as an [`EditError`] in the preset tests rather than as a
//! silently missing option.
//!
//! | Preset        | Built from | Notable differences                         |
//! |---------------|------------|---------------------------------------------|
//! | `LLVM`        | –          | the base style                              |
//! | `Google`      | LLVM       | `IndentWidth` 2, pointers left, regrouping  |
//! | `Chromium`    | Google     | no short ifs/loops, no parameter bin-packing|
//! | `Mozilla`     | LLVM       | Mozilla braces, return type on own line     |
//! | `WebKit`      | LLVM       | 4-space indent, no column limit             |
//! | `GNU`         | LLVM       | GNU braces, space before parens, c++03      |
//! | `Microsoft`   | LLVM       | Allman-like braces, 4-space, 120 columns    |
//! | `ClangFormat` | LLVM       | brace insertion and removal helpers on      |
//! | `None`        | LLVM       | formatting disabled                         |

use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use tracing::error;

use crate::domain::edit::{Edit, EditError};
use crate::domain::mutate::TreeMutator;
use crate::domain::node::{ListNode, ScalarValue, StyleNode};
use crate::domain::path::StylePath;
use crate::style::schema::{include_category, llvm_base_style, raw_string_format};

/// A built-in named style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Preset {
    Llvm,
    Google,
    Chromium,
    Mozilla,
    WebKit,
    Gnu,
    Microsoft,
    ClangFormat,
    None,
}

/// Returned when a preset name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown style preset `{0}`")]
pub struct UnknownPresetError(pub String);

impl Preset {
    /// Every preset, in the order a UI should offer them.
    pub const ALL: [Preset; 9] = [
        Preset::Llvm,
        Preset::Google,
        Preset::Chromium,
        Preset::Mozilla,
        Preset::WebKit,
        Preset::Gnu,
        Preset::Microsoft,
        Preset::ClangFormat,
        Preset::None,
    ];

    /// The canonical name, as used by `BasedOnStyle`.
    pub fn name(self) -> &'static str {
        match self {
            Preset::Llvm => "LLVM",
            Preset::Google => "Google",
            Preset::Chromium => "Chromium",
            Preset::Mozilla => "Mozilla",
            Preset::WebKit => "WebKit",
            Preset::Gnu => "GNU",
            Preset::Microsoft => "Microsoft",
            Preset::ClangFormat => "ClangFormat",
            Preset::None => "None",
        }
    }

    /// Looks a preset up by name, ignoring ASCII case and `-`/`_`
    /// separators, so `webKit`, `WEBKIT` and `clang-format` all resolve.
    pub fn from_name(name: &str) -> Option<Preset> {
        let wanted: String = name
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect();
        Preset::ALL.into_iter().find(|p| p.name().eq_ignore_ascii_case(&wanted))
    }

    /// Builds this preset's style tree.
    ///
    /// Override tables are checked by the tests, so a failure here is a bug in
    /// this module; it is logged and the LLVM base is returned instead.
    pub fn style(self) -> StyleNode {
        match self.build() {
            Ok(style) => style,
            Err(e) => {
                error!(preset = self.name(), "failed to build preset: {e}");
                llvm_base_style()
            }
        }
    }

    /// Builds this preset's style tree, reporting any bad override.
    pub fn build(self) -> Result<StyleNode, EditError> {
        match self {
            Preset::Llvm => Ok(llvm_base_style()),
            Preset::Google => apply_overrides(llvm_base_style(), GOOGLE),
            Preset::Chromium => apply_overrides(Preset::Google.build()?, CHROMIUM),
            Preset::Mozilla => apply_overrides(llvm_base_style(), MOZILLA),
            Preset::WebKit => apply_overrides(llvm_base_style(), WEBKIT),
            Preset::Gnu => apply_overrides(llvm_base_style(), GNU),
            Preset::Microsoft => apply_overrides(llvm_base_style(), MICROSOFT),
            Preset::ClangFormat => apply_overrides(llvm_base_style(), CLANG_FORMAT),
            Preset::None => apply_overrides(llvm_base_style(), NONE),
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = UnknownPresetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Preset::from_name(s).ok_or_else(|| UnknownPresetError(s.to_string()))
    }
}

// ── Override tables ───────────────────────────────────────────────────────────

/// The value half of an override entry.
enum Override {
    Int(i64),
    Bool(bool),
    Text(&'static str),
    Member(&'static str),
    Node(fn() -> StyleNode),
}

type OverrideTable = &'static [(&'static str, Override)];

fn apply_overrides(mut style: StyleNode, table: OverrideTable) -> Result<StyleNode, EditError> {
    let mutator = TreeMutator::new();
    for (raw_path, value) in table {
        let path = StylePath::parse(raw_path)?;
        match value {
            Override::Int(v) => mutator.apply(&mut style, &path, &Edit::Replace(ScalarValue::Int(*v)))?,
            Override::Bool(v) => mutator.apply(&mut style, &path, &Edit::Replace(ScalarValue::Bool(*v)))?,
            Override::Text(t) => {
                mutator.apply(&mut style, &path, &Edit::Replace(ScalarValue::Text((*t).to_string())))?
            }
            Override::Member(m) => mutator.apply(&mut style, &path, &Edit::RenameEnum((*m).to_string()))?,
            Override::Node(build) => mutator.update_at(&mut style, &path, |_| Ok(build()))?,
        }
    }
    Ok(style)
}

static GOOGLE: OverrideTable = &[
    ("AccessModifierOffset", Override::Int(-1)),
    ("AlignEscapedNewlines", Override::Member("Left")),
    ("AllowShortIfStatementsOnASingleLine", Override::Member("WithoutElse")),
    ("AllowShortLoopsOnASingleLine", Override::Bool(true)),
    ("AlwaysBreakTemplateDeclarations", Override::Member("Yes")),
    ("DerivePointerAlignment", Override::Bool(true)),
    ("IncludeBlocks", Override::Member("Regroup")),
    ("IncludeCategories", Override::Node(google_include_categories)),
    ("IncludeIsMainRegex", Override::Text("([-_](test|unittest))?$")),
    ("IndentCaseLabels", Override::Bool(true)),
    ("KeepEmptyLinesAtTheStartOfBlocks", Override::Bool(false)),
    ("PenaltyReturnTypeOnItsOwnLine", Override::Int(200)),
    ("PointerAlignment", Override::Member("Left")),
    ("RawStringFormats", Override::Node(google_raw_string_formats)),
    ("SpacesBeforeTrailingComments", Override::Int(2)),
    ("Standard", Override::Member("Auto")),
];

static CHROMIUM: OverrideTable = &[
    ("AllowAllParametersOfDeclarationOnNextLine", Override::Bool(false)),
    ("AllowShortFunctionsOnASingleLine", Override::Member("Inline")),
    ("AllowShortIfStatementsOnASingleLine", Override::Member("Never")),
    ("AllowShortLoopsOnASingleLine", Override::Bool(false)),
    ("BinPackParameters", Override::Bool(false)),
    ("DerivePointerAlignment", Override::Bool(false)),
    ("IncludeBlocks", Override::Member("Preserve")),
];

static MOZILLA: OverrideTable = &[
    ("AllowShortFunctionsOnASingleLine", Override::Member("Inline")),
    ("AlwaysBreakAfterReturnType", Override::Member("TopLevel")),
    ("AlwaysBreakTemplateDeclarations", Override::Member("Yes")),
    ("BinPackArguments", Override::Bool(false)),
    ("BinPackParameters", Override::Bool(false)),
    ("BraceWrapping.AfterClass", Override::Bool(true)),
    ("BraceWrapping.AfterEnum", Override::Bool(true)),
    ("BraceWrapping.AfterExternBlock", Override::Bool(true)),
    ("BraceWrapping.AfterFunction", Override::Bool(true)),
    ("BraceWrapping.AfterStruct", Override::Bool(true)),
    ("BraceWrapping.AfterUnion", Override::Bool(true)),
    ("BraceWrapping.SplitEmptyRecord", Override::Bool(false)),
    ("BreakBeforeBraces", Override::Member("Mozilla")),
    ("BreakConstructorInitializers", Override::Member("BeforeComma")),
    ("BreakInheritanceList", Override::Member("BeforeComma")),
    ("ContinuationIndentWidth", Override::Int(2)),
    ("Cpp11BracedListStyle", Override::Bool(false)),
    ("FixNamespaceComments", Override::Bool(false)),
    ("IndentCaseLabels", Override::Bool(true)),
    ("PointerAlignment", Override::Member("Left")),
    ("SpaceAfterTemplateKeyword", Override::Bool(false)),
];

static WEBKIT: OverrideTable = &[
    ("AccessModifierOffset", Override::Int(-4)),
    ("AlignAfterOpenBracket", Override::Member("DontAlign")),
    ("AlignOperands", Override::Member("DontAlign")),
    ("AlignTrailingComments.Kind", Override::Member("Never")),
    ("AllowShortBlocksOnASingleLine", Override::Member("Empty")),
    ("BraceWrapping.AfterFunction", Override::Bool(true)),
    ("BreakBeforeBinaryOperators", Override::Member("All")),
    ("BreakBeforeBraces", Override::Member("WebKit")),
    ("BreakConstructorInitializers", Override::Member("BeforeComma")),
    ("BreakInheritanceList", Override::Member("BeforeComma")),
    ("ColumnLimit", Override::Int(0)),
    ("Cpp11BracedListStyle", Override::Bool(false)),
    ("FixNamespaceComments", Override::Bool(false)),
    ("IndentWidth", Override::Int(4)),
    ("NamespaceIndentation", Override::Member("Inner")),
    ("PointerAlignment", Override::Member("Left")),
];

static GNU: OverrideTable = &[
    ("AlwaysBreakAfterReturnType", Override::Member("AllDefinitions")),
    ("BraceWrapping.AfterCaseLabel", Override::Bool(true)),
    ("BraceWrapping.AfterClass", Override::Bool(true)),
    ("BraceWrapping.AfterControlStatement", Override::Member("Always")),
    ("BraceWrapping.AfterEnum", Override::Bool(true)),
    ("BraceWrapping.AfterExternBlock", Override::Bool(true)),
    ("BraceWrapping.AfterFunction", Override::Bool(true)),
    ("BraceWrapping.AfterNamespace", Override::Bool(true)),
    ("BraceWrapping.AfterStruct", Override::Bool(true)),
    ("BraceWrapping.AfterUnion", Override::Bool(true)),
    ("BraceWrapping.BeforeCatch", Override::Bool(true)),
    ("BraceWrapping.BeforeElse", Override::Bool(true)),
    ("BraceWrapping.BeforeWhile", Override::Bool(true)),
    ("BraceWrapping.IndentBraces", Override::Bool(true)),
    ("BreakBeforeBinaryOperators", Override::Member("All")),
    ("BreakBeforeBraces", Override::Member("GNU")),
    ("ColumnLimit", Override::Int(79)),
    ("Cpp11BracedListStyle", Override::Bool(false)),
    ("FixNamespaceComments", Override::Bool(false)),
    ("SpaceBeforeParens", Override::Member("Always")),
    ("Standard", Override::Member("c++03")),
];

static MICROSOFT: OverrideTable = &[
    ("AccessModifierOffset", Override::Int(-4)),
    ("AllowShortEnumsOnASingleLine", Override::Bool(false)),
    ("AllowShortFunctionsOnASingleLine", Override::Member("None")),
    ("AllowShortIfStatementsOnASingleLine", Override::Member("Never")),
    ("AllowShortLoopsOnASingleLine", Override::Bool(false)),
    ("AlwaysBreakTemplateDeclarations", Override::Member("MultiLine")),
    ("BraceWrapping.AfterClass", Override::Bool(true)),
    ("BraceWrapping.AfterControlStatement", Override::Member("Always")),
    ("BraceWrapping.AfterEnum", Override::Bool(true)),
    ("BraceWrapping.AfterExternBlock", Override::Bool(true)),
    ("BraceWrapping.AfterFunction", Override::Bool(true)),
    ("BraceWrapping.AfterNamespace", Override::Bool(true)),
    ("BraceWrapping.AfterStruct", Override::Bool(true)),
    ("BraceWrapping.AfterUnion", Override::Bool(true)),
    ("BraceWrapping.BeforeCatch", Override::Bool(true)),
    ("BraceWrapping.BeforeElse", Override::Bool(true)),
    ("BreakBeforeBraces", Override::Member("Custom")),
    ("ColumnLimit", Override::Int(120)),
    ("IndentWidth", Override::Int(4)),
    ("TabWidth", Override::Int(4)),
    ("UseTab", Override::Member("Never")),
];

static CLANG_FORMAT: OverrideTable = &[
    ("InsertBraces", Override::Bool(true)),
    ("InsertNewlineAtEOF", Override::Bool(true)),
    ("LineEnding", Override::Member("LF")),
    ("RemoveBracesLLVM", Override::Bool(true)),
    ("RemoveParentheses", Override::Member("ReturnStatement")),
    ("RemoveSemicolon", Override::Bool(true)),
];

static NONE: OverrideTable = &[
    ("DisableFormat", Override::Bool(true)),
    ("SortIncludes", Override::Member("Never")),
    ("SortUsingDeclarations", Override::Member("Never")),
];

fn google_include_categories() -> StyleNode {
    StyleNode::List(ListNode::with_items(
        include_category("", 0, 0, false),
        vec![
            include_category("^<ext/.*\\.h>", 2, 0, false),
            include_category("^<.*\\.h>", 1, 0, false),
            include_category("^<.*", 2, 0, false),
            include_category(".*", 3, 0, false),
        ],
    ))
}

fn google_raw_string_formats() -> StyleNode {
    StyleNode::List(ListNode::with_items(
        raw_string_format("None", &[], &[], "", ""),
        vec![
            raw_string_format(
                "Cpp",
                &["cc", "CC", "cpp", "Cpp", "CPP", "c++", "C++"],
                &[],
                "",
                "google",
            ),
            raw_string_format(
                "TextProto",
                &["pb", "PB", "proto", "PROTO"],
                &[
                    "EqualsProto",
                    "EquivToProto",
                    "PARSE_PARTIAL_TEXT_PROTO",
                    "PARSE_TEST_PROTO",
                    "PARSE_TEXT_PROTO",
                    "ParseTextOrDie",
                    "ParseTextProtoOrDie",
                    "ParseTestProto",
                    "ParsePartialTestProto",
                ],
                "pb",
                "google",
            ),
        ],
    ))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
