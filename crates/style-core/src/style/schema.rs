//! The clang-format style schema.
//!
//! This module declares every enum type the editor knows about and builds the
//! LLVM base style, the tree every preset starts from.  Field order follows
//! the order `clang-format --dump-config` prints options in, which is also the
//! order the editor lists them and the codec writes them.
//!
//! All the enum tables live in [`ENUM_TYPES`] so callers can look a type up by
//! name, e.g. to render a dropdown for a type that is not currently in a tree.

use crate::domain::enums::EnumType;
use crate::domain::node::{ListNode, ScalarKind, StructNode, StyleNode};

// ── Enum types ────────────────────────────────────────────────────────────────

pub static LANGUAGE_KIND: EnumType = EnumType::new(
    "LanguageKind",
    &[
        "None", "Cpp", "CSharp", "Java", "JavaScript", "Json", "ObjC", "Proto", "TableGen",
        "TextProto", "Verilog",
    ],
);
pub static BRACKET_ALIGNMENT: EnumType =
    EnumType::new("BracketAlignmentStyle", &["Align", "DontAlign", "AlwaysBreak", "BlockIndent"]);
pub static ARRAY_INITIALIZER_ALIGNMENT: EnumType =
    EnumType::new("ArrayInitializerAlignmentStyle", &["Left", "Right", "None"]);
pub static ESCAPED_NEWLINE_ALIGNMENT: EnumType =
    EnumType::new("EscapedNewlineAlignmentStyle", &["DontAlign", "Left", "Right"]);
pub static OPERAND_ALIGNMENT: EnumType =
    EnumType::new("OperandAlignmentStyle", &["DontAlign", "Align", "AlignAfterOperator"]);
pub static TRAILING_COMMENTS_ALIGNMENT_KIND: EnumType =
    EnumType::new("TrailingCommentsAlignmentKinds", &["Leave", "Always", "Never"]);
pub static SHORT_BLOCK: EnumType = EnumType::new("ShortBlockStyle", &["Never", "Empty", "Always"]);
pub static SHORT_FUNCTION: EnumType =
    EnumType::new("ShortFunctionStyle", &["None", "InlineOnly", "Empty", "Inline", "All"]);
pub static SHORT_IF: EnumType =
    EnumType::new("ShortIfStyle", &["Never", "WithoutElse", "OnlyFirstIf", "AllIfsAndElse"]);
pub static SHORT_LAMBDA: EnumType = EnumType::new("ShortLambdaStyle", &["None", "Empty", "Inline", "All"]);
pub static RETURN_TYPE_BREAKING: EnumType = EnumType::new(
    "ReturnTypeBreakingStyle",
    &["None", "All", "TopLevel", "AllDefinitions", "TopLevelDefinitions"],
);
pub static BREAK_TEMPLATE_DECLARATIONS: EnumType =
    EnumType::new("BreakTemplateDeclarationsStyle", &["No", "MultiLine", "Yes"]);
pub static BIT_FIELD_COLON_SPACING: EnumType =
    EnumType::new("BitFieldColonSpacingStyle", &["Both", "None", "Before", "After"]);
pub static AFTER_CONTROL_STATEMENT: EnumType = EnumType::new(
    "BraceWrappingAfterControlStatementStyle",
    &["Never", "MultiLine", "Always"],
);
pub static BINARY_OPERATOR: EnumType =
    EnumType::new("BinaryOperatorStyle", &["None", "NonAssignment", "All"]);
pub static BRACE_BREAKING: EnumType = EnumType::new(
    "BraceBreakingStyle",
    &[
        "Attach", "Linux", "Mozilla", "Stroustrup", "Allman", "Whitesmiths", "GNU", "WebKit", "Custom",
    ],
);
pub static BREAK_CONSTRUCTOR_INITIALIZERS: EnumType = EnumType::new(
    "BreakConstructorInitializersStyle",
    &["BeforeColon", "BeforeComma", "AfterColon"],
);
pub static BREAK_INHERITANCE_LIST: EnumType = EnumType::new(
    "BreakInheritanceListStyle",
    &["BeforeColon", "BeforeComma", "AfterColon", "AfterComma"],
);
pub static INCLUDE_BLOCKS: EnumType = EnumType::new("IncludeBlocksStyle", &["Preserve", "Merge", "Regroup"]);
pub static INDENT_EXTERN_BLOCK: EnumType =
    EnumType::new("IndentExternBlockStyle", &["AfterExternBlock", "NoIndent", "Indent"]);
pub static PP_DIRECTIVE_INDENT: EnumType =
    EnumType::new("PPDirectiveIndentStyle", &["None", "AfterHash", "BeforeHash"]);
pub static LINE_ENDING: EnumType = EnumType::new("LineEndingStyle", &["LF", "CRLF", "DeriveLF", "DeriveCRLF"]);
pub static NAMESPACE_INDENTATION: EnumType = EnumType::new("NamespaceIndentationKind", &["None", "Inner", "All"]);
pub static POINTER_ALIGNMENT: EnumType = EnumType::new("PointerAlignmentStyle", &["Left", "Right", "Middle"]);
pub static QUALIFIER_ALIGNMENT: EnumType =
    EnumType::new("QualifierAlignmentStyle", &["Leave", "Left", "Right", "Custom"]);
pub static REFERENCE_ALIGNMENT: EnumType =
    EnumType::new("ReferenceAlignmentStyle", &["Pointer", "Left", "Right", "Middle"]);
pub static REMOVE_PARENTHESES: EnumType = EnumType::new(
    "RemoveParenthesesStyle",
    &["Leave", "MultipleParentheses", "ReturnStatement"],
);
pub static SEPARATE_DEFINITION: EnumType = EnumType::new("SeparateDefinitionStyle", &["Leave", "Always", "Never"]);
pub static SORT_INCLUDES: EnumType =
    EnumType::new("SortIncludesOptions", &["Never", "CaseSensitive", "CaseInsensitive"]);
pub static SORT_USING_DECLARATIONS: EnumType = EnumType::new(
    "SortUsingDeclarationsOptions",
    &["Never", "Lexicographic", "LexicographicNumeric"],
);
pub static SPACE_BEFORE_PARENS: EnumType = EnumType::new(
    "SpaceBeforeParensStyle",
    &[
        "Never",
        "ControlStatements",
        "ControlStatementsExceptControlMacros",
        "NonEmptyParentheses",
        "Always",
        "Custom",
    ],
);
pub static SPACES_IN_ANGLES: EnumType = EnumType::new("SpacesInAnglesStyle", &["Never", "Always", "Leave"]);
pub static LANGUAGE_STANDARD: EnumType = EnumType::new(
    "LanguageStandard",
    &["c++03", "c++11", "c++14", "c++17", "c++20", "Latest", "Auto"],
);
pub static USE_TAB: EnumType = EnumType::new(
    "UseTabStyle",
    &[
        "Never",
        "ForIndentation",
        "ForContinuationAndIndentation",
        "AlignWithSpaces",
        "Always",
    ],
);

/// Every enum type used by the schema.
pub static ENUM_TYPES: &[&EnumType] = &[
    &LANGUAGE_KIND,
    &BRACKET_ALIGNMENT,
    &ARRAY_INITIALIZER_ALIGNMENT,
    &ESCAPED_NEWLINE_ALIGNMENT,
    &OPERAND_ALIGNMENT,
    &TRAILING_COMMENTS_ALIGNMENT_KIND,
    &SHORT_BLOCK,
    &SHORT_FUNCTION,
    &SHORT_IF,
    &SHORT_LAMBDA,
    &RETURN_TYPE_BREAKING,
    &BREAK_TEMPLATE_DECLARATIONS,
    &BIT_FIELD_COLON_SPACING,
    &AFTER_CONTROL_STATEMENT,
    &BINARY_OPERATOR,
    &BRACE_BREAKING,
    &BREAK_CONSTRUCTOR_INITIALIZERS,
    &BREAK_INHERITANCE_LIST,
    &INCLUDE_BLOCKS,
    &INDENT_EXTERN_BLOCK,
    &PP_DIRECTIVE_INDENT,
    &LINE_ENDING,
    &NAMESPACE_INDENTATION,
    &POINTER_ALIGNMENT,
    &QUALIFIER_ALIGNMENT,
    &REFERENCE_ALIGNMENT,
    &REMOVE_PARENTHESES,
    &SEPARATE_DEFINITION,
    &SORT_INCLUDES,
    &SORT_USING_DECLARATIONS,
    &SPACE_BEFORE_PARENS,
    &SPACES_IN_ANGLES,
    &LANGUAGE_STANDARD,
    &USE_TAB,
];

/// Looks up an enum type by its name.
pub fn enum_type(name: &str) -> Option<&'static EnumType> {
    ENUM_TYPES.iter().copied().find(|ty| ty.name == name)
}

// ── Node helpers ──────────────────────────────────────────────────────────────

/// An enum leaf.  `member` must be declared in `ty`; the debug assertion
/// fires for a bad literal whenever the base style or a preset is built in a
/// test build.
pub fn choice(ty: &'static EnumType, member: &str) -> StyleNode {
    debug_assert!(ty.contains(member), "{member} is not a member of {}", ty.name);
    StyleNode::Enum(ty.value(member).unwrap_or_else(|| ty.first()))
}

/// One `IncludeCategories` entry.
pub fn include_category(regex: &str, priority: i64, sort_priority: i64, case_sensitive: bool) -> StyleNode {
    StyleNode::Struct(
        StructNode::new("IncludeCategory")
            .with_field("Regex", StyleNode::text(regex))
            .with_field("Priority", StyleNode::int(priority))
            .with_field("SortPriority", StyleNode::int(sort_priority))
            .with_field("CaseSensitive", StyleNode::boolean(case_sensitive)),
    )
}

/// One `RawStringFormats` entry.
pub fn raw_string_format(
    language: &str,
    delimiters: &[&str],
    enclosing_functions: &[&str],
    canonical_delimiter: &str,
    based_on_style: &str,
) -> StyleNode {
    StyleNode::Struct(
        StructNode::new("RawStringFormat")
            .with_field("Language", choice(&LANGUAGE_KIND, language))
            .with_field("Delimiters", StyleNode::text_list(delimiters))
            .with_field("EnclosingFunctions", StyleNode::text_list(enclosing_functions))
            .with_field("CanonicalDelimiter", StyleNode::text(canonical_delimiter))
            .with_field("BasedOnStyle", StyleNode::text(based_on_style)),
    )
}

fn align_consecutive() -> StyleNode {
    StyleNode::Struct(
        StructNode::new("AlignConsecutiveStyle")
            .with_field("Enabled", StyleNode::boolean(false))
            .with_field("AcrossEmptyLines", StyleNode::boolean(false))
            .with_field("AcrossComments", StyleNode::boolean(false))
            .with_field("AlignCompound", StyleNode::boolean(false))
            .with_field("PadOperators", StyleNode::boolean(true)),
    )
}

fn brace_wrapping() -> StyleNode {
    StyleNode::Struct(
        StructNode::new("BraceWrappingFlags")
            .with_field("AfterCaseLabel", StyleNode::boolean(false))
            .with_field("AfterClass", StyleNode::boolean(false))
            .with_field("AfterControlStatement", choice(&AFTER_CONTROL_STATEMENT, "Never"))
            .with_field("AfterEnum", StyleNode::boolean(false))
            .with_field("AfterExternBlock", StyleNode::boolean(false))
            .with_field("AfterFunction", StyleNode::boolean(false))
            .with_field("AfterNamespace", StyleNode::boolean(false))
            .with_field("AfterObjCDeclaration", StyleNode::boolean(false))
            .with_field("AfterStruct", StyleNode::boolean(false))
            .with_field("AfterUnion", StyleNode::boolean(false))
            .with_field("BeforeCatch", StyleNode::boolean(false))
            .with_field("BeforeElse", StyleNode::boolean(false))
            .with_field("BeforeLambdaBody", StyleNode::boolean(false))
            .with_field("BeforeWhile", StyleNode::boolean(false))
            .with_field("IndentBraces", StyleNode::boolean(false))
            .with_field("SplitEmptyFunction", StyleNode::boolean(true))
            .with_field("SplitEmptyRecord", StyleNode::boolean(true))
            .with_field("SplitEmptyNamespace", StyleNode::boolean(true)),
    )
}

fn trailing_comments() -> StyleNode {
    StyleNode::Struct(
        StructNode::new("TrailingCommentsAlignmentStyle")
            .with_field("Kind", choice(&TRAILING_COMMENTS_ALIGNMENT_KIND, "Always"))
            .with_field("OverEmptyLines", StyleNode::int(0)),
    )
}

fn llvm_include_categories() -> StyleNode {
    StyleNode::List(ListNode::with_items(
        include_category("", 0, 0, false),
        vec![
            include_category("^\"(llvm|llvm-c|clang|clang-c)/", 2, 0, false),
            include_category("^(<|\"(gtest|gmock|isl|json)/)", 3, 0, false),
            include_category(".*", 1, 0, false),
        ],
    ))
}

fn empty_raw_string_formats() -> StyleNode {
    StyleNode::List(ListNode::new(raw_string_format("None", &[], &[], "", "")))
}

// ── Base style ────────────────────────────────────────────────────────────────

/// Builds the LLVM style, the root every preset is derived from.
pub fn llvm_base_style() -> StyleNode {
    StyleNode::Struct(
        StructNode::new("FormatStyle")
            .with_field("Language", choice(&LANGUAGE_KIND, "Cpp"))
            .with_field("AccessModifierOffset", StyleNode::int(-2))
            .with_field("AlignAfterOpenBracket", choice(&BRACKET_ALIGNMENT, "Align"))
            .with_field("AlignArrayOfStructures", choice(&ARRAY_INITIALIZER_ALIGNMENT, "None"))
            .with_field("AlignConsecutiveAssignments", align_consecutive())
            .with_field("AlignConsecutiveDeclarations", align_consecutive())
            .with_field("AlignEscapedNewlines", choice(&ESCAPED_NEWLINE_ALIGNMENT, "Right"))
            .with_field("AlignOperands", choice(&OPERAND_ALIGNMENT, "Align"))
            .with_field("AlignTrailingComments", trailing_comments())
            .with_field("AllowAllArgumentsOnNextLine", StyleNode::boolean(true))
            .with_field("AllowAllParametersOfDeclarationOnNextLine", StyleNode::boolean(true))
            .with_field("AllowShortBlocksOnASingleLine", choice(&SHORT_BLOCK, "Never"))
            .with_field("AllowShortCaseLabelsOnASingleLine", StyleNode::boolean(false))
            .with_field("AllowShortEnumsOnASingleLine", StyleNode::boolean(true))
            .with_field("AllowShortFunctionsOnASingleLine", choice(&SHORT_FUNCTION, "All"))
            .with_field("AllowShortIfStatementsOnASingleLine", choice(&SHORT_IF, "Never"))
            .with_field("AllowShortLambdasOnASingleLine", choice(&SHORT_LAMBDA, "All"))
            .with_field("AllowShortLoopsOnASingleLine", StyleNode::boolean(false))
            .with_field("AlwaysBreakAfterReturnType", choice(&RETURN_TYPE_BREAKING, "None"))
            .with_field("AlwaysBreakBeforeMultilineStrings", StyleNode::boolean(false))
            .with_field(
                "AlwaysBreakTemplateDeclarations",
                choice(&BREAK_TEMPLATE_DECLARATIONS, "MultiLine"),
            )
            .with_field("BinPackArguments", StyleNode::boolean(true))
            .with_field("BinPackParameters", StyleNode::boolean(true))
            .with_field("BitFieldColonSpacing", choice(&BIT_FIELD_COLON_SPACING, "Both"))
            .with_field("BraceWrapping", brace_wrapping())
            .with_field("BracedInitializerIndentWidth", StyleNode::absent(ScalarKind::Int))
            .with_field("BreakBeforeBinaryOperators", choice(&BINARY_OPERATOR, "None"))
            .with_field("BreakBeforeBraces", choice(&BRACE_BREAKING, "Attach"))
            .with_field("BreakBeforeTernaryOperators", StyleNode::boolean(true))
            .with_field(
                "BreakConstructorInitializers",
                choice(&BREAK_CONSTRUCTOR_INITIALIZERS, "BeforeColon"),
            )
            .with_field("BreakInheritanceList", choice(&BREAK_INHERITANCE_LIST, "BeforeColon"))
            .with_field("BreakStringLiterals", StyleNode::boolean(true))
            .with_field("ColumnLimit", StyleNode::int(80))
            .with_field("CommentPragmas", StyleNode::text("^ IWYU pragma:"))
            .with_field("CompactNamespaces", StyleNode::boolean(false))
            .with_field("ConstructorInitializerIndentWidth", StyleNode::int(4))
            .with_field("ContinuationIndentWidth", StyleNode::int(4))
            .with_field("Cpp11BracedListStyle", StyleNode::boolean(true))
            .with_field("DerivePointerAlignment", StyleNode::boolean(false))
            .with_field("DisableFormat", StyleNode::boolean(false))
            .with_field("FixNamespaceComments", StyleNode::boolean(true))
            .with_field(
                "ForEachMacros",
                StyleNode::text_list(&["foreach", "Q_FOREACH", "BOOST_FOREACH"]),
            )
            .with_field("IncludeBlocks", choice(&INCLUDE_BLOCKS, "Preserve"))
            .with_field("IncludeCategories", llvm_include_categories())
            .with_field("IncludeIsMainRegex", StyleNode::text("(Test)?$"))
            .with_field("IndentAccessModifiers", StyleNode::boolean(false))
            .with_field("IndentCaseBlocks", StyleNode::boolean(false))
            .with_field("IndentCaseLabels", StyleNode::boolean(false))
            .with_field("IndentExternBlock", choice(&INDENT_EXTERN_BLOCK, "AfterExternBlock"))
            .with_field("IndentGotoLabels", StyleNode::boolean(true))
            .with_field("IndentPPDirectives", choice(&PP_DIRECTIVE_INDENT, "None"))
            .with_field("IndentWidth", StyleNode::int(2))
            .with_field("IndentWrappedFunctionNames", StyleNode::boolean(false))
            .with_field("InsertBraces", StyleNode::boolean(false))
            .with_field("InsertNewlineAtEOF", StyleNode::boolean(false))
            .with_field("KeepEmptyLinesAtTheStartOfBlocks", StyleNode::boolean(true))
            .with_field("LineEnding", choice(&LINE_ENDING, "DeriveLF"))
            .with_field("MaxEmptyLinesToKeep", StyleNode::int(1))
            .with_field("NamespaceIndentation", choice(&NAMESPACE_INDENTATION, "None"))
            .with_field("PenaltyBreakComment", StyleNode::int(300))
            .with_field("PenaltyExcessCharacter", StyleNode::int(1_000_000))
            .with_field("PenaltyReturnTypeOnItsOwnLine", StyleNode::int(60))
            .with_field("PointerAlignment", choice(&POINTER_ALIGNMENT, "Right"))
            .with_field("QualifierAlignment", choice(&QUALIFIER_ALIGNMENT, "Leave"))
            .with_field("RawStringFormats", empty_raw_string_formats())
            .with_field("ReferenceAlignment", choice(&REFERENCE_ALIGNMENT, "Pointer"))
            .with_field("ReflowComments", StyleNode::boolean(true))
            .with_field("RemoveBracesLLVM", StyleNode::boolean(false))
            .with_field("RemoveParentheses", choice(&REMOVE_PARENTHESES, "Leave"))
            .with_field("RemoveSemicolon", StyleNode::boolean(false))
            .with_field("SeparateDefinitionBlocks", choice(&SEPARATE_DEFINITION, "Leave"))
            .with_field("SortIncludes", choice(&SORT_INCLUDES, "CaseSensitive"))
            .with_field(
                "SortUsingDeclarations",
                choice(&SORT_USING_DECLARATIONS, "LexicographicNumeric"),
            )
            .with_field("SpaceAfterCStyleCast", StyleNode::boolean(false))
            .with_field("SpaceAfterLogicalNot", StyleNode::boolean(false))
            .with_field("SpaceAfterTemplateKeyword", StyleNode::boolean(true))
            .with_field("SpaceBeforeAssignmentOperators", StyleNode::boolean(true))
            .with_field("SpaceBeforeParens", choice(&SPACE_BEFORE_PARENS, "ControlStatements"))
            .with_field("SpaceInEmptyBlock", StyleNode::boolean(false))
            .with_field("SpacesBeforeTrailingComments", StyleNode::int(1))
            .with_field("SpacesInAngles", choice(&SPACES_IN_ANGLES, "Never"))
            .with_field("SpacesInParentheses", StyleNode::boolean(false))
            .with_field("SpacesInSquareBrackets", StyleNode::boolean(false))
            .with_field("Standard", choice(&LANGUAGE_STANDARD, "Latest"))
            .with_field(
                "StatementMacros",
                StyleNode::text_list(&["Q_UNUSED", "QT_REQUIRE_VERSION"]),
            )
            .with_field("TabWidth", StyleNode::int(8))
            .with_field("UseTab", choice(&USE_TAB, "Never")),
    )
}

// ── Tests ─────────────────────────────────────────────────────────────────────
