//! Built-in reference formatter for single declarations.
//!
//! # What it does (for beginners)
//!
//! The output pipeline formats one demangled line at a time, e.g.
//! `std::vector<int, std::allocator<int> >::push_back(int const&)`.  This
//! engine tokenizes such a line, drops the original whitespace, and lays it
//! out again following a handful of style options:
//!
//! | Option                               | Effect                                   |
//! |--------------------------------------|------------------------------------------|
//! | `DisableFormat`                      | line returned untouched                  |
//! | `PointerAlignment`                   | `int* p` / `int *p` / `int * p`          |
//! | `ReferenceAlignment`                 | same for `&` and `&&` unless `Pointer`   |
//! | `SpaceBeforeParens`                  | `f(x)` vs `f (x)`                        |
//! | `SpacesInParentheses`                | `f( x )`                                 |
//! | `SpacesInAngles`                     | `Foo< int >`                             |
//! | `Standard`                           | `> >` kept only for `c++03`              |
//! | `ColumnLimit`                        | wrap the argument list                   |
//! | `AlignAfterOpenBracket`              | continuation aligned under `(` or not    |
//! | `ContinuationIndentWidth`            | indent used when not aligning            |
//! | `UseTab` / `TabWidth`                | tabs in continuation indentation         |
//!
//! It is a stand-in with the same interface as a real formatter, not a full
//! C++ formatter: it never reorders or rewrites tokens.

use style_core::{
    deserialize_style, serialize_style, Preset, ScalarValue, SerializationFormatError, StyleNode,
};

use crate::application::ports::FormattingEngine;

/// [`FormattingEngine`] backed by the style-core presets and codec.
#[derive(Debug, Default, Clone, Copy)]
pub struct ReferenceFormatter;

impl ReferenceFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl FormattingEngine for ReferenceFormatter {
    fn get_style(&self, preset: Preset) -> StyleNode {
        preset.style()
    }

    fn format_one(&self, text: &str, style: &StyleNode) -> String {
        let options = LayoutOptions::from_style(style);
        if options.disabled {
            return text.to_string();
        }
        layout(&tokenize(text), &options)
    }

    fn serialize_to_text(&self, style: &StyleNode) -> Result<String, SerializationFormatError> {
        serialize_style(style)
    }

    fn deserialize_from_text(&self, text: &str) -> Result<StyleNode, SerializationFormatError> {
        deserialize_style(text)
    }
}

// ── Options ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Alignment {
    Left,
    Right,
    Middle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParenSpacing {
    Never,
    ControlStatements,
    NonEmpty,
    Always,
}

/// The style options the layout pass reads, with LLVM fallbacks.
#[derive(Debug, Clone)]
struct LayoutOptions {
    disabled: bool,
    pointer: Alignment,
    reference: Alignment,
    before_parens: ParenSpacing,
    in_parens: bool,
    in_angles: bool,
    split_closing_angles: bool,
    column_limit: usize,
    align_after_open: bool,
    continuation_indent: usize,
    tabs: bool,
    tab_width: usize,
}

impl LayoutOptions {
    fn from_style(style: &StyleNode) -> Self {
        let pointer = match member(style, "PointerAlignment") {
            Some("Left") => Alignment::Left,
            Some("Middle") => Alignment::Middle,
            _ => Alignment::Right,
        };
        let reference = match member(style, "ReferenceAlignment") {
            Some("Left") => Alignment::Left,
            Some("Right") => Alignment::Right,
            Some("Middle") => Alignment::Middle,
            _ => pointer,
        };
        let before_parens = match member(style, "SpaceBeforeParens") {
            Some("Never") => ParenSpacing::Never,
            Some("Always") => ParenSpacing::Always,
            Some("NonEmptyParentheses") => ParenSpacing::NonEmpty,
            _ => ParenSpacing::ControlStatements,
        };

        Self {
            disabled: flag(style, "DisableFormat"),
            pointer,
            reference,
            before_parens,
            in_parens: flag(style, "SpacesInParentheses"),
            in_angles: member(style, "SpacesInAngles") == Some("Always"),
            split_closing_angles: member(style, "Standard") == Some("c++03"),
            column_limit: count(style, "ColumnLimit", 80),
            align_after_open: !matches!(
                member(style, "AlignAfterOpenBracket"),
                Some("DontAlign" | "AlwaysBreak" | "BlockIndent")
            ),
            continuation_indent: count(style, "ContinuationIndentWidth", 4),
            tabs: matches!(member(style, "UseTab"), Some("Always" | "ForContinuationAndIndentation")),
            tab_width: count(style, "TabWidth", 8).max(1),
        }
    }
}

fn flag(style: &StyleNode, name: &str) -> bool {
    style
        .field(name)
        .and_then(StyleNode::as_scalar)
        .and_then(ScalarValue::as_bool)
        .unwrap_or(false)
}

fn count(style: &StyleNode, name: &str, default: usize) -> usize {
    style
        .field(name)
        .and_then(StyleNode::as_scalar)
        .and_then(ScalarValue::as_int)
        .and_then(|v| usize::try_from(v).ok())
        .unwrap_or(default)
}

fn member(style: &StyleNode, name: &str) -> Option<&'static str> {
    style.field(name).and_then(StyleNode::as_enum).map(|v| v.name())
}

// ── Tokens ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Word(String),
    Scope,
    Star,
    Amp,
    AmpAmp,
    Punct(char),
}

impl Token {
    fn text(&self) -> String {
        match self {
            Token::Word(w) => w.clone(),
            Token::Scope => "::".to_string(),
            Token::Star => "*".to_string(),
            Token::Amp => "&".to_string(),
            Token::AmpAmp => "&&".to_string(),
            Token::Punct(c) => c.to_string(),
        }
    }

    fn is_word(&self) -> bool {
        matches!(self, Token::Word(_))
    }

    fn is_declarator(&self) -> bool {
        matches!(self, Token::Star | Token::Amp | Token::AmpAmp)
    }

    fn is(&self, c: char) -> bool {
        *self == Token::Punct(c)
    }
}

fn tokenize(text: &str) -> Vec<Token> {
    let chars: Vec<char> = text.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if c.is_whitespace() {
            i += 1;
        } else if c.is_alphanumeric() || matches!(c, '_' | '$' | '~' | '.') {
            let start = i;
            while i < chars.len() && (chars[i].is_alphanumeric() || matches!(chars[i], '_' | '$' | '~' | '.')) {
                i += 1;
            }
            tokens.push(Token::Word(chars[start..i].iter().collect()));
        } else if c == ':' && chars.get(i + 1) == Some(&':') {
            tokens.push(Token::Scope);
            i += 2;
        } else if c == '&' && chars.get(i + 1) == Some(&'&') {
            tokens.push(Token::AmpAmp);
            i += 2;
        } else {
            tokens.push(match c {
                '*' => Token::Star,
                '&' => Token::Amp,
                other => Token::Punct(other),
            });
            i += 1;
        }
    }
    tokens
}

// ── Layout ────────────────────────────────────────────────────────────────────

const CONTROL_KEYWORDS: &[&str] = &["if", "for", "while", "switch", "catch"];

/// Whether a single space goes between `prev` and `next`.
fn space_between(prev: &Token, next: &Token, after_next: Option<&Token>, options: &LayoutOptions) -> bool {
    if *prev == Token::Scope || *next == Token::Scope || next.is(',') {
        return false;
    }
    if prev.is(',') {
        return true;
    }

    if next.is('(') {
        return match prev {
            Token::Word(w) if CONTROL_KEYWORDS.contains(&w.as_str()) => options.before_parens != ParenSpacing::Never,
            Token::Word(_) => match options.before_parens {
                ParenSpacing::Always => true,
                ParenSpacing::NonEmpty => after_next.is_some_and(|t| !t.is(')')),
                ParenSpacing::Never | ParenSpacing::ControlStatements => false,
            },
            _ => false,
        };
    }
    if prev.is('(') {
        return !next.is(')') && options.in_parens;
    }
    if next.is(')') {
        return options.in_parens;
    }

    if next.is('<') {
        return false;
    }
    if prev.is('<') {
        return !next.is('>') && options.in_angles;
    }
    if next.is('>') {
        return if prev.is('>') {
            options.split_closing_angles || options.in_angles
        } else {
            options.in_angles
        };
    }

    if next.is_declarator() {
        let alignment = if *next == Token::Star { options.pointer } else { options.reference };
        return (prev.is_word() || prev.is('>')) && alignment != Alignment::Left;
    }
    if prev.is_declarator() {
        let alignment = if *prev == Token::Star { options.pointer } else { options.reference };
        return next.is_word() && alignment != Alignment::Right;
    }

    if prev.is('[') || next.is(']') || (next.is('[') && prev.is_word()) {
        return false;
    }
    true
}

/// One rendered token with the whitespace that precedes it.
struct Piece {
    text: String,
    spaced: bool,
}

impl Piece {
    fn width(&self) -> usize {
        self.text.chars().count() + usize::from(self.spaced)
    }
}

fn layout(tokens: &[Token], options: &LayoutOptions) -> String {
    let pieces: Vec<Piece> = tokens
        .iter()
        .enumerate()
        .map(|(i, token)| Piece {
            text: token.text(),
            spaced: i > 0 && space_between(&tokens[i - 1], token, tokens.get(i + 1), options),
        })
        .collect();

    let single_line: usize = pieces.iter().map(Piece::width).sum();
    let breaks = break_points(tokens);
    if options.column_limit == 0 || single_line <= options.column_limit || breaks.is_empty() {
        return join(&pieces);
    }
    wrap(&pieces, &breaks, options)
}

fn join(pieces: &[Piece]) -> String {
    let mut out = String::new();
    for piece in pieces {
        if piece.spaced {
            out.push(' ');
        }
        out.push_str(&piece.text);
    }
    out
}

/// Indices of tokens that may start a continuation line: every argument
/// after a top-level comma of the outermost parameter list.
fn break_points(tokens: &[Token]) -> Vec<usize> {
    let mut angle = 0usize;
    let mut open = None;
    for (i, token) in tokens.iter().enumerate() {
        if token.is('<') {
            angle += 1;
        } else if token.is('>') {
            angle = angle.saturating_sub(1);
        } else if token.is('(') && angle == 0 {
            open = Some(i);
            break;
        }
    }
    let Some(open) = open else {
        return Vec::new();
    };

    let mut points = Vec::new();
    let mut depth = 0usize;
    angle = 0;
    for (i, token) in tokens.iter().enumerate().skip(open + 1) {
        match token {
            t if t.is('(') || t.is('[') || t.is('{') => depth += 1,
            t if t.is(')') || t.is(']') || t.is('}') => {
                if depth == 0 {
                    break;
                }
                depth -= 1;
            }
            t if t.is('<') => angle += 1,
            t if t.is('>') => angle = angle.saturating_sub(1),
            t if t.is(',') && depth == 0 && angle == 0 => {
                if i + 1 < tokens.len() {
                    points.push(i + 1);
                }
            }
            _ => {}
        }
    }
    points
}

fn wrap(pieces: &[Piece], breaks: &[usize], options: &LayoutOptions) -> String {
    let open_column = breaks
        .first()
        .map(|&first_arg| {
            let mut start = first_arg;
            while start > 0 && pieces[start - 1].text != "(" {
                start -= 1;
            }
            pieces[..start].iter().map(Piece::width).sum::<usize>() + usize::from(options.in_parens)
        })
        .unwrap_or(0);
    // Wrapping only happens when the line is longer than the limit, so the
    // limit also bounds the indent.
    let indent = if options.align_after_open {
        open_column
    } else {
        options.continuation_indent
    }
    .min(options.column_limit);
    let indent_text = indentation(indent, options);

    let mut lines: Vec<String> = vec![String::new()];
    let mut width = 0usize;
    for (i, piece) in pieces.iter().enumerate() {
        if breaks.contains(&i) {
            let next_break = breaks.iter().copied().find(|&b| b > i).unwrap_or(pieces.len());
            let segment: usize = pieces[i..next_break].iter().map(Piece::width).sum();
            if width + segment > options.column_limit && width > indent {
                lines.push(indent_text.clone());
                width = indent;
                if let Some(line) = lines.last_mut() {
                    line.push_str(&piece.text);
                }
                width += piece.text.chars().count();
                continue;
            }
        }
        if let Some(line) = lines.last_mut() {
            if piece.spaced {
                line.push(' ');
            }
            line.push_str(&piece.text);
        }
        width += piece.width();
    }

    lines
        .iter()
        .map(|line| line.trim_end())
        .collect::<Vec<_>>()
        .join("\n")
}

fn indentation(columns: usize, options: &LayoutOptions) -> String {
    if options.tabs {
        let tabs = columns / options.tab_width;
        let spaces = columns % options.tab_width;
        format!("{}{}", "\t".repeat(tabs), " ".repeat(spaces))
    } else {
        " ".repeat(columns)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use style_core::{Edit, StylePath, TreeMutator};

    fn with(preset: Preset, edits: &[(&str, &str)]) -> StyleNode {
        let mut style = preset.style();
        let mutator = TreeMutator::new();
        for (path, raw) in edits {
            let path = StylePath::parse(path).unwrap();
            let edit = Edit::from_text(style_core::resolve(&style, &path).unwrap(), raw).unwrap();
            mutator.apply(&mut style, &path, &edit).unwrap();
        }
        style
    }

    fn format(text: &str, style: &StyleNode) -> String {
        ReferenceFormatter.format_one(text, style)
    }

    #[test]
    fn test_pointer_alignment_follows_style() {
        let line = "foo::bar(char const*, int &x)";

        assert_eq!(format(line, &Preset::Llvm.style()), "foo::bar(char const *, int &x)");
        assert_eq!(format(line, &Preset::Google.style()), "foo::bar(char const*, int& x)");
        assert_eq!(
            format(line, &with(Preset::Llvm, &[("PointerAlignment", "Middle")])),
            "foo::bar(char const *, int & x)"
        );
    }

    #[test]
    fn test_disable_format_returns_line_untouched() {
        let line = "foo::bar(  char const*)";
        assert_eq!(format(line, &Preset::None.style()), line);
    }

    #[test]
    fn test_const_member_function_and_whitespace_normalisation() {
        assert_eq!(format("  Foo::get( )   const ", &Preset::Llvm.style()), "Foo::get() const");
    }

    #[test]
    fn test_space_before_parens_options() {
        let always = with(Preset::Llvm, &[("SpaceBeforeParens", "Always")]);
        let non_empty = with(Preset::Llvm, &[("SpaceBeforeParens", "NonEmptyParentheses")]);

        assert_eq!(format("foo(int)", &always), "foo (int)");
        assert_eq!(format("foo()", &non_empty), "foo()");
        assert_eq!(format("foo(int)", &non_empty), "foo (int)");
    }

    #[test]
    fn test_spaces_in_parentheses_and_angles() {
        let style = with(Preset::Llvm, &[("SpacesInParentheses", "true"), ("SpacesInAngles", "Always")]);
        assert_eq!(format("f<int>(int)", &style), "f< int >( int )");
        assert_eq!(format("f()", &style), "f()");
    }

    #[test]
    fn test_closing_angles_merge_unless_cpp03() {
        let line = "std::vector<int, std::allocator<int> >::size()";
        assert_eq!(
            format(line, &Preset::Llvm.style()),
            "std::vector<int, std::allocator<int>>::size()"
        );
        assert_eq!(
            format(line, &with(Preset::Llvm, &[("Standard", "c++03")])),
            "std::vector<int, std::allocator<int> >::size()"
        );
    }

    #[test]
    fn test_column_limit_wraps_aligned_under_open_paren() {
        let style = with(Preset::Llvm, &[("ColumnLimit", "30")]);

        let out = format("namespace_name::function(int first, int second, int third)", &style);

        assert_eq!(
            out,
            "namespace_name::function(int first,\n                         int second,\n                         int third)"
        );
    }

    #[test]
    fn test_continuation_indent_with_tabs_when_not_aligning() {
        let style = with(
            Preset::Llvm,
            &[
                ("ColumnLimit", "20"),
                ("AlignAfterOpenBracket", "DontAlign"),
                ("ContinuationIndentWidth", "10"),
                ("UseTab", "Always"),
            ],
        );

        let out = format("function(int first, int second)", &style);

        assert_eq!(out, "function(int first,\n\t  int second)");
    }

    #[test]
    fn test_huge_continuation_indent_is_capped_at_column_limit() {
        let huge = (1i64 << 50).to_string();
        let spaces = with(
            Preset::Llvm,
            &[
                ("ColumnLimit", "10"),
                ("AlignAfterOpenBracket", "DontAlign"),
                ("ContinuationIndentWidth", huge.as_str()),
            ],
        );
        let tabs = with(
            Preset::Llvm,
            &[
                ("ColumnLimit", "10"),
                ("AlignAfterOpenBracket", "DontAlign"),
                ("ContinuationIndentWidth", huge.as_str()),
                ("UseTab", "Always"),
                ("TabWidth", huge.as_str()),
            ],
        );

        let expected = format!("function(int first,\n{}int second)", " ".repeat(10));
        assert_eq!(format("function(int first, int second)", &spaces), expected);
        assert_eq!(format("function(int first, int second)", &tabs), expected);
    }

    #[test]
    fn test_column_limit_zero_never_wraps() {
        let style = with(Preset::Llvm, &[("ColumnLimit", "0")]);
        let line = "f(int aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa, int bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb)";
        assert_eq!(format(line, &style), line);
    }

    #[test]
    fn test_clone_suffix_keeps_its_space() {
        assert_eq!(format("foo() [clone .cold]", &Preset::Llvm.style()), "foo() [clone .cold]");
    }

    #[test]
    fn test_codec_delegates_to_style_core() {
        let style = Preset::WebKit.style();
        let text = ReferenceFormatter.serialize_to_text(&style).unwrap();
        assert_eq!(ReferenceFormatter.deserialize_from_text(&text).unwrap(), style);
    }
}
