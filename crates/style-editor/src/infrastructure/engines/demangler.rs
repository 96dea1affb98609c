//! Built-in Itanium C++ ABI demangler.
//!
//! # Scope (for beginners)
//!
//! Compilers following the Itanium C++ ABI (GCC, Clang) encode C++ names as
//! plain identifiers starting with `_Z`.  For example:
//!
//! | Mangled                 | Demangled                    |
//! |-------------------------|------------------------------|
//! | `_Z3foov`               | `foo()`                      |
//! | `_ZN3foo3barEPKc`       | `foo::bar(char const*)`      |
//! | `_ZNK3Foo3getEv`        | `Foo::get() const`           |
//! | `_ZN3foo3bazERKS_`      | `foo::baz(foo const&)`       |
//! | `_Z3maxIiET_S0_S0_`     | `int max<int>(int, int)`     |
//!
//! This module handles the common subset: nested names, constructors and
//! destructors, const member functions, builtin types, pointer / reference /
//! const qualifiers, template arguments and parameters, integer literals and
//! `S_` / `S<n>_` back-references.  Anything it does not understand is
//! returned unchanged, which is what the output pipeline wants.
//!
//! Output spacing follows `c++filt`: `char const*`, `Foo<Bar<int> >`.

use crate::application::ports::DemanglingEngine;

/// Deepest nesting of types, names and template argument lists accepted
/// before the symbol is given up on and passed through.
const MAX_DEPTH: usize = 256;

/// [`DemanglingEngine`] for the Itanium C++ ABI subset described above.
#[derive(Debug, Default, Clone, Copy)]
pub struct ItaniumDemangler;

impl ItaniumDemangler {
    pub fn new() -> Self {
        Self
    }
}

impl DemanglingEngine for ItaniumDemangler {
    fn demangle_one(&self, text: &str) -> String {
        demangle(text).unwrap_or_else(|| text.to_string())
    }
}

/// Demangles one symbol, or `None` when it is not a supported mangled name.
///
/// A `.suffix` left by the optimiser (`_Z3foov.cold`) is reported as a clone
/// the way `c++filt` does: `foo() [clone .cold]`.
pub fn demangle(symbol: &str) -> Option<String> {
    let body = symbol.strip_prefix("__Z").or_else(|| symbol.strip_prefix("_Z"))?;
    let (body, clone_suffix) = match body.find('.') {
        Some(dot) => (&body[..dot], Some(&body[dot..])),
        None => (body, None),
    };

    let mut parser = Parser::new(body);
    let demangled = parser.encoding()?;
    if !parser.at_end() {
        return None;
    }

    Some(match clone_suffix {
        Some(suffix) => format!("{demangled} [clone {suffix}]"),
        None => demangled,
    })
}

// ── Parser ────────────────────────────────────────────────────────────────────

/// A parsed `<name>` plus the facts `<encoding>` needs about it.
struct Name {
    text: String,
    /// Ends in template arguments, so the signature starts with a return type.
    is_template: bool,
    is_ctor_dtor: bool,
    is_const: bool,
}

impl Name {
    fn plain(text: String) -> Self {
        Self {
            text,
            is_template: false,
            is_ctor_dtor: false,
            is_const: false,
        }
    }
}

struct Parser<'a> {
    input: &'a [u8],
    pos: usize,
    /// Substitution candidates, referenced as `S_`, `S0_`, `S1_`, ...
    subs: Vec<String>,
    /// Arguments of the most recent template argument list, for `T_`.
    template_params: Vec<String>,
    /// Current recursion depth across `type_`, `name` and `template_args`.
    depth: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input: input.as_bytes(),
            pos: 0,
            subs: Vec::new(),
            template_params: Vec::new(),
            depth: 0,
        }
    }

    /// Runs one recursive production, failing once [`MAX_DEPTH`] is reached.
    fn descend<T>(&mut self, production: impl FnOnce(&mut Self) -> Option<T>) -> Option<T> {
        if self.depth >= MAX_DEPTH {
            return None;
        }
        self.depth += 1;
        let result = production(self);
        self.depth -= 1;
        result
    }

    fn at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.input.get(self.pos + offset).copied()
    }

    fn eat(&mut self, byte: u8) -> Option<()> {
        if self.peek()? == byte {
            self.pos += 1;
            Some(())
        } else {
            None
        }
    }

    fn number(&mut self) -> Option<usize> {
        let start = self.pos;
        while self.peek().is_some_and(|b| b.is_ascii_digit()) {
            self.pos += 1;
        }
        std::str::from_utf8(&self.input[start..self.pos]).ok()?.parse().ok()
    }

    /// `<encoding> ::= <name> [<bare-function-type>]`
    fn encoding(&mut self) -> Option<String> {
        let name = self.name(false)?;
        if self.at_end() {
            return Some(name.text);
        }

        let return_type = if name.is_template && !name.is_ctor_dtor {
            Some(self.type_()?)
        } else {
            None
        };
        let params = self.bare_function_type()?;

        let mut out = String::new();
        if let Some(ret) = return_type {
            out.push_str(&ret);
            out.push(' ');
        }
        out.push_str(&name.text);
        out.push('(');
        out.push_str(&params);
        out.push(')');
        if name.is_const {
            out.push_str(" const");
        }
        Some(out)
    }

    fn bare_function_type(&mut self) -> Option<String> {
        let mut params = Vec::new();
        while !self.at_end() {
            params.push(self.type_()?);
        }
        match params.as_slice() {
            [] => None,
            [only] if only == "void" => Some(String::new()),
            _ => Some(params.join(", ")),
        }
    }

    /// `<name>`; when `as_type` the full name is itself a substitution
    /// candidate, as class names in parameter lists are.
    fn name(&mut self, as_type: bool) -> Option<Name> {
        self.descend(|p| p.name_inner(as_type))
    }

    fn name_inner(&mut self, as_type: bool) -> Option<Name> {
        match self.peek()? {
            b'N' => self.nested_name(as_type),
            b'S' if self.peek_at(1) == Some(b't') => {
                self.pos += 2;
                let id = self.source_name()?;
                self.maybe_template(format!("std::{id}"), as_type)
            }
            b'S' => {
                let text = self.substitution()?;
                if self.peek() == Some(b'I') {
                    let args = self.template_args()?;
                    let text = format!("{text}{args}");
                    if as_type {
                        self.subs.push(text.clone());
                    }
                    Some(Name {
                        text,
                        is_template: true,
                        ..Name::plain(String::new())
                    })
                } else {
                    Some(Name::plain(text))
                }
            }
            b'0'..=b'9' => {
                let id = self.source_name()?;
                self.maybe_template(id, as_type)
            }
            _ => None,
        }
    }

    /// Unscoped name, optionally followed by template arguments.
    fn maybe_template(&mut self, text: String, as_type: bool) -> Option<Name> {
        if self.peek() != Some(b'I') {
            if as_type {
                self.subs.push(text.clone());
            }
            return Some(Name::plain(text));
        }
        // The template name is a candidate on its own.
        self.subs.push(text.clone());
        let args = self.template_args()?;
        let text = format!("{text}{args}");
        if as_type {
            self.subs.push(text.clone());
        }
        Some(Name {
            text,
            is_template: true,
            ..Name::plain(String::new())
        })
    }

    /// `<nested-name> ::= N [<CV-qualifiers>] <prefix> <unqualified-name> E`
    fn nested_name(&mut self, as_type: bool) -> Option<Name> {
        self.eat(b'N')?;
        let mut is_const = false;
        loop {
            match self.peek()? {
                b'K' => is_const = true,
                b'V' | b'r' => {}
                _ => break,
            }
            self.pos += 1;
        }

        let mut text = String::new();
        let mut last_id = String::new();
        let mut is_template = false;
        let mut is_ctor_dtor = false;
        let mut first = true;

        loop {
            match self.peek()? {
                b'E' => {
                    self.pos += 1;
                    break;
                }
                b'S' if first && self.peek_at(1) == Some(b't') => {
                    self.pos += 2;
                    text.push_str("std");
                    first = false;
                    continue;
                }
                b'S' if first => {
                    text = self.substitution()?;
                    last_id = unqualified(&text).to_string();
                    first = false;
                    continue;
                }
                b'I' if !first => {
                    let args = self.template_args()?;
                    text.push_str(&args);
                    is_template = true;
                }
                b'C' if !first => {
                    self.pos += 1;
                    if !matches!(self.peek()?, b'1'..=b'5') {
                        return None;
                    }
                    self.pos += 1;
                    text.push_str("::");
                    text.push_str(&last_id);
                    is_ctor_dtor = true;
                    is_template = false;
                }
                b'D' if !first && matches!(self.peek_at(1), Some(b'0' | b'1' | b'2' | b'4' | b'5')) => {
                    self.pos += 2;
                    text.push_str("::~");
                    text.push_str(&last_id);
                    is_ctor_dtor = true;
                    is_template = false;
                }
                b'0'..=b'9' => {
                    let id = self.source_name()?;
                    if !first {
                        text.push_str("::");
                    }
                    text.push_str(&id);
                    last_id = id;
                    is_template = false;
                }
                _ => return None,
            }
            first = false;

            let is_prefix = self.peek() != Some(b'E');
            if !is_ctor_dtor && (is_prefix || as_type) {
                self.subs.push(text.clone());
            }
        }

        if text.is_empty() {
            return None;
        }
        Some(Name {
            text,
            is_template,
            is_ctor_dtor,
            is_const,
        })
    }

    /// `<source-name> ::= <length> <identifier>`
    fn source_name(&mut self) -> Option<String> {
        let len = self.number()?;
        let end = self.pos.checked_add(len)?;
        let id = std::str::from_utf8(self.input.get(self.pos..end)?).ok()?;
        self.pos = end;
        if id.is_empty() {
            return None;
        }
        Some(if id.starts_with("_GLOBAL__N") {
            "(anonymous namespace)".to_string()
        } else {
            id.to_string()
        })
    }

    /// `S_`, `S<seq-id>_` or one of the standard abbreviations.
    fn substitution(&mut self) -> Option<String> {
        self.eat(b'S')?;
        let abbreviation = match self.peek()? {
            b'a' => Some("std::allocator"),
            b'b' => Some("std::basic_string"),
            b's' => Some("std::string"),
            b'i' => Some("std::istream"),
            b'o' => Some("std::ostream"),
            b'd' => Some("std::iostream"),
            _ => None,
        };
        if let Some(text) = abbreviation {
            self.pos += 1;
            return Some(text.to_string());
        }

        let index = if self.eat(b'_').is_some() {
            0
        } else {
            let seq = self.seq_id()?;
            self.eat(b'_')?;
            seq.checked_add(1)?
        };
        self.subs.get(index).cloned()
    }

    /// Base-36 sequence number using digits and upper-case letters.
    fn seq_id(&mut self) -> Option<usize> {
        let start = self.pos;
        let mut value: usize = 0;
        while let Some(b) = self.peek() {
            let digit = match b {
                b'0'..=b'9' => usize::from(b - b'0'),
                b'A'..=b'Z' => usize::from(b - b'A') + 10,
                _ => break,
            };
            value = value.checked_mul(36)?.checked_add(digit)?;
            self.pos += 1;
        }
        (self.pos > start).then_some(value)
    }

    /// `<template-args> ::= I <template-arg>+ E`
    fn template_args(&mut self) -> Option<String> {
        self.descend(Self::template_args_inner)
    }

    fn template_args_inner(&mut self) -> Option<String> {
        self.eat(b'I')?;
        let mut args = Vec::new();
        while self.peek()? != b'E' {
            args.push(self.template_arg()?);
        }
        self.pos += 1;
        if args.is_empty() {
            return None;
        }

        let joined = args.join(", ");
        self.template_params = args;
        Some(if joined.ends_with('>') {
            format!("<{joined} >")
        } else {
            format!("<{joined}>")
        })
    }

    fn template_arg(&mut self) -> Option<String> {
        if self.peek()? == b'L' {
            self.literal()
        } else {
            self.type_()
        }
    }

    /// `L <type> <value number> E` for integral and boolean literals.
    fn literal(&mut self) -> Option<String> {
        self.eat(b'L')?;
        let ty = self.peek()?;
        self.pos += 1;
        let negative = self.eat(b'n').is_some();
        let value = self.number()?;
        self.eat(b'E')?;

        let sign = if negative { "-" } else { "" };
        Some(match ty {
            b'b' => (if value == 0 { "false" } else { "true" }).to_string(),
            b'i' => format!("{sign}{value}"),
            b'j' => format!("{sign}{value}u"),
            b'l' => format!("{sign}{value}l"),
            b'm' => format!("{sign}{value}ul"),
            other => format!("({}){sign}{value}", builtin(other)?),
        })
    }

    /// `T_` / `T<n>_`
    fn template_param(&mut self) -> Option<String> {
        self.eat(b'T')?;
        let index = if self.eat(b'_').is_some() {
            0
        } else {
            let n = self.number()?;
            self.eat(b'_')?;
            n.checked_add(1)?
        };
        self.template_params.get(index).cloned()
    }

    fn type_(&mut self) -> Option<String> {
        self.descend(Self::type_inner)
    }

    fn type_inner(&mut self) -> Option<String> {
        let ty = match self.peek()? {
            b'P' => {
                self.pos += 1;
                format!("{}*", self.type_()?)
            }
            b'R' => {
                self.pos += 1;
                format!("{}&", self.type_()?)
            }
            b'O' => {
                self.pos += 1;
                format!("{}&&", self.type_()?)
            }
            b'K' => {
                self.pos += 1;
                format!("{} const", self.type_()?)
            }
            b'V' => {
                self.pos += 1;
                format!("{} volatile", self.type_()?)
            }
            b'T' => self.template_param()?,
            b'N' | b'0'..=b'9' => return Some(self.name(true)?.text),
            b'S' => return Some(self.name(true)?.text),
            b'D' if self.peek_at(1) == Some(b'n') => {
                self.pos += 2;
                return Some("decltype(nullptr)".to_string());
            }
            other => {
                let name = builtin(other)?;
                self.pos += 1;
                return Some(name.to_string());
            }
        };
        self.subs.push(ty.clone());
        Some(ty)
    }
}

/// Last component of a qualified name, without template arguments.
fn unqualified(name: &str) -> &str {
    let base = name.split('<').next().unwrap_or(name);
    base.rsplit("::").next().unwrap_or(base)
}

fn builtin(code: u8) -> Option<&'static str> {
    Some(match code {
        b'v' => "void",
        b'b' => "bool",
        b'c' => "char",
        b'a' => "signed char",
        b'h' => "unsigned char",
        b's' => "short",
        b't' => "unsigned short",
        b'i' => "int",
        b'j' => "unsigned int",
        b'l' => "long",
        b'm' => "unsigned long",
        b'x' => "long long",
        b'y' => "unsigned long long",
        b'n' => "__int128",
        b'o' => "unsigned __int128",
        b'f' => "float",
        b'd' => "double",
        b'e' => "long double",
        b'w' => "wchar_t",
        b'z' => "...",
        _ => return None,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn check(mangled: &str, expected: &str) {
        assert_eq!(ItaniumDemangler.demangle_one(mangled), expected, "demangling {mangled}");
    }

    #[test]
    fn test_plain_function() {
        check("_Z3foov", "foo()");
        check("_Z3addii", "add(int, int)");
    }

    #[test]
    fn test_nested_name_with_pointer_to_const() {
        check("_ZN3foo3barEPKc", "foo::bar(char const*)");
    }

    #[test]
    fn test_const_member_function() {
        check("_ZNK3Foo3getEv", "Foo::get() const");
    }

    #[test]
    fn test_substitution_refers_to_enclosing_namespace() {
        check("_ZN3foo3bazERKS_", "foo::baz(foo const&)");
    }

    #[test]
    fn test_constructor_and_destructor() {
        check("_ZN5Outer5InnerC1Ev", "Outer::Inner::Inner()");
        check("_ZN3FooD2Ev", "Foo::~Foo()");
    }

    #[test]
    fn test_class_template_member() {
        check("_ZN3FooIiE3getEv", "Foo<int>::get()");
    }

    #[test]
    fn test_function_template_has_return_type() {
        check("_Z3maxIiET_S0_S0_", "int max<int>(int, int)");
    }

    #[test]
    fn test_nested_template_arguments_keep_closing_space() {
        check("_Z1f3FooIS_IiEE", "f(Foo<Foo<int> >)");
    }

    #[test]
    fn test_std_names_and_literals() {
        check("_ZSt4swapIiEvRT_S1_", "void std::swap<int>(int&, int&)");
        check("_Z3getILi3EEvv", "void get<3>()");
    }

    #[test]
    fn test_data_object_without_signature() {
        check("_ZN3foo7counterE", "foo::counter");
    }

    #[test]
    fn test_clone_suffix() {
        check("_Z3foov.cold", "foo() [clone .cold]");
    }

    #[test]
    fn test_unrecognised_input_passes_through() {
        check("main", "main");
        check("", "");
        check("_Z", "_Z");
        check("_ZN3fooE3", "_ZN3fooE3");
        check("_Z3fooQ", "_Z3fooQ");
    }

    #[test]
    fn test_deeply_nested_symbols_pass_through() {
        let pointers = format!("_Z1f{}v", "P".repeat(20_000));
        check(&pointers, &pointers);

        let templates = format!("_Z1fI{}iE{}v", "3FooI".repeat(5_000), "E".repeat(5_000));
        check(&templates, &templates);
    }

    #[test]
    fn test_nesting_within_limit_still_demangles() {
        check(&format!("_Z1f{}c", "P".repeat(10)), &format!("f(char{})", "*".repeat(10)));
    }

    #[test]
    fn test_oversized_back_references_pass_through() {
        check("_Z1fT18446744073709551615_", "_Z1fT18446744073709551615_");
        check("_ZN3foo3bazERKS3W5E11264SGSF_", "_ZN3foo3bazERKS3W5E11264SGSF_");
    }
}
