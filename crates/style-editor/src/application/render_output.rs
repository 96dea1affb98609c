//! Use case: turn raw input into displayable output.
//!
//! Input is split on `\n`; each line is trimmed and demangled, then
//! formatted with the session style when a formatting session is supplied.
//! Line count is preserved, so blank input lines stay blank.

use super::edit_style::StyleSession;
use super::ports::DemanglingEngine;

/// Runs the output pipeline over `input`.
///
/// Pass `formatter = None` when formatting is disabled or the formatter
/// module is unavailable.
pub fn render_output(input: &str, demangler: &dyn DemanglingEngine, formatter: Option<&StyleSession>) -> Vec<String> {
    input
        .split('\n')
        .map(|line| {
            let demangled = demangler.demangle_one(line.trim());
            match formatter {
                Some(session) => session.format_line(&demangled),
                None => demangled,
            }
        })
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
