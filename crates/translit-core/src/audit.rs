//! Checks that transliterated output is Latin.
//!
//! Used while refining a scheme: run a whole corpus through a table and list
//! every character that is still in its source script (or any other
//! non-Latin script) after transliteration.

use std::fmt;

use unicode_script::{Script, UnicodeScript};

use crate::unicode::is_mark;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Residue {
    /// 1-based line number in the output.
    pub line: usize,
    /// 1-based char column within the line.
    pub column: usize,
    pub ch: char,
    pub script: Script,
}

impl fmt::Display for Residue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "line {} column {}: {:?} U+{:04X} ({})",
            self.line,
            self.column,
            self.ch,
            self.ch as u32,
            self.script.full_name()
        )
    }
}

/// Find every char in `output` that is not Latin script, whitespace, or in
/// `allowed`. A script-neutral combining mark (a macron or acute, say) is
/// accepted when it follows an accepted char; Hebrew and Greek points never
/// are.
pub fn find_residue(output: &str, allowed: &str) -> Vec<Residue> {
    let mut residue = Vec::new();
    for (line_idx, line) in output.lines().enumerate() {
        let mut prev_ok = false;
        for (col_idx, ch) in line.chars().enumerate() {
            let script = ch.script();
            let ok = script == Script::Latin
                || ch.is_whitespace()
                || allowed.contains(ch)
                || (prev_ok
                    && is_mark(ch)
                    && matches!(script, Script::Inherited | Script::Common));
            if !ok {
                residue.push(Residue {
                    line: line_idx + 1,
                    column: col_idx + 1,
                    ch,
                    script,
                });
            }
            prev_ok = ok;
        }
    }
    residue
}

/// Same as `find_residue` with the `[audit] allowed` set from the global settings.
pub fn find_residue_default(output: &str) -> Vec<Residue> {
    find_residue(output, &crate::settings::settings().audit.allowed)
}
