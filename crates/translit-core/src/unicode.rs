//! Character-level Unicode helpers for Hebrew and Greek source text.

use unicode_normalization::char::{
    canonical_combining_class, decompose_canonical, is_combining_mark,
};
use unicode_normalization::UnicodeNormalization;

/// The two canonical normalization forms a table key is stored under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NormalForm {
    Nfc,
    Nfd,
}

impl NormalForm {
    pub fn apply(self, s: &str) -> String {
        match self {
            NormalForm::Nfc => s.nfc().collect(),
            NormalForm::Nfd => s.nfd().collect(),
        }
    }
}

impl std::fmt::Display for NormalForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NormalForm::Nfc => f.write_str("NFC"),
            NormalForm::Nfd => f.write_str("NFD"),
        }
    }
}

/// Hebrew block (U+0590..U+05FF) plus the alphabetic presentation forms
/// (U+FB1D..U+FB4F) that carry pointed letters.
pub fn is_hebrew(c: char) -> bool {
    ('\u{0590}'..='\u{05FF}').contains(&c) || ('\u{FB1D}'..='\u{FB4F}').contains(&c)
}

/// Greek and Coptic (U+0370..U+03FF) plus Greek Extended (U+1F00..U+1FFF),
/// where the polytonic letters live.
pub fn is_greek(c: char) -> bool {
    ('\u{0370}'..='\u{03FF}').contains(&c) || ('\u{1F00}'..='\u{1FFF}').contains(&c)
}

pub fn is_mark(c: char) -> bool {
    is_combining_mark(c)
}

/// Canonical combining class; 0 for base chars and marks that never reorder.
pub fn combining_class(c: char) -> u8 {
    canonical_combining_class(c)
}

/// Decompose `input` to NFD, keeping for every decomposed char the byte
/// offset of the input char it came from.
pub fn nfd_with_origins(input: &str) -> (String, Vec<usize>) {
    let mut decomposed = String::with_capacity(input.len() + input.len() / 2);
    let mut origins = Vec::with_capacity(input.len());
    // Marks are reordered across char boundaries, so each base char is
    // decomposed together with the marks that follow it.
    let mut run_start = 0;
    let mut run = String::new();
    for (offset, c) in input.char_indices() {
        if !is_combining_mark(c) && !run.is_empty() {
            push_run(&run, run_start, &mut decomposed, &mut origins);
            run.clear();
        }
        if run.is_empty() {
            run_start = offset;
        }
        run.push(c);
    }
    if !run.is_empty() {
        push_run(&run, run_start, &mut decomposed, &mut origins);
    }
    (decomposed, origins)
}

fn push_run(run: &str, run_start: usize, decomposed: &mut String, origins: &mut Vec<usize>) {
    for c in run.nfd() {
        decomposed.push(c);
        origins.push(run_start + origin_in_run(run, c));
    }
}

/// Offset of the first char in `run` whose decomposition contains `c`.
fn origin_in_run(run: &str, c: char) -> usize {
    run.char_indices()
        .find(|&(_, source)| {
            let mut found = false;
            decompose_canonical(source, |d| found |= d == c);
            found
        })
        .map(|(offset, _)| offset)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_classification() {
        assert!(is_hebrew('א'));
        assert!(is_hebrew('\u{05BC}'));
        assert!(is_hebrew('\u{FB31}'));
        assert!(!is_hebrew('a'));
        assert!(is_greek('α'));
        assert!(is_greek('ἄ'));
        assert!(!is_greek('א'));
        assert!(is_mark('\u{0301}'));
        assert!(!is_mark('a'));
        assert_eq!(combining_class('\u{05B5}'), 15);
        assert_eq!(combining_class('\u{05BC}'), 21);
        assert_eq!(combining_class('ב'), 0);
    }

    #[test]
    fn test_normal_form_apply() {
        assert_eq!(NormalForm::Nfd.apply("ά"), "α\u{0301}");
        assert_eq!(NormalForm::Nfc.apply("α\u{0301}"), "ά");
        assert_eq!(NormalForm::Nfd.to_string(), "NFD");
    }

    #[test]
    fn test_nfd_with_origins_tracks_source_bytes() {
        let (nfd, origins) = nfd_with_origins("aά5");
        assert_eq!(nfd, "aα\u{0301}5");
        assert_eq!(origins, vec![0, 1, 1, 3]);
    }

    #[test]
    fn test_nfd_with_origins_reorders_hebrew_marks() {
        // bet + dagesh + qamats: NFD puts qamats (ccc 18) before dagesh (ccc 21)
        let input = "\u{05D1}\u{05BC}\u{05B8}";
        let (nfd, origins) = nfd_with_origins(input);
        assert_eq!(nfd, "\u{05D1}\u{05B8}\u{05BC}");
        assert_eq!(origins, vec![0, 4, 2]);
        assert_eq!(nfd, NormalForm::Nfd.apply(input));
    }

    #[test]
    fn test_nfd_with_origins_leading_mark() {
        let (nfd, origins) = nfd_with_origins("\u{0301}a");
        assert_eq!(nfd, "\u{0301}a");
        assert_eq!(origins, vec![0, 2]);
    }
}
