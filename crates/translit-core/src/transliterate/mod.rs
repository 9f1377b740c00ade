//! Greedy longest-match transliteration over a `MappingTable`.
//!
//! The input is scanned left to right in logical order (Hebrew and Greek
//! alike), so output is always left-to-right Latin. At each position the
//! longest table key matching the remaining input wins; characters with no
//! key pass through unchanged and are reported as unmapped. A key may also
//! match a base char plus some of its marks when the marks it skips can be
//! canonically reordered behind the ones it takes.
//!
//! Capitalization is not derived from the source script. Output is lowercase
//! by default (`CasePolicy::Lowercase`); sentence-initial and proper-noun
//! capitals are left to a post-processing step owned by the caller.

#[cfg(test)]
mod proptest_props;

use std::fmt;

use tracing::{debug, debug_span};
use unicode_normalization::UnicodeNormalization;

use crate::audit::{find_residue, Residue};
use crate::settings::{settings, CasePolicy, OutputForm};
use crate::table::MappingTable;
use crate::unicode::{combining_class, nfd_with_origins};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransliterateOptions {
    pub case: CasePolicy,
    pub output_form: OutputForm,
    pub max_unmapped: usize,
}

impl Default for TransliterateOptions {
    fn default() -> Self {
        let s = &settings().transliterate;
        Self {
            case: s.case,
            output_form: s.output_form,
            max_unmapped: s.max_unmapped,
        }
    }
}

/// A character with no table entry, passed through unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnmappedCharacter {
    /// Byte offset in the original input of the char it came from. A mark
    /// split off a precomposed char shares that char's offset.
    pub byte_offset: usize,
    pub ch: char,
}

impl fmt::Display for UnmappedCharacter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unmapped {:?} (U+{:04X}) at byte {}",
            self.ch, self.ch as u32, self.byte_offset
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transliteration {
    pub output: String,
    /// Pass-through warnings in input order, capped at `max_unmapped`.
    pub unmapped: Vec<UnmappedCharacter>,
    /// Total unmapped chars seen, including any beyond the cap.
    pub unmapped_total: usize,
}

impl Transliteration {
    pub fn is_fully_mapped(&self) -> bool {
        self.unmapped_total == 0
    }

    /// Non-Latin characters left in the output; see `audit::find_residue`.
    pub fn residue(&self, allowed: &str) -> Vec<Residue> {
        find_residue(&self.output, allowed)
    }

    pub fn into_string(self) -> String {
        self.output
    }
}

/// Applies one table to any number of inputs. Holds no per-call state, so a
/// single transliterator can be shared across threads.
#[derive(Debug, Clone, Copy)]
pub struct Transliterator<'t> {
    table: &'t MappingTable,
    options: TransliterateOptions,
}

impl<'t> Transliterator<'t> {
    pub fn new(table: &'t MappingTable) -> Self {
        Self::with_options(table, TransliterateOptions::default())
    }

    pub fn with_options(table: &'t MappingTable, options: TransliterateOptions) -> Self {
        Self { table, options }
    }

    pub fn table(&self) -> &'t MappingTable {
        self.table
    }

    pub fn options(&self) -> &TransliterateOptions {
        &self.options
    }

    pub fn transliterate(&self, input: &str) -> Transliteration {
        let _span = debug_span!("transliterate", chars = input.chars().count()).entered();

        // Scanning the NFD form makes every normalization of the input scan
        // identically. Each NFD slice is its own NFD, so the NFD index is
        // the only one the scan needs.
        let (nfd, mut origins) = nfd_with_origins(input);
        let mut chars: Vec<char> = nfd.chars().collect();

        let max_key = self.table.max_key_chars();
        let mut output = String::with_capacity(input.len());
        let mut unmapped = Vec::new();
        let mut unmapped_total = 0;
        let mut key = String::new();
        let mut pos = 0;

        while pos < chars.len() {
            let longest = max_key.min(chars.len() - pos);
            let mut matched = (1..=longest).rev().find_map(|len| {
                key.clear();
                key.extend(&chars[pos..pos + len]);
                self.table.lookup_nfd(&key).map(|target| (len, target))
            });
            let contiguous = matched.map_or(0, |(len, _)| len);
            if let Some(reordered) =
                self.match_mark_subset(&mut chars, &mut origins, pos, contiguous, &mut key)
            {
                matched = Some(reordered);
            }

            match matched {
                Some((len, target)) => {
                    self.push_target(&mut output, target);
                    pos += len;
                }
                None => {
                    let ch = chars[pos];
                    output.push(ch);
                    unmapped_total += 1;
                    if unmapped.len() < self.options.max_unmapped {
                        unmapped.push(UnmappedCharacter {
                            byte_offset: origins[pos],
                            ch,
                        });
                    }
                    pos += 1;
                }
            }
        }

        let output = match self.options.output_form {
            OutputForm::Nfc => output.nfc().collect(),
            OutputForm::Nfd => output.nfd().collect(),
            OutputForm::Raw => output,
        };
        debug!(unmapped = unmapped_total, output_len = output.len());
        Transliteration {
            output,
            unmapped,
            unmapped_total,
        }
    }

    /// Match the base char at `pos` together with a subset of the marks
    /// that follow it, for a key longer than `beat` chars.
    ///
    /// NFD puts Hebrew vowels before dagesh and the shin/sin dots, so a key
    /// like bet+dagesh is not a prefix of bet+tsere+dagesh. Marks of
    /// different combining classes commute canonically, so the chosen marks
    /// are moved up behind the base char and the rest are scanned after.
    fn match_mark_subset(
        &self,
        chars: &mut [char],
        origins: &mut [usize],
        pos: usize,
        beat: usize,
        key: &mut String,
    ) -> Option<(usize, &'t str)> {
        if combining_class(chars[pos]) != 0 {
            return None;
        }
        let marks = chars[pos + 1..]
            .iter()
            .take_while(|&&c| combining_class(c) != 0)
            .take(MAX_REORDERED_MARKS)
            .count();
        let span = pos + 1..pos + 1 + marks;
        let most = marks.min(self.table.max_key_chars().saturating_sub(1));

        for size in (1..=most).rev() {
            if size < beat {
                break;
            }
            for mask in 1u32..(1 << marks) {
                if mask.count_ones() as usize != size
                    || !can_bring_forward(&chars[span.clone()], mask)
                {
                    continue;
                }
                key.clear();
                key.push(chars[pos]);
                key.extend(
                    (0..marks)
                        .filter(|&j| picked(mask, j))
                        .map(|j| chars[pos + 1 + j]),
                );
                if let Some(target) = self.table.lookup_nfd(key.as_str()) {
                    bring_forward(&mut chars[span.clone()], mask);
                    bring_forward(&mut origins[span], mask);
                    return Some((size + 1, target));
                }
            }
        }
        None
    }

    fn push_target(&self, output: &mut String, target: &str) {
        match self.options.case {
            CasePolicy::Lowercase if target.chars().any(char::is_uppercase) => {
                output.push_str(&target.to_lowercase());
            }
            _ => output.push_str(target),
        }
    }
}

/// Marks after one base char tried in reordered subsets; longer runs only
/// have their first marks considered.
const MAX_REORDERED_MARKS: usize = 8;

fn picked(mask: u32, j: usize) -> bool {
    (mask >> j) & 1 == 1
}

/// A picked mark can move in front of every skipped mark before it only if
/// their combining classes differ.
fn can_bring_forward(marks: &[char], mask: u32) -> bool {
    (0..marks.len()).filter(|&j| picked(mask, j)).all(|j| {
        (0..j)
            .filter(|&u| !picked(mask, u))
            .all(|u| combining_class(marks[u]) != combining_class(marks[j]))
    })
}

/// Stable partition: picked items first, skipped items after.
fn bring_forward<T: Copy>(items: &mut [T], mask: u32) {
    let reordered: Vec<T> = (0..items.len())
        .filter(|&j| picked(mask, j))
        .chain((0..items.len()).filter(|&j| !picked(mask, j)))
        .map(|j| items[j])
        .collect();
    items.copy_from_slice(&reordered);
}

/// Transliterate `input` with `table` using the default options.
pub fn transliterate(table: &MappingTable, input: &str) -> Transliteration {
    Transliterator::new(table).transliterate(input)
}
