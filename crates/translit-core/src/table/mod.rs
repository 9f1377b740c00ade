//! Mapping tables: source grapheme → Latin transliteration.
//!
//! A table is loaded from two-column tab-separated text, one entry per line.
//! Every key is indexed under both its NFC and NFD form so lookups succeed
//! whichever normalization the input uses. Tables are immutable once built
//! and are shared by reference (or `Arc`) across transliteration calls.

mod parse;

use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use tracing::{debug, debug_span};

use crate::settings::settings;
use crate::unicode::NormalForm;

#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("line {line}: expected 2 tab-separated fields, found {fields}")]
    Malformed { line: usize, fields: usize },

    #[error("line {line}: empty source grapheme")]
    EmptySource { line: usize },

    #[error("table has no header line")]
    MissingHeader,

    #[error(
        "line {line}: {source_grapheme:?} maps to {target:?} but line {first_line} \
         already maps it to {existing:?} ({form})"
    )]
    ConflictingMapping {
        source_grapheme: String,
        form: NormalForm,
        first_line: usize,
        line: usize,
        existing: String,
        target: String,
    },
}

/// Loader options. `Default` reads the `[table]` section of the global settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    pub strip_bom: bool,
    pub header: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        let s = &settings().table;
        Self {
            strip_bom: s.strip_bom,
            header: s.header,
        }
    }
}

/// One line of the table, as written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingEntry {
    pub source: String,
    pub target: String,
    /// 1-based line number in the table file.
    pub line: usize,
}

/// Column tags from a table's header row, e.g. `x-grc-koine` / `en`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableHeader {
    pub source_tag: String,
    pub target_tag: String,
}

#[derive(Debug, Clone)]
pub struct MappingTable {
    tag: Option<String>,
    header: Option<TableHeader>,
    entries: Vec<MappingEntry>,
    /// NFC key → index into `entries` of the first line defining it.
    nfc: HashMap<String, usize>,
    /// NFD key → index into `entries` of the first line defining it.
    nfd: HashMap<String, usize>,
    /// Longest key in chars across both forms.
    max_key_chars: usize,
}

impl MappingTable {
    /// Parse a table from text.
    pub fn parse(text: &str, options: &LoadOptions) -> Result<Self, TableError> {
        Self::from_lines(text.lines().map(|l| Ok(l.to_string())), options)
    }

    /// Parse a table from a reader.
    pub fn from_reader<R: BufRead>(reader: R, options: &LoadOptions) -> Result<Self, TableError> {
        Self::from_lines(reader.lines(), options)
    }

    /// Load a table file.
    pub fn from_path(path: &Path, options: &LoadOptions) -> Result<Self, TableError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file), options)
    }

    /// Build a table from in-memory pairs, numbering them as lines from 1.
    pub fn from_pairs<I, S, T>(pairs: I) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = (S, T)>,
        S: Into<String>,
        T: Into<String>,
    {
        let entries = pairs
            .into_iter()
            .enumerate()
            .map(|(i, (source, target))| MappingEntry {
                source: source.into(),
                target: target.into(),
                line: i + 1,
            })
            .collect();
        Self::build(entries, None)
    }

    fn from_lines<I>(lines: I, options: &LoadOptions) -> Result<Self, TableError>
    where
        I: Iterator<Item = io::Result<String>>,
    {
        let parsed = parse::parse_lines(lines, options)?;
        let _span = debug_span!("load_table", lines = parsed.line_count).entered();
        Self::build(parsed.entries, parsed.header)
    }

    fn build(entries: Vec<MappingEntry>, header: Option<TableHeader>) -> Result<Self, TableError> {
        let mut nfc: HashMap<String, usize> = HashMap::with_capacity(entries.len());
        let mut nfd: HashMap<String, usize> = HashMap::with_capacity(entries.len());
        let mut max_key_chars = 0;

        for (idx, entry) in entries.iter().enumerate() {
            if entry.source.is_empty() {
                return Err(TableError::EmptySource { line: entry.line });
            }
            for (form, index) in [(NormalForm::Nfc, &mut nfc), (NormalForm::Nfd, &mut nfd)] {
                let key = form.apply(&entry.source);
                max_key_chars = max_key_chars.max(key.chars().count());
                match index.get(&key) {
                    Some(&prev) if entries[prev].target != entry.target => {
                        return Err(TableError::ConflictingMapping {
                            source_grapheme: entry.source.clone(),
                            form,
                            first_line: entries[prev].line,
                            line: entry.line,
                            existing: entries[prev].target.clone(),
                            target: entry.target.clone(),
                        });
                    }
                    // Same target under the same form: the NFC/NFD twin of
                    // an earlier line, or a repeated line.
                    Some(_) => {}
                    None => {
                        index.insert(key, idx);
                    }
                }
            }
        }

        let tag = header.as_ref().map(|h| crate::lang::table_key(&h.source_tag));
        debug!(entries = entries.len(), keys = nfd.len(), max_key_chars);
        Ok(Self {
            tag,
            header,
            entries,
            nfc,
            nfd,
            max_key_chars,
        })
    }

    /// Attach a language tag, replacing any tag taken from the header.
    pub fn with_tag(mut self, tag: &str) -> Self {
        self.tag = Some(crate::lang::table_key(tag));
        self
    }

    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    pub fn header(&self) -> Option<&TableHeader> {
        self.header.as_ref()
    }

    /// All entries in file order, including tolerated duplicates.
    pub fn entries(&self) -> &[MappingEntry] {
        &self.entries
    }

    /// Entries ordered longest source first, file order among equals.
    pub fn entries_longest_first(&self) -> Vec<&MappingEntry> {
        let mut sorted: Vec<&MappingEntry> = self.entries.iter().collect();
        sorted.sort_by_key(|e| std::cmp::Reverse(e.source.chars().count()));
        sorted
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of distinct keys, counted in NFD.
    pub fn key_count(&self) -> usize {
        self.nfd.len()
    }

    pub fn max_key_chars(&self) -> usize {
        self.max_key_chars
    }

    /// Look up a grapheme in any normalization form.
    pub fn lookup(&self, grapheme: &str) -> Option<&str> {
        self.lookup_nfd(grapheme)
            .or_else(|| self.lookup_in(NormalForm::Nfc, &NormalForm::Nfc.apply(grapheme)))
            .or_else(|| self.lookup_nfd(&NormalForm::Nfd.apply(grapheme)))
    }

    /// Look up a grapheme already in NFD without normalizing it again.
    pub fn lookup_nfd(&self, grapheme: &str) -> Option<&str> {
        self.lookup_in(NormalForm::Nfd, grapheme)
    }

    fn lookup_in(&self, form: NormalForm, key: &str) -> Option<&str> {
        let index = match form {
            NormalForm::Nfc => &self.nfc,
            NormalForm::Nfd => &self.nfd,
        };
        index.get(key).map(|&i| self.entries[i].target.as_str())
    }
}
