//! Transliteration of Biblical Hebrew and Koine Greek into Latin script.
//!
//! The heavy lifting lives in `translit_core`; this crate ships the built-in
//! tables, the process-wide [`TableRegistry`], and optional tracing setup.
//!
//! ```no_run
//! let result = bible_translit::transliterate("grc", "Βίβλος γενέσεως").unwrap();
//! assert_eq!(result.output, "biblos geneseōs");
//! ```
//!
//! Output is lowercase. Capitalizing sentence starts and proper nouns is left
//! to the caller.

pub mod registry;
mod trace_init;

pub use registry::{RegistryError, TableRegistry};
pub use trace_init::init_tracing;
pub use translit_core::{
    audit, lang, settings, table, unicode, Language, LoadOptions, MappingEntry, MappingTable,
    TableError, TableHeader, TransliterateOptions, Transliteration, Transliterator,
    UnmappedCharacter,
};

/// Transliterate `input` with the global registry's table for `tag`.
pub fn transliterate(tag: &str, input: &str) -> Result<Transliteration, RegistryError> {
    TableRegistry::global().transliterate(tag, input)
}

/// Transliterate `input` with the built-in language its letters belong to.
pub fn transliterate_detected(input: &str) -> Result<Transliteration, RegistryError> {
    let lang = Language::detect(input).ok_or(RegistryError::Undetected)?;
    transliterate(lang.canonical_tag(), input)
}
