//! Table-driven transliteration of Hebrew and Greek text into Latin script.
//!
//! A [`table::MappingTable`] is loaded once from two-column TSV data and then
//! shared read-only; a [`transliterate::Transliterator`] applies it to input
//! text by greedy longest match.

pub mod audit;
pub mod lang;
pub mod settings;
pub mod table;
pub mod transliterate;
pub mod unicode;

pub use lang::Language;
pub use table::{LoadOptions, MappingEntry, MappingTable, TableError, TableHeader};
pub use transliterate::{
    transliterate, TransliterateOptions, Transliteration, Transliterator, UnmappedCharacter,
};
