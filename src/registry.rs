//! Process-wide table registry keyed by language tag.
//!
//! Follows the same OnceLock pattern as settings:
//! - `TableRegistry::init_custom(tag, tsv)` overrides or adds a table before
//!   the first `global()` call
//! - `TableRegistry::global()` returns the lazily built `&'static TableRegistry`

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, OnceLock};

use tracing::debug;
use translit_core::lang::table_key;
use translit_core::{
    Language, LoadOptions, MappingTable, TableError, Transliteration, Transliterator,
};

pub const HEBREW_TSV: &str = include_str!("tables/hbo.tsv");
pub const GREEK_TSV: &str = include_str!("tables/grc.tsv");

static CUSTOM_TABLES: Mutex<Vec<(String, String)>> = Mutex::new(Vec::new());
static INSTANCE: OnceLock<TableRegistry> = OnceLock::new();

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("no table registered for language tag {0:?}")]
    UnknownLanguage(String),
    #[error("table {tag:?}: {source}")]
    Table {
        tag: String,
        #[source]
        source: TableError,
    },
    #[error("input has no Hebrew or Greek letters to detect a language from")]
    Undetected,
    #[error("table registry already initialized")]
    AlreadyInitialized,
}

/// Embedded TSV for a language with a built-in table.
pub fn builtin_tsv(lang: Language) -> &'static str {
    match lang {
        Language::Hebrew => HEBREW_TSV,
        Language::Greek => GREEK_TSV,
    }
}

/// Parse the built-in table for `lang`.
pub fn load_builtin(lang: Language) -> Result<MappingTable, TableError> {
    let options = LoadOptions {
        strip_bom: true,
        header: false,
    };
    Ok(MappingTable::parse(builtin_tsv(lang), &options)?.with_tag(lang.canonical_tag()))
}

#[derive(Debug, Default)]
pub struct TableRegistry {
    tables: BTreeMap<String, Arc<MappingTable>>,
}

impl TableRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the built-in Hebrew and Greek tables.
    pub fn with_builtin() -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        for lang in Language::ALL {
            let table = load_builtin(lang).map_err(|source| RegistryError::Table {
                tag: lang.canonical_tag().to_string(),
                source,
            })?;
            registry.register(lang.canonical_tag(), table);
        }
        Ok(registry)
    }

    /// Queue a custom table for the global registry. The TSV is validated
    /// now; it replaces any built-in table for the same language.
    pub fn init_custom(tag: &str, tsv: String) -> Result<(), RegistryError> {
        MappingTable::parse(&tsv, &LoadOptions::default()).map_err(|source| {
            RegistryError::Table {
                tag: tag.to_string(),
                source,
            }
        })?;
        // `global()` reads the queue under this lock, so a push made while
        // holding it is either seen by initialization or rejected here.
        let mut custom = CUSTOM_TABLES.lock().unwrap_or_else(|e| e.into_inner());
        if INSTANCE.get().is_some() {
            return Err(RegistryError::AlreadyInitialized);
        }
        custom.push((table_key(tag), tsv));
        Ok(())
    }

    /// Get or initialize the global registry.
    pub fn global() -> &'static TableRegistry {
        INSTANCE.get_or_init(|| {
            let mut registry = Self::with_builtin().expect("built-in tables must be valid");
            let custom = CUSTOM_TABLES.lock().unwrap_or_else(|e| e.into_inner());
            for (tag, tsv) in custom.iter() {
                let table = MappingTable::parse(tsv, &LoadOptions::default())
                    .expect("custom table was validated by init_custom");
                registry.register(tag, table);
            }
            registry
        })
    }

    /// Register `table` under `tag`, replacing any table already there.
    pub fn register(&mut self, tag: &str, table: MappingTable) -> Arc<MappingTable> {
        let key = table_key(tag);
        let table = Arc::new(table.with_tag(&key));
        debug!(tag = %key, entries = table.len(), "register table");
        self.tables.insert(key, Arc::clone(&table));
        table
    }

    /// Look up a table by any tag that resolves to it (`he` finds `hbo`).
    pub fn get(&self, tag: &str) -> Option<Arc<MappingTable>> {
        self.tables.get(&table_key(tag)).cloned()
    }

    /// Registered tags, sorted.
    pub fn tags(&self) -> Vec<&str> {
        self.tables.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Transliterate with the table for `tag` and the default options.
    pub fn transliterate(&self, tag: &str, input: &str) -> Result<Transliteration, RegistryError> {
        let table = self
            .tables
            .get(&table_key(tag))
            .ok_or_else(|| RegistryError::UnknownLanguage(tag.to_string()))?;
        Ok(Transliterator::new(table).transliterate(input))
    }
}
