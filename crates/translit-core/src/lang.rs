//! BCP47 tag resolution for the source languages with built-in tables.

use unicode_script::Script;

use crate::unicode::{is_greek, is_hebrew};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    /// Biblical Hebrew.
    Hebrew,
    /// Koine Greek.
    Greek,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::Hebrew, Language::Greek];

    /// Resolve a BCP47 tag by its primary subtag, ignoring case and any
    /// region or script subtags (`he-IL` resolves like `he`).
    ///
    /// The private-use tag `x-grc-koine` used as a column header in the
    /// Greek source table also resolves to Greek.
    pub fn from_tag(tag: &str) -> Option<Language> {
        let tag = tag.trim().to_ascii_lowercase();
        if tag == "x-grc-koine" {
            return Some(Language::Greek);
        }
        let primary = tag.split(['-', '_']).next().unwrap_or("");
        match primary {
            "hbo" | "he" | "heb" | "iw" => Some(Language::Hebrew),
            "grc" | "el" | "ell" | "gre" => Some(Language::Greek),
            _ => None,
        }
    }

    /// Guess the source language from whichever script has more letters.
    /// Ties and text with neither script give `None`.
    pub fn detect(text: &str) -> Option<Language> {
        let (mut hebrew, mut greek) = (0usize, 0usize);
        for c in text.chars().filter(|c| c.is_alphabetic()) {
            if is_hebrew(c) {
                hebrew += 1;
            } else if is_greek(c) {
                greek += 1;
            }
        }
        match hebrew.cmp(&greek) {
            std::cmp::Ordering::Greater => Some(Language::Hebrew),
            std::cmp::Ordering::Less => Some(Language::Greek),
            std::cmp::Ordering::Equal => None,
        }
    }

    pub fn canonical_tag(self) -> &'static str {
        match self {
            Language::Hebrew => "hbo",
            Language::Greek => "grc",
        }
    }

    pub fn script(self) -> Script {
        match self {
            Language::Hebrew => Script::Hebrew,
            Language::Greek => Script::Greek,
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.canonical_tag())
    }
}

/// Normalise a tag to the key tables are registered under: the canonical
/// tag for known languages, otherwise the trimmed lowercase tag.
pub fn table_key(tag: &str) -> String {
    match Language::from_tag(tag) {
        Some(lang) => lang.canonical_tag().to_string(),
        None => tag.trim().to_ascii_lowercase(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hebrew_aliases() {
        for tag in ["hbo", "he", "HE", "he-IL", "heb", "iw"] {
            assert_eq!(Language::from_tag(tag), Some(Language::Hebrew), "{tag}");
        }
    }

    #[test]
    fn test_greek_aliases() {
        for tag in ["grc", "el", "el-GR", "ell", "gre", "x-grc-koine", " GRC "] {
            assert_eq!(Language::from_tag(tag), Some(Language::Greek), "{tag}");
        }
    }

    #[test]
    fn test_unknown_tag() {
        assert_eq!(Language::from_tag("en"), None);
        assert_eq!(Language::from_tag(""), None);
        assert_eq!(Language::from_tag("x-other"), None);
    }

    #[test]
    fn test_detect() {
        assert_eq!(Language::detect("בְּרֵאשִׁית"), Some(Language::Hebrew));
        assert_eq!(Language::detect("\\v 1 Βίβλος"), Some(Language::Greek));
        assert_eq!(Language::detect("αβ אבג"), Some(Language::Hebrew));
        assert_eq!(Language::detect("abc 123"), None);
        assert_eq!(Language::detect(""), None);
    }

    #[test]
    fn test_table_key() {
        assert_eq!(table_key("el"), "grc");
        assert_eq!(table_key("he-IL"), "hbo");
        assert_eq!(table_key(" Syc "), "syc");
        assert_eq!(Language::Greek.to_string(), "grc");
        assert_eq!(Language::Hebrew.script(), Script::Hebrew);
    }
}
