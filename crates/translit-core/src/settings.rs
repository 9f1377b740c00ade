//! Loader, transliteration and audit defaults, read from TOML.
//!
//! `[table]` feeds `LoadOptions::default()`, `[transliterate]` feeds
//! `TransliterateOptions::default()` and `[audit] allowed` is the punctuation
//! `find_residue_default` accepts. Call `init_custom` before anything reads
//! `settings()` to replace the embedded `default_settings.toml`.

use std::sync::OnceLock;

use serde::Deserialize;

pub const DEFAULT_SETTINGS_TOML: &str = include_str!("default_settings.toml");

static CUSTOM_TOML: OnceLock<String> = OnceLock::new();

/// Set custom TOML before first `settings()` call.
pub fn init_custom(toml_content: String) -> Result<(), SettingsError> {
    parse_settings_toml(&toml_content)?;
    CUSTOM_TOML
        .set(toml_content)
        .map_err(|_| SettingsError::AlreadyInitialized)
}

/// Get or initialize the global settings singleton.
pub fn settings() -> &'static Settings {
    static INSTANCE: OnceLock<Settings> = OnceLock::new();
    INSTANCE.get_or_init(|| {
        let toml_str = CUSTOM_TOML
            .get()
            .map(|s| s.as_str())
            .unwrap_or(DEFAULT_SETTINGS_TOML);
        parse_settings_toml(toml_str).expect("settings TOML must be valid")
    })
}

/// Returns the embedded default settings TOML content.
pub fn default_toml() -> &'static str {
    DEFAULT_SETTINGS_TOML
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
    #[error("settings already initialized")]
    AlreadyInitialized,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub table: TableSettings,
    pub transliterate: TransliterateSettings,
    pub audit: AuditSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TableSettings {
    pub strip_bom: bool,
    pub header: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TransliterateSettings {
    pub case: CasePolicy,
    pub output_form: OutputForm,
    pub max_unmapped: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuditSettings {
    pub allowed: String,
}

/// How the case of mapped output is treated.
///
/// Neither Hebrew nor Greek case carries over reliably, so the mapper never
/// capitalizes. Sentence-initial and proper-noun capitals are the caller's
/// post-processing step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CasePolicy {
    #[default]
    Lowercase,
    /// Emit table targets exactly as written.
    Preserve,
}

/// Normalization applied to the finished output string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputForm {
    #[default]
    Nfc,
    Nfd,
    /// Targets as written, pass-through text in NFD.
    Raw,
}

pub fn parse_settings_toml(toml_str: &str) -> Result<Settings, SettingsError> {
    let s: Settings = toml::from_str(toml_str).map_err(|e| SettingsError::Parse(e.to_string()))?;
    validate(&s)?;
    Ok(s)
}

fn validate(s: &Settings) -> Result<(), SettingsError> {
    if s.transliterate.max_unmapped == 0 {
        return Err(SettingsError::InvalidValue {
            field: "transliterate.max_unmapped".to_string(),
            reason: "must be positive".to_string(),
        });
    }
    if let Some(c) = s.audit.allowed.chars().find(|c| c.is_control()) {
        return Err(SettingsError::InvalidValue {
            field: "audit.allowed".to_string(),
            reason: format!("control character U+{:04X} is not allowed", c as u32),
        });
    }
    Ok(())
}
