//! Translation overlays.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Language-pack id to locale directory, for every language a template is
/// published in.
pub const TARGET_LANGUAGES: &[(&str, &str)] = &[
    ("fr", "fr-fr"),
    ("it", "it-it"),
    ("de", "de-de"),
    ("es", "es-es"),
    ("ru", "ru-ru"),
    ("zh-hans", "zh-cn"),
    ("zh-hant", "zh-tw"),
    ("ja", "ja-jp"),
    ("ko", "ko-kr"),
    ("cs", "cs-cz"),
    ("pt-br", "pt-br"),
    ("tr", "tr-tr"),
    ("pl", "pl-pl"),
];

/// Locale directory for a language-pack id.
pub fn locale_for(language_id: &str) -> Option<&'static str> {
    TARGET_LANGUAGES
        .iter()
        .find(|(id, _)| *id == language_id)
        .map(|(_, locale)| *locale)
}

/// Per-module, per-key strings for one language.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LanguageTranslations(HashMap<String, HashMap<String, String>>);

impl LanguageTranslations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, module: &str, key: &str, text: &str) {
        self.0
            .entry(module.to_string())
            .or_default()
            .insert(key.to_string(), text.to_string());
    }

    /// The override for `key` in `module`. Empty strings count as missing.
    pub fn lookup(&self, module: &str, key: &str) -> Option<&str> {
        self.0
            .get(module)
            .and_then(|strings| strings.get(key))
            .map(String::as_str)
            .filter(|text| !text.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.0.values().all(HashMap::is_empty)
    }
}

/// Overlays by language-pack id.
pub type Translations = BTreeMap<String, LanguageTranslations>;
