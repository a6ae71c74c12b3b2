//! Translation fetching from published language packs.

use policygen_render::{LanguageTranslations, Translations};
use rayon::prelude::*;
use serde::Deserialize;

const PUBLISHER: &str = "ms-ceintl";
const TRANSLATIONS_PATH: &str = "extension/translations/main.i18n.json";

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Http(Box<ureq::Error>),
    #[error("invalid language pack: {0}")]
    Decode(#[from] std::io::Error),
}

/// Somewhere per-language translation tables come from.
pub trait TranslationSource: Send + Sync {
    fn fetch(&self, language_id: &str, version: &str) -> Result<LanguageTranslations, FetchError>;
}

/// Language packs served from the extension gallery.
pub struct LanguagePackSource {
    agent: ureq::Agent,
    resource_url_template: String,
}

#[derive(Deserialize)]
struct LanguagePack {
    contents: LanguageTranslations,
}

impl LanguagePackSource {
    pub fn new(resource_url_template: impl Into<String>) -> Self {
        Self {
            agent: ureq::agent(),
            resource_url_template: resource_url_template.into(),
        }
    }

    /// URL of the translations for `language_id` at `version`.
    pub fn url(&self, language_id: &str, version: &str) -> String {
        self.resource_url_template
            .replace("{publisher}", PUBLISHER)
            .replace("{name}", &format!("vscode-language-pack-{language_id}"))
            .replace("{version}", version)
            .replace("{path}", TRANSLATIONS_PATH)
    }
}

impl TranslationSource for LanguagePackSource {
    fn fetch(&self, language_id: &str, version: &str) -> Result<LanguageTranslations, FetchError> {
        let url = self.url(language_id, version);
        tracing::debug!(language = language_id, %url, "fetching language pack");
        let response = self
            .agent
            .get(&url)
            .set("User-Agent", "policygen")
            .call()
            .map_err(|e| FetchError::Http(Box::new(e)))?;
        let pack: LanguagePack = response.into_json()?;
        Ok(pack.contents)
    }
}

/// Fetch every language concurrently.
///
/// A language that cannot be fetched is logged and gets an empty table, so
/// its documents fall back to the source strings.
pub fn fetch_translations(
    source: &dyn TranslationSource,
    languages: &[String],
    version: &str,
) -> Translations {
    languages
        .par_iter()
        .map(|language_id| {
            let table = source.fetch(language_id, version).unwrap_or_else(|e| {
                tracing::warn!(
                    language = %language_id,
                    error = %e,
                    "failed to fetch translations, using source strings"
                );
                LanguageTranslations::new()
            });
            (language_id.clone(), table)
        })
        .collect()
}

/// Empty tables for `languages`, for runs without a language-pack source.
pub fn untranslated(languages: &[String]) -> Translations {
    languages
        .iter()
        .map(|id| (id.clone(), LanguageTranslations::new()))
        .collect()
}
