//! Group Policy template rendering.
//!
//! A [`PolicySet`](policygen_policies::PolicySet) becomes one ADMX definition
//! document, which refers to all display text indirectly, and one ADML
//! presentation document per language, which resolves that text.
//!
//! Rendering is a pure function of its inputs: the same policies and
//! translations always produce byte-identical documents.

mod adml;
mod admx;
mod documents;
mod ids;
mod translations;
mod version;
mod xml;

pub use adml::render_adml;
pub use admx::render_admx;
pub use documents::{LocalizedDocument, RenderedDocuments, SOURCE_LOCALE, render_documents};
pub use ids::{ROOT_CATEGORY, version_id};
pub use translations::{LanguageTranslations, TARGET_LANGUAGES, Translations, locale_for};
pub use version::{compare_versions, supported_versions};

use serde::{Deserialize, Serialize};

/// Product identity written into the templates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Display name, used for the root category and version labels.
    pub app_name: String,
    /// Registry key and policy namespace suffix.
    pub registry_key: String,
}

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("failed to write XML: {0}")]
    Xml(String),
}
