use crate::translations::locale_for;
use crate::{Product, RenderError, Translations, render_adml, render_admx};
use policygen_policies::PolicySet;
use serde::Serialize;

/// Locale directory of the untranslated presentation document.
pub const SOURCE_LOCALE: &str = "en-us";

/// One ADML document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalizedDocument {
    /// Directory name the document is published under, e.g. `zh-cn`.
    pub locale: String,
    /// Language-pack id the overlay came from; `None` for the source language.
    pub language_id: Option<String>,
    pub body: String,
}

/// Every document of one run, rendered in memory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedDocuments {
    pub admx: String,
    /// Source language first, then translations ordered by language id.
    pub adml: Vec<LocalizedDocument>,
}

/// Render the definition document, the source-language presentation
/// document, and one presentation document per entry of `translations`.
pub fn render_documents(
    product: &Product,
    set: &PolicySet,
    translations: &Translations,
) -> Result<RenderedDocuments, RenderError> {
    let policies = set.policies();
    let categories = set.categories();

    let admx = render_admx(product, policies, categories)?;
    let mut adml = vec![LocalizedDocument {
        locale: SOURCE_LOCALE.to_string(),
        language_id: None,
        body: render_adml(product, policies, categories, None)?,
    }];

    for (language_id, overlay) in translations {
        if overlay.is_empty() {
            tracing::debug!(language = %language_id, "no translations, using source strings");
        }
        let locale = locale_for(language_id)
            .map(str::to_string)
            .unwrap_or_else(|| language_id.to_lowercase());
        adml.push(LocalizedDocument {
            locale,
            language_id: Some(language_id.clone()),
            body: render_adml(product, policies, categories, Some(overlay))?,
        });
    }

    tracing::info!(
        policies = policies.len(),
        categories = categories.len(),
        languages = adml.len(),
        "rendered policy templates"
    );
    Ok(RenderedDocuments { admx, adml })
}
