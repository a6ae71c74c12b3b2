//! End-to-end generation: discover, extract, fetch, render, write.

use crate::config::PolicygenConfig;
use crate::discover::{SourceFile, discover_sources};
use crate::fetch::{LanguagePackSource, TranslationSource, fetch_translations, untranslated};
use crate::output::{write_documents, write_json};
use crate::product::{ProductInfo, load_product};
use anyhow::Context;
use policygen_policies::{CategoryRegistry, PolicyDeclaration, PolicyExtractor, PolicySet};
use policygen_render::{Translations, render_documents};
use rayon::prelude::*;
use std::path::{Path, PathBuf};

/// What a run produced.
#[derive(Debug)]
pub struct Summary {
    pub files: usize,
    pub policies: usize,
    pub categories: usize,
    pub written: Vec<PathBuf>,
}

/// Generate the policy templates for the project at `root`.
///
/// `source` replaces the language-pack source derived from `product.json`.
/// Nothing is written unless every declaration is valid.
pub fn run(
    root: &Path,
    config: &PolicygenConfig,
    source: Option<&dyn TranslationSource>,
) -> anyhow::Result<Summary> {
    let info = load_product(root).context("failed to load product metadata")?;
    let files = discover_sources(root, &config.discovery)?;
    let set = extract_policies(&files)?;
    tracing::info!(
        files = files.len(),
        policies = set.len(),
        categories = set.categories().len(),
        "extracted policies"
    );

    let translations = translations(config, &info, source);
    let documents = render_documents(&info.product, &set, &translations)?;

    let out_dir = config.output.dir(root);
    let mut written = write_documents(&out_dir, &info.product.registry_key, &documents)?;
    if let Some(json) = config.output.json(root) {
        write_json(&json, &set)?;
        written.push(json);
    }

    Ok(Summary {
        files: files.len(),
        policies: set.len(),
        categories: set.categories().len(),
        written,
    })
}

/// Parse and validate every file in parallel, then resolve categories in
/// discovery order so the first declaration of a category always wins.
pub fn extract_policies(files: &[SourceFile]) -> anyhow::Result<PolicySet> {
    let extractor = PolicyExtractor::new()?;

    let results: Vec<anyhow::Result<Vec<PolicyDeclaration>>> = files
        .par_iter()
        .map(|file| {
            let text = std::fs::read_to_string(&file.path)
                .with_context(|| format!("failed to read {}", file.path.display()))?;
            let declarations = extractor.declarations(&file.module_name, &text)?;
            tracing::debug!(
                module = %file.module_name,
                count = declarations.len(),
                "extracted declarations"
            );
            Ok(declarations)
        })
        .collect();

    let mut registry = CategoryRegistry::new();
    let mut policies = Vec::new();
    for result in results {
        for declaration in result? {
            policies.push(declaration.into_policy(&mut registry));
        }
    }

    Ok(PolicySet::new(policies, registry)?)
}

fn translations(
    config: &PolicygenConfig,
    info: &ProductInfo,
    source: Option<&dyn TranslationSource>,
) -> Translations {
    if !config.translations.enabled() {
        return Translations::new();
    }
    let languages = config.translations.languages();
    let version = config
        .translations
        .version
        .as_deref()
        .unwrap_or(&info.version);

    if let Some(source) = source {
        return fetch_translations(source, &languages, version);
    }

    let template = config
        .translations
        .resource_url_template
        .as_ref()
        .or(info.resource_url_template.as_ref());
    match template {
        Some(template) => {
            let source = LanguagePackSource::new(template.as_str());
            fetch_translations(&source, &languages, version)
        }
        None => {
            tracing::warn!("no language pack URL template configured, using source strings");
            untranslated(&languages)
        }
    }
}
