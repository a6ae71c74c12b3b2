//! ADML presentation documents.

use crate::ids::{ROOT_CATEGORY, category_string_id, policy_string_id, version_id};
use crate::xml::XmlWriter;
use crate::{LanguageTranslations, Product, RenderError, supported_versions};
use policygen_policies::{Category, LocalizedString, Policy, PolicyKind};
use std::sync::Arc;

/// Render the presentation document for one language.
///
/// Every localized string is looked up in `overlay` under the module that
/// declared it; without an overlay, or without an entry, the default text
/// from the source is used.
pub fn render_adml(
    product: &Product,
    policies: &[Policy],
    categories: &[Arc<Category>],
    overlay: Option<&LanguageTranslations>,
) -> Result<String, RenderError> {
    AdmlWriter {
        xml: XmlWriter::new()?,
        product,
        overlay,
    }
    .emit(policies, categories)
}

struct AdmlWriter<'a> {
    xml: XmlWriter,
    product: &'a Product,
    overlay: Option<&'a LanguageTranslations>,
}

impl<'a> AdmlWriter<'a> {
    fn emit(mut self, policies: &[Policy], categories: &[Arc<Category>]) -> Result<String, RenderError> {
        self.xml.open(
            "policyDefinitionResources",
            &[("revision", "1.0"), ("schemaVersion", "1.0")],
        )?;
        self.xml.empty("displayName", &[])?;
        self.xml.empty("description", &[])?;
        self.xml.open("resources", &[])?;

        let product = self.product;
        self.xml.open("stringTable", &[])?;
        self.write_string(ROOT_CATEGORY, &product.app_name)?;
        for version in supported_versions(policies) {
            let label = format!("{} >= {}", product.app_name, version);
            self.write_string(&version_id(version), &label)?;
        }
        for category in categories {
            let label = self.resolve(&category.module_name, &category.name);
            self.write_string(&category_string_id(category), label)?;
        }
        for policy in policies {
            self.write_policy_strings(policy)?;
        }
        self.xml.close("stringTable")?;

        self.xml.open("presentationTable", &[])?;
        for policy in policies {
            self.write_presentation(policy)?;
        }
        self.xml.close("presentationTable")?;

        self.xml.close("resources")?;
        self.xml.close("policyDefinitionResources")?;
        self.xml.finish()
    }

    fn write_policy_strings(&mut self, policy: &Policy) -> Result<(), RenderError> {
        self.write_string(&policy.name, &policy.name)?;
        for text in policy.localized_strings() {
            let label = self.resolve(&policy.module_name, text);
            self.write_string(&policy_string_id(policy, text), label)?;
        }
        Ok(())
    }

    fn write_presentation(&mut self, policy: &Policy) -> Result<(), RenderError> {
        self.xml.open("presentation", &[("id", &policy.name)])?;
        match &policy.kind {
            PolicyKind::StringEnum(_) => {
                self.xml.empty("dropdownList", &[("refId", &policy.name)])?;
            }
        }
        self.xml.close("presentation")
    }

    fn write_string(&mut self, id: &str, text: &str) -> Result<(), RenderError> {
        self.xml.text_element("string", &[("id", id)], text)
    }

    fn resolve<'t>(&self, module: &str, text: &'t LocalizedString) -> &'t str
    where
        'a: 't,
    {
        self.overlay
            .and_then(|overlay| overlay.lookup(module, &text.key))
            .unwrap_or(&text.value)
    }
}
