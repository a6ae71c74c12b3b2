//! ADMX definition document.

use crate::ids::{
    ROOT_CATEGORY, category_name, category_string_id, policy_string_id, presentation_ref,
    string_ref, version_id,
};
use crate::xml::XmlWriter;
use crate::{Product, RenderError, supported_versions};
use policygen_policies::{Category, Policy, PolicyKind, StringEnumPolicy};
use std::sync::Arc;

/// Render the definition document. It holds no display text, only
/// `$(string.*)` and `$(presentation.*)` references into the ADML.
pub fn render_admx(
    product: &Product,
    policies: &[Policy],
    categories: &[Arc<Category>],
) -> Result<String, RenderError> {
    AdmxWriter {
        xml: XmlWriter::new()?,
        product,
    }
    .emit(policies, categories)
}

struct AdmxWriter<'a> {
    xml: XmlWriter,
    product: &'a Product,
}

impl AdmxWriter<'_> {
    fn emit(mut self, policies: &[Policy], categories: &[Arc<Category>]) -> Result<String, RenderError> {
        self.xml.open(
            "policyDefinitions",
            &[("revision", "1.1"), ("schemaVersion", "1.0")],
        )?;

        let namespace = format!("Microsoft.Policies.{}", self.product.registry_key);
        self.xml.open("policyNamespaces", &[])?;
        self.xml.empty(
            "target",
            &[("prefix", &self.product.registry_key), ("namespace", &namespace)],
        )?;
        self.xml.close("policyNamespaces")?;
        self.xml.empty("resources", &[("minRequiredRevision", "1.0")])?;

        self.write_versions(policies)?;
        self.write_categories(categories)?;

        self.xml.open("policies", &[])?;
        for policy in policies {
            self.write_policy(policy)?;
        }
        self.xml.close("policies")?;

        self.xml.close("policyDefinitions")?;
        self.xml.finish()
    }

    fn write_versions(&mut self, policies: &[Policy]) -> Result<(), RenderError> {
        self.xml.open("supportedOn", &[])?;
        self.xml.open("definitions", &[])?;
        for version in supported_versions(policies) {
            let id = version_id(version);
            self.xml.empty(
                "definition",
                &[("name", &id), ("displayName", &string_ref(&id))],
            )?;
        }
        self.xml.close("definitions")?;
        self.xml.close("supportedOn")
    }

    fn write_categories(&mut self, categories: &[Arc<Category>]) -> Result<(), RenderError> {
        self.xml.open("categories", &[])?;
        self.xml.empty(
            "category",
            &[
                ("displayName", &string_ref(ROOT_CATEGORY)),
                ("name", ROOT_CATEGORY),
            ],
        )?;
        for category in categories {
            self.xml.open(
                "category",
                &[
                    ("displayName", &string_ref(&category_string_id(category))),
                    ("name", category_name(category)),
                ],
            )?;
            self.xml.empty("parentCategory", &[("ref", ROOT_CATEGORY)])?;
            self.xml.close("category")?;
        }
        self.xml.close("categories")
    }

    fn write_policy(&mut self, policy: &Policy) -> Result<(), RenderError> {
        let key = format!(r"Software\Policies\Microsoft\{}", self.product.registry_key);
        self.xml.open(
            "policy",
            &[
                ("name", &policy.name),
                ("class", "Both"),
                ("displayName", &string_ref(&policy.name)),
                (
                    "explainText",
                    &string_ref(&policy_string_id(policy, &policy.description)),
                ),
                ("key", &key),
                ("presentation", &presentation_ref(&policy.name)),
            ],
        )?;
        self.xml
            .empty("parentCategory", &[("ref", category_name(&policy.category))])?;
        self.xml
            .empty("supportedOn", &[("ref", &version_id(&policy.minimum_version))])?;

        self.xml.open("elements", &[])?;
        match &policy.kind {
            PolicyKind::StringEnum(choices) => self.write_string_enum(policy, choices)?,
        }
        self.xml.close("elements")?;

        self.xml.close("policy")
    }

    fn write_string_enum(
        &mut self,
        policy: &Policy,
        choices: &StringEnumPolicy,
    ) -> Result<(), RenderError> {
        self.xml.open(
            "enum",
            &[("id", &policy.name), ("valueName", &policy.name)],
        )?;
        for (value, description) in choices.items() {
            self.xml.open(
                "item",
                &[("displayName", &string_ref(&policy_string_id(policy, description)))],
            )?;
            self.xml.open("value", &[])?;
            self.xml.text_element("string", &[], value)?;
            self.xml.close("value")?;
            self.xml.close("item")?;
        }
        self.xml.close("enum")
    }
}
