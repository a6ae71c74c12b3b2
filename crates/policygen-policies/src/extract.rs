//! Policy extraction from configuration registration sites.

use crate::{CategoryRegistry, LocalizedString, Policy, PolicyError, PolicyKind, StringEnumPolicy};
use policygen_syntax::{
    Node, Pattern, PropertyDescriptor, PropertyExtractor, ScalarString, StringArray, StringValue,
    parse_typescript, string_literal,
};
use std::collections::HashSet;

/// Every `registerConfiguration({ properties: { '<setting>': { policy: {...} } } })`
/// site. The registration object must be the call's only argument.
const POLICY_SITES: &str = r#"(call_expression
  function: [
    (identifier) @register
    (member_expression property: (property_identifier) @register)
  ]
  arguments: (arguments
    .
    (object
      (pair
        key: [
          (property_identifier) @properties.key
          (string (string_fragment) @properties.key)
        ]
        value: (object
          (pair
            key: [
              (property_identifier) @setting.key
              (string) @setting.key
            ]
            value: (object
              (pair
                key: [
                  (property_identifier) @policy.key
                  (string (string_fragment) @policy.key)
                ]
                value: (object) @policy)) @setting))))
    .)
  (#eq? @register "registerConfiguration")
  (#eq? @properties.key "properties")
  (#eq? @policy.key "policy"))"#;

/// A validated policy declaration whose category has not been resolved yet.
///
/// Produced without touching shared state, so files can be processed in
/// parallel and their declarations resolved afterwards in a fixed order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyDeclaration {
    /// Key of the setting the policy governs.
    pub setting: String,
    pub name: String,
    pub minimum_version: String,
    pub description: LocalizedString,
    pub category: LocalizedString,
    pub module_name: String,
    pub kind: PolicyKind,
}

impl PolicyDeclaration {
    /// Resolve the category through `registry` and build the policy.
    pub fn into_policy(self, registry: &mut CategoryRegistry) -> Policy {
        let category = registry.get_or_create(self.category, &self.module_name);
        Policy {
            name: self.name,
            category,
            minimum_version: self.minimum_version,
            description: self.description,
            module_name: self.module_name,
            kind: self.kind,
        }
    }
}

/// Finds and validates policy declarations in TypeScript sources.
pub struct PolicyExtractor {
    properties: PropertyExtractor,
    sites: Pattern,
}

impl PolicyExtractor {
    pub fn new() -> Result<Self, PolicyError> {
        Ok(Self {
            properties: PropertyExtractor::new(),
            sites: Pattern::new(POLICY_SITES)?,
        })
    }

    /// Every policy declared in `text`, validated, in source order.
    ///
    /// The first invalid declaration fails the whole file; the error names
    /// `module_name`.
    pub fn declarations(
        &self,
        module_name: &str,
        text: &str,
    ) -> Result<Vec<PolicyDeclaration>, PolicyError> {
        self.declarations_inner(module_name, text)
            .map_err(|e| e.in_module(module_name))
    }

    /// Extract the policies in `text`, resolving categories through `registry`.
    pub fn extract(
        &self,
        module_name: &str,
        text: &str,
        registry: &mut CategoryRegistry,
    ) -> Result<Vec<Policy>, PolicyError> {
        Ok(self
            .declarations(module_name, text)?
            .into_iter()
            .map(|d| d.into_policy(registry))
            .collect())
    }

    fn declarations_inner(
        &self,
        module_name: &str,
        text: &str,
    ) -> Result<Vec<PolicyDeclaration>, PolicyError> {
        let source = parse_typescript(text)?;
        let mut seen = HashSet::new();
        let mut declarations = Vec::new();

        for record in self.sites.matches(source.root(), source.text()) {
            let (Some(setting), Some(policy)) = (record.get("setting"), record.get("policy"))
            else {
                continue;
            };
            if !seen.insert(policy.id()) {
                continue;
            }

            let key = record
                .get("setting.key")
                .map(|node| setting_key(node, source.text()))
                .unwrap_or_default();
            tracing::debug!(module = module_name, setting = %key, "policy site");

            let site = Site {
                extractor: &self.properties,
                source: source.text(),
                setting,
                policy,
            };
            declarations.push(site.declaration(key, module_name)?);
        }

        Ok(declarations)
    }
}

fn setting_key(node: Node, source: &str) -> String {
    if node.kind() == "string" {
        string_literal(node, source)
    } else {
        node.utf8_text(source.as_bytes()).unwrap_or("").to_string()
    }
}

/// One setting object and the policy object nested in it.
struct Site<'a, 'tree> {
    extractor: &'a PropertyExtractor,
    source: &'a str,
    setting: Node<'tree>,
    policy: Node<'tree>,
}

impl Site<'_, '_> {
    fn declaration(&self, setting: String, module_name: &str) -> Result<PolicyDeclaration, PolicyError> {
        let name = plain(self.required(&ScalarString, self.policy, "name")?, "name")?;
        let minimum_version = plain(
            self.required(&ScalarString, self.policy, "minimumVersion")?,
            "minimumVersion",
        )?;
        let description = localized(
            self.required(&ScalarString, self.setting, "description")?,
            "description",
        )?;

        let kind = plain(self.required(&ScalarString, self.setting, "type")?, "type")?;
        if kind != "string" {
            return Err(PolicyError::UnsupportedType(kind));
        }

        let values = self
            .required(&StringArray, self.setting, "enum")?
            .into_iter()
            .map(|v| plain(v, "enum"))
            .collect::<Result<Vec<_>, _>>()?;
        let descriptions = self
            .required(&StringArray, self.setting, "enumDescriptions")?
            .into_iter()
            .map(|v| localized(v, "enumDescriptions"))
            .collect::<Result<Vec<_>, _>>()?;

        let category = localized(
            self.required(&ScalarString, self.policy, "category")?,
            "category",
        )?;

        Ok(PolicyDeclaration {
            setting,
            name,
            minimum_version,
            description,
            category,
            module_name: module_name.to_string(),
            kind: PolicyKind::StringEnum(StringEnumPolicy::new(values, descriptions)?),
        })
    }

    fn required<D: PropertyDescriptor>(
        &self,
        descriptor: &D,
        container: Node<'_>,
        key: &'static str,
    ) -> Result<D::Output, PolicyError> {
        self.extractor
            .extract(descriptor, container, self.source, key)?
            .ok_or(PolicyError::Missing(key))
    }
}

fn plain(value: StringValue, key: &'static str) -> Result<String, PolicyError> {
    match value {
        StringValue::Plain(s) => Ok(s),
        StringValue::Localized(_) => Err(PolicyError::Localized(key)),
    }
}

fn localized(value: StringValue, key: &'static str) -> Result<LocalizedString, PolicyError> {
    match value {
        StringValue::Localized(s) => Ok(s),
        StringValue::Plain(_) => Err(PolicyError::NotLocalized(key)),
    }
}
