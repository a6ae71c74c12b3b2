//! Policy data model.

use crate::PolicyError;
use policygen_syntax::LocalizedString;
use serde::Serialize;
use std::sync::Arc;

/// A display grouping for policies.
///
/// Identity is the `(key, value)` pair of `name`; the registry keeps one
/// instance per identity. `module_name` is the module that declared it first
/// and is where its label translation is looked up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub name: LocalizedString,
    pub module_name: String,
}

/// A single configuration option exposed to a management console.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Policy {
    /// Document-wide primary key.
    pub name: String,
    pub category: Arc<Category>,
    /// Dotted version token; opaque apart from dot splitting.
    pub minimum_version: String,
    pub description: LocalizedString,
    /// Logical path of the declaring file, used for translation lookups.
    pub module_name: String,
    pub kind: PolicyKind,
}

/// The setting shape behind a policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PolicyKind {
    /// A string setting restricted to literal values.
    StringEnum(StringEnumPolicy),
}

/// Enumerated values with index-aligned localized descriptions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StringEnumPolicy {
    values: Vec<String>,
    descriptions: Vec<LocalizedString>,
}

impl StringEnumPolicy {
    pub fn new(
        values: Vec<String>,
        descriptions: Vec<LocalizedString>,
    ) -> Result<Self, PolicyError> {
        if values.len() != descriptions.len() {
            return Err(PolicyError::LengthMismatch {
                values: values.len(),
                descriptions: descriptions.len(),
            });
        }
        Ok(Self {
            values,
            descriptions,
        })
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn descriptions(&self) -> &[LocalizedString] {
        &self.descriptions
    }

    /// `(value, description)` pairs in declaration order.
    pub fn items(&self) -> impl Iterator<Item = (&str, &LocalizedString)> {
        self.values
            .iter()
            .map(String::as_str)
            .zip(self.descriptions.iter())
    }
}

impl Policy {
    /// Every localized string the policy shows besides its own name.
    pub fn localized_strings(&self) -> Vec<&LocalizedString> {
        let mut strings = vec![&self.description];
        match &self.kind {
            PolicyKind::StringEnum(e) => strings.extend(e.descriptions()),
        }
        strings
    }
}
